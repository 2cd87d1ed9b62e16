//! Retrieval of raw source bytes.
//!
//! The pipeline only depends on [`SourceFetcher`]; HTTP and local-file
//! implementations are provided, and callers may substitute their own.

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use tracing::debug;

use jobs_model::PipelineConfig;

use crate::error::{IngestError, Result};

/// Retrieval collaborator: turns a source location into raw bytes.
pub trait SourceFetcher: Send + Sync {
    fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// Fetches `http://` and `https://` locations with a bounded timeout.
pub struct HttpFetcher {
    client: Client,
    token: Option<String>,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IngestError::unavailable("http client", e))?;
        Ok(Self { client, token })
    }
}

impl SourceFetcher for HttpFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        debug!(location, "fetching source over http");
        let mut request = self.client.get(location).header(
            USER_AGENT,
            format!("jobs-explorer/{}", env!("CARGO_PKG_VERSION")),
        );
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {token}"));
        }
        let response = request.send().map_err(|e| {
            let reason = if e.is_timeout() {
                "request timed out".to_string()
            } else {
                e.to_string()
            };
            IngestError::unavailable(location, reason)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::unavailable(location, format!("HTTP {}", status.as_u16())));
        }

        let body = response
            .bytes()
            .map_err(|e| IngestError::unavailable(location, e))?;
        Ok(body.to_vec())
    }
}

/// Reads sources from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileFetcher;

impl SourceFetcher for FileFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let path = location.strip_prefix("file://").unwrap_or(location);
        debug!(path, "reading source from disk");
        std::fs::read(Path::new(path)).map_err(|e| IngestError::unavailable(location, e))
    }
}

/// Dispatches to HTTP or file retrieval by the location's scheme.
pub struct LocationFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl LocationFetcher {
    pub fn new(timeout: Duration, token: Option<String>) -> Result<Self> {
        Ok(Self {
            http: HttpFetcher::new(timeout, token)?,
            file: FileFetcher,
        })
    }

    /// Builds a fetcher from the pipeline's timeout and token settings.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        Self::new(config.fetch_timeout(), config.auth_token.clone())
    }
}

impl SourceFetcher for LocationFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        if is_remote(location) {
            self.http.fetch(location)
        } else {
            self.file.fetch(location)
        }
    }
}

/// True for locations that must be fetched over the network.
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
