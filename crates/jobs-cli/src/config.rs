//! Building a [`PipelineConfig`] from a TOML file and command-line overrides.

use std::path::Path;

use anyhow::{Context, Result, bail};

use jobs_model::{PipelineConfig, SourceConfig};

use crate::cli::SourceArgs;

/// Reads a TOML pipeline configuration.
pub fn load_config_file(path: &Path) -> Result<PipelineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

/// Resolves the effective configuration.
///
/// Command-line sources replace configured ones. The auth token is read from
/// the environment variable named by `auth_token_env`.
pub fn resolve_config(args: &SourceArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => PipelineConfig::default(),
    };

    if !args.sources.is_empty() {
        config.sources = args
            .sources
            .iter()
            .enumerate()
            .map(|(idx, location)| SourceConfig::new(source_name(idx), location.clone()))
            .collect();
    }
    if let Some(location) = &args.extended {
        config.extended = Some(SourceConfig::new("extended", location.clone()));
    }
    if args.include_closed {
        config.upcoming_only = false;
    }
    if let Some(template) = &args.link_template {
        config.link_template = Some(template.clone());
    }
    if config.sources.is_empty() {
        bail!("no sources configured (pass --source or --config)");
    }

    let token = config
        .auth_token_env
        .as_deref()
        .and_then(|var| std::env::var(var).ok())
        .filter(|token| !token.trim().is_empty());
    Ok(config.with_auth_token(token))
}

fn source_name(idx: usize) -> String {
    match idx {
        0 => "current".to_string(),
        n => format!("source{}", n + 1),
    }
}
