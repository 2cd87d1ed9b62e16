//! Time-bounded result cache.
//!
//! Holds at most one value. Expiry is purely time based; nothing invalidates
//! an entry early except an explicit refresh.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{IngestError, Result};

struct Cached<T> {
    value: T,
    fetched_at: Instant,
}

/// Single-slot cache that refills itself once its entry is older than the TTL.
pub struct TtlCache<T> {
    ttl: Duration,
    slot: Mutex<Option<Cached<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value while fresh, otherwise calls `fill` and stores its result.
    ///
    /// The lock is held across `fill`, so concurrent callers fill at most once
    /// per TTL. A failed fill leaves the previous entry in place.
    pub fn get_or_try_fill<E, F>(&self, force_refresh: bool, fill: F) -> std::result::Result<T, E>
    where
        F: FnOnce() -> std::result::Result<T, E>,
        E: From<IngestError>,
    {
        let mut slot = self.slot.lock().map_err(|_| IngestError::Cache {
            message: "cache lock poisoned".to_string(),
        })?;

        if !force_refresh
            && let Some(cached) = slot.as_ref()
            && cached.fetched_at.elapsed() < self.ttl
        {
            debug!(
                age_ms = cached.fetched_at.elapsed().as_millis(),
                "cache hit"
            );
            return Ok(cached.value.clone());
        }

        let value = fill()?;
        *slot = Some(Cached {
            value: value.clone(),
            fetched_at: Instant::now(),
        });
        Ok(value)
    }

    /// Returns the cached value if it is still fresh.
    pub fn peek(&self) -> Result<Option<T>> {
        let slot = self.slot.lock().map_err(|_| IngestError::Cache {
            message: "cache lock poisoned".to_string(),
        })?;
        Ok(slot
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| cached.value.clone()))
    }

    /// Drops the cached entry.
    pub fn clear(&self) -> Result<()> {
        let mut slot = self.slot.lock().map_err(|_| IngestError::Cache {
            message: "cache lock poisoned".to_string(),
        })?;
        *slot = None;
        Ok(())
    }
}
