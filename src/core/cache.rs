//! TTL cache for computed results (sentiment reports, section diffs).
//!
//! Unlike a response-body cache, entries here carry caller-visible metadata:
//! every lookup reports whether the value came from the cache or was freshly
//! computed, and when it was stored and will expire.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::core::EdgarError;

/// Whether a response was served from the cache or freshly computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheSource {
    /// Served from a stored entry within its TTL.
    Cache,
    /// Computed on this call (miss, expiry, or forced refresh).
    Fresh,
}

/// A computed value together with its cache provenance.
#[derive(Debug, Clone, Serialize)]
pub struct Cached<V> {
    /// The computed result.
    pub value: V,
    /// Where the value came from on this call.
    pub source: CacheSource,
    /// When the value was computed and stored.
    pub cached_at: DateTime<Utc>,
    /// When the stored value expires.
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    cached_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// A keyed TTL cache over clonable computed values.
#[derive(Debug)]
pub struct ResultCache<V> {
    map: RwLock<HashMap<String, Entry<V>>>,
}

impl<V> Default for ResultCache<V> {
    fn default() -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
        }
    }
}

impl<V: Clone> ResultCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored value for `key` if it is within its TTL, otherwise run
    /// `compute`, store the result with a fresh expiry, and return it.
    ///
    /// With `refresh` set, the read is bypassed but the new result is still
    /// written, so subsequent calls observe the refreshed value.
    pub async fn get_or_compute<F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        refresh: bool,
        compute: F,
    ) -> Result<Cached<V>, EdgarError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, EdgarError>>,
    {
        if !refresh {
            let guard = self.map.read().await;
            if let Some(entry) = guard.get(key)
                && Utc::now() <= entry.expires_at
            {
                return Ok(Cached {
                    value: entry.value.clone(),
                    source: CacheSource::Cache,
                    cached_at: entry.cached_at,
                    expires_at: entry.expires_at,
                });
            }
        }

        let value = compute().await?;

        let cached_at = Utc::now();
        let ttl = chrono::Duration::from_std(ttl).unwrap_or_else(|_| {
            tracing::warn!(key, "cache TTL out of range, falling back to 15 minutes");
            chrono::Duration::minutes(15)
        });
        let expires_at = cached_at + ttl;

        let mut guard = self.map.write().await;
        guard.insert(
            key.to_string(),
            Entry {
                value: value.clone(),
                cached_at,
                expires_at,
            },
        );

        Ok(Cached {
            value,
            source: CacheSource::Fresh,
            cached_at,
            expires_at,
        })
    }
}
