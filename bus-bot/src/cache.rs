//! Caching layer for intent resolution.
//!
//! Users repeat themselves ("me voy ya", "próximo micro a la facultad"), and
//! each resolution is a paid language model call. Resolved intents are cached
//! by normalised message text; the intent never depends on the clock, so a
//! cached intent stays correct while the answers built from it change.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::Intent;
use crate::resolver::{IntentResolver, ResolveError, ScheduleHints};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_capacity(mut self, n: u64) -> Self {
        self.max_capacity = n;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Cache key for a message: lower-cased, whitespace collapsed.
fn cache_key(message: &str) -> String {
    message
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Resolver with caching.
///
/// Wraps any resolver and caches successful resolutions. Failures are never
/// cached, so a transient outage does not stick.
pub struct CachedResolver<R> {
    inner: R,
    intents: MokaCache<String, Intent>,
}

impl<R> CachedResolver<R> {
    /// Create a new cached resolver.
    pub fn new(inner: R, config: &CacheConfig) -> Self {
        let intents = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, intents }
    }

    /// Access the underlying resolver.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.intents.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.intents.invalidate_all();
    }
}

impl<R: IntentResolver + Sync> IntentResolver for CachedResolver<R> {
    async fn resolve(&self, message: &str, hints: &ScheduleHints) -> Result<Intent, ResolveError> {
        let key = cache_key(message);

        if let Some(cached) = self.intents.get(&key).await {
            debug!(key = %key, "intent cache hit");
            return Ok(cached);
        }

        let intent = self.inner.resolve(message, hints).await?;
        self.intents.insert(key, intent.clone()).await;
        debug!(entries = self.cache_entry_count(), "intent cached");
        Ok(intent)
    }
}
