//! Caching layer for advisory replies.
//!
//! The advisory service is slow and its answer for a given route rarely
//! changes, so replies are cached by request for a while. Errors are never
//! cached.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use super::error::AdvisoryError;
use super::{AdvisoryProvider, AdvisoryRequest};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15 * 60),
            max_capacity: 1000,
        }
    }
}

/// Advisory provider with caching.
pub struct CachedAdvisor<P> {
    inner: P,
    replies: MokaCache<AdvisoryRequest, String>,
}

impl<P: AdvisoryProvider> CachedAdvisor<P> {
    /// Wrap `inner` with a cache.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let replies = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, replies }
    }

    /// Approximate number of cached replies.
    pub fn cached_replies(&self) -> u64 {
        self.replies.entry_count()
    }

    /// Forget every cached reply. Advice describes a catalog, so it goes
    /// stale when the catalog is replaced.
    pub fn forget_replies(&self) {
        self.replies.invalidate_all();
    }
}

impl<P: AdvisoryProvider> AdvisoryProvider for CachedAdvisor<P> {
    async fn advise(&self, request: &AdvisoryRequest) -> Result<String, AdvisoryError> {
        if let Some(cached) = self.replies.get(request).await {
            trace!(origin = %request.origin, destination = %request.destination, "Advice cache hit");
            return Ok(cached);
        }

        let advice = self.inner.advise(request).await?;
        self.replies.insert(request.clone(), advice.clone()).await;
        Ok(advice)
    }
}
