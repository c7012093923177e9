//! Caching layer for route listings.
//!
//! Finding a line's route+directions means walking the site index and
//! submitting the line search. The listing does not depend on the service
//! date, so it is looked up once per line and reused for every date.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::LineId;
use crate::source::{RouteLink, SourceError, TimetableClient};

/// Cached route listing for one line.
type RouteEntry = Arc<Vec<RouteLink>>;

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
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 100,
        }
    }
}

/// Cache of route listings keyed by line.
pub struct RouteCache {
    routes: MokaCache<LineId, RouteEntry>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { routes }
    }

    /// Get a cached listing.
    pub async fn get(&self, line: &LineId) -> Option<RouteEntry> {
        self.routes.get(line).await
    }

    /// Insert a listing into the cache.
    pub async fn insert(&self, line: LineId, entry: RouteEntry) {
        self.routes.insert(line, entry).await;
    }

    /// Number of cached listings.
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }
}

/// Timetable client with cached route listings.
///
/// Timetable pages themselves are never cached; each (line, date) pair is
/// fetched once per invocation anyway.
pub struct CachedTimetableClient {
    client: TimetableClient,
    cache: RouteCache,
}

impl CachedTimetableClient {
    /// Create a new cached client.
    pub fn new(client: TimetableClient, cache_config: &CacheConfig) -> Self {
        Self {
            client,
            cache: RouteCache::new(cache_config),
        }
    }

    /// List a line's route+directions, using the cache if available.
    pub async fn find_routes(&self, line: &LineId) -> Result<RouteEntry, SourceError> {
        if let Some(cached) = self.cache.get(line).await {
            return Ok(cached);
        }

        debug!(
            line = %line,
            operator = self.client.operator(),
            cached_lines = self.cache.entry_count(),
            "route listing not cached"
        );
        let routes = Arc::new(self.client.find_routes(line).await?);
        self.cache.insert(line.clone(), routes.clone()).await;

        Ok(routes)
    }

    /// Access the underlying client for timetable pages.
    pub fn client(&self) -> &TimetableClient {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TimetableClientConfig;
    use reqwest::Url;

    fn routes(label: &str) -> RouteEntry {
        Arc::new(vec![RouteLink {
            label: label.to_string(),
            url: Url::parse("https://example.com/route.asp?sens=1").unwrap(),
        }])
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 100);
    }

    #[tokio::test]
    async fn get_after_insert() {
        let cache = RouteCache::new(&CacheConfig::default());
        let line = LineId::parse("12").unwrap();

        assert!(cache.get(&line).await.is_none());
        cache.insert(line.clone(), routes("A - B")).await;

        let cached = cache.get(&line).await.unwrap();
        assert_eq!(cached[0].label, "A - B");
        assert!(cache.get(&LineId::parse("13").unwrap()).await.is_none());
    }

    #[tokio::test]
    async fn cached_listing_skips_network() {
        // Unroutable base URL: any real lookup would fail
        let client = TimetableClient::new(
            TimetableClientConfig::new()
                .with_base_url("http://127.0.0.1:9/")
                .with_timeout(1),
        )
        .unwrap();
        let cached = CachedTimetableClient::new(client, &CacheConfig::default());
        let line = LineId::parse("12").unwrap();

        assert!(cached.find_routes(&line).await.is_err());

        cached.cache.insert(line.clone(), routes("A - B")).await;
        let found = cached.find_routes(&line).await.unwrap();
        assert_eq!(found[0].label, "A - B");
    }
}
