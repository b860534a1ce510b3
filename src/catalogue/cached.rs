//! Cached catalogue provider implementation
//!
//! This module provides a caching wrapper for catalogue providers that keeps
//! formatted pages in memory for a limited time.

use super::{CatalogueError, CatalogueProvider, ListingRequest};
use crate::cache::ResponseCache;
use crate::metadata::Meta;
use async_trait::async_trait;
use std::time::Duration;

/// A caching wrapper for catalogue providers
///
/// This provider wraps another catalogue provider and memoizes each page,
/// keyed by the endpoint and its parameters, for the cache's TTL. Failed
/// fetches are not cached.
pub(crate) struct CachedCatalogueProvider<P>
where
    P: CatalogueProvider,
{
    /// The underlying catalogue provider
    provider: P,
    /// Formatted pages by request key
    cache: ResponseCache<Vec<Meta>>,
}

impl<P> CachedCatalogueProvider<P>
where
    P: CatalogueProvider,
{
    /// Creates a cached provider wrapping the given provider
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let tmdb = TmdbCatalogueProvider::new(client);
    /// let cached = CachedCatalogueProvider::new(tmdb, Duration::from_secs(1800));
    /// ```
    pub(crate) fn new(provider: P, ttl: Duration) -> Self {
        Self {
            provider,
            cache: ResponseCache::new(ttl),
        }
    }

    /// Returns the wrapped provider
    #[cfg(test)]
    fn inner(&self) -> &P {
        &self.provider
    }

    /// Returns the response cache
    #[cfg(test)]
    fn cache(&self) -> &ResponseCache<Vec<Meta>> {
        &self.cache
    }
}

#[async_trait]
impl<P> CatalogueProvider for CachedCatalogueProvider<P>
where
    P: CatalogueProvider,
{
    async fn fetch(&self, request: &ListingRequest) -> Result<Vec<Meta>, CatalogueError> {
        self.cache
            .get_or_compute(&request.cache_key(), || self.provider.fetch(request))
            .await
    }
}
