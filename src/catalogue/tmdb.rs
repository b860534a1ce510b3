/// TMDB-backed catalogue provider implementation.
use super::{CatalogueError, CatalogueProvider, ListingRequest};
use crate::metadata::{IdResolver, Meta, MetaFormatter};
use crate::tmdb::TmdbClient;
use crate::tmdb::types::{Page, RawRecord};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Catalogue provider that fetches listings from TMDB.
///
/// Each fetch requests exactly one listing page, then formats its records
/// concurrently. Errors on the listing request are returned to the caller;
/// records whose IMDb id cannot be resolved are silently left out.
pub(crate) struct TmdbCatalogueProvider {
    client: Arc<TmdbClient>,
    formatter: MetaFormatter,
}

impl TmdbCatalogueProvider {
    /// Creates a provider with its own identifier resolver.
    pub(crate) fn new(client: Arc<TmdbClient>) -> Self {
        let formatter = MetaFormatter::new(IdResolver::new(Arc::clone(&client)));
        Self { client, formatter }
    }
}

#[async_trait]
impl CatalogueProvider for TmdbCatalogueProvider {
    async fn fetch(&self, request: &ListingRequest) -> Result<Vec<Meta>, CatalogueError> {
        let page: Page<RawRecord> = self.client.get(&request.path, &request.params).await?;

        let metas = self.formatter.format_page(request.kind, &page.results).await;

        debug!(
            path = %request.path,
            page = page.page,
            total_pages = page.total_pages,
            records = page.results.len(),
            formatted = metas.len(),
            "Fetched catalogue page"
        );

        Ok(metas)
    }
}
