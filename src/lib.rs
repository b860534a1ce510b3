//! Catalogue add-on - TMDB listings for media-browsing clients
//!
//! This library republishes TMDB discover, listing and search results as
//! named, paginated catalogues. TMDB ids are translated to IMDb ids, records
//! are shaped into the client's metadata format, and pages are cached in
//! memory to reduce upstream load.

mod addon;
mod cache;
mod catalogue;
mod config;
mod metadata;
mod tmdb;

use catalogue::registry::CATALOGUES;
use catalogue::{CachedCatalogueProvider, TmdbCatalogueProvider};
use std::sync::Arc;
use thiserror::Error;
use tmdb::TmdbClient;
use tracing::info;

// Re-export error types
pub use catalogue::CatalogueError;
pub use tmdb::UpstreamError;

// Re-export the public API
pub use addon::{Addon, CatalogueResponse, Extra, Manifest, router};
pub use catalogue::{PAGE_SIZE, page_for_skip};
pub use config::Config;
pub use metadata::{ExternalId, MediaKind, Meta};

/// Top-level error type for the add-on
#[derive(Debug, Error)]
pub enum AddonError {
    /// Error talking to TMDB
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Error fetching a catalogue
    #[error("Catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),

    /// IO error while binding or serving
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the add-on for a configuration
///
/// The add-on fetches from TMDB through a response cache with the
/// configured TTL. Each call builds fresh caches.
pub fn build_addon(config: &Config) -> Result<Addon, AddonError> {
    let client = Arc::new(TmdbClient::with_base_url(
        &config.api_key,
        &config.base_url,
        &config.language,
    )?);
    let provider =
        CachedCatalogueProvider::new(TmdbCatalogueProvider::new(client), config.cache_ttl());

    Ok(Addon::new(Arc::new(provider)))
}

/// Serves the add-on until the process is stopped
///
/// # Examples
///
/// ```no_run
/// use catalogue_addon::{Config, serve};
/// use clap::Parser;
///
/// # async fn run() -> Result<(), catalogue_addon::AddonError> {
/// let config = Config::parse();
/// serve(&config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: &Config) -> Result<(), AddonError> {
    let addon = Arc::new(build_addon(config)?);
    let app = router(addon);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        %addr,
        catalogues = CATALOGUES.len(),
        "Serving manifest at http://{}/manifest.json",
        addr
    );

    axum::serve(listener, app).await?;
    Ok(())
}
