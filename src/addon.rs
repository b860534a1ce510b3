//! Add-on HTTP surface
//!
//! This module exposes the manifest and the catalogue endpoints the consuming
//! client calls, and dispatches catalogue requests to the registry and the
//! catalogue provider. Catalogue requests never fail from the client's point
//! of view: any problem yields an empty result list.

use crate::catalogue::registry::{self, CATALOGUES};
use crate::catalogue::{CatalogueError, CatalogueProvider, page_for_skip};
use crate::metadata::{MediaKind, Meta};
use axum::extract::{OriginalUri, Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

/// Add-on identifier advertised in the manifest
const ADDON_ID: &str = "org.catalogue-addon.tmdb";

/// Response body of a catalogue request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogueResponse {
    /// Formatted titles in upstream order
    pub results: Vec<Meta>,
}

/// Extra arguments of a catalogue request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extra {
    /// Zero-based item offset
    pub skip: u64,
    /// Search text for search catalogues
    pub search: Option<String>,
}

impl Extra {
    /// Parses url-form encoded extras such as `skip=20&search=alien`.
    ///
    /// A missing or non-numeric `skip` is treated as 0; unknown keys are
    /// ignored.
    pub fn parse(encoded: &str) -> Self {
        let mut extra = Extra::default();
        for (key, value) in url::form_urlencoded::parse(encoded.as_bytes()) {
            match &*key {
                "skip" => extra.skip = value.trim().parse().unwrap_or(0),
                "search" => extra.search = Some(value.into_owned()),
                _ => {}
            }
        }
        extra
    }
}

/// One extra argument a catalogue accepts
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraDef {
    pub name: &'static str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_required: bool,
}

/// A catalogue entry in the manifest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestCatalogue {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub id: &'static str,
    pub name: &'static str,
    pub extra: Vec<ExtraDef>,
}

/// The add-on manifest served at `/manifest.json`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: &'static str,
    pub version: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub resources: Vec<&'static str>,
    pub types: Vec<MediaKind>,
    pub id_prefixes: Vec<&'static str>,
    pub catalogs: Vec<ManifestCatalogue>,
}

/// Dispatches catalogue requests to the registry and a provider
pub struct Addon {
    provider: Arc<dyn CatalogueProvider>,
}

impl Addon {
    /// Creates an add-on serving catalogues from `provider`
    pub(crate) fn new(provider: Arc<dyn CatalogueProvider>) -> Self {
        Self { provider }
    }

    /// Builds the manifest from the catalogue registry
    pub fn manifest(&self) -> Manifest {
        let catalogs = CATALOGUES
            .iter()
            .map(|def| ManifestCatalogue {
                kind: def.kind,
                id: def.id,
                name: def.name,
                extra: if def.query.is_search() {
                    vec![ExtraDef {
                        name: "search",
                        is_required: true,
                    }]
                } else {
                    vec![ExtraDef {
                        name: "skip",
                        is_required: false,
                    }]
                },
            })
            .collect();

        Manifest {
            id: ADDON_ID,
            version: env!("CARGO_PKG_VERSION"),
            name: "TMDB Catalogues",
            description: "Popular, trending, genre, provider and themed catalogues from TMDB",
            resources: vec!["catalog"],
            types: vec![MediaKind::Movie, MediaKind::Series],
            id_prefixes: vec!["tt"],
            catalogs,
        }
    }

    /// Handles a catalogue request.
    ///
    /// Unknown catalogues and failed fetches are logged and answered with an
    /// empty result list.
    pub async fn catalogue(&self, kind: &str, id: &str, extra: &Extra) -> CatalogueResponse {
        match self.fetch_catalogue(kind, id, extra).await {
            Ok(results) => CatalogueResponse { results },
            Err(err @ CatalogueError::UnknownCatalogue { .. }) => {
                debug!(error = %err, "Ignoring catalogue request");
                CatalogueResponse::default()
            }
            Err(err) => {
                error!(kind, id, skip = extra.skip, error = %err, "Catalogue request failed");
                CatalogueResponse::default()
            }
        }
    }

    async fn fetch_catalogue(
        &self,
        kind: &str,
        id: &str,
        extra: &Extra,
    ) -> Result<Vec<Meta>, CatalogueError> {
        let def = MediaKind::parse(kind)
            .and_then(|kind| registry::find(kind, id))
            .ok_or_else(|| CatalogueError::UnknownCatalogue {
                kind: kind.to_string(),
                id: id.to_string(),
            })?;

        let request = def
            .query
            .listing(def.kind, page_for_skip(extra.skip), extra.search.as_deref())?;

        self.provider.fetch(&request).await
    }
}

/// Returns the still-encoded part of a request path after `/catalog/{kind}/`
fn catalogue_tail(path: &str) -> Option<&str> {
    path.strip_prefix("/catalog/")?
        .split_once('/')
        .map(|(_, rest)| rest)
}

/// Splits the tail of a catalogue path into the catalogue id and its extras.
///
/// Accepts `{id}.json` and `{id}/{extra}.json`.
fn split_catalogue_path(rest: &str) -> (&str, Option<&str>) {
    let rest = rest.strip_suffix(".json").unwrap_or(rest);
    match rest.split_once('/') {
        Some((id, extra)) => (id, Some(extra)),
        None => (rest, None),
    }
}

/// Creates the router serving the manifest and catalogue endpoints
pub fn router(addon: Arc<Addon>) -> Router {
    Router::new()
        .route("/manifest.json", get(manifest_handler))
        .route("/catalog/{kind}/{*rest}", get(catalogue_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(addon)
}

async fn manifest_handler(State(addon): State<Arc<Addon>>) -> Json<Manifest> {
    Json(addon.manifest())
}

async fn catalogue_handler(
    State(addon): State<Arc<Addon>>,
    Path((kind, _)): Path<(String, String)>,
    OriginalUri(uri): OriginalUri,
) -> Json<CatalogueResponse> {
    // Extras are split on the raw path; `Path` would decode them a first time
    let rest = catalogue_tail(uri.path()).unwrap_or_default();
    let (id, path_extra) = split_catalogue_path(rest);
    let extra = path_extra
        .or(uri.query())
        .map(Extra::parse)
        .unwrap_or_default();

    Json(addon.catalogue(&kind, id, &extra).await)
}
