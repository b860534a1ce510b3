//! Catalogue definitions and the operations that fetch them
//!
//! A catalogue is plain data: an id, a display name, a media kind and a
//! [`Query`] descriptor. One generic executor turns a descriptor plus a page
//! number into a TMDB request, fetches it, and formats the results.

mod cached;
pub(crate) mod registry;
mod tmdb;

pub(crate) use cached::CachedCatalogueProvider;
pub(crate) use tmdb::TmdbCatalogueProvider;

use crate::metadata::{MediaKind, Meta};
use crate::tmdb::{QueryParams, UpstreamError};
use async_trait::async_trait;
use thiserror::Error;

/// Number of records TMDB returns per page
pub const PAGE_SIZE: usize = 20;

/// Errors that can occur while fetching a catalogue
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// No catalogue with this id exists for the requested type
    #[error("Unknown catalogue: {kind}/{id}")]
    UnknownCatalogue { kind: String, id: String },

    /// A search catalogue was requested without search text
    #[error("Search catalogue requested without a search query")]
    MissingSearchQuery,

    /// The listing request to TMDB failed
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),
}

/// Converts a zero-based item offset into a 1-based TMDB page number
///
/// # Examples
///
/// ```
/// use catalogue_addon::page_for_skip;
///
/// assert_eq!(page_for_skip(0), 1);
/// assert_eq!(page_for_skip(45), 3);
/// ```
pub fn page_for_skip(skip: u64) -> u32 {
    let page = skip / PAGE_SIZE as u64;
    u32::try_from(page).unwrap_or(u32::MAX).saturating_add(1)
}

/// Time window of a trending listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimeWindow {
    Day,
    Week,
}

impl TimeWindow {
    fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

/// Sort order and quality thresholds of a discover query
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Filter {
    /// TMDB `sort_by` value
    pub sort_by: &'static str,
    /// Minimum number of votes (`vote_count.gte`)
    pub min_votes: Option<u32>,
    /// Minimum average rating (`vote_average.gte`)
    pub min_rating: Option<f32>,
}

impl Filter {
    /// Most popular first, no thresholds
    pub(crate) const POPULAR: Filter = Filter::sorted_by("popularity.desc");

    /// Highest rated first, no thresholds
    pub(crate) const TOP_RATED: Filter = Filter::sorted_by("vote_average.desc");

    /// A filter with the given sort order and no thresholds
    const fn sorted_by(sort_by: &'static str) -> Self {
        Self {
            sort_by,
            min_votes: None,
            min_rating: None,
        }
    }

    /// Requires at least `votes` votes
    pub(crate) const fn min_votes(self, votes: u32) -> Self {
        Self {
            min_votes: Some(votes),
            ..self
        }
    }

    /// Requires an average rating of at least `rating`
    pub(crate) const fn min_rating(self, rating: f32) -> Self {
        Self {
            min_rating: Some(rating),
            ..self
        }
    }

    fn apply(&self, params: QueryParams) -> QueryParams {
        params
            .with("sort_by", self.sort_by)
            .with_opt("vote_count.gte", self.min_votes)
            .with_opt("vote_average.gte", self.min_rating)
    }
}

/// What a catalogue lists
///
/// Multi-value fields (`countries`, `keywords`) take TMDB's pipe-delimited
/// "any of" syntax, e.g. `"DK|SE|NO"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Query {
    /// `/{kind}/popular`
    Popular,
    /// `/{kind}/top_rated`
    TopRated,
    /// Movies in theatres, or series currently on the air
    NowPlaying,
    /// Upcoming movies, or series airing today
    Upcoming,
    /// `/trending/{kind}/{window}`
    Trending(TimeWindow),
    /// Discover by genre id
    Genre { genre: u32, filter: Filter },
    /// Discover by streaming provider id within a region
    Provider {
        provider: u32,
        region: &'static str,
        filter: Filter,
    },
    /// Discover by origin country code(s)
    Country {
        countries: &'static str,
        filter: Filter,
    },
    /// Discover by keyword id(s)
    Keyword {
        keywords: &'static str,
        filter: Filter,
    },
    /// Discover titles released on or before a `YYYY-MM-DD` date
    ReleasedBefore { date: &'static str, filter: Filter },
    /// Free-text search; the text comes with the request
    Search,
}

impl Query {
    /// Builds the TMDB request for one page of this query
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::MissingSearchQuery`] for [`Query::Search`]
    /// when no (non-blank) search text is given.
    pub(crate) fn listing(
        &self,
        kind: MediaKind,
        page: u32,
        search: Option<&str>,
    ) -> Result<ListingRequest, CatalogueError> {
        let segment = kind.tmdb_segment();
        let params = QueryParams::new().with("page", page);

        let (path, params) = match self {
            Query::Popular => (format!("/{}/popular", segment), params),
            Query::TopRated => (format!("/{}/top_rated", segment), params),
            Query::NowPlaying => match kind {
                MediaKind::Movie => ("/movie/now_playing".to_string(), params),
                MediaKind::Series => ("/tv/on_the_air".to_string(), params),
            },
            Query::Upcoming => match kind {
                MediaKind::Movie => ("/movie/upcoming".to_string(), params),
                MediaKind::Series => ("/tv/airing_today".to_string(), params),
            },
            Query::Trending(window) => (
                format!("/trending/{}/{}", segment, window.as_str()),
                params,
            ),
            Query::Genre { genre, filter } => (
                discover_path(kind),
                filter.apply(discover_params(params).with("with_genres", genre)),
            ),
            Query::Provider {
                provider,
                region,
                filter,
            } => (
                discover_path(kind),
                filter.apply(
                    discover_params(params)
                        .with("with_watch_providers", provider)
                        .with("watch_region", region),
                ),
            ),
            Query::Country { countries, filter } => (
                discover_path(kind),
                filter.apply(
                    discover_params(params).with("with_origin_country", countries),
                ),
            ),
            Query::Keyword { keywords, filter } => (
                discover_path(kind),
                filter.apply(discover_params(params).with("with_keywords", keywords)),
            ),
            Query::ReleasedBefore { date, filter } => {
                let boundary = match kind {
                    MediaKind::Movie => "primary_release_date.lte",
                    MediaKind::Series => "first_air_date.lte",
                };
                (
                    discover_path(kind),
                    filter.apply(discover_params(params).with(boundary, date)),
                )
            }
            Query::Search => {
                let text = search
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                    .ok_or(CatalogueError::MissingSearchQuery)?;
                (
                    format!("/search/{}", segment),
                    params.with("query", text).with("include_adult", false),
                )
            }
        };

        Ok(ListingRequest { kind, path, params })
    }

    /// Returns true if the query needs search text
    pub(crate) fn is_search(&self) -> bool {
        matches!(self, Query::Search)
    }
}

fn discover_path(kind: MediaKind) -> String {
    format!("/discover/{}", kind.tmdb_segment())
}

fn discover_params(params: QueryParams) -> QueryParams {
    params.with("include_adult", false)
}

/// A fully parameterised request for one page of a catalogue
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListingRequest {
    /// Kind of the listed titles
    pub kind: MediaKind,
    /// TMDB endpoint path
    pub path: String,
    /// Query parameters, page number included
    pub params: QueryParams,
}

impl ListingRequest {
    /// A deterministic key identifying this request
    pub(crate) fn cache_key(&self) -> String {
        format!("{}?{}", self.path, self.params.encode())
    }
}

/// A named catalogue as advertised to the client
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CatalogueDef {
    /// Catalogue id, unique per kind
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Kind of the listed titles
    pub kind: MediaKind,
    /// What the catalogue lists
    pub query: Query,
}

/// Trait for sources that can fetch one formatted page of a catalogue.
///
/// Implementors return the page in upstream order with unresolvable records
/// already removed.
#[async_trait]
pub(crate) trait CatalogueProvider: Send + Sync {
    /// Fetches and formats the page described by `request`
    ///
    /// # Errors
    ///
    /// Returns an error if the listing itself cannot be fetched. Failures to
    /// resolve individual records only shrink the result.
    async fn fetch(&self, request: &ListingRequest) -> Result<Vec<Meta>, CatalogueError>;
}
