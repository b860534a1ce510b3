/// TMDB API response types for deserialization.
///
/// These structures mirror the JSON response format of the TMDB v3 API.
use serde::Deserialize;

/// One page of a TMDB listing, discover or search response.
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    /// The 1-based page number
    #[serde(default)]
    pub page: u32,
    /// Records on this page, in TMDB's sort order
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    /// Total number of pages available
    #[serde(default)]
    pub total_pages: u32,
}

/// A movie or TV series record as returned inside a listing page.
///
/// Movies carry `title` and `release_date`, series carry `name` and
/// `first_air_date`. The kind is known from the endpoint that produced the
/// record, not from the record itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawRecord {
    /// TMDB numeric id (missing on malformed records)
    pub id: Option<u64>,
    /// Movie title
    pub title: Option<String>,
    /// Series name
    pub name: Option<String>,
    /// Plot overview
    pub overview: Option<String>,
    /// Movie release date (YYYY-MM-DD)
    pub release_date: Option<String>,
    /// Series first air date (YYYY-MM-DD)
    pub first_air_date: Option<String>,
    /// Average user rating, 0-10
    pub vote_average: Option<f64>,
    /// TMDB genre ids, in TMDB order
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

/// Response of the `/movie/{id}/external_ids` and `/tv/{id}/external_ids` endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ExternalIds {
    /// IMDb identifier (may be null or empty)
    pub imdb_id: Option<String>,
}
