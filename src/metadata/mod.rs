//! Metadata shaping for the consuming client
//!
//! This module turns raw TMDB records into the metadata objects the client
//! understands. It owns the identifier resolver, which maps TMDB ids to IMDb
//! ids, and the record formatter, which derives artwork, genres and display
//! fields.

mod formatter;
mod resolver;

pub(crate) use formatter::MetaFormatter;
pub(crate) use resolver::IdResolver;

use serde::Serialize;
use std::fmt;

/// The two kinds of titles a catalogue can list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Feature films
    Movie,
    /// TV series
    Series,
}

impl MediaKind {
    /// The name the consuming client uses for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
        }
    }

    /// The path segment TMDB uses for this kind
    pub(crate) fn tmdb_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }

    /// Parses the client's type discriminator
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "movie" => Some(MediaKind::Movie),
            "series" => Some(MediaKind::Series),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An identifier in the consuming client's scheme (an IMDb `tt…` id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ExternalId(String);

impl ExternalId {
    /// Wraps a raw identifier, rejecting empty or blank strings
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A title formatted for the consuming client
///
/// A `Meta` always carries a resolved [`ExternalId`]; records without one are
/// dropped before a `Meta` is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// The IMDb identifier
    pub id: ExternalId,
    /// Movie or series
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Display title
    pub name: String,
    /// Poster artwork URL
    pub poster: String,
    /// Background artwork URL
    pub background: String,
    /// Logo artwork URL
    pub logo: String,
    /// Plot overview
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Four-digit release year
    #[serde(rename = "releaseInfo", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Average rating with one decimal place
    #[serde(rename = "imdbRating", skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    /// Genre display names in TMDB order
    pub genres: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_kind_round_trip() {
        assert_eq!(MediaKind::parse("movie"), Some(MediaKind::Movie));
        assert_eq!(MediaKind::parse("series"), Some(MediaKind::Series));
        assert_eq!(MediaKind::parse("tv"), None);
        assert_eq!(MediaKind::Series.tmdb_segment(), "tv");
        assert_eq!(MediaKind::Movie.to_string(), "movie");
    }

    #[test]
    fn test_external_id_rejects_blank() {
        assert_eq!(ExternalId::new(""), None);
        assert_eq!(ExternalId::new("  "), None);
        assert_eq!(ExternalId::new("tt0111161").unwrap().as_str(), "tt0111161");
    }

    #[test]
    fn test_meta_serializes_client_field_names() {
        let meta = Meta {
            id: ExternalId::new("tt0111161").unwrap(),
            kind: MediaKind::Movie,
            name: "The Shawshank Redemption".to_string(),
            poster: "p".to_string(),
            background: "b".to_string(),
            logo: "l".to_string(),
            description: None,
            year: Some("1994".to_string()),
            rating: Some("8.7".to_string()),
            genres: vec!["Drama".to_string()],
        };

        assert_eq!(
            serde_json::to_value(&meta).unwrap(),
            json!({
                "id": "tt0111161",
                "type": "movie",
                "name": "The Shawshank Redemption",
                "poster": "p",
                "background": "b",
                "logo": "l",
                "releaseInfo": "1994",
                "imdbRating": "8.7",
                "genres": ["Drama"]
            })
        );
    }
}
