//! Access to the TMDB REST API
//!
//! This module provides the low-level HTTP client for TMDB, the raw response
//! types it deserializes into, and the query parameter builder used by every
//! catalogue operation.

mod client;
pub(crate) mod types;

pub(crate) use client::{DEFAULT_BASE_URL, DEFAULT_LANGUAGE, TmdbClient};

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur while talking to TMDB
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request could not be sent or the response could not be read
    #[error("Request to {path} failed: {source}")]
    Transport {
        path: String,
        source: reqwest::Error,
    },

    /// TMDB answered with a non-success status code
    #[error("TMDB returned HTTP {status} for {path}")]
    Status { status: u16, path: String },

    /// The response body was not the JSON we expected
    #[error("Failed to parse TMDB response for {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

impl UpstreamError {
    /// Returns the HTTP status code if TMDB answered with an error status
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Query string parameters for a TMDB request
///
/// Keys are kept sorted so that [`QueryParams::encode`] is deterministic and
/// can be used as part of a cache key. Absent values are never stored, so
/// they are omitted from the request instead of being sent as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub(crate) struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Creates an empty parameter set
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value for the key
    pub(crate) fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a parameter only if a value is present
    pub(crate) fn with_opt<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Sets a parameter in place
    fn insert(&mut self, key: &str, value: impl ToString) {
        self.0.insert(key.to_string(), value.to_string());
    }

    /// Returns the value stored for a key
    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Merges `other` on top of `self`; keys present in both take `other`'s value
    pub(crate) fn merged(mut self, other: &QueryParams) -> Self {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
        self
    }

    /// Encodes the parameters as a sorted `key=value&key=value` string
    pub(crate) fn encode(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }
}
