/// TMDB HTTP client implementation.
use super::{QueryParams, UpstreamError};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Default TMDB API base URL
pub(crate) const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default locale sent with every request
pub(crate) const DEFAULT_LANGUAGE: &str = "en-US";

/// Client for the TMDB v3 API.
///
/// Every request carries the API key and the configured locale as query
/// parameters. Requests are never retried and no timeout is set beyond the
/// transport default.
#[derive(Debug, Clone)]
pub(crate) struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    /// Creates a client against a custom base URL and locale.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let client = TmdbClient::with_base_url("key", "http://127.0.0.1:8080", "de-DE")?;
    /// ```
    pub(crate) fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .user_agent(concat!("catalogue_addon/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            language: language.into(),
        })
    }

    /// Issues a GET request and deserializes the JSON body.
    ///
    /// The API key and locale are injected first; `params` are merged on top
    /// of them, so a caller may override the locale for a single request.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Status`] for any non-2xx response,
    /// [`UpstreamError::Transport`] if the request cannot be completed and
    /// [`UpstreamError::Parse`] if the body is not the expected JSON.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        let query = QueryParams::new()
            .with("api_key", &self.api_key)
            .with("language", &self.language)
            .merged(params);

        debug!(path, params = %params.encode(), "TMDB request");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(path, status = status.as_u16(), "TMDB request failed");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| UpstreamError::Transport {
                path: path.to_string(),
                source,
            })?;

        serde_json::from_str(&body).map_err(|source| {
            warn!(path, error = %source, "Failed to parse TMDB response");
            UpstreamError::Parse {
                path: path.to_string(),
                source,
            }
        })
    }
}
