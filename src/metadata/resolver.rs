/// TMDB to IMDb identifier resolution.
use super::{ExternalId, MediaKind};
use crate::tmdb::types::ExternalIds;
use crate::tmdb::{QueryParams, TmdbClient};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

type ResolvedIds = HashMap<(MediaKind, u64), Option<ExternalId>>;

/// Resolves TMDB ids to the client's identifier scheme.
///
/// Outcomes are cached for the lifetime of the resolver, including the
/// outcome "TMDB knows no IMDb id for this title". Failed lookups are not
/// cached, so a transient upstream error does not hide a resolvable title.
pub(crate) struct IdResolver {
    client: Arc<TmdbClient>,
    resolved: Mutex<ResolvedIds>,
}

impl IdResolver {
    /// Creates a resolver with an empty cache
    pub(crate) fn new(client: Arc<TmdbClient>) -> Self {
        Self {
            client,
            resolved: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves the IMDb id of a movie or series.
    ///
    /// Issues at most one request per `(kind, id)` pair unless previous
    /// attempts failed.
    pub(crate) async fn resolve(&self, kind: MediaKind, tmdb_id: u64) -> Option<ExternalId> {
        let cached = self.lock().get(&(kind, tmdb_id)).cloned();
        if let Some(resolved) = cached {
            return resolved;
        }

        let path = format!("/{}/{}/external_ids", kind.tmdb_segment(), tmdb_id);
        let resolved = match self
            .client
            .get::<ExternalIds>(&path, &QueryParams::new())
            .await
        {
            Ok(ids) => ids.imdb_id.and_then(ExternalId::new),
            Err(err) => {
                warn!(%kind, tmdb_id, error = %err, "Failed to resolve external id");
                return None;
            }
        };

        if resolved.is_none() {
            debug!(%kind, tmdb_id, "No external id available");
        }

        self.lock().insert((kind, tmdb_id), resolved.clone());
        resolved
    }

    /// Number of cached resolutions, negative ones included
    #[cfg(test)]
    fn cached_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, ResolvedIds> {
        self.resolved.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolver_for(server: &MockServer) -> IdResolver {
        let client = TmdbClient::with_base_url("test-key", server.uri(), "en-US").unwrap();
        IdResolver::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_resolves_and_caches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/278/external_ids"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"imdb_id": "tt0111161"})))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = resolver_for(&server);
        let first = resolver.resolve(MediaKind::Movie, 278).await;
        let second = resolver.resolve(MediaKind::Movie, 278).await;

        assert_eq!(first.as_ref().map(ExternalId::as_str), Some("tt0111161"));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_id_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tv/1399/external_ids"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"imdb_id": null})))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = resolver_for(&server);
        assert_eq!(resolver.resolve(MediaKind::Series, 1399).await, None);
        assert_eq!(resolver.resolve(MediaKind::Series, 1399).await, None);
        assert_eq!(resolver.cached_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_id_counts_as_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/5/external_ids"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"imdb_id": ""})))
            .mount(&server)
            .await;

        let resolver = resolver_for(&server);
        assert_eq!(resolver.resolve(MediaKind::Movie, 5).await, None);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/42/external_ids"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let resolver = resolver_for(&server);
        assert_eq!(resolver.resolve(MediaKind::Movie, 42).await, None);
        assert_eq!(resolver.resolve(MediaKind::Movie, 42).await, None);
        assert_eq!(resolver.cached_count(), 0);
    }

    #[tokio::test]
    async fn test_movie_and_series_namespaces_are_separate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/100/external_ids"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"imdb_id": "tt0000100"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tv/100/external_ids"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"imdb_id": "tt9000100"})))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = resolver_for(&server);
        let movie = resolver.resolve(MediaKind::Movie, 100).await.unwrap();
        let series = resolver.resolve(MediaKind::Series, 100).await.unwrap();

        assert_eq!(movie.as_str(), "tt0000100");
        assert_eq!(series.as_str(), "tt9000100");
        assert_eq!(resolver.cached_count(), 2);
    }
}
