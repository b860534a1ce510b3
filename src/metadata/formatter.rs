/// Conversion of raw TMDB records into client metadata.
use super::{ExternalId, IdResolver, MediaKind, Meta};
use crate::tmdb::types::RawRecord;
use futures::stream::{self, StreamExt};

/// Base URL of the artwork host, keyed by IMDb id
const ARTWORK_BASE_URL: &str = "https://images.metahub.space";

/// Artwork size tier requested from the artwork host
const ARTWORK_SIZE: &str = "medium";

/// Maximum number of records formatted at once; one TMDB page
const FORMAT_CONCURRENCY: usize = crate::catalogue::PAGE_SIZE;

/// TMDB genre ids and their display names, covering both the movie and the
/// TV genre vocabularies.
pub(crate) const GENRES: [(u32, &str); 28] = [
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
    (10759, "Action & Adventure"),
    (10762, "Kids"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
    (10769, "Foreign"),
];

/// Looks up the display name of a TMDB genre id
pub(crate) fn genre_name(id: u32) -> Option<&'static str> {
    GENRES
        .iter()
        .find(|(genre_id, _)| *genre_id == id)
        .map(|(_, name)| *name)
}

/// Formats raw TMDB records into [`Meta`] objects.
///
/// Formatting needs the record's IMDb id, so every record goes through the
/// [`IdResolver`]; records that cannot be resolved are dropped.
pub(crate) struct MetaFormatter {
    resolver: IdResolver,
}

impl MetaFormatter {
    /// Creates a formatter backed by the given resolver
    pub(crate) fn new(resolver: IdResolver) -> Self {
        Self { resolver }
    }

    /// Formats a single record.
    ///
    /// Returns `None` if the record has no TMDB id or no IMDb id can be
    /// resolved for it.
    pub(crate) async fn format(&self, kind: MediaKind, record: &RawRecord) -> Option<Meta> {
        let tmdb_id = record.id?;
        let id = self.resolver.resolve(kind, tmdb_id).await?;
        Some(build_meta(kind, id, record))
    }

    /// Formats a page of records concurrently.
    ///
    /// At most one page worth of records is in flight at once. The result
    /// keeps the input order; unresolvable records are left out.
    pub(crate) async fn format_page(&self, kind: MediaKind, records: &[RawRecord]) -> Vec<Meta> {
        // Build the futures before streaming them; a borrowing map closure is not Send
        let pending: Vec<_> = records
            .iter()
            .map(|record| self.format(kind, record))
            .collect();

        stream::iter(pending)
            .buffered(FORMAT_CONCURRENCY)
            .collect::<Vec<Option<Meta>>>()
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Builds the metadata object once the external id is known
fn build_meta(kind: MediaKind, id: ExternalId, record: &RawRecord) -> Meta {
    let (name, date) = match kind {
        MediaKind::Movie => (
            record.title.as_ref().or(record.name.as_ref()),
            record.release_date.as_deref(),
        ),
        MediaKind::Series => (
            record.name.as_ref().or(record.title.as_ref()),
            record.first_air_date.as_deref(),
        ),
    };

    Meta {
        poster: artwork_url("poster", &id),
        background: artwork_url("background", &id),
        logo: artwork_url("logo", &id),
        id,
        kind,
        name: name.cloned().unwrap_or_default(),
        description: record.overview.clone().filter(|o| !o.is_empty()),
        year: date.and_then(year_of),
        rating: record.vote_average.map(|r| format!("{:.1}", r)),
        genres: genre_names(&record.genre_ids),
    }
}

/// Builds an artwork URL for one category (`poster`, `background`, `logo`)
fn artwork_url(category: &str, id: &ExternalId) -> String {
    format!("{}/{}/{}/{}/img", ARTWORK_BASE_URL, category, ARTWORK_SIZE, id)
}

/// Maps genre ids to names, dropping ids that are not in [`GENRES`]
fn genre_names(ids: &[u32]) -> Vec<String> {
    ids.iter()
        .filter_map(|id| genre_name(*id))
        .map(str::to_string)
        .collect()
}

/// Extracts the year from a `YYYY-MM-DD` date
fn year_of(date: &str) -> Option<String> {
    date.get(..4).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdb::TmdbClient;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn movie(id: u64) -> RawRecord {
        RawRecord {
            id: Some(id),
            title: Some("Se7en".to_string()),
            overview: Some("Two detectives hunt a killer.".to_string()),
            release_date: Some("1995-09-22".to_string()),
            vote_average: Some(8.37),
            genre_ids: vec![80, 9648, 53],
            ..Default::default()
        }
    }

    async fn mount_imdb(server: &MockServer, segment: &str, id: u64, imdb: Option<&str>) {
        Mock::given(method("GET"))
            .and(path(format!("/{}/{}/external_ids", segment, id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "imdb_id": imdb })))
            .mount(server)
            .await;
    }

    fn formatter_for(server: &MockServer) -> MetaFormatter {
        let client = TmdbClient::with_base_url("test-key", server.uri(), "en-US").unwrap();
        MetaFormatter::new(IdResolver::new(Arc::new(client)))
    }

    #[test]
    fn test_genre_table_is_complete() {
        assert_eq!(GENRES.len(), 28);
        assert_eq!(genre_name(53), Some("Thriller"));
        assert_eq!(genre_name(10765), Some("Sci-Fi & Fantasy"));
        assert_eq!(genre_name(9999), None);
    }

    #[test]
    fn test_unmapped_genres_are_dropped() {
        assert_eq!(genre_names(&[53, 9999]), vec!["Thriller".to_string()]);
        assert_eq!(
            genre_names(&[18, 35]),
            vec!["Drama".to_string(), "Comedy".to_string()]
        );
    }

    #[test]
    fn test_year_of() {
        assert_eq!(year_of("1989-12-31"), Some("1989".to_string()));
        assert_eq!(year_of("2024"), Some("2024".to_string()));
        assert_eq!(year_of("198"), None);
        assert_eq!(year_of(""), None);
    }

    #[test]
    fn test_build_meta_movie() {
        let id = ExternalId::new("tt0114369").unwrap();
        let meta = build_meta(MediaKind::Movie, id, &movie(807));

        assert_eq!(meta.name, "Se7en");
        assert_eq!(meta.year.as_deref(), Some("1995"));
        assert_eq!(meta.rating.as_deref(), Some("8.4"));
        assert_eq!(meta.genres, vec!["Crime", "Mystery", "Thriller"]);
        assert_eq!(
            meta.poster,
            "https://images.metahub.space/poster/medium/tt0114369/img"
        );
        assert_eq!(
            meta.background,
            "https://images.metahub.space/background/medium/tt0114369/img"
        );
        assert_eq!(
            meta.logo,
            "https://images.metahub.space/logo/medium/tt0114369/img"
        );
    }

    #[test]
    fn test_build_meta_series_uses_name_and_air_date() {
        let record = RawRecord {
            id: Some(1396),
            name: Some("Breaking Bad".to_string()),
            first_air_date: Some("2008-01-20".to_string()),
            release_date: Some("1900-01-01".to_string()),
            ..Default::default()
        };
        let meta = build_meta(
            MediaKind::Series,
            ExternalId::new("tt0903747").unwrap(),
            &record,
        );

        assert_eq!(meta.name, "Breaking Bad");
        assert_eq!(meta.year.as_deref(), Some("2008"));
        assert_eq!(meta.rating, None);
        assert_eq!(meta.description, None);
        assert!(meta.genres.is_empty());
    }

    #[tokio::test]
    async fn test_record_without_id_is_dropped() {
        let server = MockServer::start().await;
        let formatter = formatter_for(&server);

        let record = RawRecord {
            id: None,
            ..movie(0)
        };
        assert_eq!(formatter.format(MediaKind::Movie, &record).await, None);
    }

    #[tokio::test]
    async fn test_format_page_keeps_order_and_drops_unresolved() {
        let server = MockServer::start().await;
        mount_imdb(&server, "movie", 1, Some("tt0000001")).await;
        mount_imdb(&server, "movie", 2, None).await;
        mount_imdb(&server, "movie", 3, Some("tt0000003")).await;

        let formatter = formatter_for(&server);
        let records = vec![movie(1), movie(2), movie(3)];
        let metas = formatter.format_page(MediaKind::Movie, &records).await;

        let ids: Vec<&str> = metas.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["tt0000001", "tt0000003"]);
        assert!(metas.len() <= records.len());
    }

    #[tokio::test]
    async fn test_format_page_keeps_order_when_first_record_is_slow() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/1/external_ids"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "imdb_id": "tt0000001" }))
                    .set_delay(Duration::from_millis(300)),
            )
            .expect(1)
            .mount(&server)
            .await;
        mount_imdb(&server, "movie", 2, Some("tt0000002")).await;
        mount_imdb(&server, "movie", 3, Some("tt0000003")).await;

        let formatter = formatter_for(&server);
        let records = vec![movie(1), movie(2), movie(3)];
        let metas = formatter.format_page(MediaKind::Movie, &records).await;

        let ids: Vec<&str> = metas.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["tt0000001", "tt0000002", "tt0000003"]);
    }
}
