//! The catalogues this add-on publishes

use super::{CatalogueDef, Filter, Query, TimeWindow};
use crate::metadata::MediaKind;

/// Watch region used by the streaming provider catalogues
const PROVIDER_REGION: &str = "US";

/// Vote floor for discover catalogues ranked by rating
const RATED_VOTE_FLOOR: u32 = 300;

const fn movie(id: &'static str, name: &'static str, query: Query) -> CatalogueDef {
    CatalogueDef {
        id,
        name,
        kind: MediaKind::Movie,
        query,
    }
}

const fn series(id: &'static str, name: &'static str, query: Query) -> CatalogueDef {
    CatalogueDef {
        id,
        name,
        kind: MediaKind::Series,
        query,
    }
}

const fn genre(genre: u32) -> Query {
    Query::Genre {
        genre,
        filter: Filter::POPULAR,
    }
}

const fn provider(provider: u32) -> Query {
    Query::Provider {
        provider,
        region: PROVIDER_REGION,
        filter: Filter::POPULAR,
    }
}

const fn country(countries: &'static str) -> Query {
    Query::Country {
        countries,
        filter: Filter::POPULAR,
    }
}

const fn keyword(keywords: &'static str) -> Query {
    Query::Keyword {
        keywords,
        filter: Filter::POPULAR.min_votes(50),
    }
}

/// All catalogues, in the order they are advertised
pub(crate) static CATALOGUES: &[CatalogueDef] = &[
    // Listings
    movie("tmdb.popular", "Popular", Query::Popular),
    movie("tmdb.top_rated", "Top Rated", Query::TopRated),
    movie(
        "tmdb.trending_day",
        "Trending Today",
        Query::Trending(TimeWindow::Day),
    ),
    movie(
        "tmdb.trending_week",
        "Trending This Week",
        Query::Trending(TimeWindow::Week),
    ),
    movie("tmdb.now_playing", "In Theatres", Query::NowPlaying),
    movie("tmdb.upcoming", "Upcoming", Query::Upcoming),
    series("tmdb.popular", "Popular", Query::Popular),
    series("tmdb.top_rated", "Top Rated", Query::TopRated),
    series(
        "tmdb.trending_week",
        "Trending This Week",
        Query::Trending(TimeWindow::Week),
    ),
    series("tmdb.on_the_air", "On The Air", Query::NowPlaying),
    series("tmdb.airing_today", "Airing Today", Query::Upcoming),
    // Genres
    movie("tmdb.action", "Action", genre(28)),
    movie("tmdb.comedy", "Comedy", genre(35)),
    movie("tmdb.horror", "Horror", genre(27)),
    movie("tmdb.scifi", "Science Fiction", genre(878)),
    movie("tmdb.thriller", "Thriller", genre(53)),
    movie("tmdb.animation", "Animation", genre(16)),
    movie("tmdb.documentary", "Documentaries", genre(99)),
    series("tmdb.crime", "Crime", genre(80)),
    series("tmdb.scifi_fantasy", "Sci-Fi & Fantasy", genre(10765)),
    series("tmdb.animation", "Animation", genre(16)),
    series("tmdb.documentary", "Documentaries", genre(99)),
    // Streaming providers
    movie("tmdb.netflix", "Netflix", provider(8)),
    movie("tmdb.prime", "Prime Video", provider(9)),
    movie("tmdb.disney", "Disney+", provider(337)),
    movie("tmdb.max", "Max", provider(1899)),
    series("tmdb.netflix", "Netflix", provider(8)),
    series("tmdb.prime", "Prime Video", provider(9)),
    series("tmdb.disney", "Disney+", provider(337)),
    series("tmdb.max", "Max", provider(1899)),
    // Countries of origin
    movie("tmdb.korean", "Korean Cinema", country("KR")),
    movie("tmdb.japanese", "Japanese Cinema", country("JP")),
    movie("tmdb.indian", "Indian Cinema", country("IN")),
    movie("tmdb.nordic", "Nordic Cinema", country("DK|SE|NO|FI|IS")),
    series("tmdb.kdrama", "K-Drama", country("KR")),
    series("tmdb.nordic", "Nordic Noir", country("DK|SE|NO|FI|IS")),
    // Classics and acclaimed
    movie(
        "tmdb.classics",
        "Classics",
        Query::ReleasedBefore {
            date: "1980-01-01",
            filter: Filter::TOP_RATED.min_votes(500),
        },
    ),
    movie(
        "tmdb.acclaimed",
        "Critically Acclaimed",
        Query::Genre {
            genre: 18,
            filter: Filter::TOP_RATED
                .min_votes(RATED_VOTE_FLOOR)
                .min_rating(7.5),
        },
    ),
    series(
        "tmdb.classics",
        "Classic TV",
        Query::ReleasedBefore {
            date: "1990-01-01",
            filter: Filter::TOP_RATED.min_votes(RATED_VOTE_FLOOR),
        },
    ),
    // Themes
    movie("tmdb.superheroes", "Superheroes", keyword("9715")),
    movie("tmdb.time_travel", "Time Travel", keyword("4379")),
    movie("tmdb.heists", "Heists", keyword("10051")),
    movie("tmdb.dystopia", "Dystopian Futures", keyword("12377|12190")),
    series("tmdb.time_travel", "Time Travel", keyword("4379")),
    // Search
    movie("tmdb.search", "Search", Query::Search),
    series("tmdb.search", "Search", Query::Search),
];

/// Looks up a catalogue by kind and id
pub(crate) fn find(kind: MediaKind, id: &str) -> Option<&'static CatalogueDef> {
    CATALOGUES
        .iter()
        .find(|def| def.kind == kind && def.id == id)
}
