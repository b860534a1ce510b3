//! Process configuration
//!
//! Settings are read from command line flags, falling back to environment
//! variables. A missing API key is a fatal startup error.

use crate::cache::DEFAULT_TTL;
use crate::tmdb::{DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Serve TMDB listings as catalogues for media-browsing clients
#[derive(Debug, Clone, Parser)]
#[command(name = "catalogue_addon", version, about)]
pub struct Config {
    /// TMDB API key (v3 auth)
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// TMDB API base URL
    #[arg(long, env = "TMDB_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Locale sent with every TMDB request
    #[arg(long, env = "TMDB_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to bind the HTTP server to
    #[arg(long, env = "PORT", default_value_t = 7000)]
    pub port: u16,

    /// How long catalogue pages are cached, in seconds
    #[arg(long, env = "CACHE_TTL_SECS", default_value_t = DEFAULT_TTL.as_secs())]
    pub cache_ttl_secs: u64,
}

impl Config {
    /// The socket address the server listens on
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Response cache TTL
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
