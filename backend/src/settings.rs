//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `TIDYTEXT_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SECRET_PATH: &str = "/var/run/secrets/jwt_secret";
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 1440;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings controlling the HTTP server and its backing stores.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TIDYTEXT")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection URL. Without one, accounts and history live in
    /// process memory.
    pub database_url: Option<String>,
    /// File holding the token signing secret.
    pub jwt_secret_file: Option<PathBuf>,
    /// Fall back to a random in-memory secret when the file is unreadable.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
    /// Access token lifetime in minutes.
    pub token_ttl_minutes: Option<i64>,
    /// Word-frequency list used by the spelling corrector.
    pub dictionary_path: Option<PathBuf>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    /// Listen address, `0.0.0.0:8080` unless configured.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    /// Secret location, `/var/run/secrets/jwt_secret` unless configured.
    #[must_use]
    pub fn jwt_secret_file(&self) -> PathBuf {
        self.jwt_secret_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRET_PATH))
    }

    /// Token lifetime; non-positive values fall back to the default.
    #[must_use]
    pub fn token_ttl(&self) -> TimeDelta {
        let minutes = self
            .token_ttl_minutes
            .filter(|minutes| *minutes > 0)
            .unwrap_or(DEFAULT_TOKEN_TTL_MINUTES);
        TimeDelta::minutes(minutes)
    }

    /// Pool size; zero falls back to the default.
    #[must_use]
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .filter(|max| *max > 0)
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}
