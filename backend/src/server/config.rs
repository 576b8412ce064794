//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{PasswordHasher, SpellingOracle};
use crate::outbound::persistence::DbPool;
use crate::outbound::security::{Argon2PasswordHasher, TokenConfig};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token: TokenConfig,
    pub(crate) oracle: Arc<dyn SpellingOracle>,
    pub(crate) hasher: Arc<dyn PasswordHasher>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Configuration with Argon2id defaults, the system clock and in-memory
    /// repositories.
    #[must_use]
    pub fn new(token: TokenConfig, oracle: Arc<dyn SpellingOracle>, bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            token,
            oracle,
            hasher: Arc::new(Argon2PasswordHasher::new()),
            clock: Arc::new(DefaultClock),
            db_pool: None,
        }
    }

    /// Attach a database connection pool. Accounts and history then persist
    /// in PostgreSQL instead of process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Swap the password hasher, e.g. for cheaper Argon2 parameters in tests.
    #[must_use]
    pub fn with_password_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Replace the clock used for token issue and expiry checks.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Socket address the server listens on.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
