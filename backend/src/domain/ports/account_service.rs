//! Driving port for signup, login and token authentication.
//!
//! HTTP handlers depend on this trait rather than on repositories so they can
//! be exercised against a mock.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, LoginCredentials, SignupCredentials, User};

/// Account lifecycle as seen by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new account. A taken username yields [`ErrorCode::Conflict`].
    ///
    /// [`ErrorCode::Conflict`]: crate::domain::ErrorCode::Conflict
    async fn signup(&self, credentials: &SignupCredentials) -> Result<User, Error>;

    /// Check the password and mint a bearer token.
    ///
    /// Unknown users and wrong passwords fail with the same unauthorized error.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error>;

    /// Resolve a bearer token to the user it names.
    async fn authenticate(&self, token: &str) -> Result<User, Error>;
}
