//! Driven port for signing and reading bearer tokens.
use chrono::{DateTime, Utc};

use crate::domain::{AccessToken, TokenClaims};

use super::define_port_error;

define_port_error! {
    /// Failures raised while minting or checking access tokens.
    pub enum TokenError {
        /// Signing failed.
        Encode {
            /// Adapter-supplied detail.
            message: String,
        } => "token encoding failed: {message}",
        /// The token is malformed or its signature does not verify.
        Invalid {
            /// Adapter-supplied detail.
            message: String,
        } => "token rejected: {message}",
    }
}

/// Signs and verifies bearer tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Mint a token for `subject` valid from `issued_at` for the configured lifetime.
    fn issue(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<AccessToken, TokenError>;

    /// Verify the signature and return the claims. Expiry is left to the caller.
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
