//! Driven port for password hashing.
use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing the plaintext failed.
        Hash {
            /// Adapter-supplied detail.
            message: String,
        } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash {
            /// Adapter-supplied detail.
            message: String,
        } => "stored password hash is malformed: {message}",
    }
}

/// One-way password hashing with salted, self-describing output.
///
/// Implementations are CPU bound; callers on an async runtime should move
/// calls onto a blocking thread.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Salt and hash `plaintext` into a PHC string.
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError>;

    /// `Ok(false)` for a wrong password; `Err` only when `hash` is unusable.
    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;
}
