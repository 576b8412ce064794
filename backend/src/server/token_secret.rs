//! Loading the token signing secret.
//!
//! Release builds insist on a readable secret file of at least
//! [`SECRET_MIN_LEN`] bytes. Debug builds, or deployments that opt in via
//! `allow_ephemeral`, fall back to a random secret that lives only as long as
//! the process, which invalidates every issued token on restart.

use std::path::{Path, PathBuf};

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

/// Minimum secret length accepted in release builds.
pub const SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;
const FINGERPRINT_BYTES: usize = 8;

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing secrets fall back to an ephemeral one with a warning.
    Debug,
    /// Secrets must be present and long enough.
    Release,
}

impl BuildMode {
    /// `Debug` when compiled with debug assertions, otherwise `Release`.
    #[must_use]
    pub const fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while loading the signing secret.
#[derive(thiserror::Error, Debug)]
pub enum TokenSecretError {
    /// The secret file could not be read.
    #[error("failed to read token secret at {path}: {source}")]
    KeyRead {
        /// Configured secret location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The secret file holds fewer than [`SECRET_MIN_LEN`] bytes.
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        /// Configured secret location.
        path: PathBuf,
        /// Bytes left after trimming.
        length: usize,
        /// Required minimum.
        min_len: usize,
    },
    /// A release build was asked to run on a random secret.
    #[error("ephemeral token secrets are not allowed in release builds")]
    EphemeralNotAllowed,
}

/// Read the secret at `path`, or mint an ephemeral one where permitted.
///
/// Trailing whitespace (typically a newline left by `echo` or an editor) is
/// stripped before the length check.
///
/// # Errors
/// See [`TokenSecretError`].
pub fn load_token_secret(
    path: &Path,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Zeroizing<Vec<u8>>, TokenSecretError> {
    if allow_ephemeral && !mode.is_debug() {
        return Err(TokenSecretError::EphemeralNotAllowed);
    }

    match std::fs::read(path) {
        Ok(mut bytes) => {
            let trimmed = bytes.trim_ascii_end().len();
            bytes.truncate(trimmed);
            let length = bytes.len();
            if mode == BuildMode::Release && length < SECRET_MIN_LEN {
                bytes.zeroize();
                return Err(TokenSecretError::KeyTooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: SECRET_MIN_LEN,
                });
            }
            if length < SECRET_MIN_LEN {
                warn!(
                    path = %path.display(),
                    length,
                    "token secret shorter than recommended (dev only)"
                );
            }
            Ok(Zeroizing::new(bytes))
        }
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary token secret (dev only)"
                );
                Ok(ephemeral_secret())
            } else {
                Err(TokenSecretError::KeyRead {
                    path: path.to_path_buf(),
                    source: error,
                })
            }
        }
    }
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut bytes = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// First 8 bytes of the secret's SHA-256, hex encoded.
///
/// Safe to log; lets operators tell which secret is active.
#[must_use]
pub fn secret_fingerprint(secret: &[u8]) -> String {
    let digest = Sha256::digest(secret);
    let prefix: Vec<u8> = digest.iter().copied().take(FINGERPRINT_BYTES).collect();
    hex::encode(prefix)
}
