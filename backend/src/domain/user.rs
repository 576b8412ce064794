//! Account identity types.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Minimum username length in characters.
pub const USERNAME_MIN: usize = 3;
/// Maximum username length in characters.
pub const USERNAME_MAX: usize = 100;

/// Database-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw row id.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw row id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Why a username was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UsernameValidationError {
    /// Fewer than [`USERNAME_MIN`] characters.
    #[error("username must be at least 3 characters")]
    TooShort,
    /// More than [`USERNAME_MAX`] characters.
    #[error("username must be at most 100 characters")]
    TooLong,
}

impl UsernameValidationError {
    /// Machine-readable code surfaced in validation details.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
        }
    }
}

/// Unique login name, 3 to 100 characters.
///
/// The value is stored exactly as supplied. Surrounding whitespace is not
/// trimmed, so `" bob"` and `"bob"` are different accounts.
///
/// # Examples
/// ```
/// use tidytext::domain::Username;
///
/// assert!(Username::new("alice").is_ok());
/// assert!(Username::new("al").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Check the length bounds and wrap `raw`.
    ///
    /// # Errors
    /// `TooShort` or `TooLong` when the character count is out of range.
    pub fn new(raw: impl Into<String>) -> Result<Self, UsernameValidationError> {
        let raw = raw.into();
        let length = raw.chars().count();
        if length < USERNAME_MIN {
            return Err(UsernameValidationError::TooShort);
        }
        if length > USERNAME_MAX {
            return Err(UsernameValidationError::TooLong);
        }
        Ok(Self(raw))
    }

    /// The username as registered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(value_type = i64, example = 1)]
    id: UserId,
    username: Username,
}

impl User {
    /// Assemble a user from its parts.
    #[must_use]
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    /// Account id.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }
}

/// PHC-formatted password hash as stored alongside the account.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a PHC string without parsing it.
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// The PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// A persisted account: the public user plus its credential hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Public part.
    pub user: User,
    /// Stored credential.
    pub password_hash: PasswordHash,
}

/// Account awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserAccount {
    /// Requested login name.
    pub username: Username,
    /// Hash of the chosen password.
    pub password_hash: PasswordHash,
}
