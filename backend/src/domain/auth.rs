//! Credentials, bearer tokens and caller identity.
//!
//! Inbound adapters turn raw strings into these types before talking to the
//! account service, so the service never sees unvalidated input.

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use super::{User, Username, UsernameValidationError};

/// Minimum signup password length in characters.
pub const PASSWORD_MIN: usize = 6;
/// Maximum signup password length in characters.
pub const PASSWORD_MAX: usize = 128;

/// Rejected login or signup input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialValidationError {
    /// No username was given.
    #[error("username must not be empty")]
    EmptyUsername,
    /// No password was given at login.
    #[error("password must not be empty")]
    EmptyPassword,
    /// The username failed its own rules.
    #[error(transparent)]
    Username(#[from] UsernameValidationError),
    /// Fewer than [`PASSWORD_MIN`] characters.
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
    /// More than [`PASSWORD_MAX`] characters.
    #[error("password must be at most 128 characters")]
    PasswordTooLong,
}

impl CredentialValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::Username(_) => "username",
            Self::EmptyPassword | Self::PasswordTooShort | Self::PasswordTooLong => "password",
        }
    }

    /// Machine-readable failure code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::EmptyPassword => "missing_field",
            Self::Username(inner) => inner.code(),
            Self::PasswordTooShort => "too_short",
            Self::PasswordTooLong => "too_long",
        }
    }
}

/// Username and password submitted to the login form.
///
/// Both parts must be non-empty. Neither is trimmed: usernames are matched
/// exactly as registered.
///
/// # Examples
/// ```
/// use tidytext::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("alice", "hunter22").unwrap();
/// assert_eq!(creds.username(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw form fields.
    ///
    /// # Errors
    /// `EmptyUsername` or `EmptyPassword` when either part is blank.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialValidationError> {
        if username.is_empty() {
            return Err(CredentialValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username exactly as submitted.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Plaintext password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Validated signup payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl SignupCredentials {
    /// Validate a signup request.
    ///
    /// An empty password is reported as `PasswordTooShort`, like any other
    /// password under [`PASSWORD_MIN`] characters.
    ///
    /// # Errors
    /// The first failing rule, username before password.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialValidationError> {
        let username = Username::new(username)?;
        let length = password.chars().count();
        if length < PASSWORD_MIN {
            return Err(CredentialValidationError::PasswordTooShort);
        }
        if length > PASSWORD_MAX {
            return Err(CredentialValidationError::PasswordTooLong);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// The validated username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Plaintext password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Signed bearer token handed to a client after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Pair an encoded token with its expiry.
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Encoded token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Instant after which the token is rejected.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Claims recovered from a token whose signature verified.
///
/// Expiry is not checked by the codec; callers compare `expires_at` against
/// their own clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Username the token was minted for.
    pub subject: String,
    /// Mint time.
    pub issued_at: DateTime<Utc>,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
}

impl TokenClaims {
    /// True while `now` is strictly before the expiry instant.
    #[must_use]
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Who is calling.
///
/// Optional-auth endpoints receive `Anonymous` for a missing or unusable
/// credential instead of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// A verified account.
    Identified(User),
    /// No usable credential was presented.
    Anonymous,
}

impl Identity {
    /// The user behind an identified caller.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Identified(user) => Some(user),
            Self::Anonymous => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialValidationError::EmptyUsername)]
    #[case("alice", "", CredentialValidationError::EmptyPassword)]
    fn login_requires_both_parts(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: CredentialValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password).expect_err("must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn login_keeps_whitespace() {
        let creds = LoginCredentials::try_from_parts(" alice ", " pw ").expect("valid");
        assert_eq!(creds.username(), " alice ");
        assert_eq!(creds.password(), " pw ");
    }

    #[rstest]
    #[case("al", "secret1", "username", "too_short")]
    #[case("alice", "12345", "password", "too_short")]
    #[case("alice", "", "password", "too_short")]
    #[case("alice", &"p".repeat(129), "password", "too_long")]
    fn signup_rejects_out_of_range_lengths(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let err = SignupCredentials::try_from_parts(username, password).expect_err("must fail");
        assert_eq!(err.field(), field);
        assert_eq!(err.code(), code);
    }

    #[rstest]
    #[case("123456")]
    #[case(&"p".repeat(128))]
    fn signup_accepts_boundary_passwords(#[case] password: &str) {
        let creds = SignupCredentials::try_from_parts("alice", password).expect("valid");
        assert_eq!(creds.username().as_str(), "alice");
    }

    #[rstest]
    fn claims_expire_at_the_boundary() {
        let issued = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("valid");
        let claims = TokenClaims {
            subject: "alice".into(),
            issued_at: issued,
            expires_at: issued + Duration::hours(24),
        };
        assert!(claims.is_live_at(issued + Duration::hours(23)));
        assert!(!claims.is_live_at(issued + Duration::hours(24)));
    }
}
