//! Password-based accounts: signup, login and bearer token resolution.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountService, PasswordHashError, PasswordHasher, TokenCodec, TokenError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    AccessToken, Error, ErrorCode, Identity, LoginCredentials, NewUserAccount, PasswordHash,
    SignupCredentials, User,
};

const INVALID_LOGIN: &str = "Incorrect username or password";
const INVALID_TOKEN: &str = "Could not validate credentials";
const MISSING_TOKEN: &str = "Not authenticated";
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-users";

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::conflict("Username already registered")
        }
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user store unavailable");
            Error::service_unavailable("user store unavailable")
        }
        UserPersistenceError::Query { message } => Error::internal(message),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

/// [`AccountService`] backed by a user repository, a password hasher and a
/// token codec.
pub struct PasswordAccountService<U: ?Sized, H: ?Sized, T: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
    decoy_hash: OnceLock<PasswordHash>,
}

impl<U: ?Sized, H: ?Sized, T: ?Sized> PasswordAccountService<U, H, T> {
    /// Wire the service to its ports.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
            decoy_hash: OnceLock::new(),
        }
    }
}

impl<U, H, T> PasswordAccountService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized + 'static,
    T: TokenCodec + ?Sized,
{
    async fn hash_password(&self, plaintext: &str) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let plaintext = Zeroizing::new(plaintext.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hash_error)
    }

    async fn verify_password(
        &self,
        plaintext: &str,
        hash: PasswordHash,
    ) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let plaintext = Zeroizing::new(plaintext.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
            .map_err(map_hash_error)
    }

    /// Run one verification against a throwaway hash so that a login for an
    /// unknown username costs as much as one with a wrong password.
    async fn verify_against_decoy(&self, plaintext: &str) {
        let decoy = match self.decoy_hash.get() {
            Some(hash) => Ok(hash.clone()),
            None => self
                .hash_password(DECOY_PASSWORD)
                .await
                .map(|hash| self.decoy_hash.get_or_init(|| hash).clone()),
        };
        let outcome = match decoy {
            Ok(hash) => self.verify_password(plaintext, hash).await,
            Err(err) => Err(err),
        };
        if let Err(err) = outcome {
            warn!(error = %err, "decoy password verification failed");
        }
    }
}

#[async_trait]
impl<U, H, T> AccountService for PasswordAccountService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized + 'static,
    T: TokenCodec + ?Sized,
{
    async fn signup(&self, credentials: &SignupCredentials) -> Result<User, Error> {
        let username = credentials.username();
        if self
            .users
            .find_by_username(username.as_str())
            .await
            .map_err(map_user_persistence_error)?
            .is_some()
        {
            return Err(Error::conflict("Username already registered"));
        }

        let password_hash = self.hash_password(credentials.password()).await?;
        let account = self
            .users
            .create(&NewUserAccount {
                username: username.clone(),
                password_hash,
            })
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %account.user.id(), "account registered");
        Ok(account.user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error> {
        let account = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_persistence_error)?;
        let Some(account) = account else {
            debug!("login for unknown username");
            self.verify_against_decoy(credentials.password()).await;
            return Err(Error::unauthorized(INVALID_LOGIN));
        };

        if !self
            .verify_password(credentials.password(), account.password_hash)
            .await?
        {
            debug!(user_id = %account.user.id(), "login with wrong password");
            return Err(Error::unauthorized(INVALID_LOGIN));
        }

        let token = self
            .tokens
            .issue(account.user.username().as_str(), self.clock.utc())
            .map_err(|err| Error::internal(err.to_string()))?;
        info!(user_id = %account.user.id(), expires_at = %token.expires_at(), "token issued");
        Ok(token)
    }

    async fn authenticate(&self, token: &str) -> Result<User, Error> {
        let claims = self.tokens.decode(token).map_err(|err| match err {
            TokenError::Invalid { message } => {
                debug!(%message, "bearer token rejected");
                Error::unauthorized(INVALID_TOKEN)
            }
            TokenError::Encode { message } => Error::internal(message),
        })?;

        if !claims.is_live_at(self.clock.utc()) {
            debug!(expires_at = %claims.expires_at, "bearer token expired");
            return Err(Error::unauthorized(INVALID_TOKEN));
        }

        self.users
            .find_by_username(&claims.subject)
            .await
            .map_err(map_user_persistence_error)?
            .map(|account| account.user)
            .ok_or_else(|| Error::unauthorized(INVALID_TOKEN))
    }
}

/// Identify the caller when a token is present, degrading to anonymous on
/// any credential problem.
///
/// Errors other than unauthorized, such as an unreachable user store, are
/// returned unchanged.
pub async fn resolve_optional(
    accounts: &dyn AccountService,
    token: Option<&str>,
) -> Result<Identity, Error> {
    let Some(token) = token else {
        return Ok(Identity::Anonymous);
    };
    match accounts.authenticate(token).await {
        Ok(user) => Ok(Identity::Identified(user)),
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            warn!("unusable bearer token on optional route; continuing anonymously");
            Ok(Identity::Anonymous)
        }
        Err(err) => Err(err),
    }
}

/// Identify the caller or fail with an unauthorized error.
pub async fn resolve_mandatory(
    accounts: &dyn AccountService,
    token: Option<&str>,
) -> Result<User, Error> {
    let token = token.ok_or_else(|| Error::unauthorized(MISSING_TOKEN))?;
    accounts.authenticate(token).await
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
