//! Argon2id implementation of the password hasher port.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash as PhcString, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version};

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Produces and checks `$argon2id$...` PHC strings.
///
/// Verification reads the parameters embedded in the stored hash, so hashes
/// made with older cost settings keep verifying after the defaults change.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Hasher using the crate's recommended Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Params::default())
    }

    /// Hasher with explicit cost parameters, e.g. cheap ones in tests.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|phc| PasswordHash::new(phc.to_string()))
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let parsed = PhcString::new(hash.as_str())
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::malformed_hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        let params = Params::new(8, 1, 1, None).expect("cheap params are valid");
        Argon2PasswordHasher::with_params(params)
    }

    #[rstest]
    fn hashes_are_salted_phc_strings(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("secret1").expect("hash");
        let second = hasher.hash("secret1").expect("hash");
        assert!(first.as_str().starts_with("$argon2id$"));
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("secret1", true)]
    #[case("secret2", false)]
    #[case("", false)]
    fn verify_distinguishes_passwords(
        hasher: Argon2PasswordHasher,
        #[case] attempt: &str,
        #[case] expected: bool,
    ) {
        let stored = hasher.hash("secret1").expect("hash");
        assert_eq!(hasher.verify(attempt, &stored).expect("verify"), expected);
    }

    #[rstest]
    fn malformed_hash_is_an_error(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("secret1", &PasswordHash::new("plaintext-in-db"))
            .expect_err("not a PHC string");
        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }
}
