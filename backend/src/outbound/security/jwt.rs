//! HS256 bearer tokens via `jsonwebtoken`.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ports::{TokenCodec, TokenError};
use crate::domain::{AccessToken, TokenClaims};

/// Signing material and token lifetime.
pub struct TokenConfig {
    /// HMAC key.
    pub secret: Zeroizing<Vec<u8>>,
    /// Lifetime of issued tokens.
    pub ttl: TimeDelta,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies tokens carrying `sub`, `iat` and `exp`.
///
/// `decode` checks the signature and claim shape only; whether `exp` has
/// passed is decided by the account service against its clock.
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl JwtTokenCodec {
    /// Codec keyed by `config.secret`.
    #[must_use]
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(&config.secret),
            decoding: DecodingKey::from_secret(&config.secret),
            validation,
            ttl: config.ttl,
        }
    }
}

fn timestamp(seconds: i64, claim: &str) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| TokenError::invalid(format!("{claim} out of range")))
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<AccessToken, TokenError> {
        let expires_at = issued_at + self.ttl;
        let claims = WireClaims {
            sub: subject.to_owned(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::encode(err.to_string()))?;
        Ok(AccessToken::new(token, expires_at))
    }

    fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<WireClaims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenError::invalid(err.to_string()))?;
        Ok(TokenClaims {
            subject: data.claims.sub,
            issued_at: timestamp(data.claims.iat, "iat")?,
            expires_at: timestamp(data.claims.exp, "exp")?,
        })
    }
}
