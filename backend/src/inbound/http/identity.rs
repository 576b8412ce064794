//! Bearer-token extractors.
//!
//! Handlers take [`Authenticated`] when a signed-in user is required and
//! [`Caller`] when anonymous use is allowed. Both read the `Authorization`
//! header and resolve it through the account service before the handler
//! body runs.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Identity, User, resolve_mandatory, resolve_optional};

use super::state::HttpState;

/// Token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively. Any other shape counts as no
/// token at all.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_owned())
}

fn http_state(req: &HttpRequest) -> Result<web::Data<HttpState>, Error> {
    req.app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))
}

/// A caller holding a valid token for an existing user.
#[derive(Debug, Clone)]
pub struct Authenticated(pub User);

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = http_state(req);
        let token = bearer_token(req);
        Box::pin(async move {
            let state = state?;
            resolve_mandatory(state.accounts.as_ref(), token.as_deref())
                .await
                .map(Self)
        })
    }
}

/// Whoever is calling, identified or not.
#[derive(Debug, Clone)]
pub struct Caller(pub Identity);

impl FromRequest for Caller {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = http_state(req);
        let token = bearer_token(req);
        Box::pin(async move {
            let state = state?;
            resolve_optional(state.accounts.as_ref(), token.as_deref())
                .await
                .map(Self)
        })
    }
}
