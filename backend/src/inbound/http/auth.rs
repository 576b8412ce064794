//! Account endpoints.
//!
//! ```text
//! POST /auth/signup {"username":"alice","password":"hunter22"}
//! POST /auth/login  username=alice&password=hunter22
//! GET  /auth/me     Authorization: Bearer <token>
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, SignupCredentials, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Authenticated;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::credential_error;

/// Signup body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SignupRequest {
    /// Login name to register.
    #[schema(example = "alice", min_length = 3, max_length = 100)]
    pub username: String,
    /// Password to hash and store.
    #[schema(example = "hunter22", min_length = 6, max_length = 128)]
    pub password: String,
}

/// Login form fields, sent as `application/x-www-form-urlencoded`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginForm {
    /// Registered login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Issued bearer credential.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Signed JWT.
    pub access_token: String,
    /// Always `bearer`.
    #[schema(example = "bearer")]
    pub token_type: String,
}

/// Public view of an account, as returned by signup and `/auth/me`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    /// Account id.
    pub id: i64,
    /// Login name.
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            username: user.username().as_str().to_owned(),
        }
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid username or password", body = Error),
        (status = 409, description = "Username already registered", body = Error),
        (status = 503, description = "User store unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let SignupRequest { username, password } = payload.into_inner();
    let credentials =
        SignupCredentials::try_from_parts(&username, &password).map_err(credential_error)?;
    let user = state.accounts.signup(&credentials).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Exchange a username and password for a bearer token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Missing username or password", body = Error),
        (status = 401, description = "Incorrect username or password", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    form: web::Form<LoginForm>,
) -> ApiResult<web::Json<TokenResponse>> {
    let LoginForm { username, password } = form.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&username, &password).map_err(credential_error)?;
    let token = state.accounts.login(&credentials).await?;
    Ok(web::Json(TokenResponse {
        access_token: token.as_str().to_owned(),
        token_type: "bearer".to_owned(),
    }))
}

/// The account the presented token belongs to.
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing, expired or invalid token", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn me(Authenticated(user): Authenticated) -> web::Json<UserResponse> {
    web::Json(UserResponse::from(&user))
}
