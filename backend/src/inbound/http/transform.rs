//! Text transformation endpoints.
//!
//! All six take `{"text": "..."}` and answer `{"result": "..."}`. A bearer
//! token is optional: with a valid one the call lands in the caller's
//! history, without one the transform still runs.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::text::{TransformKind, TransformText};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Caller;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::empty_text_error;

/// Body accepted by every transform endpoint.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TransformRequest {
    /// Input text; must not be empty.
    #[schema(example = "  Hello   World  ", min_length = 1)]
    pub text: String,
}

/// Transformed text.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TransformResponse {
    /// Output of the transformation.
    pub result: String,
}

async fn run(
    state: web::Data<HttpState>,
    caller: Caller,
    kind: TransformKind,
    payload: web::Json<TransformRequest>,
) -> ApiResult<web::Json<TransformResponse>> {
    let text = TransformText::new(payload.into_inner().text).map_err(empty_text_error)?;
    let result = state.transforms.transform(&caller.0, kind, &text).await?;
    Ok(web::Json(TransformResponse { result }))
}

/// Trim and collapse whitespace runs.
#[utoipa::path(
    post,
    path = "/api/clean",
    request_body = TransformRequest,
    responses(
        (status = 200, body = TransformResponse),
        (status = 400, description = "Empty or malformed text", body = Error)
    ),
    tags = ["transform"],
    operation_id = "clean",
    security((), ("BearerToken" = []))
)]
#[post("/clean")]
pub async fn clean(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<TransformRequest>,
) -> ApiResult<web::Json<TransformResponse>> {
    run(state, caller, TransformKind::Clean, payload).await
}

/// URL-safe lower-case slug.
#[utoipa::path(
    post,
    path = "/api/slug",
    request_body = TransformRequest,
    responses(
        (status = 200, body = TransformResponse),
        (status = 400, description = "Empty or malformed text", body = Error)
    ),
    tags = ["transform"],
    operation_id = "slug",
    security((), ("BearerToken" = []))
)]
#[post("/slug")]
pub async fn slug(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<TransformRequest>,
) -> ApiResult<web::Json<TransformResponse>> {
    run(state, caller, TransformKind::Slug, payload).await
}

/// camelCase.
#[utoipa::path(
    post,
    path = "/api/case/camel",
    request_body = TransformRequest,
    responses(
        (status = 200, body = TransformResponse),
        (status = 400, description = "Empty or malformed text", body = Error)
    ),
    tags = ["transform"],
    operation_id = "camelCase",
    security((), ("BearerToken" = []))
)]
#[post("/case/camel")]
pub async fn camel(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<TransformRequest>,
) -> ApiResult<web::Json<TransformResponse>> {
    run(state, caller, TransformKind::Camel, payload).await
}

/// snake_case.
#[utoipa::path(
    post,
    path = "/api/case/snake",
    request_body = TransformRequest,
    responses(
        (status = 200, body = TransformResponse),
        (status = 400, description = "Empty or malformed text", body = Error)
    ),
    tags = ["transform"],
    operation_id = "snakeCase",
    security((), ("BearerToken" = []))
)]
#[post("/case/snake")]
pub async fn snake(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<TransformRequest>,
) -> ApiResult<web::Json<TransformResponse>> {
    run(state, caller, TransformKind::Snake, payload).await
}

/// Title Case.
#[utoipa::path(
    post,
    path = "/api/case/title",
    request_body = TransformRequest,
    responses(
        (status = 200, body = TransformResponse),
        (status = 400, description = "Empty or malformed text", body = Error)
    ),
    tags = ["transform"],
    operation_id = "titleCase",
    security((), ("BearerToken" = []))
)]
#[post("/case/title")]
pub async fn title(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<TransformRequest>,
) -> ApiResult<web::Json<TransformResponse>> {
    run(state, caller, TransformKind::Title, payload).await
}

/// Word-by-word spelling correction. Whitespace in the result is single
/// spaces regardless of the input.
#[utoipa::path(
    post,
    path = "/api/spell",
    request_body = TransformRequest,
    responses(
        (status = 200, body = TransformResponse),
        (status = 400, description = "Empty or malformed text", body = Error)
    ),
    tags = ["transform"],
    operation_id = "spell",
    security((), ("BearerToken" = []))
)]
#[post("/spell")]
pub async fn spell(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<TransformRequest>,
) -> ApiResult<web::Json<TransformResponse>> {
    run(state, caller, TransformKind::Spell, payload).await
}

/// Register the transform endpoints under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(clean)
            .service(slug)
            .service(camel)
            .service(snake)
            .service(title)
            .service(spell),
    );
}
