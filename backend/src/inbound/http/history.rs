//! History endpoints. All require a bearer token.

use actix_web::{HttpResponse, delete, get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::text::TransformKind;
use crate::domain::{Error, HistoryEntry, HistoryEntryId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Authenticated;
use crate::inbound::http::state::HttpState;

/// One recorded transformation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct HistoryItem {
    /// Entry id, usable with `DELETE /history/{id}`.
    pub id: i64,
    /// Text as submitted.
    pub original_text: String,
    /// Text after the transformation.
    pub result_text: String,
    /// Transformation name.
    #[serde(rename = "type")]
    pub kind: TransformKind,
    /// When the transformation ran.
    pub timestamp: DateTime<Utc>,
}

impl From<HistoryEntry> for HistoryItem {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: entry.id.get(),
            original_text: entry.original_text,
            result_text: entry.result_text,
            kind: entry.kind,
            timestamp: entry.created_at,
        }
    }
}

/// The caller's history, newest first.
#[utoipa::path(
    get,
    path = "/history",
    responses(
        (status = 200, description = "History entries, newest first", body = [HistoryItem]),
        (status = 401, description = "Missing, expired or invalid token", body = Error),
        (status = 503, description = "History store unavailable", body = Error)
    ),
    tags = ["history"],
    operation_id = "listHistory"
)]
#[get("")]
pub async fn list_history(
    state: web::Data<HttpState>,
    Authenticated(user): Authenticated,
) -> ApiResult<web::Json<Vec<HistoryItem>>> {
    let entries = state.history.list(user.id()).await?;
    Ok(web::Json(entries.into_iter().map(HistoryItem::from).collect()))
}

/// Delete one of the caller's entries.
#[utoipa::path(
    delete,
    path = "/history/{id}",
    params(("id" = i64, Path, description = "History entry id")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 401, description = "Missing, expired or invalid token", body = Error),
        (status = 404, description = "No such entry for this user", body = Error)
    ),
    tags = ["history"],
    operation_id = "deleteHistoryItem"
)]
#[delete("/{id}")]
pub async fn delete_history_item(
    state: web::Data<HttpState>,
    Authenticated(user): Authenticated,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = HistoryEntryId::new(path.into_inner());
    state.history_command.delete_entry(user.id(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete all of the caller's entries.
#[utoipa::path(
    delete,
    path = "/history",
    responses(
        (status = 204, description = "History cleared"),
        (status = 401, description = "Missing, expired or invalid token", body = Error)
    ),
    tags = ["history"],
    operation_id = "clearHistory"
)]
#[delete("")]
pub async fn clear_history(
    state: web::Data<HttpState>,
    Authenticated(user): Authenticated,
) -> ApiResult<HttpResponse> {
    let removed = state.history_command.clear(user.id()).await?;
    info!(user_id = %user.id(), removed, "history cleared");
    Ok(HttpResponse::NoContent().finish())
}

/// Register the history endpoints under `/history`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/history")
            .service(list_history)
            .service(clear_history)
            .service(delete_history_item),
    );
}
