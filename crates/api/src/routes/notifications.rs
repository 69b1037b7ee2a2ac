//! Notification routes — broadcast fan-out, inbox listing, mark-as-read.

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use herald_common::error::AppError;
use herald_common::types::{BroadcastOutcome, Notification, RecipientSpec};
use herald_engine::directory::PgUserDirectory;
use herald_engine::fanout::FanoutCoordinator;
use herald_engine::inbox::{InboxPage, InboxQuery, InboxService};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/notifications/broadcast", post(send_broadcast))
        .route("/api/notifications", get(list_notifications))
        .route("/api/notifications/{id}/read", patch(mark_notification_read))
}

/// Request body for a broadcast: recipient tokens plus the message.
#[derive(Debug, Deserialize)]
pub struct BroadcastRequest {
    #[serde(default)]
    pub user_ids: Vec<serde_json::Value>,
    #[serde(default)]
    pub role: Option<String>,
    pub title: String,
    pub body: String,
}

/// POST /api/notifications/broadcast — Fan a message out to the resolved
/// recipient set. Staff only.
async fn send_broadcast(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<BroadcastRequest>,
) -> Result<Json<BroadcastOutcome>, AppError> {
    if !auth.role.is_staff() {
        return Err(AppError::Forbidden(
            "Only wardens and admins may send broadcasts".to_string(),
        ));
    }

    if req.title.trim().is_empty() || req.body.trim().is_empty() {
        return Err(AppError::Validation(
            "title and body must not be empty".to_string(),
        ));
    }

    let spec = RecipientSpec {
        user_ids: req.user_ids,
        role: req.role,
    };
    let directory = PgUserDirectory::new(state.pool.clone());

    let outcome = FanoutCoordinator::broadcast(
        &state.pool,
        &directory,
        &state.dispatcher,
        &spec,
        &req.title,
        &req.body,
    )
    .await?;

    tracing::info!(
        sender_id = auth.user_id,
        sent_count = outcome.sent_count,
        "Broadcast request handled"
    );

    Ok(Json(outcome))
}

/// GET /api/notifications — List the authenticated user's inbox.
async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<InboxQuery>,
) -> Result<Json<InboxPage>, AppError> {
    let page = InboxService::list(&state.pool, auth.user_id, &query).await?;
    Ok(Json(page))
}

/// PATCH /api/notifications/:id/read — Mark one of the caller's
/// notifications as read.
async fn mark_notification_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Notification>, AppError> {
    let notification = InboxService::mark_read(&state.pool, id, auth.user_id).await?;
    Ok(Json(notification))
}
