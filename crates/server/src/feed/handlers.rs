//! Feed handlers

use crate::config::AppState;
use crate::ctx::Ctx;
use crate::error::Result;
use crate::models::MessageRecord;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

// Any identity fields a client puts in the body are ignored; attribution
// comes from the verified token claims.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub message: String,
    pub data: MessageRecord,
}

/// GET /api/messages
pub async fn list_messages(
    State(state): State<AppState>,
    _ctx: Ctx,
) -> Result<Json<Vec<MessageRecord>>> {
    let messages = state.feed.list_recent().await?;
    Ok(Json(messages))
}

/// POST /api/messages
pub async fn send_message(
    State(state): State<AppState>,
    ctx: Ctx,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>> {
    info!("POST /api/messages - {}", ctx.username());

    let record = state.feed.post_message(ctx.claims(), &req.message).await?;

    Ok(Json(SendMessageResponse {
        message: "Message sent successfully".to_string(),
        data: record,
    }))
}
