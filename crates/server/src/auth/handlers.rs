//! Auth handlers

use crate::config::AppState;
use crate::ctx::Ctx;
use crate::error::Result;
use crate::models::UserInfo;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

// Missing body fields degrade to empty strings so the service returns its
// own ValidationError instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserInfo,
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    info!("POST /api/register - {}", req.email);

    let (user, token) = state
        .auth
        .register(req.username, req.email, req.password)
        .await?;

    Ok(Json(AuthResponse {
        message: "Registration successful".to_string(),
        token,
        user,
    }))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    info!("POST /api/login - {}", req.email);

    let (user, token) = state.auth.login(req.email, req.password).await?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user,
    }))
}

/// GET /api/verify
///
/// Reaching this handler means the middleware already verified the token.
pub async fn verify(ctx: Ctx) -> Json<Value> {
    Json(json!({ "valid": true, "user": ctx.claims() }))
}
