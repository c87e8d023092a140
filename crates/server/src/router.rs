//! Route table
//!
//! Public auth routes plus the token-protected message feed.

use crate::auth::handlers as auth_handlers;
use crate::auth::middleware::mw_require_auth;
use crate::config::AppState;
use crate::feed::handlers as feed_handlers;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/api/messages",
            get(feed_handlers::list_messages).post(feed_handlers::send_message),
        )
        .route("/api/verify", get(auth_handlers::verify))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            mw_require_auth,
        ));

    Router::new()
        .route("/api/register", post(auth_handlers::register))
        .route("/api/login", post(auth_handlers::login))
        // Health check
        .route("/health", get(health_check))
        .merge(protected)
        .with_state(state)
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}
