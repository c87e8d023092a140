//! Poll-based Chat Server Library
//!
//! Users register or log in, receive a signed session token, and post and
//! poll short text messages stored in SQLite. There is no push channel;
//! clients re-fetch the recent window on an interval.

pub mod auth;
pub mod config;
pub mod ctx;
pub mod error;
pub mod feed;
pub mod models;
pub mod router;
pub mod store;

// Re-exports for convenience
pub use config::{AppState, ServerConfig};
pub use ctx::Ctx;
pub use error::{Error, Result};

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        // Already set, ignore
    }

    info!("=== Chat Server ===");

    let config = ServerConfig::from_env()?;
    info!("Users database: {:?}", config.db_path);

    let pool = store::init_db(&config.db_path).await?;
    let state = AppState::new(pool, &config);
    let app = router::router(state);

    info!("Listening on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
