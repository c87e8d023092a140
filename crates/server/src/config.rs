//! Chat server configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::auth::AuthManager;
use crate::feed::FeedManager;

/// Process-wide configuration, resolved once at startup
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// SQLite database file
    pub db_path: PathBuf,
    /// Secret used to sign and verify session tokens
    pub jwt_secret: String,
    /// Address to listen on
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// The signing key is required; the server refuses to start without it.
    pub fn from_env() -> Result<Self> {
        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let db_path = std::env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("chat.sqlite"));

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        Ok(Self {
            db_path,
            jwt_secret,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
        })
    }
}

/// App state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthManager>,
    pub feed: Arc<FeedManager>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &ServerConfig) -> Self {
        Self {
            auth: Arc::new(AuthManager::new(pool.clone(), &config.jwt_secret)),
            feed: Arc::new(FeedManager::new(pool)),
        }
    }
}
