//! Authentication Module
//!
//! Handles registration, login, and stateless session tokens. Tokens are
//! self-contained signed JWTs: any validly signed, unexpired token is
//! treated as the embedded identity without a session lookup, so revoking
//! a user does not invalidate tokens issued before expiry.

pub mod handlers;
pub mod middleware;

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::{Claims, UserInfo};

/// bcrypt work factor
const BCRYPT_COST: u32 = 10;

/// Token lifetime from issuance
const TOKEN_TTL_HOURS: i64 = 24;

const MIN_PASSWORD_LEN: usize = 6;

/// Auth manager handles all authentication
pub struct AuthManager {
    pool: SqlitePool,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthManager {
    /// Create new auth manager with an explicit signing secret
    pub fn new(pool: SqlitePool, jwt_secret: &str) -> Self {
        Self {
            pool,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }

    /// Register a new user and issue a session token
    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<(UserInfo, String)> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(Error::Validation("All fields are required".to_string()));
        }

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        // bcrypt is CPU-bound, keep it off the async workers
        let password_hash =
            tokio::task::spawn_blocking(move || hash(password, BCRYPT_COST)).await??;

        // A unique-constraint violation here maps to Conflict; the service
        // does not distinguish which column collided.
        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)",
        )
        .bind(&username)
        .bind(&email)
        .bind(&password_hash)
        .execute(&self.pool)
        .await?;

        info!("[Auth] User registered: {} ({})", username, email);

        let user = UserInfo {
            id: result.last_insert_rowid(),
            username,
            email,
        };
        let token = self.issue_token(&user)?;

        Ok((user, token))
    }

    /// Login with email and password, issuing a fresh session token
    pub async fn login(&self, email: String, password: String) -> Result<(UserInfo, String)> {
        if email.is_empty() || password.is_empty() {
            return Err(Error::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let row: Option<(i64, String, String, String)> = sqlx::query_as(
            "SELECT id, username, email, password_hash FROM users WHERE email = ?",
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?;

        // Unknown email and wrong password produce the same error, so a
        // caller cannot probe for account existence.
        let (id, username, email, password_hash) = row.ok_or(Error::LoginFail)?;

        let valid =
            tokio::task::spawn_blocking(move || verify(&password, &password_hash)).await??;

        if !valid {
            warn!("[Auth] Failed login attempt for {}", email);
            return Err(Error::LoginFail);
        }

        let user = UserInfo {
            id,
            username,
            email,
        };
        let token = self.issue_token(&user)?;

        info!("[Auth] User logged in: {}", user.username);

        Ok((user, token))
    }

    /// Issue a signed token embedding the user's identity, valid for 24 hours
    pub fn issue_token(&self, user: &UserInfo) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| Error::Internal(format!("Token signing failed: {}", e)))
    }

    /// Validate signature and expiry, returning the embedded claims
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| Error::AuthFailInvalidToken)
    }
}
