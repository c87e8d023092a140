//! Message Feed Module
//!
//! Append-only message log with a bounded recent window. There is no push
//! channel; clients poll GET /api/messages on an interval and optimistically
//! append their own just-sent messages locally. A client may therefore
//! briefly see its own message twice after the next poll; the server does
//! not deduplicate.

pub mod handlers;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Claims, MessageRecord};

/// Maximum rows returned by a single feed fetch
const FEED_WINDOW: i64 = 50;

/// Maximum message length after trimming, in characters
const MAX_MESSAGE_LEN: usize = 500;

/// Feed manager handles message persistence and the recent window
pub struct FeedManager {
    pool: SqlitePool,
}

impl FeedManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a message attributed to the verified claims.
    ///
    /// Attribution always comes from the token, never from the request
    /// body, so a client cannot spoof another sender.
    pub async fn post_message(&self, author: &Claims, text: &str) -> Result<MessageRecord> {
        let text = text.trim();

        if text.is_empty() {
            return Err(Error::Validation("Message cannot be empty".to_string()));
        }

        if text.chars().count() > MAX_MESSAGE_LEN {
            return Err(Error::Validation(
                "Message must be at most 500 characters".to_string(),
            ));
        }

        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO messages (user_id, username, message, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(author.id)
        .bind(&author.username)
        .bind(text)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        info!("[Feed] Message from {}", author.username);

        Ok(MessageRecord {
            id: result.last_insert_rowid(),
            username: author.username.clone(),
            message: text.to_string(),
            created_at,
        })
    }

    /// The most recent window, oldest first.
    ///
    /// Ties on created_at fall back to insertion order (primary key).
    pub async fn list_recent(&self) -> Result<Vec<MessageRecord>> {
        let rows: Vec<(i64, String, String, String)> = sqlx::query_as(
            r#"
            SELECT id, username, message, created_at
            FROM messages
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(FEED_WINDOW)
        .fetch_all(&self.pool)
        .await?;

        let mut messages = Vec::with_capacity(rows.len());
        for (id, username, message, created_at) in rows {
            let created_at = created_at
                .parse()
                .map_err(|_| Error::Internal(format!("Bad created_at on message {}", id)))?;
            messages.push(MessageRecord {
                id,
                username,
                message,
                created_at,
            });
        }
        messages.reverse();

        Ok(messages)
    }
}
