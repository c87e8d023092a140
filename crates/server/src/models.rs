use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public user info (no sensitive data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Claims embedded in a session token.
///
/// Stateless: once the signature and expiry check out, these are trusted
/// as-is and never re-checked against the users table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

/// A persisted chat message as it goes over the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: i64,
    /// Sender's username, snapshotted at send time
    pub username: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
