//! Database entities

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Argon2id hash, never the plain-text password.
    pub password: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ChatRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}
