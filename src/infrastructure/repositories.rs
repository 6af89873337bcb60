//! DB Repository abstractions

use crate::infrastructure::database::DatabaseConnection;
use crate::infrastructure::entities::{ChatRecord, User};
use crate::infrastructure::traits::{ChatRepository, UserRepository};
use async_trait::async_trait;
use di::{Ref, injectable};
use log::error;
use uuid::Uuid;

#[injectable(ChatRepository)]
pub struct DbChatRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl ChatRepository for DbChatRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ChatRecord>, sqlx::Error> {
        sqlx::query_as(
            "SELECT * FROM chat_history WHERE user_id = ? ORDER BY datetime(created_at) ASC, rowid ASC",
        )
        .bind(user_id)
        .fetch_all(&**self.connection)
        .await
        .inspect_err(|e| error!("failed to list chat history: {e}"))
    }

    async fn append(&self, record: ChatRecord) -> Result<ChatRecord, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO chat_history (id, user_id, message, response, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(record.message)
        .bind(record.response)
        .bind(record.created_at)
        .fetch_one(&**self.connection)
        .await
        .inspect_err(|e| error!("failed to store chat record: {e}"))
    }
}

#[injectable(UserRepository)]
pub struct DbUserRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl UserRepository for DbUserRepository {
    async fn create(&self, user: User) -> Result<User, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO users (id, username, password, created_at) VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(user.id)
        .bind(user.username)
        .bind(user.password)
        .bind(user.created_at)
        .fetch_one(&**self.connection)
        .await
        .inspect_err(|e| error!("failed to create user: {e}"))
    }

    async fn get(&self, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&**self.connection)
            .await
            .inspect_err(|e| error!("failed to get user: {e}"))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&**self.connection)
            .await
            .inspect_err(|e| error!("failed to get user by username: {e}"))
    }
}
