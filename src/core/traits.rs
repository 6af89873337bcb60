//! DI "Interfaces"

use crate::infrastructure::entities;
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Lists the user's chat history, oldest record first.
    ///
    /// A read failure is swallowed and yields an empty list.
    async fn chat_history(&self, user_id: Uuid) -> Vec<entities::ChatRecord>;

    /// Runs one full advisor exchange: picks a prompt template for the
    /// message, calls the generative backend, cleans up the reply and
    /// persists the pair. Any failure propagates as a single error.
    async fn submit_message(
        &self,
        user_id: Uuid,
        message: String,
    ) -> anyhow::Result<entities::ChatRecord>;
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("username is already taken")]
    UsernameTaken,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("password hashing failed")]
    Hash,

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

#[async_trait]
pub trait AccountService: Send + Sync {
    /// Creates a new user with a hashed password.
    ///
    /// Returns [`AccountError::UsernameTaken`] if the name is in use.
    async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<entities::User, AccountError>;

    /// Verifies credentials and returns the matching user.
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<entities::User, AccountError>;

    /// Fetches a user by id. Lookup failures read as "no such user".
    async fn get_user(&self, user_id: Uuid) -> Option<entities::User>;
}
