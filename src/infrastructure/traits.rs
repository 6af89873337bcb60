//! Infrastructure traits, used for DI on higher levels

use crate::infrastructure::entities;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Lists the user's chat records, ordered by creation time ascending.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<entities::ChatRecord>, sqlx::Error>;

    /// Appends one chat record. Records are never updated or deleted afterwards.
    async fn append(
        &self,
        record: entities::ChatRecord,
    ) -> Result<entities::ChatRecord, sqlx::Error>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: entities::User) -> Result<entities::User, sqlx::Error>;

    async fn get(&self, user_id: Uuid) -> Result<Option<entities::User>, sqlx::Error>;

    async fn get_by_username(&self, username: &str)
        -> Result<Option<entities::User>, sqlx::Error>;
}

#[async_trait]
pub trait AdvisorBackend: Send + Sync {
    /// Sends a rendered prompt to the generative service and returns the raw
    /// reply text. No retries; any failure surfaces as a single error.
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}
