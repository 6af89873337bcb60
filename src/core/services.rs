//! Implementations for the services the app needs.
//!

use crate::core::advisor::{PromptLibrary, classify_message, format_response};
use crate::core::traits::{AccountError, AccountService, ChatService};
use crate::infrastructure::entities::{ChatRecord, User};
use crate::infrastructure::traits::{AdvisorBackend, ChatRepository, UserRepository};
use anyhow::Context;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use chrono::Utc;
use di::{Ref, inject, injectable};
use log::debug;
use uuid::Uuid;

pub struct MyChatService {
    repo: Ref<dyn ChatRepository>,
    backend: Ref<dyn AdvisorBackend>,
    prompts: PromptLibrary,
}

#[injectable(ChatService)]
impl MyChatService {
    #[inject]
    pub fn create(repo: Ref<dyn ChatRepository>, backend: Ref<dyn AdvisorBackend>) -> Self {
        MyChatService {
            repo,
            backend,
            prompts: PromptLibrary::new(),
        }
    }
}

#[async_trait]
impl ChatService for MyChatService {
    async fn chat_history(&self, user_id: Uuid) -> Vec<ChatRecord> {
        self.repo
            .list_for_user(user_id)
            .await
            .unwrap_or(Vec::new())
    }

    async fn submit_message(&self, user_id: Uuid, message: String) -> anyhow::Result<ChatRecord> {
        let kind = classify_message(&message);
        debug!("selected {kind:?} prompt for user {user_id}");

        let prompt = self
            .prompts
            .render(kind, &message)
            .context("failed to render prompt template")?;

        let raw = self.backend.generate(&prompt).await?;
        let response = format_response(&raw);

        let record = self
            .repo
            .append(ChatRecord {
                id: Uuid::new_v4(),
                user_id,
                message,
                response,
                created_at: Utc::now(),
            })
            .await
            .context("failed to store chat record")?;

        Ok(record)
    }
}

#[injectable(AccountService)]
pub struct MyAccountService {
    users: Ref<dyn UserRepository>,
}

#[async_trait]
impl AccountService for MyAccountService {
    async fn register(&self, username: &str, password: &str) -> Result<User, AccountError> {
        if self.users.get_by_username(username).await?.is_some() {
            return Err(AccountError::UsernameTaken);
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| AccountError::Hash)?
            .to_string();

        let user = self
            .users
            .create(User {
                id: Uuid::new_v4(),
                username: username.to_owned(),
                password: password_hash,
                created_at: Utc::now(),
            })
            .await?;

        Ok(user)
    }

    async fn login(&self, username: &str, password: &str) -> Result<User, AccountError> {
        let user = self
            .users
            .get_by_username(username)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let parsed_hash = PasswordHash::new(&user.password).map_err(|_| AccountError::Hash)?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AccountError::InvalidCredentials)?;

        Ok(user)
    }

    async fn get_user(&self, user_id: Uuid) -> Option<User> {
        self.users.get(user_id).await.ok().flatten()
    }
}
