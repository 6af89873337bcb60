//! Chat endpoints

use crate::api::{ErrorBody, ExtractUser};
use crate::core::traits::ChatService;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use di_axum::Inject;
use log::error;

pub fn router() -> Router {
    Router::new()
        .route("/chat-history", get(chat_history))
        .route("/chat", post(post_chat))
}

async fn chat_history(
    Inject(chat_service): Inject<dyn ChatService>,
    ExtractUser(current_user): ExtractUser,
) -> Json<Vec<schemas::ChatRecord>> {
    let records = chat_service.chat_history(current_user).await;

    Json(
        records
            .into_iter()
            .map(schemas::ChatRecord::from)
            .collect(),
    )
}

async fn post_chat(
    Inject(chat_service): Inject<dyn ChatService>,
    ExtractUser(current_user): ExtractUser,
    body: Result<Json<schemas::CreateChat>, JsonRejection>,
) -> Result<Json<schemas::ChatRecord>, (StatusCode, Json<ErrorBody>)> {
    let Json(create_chat) = body.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::with_detail(
                "Invalid request body",
                rejection.body_text(),
            )),
        )
    })?;

    if create_chat.message.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::with_detail(
                "Invalid request body",
                "message must not be empty",
            )),
        ));
    }

    match chat_service
        .submit_message(current_user, create_chat.message)
        .await
    {
        Ok(record) => Ok(Json(record.into())),
        Err(e) => {
            error!("chat request failed: {e:#}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::with_detail(
                    "Failed to generate response",
                    format!("{e:#}"),
                )),
            ))
        }
    }
}

pub mod schemas {
    use crate::infrastructure::entities;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Deserialize, Debug)]
    pub struct CreateChat {
        pub message: String,
    }

    #[derive(Serialize, Debug)]
    pub struct ChatRecord {
        pub id: Uuid,
        pub user_id: Uuid,
        pub message: String,
        pub response: String,
        pub created_at: DateTime<Utc>,
    }

    impl From<entities::ChatRecord> for ChatRecord {
        fn from(record: entities::ChatRecord) -> Self {
            ChatRecord {
                id: record.id,
                user_id: record.user_id,
                message: record.message,
                response: record.response,
                created_at: record.created_at,
            }
        }
    }
}
