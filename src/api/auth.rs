//! Account endpoints

use crate::api::{ErrorBody, ExtractUser, create_session_token};
use crate::core::traits::{AccountError, AccountService};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use di_axum::Inject;
use log::error;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/user", get(current_user))
}

fn validate_credentials(credentials: &schemas::Credentials) -> Result<(), &'static str> {
    if credentials.username.len() < 3 || credentials.username.len() > 32 {
        return Err("username must be between 3 and 32 characters");
    }
    if credentials.password.len() < 8 {
        return Err("password must be at least 8 characters");
    }
    Ok(())
}

async fn register(
    Inject(accounts): Inject<dyn AccountService>,
    body: Result<Json<schemas::Credentials>, JsonRejection>,
) -> Result<(StatusCode, Json<schemas::RegisterResponse>), (StatusCode, Json<ErrorBody>)> {
    let Json(credentials) = body.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::with_detail(
                "Invalid request body",
                rejection.body_text(),
            )),
        )
    })?;

    validate_credentials(&credentials).map_err(|detail| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::with_detail("Invalid request body", detail)),
        )
    })?;

    match accounts
        .register(&credentials.username, &credentials.password)
        .await
    {
        Ok(user) => {
            let token = create_session_token(&user).map_err(|e| {
                error!("failed to mint session token: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new("Failed to register")),
                )
            })?;

            Ok((
                StatusCode::CREATED,
                Json(schemas::RegisterResponse {
                    user_id: user.id,
                    token,
                }),
            ))
        }
        Err(AccountError::UsernameTaken) => Err((
            StatusCode::CONFLICT,
            Json(ErrorBody::new("username is already taken")),
        )),
        Err(e) => {
            error!("registration failed: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::with_detail("Failed to register", e)),
            ))
        }
    }
}

async fn login(
    Inject(accounts): Inject<dyn AccountService>,
    body: Result<Json<schemas::Credentials>, JsonRejection>,
) -> Result<Json<schemas::LoginResponse>, (StatusCode, Json<ErrorBody>)> {
    let Json(credentials) = body.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::with_detail(
                "Invalid request body",
                rejection.body_text(),
            )),
        )
    })?;

    match accounts
        .login(&credentials.username, &credentials.password)
        .await
    {
        Ok(user) => {
            let token = create_session_token(&user).map_err(|e| {
                error!("failed to mint session token: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new("Failed to log in")),
                )
            })?;

            Ok(Json(schemas::LoginResponse {
                user_id: user.id,
                username: user.username,
                token,
            }))
        }
        Err(AccountError::InvalidCredentials) => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody::new("invalid username or password")),
        )),
        Err(e) => {
            error!("login failed: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::with_detail("Failed to log in", e)),
            ))
        }
    }
}

/// Returns the caller's profile; 401 when the token's user no longer exists.
async fn current_user(
    Inject(accounts): Inject<dyn AccountService>,
    ExtractUser(current_user): ExtractUser,
) -> Result<Json<schemas::User>, StatusCode> {
    match accounts.get_user(current_user).await {
        Some(user) => Ok(Json(user.into())),
        None => Err(StatusCode::UNAUTHORIZED),
    }
}

pub mod schemas {
    use crate::infrastructure::entities;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Deserialize, Debug)]
    pub struct Credentials {
        pub username: String,
        pub password: String,
    }

    #[derive(Serialize, Debug)]
    pub struct RegisterResponse {
        pub user_id: Uuid,
        pub token: String,
    }

    #[derive(Serialize, Debug)]
    pub struct LoginResponse {
        pub user_id: Uuid,
        pub username: String,
        pub token: String,
    }

    #[derive(Serialize, Debug)]
    pub struct User {
        pub id: Uuid,
        pub username: String,
        pub created_at: DateTime<Utc>,
    }

    impl From<entities::User> for User {
        fn from(user: entities::User) -> Self {
            User {
                id: user.id,
                username: user.username,
                created_at: user.created_at,
            }
        }
    }
}
