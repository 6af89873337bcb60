use crate::infrastructure::entities;
use async_trait::async_trait;
use axum::Router;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::env;
use uuid::Uuid;

pub mod auth;
pub mod chat;

const SESSION_SECRET_VAR: &str = "SESSION_SECRET";
const DEV_SESSION_SECRET: &str = "insecure-dev-session-secret";

pub fn router() -> Router {
    chat::router().merge(auth::router())
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
}

pub fn session_secret() -> String {
    env::var(SESSION_SECRET_VAR).unwrap_or_else(|_| DEV_SESSION_SECRET.to_owned())
}

/// Mints a bearer token for the given user, valid for 30 days.
pub fn create_session_token(user: &entities::User) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        exp: (Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(session_secret().as_bytes()),
    )?;

    Ok(token)
}

/// Resolves the calling user from the `Authorization: Bearer` header.
///
/// Rejects with 401 before the handler runs, so unauthenticated requests
/// never reach storage or the generative backend.
#[derive(Debug)]
pub struct ExtractUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for ExtractUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, (StatusCode, &'static str)> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or((StatusCode::UNAUTHORIZED, "`Authorization` header is missing"))?;

        let auth_header = auth_header
            .to_str()
            .map_err(|_| (StatusCode::UNAUTHORIZED, "invalid authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or((StatusCode::UNAUTHORIZED, "expected a bearer token"))?;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(session_secret().as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| (StatusCode::UNAUTHORIZED, "invalid session token"))?;

        Ok(ExtractUser(token_data.claims.sub))
    }
}

/// JSON payload returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> ErrorBody {
        ErrorBody {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_detail(message: impl Into<String>, detail: impl ToString) -> ErrorBody {
        ErrorBody {
            message: message.into(),
            error: Some(detail.to_string()),
        }
    }
}
