//! Unit tests for the session token extractor

use axum::extract::FromRequestParts;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use founder_advisor_api::api::{Claims, ExtractUser, create_session_token, session_secret};
use founder_advisor_api::infrastructure::entities::User;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

fn test_user() -> User {
    User {
        id: Uuid::new_v4(),
        username: "founder".to_string(),
        password: "argon2-hash".to_string(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_extract_user_valid_token() {
    let user = test_user();
    let token = create_session_token(&user).unwrap();

    let req = Request::builder()
        .header("Authorization", format!("Bearer {token}"))
        .body(())
        .unwrap();

    let (mut parts, _) = req.into_parts();
    let result = ExtractUser::from_request_parts(&mut parts, &()).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().0, user.id);
}

#[tokio::test]
async fn test_extract_user_missing_header() {
    let req = Request::builder().body(()).unwrap();

    let (mut parts, _) = req.into_parts();
    let result = ExtractUser::from_request_parts(&mut parts, &()).await;

    assert!(result.is_err());
    let (status, message) = result.unwrap_err();
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(message.contains("missing"));
}

#[tokio::test]
async fn test_extract_user_not_a_bearer_token() {
    let req = Request::builder()
        .header("Authorization", "Token abc123")
        .body(())
        .unwrap();

    let (mut parts, _) = req.into_parts();
    let result = ExtractUser::from_request_parts(&mut parts, &()).await;

    assert!(result.is_err());
    let (status, message) = result.unwrap_err();
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(message.contains("bearer"));
}

#[tokio::test]
async fn test_extract_user_garbage_token() {
    let req = Request::builder()
        .header("Authorization", "Bearer not-a-jwt")
        .body(())
        .unwrap();

    let (mut parts, _) = req.into_parts();
    let result = ExtractUser::from_request_parts(&mut parts, &()).await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().0, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_extract_user_expired_token() {
    let claims = Claims {
        sub: Uuid::new_v4(),
        username: "founder".to_string(),
        exp: (Utc::now() - chrono::Duration::days(2)).timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(session_secret().as_bytes()),
    )
    .unwrap();

    let req = Request::builder()
        .header("Authorization", format!("Bearer {token}"))
        .body(())
        .unwrap();

    let (mut parts, _) = req.into_parts();
    let result = ExtractUser::from_request_parts(&mut parts, &()).await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().0, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_extract_user_invalid_utf8_header() {
    use axum::http::HeaderValue;

    let mut req = Request::builder().body(()).unwrap();
    req.headers_mut().insert(
        "Authorization",
        HeaderValue::from_bytes(&[0xFF, 0xFE]).unwrap(),
    );

    let (mut parts, _) = req.into_parts();
    let result = ExtractUser::from_request_parts(&mut parts, &()).await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().0, StatusCode::UNAUTHORIZED);
}
