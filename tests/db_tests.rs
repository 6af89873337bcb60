//! Database and schema tests
//!
//! Tests SQLite migrations, entity storage, and schema constraints

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Setup test database with migrations
async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePool::connect(":memory:").await.unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    pool
}

async fn insert_user(pool: &SqlitePool, user_id: Uuid) {
    sqlx::query("INSERT INTO users (id, username, password, created_at) VALUES (?, ?, ?, ?)")
        .bind(user_id)
        .bind(format!("user-{user_id}"))
        .bind("argon2-hash")
        .bind(Utc::now())
        .execute(pool)
        .await
        .unwrap();
}

async fn insert_chat(pool: &SqlitePool, user_id: Uuid, message: &str, created_at: DateTime<Utc>) {
    sqlx::query(
        "INSERT INTO chat_history (id, user_id, message, response, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(message)
    .bind("a response")
    .bind(created_at)
    .execute(pool)
    .await
    .unwrap();
}

#[tokio::test]
async fn test_database_migrations_work() {
    let pool = setup_test_db().await;

    let result = sqlx::query("SELECT name FROM sqlite_master WHERE type='table'")
        .fetch_all(&pool)
        .await
        .unwrap();

    assert!(result.len() >= 2); // Should have users and chat_history tables
}

#[tokio::test]
async fn test_uuid_storage_roundtrip() {
    let pool = setup_test_db().await;

    let user_id = Uuid::new_v4();
    insert_user(&pool, user_id).await;

    // Bind Uuid directly, same as production code
    let row: (Uuid, String) = sqlx::query_as("SELECT id, username FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(row.0, user_id);
    assert_eq!(row.1, format!("user-{user_id}"));
}

#[tokio::test]
async fn test_username_must_be_unique() {
    let pool = setup_test_db().await;

    let insert = || {
        sqlx::query("INSERT INTO users (id, username, password, created_at) VALUES (?, ?, ?, ?)")
            .bind(Uuid::new_v4())
            .bind("taken")
            .bind("argon2-hash")
            .bind(Utc::now())
            .execute(&pool)
    };

    assert!(insert().await.is_ok());
    assert!(insert().await.is_err());
}

#[tokio::test]
async fn test_chat_record_requires_existing_user() {
    let pool = setup_test_db().await;

    let result = sqlx::query(
        "INSERT INTO chat_history (id, user_id, message, response, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4())
    .bind(Uuid::new_v4()) // no such user
    .bind("hello")
    .bind("world")
    .bind(Utc::now())
    .execute(&pool)
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_user_delete_cascades_to_chat_history() {
    let pool = setup_test_db().await;

    let user_id = Uuid::new_v4();
    insert_user(&pool, user_id).await;
    insert_chat(&pool, user_id, "hello", Utc::now()).await;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chat_history WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(count.0, 0);
}

#[tokio::test]
async fn test_history_query_orders_by_creation_time() {
    let pool = setup_test_db().await;

    let user_id = Uuid::new_v4();
    insert_user(&pool, user_id).await;

    // Insert newest first to make sure ordering comes from the query
    let base = Utc::now();
    insert_chat(&pool, user_id, "third", base + Duration::seconds(2)).await;
    insert_chat(&pool, user_id, "first", base).await;
    insert_chat(&pool, user_id, "second", base + Duration::seconds(1)).await;

    let rows: Vec<(String, DateTime<Utc>)> = sqlx::query_as(
        "SELECT message, created_at FROM chat_history WHERE user_id = ? ORDER BY datetime(created_at) ASC",
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await
    .unwrap();

    let messages: Vec<&str> = rows.iter().map(|(m, _)| m.as_str()).collect();
    assert_eq!(messages, vec!["first", "second", "third"]);
    assert!(rows.windows(2).all(|w| w[0].1 <= w[1].1));
}
