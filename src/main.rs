//! Founder advisor web API
//!
//! Routes an authenticated user's question through keyword-based prompt
//! selection to a hosted generative-language API and stores the exchange.

use founder_advisor_api::api;
use founder_advisor_api::core::services::{MyAccountService, MyChatService};
use founder_advisor_api::infrastructure::database::DatabaseConnection;
use founder_advisor_api::infrastructure::gemini::GeminiBackend;
use founder_advisor_api::infrastructure::repositories::{DbChatRepository, DbUserRepository};

use anyhow::anyhow;
use axum::Router;
use axum::http::{HeaderValue, Method};
use di::{Injectable, ServiceCollection};
use di_axum::RouterServiceProviderExtensions;
use log::info;
use tokio::runtime::{Builder, Runtime};
use tower_http::cors::{Any, CorsLayer};

fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    if std::env::var("GEMINI_API_KEY").is_err() {
        return Err(anyhow!("GEMINI_API_KEY environment variable is required"));
    }

    let runtime: Runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(web_server_task());

    Ok(())
}

async fn web_server_task() {
    let provider = ServiceCollection::new()
        .add(DatabaseConnection::singleton())
        .add(GeminiBackend::singleton())
        .add(DbChatRepository::scoped())
        .add(DbUserRepository::scoped())
        .add(MyChatService::scoped())
        .add(MyAccountService::scoped())
        .build_provider()
        .unwrap();

    // apply pending migrations before accepting requests
    let database = provider.get_required::<DatabaseConnection>();
    sqlx::migrate!()
        .run(&**database)
        .await
        .expect("failed to run database migrations");

    let app = Router::new()
        .nest("/api", api::router())
        .layer(
            CorsLayer::new()
                .allow_headers(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_origin([
                    "http://localhost:3000".parse::<HeaderValue>().unwrap(),
                    "http://localhost:5173".parse::<HeaderValue>().unwrap(),
                ]),
        )
        .with_provider(provider);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
    info!("Shutting down...");
}
