//! Gemini generative-language backend.
//!
//! Talks to the hosted `generateContent` REST endpoint. The API key goes in
//! the `x-goog-api-key` header so it never shows up in request URLs or logs.

use crate::infrastructure::traits::AdvisorBackend;
use anyhow::{anyhow, bail};
use async_trait::async_trait;
use di::{inject, injectable};
use log::debug;
use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-pro";

pub struct GeminiBackend {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[injectable(AdvisorBackend)]
impl GeminiBackend {
    #[inject]
    pub fn create() -> GeminiBackend {
        dotenvy::dotenv().ok();
        let api_key = env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set");
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_owned());
        let mut backend = GeminiBackend::new(api_key, model);
        if let Ok(base_url) = env::var("GEMINI_BASE_URL") {
            backend = backend.with_base_url(base_url);
        }
        backend
    }

    pub fn new(api_key: String, model: String) -> GeminiBackend {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create http client");

        GeminiBackend {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            model,
        }
    }

    /// Overrides the API base URL, for tests and proxies.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl AdvisorBackend for GeminiBackend {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        debug!("requesting completion from {}", self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&wire::GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("generative api returned {status}: {body}");
        }

        let body: wire::GenerateContentResponse = response.json().await?;
        body.first_text()
            .ok_or_else(|| anyhow!("generative api returned no candidates"))
    }
}

pub mod wire {
    //! Request and response bodies for the `generateContent` REST call.

    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub struct GenerateContentRequest {
        pub contents: Vec<Content>,
    }

    impl GenerateContentRequest {
        pub fn from_prompt(prompt: &str) -> GenerateContentRequest {
            GenerateContentRequest {
                contents: vec![Content {
                    parts: vec![Part {
                        text: prompt.to_owned(),
                    }],
                }],
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Content {
        pub parts: Vec<Part>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Part {
        pub text: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct GenerateContentResponse {
        #[serde(default)]
        pub candidates: Vec<Candidate>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Candidate {
        pub content: Content,
    }

    impl GenerateContentResponse {
        /// Text of the first part of the first candidate, if any.
        pub fn first_text(self) -> Option<String> {
            self.candidates
                .into_iter()
                .next()?
                .content
                .parts
                .into_iter()
                .next()
                .map(|part| part.text)
        }
    }
}
