//! Language model HTTP client.
//!
//! Calls the Generative Language `generateContent` endpoint with one fresh
//! single-turn conversation per message, so earlier questions never leak
//! into later answers.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::domain::Intent;

use super::error::ResolverError;
use super::extract::parse_intent;
use super::prompt::build_prompt;
use super::types::{GenerateContentRequest, GenerateContentResponse};
use super::{IntentResolver, ResolveError, ScheduleHints};

/// Default base URL for the Generative Language API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model.
const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Configuration for the resolver client.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// API key for authentication
    pub api_key: String,
    /// Model name, e.g. "gemini-2.0-flash-lite"
    pub model: String,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ResolverConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Full URL of the `generateContent` endpoint.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Language model client that resolves messages into intents.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    semaphore: Arc<Semaphore>,
}

impl GeminiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ResolverConfig) -> Result<Self, ResolverError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| ResolverError::NotConfigured("invalid API key format".to_string()))?;
        headers.insert(HeaderName::from_static("x-goog-api-key"), api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Send one prompt and return the model's raw text reply.
    pub async fn generate(&self, prompt: &str) -> Result<String, ResolverError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ResolverError::NotConfigured("semaphore closed".to_string()))?;

        let response = self
            .http
            .post(&self.endpoint)
            .json(&GenerateContentRequest::single_turn(prompt))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ResolverError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ResolverError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResolverError::Api {
                status: status.as_u16(),
                message: truncate(&body),
            });
        }

        let body = response.text().await?;
        reply_text(&body)
    }
}

/// Longest response body kept in error messages, in characters.
const MAX_ERROR_BODY_CHARS: usize = 500;

fn truncate(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

/// Decode a successful `generateContent` body into the model's text.
fn reply_text(body: &str) -> Result<String, ResolverError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| ResolverError::Json {
            message: e.to_string(),
            body: Some(truncate(body)),
        })?;

    match parsed.text() {
        Some(text) => {
            debug!(reply = %text, "model reply");
            Ok(text)
        }
        None => {
            let reason = parsed.empty_reason();
            warn!(reason = reason.as_deref().unwrap_or("unknown"), "model returned no text");
            Err(ResolverError::EmptyResponse { reason })
        }
    }
}

impl IntentResolver for GeminiClient {
    async fn resolve(&self, message: &str, hints: &ScheduleHints) -> Result<Intent, ResolveError> {
        let prompt = build_prompt(message, hints);
        let reply = self.generate(&prompt).await?;
        Ok(parse_intent(&reply)?)
    }
}
