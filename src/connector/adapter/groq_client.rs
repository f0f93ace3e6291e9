use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::CompletionClient;
use crate::domain::DomainError;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b";
const COMPLETIONS_PATH: &str = "/chat/completions";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal subset of the OpenAI-compatible chat completion response we care
/// about. Providers add many more fields; serde ignores them.
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
}

#[derive(Deserialize)]
struct ApiResponseMessage {
    content: Option<String>,
}

/// HTTP client for Groq's OpenAI-compatible chat completions endpoint.
///
/// Implements [`CompletionClient`] so the generate-recipe use case stays
/// decoupled from transport and serialization details and can be exercised
/// against a fake in tests.
///
/// Configuration comes from the environment:
///
/// ```text
/// GROQ_API_KEY=gsk_...                          (required for real calls)
/// GROQ_BASE_URL=https://api.groq.com/openai/v1  (any OpenAI-compatible server)
/// GROQ_MODEL=openai/gpt-oss-20b
/// ```
///
/// An absent API key is sent through as an empty bearer token; the remote
/// rejects it with an authentication error, which surfaces as a
/// [`DomainError::CompletionError`].
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl GroqClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{COMPLETIONS_PATH}", base.trim_end_matches('/'));
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }

    /// Construct from environment variables:
    ///
    /// | Variable        | Default                            |
    /// |-----------------|------------------------------------|
    /// | `GROQ_API_KEY`  | `""` (empty; remote rejects calls) |
    /// | `GROQ_BASE_URL` | `https://api.groq.com/openai/v1`   |
    /// | `GROQ_MODEL`    | `openai/gpt-oss-20b`               |
    pub fn from_env() -> Self {
        let key = std::env::var("GROQ_API_KEY").unwrap_or_default();
        let base =
            std::env::var("GROQ_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(key, model, base)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Pull the assistant text out of a completion response.
    ///
    /// Zero choices or a choice without content yields the empty string.
    /// That is a graceful-degradation policy rather than an error: the
    /// caller cannot distinguish "model returned nothing" from "model
    /// returned an empty string", and neither aborts the flow.
    fn extract_text(response: ApiResponse) -> String {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        let request = ApiRequest {
            model: &self.model,
            messages: vec![ApiMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!("GroqClient: POST {} (model: {})", self.url, self.model);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::completion(format!("GroqClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GroqClient: API returned {status}: {body}");
            return Err(DomainError::completion(format!(
                "GroqClient: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::completion(format!("GroqClient: failed to parse response: {e}"))
        })?;

        Ok(Self::extract_text(api_response))
    }
}
