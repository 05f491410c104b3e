//! OpenAI-backed content provider.
//!
//! Calls the Chat Completions API directly over HTTP. Configuration comes
//! from environment variables; the model defaults to `gpt-4o`.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use whodunit_content::prompt::{GenerationPrompt, RevisionPrompt};
use whodunit_content::provider::{MysteryProvider, ProviderError};
use whodunit_content::schema::MysteryPackage;

const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Provider implementation that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    /// Creates a provider with the given API key and model.
    #[must_use]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    /// Loads configuration from environment variables: `OPENAI_API_KEY`
    /// (required), `OPENAI_MODEL_NAME` and `OPENAI_BASE_URL` (optional).
    pub fn try_from_env() -> Result<Self, ProviderError> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            ProviderError::Request("OPENAI_API_KEY not set in the environment".into())
        })?;
        let model = env::var("OPENAI_MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let mut provider = Self::new(api_key, model);
        if let Ok(base_url) = env::var("OPENAI_BASE_URL") {
            provider.base_url = base_url;
        }
        Ok(provider)
    }

    /// Overrides the endpoint, for proxies and compatible servers.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn complete(&self, system: &str, user: &str) -> Result<MysteryPackage, ProviderError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| ProviderError::Request(format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable error body".to_owned());
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|wrapper| wrapper.error.message)
                .unwrap_or(body);
            return Err(ProviderError::Request(format!("{status}: {message}")));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Schema(format!("malformed response envelope: {err}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Schema("response carried no content".into()))?;

        debug!(bytes = content.len(), "content received");
        parse_package(&content)
    }
}

#[async_trait]
impl MysteryProvider for OpenAiProvider {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn generate(&self, prompt: GenerationPrompt) -> Result<MysteryPackage, ProviderError> {
        self.complete(&prompt.system, &prompt.user).await
    }

    #[instrument(skip_all, fields(model = %self.model))]
    async fn revise(&self, prompt: RevisionPrompt) -> Result<MysteryPackage, ProviderError> {
        self.complete(&prompt.system, &prompt.user).await
    }
}

/// Parses the model's text into a package, tolerating a Markdown code fence
/// around the JSON. Models wrap output in ```json fences often enough that
/// rejecting them would fail otherwise-valid generations.
fn parse_package(content: &str) -> Result<MysteryPackage, ProviderError> {
    let json = strip_code_fence(content);
    serde_json::from_str(json).map_err(|err| ProviderError::Schema(err.to_string()))
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    inner.trim()
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}
