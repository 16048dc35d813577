//! Client for an OpenAI-compatible chat completions API backing
//! `GET /api/v1/ask-agent`.
//!
//! The assistant is optional: [`AssistantConfig::from_env`] returns `None`
//! when `OPENAI_API_KEY` is unset and the endpoint then answers 503.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const SYSTEM_PROMPT: &str = "You are an assistant that helps with aircraft fuel optimization.";
const MAX_TOKENS: u32 = 200;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("assistant request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("assistant returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("assistant returned no answer")]
    EmptyAnswer,
}

impl AssistantError {
    /// Client-facing description. Upstream response bodies stay in the logs.
    pub fn public_detail(&self) -> String {
        match self {
            AssistantError::Request(_) => "The assistant could not be reached".to_string(),
            AssistantError::Status { status, .. } => {
                format!("The assistant returned HTTP {}", status)
            }
            AssistantError::EmptyAnswer => "The assistant returned no answer".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AssistantConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl AssistantConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Reads `OPENAI_API_KEY`, `OPENAI_BASE_URL` and `OPENAI_MODEL`.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let api_key = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty())?;
        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup("OPENAI_BASE_URL").filter(|v| !v.is_empty()) {
            config.base_url = base_url;
        }
        if let Some(model) = lookup("OPENAI_MODEL").filter(|v| !v.is_empty()) {
            config.model = model;
        }
        Some(config)
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_answer(self) -> Result<String, AssistantError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(AssistantError::EmptyAnswer)
    }
}

#[derive(Debug, Clone)]
pub struct AssistantClient {
    client: Client,
    config: AssistantConfig,
}

impl AssistantClient {
    pub fn new(config: AssistantConfig) -> Result<Self, AssistantError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send one question and return the first answer.
    pub async fn ask(&self, question: &str) -> Result<String, AssistantError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: question,
                },
            ],
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!(model = %self.config.model, "forwarding question to assistant");
        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "assistant upstream rejected request");
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<ChatResponse>().await?.into_answer()
    }
}
