use super::{traits::LlmError, types::OpenAIErrorResponse};
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

/// Connection settings shared by both OpenAI adapters.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_seconds: u64,
}

/// Authenticated JSON-over-HTTP client for an OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIClient {
    pub fn new(config: OpenAIConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// POSTs `body` to `endpoint` and decodes a 2xx JSON answer.
    pub async fn post_json<Req, Resp>(&self, endpoint: &str, body: &Req) -> Result<Resp, LlmError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        debug!(%url, model = %self.config.model, "Calling language model");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAIErrorResponse>(&text)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| {
                    if text.is_empty() {
                        status.canonical_reason().unwrap_or("Unknown error").to_string()
                    } else {
                        text
                    }
                });
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<Resp>().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(self.config.timeout_seconds)
            } else {
                LlmError::Decode(e.to_string())
            }
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(self.config.timeout_seconds)
        } else {
            LlmError::Transport(err.to_string())
        }
    }
}
