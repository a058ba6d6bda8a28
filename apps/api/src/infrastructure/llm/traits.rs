use async_trait::async_trait;
use thiserror::Error;

/// What a poem is asked for: an instruction, optionally about an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemPrompt {
    pub instruction: String,
    pub image_url: Option<String>,
    pub max_tokens: u32,
}

/// Failures talking to a language-model API.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("OpenAI returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Decode(String),
}

impl LlmError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Produces poem text for a prompt. Returns whatever text the model gave back,
/// possibly empty; callers decide what an empty answer means.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PoemGenerator: Send + Sync {
    async fn generate(&self, prompt: &PoemPrompt) -> Result<String, LlmError>;
}
