pub mod client;
pub mod openai_chat;
pub mod openai_responses;
pub mod traits;
pub mod types;

use client::{OpenAIClient, OpenAIConfig};
use openai_chat::OpenAIChatGenerator;
use openai_responses::OpenAIResponsesGenerator;
use std::{fmt, str::FromStr, sync::Arc};
use traits::PoemGenerator;

/// Which OpenAI endpoint shape poems are requested through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoemApi {
    ChatCompletions,
    Responses,
}

impl FromStr for PoemApi {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat" | "chat_completions" => Ok(Self::ChatCompletions),
            "responses" => Ok(Self::Responses),
            other => Err(format!(
                "unknown poem API '{}', expected 'chat_completions' or 'responses'",
                other
            )),
        }
    }
}

impl fmt::Display for PoemApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChatCompletions => f.write_str("chat_completions"),
            Self::Responses => f.write_str("responses"),
        }
    }
}

/// Builds the generator adapter for `api`.
pub fn build_poem_generator(
    api: PoemApi,
    config: OpenAIConfig,
) -> anyhow::Result<Arc<dyn PoemGenerator>> {
    tracing::info!(
        api = %api,
        model = %config.model,
        url = %config.base_url,
        "Initializing poem generator"
    );
    let client = OpenAIClient::new(config)?;
    Ok(match api {
        PoemApi::ChatCompletions => Arc::new(OpenAIChatGenerator::new(client)),
        PoemApi::Responses => Arc::new(OpenAIResponsesGenerator::new(client)),
    })
}
