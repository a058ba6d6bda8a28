use super::{
    client::OpenAIClient,
    traits::{LlmError, PoemGenerator, PoemPrompt},
    types::{
        ChatCompletionRequest, ChatCompletionResponse, ChatContentPart, ChatMessage, ImageUrl,
    },
};
use async_trait::async_trait;
use tracing::debug;

/// Poem generator backed by `POST /chat/completions` with a multimodal user
/// message.
pub struct OpenAIChatGenerator {
    client: OpenAIClient,
}

impl OpenAIChatGenerator {
    pub fn new(client: OpenAIClient) -> Self {
        Self { client }
    }

    fn build_request(&self, prompt: &PoemPrompt) -> ChatCompletionRequest {
        let mut content = vec![ChatContentPart::Text {
            text: prompt.instruction.clone(),
        }];
        if let Some(url) = &prompt.image_url {
            content.push(ChatContentPart::ImageUrl {
                image_url: ImageUrl { url: url.clone() },
            });
        }

        ChatCompletionRequest {
            model: self.client.model().to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content,
            }],
            max_tokens: Some(prompt.max_tokens),
        }
    }
}

#[async_trait]
impl PoemGenerator for OpenAIChatGenerator {
    async fn generate(&self, prompt: &PoemPrompt) -> Result<String, LlmError> {
        let request = self.build_request(prompt);
        let response: ChatCompletionResponse =
            self.client.post_json("/chat/completions", &request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        debug!("Chat completion returned {} chars", content.len());
        Ok(content)
    }
}
