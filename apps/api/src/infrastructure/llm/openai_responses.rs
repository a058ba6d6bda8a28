use super::{
    client::OpenAIClient,
    traits::{LlmError, PoemGenerator, PoemPrompt},
    types::{
        ResponsesContentPart, ResponsesInput, ResponsesMessage, ResponsesRequest,
        ResponsesResponse,
    },
};
use async_trait::async_trait;
use tracing::debug;

/// Poem generator backed by `POST /responses`.
///
/// Without an image the instruction is sent as a bare text input.
pub struct OpenAIResponsesGenerator {
    client: OpenAIClient,
}

impl OpenAIResponsesGenerator {
    pub fn new(client: OpenAIClient) -> Self {
        Self { client }
    }

    fn build_request(&self, prompt: &PoemPrompt) -> ResponsesRequest {
        let input = match &prompt.image_url {
            None => ResponsesInput::Text(prompt.instruction.clone()),
            Some(url) => ResponsesInput::Messages(vec![ResponsesMessage {
                role: "user".to_string(),
                content: vec![
                    ResponsesContentPart::InputText {
                        text: prompt.instruction.clone(),
                    },
                    ResponsesContentPart::InputImage {
                        image_url: url.clone(),
                    },
                ],
            }]),
        };

        ResponsesRequest {
            model: self.client.model().to_string(),
            input,
            max_output_tokens: Some(prompt.max_tokens),
        }
    }
}

#[async_trait]
impl PoemGenerator for OpenAIResponsesGenerator {
    async fn generate(&self, prompt: &PoemPrompt) -> Result<String, LlmError> {
        let request = self.build_request(prompt);
        let response: ResponsesResponse = self.client.post_json("/responses", &request).await?;

        let text = response.text();
        debug!("Responses API returned {} chars", text.len());
        Ok(text)
    }
}
