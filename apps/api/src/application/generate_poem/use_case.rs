use crate::{
    domain::poem::{
        entity::{GeneratedPoem, UploadedImage},
        value_objects::{POEM_INSTRUCTION, StorageKey},
    },
    infrastructure::{
        ids::monotonic::MonotonicIdGenerator,
        llm::traits::{LlmError, PoemGenerator, PoemPrompt},
        storage::traits::StorageService,
    },
};
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, error, info, instrument};

/// Tunables for one poem request.
#[derive(Debug, Clone, Copy)]
pub struct PoemSettings {
    pub max_tokens: u32,
    pub storage_timeout: Duration,
    pub generation_timeout: Duration,
}

impl Default for PoemSettings {
    fn default() -> Self {
        Self {
            max_tokens: 300,
            storage_timeout: Duration::from_secs(30),
            generation_timeout: Duration::from_secs(60),
        }
    }
}

/// Why a validated upload still did not yield a poem.
///
/// The payloads are the detail strings reported back to the client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratePoemError {
    #[error("image upload failed: {0}")]
    Upload(String),

    #[error("poem generation failed: {0}")]
    Generation(String),

    #[error("No content returned from OpenAI")]
    EmptyPoem,
}

/// Stores an uploaded image and asks the language model for a poem about it.
///
/// Steps run strictly in order (key, upload, public URL, generation) and the
/// first failure ends the request; nothing is retried.
pub struct GeneratePoemUseCase {
    storage: Arc<dyn StorageService>,
    generator: Arc<dyn PoemGenerator>,
    ids: Arc<MonotonicIdGenerator>,
    settings: PoemSettings,
}

impl GeneratePoemUseCase {
    pub fn new(
        storage: Arc<dyn StorageService>,
        generator: Arc<dyn PoemGenerator>,
        ids: Arc<MonotonicIdGenerator>,
        settings: PoemSettings,
    ) -> Self {
        Self {
            storage,
            generator,
            ids,
            settings,
        }
    }

    #[instrument(skip(self, image), fields(
        file_name = %image.file_name,
        media_type = %image.media_type,
        image_size = image.size()
    ))]
    pub async fn execute(&self, image: UploadedImage) -> Result<GeneratedPoem, GeneratePoemError> {
        let key = StorageKey::new(&self.ids.next_id(), &image.file_name);
        debug!(%key, "Uploading image");

        let upload = self
            .storage
            .put(key.as_str(), image.data, image.media_type.as_str());
        match timeout(self.settings.storage_timeout, upload).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let details = format!("{:#}", e);
                error!(%key, error = %details, "Image upload failed");
                return Err(GeneratePoemError::Upload(non_empty_or(
                    details,
                    "Unknown error",
                )));
            }
            Err(_) => {
                let millis = self.settings.storage_timeout.as_millis();
                error!(%key, timeout_ms = %millis, "Image upload timed out");
                return Err(GeneratePoemError::Upload(format!(
                    "upload timed out after {}ms",
                    millis
                )));
            }
        }

        let image_url = self.storage.public_url(key.as_str());
        let prompt = PoemPrompt {
            instruction: POEM_INSTRUCTION.to_string(),
            image_url: Some(image_url.clone()),
            max_tokens: self.settings.max_tokens,
        };

        let poem = match timeout(self.settings.generation_timeout, self.generator.generate(&prompt))
            .await
        {
            Ok(Ok(poem)) => poem,
            Ok(Err(e)) => {
                error!(%image_url, error = %e, "Poem generation failed");
                return Err(GeneratePoemError::Generation(non_empty_or(
                    e.to_string(),
                    "OpenAI API error",
                )));
            }
            Err(_) => {
                let e = LlmError::Timeout(self.settings.generation_timeout.as_secs());
                error!(%image_url, error = %e, "Poem generation timed out");
                return Err(GeneratePoemError::Generation(e.to_string()));
            }
        };

        if poem.trim().is_empty() {
            error!(%image_url, "Language model returned no content");
            return Err(GeneratePoemError::EmptyPoem);
        }

        info!(%key, poem_len = poem.len(), "Poem generated");
        Ok(GeneratedPoem { poem, image_url })
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
