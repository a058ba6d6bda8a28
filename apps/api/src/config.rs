//! Application configuration loaded from environment variables.
//!
//! Values are read once at startup (after `.env` is loaded by `dotenvy`) and the
//! resulting [`Config`] is passed explicitly to everything that needs it.
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `OPENAI_API_KEY`: Credential for the language-model API
//! - `R2_ACCESS_KEY_ID`: Cloudflare R2 access key
//! - `R2_SECRET_ACCESS_KEY`: Cloudflare R2 secret key
//! - `R2_ENDPOINT`: Cloudflare R2 API endpoint
//! - `R2_BUCKET_NAME`: Bucket uploaded images are written to
//! - `R2_PUBLIC_URL`: Public base URL the bucket is served from
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,poesy_api=debug,tower_http=debug")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 3000)
//! - `OPENAI_BASE_URL`: API base URL (default: "https://api.openai.com/v1")
//! - `OPENAI_MODEL`: Model asked for poems (default: "gpt-4o-mini")
//! - `OPENAI_TIMEOUT_SECONDS`: Bound on one model call (default: 60)
//! - `POEM_API`: `chat_completions` or `responses` (default: "chat_completions")
//! - `POEM_MAX_TOKENS`: Output token cap for a poem (default: 300)
//! - `STORAGE_TIMEOUT_SECONDS`: Bound on one blob upload (default: 30)
//! - `R2_REGION`: Region (default: "auto")
//! - `R2_FORCE_PATH_STYLE`: Use path-style URLs (default: false)

use crate::infrastructure::llm::{
    PoemApi,
    client::{DEFAULT_OPENAI_URL, OpenAIConfig},
};

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Bearer credential for the language-model API
    pub openai_api_key: String,

    /// Base URL of the OpenAI-compatible API, without trailing endpoint
    pub openai_base_url: String,

    /// Model used for poem generation
    pub openai_model: String,

    /// Seconds before a model call is abandoned
    pub openai_timeout_seconds: u64,

    /// Endpoint shape poems are requested through
    pub poem_api: PoemApi,

    /// Maximum output tokens for one poem
    pub poem_max_tokens: u32,

    /// Seconds before a blob upload is abandoned
    pub storage_timeout_seconds: u64,

    pub r2_access_key_id: String,

    pub r2_secret_access_key: String,

    /// Cloudflare R2 API endpoint (e.g., `https://xxx.r2.cloudflarestorage.com`)
    pub r2_endpoint: String,

    pub r2_region: String,

    pub r2_force_path_style: bool,

    pub r2_bucket_name: String,

    /// Public URL for R2 objects (e.g., `https://images.example.com`); the
    /// model fetches uploads from here, so objects must be world-readable.
    pub r2_public_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a set variable
    /// cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 3000)?,
            openai_api_key: env_required("OPENAI_API_KEY")?,
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_URL.to_string())?,
            openai_model: env_or("OPENAI_MODEL", "gpt-4o-mini".to_string())?,
            openai_timeout_seconds: env_or("OPENAI_TIMEOUT_SECONDS", 60)?,
            poem_api: env_or("POEM_API", PoemApi::ChatCompletions)?,
            poem_max_tokens: env_or("POEM_MAX_TOKENS", 300)?,
            storage_timeout_seconds: env_or("STORAGE_TIMEOUT_SECONDS", 30)?,
            r2_access_key_id: env_required("R2_ACCESS_KEY_ID")?,
            r2_secret_access_key: env_required("R2_SECRET_ACCESS_KEY")?,
            r2_endpoint: env_required("R2_ENDPOINT")?,
            r2_region: env_or("R2_REGION", "auto".to_string())?,
            r2_force_path_style: env_or("R2_FORCE_PATH_STYLE", false)?,
            r2_bucket_name: env_required("R2_BUCKET_NAME")?,
            r2_public_url: env_required("R2_PUBLIC_URL")?,
        })
    }

    /// Connection settings for the poem generator.
    pub fn openai(&self) -> OpenAIConfig {
        OpenAIConfig {
            base_url: self.openai_base_url.clone(),
            api_key: self.openai_api_key.clone(),
            model: self.openai_model.clone(),
            timeout_seconds: self.openai_timeout_seconds,
        }
    }
}

/// Load a required environment variable.
fn env_required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("Missing required environment variable: {}", key))
}

/// Load an environment variable, falling back to `default` when unset.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
