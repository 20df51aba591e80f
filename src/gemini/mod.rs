//! Gemini model client.
//!
//! Three single-shot operations over `generateContent`: plain chat,
//! search-grounded chat and image generation. The API key is resolved
//! every time an operation starts, so a missing key fails the call before
//! any network traffic.

pub mod error;
pub mod wire;

use async_trait::async_trait;

use crate::config::GeminiConfig;
pub use error::StudioError;
use wire::{GenerateRequest, GenerateResponse};

pub const UNTITLED_SOURCE: &str = "Untitled Source";

const SUCCESS_FINISH_REASON: &str = "STOP";

/// A web citation attached to a grounded reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundedReply {
    pub text: String,
    pub sources: Vec<Source>,
}

/// The model operations the views depend on.
#[async_trait]
pub trait StudioBackend: Send + Sync {
    async fn send_chat(&self, message: &str) -> Result<ChatReply, StudioError>;

    async fn send_grounded_query(&self, query: &str) -> Result<GroundedReply, StudioError>;

    /// Returns a `data:image/png;base64,...` URI.
    async fn generate_image(&self, prompt: &str) -> Result<String, StudioError>;
}

/// Where the API key comes from.
#[derive(Debug, Clone)]
pub enum KeySource {
    /// Read the named environment variable at call time.
    Env(String),
    /// A fixed key, or none at all.
    #[cfg(test)]
    Fixed(Option<String>),
}

impl KeySource {
    fn resolve(&self) -> Result<String, StudioError> {
        let (key, var) = match self {
            KeySource::Env(var) => (std::env::var(var).ok(), var.as_str()),
            #[cfg(test)]
            KeySource::Fixed(key) => (key.clone(), "API_KEY"),
        };
        match key {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(StudioError::Configuration { var: var.to_string() }),
        }
    }
}

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    key: KeySource,
    chat_model: String,
    image_model: String,
    system_instruction: String,
    aspect_ratio: String,
}

impl GeminiClient {
    pub fn from_config(config: &GeminiConfig) -> Self {
        GeminiClient {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            key: KeySource::Env(config.api_key_env.clone()),
            chat_model: config.chat_model.clone(),
            image_model: config.image_model.clone(),
            system_instruction: config.system_instruction.clone(),
            aspect_ratio: config.aspect_ratio.clone(),
        }
    }

    #[cfg(test)]
    #[must_use]
    pub fn with_key_source(mut self, key: KeySource) -> Self {
        self.key = key;
        self
    }

    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    async fn generate(&self, model: &str, request: &GenerateRequest<'_>) -> Result<GenerateResponse, StudioError> {
        let api_key = self.key.resolve()?;
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        tracing::debug!(%model, "sending generateContent request");
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(%model, status = status.as_u16(), "generateContent returned an error status");
            return Err(StudioError::Api { status: status.as_u16(), body });
        }
        wire::parse_response(&body)
    }
}

#[async_trait]
impl StudioBackend for GeminiClient {
    async fn send_chat(&self, message: &str) -> Result<ChatReply, StudioError> {
        let request = wire::chat_request(&self.system_instruction, message);
        let response = self.generate(&self.chat_model, &request).await?;
        chat_reply(&response)
    }

    async fn send_grounded_query(&self, query: &str) -> Result<GroundedReply, StudioError> {
        let request = wire::grounded_request(query);
        let response = self.generate(&self.chat_model, &request).await?;
        Ok(grounded_reply(&response))
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, StudioError> {
        let request = wire::image_request(prompt, &self.aspect_ratio);
        let response = self.generate(&self.image_model, &request).await?;
        image_data_uri(&response)
    }
}

pub fn chat_reply(response: &GenerateResponse) -> Result<ChatReply, StudioError> {
    let text = response.text();
    if text.is_empty() {
        if let Some(reason) = response.finish_reason() {
            if reason != SUCCESS_FINISH_REASON {
                return Err(StudioError::Generation { finish_reason: reason.to_string() });
            }
        }
    }
    Ok(ChatReply { text })
}

pub fn grounded_reply(response: &GenerateResponse) -> GroundedReply {
    let sources = response
        .web_chunks()
        .map(|web| Source {
            title: match web.title.as_deref() {
                Some(title) if !title.is_empty() => title.to_string(),
                _ => UNTITLED_SOURCE.to_string(),
            },
            uri: web.uri.clone().unwrap_or_default(),
        })
        .collect();
    GroundedReply { text: response.text(), sources }
}

pub fn image_data_uri(response: &GenerateResponse) -> Result<String, StudioError> {
    response
        .inline_image()
        .map(|data| format!("data:image/png;base64,{data}"))
        .ok_or(StudioError::NoImage)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
