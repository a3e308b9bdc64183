pub mod client;
pub mod prompts;
mod wire;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::GeminiClient;

/// Failure of a generative-AI collaborator call.
///
/// Calls are never retried. Callers with a fallback (report text, chat
/// answers) substitute it and continue; callers without one propagate.
#[derive(Debug, Error)]
pub enum CollabError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("api returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("response contained no usable text")]
    EmptyResponse,

    #[error("malformed audio frame: {0}")]
    MalformedAudio(String),

    #[error("text generation is disabled in offline mode")]
    Disabled,
}

/// A request to the text-generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Ask the collaborator to ground the answer in web search results.
    pub grounded: bool,
}

impl GenerateRequest {
    pub fn grounded(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            grounded: true,
        }
    }

    pub fn ungrounded(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            grounded: false,
        }
    }
}

/// A source citation attached to a grounded answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

/// Text returned by the collaborator, with any citations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResponse {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// Seam to the hosted text-generation service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, CollabError>;
}

/// Generator used when no credential is configured.
///
/// Every call fails with [`CollabError::Disabled`], which downstream
/// callers degrade to their fixed fallback text.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse, CollabError> {
        Err(CollabError::Disabled)
    }
}
