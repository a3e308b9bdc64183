use async_trait::async_trait;
use tracing::debug;

use super::wire::{self, Content, GenerateContentRequest, GenerateContentResponse, Part, Tool};
use super::{CollabError, GenerateRequest, GenerateResponse, TextGenerator};
use crate::config::Config;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for the hosted Gemini text API.
///
/// Calls are single-shot: no retry and no timeout beyond what the
/// transport applies. A failed call surfaces as [`CollabError`] and the
/// caller decides how to degrade.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{API_BASE}/models/{}:generateContent", self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, CollabError> {
        let tools = if request.grounded {
            vec![Tool::google_search()]
        } else {
            Vec::new()
        };
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt,
                }],
            }],
            tools,
        };

        debug!(model = %self.model, grounded = request.grounded, "dispatching generateContent");
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CollabError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let wire: GenerateContentResponse = response.json().await?;
        wire::into_response(wire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(model: &str) -> GeminiClient {
        GeminiClient::new(&Config {
            api_key: "test-key".into(),
            model: model.into(),
        })
    }

    #[test]
    fn endpoint_embeds_model_name() {
        assert_eq!(
            client("gemini-2.5-flash").endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn endpoint_tracks_model_override() {
        assert!(client("gemini-2.5-pro").endpoint().contains("gemini-2.5-pro"));
    }
}
