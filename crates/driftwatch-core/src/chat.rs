//! Text chat assistant backed by the generative collaborator.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::genai::{Citation, GenerateRequest, TextGenerator, prompts};

/// Shown in place of an answer when the collaborator call fails.
pub const ANSWER_FALLBACK: &str = "Sorry, I could not reach the assistant due to an API error.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Model,
}

/// One entry in a chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Citation>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            text: text.into(),
            sources: Vec::new(),
        }
    }

    pub fn model(text: impl Into<String>, sources: Vec<Citation>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Model,
            text: text.into(),
            sources,
        }
    }
}

/// Append-only chat transcript backed by the text collaborator.
pub struct ChatSession {
    generator: Arc<dyn TextGenerator>,
    messages: Vec<ChatMessage>,
    grounding: bool,
}

impl ChatSession {
    pub fn new(generator: Arc<dyn TextGenerator>, grounding: bool) -> Self {
        Self {
            generator,
            messages: Vec::new(),
            grounding,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn set_grounding(&mut self, grounding: bool) {
        self.grounding = grounding;
    }

    /// Ask a question and append both sides of the exchange.
    ///
    /// Collaborator failures degrade to a canned apology; the transcript
    /// always gains exactly two messages per call.
    pub async fn ask(&mut self, question: &str) -> ChatMessage {
        self.messages.push(ChatMessage::user(question));

        let prompt = prompts::grounded_question(question);
        let request = if self.grounding {
            GenerateRequest::grounded(prompt)
        } else {
            GenerateRequest::ungrounded(prompt)
        };

        let message = match self.generator.generate(request).await {
            Ok(response) => ChatMessage::model(response.text, response.citations),
            Err(err) => {
                warn!(error = %err, "chat answer degraded to fallback");
                ChatMessage::model(ANSWER_FALLBACK, Vec::new())
            }
        };

        self.messages.push(message.clone());
        message
    }
}
