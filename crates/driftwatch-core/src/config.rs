use std::env;

use crate::error::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const API_KEY_VAR: &str = "GEMINI_API_KEY";
const MODEL_VAR: &str = "GEMINI_MODEL";

/// Credentials and model selection for the text-generation collaborator.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
}

impl Config {
    /// Read collaborator configuration from the process environment.
    ///
    /// The API key is required; a missing or blank key is fatal at
    /// startup. The model name is optional and defaults to
    /// [`DEFAULT_MODEL`].
    pub fn from_env() -> Result<Self, Error> {
        Self::from_values(env::var(API_KEY_VAR).ok(), env::var(MODEL_VAR).ok())
    }

    fn from_values(api_key: Option<String>, model: Option<String>) -> Result<Self, Error> {
        let api_key = match api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => {
                return Err(Error::Configuration(format!(
                    "{API_KEY_VAR} environment variable not set"
                )));
            }
        };

        Ok(Self {
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}
