use thiserror::Error;

use crate::genai::CollabError;

/// Top-level driftwatch error taxonomy.
///
/// Collaborator failures are usually recovered close to the call site by
/// substituting fixed fallback text; they only surface here from paths
/// where no fallback exists (e.g. the voice transport).
#[derive(Debug, Error)]
pub enum Error {
    /// Required startup configuration is missing or unusable. Fatal.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A generative-AI collaborator call failed.
    #[error("collaborator call failed")]
    Collaborator(#[from] CollabError),

    /// A second inspection was triggered while one was still in flight.
    #[error("an inspection run is already in progress")]
    RunInProgress,
}
