//! Report text assembly.
//!
//! The collaborator calls here never fail the run: a failed call is
//! logged and replaced by a fixed, user-visible fallback string.

use tracing::warn;
use uuid::Uuid;

use crate::genai::{GenerateRequest, TextGenerator, prompts};
use crate::pipeline::logscan::LogScanResult;
use crate::pipeline::status::Verdict;

/// Fallback narrative when the report collaborator is unreachable.
pub const NARRATIVE_FALLBACK: &str =
    "Could not generate automated report due to an API error.";

/// Fallback one-sentence analysis for the same condition.
pub const REASONING_FALLBACK: &str =
    "Could not retrieve automated analysis due to an API error.";

/// Fresh device identifier for one inspection run.
pub fn new_device_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("pos-terminal-{}", &suffix[..8])
}

/// One-sentence compliance analysis, degrading to the fixed fallback.
pub async fn reasoning_or_fallback(
    generator: &dyn TextGenerator,
    verdict: Verdict,
    requirement_id: &str,
) -> String {
    let request =
        GenerateRequest::ungrounded(prompts::compliance_reasoning(verdict, requirement_id));
    match generator.generate(request).await {
        Ok(response) => response.text,
        Err(err) => {
            warn!(error = %err, "compliance reasoning degraded to fallback");
            REASONING_FALLBACK.to_string()
        }
    }
}

/// Markdown compliance report, degrading to the fixed fallback.
pub async fn narrative_or_fallback(
    generator: &dyn TextGenerator,
    device_id: &str,
    verdict: Verdict,
    log_scan: &LogScanResult,
) -> String {
    let request =
        GenerateRequest::ungrounded(prompts::compliance_report(device_id, verdict, log_scan));
    match generator.generate(request).await {
        Ok(response) => response.text,
        Err(err) => {
            warn!(error = %err, "report narrative degraded to fallback");
            NARRATIVE_FALLBACK.to_string()
        }
    }
}
