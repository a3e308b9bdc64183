use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::SCHEMA_VERSION;
use crate::pipeline::logscan::LogScanResult;
use crate::pipeline::status::Verdict;

/// One completed inspection, as stored in the simulated Firestore.
///
/// This struct is a stable JSON contract and is never mutated after
/// construction. The final status is derived in the constructor so a
/// report can never carry an inconsistent combination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub schema_version: String,
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub device_id: String,
    pub config_hash: String,
    pub evidence_log_url: String,
    pub requirement_id: String,
    pub hash_validation_status: Verdict,
    pub log_scan_result: LogScanResult,
    pub final_status: Verdict,
    /// One-sentence analysis of the hash-validation outcome.
    pub reasoning: String,
    /// Markdown report drafted by the text collaborator.
    pub narrative: String,
}

impl ComplianceReport {
    /// Construct a report from pipeline outputs.
    ///
    /// `final_status` is the logical AND of the hash validation and the
    /// log scan; the evidence location is derived from the fresh report
    /// id and device id.
    pub fn new(
        device_id: String,
        config_hash: String,
        requirement_id: &str,
        hash_validation_status: Verdict,
        log_scan_result: LogScanResult,
        reasoning: String,
        narrative: String,
    ) -> Self {
        let id = Uuid::new_v4();
        let final_status = hash_validation_status.and(log_scan_result.status);
        let evidence_log_url = format!("gs://driftwatch-evidence/{device_id}/{id}.log");

        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            id,
            timestamp: Utc::now(),
            device_id,
            config_hash,
            evidence_log_url,
            requirement_id: requirement_id.to_string(),
            hash_validation_status,
            log_scan_result,
            final_status,
            reasoning,
            narrative,
        }
    }
}

/// Completed reports, newest first.
///
/// Grows without bound for the process lifetime; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct ReportLog {
    entries: Vec<ComplianceReport>,
}

impl ReportLog {
    pub fn push_front(&mut self, report: ComplianceReport) {
        self.entries.insert(0, report);
    }

    pub fn entries(&self) -> &[ComplianceReport] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&ComplianceReport> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
