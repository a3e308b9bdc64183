use serde::{Deserialize, Serialize};

use super::status::Verdict;

/// Outcome of the simulated evidence-log scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogScanResult {
    pub status: Verdict,
    pub summary: String,
}

const CLEAN_SUMMARY: &str = "Scanned 1,024 access-log entries. All configuration \
reads and writes match approved service accounts and scheduled maintenance windows.";

const VIOLATION_SUMMARY: &str = "Policy violation detected: configuration write from \
an unrecognized process outside the approved change window. 3 of 1,024 access-log \
entries implicated.";

/// Simulated scan of the device's access logs.
///
/// There is no real log source; the tampering flag alone decides the
/// outcome, matching the behavior of the demo environment.
pub fn scan_logs(tampered: bool) -> LogScanResult {
    if tampered {
        LogScanResult {
            status: Verdict::NonCompliant,
            summary: VIOLATION_SUMMARY.to_string(),
        }
    } else {
        LogScanResult {
            status: Verdict::Compliant,
            summary: CLEAN_SUMMARY.to_string(),
        }
    }
}
