use crate::TOOL_NAME;

use super::model::ComplianceReport;

/// Render a report for terminal display.
pub fn render_text(report: &ComplianceReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{TOOL_NAME} inspection report\n"));
    out.push_str(&format!("Report id:       {}\n", report.id));
    out.push_str(&format!("Timestamp:       {}\n", report.timestamp.to_rfc3339()));
    out.push_str(&format!("Device:          {}\n", report.device_id));
    out.push_str(&format!("Requirement:     {}\n", report.requirement_id));
    out.push_str(&format!("Config hash:     {}\n", report.config_hash));
    out.push_str(&format!("Evidence log:    {}\n", report.evidence_log_url));
    out.push_str(&format!(
        "Hash validation: {}\n",
        report.hash_validation_status
    ));
    out.push_str(&format!(
        "Log scan:        {} ({})\n",
        report.log_scan_result.status, report.log_scan_result.summary
    ));
    out.push_str(&format!("Final status:    {}\n", report.final_status));
    out.push_str(&format!("\nAnalysis: {}\n", report.reasoning));
    out.push_str(&format!("\n{}\n", report.narrative));
    out
}
