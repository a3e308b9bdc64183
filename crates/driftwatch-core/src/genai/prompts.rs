//! Prompt builders for the compliance collaborator.

use crate::pipeline::logscan::LogScanResult;
use crate::pipeline::status::Verdict;

/// One-sentence analysis of a hash-validation outcome.
pub fn compliance_reasoning(verdict: Verdict, requirement_id: &str) -> String {
    match verdict {
        Verdict::Compliant => format!(
            "You are a PCI DSS compliance assistant. A device's configuration hash \
             matched the expected secure baseline for requirement '{requirement_id}'. \
             Briefly explain in one sentence why this indicates a secure state."
        ),
        Verdict::NonCompliant => format!(
            "You are a PCI DSS compliance assistant. A device's configuration hash \
             FAILED to match the expected secure baseline for requirement \
             '{requirement_id}'. Briefly explain in one sentence the security risk \
             this unauthorized change poses."
        ),
    }
}

/// Structured markdown report for a completed inspection.
pub fn compliance_report(device_id: &str, verdict: Verdict, log_scan: &LogScanResult) -> String {
    format!(
        "You are a PCI DSS compliance auditor. Write a short markdown report for \
         device '{device_id}'. Hash validation result: {verdict}. Log scan result: \
         {}. Log scan findings: {}. Use sections for Summary, Findings, and \
         Recommended Action. Keep it under 150 words.",
        log_scan.status, log_scan.summary
    )
}

/// Question answering for the chat assistant.
pub fn grounded_question(question: &str) -> String {
    format!(
        "You are a helpful compliance and security assistant for a PCI DSS \
         monitoring dashboard. Answer the following question concisely. \
         Question: {question}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::logscan::scan_logs;

    #[test]
    fn reasoning_prompt_names_the_requirement() {
        let compliant = compliance_reasoning(Verdict::Compliant, "Req-2.2");
        let drifted = compliance_reasoning(Verdict::NonCompliant, "Req-2.2");

        assert!(compliant.contains("'Req-2.2'"));
        assert!(compliant.contains("matched"));
        assert!(drifted.contains("FAILED"));
        assert_ne!(compliant, drifted);
    }

    #[test]
    fn report_prompt_carries_scan_findings() {
        let scan = scan_logs(true);
        let prompt = compliance_report("pos-terminal-9", Verdict::NonCompliant, &scan);

        assert!(prompt.contains("pos-terminal-9"));
        assert!(prompt.contains("non_compliant"));
        assert!(prompt.contains(&scan.summary));
    }

    #[test]
    fn question_prompt_embeds_the_question() {
        let prompt = grounded_question("What is requirement 2.2?");
        assert!(prompt.contains("What is requirement 2.2?"));
    }
}
