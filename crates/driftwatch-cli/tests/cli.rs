use assert_cmd::Command;
use predicates::prelude::*;

fn driftwatch_cmd() -> Command {
    let mut cmd = Command::cargo_bin("driftwatch").expect("binary should be built");
    // Keep the tests hermetic even when the host has a credential.
    cmd.env_remove("GEMINI_API_KEY");
    cmd.env_remove("GEMINI_MODEL");
    cmd
}

fn fast_inspect_args(extra: &[&str]) -> Vec<String> {
    let mut args = vec![
        "inspect".to_string(),
        "--offline".to_string(),
        "--stage-delay-ms".to_string(),
        "0".to_string(),
    ];
    args.extend(extra.iter().map(ToString::to_string));
    args
}

#[test]
fn untampered_inspection_exits_0() {
    driftwatch_cmd()
        .args(fast_inspect_args(&["--quiet"]))
        .assert()
        .code(0);
}

#[test]
fn tampered_inspection_exits_1() {
    driftwatch_cmd()
        .args(fast_inspect_args(&["--tampered", "--quiet"]))
        .assert()
        .code(1);
}

#[test]
fn json_output_is_valid() {
    let output = driftwatch_cmd()
        .args(fast_inspect_args(&["--quiet", "--format", "json"]))
        .output()
        .expect("command should run");

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");

    for key in [
        "schemaVersion",
        "id",
        "timestamp",
        "deviceId",
        "configHash",
        "evidenceLogUrl",
        "requirementId",
        "hashValidationStatus",
        "logScanResult",
        "finalStatus",
        "reasoning",
        "narrative",
    ] {
        assert!(parsed.get(key).is_some(), "missing key: {key}");
    }
    assert_eq!(parsed["finalStatus"], "compliant");
    assert_eq!(parsed["requirementId"], "Req-2.2");
}

#[test]
fn offline_run_reports_fallback_narrative() {
    let output = driftwatch_cmd()
        .args(fast_inspect_args(&["--quiet", "--format", "json"]))
        .output()
        .expect("command should run");

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        parsed["narrative"],
        "Could not generate automated report due to an API error."
    );
    assert_eq!(
        parsed["reasoning"],
        "Could not retrieve automated analysis due to an API error."
    );
}

#[test]
fn tampered_json_flags_non_compliance() {
    let output = driftwatch_cmd()
        .args(fast_inspect_args(&["--tampered", "--quiet", "--format", "json"]))
        .output()
        .expect("command should run");

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["hashValidationStatus"], "non_compliant");
    assert_eq!(parsed["logScanResult"]["status"], "non_compliant");
    assert_eq!(parsed["finalStatus"], "non_compliant");
    assert!(
        parsed["logScanResult"]["summary"]
            .as_str()
            .unwrap()
            .to_lowercase()
            .contains("violation")
    );
}

#[test]
fn text_output_renders_report() {
    driftwatch_cmd()
        .args(fast_inspect_args(&["--quiet"]))
        .assert()
        .stdout(predicate::str::contains("driftwatch inspection report"))
        .stdout(predicate::str::contains("Final status:    compliant"));
}

#[test]
fn out_writes_report_to_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("report.json");

    driftwatch_cmd()
        .args(fast_inspect_args(&["--quiet", "--format", "json"]))
        .arg("--out")
        .arg(&path)
        .assert()
        .code(0);

    let contents = std::fs::read_to_string(&path).expect("report file should exist");
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["finalStatus"], "compliant");
}

#[test]
fn status_feed_narrates_the_stages() {
    driftwatch_cmd()
        .args(["inspect", "--offline", "--stage-delay-ms", "0"])
        .assert()
        .stderr(predicate::str::contains(
            "Inspector Agent: Generating configuration hash...",
        ))
        .stderr(predicate::str::contains(
            "Compliance Agent: Stored result in Firestore. System is idle.",
        ));
}

#[test]
fn missing_api_key_is_fatal_without_offline() {
    driftwatch_cmd()
        .args(["inspect", "--stage-delay-ms", "0", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn ask_requires_api_key() {
    driftwatch_cmd()
        .args(["ask", "What does requirement 2.2 cover?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}
