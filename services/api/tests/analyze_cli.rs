use serde_json::Value;
use std::process::Command;

#[test]
fn analyze_json_keeps_logs_off_stdout() {
    let output = Command::new(env!("CARGO_BIN_EXE_deal-analyzer-api"))
        .args(["analyze", "--price", "200000", "--rent", "2000", "--json"])
        .env("MISTRAL_API_KEY", "")
        .env("RUST_LOG", "info")
        .output()
        .expect("run analyze command");

    assert!(output.status.success(), "exit status {:?}", output.status);
    let body: Value = serde_json::from_slice(&output.stdout).expect("stdout is a single JSON body");
    assert_eq!(body["score"], Value::from(60));
    assert_eq!(body["verdict"], Value::from("Good Deal"));

    let logs = String::from_utf8_lossy(&output.stderr);
    assert!(logs.contains("deal analyzed"), "stderr was: {logs}");
}
