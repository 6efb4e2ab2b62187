#[path = "common/mod.rs"]
mod common;

use common::SupportTest;

// ============================================================================
// Config command tests
// ============================================================================

#[test]
fn test_config_show_empty() {
    let support = SupportTest::new();

    let output = support.run_success(&["config", "show"]);
    assert!(output.contains("Configuration"));
    assert!(output.contains("not configured"));
    assert!(output.contains("#PM157"));
}

#[test]
fn test_config_set_and_get_endpoint() {
    let support = SupportTest::new();

    support.run_success(&[
        "config",
        "set",
        "endpoint.url",
        "https://script.google.com/macros/s/AKfy123/exec",
    ]);
    let output = support.run_success(&["config", "get", "endpoint.url"]);
    assert_eq!(
        output.trim(),
        "https://script.google.com/macros/s/AKfy123/exec"
    );
}

#[test]
fn test_config_show_redacts_endpoint_path() {
    let support = SupportTest::new();

    support.run_success(&[
        "config",
        "set",
        "endpoint.url",
        "https://script.google.com/macros/s/AKfy123/exec",
    ]);
    let output = support.run_success(&["config", "show"]);
    assert!(output.contains("https://script.google.com/..."));
    assert!(!output.contains("AKfy123"));
}

#[test]
fn test_config_get_not_set() {
    let support = SupportTest::new();

    let stderr = support.run_failure(&["config", "get", "endpoint.url"]);
    assert!(stderr.contains("not set"));
}

#[test]
fn test_config_get_endpoint_from_env() {
    let support = SupportTest::new();

    let output = support.run_with_env(
        &["config", "get", "endpoint.url"],
        &[("SUPPORTDESK_ENDPOINT_URL", "https://env.example.com/tickets")],
    );
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "https://env.example.com/tickets"
    );
}

#[test]
fn test_config_set_invalid_key() {
    let support = SupportTest::new();

    let stderr = support.run_failure(&["config", "set", "invalid.key", "value"]);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_config_rejects_underscore_keys() {
    let support = SupportTest::new();

    let stderr = support.run_failure(&["config", "set", "endpoint_url", "https://x.example"]);
    assert!(stderr.contains("endpoint.url"));
}

#[test]
fn test_config_set_invalid_endpoint() {
    let support = SupportTest::new();

    let stderr = support.run_failure(&["config", "set", "endpoint.url", "not a url"]);
    assert!(stderr.contains("invalid endpoint URL"));
    assert!(support.read_config().is_none());
}

#[test]
fn test_config_set_success_contract() {
    let support = SupportTest::new();

    support.run_success(&["config", "set", "success.contract", "ok-flag"]);
    let output = support.run_success(&["config", "get", "success.contract"]);
    assert_eq!(output.trim(), "ok_flag");

    let stderr = support.run_failure(&["config", "set", "success.contract", "message"]);
    assert!(stderr.contains("unknown success contract"));
}

#[test]
fn test_config_set_attachment_limits() {
    let support = SupportTest::new();

    support.run_success(&["config", "set", "attachment.max_bytes", "2048"]);
    support.run_success(&["config", "set", "attachment.extensions", ".JPG, png"]);

    let config = support.read_config().expect("config file written");
    assert!(config.contains("max_bytes: 2048"));
    assert!(config.contains("- jpg"));
    assert!(config.contains("- png"));

    let output = support.run_success(&["config", "get", "attachment.extensions"]);
    assert_eq!(output.trim(), "jpg, png");
}

#[test]
fn test_config_set_rejects_non_numeric_timeout() {
    let support = SupportTest::new();

    let stderr = support.run_failure(&["config", "set", "request.timeout", "soon"]);
    assert!(stderr.contains("non-negative integer"));
}

#[test]
fn test_config_show_json() {
    let support = SupportTest::new();

    support.run_success(&["config", "set", "order.prefix", "#AB"]);
    let output = support.run_success(&["config", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    assert_eq!(json["order"]["prefix"], "#AB");
    assert_eq!(json["success_contract"], "status");
    assert_eq!(json["endpoint"]["configured"], false);
    assert_eq!(json["accept_json"], true);
}

#[cfg(unix)]
#[test]
fn test_config_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let support = SupportTest::new();
    support.run_success(&["config", "set", "accept.json", "false"]);

    let path = support
        .temp_dir
        .path()
        .join(".supportdesk")
        .join("config.yaml");
    let mode = std::fs::metadata(path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
