use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

const EXPECTED_ROOT_HELP: &str = "Trezo - bank statement dashboard client

Usage:
  trezo <command>

Start here:
  trezo login <username>
  trezo upload <statement.pdf>
  trezo summary
";

static TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

fn unique_test_home() -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    let stamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(value) => value.as_nanos(),
        Err(_) => 0,
    };
    let sequence = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!(
        "trezo-cli-test-{}-{stamp}-{sequence}",
        std::process::id()
    ));
    path
}

/// Every invocation gets an isolated session home and an API URL that no
/// service listens on, so nothing in this suite depends on the network.
fn run_cli_with_input(args: &[&str], input: Option<&str>) -> (bool, String) {
    let home = unique_test_home();
    let mut command = Command::new(env!("CARGO_BIN_EXE_trezo"));
    for arg in args {
        command.arg(arg);
    }
    command.env("TREZO_HOME", &home);
    command.env("TREZO_API_URL", "http://127.0.0.1:1");
    if input.is_some() {
        command.stdin(Stdio::piped());
    }
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let child_spawn = command.spawn();
    assert!(child_spawn.is_ok());
    if let Ok(mut child) = child_spawn {
        if let Some(body) = input {
            let mut stdin = child.stdin.take();
            assert!(stdin.is_some());
            if let Some(mut pipe) = stdin.take() {
                let write_result = pipe.write_all(body.as_bytes());
                assert!(write_result.is_ok());
            }
        }

        let output = child.wait_with_output();
        assert!(output.is_ok());
        if let Ok(result) = output {
            let stdout = String::from_utf8(result.stdout);
            assert!(stdout.is_ok());
            if let Ok(stdout_text) = stdout {
                return (result.status.success(), stdout_text);
            }
        }
    }

    (false, String::new())
}

fn run_cli(args: &[&str]) -> (bool, String) {
    run_cli_with_input(args, None)
}

fn parse_json(body: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(body);
    assert!(parsed.is_ok());
    if let Ok(value) = parsed {
        return value;
    }
    Value::Null
}

fn assert_text_error_contract(body: &str, code: &str) {
    assert!(body.contains("Something went wrong, but it's easy to fix."));
    assert!(body.contains(&format!("  Error:    {code}")));
    assert!(body.contains("  Details:"));
    assert!(body.contains("What to do next:"));
}

fn assert_json_error_contract(body: &str, code: &str) -> Value {
    let payload = parse_json(body);
    assert_eq!(payload["error"]["code"], Value::String(code.to_string()));
    assert!(payload["error"]["message"].is_string());
    assert!(payload["error"]["recovery_steps"].is_array());
    payload
}

#[test]
fn root_command_uses_short_plaintext_help() {
    let (ok, body) = run_cli(&[]);
    assert!(ok);
    assert_eq!(body, EXPECTED_ROOT_HELP);
}

#[test]
fn help_and_version_return_success_output() {
    let (help_ok, help_body) = run_cli(&["--help"]);
    assert!(help_ok);
    assert!(help_body.starts_with("Trezo — bank statement dashboard client"));
    assert!(help_body.contains("trezo login <username>"));
    assert!(help_body.contains("trezo upload <statement.pdf>..."));
    assert!(help_body.contains("TREZO_API_URL"));
    assert!(help_body.contains("TREZO_HOME"));

    let (version_ok, version_body) = run_cli(&["--version"]);
    assert!(version_ok);
    assert_eq!(version_body.trim(), "trezo 0.1.0");
}

#[test]
fn upload_help_documents_the_batch_contract() {
    let (ok, body) = run_cli(&["upload", "--help"]);
    assert!(ok);
    assert!(body.contains("How upload works:"));
    assert!(body.contains("one at a time in the order given"));
    assert!(body.contains("settles independently"));
    assert!(body.contains("trezo summary"));
}

#[test]
fn whoami_without_a_session_uses_the_error_contract() {
    let (ok, body) = run_cli(&["whoami"]);
    assert!(!ok);
    assert_text_error_contract(&body, "session_missing");
    assert!(body.contains("trezo login <username>"));

    let (json_ok, json_body) = run_cli(&["whoami", "--json"]);
    assert!(!json_ok);
    assert_json_error_contract(&json_body, "session_missing");
}

#[test]
fn summary_without_a_session_fails_before_any_network_call() {
    let (ok, body) = run_cli(&["summary", "--window", "7d"]);
    assert!(!ok);
    assert_text_error_contract(&body, "session_missing");
}

#[test]
fn login_with_empty_password_is_rejected_locally() {
    let (ok, body) = run_cli(&["login", "ana", "--password", ""]);
    assert!(!ok);
    assert_text_error_contract(&body, "invalid_argument");
    assert!(body.contains("Username and password are both required."));
}

#[test]
fn upload_with_missing_file_is_rejected_before_queueing() {
    let (ok, body) = run_cli(&["upload", "no-such-statement.pdf"]);
    assert!(!ok);
    assert_text_error_contract(&body, "invalid_argument");
    assert!(body.contains("no-such-statement.pdf"));
}

#[test]
fn delete_without_confirmation_is_cancelled() {
    let (ok, body) = run_cli_with_input(&["delete", "extras.pdf"], Some("n\n"));
    assert!(!ok);
    assert_text_error_contract(&body, "delete_cancelled");
    assert!(body.contains("extras.pdf"));
    assert!(body.contains("--yes"));
}

#[test]
fn delete_with_yes_still_requires_a_session() {
    let (ok, body) = run_cli(&["delete", "extras.pdf", "--yes"]);
    assert!(!ok);
    assert_text_error_contract(&body, "session_missing");
}

#[test]
fn invalid_window_selector_is_a_guided_parse_error() {
    let (ok, body) = run_cli(&["summary", "--window", "2w"]);
    assert!(!ok);
    assert_text_error_contract(&body, "invalid_argument");
    assert!(body.contains("trezo summary --help"));

    let (json_ok, json_body) = run_cli(&["summary", "--window", "2w", "--json"]);
    assert!(!json_ok);
    let payload = assert_json_error_contract(&json_body, "invalid_argument");
    assert!(
        payload["error"]["message"]
            .as_str()
            .unwrap_or_default()
            .contains("window must be one of")
    );
}

#[test]
fn unknown_command_is_rejected_with_the_error_contract() {
    let (ok, body) = run_cli(&["frob"]);
    assert!(!ok);
    assert_text_error_contract(&body, "invalid_argument");
}

#[test]
fn upload_without_paths_is_a_parse_error() {
    let (ok, body) = run_cli(&["upload"]);
    assert!(!ok);
    assert_text_error_contract(&body, "invalid_argument");
    assert!(body.contains("trezo upload --help"));
}

#[test]
fn change_password_with_empty_value_is_rejected_locally() {
    let (ok, body) = run_cli(&["change-password", "--password", ""]);
    assert!(!ok);
    assert_text_error_contract(&body, "invalid_argument");
    assert!(body.contains("The new password must not be empty."));
}

#[test]
fn network_failures_surface_as_transport_errors() {
    // Seed a session file so the summary command reaches the transport.
    let home = unique_test_home();
    std::fs::create_dir_all(&home).unwrap();
    std::fs::write(
        home.join("session.json"),
        r#"{"token":"tok_test","username":"ana","role":"user"}"#,
    )
    .unwrap();

    let mut command = Command::new(env!("CARGO_BIN_EXE_trezo"));
    command.args(["summary", "--json"]);
    command.env("TREZO_HOME", &home);
    command.env("TREZO_API_URL", "http://127.0.0.1:1");
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let output = command.output().unwrap();
    assert!(!output.status.success());
    let body = String::from_utf8(output.stdout).unwrap();
    assert_json_error_contract(&body, "transport_failed");
}
