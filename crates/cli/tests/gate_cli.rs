//! End-to-end CLI behavior against a temp store file.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

fn aas_binary() -> PathBuf {
	let mut path = std::env::current_exe().expect("current_exe should resolve");
	path.pop();
	path.pop();
	path.push("aas");
	path
}

fn run_aas(store: &Path, args: &[&str]) -> (bool, String, String) {
	let output = Command::new(aas_binary())
		.arg("--store")
		.arg(store)
		.args(args)
		.output()
		.expect("failed to execute aas");

	let stdout = String::from_utf8_lossy(&output.stdout).to_string();
	let stderr = String::from_utf8_lossy(&output.stderr).to_string();
	(output.status.success(), stdout, stderr)
}

fn run_json(store: &Path, args: &[&str]) -> serde_json::Value {
	let mut full = vec!["-f", "json"];
	full.extend_from_slice(args);
	let (success, stdout, stderr) = run_aas(store, &full);
	assert!(success, "command {args:?} failed: {stderr}");
	serde_json::from_str(&stdout).unwrap_or_else(|err| panic!("bad JSON from {args:?}: {err}\n{stdout}"))
}

#[test]
fn status_lists_nothing_for_fresh_store() {
	let tmp = TempDir::new().unwrap();
	let store = tmp.path().join("gate.json");

	let json = run_json(&store, &["status"]);
	assert_eq!(json["ok"], true);
	assert_eq!(json["data"]["keys"], serde_json::json!([]));
}

#[test]
fn check_allows_fresh_key() {
	let tmp = TempDir::new().unwrap();
	let store = tmp.path().join("gate.json");

	let json = run_json(&store, &["check", "7", "copart.com"]);
	assert_eq!(json["data"]["allowed"], true);
	assert_eq!(json["data"]["verdict"], "allowed");
}

#[test]
fn block_then_check_denies_and_status_reports_it() {
	let tmp = TempDir::new().unwrap();
	let store = tmp.path().join("gate.json");

	let json = run_json(&store, &["block", "7", "copart.com", "--reason", "stuck in redirect loop"]);
	assert_eq!(json["ok"], true);

	let json = run_json(&store, &["check", "7", "copart.com"]);
	assert_eq!(json["data"]["allowed"], false);
	assert_eq!(json["data"]["code"], "BLOCKED");

	let json = run_json(&store, &["status", "7", "copart.com"]);
	assert_eq!(json["data"]["history"]["blocked"], true);
	assert_eq!(json["data"]["history"]["blockReason"], "stuck in redirect loop");
	assert_eq!(json["data"]["state"]["state"], "BLOCKED");

	// Other keys stay unaffected.
	let json = run_json(&store, &["check", "8", "copart.com"]);
	assert_eq!(json["data"]["allowed"], true);
}

#[test]
fn clear_resets_a_blocked_key() {
	let tmp = TempDir::new().unwrap();
	let store = tmp.path().join("gate.json");

	run_json(&store, &["block", "7", "iaai.com"]);
	let json = run_json(&store, &["clear", "7", "iaai.com"]);
	assert_eq!(json["data"]["cleared"], true);

	let json = run_json(&store, &["check", "7", "iaai.com"]);
	assert_eq!(json["data"]["allowed"], true);

	let json = run_json(&store, &["status"]);
	assert_eq!(json["data"]["keys"], serde_json::json!([]));
}

#[test]
fn status_with_only_tab_is_rejected() {
	let tmp = TempDir::new().unwrap();
	let store = tmp.path().join("gate.json");

	let (success, _, _) = run_aas(&store, &["status", "7"]);
	assert!(!success, "status with half a key must fail");
}

#[test]
fn text_output_mentions_the_key() {
	let tmp = TempDir::new().unwrap();
	let store = tmp.path().join("gate.json");

	let (success, stdout, stderr) = run_aas(&store, &["check", "7", "copart.com"]);
	assert!(success, "{stderr}");
	assert!(stdout.contains("tab 7 (copart.com)"), "unexpected output: {stdout}");
}
