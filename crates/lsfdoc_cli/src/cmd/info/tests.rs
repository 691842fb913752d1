use crate::cmd::test_support::{fixture_arg, run_lsfdoc, run_lsfdoc_json, run_lsfdoc_text};

#[test]
fn info_json_reports_counts_and_layout() {
	let fixture = fixture_arg("templates_shared.json");
	let json = run_lsfdoc_json(&["info", &fixture, "--json"]);

	assert_eq!(json["encoding"], "wide");
	assert_eq!(json["nodes"], 8);
	assert_eq!(json["roots"], 1);
	assert_eq!(json["stored_next"], 0);
	assert_eq!(json["siblings_consistent"], false);
}

#[test]
fn info_text_lists_narrow_layout() {
	let fixture = fixture_arg("banks.json");
	let text = run_lsfdoc_text(&["info", &fixture]);

	assert!(text.contains("encoding: narrow"));
	assert!(text.contains("roots: 3"));
}

#[test]
fn missing_file_fails_with_error_prefix() {
	let output = run_lsfdoc(&["info", "does-not-exist.json"]);

	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: "));
}
