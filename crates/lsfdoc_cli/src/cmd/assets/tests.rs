use crate::cmd::test_support::{fixture_arg, run_lsfdoc, run_lsfdoc_json};

#[test]
fn assets_json_counts_types_across_files() {
	let banks = fixture_arg("banks.json");
	let patch = fixture_arg("banks_patch.json");
	let json = run_lsfdoc_json(&["assets", &banks, &patch, "--json"]);

	let types = json["types"].as_array().expect("types array");
	let names: Vec<&str> = types.iter().filter_map(|item| item["name"].as_str()).collect();
	assert_eq!(names, vec!["Material", "Texture", "Visual"]);
	assert_eq!(types[2]["uuids"], 2);
	assert_eq!(types[2]["names"], 3);
	assert!(json["entries"].as_array().is_some_and(Vec::is_empty));
}

#[test]
fn assets_type_filter_lists_winning_entries() {
	let banks = fixture_arg("banks.json");
	let patch = fixture_arg("banks_patch.json");
	let json = run_lsfdoc_json(&["assets", &banks, &patch, "--type", "Visual", "--json"]);

	let entries = json["entries"].as_array().expect("entries array");
	assert_eq!(entries.len(), 2);
	assert_eq!(entries[0]["uuid"], "b1f0a2c4-1111-4000-8000-000000000001");
	assert_eq!(entries[0]["table"], 1);
	assert_eq!(entries[0]["node"], 1);
}

#[test]
fn assets_unknown_type_is_an_error() {
	let banks = fixture_arg("banks.json");
	let output = run_lsfdoc(&["assets", &banks, "--type", "Sound"]);

	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("entity not found: Sound"));
}
