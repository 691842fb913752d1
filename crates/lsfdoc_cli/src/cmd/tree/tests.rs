use crate::cmd::test_support::{fixture_arg, run_lsfdoc_json, run_lsfdoc_text};

#[test]
fn tree_json_nests_children_and_typed_attrs() {
	let fixture = fixture_arg("templates_shared.json");
	let json = run_lsfdoc_json(&["tree", &fixture, "--json"]);

	let root = &json["roots"][0];
	assert_eq!(root["name"], "Templates");
	assert_eq!(root["children"].as_array().map(Vec::len), Some(4));

	let base = &root["children"][0];
	assert_eq!(base["attrs"]["Name"]["type"], "LsString");
	assert_eq!(base["attrs"]["Name"]["value"], "BASE_Chair");
	assert_eq!(base["children"][0]["attrs"]["Mass"]["value"], 12.5);
}

#[test]
fn tree_subtree_respects_depth() {
	let fixture = fixture_arg("templates_shared.json");
	let json = run_lsfdoc_json(&["tree", &fixture, "--node", "1", "--depth", "1", "--json"]);

	let base = &json["roots"][0];
	assert_eq!(base["name"], "GameObjects");
	let tags = &base["children"][1];
	assert_eq!(tags["name"], "Tags");
	assert_eq!(tags["children"].as_array().map(Vec::len), Some(0));
}

#[test]
fn tree_text_indents_children() {
	let fixture = fixture_arg("banks.json");
	let text = run_lsfdoc_text(&["tree", &fixture]);

	assert!(text.contains("roots: 3"));
	assert!(text.contains("\n  Resource\n"));
	assert!(text.contains("\n    Objects\n"));
}
