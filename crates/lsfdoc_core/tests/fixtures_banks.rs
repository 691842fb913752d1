#![allow(missing_docs)]

use lsfdoc::lsf::{AssetIndex, EntityRef, IndexOptions, TableSet};
use lsfdoc_testkit::fixture_path;

const CHAIR_ID: &str = "b1f0a2c4-1111-4000-8000-000000000001";

fn open(names: &[&str]) -> TableSet {
	let mut tables = TableSet::new();
	for name in names {
		tables.open(fixture_path(name)).expect("bank fixture opens");
	}
	tables
}

#[test]
fn bank_types_come_from_root_containers() {
	let tables = open(&["banks.json"]);
	let index = AssetIndex::build(&tables, &IndexOptions::default()).expect("assets index");

	let types: Vec<&str> = index.types().map(|(name, _)| name).collect();
	assert_eq!(types, vec!["Material", "Visual"]);

	let visual = index.asset_type("Visual").expect("visual bank");
	assert_eq!(visual.by_uuid(CHAIR_ID), Some(EntityRef { table: 0, node: 1 }));
	assert_eq!(visual.by_name("LAMP_A"), Some(EntityRef { table: 0, node: 3 }));
	assert_eq!(visual.by_name("CHAIR_Wood_A_mesh"), None, "nested objects are not resources");

	let material = index.asset_type("Material").expect("material bank");
	assert_eq!(material.len(), 1, "resources without an id are skipped");
	assert_eq!(material.by_name("MAT_Broken"), None);
}

#[test]
fn later_bank_files_override_earlier_ones() {
	let tables = open(&["banks.json", "banks_patch.json"]);
	let index = AssetIndex::build(&tables, &IndexOptions::default()).expect("assets index");

	let visual = index.asset_type("Visual").expect("visual bank");
	assert_eq!(visual.by_uuid(CHAIR_ID), Some(EntityRef { table: 1, node: 1 }));
	assert_eq!(visual.by_name("CHAIR_Wood_A"), Some(EntityRef { table: 0, node: 1 }));
	assert_eq!(visual.len(), 2);
	assert!(index.asset_type("Texture").is_some());
	assert_eq!(index.len(), 3);
}

#[test]
fn reversed_load_order_flips_the_winner() {
	let tables = open(&["banks_patch.json", "banks.json"]);
	let index = AssetIndex::build(&tables, &IndexOptions::default()).expect("assets index");

	let visual = index.asset_type("Visual").expect("visual bank");
	assert_eq!(visual.by_uuid(CHAIR_ID), Some(EntityRef { table: 1, node: 1 }));
	assert_eq!(tables.label(1).map(|label| label.ends_with("banks.json")), Some(true));
}
