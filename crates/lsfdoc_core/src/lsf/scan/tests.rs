use crate::lsf::{Encoding, LsfError, LsfTable, ScanStats, TableBuilder, Value, first_child, materialize, scan_field, scan_unique_objects, siblings};

fn sample(encoding: Encoding) -> LsfTable {
	let mut builder = TableBuilder::new(encoding);
	let r = builder.node("R", None);
	let a = builder.node("A", Some(r));
	builder.node("A1", Some(a));
	let b = builder.node("B", Some(r));
	builder.node("B1", Some(b));
	builder.attr(a, "Name", &Value::FixedString("a".into()));
	builder.attr(b, "Name", &Value::FixedString("b".into()));
	let mut table = builder.finish();
	table.ensure_sibling_pointers();
	table
}

fn objects(encoding: Encoding) -> LsfTable {
	let mut builder = TableBuilder::new(encoding);
	let bank = builder.node("VisualBank", None);
	let with_both = builder.node("Resource", Some(bank));
	builder.attr(with_both, "ID", &Value::FixedString("id-1".into()));
	builder.attr(with_both, "Name", &Value::LsString("Sword".into()));
	builder.attr(with_both, "Extra", &Value::Int32(4));
	let only_name = builder.node("Resource", Some(bank));
	builder.attr(only_name, "Name", &Value::LsString("Orphan".into()));
	let nested = builder.node("Resource", Some(bank));
	builder.attr(nested, "Name", &Value::LsString("Shield".into()));
	builder.attr(nested, "ID", &Value::FixedString("id-2".into()));
	let inner = builder.node("Inner", Some(nested));
	builder.attr(inner, "Name", &Value::LsString("hidden".into()));
	builder.attr(inner, "ID", &Value::FixedString("id-hidden".into()));
	let mut table = builder.finish();
	table.ensure_sibling_pointers();
	table
}

#[test]
fn sibling_run_skips_descendants() {
	let table = sample(Encoding::Narrow);

	assert_eq!(siblings(&table, 1).expect("run starts").collect::<Vec<_>>(), vec![1, 3]);
	assert_eq!(siblings(&table, 0).expect("run starts").collect::<Vec<_>>(), vec![0]);
	assert_eq!(first_child(&table, 0), Some(1));
	assert_eq!(first_child(&table, 2), None);
	assert_eq!(first_child(&table, 4), None);
}

#[test]
fn field_scan_matches_children_of_root() {
	for encoding in [Encoding::Narrow, Encoding::Wide] {
		let table = sample(encoding);
		let mut seen = Vec::new();
		let stats = scan_field(&table, 1, "Name", |node, value| seen.push((node, value))).expect("scan runs");

		assert_eq!(seen, vec![(1, Value::FixedString("a".into())), (3, Value::FixedString("b".into()))]);
		assert_eq!(stats, ScanStats { visited: 2, matched: 2 });
	}
}

#[test]
fn pair_scan_skips_incomplete_siblings_and_descendants() {
	for encoding in [Encoding::Narrow, Encoding::Wide] {
		let table = objects(encoding);
		let mut seen = Vec::new();
		let stats = scan_unique_objects(&table, 1, ["Name", "ID"], |node, name, id| seen.push((node, name, id))).expect("scan runs");

		assert_eq!(
			seen,
			vec![
				(1, Value::LsString("Sword".into()), Value::FixedString("id-1".into())),
				(3, Value::LsString("Shield".into()), Value::FixedString("id-2".into())),
			]
		);
		assert_eq!(stats, ScanStats { visited: 3, matched: 2 });
	}
}

#[test]
fn scan_agrees_with_materialized_attributes() {
	let table = objects(Encoding::Wide);
	let mut seen = Vec::new();
	scan_unique_objects(&table, 1, ["Name", "ID"], |node, name, id| seen.push((node, name, id))).expect("scan runs");

	for (node, name, id) in seen {
		let full = materialize(&table, node).expect("node parses");
		assert_eq!(full.attr("Name"), Some(&name));
		assert_eq!(full.attr("ID"), Some(&id));
	}
}

#[test]
fn unknown_field_visits_without_matching() {
	let table = objects(Encoding::Narrow);
	let mut calls = 0;
	let stats = scan_unique_objects(&table, 1, ["Name", "MapKey"], |_, _, _| calls += 1).expect("scan runs");

	assert_eq!(calls, 0);
	assert_eq!(stats, ScanStats { visited: 3, matched: 0 });
}

#[test]
fn scan_requires_sibling_pointers() {
	let mut builder = TableBuilder::new(Encoding::Narrow);
	builder.node("Root", None);
	let table = builder.finish();

	let err = scan_field(&table, 0, "Name", |_, _| {}).expect_err("pointers missing");
	assert!(matches!(err, LsfError::SiblingPointersMissing));

	let err = scan_field(&sample(Encoding::Narrow), 12, "Name", |_, _| {}).expect_err("start out of range");
	assert!(matches!(err, LsfError::NodeIndexOutOfRange { idx: 12, .. }));
}

#[test]
fn repeated_field_reports_first_occurrence() {
	let mut builder = TableBuilder::new(Encoding::Narrow);
	let bank = builder.node("Bank", None);
	let item = builder.node("Resource", Some(bank));
	builder.attr(item, "Name", &Value::LsString("first".into()));
	builder.attr(item, "Name", &Value::LsString("second".into()));
	builder.attr(item, "ID", &Value::FixedString("id".into()));
	let mut table = builder.finish();
	table.ensure_sibling_pointers();

	let mut seen = Vec::new();
	scan_unique_objects(&table, item, ["Name", "ID"], |_, name, id| seen.push((name, id))).expect("scan runs");
	assert_eq!(seen, vec![(Value::LsString("first".into()), Value::FixedString("id".into()))]);

	let full = materialize(&table, item).expect("node parses");
	assert_eq!(full.attr("Name"), Some(&Value::LsString("second".into())));
}
