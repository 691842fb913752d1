use crate::lsf::{Encoding, LsfError, LsfTable, Node, TableBuilder, Value, flatten_forest, forest, materialize, parse_subtree, parse_whole_table};

/// `R > (A > A1), (B > B1)` with `Name` on A and B.
fn sample(encoding: Encoding) -> LsfTable {
	let mut builder = TableBuilder::new(encoding);
	let r = builder.node("R", None);
	let a = builder.node("A", Some(r));
	builder.node("A1", Some(a));
	let b = builder.node("B", Some(r));
	builder.node("B1", Some(b));
	builder.attr(a, "Name", &Value::FixedString("a".into()));
	builder.attr(b, "Name", &Value::FixedString("b".into()));
	builder.finish()
}

fn names(node: &Node) -> Vec<&str> {
	node.children.iter().map(|child| child.name.as_ref()).collect()
}

#[test]
fn whole_table_rebuilds_nested_children() {
	for encoding in [Encoding::Narrow, Encoding::Wide] {
		let table = sample(encoding);
		let roots = parse_whole_table(&table).expect("table parses");

		assert_eq!(roots.len(), 1);
		let root = &roots[0];
		assert_eq!(root.name.as_ref(), "R");
		assert_eq!(names(root), vec!["A", "B"]);
		assert_eq!(root.count(), 5);

		let a = root.child("A").expect("A present");
		assert_eq!(a.attr("Name"), Some(&Value::FixedString("a".into())));
		assert_eq!(names(a), vec!["A1"]);
		assert!(a.children[0].attrs.is_empty());
	}
}

#[test]
fn subtree_cursor_points_past_subtree() {
	let table = sample(Encoding::Narrow);

	let (a, next) = parse_subtree(&table, 1).expect("A parses");
	assert_eq!(a.name.as_ref(), "A");
	assert_eq!(names(&a), vec!["A1"]);
	assert_eq!(next, 3);

	let (b, next) = parse_subtree(&table, 3).expect("B parses");
	assert_eq!(names(&b), vec!["B1"]);
	assert_eq!(next, 5, "cursor is the node count at table end");

	let (leaf, next) = parse_subtree(&table, 2).expect("leaf parses");
	assert!(leaf.children.is_empty());
	assert_eq!(next, 3);
}

#[test]
fn multiple_roots_stream_in_file_order() {
	let mut builder = TableBuilder::new(Encoding::Narrow);
	let first = builder.node("Config", None);
	builder.node("Entry", Some(first));
	builder.node("Entry", Some(first));
	let second = builder.node("Regions", None);
	builder.attr(second, "Count", &Value::UInt32(0));
	builder.node("Empty", None);
	let table = builder.finish();

	let streamed: Vec<Node> = forest(&table).collect::<Result<_, _>>().expect("forest parses");
	let collected = parse_whole_table(&table).expect("table parses");
	assert_eq!(streamed, collected);

	let roots: Vec<&str> = collected.iter().map(|node| node.name.as_ref()).collect();
	assert_eq!(roots, vec!["Config", "Regions", "Empty"]);
	assert_eq!(collected[0].children_named("Entry").count(), 2);
	assert_eq!(collected[1].attr("Count"), Some(&Value::UInt32(0)));
}

#[test]
fn flatten_then_parse_is_identity() {
	let forest_in = vec![
		Node::new("Root")
			.with_attr("Flag", Value::Bool(true))
			.with_child(
				Node::new("Child")
					.with_attr("Pos", Value::Vec3([1.0, 2.0, 3.0]))
					.with_attr("Id", Value::Uuid("00112233-4455-6677-8899-aabbccddeeff".into()))
					.with_child(Node::new("Leaf").with_attr("Label", Value::LsString("leaf".into()))),
			)
			.with_child(Node::new("Child")),
		Node::new("Second").with_attr("Big", Value::Int64(-1)),
	];

	for encoding in [Encoding::Narrow, Encoding::Wide] {
		let table = flatten_forest(&forest_in, encoding);
		assert_eq!(table.encoding(), encoding);
		assert_eq!(parse_whole_table(&table).expect("flattened table parses"), forest_in);
	}
}

#[test]
fn unrecognized_tag_is_kept_with_payload() {
	let mut builder = TableBuilder::new(Encoding::Wide);
	let root = builder.node("Root", None);
	builder.attr_raw(root, "Odd", 0x30, vec![1, 2, 3]);
	let table = builder.finish();

	let node = materialize(&table, root).expect("root parses");
	assert_eq!(node.attr("Odd"), Some(&Value::Unrecognized { tag: 0x30, raw: vec![1, 2, 3] }));
}

#[test]
fn duplicate_attribute_keeps_last_value() {
	let mut builder = TableBuilder::new(Encoding::Narrow);
	let root = builder.node("Root", None);
	builder.attr(root, "X", &Value::Int32(1));
	builder.attr(root, "X", &Value::Int32(2));
	let table = builder.finish();

	let node = materialize(&table, root).expect("root parses");
	assert_eq!(node.attrs.len(), 1);
	assert_eq!(node.attr("X"), Some(&Value::Int32(2)));
}

#[test]
fn materialized_nodes_are_independent_copies() {
	let table = sample(Encoding::Narrow);

	let mut first = materialize(&table, 1).expect("A parses");
	first.attrs.clear();
	first.children.clear();

	let second = materialize(&table, 1).expect("A parses again");
	assert_eq!(second.attr("Name"), Some(&Value::FixedString("a".into())));
	assert_eq!(second.children.len(), 1);
}

#[test]
fn out_of_range_start_is_a_contract_violation() {
	let table = sample(Encoding::Narrow);

	let err = materialize(&table, 5).expect_err("index 5 does not exist");
	assert!(matches!(err, LsfError::NodeIndexOutOfRange { idx: 5, count: 5 }));
}

#[test]
fn empty_table_has_no_roots() {
	let table = TableBuilder::new(Encoding::Wide).finish();

	assert!(parse_whole_table(&table).expect("empty parses").is_empty());
}
