use crate::lsf::{AttrRecord, LsfTable, NONE, NodeRecord, TableSnapshot, attr_run};

fn node(parent: i32, first_attr: i32) -> NodeRecord {
	NodeRecord {
		name: 0,
		parent,
		next: NONE,
		first_attr,
	}
}

fn attr(name: u32, owner: i32, next: i32) -> AttrRecord {
	AttrRecord {
		name,
		type_tag: 0x04,
		next,
		owner,
		raw: 7_i32.to_le_bytes().to_vec(),
	}
}

fn table(wide: bool, nodes: Vec<NodeRecord>, attrs: Vec<AttrRecord>) -> LsfTable {
	LsfTable::from_snapshot(TableSnapshot {
		wide,
		names: vec!["Node".into(), "A".into(), "B".into(), "C".into()],
		nodes,
		attrs,
	})
	.expect("snapshot is valid")
}

fn run(table: &LsfTable, idx: usize) -> Vec<usize> {
	attr_run(table, idx).map(|(attr_idx, _)| attr_idx).collect()
}

#[test]
fn narrow_run_stops_at_owner_fence() {
	let table = table(false, vec![node(NONE, 0), node(0, 2), node(0, NONE)], vec![attr(1, 0, NONE), attr(2, 0, NONE), attr(1, 1, NONE), attr(3, 1, NONE)]);

	assert_eq!(run(&table, 0), vec![0, 1]);
	assert_eq!(run(&table, 1), vec![2, 3], "run ends at table end");
	assert!(run(&table, 2).is_empty());
	assert!(run(&table, 99).is_empty(), "unknown node yields nothing");
}

#[test]
fn narrow_run_ignores_stored_next() {
	let table = table(false, vec![node(NONE, 0)], vec![attr(1, 0, 5), attr(2, 0, 0)]);

	assert_eq!(run(&table, 0), vec![0, 1]);
}

#[test]
fn wide_run_follows_next_regardless_of_owner() {
	let table = table(true, vec![node(NONE, 2), node(0, 1)], vec![attr(1, 1, NONE), attr(2, 1, 0), attr(3, 9, 0)]);

	assert_eq!(run(&table, 0), vec![2, 0]);
	assert_eq!(run(&table, 1), vec![1, 0]);
}

#[test]
fn out_of_range_indices_end_the_run() {
	let wide = table(true, vec![node(NONE, 0), node(0, 40)], vec![attr(1, 0, 17)]);
	assert_eq!(run(&wide, 0), vec![0]);
	assert!(run(&wide, 1).is_empty());

	let narrow = table(false, vec![node(NONE, 3)], vec![attr(1, 0, NONE)]);
	assert!(run(&narrow, 0).is_empty());
}

#[test]
fn looping_wide_chain_is_cut() {
	let table = table(true, vec![node(NONE, 0)], vec![attr(1, 0, 1), attr(2, 0, 0)]);

	let seen = run(&table, 0);
	assert_eq!(seen, vec![0, 1]);
}
