use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::lsf::{LsfTable, Result, Value, attr_run, decode_value};

/// Materialized tree node with resolved names.
///
/// Every call that builds a `Node` returns an independent copy; nothing is shared with the
/// source table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
	/// Node name.
	pub name: Box<str>,
	/// Decoded attributes keyed by name.
	pub attrs: BTreeMap<Box<str>, Value>,
	/// Children in table order.
	pub children: Vec<Node>,
}

impl Node {
	/// Create an empty node.
	pub fn new(name: impl Into<Box<str>>) -> Self {
		Self {
			name: name.into(),
			attrs: BTreeMap::new(),
			children: Vec::new(),
		}
	}

	/// Builder-style attribute insert.
	pub fn with_attr(mut self, name: impl Into<Box<str>>, value: Value) -> Self {
		self.attrs.insert(name.into(), value);
		self
	}

	/// Builder-style child append.
	pub fn with_child(mut self, child: Node) -> Self {
		self.children.push(child);
		self
	}

	/// Attribute by name.
	pub fn attr(&self, name: &str) -> Option<&Value> {
		self.attrs.get(name)
	}

	/// First direct child with the given name.
	pub fn child(&self, name: &str) -> Option<&Node> {
		self.children.iter().find(|child| child.name.as_ref() == name)
	}

	/// All direct children with the given name.
	pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
		self.children.iter().filter(move |child| child.name.as_ref() == name)
	}

	/// Number of nodes in this subtree, including `self`.
	pub fn count(&self) -> usize {
		1 + self.children.iter().map(Node::count).sum::<usize>()
	}
}

/// Rebuild the subtree rooted at `start`, returning it with the index just past it.
///
/// Pre-order layout is relied upon: the subtree closes at the first record whose parent is
/// not an open ancestor. The returned cursor is where the next sibling (or an unrelated
/// subtree) begins, or the node count at table end.
pub fn parse_subtree(table: &LsfTable, start: usize) -> Result<(Node, usize)> {
	table.check_node(start)?;

	let count = table.node_count();
	let mut open: Vec<usize> = Vec::new();
	let mut nodes: Vec<Node> = Vec::new();

	for idx in start..count {
		let record = table.check_node(idx)?;

		while let Some(&top) = open.last() {
			if i32::try_from(top).is_ok_and(|top| top == record.parent) {
				break;
			}
			open.pop();
			let Some(done) = nodes.pop() else {
				break;
			};
			match nodes.last_mut() {
				Some(parent) => parent.children.push(done),
				None => return Ok((done, idx)),
			}
		}

		let mut node = Node::new(table.name(record.name));
		decode_attrs(table, idx, &mut node);
		open.push(idx);
		nodes.push(node);
	}

	while nodes.len() > 1 {
		if let Some(done) = nodes.pop() {
			if let Some(parent) = nodes.last_mut() {
				parent.children.push(done);
			}
		}
	}

	// `start` was pushed on the first iteration, so exactly one node remains.
	let root = nodes.pop().unwrap_or_else(|| Node::new(table.node_name(start).unwrap_or_default()));
	Ok((root, count))
}

fn decode_attrs(table: &LsfTable, idx: usize, node: &mut Node) {
	for (attr_idx, attr) in attr_run(table, idx) {
		let name = table.name(attr.name);
		let value = decode_value(attr.type_tag, &attr.raw);
		if node.attrs.insert(name.into(), value).is_some() {
			debug!(node = idx, attr = attr_idx, name, "duplicate attribute name; keeping last");
		}
	}
}

/// Materialize the subtree rooted at `node_idx`.
pub fn materialize(table: &LsfTable, node_idx: usize) -> Result<Node> {
	parse_subtree(table, node_idx).map(|(node, _)| node)
}

/// Streaming iterator over a table's root forest, one subtree at a time.
pub struct ForestIter<'a> {
	table: &'a LsfTable,
	cursor: usize,
}

/// Iterate the root forest of `table` in file order.
pub fn forest(table: &LsfTable) -> ForestIter<'_> {
	ForestIter { table, cursor: 0 }
}

impl Iterator for ForestIter<'_> {
	type Item = Result<Node>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.cursor >= self.table.node_count() {
			return None;
		}

		match parse_subtree(self.table, self.cursor) {
			Ok((node, next)) => {
				self.cursor = next;
				Some(Ok(node))
			}
			Err(err) => {
				self.cursor = self.table.node_count();
				Some(Err(err))
			}
		}
	}
}

/// Rebuild every root-level tree in file order.
pub fn parse_whole_table(table: &LsfTable) -> Result<Vec<Node>> {
	forest(table).collect()
}

#[cfg(test)]
mod tests;
