use std::collections::HashMap;

use crate::lsf::table::{AttrRecord, Encoding, LsfTable, NONE, NodeRecord};
use crate::lsf::{Node, Value, encode_value};

struct PendingAttr {
	owner: usize,
	name: u32,
	type_tag: u8,
	raw: Vec<u8>,
}

/// Incremental constructor for well-formed tables.
///
/// Nodes must be added in pre-order (every parent before its descendants, each subtree
/// contiguous). Attributes may be added in any order; [`TableBuilder::finish`] lays them out
/// as owner-fenced runs (narrow) or per-node chains in insertion order (wide). Sibling
/// pointers are left unset.
pub struct TableBuilder {
	encoding: Encoding,
	names: Vec<String>,
	name_ids: HashMap<String, u32>,
	nodes: Vec<NodeRecord>,
	attrs: Vec<PendingAttr>,
}

impl TableBuilder {
	/// Start an empty table with the given attribute discipline.
	pub fn new(encoding: Encoding) -> Self {
		Self {
			encoding,
			names: Vec::new(),
			name_ids: HashMap::new(),
			nodes: Vec::new(),
			attrs: Vec::new(),
		}
	}

	fn intern(&mut self, name: &str) -> u32 {
		if let Some(id) = self.name_ids.get(name) {
			return *id;
		}
		let id = u32::try_from(self.names.len()).unwrap_or(u32::MAX);
		self.names.push(name.to_owned());
		self.name_ids.insert(name.to_owned(), id);
		id
	}

	/// Append a node and return its index.
	pub fn node(&mut self, name: &str, parent: Option<usize>) -> usize {
		let name = self.intern(name);
		let idx = self.nodes.len();
		self.nodes.push(NodeRecord {
			name,
			parent: parent.map_or(NONE, to_index),
			next: NONE,
			first_attr: NONE,
		});
		idx
	}

	/// Attach an encoded value to `owner`.
	pub fn attr(&mut self, owner: usize, name: &str, value: &Value) -> &mut Self {
		let (type_tag, raw) = encode_value(value);
		self.attr_raw(owner, name, type_tag, raw)
	}

	/// Attach a raw tag and payload to `owner`.
	pub fn attr_raw(&mut self, owner: usize, name: &str, type_tag: u8, raw: Vec<u8>) -> &mut Self {
		let name = self.intern(name);
		self.attrs.push(PendingAttr { owner, name, type_tag, raw });
		self
	}

	/// Lay out attributes and produce the table.
	pub fn finish(self) -> LsfTable {
		let Self {
			encoding,
			names,
			mut nodes,
			mut attrs,
			..
		} = self;

		if encoding == Encoding::Narrow {
			attrs.sort_by_key(|item| item.owner);
		}

		let mut records: Vec<AttrRecord> = Vec::with_capacity(attrs.len());
		let mut last_by_owner: HashMap<usize, usize> = HashMap::new();
		for (idx, item) in attrs.into_iter().enumerate() {
			if let Some(node) = nodes.get_mut(item.owner) {
				if node.first_attr == NONE {
					node.first_attr = to_index(idx);
				}
			}
			if encoding == Encoding::Wide {
				if let Some(prev) = last_by_owner.insert(item.owner, idx) {
					records[prev].next = to_index(idx);
				}
			}
			records.push(AttrRecord {
				name: item.name,
				type_tag: item.type_tag,
				next: NONE,
				owner: to_index(item.owner),
				raw: item.raw,
			});
		}

		LsfTable::assemble(encoding, names, nodes, records)
	}
}

fn to_index(idx: usize) -> i32 {
	i32::try_from(idx).unwrap_or(NONE)
}

/// Flatten a materialized forest into pre-order tables.
///
/// Attributes are written in each node's map order.
pub fn flatten_forest(forest: &[Node], encoding: Encoding) -> LsfTable {
	let mut builder = TableBuilder::new(encoding);
	for root in forest {
		push_subtree(&mut builder, root, None);
	}
	builder.finish()
}

fn push_subtree(builder: &mut TableBuilder, node: &Node, parent: Option<usize>) {
	let idx = builder.node(&node.name, parent);
	for (name, value) in &node.attrs {
		builder.attr(idx, name, value);
	}
	for child in &node.children {
		push_subtree(builder, child, Some(idx));
	}
}
