use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lsf::compression::decode_bytes;
use crate::lsf::{LsfError, Result, build_sibling_pointers};

mod builder;

pub use builder::{TableBuilder, flatten_forest};

/// Index sentinel for "no node / no attribute".
pub const NONE: i32 = -1;

/// Per-file attribute chain discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
	/// Attributes are linked through explicit `next` indices.
	Wide,
	/// Attributes of one node form a contiguous run fenced by owner.
	Narrow,
}

impl Encoding {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Wide => "wide",
			Self::Narrow => "narrow",
		}
	}
}

/// One node-table record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
	/// Name id into the table's name list.
	pub name: u32,
	/// Parent node index or [`NONE`].
	pub parent: i32,
	/// Next same-parent sibling or [`NONE`].
	#[serde(default = "none_index")]
	pub next: i32,
	/// First attribute index or [`NONE`].
	pub first_attr: i32,
}

/// One attribute-table record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrRecord {
	/// Name id into the table's name list.
	pub name: u32,
	/// Raw storage tag byte.
	pub type_tag: u8,
	/// Next attribute of the same node, meaningful only for [`Encoding::Wide`].
	#[serde(default = "none_index")]
	pub next: i32,
	/// Owning node index.
	pub owner: i32,
	/// Little-endian value bytes.
	#[serde(default)]
	pub raw: Vec<u8>,
}

fn none_index() -> i32 {
	NONE
}

/// Serialized form of an already-decoded table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableSnapshot {
	/// Whether attributes use the wide (explicitly chained) layout.
	pub wide: bool,
	/// Name list addressed by record name ids.
	pub names: Vec<String>,
	/// Node records in pre-order.
	pub nodes: Vec<NodeRecord>,
	/// Attribute records.
	#[serde(default)]
	pub attrs: Vec<AttrRecord>,
}

/// Immutable node/attribute tables of one resource file.
///
/// The only mutable state is the derived sibling `next` array, filled once by
/// [`LsfTable::ensure_sibling_pointers`].
#[derive(Debug, Clone)]
pub struct LsfTable {
	encoding: Encoding,
	names: Vec<Box<str>>,
	name_ids: HashMap<Box<str>, u32>,
	nodes: Vec<NodeRecord>,
	attrs: Vec<AttrRecord>,
	siblings_built: bool,
}

impl LsfTable {
	/// Read a JSON table snapshot from disk, zstd-compressed or plain.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let raw = fs::read(path)?;
		let (compression, bytes) = decode_bytes(raw)?;
		debug!(compression = compression.as_str(), len = bytes.len(), "read table snapshot");
		Self::from_json_slice(&bytes)
	}

	/// Parse an uncompressed JSON table snapshot.
	pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
		let snapshot: TableSnapshot = serde_json::from_slice(bytes)?;
		Self::from_snapshot(snapshot)
	}

	/// Build a table from decoded records, checking every name id.
	pub fn from_snapshot(snapshot: TableSnapshot) -> Result<Self> {
		let TableSnapshot { wide, names, nodes, attrs } = snapshot;
		let max = names.len();
		let check = |idx: u32| {
			if usize::try_from(idx).is_ok_and(|idx| idx < max) {
				Ok(())
			} else {
				Err(LsfError::NameIndexOutOfRange { idx, max })
			}
		};
		for node in &nodes {
			check(node.name)?;
		}
		for attr in &attrs {
			check(attr.name)?;
		}

		let encoding = if wide { Encoding::Wide } else { Encoding::Narrow };
		Ok(Self::assemble(encoding, names, nodes, attrs))
	}

	pub(crate) fn assemble(encoding: Encoding, names: Vec<String>, nodes: Vec<NodeRecord>, attrs: Vec<AttrRecord>) -> Self {
		let names: Vec<Box<str>> = names.into_iter().map(String::into_boxed_str).collect();
		let mut name_ids = HashMap::with_capacity(names.len());
		for (idx, name) in names.iter().enumerate() {
			if let Ok(id) = u32::try_from(idx) {
				name_ids.entry(name.clone()).or_insert(id);
			}
		}

		Self {
			encoding,
			names,
			name_ids,
			nodes,
			attrs,
			siblings_built: false,
		}
	}

	/// Serializable copy of this table.
	pub fn snapshot(&self) -> TableSnapshot {
		TableSnapshot {
			wide: self.is_wide(),
			names: self.names.iter().map(|name| name.to_string()).collect(),
			nodes: self.nodes.clone(),
			attrs: self.attrs.clone(),
		}
	}

	/// Number of node records.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of attribute records.
	pub fn attr_count(&self) -> usize {
		self.attrs.len()
	}

	/// Number of entries in the name list.
	pub fn name_count(&self) -> usize {
		self.names.len()
	}

	/// Attribute chain discipline for this file.
	pub fn encoding(&self) -> Encoding {
		self.encoding
	}

	/// Whether attributes are explicitly chained.
	pub fn is_wide(&self) -> bool {
		self.encoding == Encoding::Wide
	}

	/// Node record at `idx`.
	pub fn node(&self, idx: usize) -> Option<&NodeRecord> {
		self.nodes.get(idx)
	}

	/// Attribute record at `idx`.
	pub fn attr(&self, idx: usize) -> Option<&AttrRecord> {
		self.attrs.get(idx)
	}

	/// Resolve a name id; ids are validated at construction.
	pub fn name(&self, id: u32) -> &str {
		usize::try_from(id).ok().and_then(|idx| self.names.get(idx)).map_or("<invalid>", |name| name.as_ref())
	}

	/// Look up the id of an exact name.
	pub fn find_name(&self, name: &str) -> Option<u32> {
		self.name_ids.get(name).copied()
	}

	/// Resolved name of node `idx`.
	pub fn node_name(&self, idx: usize) -> Option<&str> {
		self.node(idx).map(|node| self.name(node.name))
	}

	/// Parent of node `idx`, when it is a valid slot.
	pub fn parent(&self, idx: usize) -> Option<usize> {
		self.node(idx).and_then(|node| node_slot(node.parent, self.nodes.len()))
	}

	/// Fill the sibling `next` array from parent indices; no-op after the first call.
	pub fn ensure_sibling_pointers(&mut self) {
		if self.siblings_built {
			return;
		}

		let parents: Vec<i32> = self.nodes.iter().map(|node| node.parent).collect();
		for (node, next) in self.nodes.iter_mut().zip(build_sibling_pointers(&parents)) {
			node.next = next;
		}
		self.siblings_built = true;
		debug!(nodes = self.nodes.len(), "built sibling pointers");
	}

	/// Whether [`LsfTable::ensure_sibling_pointers`] has run.
	pub fn has_sibling_pointers(&self) -> bool {
		self.siblings_built
	}

	/// Next same-parent sibling of node `idx`.
	///
	/// A `next` index outside the node table ends the sibling run.
	pub fn next_sibling(&self, idx: usize) -> Result<Option<usize>> {
		if !self.siblings_built {
			return Err(LsfError::SiblingPointersMissing);
		}
		let node = self.node(idx).ok_or(LsfError::NodeIndexOutOfRange {
			idx,
			count: self.nodes.len(),
		})?;

		let next = node_slot(node.next, self.nodes.len());
		if next.is_none() && node.next >= 0 {
			debug!(node = idx, next = node.next, "sibling index out of range; ending run");
		}
		Ok(next)
	}

	/// Fail with a contract violation unless `idx` names a node.
	pub fn check_node(&self, idx: usize) -> Result<&NodeRecord> {
		self.node(idx).ok_or(LsfError::NodeIndexOutOfRange {
			idx,
			count: self.nodes.len(),
		})
	}

	/// Number of root-level nodes.
	pub fn root_count(&self) -> usize {
		self.nodes.iter().filter(|node| node.parent < 0).count()
	}
}

/// Map a stored index to a slot below `count`; negative and out-of-range values map to `None`.
pub(crate) fn node_slot(raw: i32, count: usize) -> Option<usize> {
	usize::try_from(raw).ok().filter(|idx| *idx < count)
}
