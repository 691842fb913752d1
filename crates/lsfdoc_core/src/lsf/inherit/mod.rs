use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::lsf::{EntityRef, LsfError, Node, Result, TableSet, TemplateIndex, Value, materialize};

/// Parent-template walk settings.
#[derive(Debug, Clone)]
pub struct InheritOptions {
	/// Attribute holding the parent template UUID.
	pub parent_field: Box<str>,
	/// Maximum number of templates visited in one walk.
	pub max_depth: usize,
}

impl Default for InheritOptions {
	fn default() -> Self {
		Self {
			parent_field: "ParentTemplateId".into(),
			max_depth: 256,
		}
	}
}

/// Outcome of one attribute walk: the value, if any, and every template visited.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
	/// Value found on the nearest template carrying the field.
	pub value: Option<Value>,
	/// Templates visited in order; the last one holds `value` when it is present.
	pub chain: Vec<EntityRef>,
}

/// Call-site cache of materialized entities, filled on first access.
///
/// Plain single-owner state: share it across threads only behind external synchronization.
#[derive(Debug, Default)]
pub struct NodeCache {
	nodes: HashMap<EntityRef, Node>,
}

impl NodeCache {
	/// Create an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Cached node for `entity`, materializing it on first use.
	pub fn get_or_materialize(&mut self, tables: &TableSet, entity: EntityRef) -> Result<&Node> {
		match self.nodes.entry(entity) {
			Entry::Occupied(slot) => Ok(slot.into_mut()),
			Entry::Vacant(slot) => {
				let node = materialize(tables.table(entity.table)?, entity.node)?;
				Ok(slot.insert(node))
			}
		}
	}

	/// Number of cached entities.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether nothing has been materialized yet.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// Look up `field` on `entity`, falling back along its parent-template chain.
///
/// Returns `Ok(None)` when the chain ends without the field, including when a parent UUID is
/// empty or not indexed. Reaching a template twice fails with [`LsfError::CyclicInheritance`].
pub fn inherited_attribute(
	tables: &TableSet,
	templates: &TemplateIndex,
	cache: &mut NodeCache,
	entity: EntityRef,
	field: &str,
	opts: &InheritOptions,
) -> Result<Option<Value>> {
	resolve_attribute(tables, templates, cache, entity, field, opts).map(|resolution| resolution.value)
}

/// Like [`inherited_attribute`], also reporting the templates the walk visited.
pub fn resolve_attribute(tables: &TableSet, templates: &TemplateIndex, cache: &mut NodeCache, entity: EntityRef, field: &str, opts: &InheritOptions) -> Result<Resolution> {
	let mut chain = Vec::new();
	let value = walk_chain(tables, templates, cache, entity, opts, |item, node| {
		chain.push(item);
		node.attr(field).cloned()
	})?;
	Ok(Resolution { value, chain })
}

/// Entities visited by the full parent-template walk from `entity`, in order.
pub fn inheritance_chain(tables: &TableSet, templates: &TemplateIndex, cache: &mut NodeCache, entity: EntityRef, opts: &InheritOptions) -> Result<Vec<EntityRef>> {
	let mut chain = Vec::new();
	walk_chain(tables, templates, cache, entity, opts, |item, _| {
		chain.push(item);
		None::<()>
	})?;
	Ok(chain)
}

fn walk_chain<T, F>(tables: &TableSet, templates: &TemplateIndex, cache: &mut NodeCache, entity: EntityRef, opts: &InheritOptions, mut visit: F) -> Result<Option<T>>
where
	F: FnMut(EntityRef, &Node) -> Option<T>,
{
	// Keyed by entity: a UUID shadowed by a later file does not lead back to the start.
	let mut visited: HashSet<EntityRef> = HashSet::from([entity]);
	let mut current = entity;

	for _ in 0..opts.max_depth {
		let node = cache.get_or_materialize(tables, current)?;
		if let Some(found) = visit(current, node) {
			return Ok(Some(found));
		}

		let Some(parent) = node.attr(&opts.parent_field) else {
			return Ok(None);
		};
		let Some(parent_key) = parent.as_str() else {
			debug!(table = current.table, node = current.node, kind = parent.kind(), "parent template id is not a string");
			return Ok(None);
		};
		if parent_key.is_empty() {
			return Ok(None);
		}

		let Some(next) = templates.by_uuid(parent_key) else {
			debug!(table = current.table, node = current.node, parent = parent_key, "parent template not indexed");
			return Ok(None);
		};
		if !visited.insert(next) {
			return Err(LsfError::CyclicInheritance { uuid: parent_key.to_owned() });
		}
		current = next;
	}

	Err(LsfError::InheritanceDepthExceeded { max_depth: opts.max_depth })
}
