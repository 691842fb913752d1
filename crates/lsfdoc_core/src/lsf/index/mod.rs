use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::lsf::{LsfError, LsfTable, Result, Value, first_child, scan_unique_objects, siblings};

/// Position of a table inside a [`TableSet`], assigned in load order.
pub type TableId = usize;

/// `(source table, node index)` pair addressing one indexed entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityRef {
	/// Table holding the entity.
	pub table: TableId,
	/// Node index of the entity inside its table.
	pub node: usize,
}

/// Arena of loaded tables; index entries point into it by [`TableId`].
#[derive(Debug, Default)]
pub struct TableSet {
	tables: Vec<LsfTable>,
	labels: Vec<Box<str>>,
}

impl TableSet {
	/// Create an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a table, building its sibling pointers, and return its id.
	pub fn push(&mut self, label: impl Into<Box<str>>, mut table: LsfTable) -> TableId {
		table.ensure_sibling_pointers();
		self.tables.push(table);
		self.labels.push(label.into());
		self.tables.len() - 1
	}

	/// Load a snapshot from disk and add it, labelled by its path.
	pub fn open(&mut self, path: impl AsRef<Path>) -> Result<TableId> {
		let path = path.as_ref();
		let table = LsfTable::open(path)?;
		Ok(self.push(path.display().to_string(), table))
	}

	/// Table by id.
	pub fn table(&self, id: TableId) -> Result<&LsfTable> {
		self.tables.get(id).ok_or(LsfError::UnknownTable { table: id })
	}

	/// Label given when the table was added.
	pub fn label(&self, id: TableId) -> Option<&str> {
		self.labels.get(id).map(|label| label.as_ref())
	}

	/// Number of loaded tables.
	pub fn len(&self) -> usize {
		self.tables.len()
	}

	/// Whether no tables are loaded.
	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}

	/// All table ids in load order.
	pub fn ids(&self) -> std::ops::Range<TableId> {
		0..self.tables.len()
	}
}

/// Name- and UUID-keyed entity maps; later inserts replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
	by_uuid: HashMap<Box<str>, EntityRef>,
	by_name: HashMap<Box<str>, EntityRef>,
}

impl EntityIndex {
	/// Record one entity under both keys, replacing previous holders.
	pub fn insert(&mut self, name: &str, uuid: &str, entity: EntityRef) {
		self.by_uuid.insert(uuid.into(), entity);
		self.by_name.insert(name.into(), entity);
	}

	/// Entity by canonical UUID text.
	pub fn by_uuid(&self, uuid: &str) -> Option<EntityRef> {
		self.by_uuid.get(uuid).copied()
	}

	/// Entity by exact name.
	pub fn by_name(&self, name: &str) -> Option<EntityRef> {
		self.by_name.get(name).copied()
	}

	/// Number of distinct UUID keys.
	pub fn len(&self) -> usize {
		self.by_uuid.len()
	}

	/// Number of distinct name keys.
	pub fn name_count(&self) -> usize {
		self.by_name.len()
	}

	/// Whether nothing has been indexed.
	pub fn is_empty(&self) -> bool {
		self.by_uuid.is_empty()
	}

	/// UUID entries sorted by key.
	pub fn uuid_entries(&self) -> Vec<(&str, EntityRef)> {
		sorted_entries(&self.by_uuid)
	}

	/// Name entries sorted by key.
	pub fn name_entries(&self) -> Vec<(&str, EntityRef)> {
		sorted_entries(&self.by_name)
	}
}

fn sorted_entries(map: &HashMap<Box<str>, EntityRef>) -> Vec<(&str, EntityRef)> {
	let mut out: Vec<(&str, EntityRef)> = map.iter().map(|(key, entity)| (key.as_ref(), *entity)).collect();
	out.sort_unstable_by(|a, b| a.0.cmp(b.0));
	out
}

/// Field names and layout knobs for indexing passes.
#[derive(Debug, Clone)]
pub struct IndexOptions {
	/// Asset entity name field.
	pub asset_name_field: Box<str>,
	/// Asset entity UUID field.
	pub asset_key_field: Box<str>,
	/// Root-template name field.
	pub template_name_field: Box<str>,
	/// Root-template UUID field.
	pub template_key_field: Box<str>,
	/// Suffix stripped from bank container names to form the asset type.
	pub bank_suffix: Box<str>,
	/// Node index of the first root template (first child of the root container).
	pub template_start: usize,
}

impl Default for IndexOptions {
	fn default() -> Self {
		Self {
			asset_name_field: "Name".into(),
			asset_key_field: "ID".into(),
			template_name_field: "Name".into(),
			template_key_field: "MapKey".into(),
			bank_suffix: "Bank".into(),
			template_start: 1,
		}
	}
}

/// One scanned `(name, uuid) -> entity` insertion, applied at merge time.
#[derive(Debug, Clone)]
struct Candidate {
	bucket: Box<str>,
	name: Box<str>,
	uuid: Box<str>,
	entity: EntityRef,
}

/// Per-type entity indices built from asset bank tables.
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
	types: BTreeMap<Box<str>, EntityIndex>,
}

impl AssetIndex {
	/// Index every table of `tables`, merging in load order.
	pub fn build(tables: &TableSet, opts: &IndexOptions) -> Result<Self> {
		let mut index = Self::default();
		let scanned = scan_tables(tables, |id| scan_asset_banks(tables, id, opts))?;
		for candidates in scanned {
			index.merge(candidates);
		}
		Ok(index)
	}

	/// Index one more table; its entries win over everything indexed before.
	pub fn add_table(&mut self, tables: &TableSet, id: TableId, opts: &IndexOptions) -> Result<()> {
		let candidates = scan_asset_banks(tables, id, opts)?;
		self.merge(candidates);
		Ok(())
	}

	fn merge(&mut self, candidates: Vec<Candidate>) {
		for item in candidates {
			self.types.entry(item.bucket).or_default().insert(&item.name, &item.uuid, item.entity);
		}
	}

	/// Entity index for one asset type (for example `Visual`).
	pub fn asset_type(&self, name: &str) -> Option<&EntityIndex> {
		self.types.get(name)
	}

	/// All asset types with their indices, sorted by type name.
	pub fn types(&self) -> impl Iterator<Item = (&str, &EntityIndex)> {
		self.types.iter().map(|(name, index)| (name.as_ref(), index))
	}

	/// Number of asset types seen.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	/// Whether no asset type was seen.
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}
}

/// Root-template index across template tables.
#[derive(Debug, Clone, Default)]
pub struct TemplateIndex {
	entities: EntityIndex,
}

impl TemplateIndex {
	/// Index every table of `tables`, merging in load order.
	pub fn build(tables: &TableSet, opts: &IndexOptions) -> Result<Self> {
		let mut index = Self::default();
		let scanned = scan_tables(tables, |id| scan_root_templates(tables, id, opts))?;
		for candidates in scanned {
			index.merge(candidates);
		}
		Ok(index)
	}

	/// Index one more table; its entries win over everything indexed before.
	pub fn add_table(&mut self, tables: &TableSet, id: TableId, opts: &IndexOptions) -> Result<()> {
		let candidates = scan_root_templates(tables, id, opts)?;
		self.merge(candidates);
		Ok(())
	}

	fn merge(&mut self, candidates: Vec<Candidate>) {
		for item in candidates {
			self.entities.insert(&item.name, &item.uuid, item.entity);
		}
	}

	/// Template by UUID.
	pub fn by_uuid(&self, uuid: &str) -> Option<EntityRef> {
		self.entities.by_uuid(uuid)
	}

	/// Template by name.
	pub fn by_name(&self, name: &str) -> Option<EntityRef> {
		self.entities.by_name(name)
	}

	/// Underlying entity maps.
	pub fn entities(&self) -> &EntityIndex {
		&self.entities
	}
}

#[cfg(feature = "parallel")]
fn scan_tables<F>(tables: &TableSet, scan: F) -> Result<Vec<Vec<Candidate>>>
where
	F: Fn(TableId) -> Result<Vec<Candidate>> + Send + Sync,
{
	use rayon::prelude::*;

	// Indexed collect keeps load order, so the sequential merge stays last-write-wins.
	tables.ids().into_par_iter().map(scan).collect()
}

#[cfg(not(feature = "parallel"))]
fn scan_tables<F>(tables: &TableSet, scan: F) -> Result<Vec<Vec<Candidate>>>
where
	F: Fn(TableId) -> Result<Vec<Candidate>>,
{
	tables.ids().map(scan).collect()
}

fn scan_asset_banks(tables: &TableSet, id: TableId, opts: &IndexOptions) -> Result<Vec<Candidate>> {
	let table = tables.table(id)?;
	let mut out = Vec::new();
	if table.node_count() == 0 {
		return Ok(out);
	}

	let suffix: &str = &opts.bank_suffix;
	for bank in siblings(table, 0)? {
		let bank_name = table.node_name(bank).unwrap_or_default();
		let bucket: Box<str> = bank_name.strip_suffix(suffix).unwrap_or(bank_name).into();
		let Some(first) = first_child(table, bank) else {
			continue;
		};

		scan_unique_objects(table, first, [opts.asset_name_field.as_ref(), opts.asset_key_field.as_ref()], |node, name, uuid| {
			if let Some((name, uuid)) = string_keys(id, node, &name, &uuid) {
				out.push(Candidate {
					bucket: bucket.clone(),
					name,
					uuid,
					entity: EntityRef { table: id, node },
				});
			}
		})?;
	}

	info!(table = tables.label(id).unwrap_or("-"), entries = out.len(), "indexed asset banks");
	Ok(out)
}

fn scan_root_templates(tables: &TableSet, id: TableId, opts: &IndexOptions) -> Result<Vec<Candidate>> {
	let table = tables.table(id)?;
	let mut out = Vec::new();
	if opts.template_start >= table.node_count() {
		return Ok(out);
	}

	scan_unique_objects(table, opts.template_start, [opts.template_name_field.as_ref(), opts.template_key_field.as_ref()], |node, name, uuid| {
		if let Some((name, uuid)) = string_keys(id, node, &name, &uuid) {
			out.push(Candidate {
				bucket: Box::from(""),
				name,
				uuid,
				entity: EntityRef { table: id, node },
			});
		}
	})?;

	info!(table = tables.label(id).unwrap_or("-"), entries = out.len(), "indexed root templates");
	Ok(out)
}

fn string_keys(table: TableId, node: usize, name: &Value, uuid: &Value) -> Option<(Box<str>, Box<str>)> {
	match (name.as_str(), uuid.as_str()) {
		(Some(name), Some(uuid)) => Some((name.into(), uuid.into())),
		_ => {
			debug!(table, node, name = name.kind(), key = uuid.kind(), "skipping entity with non-string keys");
			None
		}
	}
}
