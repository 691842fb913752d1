use std::path::PathBuf;

use lsfdoc::lsf::{EntityRef, LsfError, Result, TableSet, TemplateIndex};
use serde::Serialize;

/// Print a payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(payload)?;
	println!("{text}");
	Ok(())
}

/// Parse `A` or `A,B` into one or two non-empty field names.
pub(crate) fn parse_field_list(value: &str) -> Result<Vec<String>> {
	let fields: Vec<String> = value.split(',').map(|item| item.trim().to_owned()).collect();
	if fields.len() > 2 || fields.iter().any(String::is_empty) {
		return Err(LsfError::InvalidFieldList { value: value.to_owned() });
	}
	Ok(fields)
}

/// Load snapshot files into one set, in argument order.
pub(crate) fn load_tables(paths: &[PathBuf]) -> Result<TableSet> {
	let mut tables = TableSet::new();
	for path in paths {
		tables.open(path)?;
	}
	Ok(tables)
}

/// Template selected by `--name` or `--uuid`.
pub(crate) fn select_template(index: &TemplateIndex, name: Option<&str>, uuid: Option<&str>) -> Result<Option<EntityRef>> {
	match (name, uuid) {
		(Some(name), _) => index.by_name(name).map(Some).ok_or(LsfError::EntityNotFound { key: name.to_owned() }),
		(None, Some(uuid)) => index.by_uuid(uuid).map(Some).ok_or(LsfError::EntityNotFound { key: uuid.to_owned() }),
		(None, None) => Ok(None),
	}
}

/// `label:node` rendering of an entity reference.
pub(crate) fn entity_label(tables: &TableSet, entity: EntityRef) -> String {
	format!("{}:{}", tables.label(entity.table).unwrap_or("?"), entity.node)
}

#[derive(Serialize)]
pub(crate) struct EntityJson {
	pub(crate) table: usize,
	pub(crate) file: String,
	pub(crate) node: usize,
}

impl EntityJson {
	pub(crate) fn new(tables: &TableSet, entity: EntityRef) -> Self {
		Self {
			table: entity.table,
			file: tables.label(entity.table).unwrap_or_default().to_owned(),
			node: entity.node,
		}
	}
}
