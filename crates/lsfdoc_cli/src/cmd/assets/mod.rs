use std::path::PathBuf;

use lsfdoc::lsf::{AssetIndex, IndexOptions, LsfError, Result};
use serde::Serialize;

use crate::cmd::util::{EntityJson, emit_json, entity_label, load_tables};

#[derive(clap::Args)]
pub struct Args {
	#[arg(required = true)]
	pub files: Vec<PathBuf>,
	#[arg(long = "type")]
	pub asset_type: Option<String>,
	#[arg(long)]
	pub limit: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

/// Index bank files and print per-type counts, or one type's entries.
pub fn run(args: Args) -> Result<()> {
	let Args {
		files,
		asset_type,
		limit,
		json,
	} = args;

	let tables = load_tables(&files)?;
	let index = AssetIndex::build(&tables, &IndexOptions::default())?;

	let types: Vec<TypeJson> = index
		.types()
		.map(|(name, entities)| TypeJson {
			name: name.to_owned(),
			uuids: entities.len(),
			names: entities.name_count(),
		})
		.collect();

	let mut entries = Vec::new();
	if let Some(wanted) = asset_type.as_deref() {
		let entities = index.asset_type(wanted).ok_or(LsfError::EntityNotFound { key: wanted.to_owned() })?;
		entries = entities.uuid_entries();
		if let Some(limit) = limit {
			entries.truncate(limit);
		}
	}

	if json {
		let payload = AssetsJson {
			files: tables.ids().filter_map(|id| tables.label(id)).map(str::to_owned).collect(),
			types,
			entries: entries
				.iter()
				.map(|(uuid, entity)| EntryJson {
					uuid: (*uuid).to_owned(),
					entity: EntityJson::new(&tables, *entity),
				})
				.collect(),
		};
		return emit_json(&payload);
	}

	println!("files: {}", tables.len());
	println!("type\tuuids\tnames");
	for item in &types {
		println!("{}\t{}\t{}", item.name, item.uuids, item.names);
	}
	if let Some(wanted) = asset_type {
		println!();
		println!("{wanted}:");
		for (uuid, entity) in &entries {
			println!("  {uuid}\t{}", entity_label(&tables, *entity));
		}
	}

	Ok(())
}

#[derive(Serialize)]
struct TypeJson {
	name: String,
	uuids: usize,
	names: usize,
}

#[derive(Serialize)]
struct EntryJson {
	uuid: String,
	#[serde(flatten)]
	entity: EntityJson,
}

#[derive(Serialize)]
struct AssetsJson {
	files: Vec<String>,
	types: Vec<TypeJson>,
	entries: Vec<EntryJson>,
}

#[cfg(test)]
mod tests;
