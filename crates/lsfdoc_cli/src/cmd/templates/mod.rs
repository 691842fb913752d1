use std::path::PathBuf;

use lsfdoc::lsf::{IndexOptions, Node, NodeCache, Result, TemplateIndex};
use serde::Serialize;

use crate::cmd::util::{EntityJson, emit_json, entity_label, load_tables, select_template};

#[derive(clap::Args)]
pub struct Args {
	#[arg(required = true)]
	pub files: Vec<PathBuf>,
	#[arg(long, conflicts_with = "uuid")]
	pub name: Option<String>,
	#[arg(long)]
	pub uuid: Option<String>,
	#[arg(long)]
	pub limit: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

/// Index root templates; list them, or print the one matching `--name`/`--uuid`.
pub fn run(args: Args) -> Result<()> {
	let Args {
		files,
		name,
		uuid,
		limit,
		json,
	} = args;

	let tables = load_tables(&files)?;
	let index = TemplateIndex::build(&tables, &IndexOptions::default())?;

	if let Some(entity) = select_template(&index, name.as_deref(), uuid.as_deref())? {
		let mut cache = NodeCache::new();
		let node = cache.get_or_materialize(&tables, entity)?;

		if json {
			return emit_json(&TemplateJson {
				entity: EntityJson::new(&tables, entity),
				template: node,
			});
		}

		println!("entity: {}", entity_label(&tables, entity));
		println!("name: {}", node.name);
		for (attr, value) in &node.attrs {
			println!("  @{attr}\t{}\t{value}", value.kind());
		}
		println!("children: {}", node.children.len());
		return Ok(());
	}

	let mut entries = index.entities().uuid_entries();
	let total = entries.len();
	if let Some(limit) = limit {
		entries.truncate(limit);
	}

	if json {
		let payload = TemplatesJson {
			total,
			names: index.entities().name_count(),
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

	println!("templates: {total}");
	println!("uuid\tentity");
	for (uuid, entity) in &entries {
		println!("{uuid}\t{}", entity_label(&tables, *entity));
	}

	Ok(())
}

#[derive(Serialize)]
struct TemplateJson<'a> {
	#[serde(flatten)]
	entity: EntityJson,
	template: &'a Node,
}

#[derive(Serialize)]
struct EntryJson {
	uuid: String,
	#[serde(flatten)]
	entity: EntityJson,
}

#[derive(Serialize)]
struct TemplatesJson {
	total: usize,
	names: usize,
	entries: Vec<EntryJson>,
}
