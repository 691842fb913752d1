use std::path::PathBuf;

use lsfdoc::lsf::{IndexOptions, InheritOptions, LsfError, NodeCache, Result, TemplateIndex, Value, resolve_attribute};
use serde::Serialize;

use crate::cmd::util::{EntityJson, emit_json, entity_label, load_tables, select_template};

#[derive(clap::Args)]
#[command(group(clap::ArgGroup::new("target").required(true).args(["name", "uuid"])))]
pub struct Args {
	#[arg(required = true)]
	pub files: Vec<PathBuf>,
	#[arg(long)]
	pub name: Option<String>,
	#[arg(long)]
	pub uuid: Option<String>,
	#[arg(long)]
	pub field: String,
	#[arg(long = "max-depth")]
	pub max_depth: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

/// Resolve `--field` on a template, falling back through its parent templates.
pub fn run(args: Args) -> Result<()> {
	let Args {
		files,
		name,
		uuid,
		field,
		max_depth,
		json,
	} = args;

	let tables = load_tables(&files)?;
	let index = TemplateIndex::build(&tables, &IndexOptions::default())?;
	let key = name.clone().or_else(|| uuid.clone()).unwrap_or_default();
	let entity = select_template(&index, name.as_deref(), uuid.as_deref())?.ok_or(LsfError::EntityNotFound { key })?;

	let mut opts = InheritOptions::default();
	if let Some(max_depth) = max_depth {
		opts.max_depth = max_depth;
	}

	let mut cache = NodeCache::new();
	let resolution = resolve_attribute(&tables, &index, &mut cache, entity, &field, &opts)?;
	let (value, chain) = (resolution.value, resolution.chain);

	if json {
		let payload = InheritJson {
			field: &field,
			entity: EntityJson::new(&tables, entity),
			value: value.as_ref(),
			chain: chain.iter().map(|item| EntityJson::new(&tables, *item)).collect(),
		};
		return emit_json(&payload);
	}

	println!("entity: {}", entity_label(&tables, entity));
	println!("field: {field}");
	match &value {
		Some(value) => println!("value: {}\t{value}", value.kind()),
		None => println!("value: -"),
	}
	println!("chain: {}", chain.len());
	for (step, item) in chain.iter().enumerate() {
		println!("  {step}\t{}", entity_label(&tables, *item));
	}

	Ok(())
}

#[derive(Serialize)]
struct InheritJson<'a> {
	field: &'a str,
	entity: EntityJson,
	value: Option<&'a Value>,
	chain: Vec<EntityJson>,
}
