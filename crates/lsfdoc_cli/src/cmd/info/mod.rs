use std::path::PathBuf;

use lsfdoc::lsf::{LsfTable, NONE, Result, build_sibling_pointers};
use serde::Serialize;

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print node/attribute counts, layout, and stored sibling pointer state.
pub fn run(args: Args) -> Result<()> {
	let Args { file: path, json } = args;

	let table = LsfTable::open(&path)?;
	let parents: Vec<i32> = (0..table.node_count()).filter_map(|idx| table.node(idx)).map(|node| node.parent).collect();
	let stored: Vec<i32> = (0..table.node_count()).filter_map(|idx| table.node(idx)).map(|node| node.next).collect();
	let stored_next = stored.iter().filter(|next| **next != NONE).count();
	let siblings_consistent = stored == build_sibling_pointers(&parents);

	let payload = InfoJson {
		path: path.display().to_string(),
		encoding: table.encoding().as_str(),
		nodes: table.node_count(),
		attrs: table.attr_count(),
		names: table.name_count(),
		roots: table.root_count(),
		stored_next,
		siblings_consistent,
	};

	if json {
		return emit_json(&payload);
	}

	println!("path: {}", payload.path);
	println!("encoding: {}", payload.encoding);
	println!("nodes: {}", payload.nodes);
	println!("attrs: {}", payload.attrs);
	println!("names: {}", payload.names);
	println!("roots: {}", payload.roots);
	println!("stored_next: {}", payload.stored_next);
	println!("siblings_consistent: {}", payload.siblings_consistent);

	Ok(())
}

#[derive(Serialize)]
struct InfoJson {
	path: String,
	encoding: &'static str,
	nodes: usize,
	attrs: usize,
	names: usize,
	roots: usize,
	stored_next: usize,
	siblings_consistent: bool,
}

#[cfg(test)]
mod tests;
