use std::path::PathBuf;

use lsfdoc::lsf::{LsfTable, Node, Result, forest, materialize};
use serde::Serialize;

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long)]
	pub node: Option<usize>,
	#[arg(long)]
	pub depth: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

/// Rebuild and print the whole forest or the subtree at `--node`.
pub fn run(args: Args) -> Result<()> {
	let Args { file: path, node, depth, json } = args;

	let table = LsfTable::open(&path)?;
	let mut roots = match node {
		Some(idx) => vec![materialize(&table, idx)?],
		None => forest(&table).collect::<Result<Vec<_>>>()?,
	};
	if let Some(depth) = depth {
		for root in &mut roots {
			prune(root, depth);
		}
	}

	if json {
		return emit_json(&TreeJson {
			path: path.display().to_string(),
			node,
			roots: &roots,
		});
	}

	println!("path: {}", path.display());
	println!("roots: {}", roots.len());
	for root in &roots {
		print_node(root, 0);
	}

	Ok(())
}

fn prune(node: &mut Node, depth: usize) {
	if depth == 0 {
		node.children.clear();
		return;
	}
	for child in &mut node.children {
		prune(child, depth - 1);
	}
}

fn print_node(node: &Node, indent: usize) {
	let pad = "  ".repeat(indent);
	println!("{pad}{}", node.name);
	for (name, value) in &node.attrs {
		println!("{pad}  @{name}\t{}\t{value}", value.kind());
	}
	for child in &node.children {
		print_node(child, indent + 1);
	}
}

#[derive(Serialize)]
struct TreeJson<'a> {
	path: String,
	node: Option<usize>,
	roots: &'a [Node],
}

#[cfg(test)]
mod tests;
