use std::path::PathBuf;

use lsfdoc::lsf::{LsfError, LsfTable, Result, ScanStats, Value, scan_field, scan_unique_objects};
use serde::Serialize;

use crate::cmd::util::{emit_json, parse_field_list};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long)]
	pub start: usize,
	#[arg(long)]
	pub fields: String,
	#[arg(long)]
	pub limit: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

/// Read one or two fields from every sibling in the run starting at `--start`.
pub fn run(args: Args) -> Result<()> {
	let Args {
		file: path,
		start,
		fields,
		limit,
		json,
	} = args;

	let fields = parse_field_list(&fields)?;
	let mut table = LsfTable::open(&path)?;
	table.ensure_sibling_pointers();

	let mut rows: Vec<(usize, Vec<Value>)> = Vec::new();
	let stats: ScanStats = match fields.as_slice() {
		[a, b] => scan_unique_objects(&table, start, [a.as_str(), b.as_str()], |node, a, b| rows.push((node, vec![a, b])))?,
		[a, ..] => scan_field(&table, start, a, |node, value| rows.push((node, vec![value])))?,
		[] => return Err(LsfError::InvalidFieldList { value: String::new() }),
	};
	if let Some(limit) = limit {
		rows.truncate(limit);
	}

	if json {
		let payload = ScanJson {
			path: path.display().to_string(),
			start,
			fields: &fields,
			visited: stats.visited,
			matched: stats.matched,
			rows: rows
				.iter()
				.map(|(node, values)| RowJson {
					node: *node,
					name: table.node_name(*node).unwrap_or_default(),
					values,
				})
				.collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("start: {start}");
	println!("fields: {}", fields.join(","));
	println!("visited: {}", stats.visited);
	println!("matched: {}", stats.matched);
	println!("node\tname\t{}", fields.join("\t"));
	for (node, values) in &rows {
		let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
		println!("{node}\t{}\t{}", table.node_name(*node).unwrap_or("-"), rendered.join("\t"));
	}

	Ok(())
}

#[derive(Serialize)]
struct RowJson<'a> {
	node: usize,
	name: &'a str,
	values: &'a [Value],
}

#[derive(Serialize)]
struct ScanJson<'a> {
	path: String,
	start: usize,
	fields: &'a [String],
	visited: usize,
	matched: usize,
	rows: Vec<RowJson<'a>>,
}
