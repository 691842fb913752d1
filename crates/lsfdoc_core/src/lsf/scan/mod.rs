use tracing::debug;

use crate::lsf::{LsfError, LsfTable, Result, Value, attr_run, decode_value};

/// Counters reported by a selective scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
	/// Sibling nodes visited.
	pub visited: usize,
	/// Siblings where every requested field was found.
	pub matched: usize,
}

/// Iterator over a sibling run, following sibling pointers without descending.
pub struct Siblings<'a> {
	table: &'a LsfTable,
	cursor: Option<usize>,
}

/// Iterate `start` and each following same-parent sibling.
///
/// Requires sibling pointers; fails for an out-of-range `start`.
pub fn siblings(table: &LsfTable, start: usize) -> Result<Siblings<'_>> {
	table.check_node(start)?;
	if !table.has_sibling_pointers() {
		return Err(LsfError::SiblingPointersMissing);
	}
	Ok(Siblings { table, cursor: Some(start) })
}

impl Iterator for Siblings<'_> {
	type Item = usize;

	fn next(&mut self) -> Option<usize> {
		let idx = self.cursor?;
		// Pre-order layout means a valid sibling always lies further down the table.
		self.cursor = match self.table.next_sibling(idx) {
			Ok(Some(next)) if next > idx => Some(next),
			Ok(Some(next)) => {
				debug!(node = idx, next, "sibling pointer does not advance; ending run");
				None
			}
			_ => None,
		};
		Some(idx)
	}
}

/// First direct child of `parent`, relying on pre-order layout (it is `parent + 1`).
pub fn first_child(table: &LsfTable, parent: usize) -> Option<usize> {
	let child = parent.checked_add(1)?;
	(table.parent(child) == Some(parent)).then_some(child)
}

/// Scan a sibling run for two named fields without materializing any subtree.
///
/// For each sibling from `container_start`, only that node's own attribute run is read, and
/// reading stops as soon as both fields are seen. A field repeated on one node reports its first
/// occurrence. `on_found(node, a, b)` runs only for
/// siblings carrying both; others are skipped.
pub fn scan_unique_objects<F>(table: &LsfTable, container_start: usize, fields: [&str; 2], mut on_found: F) -> Result<ScanStats>
where
	F: FnMut(usize, Value, Value),
{
	let ids = fields.map(|name| table.find_name(name));
	let stats = scan_fields(table, container_start, &ids, |idx, mut values| {
		let b = values.pop().unwrap_or(Value::None);
		let a = values.pop().unwrap_or(Value::None);
		on_found(idx, a, b);
	})?;
	debug!(start = container_start, a = fields[0], b = fields[1], visited = stats.visited, matched = stats.matched, "selective scan finished");
	Ok(stats)
}

/// Single-field form of [`scan_unique_objects`].
pub fn scan_field<F>(table: &LsfTable, container_start: usize, field: &str, mut on_found: F) -> Result<ScanStats>
where
	F: FnMut(usize, Value),
{
	let ids = [table.find_name(field)];
	scan_fields(table, container_start, &ids, |idx, mut values| {
		on_found(idx, values.pop().unwrap_or(Value::None));
	})
}

fn scan_fields<F>(table: &LsfTable, container_start: usize, ids: &[Option<u32>], mut on_found: F) -> Result<ScanStats>
where
	F: FnMut(usize, Vec<Value>),
{
	let mut stats = ScanStats::default();
	// A field missing from the name list cannot appear on any node.
	let wanted: Option<Vec<u32>> = ids.iter().copied().collect();

	for idx in siblings(table, container_start)? {
		stats.visited += 1;
		let Some(wanted) = &wanted else {
			continue;
		};

		let mut found: Vec<Option<Value>> = vec![None; wanted.len()];
		let mut remaining = wanted.len();
		for (_, attr) in attr_run(table, idx) {
			for (slot, id) in wanted.iter().enumerate() {
				// First occurrence wins; later duplicates are never read.
				if attr.name != *id || found[slot].is_some() {
					continue;
				}
				remaining -= 1;
				found[slot] = Some(decode_value(attr.type_tag, &attr.raw));
			}
			if remaining == 0 {
				break;
			}
		}

		if remaining == 0 {
			stats.matched += 1;
			on_found(idx, found.into_iter().flatten().collect());
		}
	}

	Ok(stats)
}

#[cfg(test)]
mod tests;
