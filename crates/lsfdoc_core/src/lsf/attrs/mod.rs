use tracing::debug;

use crate::lsf::table::node_slot;
use crate::lsf::{AttrRecord, Encoding, LsfTable};

/// Iterator over one node's attribute records, in storage order.
///
/// Wide tables follow `next` from the node's first attribute until [`crate::lsf::NONE`],
/// ignoring `owner`. Narrow tables walk forward from the first attribute and stop at the first
/// record owned by another node. Out-of-range indices end the run.
pub struct AttrRun<'a> {
	table: &'a LsfTable,
	owner: usize,
	cursor: Option<usize>,
	yielded: usize,
}

/// Start an attribute run for node `node_idx`; unknown nodes yield nothing.
pub fn attr_run(table: &LsfTable, node_idx: usize) -> AttrRun<'_> {
	let cursor = table.node(node_idx).and_then(|node| {
		let slot = node_slot(node.first_attr, table.attr_count());
		if slot.is_none() && node.first_attr >= 0 {
			debug!(node = node_idx, first_attr = node.first_attr, "first attribute out of range");
		}
		slot
	});

	AttrRun {
		table,
		owner: node_idx,
		cursor,
		yielded: 0,
	}
}

impl<'a> Iterator for AttrRun<'a> {
	type Item = (usize, &'a AttrRecord);

	fn next(&mut self) -> Option<Self::Item> {
		let idx = self.cursor?;
		let attr = self.table.attr(idx)?;

		match self.table.encoding() {
			Encoding::Wide => {
				if self.yielded >= self.table.attr_count() {
					debug!(node = self.owner, attr = idx, "attribute chain loops; cutting");
					self.cursor = None;
					return None;
				}
				self.cursor = node_slot(attr.next, self.table.attr_count());
				if self.cursor.is_none() && attr.next >= 0 {
					debug!(node = self.owner, attr = idx, next = attr.next, "attribute next out of range; ending chain");
				}
			}
			Encoding::Narrow => {
				if node_slot(attr.owner, usize::MAX) != Some(self.owner) {
					self.cursor = None;
					return None;
				}
				self.cursor = Some(idx + 1).filter(|next| *next < self.table.attr_count());
			}
		}

		self.yielded += 1;
		Some((idx, attr))
	}
}

#[cfg(test)]
mod tests;
