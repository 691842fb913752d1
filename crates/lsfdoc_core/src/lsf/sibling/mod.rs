use std::collections::HashMap;

use tracing::debug;

use crate::lsf::NONE;

/// Thread "next same-parent sibling" pointers from parent indices alone.
///
/// Single forward pass: each node becomes the `next` of the previous node seen under the same
/// parent (the root sentinel included), and every last child keeps [`NONE`]. Any negative
/// parent is the root sentinel. Existing pointers are never consulted, so the result only
/// depends on `parents` and rebuilding is idempotent.
pub fn build_sibling_pointers(parents: &[i32]) -> Vec<i32> {
	let mut next = vec![NONE; parents.len()];
	let mut last_child: HashMap<i32, usize> = HashMap::new();

	for (idx, parent) in parents.iter().copied().enumerate() {
		let key = if parent < 0 { NONE } else { parent };
		if usize::try_from(key).is_ok_and(|p| p >= parents.len()) {
			debug!(node = idx, parent = key, "parent index out of range; threading under its own key");
		}

		if let Some(prev) = last_child.insert(key, idx) {
			next[prev] = i32::try_from(idx).unwrap_or(NONE);
		}
	}

	next
}
