//! Public library API for rebuilding and indexing Larian `.lsf` resource trees.

/// Flat-table access, tree reconstruction, selective scanning, and entity indexing.
pub mod lsf;
