use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, LsfError>;

/// Errors produced while loading, rebuilding, scanning, and indexing LSF tables.
#[derive(Debug, Error)]
pub enum LsfError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Table snapshot was not valid JSON for the expected layout.
	#[error("snapshot json: {0}")]
	Json(#[from] serde_json::Error),
	/// Unknown leading snapshot magic.
	#[error("unsupported compression or not a table snapshot (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Length prefix inside a value payload was negative.
	#[error("negative length prefix {len} at offset {at}")]
	NegativeLength {
		/// Parsed signed length.
		len: i32,
		/// Byte offset of the prefix.
		at: usize,
	},
	/// Nested payload exceeded its depth ceiling.
	#[error("value nesting too deep (max={max_depth})")]
	NestingTooDeep {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// A record referenced a name outside the name list.
	#[error("name index out of range: idx={idx}, max={max}")]
	NameIndexOutOfRange {
		/// Offending name id.
		idx: u32,
		/// Number of names in the table.
		max: usize,
	},
	/// Caller asked for a node slot that does not exist.
	#[error("node index out of range: idx={idx}, count={count}")]
	NodeIndexOutOfRange {
		/// Requested node index.
		idx: usize,
		/// Number of nodes in the table.
		count: usize,
	},
	/// Sibling traversal was requested before `ensure_sibling_pointers` ran.
	#[error("sibling pointers have not been built for this table")]
	SiblingPointersMissing,
	/// Entity reference named a table id that is not loaded.
	#[error("unknown table id {table}")]
	UnknownTable {
		/// Requested table id.
		table: usize,
	},
	/// Parent-template walk revisited a UUID.
	#[error("cyclic inheritance detected at {uuid}")]
	CyclicInheritance {
		/// UUID seen twice along the chain.
		uuid: String,
	},
	/// Parent-template walk exceeded its configured length.
	#[error("inheritance depth exceeded (max={max_depth})")]
	InheritanceDepthExceeded {
		/// Configured depth ceiling.
		max_depth: usize,
	},
	/// Requested entity key is not present in an index.
	#[error("entity not found: {key}")]
	EntityNotFound {
		/// Name or UUID that was looked up.
		key: String,
	},
	/// CLI field list argument was invalid.
	#[error("invalid field list: {value}")]
	InvalidFieldList {
		/// User-provided field list.
		value: String,
	},
}
