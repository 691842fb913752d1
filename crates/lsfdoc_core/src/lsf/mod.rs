mod attrs;
mod bytes;
mod compression;
mod decode;
mod error;
mod index;
mod inherit;
mod scan;
mod sibling;
mod table;
mod tag;
mod tree;
mod value;

/// Per-node attribute traversal for both encodings.
pub use attrs::{AttrRun, attr_run};
/// Snapshot compression detection.
pub use compression::Compression;
/// Attribute payload decoding and encoding.
pub use decode::{decode_value, encode_value, uuid_key};
/// Error and result aliases.
pub use error::{LsfError, Result};
/// Cross-file entity indices.
pub use index::{AssetIndex, EntityIndex, EntityRef, IndexOptions, TableId, TableSet, TemplateIndex};
/// Parent-template inheritance lookup.
pub use inherit::{InheritOptions, NodeCache, Resolution, inheritance_chain, inherited_attribute, resolve_attribute};
/// Selective sibling scanning.
pub use scan::{ScanStats, Siblings, first_child, scan_field, scan_unique_objects, siblings};
/// Sibling pointer construction.
pub use sibling::build_sibling_pointers;
/// Flat table accessor, records, and builder.
pub use table::{AttrRecord, Encoding, LsfTable, NONE, NodeRecord, TableBuilder, TableSnapshot, flatten_forest};
/// Attribute type tags.
pub use tag::DataTypeTag;
/// Tree reconstruction.
pub use tree::{ForestIter, Node, forest, materialize, parse_subtree, parse_whole_table};
/// Decoded attribute values.
pub use value::{TranslatedFsArgument, TranslatedFsString, TranslatedString, Value};
