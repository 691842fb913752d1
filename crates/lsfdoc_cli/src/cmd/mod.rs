/// Asset bank index command.
pub mod assets;
/// Table-level information command.
pub mod info;
/// Inherited attribute lookup command.
pub mod inherit;
/// Selective sibling scan command.
pub mod scan;
/// Root template index command.
pub mod templates;
/// Forest/subtree print command.
pub mod tree;

#[cfg(test)]
mod test_support;
mod util;
