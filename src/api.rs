use crate::decode::{decode_node, FromNode};
use crate::error::JtreeError;
use crate::node::Tree;
use crate::parser::Parser;
use std::path::Path;

/// Parses `source` into a node tree.
///
/// This is the primary entry point for turning JSON text into nodes. `file_name` only
/// names the source in diagnostics.
///
/// # Errors
///
/// Returns `JtreeError::Parse` if `source` is not a well-formed JSON document.
pub fn load(source: &[u8], file_name: &str) -> Result<Tree, JtreeError> {
    Ok(Parser::with_name(file_name).parse_slice(source)?)
}

/// Reads and parses the JSON file at `path`.
///
/// # Errors
///
/// Returns `JtreeError::Io` if the file cannot be read, `JtreeError::Parse` if it is not JSON.
pub fn load_file(path: impl AsRef<Path>) -> Result<Tree, JtreeError> {
    Parser::new().parse_file(path)
}

/// Parses `source` and decodes its root into `T`.
///
/// # Errors
///
/// Returns `JtreeError::Parse` for malformed JSON and `JtreeError::Decode` when the
/// document does not fit `T`.
pub fn decode<T: FromNode>(source: &[u8]) -> Result<T, JtreeError> {
    let tree = Parser::new().parse_slice(source)?;
    Ok(decode_node(tree.root())?)
}

/// [`decode`] for string input.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_str<T: FromNode>(source: &str) -> Result<T, JtreeError> {
    decode(source.as_bytes())
}

/// Reads the JSON file at `path` and decodes its root into `T`.
///
/// # Errors
///
/// Returns `JtreeError::Io`, `JtreeError::Parse` or `JtreeError::Decode`.
pub fn decode_file<T: FromNode>(path: impl AsRef<Path>) -> Result<T, JtreeError> {
    let tree = load_file(path)?;
    Ok(decode_node(tree.root())?)
}
