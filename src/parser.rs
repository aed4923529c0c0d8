use crate::error::{JtreeError, ParseError};
use crate::node::Tree;
use crate::value::Value;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Builds node trees from raw JSON bytes.
///
/// Input can be handed over at once ([`Parser::parse_slice`]) or fed in chunks with
/// [`Parser::feed`] and parsed afterwards. Either way the bytes go through the same
/// `serde_json` parse and the same decomposition into a [`Tree`].
#[derive(Debug, Clone)]
pub struct Parser {
    name: String,
    buffer: Vec<u8>,
    success: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::with_name("input.json")
    }

    /// `name` is the source name shown in parse diagnostics.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffer: Vec::new(),
            success: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a chunk of input to the internal buffer.
    pub fn feed(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Discards everything fed so far.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.success = true;
    }

    /// Whether the most recent parse produced a tree.
    pub fn succeeded(&self) -> bool {
        self.success
    }

    /// Parses everything fed so far.
    pub fn parse(&mut self) -> Result<Tree, ParseError> {
        let buffer = std::mem::take(&mut self.buffer);
        let result = self.parse_slice(&buffer);
        self.buffer = buffer;
        result
    }

    /// Parses only the first `len` buffered bytes; `len` is clamped to the buffer length.
    pub fn parse_prefix(&mut self, len: usize) -> Result<Tree, ParseError> {
        let buffer = std::mem::take(&mut self.buffer);
        let end = len.min(buffer.len());
        let result = self.parse_slice(&buffer[..end]);
        self.buffer = buffer;
        result
    }

    /// Parses a complete JSON document held in `bytes`.
    pub fn parse_slice(&mut self, bytes: &[u8]) -> Result<Tree, ParseError> {
        let name = std::mem::take(&mut self.name);
        let result = self.parse_named(bytes, &name);
        self.name = name;
        result
    }

    fn parse_named(&mut self, bytes: &[u8], name: &str) -> Result<Tree, ParseError> {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => {
                let tree = Tree::from_value(value);
                self.success = true;
                log::debug!("built tree from {name} with {} nodes", tree.len());
                Ok(tree)
            }
            Err(err) => {
                self.success = false;
                log::debug!("failed to parse {name}: {err}");
                Err(ParseError::from_serde(&err, name, bytes))
            }
        }
    }

    pub fn parse_str(&mut self, source: &str) -> Result<Tree, ParseError> {
        self.parse_slice(source.as_bytes())
    }

    /// Reads `reader` to the end, then parses what was read.
    ///
    /// # Errors
    /// Returns `JtreeError::Io` if reading fails and `JtreeError::Parse` if the input is not JSON.
    pub fn parse_reader<R: Read>(&mut self, mut reader: R) -> Result<Tree, JtreeError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| JtreeError::Io {
                path: self.name.clone().into(),
                source,
            })?;
        Ok(self.parse_slice(&bytes)?)
    }

    /// Reads and parses the file at `path`. Diagnostics of this call are named after the
    /// file; the parser keeps its own name.
    ///
    /// # Errors
    /// Returns `JtreeError::Io` if the file cannot be read and `JtreeError::Parse` if it is not JSON.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<Tree, JtreeError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| JtreeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.parse_named(&bytes, &path.to_string_lossy())?)
    }
}
