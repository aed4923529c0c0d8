pub mod api;
pub mod decode;
pub mod error;
pub mod node;
pub mod parser;
pub mod policy;
pub mod utils;
pub mod value;

pub use api::{decode, decode_file, decode_str, load, load_file};
pub use decode::{decode_field, decode_field_or, decode_field_with, decode_node, FromNode};
pub use error::{DecodeError, DecodeErrorKind, JtreeError, ParseError};
pub use node::{Node, NodeId, NodeIter, Tree};
pub use parser::Parser;
pub use value::{Value, ValueKind};
