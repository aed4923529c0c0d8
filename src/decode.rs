//! Field-by-field decoding of node trees into typed values.
//!
//! A type becomes decodable by implementing [`FromNode`]. Primitives, strings, sequences,
//! mappings and `Option` are covered here; records implement the trait by calling
//! [`decode_field`], [`decode_field_or`] or [`decode_field_with`] once per field:
//!
//! ```
//! use jtree_core::decode::{decode_field, decode_field_or, FromNode};
//! use jtree_core::error::DecodeError;
//! use jtree_core::node::Node;
//!
//! #[derive(Debug, Default)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     tags: Vec<String>,
//! }
//!
//! impl FromNode for Server {
//!     fn decode_from_node(&mut self, node: Node<'_>) -> Result<(), DecodeError> {
//!         decode_field("host", &mut self.host, node, true)?;
//!         decode_field_or("port", &mut self.port, 8080, node)?;
//!         decode_field("tags", &mut self.tags, node, false)?;
//!         Ok(())
//!     }
//! }
//!
//! let server: Server = jtree_core::decode_str(r#"{"host": "example.com", "tags": ["a"]}"#).unwrap();
//! assert_eq!(server.port, 8080);
//! ```

use crate::error::{DecodeError, DecodeErrorKind};
use crate::node::Node;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::Hash;
use std::num::IntErrorKind;

/// The single capability a type needs to be decoded from a node.
///
/// Implementations overwrite `self` with what `node` holds. Containers clear themselves
/// first, so decoding into a reused value never leaves stale entries behind.
pub trait FromNode: Default {
    /// # Errors
    /// Returns a [`DecodeError`] when `node` cannot be converted.
    fn decode_from_node(&mut self, node: Node<'_>) -> Result<(), DecodeError>;
}

/// Decodes a whole node into a fresh `T`.
///
/// # Errors
/// Returns the [`DecodeError`] produced by `T`'s [`FromNode`] implementation.
pub fn decode_node<T: FromNode>(node: Node<'_>) -> Result<T, DecodeError> {
    let mut value = T::default();
    value.decode_from_node(node)?;
    Ok(value)
}

/// Decodes the child `name` of `node` into `out`.
///
/// Returns `Ok(true)` when the field was present. An absent optional field resets `out`
/// to `T::default()` and returns `Ok(false)`.
///
/// # Errors
/// Fails when a mandatory field is absent, or when the field is present but cannot be
/// converted; in the latter case `name` is prepended to the error's path.
pub fn decode_field<T: FromNode>(
    name: &str,
    out: &mut T,
    node: Node<'_>,
    mandatory: bool,
) -> Result<bool, DecodeError> {
    let Some(child) = node.find_first(name).get() else {
        if mandatory {
            return Err(DecodeError::missing(name));
        }
        log::trace!("optional field {name} is absent");
        *out = T::default();
        return Ok(false);
    };

    out.decode_from_node(child)
        .map_err(|err| err.with_field(name))?;
    Ok(true)
}

/// Decodes the child `name` of `node` into `out`, falling back to `default`.
///
/// An absent field sets `out` to `default` and succeeds.
///
/// # Errors
/// A field that is present but fails to decode also sets `out` to `default`, and the
/// failure is still returned so the caller can decide whether it matters.
pub fn decode_field_or<T: FromNode>(
    name: &str,
    out: &mut T,
    default: T,
    node: Node<'_>,
) -> Result<(), DecodeError> {
    let Some(child) = node.find_first(name).get() else {
        *out = default;
        return Ok(());
    };

    if let Err(err) = out.decode_from_node(child) {
        log::warn!("field {name} fell back to its default: {err}");
        *out = default;
        return Err(err.with_field(name));
    }
    Ok(())
}

/// Decodes the child `name` of `node` by handing each of its children to `visit`.
///
/// `out` is reset to `C::default()` first, whether or not the field is present, and
/// `visit` is then called once per child in document order.
///
/// # Errors
/// Same as [`decode_field`]; errors returned by `visit` get `name` prepended.
pub fn decode_field_with<'t, C, F>(
    name: &str,
    out: &mut C,
    mut visit: F,
    node: Node<'t>,
    mandatory: bool,
) -> Result<bool, DecodeError>
where
    C: Default,
    F: FnMut(&mut C, Node<'t>) -> Result<(), DecodeError>,
{
    *out = C::default();

    let Some(child) = node.find_first(name).get() else {
        if mandatory {
            return Err(DecodeError::missing(name));
        }
        log::trace!("optional field {name} is absent");
        return Ok(false);
    };

    for element in child.children() {
        visit(out, element).map_err(|err| err.with_field(name))?;
    }
    Ok(true)
}

impl FromNode for String {
    fn decode_from_node(&mut self, node: Node<'_>) -> Result<(), DecodeError> {
        node.text().clone_into(self);
        Ok(())
    }
}

impl FromNode for bool {
    fn decode_from_node(&mut self, node: Node<'_>) -> Result<(), DecodeError> {
        let text = node.text();
        *self = if text.eq_ignore_ascii_case("true") {
            true
        } else if text.eq_ignore_ascii_case("false") {
            false
        } else {
            let number = text
                .parse::<i64>()
                .map_err(|_| DecodeError::new(DecodeErrorKind::InvalidBool(text.to_string())))?;
            number != 0
        };
        Ok(())
    }
}

macro_rules! impl_from_node_for_int {
    ($($ty:ty),*) => {
        $(
            impl FromNode for $ty {
                fn decode_from_node(&mut self, node: Node<'_>) -> Result<(), DecodeError> {
                    let text = node.text();
                    *self = text.trim().parse::<$ty>().map_err(|err| {
                        let kind = match err.kind() {
                            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                                DecodeErrorKind::OutOfRange(text.to_string())
                            }
                            _ => DecodeErrorKind::InvalidNumber(text.to_string()),
                        };
                        DecodeError::new(kind)
                    })?;
                    Ok(())
                }
            }
        )*
    };
}

impl_from_node_for_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_from_node_for_float {
    ($($ty:ty),*) => {
        $(
            impl FromNode for $ty {
                fn decode_from_node(&mut self, node: Node<'_>) -> Result<(), DecodeError> {
                    let text = node.text();
                    *self = text.trim().parse::<$ty>().map_err(|_| {
                        DecodeError::new(DecodeErrorKind::InvalidNumber(text.to_string()))
                    })?;
                    Ok(())
                }
            }
        )*
    };
}

impl_from_node_for_float!(f32, f64);

impl<T: FromNode> FromNode for Vec<T> {
    fn decode_from_node(&mut self, node: Node<'_>) -> Result<(), DecodeError> {
        self.clear();
        for child in node.children() {
            self.push(decode_node(child)?);
        }
        Ok(())
    }
}

impl<T: FromNode> FromNode for VecDeque<T> {
    fn decode_from_node(&mut self, node: Node<'_>) -> Result<(), DecodeError> {
        self.clear();
        for child in node.children() {
            self.push_back(decode_node(child)?);
        }
        Ok(())
    }
}

/// Decodes one `{"key": .., "val": ..}` entry of a mapping.
fn decode_entry<K: FromNode, V: FromNode>(node: Node<'_>) -> Result<(K, V), DecodeError> {
    let mut key = K::default();
    let mut val = V::default();
    decode_field("key", &mut key, node, false)?;
    decode_field("val", &mut val, node, false)?;
    Ok((key, val))
}

impl<K: FromNode + Ord, V: FromNode> FromNode for BTreeMap<K, V> {
    fn decode_from_node(&mut self, node: Node<'_>) -> Result<(), DecodeError> {
        self.clear();
        for child in node.children() {
            let (key, val) = decode_entry(child)?;
            self.insert(key, val);
        }
        Ok(())
    }
}

impl<K: FromNode + Eq + Hash, V: FromNode> FromNode for HashMap<K, V> {
    fn decode_from_node(&mut self, node: Node<'_>) -> Result<(), DecodeError> {
        self.clear();
        for child in node.children() {
            let (key, val) = decode_entry(child)?;
            self.insert(key, val);
        }
        Ok(())
    }
}

impl<T: FromNode> FromNode for Option<T> {
    fn decode_from_node(&mut self, node: Node<'_>) -> Result<(), DecodeError> {
        *self = if node.value().is_null() {
            None
        } else {
            Some(decode_node(node)?)
        };
        Ok(())
    }
}
