//! A bucket access policy schema, decoded through [`FromNode`].
//!
//! ```json
//! {
//!   "Version": "2012-10-17",
//!   "Id": "http referer policy",
//!   "Statement": [{
//!     "Sid": "allow-site",
//!     "Effect": "Allow",
//!     "Principal": "*",
//!     "Action": "s3:GetObject",
//!     "Resource": "arn:aws:s3:::bucket/*",
//!     "Conditions": {
//!       "StringLike": { "aws:Referer": ["http://www.example.com/*"] },
//!       "StringNotLike": { "aws:Referer": ["http://www.example.com/private/*"] }
//!     }
//!   }]
//! }
//! ```

use crate::decode::{decode_field, FromNode};
use crate::error::DecodeError;
use crate::node::Node;

/// Referers a statement applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringLike {
    pub referer: Vec<String>,
}

impl FromNode for StringLike {
    fn decode_from_node(&mut self, node: Node<'_>) -> Result<(), DecodeError> {
        decode_field("aws:Referer", &mut self.referer, node, false)?;
        Ok(())
    }
}

/// Referers a statement excludes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringNotLike {
    pub referer: Vec<String>,
}

impl FromNode for StringNotLike {
    fn decode_from_node(&mut self, node: Node<'_>) -> Result<(), DecodeError> {
        decode_field("aws:Referer", &mut self.referer, node, false)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    /// `StringLike`
    pub allow: StringLike,
    /// `StringNotLike`
    pub deny: StringNotLike,
}

impl FromNode for Conditions {
    fn decode_from_node(&mut self, node: Node<'_>) -> Result<(), DecodeError> {
        decode_field("StringLike", &mut self.allow, node, false)?;
        decode_field("StringNotLike", &mut self.deny, node, false)?;
        Ok(())
    }
}

/// One statement of a policy. Non-string values such as a `Principal` object are kept
/// as their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statement {
    pub sid: String,
    pub effect: String,
    pub principal: String,
    pub action: String,
    pub resource: String,
    pub conditions: Conditions,
}

impl FromNode for Statement {
    fn decode_from_node(&mut self, node: Node<'_>) -> Result<(), DecodeError> {
        decode_field("Sid", &mut self.sid, node, false)?;
        decode_field("Effect", &mut self.effect, node, false)?;
        decode_field("Principal", &mut self.principal, node, false)?;
        decode_field("Action", &mut self.action, node, false)?;
        decode_field("Resource", &mut self.resource, node, false)?;
        decode_field("Conditions", &mut self.conditions, node, false)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    pub version: String,
    pub id: String,
    pub statement: Vec<Statement>,
}

impl FromNode for Policy {
    fn decode_from_node(&mut self, node: Node<'_>) -> Result<(), DecodeError> {
        decode_field("Version", &mut self.version, node, false)?;
        decode_field("Id", &mut self.id, node, false)?;
        decode_field("Statement", &mut self.statement, node, false)?;
        Ok(())
    }
}
