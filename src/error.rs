use miette::{Diagnostic, NamedSource, SourceSpan};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::utils::{line_column_to_offset, lossy_offset};

#[derive(Error, Debug, Diagnostic)]
pub enum JtreeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Decode(#[from] DecodeError),

    #[error("failed to read {}", .path.display())]
    #[diagnostic(code(io::read), help("Check that the file exists and is readable."))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ParseError {
    #[error("Invalid JSON: {message}")]
    #[diagnostic(
        code(parse::syntax),
        help("The input is not a well-formed JSON document.")
    )]
    Syntax {
        message: String,
        line: usize,
        column: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
    },

    #[error("Unexpected end of input: {message}")]
    #[diagnostic(
        code(parse::unexpected_eof),
        help("The input ended before the JSON document was complete.")
    )]
    UnexpectedEof {
        message: String,
        line: usize,
        column: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("input ended here")]
        span: SourceSpan,
    },
}

impl ParseError {
    /// Maps a `serde_json` failure onto the source it was reading.
    pub(crate) fn from_serde(err: &serde_json::Error, name: &str, source: &[u8]) -> Self {
        let text = String::from_utf8_lossy(source).into_owned();
        let line = err.line();
        let column = err.column();
        let offset = lossy_offset(source, line_column_to_offset(source, line, column));
        // serde_json appends " at line N column M"; the span already says where.
        let full = err.to_string();
        let message = match full.rfind(" at line ") {
            Some(idx) => full[..idx].to_string(),
            None => full,
        };
        let src = NamedSource::new(name, text);

        if err.is_eof() {
            ParseError::UnexpectedEof {
                message,
                line,
                column,
                src,
                span: (offset, 0).into(),
            }
        } else {
            ParseError::Syntax {
                message,
                line,
                column,
                src,
                span: (offset, 1).into(),
            }
        }
    }

    /// 1-based line and column reported by the JSON parser.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        match self {
            ParseError::Syntax { line, column, .. }
            | ParseError::UnexpectedEof { line, column, .. } => (*line, *column),
        }
    }

    /// Where the label points in the rendered source.
    #[must_use]
    pub fn span(&self) -> SourceSpan {
        match self {
            ParseError::Syntax { span, .. } | ParseError::UnexpectedEof { span, .. } => *span,
        }
    }

    /// Name of the source shown in the diagnostic.
    #[must_use]
    pub fn source_name(&self) -> &str {
        match self {
            ParseError::Syntax { src, .. } | ParseError::UnexpectedEof { src, .. } => src.name(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ParseError::Syntax { message, .. } | ParseError::UnexpectedEof { message, .. } => {
                message
            }
        }
    }
}

/// Why a field could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    #[error("missing mandatory field `{0}`")]
    MissingField(String),

    #[error("failed to parse number from `{0}`")]
    InvalidNumber(String),

    #[error("number `{0}` is out of range")]
    OutOfRange(String),

    #[error("failed to parse boolean from `{0}`")]
    InvalidBool(String),

    #[error("{0}")]
    Custom(String),
}

/// A decode failure together with the chain of fields that led to it.
///
/// The path is stored outermost first. Each decode frame prepends its own field name while
/// the error travels back to the caller, so a failure deep inside a record renders as
/// `Statement: Conditions: StringLike: aws:Referer: <cause>`.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[error("{}{kind}", FieldPrefix(.path))]
#[diagnostic(code(decode::field))]
pub struct DecodeError {
    path: Vec<String>,
    kind: DecodeErrorKind,
}

struct FieldPrefix<'a>(&'a [String]);

impl fmt::Display for FieldPrefix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in self.0 {
            write!(f, "{field}: ")?;
        }
        Ok(())
    }
}

impl DecodeError {
    #[must_use]
    pub fn new(kind: DecodeErrorKind) -> Self {
        DecodeError {
            path: Vec::new(),
            kind,
        }
    }

    /// An error raised by a user record, e.g. when a field holds an unknown variant.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::new(DecodeErrorKind::Custom(message.into()))
    }

    pub(crate) fn missing(field: &str) -> Self {
        Self::new(DecodeErrorKind::MissingField(field.to_string()))
    }

    /// Prepends `field` to the path.
    #[must_use]
    pub fn with_field(mut self, field: &str) -> Self {
        self.path.insert(0, field.to_string());
        self
    }

    /// Enclosing field names, outermost first.
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    #[must_use]
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// The path joined with dots, e.g. `Statement.Conditions.StringLike`.
    #[must_use]
    pub fn field_path(&self) -> String {
        self.path.join(".")
    }
}
