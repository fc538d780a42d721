//! Error types for xmlkit

use std::fmt;
use thiserror::Error;

/// Coarse error taxonomy.
///
/// Every [`ErrorKind`] belongs to exactly one category. Callers that do not
/// care about the precise kind can branch on this instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Forbidden substring or reserved name caught at construction time.
    Validation,
    /// A child of a kind the receiving context cannot accept.
    UnsupportedChild,
    /// Structurally invalid tree shape (roots, attribute placement).
    Structure,
    /// Malformed or incomplete external event stream.
    Parse,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::UnsupportedChild => write!(f, "unsupported child"),
            Self::Structure => write!(f, "structure"),
            Self::Parse => write!(f, "parse"),
        }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Comment content contains the two-hyphen sequence `--`.
    CommentDoubleHyphen,
    /// Processing-instruction target is `xml` (any casing) or not a name.
    ReservedPiTarget { target: String },
    /// Processing-instruction content contains `?>`.
    PiContentTerminator,
    /// Not a valid XML name.
    InvalidName { name: String },
    /// Child kind not accepted where it appeared.
    UnsupportedChild {
        kind: &'static str,
        context: &'static str,
    },
    /// More than one element among a document's flattened children.
    MultipleRootElements,
    /// Attribute mapping supplied where no element context exists.
    AttributesOutsideElement,
    /// Event arrived where the stream grammar does not allow it.
    UnexpectedEvent { event: String },
    /// End-element name differs from the open element.
    MismatchedEnd { expected: String, found: String },
    /// Stream finished while an element was still open.
    UnclosedElement { name: String },
    /// Stream finished before the document did.
    UnexpectedEnd,
    /// The external event source itself failed.
    SourceFailure { message: String },
}

impl ErrorKind {
    /// The taxonomy category this kind belongs to.
    pub const fn category(&self) -> Category {
        match self {
            Self::CommentDoubleHyphen
            | Self::ReservedPiTarget { .. }
            | Self::PiContentTerminator
            | Self::InvalidName { .. } => Category::Validation,
            Self::UnsupportedChild { .. } => Category::UnsupportedChild,
            Self::MultipleRootElements | Self::AttributesOutsideElement => Category::Structure,
            Self::UnexpectedEvent { .. }
            | Self::MismatchedEnd { .. }
            | Self::UnclosedElement { .. }
            | Self::UnexpectedEnd
            | Self::SourceFailure { .. } => Category::Parse,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommentDoubleHyphen => {
                write!(f, "comment content must not contain \"--\"")
            }
            Self::ReservedPiTarget { target } => {
                write!(f, "invalid processing instruction target: {target}")
            }
            Self::PiContentTerminator => {
                write!(f, "processing instruction content must not contain \"?>\"")
            }
            Self::InvalidName { name } => write!(f, "invalid XML name: {name}"),
            Self::UnsupportedChild { kind, context } => {
                write!(f, "unsupported child of kind {kind} in {context}")
            }
            Self::MultipleRootElements => {
                write!(f, "document allows at most one root element")
            }
            Self::AttributesOutsideElement => {
                write!(f, "attributes supplied outside an element context")
            }
            Self::UnexpectedEvent { event } => write!(f, "unexpected event: {event}"),
            Self::MismatchedEnd { expected, found } => {
                write!(f, "expected </{expected}>, found </{found}>")
            }
            Self::UnclosedElement { name } => write!(f, "unclosed element: {name}"),
            Self::UnexpectedEnd => write!(f, "unexpected end of event stream"),
            Self::SourceFailure { message } => {
                write!(f, "event source failure: {message}")
            }
        }
    }
}

/// Main error type for xmlkit
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    position: Option<usize>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            position: None,
        }
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            position: None,
        }
    }

    /// Create error at a specific event index (import adapter).
    pub fn at_event(kind: ErrorKind, index: usize) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            position: Some(index),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub const fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Event index the error occurred at, if the source was an event stream.
    pub const fn position(&self) -> Option<usize> {
        self.position
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(index) => {
                write!(
                    f,
                    "{} error at event {index}: {}",
                    self.category(),
                    self.message
                )
            }
            None => write!(f, "{} error: {}", self.category(), self.message),
        }
    }
}

/// Result type alias for xmlkit
pub type Result<T> = std::result::Result<T, Error>;
