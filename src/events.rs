//! Event-stream import
//!
//! [`from_events`] converts an ordered stream of document events into a
//! finished [`Document`], preserving order and nesting exactly. The adapter
//! drives the same node constructors as the builder, so comment and
//! processing-instruction validation applies to imported content too. Any
//! malformed stream fails with a parse error naming the offending event
//! index; no partial tree is returned.

use tracing::debug;

use crate::error::{Error, ErrorKind, Result};
use crate::node::{Attributes, Comment, Document, Element, Node, ProcessingInstruction};

/// One event of a document stream.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// Opens the document; carries the serialization-relevant metadata
    StartDocument {
        doctype: Option<String>,
        omit_declaration: bool,
        /// Declared encoding name; `None` means UTF-8
        encoding: Option<String>,
    },
    /// Opens an element; attribute pairs merge in order, later pairs win
    StartElement {
        name: String,
        attributes: Vec<(String, String)>,
    },
    /// Character data
    Text(String),
    /// A comment
    Comment(String),
    /// A processing instruction
    ProcessingInstruction { target: String, content: String },
    /// Closes the innermost open element; the name must match
    EndElement { name: String },
    /// Closes the document
    EndDocument,
}

impl Event {
    /// One-word label, used in error messages
    pub(crate) const fn label(&self) -> &'static str {
        match self {
            Self::StartDocument { .. } => "start-document",
            Self::StartElement { .. } => "start-element",
            Self::Text(_) => "text",
            Self::Comment(_) => "comment",
            Self::ProcessingInstruction { .. } => "processing-instruction",
            Self::EndElement { .. } => "end-element",
            Self::EndDocument => "end-document",
        }
    }
}

/// An open element awaiting its end event.
#[derive(Debug)]
struct Frame {
    name: String,
    attributes: Attributes,
    children: Vec<Node>,
}

/// Builds a [`Document`] from an ordered event stream.
pub fn from_events<I>(events: I) -> Result<Document>
where
    I: IntoIterator<Item = Event>,
{
    from_fallible_events(events.into_iter().map(Ok::<Event, std::convert::Infallible>))
}

/// Builds a [`Document`] from a fallible event source.
///
/// A source error becomes a fatal parse error carrying the event index;
/// nothing built so far is returned.
pub fn from_fallible_events<I, E>(events: I) -> Result<Document>
where
    I: IntoIterator<Item = std::result::Result<Event, E>>,
    E: std::fmt::Display,
{
    let mut doctype: Option<String> = None;
    let mut omit_declaration = false;
    let mut encoding: Option<String> = None;
    let mut document_children: Vec<Node> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut started = false;
    let mut finished = false;
    let mut count = 0usize;

    for (index, event) in events.into_iter().enumerate() {
        count = index + 1;
        let event = event.map_err(|source| {
            Error::at_event(
                ErrorKind::SourceFailure {
                    message: source.to_string(),
                },
                index,
            )
        })?;
        if finished {
            return Err(Error::at_event(
                ErrorKind::UnexpectedEvent {
                    event: format!("{} after end-document", event.label()),
                },
                index,
            ));
        }
        if !started {
            match event {
                Event::StartDocument {
                    doctype: event_doctype,
                    omit_declaration: event_omit,
                    encoding: event_encoding,
                } => {
                    doctype = event_doctype;
                    omit_declaration = event_omit;
                    encoding = event_encoding;
                    started = true;
                    continue;
                }
                other => {
                    return Err(Error::at_event(
                        ErrorKind::UnexpectedEvent {
                            event: format!("{} before start-document", other.label()),
                        },
                        index,
                    ));
                }
            }
        }
        match event {
            Event::StartDocument { .. } => {
                return Err(Error::at_event(
                    ErrorKind::UnexpectedEvent {
                        event: "nested start-document".to_string(),
                    },
                    index,
                ));
            }
            Event::StartElement { name, attributes } => {
                let mut merged = Attributes::with_capacity(attributes.len());
                merged.extend(attributes);
                stack.push(Frame {
                    name,
                    attributes: merged,
                    children: Vec::new(),
                });
            }
            Event::Text(content) => match stack.last_mut() {
                Some(frame) => frame.children.push(Node::Text(content)),
                None => {
                    // inter-markup whitespace at document level is noise
                    if !content.trim().is_empty() {
                        return Err(Error::at_event(
                            ErrorKind::UnexpectedEvent {
                                event: "text at document level".to_string(),
                            },
                            index,
                        ));
                    }
                }
            },
            Event::Comment(content) => {
                let node = Node::Comment(Comment::new(content)?);
                match stack.last_mut() {
                    Some(frame) => frame.children.push(node),
                    None => document_children.push(node),
                }
            }
            Event::ProcessingInstruction { target, content } => {
                let node = Node::ProcessingInstruction(ProcessingInstruction::new(
                    target, content,
                )?);
                match stack.last_mut() {
                    Some(frame) => frame.children.push(node),
                    None => document_children.push(node),
                }
            }
            Event::EndElement { name } => {
                let Some(frame) = stack.pop() else {
                    return Err(Error::at_event(
                        ErrorKind::UnexpectedEvent {
                            event: format!("end-element </{name}> without open element"),
                        },
                        index,
                    ));
                };
                if frame.name != name {
                    return Err(Error::at_event(
                        ErrorKind::MismatchedEnd {
                            expected: frame.name,
                            found: name,
                        },
                        index,
                    ));
                }
                let node = Node::Element(Element::new(
                    frame.name,
                    frame.attributes,
                    frame.children,
                ));
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => document_children.push(node),
                }
            }
            Event::EndDocument => {
                if let Some(frame) = stack.pop() {
                    return Err(Error::at_event(
                        ErrorKind::UnclosedElement { name: frame.name },
                        index,
                    ));
                }
                finished = true;
            }
        }
    }

    if !finished {
        if let Some(frame) = stack.pop() {
            return Err(Error::at_event(
                ErrorKind::UnclosedElement { name: frame.name },
                count,
            ));
        }
        return Err(Error::at_event(ErrorKind::UnexpectedEnd, count));
    }

    debug!(events = count, "imported document from event stream");
    Document::new(
        document_children,
        doctype,
        omit_declaration,
        encoding.unwrap_or_else(|| "UTF-8".to_string()),
    )
}
