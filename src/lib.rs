//! xmlkit - fluent XML tree construction and serialization
//!
//! # Quick Start
//!
//! ```
//! use xmlkit::{render_node_to_string, Builder};
//! # fn main() -> Result<(), xmlkit::Error> {
//! let b = Builder::new();
//! let tree = b.build("p", "Hello & Universe!")?;
//! assert_eq!(render_node_to_string(&tree)?, "<p>Hello &amp; Universe!</p>");
//! # Ok(())
//! # }
//! ```
//!
//! Children are loosely typed: strings, numbers, nodes, attribute maps,
//! nested sequences, one-shot iterators and deferred closures all flatten
//! into an ordered child list plus a merged attribute set.
//!
//! ```
//! use xmlkit::{attr, render_to_string, Builder, DocumentOptions};
//! # fn main() -> Result<(), xmlkit::Error> {
//! let b = Builder::new();
//! let doc = b.document_with(
//!     b.build(
//!         "html",
//!         (
//!             b.build("head", b.build("title", "Test")?)?,
//!             b.build("body", (attr("lang", "en"), b.build("p", "ok")?))?,
//!         ),
//!     )?,
//!     DocumentOptions {
//!         doctype: Some("<!DOCTYPE html>".to_string()),
//!         omit_declaration: true,
//!         ..DocumentOptions::default()
//!     },
//! )?;
//! assert_eq!(
//!     render_to_string(&doc)?,
//!     "<!DOCTYPE html><html><head><title>Test</title></head>\
//!      <body lang=\"en\"><p>ok</p></body></html>"
//! );
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Category, Error, ErrorKind, Result};

pub mod node;
pub use node::{
    Attributes, Comment, Document, Element, Node, ProcessingInstruction,
};

pub mod content;
pub use content::{attr, attrs, Content};

pub mod builder;
pub use builder::{Builder, Config, DocumentOptions};

pub mod render;
pub use render::{Backend, EventBackend, TextBackend, TreeBackend, TreeNode};

pub mod events;
pub use events::{from_events, from_fallible_events, Event};

pub mod vocab;
pub use vocab::Vocabulary;

/// Builds an element with a default [`Builder`]
pub fn build(name: impl Into<String>, content: impl Into<Content>) -> Result<Node> {
    Builder::new().build(name, content)
}

/// Builds a document with a default [`Builder`]
pub fn document(content: impl Into<Content>) -> Result<Document> {
    Builder::new().document(content)
}

/// Creates a text node; escaped on output
pub fn text(value: impl Into<String>) -> Node {
    Node::text(value)
}

/// Creates a raw-markup node; emitted verbatim
pub fn raw(markup: impl Into<String>) -> Node {
    Node::raw(markup)
}

/// Creates a comment node, validating its content
pub fn comment(content: impl Into<String>) -> Result<Node> {
    Ok(Node::Comment(Comment::new(content)?))
}

/// Creates a processing-instruction node, validating target and content
pub fn processing_instruction(
    target: impl Into<String>,
    content: impl Into<String>,
) -> Result<Node> {
    Ok(Node::ProcessingInstruction(ProcessingInstruction::new(
        target, content,
    )?))
}

/// Renders a document to XML text with the text backend
pub fn render_to_string(document: &Document) -> Result<String> {
    TextBackend::new().render_document(document)
}

/// Renders a single node to XML text with the text backend
pub fn render_node_to_string(node: &Node) -> Result<String> {
    TextBackend::new().render_node(node)
}
