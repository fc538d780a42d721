//! Text backend, the reference serialization
//!
//! Produces a UTF-8 string. The declared encoding names what the caller
//! intends to transcode to; the engine itself never transcodes.

use tracing::trace;

use crate::error::Result;
use crate::node::{Document, Element, Node};
use crate::render::{escape_attribute, escape_text, Backend};

/// Renders trees to XML text.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextBackend;

impl TextBackend {
    pub const fn new() -> Self {
        Self
    }
}

impl Backend for TextBackend {
    type Output = String;

    fn render_node(&self, node: &Node) -> Result<String> {
        let mut out = String::new();
        write_node(node, &mut out);
        Ok(out)
    }

    fn render_document(&self, document: &Document) -> Result<String> {
        let mut out = String::new();
        if !document.omit_declaration() {
            out.push_str("<?xml version=\"1.0\" encoding=\"");
            out.push_str(document.encoding());
            out.push_str("\"?>");
        }
        if let Some(doctype) = document.doctype() {
            out.push_str(doctype);
        }
        for child in document.children() {
            write_node(child, &mut out);
        }
        trace!(bytes = out.len(), "rendered document to text");
        Ok(out)
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(element) => write_element(element, out),
        Node::Text(content) => out.push_str(&escape_text(content)),
        Node::Raw(markup) => out.push_str(markup),
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment.content());
            out.push_str("-->");
        }
        Node::ProcessingInstruction(pi) => {
            out.push_str("<?");
            out.push_str(pi.target());
            if !pi.content().is_empty() {
                out.push(' ');
                out.push_str(pi.content());
            }
            out.push_str("?>");
        }
        Node::Fragment(children) => {
            for child in children {
                write_node(child, out);
            }
        }
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(element.name());
    for (name, value) in element.attributes() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }
    if element.children().is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in element.children() {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(element.name());
    out.push('>');
}
