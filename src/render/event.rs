//! Event-stream backend
//!
//! Produces the [`Event`] sequence an equivalent parse would deliver, which
//! makes it the exchange form for platform document APIs and the round-trip
//! partner of [`crate::events::from_events`]. Raw markup has no event
//! representation and is rejected.

use crate::error::{Error, ErrorKind, Result};
use crate::events::Event;
use crate::node::{Document, Element, Node};
use crate::render::Backend;

/// Renders trees to event sequences.
#[derive(Clone, Copy, Debug, Default)]
pub struct EventBackend;

impl EventBackend {
    pub const fn new() -> Self {
        Self
    }
}

impl Backend for EventBackend {
    type Output = Vec<Event>;

    fn render_node(&self, node: &Node) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        push_node(node, &mut events)?;
        Ok(events)
    }

    fn render_document(&self, document: &Document) -> Result<Vec<Event>> {
        let mut events = Vec::with_capacity(document.children().len() + 2);
        events.push(Event::StartDocument {
            doctype: document.doctype().map(str::to_string),
            omit_declaration: document.omit_declaration(),
            encoding: Some(document.encoding().to_string()),
        });
        for child in document.children() {
            push_node(child, &mut events)?;
        }
        events.push(Event::EndDocument);
        Ok(events)
    }
}

fn push_node(node: &Node, events: &mut Vec<Event>) -> Result<()> {
    match node {
        Node::Element(element) => push_element(element, events),
        Node::Text(content) => {
            events.push(Event::Text(content.clone()));
            Ok(())
        }
        Node::Raw(_) => Err(Error::new(ErrorKind::UnsupportedChild {
            kind: "raw",
            context: "event stream",
        })),
        Node::Comment(comment) => {
            events.push(Event::Comment(comment.content().to_string()));
            Ok(())
        }
        Node::ProcessingInstruction(pi) => {
            events.push(Event::ProcessingInstruction {
                target: pi.target().to_string(),
                content: pi.content().to_string(),
            });
            Ok(())
        }
        Node::Fragment(children) => {
            for child in children {
                push_node(child, events)?;
            }
            Ok(())
        }
    }
}

fn push_element(element: &Element, events: &mut Vec<Event>) -> Result<()> {
    events.push(Event::StartElement {
        name: element.name().to_string(),
        attributes: element
            .attributes()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect(),
    });
    for child in element.children() {
        push_node(child, events)?;
    }
    events.push(Event::EndElement {
        name: element.name().to_string(),
    });
    Ok(())
}
