//! Generic-tree backend
//!
//! Produces an owned, platform-neutral tree mirroring the node kinds.
//! Character data is carried unescaped; the text/raw distinction survives
//! as distinct kinds, so converting a [`TreeNode`] to markup later can make
//! the same escaping decisions the text backend makes.

use crate::error::{Error, ErrorKind, Result};
use crate::node::{Document, Element, Node};
use crate::render::Backend;

/// An XML declaration as carried by a rendered document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Declaration {
    pub version: String,
    pub encoding: String,
}

/// One node of the generic output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TreeNode {
    Document {
        declaration: Option<Declaration>,
        doctype: Option<String>,
        children: Vec<TreeNode>,
    },
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<TreeNode>,
    },
    Text(String),
    Raw(String),
    Comment(String),
    ProcessingInstruction {
        target: String,
        content: String,
    },
}

/// Renders trees into [`TreeNode`] structures.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeBackend;

impl TreeBackend {
    pub const fn new() -> Self {
        Self
    }
}

impl Backend for TreeBackend {
    type Output = TreeNode;

    fn render_node(&self, node: &Node) -> Result<TreeNode> {
        convert_node(node)
    }

    fn render_document(&self, document: &Document) -> Result<TreeNode> {
        let declaration = if document.omit_declaration() {
            None
        } else {
            Some(Declaration {
                version: "1.0".to_string(),
                encoding: document.encoding().to_string(),
            })
        };
        Ok(TreeNode::Document {
            declaration,
            doctype: document.doctype().map(str::to_string),
            children: convert_children(document.children())?,
        })
    }
}

fn convert_node(node: &Node) -> Result<TreeNode> {
    match node {
        Node::Element(element) => convert_element(element),
        Node::Text(content) => Ok(TreeNode::Text(content.clone())),
        Node::Raw(markup) => Ok(TreeNode::Raw(markup.clone())),
        Node::Comment(comment) => Ok(TreeNode::Comment(comment.content().to_string())),
        Node::ProcessingInstruction(pi) => Ok(TreeNode::ProcessingInstruction {
            target: pi.target().to_string(),
            content: pi.content().to_string(),
        }),
        // a finished tree never contains fragments; a bare fragment has no
        // single-root tree form
        Node::Fragment(_) => Err(Error::new(ErrorKind::UnsupportedChild {
            kind: "fragment",
            context: "tree backend",
        })),
    }
}

fn convert_element(element: &Element) -> Result<TreeNode> {
    Ok(TreeNode::Element {
        name: element.name().to_string(),
        attributes: element
            .attributes()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect(),
        children: convert_children(element.children())?,
    })
}

fn convert_children(children: &[Node]) -> Result<Vec<TreeNode>> {
    children.iter().map(convert_node).collect()
}
