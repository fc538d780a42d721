//! Node model for XML trees
//!
//! Trees are built through [`crate::builder::Builder`] and are not mutated
//! afterwards; producing a changed tree means building a new one. Comment and
//! processing-instruction content is validated here, at construction, so a
//! finished tree can always be serialized without well-formedness surprises.

use indexmap::map::{IntoIter, Iter, Keys, Values};
use indexmap::IndexMap;
use std::ops::Index;

use crate::error::{Error, ErrorKind, Result};

/// An order-preserving attribute mapping (name to value).
///
/// Insertion order is preserved for serialization. Re-inserting an existing
/// key replaces the value but keeps the key's original position, so the
/// merged mapping iterates in first-insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes(pub(crate) IndexMap<String, String>);

impl Attributes {
    /// Creates a new empty attribute mapping
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Creates a new mapping with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    /// Returns the number of attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no attributes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value for the given attribute name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Inserts an attribute, returning the previous value if the name existed
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    /// Removes an attribute, returning its value if it was present
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.swap_remove(name)
    }

    /// Returns true if the mapping contains the given name
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns an iterator over the attribute names
    pub fn keys(&self) -> Keys<'_, String, String> {
        self.0.keys()
    }

    /// Returns an iterator over the attribute values
    pub fn values(&self) -> Values<'_, String, String> {
        self.0.values()
    }

    /// Returns an iterator over name-value pairs
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.0.iter()
    }
}

impl Index<&str> for Attributes {
    type Output = String;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, name: &str) -> &Self::Output {
        &self.0[name]
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Attributes {
    type Item = (String, String);
    type IntoIter = IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<IndexMap<String, String>> for Attributes {
    fn from(map: IndexMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Attributes {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// A node of an XML tree
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// An element with attributes and children
    Element(Element),
    /// Character data, escaped on text serialization
    Text(String),
    /// Verbatim markup, emitted without escaping
    Raw(String),
    /// A comment
    Comment(Comment),
    /// A processing instruction
    ProcessingInstruction(ProcessingInstruction),
    /// An ordered group of sibling nodes without a wrapping element.
    ///
    /// Fragments only exist between construction calls; they are spliced
    /// into the parent's child sequence and never appear in a finished tree.
    Fragment(Vec<Node>),
}

impl Node {
    /// Creates a text node; content is escaped when rendered as text
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Creates a raw-markup node; the caller asserts it is well-formed
    pub fn raw(markup: impl Into<String>) -> Self {
        Self::Raw(markup.into())
    }

    /// Returns true if this node is an element
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }

    /// Returns true if this node is a text node
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Returns true if this node is a raw-markup node
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    /// Returns true if this node is a comment
    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    /// Returns true if this node is a processing instruction
    pub fn is_processing_instruction(&self) -> bool {
        matches!(self, Self::ProcessingInstruction(_))
    }

    /// Returns true if this node is a fragment
    pub fn is_fragment(&self) -> bool {
        matches!(self, Self::Fragment(_))
    }

    /// Returns the element if this node is one, None otherwise
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the text content if this node is a text node, None otherwise
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(content) => Some(content),
            _ => None,
        }
    }

    /// Returns the markup if this node is a raw node, None otherwise
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Raw(markup) => Some(markup),
            _ => None,
        }
    }

    /// Returns the comment if this node is one, None otherwise
    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Self::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    /// Returns the processing instruction if this node is one, None otherwise
    pub fn as_processing_instruction(&self) -> Option<&ProcessingInstruction> {
        match self {
            Self::ProcessingInstruction(pi) => Some(pi),
            _ => None,
        }
    }

    /// One-word kind label, used in error messages
    pub(crate) const fn kind_label(&self) -> &'static str {
        match self {
            Self::Element(_) => "element",
            Self::Text(_) => "text",
            Self::Raw(_) => "raw",
            Self::Comment(_) => "comment",
            Self::ProcessingInstruction(_) => "processing instruction",
            Self::Fragment(_) => "fragment",
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<Comment> for Node {
    fn from(comment: Comment) -> Self {
        Self::Comment(comment)
    }
}

impl From<ProcessingInstruction> for Node {
    fn from(pi: ProcessingInstruction) -> Self {
        Self::ProcessingInstruction(pi)
    }
}

/// An XML element
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    name: String,
    attributes: Attributes,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element. The name is stored verbatim; name validation is
    /// the builder's concern. Fragment children are spliced into the child
    /// sequence.
    pub fn new(name: impl Into<String>, attributes: Attributes, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            attributes,
            children: splice_fragments(children),
        }
    }

    /// The element name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attribute mapping, in final-merge insertion order
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// The ordered child nodes
    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// A comment node
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    content: String,
}

impl Comment {
    /// Creates a comment, rejecting content containing `--`
    pub fn new(content: impl Into<String>) -> Result<Self> {
        let content = content.into();
        if content.contains("--") {
            return Err(Error::with_message(
                ErrorKind::CommentDoubleHyphen,
                format!("comment content must not contain \"--\": {content:?}"),
            ));
        }
        Ok(Self { content })
    }

    /// The comment content
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A processing-instruction node
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessingInstruction {
    target: String,
    content: String,
}

impl ProcessingInstruction {
    /// Creates a processing instruction.
    ///
    /// The target must be a valid XML name and must not equal `xml` in any
    /// casing; the content must not contain `?>`. An empty content string
    /// renders with the content segment omitted.
    pub fn new(target: impl Into<String>, content: impl Into<String>) -> Result<Self> {
        let target = target.into();
        if !is_valid_name(&target) || target.eq_ignore_ascii_case("xml") {
            return Err(Error::new(ErrorKind::ReservedPiTarget { target }));
        }
        let content = content.into();
        if content.contains("?>") {
            return Err(Error::with_message(
                ErrorKind::PiContentTerminator,
                format!("processing instruction content must not contain \"?>\": {content:?}"),
            ));
        }
        Ok(Self { target, content })
    }

    /// The instruction target
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The instruction content, possibly empty
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// An XML document: optional doctype, declaration flag, encoding name and
/// the document-level children (at most one element plus comments and
/// processing instructions, in the order supplied).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    doctype: Option<String>,
    omit_declaration: bool,
    encoding: String,
    children: Vec<Node>,
}

impl Document {
    /// Creates a document from document-level children.
    ///
    /// Fragments are spliced first. Among the spliced children at most one
    /// element is allowed; the rest must be comments or processing
    /// instructions, kept in their given order.
    pub fn new(
        children: Vec<Node>,
        doctype: Option<String>,
        omit_declaration: bool,
        encoding: impl Into<String>,
    ) -> Result<Self> {
        let children = splice_fragments(children);
        let mut seen_root = false;
        for child in &children {
            match child {
                Node::Element(_) => {
                    if seen_root {
                        return Err(Error::new(ErrorKind::MultipleRootElements));
                    }
                    seen_root = true;
                }
                Node::Comment(_) | Node::ProcessingInstruction(_) => {}
                other => {
                    return Err(Error::new(ErrorKind::UnsupportedChild {
                        kind: other.kind_label(),
                        context: "document",
                    }));
                }
            }
        }
        Ok(Self {
            doctype,
            omit_declaration,
            encoding: encoding.into(),
            children,
        })
    }

    /// The document-type declaration string, emitted verbatim
    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    /// True if the XML declaration is omitted on text serialization
    pub const fn omit_declaration(&self) -> bool {
        self.omit_declaration
    }

    /// The encoding name used in the XML declaration
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// The document-level children in original order
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The document element, if present
    pub fn root(&self) -> Option<&Element> {
        self.children.iter().find_map(Node::as_element)
    }
}

/// Splices fragments into their parent's child sequence, recursively.
pub(crate) fn splice_fragments(children: Vec<Node>) -> Vec<Node> {
    if !children.iter().any(Node::is_fragment) {
        return children;
    }
    let mut spliced = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Node::Fragment(nested) => spliced.extend(splice_fragments(nested)),
            other => spliced.push(other),
        }
    }
    spliced
}

/// Tests whether `name` matches the XML 1.0 Name production.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

/// Checks `name` against the XML 1.0 Name production.
pub fn validate_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::InvalidName {
            name: name.to_string(),
        }))
    }
}

const fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | '_'
        | 'A'..='Z'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

const fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.'
            | '0'..='9'
            | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}
