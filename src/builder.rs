//! Construction engine turning loosely-typed arguments into nodes
//!
//! The [`Builder`] is the single front end for tree construction. Arguments
//! arrive pre-classified as [`Content`] and are flattened in order: nodes
//! append, attribute maps merge (later pairs win), strings become text or
//! raw markup depending on the entry point, sequences and one-shot
//! producers unpack recursively, deferred producers run exactly once.
//! Every failure is reported at the argument that caused it; no partially
//! built node is ever returned.

use tracing::{debug, trace};

use crate::content::Content;
use crate::error::{Error, ErrorKind, Result};
use crate::node::{
    self, Attributes, Comment, Document, Element, Node, ProcessingInstruction,
};

/// How bare strings encountered during flattening are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StringMode {
    /// Strings become text nodes, escaped on output (element children)
    Escaped,
    /// Strings become raw markup, emitted verbatim (bare embed)
    Verbatim,
}

/// Builder configuration, bound to a [`Builder`] instance
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Check element names against the XML Name production
    pub validate_names: bool,
    /// Encoding name documents carry; used by the XML declaration only
    pub encoding: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validate_names: true,
            encoding: "UTF-8".to_string(),
        }
    }
}

impl Config {
    /// A config that stores element names verbatim without validation
    pub fn permissive() -> Self {
        Self {
            validate_names: false,
            ..Self::default()
        }
    }
}

/// Options for document construction
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Document-type declaration string, emitted verbatim before the root
    pub doctype: Option<String>,
    /// Omit the `<?xml ...?>` declaration on text serialization
    pub omit_declaration: bool,
    /// Encoding name; defaults to the builder's configured encoding
    pub encoding: Option<String>,
}

/// The construction engine
#[derive(Clone, Debug, Default)]
pub struct Builder {
    config: Config,
}

/// Accumulator for one flattening pass.
#[derive(Debug)]
struct Flattened {
    children: Vec<Node>,
    attributes: Attributes,
    accepts_attributes: bool,
}

impl Flattened {
    fn for_element() -> Self {
        Self {
            children: Vec::new(),
            attributes: Attributes::new(),
            accepts_attributes: true,
        }
    }

    fn without_element() -> Self {
        Self {
            children: Vec::new(),
            attributes: Attributes::new(),
            accepts_attributes: false,
        }
    }
}

impl Builder {
    /// Creates a builder with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with the given configuration
    pub const fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// The builder's configuration
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Builds an element. Strings among the children become text nodes and
    /// are escaped on output; attribute maps merge in argument order.
    pub fn build(&self, name: impl Into<String>, content: impl Into<Content>) -> Result<Node> {
        let name = name.into();
        if self.config.validate_names {
            node::validate_name(&name)?;
        }
        let mut out = Flattened::for_element();
        flatten(content.into(), StringMode::Escaped, &mut out)?;
        trace!(
            name = %name,
            children = out.children.len(),
            attributes = out.attributes.len(),
            "built element"
        );
        Ok(Node::Element(Element::new(name, out.attributes, out.children)))
    }

    /// Builds an element with explicit attribute pairs merged after all
    /// mapping arguments, so the explicit pairs win on key collision.
    pub fn build_with<K, V>(
        &self,
        name: impl Into<String>,
        content: impl Into<Content>,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Node>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let node = self.build(name, content)?;
        match node {
            Node::Element(element) => {
                let mut merged = element.attributes().clone();
                merged.extend(attributes);
                Ok(Node::Element(Element::new(
                    element.name(),
                    merged,
                    element.children().to_vec(),
                )))
            }
            other => Ok(other),
        }
    }

    /// Embeds pre-built content without a wrapping element. Strings are
    /// treated as raw markup here; use [`Node::text`] to force escaping.
    /// Returns the single resulting node, or a fragment for zero or many.
    pub fn embed(&self, content: impl Into<Content>) -> Result<Node> {
        let mut out = Flattened::without_element();
        flatten(content.into(), StringMode::Verbatim, &mut out)?;
        let mut children = out.children;
        if children.len() == 1 {
            match children.pop() {
                Some(node) => Ok(node),
                None => Ok(Node::Fragment(Vec::new())),
            }
        } else {
            Ok(Node::Fragment(children))
        }
    }

    /// Builds a document with default options
    pub fn document(&self, content: impl Into<Content>) -> Result<Document> {
        self.document_with(content, DocumentOptions::default())
    }

    /// Builds a document. Among the flattened children at most one element
    /// becomes the document element; comments and processing instructions
    /// are kept as document-level siblings in their given order.
    pub fn document_with(
        &self,
        content: impl Into<Content>,
        options: DocumentOptions,
    ) -> Result<Document> {
        let mut out = Flattened::without_element();
        flatten(content.into(), StringMode::Escaped, &mut out)?;
        let encoding = options
            .encoding
            .unwrap_or_else(|| self.config.encoding.clone());
        let document = Document::new(
            out.children,
            options.doctype,
            options.omit_declaration,
            encoding,
        )?;
        debug!(
            children = document.children().len(),
            has_root = document.root().is_some(),
            "built document"
        );
        Ok(document)
    }

    /// Creates a text node; escaped on output
    pub fn text(&self, value: impl Into<String>) -> Node {
        Node::text(value)
    }

    /// Creates a raw-markup node; emitted verbatim
    pub fn raw(&self, markup: impl Into<String>) -> Node {
        Node::raw(markup)
    }

    /// Creates a comment node, validating its content
    pub fn comment(&self, content: impl Into<String>) -> Result<Node> {
        Ok(Node::Comment(Comment::new(content)?))
    }

    /// Creates a processing-instruction node, validating target and content
    pub fn processing_instruction(
        &self,
        target: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Node> {
        Ok(Node::ProcessingInstruction(ProcessingInstruction::new(
            target, content,
        )?))
    }
}

/// Applies the classification rules to one argument, first match wins.
fn flatten(content: Content, mode: StringMode, out: &mut Flattened) -> Result<()> {
    match content {
        Content::Empty => {}
        Content::Node(Node::Fragment(items)) => {
            out.children.extend(node::splice_fragments(items));
        }
        Content::Node(other) => out.children.push(other),
        Content::Str(value) => out.children.push(match mode {
            StringMode::Escaped => Node::Text(value),
            StringMode::Verbatim => Node::Raw(value),
        }),
        Content::Map(pairs) => {
            if !out.accepts_attributes {
                return Err(Error::new(ErrorKind::AttributesOutsideElement));
            }
            out.attributes.extend(pairs);
        }
        Content::List(items) => {
            for item in items {
                flatten(item, mode, out)?;
            }
        }
        Content::Lazy(producer) => flatten(producer(), mode, out)?,
        Content::Iter(items) => {
            for item in items {
                flatten(item, mode, out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{attr, attrs};
    use std::cell::Cell;
    use std::rc::Rc;

    fn child_texts(node: &Node) -> Vec<String> {
        node.as_element()
            .map(|element| {
                element
                    .children()
                    .iter()
                    .filter_map(|child| child.as_text().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_build_simple() -> Result<()> {
        let b = Builder::new();
        let node = b.build("p", "Hello")?;
        let element = node.as_element().expect("element");
        assert_eq!(element.name(), "p");
        assert_eq!(child_texts(&node), vec!["Hello"]);
        Ok(())
    }

    #[test]
    fn test_strings_escape_in_children_raw_in_embed() -> Result<()> {
        let b = Builder::new();
        let node = b.build("p", "<&>")?;
        assert!(node
            .as_element()
            .and_then(|e| e.children().first())
            .is_some_and(Node::is_text));

        let embedded = b.embed("<raw/>")?;
        assert!(embedded.is_raw());
        Ok(())
    }

    #[test]
    fn test_explicit_text_and_raw_override_entry_point() -> Result<()> {
        let b = Builder::new();
        let node = b.build("p", Node::raw("<b>bold</b>"))?;
        assert!(node
            .as_element()
            .and_then(|e| e.children().first())
            .is_some_and(Node::is_raw));

        let embedded = b.embed(Node::text("<not markup>"))?;
        assert!(embedded.is_text());
        Ok(())
    }

    #[test]
    fn test_attribute_merge_later_wins() -> Result<()> {
        let b = Builder::new();
        let node = b.build(
            "p",
            (attrs([("class", "first"), ("id", "x")]), attr("class", "second")),
        )?;
        let element = node.as_element().expect("element");
        assert_eq!(element.attributes().get("class"), Some("second"));
        let keys: Vec<_> = element.attributes().keys().collect();
        assert_eq!(keys, vec!["class", "id"]);
        Ok(())
    }

    #[test]
    fn test_named_attributes_win_over_mappings() -> Result<()> {
        let b = Builder::new();
        let node = b.build_with("p", attr("class", "mapped"), [("class", "named")])?;
        let element = node.as_element().expect("element");
        assert_eq!(element.attributes().get("class"), Some("named"));
        Ok(())
    }

    #[test]
    fn test_flatten_associativity() -> Result<()> {
        let b = Builder::new();
        let nested = b.build("e", (("a", vec!["b", "c"]),))?;
        let flat = b.build("e", ("a", "b", "c"))?;
        assert_eq!(nested, flat);
        Ok(())
    }

    #[test]
    fn test_lazy_invoked_exactly_once() -> Result<()> {
        let b = Builder::new();
        let calls = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&calls);
        let node = b.build(
            "p",
            Content::lazy(move || {
                counter.set(counter.get() + 1);
                "deferred"
            }),
        )?;
        let _copy = node.clone();
        let _another = node.clone();
        assert_eq!(calls.get(), 1);
        assert_eq!(child_texts(&node), vec!["deferred"]);
        Ok(())
    }

    #[test]
    fn test_iterator_drained_once_in_order() -> Result<()> {
        let b = Builder::new();
        let node = b.build("p", Content::items((0..4).map(|i| i.to_string())))?;
        assert_eq!(child_texts(&node), vec!["0", "1", "2", "3"]);
        Ok(())
    }

    #[test]
    fn test_fragment_splice_through_build() -> Result<()> {
        let b = Builder::new();
        let fragment = b.embed((Node::text("a"), Node::text("b")))?;
        assert!(fragment.is_fragment());
        let node = b.build("p", (fragment, Node::text("c")))?;
        assert_eq!(child_texts(&node), vec!["a", "b", "c"]);
        Ok(())
    }

    #[test]
    fn test_embed_single_returns_node() -> Result<()> {
        let b = Builder::new();
        let node = b.embed(Node::text("only"))?;
        assert!(node.is_text());
        Ok(())
    }

    #[test]
    fn test_attributes_in_embed_fail() {
        let b = Builder::new();
        let err = b.embed(attr("a", "b")).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::AttributesOutsideElement);
    }

    #[test]
    fn test_attributes_in_document_fail() {
        let b = Builder::new();
        let err = b.document(attr("a", "b")).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::AttributesOutsideElement);
    }

    #[test]
    fn test_document_siblings_in_order() -> Result<()> {
        let b = Builder::new();
        let doc = b.document((
            b.comment("before")?,
            b.build("root", ())?,
            b.processing_instruction("after", "content")?,
        ))?;
        assert_eq!(doc.children().len(), 3);
        assert!(doc.children()[0].is_comment());
        assert!(doc.children()[1].is_element());
        assert!(doc.children()[2].is_processing_instruction());
        Ok(())
    }

    #[test]
    fn test_document_rejects_second_root() -> Result<()> {
        let b = Builder::new();
        let err = b
            .document((b.build("a", ())?, b.build("b", ())?))
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MultipleRootElements);
        Ok(())
    }

    #[test]
    fn test_document_rejects_text_child() {
        let b = Builder::new();
        let err = b.document("loose text").unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::UnsupportedChild {
                kind: "text",
                context: "document"
            }
        );
    }

    #[test]
    fn test_name_validation_configurable() {
        let strict = Builder::new();
        assert!(strict.build("not a name", ()).is_err());

        let permissive = Builder::with_config(Config::permissive());
        assert!(permissive.build("not a name", ()).is_ok());
    }

    #[test]
    fn test_document_options_encoding() -> Result<()> {
        let b = Builder::new();
        let doc = b.document_with(
            b.build("root", ())?,
            DocumentOptions {
                encoding: Some("ISO-8859-1".to_string()),
                ..DocumentOptions::default()
            },
        )?;
        assert_eq!(doc.encoding(), "ISO-8859-1");

        let default_doc = b.document(b.build("root", ())?)?;
        assert_eq!(default_doc.encoding(), "UTF-8");
        Ok(())
    }

    #[test]
    fn test_option_children_skipped() -> Result<()> {
        let b = Builder::new();
        let none: Option<&str> = None;
        let node = b.build("p", ("a", none, "b"))?;
        assert_eq!(child_texts(&node), vec!["a", "b"]);
        Ok(())
    }
}
