//! Static element vocabularies
//!
//! A [`Vocabulary`] is a fixed set of known-good element names. Creating
//! elements through it skips per-call name validation (membership implies
//! validity) and catches typos in element names at the call site. The HTML5
//! sets cover the elements of HTML as grouped by the specification's
//! semantics chapters.

use crate::builder::Builder;
use crate::content::Content;
use crate::error::{Error, ErrorKind, Result};
use crate::node::Node;

pub const ROOT_ELEMENT: &[&str] = &["html"];

pub const DOCUMENT_METADATA: &[&str] = &["base", "head", "link", "meta", "style", "title"];

pub const SCRIPTING: &[&str] = &["noscript", "script"];

pub const SECTIONS: &[&str] = &[
    "address", "article", "aside", "body", "footer", "h1", "h2", "h3", "h4",
    "h5", "h6", "header", "hgroup", "nav", "section",
];

pub const GROUPING_CONTENT: &[&str] = &[
    "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure", "hr",
    "li", "ol", "p", "pre", "ul",
];

pub const TEXT_LEVEL_SEMANTICS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "data", "dfn",
    "em", "i", "kbd", "mark", "q", "rp", "rt", "ruby", "s", "samp", "small",
    "span", "strong", "sub", "sup", "time", "u", "var", "wbr",
];

pub const EDITS: &[&str] = &["del", "ins"];

pub const EMBEDDED_CONTENT: &[&str] = &[
    "area", "audio", "canvas", "embed", "iframe", "img", "map", "object",
    "param", "source", "track", "video",
];

pub const TABULAR_DATA: &[&str] = &[
    "caption", "col", "colgroup", "table", "tbody", "td", "tfoot", "th",
    "thead", "tr",
];

pub const FORMS: &[&str] = &[
    "button", "datalist", "fieldset", "form", "input", "keygen", "label",
    "legend", "meter", "optgroup", "option", "output", "progress", "select",
    "textarea",
];

pub const INTERACTIVE_ELEMENTS: &[&str] = &["command", "details", "dialog", "menu", "summary"];

/// Every HTML5 element name, sorted.
pub const HTML5_ELEMENT_NAMES: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b",
    "base", "bdi", "bdo", "blockquote", "body", "br", "button", "canvas",
    "caption", "cite", "code", "col", "colgroup", "command", "data",
    "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt",
    "em", "embed", "fieldset", "figcaption", "figure", "footer", "form",
    "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup", "hr",
    "html", "i", "iframe", "img", "input", "ins", "kbd", "keygen", "label",
    "legend", "li", "link", "map", "mark", "menu", "meta", "meter", "nav",
    "noscript", "object", "ol", "optgroup", "option", "output", "p",
    "param", "pre", "progress", "q", "rp", "rt", "ruby", "s", "samp",
    "script", "section", "select", "small", "source", "span", "strong",
    "style", "sub", "summary", "sup", "table", "tbody", "td", "textarea",
    "tfoot", "th", "thead", "time", "title", "tr", "track", "u", "ul",
    "var", "video", "wbr",
];

/// A fixed set of known element names with pre-bound element creation.
#[derive(Clone, Copy, Debug)]
pub struct Vocabulary {
    names: &'static [&'static str],
}

impl Vocabulary {
    /// A vocabulary over the given names
    pub const fn new(names: &'static [&'static str]) -> Self {
        Self { names }
    }

    /// The HTML5 element vocabulary
    pub const fn html5() -> Self {
        Self::new(HTML5_ELEMENT_NAMES)
    }

    /// The known names
    pub const fn names(&self) -> &'static [&'static str] {
        self.names
    }

    /// Returns true if the vocabulary contains `name`
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|known| *known == name)
    }

    /// Builds an element through `builder`, rejecting names outside the
    /// vocabulary.
    pub fn element(
        &self,
        builder: &Builder,
        name: &str,
        content: impl Into<Content>,
    ) -> Result<Node> {
        if !self.contains(name) {
            return Err(Error::with_message(
                ErrorKind::InvalidName {
                    name: name.to_string(),
                },
                format!("element name not in vocabulary: {name}"),
            ));
        }
        builder.build(name, content)
    }
}
