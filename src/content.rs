//! Loosely-typed construction arguments
//!
//! [`Content`] is the closed set of argument kinds the construction engine
//! accepts. Anything passed as a child converts into exactly one variant up
//! front; the flattening algorithm in [`crate::builder`] then applies one
//! rule per variant, so classification happens once per argument and never
//! by runtime probing.

use std::fmt;

use crate::node::{Comment, Element, Node, ProcessingInstruction};

/// A construction argument, classified by kind.
pub enum Content {
    /// Nothing; skipped during flattening (what `Option::None` converts to)
    Empty,
    /// An already-built node, appended as-is (fragments are spliced)
    Node(Node),
    /// A string; becomes a text node as an element child, raw markup in
    /// a bare embed
    Str(String),
    /// Attribute pairs merged into the enclosing element
    Map(Vec<(String, String)>),
    /// An ordered group, flattened recursively
    List(Vec<Content>),
    /// A deferred producer, invoked exactly once and reclassified
    Lazy(Box<dyn FnOnce() -> Content>),
    /// A one-shot producer, drained exactly once in order
    Iter(Box<dyn Iterator<Item = Content>>),
}

impl Content {
    /// Wraps a deferred producer; it is invoked exactly once, when the
    /// argument is flattened.
    pub fn lazy<F, C>(producer: F) -> Self
    where
        F: FnOnce() -> C + 'static,
        C: Into<Content>,
    {
        Self::Lazy(Box::new(move || producer().into()))
    }

    /// Wraps a producer of items; it is drained exactly once, in order,
    /// when the argument is flattened.
    pub fn items<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Content> + 'static,
        I::IntoIter: 'static,
    {
        Self::Iter(Box::new(items.into_iter().map(Into::into)))
    }

    /// One-word kind label, used in error messages
    pub(crate) const fn kind_label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Node(_) => "node",
            Self::Str(_) => "string",
            Self::Map(_) => "attributes",
            Self::List(_) => "list",
            Self::Lazy(_) => "lazy",
            Self::Iter(_) => "iterator",
        }
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Map(pairs) => f.debug_tuple("Map").field(pairs).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Lazy(_) => write!(f, "Lazy(..)"),
            Self::Iter(_) => write!(f, "Iter(..)"),
        }
    }
}

/// A single attribute pair.
pub fn attr(name: impl Into<String>, value: impl Into<String>) -> Content {
    Content::Map(vec![(name.into(), value.into())])
}

/// An attribute mapping; later pairs override earlier ones on merge.
pub fn attrs<I, K, V>(pairs: I) -> Content
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    Content::Map(
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect(),
    )
}

impl From<Node> for Content {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Element> for Content {
    fn from(element: Element) -> Self {
        Self::Node(Node::Element(element))
    }
}

impl From<Comment> for Content {
    fn from(comment: Comment) -> Self {
        Self::Node(Node::Comment(comment))
    }
}

impl From<ProcessingInstruction> for Content {
    fn from(pi: ProcessingInstruction) -> Self {
        Self::Node(Node::ProcessingInstruction(pi))
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for Content {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<char> for Content {
    fn from(value: char) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<bool> for Content {
    fn from(value: bool) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<()> for Content {
    fn from((): ()) -> Self {
        Self::Empty
    }
}

macro_rules! impl_content_from_number {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Content {
                fn from(value: $ty) -> Self {
                    Self::Str(value.to_string())
                }
            }
        )+
    };
}

impl_content_from_number!(i32, i64, u32, u64, usize, f64);

impl<T: Into<Content>> From<Option<T>> for Content {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Self::Empty,
        }
    }
}

impl<T: Into<Content>> From<Vec<T>> for Content {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Content>, const N: usize> From<[T; N]> for Content {
    fn from(items: [T; N]) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl FromIterator<Content> for Content {
    fn from_iter<I: IntoIterator<Item = Content>>(iter: I) -> Self {
        Self::List(iter.into_iter().collect())
    }
}

macro_rules! impl_content_from_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<Content>),+> From<($($name,)+)> for Content {
            #[allow(non_snake_case)]
            fn from(($($name,)+): ($($name,)+)) -> Self {
                Self::List(vec![$($name.into()),+])
            }
        }
    };
}

impl_content_from_tuple!(A);
impl_content_from_tuple!(A, B);
impl_content_from_tuple!(A, B, C);
impl_content_from_tuple!(A, B, C, D);
impl_content_from_tuple!(A, B, C, D, E);
impl_content_from_tuple!(A, B, C, D, E, F);
impl_content_from_tuple!(A, B, C, D, E, F, G);
impl_content_from_tuple!(A, B, C, D, E, F, G, H);
impl_content_from_tuple!(A, B, C, D, E, F, G, H, I);
impl_content_from_tuple!(A, B, C, D, E, F, G, H, I, J);
impl_content_from_tuple!(A, B, C, D, E, F, G, H, I, J, K);
impl_content_from_tuple!(A, B, C, D, E, F, G, H, I, J, K, L);
