//! Content tree types.
//!
//! A [`ContentTree`] is the already-parsed body of a page. Elements carry a
//! tag name, ordered attributes and children; text nodes are stored
//! unescaped and escaped only on serialization.

use crate::toc::{TocEntry, TocRange};

/// A node in a content tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// An element with a tag, attributes and children.
    Element(Element),
    /// Plain text (unescaped).
    Text(String),
    /// Raw HTML passed through from the source.
    Raw(String),
}

impl Node {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Borrow the element if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) | Self::Raw(_) => None,
        }
    }

    /// Append the plain text of this node (and its descendants) to `out`.
    pub(crate) fn collect_text(&self, out: &mut String) {
        match self {
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            Self::Text(text) => out.push_str(text),
            Self::Raw(_) => {}
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An element node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    /// Tag name (e.g., `p`, `h2`, `code`).
    pub tag: String,
    /// Attributes in insertion order.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub attrs: Vec<(String, String)>,
    /// Child nodes.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element without attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Add a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Add a text child.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    /// Set an attribute, replacing an existing value with the same name.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Heading level (1-6) if this is an `h1`..`h6` element.
    #[must_use]
    pub fn heading_level(&self) -> Option<u8> {
        match self.tag.as_str() {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        }
    }

    /// Concatenated plain text of all descendants.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// The parsed body of a page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentTree {
    /// Top-level nodes in document order.
    pub children: Vec<Node>,
}

impl ContentTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree from top-level nodes.
    #[must_use]
    pub fn from_nodes(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Append a top-level node.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// All heading elements in document order, at any depth.
    pub fn headings(&self) -> Vec<&Element> {
        fn walk<'a>(nodes: &'a [Node], out: &mut Vec<&'a Element>) {
            for node in nodes {
                if let Node::Element(element) = node {
                    if element.heading_level().is_some() {
                        out.push(element);
                    } else {
                        walk(&element.children, out);
                    }
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.children, &mut out);
        out
    }

    /// Text of the first `h1`, used as the content title.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.headings()
            .into_iter()
            .find(|h| h.heading_level() == Some(1))
            .map(|h| h.text().trim().to_owned())
    }

    /// Table of contents for headings within `range`.
    ///
    /// Headings without an `id` attribute cannot be linked and are skipped.
    #[must_use]
    pub fn toc(&self, range: TocRange) -> Vec<TocEntry> {
        self.headings()
            .into_iter()
            .filter_map(|h| {
                let level = h.heading_level()?;
                if !range.contains(level) {
                    return None;
                }
                Some(TocEntry {
                    level,
                    title: h.text().trim().to_owned(),
                    id: h.attr("id")?.to_owned(),
                })
            })
            .collect()
    }
}
