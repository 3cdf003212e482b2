//! Materialized page types.

use std::borrow::Borrow;
use std::fmt;

use folio_content::{ContentTree, TocEntry};
use serde::{Deserialize, Serialize};

use crate::front_matter::FrontMatter;

/// Stable identifier of a page within a registry (e.g., `intro`, `guides/providers`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Create an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&PageId> for PageId {
    fn from(id: &PageId) -> Self {
        id.clone()
    }
}

impl PartialEq<str> for PageId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PageId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Reference to a sibling page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Identifier of the referenced page.
    pub id: PageId,
    /// Display title of the referenced page.
    pub title: String,
    /// URL of the referenced page.
    pub permalink: String,
}

/// Previous/next references of a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    /// The page before this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<NavLink>,
    /// The page after this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NavLink>,
}

impl Navigation {
    /// Whether neither link is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.previous.is_none() && self.next.is_none()
    }
}

/// A documentation page after materialization.
///
/// Pages are built once and shared read-only through the registry; there is
/// no API to mutate a registered page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentationPage {
    /// Unique identifier within the registry.
    pub id: PageId,
    /// Display title.
    pub title: String,
    /// Short description (from front matter).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Route path relative to the docs root (e.g., `/intro`).
    pub slug: String,
    /// Absolute URL path (e.g., `/Axis/docs/intro`).
    pub permalink: String,
    /// Author-supplied metadata.
    pub front_matter: FrontMatter,
    /// Headings for the table of contents (possibly empty).
    pub toc: Vec<TocEntry>,
    /// Parsed body.
    pub body: ContentTree,
    /// Text of the first H1 in the body, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_title: Option<String>,
    /// Sibling page references.
    #[serde(default)]
    pub navigation: Navigation,
    /// URL for editing the page source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,
    /// Authoring source path relative to the docs root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Tags (mirrors front matter).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_page_id_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(PageId::from("intro"), 1);
        assert_eq!(map.get("intro"), Some(&1));
    }

    #[test]
    fn test_page_id_display_and_eq() {
        let id = PageId::new("guides/providers");
        assert_eq!(id.to_string(), "guides/providers");
        assert_eq!(id, "guides/providers");
    }

    #[test]
    fn test_page_id_serializes_as_string() {
        let json = serde_json::to_string(&PageId::from("intro")).unwrap();
        assert_eq!(json, "\"intro\"");
    }

    #[test]
    fn test_navigation_is_empty() {
        assert!(Navigation::default().is_empty());
        let nav = Navigation {
            previous: None,
            next: Some(NavLink {
                id: "providers".into(),
                title: "Providers".to_owned(),
                permalink: "/docs/providers".to_owned(),
            }),
        };
        assert!(!nav.is_empty());
    }
}
