//! Page front matter.
//!
//! Front matter is the YAML block at the top of a markdown source. Keys the
//! page pipeline understands are typed fields; anything else is kept in
//! [`FrontMatter::extra`] untouched so layouts and hosts can read it.
//!
//! # Recognized Keys
//!
//! - `id`, `title`, `description`, `slug`, `permalink`, `tags`
//! - `sidebar_position` (alias `sidebarPosition`): ordering among siblings
//! - `pagination_prev` / `pagination_next`: explicit neighbor ids, `null` disables
//! - `hide_table_of_contents`
//! - `toc_min_heading_level` / `toc_max_heading_level`

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Author-supplied page metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    /// Page identifier (overrides the path-derived id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Page title (overrides H1 extraction).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Page description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Route path relative to the docs root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Absolute URL path, bypassing slug-based permalink construction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,

    /// Ordering among sibling pages (lower first).
    #[serde(
        default,
        alias = "sidebarPosition",
        skip_serializing_if = "Option::is_none"
    )]
    pub sidebar_position: Option<f64>,

    /// Tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Explicit previous page: absent = automatic, `null` = none.
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub pagination_prev: Option<Option<String>>,

    /// Explicit next page: absent = automatic, `null` = none.
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub pagination_next: Option<Option<String>>,

    /// Hide the table of contents when rendering.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hide_table_of_contents: bool,

    /// Smallest heading level in the table of contents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toc_min_heading_level: Option<u8>,

    /// Largest heading level in the table of contents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toc_max_heading_level: Option<u8>,

    /// Unrecognized keys, passed through as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FrontMatter {
    /// Parse front matter from YAML content.
    ///
    /// Empty content returns a default instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a recognized key has the wrong type.
    pub fn from_yaml(content: &str) -> Result<Self, FrontMatterError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(trimmed).map_err(|e| FrontMatterError::Parse(e.to_string()))
    }

    /// Whether no key is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Distinguish an explicit `null` from a missing key.
fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Error type for front matter parsing.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// YAML parsing error.
    #[error("Invalid front matter: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_front_matter() {
        let fm = FrontMatter::from_yaml("  \n").unwrap();
        assert!(fm.is_empty());
    }

    #[test]
    fn test_sidebar_position() {
        let fm = FrontMatter::from_yaml("sidebar_position: 1").unwrap();
        assert_eq!(fm.sidebar_position, Some(1.0));
        assert!(fm.extra.is_empty());
    }

    #[test]
    fn test_sidebar_position_camel_case_alias() {
        let fm = FrontMatter::from_yaml("sidebarPosition: 2.5").unwrap();
        assert_eq!(fm.sidebar_position, Some(2.5));
    }

    #[test]
    fn test_recognized_keys() {
        let yaml = r"
id: intro
title: Getting Started
description: Axis is a provider framework.
slug: /intro
tags: [lua, roblox]
hide_table_of_contents: true
toc_max_heading_level: 4
";
        let fm = FrontMatter::from_yaml(yaml).unwrap();
        assert_eq!(fm.id.as_deref(), Some("intro"));
        assert_eq!(fm.title.as_deref(), Some("Getting Started"));
        assert_eq!(fm.slug.as_deref(), Some("/intro"));
        assert_eq!(fm.tags, vec!["lua".to_owned(), "roblox".to_owned()]);
        assert!(fm.hide_table_of_contents);
        assert_eq!(fm.toc_max_heading_level, Some(4));
        assert!(fm.extra.is_empty());
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let fm = FrontMatter::from_yaml("sidebar_label: Intro\nkeywords: [a, b]").unwrap();
        assert_eq!(fm.extra.get("sidebar_label"), Some(&serde_json::json!("Intro")));
        assert_eq!(fm.extra.get("keywords"), Some(&serde_json::json!(["a", "b"])));
    }

    #[test]
    fn test_pagination_absent_null_and_set() {
        let fm = FrontMatter::from_yaml("title: x").unwrap();
        assert_eq!(fm.pagination_next, None);

        let fm = FrontMatter::from_yaml("pagination_next: null").unwrap();
        assert_eq!(fm.pagination_next, Some(None));

        let fm = FrontMatter::from_yaml("pagination_prev: providers").unwrap();
        assert_eq!(fm.pagination_prev, Some(Some("providers".to_owned())));
    }

    #[test]
    fn test_invalid_yaml() {
        let result = FrontMatter::from_yaml("title: [unclosed");
        assert!(matches!(result, Err(FrontMatterError::Parse(_))));
    }

    #[test]
    fn test_wrong_type_for_recognized_key() {
        let result = FrontMatter::from_yaml("sidebar_position: first");
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_skips_unset_keys() {
        let fm = FrontMatter {
            sidebar_position: Some(1.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&fm).unwrap();
        assert_eq!(json, serde_json::json!({ "sidebar_position": 1.0 }));
    }
}
