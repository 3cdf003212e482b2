//! Heading anchors and table of contents entries.

use std::collections::{HashMap, HashSet};

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Inclusive range of heading levels that appear in a table of contents.
///
/// The page title (H1) is never included. The default (`2..=3`) also leaves
/// out deep sub-sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TocRange {
    /// Smallest heading level included.
    pub min: u8,
    /// Largest heading level included.
    pub max: u8,
}

impl TocRange {
    /// Create a range, clamping both ends to `2..=6` and ordering them.
    #[must_use]
    pub fn new(min: u8, max: u8) -> Self {
        let min = min.clamp(2, 6);
        let max = max.clamp(2, 6);
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Whether `level` falls inside the range.
    #[must_use]
    pub fn contains(self, level: u8) -> bool {
        (self.min..=self.max).contains(&level)
    }
}

impl Default for TocRange {
    fn default() -> Self {
        Self { min: 2, max: 3 }
    }
}

/// Generator for unique heading anchor IDs within one document.
///
/// Repeated headings get a numeric suffix: `faq`, `faq-1`, `faq-2`.
/// Generated IDs never repeat an ID that was already handed out or reserved.
#[derive(Debug, Default)]
pub struct HeadingIds {
    counts: HashMap<String, usize>,
    used: HashSet<String>,
}

impl HeadingIds {
    /// Create an empty generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the anchor ID for a heading with the given text.
    pub fn generate(&mut self, text: &str) -> String {
        let base_id = slugify(text);
        let count = self.counts.entry(base_id.clone()).or_default();
        loop {
            let id = match *count {
                0 => base_id.clone(),
                n => format!("{base_id}-{n}"),
            };
            *count += 1;
            if self.used.insert(id.clone()) {
                return id;
            }
        }
    }

    /// Mark an explicit heading ID as taken.
    pub fn reserve(&mut self, id: &str) {
        self.used.insert(id.to_owned());
    }
}

/// Convert text to URL-safe slug.
///
/// Converts to lowercase, replaces whitespace/dashes/underscores with single dashes,
/// and removes other non-alphanumeric characters.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true;

    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            result.extend(c.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("  Spaces  "), "spaces");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("kebab-case"), "kebab-case");
        assert_eq!(slugify("snake_case"), "snake-case");
    }

    #[test]
    fn test_slugify_keeps_unicode_letters() {
        assert_eq!(slugify("Über Axis"), "über-axis");
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let mut ids = HeadingIds::new();
        assert_eq!(ids.generate("FAQ"), "faq");
        assert_eq!(ids.generate("FAQ"), "faq-1");
        assert_eq!(ids.generate("FAQ"), "faq-2");
        assert_eq!(ids.generate("Other"), "other");
    }

    #[test]
    fn test_reserved_heading_ids_are_skipped() {
        let mut ids = HeadingIds::new();
        ids.reserve("faq");
        ids.reserve("faq-1");
        assert_eq!(ids.generate("FAQ"), "faq-2");
        assert_eq!(ids.generate("FAQ"), "faq-3");
    }

    #[test]
    fn test_generated_suffix_does_not_clash_with_heading_text() {
        let mut ids = HeadingIds::new();
        assert_eq!(ids.generate("FAQ 1"), "faq-1");
        assert_eq!(ids.generate("FAQ"), "faq");
        assert_eq!(ids.generate("FAQ"), "faq-2");
    }

    #[test]
    fn test_toc_range_default() {
        let range = TocRange::default();
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(3));
        assert!(!range.contains(4));
    }

    #[test]
    fn test_toc_range_normalizes_bounds() {
        assert_eq!(TocRange::new(5, 2), TocRange { min: 2, max: 5 });
        assert_eq!(TocRange::new(0, 9), TocRange { min: 2, max: 6 });
        assert_eq!(TocRange::new(1, 3), TocRange { min: 2, max: 3 });
        assert!(!TocRange::new(1, 1).contains(1));
    }
}
