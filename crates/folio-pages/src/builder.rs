//! Page construction from a parsed body and front matter.
//!
//! [`PageBuilder`] derives everything a [`DocumentationPage`] needs that the
//! author did not state explicitly: title, slug, permalink, edit URL and the
//! table of contents.

use folio_content::{ContentTree, Node, TocRange};

use crate::front_matter::FrontMatter;
use crate::page::{DocumentationPage, Navigation, PageId};

/// Site-wide settings used when building pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSettings {
    /// URL prefix of the whole site (e.g., `/Axis/`).
    pub base_url: String,
    /// Path segment under which docs are served (e.g., `docs`).
    pub route_base: String,
    /// Base URL for "edit this page" links; the source path is appended.
    pub edit_url: Option<String>,
    /// Heading levels included in tables of contents.
    pub toc: TocRange,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            base_url: "/".to_owned(),
            route_base: "docs".to_owned(),
            edit_url: None,
            toc: TocRange::default(),
        }
    }
}

impl PageSettings {
    /// URL prefix shared by all doc permalinks (e.g., `/Axis/docs`).
    #[must_use]
    pub fn link_prefix(&self) -> String {
        join_url(&[&self.base_url, &self.route_base])
    }

    /// Slug for a page: the front matter `slug`, otherwise derived from the id.
    ///
    /// Relative slugs are resolved against the directory of the id; an `index`
    /// page takes its directory's slug.
    #[must_use]
    pub fn slug_for(&self, id: &str, front_matter: &FrontMatter) -> String {
        let dir = id.rsplit_once('/').map_or("", |(dir, _)| dir);

        match front_matter.slug.as_deref() {
            Some(slug) if slug.starts_with('/') => join_url(&[slug]),
            Some(slug) => join_url(&[dir, slug]),
            None => {
                let path = if id == "index" {
                    ""
                } else {
                    id.strip_suffix("/index").unwrap_or(id)
                };
                join_url(&[path])
            }
        }
    }

    /// Permalink for a slug: `{base_url}{route_base}{slug}`.
    ///
    /// A front matter `permalink` is used as-is.
    #[must_use]
    pub fn permalink_for(&self, slug: &str, front_matter: &FrontMatter) -> String {
        match front_matter.permalink.as_deref() {
            Some(permalink) => join_url(&[permalink]),
            None => join_url(&[&self.base_url, &self.route_base, slug]),
        }
    }

    /// Edit URL for a source path relative to the docs root.
    #[must_use]
    pub fn edit_url_for(&self, source: &str) -> Option<String> {
        let base = self.edit_url.as_deref()?;
        Some(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            source.trim_start_matches('/')
        ))
    }

    /// Table of contents range for a page, honoring front matter overrides.
    #[must_use]
    pub fn toc_range(&self, front_matter: &FrontMatter) -> TocRange {
        TocRange::new(
            front_matter.toc_min_heading_level.unwrap_or(self.toc.min),
            front_matter.toc_max_heading_level.unwrap_or(self.toc.max),
        )
    }

    /// Title for a page: front matter `title` > first H1 > id.
    #[must_use]
    pub fn title_for(&self, id: &str, front_matter: &FrontMatter, content_title: Option<&str>) -> String {
        front_matter
            .title
            .as_deref()
            .or(content_title)
            .unwrap_or(id)
            .to_owned()
    }
}

/// Join URL path segments into an absolute path without a trailing slash.
///
/// Empty segments are skipped; the root is `/`.
fn join_url(parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .flat_map(|part| part.split('/'))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    format!("/{joined}")
}

/// Plain text of the first top-level paragraph.
fn first_paragraph(body: &ContentTree) -> Option<String> {
    body.children
        .iter()
        .filter_map(Node::as_element)
        .find(|element| element.tag == "p")
        .map(|p| p.text().trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// Builder for [`DocumentationPage`].
///
/// # Example
///
/// ```
/// use folio_content::MarkdownParser;
/// use folio_pages::{PageBuilder, PageSettings};
///
/// let body = MarkdownParser::new().parse("# Getting Started\n\nHello.");
/// let page = PageBuilder::new("intro", body).build(&PageSettings::default());
///
/// assert_eq!(page.title, "Getting Started");
/// assert_eq!(page.permalink, "/docs/intro");
/// ```
#[derive(Debug)]
pub struct PageBuilder {
    id: PageId,
    body: ContentTree,
    front_matter: FrontMatter,
    navigation: Navigation,
    source: Option<String>,
}

impl PageBuilder {
    /// Start building a page with the given id and body.
    pub fn new(id: impl Into<PageId>, body: ContentTree) -> Self {
        Self {
            id: id.into(),
            body,
            front_matter: FrontMatter::default(),
            navigation: Navigation::default(),
            source: None,
        }
    }

    /// Set the front matter.
    #[must_use]
    pub fn front_matter(mut self, front_matter: FrontMatter) -> Self {
        self.front_matter = front_matter;
        self
    }

    /// Set previous/next references.
    #[must_use]
    pub fn navigation(mut self, navigation: Navigation) -> Self {
        self.navigation = navigation;
        self
    }

    /// Set the source path (relative to the docs root).
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Build the page.
    #[must_use]
    pub fn build(self, settings: &PageSettings) -> DocumentationPage {
        let id = self.id.as_str();
        let content_title = self.body.title();
        let title = settings.title_for(id, &self.front_matter, content_title.as_deref());
        let slug = settings.slug_for(id, &self.front_matter);
        let permalink = settings.permalink_for(&slug, &self.front_matter);
        let toc = self.body.toc(settings.toc_range(&self.front_matter));
        let edit_url = self
            .source
            .as_deref()
            .and_then(|source| settings.edit_url_for(source));

        DocumentationPage {
            title,
            description: self
                .front_matter
                .description
                .clone()
                .or_else(|| first_paragraph(&self.body)),
            slug,
            permalink,
            toc,
            content_title,
            edit_url,
            tags: self.front_matter.tags.clone(),
            front_matter: self.front_matter,
            body: self.body,
            navigation: self.navigation,
            source: self.source,
            id: self.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_content::MarkdownParser;

    use super::*;

    fn axis_settings() -> PageSettings {
        PageSettings {
            base_url: "/Axis/".to_owned(),
            edit_url: Some("https://github.com/Sleitnick/Axis/edit/master/docs/".to_owned()),
            ..PageSettings::default()
        }
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url(&["/Axis/", "docs", "/intro"]), "/Axis/docs/intro");
        assert_eq!(join_url(&["/", "docs", "/"]), "/docs");
        assert_eq!(join_url(&[""]), "/");
    }

    #[test]
    fn test_link_prefix() {
        assert_eq!(axis_settings().link_prefix(), "/Axis/docs");
        assert_eq!(PageSettings::default().link_prefix(), "/docs");
    }

    #[test]
    fn test_slug_derived_from_id() {
        let settings = PageSettings::default();
        let fm = FrontMatter::default();
        assert_eq!(settings.slug_for("intro", &fm), "/intro");
        assert_eq!(settings.slug_for("guides/providers", &fm), "/guides/providers");
        assert_eq!(settings.slug_for("guides/index", &fm), "/guides");
        assert_eq!(settings.slug_for("index", &fm), "/");
    }

    #[test]
    fn test_slug_from_front_matter() {
        let settings = PageSettings::default();
        let absolute = FrontMatter {
            slug: Some("/start".to_owned()),
            ..Default::default()
        };
        let relative = FrontMatter {
            slug: Some("start".to_owned()),
            ..Default::default()
        };
        assert_eq!(settings.slug_for("guides/intro", &absolute), "/start");
        assert_eq!(settings.slug_for("guides/intro", &relative), "/guides/start");
    }

    #[test]
    fn test_permalink() {
        let settings = axis_settings();
        let fm = FrontMatter::default();
        assert_eq!(settings.permalink_for("/intro", &fm), "/Axis/docs/intro");

        let explicit = FrontMatter {
            permalink: Some("/elsewhere/".to_owned()),
            ..Default::default()
        };
        assert_eq!(settings.permalink_for("/intro", &explicit), "/elsewhere");
    }

    #[test]
    fn test_edit_url() {
        assert_eq!(
            axis_settings().edit_url_for("intro.md").as_deref(),
            Some("https://github.com/Sleitnick/Axis/edit/master/docs/intro.md")
        );
        assert!(PageSettings::default().edit_url_for("intro.md").is_none());
    }

    #[test]
    fn test_title_precedence() {
        let settings = PageSettings::default();
        let titled = FrontMatter {
            title: Some("Custom".to_owned()),
            ..Default::default()
        };
        assert_eq!(settings.title_for("intro", &titled, Some("Heading")), "Custom");
        assert_eq!(
            settings.title_for("intro", &FrontMatter::default(), Some("Heading")),
            "Heading"
        );
        assert_eq!(settings.title_for("intro", &FrontMatter::default(), None), "intro");
    }

    #[test]
    fn test_description_precedence() {
        let body = MarkdownParser::new().parse("# Title\n\nFirst *paragraph*.\n\nSecond.");
        let page = PageBuilder::new("intro", body.clone()).build(&PageSettings::default());
        assert_eq!(page.description.as_deref(), Some("First paragraph."));

        let fm = FrontMatter {
            description: Some("Explicit".to_owned()),
            ..Default::default()
        };
        let page = PageBuilder::new("intro", body)
            .front_matter(fm)
            .build(&PageSettings::default());
        assert_eq!(page.description.as_deref(), Some("Explicit"));
    }

    #[test]
    fn test_toc_range_override() {
        let settings = PageSettings::default();
        let fm = FrontMatter {
            toc_max_heading_level: Some(5),
            ..Default::default()
        };
        assert_eq!(settings.toc_range(&fm), TocRange::new(2, 5));
    }

    #[test]
    fn test_toc_never_includes_title_heading() {
        let body = MarkdownParser::new().parse("# Getting Started\n\n## Install");
        let fm = FrontMatter {
            toc_min_heading_level: Some(1),
            ..Default::default()
        };
        let page = PageBuilder::new("intro", body)
            .front_matter(fm)
            .build(&PageSettings::default());
        assert_eq!(page.toc.len(), 1);
        assert_eq!(page.toc[0].level, 2);
        assert_eq!(page.toc[0].title, "Install");
    }

    #[test]
    fn test_build_page() {
        let body = MarkdownParser::new().parse("# Getting Started\n\n## Install\n\nText");
        let fm = FrontMatter {
            sidebar_position: Some(1.0),
            tags: vec!["lua".to_owned()],
            ..Default::default()
        };
        let page = PageBuilder::new("intro", body)
            .front_matter(fm)
            .source("intro.md")
            .build(&axis_settings());

        assert_eq!(page.id, "intro");
        assert_eq!(page.title, "Getting Started");
        assert_eq!(page.content_title.as_deref(), Some("Getting Started"));
        assert_eq!(page.slug, "/intro");
        assert_eq!(page.permalink, "/Axis/docs/intro");
        assert_eq!(page.toc.len(), 1);
        assert_eq!(page.toc[0].id, "install");
        assert_eq!(page.description.as_deref(), Some("Text"));
        assert_eq!(page.tags, vec!["lua".to_owned()]);
        assert_eq!(page.source.as_deref(), Some("intro.md"));
        assert!(page.edit_url.is_some());
        assert!(page.navigation.is_empty());
    }
}
