//! Page rendering through an injected layout.
//!
//! The registry never produces markup itself. [`render`] hands a [`PageView`]
//! of the page (body, front matter and table of contents untouched) to a
//! [`Layout`] and propagates whatever error it reports.

use std::fmt::Write;

use folio_content::{ContentTree, TocEntry, escape_html, write_html};

use crate::error::RegistryError;
use crate::front_matter::FrontMatter;
use crate::page::{DocumentationPage, NavLink, Navigation, PageId};

/// Opaque error reported by a layout.
pub type LayoutError = Box<dyn std::error::Error + Send + Sync>;

/// Borrowed view of a page handed to a [`Layout`].
#[derive(Clone, Copy, Debug)]
pub struct PageView<'a> {
    /// Page identifier.
    pub id: &'a PageId,
    /// Display title.
    pub title: &'a str,
    /// Text of the body's first H1, if any.
    pub content_title: Option<&'a str>,
    /// Parsed body.
    pub body: &'a ContentTree,
    /// Author-supplied metadata.
    pub front_matter: &'a FrontMatter,
    /// Table of contents.
    pub toc: &'a [TocEntry],
    /// Previous/next references.
    pub navigation: &'a Navigation,
    /// Edit link target.
    pub edit_url: Option<&'a str>,
}

impl<'a> From<&'a DocumentationPage> for PageView<'a> {
    fn from(page: &'a DocumentationPage) -> Self {
        Self {
            id: &page.id,
            title: &page.title,
            content_title: page.content_title.as_deref(),
            body: &page.body,
            front_matter: &page.front_matter,
            toc: &page.toc,
            navigation: &page.navigation,
            edit_url: page.edit_url.as_deref(),
        }
    }
}

/// Rendering collaborator providing the shared page chrome.
pub trait Layout: Send + Sync {
    /// Produce final markup for a page.
    fn render_page(&self, view: &PageView<'_>) -> Result<String, LayoutError>;
}

/// Render a materialized page with the given layout.
///
/// # Errors
///
/// Returns `RegistryError::RenderFailure` wrapping the layout's error.
pub fn render(page: &DocumentationPage, layout: &dyn Layout) -> Result<String, RegistryError> {
    layout
        .render_page(&PageView::from(page))
        .map_err(|source| {
            tracing::warn!(id = %page.id, error = %source, "Layout failed to render page");
            RegistryError::RenderFailure {
                id: page.id.clone(),
                source,
            }
        })
}

/// Default documentation layout.
///
/// Produces an `<article>` with:
/// - a title header, unless the body's own H1 already shows the title
/// - the body serialized verbatim inside `<div class="markdown">`
/// - a table of contents, only when there are entries and the page does not
///   set `hide_table_of_contents`
/// - an edit link and previous/next pagination when available
#[derive(Debug, Clone)]
pub struct DocLayout {
    edit_label: String,
    previous_label: String,
    next_label: String,
}

impl DocLayout {
    /// Create a layout with English labels.
    #[must_use]
    pub fn new() -> Self {
        Self {
            edit_label: "Edit this page".to_owned(),
            previous_label: "Previous".to_owned(),
            next_label: "Next".to_owned(),
        }
    }

    /// Set the edit link label.
    #[must_use]
    pub fn with_edit_label(mut self, label: impl Into<String>) -> Self {
        self.edit_label = label.into();
        self
    }

    /// Set the pagination labels.
    #[must_use]
    pub fn with_pagination_labels(
        mut self,
        previous: impl Into<String>,
        next: impl Into<String>,
    ) -> Self {
        self.previous_label = previous.into();
        self.next_label = next.into();
        self
    }

    fn write_toc(toc: &[TocEntry], out: &mut String) {
        out.push_str(r#"<nav class="table-of-contents"><ul>"#);
        for entry in toc {
            write!(
                out,
                r##"<li class="toc-level-{}"><a href="#{}">{}</a></li>"##,
                entry.level,
                escape_html(&entry.id),
                escape_html(&entry.title)
            )
            .unwrap();
        }
        out.push_str("</ul></nav>");
    }

    fn write_pagination(&self, navigation: &Navigation, out: &mut String) {
        out.push_str(r#"<nav class="pagination-nav" aria-label="Docs pages">"#);
        if let Some(link) = &navigation.previous {
            Self::write_nav_link(link, "prev", &self.previous_label, out);
        }
        if let Some(link) = &navigation.next {
            Self::write_nav_link(link, "next", &self.next_label, out);
        }
        out.push_str("</nav>");
    }

    fn write_nav_link(link: &NavLink, direction: &str, label: &str, out: &mut String) {
        write!(
            out,
            r#"<a class="pagination-nav__link pagination-nav__link--{direction}" href="{}"><div class="pagination-nav__sublabel">{}</div><div class="pagination-nav__label">{}</div></a>"#,
            escape_html(&link.permalink),
            escape_html(label),
            escape_html(&link.title)
        )
        .unwrap();
    }
}

impl Default for DocLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout for DocLayout {
    fn render_page(&self, view: &PageView<'_>) -> Result<String, LayoutError> {
        let mut out = String::with_capacity(4096);
        write!(
            out,
            r#"<article class="doc" data-page-id="{}">"#,
            escape_html(view.id.as_str())
        )?;

        if view.content_title != Some(view.title) {
            write!(out, "<header><h1>{}</h1></header>", escape_html(view.title))?;
        }

        out.push_str(r#"<div class="markdown">"#);
        write_html(&view.body.children, &mut out);
        out.push_str("</div>");

        if !view.toc.is_empty() && !view.front_matter.hide_table_of_contents {
            Self::write_toc(view.toc, &mut out);
        }

        if let Some(edit_url) = view.edit_url {
            write!(
                out,
                r#"<footer class="doc-footer"><a class="edit-link" href="{}">{}</a></footer>"#,
                escape_html(edit_url),
                escape_html(&self.edit_label)
            )?;
        }

        if !view.navigation.is_empty() {
            self.write_pagination(view.navigation, &mut out);
        }

        out.push_str("</article>");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use folio_content::{MarkdownParser, to_html};

    use super::*;
    use crate::builder::{PageBuilder, PageSettings};

    fn page(markdown: &str, front_matter: FrontMatter) -> DocumentationPage {
        PageBuilder::new("intro", MarkdownParser::new().parse(markdown))
            .front_matter(front_matter)
            .build(&PageSettings::default())
    }

    struct FailingLayout;

    impl Layout for FailingLayout {
        fn render_page(&self, _view: &PageView<'_>) -> Result<String, LayoutError> {
            Err("theme missing".into())
        }
    }

    #[test]
    fn test_render_body_verbatim_without_toc() {
        let page = page(
            "# Getting Started\n\nAxis is a provider framework.",
            FrontMatter {
                sidebar_position: Some(1.0),
                ..Default::default()
            },
        );
        assert!(page.toc.is_empty());

        let html = render(&page, &DocLayout::new()).unwrap();
        assert!(html.contains("Getting Started"));
        assert!(html.contains(&to_html(&page.body)));
        assert!(!html.contains("table-of-contents"));
        // Title comes from the body's own H1
        assert!(!html.contains("<header>"));
    }

    #[test]
    fn test_render_header_when_body_has_no_h1() {
        let page = page(
            "Just text.",
            FrontMatter {
                title: Some("Providers".to_owned()),
                ..Default::default()
            },
        );
        let html = render(&page, &DocLayout::new()).unwrap();
        assert!(html.contains("<header><h1>Providers</h1></header>"));
    }

    #[test]
    fn test_render_header_when_title_differs_from_h1() {
        let page = page(
            "# Heading\n\nBody text.",
            FrontMatter {
                title: Some("Getting Started".to_owned()),
                ..Default::default()
            },
        );
        assert_eq!(page.title, "Getting Started");
        assert_eq!(page.content_title.as_deref(), Some("Heading"));

        let html = render(&page, &DocLayout::new()).unwrap();
        assert!(html.contains("<header><h1>Getting Started</h1></header>"));
        assert!(html.contains(r#"<h1 id="heading">Heading</h1>"#));
    }

    #[test]
    fn test_render_toc() {
        let page = page("# T\n\n## Install\n\n### Studio", FrontMatter::default());
        let html = render(&page, &DocLayout::new()).unwrap();
        assert!(html.contains(r#"<nav class="table-of-contents">"#));
        assert!(html.contains(r##"<li class="toc-level-2"><a href="#install">Install</a></li>"##));
        assert!(html.contains(r##"<li class="toc-level-3"><a href="#studio">Studio</a></li>"##));
    }

    #[test]
    fn test_render_hidden_toc() {
        let page = page(
            "# T\n\n## Install",
            FrontMatter {
                hide_table_of_contents: true,
                ..Default::default()
            },
        );
        assert_eq!(page.toc.len(), 1);
        let html = render(&page, &DocLayout::new()).unwrap();
        assert!(!html.contains("table-of-contents"));
    }

    #[test]
    fn test_render_pagination_and_edit_link() {
        let mut page = page("# T", FrontMatter::default());
        page.edit_url = Some("https://example.com/edit/intro.md".to_owned());
        page.navigation.next = Some(NavLink {
            id: "providers".into(),
            title: "Providers".to_owned(),
            permalink: "/docs/providers".to_owned(),
        });

        let html = render(&page, &DocLayout::new().with_edit_label("Edit")).unwrap();
        assert!(html.contains(r#"<a class="edit-link" href="https://example.com/edit/intro.md">Edit</a>"#));
        assert!(html.contains(r#"pagination-nav__link--next" href="/docs/providers""#));
        assert!(html.contains(r#"<div class="pagination-nav__label">Providers</div>"#));
        assert!(!html.contains("pagination-nav__link--prev"));
    }

    #[test]
    fn test_layout_failure_is_propagated() {
        let page = page("# T", FrontMatter::default());
        let err = render(&page, &FailingLayout).unwrap_err();
        match err {
            RegistryError::RenderFailure { id, source } => {
                assert_eq!(id, "intro");
                assert_eq!(source.to_string(), "theme missing");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_view_borrows_unmodified_fields() {
        let page = page("# T\n\n## A", FrontMatter::default());
        let view = PageView::from(&page);
        assert!(std::ptr::eq(view.body, &page.body));
        assert!(std::ptr::eq(view.front_matter, &page.front_matter));
        assert_eq!(view.toc, page.toc.as_slice());
    }
}
