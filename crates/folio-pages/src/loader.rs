//! Deferred page factories.
//!
//! A [`PageLoader`] is what gets registered: it produces the page only when
//! the registry first resolves it. Three kinds are provided:
//!
//! - any `Fn() -> impl Future<Output = Result<DocumentationPage, LoadError>>`
//! - [`StaticPage`]: an already-built page
//! - [`MarkdownSource`]: a markdown file with YAML front matter

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use folio_content::{MarkdownParser, split_front_matter};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use crate::builder::{PageBuilder, PageSettings};
use crate::error::LoadError;
use crate::front_matter::FrontMatter;
use crate::page::{DocumentationPage, Navigation, PageId};

/// Future returned by [`PageLoader::load`].
pub type LoadFuture<'a> = BoxFuture<'a, Result<DocumentationPage, LoadError>>;

/// Deferred factory for a [`DocumentationPage`].
///
/// Implementations should be free of side effects on the registry; the
/// registry calls `load` at most once per successful materialization and may
/// drop the returned future before completion.
pub trait PageLoader: Send + Sync {
    /// Produce the page.
    fn load(&self) -> LoadFuture<'_>;
}

impl<F, Fut> PageLoader for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<DocumentationPage, LoadError>> + Send + 'static,
{
    fn load(&self) -> LoadFuture<'_> {
        self().boxed()
    }
}

/// Loader for a page that is already built.
#[derive(Debug, Clone)]
pub struct StaticPage(pub DocumentationPage);

impl PageLoader for StaticPage {
    fn load(&self) -> LoadFuture<'_> {
        futures_util::future::ready(Ok(self.0.clone())).boxed()
    }
}

/// Loader reading a markdown file with optional YAML front matter.
///
/// The file is read and parsed on load, so edits made between registration
/// and first resolution are picked up.
#[derive(Debug, Clone)]
pub struct MarkdownSource {
    path: PathBuf,
    relative: String,
    settings: Arc<PageSettings>,
    navigation: Navigation,
}

impl MarkdownSource {
    /// Create a loader for `path`.
    ///
    /// `relative` is the path of the file relative to the docs root using `/`
    /// separators (e.g., `guides/providers.md`); it determines the default id,
    /// the edit URL and how relative links are resolved.
    pub fn new(path: impl Into<PathBuf>, relative: impl Into<String>, settings: Arc<PageSettings>) -> Self {
        Self {
            path: path.into(),
            relative: relative.into(),
            settings,
            navigation: Navigation::default(),
        }
    }

    /// Attach precomputed previous/next references.
    #[must_use]
    pub fn with_navigation(mut self, navigation: Navigation) -> Self {
        self.navigation = navigation;
        self
    }

    /// Source path relative to the docs root.
    #[must_use]
    pub fn relative(&self) -> &str {
        &self.relative
    }

    /// Build the page from file contents.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::FrontMatter` if the front matter is malformed.
    pub fn build_from_str(&self, text: &str) -> Result<DocumentationPage, LoadError> {
        let (front, body) = split_front_matter(text);
        let front_matter = FrontMatter::from_yaml(front.unwrap_or_default())?;
        let id = page_id_for(&self.relative, &front_matter);

        let tree = MarkdownParser::new()
            .with_link_base(parent_dir(&self.relative), self.settings.link_prefix())
            .parse(body);

        Ok(PageBuilder::new(id, tree)
            .front_matter(front_matter)
            .navigation(self.navigation.clone())
            .source(self.relative.clone())
            .build(&self.settings))
    }

    async fn materialize(&self) -> Result<DocumentationPage, LoadError> {
        tracing::debug!(path = %self.path.display(), "Reading page source");
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        self.build_from_str(&text)
    }
}

impl PageLoader for MarkdownSource {
    fn load(&self) -> LoadFuture<'_> {
        self.materialize().boxed()
    }
}

/// Page id for a source file: front matter `id` (kept in the file's
/// directory), otherwise the relative path without the `.md` extension.
pub(crate) fn page_id_for(relative: &str, front_matter: &FrontMatter) -> PageId {
    let dir = parent_dir(relative);
    match front_matter.id.as_deref() {
        Some(id) if dir.is_empty() => PageId::new(id),
        Some(id) => PageId::new(format!("{dir}/{id}")),
        None => PageId::new(relative.strip_suffix(".md").unwrap_or(relative)),
    }
}

/// Directory part of a `/`-separated relative path (empty at the root).
pub(crate) fn parent_dir(relative: &str) -> &str {
    relative.rsplit_once('/').map_or("", |(dir, _)| dir)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use folio_content::ContentTree;

    use super::*;

    fn settings() -> Arc<PageSettings> {
        Arc::new(PageSettings {
            base_url: "/Axis/".to_owned(),
            ..PageSettings::default()
        })
    }

    #[test]
    fn test_page_id_for() {
        let fm = FrontMatter::default();
        assert_eq!(page_id_for("intro.md", &fm), "intro");
        assert_eq!(page_id_for("guides/providers.md", &fm), "guides/providers");

        let custom = FrontMatter {
            id: Some("start".to_owned()),
            ..Default::default()
        };
        assert_eq!(page_id_for("intro.md", &custom), "start");
        assert_eq!(page_id_for("guides/intro.md", &custom), "guides/start");
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir("intro.md"), "");
        assert_eq!(parent_dir("a/b/c.md"), "a/b");
    }

    #[test]
    fn test_build_from_str() {
        let source = MarkdownSource::new("/docs/intro.md", "intro.md", settings());
        let page = source
            .build_from_str("---\nsidebar_position: 1\n---\n# Getting Started\n\nSee [providers](./providers.md).\n")
            .unwrap();

        assert_eq!(page.id, "intro");
        assert_eq!(page.title, "Getting Started");
        assert_eq!(page.permalink, "/Axis/docs/intro");
        assert_eq!(page.front_matter.sidebar_position, Some(1.0));
        assert!(page.toc.is_empty());
        let html = folio_content::to_html(&page.body);
        assert!(html.contains(r#"href="/Axis/docs/providers""#));
    }

    #[test]
    fn test_link_to_root_index_matches_its_permalink() {
        let index = MarkdownSource::new("/docs/index.md", "index.md", settings())
            .build_from_str("# Home")
            .unwrap();
        let guide = MarkdownSource::new("/docs/guides/setup.md", "guides/setup.md", settings())
            .build_from_str("# Setup\n\nBack to [home](../index.md).")
            .unwrap();

        assert_eq!(index.permalink, "/Axis/docs");
        let html = folio_content::to_html(&guide.body);
        assert!(html.contains(&format!(r#"href="{}""#, index.permalink)));
    }

    #[test]
    fn test_build_from_str_bad_front_matter() {
        let source = MarkdownSource::new("/docs/intro.md", "intro.md", settings());
        let result = source.build_from_str("---\nsidebar_position: [\n---\nBody");
        assert!(matches!(result, Err(LoadError::FrontMatter(_))));
    }

    #[tokio::test]
    async fn test_markdown_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intro.md");
        std::fs::write(&path, "# Intro\n\nHello").unwrap();

        let page = MarkdownSource::new(&path, "intro.md", settings())
            .load()
            .await
            .unwrap();
        assert_eq!(page.title, "Intro");
    }

    #[tokio::test]
    async fn test_markdown_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = MarkdownSource::new(dir.path().join("missing.md"), "missing.md", settings())
            .load()
            .await;
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[tokio::test]
    async fn test_static_page_loader() {
        let page = PageBuilder::new("intro", ContentTree::new()).build(&PageSettings::default());
        let loaded = StaticPage(page.clone()).load().await.unwrap();
        assert_eq!(loaded, page);
    }

    #[tokio::test]
    async fn test_closure_loader() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let loader = move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async {
                Ok::<_, LoadError>(
                    PageBuilder::new("intro", ContentTree::new()).build(&PageSettings::default()),
                )
            }
        };

        let page = loader.load().await.unwrap();
        assert_eq!(page.id, "intro");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
