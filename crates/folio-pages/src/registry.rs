//! Page registry.
//!
//! Pages are registered behind a [`PageLoader`] and materialized on first
//! [`resolve`](PageRegistry::resolve). Each entry moves one way through
//! registered → resolved; a page is never rebuilt once cached.
//!
//! # Example
//!
//! ```
//! # async fn example() -> Result<(), folio_pages::RegistryError> {
//! use folio_content::MarkdownParser;
//! use folio_pages::{PageBuilder, PageRegistry, PageSettings, StaticPage};
//!
//! let body = MarkdownParser::new().parse("# Getting Started");
//! let page = PageBuilder::new("intro", body).build(&PageSettings::default());
//!
//! let mut registry = PageRegistry::new();
//! registry.register("intro", StaticPage(page))?;
//!
//! let page = registry.resolve("intro").await?;
//! assert_eq!(page.title, "Getting Started");
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;
use std::fmt;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::error::{LoadError, RegistryError};
use crate::layout::Layout;
use crate::loader::{PageLoader, StaticPage};
use crate::page::{DocumentationPage, PageId};

/// Registered page: its loader and, once resolved, the cached page.
struct Entry {
    loader: Box<dyn PageLoader>,
    page: OnceCell<Arc<DocumentationPage>>,
}

/// Registry of lazily-materialized documentation pages.
///
/// Registration takes `&mut self`; resolution takes `&self` and may run
/// concurrently from several tasks once the registry is shared.
#[derive(Default)]
pub struct PageRegistry {
    entries: HashMap<PageId, Entry>,
    order: Vec<PageId>,
    routes: HashMap<String, PageId>,
}

impl PageRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page loader under `id`.
    ///
    /// The loader is not invoked until the page is first resolved.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateRegistration` if `id` is already
    /// registered. The registry is left unchanged.
    pub fn register(
        &mut self,
        id: impl Into<PageId>,
        loader: impl PageLoader + 'static,
    ) -> Result<(), RegistryError> {
        let id = id.into();
        match self.entries.entry(id) {
            MapEntry::Occupied(occupied) => {
                Err(RegistryError::DuplicateRegistration(occupied.key().clone()))
            }
            MapEntry::Vacant(vacant) => {
                tracing::debug!(id = %vacant.key(), "Registered page");
                self.order.push(vacant.key().clone());
                vacant.insert(Entry {
                    loader: Box::new(loader),
                    page: OnceCell::new(),
                });
                Ok(())
            }
        }
    }

    /// Register an already-built page and route its slug and permalink.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateRegistration` if the id is taken, or `DuplicateRoute`
    /// if the slug or permalink already belongs to another page.
    pub fn register_page(&mut self, page: DocumentationPage) -> Result<(), RegistryError> {
        let id = page.id.clone();
        if self.entries.contains_key(&id) {
            return Err(RegistryError::DuplicateRegistration(id));
        }
        for path in [&page.slug, &page.permalink] {
            self.check_route(path, &id)?;
        }

        let slug = page.slug.clone();
        let permalink = page.permalink.clone();
        self.register(id.clone(), StaticPage(page))?;
        self.add_route(&slug, &id)?;
        self.add_route(&permalink, &id)
    }

    /// Map a slug or permalink to a registered page.
    ///
    /// Trailing slashes are ignored. Adding the same path for the same page
    /// again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPage` if `id` is not registered, or `DuplicateRoute`
    /// if the path already maps to a different page.
    pub fn add_route(&mut self, path: &str, id: impl Into<PageId>) -> Result<(), RegistryError> {
        let id = id.into();
        if !self.entries.contains_key(&id) {
            return Err(RegistryError::UnknownPage(id));
        }
        self.check_route(path, &id)?;
        self.routes.insert(normalize_route(path), id);
        Ok(())
    }

    pub(crate) fn check_route(&self, path: &str, id: &PageId) -> Result<(), RegistryError> {
        let path = normalize_route(path);
        match self.routes.get(&path) {
            Some(existing) if existing != id => {
                tracing::warn!(%path, %existing, %id, "Route conflict");
                Err(RegistryError::DuplicateRoute {
                    path,
                    existing: existing.clone(),
                    id: id.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Page id routed at `path`, if any.
    #[must_use]
    pub fn route(&self, path: &str) -> Option<&PageId> {
        self.routes.get(&normalize_route(path))
    }

    /// Resolve a page, materializing it on first use.
    ///
    /// Later calls return the cached page without invoking the loader again.
    /// Concurrent callers for the same id share a single materialization.
    ///
    /// Dropping the returned future before it completes discards the pending
    /// result; the page stays unresolved and the next call starts over. A
    /// failed load is not cached either.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPage` if `id` was never registered, or `LoadFailure`
    /// if the loader fails or produces a page with a different id.
    pub async fn resolve(&self, id: &str) -> Result<Arc<DocumentationPage>, RegistryError> {
        let (key, entry) = self
            .entries
            .get_key_value(id)
            .ok_or_else(|| RegistryError::UnknownPage(PageId::from(id)))?;

        let page = entry
            .page
            .get_or_try_init(|| async {
                tracing::debug!(id = %key, "Materializing page");
                let page = entry
                    .loader
                    .load()
                    .await
                    .map_err(|source| RegistryError::LoadFailure {
                        id: key.clone(),
                        source,
                    })?;

                if page.id != *key {
                    return Err(RegistryError::LoadFailure {
                        id: key.clone(),
                        source: LoadError::IdMismatch {
                            expected: key.clone(),
                            actual: page.id,
                        },
                    });
                }

                Ok(Arc::new(page))
            })
            .await?;

        Ok(Arc::clone(page))
    }

    /// Resolve the page routed at a slug or permalink.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRoute` if nothing is routed at `path`, otherwise the
    /// errors of [`resolve`](Self::resolve).
    pub async fn resolve_route(&self, path: &str) -> Result<Arc<DocumentationPage>, RegistryError> {
        let id = self
            .route(path)
            .ok_or_else(|| RegistryError::UnknownRoute(path.to_owned()))?;
        self.resolve(id.as_str()).await
    }

    /// Resolve every registered page, in registration order.
    ///
    /// Pages are materialized concurrently; the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns the first `LoadFailure` encountered.
    pub async fn resolve_all(&self) -> Result<Vec<Arc<DocumentationPage>>, RegistryError> {
        futures_util::future::try_join_all(self.order.iter().map(|id| self.resolve(id.as_str())))
            .await
    }

    /// Resolve a page and render it with `layout`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`resolve`](Self::resolve), or `RenderFailure`
    /// if the layout fails.
    pub async fn render(&self, id: &str, layout: &dyn Layout) -> Result<String, RegistryError> {
        let page = self.resolve(id).await?;
        crate::layout::render(&page, layout)
    }

    /// Number of registered pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no page is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Registered ids, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &PageId> {
        self.order.iter()
    }

    /// Whether `id` has been materialized.
    #[must_use]
    pub fn is_resolved(&self, id: &str) -> bool {
        self.entries
            .get(id)
            .is_some_and(|entry| entry.page.initialized())
    }

    /// Drop every loader, cached page and route.
    pub fn clear(&mut self) {
        tracing::debug!(pages = self.entries.len(), "Clearing page registry");
        self.entries.clear();
        self.order.clear();
        self.routes.clear();
    }
}

impl fmt::Debug for PageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageRegistry")
            .field("pages", &self.order)
            .field("routes", &self.routes.len())
            .finish_non_exhaustive()
    }
}

/// Canonical form of a route path: leading `/`, no trailing `/`.
pub(crate) fn normalize_route(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    format!("/{trimmed}")
}
