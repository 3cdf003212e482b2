//! Registry and loader error types.

use std::path::PathBuf;

use crate::front_matter::FrontMatterError;
use crate::layout::LayoutError;
use crate::page::PageId;

/// Error returned by registry operations.
///
/// All variants stem from static misconfiguration or content problems and
/// are never retried by the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Two content sources claim the same identifier.
    #[error("Page already registered: {0}")]
    DuplicateRegistration(PageId),

    /// The identifier was never registered.
    #[error("Unknown page: {0}")]
    UnknownPage(PageId),

    /// No page is routed at the given path.
    #[error("No page at route: {0}")]
    UnknownRoute(String),

    /// A route path is already taken by another page.
    #[error("Route {path} already maps to {existing}, cannot map it to {id}")]
    DuplicateRoute {
        /// Route path.
        path: String,
        /// Page currently owning the route.
        existing: PageId,
        /// Page that tried to claim it.
        id: PageId,
    },

    /// The page loader failed.
    #[error("Failed to load page {id}: {source}")]
    LoadFailure {
        /// Page being loaded.
        id: PageId,
        /// Underlying loader error.
        #[source]
        source: LoadError,
    },

    /// The layout could not render the page.
    #[error("Failed to render page {id}: {source}")]
    RenderFailure {
        /// Page being rendered.
        id: PageId,
        /// Opaque layout error.
        #[source]
        source: LayoutError,
    },
}

/// Error produced by a [`PageLoader`](crate::PageLoader).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Source file could not be read.
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        /// Source path.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Front matter is malformed.
    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),

    /// The loader produced a page with a different id than it was registered under.
    #[error("Loader produced page {actual}, expected {expected}")]
    IdMismatch {
        /// Registered id.
        expected: PageId,
        /// Id of the produced page.
        actual: PageId,
    },

    /// Any other loader-specific failure.
    #[error("{0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_route_message() {
        let err = RegistryError::DuplicateRoute {
            path: "/docs/intro".to_owned(),
            existing: "intro".into(),
            id: "other".into(),
        };
        assert_eq!(
            err.to_string(),
            "Route /docs/intro already maps to intro, cannot map it to other"
        );
    }

    #[test]
    fn test_load_failure_keeps_source() {
        let err = RegistryError::LoadFailure {
            id: "intro".into(),
            source: LoadError::IdMismatch {
                expected: "intro".into(),
                actual: "other".into(),
            },
        };
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "Loader produced page other, expected intro");
    }
}
