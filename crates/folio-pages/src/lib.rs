//! Documentation page registry for Folio.
//!
//! This crate provides:
//! - [`PageRegistry`]: register pages behind deferred loaders, resolve them
//!   on demand (at most once), and look them up by slug or permalink
//! - [`DocumentationPage`]: the materialized page record
//! - [`Layout`] and [`DocLayout`]: the rendering collaborator that turns a
//!   page into markup
//! - [`DocsLoader`]: registers every markdown file of a docs directory
//!
//! # Quick Start
//!
//! ```no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use folio_pages::{DocLayout, DocsLoader, PageRegistry, PageSettings};
//!
//! let settings = Arc::new(PageSettings::default());
//! let mut registry = PageRegistry::new();
//! DocsLoader::new("docs", settings).load_into(&mut registry)?;
//!
//! let page = registry.resolve("intro").await?;
//! let html = folio_pages::render(&page, &DocLayout::new())?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod docs;
mod error;
mod front_matter;
mod layout;
mod loader;
mod navigation;
mod page;
mod registry;

pub use builder::{PageBuilder, PageSettings};
pub use docs::{DocsEntry, DocsError, DocsLoader};
pub use error::{LoadError, RegistryError};
pub use front_matter::{FrontMatter, FrontMatterError};
pub use layout::{DocLayout, Layout, LayoutError, PageView, render};
pub use loader::{LoadFuture, MarkdownSource, PageLoader, StaticPage};
pub use navigation::{PageSummary, link_navigation};
pub use page::{DocumentationPage, NavLink, Navigation, PageId};
pub use registry::PageRegistry;

// Re-export content types for convenience
pub use folio_content::{ContentTree, TocEntry};
