//! Docs directory discovery.
//!
//! Loading a docs directory happens in two phases. [`DocsLoader::scan`] walks
//! the tree and reads only what routing and navigation need: each file's
//! front matter and its first H1. [`DocsLoader::load_into`] then registers one
//! [`MarkdownSource`] per file, with navigation precomputed, so bodies are
//! parsed only when a page is resolved.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_content::split_front_matter;

use crate::builder::PageSettings;
use crate::error::RegistryError;
use crate::front_matter::{FrontMatter, FrontMatterError};
use crate::loader::{MarkdownSource, page_id_for};
use crate::navigation::{PageSummary, link_navigation};
use crate::page::PageId;
use crate::registry::{PageRegistry, normalize_route};

/// Error returned while loading a docs directory.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    /// A file or directory could not be read.
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A page has malformed front matter.
    #[error("Invalid front matter in {}: {source}", path.display())]
    FrontMatter {
        /// Source file.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: FrontMatterError,
    },

    /// Registering a page failed (duplicate id or route).
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// A markdown file found by [`DocsLoader::scan`].
#[derive(Clone, Debug)]
pub struct DocsEntry {
    /// File path.
    pub path: PathBuf,
    /// Path relative to the docs root, `/`-separated.
    pub relative: String,
    /// Route path relative to the docs root (e.g., `/intro`).
    pub slug: String,
    /// Id, title, permalink and front matter.
    pub summary: PageSummary,
}

/// Registers every markdown file of a docs directory.
#[derive(Clone, Debug)]
pub struct DocsLoader {
    source_dir: PathBuf,
    settings: Arc<PageSettings>,
}

impl DocsLoader {
    /// Create a loader for `source_dir`.
    pub fn new(source_dir: impl Into<PathBuf>, settings: Arc<PageSettings>) -> Self {
        Self {
            source_dir: source_dir.into(),
            settings,
        }
    }

    /// Docs root directory.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Walk the docs directory and summarize each markdown file.
    ///
    /// Hidden files and directories are skipped. Entries are returned sorted
    /// by relative path. A missing source directory yields no entries.
    ///
    /// # Errors
    ///
    /// Returns `DocsError::Io` if a directory or file cannot be read, or
    /// `DocsError::FrontMatter` if a file's front matter is malformed.
    pub fn scan(&self) -> Result<Vec<DocsEntry>, DocsError> {
        if !self.source_dir.is_dir() {
            tracing::warn!(path = %self.source_dir.display(), "Docs directory does not exist");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        collect_markdown(&self.source_dir, "", &mut files)?;
        files.sort_by(|a, b| a.1.cmp(&b.1));

        files
            .into_iter()
            .map(|(path, relative)| self.summarize(path, relative))
            .collect()
    }

    fn summarize(&self, path: PathBuf, relative: String) -> Result<DocsEntry, DocsError> {
        let text = fs::read_to_string(&path).map_err(|source| DocsError::Io {
            path: path.clone(),
            source,
        })?;
        let (front, body) = split_front_matter(&text);
        let front_matter = match FrontMatter::from_yaml(front.unwrap_or_default()) {
            Ok(front_matter) => front_matter,
            Err(source) => return Err(DocsError::FrontMatter { path, source }),
        };

        let id = page_id_for(&relative, &front_matter);
        let title = self
            .settings
            .title_for(id.as_str(), &front_matter, first_heading(body).as_deref());
        let slug = self.settings.slug_for(id.as_str(), &front_matter);
        let permalink = self.settings.permalink_for(&slug, &front_matter);

        Ok(DocsEntry {
            path,
            relative,
            slug,
            summary: PageSummary {
                id,
                title,
                permalink,
                front_matter,
            },
        })
    }

    /// Scan the docs directory and register every page with `registry`.
    ///
    /// Each page is routed at its slug and permalink. Returns the registered
    /// ids in scan order.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`scan`](Self::scan), or `DocsError::Registry`
    /// if two files claim the same id or route. Nothing is registered when an
    /// error is returned.
    pub fn load_into(&self, registry: &mut PageRegistry) -> Result<Vec<PageId>, DocsError> {
        let entries = self.scan()?;
        check_entries(registry, &entries)?;
        let summaries = entries
            .iter()
            .map(|entry| entry.summary.clone())
            .collect::<Vec<_>>();
        let mut navigation = link_navigation(&summaries);

        let mut ids = Vec::with_capacity(entries.len());
        for entry in entries {
            let id = entry.summary.id;
            let loader = MarkdownSource::new(entry.path, entry.relative, Arc::clone(&self.settings))
                .with_navigation(navigation.remove(&id).unwrap_or_default());

            registry.register(id.clone(), loader)?;
            registry.add_route(&entry.slug, &id)?;
            registry.add_route(&entry.summary.permalink, &id)?;
            ids.push(id);
        }

        tracing::debug!(
            pages = ids.len(),
            path = %self.source_dir.display(),
            "Registered docs directory"
        );
        Ok(ids)
    }
}

/// Check that every entry can be registered and routed, both against the
/// registry and against the other entries.
fn check_entries(registry: &PageRegistry, entries: &[DocsEntry]) -> Result<(), RegistryError> {
    let mut ids = HashSet::new();
    let mut routes: HashMap<String, &PageId> = HashMap::new();

    for entry in entries {
        let id = &entry.summary.id;
        if registry.contains(id.as_str()) || !ids.insert(id) {
            return Err(RegistryError::DuplicateRegistration(id.clone()));
        }

        for path in [&entry.slug, &entry.summary.permalink] {
            registry.check_route(path, id)?;
            let path = normalize_route(path);
            match routes.get(&path) {
                Some(&existing) if existing != id => {
                    tracing::warn!(%path, %existing, %id, "Route conflict");
                    return Err(RegistryError::DuplicateRoute {
                        path,
                        existing: existing.clone(),
                        id: id.clone(),
                    });
                }
                _ => {
                    routes.insert(path, id);
                }
            }
        }
    }
    Ok(())
}

/// Recursively collect `.md` files as `(path, relative)` pairs.
fn collect_markdown(
    dir: &Path,
    prefix: &str,
    files: &mut Vec<(PathBuf, String)>,
) -> Result<(), DocsError> {
    let entries = fs::read_dir(dir).map_err(|source| DocsError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let relative = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };

        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            collect_markdown(&path, &relative, files)?;
        } else if path.extension().is_some_and(|e| e == "md") {
            files.push((path, relative));
        }
    }
    Ok(())
}

/// Text of the first ATX H1 outside fenced code blocks.
fn first_heading(body: &str) -> Option<String> {
    let mut fence: Option<&str> = None;
    for line in body.lines() {
        let trimmed = line.trim_start();
        if let Some(marker) = fence {
            if trimmed.starts_with(marker) {
                fence = None;
            }
            continue;
        }
        if trimmed.starts_with("```") {
            fence = Some("```");
        } else if trimmed.starts_with("~~~") {
            fence = Some("~~~");
        } else if let Some(rest) = trimmed.strip_prefix("# ") {
            let title = rest.trim().trim_end_matches('#').trim_end();
            if !title.is_empty() {
                return Some(title.to_owned());
            }
        }
    }
    None
}
