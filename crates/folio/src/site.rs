//! Registry setup from configuration.

use std::sync::Arc;

use folio_config::Config;
use folio_content::TocRange;
use folio_pages::{DocsLoader, PageRegistry, PageSettings};

use crate::error::CliError;

/// Build page settings from the loaded configuration.
pub(crate) fn page_settings_from_config(config: &Config) -> PageSettings {
    PageSettings {
        base_url: config.site.base_url.clone(),
        route_base: config.site.route_base.clone(),
        edit_url: config.site.edit_url.clone(),
        toc: TocRange::new(config.toc.min_heading_level, config.toc.max_heading_level),
    }
}

/// Register every page of the configured docs directory.
pub(crate) fn load_registry(config: &Config) -> Result<PageRegistry, CliError> {
    let settings = Arc::new(page_settings_from_config(config));
    let loader = DocsLoader::new(config.docs_resolved.source_dir.clone(), settings);

    let mut registry = PageRegistry::new();
    let ids = loader.load_into(&mut registry)?;
    tracing::info!(
        pages = ids.len(),
        source_dir = %loader.source_dir().display(),
        "Loaded docs"
    );
    Ok(registry)
}
