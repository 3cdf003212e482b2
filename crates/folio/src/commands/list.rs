//! `folio list` command implementation.

use clap::Args;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::site::load_registry;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    site: SiteArgs,
}

impl ListArgs {
    /// Execute the list command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a page cannot be loaded.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config()?;

        output.info(&format!(
            "Source directory: {}",
            config.docs_resolved.source_dir.display()
        ));

        let registry = load_registry(&config)?;
        if registry.is_empty() {
            output.warning("No pages found");
            return Ok(());
        }

        let pages = registry.resolve_all().await?;
        output.heading(&format!("{} pages", pages.len()));
        for page in &pages {
            let position = page
                .front_matter
                .sidebar_position
                .map(|p| p.to_string())
                .unwrap_or_default();
            output.data(&format!(
                "{:<32} {:<48} {position}",
                page.id.as_str(),
                page.permalink
            ))?;
        }

        Ok(())
    }
}
