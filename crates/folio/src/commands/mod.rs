//! CLI command implementations.

pub(crate) mod list;
pub(crate) mod render;

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use list::ListArgs;
pub(crate) use render::RenderArgs;

/// Arguments shared by every command that loads a docs directory.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Site base URL, e.g. `/Axis/` (overrides config).
    #[arg(long, env = "FOLIO_BASE_URL")]
    base_url: Option<String>,

    /// Base URL for "edit this page" links (overrides config).
    #[arg(long, env = "FOLIO_EDIT_URL")]
    edit_url: Option<String>,
}

impl SiteArgs {
    /// Load configuration with these arguments applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            base_url: self.base_url.clone(),
            edit_url: self.edit_url.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        // CLI overrides are applied after the file is validated
        config.validate()?;

        match &config.config_path {
            Some(path) => tracing::info!(path = %path.display(), "Loaded configuration"),
            None => tracing::info!("No folio.toml found, using defaults"),
        }
        Ok(config)
    }
}
