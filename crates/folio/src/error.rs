//! CLI error types.

use folio_config::ConfigError;
use folio_pages::{DocsError, RegistryError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Docs(#[from] DocsError),

    #[error("{0}")]
    Registry(#[from] RegistryError),

    #[error("{0}")]
    Validation(String),
}
