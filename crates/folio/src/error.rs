//! CLI error types.

use folio_config::ConfigError;
use folio_content::ContentError;
use folio_renderer::RenderError;
use folio_repository::RepositoryError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
