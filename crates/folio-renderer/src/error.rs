//! Render error taxonomy.

use std::path::PathBuf;

use folio_repository::RepositoryError;

/// Error raised while rendering a content tree.
///
/// Every variant is fatal for the node being rendered. Output written
/// before the failure stays in the sink.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No layout file exists in the override or fallback directory.
    #[error("Layout '{name}' not found (tried: {})", join_paths(attempted))]
    LayoutNotFound {
        /// Logical layout name (e.g. "slider").
        name: String,
        /// Every path checked, in resolution order.
        attempted: Vec<PathBuf>,
    },
    /// The template engine rejected a layout.
    #[error("Template error in {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A layout exists but could not be read.
    #[error("I/O error reading layout {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// No content record places the entity on a page.
    #[error("No URL found for {entity_type} '{alias}'")]
    UrlNotFound {
        entity_type: String,
        alias: String,
    },
    /// The backing repository query failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    /// A layout context could not be serialized.
    #[error("Context error: {0}")]
    Context(#[from] serde_json::Error),
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_layout_not_found_names_all_paths() {
        let err = RenderError::LayoutNotFound {
            name: "slider".to_owned(),
            attempted: vec![
                PathBuf::from("/site/templates/acme/slider.jinja"),
                PathBuf::from("/site/layouts/bootstrap-3/slider.jinja"),
            ],
        };

        assert_eq!(
            err.to_string(),
            "Layout 'slider' not found (tried: /site/templates/acme/slider.jinja, \
             /site/layouts/bootstrap-3/slider.jinja)"
        );
    }

    #[test]
    fn test_url_not_found_message() {
        let err = RenderError::UrlNotFound {
            entity_type: "Article".to_owned(),
            alias: "launch".to_owned(),
        };

        assert_eq!(err.to_string(), "No URL found for Article 'launch'");
    }
}
