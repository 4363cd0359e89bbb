//! YAML file repository.
//!
//! Loads the site page tree and the `content` table from a single file:
//!
//! ```yaml
//! pages:
//!   title: Home
//!   children:
//!     - { title: News, url: news, key: news }
//! content:
//!   - component: Article
//!     selection: { alias: launch }
//!     page: news
//! ```
//!
//! Records reference pages by key.

use std::path::Path;

use folio_content::PageTree;
use serde::Deserialize;

use crate::repository::{
    CONTENT_TABLE, ContentRecord, Filter, Repository, RepositoryError, RepositoryErrorKind,
    Selection,
};

const BACKEND: &str = "File";

#[derive(Deserialize)]
struct RepositoryFile {
    pages: PageTree,
    #[serde(default)]
    content: Vec<RecordEntry>,
}

#[derive(Deserialize)]
struct RecordEntry {
    component: String,
    #[serde(default)]
    selection: Option<Selection>,
    page: String,
}

/// Repository backed by a YAML file, fully loaded into memory.
#[derive(Debug)]
pub struct FileRepository {
    pages: PageTree,
    content: Vec<ContentRecord>,
}

impl FileRepository {
    /// Repository over `pages` with an empty content table.
    #[must_use]
    pub fn new(pages: PageTree) -> Self {
        Self {
            pages,
            content: Vec::new(),
        }
    }

    /// Load a repository file.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the file cannot be read or parsed, or
    /// a record references an unknown page key.
    pub fn load(path: &Path) -> Result<Self, RepositoryError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            let kind = match e.kind() {
                std::io::ErrorKind::NotFound => RepositoryErrorKind::NotFound,
                _ => RepositoryErrorKind::Unavailable,
            };
            RepositoryError::new(kind)
                .with_backend(BACKEND)
                .with_detail(path.display().to_string())
                .with_source(e)
        })?;

        let repository = Self::from_yaml(&text)?;
        tracing::debug!(
            path = %path.display(),
            pages = repository.pages.len(),
            records = repository.content.len(),
            "Repository loaded"
        );
        Ok(repository)
    }

    /// Parse a repository from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on parse errors or unknown page keys.
    pub fn from_yaml(text: &str) -> Result<Self, RepositoryError> {
        let file: RepositoryFile = serde_yaml::from_str(text).map_err(|e| {
            RepositoryError::new(RepositoryErrorKind::Other)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        let content = file
            .content
            .into_iter()
            .map(|entry| {
                let page = file.pages.find(&entry.page).ok_or_else(|| {
                    RepositoryError::new(RepositoryErrorKind::NotFound)
                        .with_backend(BACKEND)
                        .with_table(CONTENT_TABLE)
                        .with_detail(format!("page key '{}'", entry.page))
                })?;
                Ok(ContentRecord {
                    component: entry.component,
                    selection: entry.selection,
                    page,
                })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok(Self {
            pages: file.pages,
            content,
        })
    }
}

impl Repository for FileRepository {
    fn pages(&self) -> &PageTree {
        &self.pages
    }

    fn query(&self, table: &str, filter: &Filter) -> Result<Vec<ContentRecord>, RepositoryError> {
        if table != CONTENT_TABLE {
            return Err(RepositoryError::unknown_table(table).with_backend(BACKEND));
        }

        let mut matched = Vec::new();
        for record in &self.content {
            if filter.matches(record)? {
                matched.push(record.clone());
            }
        }
        Ok(matched)
    }
}
