//! Repository trait, query filters and error types.

use folio_content::{PageId, PageTree};
use serde::{Deserialize, Serialize};

/// Table holding the records that place components on pages.
pub const CONTENT_TABLE: &str = "content";

/// Which part of an entity a content record shows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Alias of the selected entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Record placing a component on a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentRecord {
    /// Entity type tag shown by this record (e.g. "Article").
    pub component: String,
    /// Selected entity, if any.
    pub selection: Option<Selection>,
    /// Page in the repository's [`PageTree`].
    pub page: PageId,
}

impl ContentRecord {
    /// Selection alias when both the selection and its alias are non-empty.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.selection
            .as_ref()
            .and_then(|selection| selection.alias.as_deref())
            .filter(|alias| !alias.is_empty())
    }

    /// Field names usable in a [`Filter`].
    pub const FIELDS: &'static [&'static str] = &["component", "selection.alias"];

    /// Look up a field value by name, `None` when unset or unknown.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "component" => Some(&self.component),
            "selection.alias" => self
                .selection
                .as_ref()
                .and_then(|selection| selection.alias.as_deref()),
            _ => None,
        }
    }
}

/// Single-field equality condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub value: String,
}

impl Filter {
    /// Match records whose `field` equals `value`.
    #[must_use]
    pub fn equal(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Evaluate the filter against a record.
    ///
    /// A missing field value never equals anything.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryErrorKind::InvalidFilter`] if the record has no
    /// field with this name.
    pub fn matches(&self, record: &ContentRecord) -> Result<bool, RepositoryError> {
        if !ContentRecord::FIELDS.contains(&self.field.as_str()) {
            return Err(RepositoryError::new(RepositoryErrorKind::InvalidFilter)
                .with_detail(format!("unknown field '{}'", self.field)));
        }

        Ok(record.field(&self.field) == Some(self.value.as_str()))
    }
}

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum RepositoryErrorKind {
    /// Referenced record or page does not exist.
    NotFound,
    /// Queried table does not exist.
    UnknownTable,
    /// Filter names an unknown field.
    InvalidFilter,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Other/unknown error category.
    Other,
}

/// Repository error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct RepositoryError {
    /// Semantic error category.
    pub kind: RepositoryErrorKind,
    /// Table context (if applicable).
    pub table: Option<String>,
    /// Backend identifier (e.g., "File", "Mock").
    pub backend: Option<&'static str>,
    /// Human-readable detail.
    pub detail: Option<String>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl RepositoryError {
    /// Create a new repository error.
    #[must_use]
    pub fn new(kind: RepositoryErrorKind) -> Self {
        Self {
            kind,
            table: None,
            backend: None,
            detail: None,
            source: None,
        }
    }

    /// Attach table context.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach a detail message.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create an unknown table error.
    #[must_use]
    pub fn unknown_table(table: impl Into<String>) -> Self {
        Self::new(RepositoryErrorKind::UnknownTable).with_table(table)
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> &RepositoryErrorKind {
        &self.kind
    }
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: detail: source (table: content)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            RepositoryErrorKind::NotFound => "Not found",
            RepositoryErrorKind::UnknownTable => "Unknown table",
            RepositoryErrorKind::InvalidFilter => "Invalid filter",
            RepositoryErrorKind::Unavailable => "Unavailable",
            RepositoryErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(table) = &self.table {
            write!(f, " (table: {table})")?;
        }

        Ok(())
    }
}

impl std::error::Error for RepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Query interface over content records.
///
/// Records reference pages of the tree returned by [`pages`](Self::pages),
/// so callers can walk a record's ancestors.
pub trait Repository: Send + Sync {
    /// Site page tree that records point into.
    fn pages(&self) -> &PageTree;

    /// Return all records of `table` matching `filter`, in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the table is unknown, the filter is
    /// invalid, or the backend fails.
    fn query(&self, table: &str, filter: &Filter) -> Result<Vec<ContentRecord>, RepositoryError>;
}
