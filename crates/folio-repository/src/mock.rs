//! Mock repository implementation for testing.
//!
//! Provides [`MockRepository`] for unit testing without a backing store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use folio_content::{Page, PageId, PageTree};

use crate::repository::{
    CONTENT_TABLE, ContentRecord, Filter, Repository, RepositoryError, RepositoryErrorKind,
    Selection,
};

const BACKEND: &str = "Mock";

/// Mock repository for testing.
///
/// Stores pages and records in memory and counts queries. Use the builder
/// methods to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use folio_repository::{CONTENT_TABLE, MockRepository};
///
/// let repository = MockRepository::new(pages)
///     .with_record(CONTENT_TABLE, "Article", Some("launch"), news_page);
/// ```
#[derive(Debug)]
pub struct MockRepository {
    pages: PageTree,
    tables: HashMap<String, Vec<ContentRecord>>,
    failure: Option<RepositoryErrorKind>,
    queries: AtomicUsize,
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new(PageTree::builder(Page::new("Home", "")).build())
    }
}

impl MockRepository {
    /// Create a mock over the given page tree with an empty content table.
    #[must_use]
    pub fn new(pages: PageTree) -> Self {
        Self {
            pages,
            tables: HashMap::from([(CONTENT_TABLE.to_owned(), Vec::new())]),
            failure: None,
            queries: AtomicUsize::new(0),
        }
    }

    /// Add a record to a table.
    ///
    /// An alias of `None` stores the record without a selection.
    #[must_use]
    pub fn with_record(
        mut self,
        table: impl Into<String>,
        component: impl Into<String>,
        alias: Option<&str>,
        page: PageId,
    ) -> Self {
        self.tables
            .entry(table.into())
            .or_default()
            .push(ContentRecord {
                component: component.into(),
                selection: alias.map(|alias| Selection {
                    alias: Some(alias.to_owned()),
                }),
                page,
            });
        self
    }

    /// Make every query fail with the given kind.
    #[must_use]
    pub fn with_failure(mut self, kind: RepositoryErrorKind) -> Self {
        self.failure = Some(kind);
        self
    }

    /// Number of queries served so far.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl Repository for MockRepository {
    fn pages(&self) -> &PageTree {
        &self.pages
    }

    fn query(&self, table: &str, filter: &Filter) -> Result<Vec<ContentRecord>, RepositoryError> {
        self.queries.fetch_add(1, Ordering::Relaxed);

        if let Some(kind) = self.failure {
            return Err(RepositoryError::new(kind)
                .with_backend(BACKEND)
                .with_table(table));
        }

        let Some(records) = self.tables.get(table) else {
            return Err(RepositoryError::unknown_table(table).with_backend(BACKEND));
        };

        let mut matched = Vec::new();
        for record in records {
            if filter.matches(record)? {
                matched.push(record.clone());
            }
        }
        Ok(matched)
    }
}
