//! URL expansion and entity URL resolution.

use folio_content::{Entity, PageId, PageTree};
use folio_repository::{CONTENT_TABLE, Filter, Repository};
use tracing::warn;

use crate::error::RenderError;

/// Default application entry prefix.
pub const DEFAULT_ENTRY_PREFIX: &str = "/index.php";

/// Expand a page-relative URL fragment into an absolute URL.
///
/// The fragment stands for `page` itself, so the walk starts at its parent.
/// Relative fragments are prefixed with ancestor URLs until the result is
/// absolute or the root is reached, then `entry_prefix` is prepended
/// without its trailing `/`. An empty fragment expands to the prefix alone.
///
/// # Examples
///
/// ```
/// use folio_content::{Page, PageTree};
/// use folio_renderer::expand_url;
///
/// let mut builder = PageTree::builder(Page::new("Home", ""));
/// let a = builder.add_page(builder.root(), Page::new("A", "a"));
/// let b = builder.add_page(a, Page::new("B", "b"));
/// let leaf = builder.add_page(b, Page::new("Leaf", "leaf"));
/// let tree = builder.build();
///
/// assert_eq!(expand_url("leaf", &tree, leaf, "/index.php"), "/index.php/a/b/leaf");
/// assert_eq!(expand_url("", &tree, leaf, "/index.php"), "/index.php");
/// ```
#[must_use]
pub fn expand_url(fragment: &str, tree: &PageTree, page: PageId, entry_prefix: &str) -> String {
    let prefix = entry_prefix.trim_end_matches('/');
    if fragment.is_empty() {
        return if prefix.is_empty() {
            "/".to_owned()
        } else {
            prefix.to_owned()
        };
    }

    let mut url = fragment.to_owned();
    let mut current = page;
    while !url.starts_with('/')
        && let Some(parent) = tree.parent(current)
    {
        current = parent;
        url = format!("{}/{url}", tree.page(parent).url);
    }

    if !url.starts_with('/') {
        url.insert(0, '/');
    }

    format!("{prefix}{url}")
}

/// Outcome of resolving an entity's URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedUrl {
    /// First candidate in query order.
    pub url: String,
    /// Remaining candidates, non-empty when the URL is ambiguous.
    pub alternatives: Vec<String>,
}

impl ResolvedUrl {
    /// Whether more than one record placed the entity on a page.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        !self.alternatives.is_empty()
    }
}

/// Resolves entity URLs through the content records of a repository.
pub struct UrlResolver<'a> {
    repository: &'a dyn Repository,
    entry_prefix: &'a str,
}

impl<'a> UrlResolver<'a> {
    #[must_use]
    pub fn new(repository: &'a dyn Repository, entry_prefix: &'a str) -> Self {
        Self {
            repository,
            entry_prefix,
        }
    }

    /// Resolve the canonical URL of `entity`.
    ///
    /// Candidates are content records whose `component` equals the entity
    /// type and whose selection carries a non-empty alias. Each candidate's
    /// URL is the entity alias expanded in place of the record's page. With
    /// several candidates the first one wins and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UrlNotFound`] if no candidate exists, or
    /// [`RenderError::Repository`] if the query fails.
    pub fn resolve(&self, entity: &dyn Entity) -> Result<ResolvedUrl, RenderError> {
        let entity_type = entity.entity_type();
        let alias = entity.alias();
        let records = self
            .repository
            .query(CONTENT_TABLE, &Filter::equal("component", entity_type))?;

        let pages = self.repository.pages();
        let mut candidates = records
            .iter()
            .filter(|record| record.alias().is_some())
            .map(|record| expand_url(alias, pages, record.page, self.entry_prefix));

        let Some(url) = candidates.next() else {
            return Err(RenderError::UrlNotFound {
                entity_type: entity_type.to_owned(),
                alias: alias.to_owned(),
            });
        };
        let alternatives: Vec<String> = candidates.collect();

        if !alternatives.is_empty() {
            warn!(
                entity_type,
                alias,
                candidates = alternatives.len() + 1,
                url = %url,
                "Ambiguous URL, using first candidate"
            );
        }

        Ok(ResolvedUrl { url, alternatives })
    }
}
