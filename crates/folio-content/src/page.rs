//! Page tree for navigation and URL expansion.
//!
//! # Architecture
//!
//! Pages are stored in a flat `Vec<Page>` with parent/children relationships
//! tracked by indices. The tree owns its pages top-down; parent links are
//! plain indices used only to walk ancestors. A page is always added after
//! its parent, so every parent index is smaller than its child's and the
//! ancestor walk cannot cycle.
//!
//! The serialized form is nested:
//!
//! ```yaml
//! title: Home
//! url: ""
//! children:
//!   - title: Blog
//!     url: blog
//!     key: blog
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::document::ContentError;

/// Index of a page inside its [`PageTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(usize);

/// Navigable unit of a site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    /// Path fragment: empty, relative to the parent, or absolute (leading `/`).
    pub url: String,
    /// Optional lookup key, unique within the tree.
    pub key: Option<String>,
}

impl Page {
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            key: None,
        }
    }

    /// Attach a lookup key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// Tree of pages with exactly one root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PageNode", into = "PageNode")]
pub struct PageTree {
    pages: Vec<Page>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
    key_index: HashMap<String, usize>,
}

impl PageTree {
    /// Start a tree with the given root page.
    #[must_use]
    pub fn builder(root: Page) -> PageTreeBuilder {
        PageTreeBuilder::new(root)
    }

    /// The root page.
    #[must_use]
    pub fn root(&self) -> PageId {
        PageId(0)
    }

    /// Get a page by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by another tree and is out of range.
    #[must_use]
    pub fn page(&self, id: PageId) -> &Page {
        &self.pages[id.0]
    }

    /// Parent of a page, `None` for the root.
    #[must_use]
    pub fn parent(&self, id: PageId) -> Option<PageId> {
        self.parents.get(id.0).copied().flatten().map(PageId)
    }

    /// Children of a page in insertion order.
    pub fn children(&self, id: PageId) -> impl Iterator<Item = PageId> + '_ {
        self.children
            .get(id.0)
            .into_iter()
            .flatten()
            .map(|&i| PageId(i))
    }

    /// Look up a page by its key.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<PageId> {
        self.key_index.get(key).map(|&i| PageId(i))
    }

    /// Number of pages, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Builder for constructing [`PageTree`] instances.
#[derive(Debug)]
pub struct PageTreeBuilder {
    pages: Vec<Page>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
}

impl PageTreeBuilder {
    /// Create a builder holding only the root page.
    #[must_use]
    pub fn new(root: Page) -> Self {
        Self {
            pages: vec![root],
            children: vec![Vec::new()],
            parents: vec![None],
        }
    }

    /// Id of the root page.
    #[must_use]
    pub fn root(&self) -> PageId {
        PageId(0)
    }

    /// Add a page below `parent`.
    ///
    /// # Returns
    ///
    /// Id of the added page.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not issued by this builder.
    pub fn add_page(&mut self, parent: PageId, page: Page) -> PageId {
        let idx = self.pages.len();
        self.children[parent.0].push(idx);
        self.pages.push(page);
        self.children.push(Vec::new());
        self.parents.push(Some(parent.0));
        PageId(idx)
    }

    /// Build the tree, indexing page keys.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidPageTree`] if two pages share a key.
    pub fn try_build(self) -> Result<PageTree, ContentError> {
        let mut key_index = HashMap::new();
        for (i, page) in self.pages.iter().enumerate() {
            if let Some(key) = &page.key
                && key_index.insert(key.clone(), i).is_some()
            {
                return Err(ContentError::InvalidPageTree(format!(
                    "duplicate page key '{key}'"
                )));
            }
        }

        Ok(PageTree {
            pages: self.pages,
            children: self.children,
            parents: self.parents,
            key_index,
        })
    }

    /// Build the tree; when two pages share a key, the first one wins.
    #[must_use]
    pub fn build(self) -> PageTree {
        let mut key_index = HashMap::new();
        for (i, page) in self.pages.iter().enumerate() {
            if let Some(key) = &page.key {
                key_index.entry(key.clone()).or_insert(i);
            }
        }

        PageTree {
            pages: self.pages,
            children: self.children,
            parents: self.parents,
            key_index,
        }
    }
}

/// Nested serialized form of a page tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct PageNode {
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<PageNode>,
}

impl TryFrom<PageNode> for PageTree {
    type Error = ContentError;

    fn try_from(node: PageNode) -> Result<Self, Self::Error> {
        fn add_children(builder: &mut PageTreeBuilder, parent: PageId, nodes: Vec<PageNode>) {
            for node in nodes {
                let id = builder.add_page(
                    parent,
                    Page {
                        title: node.title,
                        url: node.url,
                        key: node.key,
                    },
                );
                add_children(builder, id, node.children);
            }
        }

        let mut builder = PageTreeBuilder::new(Page {
            title: node.title,
            url: node.url,
            key: node.key,
        });
        let root = builder.root();
        add_children(&mut builder, root, node.children);
        builder.try_build()
    }
}

impl From<PageTree> for PageNode {
    fn from(tree: PageTree) -> Self {
        fn to_node(tree: &PageTree, id: PageId) -> PageNode {
            let page = tree.page(id);
            PageNode {
                title: page.title.clone(),
                url: page.url.clone(),
                key: page.key.clone(),
                children: tree.children(id).map(|child| to_node(tree, child)).collect(),
            }
        }

        to_node(&tree, tree.root())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_tree() -> PageTree {
        let mut builder = PageTree::builder(Page::new("Home", ""));
        let root = builder.root();
        let blog = builder.add_page(root, Page::new("Blog", "blog").with_key("blog"));
        builder.add_page(blog, Page::new("2024", "2024"));
        builder.add_page(root, Page::new("About", "about"));
        builder.build()
    }

    #[test]
    fn test_root_has_no_parent() {
        let tree = sample_tree();

        assert_eq!(tree.parent(tree.root()), None);
        assert_eq!(tree.page(tree.root()).title, "Home");
    }

    #[test]
    fn test_children_in_insertion_order() {
        let tree = sample_tree();

        let titles: Vec<&str> = tree
            .children(tree.root())
            .map(|id| tree.page(id).title.as_str())
            .collect();

        assert_eq!(titles, vec!["Blog", "About"]);
    }

    #[test]
    fn test_parent_links_child() {
        let tree = sample_tree();
        let blog = tree.find("blog").unwrap();

        let year = tree.children(blog).next().unwrap();

        assert_eq!(tree.parent(year), Some(blog));
        assert_eq!(tree.parent(blog), Some(tree.root()));
    }

    #[test]
    fn test_find_unknown_key() {
        let tree = sample_tree();

        assert_eq!(tree.find("missing"), None);
    }

    #[test]
    fn test_try_build_rejects_duplicate_keys() {
        let mut builder = PageTree::builder(Page::new("Home", "").with_key("home"));
        let root = builder.root();
        builder.add_page(root, Page::new("Other", "other").with_key("home"));

        let result = builder.try_build();

        assert!(matches!(result, Err(ContentError::InvalidPageTree(_))));
    }

    #[test]
    fn test_deserialize_nested_pages() {
        let yaml = r"
title: Home
children:
  - title: Blog
    url: blog
    key: blog
    children:
      - title: Post
        url: post
";

        let tree: PageTree = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.page(tree.root()).url, "");
        let blog = tree.find("blog").unwrap();
        let post = tree.children(blog).next().unwrap();
        assert_eq!(tree.page(post).title, "Post");
    }

    #[test]
    fn test_serialize_roundtrip_keeps_structure() {
        let tree = sample_tree();

        let json = serde_json::to_string(&tree).unwrap();
        let parsed: PageTree = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, tree);
    }
}
