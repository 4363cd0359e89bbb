//! Page tree to menu transformation.

use folio_content::{Menu, PageId, PageTree};

use crate::url::expand_url;

/// Build the menu for `page` and its descendants, depth-first.
///
/// Each entry's URL is the page's own fragment expanded through its
/// ancestors. Children keep their page order.
#[must_use]
pub fn build_menu(tree: &PageTree, page: PageId, entry_prefix: &str) -> Menu {
    let current = tree.page(page);
    let mut menu = Menu::new(
        current.title.clone(),
        expand_url(&current.url, tree, page, entry_prefix),
    );

    for child in tree.children(page) {
        menu.add(build_menu(tree, child, entry_prefix));
    }

    menu
}

#[cfg(test)]
mod tests {
    use folio_content::Page;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_build_menu_expands_urls() {
        let mut builder = PageTree::builder(Page::new("Home", ""));
        let root = builder.root();
        let blog = builder.add_page(root, Page::new("Blog", "blog"));
        builder.add_page(blog, Page::new("2024", "2024"));
        builder.add_page(root, Page::new("About", "/about"));
        let tree = builder.build();

        let menu = build_menu(&tree, tree.root(), "/index.php");

        let mut expected = Menu::new("Home", "/index.php");
        let mut blog_menu = Menu::new("Blog", "/index.php/blog");
        blog_menu.add(Menu::new("2024", "/index.php/blog/2024"));
        expected.add(blog_menu);
        expected.add(Menu::new("About", "/index.php/about"));
        assert_eq!(menu, expected);
    }

    #[test]
    fn test_build_menu_from_subtree() {
        let mut builder = PageTree::builder(Page::new("Home", ""));
        let docs = builder.add_page(builder.root(), Page::new("Docs", "docs"));
        let tree = builder.build();

        let menu = build_menu(&tree, docs, "/index.php");

        assert_eq!(menu, Menu::new("Docs", "/index.php/docs"));
    }

    #[test]
    fn test_build_menu_is_fresh_per_call() {
        let tree = PageTree::builder(Page::new("Home", "")).build();

        let mut first = build_menu(&tree, tree.root(), "/index.php");
        first.add(Menu::new("Extra", "/x"));
        let second = build_menu(&tree, tree.root(), "/index.php");

        assert!(second.children.is_empty());
    }
}
