//! Navigable menu tree.

use serde::{Deserialize, Serialize};

/// Menu entry with an absolute URL and nested entries.
///
/// Built fresh for every render from a [`PageTree`](crate::PageTree).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    /// Display title.
    pub title: String,
    /// Absolute link target.
    pub url: String,
    /// Child entries in page order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Menu>,
}

impl Menu {
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            children: Vec::new(),
        }
    }

    /// Append a child entry.
    pub fn add(&mut self, child: Menu) {
        self.children.push(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_order() {
        let mut menu = Menu::new("Home", "/index.php");
        menu.add(Menu::new("A", "/index.php/a"));
        menu.add(Menu::new("B", "/index.php/b"));

        let titles: Vec<&str> = menu.children.iter().map(|m| m.title.as_str()).collect();

        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_serialize_skips_empty_children() {
        let menu = Menu::new("Home", "/index.php");

        let json = serde_json::to_string(&menu).unwrap();

        assert_eq!(json, r#"{"title":"Home","url":"/index.php"}"#);
    }
}
