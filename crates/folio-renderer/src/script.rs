//! Labelled script snippets flushed as a single block.

use indexmap::IndexMap;

/// Script snippets keyed by label.
///
/// Re-adding a label replaces its code but keeps the label's original
/// position.
#[derive(Clone, Debug, Default)]
pub struct ScriptBlock {
    snippets: IndexMap<String, String>,
}

impl ScriptBlock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the snippet for `label`.
    pub fn add(&mut self, label: impl Into<String>, code: impl Into<String>) {
        self.snippets.insert(label.into(), code.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    /// The `<script>` element holding every snippet, `None` when empty.
    #[must_use]
    pub fn to_html(&self) -> Option<String> {
        if self.snippets.is_empty() {
            return None;
        }

        let code: Vec<&str> = self.snippets.values().map(String::as_str).collect();
        Some(format!(
            "<script type=\"text/javascript\">{}</script>",
            code.join("\n")
        ))
    }

    pub fn clear(&mut self) {
        self.snippets.clear();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_relabel_overwrites_in_place() {
        let mut scripts = ScriptBlock::new();
        scripts.add("a", "c1");
        scripts.add("b", "c2");
        scripts.add("a", "c3");

        assert_eq!(scripts.len(), 2);
        assert_eq!(
            scripts.to_html().unwrap(),
            "<script type=\"text/javascript\">c3\nc2</script>"
        );
    }

    #[test]
    fn test_empty_block_renders_nothing() {
        assert_eq!(ScriptBlock::new().to_html(), None);
    }

    #[test]
    fn test_clear() {
        let mut scripts = ScriptBlock::new();
        scripts.add("init", "start();");

        scripts.clear();

        assert!(scripts.is_empty());
    }
}
