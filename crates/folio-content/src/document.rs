//! Loading content documents from YAML or JSON.
//!
//! A document wraps the root node together with script snippets that the
//! renderer emits after the content:
//!
//! ```yaml
//! content:
//!   type: compound
//!   tag: main
//!   elements:
//!     - content: { type: headline, text: Welcome }
//! scripts:
//!   - label: carousel
//!     code: "initCarousel();"
//! ```
//!
//! Node `type` tags are checked before deserialization so that an unknown
//! variant surfaces as [`ContentError::UnsupportedVariant`] rather than a
//! generic parse error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::node::Content;

/// Error returned when loading content fails.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// A node names a `type` the model has no variant for.
    #[error("Unsupported content variant: {kind}")]
    UnsupportedVariant { kind: String },
    /// Page tree violates a structural rule.
    #[error("Invalid page tree: {0}")]
    InvalidPageTree(String),
    /// Document file extension is neither YAML nor JSON.
    #[error("Unsupported document format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// I/O error reading a document.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Labelled script snippet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub label: String,
    pub code: String,
}

/// Root content node plus the scripts that go with it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: Content,
    #[serde(default)]
    pub scripts: Vec<Script>,
}

impl Document {
    /// Load a document, picking the format from the file extension.
    ///
    /// `.yaml` and `.yml` are parsed as YAML, `.json` as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::UnsupportedFormat`] for other extensions,
    /// [`ContentError::Io`] if the file cannot be read, and parse or
    /// [`ContentError::UnsupportedVariant`] errors for invalid content.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let read = || {
            std::fs::read_to_string(path).map_err(|source| ContentError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml(&read()?),
            Some("json") => Self::from_json(&read()?),
            _ => Err(ContentError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Parse a YAML document.
    ///
    /// # Errors
    ///
    /// Returns a parse error or [`ContentError::UnsupportedVariant`].
    pub fn from_yaml(text: &str) -> Result<Self, ContentError> {
        let value: Value = serde_yaml::from_str(text)?;
        Self::from_value(value)
    }

    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns a parse error or [`ContentError::UnsupportedVariant`].
    pub fn from_json(text: &str) -> Result<Self, ContentError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Self, ContentError> {
        if let Some(content) = value.get("content") {
            check_kinds(content)?;
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Walk node `type` tags, rejecting unknown ones.
///
/// Dump payloads are opaque and not inspected.
fn check_kinds(node: &Value) -> Result<(), ContentError> {
    let Some(kind) = node.get("type").and_then(Value::as_str) else {
        return Ok(());
    };

    if !Content::KINDS.contains(&kind) {
        return Err(ContentError::UnsupportedVariant {
            kind: kind.to_owned(),
        });
    }

    if kind == "dump" {
        return Ok(());
    }

    if let Some(elements) = node.get("elements").and_then(Value::as_array) {
        for element in elements {
            if let Some(content) = element.get("content") {
                check_kinds(content)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::{Headline, Paragraph};

    #[test]
    fn test_from_yaml_document() {
        let yaml = r"
content:
  type: compound
  tag: main
  elements:
    - content: { type: headline, text: Welcome, level: 2 }
    - content: { type: paragraph, text: Hello }
scripts:
  - label: init
    code: start();
";

        let document = Document::from_yaml(yaml).unwrap();

        let elements = document.content.elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(
            elements[0].content,
            Content::Headline(Headline::new("Welcome", 2))
        );
        assert_eq!(
            elements[1].content,
            Content::Paragraph(Paragraph::new("Hello"))
        );
        assert_eq!(
            document.scripts,
            vec![Script {
                label: "init".to_owned(),
                code: "start();".to_owned(),
            }]
        );
    }

    #[test]
    fn test_unknown_root_kind_is_unsupported() {
        let result = Document::from_json(r#"{"content": {"type": "carousel"}}"#);

        let err = result.unwrap_err();
        assert!(
            matches!(&err, ContentError::UnsupportedVariant { kind } if kind == "carousel"),
            "Expected UnsupportedVariant, got {err:?}"
        );
    }

    #[test]
    fn test_unknown_nested_kind_is_unsupported() {
        let json = r#"{"content": {
            "type": "slider",
            "elements": [
                {"content": {"type": "paragraph", "text": "ok"}},
                {"content": {"type": "rows", "elements": [{"content": {"type": "video"}}]}}
            ]
        }}"#;

        let err = Document::from_json(json).unwrap_err();

        assert_eq!(err.to_string(), "Unsupported content variant: video");
    }

    #[test]
    fn test_dump_payload_not_inspected() {
        let json = r#"{"content": {"type": "dump", "item": {"type": "anything"}}}"#;

        let document = Document::from_json(json).unwrap();

        assert_eq!(document.content.kind(), "dump");
    }

    #[test]
    fn test_load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        std::fs::write(&path, r#"{"content": {"type": "paragraph", "text": "x"}}"#).unwrap();

        let document = Document::load(&path).unwrap();

        assert_eq!(document.content, Content::Paragraph(Paragraph::new("x")));
        assert!(document.scripts.is_empty());
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let result = Document::load(Path::new("page.txt"));

        assert!(matches!(result, Err(ContentError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let result = Document::load(&dir.path().join("missing.yaml"));

        assert!(matches!(result, Err(ContentError::Io { .. })));
    }
}
