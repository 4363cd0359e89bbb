//! Template engine abstraction.

use std::path::Path;

use minijinja::{Environment, Value};

use crate::error::RenderError;

/// Renders a layout source with a serialized node as context.
///
/// The path identifies the layout in error messages; the engine does not
/// read it.
pub trait TemplateEngine: Send + Sync {
    fn render(
        &self,
        path: &Path,
        source: &str,
        context: &serde_json::Value,
    ) -> Result<String, RenderError>;
}

/// [`TemplateEngine`] using `MiniJinja` (Jinja2 syntax).
///
/// Auto-escaping follows the layout file name: `.jinja` layouts are not
/// escaped, so pre-rendered `html` fragments can be emitted as they are.
/// Layouts escape text fields explicitly with the `e` filter.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use folio_renderer::{MiniJinjaEngine, TemplateEngine};
///
/// let engine = MiniJinjaEngine::new();
/// let context = serde_json::json!({ "text": "Hello", "level": 2 });
///
/// let html = engine
///     .render(Path::new("headline.jinja"), "<h{{ level }}>{{ text|e }}</h{{ level }}>", &context)
///     .unwrap();
/// assert_eq!(html, "<h2>Hello</h2>");
/// ```
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(
        &self,
        path: &Path,
        source: &str,
        context: &serde_json::Value,
    ) -> Result<String, RenderError> {
        let name = path.to_string_lossy();
        self.env
            .render_named_str(&name, source, Value::from_serialize(context))
            .map_err(|e| RenderError::Template {
                path: path.to_path_buf(),
                source: Box::new(e),
            })
    }
}
