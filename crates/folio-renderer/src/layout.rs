//! Layout lookup with override and fallback directories.
//!
//! A logical layout name maps to `<name>.<extension>`. The project override
//! directory is checked first, then the fallback layout set. Resolution is
//! recomputed on every call.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::engine::TemplateEngine;
use crate::error::RenderError;

/// Backing store for layout files.
pub trait LayoutStore: Send + Sync {
    /// Whether a layout exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the layout source at `path`.
    fn read(&self, path: &Path) -> std::io::Result<String>;
}

/// Layouts on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLayoutStore;

impl LayoutStore for FsLayoutStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Layouts held in memory, keyed by full path.
#[derive(Debug, Default, Clone)]
pub struct MemoryLayoutStore {
    files: HashMap<PathBuf, String>,
}

impl MemoryLayoutStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layout.
    #[must_use]
    pub fn with_layout(mut self, path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    /// Add or replace a layout.
    pub fn insert(&mut self, path: impl Into<PathBuf>, source: impl Into<String>) {
        self.files.insert(path.into(), source.into());
    }
}

impl LayoutStore for MemoryLayoutStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, path: &Path) -> std::io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no layout at {}", path.display()),
            )
        })
    }
}

/// Directories searched for layouts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutDirs {
    /// Project template directory, checked first when set.
    pub override_dir: Option<PathBuf>,
    /// Fallback layout set directory.
    pub fallback_dir: PathBuf,
    /// Layout file extension without the dot.
    pub extension: String,
}

impl LayoutDirs {
    /// Search only `fallback_dir`, using `.jinja` files.
    #[must_use]
    pub fn new(fallback_dir: impl Into<PathBuf>) -> Self {
        Self {
            override_dir: None,
            fallback_dir: fallback_dir.into(),
            extension: "jinja".to_owned(),
        }
    }

    /// Check `dir` before the fallback.
    #[must_use]
    pub fn with_override(mut self, dir: impl Into<PathBuf>) -> Self {
        self.override_dir = Some(dir.into());
        self
    }

    /// Use a different layout file extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// Resolves logical layout names and renders them.
pub struct LayoutResolver {
    dirs: LayoutDirs,
    store: Box<dyn LayoutStore>,
    engine: Box<dyn TemplateEngine>,
}

impl LayoutResolver {
    #[must_use]
    pub fn new(
        dirs: LayoutDirs,
        store: Box<dyn LayoutStore>,
        engine: Box<dyn TemplateEngine>,
    ) -> Self {
        Self {
            dirs,
            store,
            engine,
        }
    }

    /// Locate the layout file for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::LayoutNotFound`] with every attempted path if
    /// neither directory holds the layout.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, RenderError> {
        let file = format!("{name}.{}", self.dirs.extension);
        let candidates = self
            .dirs
            .override_dir
            .iter()
            .chain(std::iter::once(&self.dirs.fallback_dir))
            .map(|dir| dir.join(&file));

        let mut attempted = Vec::new();
        for path in candidates {
            if self.store.exists(&path) {
                debug!(layout = name, path = %path.display(), "Resolved layout");
                return Ok(path);
            }
            attempted.push(path);
        }

        Err(RenderError::LayoutNotFound {
            name: name.to_owned(),
            attempted,
        })
    }

    /// Resolve `name` and render it with `context`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::LayoutNotFound`], [`RenderError::Io`] if the
    /// layout cannot be read, or [`RenderError::Template`].
    pub fn render(&self, name: &str, context: &serde_json::Value) -> Result<String, RenderError> {
        let path = self.resolve(name)?;
        let source = self.store.read(&path).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;
        self.engine.render(&path, &source, context)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::engine::MiniJinjaEngine;

    fn resolver(store: MemoryLayoutStore) -> LayoutResolver {
        let dirs = LayoutDirs::new("/site/layouts/bootstrap-3").with_override("/site/templates/acme");
        LayoutResolver::new(dirs, Box::new(store), Box::new(MiniJinjaEngine::new()))
    }

    #[test]
    fn test_override_wins_when_both_exist() {
        let store = MemoryLayoutStore::new()
            .with_layout("/site/templates/acme/headline.jinja", "override")
            .with_layout("/site/layouts/bootstrap-3/headline.jinja", "fallback");

        let path = resolver(store).resolve("headline").unwrap();

        assert_eq!(path, PathBuf::from("/site/templates/acme/headline.jinja"));
    }

    #[test]
    fn test_fallback_used_when_override_missing() {
        let store =
            MemoryLayoutStore::new().with_layout("/site/layouts/bootstrap-3/headline.jinja", "fb");

        let path = resolver(store).resolve("headline").unwrap();

        assert_eq!(path, PathBuf::from("/site/layouts/bootstrap-3/headline.jinja"));
    }

    #[test]
    fn test_missing_everywhere_is_configuration_error() {
        let err = resolver(MemoryLayoutStore::new())
            .resolve("slider")
            .unwrap_err();

        let RenderError::LayoutNotFound { name, attempted } = err else {
            panic!("expected LayoutNotFound, got {err:?}");
        };
        assert_eq!(name, "slider");
        assert_eq!(
            attempted,
            vec![
                PathBuf::from("/site/templates/acme/slider.jinja"),
                PathBuf::from("/site/layouts/bootstrap-3/slider.jinja"),
            ]
        );
    }

    #[test]
    fn test_without_override_only_fallback_attempted() {
        let dirs = LayoutDirs::new("/site/layouts/bootstrap-3");
        let resolver = LayoutResolver::new(
            dirs,
            Box::new(MemoryLayoutStore::new()),
            Box::new(MiniJinjaEngine::new()),
        );

        let err = resolver.resolve("tabs").unwrap_err();

        assert!(
            matches!(&err, RenderError::LayoutNotFound { attempted, .. } if attempted.len() == 1)
        );
    }

    #[test]
    fn test_custom_extension() {
        let dirs = LayoutDirs::new("/l").with_extension("html.j2");
        let store = MemoryLayoutStore::new().with_layout("/l/image.html.j2", "");
        let resolver =
            LayoutResolver::new(dirs, Box::new(store), Box::new(MiniJinjaEngine::new()));

        assert_eq!(
            resolver.resolve("image").unwrap(),
            PathBuf::from("/l/image.html.j2")
        );
    }

    #[test]
    fn test_render_uses_resolved_source() {
        let store = MemoryLayoutStore::new()
            .with_layout("/site/templates/acme/paragraph.jinja", "<p>{{ text }}</p>");

        let html = resolver(store)
            .render("paragraph", &json!({ "text": "Hello" }))
            .unwrap();

        assert_eq!(html, "<p>Hello</p>");
    }

    #[test]
    fn test_fs_store_reads_layout_files() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("layouts/bootstrap-3");
        std::fs::create_dir_all(&fallback).unwrap();
        std::fs::write(fallback.join("headline.jinja"), "<h1>{{ text }}</h1>").unwrap();
        let resolver = LayoutResolver::new(
            LayoutDirs::new(&fallback).with_override(dir.path().join("templates/acme")),
            Box::new(FsLayoutStore),
            Box::new(MiniJinjaEngine::new()),
        );

        let html = resolver.render("headline", &json!({ "text": "Hi" })).unwrap();

        assert_eq!(html, "<h1>Hi</h1>");
    }
}
