//! `folio render` command implementation.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_content::{Document, Page, PageTree};
use folio_renderer::{
    FsLayoutStore, HtmlRenderer, LayoutDirs, LayoutResolver, MiniJinjaEngine, RenderResult,
};
use folio_repository::{FileRepository, Repository};
use tracing::info;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Content document to render (YAML or JSON).
    document: PathBuf,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project template directory, relative to the layout root (overrides config).
    #[arg(long, env = "FOLIO_TEMPLATE")]
    template: Option<String>,

    /// Fallback layout set (overrides config).
    #[arg(long)]
    layout_set: Option<String>,

    /// Repository file with pages and content records (overrides config).
    #[arg(long)]
    repository: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            template: self.template.clone(),
            layout_set: self.layout_set.clone(),
            repository: self.repository.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let document = Document::load(&self.document)?;

        let result = render_document(&config, &document)?;
        info!(
            document = %self.document.display(),
            bytes = result.html.len(),
            "Rendered document"
        );

        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        if let Some(path) = &self.output {
            std::fs::write(path, &result.html)?;
            output.success(&format!("Rendered to {}", path.display()));
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(result.html.as_bytes())?;
            stdout.flush()?;
        }

        Ok(())
    }
}

/// Render `document` with the layouts and repository named by `config`.
///
/// Without a configured repository, teasers fail to resolve.
fn render_document(config: &Config, document: &Document) -> Result<RenderResult, CliError> {
    let repository: Arc<dyn Repository> = match &config.repository_path {
        Some(path) => Arc::new(FileRepository::load(path)?),
        None => Arc::new(FileRepository::new(
            PageTree::builder(Page::new("Home", "")).build(),
        )),
    };

    let layouts_config = &config.layouts_resolved;
    let mut dirs = LayoutDirs::new(layouts_config.fallback_dir())
        .with_extension(layouts_config.extension.clone());
    if let Some(dir) = layouts_config.override_dir() {
        dirs = dirs.with_override(dir);
    }
    let layouts = LayoutResolver::new(
        dirs,
        Box::new(FsLayoutStore),
        Box::new(MiniJinjaEngine::new()),
    );

    let mut renderer =
        HtmlRenderer::new(layouts, repository).with_entry_prefix(config.urls.entry_prefix.clone());
    renderer.render(&document.content)?;
    for script in &document.scripts {
        renderer.add_javascript(script.label.clone(), script.code.clone());
    }
    renderer.write_javascript();

    Ok(renderer.finish())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Project with fallback layouts, an override for paragraphs and a
    /// repository placing the "launch" article below the news page.
    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(
            &root.join("folio.toml"),
            r#"
[layouts]
template = "templates/acme"

[repository]
path = "content.yaml"
"#,
        );
        write(
            &root.join("layouts/bootstrap-3/paragraph.jinja"),
            "<p>{{ text }}</p>",
        );
        write(
            &root.join("templates/acme/paragraph.jinja"),
            "<p class=\"acme\">{{ text }}</p>",
        );
        write(
            &root.join("layouts/bootstrap-3/teaser.jinja"),
            "<a href=\"{{ url }}\">{{ article.title }}</a>",
        );
        write(
            &root.join("content.yaml"),
            r"
pages:
  title: Home
  children:
    - title: News
      url: news
      key: news
      children:
        - { title: Archive, url: archive, key: archive }
content:
  - component: Article
    selection: { alias: launch }
    page: archive
",
        );
        dir
    }

    #[test]
    fn test_render_document_with_override_and_scripts() {
        let dir = project();
        let config = Config::load(Some(&dir.path().join("folio.toml")), None).unwrap();
        let document = Document::from_yaml(
            r"
content:
  type: compound
  tag: main
  elements:
    - content: { type: paragraph, text: Hello }
    - content:
        type: teaser
        article: { title: Launch, alias: launch }
scripts:
  - { label: init, code: start(); }
",
        )
        .unwrap();

        let result = render_document(&config, &document).unwrap();

        assert_eq!(
            result.html,
            "<main>\n<p class=\"acme\">Hello</p><a href=\"/index.php/news/launch\">Launch</a></main>\n\
             <script type=\"text/javascript\">start();</script>"
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_render_document_layout_set_override() {
        let dir = project();
        let settings = CliSettings {
            layout_set: Some("bootstrap-4".to_owned()),
            ..CliSettings::default()
        };
        let config = Config::load(Some(&dir.path().join("folio.toml")), Some(&settings)).unwrap();
        let document =
            Document::from_yaml("content: { type: headline, text: Missing }").unwrap();

        let err = render_document(&config, &document).unwrap_err();

        assert!(
            err.to_string().contains("Layout 'headline' not found"),
            "unexpected error: {err}"
        );
        assert!(err.to_string().contains("bootstrap-4"));
    }

    #[test]
    fn test_render_document_without_repository() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("folio.toml"), "");
        let config = Config::load(Some(&dir.path().join("folio.toml")), None).unwrap();
        let document = Document::from_yaml(
            "content: { type: teaser, article: { title: Launch, alias: launch } }",
        )
        .unwrap();

        let err = render_document(&config, &document).unwrap_err();

        assert!(matches!(err, CliError::Render(_)));
        assert_eq!(err.to_string(), "No URL found for Article 'launch'");
    }
}
