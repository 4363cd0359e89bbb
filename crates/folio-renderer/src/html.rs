//! HTML renderer dispatching content nodes to layouts.

use std::sync::Arc;

use folio_content::{
    Article, Attribution, Columns, Composite, Compound, Content, ContentVisitor, DefaultMenu,
    Dump, Element, Headline, Image, Paragraph, Teaser,
};
use folio_repository::Repository;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::RenderError;
use crate::layout::LayoutResolver;
use crate::menu::build_menu;
use crate::output::Output;
use crate::script::ScriptBlock;
use crate::url::{DEFAULT_ENTRY_PREFIX, UrlResolver};
use crate::util::escape_html;
use crate::view::{CompositeView, ElementView, MenuView, TeaserView};

/// Result of rendering content.
#[derive(Clone, Debug, Default)]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Non-fatal problems found while rendering (e.g., ambiguous URLs).
    pub warnings: Vec<String>,
}

/// Renders content trees to HTML.
///
/// Each node variant has its own handler:
/// - headline, attribution, paragraph, image and article render their
///   layout with the node as context
/// - compound and columns write their tag directly around their elements
/// - slider, accordion, tree, tabs and rows pre-render every element in
///   isolation and pass the fragments to their layout as `elements[].html`,
///   together with a fresh `id`
/// - defaultMenu turns its page tree into a menu (`item`)
/// - teaser resolves the article URL (`url`) through the repository
/// - dump writes its payload as escaped JSON inside `<pre>`
///
/// Output accumulates until [`finish`](Self::finish) is called.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use folio_content::{Content, Page, PageTree, Paragraph};
/// use folio_renderer::{HtmlRenderer, LayoutDirs, LayoutResolver, MemoryLayoutStore, MiniJinjaEngine};
/// use folio_repository::FileRepository;
///
/// let store = MemoryLayoutStore::new().with_layout("/layouts/paragraph.jinja", "<p>{{ text }}</p>");
/// let layouts = LayoutResolver::new(
///     LayoutDirs::new("/layouts"),
///     Box::new(store),
///     Box::new(MiniJinjaEngine::new()),
/// );
/// let repository = Arc::new(FileRepository::new(PageTree::builder(Page::new("Home", "")).build()));
///
/// let mut renderer = HtmlRenderer::new(layouts, repository);
/// renderer.render(&Content::Paragraph(Paragraph::new("Hello"))).unwrap();
///
/// assert_eq!(renderer.finish().html, "<p>Hello</p>");
/// ```
pub struct HtmlRenderer {
    output: Output,
    layouts: LayoutResolver,
    repository: Arc<dyn Repository>,
    entry_prefix: String,
    scripts: ScriptBlock,
    warnings: Vec<String>,
}

impl HtmlRenderer {
    /// Create a renderer using the default `/index.php` entry prefix.
    #[must_use]
    pub fn new(layouts: LayoutResolver, repository: Arc<dyn Repository>) -> Self {
        Self {
            output: Output::new(),
            layouts,
            repository,
            entry_prefix: DEFAULT_ENTRY_PREFIX.to_owned(),
            scripts: ScriptBlock::new(),
            warnings: Vec::new(),
        }
    }

    /// Set the prefix of every expanded URL.
    #[must_use]
    pub fn with_entry_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.entry_prefix = prefix.into();
        self
    }

    /// Render `content`, appending to the output.
    ///
    /// # Returns
    ///
    /// Number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns the first [`RenderError`] raised by any node. Output written
    /// before the failure is kept.
    pub fn render(&mut self, content: &Content) -> Result<usize, RenderError> {
        debug!(kind = content.kind(), "Rendering content");
        content.accept(self)
    }

    /// Queue a script snippet; a repeated label replaces the earlier code.
    pub fn add_javascript(&mut self, label: impl Into<String>, code: impl Into<String>) {
        self.scripts.add(label, code);
    }

    /// Write all queued snippets as one `<script>` block.
    ///
    /// # Returns
    ///
    /// Number of bytes written, zero when no snippets are queued.
    pub fn write_javascript(&mut self) -> usize {
        match self.scripts.to_html() {
            Some(block) => self.output.write(&block),
            None => 0,
        }
    }

    /// Take the rendered output and warnings, resetting the renderer.
    ///
    /// Queued scripts are discarded.
    pub fn finish(&mut self) -> RenderResult {
        self.scripts.clear();
        RenderResult {
            html: self.output.take(),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    /// Render a layout with `context` and write the result.
    fn apply_layout<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        context: &T,
    ) -> Result<usize, RenderError> {
        let context = serde_json::to_value(context)?;
        let html = self.layouts.render(name, &context)?;
        Ok(self.output.write(&html))
    }

    /// Render each element in isolation, in order.
    ///
    /// Every capture is released before returning, including on error.
    fn pre_render<'e>(
        &mut self,
        elements: &'e [Element],
    ) -> Result<Vec<ElementView<'e>>, RenderError> {
        debug!(count = elements.len(), "Pre-rendering elements");

        let mut views = Vec::with_capacity(elements.len());
        for element in elements {
            let scope = self.output.capture();
            let result = element.content.accept(self);
            let html = self.output.release(scope);
            result?;

            views.push(ElementView {
                kind: element.content.kind(),
                html,
                params: &element.params,
            });
        }
        Ok(views)
    }

    fn render_composite(
        &mut self,
        kind: &str,
        composite: &Composite,
    ) -> Result<usize, RenderError> {
        let id = format!("{kind}-{}", Uuid::new_v4().simple());
        let elements = self.pre_render(&composite.elements)?;
        let view = CompositeView::new(id, composite, elements);
        self.apply_layout(kind, &view)
    }

    /// Write `<tag class="...">`, every element, then `</tag>`.
    fn render_block(
        &mut self,
        tag: &str,
        class: Option<&str>,
        elements: &[Element],
    ) -> Result<usize, RenderError> {
        let open = match class.filter(|class| !class.is_empty()) {
            Some(class) => format!("<{tag} class=\"{}\">\n", escape_html(class)),
            None => format!("<{tag}>\n"),
        };

        let mut len = self.output.write(&open);
        for element in elements {
            len += element.content.accept(self)?;
        }
        len += self.output.write(&format!("</{tag}>\n"));

        Ok(len)
    }
}

impl ContentVisitor for HtmlRenderer {
    type Output = usize;
    type Error = RenderError;

    fn visit_headline(&mut self, headline: &Headline) -> Result<usize, RenderError> {
        self.apply_layout("headline", headline)
    }

    fn visit_attribution(&mut self, attribution: &Attribution) -> Result<usize, RenderError> {
        self.apply_layout("attribution", attribution)
    }

    fn visit_paragraph(&mut self, paragraph: &Paragraph) -> Result<usize, RenderError> {
        self.apply_layout("paragraph", paragraph)
    }

    fn visit_compound(&mut self, compound: &Compound) -> Result<usize, RenderError> {
        self.render_block(
            &compound.tag,
            compound.params.class.as_deref(),
            &compound.elements,
        )
    }

    fn visit_image(&mut self, image: &Image) -> Result<usize, RenderError> {
        self.apply_layout("image", image)
    }

    fn visit_slider(&mut self, slider: &Composite) -> Result<usize, RenderError> {
        self.render_composite("slider", slider)
    }

    fn visit_accordion(&mut self, accordion: &Composite) -> Result<usize, RenderError> {
        self.render_composite("accordion", accordion)
    }

    fn visit_tree(&mut self, tree: &Composite) -> Result<usize, RenderError> {
        self.render_composite("tree", tree)
    }

    fn visit_tabs(&mut self, tabs: &Composite) -> Result<usize, RenderError> {
        self.render_composite("tabs", tabs)
    }

    fn visit_rows(&mut self, rows: &Composite) -> Result<usize, RenderError> {
        self.render_composite("rows", rows)
    }

    fn visit_columns(&mut self, columns: &Columns) -> Result<usize, RenderError> {
        self.render_block(&columns.tag, None, &columns.elements)
    }

    fn visit_article(&mut self, article: &Article) -> Result<usize, RenderError> {
        self.apply_layout("article", article)
    }

    fn visit_teaser(&mut self, teaser: &Teaser) -> Result<usize, RenderError> {
        let resolver = UrlResolver::new(self.repository.as_ref(), &self.entry_prefix);
        let resolved = resolver.resolve(&teaser.article)?;

        if resolved.is_ambiguous() {
            self.warnings.push(format!(
                "Ambiguous URL for Article '{}': {} candidates, using {}",
                teaser.article.alias,
                resolved.alternatives.len() + 1,
                resolved.url
            ));
        }

        let view = TeaserView {
            article: &teaser.article,
            url: resolved.url,
        };
        self.apply_layout("teaser", &view)
    }

    fn visit_default_menu(&mut self, menu: &DefaultMenu) -> Result<usize, RenderError> {
        let view = MenuView {
            title: menu.title.as_deref(),
            item: build_menu(&menu.pages, menu.pages.root(), &self.entry_prefix),
        };
        self.apply_layout("defaultMenu", &view)
    }

    fn visit_dump(&mut self, dump: &Dump) -> Result<usize, RenderError> {
        let json = serde_json::to_string_pretty(&dump.item)?;
        Ok(self.output.write(&format!("<pre>{}</pre>", escape_html(&json))))
    }
}
