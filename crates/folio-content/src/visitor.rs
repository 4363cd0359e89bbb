//! Double dispatch over content nodes.

use crate::node::{
    Article, Attribution, Columns, Composite, Compound, Content, DefaultMenu, Dump, Headline,
    Image, Paragraph, Teaser,
};

/// One handler per [`Content`] variant.
///
/// Adding a variant to [`Content`] requires a matching handler here, so
/// every visitor is checked for coverage at compile time.
pub trait ContentVisitor {
    /// Value produced per node (e.g. bytes written).
    type Output;
    /// Failure raised by a handler.
    type Error;

    fn visit_headline(&mut self, headline: &Headline) -> Result<Self::Output, Self::Error>;
    fn visit_attribution(
        &mut self,
        attribution: &Attribution,
    ) -> Result<Self::Output, Self::Error>;
    fn visit_paragraph(&mut self, paragraph: &Paragraph) -> Result<Self::Output, Self::Error>;
    fn visit_compound(&mut self, compound: &Compound) -> Result<Self::Output, Self::Error>;
    fn visit_image(&mut self, image: &Image) -> Result<Self::Output, Self::Error>;
    fn visit_slider(&mut self, slider: &Composite) -> Result<Self::Output, Self::Error>;
    fn visit_accordion(&mut self, accordion: &Composite) -> Result<Self::Output, Self::Error>;
    fn visit_tree(&mut self, tree: &Composite) -> Result<Self::Output, Self::Error>;
    fn visit_tabs(&mut self, tabs: &Composite) -> Result<Self::Output, Self::Error>;
    fn visit_rows(&mut self, rows: &Composite) -> Result<Self::Output, Self::Error>;
    fn visit_columns(&mut self, columns: &Columns) -> Result<Self::Output, Self::Error>;
    fn visit_article(&mut self, article: &Article) -> Result<Self::Output, Self::Error>;
    fn visit_teaser(&mut self, teaser: &Teaser) -> Result<Self::Output, Self::Error>;
    fn visit_default_menu(&mut self, menu: &DefaultMenu) -> Result<Self::Output, Self::Error>;
    fn visit_dump(&mut self, dump: &Dump) -> Result<Self::Output, Self::Error>;
}

impl Content {
    /// Dispatch this node to the visitor's handler for its variant.
    pub fn accept<V: ContentVisitor>(&self, visitor: &mut V) -> Result<V::Output, V::Error> {
        match self {
            Self::Headline(headline) => visitor.visit_headline(headline),
            Self::Attribution(attribution) => visitor.visit_attribution(attribution),
            Self::Paragraph(paragraph) => visitor.visit_paragraph(paragraph),
            Self::Compound(compound) => visitor.visit_compound(compound),
            Self::Image(image) => visitor.visit_image(image),
            Self::Slider(slider) => visitor.visit_slider(slider),
            Self::Accordion(accordion) => visitor.visit_accordion(accordion),
            Self::Tree(tree) => visitor.visit_tree(tree),
            Self::Tabs(tabs) => visitor.visit_tabs(tabs),
            Self::Rows(rows) => visitor.visit_rows(rows),
            Self::Columns(columns) => visitor.visit_columns(columns),
            Self::Article(article) => visitor.visit_article(article),
            Self::Teaser(teaser) => visitor.visit_teaser(teaser),
            Self::DefaultMenu(menu) => visitor.visit_default_menu(menu),
            Self::Dump(dump) => visitor.visit_dump(dump),
        }
    }
}
