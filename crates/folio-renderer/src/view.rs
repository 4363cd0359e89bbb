//! Render-time layout contexts.
//!
//! The content tree is never modified while rendering. Values computed
//! during a render (identifiers, pre-rendered fragments, menus, URLs) are
//! carried by these views, which are serialized as layout context.

use folio_content::{Article, Composite, Menu, Params};
use serde::Serialize;

/// Element of a composite node with its pre-rendered markup.
#[derive(Debug, Serialize)]
pub(crate) struct ElementView<'a> {
    /// `type` tag of the wrapped node.
    pub kind: &'static str,
    /// Markup of the wrapped node rendered in isolation.
    pub html: String,
    pub params: &'a Params,
}

/// Slider, accordion, tree, tabs or rows.
#[derive(Debug, Serialize)]
pub(crate) struct CompositeView<'a> {
    /// Identifier unique to this render.
    pub id: String,
    pub title: Option<&'a str>,
    pub params: &'a Params,
    pub elements: Vec<ElementView<'a>>,
}

impl<'a> CompositeView<'a> {
    pub fn new(id: String, composite: &'a Composite, elements: Vec<ElementView<'a>>) -> Self {
        Self {
            id,
            title: composite.title.as_deref(),
            params: &composite.params,
            elements,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MenuView<'a> {
    pub title: Option<&'a str>,
    /// Menu built from the node's page tree.
    pub item: Menu,
}

#[derive(Debug, Serialize)]
pub(crate) struct TeaserView<'a> {
    pub article: &'a Article,
    /// Resolved canonical URL of the article.
    pub url: String,
}
