//! Content node variants.
//!
//! Every renderable unit is a [`Content`] variant. Composite variants hold an
//! ordered list of [`Element`] wrappers, each carrying a nested node and a
//! free-form [`Params`] bag.
//!
//! The serialized form is internally tagged by `type`:
//!
//! ```yaml
//! type: slider
//! title: Highlights
//! elements:
//!   - content: { type: paragraph, text: First }
//!     params: { class: lead }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::page::PageTree;

/// A node of the renderable content tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Content {
    Headline(Headline),
    Attribution(Attribution),
    Paragraph(Paragraph),
    Compound(Compound),
    Image(Image),
    Slider(Composite),
    Accordion(Composite),
    Tree(Composite),
    Tabs(Composite),
    Rows(Composite),
    Columns(Columns),
    Article(Article),
    Teaser(Teaser),
    DefaultMenu(DefaultMenu),
    Dump(Dump),
}

impl Content {
    /// Every `type` tag the model understands, in declaration order.
    pub const KINDS: &'static [&'static str] = &[
        "headline",
        "attribution",
        "paragraph",
        "compound",
        "image",
        "slider",
        "accordion",
        "tree",
        "tabs",
        "rows",
        "columns",
        "article",
        "teaser",
        "defaultMenu",
        "dump",
    ];

    /// The variant's `type` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Headline(_) => "headline",
            Self::Attribution(_) => "attribution",
            Self::Paragraph(_) => "paragraph",
            Self::Compound(_) => "compound",
            Self::Image(_) => "image",
            Self::Slider(_) => "slider",
            Self::Accordion(_) => "accordion",
            Self::Tree(_) => "tree",
            Self::Tabs(_) => "tabs",
            Self::Rows(_) => "rows",
            Self::Columns(_) => "columns",
            Self::Article(_) => "article",
            Self::Teaser(_) => "teaser",
            Self::DefaultMenu(_) => "defaultMenu",
            Self::Dump(_) => "dump",
        }
    }

    /// Nested elements, empty for variants without an `elements` collection.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        match self {
            Self::Compound(compound) => &compound.elements,
            Self::Columns(columns) => &columns.elements,
            Self::Slider(composite)
            | Self::Accordion(composite)
            | Self::Tree(composite)
            | Self::Tabs(composite)
            | Self::Rows(composite) => &composite.elements,
            _ => &[],
        }
    }
}

/// Free-form display parameters attached to a node or element.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// CSS class for the rendered markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Any other parameter, passed through to layouts untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Params {
    /// Params with only a CSS class set.
    #[must_use]
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            extra: BTreeMap::new(),
        }
    }
}

/// Wrapper for a nested node inside a composite.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// The wrapped node.
    pub content: Content,
    /// Per-element display parameters.
    #[serde(default)]
    pub params: Params,
}

impl Element {
    /// Wrap a node with empty params.
    #[must_use]
    pub fn new(content: Content) -> Self {
        Self {
            content,
            params: Params::default(),
        }
    }

    /// Replace the element params.
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub text: String,
    /// Heading level, 1 to 6.
    #[serde(default = "default_headline_level")]
    pub level: u8,
}

impl Headline {
    #[must_use]
    pub fn new(text: impl Into<String>, level: u8) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}

fn default_headline_level() -> u8 {
    1
}

/// Credit line naming an author.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    /// Lead-in text, e.g. "Written by".
    #[serde(default)]
    pub label: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    /// Presentation variant (e.g. "lead", "info").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

impl Paragraph {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            variant: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Generic block container emitted as a plain tag around its elements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    /// Tag name of the wrapping element (e.g. `div`, `section`).
    #[serde(default = "default_block_tag")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub params: Params,
}

impl Compound {
    #[must_use]
    pub fn new(tag: impl Into<String>, elements: Vec<Element>) -> Self {
        Self {
            tag: tag.into(),
            title: None,
            elements,
            params: Params::default(),
        }
    }
}

/// Column container emitted as a plain tag around its elements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Columns {
    #[serde(default = "default_block_tag")]
    pub tag: String,
    #[serde(default)]
    pub elements: Vec<Element>,
}

fn default_block_tag() -> String {
    "div".to_owned()
}

/// Shared shape of slider, accordion, tree, tabs and rows.
///
/// Their layouts receive each element already rendered to markup.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Composite {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub params: Params,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    /// URL fragment identifying the article below its page.
    pub alias: String,
    /// Short summary shown by teasers.
    #[serde(default)]
    pub teaser: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Link card pointing at an article elsewhere on the site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teaser {
    pub article: Article,
}

/// Navigation menu built from a page tree at render time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultMenu {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "item")]
    pub pages: PageTree,
}

/// Diagnostic node: writes its payload as a preformatted dump.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dump {
    pub item: serde_json::Value,
}

/// Something addressable by URL through content records.
pub trait Entity {
    /// Type tag matched against a content record's `component`.
    fn entity_type(&self) -> &'static str;

    /// URL fragment of the entity below the page that shows it.
    fn alias(&self) -> &str;
}

impl Entity for Article {
    fn entity_type(&self) -> &'static str {
        "Article"
    }

    fn alias(&self) -> &str {
        &self.alias
    }
}
