//! Content node model for the Folio rendering engine.
//!
//! This crate provides:
//! - [`Content`]: the tree of renderable nodes (headline, paragraph, slider, ...)
//! - [`ContentVisitor`]: double dispatch over every node variant
//! - [`PageTree`]: navigable pages with parent links for URL expansion
//! - [`Menu`]: the navigable counterpart of a page tree
//! - [`Document`]: loading content trees from YAML or JSON files
//!
//! # Example
//!
//! ```
//! use folio_content::{Content, Element, Composite, Paragraph};
//!
//! let slider = Content::Slider(Composite {
//!     elements: vec![
//!         Element::new(Content::Paragraph(Paragraph::new("X"))),
//!         Element::new(Content::Paragraph(Paragraph::new("Y"))),
//!     ],
//!     ..Default::default()
//! });
//!
//! assert_eq!(slider.kind(), "slider");
//! assert_eq!(slider.elements().len(), 2);
//! ```

mod document;
mod menu;
mod node;
mod page;
mod visitor;

pub use document::{ContentError, Document, Script};
pub use menu::Menu;
pub use node::{
    Article, Attribution, Columns, Composite, Compound, Content, DefaultMenu, Dump, Element,
    Entity, Headline, Image, Paragraph, Params, Teaser,
};
pub use page::{Page, PageId, PageTree, PageTreeBuilder};
pub use visitor::ContentVisitor;
