//! Visitor-based HTML renderer for Folio content trees.
//!
//! [`HtmlRenderer`] walks a [`Content`](folio_content::Content) tree through
//! the [`ContentVisitor`](folio_content::ContentVisitor) trait and writes
//! markup into an [`Output`] sink.
//!
//! # Architecture
//!
//! - [`LayoutResolver`]: maps a logical layout name to a file in the project
//!   override directory or the fallback layout set, then renders it with a
//!   [`TemplateEngine`] ([`MiniJinjaEngine`] by default)
//! - [`LayoutStore`]: where layout files live ([`FsLayoutStore`],
//!   [`MemoryLayoutStore`])
//! - [`Output`]: accumulating sink with nested capture scopes, used to
//!   pre-render composite elements in isolation
//! - [`build_menu`] / [`expand_url`]: page tree to menu transformation and
//!   ancestor-walking URL expansion
//! - [`UrlResolver`]: canonical entity URLs from repository content records
//! - [`ScriptBlock`]: labelled script snippets flushed as one block
//!
//! The content tree is only borrowed. Identifiers, fragments, menus and
//! URLs computed while rendering are passed to layouts as context and never
//! stored on the nodes.

mod engine;
mod error;
mod html;
mod layout;
mod menu;
mod output;
mod script;
mod url;
mod util;
mod view;

pub use engine::{MiniJinjaEngine, TemplateEngine};
pub use error::RenderError;
pub use html::{HtmlRenderer, RenderResult};
pub use layout::{FsLayoutStore, LayoutDirs, LayoutResolver, LayoutStore, MemoryLayoutStore};
pub use menu::build_menu;
pub use output::{CaptureScope, Output};
pub use script::ScriptBlock;
pub use url::{DEFAULT_ENTRY_PREFIX, ResolvedUrl, UrlResolver, expand_url};
pub use util::escape_html;
