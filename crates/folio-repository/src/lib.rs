//! Content record queries for the Folio rendering engine.
//!
//! This crate provides a [`Repository`] trait for looking up the content
//! records that place entities on pages. The renderer uses it to resolve an
//! entity's canonical URL. This enables:
//!
//! - **Unit testing** without a real backing store
//! - **Backend flexibility** (YAML file, database)
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Repository`] trait with `pages()` and `query()` methods
//! - [`FileRepository`] loading pages and records from a YAML file
//! - [`MockRepository`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use folio_repository::{CONTENT_TABLE, FileRepository, Filter, Repository};
//!
//! let repository = FileRepository::load(Path::new("content.yaml"))?;
//! let records = repository.query(CONTENT_TABLE, &Filter::equal("component", "Article"))?;
//! for record in records {
//!     println!("{:?}", record.alias());
//! }
//! ```

mod file;
#[cfg(feature = "mock")]
mod mock;
mod repository;

pub use file::FileRepository;
#[cfg(feature = "mock")]
pub use mock::MockRepository;
pub use repository::{
    CONTENT_TABLE, ContentRecord, Filter, Repository, RepositoryError, RepositoryErrorKind,
    Selection,
};
