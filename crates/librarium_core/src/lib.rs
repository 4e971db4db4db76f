//! # Librarium Core
//!
//! Catalog rule engine for Librarium: books, members, and loan state.
//!
//! This crate provides:
//! - [`Catalog`] — the in-memory rule engine owning both collections
//! - [`Book`] / [`Member`] — typed records with guarded mutation
//! - [`BookPatch`] / [`MemberPatch`] — explicit partial updates
//! - [`Genre`] — the closed genre enumeration
//! - [`CatalogError`] — recoverable, matchable failure reporting
//!
//! The engine is single-threaded and synchronous: each operation is one
//! check-then-act step that validates fully before mutating, so a failed
//! call never leaves partial state behind. Front ends (console shell,
//! test harness) supply pre-parsed, typed arguments and render the
//! returned result.
//!
//! ## Example
//!
//! ```rust,ignore
//! use librarium_core::{Catalog, Genre, SearchField};
//!
//! let mut catalog = Catalog::new();
//! catalog.add_book("978-A", "The Test Book", "Test Author", Genre::Fiction, 2)?;
//! catalog.add_member("M001", "Alice", "alice@example.com")?;
//! catalog.borrow_book("978-A", "M001")?;
//!
//! let hits = catalog.search_books("test", SearchField::Title);
//! assert_eq!(hits.len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod book;
mod catalog;
mod error;
mod genre;
mod member;

pub use book::{Book, BookPatch, BookRecord};
pub use catalog::{Catalog, SearchField};
pub use error::{CatalogError, CatalogResult};
pub use genre::Genre;
pub use member::{Member, MemberPatch, MAX_BORROWED};

/// Crate version, for front ends that report it.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
