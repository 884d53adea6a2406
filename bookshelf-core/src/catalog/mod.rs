//! Bookshelf catalog - the immutable set of books to browse
//!
//! The catalog is supplied once at startup and never mutated while
//! browsing. It owns the book records and the author/genre lookup tables
//! used for display names and the filter vocabulary.

mod loader;
mod model;

pub use model::{AuthorMap, BookRecord, Catalog, GenreMap};
