//! Bookshelf core library
//!
//! Browse a fixed book catalog: narrow it by genre, author and title,
//! page through the matches in fixed-size windows and render each visible
//! book as a self-contained, click-to-select preview unit.
//!
//! ```text
//! filter submitted ──► filter::evaluate ──► Paginator::reset ──► window ──► replace list
//! show more        ──► Paginator::advance ─────────────────────► window ──► append to list
//! unit clicked     ──► SelectionBus ──► CatalogController::on_unit_selected ──► details
//! ```

pub mod catalog;
pub mod config;
pub mod controller;
pub mod dropdown;
pub mod error;
pub mod filter;
pub mod host;
pub mod paginator;
pub mod preview;
pub mod theme;

pub use catalog::{BookRecord, Catalog};
pub use config::BookshelfConfig;
pub use controller::{CatalogController, CatalogState, RemainingIndicator};
pub use error::{BookshelfError, Result};
pub use filter::FilterCriteria;
pub use paginator::Paginator;
pub use preview::{PreviewUnit, SelectionBus};
