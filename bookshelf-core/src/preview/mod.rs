//! Preview units - one clickable card per visible book
//!
//! A unit is driven entirely by four attributes (`image`, `title`,
//! `author`, `previewId`). Setting any of them rebuilds the unit from
//! scratch. Styling lives in a per-unit scope and clicks leave the unit as
//! a `book-select` signal on a shared bus.

mod signal;
mod style;
mod unit;

pub use signal::{SelectionBus, SelectionSignal, BOOK_SELECT};
pub use style::{ScopedStyle, StyleRule, StyleScope, StyleTarget, ROOT_CLASS};
pub use unit::{
    escape_html, PreviewAttribute, PreviewUnit, RenderedUnit, DEFAULT_AUTHOR, DEFAULT_IMAGE,
    DEFAULT_PREVIEW_ID, DEFAULT_TITLE,
};
