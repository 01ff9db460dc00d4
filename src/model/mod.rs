//! Document model types for outline inference.
//!
//! The input side (`Fragment`, `PageInfo`, `DocumentInput`) is the contract a
//! decoder fulfils; the output side (`DocumentOutline`, `OutlineEntry`) is what
//! the pipeline hands back to renderers and callers.

mod fragment;
mod outline;

pub use fragment::{BBox, DocumentInput, Fragment, PageInfo};
pub use outline::{
    DocumentOutline, HeadingLevel, OutlineEntry, EMPTY_DOCUMENT_TITLE, NO_TEXT_TITLE,
};
