//! Structure inference: from styled fragments to a title and heading outline.
//!
//! Each stage is a pure function over an immutable fragment slice and an
//! [`OutlineConfig`]; [`extract_outline_with`] wires them together.

mod assembler;
mod candidate;
mod config;
mod form;
mod language;
mod numbering;
mod style;
mod table_filter;
mod title;

pub use assembler::{
    assemble_outline, dedupe_outline, extract_outline_with, BoldEmphasisClassifier,
    DocumentSignals, FontSizeClassifier, LevelChain, LevelClassifier, LevelContext,
    NumberingClassifier,
};
pub use candidate::{is_all_caps, is_junk, is_plausible_heading, rejection_reason, Rejection};
pub use config::{InputLimits, OutlineConfig};
pub use form::{form_indicator, form_ratio, is_form_like};
pub use language::{detect_document_language, detect_language, first_page_sample, Language};
pub use numbering::classify_numbering;
pub use style::{analyze_styles, FontStatistics, StyleProfile};
pub use table_filter::{is_table_structure, surrounding_context};
pub use title::{locate_title, title_score, TitleAnchor, TitleChoice};
