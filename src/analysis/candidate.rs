//! Heading candidate filtering.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};

use crate::model::Fragment;

use super::config::OutlineConfig;
use super::table_filter::is_table_structure;

/// Serial-number columns, running captions, bare numbers, single letters,
/// URLs and email addresses.
static JUNK_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)^S\.?No\.?",
        r"(?i)^Sr\.?No\.?",
        r"(?i)^Page\s+\d+",
        r"(?i)^Fig(?:\.|ure)?\s*\d+",
        r"(?i)^Table\s*\d+",
        r"^\d+\s*$",
        r"^[A-Za-z]\s*$",
        r"(?i)^(?:https?://|www\.)",
        r"^@",
    ])
    .unwrap()
});

static TRAILING_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;]$").unwrap());

/// Why a fragment was turned down as a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Part of a table row or numbered list
    TableStructure,
    /// Caption, page marker, URL and the like
    Junk,
    /// Outside the allowed word range
    WordCount,
    /// Too few characters
    TooShort,
    /// Reads like a sentence
    Prose,
    /// Neither larger than body text nor bold
    NoEmphasis,
    /// Long all-caps line
    Shouting,
}

/// Check if text matches one of the junk patterns.
pub fn is_junk(text: &str) -> bool {
    JUNK_PATTERNS.is_match(text)
}

/// Check if text is upper-case throughout (and has at least one cased letter).
pub fn is_all_caps(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Explain why a fragment cannot be a heading, or `None` if it can.
pub fn rejection_reason(
    fragment: &Fragment,
    body_size: f32,
    surrounding: &[&Fragment],
    config: &OutlineConfig,
) -> Option<Rejection> {
    let text = fragment.text.trim();
    let words = text.split_whitespace().count();

    if is_table_structure(fragment, surrounding, config) {
        return Some(Rejection::TableStructure);
    }
    if is_junk(text) {
        return Some(Rejection::Junk);
    }
    if words < 1 || words > config.max_heading_words {
        return Some(Rejection::WordCount);
    }
    if text.chars().count() < config.min_heading_chars {
        return Some(Rejection::TooShort);
    }
    if TRAILING_PUNCTUATION.is_match(text)
        || (text.ends_with('.') && words > config.prose_period_max_words)
    {
        return Some(Rejection::Prose);
    }
    if fragment.font_size <= body_size && !fragment.is_bold {
        return Some(Rejection::NoEmphasis);
    }
    if is_all_caps(text) && words > config.max_shouting_words {
        return Some(Rejection::Shouting);
    }

    None
}

/// Check if a fragment survives every heading filter.
pub fn is_plausible_heading(
    fragment: &Fragment,
    body_size: f32,
    surrounding: &[&Fragment],
    config: &OutlineConfig,
) -> bool {
    match rejection_reason(fragment, body_size, surrounding, config) {
        Some(reason) => {
            log::debug!("Rejected '{}' on page {}: {:?}", fragment.text, fragment.page, reason);
            false
        }
        None => true,
    }
}
