//! Heading levels from section numbering conventions.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::HeadingLevel;

use super::config::OutlineConfig;
use super::language::Language;

static CHAPTER_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^第?\d+[章節条項目]").unwrap());
static THREE_LEVEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+").unwrap());
static TWO_LEVEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+").unwrap());
static ONE_LEVEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.(?:\D|$)").unwrap());
static LETTER_SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]\.\s").unwrap());

/// Assign a level from the leading section number, if there is one.
///
/// Deeper numbering is tested before shallower so "1.2.3" never reads as "1.2".
pub fn classify_numbering(
    text: &str,
    language: Language,
    config: &OutlineConfig,
) -> Option<HeadingLevel> {
    let text = text.trim();

    let by_number = match language {
        Language::Japanese => {
            if CHAPTER_MARKER.is_match(text) {
                Some(HeadingLevel::H1)
            } else if THREE_LEVEL.is_match(text) {
                Some(HeadingLevel::H3)
            } else if TWO_LEVEL.is_match(text) {
                Some(HeadingLevel::H2)
            } else {
                None
            }
        }
        _ => {
            if THREE_LEVEL.is_match(text) {
                Some(HeadingLevel::H3)
            } else if TWO_LEVEL.is_match(text) {
                Some(HeadingLevel::H2)
            } else if ONE_LEVEL.is_match(text)
                && text.split_whitespace().count() < config.max_h1_numbered_words
            {
                Some(HeadingLevel::H1)
            } else {
                None
            }
        }
    };

    by_number.or_else(|| LETTER_SECTION.is_match(text).then_some(HeadingLevel::H2))
}
