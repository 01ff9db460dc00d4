//! Coarse language detection from a text sample.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{DocumentInput, Fragment};

/// Language tags the numbering classifier distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
}

impl Language {
    /// Two-letter tag (e.g., "ja").
    pub fn tag(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Japanese => "ja",
            Language::Spanish => "es",
            Language::French => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

const SPANISH_MARKS: &str = "ñáéíóúü";
const FRENCH_MARKS: &str = "àâäéèêëïîôöùûüÿç";

/// Share of Japanese-script characters above which a sample is Japanese.
const JAPANESE_RATIO: f64 = 0.1;

/// Join the first page's fragment texts into a detection sample.
pub fn first_page_sample(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .filter(|f| f.page == 1)
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Detect the language of a decoded document from its first page.
pub fn detect_document_language(doc: &DocumentInput) -> Language {
    detect_language(&first_page_sample(&doc.fragments))
}

/// Detect the dominant language of a sample.
///
/// Japanese wins when its script covers more than 10% of the sample; otherwise
/// the first Spanish, then French, diacritic decides. Everything else is English.
pub fn detect_language(sample: &str) -> Language {
    if sample.is_empty() {
        return Language::English;
    }

    let total = sample.chars().count();
    let japanese = sample.chars().filter(|&c| is_japanese_char(c)).count();
    if japanese as f64 > total as f64 * JAPANESE_RATIO {
        return Language::Japanese;
    }

    let lower = sample.to_lowercase();
    if lower.chars().any(|c| SPANISH_MARKS.contains(c)) {
        return Language::Spanish;
    }
    if lower.chars().any(|c| FRENCH_MARKS.contains(c)) {
        return Language::French;
    }

    Language::English
}

/// Hiragana, Katakana and the common CJK ideograph block.
fn is_japanese_char(c: char) -> bool {
    matches!(c as u32, 0x3040..=0x309F | 0x30A0..=0x30FF | 0x4E00..=0x9FAF)
}
