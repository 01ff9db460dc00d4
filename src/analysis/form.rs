//! Form-document detection.
//!
//! Application forms and questionnaires look heading-rich (numbered fields,
//! short labels) but carry no real outline. A document whose first page is
//! dominated by such fragments is treated as a form.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Fragment;

use super::config::OutlineConfig;

static BARE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.?\s*$").unwrap());
static NUMBERED_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*.{1,30}$").unwrap());

/// Indicator weight of a single fragment.
///
/// Only the first matching indicator counts, in this order: bare number,
/// "application ... form", short numbered field, short label with a colon.
pub fn form_indicator(text: &str) -> u32 {
    let text = text.trim();
    let lower = text.to_lowercase();

    if BARE_NUMBER.is_match(text) {
        1
    } else if lower.contains("application") && lower.contains("form") {
        3
    } else if NUMBERED_FIELD.is_match(text) {
        1
    } else if text.split_whitespace().count() <= 3 && text.contains(':') {
        1
    } else {
        0
    }
}

/// Ratio of form indicators to fragments on the inspected page.
///
/// Returns `None` when the page holds no fragments.
pub fn form_ratio(fragments: &[Fragment], config: &OutlineConfig) -> Option<f64> {
    let page: Vec<&Fragment> = fragments
        .iter()
        .filter(|f| f.page == config.form_page && !f.is_empty())
        .collect();

    if page.is_empty() {
        return None;
    }

    let indicators: u32 = page.iter().map(|f| form_indicator(&f.text)).sum();
    Some(indicators as f64 / page.len() as f64)
}

/// Check if the document looks like a fill-in form.
pub fn is_form_like(fragments: &[Fragment], config: &OutlineConfig) -> bool {
    match form_ratio(fragments, config) {
        Some(ratio) => {
            let form_like = ratio > config.form_ratio_threshold;
            log::debug!("Form indicator ratio {:.2} (form-like: {})", ratio, form_like);
            form_like
        }
        None => false,
    }
}
