//! Table-row and list-item suppression.
//!
//! Table cells and enumerated sub-points often share the visual emphasis of
//! headings. They give themselves away through their neighbours: several
//! fragments on one row, or a run of numbered lines close together.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Fragment;

use super::config::OutlineConfig;

static BARE_ENUMERATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d+\.?|[a-zA-Z]\))\s*$").unwrap());
static NUMBERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());

/// Fragments on the same page whose top edge lies within the context window.
///
/// The fragment itself is part of its own context.
pub fn surrounding_context<'a>(
    fragments: &'a [Fragment],
    fragment: &Fragment,
    config: &OutlineConfig,
) -> Vec<&'a Fragment> {
    fragments
        .iter()
        .filter(|other| {
            other.page == fragment.page
                && fragment.vertical_distance(other) < config.context_window
        })
        .collect()
}

/// Check if a fragment is part of a table row or a numbered list.
///
/// `surrounding` is expected to contain the fragment itself, as returned by
/// [`surrounding_context`].
pub fn is_table_structure(
    fragment: &Fragment,
    surrounding: &[&Fragment],
    config: &OutlineConfig,
) -> bool {
    // The row includes the fragment itself
    let row_size = surrounding
        .iter()
        .filter(|other| fragment.vertical_distance(other) < config.row_tolerance)
        .count();
    if row_size > config.row_min_neighbors {
        return true;
    }

    if BARE_ENUMERATOR.is_match(&fragment.text) {
        return true;
    }

    let numbered = surrounding
        .iter()
        .filter(|other| fragment.vertical_distance(other) < config.numbered_list_window)
        .filter(|other| NUMBERED_ITEM.is_match(&other.text))
        .count();
    numbered >= config.numbered_list_min
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, PageInfo};

    fn at(text: &str, x0: f64, top: f64) -> Fragment {
        Fragment::new(
            text,
            12.0,
            "Arial-Bold",
            BBox::new(x0, top, x0 + 80.0, top + 12.0),
            &PageInfo::letter(1),
        )
    }

    fn check(fragments: &[Fragment], index: usize) -> bool {
        let config = OutlineConfig::default();
        let context = surrounding_context(fragments, &fragments[index], &config);
        is_table_structure(&fragments[index], &context, &config)
    }

    #[test]
    fn test_surrounding_context_window() {
        let config = OutlineConfig::default();
        let mut far_page = at("Other page", 72.0, 200.0);
        far_page.page = 2;
        let fragments = vec![
            at("Target", 72.0, 200.0),
            at("Close", 72.0, 290.0),
            at("Far", 72.0, 320.0),
            far_page,
        ];
        let context = surrounding_context(&fragments, &fragments[0], &config);
        let texts: Vec<&str> = context.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["Target", "Close"]);
    }

    #[test]
    fn test_table_row_suppressed() {
        let fragments = vec![
            at("1.2 Budget", 50.0, 300.0),
            at("Q1", 150.0, 302.0),
            at("Q2", 250.0, 301.0),
            at("Q3", 350.0, 299.0),
            at("Q4", 450.0, 300.0),
        ];
        for i in 0..fragments.len() {
            assert!(check(&fragments, i), "fragment {} not suppressed", i);
        }
    }

    #[test]
    fn test_two_neighbors_not_a_row() {
        let fragments = vec![
            at("Overview", 50.0, 300.0),
            at("Status", 250.0, 302.0),
            at("Owner", 450.0, 301.0),
        ];
        assert!(!check(&fragments, 0));
    }

    #[test]
    fn test_row_check_uses_values_not_identity() {
        let config = OutlineConfig::default();
        let fragments = vec![
            at("Overview", 50.0, 300.0),
            at("Status", 250.0, 302.0),
            at("Owner", 450.0, 301.0),
        ];
        let context = surrounding_context(&fragments, &fragments[0], &config);
        let copy = fragments[0].clone();
        assert!(!is_table_structure(&copy, &context, &config));
        assert!(!is_table_structure(&fragments[0], &context, &config));

        let mut row = fragments.clone();
        row.push(at("Due", 550.0, 300.0));
        let context = surrounding_context(&row, &row[0], &config);
        assert!(is_table_structure(&row[0].clone(), &context, &config));
    }

    #[test]
    fn test_bare_enumerators() {
        for text in ["3.", "12", "a)", "B) "] {
            let fragments = vec![at(text, 50.0, 300.0)];
            assert!(check(&fragments, 0), "{} not suppressed", text);
        }
        let fragments = vec![at("a) Scope", 50.0, 300.0)];
        assert!(!check(&fragments, 0));
    }

    #[test]
    fn test_numbered_list_suppressed() {
        let fragments = vec![
            at("1. Apples", 50.0, 300.0),
            at("2. Pears", 50.0, 315.0),
            at("3. Plums", 50.0, 330.0),
        ];
        assert!(check(&fragments, 0));
    }

    #[test]
    fn test_spread_numbered_headings_kept() {
        let fragments = vec![
            at("1. Introduction", 50.0, 200.0),
            at("2. Background", 50.0, 260.0),
            at("3. Method", 50.0, 320.0),
        ];
        assert!(!check(&fragments, 1));
    }
}
