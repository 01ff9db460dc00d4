//! Title selection from the first pages.

use crate::model::{BBox, Fragment};

use super::config::OutlineConfig;

/// The chosen title and, when it came from a fragment, where that fragment sits.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleChoice {
    /// Title text
    pub text: String,
    /// Fragment the title was taken from; `None` for the fallback title
    pub anchor: Option<TitleAnchor>,
}

/// Identity of the title fragment, used to keep it out of the outline.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleAnchor {
    pub page: u32,
    pub bbox: BBox,
}

impl TitleChoice {
    /// Fallback title with no fragment behind it.
    pub fn fallback(config: &OutlineConfig) -> Self {
        Self {
            text: config.title_fallback.clone(),
            anchor: None,
        }
    }

    /// Check if a fragment is the one the title was taken from.
    pub fn is_title_fragment(&self, fragment: &Fragment) -> bool {
        match &self.anchor {
            Some(anchor) => {
                anchor.page == fragment.page
                    && anchor.bbox == fragment.bbox
                    && self.text == fragment.text
            }
            None => false,
        }
    }
}

/// Score a fragment as a title candidate.
///
/// `average_size` is the mean font size over the candidate pages.
pub fn title_score(fragment: &Fragment, average_size: f32) -> u32 {
    let mut score = 0;

    if fragment.y_relative < 0.3 {
        score += 3;
    }
    if fragment.x_relative > 0.2 && fragment.x_relative < 0.8 {
        score += 2;
    }
    if fragment.is_bold {
        score += 2;
    }
    if fragment.font_size > average_size * 1.2 {
        score += 1;
    }
    let words = fragment.word_count();
    if (3..=15).contains(&words) {
        score += 1;
    }

    score
}

/// Pick the most title-like fragment on the first pages.
///
/// The highest score wins; among equal scores the earliest fragment wins.
pub fn locate_title(fragments: &[Fragment], config: &OutlineConfig) -> TitleChoice {
    let candidates: Vec<&Fragment> = fragments
        .iter()
        .filter(|f| f.page <= config.title_max_page && !f.is_empty())
        .collect();

    if candidates.is_empty() {
        return TitleChoice::fallback(config);
    }

    let average_size =
        candidates.iter().map(|f| f.font_size).sum::<f32>() / candidates.len() as f32;

    let mut best: Option<(u32, &Fragment)> = None;
    for fragment in candidates {
        let score = title_score(fragment, average_size);
        if best.map_or(true, |(top, _)| score > top) {
            best = Some((score, fragment));
        }
    }

    match best {
        Some((score, fragment)) => {
            log::debug!(
                "Title '{}' on page {} (score {})",
                fragment.text,
                fragment.page,
                score
            );
            TitleChoice {
                text: fragment.text.clone(),
                anchor: Some(TitleAnchor {
                    page: fragment.page,
                    bbox: fragment.bbox,
                }),
            }
        }
        None => TitleChoice::fallback(config),
    }
}
