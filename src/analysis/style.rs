//! Font-size statistics: body size and the size-to-level mapping.

use std::collections::{BTreeMap, HashMap};

use crate::model::{Fragment, HeadingLevel};

use super::config::OutlineConfig;

/// Per-document summary of font sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleProfile {
    /// Font size of ordinary paragraph text
    pub body_size: f32,
    /// Heading sizes (rounded points) mapped to levels, at most four entries
    pub size_levels: BTreeMap<i32, HeadingLevel>,
}

impl StyleProfile {
    /// Profile with no heading sizes.
    pub fn body_only(body_size: f32) -> Self {
        Self {
            body_size,
            size_levels: BTreeMap::new(),
        }
    }

    /// Size-based level for a font size, if the size is a heading size.
    pub fn level_for(&self, font_size: f32) -> Option<HeadingLevel> {
        self.size_levels.get(&size_key(font_size)).copied()
    }

    /// Heading sizes, largest first.
    pub fn heading_sizes(&self) -> Vec<f32> {
        self.size_levels.keys().rev().map(|&k| k as f32).collect()
    }
}

/// Font size observations for one document.
#[derive(Debug, Clone, Default)]
pub struct FontStatistics {
    /// Observation count per rounded size
    pub size_histogram: HashMap<i32, usize>,
    /// Sizes in order of first appearance
    first_seen: Vec<i32>,
}

impl FontStatistics {
    /// Collect sizes of all non-empty fragments.
    pub fn from_fragments<'a, I>(fragments: I) -> Self
    where
        I: IntoIterator<Item = &'a Fragment>,
    {
        let mut stats = Self::default();
        for fragment in fragments.into_iter().filter(|f| !f.is_empty()) {
            stats.add_size(fragment.font_size);
        }
        stats
    }

    /// Add a font size observation.
    pub fn add_size(&mut self, size: f32) {
        let key = size_key(size);
        let count = self.size_histogram.entry(key).or_insert(0);
        if *count == 0 {
            self.first_seen.push(key);
        }
        *count += 1;
    }

    /// Check if no size has been observed.
    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }

    /// Calculate body size and heading levels.
    ///
    /// The body size is the most frequent size inside the body range (first
    /// seen wins a tie), or the smallest observed size when none is in range.
    pub fn analyze(&self, config: &OutlineConfig) -> StyleProfile {
        if self.is_empty() {
            return StyleProfile::body_only(config.default_body_size);
        }

        let body_key = self
            .most_common_in_range(config)
            .or_else(|| self.first_seen.iter().copied().min())
            .unwrap_or(config.default_body_size as i32);
        let body_size = body_key as f32;

        let threshold = body_size * config.heading_size_factor;
        let mut larger: Vec<i32> = self
            .first_seen
            .iter()
            .copied()
            .filter(|&k| k as f32 > threshold && k as f32 > body_size)
            .collect();
        larger.sort_unstable_by(|a, b| b.cmp(a));

        let size_levels = larger
            .into_iter()
            .take(config.max_size_levels)
            .enumerate()
            .filter_map(|(rank, key)| HeadingLevel::from_rank(rank).map(|level| (key, level)))
            .collect();

        StyleProfile {
            body_size,
            size_levels,
        }
    }

    fn most_common_in_range(&self, config: &OutlineConfig) -> Option<i32> {
        let mut best: Option<(i32, usize)> = None;
        for &key in &self.first_seen {
            if !config.is_body_range(key as f32) {
                continue;
            }
            let count = self.size_histogram.get(&key).copied().unwrap_or(0);
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((key, count));
            }
        }
        best.map(|(key, _)| key)
    }
}

/// Build the style profile for a document.
pub fn analyze_styles(fragments: &[Fragment], config: &OutlineConfig) -> StyleProfile {
    let profile = FontStatistics::from_fragments(fragments).analyze(config);
    log::debug!(
        "Style profile: body size {}, heading sizes {:?}",
        profile.body_size,
        profile.heading_sizes()
    );
    profile
}

fn size_key(size: f32) -> i32 {
    size.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, PageInfo};

    fn sized(size: f64) -> Fragment {
        Fragment::new(
            "text",
            size,
            "Arial",
            BBox::new(0.0, 100.0, 50.0, 110.0),
            &PageInfo::letter(1),
        )
    }

    #[test]
    fn test_font_statistics() {
        let mut stats = FontStatistics::default();
        for _ in 0..100 {
            stats.add_size(12.0);
        }
        for _ in 0..5 {
            stats.add_size(18.0);
        }
        for _ in 0..3 {
            stats.add_size(24.0);
        }

        let profile = stats.analyze(&OutlineConfig::default());

        assert_eq!(profile.body_size, 12.0);
        assert_eq!(profile.level_for(24.0), Some(HeadingLevel::H1));
        assert_eq!(profile.level_for(18.0), Some(HeadingLevel::H2));
        assert_eq!(profile.level_for(12.0), None);
    }

    #[test]
    fn test_empty_input_uses_default_body() {
        let profile = analyze_styles(&[], &OutlineConfig::default());
        assert_eq!(profile.body_size, 12.0);
        assert!(profile.size_levels.is_empty());
    }

    #[test]
    fn test_empty_fragments_ignored() {
        let mut blank = sized(30.0);
        blank.text.clear();
        let profile = analyze_styles(&[blank, sized(11.0)], &OutlineConfig::default());
        assert_eq!(profile.body_size, 11.0);
        assert!(profile.size_levels.is_empty());
    }

    #[test]
    fn test_body_falls_back_to_minimum_outside_range() {
        let fragments = vec![sized(24.0), sized(24.0), sized(36.0), sized(6.0)];
        let profile = analyze_styles(&fragments, &OutlineConfig::default());
        assert_eq!(profile.body_size, 6.0);
        assert_eq!(profile.level_for(36.0), Some(HeadingLevel::H1));
        assert_eq!(profile.level_for(24.0), Some(HeadingLevel::H2));
    }

    #[test]
    fn test_tie_prefers_first_seen_size() {
        let fragments = vec![sized(11.0), sized(10.0), sized(10.0), sized(11.0)];
        let profile = analyze_styles(&fragments, &OutlineConfig::default());
        assert_eq!(profile.body_size, 11.0);
    }

    #[test]
    fn test_sizes_below_factor_not_mapped() {
        // 10 * 1.15 = 11.5, so 11 is larger than body yet not a heading size
        let fragments = vec![sized(10.0), sized(10.0), sized(11.0), sized(12.0)];
        let profile = analyze_styles(&fragments, &OutlineConfig::default());
        assert_eq!(profile.body_size, 10.0);
        assert_eq!(profile.level_for(11.0), None);
        assert_eq!(profile.level_for(12.0), Some(HeadingLevel::H1));
    }

    #[test]
    fn test_at_most_four_levels() {
        let mut fragments = vec![sized(10.0); 10];
        for size in [14.0, 16.0, 18.0, 20.0, 22.0, 26.0] {
            fragments.push(sized(size));
        }
        let profile = analyze_styles(&fragments, &OutlineConfig::default());

        assert_eq!(profile.size_levels.len(), 4);
        assert_eq!(profile.heading_sizes(), vec![26.0, 22.0, 20.0, 18.0]);
        assert_eq!(profile.level_for(18.0), Some(HeadingLevel::H4));
        assert_eq!(profile.level_for(16.0), None);
        assert_eq!(profile.level_for(14.0), None);
    }
}
