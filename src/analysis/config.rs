//! Heuristic thresholds for outline inference.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Thresholds consulted by every stage of the outline pipeline.
///
/// The defaults are empirical; every field can be overridden with a builder
/// method or by loading a (partial) JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// A size maps to a heading level only above `body_size * heading_size_factor`
    pub heading_size_factor: f32,

    /// Header/footer band as a fraction of page height, on each edge
    pub vertical_margin: f64,

    /// Minimum heading length in characters
    pub min_heading_chars: usize,

    /// Maximum heading length in words
    pub max_heading_words: usize,

    /// Lower bound (exclusive) of the body-text size range
    pub body_size_min: f32,

    /// Upper bound (exclusive) of the body-text size range
    pub body_size_max: f32,

    /// Body size assumed when no sizes are observed
    pub default_body_size: f32,

    /// Number of distinct sizes mapped to heading levels
    pub max_size_levels: usize,

    /// Last page (inclusive) considered for the title
    pub title_max_page: u32,

    /// Title reported when no fragment qualifies
    pub title_fallback: String,

    /// Vertical tolerance for fragments sharing a table row
    pub row_tolerance: f64,

    /// Other fragments on the same row that mark a table row
    pub row_min_neighbors: usize,

    /// Vertical window scanned for numbered list items
    pub numbered_list_window: f64,

    /// Numbered items within the window that mark a list or table
    pub numbered_list_min: usize,

    /// Vertical window for the surrounding-context set
    pub context_window: f64,

    /// Form-indicator ratio above which the document is form-like
    pub form_ratio_threshold: f64,

    /// Page inspected by the form detector
    pub form_page: u32,

    /// `N.` lines are H1 only below this word count
    pub max_h1_numbered_words: usize,

    /// Lines ending in a period are prose above this word count
    pub prose_period_max_words: usize,

    /// All-caps lines are rejected above this word count
    pub max_shouting_words: usize,
}

impl OutlineConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from JSON; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidConfig(format!("unreadable configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that thresholds are mutually consistent.
    pub fn validate(&self) -> Result<()> {
        if self.heading_size_factor <= 1.0 {
            return Err(Error::InvalidConfig(format!(
                "heading_size_factor must exceed 1.0, got {}",
                self.heading_size_factor
            )));
        }
        if !(0.0..0.5).contains(&self.vertical_margin) {
            return Err(Error::InvalidConfig(format!(
                "vertical_margin must be in [0, 0.5), got {}",
                self.vertical_margin
            )));
        }
        if self.body_size_min >= self.body_size_max {
            return Err(Error::InvalidConfig(format!(
                "body size range is empty: ({}, {})",
                self.body_size_min, self.body_size_max
            )));
        }
        if self.max_size_levels > 4 {
            return Err(Error::InvalidConfig(format!(
                "at most 4 size levels are supported, got {}",
                self.max_size_levels
            )));
        }
        if self.max_heading_words == 0 {
            return Err(Error::InvalidConfig(
                "max_heading_words must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Set the heading size factor.
    pub fn with_heading_size_factor(mut self, factor: f32) -> Self {
        self.heading_size_factor = factor;
        self
    }

    /// Set the header/footer margin.
    pub fn with_vertical_margin(mut self, margin: f64) -> Self {
        self.vertical_margin = margin;
        self
    }

    /// Set the body-text size range (both bounds exclusive).
    pub fn with_body_size_range(mut self, min: f32, max: f32) -> Self {
        self.body_size_min = min;
        self.body_size_max = max;
        self
    }

    /// Set the maximum heading word count.
    pub fn with_max_heading_words(mut self, words: usize) -> Self {
        self.max_heading_words = words;
        self
    }

    /// Set the minimum heading length in characters.
    pub fn with_min_heading_chars(mut self, chars: usize) -> Self {
        self.min_heading_chars = chars;
        self
    }

    /// Set the form-indicator ratio threshold.
    pub fn with_form_ratio_threshold(mut self, ratio: f64) -> Self {
        self.form_ratio_threshold = ratio;
        self
    }

    /// Set the word limit for `N.` headings.
    pub fn with_max_h1_numbered_words(mut self, words: usize) -> Self {
        self.max_h1_numbered_words = words;
        self
    }

    /// Set the fallback title.
    pub fn with_title_fallback(mut self, title: impl Into<String>) -> Self {
        self.title_fallback = title.into();
        self
    }

    /// Whether a relative vertical position falls in the header or footer band.
    pub fn in_margin(&self, y_relative: f64) -> bool {
        y_relative < self.vertical_margin || y_relative > 1.0 - self.vertical_margin
    }

    /// Whether a size lies inside the body-text range.
    pub fn is_body_range(&self, size: f32) -> bool {
        size > self.body_size_min && size < self.body_size_max
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            heading_size_factor: 1.15,
            vertical_margin: 0.08,
            min_heading_chars: 2,
            max_heading_words: 20,
            body_size_min: 8.0,
            body_size_max: 20.0,
            default_body_size: 12.0,
            max_size_levels: 4,
            title_max_page: 2,
            title_fallback: "Untitled Document".to_string(),
            row_tolerance: 10.0,
            row_min_neighbors: 3,
            numbered_list_window: 50.0,
            numbered_list_min: 3,
            context_window: 100.0,
            form_ratio_threshold: 0.4,
            form_page: 1,
            max_h1_numbered_words: 10,
            prose_period_max_words: 8,
            max_shouting_words: 5,
        }
    }
}

/// Limits enforced before a document reaches the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    /// Maximum input file size in MiB
    pub max_file_size_mb: u64,

    /// Maximum page count
    pub max_pages: usize,
}

impl InputLimits {
    /// Create limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum file size in MiB.
    pub fn with_max_file_size_mb(mut self, mb: u64) -> Self {
        self.max_file_size_mb = mb;
        self
    }

    /// Set the maximum page count.
    pub fn with_max_pages(mut self, pages: usize) -> Self {
        self.max_pages = pages;
        self
    }
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_file_size_mb: 50,
            max_pages: 50,
        }
    }
}
