//! Options for table-of-contents rendering.

use crate::model::HeadingLevel;

/// Options shared by the Markdown and text renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocOptions {
    /// Deepest level to include
    pub max_level: HeadingLevel,

    /// Append page numbers to entries
    pub show_pages: bool,

    /// Spaces of indentation per level below H1
    pub indent_width: usize,
}

impl TocOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deepest level to include.
    pub fn with_max_level(mut self, level: HeadingLevel) -> Self {
        self.max_level = level;
        self
    }

    /// Enable or disable page numbers.
    pub fn with_pages(mut self, show: bool) -> Self {
        self.show_pages = show;
        self
    }

    /// Set indentation width per level.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub(crate) fn indent(&self, level: HeadingLevel) -> String {
        " ".repeat(self.indent_width * (level.depth() as usize - 1))
    }
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            max_level: HeadingLevel::H4,
            show_pages: true,
            indent_width: 2,
        }
    }
}
