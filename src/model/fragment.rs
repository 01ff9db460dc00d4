//! Positioned text fragments and page geometry.

use serde::{Deserialize, Serialize};

/// Bounding box with top-left origin coordinate system.
///
/// - `x0`: left edge
/// - `top`: top edge (distance from top of page)
/// - `x1`: right edge
/// - `bottom`: bottom edge (distance from top of page)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Dimensions of a single page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points
    pub width: f64,

    /// Page height in points
    pub height: f64,
}

impl PageInfo {
    /// Create page info with the given dimensions.
    pub fn new(number: u32, width: f64, height: f64) -> Self {
        Self {
            number,
            width,
            height,
        }
    }

    /// Standard Letter size (8.5 x 11 inches).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Standard A4 size (210 x 297 mm).
    pub fn a4(number: u32) -> Self {
        Self::new(number, 595.0, 842.0)
    }

    /// Whether both dimensions are usable for relative positioning.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// One line of text as it appears on a page.
///
/// Fragments are immutable once built: relative positions are derived from the
/// page geometry at construction time and always lie in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Trimmed text content
    pub text: String,
    /// Font size rounded to the nearest point
    pub font_size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Whether the font name marks a bold face
    pub is_bold: bool,
    /// Bounding box in page coordinates
    pub bbox: BBox,
    /// Page number (1-indexed)
    pub page: u32,
    /// Width of the owning page
    pub page_width: f64,
    /// Height of the owning page
    pub page_height: f64,
    /// Top edge relative to page height (0.0 top, 1.0 bottom)
    pub y_relative: f64,
    /// Left edge relative to page width
    pub x_relative: f64,
}

impl Fragment {
    /// Create a fragment on the given page.
    ///
    /// Text is trimmed, the font size rounded, and boldness read off the font name.
    pub fn new(
        text: impl AsRef<str>,
        font_size: f64,
        font_name: impl Into<String>,
        bbox: BBox,
        page: &PageInfo,
    ) -> Self {
        let font_name = font_name.into();
        let is_bold = font_name.to_lowercase().contains("bold");

        Self {
            text: text.as_ref().trim().to_string(),
            font_size: font_size.round() as f32,
            font_name,
            is_bold,
            bbox,
            page: page.number,
            page_width: page.width,
            page_height: page.height,
            y_relative: relative(bbox.top, page.height),
            x_relative: relative(bbox.x0, page.width),
        }
    }

    /// Check if the fragment carries no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Vertical distance between the top edges of two fragments.
    pub fn vertical_distance(&self, other: &Fragment) -> f64 {
        (self.bbox.top - other.bbox.top).abs()
    }
}

fn relative(offset: f64, extent: f64) -> f64 {
    if extent <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    (offset / extent).clamp(0.0, 1.0)
}

/// A decoded document: page geometry plus fragments in reading order.
///
/// This is the input contract of the outline pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInput {
    /// Pages in document order
    pub pages: Vec<PageInfo>,

    /// Fragments in reading order
    pub fragments: Vec<Fragment>,

    /// Whether the source document was encrypted
    #[serde(default)]
    pub encrypted: bool,
}

impl DocumentInput {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document with the given pages and no fragments.
    pub fn with_pages(pages: Vec<PageInfo>) -> Self {
        Self {
            pages,
            ..Default::default()
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by number (1-indexed).
    pub fn page(&self, number: u32) -> Option<&PageInfo> {
        self.pages.iter().find(|p| p.number == number)
    }

    /// Add a fragment to the document.
    pub fn add_fragment(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Check if any fragment carries text.
    pub fn has_text(&self) -> bool {
        self.fragments.iter().any(|f| !f.is_empty())
    }

    /// Fragments located on a single page, in document order.
    pub fn page_fragments(&self, number: u32) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter().filter(move |f| f.page == number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_dimensions() {
        let bbox = BBox::new(10.0, 20.0, 110.0, 35.0);
        assert_eq!(bbox.width(), 100.0);
        assert_eq!(bbox.height(), 15.0);
    }

    #[test]
    fn test_fragment_relative_positions() {
        let page = PageInfo::new(1, 600.0, 800.0);
        let fragment = Fragment::new(
            "  Heading  ",
            13.6,
            "Arial",
            BBox::new(150.0, 200.0, 300.0, 214.0),
            &page,
        );

        assert_eq!(fragment.text, "Heading");
        assert_eq!(fragment.font_size, 14.0);
        assert!((fragment.x_relative - 0.25).abs() < 1e-9);
        assert!((fragment.y_relative - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_fragment_positions_clamped() {
        let page = PageInfo::new(1, 100.0, 100.0);
        let below = Fragment::new("x", 10.0, "Arial", BBox::new(-5.0, 150.0, 5.0, 160.0), &page);
        assert_eq!(below.y_relative, 1.0);
        assert_eq!(below.x_relative, 0.0);
    }

    #[test]
    fn test_fragment_bold_detection() {
        let page = PageInfo::letter(1);
        let bbox = BBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(Fragment::new("a", 12.0, "Helvetica-Bold", bbox, &page).is_bold);
        assert!(Fragment::new("a", 12.0, "TimesNewRomanPS-BOLDMT", bbox, &page).is_bold);
        assert!(!Fragment::new("a", 12.0, "Helvetica-Oblique", bbox, &page).is_bold);
    }

    #[test]
    fn test_fragment_word_count() {
        let page = PageInfo::letter(1);
        let bbox = BBox::new(0.0, 0.0, 10.0, 10.0);
        let fragment = Fragment::new("1.2  Scope of   work", 12.0, "Arial", bbox, &page);
        assert_eq!(fragment.word_count(), 4);
        assert!(Fragment::new("   ", 12.0, "Arial", bbox, &page).is_empty());
    }

    #[test]
    fn test_document_input_pages() {
        let mut doc = DocumentInput::with_pages(vec![PageInfo::letter(1), PageInfo::a4(2)]);
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.page(2).map(|p| p.width), Some(595.0));
        assert!(doc.page(3).is_none());
        assert!(!doc.has_text());

        let page = PageInfo::a4(2);
        doc.add_fragment(Fragment::new(
            "Body",
            11.0,
            "Arial",
            BBox::new(0.0, 100.0, 50.0, 111.0),
            &page,
        ));
        assert!(doc.has_text());
        assert_eq!(doc.page_fragments(2).count(), 1);
        assert_eq!(doc.page_fragments(1).count(), 0);
    }
}
