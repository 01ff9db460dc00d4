//! JSON fragment-dump decoder.
//!
//! Expected layout:
//!
//! ```json
//! {
//!   "encrypted": false,
//!   "pages": [{"number": 1, "width": 612.0, "height": 792.0}],
//!   "fragments": [
//!     {"text": "1. Introduction", "font_size": 15.8, "font_name": "Arial-BoldMT",
//!      "bbox": [72.0, 120.0, 260.0, 136.0], "page": 1}
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{BBox, DocumentInput, Fragment, PageInfo};

use super::FragmentDecoder;

/// Fragment dump as written by an external decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub encrypted: bool,
    #[serde(default)]
    pub pages: Vec<PageInfo>,
    #[serde(default)]
    pub fragments: Vec<RawFragment>,
}

/// One line of text before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFragment {
    pub text: String,
    pub font_size: f64,
    #[serde(default)]
    pub font_name: String,
    /// `[x0, top, x1, bottom]`
    pub bbox: [f64; 4],
    pub page: u32,
}

impl RawDocument {
    /// Normalize into the pipeline's input model.
    ///
    /// Text is NFC-normalized and trimmed; fragments left empty are dropped.
    pub fn into_document(self) -> Result<DocumentInput> {
        for page in &self.pages {
            if !page.has_area() {
                return Err(Error::Malformed(format!(
                    "page {} has no area ({} x {})",
                    page.number, page.width, page.height
                )));
            }
        }

        let mut doc = DocumentInput::with_pages(self.pages);
        doc.encrypted = self.encrypted;

        for (index, raw) in self.fragments.into_iter().enumerate() {
            let page = *doc.page(raw.page).ok_or_else(|| {
                Error::Malformed(format!(
                    "fragment {} references unknown page {}",
                    index, raw.page
                ))
            })?;

            if !raw.font_size.is_finite() || raw.bbox.iter().any(|v| !v.is_finite()) {
                return Err(Error::Malformed(format!(
                    "fragment {} has non-finite geometry",
                    index
                )));
            }

            let text: String = raw.text.nfc().collect();
            let [x0, top, x1, bottom] = raw.bbox;
            let fragment = Fragment::new(
                text,
                raw.font_size,
                raw.font_name,
                BBox::new(x0, top, x1, bottom),
                &page,
            );
            if !fragment.is_empty() {
                doc.add_fragment(fragment);
            }
        }

        Ok(doc)
    }
}

/// Decoder for JSON fragment dumps.
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    _private: (),
}

impl JsonDecoder {
    /// Create a new JSON decoder.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl FragmentDecoder for JsonDecoder {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "json-fragments"
    }

    fn decode_bytes(&self, bytes: &[u8]) -> Result<DocumentInput> {
        if bytes.is_empty() {
            return Err(Error::Malformed("empty input".into()));
        }
        let raw: RawDocument = serde_json::from_slice(bytes)?;
        raw.into_document()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "pages": [{"number": 1, "width": 600.0, "height": 800.0}],
        "fragments": [
            {"text": "  Overview ", "font_size": 17.6, "font_name": "Arial-BoldMT",
             "bbox": [150.0, 80.0, 300.0, 98.0], "page": 1},
            {"text": "   ", "font_size": 11.0, "font_name": "Arial",
             "bbox": [72.0, 120.0, 300.0, 131.0], "page": 1}
        ]
    }"#;

    #[test]
    fn test_json_decoder_extensions() {
        let decoder = JsonDecoder::new();
        assert_eq!(decoder.supported_extensions(), &["json"]);
        assert!(decoder.supports_extension("JSON"));
        assert!(!decoder.supports_extension("pdf"));
        assert_eq!(decoder.name(), "json-fragments");
    }

    #[test]
    fn test_decode_sample() {
        let doc = JsonDecoder::new().decode_bytes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert!(!doc.encrypted);
        assert_eq!(doc.fragments.len(), 1);

        let fragment = &doc.fragments[0];
        assert_eq!(fragment.text, "Overview");
        assert_eq!(fragment.font_size, 18.0);
        assert!(fragment.is_bold);
        assert!((fragment.y_relative - 0.1).abs() < 1e-9);
        assert!((fragment.x_relative - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_decode_normalizes_to_nfc() {
        let json = r#"{
            "pages": [{"number": 1, "width": 600.0, "height": 800.0}],
            "fragments": [{"text": "Re\u0301sume\u0301", "font_size": 12.0,
                           "bbox": [0.0, 0.0, 10.0, 10.0], "page": 1}]
        }"#;
        let doc = JsonDecoder::new().decode_bytes(json.as_bytes()).unwrap();
        assert_eq!(doc.fragments[0].text, "R\u{e9}sum\u{e9}");
    }

    #[test]
    fn test_decode_errors() {
        let decoder = JsonDecoder::new();
        assert!(matches!(decoder.decode_bytes(b""), Err(Error::Malformed(_))));
        assert!(matches!(decoder.decode_bytes(b"{oops"), Err(Error::Malformed(_))));

        let unknown_page = r#"{"pages": [], "fragments": [
            {"text": "x", "font_size": 12.0, "bbox": [0.0, 0.0, 1.0, 1.0], "page": 4}]}"#;
        assert!(matches!(
            decoder.decode_bytes(unknown_page.as_bytes()),
            Err(Error::Malformed(_))
        ));

        let flat_page = r#"{"pages": [{"number": 1, "width": 0.0, "height": 800.0}]}"#;
        assert!(matches!(
            decoder.decode_bytes(flat_page.as_bytes()),
            Err(Error::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_encrypted_flag() {
        let doc = JsonDecoder::new()
            .decode_bytes(br#"{"encrypted": true}"#)
            .unwrap();
        assert!(doc.encrypted);
        assert!(doc.is_empty());
    }
}
