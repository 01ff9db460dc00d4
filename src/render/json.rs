//! JSON rendering for document outlines.

use crate::error::{Error, Result};
use crate::model::DocumentOutline;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to `{"title": ..., "outline": [...]}` JSON.
///
/// Non-ASCII text is written verbatim.
pub fn to_json(outline: &DocumentOutline, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(outline),
        JsonFormat::Compact => serde_json::to_string(outline),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    fn sample() -> DocumentOutline {
        DocumentOutline::new(
            "Rapport annuel",
            vec![
                OutlineEntry::new(HeadingLevel::H1, "1. Présentation", 2),
                OutlineEntry::new(HeadingLevel::H2, "1.1 第1章", 3),
            ],
        )
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"Rapport annuel\""));
        assert!(json.contains("\"level\": \"H1\""));
        assert!(json.contains("Présentation"));
        assert!(json.contains("第1章"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with(r#"{"title":"Rapport annuel","outline":[{"level":"H1","#));
    }

    #[test]
    fn test_json_roundtrip() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        let parsed: DocumentOutline = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }
}
