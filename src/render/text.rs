//! Plain text table of contents.

use crate::model::DocumentOutline;

use super::TocOptions;

/// Render an outline as indented plain text lines.
///
/// Each line reads `H2 Text .... 4` when page numbers are enabled.
pub fn to_text(outline: &DocumentOutline, options: &TocOptions) -> String {
    let mut lines = vec![outline.title.clone()];

    for entry in outline.outline.iter().filter(|e| e.level <= options.max_level) {
        let mut line = format!("{}{} {}", options.indent(entry.level), entry.level, entry.text);
        if options.show_pages {
            line.push_str(&format!(" .... {}", entry.page));
        }
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    #[test]
    fn test_to_text() {
        let outline = DocumentOutline::new(
            "Handbook",
            vec![
                OutlineEntry::new(HeadingLevel::H1, "Overview", 1),
                OutlineEntry::new(HeadingLevel::H2, "Scope", 2),
            ],
        );
        let text = to_text(&outline, &TocOptions::default());
        assert_eq!(text, "Handbook\nH1 Overview .... 1\n  H2 Scope .... 2");
    }

    #[test]
    fn test_to_text_title_only() {
        let outline = DocumentOutline::no_extractable_text();
        assert_eq!(
            to_text(&outline, &TocOptions::default()),
            "Document with no extractable text"
        );
    }
}
