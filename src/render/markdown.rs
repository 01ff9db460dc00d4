//! Markdown table of contents.

use crate::model::DocumentOutline;

use super::TocOptions;

/// Render an outline as a Markdown heading plus nested bullet list.
pub fn to_markdown(outline: &DocumentOutline, options: &TocOptions) -> String {
    let mut output = format!("# {}\n", escape_markdown(&outline.title));

    let entries: Vec<_> = outline
        .outline
        .iter()
        .filter(|e| e.level <= options.max_level)
        .collect();
    if entries.is_empty() {
        return output;
    }

    output.push('\n');
    for entry in entries {
        output.push_str(&options.indent(entry.level));
        output.push_str("- ");
        output.push_str(&escape_markdown(&entry.text));
        if options.show_pages {
            output.push_str(&format!(" (p. {})", entry.page));
        }
        output.push('\n');
    }

    output
}

/// Escape characters that would otherwise start Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '_' | '`' | '[' | ']' | '#') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
