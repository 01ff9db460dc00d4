//! Outline assembly.
//!
//! Document-wide signals (language, style profile, title, form check) are
//! computed once; then each fragment runs through the margin check, the
//! candidate filters and the level-classifier chain in document order.

use std::collections::HashSet;
use std::sync::Arc;

use crate::model::{DocumentInput, DocumentOutline, Fragment, HeadingLevel, OutlineEntry};

use super::candidate::is_plausible_heading;
use super::config::OutlineConfig;
use super::form::is_form_like;
use super::language::{detect_language, first_page_sample, Language};
use super::numbering::classify_numbering;
use super::style::{analyze_styles, StyleProfile};
use super::table_filter::surrounding_context;
use super::title::{locate_title, TitleChoice};

/// Everything a level classifier may consult about one fragment.
#[derive(Debug, Clone, Copy)]
pub struct LevelContext<'a> {
    /// Fragment being classified
    pub fragment: &'a Fragment,
    /// Detected document language
    pub language: Language,
    /// Document style profile
    pub style: &'a StyleProfile,
    /// Active configuration
    pub config: &'a OutlineConfig,
}

/// One link in the level-assignment chain.
///
/// Implement this trait to add a numbering convention or another signal.
/// Returning `None` means "no opinion" and passes the fragment to the next link.
pub trait LevelClassifier: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Level for the fragment, if this classifier has an opinion.
    fn classify(&self, ctx: &LevelContext<'_>) -> Option<HeadingLevel>;
}

/// Levels from section numbering ("1.2", "第3章", "A.").
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberingClassifier;

impl LevelClassifier for NumberingClassifier {
    fn name(&self) -> &str {
        "numbering"
    }

    fn classify(&self, ctx: &LevelContext<'_>) -> Option<HeadingLevel> {
        classify_numbering(&ctx.fragment.text, ctx.language, ctx.config)
    }
}

/// Levels from the ranked heading font sizes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontSizeClassifier;

impl LevelClassifier for FontSizeClassifier {
    fn name(&self) -> &str {
        "font-size"
    }

    fn classify(&self, ctx: &LevelContext<'_>) -> Option<HeadingLevel> {
        ctx.style.level_for(ctx.fragment.font_size)
    }
}

/// Bold text larger than body text becomes H3.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoldEmphasisClassifier;

impl LevelClassifier for BoldEmphasisClassifier {
    fn name(&self) -> &str {
        "bold-emphasis"
    }

    fn classify(&self, ctx: &LevelContext<'_>) -> Option<HeadingLevel> {
        (ctx.fragment.is_bold && ctx.fragment.font_size > ctx.style.body_size)
            .then_some(HeadingLevel::H3)
    }
}

/// Ordered level classifiers; the first opinion wins.
#[derive(Clone)]
pub struct LevelChain {
    classifiers: Vec<Arc<dyn LevelClassifier>>,
}

impl LevelChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            classifiers: Vec::new(),
        }
    }

    /// Numbering, then font size, then bold emphasis.
    pub fn with_defaults() -> Self {
        let mut chain = Self::new();
        chain.push(Arc::new(NumberingClassifier));
        chain.push(Arc::new(FontSizeClassifier));
        chain.push(Arc::new(BoldEmphasisClassifier));
        chain
    }

    /// Append a classifier at the lowest priority.
    pub fn push(&mut self, classifier: Arc<dyn LevelClassifier>) {
        self.classifiers.push(classifier);
    }

    /// Insert a classifier ahead of all others.
    pub fn push_front(&mut self, classifier: Arc<dyn LevelClassifier>) {
        self.classifiers.insert(0, classifier);
    }

    /// Names of the classifiers in priority order.
    pub fn names(&self) -> Vec<&str> {
        self.classifiers.iter().map(|c| c.name()).collect()
    }

    /// First opinion in the chain.
    pub fn classify(&self, ctx: &LevelContext<'_>) -> Option<HeadingLevel> {
        self.classifiers.iter().find_map(|c| c.classify(ctx))
    }
}

impl Default for LevelChain {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for LevelChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Document-wide signals computed before the per-fragment pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSignals {
    pub language: Language,
    pub style: StyleProfile,
    pub title: TitleChoice,
    pub form_like: bool,
}

impl DocumentSignals {
    /// Compute language, style profile, title and form classification.
    pub fn compute(fragments: &[Fragment], config: &OutlineConfig) -> Self {
        let language = detect_language(&first_page_sample(fragments));
        log::info!("Detected language: {}", language);

        Self {
            language,
            style: analyze_styles(fragments, config),
            title: locate_title(fragments, config),
            form_like: is_form_like(fragments, config),
        }
    }
}

/// Run the per-fragment pass and return deduplicated entries.
pub fn assemble_outline(
    fragments: &[Fragment],
    signals: &DocumentSignals,
    config: &OutlineConfig,
    chain: &LevelChain,
) -> Vec<OutlineEntry> {
    let mut entries = Vec::new();

    for fragment in fragments {
        if fragment.is_empty() || signals.title.is_title_fragment(fragment) {
            continue;
        }
        if config.in_margin(fragment.y_relative) {
            continue;
        }

        let surrounding = surrounding_context(fragments, fragment, config);
        if !is_plausible_heading(fragment, signals.style.body_size, &surrounding, config) {
            continue;
        }

        let ctx = LevelContext {
            fragment,
            language: signals.language,
            style: &signals.style,
            config,
        };
        if let Some(level) = chain.classify(&ctx) {
            entries.push(OutlineEntry::new(level, fragment.text.clone(), fragment.page));
        }
    }

    dedupe_outline(entries)
}

/// Drop repeated (text, page) pairs, keeping the first occurrence.
pub fn dedupe_outline(entries: Vec<OutlineEntry>) -> Vec<OutlineEntry> {
    let mut seen: HashSet<(String, u32)> = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert((e.text.clone(), e.page)))
        .collect()
}

/// Infer the title and outline of a decoded document.
pub fn extract_outline_with(
    doc: &DocumentInput,
    config: &OutlineConfig,
    chain: &LevelChain,
) -> DocumentOutline {
    if doc.is_empty() {
        return DocumentOutline::empty_document();
    }
    if !doc.has_text() {
        return DocumentOutline::no_extractable_text();
    }

    let fragments = doc.fragments.as_slice();
    let signals = DocumentSignals::compute(fragments, config);

    if signals.form_like {
        log::info!("Form-like document, outline suppressed");
        return DocumentOutline::new(signals.title.text, Vec::new());
    }

    let outline = assemble_outline(fragments, &signals, config, chain);
    log::info!(
        "Outline: {} entries across {} pages",
        outline.len(),
        doc.page_count()
    );
    DocumentOutline::new(signals.title.text, outline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, PageInfo};

    fn fragment(text: &str, size: f64, font: &str, top: f64, page: u32) -> Fragment {
        Fragment::new(
            text,
            size,
            font,
            BBox::new(72.0, top, 400.0, top + size),
            &PageInfo::letter(page),
        )
    }

    fn ctx<'a>(
        fragment: &'a Fragment,
        style: &'a StyleProfile,
        config: &'a OutlineConfig,
    ) -> LevelContext<'a> {
        LevelContext {
            fragment,
            language: Language::English,
            style,
            config,
        }
    }

    struct Always(HeadingLevel);

    impl LevelClassifier for Always {
        fn name(&self) -> &str {
            "always"
        }

        fn classify(&self, _ctx: &LevelContext<'_>) -> Option<HeadingLevel> {
            Some(self.0)
        }
    }

    #[test]
    fn test_default_chain_order() {
        let chain = LevelChain::default();
        assert_eq!(chain.names(), vec!["numbering", "font-size", "bold-emphasis"]);
    }

    #[test]
    fn test_numbering_beats_size() {
        let config = OutlineConfig::default();
        let mut style = StyleProfile::body_only(11.0);
        style.size_levels.insert(18, HeadingLevel::H1);

        let f = fragment("2.3 Results", 18.0, "Arial", 300.0, 1);
        assert_eq!(
            LevelChain::default().classify(&ctx(&f, &style, &config)),
            Some(HeadingLevel::H2)
        );
    }

    #[test]
    fn test_size_then_bold_fallback() {
        let config = OutlineConfig::default();
        let mut style = StyleProfile::body_only(11.0);
        style.size_levels.insert(18, HeadingLevel::H1);
        let chain = LevelChain::default();

        let sized = fragment("Results", 18.0, "Arial", 300.0, 1);
        assert_eq!(chain.classify(&ctx(&sized, &style, &config)), Some(HeadingLevel::H1));

        let bold = fragment("Results", 12.0, "Arial-Bold", 300.0, 1);
        assert_eq!(chain.classify(&ctx(&bold, &style, &config)), Some(HeadingLevel::H3));

        let plain = fragment("Results", 12.0, "Arial", 300.0, 1);
        assert_eq!(chain.classify(&ctx(&plain, &style, &config)), None);

        let bold_body = fragment("Results", 11.0, "Arial-Bold", 300.0, 1);
        assert_eq!(chain.classify(&ctx(&bold_body, &style, &config)), None);
    }

    #[test]
    fn test_custom_classifier_front() {
        let config = OutlineConfig::default();
        let style = StyleProfile::body_only(11.0);
        let mut chain = LevelChain::default();
        chain.push_front(Arc::new(Always(HeadingLevel::H4)));

        let f = fragment("1. Scope", 12.0, "Arial-Bold", 300.0, 1);
        assert_eq!(chain.classify(&ctx(&f, &style, &config)), Some(HeadingLevel::H4));
        assert_eq!(chain.names()[0], "always");
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let entries = vec![
            OutlineEntry::new(HeadingLevel::H1, "Scope", 2),
            OutlineEntry::new(HeadingLevel::H3, "Scope", 2),
            OutlineEntry::new(HeadingLevel::H2, "Scope", 3),
        ];
        let deduped = dedupe_outline(entries);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].level, HeadingLevel::H1);
        assert_eq!(deduped[1].page, 3);
    }

    #[test]
    fn test_margin_fragments_skipped() {
        let config = OutlineConfig::default();
        let mut fragments = vec![fragment("Document Title Goes Here", 24.0, "Arial-Bold", 100.0, 1)];
        for i in 0..8 {
            fragments.push(fragment(
                "ordinary body text",
                11.0,
                "Arial",
                300.0 + 14.0 * i as f64,
                1,
            ));
        }
        // running header at 3% and footer at 96% of the page height
        fragments.push(fragment("Company Confidential", 16.0, "Arial-Bold", 24.0, 1));
        fragments.push(fragment("Quarterly Review", 16.0, "Arial-Bold", 760.0, 1));
        fragments.push(fragment("Key Findings", 16.0, "Arial-Bold", 500.0, 1));

        let signals = DocumentSignals::compute(&fragments, &config);
        let outline = assemble_outline(&fragments, &signals, &config, &LevelChain::default());

        let texts: Vec<&str> = outline.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Key Findings"]);
    }

    #[test]
    fn test_degenerate_documents() {
        let config = OutlineConfig::default();
        let chain = LevelChain::default();

        let empty = DocumentInput::new();
        assert_eq!(
            extract_outline_with(&empty, &config, &chain),
            DocumentOutline::empty_document()
        );

        let blank = DocumentInput::with_pages(vec![PageInfo::letter(1)]);
        assert_eq!(
            extract_outline_with(&blank, &config, &chain),
            DocumentOutline::no_extractable_text()
        );
    }
}
