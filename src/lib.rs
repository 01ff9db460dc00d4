//! # docoutline
//!
//! Infer a document's title and heading outline (H1–H4 with page numbers)
//! from positioned, styled text fragments.
//!
//! The crate does not decode binary document formats itself. A decoder turns
//! each page into text fragments carrying font size, font name and bounding
//! box; the analysis pipeline then works from typography, position, numbering
//! conventions and the detected language.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docoutline::{outline_file, render};
//!
//! fn main() -> docoutline::Result<()> {
//!     // Outline a JSON fragment dump
//!     let outline = outline_file("report.json")?;
//!
//!     let json = render::to_json(&outline, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typography-driven levels**: body size estimation and size clustering
//! - **Numbering conventions**: `1.`, `1.1`, `1.1.1`, `A.` and Japanese chapter markers
//! - **Noise filtering**: table rows, numbered lists, page furniture, prose lines
//! - **Form detection**: fill-in forms yield a title without an outline
//! - **Parallel batches**: Uses Rayon to outline whole directories

pub mod analysis;
pub mod batch;
pub mod decode;
pub mod error;
pub mod model;
pub mod render;
pub mod validate;

// Re-export commonly used types
pub use analysis::{
    detect_language, InputLimits, Language, LevelChain, LevelClassifier, LevelContext,
    OutlineConfig,
};
pub use batch::{process_directory, BatchFailure, BatchOptions, BatchReport};
pub use decode::{DecoderRegistry, FragmentDecoder, JsonDecoder};
pub use error::{Error, Result};
pub use model::{
    BBox, DocumentInput, DocumentOutline, Fragment, HeadingLevel, OutlineEntry, PageInfo,
};
pub use render::{JsonFormat, TocOptions};

use std::path::Path;

/// Infer the title and outline of a decoded document.
///
/// This never fails: documents without pages or text produce the fixed
/// degenerate titles, and form-like documents produce an empty outline.
///
/// # Example
///
/// ```
/// use docoutline::{extract_outline, DocumentInput, OutlineConfig};
///
/// let outline = extract_outline(&DocumentInput::new(), &OutlineConfig::default());
/// assert_eq!(outline.title, "Empty Document");
/// ```
pub fn extract_outline(doc: &DocumentInput, config: &OutlineConfig) -> DocumentOutline {
    analysis::extract_outline_with(doc, config, &LevelChain::default())
}

/// Validate, decode and outline a file using the default decoders.
///
/// # Example
///
/// ```no_run
/// use docoutline::outline_file;
///
/// let outline = outline_file("report.json").unwrap();
/// println!("{}: {} headings", outline.title, outline.len());
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    Outliner::new().outline_file(path)
}

/// Decode and outline in-memory bytes; `ext` picks the decoder.
pub fn outline_bytes(data: &[u8], ext: &str) -> Result<DocumentOutline> {
    Outliner::new().outline_bytes(data, ext)
}

/// Builder bundling configuration, limits, decoders and the level chain.
///
/// # Example
///
/// ```no_run
/// use docoutline::{Outliner, OutlineConfig};
///
/// let outline = Outliner::new()
///     .with_config(OutlineConfig::new().with_heading_size_factor(1.3))
///     .with_max_pages(200)
///     .outline_file("manual.json")?;
/// # Ok::<(), docoutline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Outliner {
    config: OutlineConfig,
    limits: InputLimits,
    registry: DecoderRegistry,
    chain: LevelChain,
}

impl Outliner {
    /// Create a new outliner with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the analysis configuration.
    pub fn with_config(mut self, config: OutlineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the input limits.
    pub fn with_limits(mut self, limits: InputLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the maximum accepted page count.
    pub fn with_max_pages(mut self, pages: usize) -> Self {
        self.limits = self.limits.with_max_pages(pages);
        self
    }

    /// Set the maximum accepted file size in MiB.
    pub fn with_max_file_size_mb(mut self, mb: u64) -> Self {
        self.limits = self.limits.with_max_file_size_mb(mb);
        self
    }

    /// Replace the decoder registry.
    pub fn with_registry(mut self, registry: DecoderRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the level classifier chain.
    pub fn with_chain(mut self, chain: LevelChain) -> Self {
        self.chain = chain;
        self
    }

    /// Get the analysis configuration.
    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Get the input limits.
    pub fn limits(&self) -> &InputLimits {
        &self.limits
    }

    /// Get the decoder registry.
    pub fn registry(&self) -> &DecoderRegistry {
        &self.registry
    }

    /// Outline an already decoded document, enforcing the document limits.
    pub fn outline(&self, doc: &DocumentInput) -> Result<DocumentOutline> {
        self.config.validate()?;
        validate::validate_document(doc, &self.limits)?;
        Ok(analysis::extract_outline_with(doc, &self.config, &self.chain))
    }

    /// Validate a file against the size limit and decode it with the registry.
    pub fn decode_file<P: AsRef<Path>>(&self, path: P) -> Result<DocumentInput> {
        let path = path.as_ref();
        validate::validate_file(path, &self.limits)?;
        let doc = self.registry.decode(path)?;
        log::debug!(
            "Decoded {}: {} pages, {} fragments",
            path.display(),
            doc.page_count(),
            doc.fragments.len()
        );
        Ok(doc)
    }

    /// Decode a file with the registry and outline it.
    pub fn outline_file<P: AsRef<Path>>(&self, path: P) -> Result<DocumentOutline> {
        let doc = self.decode_file(path)?;
        self.outline(&doc)
    }

    /// Decode bytes with the decoder registered for `ext` and outline them.
    pub fn outline_bytes(&self, data: &[u8], ext: &str) -> Result<DocumentOutline> {
        let doc = self.registry.decode_bytes(data, ext)?;
        self.outline(&doc)
    }

    /// Detect the language of a file's first page.
    pub fn detect_file_language<P: AsRef<Path>>(&self, path: P) -> Result<Language> {
        let doc = self.decode_file(path)?;
        Ok(analysis::detect_document_language(&doc))
    }
}
