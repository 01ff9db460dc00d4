//! Decoder boundary: turning input files into positioned fragments.
//!
//! Decoding page-oriented binary formats is left to external collaborators.
//! They plug in by implementing [`FragmentDecoder`]; the crate ships a decoder
//! for JSON fragment dumps.
//!
//! # Example
//!
//! ```no_run
//! use docoutline::decode::{DecoderRegistry, JsonDecoder};
//! use std::sync::Arc;
//! use std::path::Path;
//!
//! fn main() -> docoutline::Result<()> {
//!     let mut registry = DecoderRegistry::new();
//!     registry.register(Arc::new(JsonDecoder::new()));
//!
//!     let doc = registry.decode(Path::new("report.json"))?;
//!     println!("{} fragments", doc.fragments.len());
//!     Ok(())
//! }
//! ```

mod json;

pub use json::{JsonDecoder, RawDocument, RawFragment};

use crate::error::{Error, Result};
use crate::model::DocumentInput;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Trait for fragment decoders.
///
/// Implement this trait to feed a new input format into the pipeline.
pub trait FragmentDecoder: Send + Sync {
    /// Get the supported file extensions for this decoder.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["json"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this decoder.
    fn name(&self) -> &str;

    /// Decode from bytes.
    fn decode_bytes(&self, bytes: &[u8]) -> Result<DocumentInput>;

    /// Decode a file at the given path.
    fn decode_file(&self, path: &Path) -> Result<DocumentInput> {
        let bytes = std::fs::read(path)?;
        self.decode_bytes(&bytes)
    }

    /// Check if this decoder supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for fragment decoders.
///
/// The registry maps file extensions to decoders and dispatches
/// decoding by extension.
#[derive(Clone)]
pub struct DecoderRegistry {
    decoders: HashMap<String, Arc<dyn FragmentDecoder>>,
    by_name: HashMap<String, Arc<dyn FragmentDecoder>>,
}

impl DecoderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with default decoders (JSON fragment dumps).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonDecoder::new()));
        registry
    }

    /// Register a decoder.
    ///
    /// The decoder will be registered for all its supported extensions.
    pub fn register(&mut self, decoder: Arc<dyn FragmentDecoder>) {
        for ext in decoder.supported_extensions() {
            self.decoders.insert(ext.to_lowercase(), decoder.clone());
        }
        self.by_name.insert(decoder.name().to_lowercase(), decoder);
    }

    /// Get a decoder by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn FragmentDecoder>> {
        self.decoders.get(&ext.to_lowercase()).cloned()
    }

    /// Get a decoder by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn FragmentDecoder>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.decoders.contains_key(&ext.to_lowercase())
    }

    /// Check if a path carries a supported extension.
    pub fn supports_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.supports(e))
            .unwrap_or(false)
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.decoders.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Decode a file using the decoder registered for its extension.
    pub fn decode(&self, path: &Path) -> Result<DocumentInput> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedInput(format!("{} has no extension", path.display())))?;

        let decoder = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedInput(format!("no decoder for extension: {}", ext)))?;

        decoder.decode_file(path)
    }

    /// Decode bytes using the specified extension to pick the decoder.
    pub fn decode_bytes(&self, bytes: &[u8], ext: &str) -> Result<DocumentInput> {
        let decoder = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedInput(format!("no decoder for extension: {}", ext)))?;

        decoder.decode_bytes(bytes)
    }
}

impl std::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.by_name.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        f.debug_struct("DecoderRegistry")
            .field("decoders", &names)
            .field("extensions", &self.supported_extensions())
            .finish()
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
