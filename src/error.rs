//! Error types for docoutline library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while decoding, validating or rendering a document.
///
/// The structure-inference pipeline itself never fails; every variant here is
/// raised at the decoder, validation, rendering or batch boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input file does not exist.
    #[error("Input not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input file exceeds the configured size limit.
    #[error("Input too large: {size_mb:.1}MB (limit {limit_mb}MB)")]
    TooLarge {
        /// Observed size in MiB
        size_mb: f64,
        /// Configured limit in MiB
        limit_mb: u64,
    },

    /// The document is encrypted.
    #[error("Encrypted documents are not supported")]
    Encrypted,

    /// The document has more pages than allowed.
    #[error("Too many pages: {pages} (limit {limit})")]
    TooManyPages {
        /// Page count of the document
        pages: usize,
        /// Configured page limit
        limit: usize,
    },

    /// The input could not be decoded into fragments.
    #[error("Malformed input: {0}")]
    Malformed(String),

    /// No decoder is registered for the input.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// Configuration value is out of range or unreadable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error during rendering (JSON, Markdown, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Two batch inputs map to the same output file.
    #[error("Output {} already written for {}", .output.display(), .claimed_by.display())]
    OutputConflict {
        /// Contested output path
        output: PathBuf,
        /// Input that claimed the output first
        claimed_by: PathBuf,
    },

    /// Structure inference aborted for one document.
    #[error("Analysis failed: {0}")]
    Analysis(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::Malformed(err.to_string())
        }
    }
}
