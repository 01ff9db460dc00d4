//! Input validation ahead of decoding and analysis.

use std::path::Path;

use crate::analysis::InputLimits;
use crate::error::{Error, Result};
use crate::model::DocumentInput;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Check that an input file exists, is non-empty and within the size limit.
///
/// # Returns
/// * `Ok(size)` with the file size in bytes
/// * `Err(Error::NotFound)` if the path does not exist
/// * `Err(Error::TooLarge)` if the file exceeds `limits.max_file_size_mb`
/// * `Err(Error::Malformed)` if the file is empty
pub fn validate_file<P: AsRef<Path>>(path: P, limits: &InputLimits) -> Result<u64> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let size = std::fs::metadata(path)?.len();
    if size == 0 {
        return Err(Error::Malformed(format!("{} is empty", path.display())));
    }

    let size_mb = size as f64 / BYTES_PER_MB;
    if size_mb > limits.max_file_size_mb as f64 {
        return Err(Error::TooLarge {
            size_mb,
            limit_mb: limits.max_file_size_mb,
        });
    }

    Ok(size)
}

/// Check a decoded document against the limits.
pub fn validate_document(doc: &DocumentInput, limits: &InputLimits) -> Result<()> {
    if doc.encrypted {
        return Err(Error::Encrypted);
    }
    if doc.page_count() > limits.max_pages {
        return Err(Error::TooManyPages {
            pages: doc.page_count(),
            limit: limits.max_pages,
        });
    }
    Ok(())
}
