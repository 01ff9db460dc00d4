//! Directory batch processing.
//!
//! Every supported file in the input directory is outlined independently and
//! written as `<stem>.json` to the output directory. A failing (or panicking)
//! document is recorded in the [`BatchReport`] and never stops the others.
//! When two inputs share a stem, the first in name order keeps the output and
//! the later ones fail with [`Error::OutputConflict`].

use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crate::analysis::{extract_outline_with, InputLimits, LevelChain, OutlineConfig};
use crate::decode::DecoderRegistry;
use crate::error::{Error, Result};
use crate::render::{to_json, JsonFormat};
use crate::validate::{validate_document, validate_file};

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Analysis configuration shared by every document
    pub config: OutlineConfig,

    /// Per-document size and page limits
    pub limits: InputLimits,

    /// Process documents in parallel
    pub parallel: bool,

    /// Pretty-print the written JSON
    pub pretty: bool,
}

impl BatchOptions {
    /// Create new options with defaults.
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

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Write compact JSON instead of pretty-printed.
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    fn json_format(&self) -> JsonFormat {
        if self.pretty {
            JsonFormat::Pretty
        } else {
            JsonFormat::Compact
        }
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            config: OutlineConfig::default(),
            limits: InputLimits::default(),
            parallel: true,
            pretty: true,
        }
    }
}

/// A document that could not be outlined.
#[derive(Debug)]
pub struct BatchFailure {
    pub input: PathBuf,
    pub error: Error,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Written output files, in input order
    pub succeeded: Vec<PathBuf>,

    /// Failed inputs, in input order
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    /// Number of documents attempted.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Number of documents written.
    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    /// True when no document failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Outline every supported file in `input_dir` into `output_dir`.
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    registry: &DecoderRegistry,
    options: &BatchOptions,
) -> Result<BatchReport> {
    process_directory_with(input_dir, output_dir, registry, options, |_, _| {})
}

/// Like [`process_directory`], calling `on_done(input, succeeded)` after each file.
///
/// The callback may run concurrently from several threads.
pub fn process_directory_with<F>(
    input_dir: &Path,
    output_dir: &Path,
    registry: &DecoderRegistry,
    options: &BatchOptions,
    on_done: F,
) -> Result<BatchReport>
where
    F: Fn(&Path, bool) + Sync,
{
    options.config.validate()?;
    let inputs = list_inputs(input_dir, registry)?;

    if output_dir.exists() && same_directory(input_dir, output_dir)? {
        return Err(Error::InvalidConfig(format!(
            "output directory must differ from input directory: {}",
            output_dir.display()
        )));
    }
    fs::create_dir_all(output_dir)?;

    if inputs.is_empty() {
        log::warn!("No supported files found in {}", input_dir.display());
        return Ok(BatchReport::default());
    }
    log::info!("Processing {} files from {}", inputs.len(), input_dir.display());

    let chain = LevelChain::default();
    let run = |(input, target): (PathBuf, Result<PathBuf>)| {
        let result = target
            .and_then(|output| process_isolated(&input, &output, registry, options, &chain));
        on_done(&input, result.is_ok());
        (input, result)
    };

    let jobs = plan_outputs(inputs, output_dir);
    let results: Vec<(PathBuf, Result<PathBuf>)> = if options.parallel {
        jobs.into_par_iter().map(run).collect()
    } else {
        jobs.into_iter().map(run).collect()
    };

    let mut report = BatchReport::default();
    for (input, result) in results {
        match result {
            Ok(output) => report.succeeded.push(output),
            Err(error) => {
                log::warn!("Failed to process {}: {}", input.display(), error);
                report.failed.push(BatchFailure { input, error });
            }
        }
    }

    log::info!(
        "Batch finished: {}/{} succeeded",
        report.success_count(),
        report.total()
    );
    Ok(report)
}

/// Supported files directly inside `dir`, sorted by name.
pub fn list_inputs(dir: &Path, registry: &DecoderRegistry) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(Error::NotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(Error::InvalidConfig(format!(
            "not a directory: {}",
            dir.display()
        )));
    }

    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && registry.supports_path(&path) {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

fn same_directory(a: &Path, b: &Path) -> Result<bool> {
    Ok(a.canonicalize()? == b.canonicalize()?)
}

/// Pair each input with its output file, in input order.
fn plan_outputs(inputs: Vec<PathBuf>, output_dir: &Path) -> Vec<(PathBuf, Result<PathBuf>)> {
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut jobs = Vec::with_capacity(inputs.len());

    for input in inputs {
        let target = match output_path(&input, output_dir) {
            Ok(output) => match claimed.get(&output) {
                Some(first) => Err(Error::OutputConflict {
                    output,
                    claimed_by: first.clone(),
                }),
                None => {
                    claimed.insert(output.clone(), input.clone());
                    Ok(output)
                }
            },
            Err(e) => Err(e),
        };
        jobs.push((input, target));
    }
    jobs
}

fn output_path(input: &Path, output_dir: &Path) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::UnsupportedInput(format!("bad file name: {}", input.display())))?;
    Ok(output_dir.join(format!("{}.json", stem)))
}

fn process_isolated(
    input: &Path,
    output: &Path,
    registry: &DecoderRegistry,
    options: &BatchOptions,
    chain: &LevelChain,
) -> Result<PathBuf> {
    catch_unwind(AssertUnwindSafe(|| {
        process_one(input, output, registry, options, chain)
    }))
    .unwrap_or_else(|_| {
        Err(Error::Analysis(format!(
            "analysis panicked on {}",
            input.display()
        )))
    })
}

fn process_one(
    input: &Path,
    output: &Path,
    registry: &DecoderRegistry,
    options: &BatchOptions,
    chain: &LevelChain,
) -> Result<PathBuf> {
    validate_file(input, &options.limits)?;
    let doc = registry.decode(input)?;
    validate_document(&doc, &options.limits)?;

    let outline = extract_outline_with(&doc, &options.config, chain);
    let json = to_json(&outline, options.json_format())?;

    fs::write(output, json)?;

    log::debug!(
        "{} -> {} ({} entries)",
        input.display(),
        output.display(),
        outline.len()
    );
    Ok(output.to_path_buf())
}
