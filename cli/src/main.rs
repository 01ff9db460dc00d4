//! docoutline CLI - document title and heading outline tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docoutline::analysis::{detect_document_language, DocumentSignals};
use docoutline::batch::{list_inputs, process_directory_with};
use docoutline::render::{self, TocOptions};
use docoutline::{BatchOptions, DecoderRegistry, JsonFormat, OutlineConfig, Outliner};

#[derive(Parser)]
#[command(name = "docoutline")]
#[command(version)]
#[command(about = "Infer document titles and H1-H4 heading outlines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Outline a single document
    Outline {
        /// Input fragment dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Outline every supported file in a directory
    Batch {
        /// Directory of input files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Directory for the JSON outlines
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Process files one at a time
        #[arg(long)]
        sequential: bool,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Print the detected language of a document
    Language {
        /// Input fragment dump
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show the document signals behind an outline
    Info {
        /// Input fragment dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Print the effective configuration as JSON
    Config {
        #[command(flatten)]
        tuning: Tuning,
    },

    /// Show version information
    Version,
}

/// Analysis overrides shared by several subcommands.
#[derive(clap::Args)]
struct Tuning {
    /// JSON configuration file
    #[arg(long, value_name = "FILE", env = "DOCOUTLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Minimum size ratio over body text for a heading size
    #[arg(long, value_name = "X")]
    heading_factor: Option<f32>,

    /// Ignored band at the top and bottom of each page (0.0-0.5)
    #[arg(long, value_name = "X")]
    margin: Option<f64>,
}

impl Tuning {
    fn load(&self) -> Result<OutlineConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => OutlineConfig::from_file(path)?,
            None => OutlineConfig::default(),
        };
        if let Some(factor) = self.heading_factor {
            config = config.with_heading_size_factor(factor);
        }
        if let Some(margin) = self.margin {
            config = config.with_vertical_margin(margin);
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Single-line JSON
    Compact,
    /// Markdown table of contents
    Markdown,
    /// Indented plain text
    Text,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline {
            input,
            output,
            format,
            tuning,
        } => cmd_outline(&input, output.as_deref(), format, &tuning),
        Commands::Batch {
            input,
            output,
            sequential,
            compact,
            tuning,
        } => cmd_batch(&input, &output, sequential, compact, &tuning),
        Commands::Language { input } => cmd_language(&input),
        Commands::Info { input, tuning } => cmd_info(&input, &tuning),
        Commands::Config { tuning } => cmd_config(&tuning),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    tuning: &Tuning,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = Outliner::new()
        .with_config(tuning.load()?)
        .outline_file(input)?;

    let rendered = match format {
        OutputFormat::Json => render::to_json(&outline, JsonFormat::Pretty)?,
        OutputFormat::Compact => render::to_json(&outline, JsonFormat::Compact)?,
        OutputFormat::Markdown => render::to_markdown(&outline, &TocOptions::default()),
        OutputFormat::Text => render::to_text(&outline, &TocOptions::default()),
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    sequential: bool,
    compact: bool,
    tuning: &Tuning,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = DecoderRegistry::with_defaults();
    let mut options = BatchOptions::new().with_config(tuning.load()?);
    if sequential {
        options = options.sequential();
    }
    if compact {
        options = options.compact();
    }

    let total = list_inputs(input, &registry)?.len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = process_directory_with(input, output, &registry, &options, |path, _| {
        if let Some(name) = path.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    println!();
    println!(
        "{} {}/{} documents outlined into {}",
        "Summary:".green().bold(),
        report.success_count(),
        report.total(),
        output.display()
    );
    for failure in &report.failed {
        println!(
            "  {} {}: {}",
            "✗".red(),
            failure.input.display(),
            failure.error
        );
    }

    if !report.is_success() {
        return Err(format!("{} documents failed", report.failed.len()).into());
    }
    Ok(())
}

fn cmd_language(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let language = Outliner::new().detect_file_language(input)?;
    println!("{}", language);
    Ok(())
}

fn cmd_info(input: &Path, tuning: &Tuning) -> Result<(), Box<dyn std::error::Error>> {
    let config = tuning.load()?;
    let doc = Outliner::new().decode_file(input)?;
    let signals = DocumentSignals::compute(&doc.fragments, &config);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Fragments".bold(), doc.fragments.len());
    println!(
        "{}: {}",
        "Encrypted".bold(),
        if doc.encrypted { "Yes" } else { "No" }
    );
    println!("{}: {}", "Language".bold(), detect_document_language(&doc));

    println!();
    println!("{}", "Typography".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}pt", "Body size".bold(), signals.style.body_size);
    for size in signals.style.heading_sizes() {
        if let Some(level) = signals.style.level_for(size) {
            println!("  {} {}pt", level.to_string().bold(), size);
        }
    }
    println!("{}: {}", "Title".bold(), signals.title.text);
    println!(
        "{}: {}",
        "Form-like".bold(),
        if signals.form_like { "Yes" } else { "No" }
    );

    Ok(())
}

fn cmd_config(tuning: &Tuning) -> Result<(), Box<dyn std::error::Error>> {
    let config = tuning.load()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document title and heading outline inference");
    println!();
    println!("License: MIT");
}
