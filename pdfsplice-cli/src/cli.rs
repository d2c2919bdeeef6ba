//! CLI argument parsing for pdfsplice.
//!
//! Each subcommand maps to one library operation. Shared flags (overwrite
//! behaviour, verbosity, compression, metadata) are global and may appear
//! before or after the subcommand.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pdfsplice::config::{CompressionLevel, Config, EditOptions, InsertPolicy, Metadata, OverwriteMode};
use pdfsplice::error::{Result, SpliceError};
use pdfsplice::utils::derive_output_name;

/// Merge, split and remove pages of PDF documents.
///
/// pdfsplice moves whole pages between documents without re-rendering
/// them, so text, images and fonts come through untouched.
#[derive(Parser, Debug)]
#[command(name = "pdfsplice")]
#[command(version)]
#[command(about = "Merge, split and remove pages of PDF documents", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Options shared by every operation
    #[command(flatten)]
    pub shared: SharedArgs,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show page count, title and version of PDF files
    Info {
        /// Files to inspect
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Print one JSON object per file instead of text
        #[arg(long)]
        json: bool,
    },

    /// Insert documents into a main document
    ///
    /// Examples:
    ///   pdfsplice merge report.pdf --insert cover.pdf@0 --insert appendix.pdf
    ///   pdfsplice merge report.pdf -i chart.pdf@3 -o report_with_chart.pdf
    Merge {
        /// Main document
        #[arg(value_name = "MAIN")]
        main: PathBuf,

        /// Document to insert, optionally after page POS of the main document
        ///
        /// POS 0 puts the document first. Without @POS it goes after the
        /// last page. Inserts sharing a position keep their command-line
        /// order.
        #[arg(short, long = "insert", value_name = "FILE[@POS]", value_parser = parse_insert)]
        inserts: Vec<InsertArg>,

        /// Output file (default: MAIN_merged.pdf next to MAIN)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Fail on a position past the last page instead of appending
        #[arg(long)]
        strict: bool,
    },

    /// Remove pages from a document
    ///
    /// Example:
    ///   pdfsplice remove scan.pdf --pages "1, 5-7"
    Remove {
        /// Document to edit
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Pages to remove, e.g. "2,4,10-12"
        ///
        /// Page numbers are 1-based. Tokens that are not a page or an
        /// ascending range inside the document are ignored.
        #[arg(short, long, value_name = "RANGE")]
        pages: String,

        /// Output file (default: FILE_removed.pdf next to FILE)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Split a document into single pages or fixed-size parts
    ///
    /// Several parts are packed into FILE_split.zip unless --no-archive
    /// is given; a single part is written as a plain PDF.
    Split {
        /// Document to split
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Pages per part (default: one page per part)
        #[arg(short = 'n', long, value_name = "N")]
        every: Option<usize>,

        /// Output file, or directory with --no-archive
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Write each part as its own file instead of a zip archive
        #[arg(long)]
        no_archive: bool,
    },
}

/// Flags accepted by every subcommand.
#[derive(Args, Debug)]
pub struct SharedArgs {
    /// Overwrite existing output without asking
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Never overwrite existing output
    #[arg(long, global = true, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print details and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Compression for output documents and archives
    ///
    /// - none: store streams and archive entries as-is
    /// - standard: flate compression (default)
    /// - maximum: flate compression with the strongest archive setting
    #[arg(short, long, global = true, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Title of the output document
    #[arg(long, global = true, value_name = "TEXT")]
    pub title: Option<String>,

    /// Author of the output document
    #[arg(long, global = true, value_name = "TEXT")]
    pub author: Option<String>,

    /// Subject of the output document
    #[arg(long, global = true, value_name = "TEXT")]
    pub subject: Option<String>,

    /// Keywords of the output document (comma-separated)
    #[arg(long, global = true, value_name = "TEXT")]
    pub keywords: Option<String>,

    /// Number of files read concurrently (default: number of CPU cores)
    #[arg(short, long, global = true, value_name = "N")]
    pub jobs: Option<usize>,
}

/// A `--insert FILE[@POS]` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertArg {
    /// Document to insert.
    pub path: PathBuf,
    /// Pages of the main document before it; `None` appends.
    pub position: Option<usize>,
}

/// Parse `FILE[@POS]`.
///
/// Only a trailing `@` followed by digits is a position, so file names
/// containing `@` still work.
pub fn parse_insert(value: &str) -> std::result::Result<InsertArg, String> {
    let (path, position) = match value.rsplit_once('@') {
        Some((path, pos)) if !pos.is_empty() && pos.bytes().all(|b| b.is_ascii_digit()) => {
            let position = pos
                .parse::<usize>()
                .map_err(|e| format!("invalid position '{pos}': {e}"))?;
            (path, Some(position))
        }
        _ => (value, None),
    };

    if path.is_empty() {
        return Err("missing file name".to_string());
    }

    Ok(InsertArg {
        path: PathBuf::from(path),
        position,
    })
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// `inputs` lists every file the command reads, main document first.
    /// `output` is the explicit or derived output path; for `info` it is
    /// left empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is unknown or the
    /// resulting configuration is invalid.
    pub fn to_config(&self) -> Result<Config> {
        let shared = &self.shared;
        let compression = CompressionLevel::from_str(&shared.compression)?;

        let overwrite_mode = if shared.force {
            OverwriteMode::Force
        } else if shared.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let insert_policy = match &self.command {
            Command::Merge { strict: true, .. } => InsertPolicy::Reject,
            _ => InsertPolicy::Clamp,
        };

        let options = EditOptions {
            compression,
            metadata: Metadata::new(
                shared.title.clone(),
                shared.author.clone(),
                shared.subject.clone(),
                shared.keywords.clone(),
            ),
            insert_policy,
            ..Default::default()
        };

        let config = Config {
            inputs: self.inputs(),
            output: self.output_path(),
            overwrite_mode,
            quiet: shared.quiet,
            verbose: shared.verbose,
            jobs: shared.jobs,
            options,
        };

        config.validate().map_err(|e| {
            SpliceError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Validate arguments that need no file access.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero job count, a zero `--every`, or an
    /// empty `--pages`.
    pub fn validate(&self) -> Result<()> {
        if self.shared.jobs == Some(0) {
            return Err(SpliceError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        match &self.command {
            Command::Split { every: Some(0), .. } => Err(SpliceError::invalid_range(
                "--every",
                "must be at least 1",
            )),
            Command::Remove { pages, .. } if pages.trim().is_empty() => Err(
                SpliceError::invalid_range("--pages", "no valid pages specified"),
            ),
            _ => Ok(()),
        }
    }

    /// Every input path, in the order the command reads them.
    pub fn inputs(&self) -> Vec<PathBuf> {
        match &self.command {
            Command::Info { files, .. } => files.clone(),
            Command::Merge { main, inserts, .. } => std::iter::once(main.clone())
                .chain(inserts.iter().map(|insert| insert.path.clone()))
                .collect(),
            Command::Remove { file, .. } | Command::Split { file, .. } => vec![file.clone()],
        }
    }

    /// Explicit output path, or the default derived from the input.
    pub fn output_path(&self) -> PathBuf {
        match &self.command {
            Command::Info { .. } => PathBuf::new(),
            Command::Merge { main, output, .. } => output
                .clone()
                .unwrap_or_else(|| sibling(main, &derive_output_name(main, "merged", "pdf"))),
            Command::Remove { file, output, .. } => output
                .clone()
                .unwrap_or_else(|| sibling(file, &derive_output_name(file, "removed", "pdf"))),
            Command::Split {
                file,
                output,
                no_archive,
                ..
            } => output.clone().unwrap_or_else(|| {
                if *no_archive {
                    let dir = derive_output_name(file, "split", "pdf");
                    sibling(file, dir.trim_end_matches(".pdf"))
                } else {
                    sibling(file, &derive_output_name(file, "split", "zip"))
                }
            }),
        }
    }
}

/// `name` in the same directory as `path`.
fn sibling(path: &Path, name: &str) -> PathBuf {
    path.with_file_name(name)
}
