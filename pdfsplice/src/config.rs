//! Configuration for pdfsplice.
//!
//! [`EditOptions`] tunes how the core builds output documents. [`Config`]
//! wraps those options with the caller-side settings a command-line run
//! needs (inputs, output path, overwrite behaviour, verbosity).

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Result, SpliceError};

/// Compression level for output documents and archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - streams and archive entries are stored as-is.
    None,
    /// Flate-compress uncompressed streams (default).
    #[default]
    Standard,
    /// Like `Standard`, with the strongest archive compression.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = SpliceError;

    /// Parse compression level from "none", "standard", or "maximum".
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(SpliceError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// What to do with an insert position past the last page of the main
/// document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPolicy {
    /// Move the insert to the end of the document (default).
    #[default]
    Clamp,
    /// Fail with [`SpliceError::InvalidRange`].
    Reject,
}

/// Document metadata to set on output documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Document title.
    pub title: Option<String>,
    /// Document author.
    pub author: Option<String>,
    /// Document subject.
    pub subject: Option<String>,
    /// Document keywords (comma-separated).
    pub keywords: Option<String>,
}

impl Metadata {
    /// Check if any metadata fields are set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
    }

    /// Create metadata from optional strings, trimming whitespace.
    ///
    /// Whitespace-only values are treated as unset.
    pub fn new(
        title: Option<String>,
        author: Option<String>,
        subject: Option<String>,
        keywords: Option<String>,
    ) -> Self {
        let to_string_opt = |opt: Option<String>| {
            opt.filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_string())
        };

        Self {
            title: to_string_opt(title),
            author: to_string_opt(author),
            subject: to_string_opt(subject),
            keywords: to_string_opt(keywords),
        }
    }
}

/// Options that shape every output document the core produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOptions {
    /// Compression applied when serializing documents and archives.
    pub compression: CompressionLevel,

    /// Metadata written to the output `/Info` dictionary.
    pub metadata: Metadata,

    /// Handling of out-of-range merge positions.
    pub insert_policy: InsertPolicy,

    /// Carry the first source's `/Info` fields into the output.
    ///
    /// Fields set in `metadata` take precedence.
    pub preserve_info: bool,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            compression: CompressionLevel::default(),
            metadata: Metadata::default(),
            insert_policy: InsertPolicy::default(),
            preserve_info: true,
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Complete configuration for one command-line run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Every document the run reads, in the order given.
    pub inputs: Vec<PathBuf>,

    /// Output file (merge, remove) or directory (split).
    pub output: PathBuf,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Number of files read concurrently (None = auto-detect).
    pub jobs: Option<usize>,

    /// Options forwarded to the core.
    pub options: EditOptions,
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - The output path is also one of the inputs
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(SpliceError::invalid_config("No input files specified"));
        }

        if self.verbose && self.quiet {
            return Err(SpliceError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if self.jobs == Some(0) {
            return Err(SpliceError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        if self.inputs.iter().any(|input| input == &self.output) {
            return Err(SpliceError::invalid_config(format!(
                "Output file cannot be the same as an input file: {}",
                self.output.display()
            )));
        }

        Ok(())
    }

    /// Get the effective number of concurrent reads.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Check if informational output should be displayed.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }
}
