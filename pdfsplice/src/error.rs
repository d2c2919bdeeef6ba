//! Error types for pdfsplice.
//!
//! Every fallible operation in the crate returns [`SpliceError`]. Variants
//! carry the offending parameter so callers can render a precise message
//! without re-deriving context.
//!
//! # Error Categories
//!
//! - **Document Errors**: a buffer is not a usable PDF
//! - **Plan Errors**: an operation would produce nothing, or a parameter is
//!   outside its constraints
//! - **Output Errors**: serialization or archive packing failed
//! - **I/O Errors**: file access on the caller side (CLI)

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfsplice operations.
pub type Result<T> = std::result::Result<T, SpliceError>;

/// Main error type for pdfsplice operations.
#[derive(Debug, thiserror::Error)]
pub enum SpliceError {
    /// A byte buffer could not be parsed as a usable document.
    #[error("Unreadable document: {label}\n  Reason: {reason}")]
    UnreadableDocument {
        /// Human-readable name of the buffer (file name, "main document", ...).
        label: String,
        /// Why the buffer was rejected.
        reason: String,
    },

    /// The operation would produce a document without pages.
    #[error("Operation would produce an empty document")]
    EmptyResult,

    /// A parameter is outside its allowed range.
    #[error("Invalid {parameter}: {reason}")]
    InvalidRange {
        /// Name of the offending parameter.
        parameter: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Every page of the document was selected for removal.
    #[error(
        "Cannot remove all {total_pages} page(s)\n  \
         Hint: at least one page must remain in the output"
    )]
    AllPagesRemoved {
        /// Page count of the document.
        total_pages: usize,
    },

    /// A page reference points past the end of its document.
    #[error("Page index {index} is out of bounds for {label} ({page_count} page(s))")]
    PageOutOfBounds {
        /// Label of the referenced document.
        label: String,
        /// Zero-based index that was requested.
        index: usize,
        /// Page count of the referenced document.
        page_count: usize,
    },

    /// A page reference names a source that is not part of the plan.
    #[error("Unknown source #{source_index} (plan has {available} source(s))")]
    UnknownSource {
        /// Source position that was requested.
        source_index: usize,
        /// Number of sources in the plan.
        available: usize,
    },

    /// Building the output page tree failed.
    #[error("Page assembly failed: {reason}")]
    AssemblyFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Serializing a document to bytes failed.
    #[error("Failed to serialize document: {reason}")]
    SerializeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Packing outputs into an archive failed.
    #[error("Failed to build archive: {source}")]
    ArchiveFailed {
        /// Underlying zip error.
        #[from]
        source: zip::result::ZipError,
    },

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Input file is not accessible (permission denied, etc.).
    #[error("Cannot access file: {}\n  Reason: {source}", path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },
}

impl From<lopdf::Error> for SpliceError {
    fn from(err: lopdf::Error) -> Self {
        Self::assembly_failed(err.to_string())
    }
}

impl SpliceError {
    /// Create an UnreadableDocument error.
    pub fn unreadable(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnreadableDocument {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidRange error.
    pub fn invalid_range(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create an AssemblyFailed error.
    pub fn assembly_failed(reason: impl Into<String>) -> Self {
        Self::AssemblyFailed {
            reason: reason.into(),
        }
    }

    /// Create a SerializeFailed error.
    pub fn serialize_failed(reason: impl Into<String>) -> Self {
        Self::SerializeFailed {
            reason: reason.into(),
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Check if this error is caused by the caller's input rather than by
    /// the environment.
    ///
    /// Input errors can be fixed by changing arguments or documents; the
    /// rest point at the file system or an internal failure.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnreadableDocument { .. }
                | Self::EmptyResult
                | Self::InvalidRange { .. }
                | Self::AllPagesRemoved { .. }
                | Self::PageOutOfBounds { .. }
                | Self::InvalidConfig { .. }
        )
    }

    /// Get the exit code for this error.
    ///
    /// Returns the appropriate process exit code based on error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } | Self::NotAFile { .. } | Self::FileNotAccessible { .. } => {
                2
            }
            Self::UnreadableDocument { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } | Self::FailedToWrite { .. } | Self::Io { .. } => 5,
            Self::AssemblyFailed { .. }
            | Self::SerializeFailed { .. }
            | Self::ArchiveFailed { .. }
            | Self::UnknownSource { .. } => 6,
            Self::EmptyResult
            | Self::InvalidRange { .. }
            | Self::AllPagesRemoved { .. }
            | Self::PageOutOfBounds { .. }
            | Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
        }
    }
}
