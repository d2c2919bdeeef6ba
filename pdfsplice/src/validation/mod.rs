//! Document validation and inspection.
//!
//! [`Validator::inspect_bytes`] is the fallible form: it either describes a
//! readable document or says why the buffer was rejected. [`Validator::validate`]
//! and [`Validator::inspect`] wrap it for callers that only need a yes/no or
//! a page count, and never fail.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::validation::Validator;
//!
//! # fn example(bytes: &[u8]) {
//! let validator = Validator::new();
//! if validator.validate(bytes) {
//!     println!("{} pages", validator.inspect(bytes).page_count);
//! }
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::OverwriteMode;
use crate::document::SourceDocument;
use crate::error::{Result, SpliceError};

/// Summary of a readable document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    /// Number of pages; 0 when the buffer was unreadable.
    pub page_count: usize,

    /// Title from the `/Info` dictionary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Header version, e.g. `"1.7"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl DocumentInfo {
    /// Describe a loaded document.
    pub fn from_source(source: &SourceDocument) -> Self {
        Self {
            page_count: source.page_count(),
            title: source.title(),
            version: Some(source.version().to_string()),
        }
    }

    /// Sentinel returned by [`Validator::inspect`] for unreadable buffers.
    pub fn unreadable() -> Self {
        Self::default()
    }

    /// Check whether this describes a readable document.
    pub fn is_readable(&self) -> bool {
        self.page_count > 0
    }
}

/// Validator for document buffers and output paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Parse a buffer and describe it.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::UnreadableDocument`] if the buffer is empty,
    /// malformed, encrypted, or has no pages.
    pub fn inspect_bytes(&self, bytes: &[u8]) -> Result<DocumentInfo> {
        let source = SourceDocument::from_bytes("document", bytes)?;
        Ok(DocumentInfo::from_source(&source))
    }

    /// Check that a buffer is a readable document with at least one page.
    pub fn validate(&self, bytes: &[u8]) -> bool {
        match self.inspect_bytes(bytes) {
            Ok(_) => true,
            Err(e) => {
                log::debug!("Validation failed: {e}");
                false
            }
        }
    }

    /// Describe a buffer, or return a zero-page sentinel when it is unreadable.
    pub fn inspect(&self, bytes: &[u8]) -> DocumentInfo {
        self.inspect_bytes(bytes).unwrap_or_else(|e| {
            log::debug!("Inspection failed: {e}");
            DocumentInfo::unreadable()
        })
    }

    /// Check an output path against the overwrite mode.
    ///
    /// `Prompt` is left to the caller, which owns the terminal.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::OutputExists`] if the path exists and the mode
    /// is `NoClobber`, or [`SpliceError::InvalidConfig`] if the parent
    /// directory does not exist.
    pub async fn validate_output(&self, output: &Path, mode: OverwriteMode) -> Result<()> {
        if tokio::fs::try_exists(output).await.unwrap_or(false)
            && mode == OverwriteMode::NoClobber
        {
            return Err(SpliceError::output_exists(output.to_path_buf()));
        }

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty())
            && !tokio::fs::try_exists(parent).await.unwrap_or(false)
        {
            return Err(SpliceError::invalid_config(format!(
                "Output directory does not exist: {}",
                parent.display()
            )));
        }

        Ok(())
    }
}
