//! Public page-editing operations over in-memory buffers.
//!
//! Each operation loads its inputs, builds a page plan, and assembles the
//! result. Nothing is cached between calls and sources are never modified.
//! The free functions use [`EditOptions::default`]; [`Editor`] carries
//! explicit options.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::ops;
//!
//! # fn example(main: &[u8], cover: &[u8]) -> pdfsplice::Result<()> {
//! // Put the cover in front of the main document.
//! let merged = ops::merge_with_inserts(main, &[(cover, 0)])?;
//! assert!(ops::validate(&merged));
//!
//! let parts = ops::split_every_n(&merged, 5)?;
//! let archive = ops::pack_archive(&parts)?;
//! # Ok(())
//! # }
//! ```

use crate::archive::ArchivePacker;
use crate::assemble::Assembler;
use crate::config::EditOptions;
use crate::document::SourceDocument;
use crate::error::Result;
use crate::output::OutputSet;
use crate::plan::{InsertSpec, MergePlanner, RemovalPlanner, SplitMode, SplitPlanner};
use crate::validation::{DocumentInfo, Validator};

/// Label used in errors about the main document of a merge.
pub const MAIN_LABEL: &str = "main document";

/// Runs page-editing operations with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    options: EditOptions,
}

impl Editor {
    /// Create an editor.
    pub fn new(options: EditOptions) -> Self {
        Self { options }
    }

    /// Options applied to every operation.
    pub fn options(&self) -> &EditOptions {
        &self.options
    }

    /// Check that a buffer is a readable document with at least one page.
    pub fn validate(&self, bytes: &[u8]) -> bool {
        Validator::new().validate(bytes)
    }

    /// Page count, title and version of a buffer; zero pages if unreadable.
    pub fn inspect(&self, bytes: &[u8]) -> DocumentInfo {
        Validator::new().inspect(bytes)
    }

    /// Merge insert documents into a main document.
    ///
    /// Each insert is `(bytes, position)`, where position `p` places it
    /// after `p` pages of the main document. Inserts sharing a position
    /// keep their order in the slice.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::UnreadableDocument`](crate::SpliceError::UnreadableDocument)
    /// naming the bad buffer, or [`SpliceError::InvalidRange`](crate::SpliceError::InvalidRange)
    /// for a position past the end under the reject policy.
    pub fn merge_with_inserts(&self, main: &[u8], inserts: &[(&[u8], usize)]) -> Result<Vec<u8>> {
        let main = SourceDocument::from_bytes(MAIN_LABEL, main)?;
        let documents = inserts
            .iter()
            .enumerate()
            .map(|(i, (bytes, _))| SourceDocument::from_bytes(format!("insert #{}", i + 1), bytes))
            .collect::<Result<Vec<_>>>()?;
        let specs: Vec<InsertSpec<'_>> = documents
            .iter()
            .zip(inserts)
            .map(|(document, &(_, position))| InsertSpec::new(document, position))
            .collect();

        self.merge_documents(&main, &specs)
    }

    /// Merge already loaded documents.
    ///
    /// # Errors
    ///
    /// See [`Editor::merge_with_inserts`].
    pub fn merge_documents(&self, main: &SourceDocument, inserts: &[InsertSpec<'_>]) -> Result<Vec<u8>> {
        let plan = MergePlanner::new(self.options.insert_policy).plan(main, inserts)?;
        self.assembler().assemble_bytes(&plan)
    }

    /// Remove 1-based page numbers from a document.
    ///
    /// Numbers outside the document are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::AllPagesRemoved`](crate::SpliceError::AllPagesRemoved)
    /// when no page would remain.
    pub fn remove_pages(&self, bytes: &[u8], pages: &[usize]) -> Result<Vec<u8>> {
        let source = SourceDocument::from_bytes("document", bytes)?;
        self.remove_from(&source, pages)
    }

    /// Remove pages from an already loaded document.
    ///
    /// # Errors
    ///
    /// See [`Editor::remove_pages`].
    pub fn remove_from(&self, source: &SourceDocument, pages: &[usize]) -> Result<Vec<u8>> {
        let plan = RemovalPlanner::new().plan(source, pages)?;
        self.assembler().assemble_bytes(&plan)
    }

    /// One document per page, named `page_1.pdf`, `page_2.pdf`, ...
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is unreadable.
    pub fn split_individual(&self, bytes: &[u8]) -> Result<OutputSet> {
        let source = SourceDocument::from_bytes("document", bytes)?;
        self.split_document(&source, SplitMode::Individual)
    }

    /// One document per `n` consecutive pages, named `pages_{start}-{end}.pdf`.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::InvalidRange`](crate::SpliceError::InvalidRange)
    /// when `n` is 0, or an error if the buffer is unreadable.
    pub fn split_every_n(&self, bytes: &[u8], n: usize) -> Result<OutputSet> {
        let mode = SplitMode::EveryN(n);
        // Reject a bad chunk size before paying for the parse.
        SplitPlanner::new().expected_file_count(0, n)?;
        let source = SourceDocument::from_bytes("document", bytes)?;
        self.split_document(&source, mode)
    }

    /// Split an already loaded document.
    ///
    /// # Errors
    ///
    /// See [`Editor::split_every_n`].
    pub fn split_document(&self, source: &SourceDocument, mode: SplitMode) -> Result<OutputSet> {
        let split = SplitPlanner::new().plan(source.page_count(), mode)?;
        let assembler = self.assembler();

        let mut outputs = OutputSet::new();
        for entry in split.entries() {
            let plan = entry.page_plan(source)?;
            outputs.insert(entry.file_name(), assembler.assemble_bytes(&plan)?);
        }

        log::debug!(
            "Split {} into {} file(s)",
            source.label(),
            outputs.len()
        );
        Ok(outputs)
    }

    /// Pack outputs into one zip archive, in set order.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::EmptyResult`](crate::SpliceError::EmptyResult)
    /// for an empty set.
    pub fn pack_archive(&self, outputs: &OutputSet) -> Result<Vec<u8>> {
        ArchivePacker::new(self.options.compression).pack(outputs)
    }

    fn assembler(&self) -> Assembler {
        Assembler::new(self.options.clone())
    }
}

/// Check that a buffer is a readable document with at least one page.
pub fn validate(bytes: &[u8]) -> bool {
    Editor::default().validate(bytes)
}

/// Page count, title and version of a buffer; zero pages if unreadable.
pub fn inspect(bytes: &[u8]) -> DocumentInfo {
    Editor::default().inspect(bytes)
}

/// Merge with default options. See [`Editor::merge_with_inserts`].
///
/// # Errors
///
/// See [`Editor::merge_with_inserts`].
pub fn merge_with_inserts(main: &[u8], inserts: &[(&[u8], usize)]) -> Result<Vec<u8>> {
    Editor::default().merge_with_inserts(main, inserts)
}

/// Remove pages with default options. See [`Editor::remove_pages`].
///
/// # Errors
///
/// See [`Editor::remove_pages`].
pub fn remove_pages(bytes: &[u8], pages: &[usize]) -> Result<Vec<u8>> {
    Editor::default().remove_pages(bytes, pages)
}

/// Split into single pages with default options.
///
/// # Errors
///
/// See [`Editor::split_individual`].
pub fn split_individual(bytes: &[u8]) -> Result<OutputSet> {
    Editor::default().split_individual(bytes)
}

/// Split into chunks of `n` pages with default options.
///
/// # Errors
///
/// See [`Editor::split_every_n`].
pub fn split_every_n(bytes: &[u8], n: usize) -> Result<OutputSet> {
    Editor::default().split_every_n(bytes, n)
}

/// Pack outputs into a zip archive with default compression.
///
/// # Errors
///
/// See [`Editor::pack_archive`].
pub fn pack_archive(outputs: &OutputSet) -> Result<Vec<u8>> {
    Editor::default().pack_archive(outputs)
}
