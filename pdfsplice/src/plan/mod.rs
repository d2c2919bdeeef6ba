//! Page planning.
//!
//! Every operation first decides which pages go where, as a [`PagePlan`]:
//! the source documents involved plus an ordered list of [`PageRef`]s.
//! Planning never touches document content; the assembler turns a plan into
//! an output document afterwards.
//!
//! - [`range`]: free-text page selections
//! - [`merge`]: main document with positional inserts
//! - [`split`]: one document into many
//! - [`remove`]: one document minus some pages

pub mod merge;
pub mod range;
pub mod remove;
pub mod split;

pub use merge::{InsertSpec, MergePlanner};
pub use range::PageRangeSet;
pub use remove::RemovalPlanner;
pub use split::{SplitEntry, SplitMode, SplitPlan, SplitPlanner};

use crate::document::SourceDocument;
use crate::error::{Result, SpliceError};

/// One page of one source, addressed by position.
///
/// `source` is the position of the document inside the owning plan, `index`
/// the zero-based page index inside that document. Only [`PagePlan`] creates
/// these, after checking both against the sources it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRef {
    source: usize,
    index: usize,
}

impl PageRef {
    /// Position of the source document in its plan.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Zero-based page index in the source document.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Ordered pages to copy, with the documents they come from.
#[derive(Debug, Clone, Default)]
pub struct PagePlan<'a> {
    sources: Vec<&'a SourceDocument>,
    pages: Vec<PageRef>,
}

impl<'a> PagePlan<'a> {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source and return its position.
    ///
    /// Registering the same document twice returns the existing position, so
    /// its objects are only staged once.
    pub fn add_source(&mut self, source: &'a SourceDocument) -> usize {
        if let Some(existing) = self
            .sources
            .iter()
            .position(|known| std::ptr::eq(*known, source))
        {
            return existing;
        }
        self.sources.push(source);
        self.sources.len() - 1
    }

    /// Append one page.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::UnknownSource`] if `source` was not registered,
    /// or [`SpliceError::PageOutOfBounds`] if `index` is past its last page.
    pub fn push(&mut self, source: usize, index: usize) -> Result<()> {
        let document = self
            .sources
            .get(source)
            .ok_or(SpliceError::UnknownSource {
                source_index: source,
                available: self.sources.len(),
            })?;

        if index >= document.page_count() {
            return Err(SpliceError::PageOutOfBounds {
                label: document.label().to_string(),
                index,
                page_count: document.page_count(),
            });
        }

        self.pages.push(PageRef { source, index });
        Ok(())
    }

    /// Append every page of a registered source, in order.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::UnknownSource`] if `source` was not registered.
    pub fn push_all(&mut self, source: usize) -> Result<()> {
        let page_count = self
            .sources
            .get(source)
            .map(|document| document.page_count())
            .ok_or(SpliceError::UnknownSource {
                source_index: source,
                available: self.sources.len(),
            })?;

        self.pages
            .extend((0..page_count).map(|index| PageRef { source, index }));
        Ok(())
    }

    /// Append a contiguous run of pages `[start, end)` of a registered source.
    ///
    /// # Errors
    ///
    /// Same as [`PagePlan::push`], for the first offending index.
    pub fn push_range(&mut self, source: usize, start: usize, end: usize) -> Result<()> {
        for index in start..end {
            self.push(source, index)?;
        }
        Ok(())
    }

    /// Registered sources, by position.
    pub fn sources(&self) -> &[&'a SourceDocument] {
        &self.sources
    }

    /// Planned pages, in output order.
    pub fn pages(&self) -> &[PageRef] {
        &self.pages
    }

    /// Number of planned pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check whether no pages are planned.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
