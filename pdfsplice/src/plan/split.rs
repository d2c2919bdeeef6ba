//! Split planning: one document into consecutive named parts.

use crate::document::SourceDocument;
use crate::error::{Result, SpliceError};
use crate::plan::PagePlan;

/// How to cut a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// One part per page, named `page_{n}`.
    Individual,
    /// Parts of `n` consecutive pages (the last may be shorter), named
    /// `pages_{start}-{end}`.
    EveryN(usize),
}

/// One part of a split: a named, inclusive run of 1-based pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitEntry {
    name: String,
    first_page: usize,
    last_page: usize,
}

impl SplitEntry {
    /// Part name without extension, e.g. `page_3` or `pages_1-5`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output file name, e.g. `page_3.pdf`.
    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.name)
    }

    /// First page, 1-based.
    pub fn first_page(&self) -> usize {
        self.first_page
    }

    /// Last page, 1-based and inclusive.
    pub fn last_page(&self) -> usize {
        self.last_page
    }

    /// Number of pages in this part.
    pub fn page_count(&self) -> usize {
        self.last_page - self.first_page + 1
    }

    /// Page plan copying this part out of `source`.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::PageOutOfBounds`] if the part does not fit
    /// the document.
    pub fn page_plan<'a>(&self, source: &'a SourceDocument) -> Result<PagePlan<'a>> {
        let mut plan = PagePlan::new();
        let id = plan.add_source(source);
        plan.push_range(id, self.first_page - 1, self.last_page)?;
        Ok(plan)
    }
}

/// Ordered parts that cover every page exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    entries: Vec<SplitEntry>,
    total_pages: usize,
}

impl SplitPlan {
    /// Parts in page order.
    pub fn entries(&self) -> &[SplitEntry] {
        &self.entries
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether there are no parts.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Page count of the document the plan was made for.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }
}

/// Planner for splits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitPlanner;

impl SplitPlanner {
    /// Create a new planner.
    pub fn new() -> Self {
        Self
    }

    /// Cut `total_pages` pages according to `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::InvalidRange`] for `EveryN(0)`, and
    /// [`SpliceError::EmptyResult`] when there are no pages to split.
    pub fn plan(&self, total_pages: usize, mode: SplitMode) -> Result<SplitPlan> {
        let chunk = match mode {
            SplitMode::Individual => 1,
            SplitMode::EveryN(n) => validate_chunk(n)?,
        };

        if total_pages == 0 {
            return Err(SpliceError::EmptyResult);
        }

        let entries: Vec<SplitEntry> = (1..=total_pages)
            .step_by(chunk)
            .map(|first_page| {
                let last_page = (first_page + chunk - 1).min(total_pages);
                let name = match mode {
                    SplitMode::Individual => format!("page_{first_page}"),
                    SplitMode::EveryN(_) => format!("pages_{first_page}-{last_page}"),
                };
                SplitEntry {
                    name,
                    first_page,
                    last_page,
                }
            })
            .collect();

        log::debug!(
            "Split plan: {total_pages} page(s) into {} part(s)",
            entries.len()
        );

        Ok(SplitPlan {
            entries,
            total_pages,
        })
    }

    /// Number of files an `EveryN(n)` split of `total_pages` produces.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::InvalidRange`] for `n == 0`.
    pub fn expected_file_count(&self, total_pages: usize, n: usize) -> Result<usize> {
        Ok(total_pages.div_ceil(validate_chunk(n)?))
    }
}

fn validate_chunk(n: usize) -> Result<usize> {
    if n == 0 {
        return Err(SpliceError::invalid_range(
            "pages per file",
            "must be at least 1, got 0",
        ));
    }
    Ok(n)
}
