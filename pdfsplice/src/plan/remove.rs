//! Removal planning: keep every page that was not selected.

use crate::document::SourceDocument;
use crate::error::{Result, SpliceError};
use crate::plan::{PagePlan, PageRangeSet};

/// Planner for page removal.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemovalPlanner;

impl RemovalPlanner {
    /// Create a new planner.
    pub fn new() -> Self {
        Self
    }

    /// Plan the complement of `pages` (1-based) in original order.
    ///
    /// Numbers outside the document are ignored and duplicates collapse.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::AllPagesRemoved`] if nothing would remain.
    pub fn plan<'a>(&self, source: &'a SourceDocument, pages: &[usize]) -> Result<PagePlan<'a>> {
        let total_pages = source.page_count();
        let removed = PageRangeSet::from_pages(pages.iter().copied(), total_pages);

        let ignored = pages
            .iter()
            .filter(|&&page| page == 0 || page > total_pages)
            .count();
        if ignored > 0 {
            log::warn!(
                "Ignoring {ignored} page number(s) outside 1-{total_pages} in {}",
                source.label()
            );
        }

        if removed.len() == total_pages {
            return Err(SpliceError::AllPagesRemoved { total_pages });
        }

        let mut plan = PagePlan::new();
        let id = plan.add_source(source);
        for index in (0..total_pages).filter(|index| !removed.contains(index + 1)) {
            plan.push(id, index)?;
        }

        log::debug!(
            "Removal plan: dropping {} of {total_pages} page(s) ({removed})",
            removed.len()
        );

        Ok(plan)
    }
}
