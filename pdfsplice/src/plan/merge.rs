//! Merge planning: a main document with documents inserted between its pages.

use crate::config::InsertPolicy;
use crate::document::SourceDocument;
use crate::error::{Result, SpliceError};
use crate::plan::PagePlan;

/// A document to insert and where.
///
/// `position` counts pages of the main document: 0 prepends, `p` places the
/// insert after main page `p`. Inserts sharing a position keep the order in
/// which they were queued.
#[derive(Debug, Clone, Copy)]
pub struct InsertSpec<'a> {
    /// Document whose pages are inserted, all of them, in order.
    pub document: &'a SourceDocument,
    /// Number of main pages that precede the insert.
    pub position: usize,
}

impl<'a> InsertSpec<'a> {
    /// Create an insert spec.
    pub fn new(document: &'a SourceDocument, position: usize) -> Self {
        Self { document, position }
    }
}

/// Planner for merges with positional inserts.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergePlanner {
    policy: InsertPolicy,
}

impl MergePlanner {
    /// Create a planner with the given out-of-range policy.
    pub fn new(policy: InsertPolicy) -> Self {
        Self { policy }
    }

    /// Build the page plan for a merge.
    ///
    /// Inserts are bucketed by position in one pass; then the plan is emitted
    /// as bucket 0, followed by each main page and its bucket. A position past
    /// the last main page is clamped to the end or rejected, depending on the
    /// policy.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::InvalidRange`] for an out-of-range position
    /// under [`InsertPolicy::Reject`].
    pub fn plan<'a>(
        &self,
        main: &'a SourceDocument,
        inserts: &[InsertSpec<'a>],
    ) -> Result<PagePlan<'a>> {
        let main_pages = main.page_count();
        let mut buckets: Vec<Vec<&'a SourceDocument>> = vec![Vec::new(); main_pages + 1];

        for (queue_index, insert) in inserts.iter().enumerate() {
            let position = self.resolve_position(insert.position, main_pages, queue_index)?;
            buckets[position].push(insert.document);
        }

        let mut plan = PagePlan::new();
        let main_id = plan.add_source(main);

        for (position, bucket) in buckets.iter().enumerate() {
            if position > 0 {
                plan.push(main_id, position - 1)?;
            }
            for &document in bucket {
                let id = plan.add_source(document);
                plan.push_all(id)?;
            }
        }

        log::debug!(
            "Merge plan: {} main page(s), {} insert(s), {} page(s) total",
            main_pages,
            inserts.len(),
            plan.len()
        );

        Ok(plan)
    }

    fn resolve_position(
        &self,
        position: usize,
        main_pages: usize,
        queue_index: usize,
    ) -> Result<usize> {
        if position <= main_pages {
            return Ok(position);
        }

        match self.policy {
            InsertPolicy::Clamp => {
                log::warn!(
                    "Insert #{} position {position} is past the last page; appending after page {main_pages}",
                    queue_index + 1
                );
                Ok(main_pages)
            }
            InsertPolicy::Reject => Err(SpliceError::invalid_range(
                format!("position of insert #{}", queue_index + 1),
                format!("{position} is past the last page ({main_pages})"),
            )),
        }
    }
}
