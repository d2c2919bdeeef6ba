//! Free-text page selections.

use std::collections::BTreeSet;
use std::fmt;

/// A normalized set of 1-based page numbers.
///
/// Entries are unique, ascending, and inside `[1, total_pages]`. Parsing is
/// lenient: tokens that do not describe pages of the document are dropped
/// rather than reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRangeSet {
    pages: Vec<usize>,
}

impl PageRangeSet {
    /// Parse a comma-separated list of pages and inclusive ranges.
    ///
    /// Whitespace is ignored everywhere, so `"10 - 12"` reads as `10-12`.
    /// A token is either `n` or `a-b`; it is kept only if
    /// `1 <= n <= total_pages` or `1 <= a <= b <= total_pages`. Everything
    /// else (non-numeric text, reversed or open ranges, extra dashes, zero,
    /// empty tokens) is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfsplice::plan::PageRangeSet;
    ///
    /// let set = PageRangeSet::parse("2,4,10-12", 12);
    /// assert_eq!(set.pages(), &[2, 4, 10, 11, 12]);
    ///
    /// let set = PageRangeSet::parse("99", 10);
    /// assert!(set.is_empty());
    /// ```
    pub fn parse(text: &str, total_pages: usize) -> Self {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let mut pages = BTreeSet::new();

        for token in compact.split(',') {
            match parse_token(token, total_pages) {
                Some((start, end)) => pages.extend(start..=end),
                None if !token.is_empty() => log::debug!("Dropping page token {token:?}"),
                None => {}
            }
        }

        Self {
            pages: pages.into_iter().collect(),
        }
    }

    /// Build a set from page numbers, dropping those outside
    /// `[1, total_pages]`.
    pub fn from_pages(pages: impl IntoIterator<Item = usize>, total_pages: usize) -> Self {
        let pages: BTreeSet<usize> = pages
            .into_iter()
            .filter(|&page| (1..=total_pages).contains(&page))
            .collect();

        Self {
            pages: pages.into_iter().collect(),
        }
    }

    /// Page numbers, ascending and 1-based.
    pub fn pages(&self) -> &[usize] {
        &self.pages
    }

    /// Zero-based page indices, ascending.
    pub fn indices(&self) -> Vec<usize> {
        self.pages.iter().map(|page| page - 1).collect()
    }

    /// Check if a 1-based page number is selected.
    pub fn contains(&self, page: usize) -> bool {
        self.pages.binary_search(&page).is_ok()
    }

    /// Number of selected pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Renders as compact text: consecutive runs of three or more pages become
/// ranges, so `{2, 4, 10, 11, 12}` renders as `"2,4,10-12"`.
impl fmt::Display for PageRangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut i = 0;

        while i < self.pages.len() {
            let start = self.pages[i];
            let mut j = i;
            while j + 1 < self.pages.len() && self.pages[j + 1] == self.pages[j] + 1 {
                j += 1;
            }
            let end = self.pages[j];

            if !first {
                f.write_str(",")?;
            }
            first = false;

            match end - start {
                0 => write!(f, "{start}")?,
                1 => write!(f, "{start},{end}")?,
                _ => write!(f, "{start}-{end}")?,
            }
            i = j + 1;
        }

        Ok(())
    }
}

fn parse_token(token: &str, total_pages: usize) -> Option<(usize, usize)> {
    let (start, end) = match token.split_once('-') {
        Some((start, end)) => (parse_page(start)?, parse_page(end)?),
        None => {
            let page = parse_page(token)?;
            (page, page)
        }
    };

    (1 <= start && start <= end && end <= total_pages).then_some((start, end))
}

fn parse_page(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
