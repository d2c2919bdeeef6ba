//! Page removal.

use pdfsplice::{PageRangeSet, SpliceError, ops};

use crate::common::{joined, numbered_pdf, page_labels};

#[test]
fn test_remove_keeps_remaining_pages_in_order() {
    let pdf = numbered_pdf("P", 6);
    let result = ops::remove_pages(&pdf, &[2, 5]).unwrap();
    assert_eq!(joined(&page_labels(&result)), "P1 P3 P4 P6");
}

#[test]
fn test_remove_ignores_duplicates_and_out_of_range() {
    let pdf = numbered_pdf("P", 3);
    let result = ops::remove_pages(&pdf, &[0, 3, 3, 40]).unwrap();
    assert_eq!(joined(&page_labels(&result)), "P1 P2");
}

#[test]
fn test_remove_every_page_fails() {
    let pdf = numbered_pdf("P", 3);
    let err = ops::remove_pages(&pdf, &[1, 2, 3]).unwrap_err();
    assert!(matches!(err, SpliceError::AllPagesRemoved { total_pages: 3 }));
}

#[test]
fn test_remove_nothing_copies_document() {
    let pdf = numbered_pdf("P", 2);
    let result = ops::remove_pages(&pdf, &[]).unwrap();
    assert_eq!(page_labels(&result), page_labels(&pdf));
}

#[test]
fn test_remove_with_parsed_ranges() {
    let pdf = numbered_pdf("P", 12);
    let total = ops::inspect(&pdf).page_count;
    let selection = PageRangeSet::parse("2, 4, 10 - 12, 99, abc", total);

    let result = ops::remove_pages(&pdf, selection.pages()).unwrap();
    assert_eq!(joined(&page_labels(&result)), "P1 P3 P5 P6 P7 P8 P9");
}
