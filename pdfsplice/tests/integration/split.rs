//! Splitting and re-merging.

use rstest::rstest;

use pdfsplice::{SpliceError, ops};

use crate::common::{labels, numbered_pdf, page_contents, page_labels};

#[test]
fn test_split_individual_names_and_contents() {
    let pdf = numbered_pdf("P", 3);
    let outputs = ops::split_individual(&pdf).unwrap();

    let names: Vec<&str> = outputs.names().collect();
    assert_eq!(names, vec!["page_1.pdf", "page_2.pdf", "page_3.pdf"]);

    for (n, (_, bytes)) in outputs.iter().enumerate() {
        assert!(ops::validate(bytes));
        assert_eq!(page_labels(bytes), vec![format!("P{}", n + 1)]);
    }
}

#[rstest]
#[case(10, 3, 4)]
#[case(10, 5, 2)]
#[case(10, 10, 1)]
#[case(3, 7, 1)]
#[case(1, 1, 1)]
fn test_split_every_n_file_count(#[case] pages: usize, #[case] n: usize, #[case] files: usize) {
    let pdf = numbered_pdf("P", pages);
    let outputs = ops::split_every_n(&pdf, n).unwrap();
    assert_eq!(outputs.len(), files);
}

#[test]
fn test_split_every_n_chunk_names() {
    let pdf = numbered_pdf("P", 7);
    let outputs = ops::split_every_n(&pdf, 3).unwrap();

    let names: Vec<&str> = outputs.names().collect();
    assert_eq!(names, vec!["pages_1-3.pdf", "pages_4-6.pdf", "pages_7-7.pdf"]);
    assert_eq!(page_labels(outputs.get("pages_4-6.pdf").unwrap()), labels("P", 6)[3..]);
}

#[test]
fn test_split_every_zero_is_rejected() {
    let pdf = numbered_pdf("P", 3);
    assert!(matches!(
        ops::split_every_n(&pdf, 0),
        Err(SpliceError::InvalidRange { .. })
    ));
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
fn test_split_then_merge_restores_page_sequence(#[case] n: usize) {
    let pdf = numbered_pdf("P", 9);
    let normalized = ops::merge_with_inserts(&pdf, &[]).unwrap();
    assert_eq!(page_contents(&normalized), page_contents(&pdf));

    let outputs = ops::split_every_n(&normalized, n).unwrap();
    let parts: Vec<&[u8]> = outputs.iter().map(|(_, bytes)| bytes).collect();

    let (first, rest) = parts.split_first().unwrap();
    let end = ops::inspect(first).page_count;
    let inserts: Vec<(&[u8], usize)> = rest.iter().map(|&part| (part, end)).collect();

    // Every part goes after the first one; inserts sharing a position
    // keep their queue order.
    let merged = ops::merge_with_inserts(first, &inserts).unwrap();
    assert_eq!(page_labels(&merged), labels("P", 9));
    assert_eq!(page_contents(&merged), page_contents(&normalized));
}
