//! Merging with positional inserts.

use pdfsplice::config::{EditOptions, InsertPolicy};
use pdfsplice::{Editor, SpliceError, ops};

use crate::common::{joined, labelled_pdf, numbered_pdf, page_labels};

#[test]
fn test_merge_without_inserts_is_identity() {
    let main = numbered_pdf("M", 4);
    let merged = ops::merge_with_inserts(&main, &[]).unwrap();

    assert_eq!(page_labels(&merged), page_labels(&main));
    assert_eq!(ops::inspect(&merged).page_count, 4);
}

#[test]
fn test_position_zero_prepends_in_queue_order() {
    let main = numbered_pdf("M", 2);
    let a = labelled_pdf(&["A"]);
    let b = labelled_pdf(&["B"]);

    let merged = ops::merge_with_inserts(&main, &[(&a, 0), (&b, 0)]).unwrap();
    assert_eq!(joined(&page_labels(&merged)), "A B M1 M2");
}

#[test]
fn test_inserts_stack_at_the_same_body_position() {
    let main = numbered_pdf("M", 3);
    let a = numbered_pdf("A", 2);
    let b = labelled_pdf(&["B"]);
    let c = labelled_pdf(&["C"]);

    let merged = ops::merge_with_inserts(&main, &[(&a, 1), (&c, 3), (&b, 1)]).unwrap();
    assert_eq!(joined(&page_labels(&merged)), "M1 A1 A2 B M2 M3 C");
}

#[test]
fn test_out_of_range_position_is_clamped_to_end() {
    let main = numbered_pdf("M", 2);
    let late = labelled_pdf(&["LATE"]);
    let end = labelled_pdf(&["END"]);

    // Both land in the last bucket; queue order decides.
    let merged = ops::merge_with_inserts(&main, &[(&late, 10), (&end, 2)]).unwrap();
    assert_eq!(joined(&page_labels(&merged)), "M1 M2 LATE END");
}

#[test]
fn test_out_of_range_position_is_rejected_when_strict() {
    let editor = Editor::new(EditOptions {
        insert_policy: InsertPolicy::Reject,
        ..Default::default()
    });
    let main = numbered_pdf("M", 2);
    let insert = labelled_pdf(&["X"]);

    let err = editor
        .merge_with_inserts(&main, &[(&insert, 0), (&insert, 3)])
        .unwrap_err();
    match err {
        SpliceError::InvalidRange { parameter, .. } => {
            assert_eq!(parameter, "position of insert #2")
        }
        other => panic!("expected InvalidRange, got {other:?}"),
    }
}

#[test]
fn test_same_document_inserted_twice() {
    let main = numbered_pdf("M", 1);
    let insert = numbered_pdf("I", 2);

    let merged = ops::merge_with_inserts(&main, &[(&insert, 0), (&insert, 1)]).unwrap();
    assert_eq!(joined(&page_labels(&merged)), "I1 I2 M1 I1 I2");
}

#[test]
fn test_unreadable_main_document() {
    let insert = labelled_pdf(&["X"]);
    let err = ops::merge_with_inserts(b"%PDF-1.4 garbage", &[(&insert, 0)]).unwrap_err();

    assert!(matches!(
        err,
        SpliceError::UnreadableDocument { ref label, .. } if label == "main document"
    ));
    assert!(err.is_input_error());
}

#[test]
fn test_merged_output_is_valid_and_deterministic() {
    let main = numbered_pdf("M", 3);
    let insert = numbered_pdf("I", 3);
    let inserts = [(insert.as_slice(), 2)];

    let first = ops::merge_with_inserts(&main, &inserts).unwrap();
    let second = ops::merge_with_inserts(&main, &inserts).unwrap();

    assert!(ops::validate(&first));
    assert_eq!(ops::inspect(&first).page_count, 6);
    assert_eq!(first, second);
}
