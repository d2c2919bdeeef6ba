//! Packing split results.

use std::io::{Cursor, Read};

use zip::ZipArchive;

use pdfsplice::config::{CompressionLevel, EditOptions};
use pdfsplice::{Deliverable, Editor, OutputSet, SpliceError, ops};

use crate::common::{numbered_pdf, page_labels};

fn unpack(archive: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut zip = ZipArchive::new(Cursor::new(archive)).unwrap();
    (0..zip.len())
        .map(|i| {
            let mut file = zip.by_index(i).unwrap();
            let mut contents = Vec::new();
            file.read_to_end(&mut contents).unwrap();
            (file.name().to_string(), contents)
        })
        .collect()
}

#[test]
fn test_archive_entries_follow_split_order() {
    let pdf = numbered_pdf("P", 11);
    let outputs = ops::split_individual(&pdf).unwrap();
    let archive = ops::pack_archive(&outputs).unwrap();

    let entries = unpack(&archive);
    let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
    let expected: Vec<String> = (1..=11).map(|n| format!("page_{n}.pdf")).collect();
    assert_eq!(names, expected);

    // page_10 sorts before page_2 as text; the archive keeps page order.
    assert_eq!(page_labels(&entries[9].1), vec!["P10"]);
    assert_eq!(entries[1].1, outputs.get("page_2.pdf").unwrap());
}

#[test]
fn test_archive_is_deterministic() {
    let pdf = numbered_pdf("P", 4);
    let first = ops::pack_archive(&ops::split_every_n(&pdf, 2).unwrap()).unwrap();
    let second = ops::pack_archive(&ops::split_every_n(&pdf, 2).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_archive_compression_levels() {
    let pdf = numbered_pdf("P", 3);
    for compression in [
        CompressionLevel::None,
        CompressionLevel::Standard,
        CompressionLevel::Maximum,
    ] {
        let editor = Editor::new(EditOptions {
            compression,
            ..Default::default()
        });
        let outputs = editor.split_individual(&pdf).unwrap();
        let entries = unpack(&editor.pack_archive(&outputs).unwrap());

        assert_eq!(entries.len(), 3);
        for (_, bytes) in &entries {
            assert!(ops::validate(bytes));
        }
    }
}

#[test]
fn test_empty_output_set_cannot_be_packed() {
    assert!(matches!(
        ops::pack_archive(&OutputSet::new()),
        Err(SpliceError::EmptyResult)
    ));
}

#[test]
fn test_single_page_split_is_delivered_as_document() {
    let pdf = numbered_pdf("P", 1);
    let deliverable = ops::split_individual(&pdf)
        .unwrap()
        .into_deliverable("doc_split.zip", CompressionLevel::Standard)
        .unwrap();

    match deliverable {
        Deliverable::Document { name, bytes } => {
            assert_eq!(name, "page_1.pdf");
            assert_eq!(page_labels(&bytes), vec!["P1"]);
        }
        other => panic!("expected a document, got {}", other.name()),
    }
}

#[test]
fn test_multi_page_split_is_delivered_as_archive() {
    let pdf = numbered_pdf("P", 5);
    let deliverable = ops::split_every_n(&pdf, 2)
        .unwrap()
        .into_deliverable("doc_split.zip", CompressionLevel::Standard)
        .unwrap();

    assert!(deliverable.is_archive());
    assert_eq!(deliverable.name(), "doc_split.zip");
    assert_eq!(unpack(deliverable.bytes()).len(), 3);
}
