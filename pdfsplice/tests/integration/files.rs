//! Reading inputs from disk and writing results back.

use tempfile::TempDir;

use pdfsplice::config::OverwriteMode;
use pdfsplice::io::{InputReader, OutputWriter};
use pdfsplice::validation::Validator;
use pdfsplice::{SpliceError, ops};

use crate::common::{joined, numbered_pdf, page_labels};

#[tokio::test]
async fn test_merge_files_on_disk() {
    let dir = TempDir::new().unwrap();
    let main_path = dir.path().join("report.pdf");
    let cover_path = dir.path().join("cover.pdf");
    tokio::fs::write(&main_path, numbered_pdf("M", 2)).await.unwrap();
    tokio::fs::write(&cover_path, numbered_pdf("C", 1)).await.unwrap();

    let files = InputReader::new()
        .read_all(&[main_path, cover_path], 2)
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(files[0].label(), "report.pdf");
    assert_eq!(files[1].label(), "cover.pdf");

    let merged = ops::merge_with_inserts(&files[0].bytes, &[(&files[1].bytes, 0)]).unwrap();

    let output = dir.path().join("report_merged.pdf");
    Validator::new()
        .validate_output(&output, OverwriteMode::NoClobber)
        .await
        .unwrap();
    let stats = OutputWriter::new().write(&output, merged).await.unwrap();
    assert!(stats.file_size > 0);

    let written = tokio::fs::read(&output).await.unwrap();
    assert_eq!(joined(&page_labels(&written)), "C1 M1 M2");

    assert!(matches!(
        Validator::new()
            .validate_output(&output, OverwriteMode::NoClobber)
            .await,
        Err(SpliceError::OutputExists { .. })
    ));
}

#[tokio::test]
async fn test_split_into_directory() {
    let dir = TempDir::new().unwrap();
    let outputs = ops::split_individual(&numbered_pdf("P", 3)).unwrap();

    let target = dir.path().join("parts");
    let stats = OutputWriter::new().write_all(&target, &outputs).await.unwrap();
    assert_eq!(stats.len(), 3);

    let third = tokio::fs::read(target.join("page_3.pdf")).await.unwrap();
    assert_eq!(page_labels(&third), vec!["P3"]);
}

#[tokio::test]
async fn test_missing_input_is_reported_in_place() {
    let dir = TempDir::new().unwrap();
    let present = dir.path().join("a.pdf");
    tokio::fs::write(&present, numbered_pdf("A", 1)).await.unwrap();

    let results = InputReader::new()
        .read_all(&[dir.path().join("missing.pdf"), present], 4)
        .await;

    assert!(matches!(results[0], Err(SpliceError::FileNotFound { .. })));
    assert!(results[1].is_ok());
}
