//! Shared helpers for integration tests.
//!
//! Documents are generated on the fly: every page draws a short label, so
//! a test can read back which page ended up where.

#![allow(dead_code)]

use lopdf::Document;

#[path = "../../../src/test_support.rs"]
mod generated;

pub use generated::{labelled_pdf, page_labels};

/// A document whose pages are labelled `{prefix}1..={prefix}{count}`.
pub fn numbered_pdf(prefix: &str, count: usize) -> Vec<u8> {
    let labels = labels(prefix, count);
    let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
    labelled_pdf(&refs)
}

/// `{prefix}1..={prefix}{count}` as owned strings.
pub fn labels(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("{prefix}{n}")).collect()
}

/// Decompressed content stream of every page, in page order.
pub fn page_contents(bytes: &[u8]) -> Vec<Vec<u8>> {
    let doc = Document::load_mem(bytes).expect("Output is not a readable document");
    doc.get_pages()
        .into_values()
        .map(|page_id| doc.get_page_content(page_id).expect("Page has no content"))
        .collect()
}

/// Concatenate labels for readable assertions.
pub fn joined(labels: &[String]) -> String {
    labels.join(" ")
}
