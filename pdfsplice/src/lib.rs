//! pdfsplice - Page-level editing of PDF documents.
//!
//! This library rearranges whole pages between documents without touching
//! their content. It supports:
//!
//! - Merging a main document with inserts at chosen positions
//! - Removing pages
//! - Splitting into single pages or fixed-size chunks
//! - Parsing page-range text such as `"2,4,10-12"`
//! - Validating and inspecting documents
//! - Packing several results into one zip archive
//!
//! All operations work on in-memory buffers and are synchronous. The
//! [`io`] module has async helpers for callers that read and write files.
//!
//! # Examples
//!
//! ## Merging
//!
//! ```no_run
//! use pdfsplice::ops;
//!
//! # fn example(main: &[u8], appendix: &[u8]) -> pdfsplice::Result<()> {
//! // Insert the appendix after page 3 of the main document.
//! let merged = ops::merge_with_inserts(main, &[(appendix, 3)])?;
//! println!("{} pages", ops::inspect(&merged).page_count);
//! # Ok(())
//! # }
//! ```
//!
//! ## Removing pages chosen by the user
//!
//! ```no_run
//! use pdfsplice::{ops, PageRangeSet};
//!
//! # fn example(bytes: &[u8]) -> pdfsplice::Result<()> {
//! let total = ops::inspect(bytes).page_count;
//! let selection = PageRangeSet::parse("1, 5-7", total);
//! let trimmed = ops::remove_pages(bytes, selection.pages())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Options
//!
//! ```no_run
//! use pdfsplice::config::{CompressionLevel, EditOptions, InsertPolicy};
//! use pdfsplice::Editor;
//!
//! # fn example(bytes: &[u8]) -> pdfsplice::Result<()> {
//! let editor = Editor::new(EditOptions {
//!     compression: CompressionLevel::Maximum,
//!     insert_policy: InsertPolicy::Reject,
//!     ..Default::default()
//! });
//! let parts = editor.split_every_n(bytes, 10)?;
//! let archive = editor.pack_archive(&parts)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod archive;
pub mod assemble;
pub mod config;
pub mod document;
pub mod error;
pub mod io;
pub mod ops;
pub mod output;
pub mod plan;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::{CompressionLevel, Config, EditOptions, InsertPolicy, Metadata};
pub use document::SourceDocument;
pub use error::{Result, SpliceError};
pub use ops::Editor;
pub use output::{Deliverable, OutputSet};
pub use plan::{PageRangeSet, SplitMode};
pub use validation::DocumentInfo;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
