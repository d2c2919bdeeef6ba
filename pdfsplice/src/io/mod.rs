//! File input and output for callers that work with paths.

pub mod reader;
pub mod writer;

pub use reader::{InputFile, InputReader, file_label};
pub use writer::{OutputWriter, WriteOptions, WriteStatistics};
