//! Asynchronous file reading.
//!
//! The core works on byte buffers; callers that start from paths use
//! [`InputReader`] to check and read them off the runtime thread.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::io::InputReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = InputReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! for input in reader.read_all(&paths, 4).await {
//!     let input = input?;
//!     println!("{}: {} bytes", input.path.display(), input.bytes.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{Result, SpliceError};

/// Contents of one input file.
#[derive(Debug, Clone)]
pub struct InputFile {
    /// Path the bytes were read from.
    pub path: PathBuf,

    /// Raw file contents.
    pub bytes: Vec<u8>,

    /// Time spent reading.
    pub read_time: Duration,
}

impl InputFile {
    /// File name for labels and error messages.
    pub fn label(&self) -> String {
        file_label(&self.path)
    }
}

/// Reader that checks and loads input files.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputReader;

impl InputReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Read a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist
    /// - The path is not a regular file
    /// - The file cannot be opened or read
    pub async fn read(&self, path: &Path) -> Result<InputFile> {
        let start = Instant::now();

        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpliceError::file_not_found(path.to_path_buf())
            } else {
                SpliceError::FileNotAccessible {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        if !metadata.is_file() {
            return Err(SpliceError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| SpliceError::FileNotAccessible {
                path: path.to_path_buf(),
                source: e,
            })?;

        log::debug!("Read {} ({} bytes)", path.display(), bytes.len());

        Ok(InputFile {
            path: path.to_path_buf(),
            bytes,
            read_time: start.elapsed(),
        })
    }

    /// Read several files concurrently.
    ///
    /// At most `workers` reads are in flight at once. Results come back in
    /// the order of `paths`, whatever order the reads finish in.
    pub async fn read_all(&self, paths: &[PathBuf], workers: usize) -> Vec<Result<InputFile>> {
        use futures::stream::{self, StreamExt};

        let reader = *self;
        stream::iter(paths.iter().cloned())
            .map(|path| async move { reader.read(&path).await })
            .buffered(workers.max(1))
            .collect()
            .await
    }
}

/// File name of a path, falling back to the full display form.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
