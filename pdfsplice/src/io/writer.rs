//! Writing finished buffers to disk.
//!
//! This module provides safe output writing with:
//! - Atomic writes (write to temp file, then rename)
//! - Directory output for split results
//! - Overwrite checks
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::io::OutputWriter;
//! use std::path::Path;
//!
//! # async fn example(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = OutputWriter::new();
//! let stats = writer.write(Path::new("output.pdf"), bytes).await?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{Result, SpliceError};
use crate::output::OutputSet;
use crate::utils::format_file_size;

/// Options for writing output files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writer for finished documents and archives.
#[derive(Debug, Clone, Default)]
pub struct OutputWriter {
    options: WriteOptions,
}

impl OutputWriter {
    /// Create a writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer without atomic writes.
    pub fn non_atomic() -> Self {
        Self::with_options(WriteOptions {
            atomic: false,
            ..Default::default()
        })
    }

    /// Write a buffer to `path`.
    ///
    /// The file work runs on the blocking pool. With atomic writes the data
    /// goes to `<name>.tmp` next to the target and is renamed into place once
    /// flushed, so readers never observe a partial file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created
    /// - Writing or flushing fails
    /// - The final rename fails
    pub async fn write(&self, path: &Path, bytes: Vec<u8>) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        task::spawn_blocking(move || write_blocking(&path_buf, &bytes, &options))
            .await
            .map_err(|e| SpliceError::Io {
                source: std::io::Error::other(format!("Write task failed: {e}")),
            })?
    }

    /// Write every entry of an output set into `dir`, creating it if needed.
    ///
    /// Entries are written in set order. Returns one statistics record per
    /// file.
    ///
    /// # Errors
    ///
    /// Fails on the first file that cannot be written.
    pub async fn write_all(&self, dir: &Path, outputs: &OutputSet) -> Result<Vec<WriteStatistics>> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| SpliceError::FailedToCreateOutput {
                path: dir.to_path_buf(),
                source: e,
            })?;

        let mut written = Vec::with_capacity(outputs.len());
        for (name, bytes) in outputs.iter() {
            written.push(self.write(&dir.join(name), bytes.to_vec()).await?);
        }
        Ok(written)
    }

    /// Check if a file can be written to the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory is missing or read-only.
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let metadata =
                tokio::fs::metadata(parent)
                    .await
                    .map_err(|e| SpliceError::FileNotAccessible {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;

            if metadata.permissions().readonly() {
                return Err(SpliceError::invalid_config(format!(
                    "Output directory is not writable: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Check if an output path exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

fn write_blocking(path: &Path, bytes: &[u8], options: &WriteOptions) -> Result<WriteStatistics> {
    let start = Instant::now();

    let write_path = if options.atomic {
        temp_path(path)
    } else {
        path.to_path_buf()
    };

    let file =
        std::fs::File::create(&write_path).map_err(|e| SpliceError::FailedToCreateOutput {
            path: write_path.clone(),
            source: e,
        })?;

    let mut writer = std::io::BufWriter::with_capacity(options.buffer_size, file);
    writer
        .write_all(bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| SpliceError::FailedToWrite {
            path: write_path.clone(),
            source: e,
        })?;
    drop(writer);

    if options.atomic {
        std::fs::rename(&write_path, path).map_err(|e| SpliceError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    log::debug!("Wrote {} ({} bytes)", path.display(), bytes.len());

    Ok(WriteStatistics {
        write_time: start.elapsed(),
        file_size: bytes.len() as u64,
        output_path: path.to_path_buf(),
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        let stats = OutputWriter::new()
            .write(&output_path, b"%PDF-1.5".to_vec())
            .await
            .unwrap();

        assert_eq!(std::fs::read(&output_path).unwrap(), b"%PDF-1.5");
        assert_eq!(stats.file_size, 8);
        assert_eq!(stats.output_path, output_path);
        assert!(!temp_dir.path().join("output.pdf.tmp").exists());
    }

    #[tokio::test]
    async fn test_non_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        let result = OutputWriter::non_atomic()
            .write(&output_path, vec![1, 2, 3])
            .await;
        assert!(result.is_ok());
        assert_eq!(std::fs::read(&output_path).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_write_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");
        std::fs::write(&output_path, b"old contents that are longer").unwrap();

        OutputWriter::new()
            .write(&output_path, b"new".to_vec())
            .await
            .unwrap();
        assert_eq!(std::fs::read(&output_path).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_write_into_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("missing").join("output.pdf");

        let result = OutputWriter::new().write(&output_path, vec![0]).await;
        assert!(matches!(
            result,
            Err(SpliceError::FailedToCreateOutput { .. })
        ));
    }

    #[tokio::test]
    async fn test_write_all() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("pages");

        let mut outputs = OutputSet::new();
        outputs.insert("page_1.pdf", b"one".to_vec());
        outputs.insert("page_2.pdf", b"two".to_vec());

        let stats = OutputWriter::new().write_all(&out_dir, &outputs).await.unwrap();

        assert_eq!(stats.len(), 2);
        assert_eq!(std::fs::read(out_dir.join("page_1.pdf")).unwrap(), b"one");
        assert_eq!(std::fs::read(out_dir.join("page_2.pdf")).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_can_write() {
        let temp_dir = TempDir::new().unwrap();
        let writer = OutputWriter::new();

        assert!(writer.can_write(&temp_dir.path().join("output.pdf")).await.is_ok());
        assert!(
            writer
                .can_write(Path::new("/nonexistent/dir/output.pdf"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_exists() {
        let temp_dir = TempDir::new().unwrap();
        let existing_path = temp_dir.path().join("existing.pdf");
        std::fs::File::create(&existing_path).unwrap();

        let writer = OutputWriter::new();
        assert!(writer.exists(&existing_path).await);
        assert!(!writer.exists(&temp_dir.path().join("nonexistent.pdf")).await);
    }

    #[test]
    fn test_temp_path() {
        assert_eq!(
            temp_path(Path::new("/out/merged.pdf")),
            PathBuf::from("/out/merged.pdf.tmp")
        );
    }
}
