//! Zip packing of output sets.
//!
//! Entries are written in set order with a fixed timestamp, so packing the
//! same outputs twice gives the same archive bytes.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::config::CompressionLevel;
use crate::error::{Result, SpliceError};
use crate::output::OutputSet;

/// Packer for multi-file results.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchivePacker {
    compression: CompressionLevel,
}

impl ArchivePacker {
    /// Create a packer with the given compression level.
    pub fn new(compression: CompressionLevel) -> Self {
        Self { compression }
    }

    /// Pack every entry into one zip archive.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::EmptyResult`] for an empty set, or
    /// [`SpliceError::ArchiveFailed`] if the zip writer fails.
    pub fn pack(&self, outputs: &OutputSet) -> Result<Vec<u8>> {
        if outputs.is_empty() {
            return Err(SpliceError::EmptyResult);
        }

        let options = self.file_options();
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for (name, bytes) in outputs.iter() {
            zip.start_file(name, options)?;
            zip.write_all(bytes)
                .map_err(|e| SpliceError::ArchiveFailed { source: e.into() })?;
        }

        let archive = zip.finish()?.into_inner();
        log::debug!(
            "Packed {} file(s) into {} byte archive",
            outputs.len(),
            archive.len()
        );
        Ok(archive)
    }

    fn file_options(&self) -> SimpleFileOptions {
        let options = SimpleFileOptions::default().last_modified_time(DateTime::default());
        match self.compression {
            CompressionLevel::None => options.compression_method(CompressionMethod::Stored),
            CompressionLevel::Standard => options.compression_method(CompressionMethod::Deflated),
            CompressionLevel::Maximum => options
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(9)),
        }
    }
}
