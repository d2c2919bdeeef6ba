//! Named output buffers and what to hand back to the user.

use indexmap::IndexMap;

use crate::archive::ArchivePacker;
use crate::config::CompressionLevel;
use crate::error::{Result, SpliceError};

/// File name to bytes, in the order the files were produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSet {
    entries: IndexMap<String, Vec<u8>>,
}

impl OutputSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file. Replacing an existing name keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) -> Option<Vec<u8>> {
        self.entries.insert(name.into(), bytes)
    }

    /// Bytes of a file, by name.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// File names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Files in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries
            .iter()
            .map(|(name, bytes)| (name.as_str(), bytes.as_slice()))
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the set has no files.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total size of all files in bytes.
    pub fn total_size(&self) -> u64 {
        self.entries.values().map(|bytes| bytes.len() as u64).sum()
    }

    /// Decide what the user receives.
    ///
    /// A single file is handed over as-is; several are packed into a zip
    /// archive named `archive_name`.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::EmptyResult`] for an empty set, or an archive
    /// error from packing.
    pub fn into_deliverable(
        mut self,
        archive_name: impl Into<String>,
        compression: CompressionLevel,
    ) -> Result<Deliverable> {
        match self.entries.len() {
            0 => Err(SpliceError::EmptyResult),
            1 => {
                let (name, bytes) = self.entries.pop().ok_or(SpliceError::EmptyResult)?;
                Ok(Deliverable::Document { name, bytes })
            }
            _ => {
                let bytes = ArchivePacker::new(compression).pack(&self)?;
                Ok(Deliverable::Archive {
                    name: archive_name.into(),
                    bytes,
                    entries: self.len(),
                })
            }
        }
    }
}

impl IntoIterator for OutputSet {
    type Item = (String, Vec<u8>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A finished result ready to save or download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deliverable {
    /// One document.
    Document {
        /// File name.
        name: String,
        /// Document bytes.
        bytes: Vec<u8>,
    },
    /// Several documents packed into a zip archive.
    Archive {
        /// Archive file name.
        name: String,
        /// Archive bytes.
        bytes: Vec<u8>,
        /// Number of files inside.
        entries: usize,
    },
}

impl Deliverable {
    /// File name to save under.
    pub fn name(&self) -> &str {
        match self {
            Self::Document { name, .. } | Self::Archive { name, .. } => name,
        }
    }

    /// Bytes to save.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Document { bytes, .. } | Self::Archive { bytes, .. } => bytes,
        }
    }

    /// Check whether this is an archive.
    pub fn is_archive(&self) -> bool {
        matches!(self, Self::Archive { .. })
    }

    /// Split into file name and bytes.
    pub fn into_parts(self) -> (String, Vec<u8>) {
        match self {
            Self::Document { name, bytes } | Self::Archive { name, bytes, .. } => (name, bytes),
        }
    }
}
