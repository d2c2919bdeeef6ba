//! Read-only handle over a loaded source document.

use lopdf::{Document, Object, ObjectId};

use crate::error::{Result, SpliceError};
use crate::utils::decode_text_string;

/// An immutable, parsed source document.
///
/// Construction checks that the buffer is a readable, unencrypted document
/// with at least one page. Page ids are resolved once, in page order, so
/// planners and the assembler can address pages by zero-based index.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    label: String,
    document: Document,
    page_ids: Vec<ObjectId>,
}

impl SourceDocument {
    /// Parse a byte buffer.
    ///
    /// `label` names the buffer in error messages ("main document",
    /// "insert #2", a file name...).
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::UnreadableDocument`] if the buffer is empty,
    /// does not parse, is encrypted, or has no pages.
    pub fn from_bytes(label: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let label = label.into();

        if bytes.is_empty() {
            return Err(SpliceError::unreadable(label, "buffer is empty"));
        }

        let document = Document::load_mem(bytes).map_err(|e| {
            let message = e.to_string();
            if message.contains("encrypt") || message.contains("password") {
                SpliceError::unreadable(label.clone(), "document is encrypted")
            } else {
                SpliceError::unreadable(label.clone(), message)
            }
        })?;

        Self::from_document(label, document)
    }

    /// Wrap an already parsed document.
    ///
    /// # Errors
    ///
    /// Same checks as [`SourceDocument::from_bytes`], minus parsing.
    pub fn from_document(label: impl Into<String>, document: Document) -> Result<Self> {
        let label = label.into();

        if document.trailer.has(b"Encrypt") {
            return Err(SpliceError::unreadable(label, "document is encrypted"));
        }

        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
        if page_ids.is_empty() {
            return Err(SpliceError::unreadable(label, "document has no pages"));
        }

        log::debug!("Loaded {label}: {} page(s)", page_ids.len());

        Ok(Self {
            label,
            document,
            page_ids,
        })
    }

    /// Human-readable name of this document.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of pages, always at least one.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Object id of the page at a zero-based index.
    pub fn page_id(&self, index: usize) -> Option<ObjectId> {
        self.page_ids.get(index).copied()
    }

    /// Page object ids in page order.
    pub fn page_ids(&self) -> &[ObjectId] {
        &self.page_ids
    }

    /// The parsed document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Header version, e.g. `"1.7"`.
    pub fn version(&self) -> &str {
        &self.document.version
    }

    /// The `/Info` dictionary, if the trailer carries one.
    pub fn info_dictionary(&self) -> Option<&lopdf::Dictionary> {
        match self.document.trailer.get(b"Info").ok()? {
            Object::Reference(id) => self.document.get_dictionary(*id).ok(),
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// A text field of the `/Info` dictionary, decoded.
    pub fn info_text(&self, key: &[u8]) -> Option<String> {
        let value = self.info_dictionary()?.get(key).ok()?;
        let value = match value {
            Object::Reference(id) => self.document.get_object(*id).ok()?,
            other => other,
        };

        match value {
            Object::String(bytes, _) => {
                let text = decode_text_string(bytes);
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            _ => None,
        }
    }

    /// Document title from `/Info`, if present and non-empty.
    pub fn title(&self) -> Option<String> {
        self.info_text(b"Title")
    }
}

/// Parse a header version string into `(major, minor)`.
pub(crate) fn parse_version(version: &str) -> (u8, u8) {
    version
        .split_once('.')
        .map(|(major, minor)| {
            (
                major.trim().parse().unwrap_or_default(),
                minor.trim().parse().unwrap_or_default(),
            )
        })
        .unwrap_or_default()
}
