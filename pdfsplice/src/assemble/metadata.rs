//! Output document metadata (the `/Info` dictionary).
//!
//! Fields come from two places: the first source's own `/Info` (when
//! preserved) and caller-supplied [`Metadata`], which wins. `/Producer` is
//! always set. No dates are written, so identical inputs give identical bytes.

use lopdf::{Dictionary, Document, Object};

use crate::config::Metadata;
use crate::document::SourceDocument;
use crate::utils::{decode_text_string, encode_text_string};

/// Producer string stamped on every output.
pub const PRODUCER: &str = "pdfsplice";

/// Fields carried over from a source's `/Info` dictionary.
const PRESERVED_FIELDS: [&[u8]; 5] = [b"Title", b"Author", b"Subject", b"Keywords", b"Creator"];

/// Builder for the output `/Info` dictionary.
pub struct MetadataManager;

impl MetadataManager {
    /// Create a new metadata manager.
    pub fn new() -> Self {
        Self
    }

    /// Build the `/Info` dictionary for an output document.
    ///
    /// # Arguments
    ///
    /// * `base` - Source whose `/Info` text fields are carried over, if any
    /// * `metadata` - Caller-supplied fields that override the base
    pub fn build_info(&self, base: Option<&SourceDocument>, metadata: &Metadata) -> Dictionary {
        let mut info = Dictionary::new();

        if let Some(source) = base {
            for key in PRESERVED_FIELDS {
                if let Some(text) = source.info_text(key) {
                    info.set(key.to_vec(), encode_text_string(&text));
                }
            }
        }

        let overrides = [
            ("Title", &metadata.title),
            ("Author", &metadata.author),
            ("Subject", &metadata.subject),
            ("Keywords", &metadata.keywords),
        ];
        for (key, value) in overrides {
            if let Some(text) = value {
                info.set(key, encode_text_string(text));
            }
        }

        info.set("Producer", encode_text_string(PRODUCER));
        info
    }

    /// Attach an `/Info` dictionary to a document's trailer.
    pub fn attach(&self, doc: &mut Document, info: Dictionary) {
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", Object::Reference(info_id));
    }

    /// Read metadata back from a document's `/Info` dictionary.
    pub fn get_metadata(&self, doc: &Document) -> Metadata {
        let info_dict = match doc.trailer.get(b"Info") {
            Ok(Object::Reference(id)) => doc.get_dictionary(*id).ok(),
            Ok(Object::Dictionary(dict)) => Some(dict),
            _ => None,
        };
        let Some(info_dict) = info_dict else {
            return Metadata::default();
        };

        Metadata::new(
            Self::get_string_field(info_dict, b"Title"),
            Self::get_string_field(info_dict, b"Author"),
            Self::get_string_field(info_dict, b"Subject"),
            Self::get_string_field(info_dict, b"Keywords"),
        )
    }

    fn get_string_field(dict: &Dictionary, key: &[u8]) -> Option<String> {
        match dict.get(key).ok()? {
            Object::String(bytes, _) => Some(decode_text_string(bytes)),
            _ => None,
        }
    }
}

impl Default for MetadataManager {
    fn default() -> Self {
        Self::new()
    }
}
