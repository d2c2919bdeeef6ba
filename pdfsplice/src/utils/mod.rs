//! Helpers shared by the planners, the assembler, and callers.

use lopdf::{Dictionary, Document, Object, StringFormat};
use std::path::Path;

/// Copy every object reachable from `roots` out of `source` into `target`.
///
/// Objects already present in `target` are skipped, so shared resources are
/// copied once. Page and page-tree nodes are never followed: pages are placed
/// explicitly by the assembler, and following `/Parent` or `/P` links would
/// drag the whole source page tree along.
///
/// Returns the number of objects copied.
pub fn copy_references<'a>(
    target: &mut Document,
    source: &'a Document,
    roots: impl IntoIterator<Item = &'a Object>,
) -> usize {
    let mut copied = 0;
    let mut pending: Vec<&Object> = roots.into_iter().collect();

    while let Some(obj) = pending.pop() {
        match obj {
            Object::Reference(id) => {
                if target.objects.contains_key(id) {
                    continue;
                }
                let Ok(referenced) = source.get_object(*id) else {
                    continue;
                };
                if is_page_node(referenced) {
                    continue;
                }
                target.objects.insert(*id, referenced.clone());
                copied += 1;
                pending.push(referenced);
            }
            Object::Dictionary(dict) => pending.extend(dict.iter().map(|(_, value)| value)),
            Object::Array(items) => pending.extend(items.iter()),
            Object::Stream(stream) => pending.extend(stream.dict.iter().map(|(_, value)| value)),
            _ => {}
        }
    }

    copied
}

/// Check whether an object is a `/Page` or `/Pages` dictionary.
pub fn is_page_node(obj: &Object) -> bool {
    match obj {
        Object::Dictionary(dict) => dict_type_is(dict, b"Page") || dict_type_is(dict, b"Pages"),
        _ => false,
    }
}

fn dict_type_is(dict: &Dictionary, type_name: &[u8]) -> bool {
    dict.get(b"Type")
        .and_then(Object::as_name)
        .map(|name| name == type_name)
        .unwrap_or(false)
}

/// Encode a string as a PDF text string object.
///
/// ASCII is written as a literal string; anything else as UTF-16BE with a
/// byte order mark.
pub fn encode_text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Decode the bytes of a PDF text string.
///
/// UTF-16BE is recognised by its byte order mark; everything else is read
/// one byte per character, which is exact for the ASCII range of
/// PDFDocEncoding.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Derive an output file name from an input path.
///
/// `report.pdf` with suffix `merged` and extension `pdf` becomes
/// `report_merged.pdf`.
pub fn derive_output_name(input: &Path, suffix: &str, extension: &str) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("document");
    format!("{stem}_{suffix}.{extension}")
}

/// Format a byte count as a human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
