//! Page dictionary preparation and page tree construction.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

/// Attributes a page may inherit from its ancestors in the page tree.
pub const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// US Letter, used when no media box is found anywhere.
const DEFAULT_MEDIA_BOX: [i64; 4] = [0, 0, 612, 792];

/// Limit on `/Parent` hops, guarding against cyclic page trees.
const MAX_TREE_DEPTH: usize = 64;

/// Copy a page dictionary out of its tree.
///
/// Inherited attributes are written onto the copy so the page keeps its
/// look once re-parented, and `/Parent` is removed.
pub fn detach_page(doc: &Document, page: &Dictionary) -> Dictionary {
    let mut detached = page.clone();

    for key in INHERITABLE_ATTRIBUTES {
        if detached.has(key) {
            continue;
        }
        if let Some(value) = inherited_attribute(doc, page, key) {
            detached.set(key.to_vec(), value);
        }
    }

    if !detached.has(b"MediaBox") {
        let media_box: Vec<Object> = DEFAULT_MEDIA_BOX.iter().map(|&v| v.into()).collect();
        detached.set("MediaBox", media_box);
    }

    detached.remove(b"Parent");
    detached
}

/// Look an attribute up through the `/Parent` chain.
fn inherited_attribute(doc: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    for _ in 0..MAX_TREE_DEPTH {
        let node = doc.get_dictionary(parent?).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    None
}

/// Build a flat `/Pages` node over `kids`.
pub fn page_tree_node(kids: &[ObjectId]) -> Dictionary {
    let kids: Vec<Object> = kids.iter().map(|&id| Object::Reference(id)).collect();
    let count = kids.len() as i64;
    dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
    }
}
