//! Page assembly: turning a [`PagePlan`] into a new document.
//!
//! The assembler stages each source once, then copies exactly the planned
//! pages and the objects they reach (content streams, resources,
//! annotations) into a fresh document with a flat page tree.
//!
//! Object ids are kept collision-free by staging: the first source keeps
//! its own ids, every further source is cloned and renumbered above the
//! highest id seen so far. A page planned more than once gets a new id for
//! each repeat; objects it references are shared.

pub mod metadata;
pub mod pages;

pub use metadata::{MetadataManager, PRODUCER};

use lopdf::{Document, Object, ObjectId, dictionary};
use std::borrow::Cow;
use std::collections::HashSet;

use crate::config::{CompressionLevel, EditOptions};
use crate::document::parse_version;
use crate::error::{Result, SpliceError};
use crate::plan::PagePlan;
use crate::utils::copy_references;

/// A source ready for copying, with ids that cannot collide with other
/// staged sources.
struct StagedSource<'a> {
    document: Cow<'a, Document>,
    page_ids: Vec<ObjectId>,
}

/// Builds output documents from page plans.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    options: EditOptions,
}

impl Assembler {
    /// Create an assembler with the given options.
    pub fn new(options: EditOptions) -> Self {
        Self { options }
    }

    /// Options used for metadata and serialization.
    pub fn options(&self) -> &EditOptions {
        &self.options
    }

    /// Build a document containing exactly the planned pages, in order.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::EmptyResult`] for an empty plan, or
    /// [`SpliceError::AssemblyFailed`] if a planned page cannot be read.
    pub fn assemble(&self, plan: &PagePlan<'_>) -> Result<Document> {
        if plan.is_empty() {
            return Err(SpliceError::EmptyResult);
        }

        let (staged, max_id) = stage_sources(plan);

        let version = plan
            .sources()
            .iter()
            .map(|source| source.version())
            .max_by_key(|version| parse_version(version))
            .unwrap_or("1.5");

        let mut out = Document::with_version(version);
        out.max_id = max_id;
        let pages_id = out.new_object_id();

        let mut placed: HashSet<ObjectId> = HashSet::new();
        let mut kids: Vec<ObjectId> = Vec::with_capacity(plan.len());
        let mut copied = 0;

        for page_ref in plan.pages() {
            let source = &staged[page_ref.source()];
            let page_id = source.page_ids[page_ref.index()];

            let page = source.document.get_dictionary(page_id).map_err(|e| {
                SpliceError::assembly_failed(format!(
                    "page {} of {}: {e}",
                    page_ref.index() + 1,
                    plan.sources()[page_ref.source()].label()
                ))
            })?;

            let mut page = pages::detach_page(&source.document, page);
            copied += copy_references(
                &mut out,
                &source.document,
                page.iter().map(|(_, value)| value),
            );
            page.set("Parent", Object::Reference(pages_id));

            let out_id = if placed.insert(page_id) {
                page_id
            } else {
                out.new_object_id()
            };
            out.objects.insert(out_id, Object::Dictionary(page));
            kids.push(out_id);
        }

        out.objects.insert(
            pages_id,
            Object::Dictionary(pages::page_tree_node(&kids)),
        );
        let catalog_id = out.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        out.trailer.set("Root", Object::Reference(catalog_id));

        let manager = MetadataManager::new();
        let base = plan
            .sources()
            .first()
            .copied()
            .filter(|_| self.options.preserve_info);
        manager.attach(&mut out, manager.build_info(base, &self.options.metadata));

        log::debug!(
            "Assembled {} page(s) from {} source(s), {copied} object(s) copied",
            kids.len(),
            staged.len()
        );

        Ok(out)
    }

    /// Serialize a document to bytes.
    ///
    /// Streams are compressed unless compression is `None`, and objects are
    /// renumbered densely so equal inputs give equal bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::SerializeFailed`] if writing fails.
    pub fn to_bytes(&self, mut doc: Document) -> Result<Vec<u8>> {
        if self.options.compression != CompressionLevel::None {
            doc.compress();
        }
        doc.renumber_objects();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| SpliceError::serialize_failed(e.to_string()))?;
        Ok(bytes)
    }

    /// Assemble and serialize in one step.
    ///
    /// # Errors
    ///
    /// See [`Assembler::assemble`] and [`Assembler::to_bytes`].
    pub fn assemble_bytes(&self, plan: &PagePlan<'_>) -> Result<Vec<u8>> {
        let doc = self.assemble(plan)?;
        self.to_bytes(doc)
    }
}

/// Stage every source of the plan and return the highest id in use.
fn stage_sources<'a>(plan: &PagePlan<'a>) -> (Vec<StagedSource<'a>>, u32) {
    let mut staged = Vec::with_capacity(plan.sources().len());
    let mut max_id = 0;

    for (position, &source) in plan.sources().iter().enumerate() {
        if position == 0 {
            max_id = highest_id(source.document());
            staged.push(StagedSource {
                document: Cow::Borrowed(source.document()),
                page_ids: source.page_ids().to_vec(),
            });
            continue;
        }

        let mut document = source.document().clone();
        document.renumber_objects_with(max_id + 1);
        max_id = highest_id(&document);
        let page_ids = document.get_pages().into_values().collect();

        staged.push(StagedSource {
            document: Cow::Owned(document),
            page_ids,
        });
    }

    (staged, max_id)
}

fn highest_id(doc: &Document) -> u32 {
    let highest_key = doc.objects.keys().map(|(id, _)| *id).max().unwrap_or(0);
    doc.max_id.max(highest_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Metadata;
    use crate::document::SourceDocument;
    use crate::test_support::{labelled_pdf, page_labels};

    fn source(label: &str, pages: usize) -> SourceDocument {
        let labels: Vec<String> = (1..=pages).map(|n| format!("{label}{n}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        SourceDocument::from_bytes(label, &labelled_pdf(&refs)).unwrap()
    }

    #[test]
    fn test_empty_plan_is_rejected() {
        let result = Assembler::default().assemble(&PagePlan::new());
        assert!(matches!(result, Err(SpliceError::EmptyResult)));
    }

    #[test]
    fn test_assemble_copies_planned_pages_in_order() {
        let a = source("A", 3);
        let b = source("B", 2);
        let mut plan = PagePlan::new();
        let a_id = plan.add_source(&a);
        let b_id = plan.add_source(&b);
        plan.push(b_id, 1).unwrap();
        plan.push(a_id, 0).unwrap();
        plan.push(a_id, 2).unwrap();
        plan.push(b_id, 0).unwrap();

        let bytes = Assembler::default().assemble_bytes(&plan).unwrap();
        assert_eq!(page_labels(&bytes), vec!["B2", "A1", "A3", "B1"]);
    }

    #[test]
    fn test_repeated_page_gets_distinct_ids() {
        let a = source("A", 2);
        let mut plan = PagePlan::new();
        let id = plan.add_source(&a);
        plan.push(id, 0).unwrap();
        plan.push(id, 0).unwrap();
        plan.push(id, 1).unwrap();

        let doc = Assembler::default().assemble(&plan).unwrap();
        let pages: HashSet<ObjectId> = doc.get_pages().into_values().collect();
        assert_eq!(pages.len(), 3);

        let bytes = Assembler::default().to_bytes(doc).unwrap();
        assert_eq!(page_labels(&bytes), vec!["A1", "A1", "A2"]);
    }

    #[test]
    fn test_unselected_pages_are_not_copied() {
        let a = source("A", 5);
        let mut plan = PagePlan::new();
        let id = plan.add_source(&a);
        plan.push(id, 2).unwrap();

        let doc = Assembler::default().assemble(&plan).unwrap();
        let page_objects = doc
            .objects
            .values()
            .filter(|obj| {
                obj.as_dict()
                    .and_then(|d| d.get(b"Type"))
                    .and_then(Object::as_name)
                    .map(|name| name == b"Page")
                    .unwrap_or(false)
            })
            .count();
        assert_eq!(page_objects, 1);
    }

    #[test]
    fn test_inherited_resources_are_materialized() {
        let a = source("A", 2);
        let mut plan = PagePlan::new();
        let id = plan.add_source(&a);
        plan.push(id, 1).unwrap();

        let doc = Assembler::default().assemble(&plan).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let page = doc.get_dictionary(page_id).unwrap();

        assert!(page.has(b"MediaBox"));
        let fonts = page
            .get(b"Resources")
            .and_then(Object::as_dict)
            .and_then(|r| r.get(b"Font"))
            .and_then(Object::as_dict)
            .unwrap();
        let font_id = fonts.get(b"F1").and_then(Object::as_reference).unwrap();
        assert!(doc.get_object(font_id).is_ok());
    }

    #[test]
    fn test_output_metadata() {
        let a = source("A", 1);
        let mut plan = PagePlan::new();
        let id = plan.add_source(&a);
        plan.push(id, 0).unwrap();

        let options = EditOptions {
            metadata: Metadata::new(Some("Combined".to_string()), None, None, None),
            ..Default::default()
        };
        let doc = Assembler::new(options).assemble(&plan).unwrap();
        let metadata = MetadataManager::new().get_metadata(&doc);
        assert_eq!(metadata.title.as_deref(), Some("Combined"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let a = source("A", 3);
        let b = source("B", 1);
        let mut plan = PagePlan::new();
        let a_id = plan.add_source(&a);
        let b_id = plan.add_source(&b);
        plan.push_all(a_id).unwrap();
        plan.push_all(b_id).unwrap();

        let assembler = Assembler::default();
        let first = assembler.assemble_bytes(&plan).unwrap();
        let second = assembler.assemble_bytes(&plan).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_uncompressed_output() {
        let a = source("A", 1);
        let mut plan = PagePlan::new();
        let id = plan.add_source(&a);
        plan.push(id, 0).unwrap();

        let options = EditOptions {
            compression: CompressionLevel::None,
            ..Default::default()
        };
        let bytes = Assembler::new(options).assemble_bytes(&plan).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(A1) Tj"));
    }
}
