//! RDFa extraction.
//!
//! Mirrors the microdata extractor, keyed on `typeof` for the type and
//! `property` for fields. Only the RDFa Lite subset used for schema.org is
//! read: `vocab` and `prefix` are not interpreted, and `resource` only names
//! a nested item's `@id`.

use super::property::{RDFA, collect_properties};
use super::{Candidate, Extractor, SourceFormat, select_or_log};
use crate::parse::Document;

const SCOPE_SELECTOR: &str = "[typeof]";

/// Extractor for `typeof` / `property` markup.
#[derive(Debug, Clone, Copy)]
pub struct RdfaExtractor {
    /// Also emit typed scopes nested inside another scope.
    pub nested_items: bool,
}

impl Default for RdfaExtractor {
    fn default() -> Self {
        Self { nested_items: true }
    }
}

impl Extractor for RdfaExtractor {
    fn source_format(&self) -> SourceFormat {
        SourceFormat::Rdfa
    }

    fn extract(&self, doc: &Document) -> Vec<Candidate> {
        select_or_log(doc, SCOPE_SELECTOR, SourceFormat::Rdfa)
            .into_iter()
            .filter_map(|scope| {
                let declared = scope.attr(RDFA.type_attr)?.trim();
                if declared.is_empty() {
                    return None;
                }
                if !self.nested_items && scope.has_ancestor_with_attr(RDFA.scope_attr) {
                    return None;
                }
                let properties = collect_properties(doc, &scope, RDFA);
                Some(Candidate::new(declared, properties, SourceFormat::Rdfa))
            })
            .collect()
    }
}
