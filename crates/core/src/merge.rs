//! Merging candidates into a normalized record.
//!
//! Candidates of the same canonical type fold into one [`PropertyBag`]:
//!
//! - universal identity fields (see [`UNIVERSAL_FIELDS`]) are first-write-wins;
//! - any other field seen again is promoted to a sequence in encounter order;
//! - incoming sequences are concatenated, never nested.

use indexmap::IndexMap;
use serde::Serialize;

use crate::extractors::Candidate;
use crate::resolve::canonical_type_name;
use crate::value::{PropertyBag, PropertyValue};

/// Single-valued identity fields, kept from the first candidate that sets them.
pub const UNIVERSAL_FIELDS: &[&str] =
    &["@context", "@type", "name", "description", "url", "inLanguage", "mainEntityOfPage"];

/// Whether `key` belongs to the universal field set.
pub fn is_universal_field(key: &str) -> bool {
    UNIVERSAL_FIELDS.contains(&key)
}

/// Structured data of one page, keyed by canonical type name.
///
/// Types keep the order in which they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedRecord {
    types: IndexMap<String, PropertyBag>,
}

impl NormalizedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one candidate into the record.
    pub fn merge_candidate(&mut self, candidate: Candidate) {
        let type_name = canonical_type_name(&candidate.declared_type);
        let bag = self.types.entry(type_name).or_default();

        for (key, incoming) in candidate.properties {
            merge_field(bag, key, incoming);
        }
    }

    pub fn get(&self, type_name: &str) -> Option<&PropertyBag> {
        self.types.get(type_name)
    }

    pub fn get_mut(&mut self, type_name: &str) -> Option<&mut PropertyBag> {
        self.types.get_mut(type_name)
    }

    pub fn contains_type(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Canonical type names in first-seen order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyBag)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut PropertyBag)> {
        self.types.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Keeps only the listed types.
    pub fn retain_types(&mut self, type_names: &[String]) {
        self.types.retain(|name, _| type_names.iter().any(|t| t == name));
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Folds `candidate` into `record` and returns the record.
///
/// # Example
///
/// ```rust
/// use schemalens_core::{Candidate, NormalizedRecord, PropertyBag, SourceFormat, merge};
///
/// let mut first = PropertyBag::new();
/// first.insert("name", "Acme");
/// let mut second = PropertyBag::new();
/// second.insert("name", "Acme Corp");
///
/// let record = merge(NormalizedRecord::new(), Candidate::new("Organization", first, SourceFormat::LinkedData));
/// let record = merge(record, Candidate::new("https://schema.org/Organization", second, SourceFormat::Microdata));
///
/// assert_eq!(record.get("Organization").unwrap().get_str("name"), Some("Acme"));
/// ```
pub fn merge(mut record: NormalizedRecord, candidate: Candidate) -> NormalizedRecord {
    record.merge_candidate(candidate);
    record
}

fn merge_field(bag: &mut PropertyBag, key: String, incoming: PropertyValue) {
    let Some(existing) = bag.get_mut(&key) else {
        bag.insert(key, incoming);
        return;
    };

    if is_universal_field(&key) {
        if existing.is_blank() {
            *existing = incoming;
        }
        return;
    }

    if !matches!(existing, PropertyValue::Sequence(_)) {
        let first = std::mem::replace(existing, PropertyValue::Sequence(Vec::new()));
        *existing = PropertyValue::Sequence(vec![first]);
    }

    if let PropertyValue::Sequence(items) = existing {
        match incoming {
            PropertyValue::Sequence(more) => items.extend(more),
            single => items.push(single),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::SourceFormat;

    fn candidate(declared_type: &str, fields: &[(&str, PropertyValue)]) -> Candidate {
        let bag = fields.iter().cloned().collect::<PropertyBag>();
        Candidate::new(declared_type, bag, SourceFormat::LinkedData)
    }

    fn seq(items: &[&str]) -> PropertyValue {
        PropertyValue::Sequence(items.iter().map(|s| PropertyValue::from(*s)).collect())
    }

    #[test]
    fn test_single_occurrence_stays_scalar() {
        let mut record = NormalizedRecord::new();
        record.merge_candidate(candidate("Product", &[("sku", "A1".into())]));

        assert_eq!(record.get("Product").unwrap().get_str("sku"), Some("A1"));
    }

    #[test]
    fn test_repeated_field_is_promoted_in_order() {
        let mut record = NormalizedRecord::new();
        record.merge_candidate(candidate("Organization", &[("sameAs", "a".into())]));
        record.merge_candidate(candidate("Organization", &[("sameAs", "b".into())]));
        record.merge_candidate(candidate("Organization", &[("sameAs", "c".into())]));

        assert_eq!(record.get("Organization").unwrap().get("sameAs"), Some(&seq(&["a", "b", "c"])));
    }

    #[test]
    fn test_sequences_concatenate_without_nesting() {
        let mut record = NormalizedRecord::new();
        record.merge_candidate(candidate("Organization", &[("sameAs", seq(&["a", "b"]))]));
        record.merge_candidate(candidate("Organization", &[("sameAs", seq(&["c", "d"]))]));
        record.merge_candidate(candidate("Organization", &[("sameAs", "e".into())]));

        assert_eq!(
            record.get("Organization").unwrap().get("sameAs"),
            Some(&seq(&["a", "b", "c", "d", "e"]))
        );
    }

    #[test]
    fn test_scalar_then_sequence_appends() {
        let mut record = NormalizedRecord::new();
        record.merge_candidate(candidate("Thing", &[("image", "x".into())]));
        record.merge_candidate(candidate("Thing", &[("image", seq(&["y", "z"]))]));

        assert_eq!(record.get("Thing").unwrap().get("image"), Some(&seq(&["x", "y", "z"])));
    }

    #[test]
    fn test_universal_fields_first_write_wins() {
        let mut record = NormalizedRecord::new();
        record.merge_candidate(candidate("Organization", &[("name", "Acme".into())]));
        record.merge_candidate(candidate(
            "Organization",
            &[("name", "Acme Corp".into()), ("telephone", "+1-555-0100".into())],
        ));

        let org = record.get("Organization").unwrap();
        assert_eq!(org.get_str("name"), Some("Acme"));
        assert_eq!(org.get_str("telephone"), Some("+1-555-0100"));
    }

    #[test]
    fn test_blank_universal_field_can_be_filled() {
        let mut record = NormalizedRecord::new();
        record.merge_candidate(candidate("Thing", &[("description", "".into())]));
        record.merge_candidate(candidate("Thing", &[("description", "Filled".into())]));

        assert_eq!(record.get("Thing").unwrap().get_str("description"), Some("Filled"));
    }

    #[test]
    fn test_declared_types_resolve_to_one_key() {
        let mut record = NormalizedRecord::new();
        record.merge_candidate(candidate("https://schema.org/Product", &[("sku", "1".into())]));
        record.merge_candidate(candidate("Product", &[("sku", "2".into())]));

        assert_eq!(record.len(), 1);
        assert_eq!(record.get("Product").unwrap().get("sku"), Some(&seq(&["1", "2"])));
    }

    #[test]
    fn test_candidate_order_only_permutes_sequences() {
        let a = candidate("Thing", &[("url", "https://a.example".into()), ("keywords", "x".into())]);
        let b = candidate("Thing", &[("alternateName", "B".into()), ("keywords", "y".into())]);

        let forward = merge(merge(NormalizedRecord::new(), a.clone()), b.clone());
        let backward = merge(merge(NormalizedRecord::new(), b), a);

        let mut forward_keys: Vec<&str> = forward.get("Thing").unwrap().keys().collect();
        let mut backward_keys: Vec<&str> = backward.get("Thing").unwrap().keys().collect();
        forward_keys.sort();
        backward_keys.sort();
        assert_eq!(forward_keys, backward_keys);

        assert_eq!(forward.get("Thing").unwrap().get("keywords"), Some(&seq(&["x", "y"])));
        assert_eq!(backward.get("Thing").unwrap().get("keywords"), Some(&seq(&["y", "x"])));
    }

    #[test]
    fn test_retain_types() {
        let mut record = NormalizedRecord::new();
        record.merge_candidate(candidate("Product", &[]));
        record.merge_candidate(candidate("BreadcrumbList", &[]));

        record.retain_types(&["Product".to_string()]);
        assert_eq!(record.type_names().collect::<Vec<_>>(), vec!["Product"]);
    }
}
