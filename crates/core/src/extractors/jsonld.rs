//! JSON-LD extraction.
//!
//! Reads `<script type="application/ld+json">` blocks. A block may hold one
//! object, an array of objects, or an untyped object wrapping an `@graph`
//! array; every typed object becomes its own [`Candidate`].

use serde_json::{Map, Value};

use super::{Candidate, Extractor, SourceFormat, select_or_log};
use crate::parse::Document;
use crate::value::{PropertyBag, PropertyValue};

const SCRIPT_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// Extractor for linked-data script blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedDataExtractor;

impl Extractor for LinkedDataExtractor {
    fn source_format(&self) -> SourceFormat {
        SourceFormat::LinkedData
    }

    fn extract(&self, doc: &Document) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for (index, script) in select_or_log(doc, SCRIPT_SELECTOR, SourceFormat::LinkedData)
            .iter()
            .enumerate()
        {
            let text = script.text();
            let payload = text.trim();
            if payload.is_empty() {
                continue;
            }

            let value = match serde_json::from_str::<Value>(payload) {
                Ok(value) => value,
                Err(error) => {
                    tracing::warn!(format = "json-ld", block = index, %error, "skipping malformed JSON-LD block");
                    continue;
                }
            };

            let mut fragments = Vec::new();
            collect_fragments(&value, None, &mut fragments);

            for fragment in fragments {
                match candidate_from_fragment(&fragment) {
                    Some(candidate) => candidates.push(candidate),
                    None => tracing::debug!(format = "json-ld", block = index, "skipping untyped JSON-LD fragment"),
                }
            }
        }

        candidates
    }
}

/// Flattens top-level arrays and `@graph` wrappers into individual objects.
///
/// Graph nodes without their own `@context` inherit the wrapper's.
fn collect_fragments(value: &Value, inherited_context: Option<&Value>, out: &mut Vec<Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_fragments(item, inherited_context, out);
            }
        }
        Value::Object(obj) if !obj.contains_key("@type") && obj.contains_key("@graph") => {
            let context = obj.get("@context").or(inherited_context);
            if let Some(graph) = obj.get("@graph") {
                collect_fragments(graph, context, out);
            }
        }
        Value::Object(obj) => {
            let mut node = obj.clone();
            if let Some(context) = inherited_context
                && !node.contains_key("@context")
            {
                let mut with_context = Map::new();
                with_context.insert("@context".to_string(), context.clone());
                with_context.extend(node);
                node = with_context;
            }
            out.push(Value::Object(node));
        }
        _ => {}
    }
}

/// Builds a candidate from one JSON object, or `None` when it has no type.
///
/// A type list contributes only its first entry.
fn candidate_from_fragment(fragment: &Value) -> Option<Candidate> {
    let obj = fragment.as_object()?;
    let declared_type = match obj.get("@type")? {
        Value::String(s) => s.clone(),
        Value::Array(types) => types.first()?.as_str()?.to_string(),
        _ => return None,
    };
    if declared_type.trim().is_empty() {
        return None;
    }

    let properties = match PropertyValue::from_json(fragment) {
        Some(PropertyValue::Object(bag)) => bag,
        _ => PropertyBag::new(),
    };

    Some(Candidate::new(declared_type, properties, SourceFormat::LinkedData))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Vec<Candidate> {
        let doc = Document::parse(html).unwrap();
        LinkedDataExtractor.extract(&doc)
    }

    #[test]
    fn test_single_object() {
        let html = r#"
            <script type="application/ld+json">
            {
                "@context": "https://schema.org",
                "@type": "Product",
                "name": "Widget",
                "offers": {"@type": "Offer", "price": "9.99", "priceCurrency": "USD"}
            }
            </script>
        "#;

        let candidates = extract(html);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].declared_type, "Product");
        assert_eq!(candidates[0].source_format, SourceFormat::LinkedData);
        assert_eq!(candidates[0].properties.get_str("name"), Some("Widget"));

        let offers = candidates[0].properties.get("offers").unwrap().as_object().unwrap();
        assert_eq!(offers.get_str("price"), Some("9.99"));
    }

    #[test]
    fn test_array_yields_one_candidate_per_element() {
        let html = r#"
            <script type="application/ld+json">
            [
                {"@type": "Organization", "name": "Acme"},
                {"@type": "WebSite", "name": "Acme Site"}
            ]
            </script>
        "#;

        let types: Vec<String> = extract(html).into_iter().map(|c| c.declared_type).collect();
        assert_eq!(types, vec!["Organization", "WebSite"]);
    }

    #[test]
    fn test_type_array_uses_first_entry() {
        let html = r#"<script type="application/ld+json">{"@type": ["LocalBusiness", "Restaurant"], "name": "Cafe"}</script>"#;

        let candidates = extract(html);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].declared_type, "LocalBusiness");
    }

    #[test]
    fn test_untyped_fragment_is_skipped() {
        let html = r#"
            <script type="application/ld+json">{"name": "No type here"}</script>
            <script type="application/ld+json">{"@type": "Thing", "name": "Typed"}</script>
        "#;

        let candidates = extract(html);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].declared_type, "Thing");
    }

    #[test]
    fn test_malformed_block_does_not_abort_run() {
        let html = r#"
            <script type="application/ld+json">{"@type": "Broken", "name": </script>
            <script type="application/ld+json">{"@type": "Article", "headline": "Still here"}</script>
        "#;

        let candidates = extract(html);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].declared_type, "Article");
    }

    #[test]
    fn test_graph_nodes_inherit_context() {
        let html = r#"
            <script type="application/ld+json">
            {
                "@context": "https://schema.org",
                "@graph": [
                    {"@type": "Organization", "name": "Acme"},
                    {"@type": "WebPage", "@context": "https://example.org/ctx", "name": "Home"}
                ]
            }
            </script>
        "#;

        let candidates = extract(html);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].properties.get_str("@context"), Some("https://schema.org"));
        assert_eq!(candidates[0].properties.keys().next(), Some("@context"));
        assert_eq!(candidates[1].properties.get_str("@context"), Some("https://example.org/ctx"));
    }

    #[test]
    fn test_empty_and_non_object_blocks() {
        let html = r#"
            <script type="application/ld+json">   </script>
            <script type="application/ld+json">"just a string"</script>
            <script type="application/ld+json">[1, 2, 3]</script>
        "#;

        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_other_script_types_are_ignored() {
        let html = r#"<script type="application/json">{"@type": "Product"}</script>"#;
        assert!(extract(html).is_empty());
    }
}
