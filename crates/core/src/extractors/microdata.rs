//! Microdata extraction.
//!
//! Every element carrying `itemscope` and a non-empty `itemtype` yields a
//! [`Candidate`]. Reference: <https://html.spec.whatwg.org/multipage/microdata.html>

use super::property::{MICRODATA, collect_properties};
use super::{Candidate, Extractor, SourceFormat, select_or_log};
use crate::parse::Document;

const SCOPE_SELECTOR: &str = "[itemscope][itemtype]";

/// Extractor for `itemscope` / `itemprop` markup.
#[derive(Debug, Clone, Copy)]
pub struct MicrodataExtractor {
    /// Also emit typed scopes nested inside another scope.
    pub nested_items: bool,
}

impl Default for MicrodataExtractor {
    fn default() -> Self {
        Self { nested_items: true }
    }
}

impl Extractor for MicrodataExtractor {
    fn source_format(&self) -> SourceFormat {
        SourceFormat::Microdata
    }

    fn extract(&self, doc: &Document) -> Vec<Candidate> {
        select_or_log(doc, SCOPE_SELECTOR, SourceFormat::Microdata)
            .into_iter()
            .filter_map(|scope| {
                let declared = scope.attr(MICRODATA.type_attr)?.trim();
                if declared.is_empty() {
                    return None;
                }
                if !self.nested_items && scope.has_ancestor_with_attr(MICRODATA.scope_attr) {
                    return None;
                }
                let properties = collect_properties(doc, &scope, MICRODATA);
                Some(Candidate::new(declared, properties, SourceFormat::Microdata))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::PropertyValue;

    const PRODUCT_HTML: &str = r#"
        <div itemscope itemtype="https://schema.org/Product">
            <span itemprop="name">Test Product</span>
            <meta itemprop="gtin" content="1234567890123">
            <div itemprop="offers" itemscope itemtype="https://schema.org/Offer">
                <span itemprop="price">19.99</span>
                <meta itemprop="priceCurrency" content="EUR">
            </div>
        </div>
    "#;

    #[test]
    fn test_extract_simple_microdata() {
        let doc = Document::parse(PRODUCT_HTML).unwrap();
        let candidates = MicrodataExtractor::default().extract(&doc);

        assert_eq!(candidates[0].declared_type, "https://schema.org/Product");
        assert_eq!(candidates[0].source_format, SourceFormat::Microdata);
        assert_eq!(candidates[0].properties.get_str("name"), Some("Test Product"));
        assert_eq!(candidates[0].properties.get_str("gtin"), Some("1234567890123"));
    }

    #[test]
    fn test_nested_scopes_are_emitted_by_default() {
        let doc = Document::parse(PRODUCT_HTML).unwrap();
        let candidates = MicrodataExtractor::default().extract(&doc);

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].declared_type, "https://schema.org/Offer");
        assert_eq!(candidates[1].properties.get_str("price"), Some("19.99"));
        assert!(!candidates[0].properties.contains_key("price"));
    }

    #[test]
    fn test_top_level_only() {
        let doc = Document::parse(PRODUCT_HTML).unwrap();
        let candidates = MicrodataExtractor { nested_items: false }.extract(&doc);

        assert_eq!(candidates.len(), 1);
        let offers = candidates[0].properties.get("offers").unwrap().as_object().unwrap();
        assert_eq!(offers.get_str("priceCurrency"), Some("EUR"));
    }

    #[test]
    fn test_scope_without_type_is_ignored() {
        let html = r#"
            <div itemscope><span itemprop="name">Anonymous</span></div>
            <div itemscope itemtype=""><span itemprop="name">Blank</span></div>
        "#;
        let doc = Document::parse(html).unwrap();
        assert!(MicrodataExtractor::default().extract(&doc).is_empty());
    }

    #[test]
    fn test_repeated_property_is_promoted_locally() {
        let html = r#"
            <div itemscope itemtype="https://schema.org/Organization">
                <link itemprop="sameAs" href="a">
                <link itemprop="sameAs" href="b">
            </div>
        "#;
        let doc = Document::parse(html).unwrap();
        let candidates = MicrodataExtractor::default().extract(&doc);

        assert_eq!(
            candidates[0].properties.get("sameAs"),
            Some(&PropertyValue::Sequence(vec!["a".into(), "b".into()]))
        );
    }
}
