//! Breadcrumb list normalization.

use super::{Derived, field_text, field_text_any, first_text};
use crate::value::{PropertyBag, PropertyValue};

/// Derives `breadcrumbs` as `{name, url, position}` in list order.
pub fn normalize(bag: &mut PropertyBag) {
    let mut out = Derived::default();

    if let Some(elements) = bag.get("itemListElement") {
        let crumbs: Vec<PropertyValue> = elements
            .items()
            .iter()
            .filter_map(PropertyValue::as_object)
            .map(|element| PropertyValue::Object(crumb(element)))
            .collect();
        if !crumbs.is_empty() {
            out.set("breadcrumbs", crumbs);
        }
    }

    out.apply(bag);
}

fn crumb(element: &PropertyBag) -> PropertyBag {
    let item = element.get("item");
    let item_obj = item.and_then(PropertyValue::first_object);

    let name = field_text(element, "name").or_else(|| item_obj.and_then(|obj| field_text(obj, "name")));
    let url = match (item, item_obj) {
        (_, Some(obj)) => field_text_any(obj, &["@id", "url"]),
        (Some(value), None) => first_text(value).map(str::to_string),
        (None, None) => None,
    };

    let mut crumb = PropertyBag::new();
    if let Some(name) = name {
        crumb.insert("name", name);
    }
    if let Some(url) = url {
        crumb.insert("url", url);
    }
    if let Some(position) = field_text(element, "position") {
        crumb.insert("position", position);
    }
    crumb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::test_support::{assert_idempotent, bag};
    use serde_json::json;

    fn trail() -> PropertyBag {
        bag(json!({
            "@type": "BreadcrumbList",
            "itemListElement": [
                {"@type": "ListItem", "position": 1, "name": "Home", "item": "https://example.com/"},
                {"@type": "ListItem", "position": 2, "item": {"@id": "https://example.com/books", "name": "Books"}},
                {"@type": "ListItem", "position": 3, "name": "Rust", "item": {"url": "https://example.com/books/rust"}}
            ]
        }))
    }

    #[test]
    fn test_three_crumbs_keep_order() {
        let mut list = trail();
        normalize(&mut list);

        let crumbs = list.get("breadcrumbs").and_then(PropertyValue::as_sequence).unwrap();
        let names: Vec<&str> = crumbs
            .iter()
            .filter_map(|c| c.as_object().and_then(|c| c.get_str("name")))
            .collect();
        assert_eq!(names, vec!["Home", "Books", "Rust"]);

        let positions: Vec<&str> = crumbs
            .iter()
            .filter_map(|c| c.as_object().and_then(|c| c.get_str("position")))
            .collect();
        assert_eq!(positions, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_crumb_urls() {
        let mut list = trail();
        normalize(&mut list);

        let crumbs = list.get("breadcrumbs").and_then(PropertyValue::as_sequence).unwrap();
        let urls: Vec<&str> = crumbs
            .iter()
            .filter_map(|c| c.as_object().and_then(|c| c.get_str("url")))
            .collect();
        assert_eq!(
            urls,
            vec!["https://example.com/", "https://example.com/books", "https://example.com/books/rust"]
        );
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(normalize, trail());
    }
}
