//! FAQ page normalization.

use super::{Derived, field_text};
use crate::value::{PropertyBag, PropertyValue};

/// Derives `faqItems` from the page's `mainEntity` questions.
pub fn normalize(bag: &mut PropertyBag) {
    let mut out = Derived::default();

    if let Some(entities) = bag.get("mainEntity") {
        let items: Vec<PropertyValue> = entities
            .items()
            .iter()
            .filter_map(PropertyValue::as_object)
            .map(|question| PropertyValue::Object(faq_item(question)))
            .collect();
        if !items.is_empty() {
            out.set("faqItems", items);
        }
    }

    out.apply(bag);
}

fn faq_item(question: &PropertyBag) -> PropertyBag {
    let answer = question
        .get("acceptedAnswer")
        .and_then(PropertyValue::first_object)
        .and_then(|a| field_text(a, "text"))
        .unwrap_or_default();

    let mut item = PropertyBag::new();
    if let Some(name) = field_text(question, "name") {
        item.insert("question", name);
    }
    item.insert("answer", answer);
    item
}
