//! How-to normalization: numbered steps, supplies and tools.

use super::{Derived, field_text, url_of};
use crate::value::{PropertyBag, PropertyValue};

pub fn normalize(bag: &mut PropertyBag) {
    let mut out = Derived::default();

    if let Some(steps) = bag.get("step") {
        let steps: Vec<PropertyValue> = steps
            .items()
            .iter()
            .enumerate()
            .map(|(index, step)| PropertyValue::Object(step_summary(index + 1, step)))
            .collect();
        if !steps.is_empty() {
            out.set("steps", steps);
        }
    }

    out.set_opt("supplies", bag.get("supply").and_then(named_links));
    out.set_opt("tools", bag.get("tool").and_then(named_links));

    out.apply(bag);
}

fn step_summary(number: usize, step: &PropertyValue) -> PropertyBag {
    let mut summary = PropertyBag::new();
    summary.insert("stepNumber", number.to_string());

    match step {
        PropertyValue::Scalar(text) => summary.insert("text", text.as_str()),
        other => {
            if let Some(obj) = other.first_object() {
                for key in ["name", "text", "url"] {
                    if let Some(value) = field_text(obj, key) {
                        summary.insert(key, value);
                    }
                }
                if let Some(image) = obj.get("image").and_then(url_of) {
                    summary.insert("image", image);
                }
            }
        }
    }
    summary
}

/// `{name, url}` for each supply or tool. A bare string is the name.
fn named_links(value: &PropertyValue) -> Option<PropertyValue> {
    let links: Vec<PropertyValue> = value
        .items()
        .iter()
        .filter_map(|item| {
            let mut link = PropertyBag::new();
            match item {
                PropertyValue::Scalar(name) => link.insert("name", name.as_str()),
                PropertyValue::Object(obj) => {
                    if let Some(name) = field_text(obj, "name") {
                        link.insert("name", name);
                    }
                    if let Some(url) = obj.get("url").and_then(url_of) {
                        link.insert("url", url);
                    }
                }
                PropertyValue::Sequence(_) => return None,
            }
            Some(PropertyValue::Object(link))
        })
        .collect();

    if links.is_empty() { None } else { Some(PropertyValue::Sequence(links)) }
}
