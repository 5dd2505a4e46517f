//! Property collection shared by the attribute-based encodings.
//!
//! Microdata and RDFa differ only in attribute names, so both extractors
//! walk a scope with an [`AttributeScheme`]. Collection stops descending at
//! a nested scope boundary: properties inside a nested scope belong to that
//! scope, and the nested scope itself becomes an object value when it also
//! carries a property name.

use crate::parse::{Document, Element};
use crate::resolve::canonical_type_name;
use crate::value::{PropertyBag, PropertyValue};

/// Attribute names of an attribute-based encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeScheme {
    /// Marks an element as opening a new item scope.
    pub scope_attr: &'static str,
    /// Holds the item's declared type.
    pub type_attr: &'static str,
    /// Holds one or more space-separated property names.
    pub property_attr: &'static str,
    /// Attributes naming the item's identifier, checked in order.
    pub id_attrs: &'static [&'static str],
}

pub const MICRODATA: AttributeScheme = AttributeScheme {
    scope_attr: "itemscope",
    type_attr: "itemtype",
    property_attr: "itemprop",
    id_attrs: &["itemid"],
};

pub const RDFA: AttributeScheme = AttributeScheme {
    scope_attr: "typeof",
    type_attr: "typeof",
    property_attr: "property",
    id_attrs: &["resource", "href"],
};

/// Nested scopes deeper than this are read as plain values.
pub const MAX_SCOPE_DEPTH: usize = 32;

const LINK_TAGS: &[&str] = &["a", "area", "link"];
const MEDIA_TAGS: &[&str] = &["img", "audio", "video", "source", "embed", "iframe"];

/// Reads the value an element contributes to its property.
///
/// In order: a hyperlink's target, a media element's source, an explicit
/// `content` attribute, a `<time>`'s `datetime`, then the trimmed text.
/// Link and media values are resolved against the document base URL.
pub fn property_value(doc: &Document, element: &Element) -> String {
    if let Some(target) = link_target(doc, element) {
        return target;
    }

    if let Some(content) = element.attr("content") {
        return content.to_string();
    }

    if element.tag_name() == "time"
        && let Some(datetime) = element.attr("datetime")
    {
        return datetime.to_string();
    }

    element.text().trim().to_string()
}

/// The resolved `href` of a link or `src` of a media element.
fn link_target(doc: &Document, element: &Element) -> Option<String> {
    let tag = element.tag_name();
    let raw = if LINK_TAGS.contains(&tag.as_str()) {
        element.attr("href")
    } else if MEDIA_TAGS.contains(&tag.as_str()) {
        element.attr("src")
    } else {
        None
    }?;
    Some(doc.resolve_url(raw.trim()))
}

/// Collects the properties belonging to `scope`, in document order.
///
/// Repeated names are promoted to sequences.
pub fn collect_properties(doc: &Document, scope: &Element, scheme: AttributeScheme) -> PropertyBag {
    collect_scoped(doc, scope, scheme, 0)
}

/// Reads a nested scope as an object value, tagged with its canonical type.
///
/// The item's identifier becomes `@id`, and a link or media element opening
/// the scope contributes its target as `url` unless the scope sets one.
fn nested_item(doc: &Document, element: &Element, scheme: AttributeScheme, depth: usize) -> PropertyValue {
    let mut item = PropertyBag::new();

    if let Some(declared) = element.attr(scheme.type_attr)
        && !declared.trim().is_empty()
    {
        item.insert("@type", canonical_type_name(declared));
    }

    if let Some(id) = scheme
        .id_attrs
        .iter()
        .filter_map(|attr| element.attr(attr))
        .map(str::trim)
        .find(|id| !id.is_empty())
    {
        item.insert("@id", doc.resolve_url(id));
    }

    for (key, value) in collect_scoped(doc, element, scheme, depth) {
        item.insert(key, value);
    }

    if let Some(target) = link_target(doc, element) {
        item.derive("url", target);
    }

    PropertyValue::Object(item)
}

fn collect_scoped<'a>(doc: &Document, scope: &Element<'a>, scheme: AttributeScheme, depth: usize) -> PropertyBag {
    let mut bag = PropertyBag::new();
    let mut stack: Vec<Element<'a>> = scope.children();
    stack.reverse();

    while let Some(element) = stack.pop() {
        let opens_scope = element.has_attr(scheme.scope_attr);

        if let Some(names) = element.attr(scheme.property_attr) {
            let names: Vec<&str> = names.split_whitespace().collect();
            if !names.is_empty() {
                let value = if opens_scope && depth < MAX_SCOPE_DEPTH {
                    nested_item(doc, &element, scheme, depth + 1)
                } else {
                    PropertyValue::Scalar(property_value(doc, &element))
                };
                for name in names {
                    bag.append(name, value.clone());
                }
            }
        }

        if !opens_scope {
            stack.extend(element.children().into_iter().rev());
        }
    }

    bag
}
