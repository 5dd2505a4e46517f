//! Type-specific normalizers.
//!
//! A [`NormalizerRegistry`] maps canonical type names to functions that
//! enrich a merged [`PropertyBag`] with flat, presentation-ready fields
//! (`authorName`, `fullAddress`, `price`, ...). Types without an entry go
//! to the generic fallback.
//!
//! Normalizers only add fields. A derived field is written when its key is
//! still absent, so a merged field of the same name is never replaced and
//! running a normalizer twice leaves the bag unchanged.
//!
//! Every derived value is text, like the rest of a record. Counts such as
//! `wordCount` serialize as `"17"` and flags such as `isValidUrl` as
//! `"true"`/`"false"`, never as JSON numbers or booleans. Consumers that
//! need typed values parse them (`value == "true"`, `str::parse::<u64>`).

pub mod article;
pub mod breadcrumb;
pub mod event;
pub mod faq;
pub mod generic;
pub mod howto;
pub mod organization;
pub mod product;

use std::collections::HashMap;
use std::fmt;

use crate::merge::NormalizedRecord;
use crate::value::{PropertyBag, PropertyValue};

/// Enriches one type's merged properties in place. Must not fail.
pub type NormalizerFn = fn(&mut PropertyBag);

pub const ARTICLE_TYPES: &[&str] = &["Article", "BlogPosting", "NewsArticle", "TechArticle"];
pub const ORGANIZATION_TYPES: &[&str] = &["Organization", "LocalBusiness", "Corporation", "Restaurant", "Store"];
pub const PRODUCT_TYPES: &[&str] = &["Product"];
pub const EVENT_TYPES: &[&str] = &["Event", "MusicEvent", "SportsEvent", "BusinessEvent", "EducationEvent"];
pub const FAQ_TYPES: &[&str] = &["FAQPage"];
pub const HOWTO_TYPES: &[&str] = &["HowTo"];
pub const BREADCRUMB_TYPES: &[&str] = &["BreadcrumbList"];

/// Dispatch table from canonical type name to normalizer.
///
/// # Example
///
/// ```rust
/// use schemalens_core::{NormalizerRegistry, PropertyBag};
///
/// fn recipe(bag: &mut PropertyBag) {
///     let steps = bag.get("recipeInstructions").map(|v| v.items().len()).unwrap_or(0);
///     bag.derive("stepCount", steps.to_string());
/// }
///
/// let mut registry = NormalizerRegistry::default();
/// registry.register("Recipe", recipe);
///
/// let mut bag = PropertyBag::new();
/// registry.normalize("Recipe", &mut bag);
/// assert_eq!(bag.get_str("stepCount"), Some("0"));
/// ```
#[derive(Clone)]
pub struct NormalizerRegistry {
    table: HashMap<String, NormalizerFn>,
    fallback: NormalizerFn,
}

impl NormalizerRegistry {
    /// A registry with no entries, dispatching everything to `fallback`.
    pub fn empty(fallback: NormalizerFn) -> Self {
        Self { table: HashMap::new(), fallback }
    }

    /// Adds or replaces the normalizer for `type_name`.
    pub fn register(&mut self, type_name: impl Into<String>, normalizer: NormalizerFn) -> &mut Self {
        self.table.insert(type_name.into(), normalizer);
        self
    }

    /// Registers one normalizer under several type names.
    pub fn register_family(&mut self, type_names: &[&str], normalizer: NormalizerFn) -> &mut Self {
        for name in type_names {
            self.register(*name, normalizer);
        }
        self
    }

    /// Replaces the fallback used for unregistered types.
    pub fn set_fallback(&mut self, fallback: NormalizerFn) -> &mut Self {
        self.fallback = fallback;
        self
    }

    pub fn is_registered(&self, type_name: &str) -> bool {
        self.table.contains_key(type_name)
    }

    /// The normalizer for `type_name`, or the fallback.
    pub fn lookup(&self, type_name: &str) -> NormalizerFn {
        self.table.get(type_name).copied().unwrap_or(self.fallback)
    }

    pub fn normalize(&self, type_name: &str, bag: &mut PropertyBag) {
        (self.lookup(type_name))(bag);
    }

    /// Runs exactly one normalizer per type in the record.
    pub fn normalize_record(&self, record: &mut NormalizedRecord) {
        for (type_name, bag) in record.iter_mut() {
            let before = bag.len();
            self.normalize(type_name, bag);
            tracing::trace!(
                type_name,
                dedicated = self.is_registered(type_name),
                derived = bag.len() - before,
                "normalized type"
            );
        }
    }
}

impl Default for NormalizerRegistry {
    fn default() -> Self {
        let mut registry = Self::empty(generic::normalize);
        registry
            .register_family(ARTICLE_TYPES, article::normalize)
            .register_family(ORGANIZATION_TYPES, organization::normalize)
            .register_family(PRODUCT_TYPES, product::normalize)
            .register_family(EVENT_TYPES, event::normalize)
            .register_family(FAQ_TYPES, faq::normalize)
            .register_family(HOWTO_TYPES, howto::normalize)
            .register_family(BREADCRUMB_TYPES, breadcrumb::normalize);
        registry
    }
}

impl fmt::Debug for NormalizerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&String> = self.table.keys().collect();
        types.sort();
        f.debug_struct("NormalizerRegistry").field("types", &types).finish()
    }
}

/// Derived fields gathered while the bag is borrowed, applied afterwards.
#[derive(Debug, Default)]
pub(crate) struct Derived {
    fields: Vec<(&'static str, PropertyValue)>,
}

impl Derived {
    pub(crate) fn set(&mut self, key: &'static str, value: impl Into<PropertyValue>) {
        self.fields.push((key, value.into()));
    }

    pub(crate) fn set_opt(&mut self, key: &'static str, value: Option<impl Into<PropertyValue>>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    pub(crate) fn apply(self, bag: &mut PropertyBag) {
        for (key, value) in self.fields {
            if !bag.derive(key, value) {
                tracing::debug!(field = key, "derived field already present, keeping merged value");
            }
        }
    }
}

/// First scalar of a value: the scalar itself, or a sequence's first scalar.
pub(crate) fn first_text(value: &PropertyValue) -> Option<&str> {
    match value {
        PropertyValue::Scalar(s) => Some(s),
        PropertyValue::Sequence(items) => items.iter().find_map(PropertyValue::as_str),
        PropertyValue::Object(_) => None,
    }
}

/// Owned scalar text of `obj[key]`.
pub(crate) fn field_text(obj: &PropertyBag, key: &str) -> Option<String> {
    obj.get(key).and_then(first_text).map(str::to_string)
}

/// First of several keys that has scalar text.
pub(crate) fn field_text_any(obj: &PropertyBag, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| field_text(obj, key))
}

/// A display name: scalar text, or an object's `name`.
pub(crate) fn name_of(value: &PropertyValue) -> Option<String> {
    match value.first_object() {
        Some(obj) => field_text(obj, "name"),
        None => first_text(value).map(str::to_string),
    }
}

/// A link: scalar text, or an object's `url` (then `@id`).
pub(crate) fn url_of(value: &PropertyValue) -> Option<String> {
    match value {
        PropertyValue::Scalar(s) => Some(s.clone()),
        PropertyValue::Object(obj) => field_text_any(obj, &["url", "@id", "contentUrl"]),
        PropertyValue::Sequence(items) => items.iter().find_map(url_of),
    }
}

const ADDRESS_PARTS: &[&str] = &["streetAddress", "addressLocality", "addressRegion", "postalCode", "addressCountry"];

/// Text of one postal address component; countries may be nested objects.
pub(crate) fn address_part(address: &PropertyBag, key: &str) -> Option<String> {
    address.get(key).and_then(name_of).filter(|s| !s.trim().is_empty())
}

/// Non-empty address components joined with `", "`.
pub(crate) fn full_address(address: &PropertyBag) -> Option<String> {
    let parts: Vec<String> = ADDRESS_PARTS
        .iter()
        .filter_map(|key| address_part(address, key))
        .collect();
    if parts.is_empty() { None } else { Some(parts.join(", ")) }
}

/// Copies the discrete address components into `out`.
pub(crate) fn address_fields(address: &PropertyBag, out: &mut Derived) {
    for &key in ADDRESS_PARTS {
        out.set_opt(key, address_part(address, key));
    }
}
