//! Property values as read from structured-data markup.
//!
//! The same schema.org property may arrive as a bare string, a nested object
//! or a list of either, depending on how a page was authored. [`PropertyValue`]
//! makes those shapes explicit so that every consumer has to match on them.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// A single property value.
///
/// Serializes untagged: scalars as JSON strings, objects as JSON objects and
/// sequences as JSON arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Scalar(String),
    Object(PropertyBag),
    Sequence(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Converts a JSON value, dropping `null`s.
    ///
    /// Numbers and booleans keep their JSON text, so `1` becomes `"1"`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::Scalar(s.clone())),
            Value::Bool(b) => Some(Self::Scalar(b.to_string())),
            Value::Number(n) => Some(Self::Scalar(n.to_string())),
            Value::Array(items) => Some(Self::Sequence(items.iter().filter_map(Self::from_json).collect())),
            Value::Object(map) => {
                let mut bag = PropertyBag::new();
                for (key, item) in map {
                    if let Some(converted) = Self::from_json(item) {
                        bag.insert(key.clone(), converted);
                    }
                }
                Some(Self::Object(bag))
            }
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&PropertyBag> {
        match self {
            Self::Object(bag) => Some(bag),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// The object this value stands for.
    ///
    /// A sequence contributes its first object, so `"offers": [{...}, {...}]`
    /// reads the same as a single offer.
    pub fn first_object(&self) -> Option<&PropertyBag> {
        match self {
            Self::Object(bag) => Some(bag),
            Self::Sequence(items) => items.iter().find_map(PropertyValue::as_object),
            Self::Scalar(_) => None,
        }
    }

    /// The value viewed as a list: a sequence as-is, anything else as one item.
    pub fn items(&self) -> &[PropertyValue] {
        match self {
            Self::Sequence(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Empty strings and empty sequences.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Scalar(s) => s.is_empty(),
            Self::Sequence(items) => items.is_empty(),
            Self::Object(_) => false,
        }
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<PropertyBag> for PropertyValue {
    fn from(value: PropertyBag) -> Self {
        Self::Object(value)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(value: Vec<PropertyValue>) -> Self {
        Self::Sequence(value)
    }
}

/// Insertion-ordered map from property name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyBag {
    entries: IndexMap<String, PropertyValue>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut PropertyValue> {
        self.entries.get_mut(key)
    }

    /// Scalar value of a property, if the property is a scalar.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or replaces a value. New keys go to the end.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Adds a derived value unless the key is already present.
    ///
    /// Returns whether the value was written.
    pub fn derive(&mut self, key: &str, value: impl Into<PropertyValue>) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), value.into());
        true
    }

    /// Like [`derive`](Self::derive), for values that may be absent.
    pub fn derive_opt(&mut self, key: &str, value: Option<impl Into<PropertyValue>>) -> bool {
        match value {
            Some(value) => self.derive(key, value),
            None => false,
        }
    }

    /// Adds a value under `key`, promoting an existing value to a sequence.
    ///
    /// Used while collecting attribute-based properties: the first
    /// occurrence stays a singleton and later ones append in order.
    pub fn append(&mut self, key: &str, value: PropertyValue) {
        match self.entries.get_mut(key) {
            Some(PropertyValue::Sequence(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::replace(existing, PropertyValue::Sequence(Vec::new()));
                *existing = PropertyValue::Sequence(vec![first, value]);
            }
            None => {
                self.entries.insert(key.to_string(), value);
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for PropertyBag {
    type Item = (String, PropertyValue);
    type IntoIter = indexmap::map::IntoIter<String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = PropertyBag::new();
        for (key, value) in iter {
            bag.insert(key, value);
        }
        bag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_stringifies_numbers_and_drops_nulls() {
        let value = PropertyValue::from_json(&json!({
            "position": 1,
            "isFamilyFriendly": true,
            "alternateName": null,
            "tags": ["a", null, "b"]
        }))
        .unwrap();

        let bag = value.as_object().unwrap();
        assert_eq!(bag.get_str("position"), Some("1"));
        assert_eq!(bag.get_str("isFamilyFriendly"), Some("true"));
        assert!(!bag.contains_key("alternateName"));
        assert_eq!(bag.get("tags").unwrap().as_sequence().unwrap().len(), 2);
    }

    #[test]
    fn test_append_promotes_to_sequence() {
        let mut bag = PropertyBag::new();
        bag.append("sameAs", "a".into());
        assert_eq!(bag.get_str("sameAs"), Some("a"));

        bag.append("sameAs", "b".into());
        bag.append("sameAs", "c".into());
        assert_eq!(
            bag.get("sameAs"),
            Some(&PropertyValue::Sequence(vec!["a".into(), "b".into(), "c".into()]))
        );
    }

    #[test]
    fn test_derive_keeps_existing_value() {
        let mut bag = PropertyBag::new();
        bag.insert("price", "10.00");

        assert!(!bag.derive("price", "9.99"));
        assert!(bag.derive("priceCurrency", "USD"));
        assert_eq!(bag.get_str("price"), Some("10.00"));
        assert_eq!(bag.get_str("priceCurrency"), Some("USD"));
    }

    #[test]
    fn test_first_object_from_sequence() {
        let offers = PropertyValue::Sequence(vec![
            "ignored".into(),
            PropertyBag::from_iter([("price", "5")]).into(),
            PropertyBag::from_iter([("price", "6")]).into(),
        ]);
        assert_eq!(offers.first_object().unwrap().get_str("price"), Some("5"));
        assert!(PropertyValue::from("plain").first_object().is_none());
    }

    #[test]
    fn test_items_wraps_singletons() {
        let single = PropertyValue::from("x");
        assert_eq!(single.items().len(), 1);

        let many = PropertyValue::Sequence(vec!["x".into(), "y".into()]);
        assert_eq!(many.items().len(), 2);
    }

    #[test]
    fn test_serializes_untagged_in_insertion_order() {
        let mut bag = PropertyBag::new();
        bag.insert("name", "Widget");
        bag.insert("offers", PropertyBag::from_iter([("price", "9.99")]));
        bag.insert("sameAs", vec![PropertyValue::from("a"), PropertyValue::from("b")]);

        let out = serde_json::to_string(&bag).unwrap();
        assert_eq!(out, r#"{"name":"Widget","offers":{"price":"9.99"},"sameAs":["a","b"]}"#);
    }
}
