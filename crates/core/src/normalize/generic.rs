//! Fallback for types without a dedicated normalizer.

use crate::validate::is_valid_url;
use crate::value::{PropertyBag, PropertyValue};

/// Flags whether a scalar `url` is well formed.
///
/// `isValidUrl` is the text `"true"` or `"false"`, not a JSON boolean.
pub fn normalize(bag: &mut PropertyBag) {
    let valid = match bag.get("url") {
        Some(PropertyValue::Scalar(url)) => is_valid_url(url),
        _ => return,
    };
    bag.derive("isValidUrl", valid.to_string());
}
