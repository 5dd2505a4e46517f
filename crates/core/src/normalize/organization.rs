//! Organization and local business normalization.

use super::{Derived, address_fields, field_text, full_address, url_of};
use crate::value::{PropertyBag, PropertyValue};

pub fn normalize(bag: &mut PropertyBag) {
    let mut out = Derived::default();

    if let Some(address) = bag.get("address") {
        match address.first_object() {
            Some(obj) => {
                address_fields(obj, &mut out);
                out.set_opt("fullAddress", full_address(obj));
            }
            None => {
                let text = address
                    .items()
                    .iter()
                    .filter_map(PropertyValue::as_str)
                    .map(str::trim)
                    .find(|text| !text.is_empty());
                out.set_opt("fullAddress", text);
            }
        }
    }

    if let Some(contact) = bag.get("contactPoint").and_then(PropertyValue::first_object) {
        out.set_opt("contactPhone", field_text(contact, "telephone"));
        out.set_opt("contactEmail", field_text(contact, "email"));
        out.set_opt("contactType", field_text(contact, "contactType"));
    }

    if let Some(geo) = bag.get("geo").and_then(PropertyValue::first_object) {
        let latitude = field_text(geo, "latitude");
        let longitude = field_text(geo, "longitude");
        if let (Some(lat), Some(lng)) = (&latitude, &longitude) {
            out.set("coordinates", format!("{}, {}", lat, lng));
        }
        out.set_opt("latitude", latitude);
        out.set_opt("longitude", longitude);
    }

    if let Some(hours) = bag.get("openingHours") {
        out.set("openingHoursList", hours.items().to_vec());
    }

    if let Some(links) = bag.get("sameAs") {
        out.set("socialMediaLinks", links.items().to_vec());
    }

    out.set_opt("logoUrl", bag.get("logo").and_then(url_of));

    out.apply(bag);
}
