//! Event normalization.

use super::{Derived, field_text, field_text_any, first_text, full_address, name_of, url_of};
use crate::value::{PropertyBag, PropertyValue};

/// Flattens `location`, `organizer`, ticket `offers` and `eventStatus`.
pub fn normalize(bag: &mut PropertyBag) {
    let mut out = Derived::default();

    if let Some(location) = bag.get("location") {
        match location.first_object() {
            Some(place) => {
                out.set_opt("locationName", field_text(place, "name"));
                if let Some(address) = place.get("address") {
                    out.set("locationAddress", address.clone());
                    out.set_opt("locationFullAddress", address.first_object().and_then(full_address));
                }
            }
            None => out.set_opt("locationName", first_text(location)),
        }
    }

    if let Some(organizer) = bag.get("organizer") {
        match organizer.first_object() {
            Some(obj) => {
                out.set_opt("organizerName", field_text(obj, "name"));
                out.set_opt("organizerUrl", obj.get("url").and_then(url_of));
                out.set(
                    "organizerType",
                    field_text(obj, "@type").unwrap_or_else(|| "Organization".to_string()),
                );
            }
            None => out.set_opt("organizerName", name_of(organizer)),
        }
    }

    if let Some(offer) = bag.get("offers").and_then(PropertyValue::first_object) {
        out.set_opt("ticketPrice", field_text_any(offer, &["price", "lowPrice"]));
        out.set_opt("ticketCurrency", field_text(offer, "priceCurrency"));
        out.set_opt("ticketAvailability", field_text(offer, "availability"));
        out.set_opt("ticketUrl", offer.get("url").and_then(url_of));
        out.set_opt("ticketValidFrom", field_text_any(offer, &["priceValidFrom", "validFrom"]));
        out.set_opt("ticketValidUntil", field_text(offer, "priceValidUntil"));
    }

    out.set_opt("status", bag.get("eventStatus").and_then(first_text));

    out.apply(bag);
}
