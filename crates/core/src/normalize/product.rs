//! Product normalization: offers, ratings, reviews, identifiers and brand.

use super::{Derived, field_text, field_text_any, first_text, name_of, url_of};
use crate::value::{PropertyBag, PropertyValue};

pub fn normalize(bag: &mut PropertyBag) {
    let mut out = Derived::default();

    if let Some(offer) = bag.get("offers").and_then(PropertyValue::first_object) {
        out.set_opt("price", field_text_any(offer, &["price", "lowPrice"]));
        out.set_opt("priceCurrency", field_text(offer, "priceCurrency"));
        out.set_opt("availability", field_text(offer, "availability"));
        out.set_opt("offerUrl", offer.get("url").and_then(url_of));
        out.set_opt("offerValidFrom", field_text_any(offer, &["priceValidFrom", "validFrom"]));
        out.set_opt("offerValidUntil", field_text(offer, "priceValidUntil"));
    }

    if let Some(rating) = bag.get("aggregateRating").and_then(PropertyValue::first_object) {
        out.set_opt("rating", field_text(rating, "ratingValue"));
        out.set_opt("ratingCount", field_text_any(rating, &["reviewCount", "ratingCount"]));
        out.set_opt("bestRating", field_text(rating, "bestRating"));
        out.set_opt("worstRating", field_text(rating, "worstRating"));
    }

    if let Some(review) = bag.get("review") {
        let reviews: Vec<PropertyValue> = review
            .items()
            .iter()
            .filter_map(PropertyValue::as_object)
            .map(|r| PropertyValue::Object(review_summary(r)))
            .collect();
        if !reviews.is_empty() {
            out.set("reviews", reviews);
        }
    }

    out.set_opt("productSku", bag.get("sku").and_then(first_text));
    out.set_opt("productGtin", bag.get("gtin").and_then(first_text));
    out.set_opt("productMpn", bag.get("mpn").and_then(first_text));

    if let Some(brand) = bag.get("brand") {
        out.set_opt("brandName", name_of(brand));
        if let Some(obj) = brand.first_object() {
            out.set_opt("brandUrl", obj.get("url").and_then(url_of));
        }
    }

    out.apply(bag);
}

fn review_summary(review: &PropertyBag) -> PropertyBag {
    let mut summary = PropertyBag::new();
    let reviewer = review.get("author").and_then(name_of).unwrap_or_else(|| "Anonymous".to_string());
    summary.insert("reviewer", reviewer);

    let rating = review
        .get("reviewRating")
        .and_then(PropertyValue::first_object)
        .and_then(|r| field_text(r, "ratingValue"));
    if let Some(rating) = rating {
        summary.insert("rating", rating);
    }
    if let Some(date) = field_text(review, "datePublished") {
        summary.insert("date", date);
    }
    if let Some(text) = field_text_any(review, &["reviewBody", "description"]) {
        summary.insert("text", text);
    }
    summary
}
