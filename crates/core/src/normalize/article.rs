//! Article and blog posting normalization.

use super::{Derived, field_text, first_text, name_of, url_of};
use crate::value::{PropertyBag, PropertyValue};

/// Derives `wordCount`, `author*`, `publisher*`, `featuredImage` and
/// `imageGallery`. `wordCount` is decimal text such as `"17"`.
pub fn normalize(bag: &mut PropertyBag) {
    let mut out = Derived::default();

    if let Some(count) = bag.get("articleBody").and_then(word_count) {
        out.set("wordCount", count.to_string());
    }

    if let Some(author) = bag.get("author") {
        match author.first_object() {
            Some(obj) => {
                out.set_opt("authorName", field_text(obj, "name"));
                out.set("authorType", field_text(obj, "@type").unwrap_or_else(|| "Person".to_string()));
                out.set_opt("authorUrl", obj.get("url").and_then(url_of));
            }
            None => out.set_opt("authorName", first_text(author)),
        }
    }

    if let Some(publisher) = bag.get("publisher") {
        match publisher.first_object() {
            Some(obj) => {
                out.set_opt("publisherName", field_text(obj, "name"));
                out.set_opt("publisherLogo", obj.get("logo").or_else(|| obj.get("image")).and_then(url_of));
                out.set_opt("publisherUrl", obj.get("url").and_then(url_of));
                out.set(
                    "publisherType",
                    field_text(obj, "@type").unwrap_or_else(|| "Organization".to_string()),
                );
            }
            None => out.set_opt("publisherName", name_of(publisher)),
        }
    }

    match bag.get("image") {
        Some(PropertyValue::Sequence(images)) => {
            let gallery: Vec<PropertyValue> = images.iter().filter_map(url_of).map(PropertyValue::Scalar).collect();
            if let Some(first) = gallery.first() {
                out.set("featuredImage", first.clone());
                out.set("imageGallery", gallery);
            }
        }
        Some(image) => out.set_opt("featuredImage", url_of(image)),
        None => {}
    }

    out.apply(bag);
}

/// Whitespace-delimited tokens in the article body.
fn word_count(body: &PropertyValue) -> Option<usize> {
    match body {
        PropertyValue::Scalar(text) => Some(text.split_whitespace().count()),
        PropertyValue::Sequence(parts) => {
            let texts: Vec<&str> = parts.iter().filter_map(PropertyValue::as_str).collect();
            if texts.is_empty() {
                None
            } else {
                Some(texts.iter().map(|t| t.split_whitespace().count()).sum())
            }
        }
        PropertyValue::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::test_support::{assert_idempotent, bag};
    use serde_json::json;

    #[test]
    fn test_word_count_from_body() {
        let mut article = bag(json!({"articleBody": "  Rust is a   systems\nprogramming language "}));
        normalize(&mut article);
        assert_eq!(article.get_str("wordCount"), Some("6"));
    }

    #[test]
    fn test_word_count_from_repeated_body() {
        let mut article = bag(json!({"articleBody": ["one two", "three"]}));
        normalize(&mut article);
        assert_eq!(article.get_str("wordCount"), Some("3"));
    }

    #[test]
    fn test_author_object() {
        let mut article = bag(json!({
            "author": {"@type": "Organization", "name": "Newsroom", "url": "https://news.example"}
        }));
        normalize(&mut article);

        assert_eq!(article.get_str("authorName"), Some("Newsroom"));
        assert_eq!(article.get_str("authorType"), Some("Organization"));
        assert_eq!(article.get_str("authorUrl"), Some("https://news.example"));
    }

    #[test]
    fn test_author_defaults() {
        let mut nested = bag(json!({"author": {"name": "Jane Smith"}}));
        normalize(&mut nested);
        assert_eq!(nested.get_str("authorType"), Some("Person"));
        assert!(!nested.contains_key("authorUrl"));

        let mut bare = bag(json!({"author": "John Doe"}));
        normalize(&mut bare);
        assert_eq!(bare.get_str("authorName"), Some("John Doe"));
        assert!(!bare.contains_key("authorType"));
    }

    #[test]
    fn test_author_list_uses_first_author() {
        let mut article = bag(json!({
            "author": [{"@type": "Person", "name": "First"}, {"@type": "Person", "name": "Second"}]
        }));
        normalize(&mut article);
        assert_eq!(article.get_str("authorName"), Some("First"));
    }

    #[test]
    fn test_publisher_with_logo() {
        let mut article = bag(json!({
            "publisher": {
                "@type": "NewsMediaOrganization",
                "name": "Daily",
                "logo": {"@type": "ImageObject", "url": "https://daily.example/logo.png"}
            }
        }));
        normalize(&mut article);

        assert_eq!(article.get_str("publisherName"), Some("Daily"));
        assert_eq!(article.get_str("publisherLogo"), Some("https://daily.example/logo.png"));
        assert_eq!(article.get_str("publisherType"), Some("NewsMediaOrganization"));
    }

    #[test]
    fn test_publisher_image_fallback_and_default_type() {
        let mut article = bag(json!({"publisher": {"name": "Daily", "image": "https://daily.example/i.png"}}));
        normalize(&mut article);

        assert_eq!(article.get_str("publisherLogo"), Some("https://daily.example/i.png"));
        assert_eq!(article.get_str("publisherType"), Some("Organization"));
    }

    #[test]
    fn test_image_gallery() {
        let mut article = bag(json!({
            "image": ["https://a.example/1.jpg", {"@type": "ImageObject", "url": "https://a.example/2.jpg"}]
        }));
        normalize(&mut article);

        assert_eq!(article.get_str("featuredImage"), Some("https://a.example/1.jpg"));
        assert_eq!(
            article.get("imageGallery"),
            Some(&PropertyValue::Sequence(vec![
                "https://a.example/1.jpg".into(),
                "https://a.example/2.jpg".into()
            ]))
        );
    }

    #[test]
    fn test_single_image_object() {
        let mut article = bag(json!({"image": {"url": "https://a.example/hero.jpg", "width": 1200}}));
        normalize(&mut article);

        assert_eq!(article.get_str("featuredImage"), Some("https://a.example/hero.jpg"));
        assert!(!article.contains_key("imageGallery"));
    }

    #[test]
    fn test_missing_fields_derive_nothing() {
        let mut article = bag(json!({"headline": "Just a headline"}));
        normalize(&mut article);
        assert_eq!(article.len(), 1);
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(
            normalize,
            bag(json!({
                "articleBody": "a b c",
                "author": "Jane",
                "image": ["https://a.example/1.jpg", "https://a.example/2.jpg"]
            })),
        );
    }
}
