//! Canonical type names.
//!
//! Declared types arrive as bare names (`Product`), vocabulary URIs
//! (`https://schema.org/Product`) or RDFa-style lists with trailing
//! qualifiers (`schema.org/Product ex:Featured`). Records are keyed by the
//! local name only.

const VOCABULARY_MARKER: &str = "schema.org/";

/// Resolves a declared type to its canonical local name.
///
/// Never fails: a string with nothing to strip resolves to itself.
///
/// # Example
///
/// ```rust
/// use schemalens_core::resolve::canonical_type_name;
///
/// assert_eq!(canonical_type_name("https://schema.org/Product"), "Product");
/// assert_eq!(canonical_type_name("http://schema.org/Event https://schema.org/Thing"), "Event");
/// assert_eq!(canonical_type_name("Recipe"), "Recipe");
/// ```
pub fn canonical_type_name(declared: &str) -> String {
    let declared = declared.trim();

    if let Some(idx) = declared.find(VOCABULARY_MARKER) {
        let local = &declared[idx + VOCABULARY_MARKER.len()..];
        return local.split(' ').next().unwrap_or(local).to_string();
    }

    declared.rsplit('/').next().unwrap_or(declared).to_string()
}
