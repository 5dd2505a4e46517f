//! Small validation helpers shared by the normalizers.

use url::Url;

/// Whether `candidate` is a well-formed absolute URL.
///
/// Uses WHATWG URL parsing, so a scheme is required and surrounding
/// whitespace is tolerated the way browsers tolerate it.
///
/// # Example
///
/// ```rust
/// use schemalens_core::validate::is_valid_url;
///
/// assert!(is_valid_url("https://example.com"));
/// assert!(!is_valid_url("not a url"));
/// ```
pub fn is_valid_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://example.com", true)]
    #[case("http://example.com/path?q=1#frag", true)]
    #[case("mailto:info@example.com", true)]
    #[case("  https://example.com  ", true)]
    #[case("not a url", false)]
    #[case("example.com", false)]
    #[case("/relative/path", false)]
    #[case("", false)]
    #[case("https://", false)]
    fn test_is_valid_url(#[case] candidate: &str, #[case] expected: bool) {
        assert_eq!(is_valid_url(candidate), expected);
    }
}
