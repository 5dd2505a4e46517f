//! HTML parsing and DOM access.
//!
//! This module provides the [`Document`] and [`Element`] types the format
//! extractors traverse. A document may carry a base URL so that link and
//! media values read from markup resolve the way a browser would resolve
//! them.
//!
//! # Example
//!
//! ```rust
//! use schemalens_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <div itemscope itemtype="https://schema.org/Person">
//!                 <span itemprop="name">Ada</span>
//!             </div>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let scopes = doc.select("[itemscope]").unwrap();
//! assert_eq!(scopes.len(), 1);
//! ```

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{Result, SchemaLensError};

/// Represents a parsed HTML document.
///
/// # Example
///
/// ```rust
/// use schemalens_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
    base_url: Option<Url>,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing is lenient: malformed markup is repaired by the HTML5 parser
    /// rather than rejected.
    pub fn parse(html: &str) -> Result<Self> {
        Ok(Self::from_html(html, None))
    }

    /// Parses HTML with a base URL used to resolve relative links.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemalens_core::parse::Document;
    /// use url::Url;
    ///
    /// let base = Url::parse("https://example.com/shop/").unwrap();
    /// let doc = Document::parse_with_url("<a href=\"item\">x</a>", Some(base)).unwrap();
    /// assert_eq!(doc.resolve_url("item"), "https://example.com/shop/item");
    /// ```
    pub fn parse_with_url(html: &str, base_url: Option<Url>) -> Result<Self> {
        Ok(Self::from_html(html, base_url))
    }

    /// Infallible constructor behind [`parse`](Self::parse) and
    /// [`parse_with_url`](Self::parse_with_url).
    pub fn from_html(html: &str, base_url: Option<Url>) -> Self {
        Self { html: Html::parse_document(html), base_url }
    }

    /// Gets the base URL, if one was provided during parsing.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLensError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemalens_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the title of the document.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    /// Resolves a link target against the base URL.
    ///
    /// Without a base URL, or when the reference cannot be joined, the raw
    /// value is returned unchanged.
    pub fn resolve_url(&self, raw: &str) -> String {
        match &self.base_url {
            Some(base) => base.join(raw).map(String::from).unwrap_or_else(|_| raw.to_string()),
            None => raw.to_string(),
        }
    }
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use schemalens_core::parse::Document;
///
/// let html = r#"<a href="https://example.com">Link text</a>"#;
/// let doc = Document::parse(html).unwrap();
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Whether the attribute is present, with or without a value.
    pub fn has_attr(&self, name: &str) -> bool {
        self.element.value().attr(name).is_some()
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Direct child elements in document order.
    pub fn children(&self) -> Vec<Element<'a>> {
        self.element
            .children()
            .filter_map(ElementRef::wrap)
            .map(|el| Element { element: el })
            .collect()
    }

    /// Whether any ancestor element carries the given attribute.
    pub fn has_ancestor_with_attr(&self, name: &str) -> bool {
        self.element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|el| el.value().attr(name).is_some())
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLensError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SchemaLensError::HtmlParseError(format!("Invalid selector: {}", e)))
}
