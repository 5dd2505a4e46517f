//! Main inspection API.
//!
//! [`Inspector`] runs the enabled format extractors over a document, merges
//! every candidate into a [`NormalizedRecord`] and normalizes each type once.
//! The free functions [`inspect`] and [`inspect_with_url`] cover the common
//! one-shot case.
//!
//! # Example
//!
//! ```rust
//! use schemalens_core::inspect;
//!
//! let html = r#"
//!     <script type="application/ld+json">
//!     {"@context": "https://schema.org", "@type": "Product", "name": "Widget",
//!      "offers": {"@type": "Offer", "price": "19.99", "priceCurrency": "USD"}}
//!     </script>
//! "#;
//!
//! let record = inspect(html);
//! let product = record.get("Product").unwrap();
//! assert_eq!(product.get_str("price"), Some("19.99"));
//! ```

use url::Url;

use crate::extractors::{Extractor, LinkedDataExtractor, MicrodataExtractor, RdfaExtractor};
use crate::merge::NormalizedRecord;
use crate::normalize::NormalizerRegistry;
use crate::parse::Document;
use crate::{Result, SchemaLensError};

#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, fetch_url};

/// Configuration for an [`Inspector`].
///
/// # Example
///
/// ```rust
/// use schemalens_core::InspectConfig;
///
/// let config = InspectConfig::builder()
///     .rdfa(false)
///     .nested_items(false)
///     .types(vec!["Product".to_string()])
///     .build();
/// assert!(config.linked_data);
/// assert!(!config.rdfa);
/// ```
#[derive(Debug, Clone)]
pub struct InspectConfig {
    /// Read JSON-LD script blocks (default: true).
    pub linked_data: bool,

    /// Read microdata attributes (default: true).
    pub microdata: bool,

    /// Read RDFa attributes (default: true).
    pub rdfa: bool,

    /// Emit typed scopes nested inside another scope as their own
    /// candidates (default: true).
    pub nested_items: bool,

    /// Keep only these canonical types in the output (default: all).
    pub types: Option<Vec<String>>,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self { linked_data: true, microdata: true, rdfa: true, nested_items: true, types: None }
    }
}

impl InspectConfig {
    /// Creates a new builder for InspectConfig.
    pub fn builder() -> InspectConfigBuilder {
        InspectConfigBuilder::new()
    }
}

/// Builder for InspectConfig.
pub struct InspectConfigBuilder {
    config: InspectConfig,
}

impl InspectConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: InspectConfig::default() }
    }

    /// Sets whether JSON-LD blocks are read.
    pub fn linked_data(mut self, value: bool) -> Self {
        self.config.linked_data = value;
        self
    }

    /// Sets whether microdata is read.
    pub fn microdata(mut self, value: bool) -> Self {
        self.config.microdata = value;
        self
    }

    /// Sets whether RDFa is read.
    pub fn rdfa(mut self, value: bool) -> Self {
        self.config.rdfa = value;
        self
    }

    /// Sets whether nested typed scopes become candidates of their own.
    pub fn nested_items(mut self, value: bool) -> Self {
        self.config.nested_items = value;
        self
    }

    /// Restricts the output to the given canonical type names.
    pub fn types(mut self, value: Vec<String>) -> Self {
        self.config.types = Some(value);
        self
    }

    /// Builds the config.
    pub fn build(self) -> InspectConfig {
        self.config
    }
}

impl Default for InspectConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Structured-data inspection engine.
///
/// Holds only configuration and a table of normalizer functions, so it is
/// cheap to build per call and safe to share across threads.
///
/// # Example
///
/// ```rust
/// use schemalens_core::Inspector;
///
/// let inspector = Inspector::new();
/// let html = r#"<div itemscope itemtype="https://schema.org/Organization">
///     <span itemprop="name">Acme</span>
/// </div>"#;
/// let record = inspector.inspect_html(html);
/// assert_eq!(record.get("Organization").unwrap().get_str("name"), Some("Acme"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Inspector {
    config: InspectConfig,
    registry: NormalizerRegistry,
}

impl Inspector {
    /// Creates an inspector with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an inspector with a custom configuration.
    pub fn with_config(config: InspectConfig) -> Self {
        Self { config, registry: NormalizerRegistry::default() }
    }

    /// Creates an inspector with a custom configuration and normalizer table.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemalens_core::{InspectConfig, Inspector, NormalizerRegistry, PropertyBag};
    ///
    /// fn recipe(bag: &mut PropertyBag) {
    ///     bag.derive("isRecipe", "true");
    /// }
    ///
    /// let mut registry = NormalizerRegistry::default();
    /// registry.register("Recipe", recipe);
    ///
    /// let inspector = Inspector::with_registry(InspectConfig::default(), registry);
    /// let record = inspector.inspect_html(
    ///     r#"<script type="application/ld+json">{"@type": "Recipe", "name": "Soup"}</script>"#,
    /// );
    /// assert_eq!(record.get("Recipe").unwrap().get_str("isRecipe"), Some("true"));
    /// ```
    pub fn with_registry(config: InspectConfig, registry: NormalizerRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &InspectConfig {
        &self.config
    }

    /// Always `true` once an inspector exists.
    pub fn ping(&self) -> bool {
        true
    }

    /// Extracts, merges and normalizes all structured data in `doc`.
    ///
    /// Never fails: fragments that cannot be read are skipped and reported
    /// through `tracing`.
    pub fn inspect(&self, doc: &Document) -> NormalizedRecord {
        let mut record = NormalizedRecord::new();

        for extractor in self.extractors() {
            let candidates = extractor.extract(doc);
            tracing::trace!(
                format = extractor.source_format().as_str(),
                count = candidates.len(),
                "extracted candidates"
            );
            for candidate in candidates {
                record.merge_candidate(candidate);
            }
        }

        if let Some(types) = &self.config.types {
            record.retain_types(types);
        }

        self.registry.normalize_record(&mut record);
        record
    }

    /// Inspects an HTML string without a base URL.
    pub fn inspect_html(&self, html: &str) -> NormalizedRecord {
        self.inspect(&Document::from_html(html, None))
    }

    /// Inspects an HTML string, resolving relative links against `url`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLensError::InvalidUrl`] if the URL is invalid.
    pub fn inspect_html_with_url(&self, html: &str, url: &str) -> Result<NormalizedRecord> {
        let base_url = Url::parse(url).map_err(|e| SchemaLensError::InvalidUrl(e.to_string()))?;
        Ok(self.inspect(&Document::from_html(html, Some(base_url))))
    }

    /// Fetches a page with the default fetch settings and inspects it.
    #[cfg(feature = "fetch")]
    pub async fn fetch_and_inspect(&self, url: &str) -> Result<NormalizedRecord> {
        self.fetch_and_inspect_with_config(url, &FetchConfig::default()).await
    }

    /// Fetches a page with custom fetch settings and inspects it.
    #[cfg(feature = "fetch")]
    pub async fn fetch_and_inspect_with_config(&self, url: &str, fetch_config: &FetchConfig) -> Result<NormalizedRecord> {
        let html = fetch_url(url, fetch_config).await?;
        self.inspect_html_with_url(&html, url)
    }

    /// Enabled extractors in run order: linked data, microdata, RDFa.
    fn extractors(&self) -> Vec<Box<dyn Extractor>> {
        let mut extractors: Vec<Box<dyn Extractor>> = Vec::new();
        if self.config.linked_data {
            extractors.push(Box::new(LinkedDataExtractor));
        }
        if self.config.microdata {
            extractors.push(Box::new(MicrodataExtractor { nested_items: self.config.nested_items }));
        }
        if self.config.rdfa {
            extractors.push(Box::new(RdfaExtractor { nested_items: self.config.nested_items }));
        }
        extractors
    }
}

/// Inspects HTML with the default configuration.
pub fn inspect(html: &str) -> NormalizedRecord {
    Inspector::new().inspect_html(html)
}

/// Inspects HTML with a base URL for relative links.
///
/// # Errors
///
/// Returns [`SchemaLensError::InvalidUrl`] if the URL is invalid.
pub fn inspect_with_url(html: &str, url: &str) -> Result<NormalizedRecord> {
    Inspector::new().inspect_html_with_url(html, url)
}

/// Fetches a page and inspects it with default settings.
///
/// # Example
///
/// ```no_run
/// use schemalens_core::fetch_and_inspect;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let record = fetch_and_inspect("https://example.com/product").await?;
///     println!("{} types", record.len());
///     Ok(())
/// }
/// ```
#[cfg(feature = "fetch")]
pub async fn fetch_and_inspect(url: &str) -> Result<NormalizedRecord> {
    Inspector::new().fetch_and_inspect(url).await
}
