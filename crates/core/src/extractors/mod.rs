//! Format extractors.
//!
//! Each extractor scans a [`Document`] for one encoding of schema.org data
//! and yields [`Candidate`]s. Extractors share no state and never fail a run:
//! a fragment that cannot be read is reported through `tracing` and skipped.

pub mod jsonld;
pub mod microdata;
pub mod property;
pub mod rdfa;

use serde::Serialize;

use crate::parse::Document;
use crate::value::PropertyBag;

pub use jsonld::LinkedDataExtractor;
pub use microdata::MicrodataExtractor;
pub use rdfa::RdfaExtractor;

/// The encoding a candidate was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceFormat {
    /// `<script type="application/ld+json">` blocks.
    LinkedData,
    /// `itemscope` / `itemtype` / `itemprop` attributes.
    Microdata,
    /// `typeof` / `property` attributes.
    Rdfa,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinkedData => "json-ld",
            Self::Microdata => "microdata",
            Self::Rdfa => "rdfa",
        }
    }
}

/// One structured-data fragment, before merging.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Type as written in the markup, possibly a vocabulary URI.
    pub declared_type: String,
    pub properties: PropertyBag,
    pub source_format: SourceFormat,
}

impl Candidate {
    pub fn new(declared_type: impl Into<String>, properties: PropertyBag, source_format: SourceFormat) -> Self {
        Self { declared_type: declared_type.into(), properties, source_format }
    }
}

/// A detector for one structured-data encoding.
pub trait Extractor {
    fn source_format(&self) -> SourceFormat;

    /// Candidates in document order.
    fn extract(&self, doc: &Document) -> Vec<Candidate>;
}

/// Selects elements with a constant selector, logging instead of failing.
pub(crate) fn select_or_log<'a>(doc: &'a Document, selector: &str, format: SourceFormat) -> Vec<crate::Element<'a>> {
    match doc.select(selector) {
        Ok(elements) => elements,
        Err(error) => {
            tracing::warn!(format = format.as_str(), %error, "selector rejected");
            Vec::new()
        }
    }
}
