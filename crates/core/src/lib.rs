pub mod error;
pub mod extractors;
pub mod fetch;
pub mod formatters;
pub mod inspector;
pub mod merge;
pub mod normalize;
pub mod parse;
pub mod resolve;
pub mod validate;
pub mod value;

pub use error::{Result, SchemaLensError};
pub use extractors::{Candidate, Extractor, LinkedDataExtractor, MicrodataExtractor, RdfaExtractor, SourceFormat};
pub use fetch::{FetchConfig, fetch_file, fetch_stdin};
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use formatters::{JsonConfig, JsonFormatter, record_to_json, record_to_value};
#[cfg(feature = "fetch")]
pub use inspector::fetch_and_inspect;
pub use inspector::{InspectConfig, InspectConfigBuilder, Inspector, inspect, inspect_with_url};
pub use merge::{NormalizedRecord, UNIVERSAL_FIELDS, is_universal_field, merge};
pub use normalize::{NormalizerFn, NormalizerRegistry};
pub use parse::{Document, Element};
pub use resolve::canonical_type_name;
pub use value::{PropertyBag, PropertyValue};
