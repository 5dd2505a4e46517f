pub mod json;

pub use json::{JsonConfig, JsonFormatter, record_to_json, record_to_value};
