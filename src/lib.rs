//! Convert JSON Schema documents into OpenAI and Anthropic tool definitions,
//! and check tool definitions for structural correctness.

pub mod converter;
pub mod error;
pub mod formats;
pub mod metadata;

pub use converter::SchemaConverter;
pub use error::ConvertError;
pub use formats::{ToolFormat, Validation};
pub use metadata::ToolMetadata;
