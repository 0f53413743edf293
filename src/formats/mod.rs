//! Provider-specific tool definition formats.

use crate::error::{ConvertError, Result};
use crate::metadata::ToolMetadata;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub mod anthropic;
pub mod openai;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFormat {
    OpenAi,
    Anthropic,
}

impl ToolFormat {
    pub const SUPPORTED: [ToolFormat; 2] = [ToolFormat::OpenAi, ToolFormat::Anthropic];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolFormat::OpenAi => "openai",
            ToolFormat::Anthropic => "anthropic",
        }
    }

    /// Render metadata as a tool definition in this format.
    pub fn format(self, metadata: &ToolMetadata) -> Result<Value> {
        let value = match self {
            ToolFormat::OpenAi => serde_json::to_value(openai::format(metadata)),
            ToolFormat::Anthropic => serde_json::to_value(anthropic::format(metadata)),
        };
        value.map_err(|err| {
            ConvertError::invalid_input(format!("failed to serialize tool definition: {err}"))
        })
    }

    pub fn validate(self, tool: &Value) -> Validation {
        match self {
            ToolFormat::OpenAi => openai::validate(tool),
            ToolFormat::Anthropic => anthropic::validate(tool),
        }
    }

    pub fn extract_schema(self, tool: &Value) -> Result<Value> {
        match self {
            ToolFormat::OpenAi => openai::extract_schema(tool),
            ToolFormat::Anthropic => anthropic::extract_schema(tool),
        }
    }

    /// Display name of a candidate tool, if it carries a string name.
    pub fn tool_name(self, tool: &Value) -> Option<&str> {
        let name = match self {
            ToolFormat::OpenAi => tool.get("function")?.get("name")?,
            ToolFormat::Anthropic => tool.get("name")?,
        };
        name.as_str()
    }
}

impl FromStr for ToolFormat {
    type Err = ConvertError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "openai" => Ok(ToolFormat::OpenAi),
            "anthropic" => Ok(ToolFormat::Anthropic),
            other => Err(ConvertError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ToolFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a structural check: every defect found in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub errors: Vec<String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }
}

/// Check the `type`/`properties` shape shared by both providers' parameter schemas.
fn check_object_schema(validation: &mut Validation, schema: &Value, label: &str) {
    if schema.get("type").and_then(Value::as_str) != Some("object") {
        validation.push(format!("{label} 'type' must be 'object'"));
    }
    if schema.get("properties").is_none() {
        validation.push(format!("{label} must have 'properties'"));
    }
}

/// Merge a parameters schema over `{name, description}`, filling missing fields.
fn merge_schema(
    name: Option<&Value>,
    description: Option<&Value>,
    params: Option<&Value>,
) -> Result<Value> {
    let mut schema = serde_json::Map::new();
    schema.insert(
        "name".to_string(),
        name.cloned().unwrap_or_else(|| Value::from("")),
    );
    schema.insert(
        "description".to_string(),
        description.cloned().unwrap_or_else(|| Value::from("")),
    );
    match params {
        None => {}
        Some(Value::Object(fields)) => {
            for (key, value) in fields {
                schema.insert(key.clone(), value.clone());
            }
        }
        Some(_) => {
            return Err(ConvertError::invalid_input(
                "tool parameters schema must be an object",
            ));
        }
    }
    Ok(Value::Object(schema))
}
