//! Anthropic tool use format.

use super::{Validation, check_object_schema, merge_schema};
use crate::error::{ConvertError, Result};
use crate::metadata::ToolMetadata;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropicTool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

pub fn format(metadata: &ToolMetadata) -> AnthropicTool {
    AnthropicTool {
        name: metadata.name.clone(),
        description: metadata.description.clone(),
        input_schema: metadata.parameters.clone(),
    }
}

pub fn validate(tool: &Value) -> Validation {
    let Some(obj) = tool.as_object() else {
        return Validation::rejected("Tool must be an object");
    };

    let mut validation = Validation::default();
    match obj.get("name") {
        None => validation.push("Tool must have a 'name' field"),
        Some(Value::String(name)) if name.is_empty() => {
            validation.push("Tool 'name' cannot be empty")
        }
        Some(Value::String(_)) => {}
        Some(_) => validation.push("Tool 'name' must be a string"),
    }

    if let Some(description) = obj.get("description")
        && !description.is_string()
    {
        validation.push("Tool 'description' must be a string");
    }

    match obj.get("input_schema") {
        None => validation.push("Tool must have an 'input_schema' field"),
        Some(schema) if schema.is_object() => {
            check_object_schema(&mut validation, schema, "Tool input_schema")
        }
        Some(_) => validation.push("Tool 'input_schema' must be an object"),
    }

    validation
}

/// Rebuild a flat schema document from an Anthropic tool. Same lossiness as
/// the OpenAI direction.
pub fn extract_schema(tool: &Value) -> Result<Value> {
    let obj = tool
        .as_object()
        .ok_or_else(|| ConvertError::invalid_input("Tool must be an object"))?;
    merge_schema(obj.get("name"), obj.get("description"), obj.get("input_schema"))
}
