//! OpenAI function calling format.

use super::{Validation, check_object_schema, merge_schema};
use crate::error::{ConvertError, Result};
use crate::metadata::ToolMetadata;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiTool {
    /// Always "function"
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: OpenAiFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

pub fn format(metadata: &ToolMetadata) -> OpenAiTool {
    OpenAiTool {
        tool_type: "function".to_string(),
        function: OpenAiFunction {
            name: metadata.name.clone(),
            description: metadata.description.clone(),
            parameters: metadata.parameters.clone(),
        },
    }
}

pub fn validate(tool: &Value) -> Validation {
    let Some(obj) = tool.as_object() else {
        return Validation::rejected("Tool must be an object");
    };

    let mut validation = Validation::default();
    if obj.get("type").and_then(Value::as_str) != Some("function") {
        validation.push("Tool 'type' must be 'function'");
    }

    let Some(function) = obj.get("function") else {
        validation.push("Tool must have a 'function' field");
        return validation;
    };
    let Some(function) = function.as_object() else {
        validation.push("'function' must be an object");
        return validation;
    };

    match function.get("name") {
        None => validation.push("Function must have a 'name' field"),
        Some(Value::String(name)) if name.is_empty() => {
            validation.push("Function 'name' cannot be empty")
        }
        Some(Value::String(_)) => {}
        Some(_) => validation.push("Function 'name' must be a string"),
    }

    if let Some(description) = function.get("description")
        && !description.is_string()
    {
        validation.push("Function 'description' must be a string");
    }

    match function.get("parameters") {
        None => validation.push("Function must have a 'parameters' field"),
        Some(params) if params.is_object() => {
            check_object_schema(&mut validation, params, "Function parameters")
        }
        Some(_) => validation.push("Function 'parameters' must be an object"),
    }

    validation
}

/// Rebuild a flat schema document from an OpenAI tool. Lossy: a schema that
/// was not built from top-level `properties` will not come back unchanged.
pub fn extract_schema(tool: &Value) -> Result<Value> {
    let obj = tool
        .as_object()
        .ok_or_else(|| ConvertError::invalid_input("Tool must be an object"))?;
    let function = match obj.get("function") {
        None => None,
        Some(Value::Object(function)) => Some(function),
        Some(_) => return Err(ConvertError::invalid_input("'function' must be an object")),
    };
    merge_schema(
        function.and_then(|f| f.get("name")),
        function.and_then(|f| f.get("description")),
        function.and_then(|f| f.get("parameters")),
    )
}
