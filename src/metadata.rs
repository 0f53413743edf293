//! Canonical tool metadata extracted from a schema document.

use crate::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

pub const DEFAULT_TOOL_NAME: &str = "unnamed_tool";

/// Provider-agnostic `{name, description, parameters}` triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolMetadata {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Extract canonical metadata from a schema document.
///
/// The parameters object is taken from the first source that applies:
/// a top-level `properties` key (the document is itself the parameters
/// schema), a nested `parameters` value (used verbatim), or the whole
/// document minus its `name`, `title` and `description` keys.
pub fn extract(schema: &Value) -> Result<ToolMetadata> {
    let obj = schema
        .as_object()
        .ok_or_else(|| ConvertError::invalid_input("Schema must be an object"))?;

    let raw_name = match optional_str(obj, "name")? {
        Some(name) => name,
        None => optional_str(obj, "title")?.unwrap_or(DEFAULT_TOOL_NAME),
    };
    let description = optional_str(obj, "description")?.unwrap_or_default();

    let parameters = if let Some(properties) = obj.get("properties") {
        debug!("building parameters from top-level properties");
        let mut params = Map::new();
        params.insert("type".to_string(), json!("object"));
        params.insert("properties".to_string(), properties.clone());
        if let Some(required) = obj.get("required") {
            params.insert("required".to_string(), required.clone());
        }
        if let Some(additional) = obj.get("additionalProperties")
            && !additional.is_null()
        {
            params.insert("additionalProperties".to_string(), additional.clone());
        }
        Value::Object(params)
    } else if let Some(parameters) = obj.get("parameters") {
        debug!("using nested parameters verbatim");
        parameters.clone()
    } else {
        debug!("treating whole document as parameters");
        let mut params: Map<String, Value> = obj
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "name" | "title" | "description"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if !params.contains_key("type") {
            params.insert("type".to_string(), json!("object"));
        }
        Value::Object(params)
    };

    Ok(ToolMetadata {
        name: normalize_name(raw_name),
        description: description.to_string(),
        parameters,
    })
}

/// Normalize a name into a valid function identifier.
pub fn normalize_name(name: &str) -> String {
    let mut normalized: String = name
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if normalized.starts_with(|c: char| c.is_ascii_digit()) {
        normalized.insert(0, '_');
    }
    if normalized.is_empty() {
        return DEFAULT_TOOL_NAME.to_string();
    }
    normalized
}

fn optional_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(_) => Err(ConvertError::invalid_input(format!(
            "Schema '{key}' must be a string"
        ))),
    }
}
