use crate::error::{ConvertError, Result};
use crate::formats::ToolFormat;
use crate::metadata::{self, ToolMetadata};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_INDENT: usize = 2;

/// Converts a JSON Schema document into provider tool definitions.
#[derive(Debug, Clone)]
pub struct SchemaConverter {
    schema: Map<String, Value>,
}

impl SchemaConverter {
    pub fn new(schema: Value) -> Result<Self> {
        match schema {
            Value::Object(schema) => Ok(Self { schema }),
            _ => Err(ConvertError::invalid_input("Schema must be an object")),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let schema: Value = serde_json::from_str(text)
            .map_err(|err| ConvertError::invalid_input(format!("Invalid JSON: {err}")))?;
        Self::new(schema)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| {
            ConvertError::invalid_input(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::from_json(&text)
    }

    pub fn schema(&self) -> &Map<String, Value> {
        &self.schema
    }

    pub fn metadata(&self) -> Result<ToolMetadata> {
        metadata::extract(&Value::Object(self.schema.clone()))
    }

    /// Convert to the named format (`openai` or `anthropic`).
    pub fn convert(&self, format: &str) -> Result<Value> {
        let format: ToolFormat = format.parse()?;
        self.convert_to(format)
    }

    pub fn convert_to(&self, format: ToolFormat) -> Result<Value> {
        let metadata = self.metadata()?;
        debug!(format = %format, name = %metadata.name, "converting schema");
        format.format(&metadata)
    }

    /// Serialize the converted tool definition with `indent` spaces per level.
    pub fn to_json(&self, format: &str, indent: usize) -> Result<String> {
        let tool = self.convert(format)?;
        to_pretty_json(&tool, indent)
    }
}

pub fn to_pretty_json(value: &Value, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|err| ConvertError::invalid_input(format!("failed to serialize JSON: {err}")))?;
    String::from_utf8(buf)
        .map_err(|err| ConvertError::invalid_input(format!("serialized JSON is not UTF-8: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{INVALID_INPUT, UNSUPPORTED_FORMAT};
    use proptest::prelude::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn weather_schema() -> Value {
        json!({
            "name": "Get Weather",
            "description": "Gets weather",
            "properties": {"city": {"type": "string"}},
            "required": ["city"]
        })
    }

    #[test]
    fn converts_to_openai() {
        let converter = SchemaConverter::new(weather_schema()).expect("converter");
        let tool = converter.convert("openai").expect("tool");
        assert_eq!(
            tool,
            json!({
                "type": "function",
                "function": {
                    "name": "Get_Weather",
                    "description": "Gets weather",
                    "parameters": {
                        "type": "object",
                        "properties": {"city": {"type": "string"}},
                        "required": ["city"]
                    }
                }
            })
        );
    }

    #[test]
    fn converts_to_anthropic() {
        let converter = SchemaConverter::new(weather_schema()).expect("converter");
        let tool = converter.convert("anthropic").expect("tool");
        assert_eq!(
            tool,
            json!({
                "name": "Get_Weather",
                "description": "Gets weather",
                "input_schema": {
                    "type": "object",
                    "properties": {"city": {"type": "string"}},
                    "required": ["city"]
                }
            })
        );
    }

    #[test]
    fn unsupported_format() {
        let converter = SchemaConverter::new(json!({})).expect("converter");
        let err = converter.convert("bogus").expect_err("error");
        assert_eq!(err.kind(), UNSUPPORTED_FORMAT);
    }

    #[test]
    fn rejects_non_object_schema() {
        let err = SchemaConverter::new(json!([])).expect_err("error");
        assert_eq!(err.kind(), INVALID_INPUT);
        let err = SchemaConverter::from_json("\"text\"").expect_err("error");
        assert_eq!(err.kind(), INVALID_INPUT);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SchemaConverter::from_json("{not json").expect_err("error");
        assert_eq!(err.kind(), INVALID_INPUT);
        assert!(err.to_string().starts_with("Invalid JSON"));
    }

    #[test]
    fn from_file_reads_schema() {
        let mut file = NamedTempFile::new().expect("tempfile");
        write!(file, "{}", weather_schema()).expect("write");
        let converter = SchemaConverter::from_file(file.path()).expect("converter");
        assert_eq!(converter.metadata().expect("metadata").name, "Get_Weather");
    }

    #[test]
    fn from_file_missing_path() {
        let err = SchemaConverter::from_file("/tmp/definitely-missing-schema.json")
            .expect_err("error");
        assert_eq!(err.kind(), INVALID_INPUT);
    }

    #[test]
    fn to_json_preserves_key_order_and_indent() {
        let converter =
            SchemaConverter::new(json!({"name": "t", "properties": {}})).expect("converter");
        let text = converter.to_json("anthropic", 4).expect("json");
        let expected = "{\n    \"name\": \"t\",\n    \"description\": \"\",\n    \"input_schema\": {\n        \"type\": \"object\",\n        \"properties\": {}\n    }\n}";
        assert_eq!(text, expected);
    }

    #[test]
    fn to_json_default_indent() {
        let converter = SchemaConverter::new(weather_schema()).expect("converter");
        let text = converter.to_json("openai", DEFAULT_INDENT).expect("json");
        assert!(text.starts_with("{\n  \"type\": \"function\",\n  \"function\": {\n    \"name\""));
    }

    proptest! {
        #[test]
        fn converted_tools_validate(
            name in "[A-Za-z0-9 _-]{0,24}",
            description in ".{0,32}",
            props in proptest::collection::btree_map("[a-z]{1,8}", Just(json!({"type": "string"})), 0..4),
        ) {
            let schema = json!({"name": name, "description": description, "properties": props});
            let converter = SchemaConverter::new(schema).expect("converter");
            for format in ToolFormat::SUPPORTED {
                let tool = converter.convert_to(format).expect("tool");
                let validation = format.validate(&tool);
                prop_assert!(validation.is_valid(), "{:?}", validation.errors);
            }
        }

        #[test]
        fn any_unknown_format_is_unsupported(format in "[a-z]{1,12}") {
            prop_assume!(format != "openai" && format != "anthropic");
            let converter = SchemaConverter::new(json!({})).expect("converter");
            let err = converter.convert(&format).expect_err("error");
            prop_assert_eq!(err.kind(), UNSUPPORTED_FORMAT);
        }
    }
}
