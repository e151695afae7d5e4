use serde_json::Value;

use super::{NO_INPUT, non_blank, option_param};
use crate::tool::{
    ParamType, Tool, ToolCategory, ToolDescriptor, ToolError, ToolInput, ToolOutput,
    ToolParameter,
};

/// Converts between JSON and YAML.
pub struct JsonYamlTool {
    descriptor: ToolDescriptor,
}

impl JsonYamlTool {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(
            "json.yaml",
            "JSON ⇄ YAML Converter",
            "Convert between JSON and YAML formats.",
            ToolCategory::DataFormat,
        )
        .with_tags(&["json", "yaml", "convert"])
        .with_parameter(
            ToolParameter::new(
                "mode",
                "Conversion Mode",
                "Direction of conversion: 'json-to-yaml' or 'yaml-to-json'",
                ParamType::String,
            )
            .with_default("json-to-yaml"),
        );
        Self { descriptor }
    }

    fn run(&self, input: &ToolInput) -> Result<ToolOutput, ToolError> {
        let text = non_blank(input.text.as_deref(), NO_INPUT)?;
        let mode = option_param(input, "mode", "json-to-yaml");

        let converted = match mode.as_str() {
            "json-to-yaml" => json_to_yaml(text),
            "yaml-to-json" => yaml_to_json(text),
            _ => {
                return Err(ToolError::InvalidParameter(format!(
                    "Invalid mode '{mode}'. Use 'json-to-yaml' or 'yaml-to-json'."
                )));
            }
        };

        converted
            .map(ToolOutput::success)
            .map_err(|e| ToolError::InvalidInput(format!("Conversion error: {e}")))
    }
}

fn json_to_yaml(text: &str) -> Result<String, Box<dyn std::error::Error>> {
    let value: Value = serde_json::from_str(text)?;
    Ok(serde_yaml::to_string(&value)?)
}

fn yaml_to_json(text: &str) -> Result<String, Box<dyn std::error::Error>> {
    let value: Value = serde_yaml::from_str(text)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

impl Default for JsonYamlTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for JsonYamlTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, input: &ToolInput) -> ToolOutput {
        ToolOutput::from_result(self.run(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(input: ToolInput) -> ToolOutput {
        JsonYamlTool::new().execute(&input)
    }

    #[test]
    fn test_json_to_yaml() {
        let out = run(ToolInput::new().with_text(r#"{"name":"devforge","tags":["a","b"]}"#));
        assert_eq!(out.output_text(), Some("name: devforge\ntags:\n- a\n- b\n"));
    }

    #[test]
    fn test_yaml_to_json() {
        let out = run(ToolInput::new()
            .with_text("name: devforge\nport: 5080\n")
            .with_param("mode", "YAML-TO-JSON"));
        assert_eq!(
            out.output_text(),
            Some("{\n  \"name\": \"devforge\",\n  \"port\": 5080\n}")
        );
    }

    #[test]
    fn test_invalid_mode() {
        let out = run(ToolInput::new().with_text("{}").with_param("mode", "xml"));
        assert_eq!(
            out.error_message(),
            Some("Invalid mode 'xml'. Use 'json-to-yaml' or 'yaml-to-json'.")
        );
    }

    #[test]
    fn test_bad_json() {
        let out = run(ToolInput::new().with_text("{oops"));
        assert!(out.error_message().unwrap().starts_with("Conversion error: "));
    }

    #[test]
    fn test_bad_yaml() {
        let out = run(ToolInput::new()
            .with_text("a: [1, 2")
            .with_param("mode", "yaml-to-json"));
        assert!(out.error_message().unwrap().starts_with("Conversion error: "));
    }

    #[test]
    fn test_blank_input() {
        let out = run(ToolInput::new());
        assert_eq!(out.error_message(), Some("No input text provided."));
    }
}
