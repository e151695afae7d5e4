use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::{NO_INPUT, non_blank};
use crate::tool::{
    ParamType, Tool, ToolCategory, ToolDescriptor, ToolError, ToolInput, ToolOutput,
    ToolParameter,
};

const DEFAULT_INDENT: i64 = 2;
const MAX_INDENT: i64 = 16;

/// Pretty-prints or minifies JSON, preserving key order.
pub struct JsonFormatterTool {
    descriptor: ToolDescriptor,
}

impl JsonFormatterTool {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(
            "json.formatter",
            "JSON Formatter",
            "Pretty-print or minify JSON.",
            ToolCategory::DataFormat,
        )
        .with_tags(&["json", "format", "minify", "beautify"])
        .with_parameter(
            ToolParameter::new(
                "indentSize",
                "Indent Size",
                "Number of spaces for indentation.",
                ParamType::Int,
            )
            .with_default(DEFAULT_INDENT),
        )
        .with_parameter(
            ToolParameter::new(
                "minify",
                "Minify",
                "Remove whitespace instead of formatting.",
                ParamType::Bool,
            )
            .with_default(false),
        );
        Self { descriptor }
    }

    fn run(&self, input: &ToolInput) -> Result<ToolOutput, ToolError> {
        let text = non_blank(input.text.as_deref(), NO_INPUT)?;
        let minify = input.param_bool("minify").unwrap_or(false);
        let indent = input.param_int("indentSize").unwrap_or(DEFAULT_INDENT);

        let value: Value = serde_json::from_str(text)
            .map_err(|e| ToolError::InvalidInput(format!("JSON parse error: {e}")))?;

        if minify {
            let out = serde_json::to_string(&value)
                .map_err(|e| ToolError::Execution(e.to_string()))?;
            return Ok(ToolOutput::success(out));
        }

        if !(0..=MAX_INDENT).contains(&indent) {
            return Err(ToolError::InvalidParameter(format!(
                "Invalid indent size '{indent}'. Use a value between 0 and {MAX_INDENT}."
            )));
        }

        Ok(ToolOutput::success(pretty(&value, indent as usize)?))
    }
}

fn pretty(value: &Value, width: usize) -> Result<String, ToolError> {
    let indent = " ".repeat(width);
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    value
        .serialize(&mut ser)
        .map_err(|e| ToolError::Execution(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| ToolError::Execution(e.to_string()))
}

impl Default for JsonFormatterTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for JsonFormatterTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, input: &ToolInput) -> ToolOutput {
        ToolOutput::from_result(self.run(input))
    }
}
