use super::{NO_INPUT, non_blank, option_param};
use crate::tool::{
    ParamType, Tool, ToolCategory, ToolDescriptor, ToolError, ToolInput, ToolOutput,
    ToolParameter,
};

/// Percent-encoding of URL components. Only RFC 3986 unreserved characters
/// pass through unencoded.
pub struct UrlCodecTool {
    descriptor: ToolDescriptor,
}

impl UrlCodecTool {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(
            "encoding.url",
            "URL Encoder/Decoder",
            "Encode or decode URL strings (percent encoding).",
            ToolCategory::Encoding,
        )
        .with_tags(&["url", "encode", "decode", "percent", "uri"])
        .with_parameter(
            ToolParameter::new(
                "mode",
                "Mode",
                "Operation mode: 'encode' or 'decode'",
                ParamType::String,
            )
            .with_default("encode"),
        );
        Self { descriptor }
    }

    fn run(&self, input: &ToolInput) -> Result<ToolOutput, ToolError> {
        let text = non_blank(input.text.as_deref(), NO_INPUT)?;
        let mode = option_param(input, "mode", "encode");

        let result = match mode.as_str() {
            "encode" => Ok(urlencoding::encode(text).into_owned()),
            "decode" => urlencoding::decode(text)
                .map(|s| s.into_owned())
                .map_err(|e| e.to_string()),
            _ => Err(format!("Invalid mode '{mode}'. Use 'encode' or 'decode'.")),
        };

        result
            .map(ToolOutput::success)
            .map_err(|e| ToolError::InvalidInput(format!("URL {mode} error: {e}")))
    }
}

impl Default for UrlCodecTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for UrlCodecTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, input: &ToolInput) -> ToolOutput {
        ToolOutput::from_result(self.run(input))
    }
}
