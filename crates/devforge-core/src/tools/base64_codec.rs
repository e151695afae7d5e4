use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::{NO_INPUT, non_empty, option_param};
use crate::tool::{
    ParamType, Tool, ToolCategory, ToolDescriptor, ToolError, ToolInput, ToolOutput,
    ToolParameter,
};

/// Standard-alphabet Base64 over UTF-8 text.
pub struct Base64Tool {
    descriptor: ToolDescriptor,
}

impl Base64Tool {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(
            "encoding.base64",
            "Base64 Encoder/Decoder",
            "Encode or decode text using Base64.",
            ToolCategory::Encoding,
        )
        .with_tags(&["base64", "encode", "decode"])
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
        let text = non_empty(input.text.as_deref(), NO_INPUT)?;

        match option_param(input, "mode", "encode").as_str() {
            "encode" => Ok(ToolOutput::success(STANDARD.encode(text.as_bytes()))),
            "decode" => {
                let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                let bytes = STANDARD
                    .decode(compact)
                    .map_err(|e| ToolError::InvalidInput(format!("Invalid Base64 format: {e}")))?;
                let decoded = String::from_utf8(bytes).map_err(|e| {
                    ToolError::InvalidInput(format!("Decoded bytes are not valid UTF-8: {e}"))
                })?;
                Ok(ToolOutput::success(decoded))
            }
            other => Err(ToolError::InvalidParameter(format!(
                "Invalid mode '{other}'. Use 'encode' or 'decode'."
            ))),
        }
    }
}

impl Default for Base64Tool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for Base64Tool {
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
        Base64Tool::new().execute(&input)
    }

    #[test]
    fn test_encode() {
        let out = run(ToolInput::new().with_text("Hello, World!"));
        assert_eq!(out.output_text(), Some("SGVsbG8sIFdvcmxkIQ=="));
    }

    #[test]
    fn test_encode_unicode() {
        let out = run(ToolInput::new().with_text("héllo ✓"));
        let back = run(ToolInput::new()
            .with_text(out.output_text().unwrap())
            .with_param("mode", "decode"));
        assert_eq!(back.output_text(), Some("héllo ✓"));
    }

    #[test]
    fn test_decode_ignores_whitespace() {
        let out = run(ToolInput::new()
            .with_text("SGVsbG8s\nIFdvcmxkIQ==\n")
            .with_param("mode", "Decode"));
        assert_eq!(out.output_text(), Some("Hello, World!"));
    }

    #[test]
    fn test_invalid_base64() {
        let out = run(ToolInput::new()
            .with_text("not base64!!")
            .with_param("mode", "decode"));
        assert!(out.error_message().unwrap().starts_with("Invalid Base64 format: "));
    }

    #[test]
    fn test_decoded_not_utf8() {
        // 0xFF 0xFE
        let out = run(ToolInput::new().with_text("//4=").with_param("mode", "decode"));
        assert!(out
            .error_message()
            .unwrap()
            .starts_with("Decoded bytes are not valid UTF-8: "));
    }

    #[test]
    fn test_invalid_mode() {
        let out = run(ToolInput::new().with_text("x").with_param("mode", "rot13"));
        assert_eq!(
            out.error_message(),
            Some("Invalid mode 'rot13'. Use 'encode' or 'decode'.")
        );
    }

    #[test]
    fn test_empty_input() {
        let out = run(ToolInput::new().with_text(""));
        assert_eq!(out.error_message(), Some("No input text provided."));
    }
}
