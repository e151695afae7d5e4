use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use super::non_blank;
use crate::tool::{Tool, ToolCategory, ToolDescriptor, ToolError, ToolInput, ToolOutput};

/// Base64url with optional padding, as found in JWT segments.
const BASE64_URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes the header and payload of a JWT. Signatures are not verified.
pub struct JwtDecoderTool {
    descriptor: ToolDescriptor,
}

impl JwtDecoderTool {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(
            "crypto.jwt",
            "JWT Decoder",
            "Decode JWT tokens and display header and payload in human-readable format.",
            ToolCategory::Crypto,
        )
        .with_tags(&["jwt", "token", "decode", "json", "web", "authentication"]);
        Self { descriptor }
    }

    fn run(&self, input: &ToolInput) -> Result<ToolOutput, ToolError> {
        let token = non_blank(input.text.as_deref(), "No JWT token provided.")?.trim();

        let parts: Vec<&str> = token.split('.').collect();
        let [header, payload, signature] = parts.as_slice() else {
            return Err(ToolError::InvalidInput(
                "Invalid JWT format. Expected format: header.payload.signature".to_string(),
            ));
        };

        let header = decode_segment(header)?;
        let payload = decode_segment(payload)?;

        let out = format!(
            "=== HEADER ===\n{}\n\n=== PAYLOAD ===\n{}\n\n=== SIGNATURE ===\n{signature}\n\n\
             Note: This tool only decodes the JWT. It does NOT verify the signature.\n",
            format_json(&header),
            format_json(&payload),
        );
        Ok(ToolOutput::success(out))
    }
}

fn decode_segment(segment: &str) -> Result<String, ToolError> {
    let bytes = BASE64_URL
        .decode(segment)
        .map_err(|e| ToolError::InvalidInput(format!("JWT decode error: {e}")))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Pretty-print JSON, or return the text unchanged if it is not JSON.
fn format_json(text: &str) -> String {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or_else(|| text.to_string())
}

impl Default for JwtDecoderTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for JwtDecoderTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, input: &ToolInput) -> ToolOutput {
        ToolOutput::from_result(self.run(input))
    }
}
