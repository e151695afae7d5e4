use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use super::{NO_INPUT, non_empty, option_param};
use crate::tool::{
    ParamType, Tool, ToolCategory, ToolDescriptor, ToolError, ToolInput, ToolOutput,
    ToolParameter,
};

/// Hex digest of UTF-8 text.
///
/// Metadata: `algorithm` (uppercased name) and `length` (digest size in bits).
pub struct HashTool {
    descriptor: ToolDescriptor,
}

impl HashTool {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(
            "crypto.hash",
            "Hash Calculator",
            "Calculate MD5, SHA-1, SHA-256, or SHA-512 hashes.",
            ToolCategory::Crypto,
        )
        .with_tags(&["hash", "md5", "sha1", "sha256", "sha512", "checksum"])
        .with_parameter(
            ToolParameter::new(
                "algorithm",
                "Algorithm",
                "Hash algorithm: 'md5', 'sha1', 'sha256', or 'sha512'",
                ParamType::String,
            )
            .with_default("sha256"),
        )
        .with_parameter(
            ToolParameter::new(
                "uppercase",
                "Uppercase",
                "Output hash in uppercase",
                ParamType::Bool,
            )
            .with_default(false),
        );
        Self { descriptor }
    }

    fn run(&self, input: &ToolInput) -> Result<ToolOutput, ToolError> {
        let text = non_empty(input.text.as_deref(), NO_INPUT)?;
        let algorithm = option_param(input, "algorithm", "sha256");
        let uppercase = input.param_bool("uppercase").unwrap_or(false);

        let bytes = text.as_bytes();
        let digest = match algorithm.as_str() {
            "md5" => Md5::digest(bytes).to_vec(),
            "sha1" => Sha1::digest(bytes).to_vec(),
            "sha256" => Sha256::digest(bytes).to_vec(),
            "sha512" => Sha512::digest(bytes).to_vec(),
            _ => {
                return Err(ToolError::InvalidParameter(format!(
                    "Invalid algorithm '{algorithm}'. Use 'md5', 'sha1', 'sha256', or 'sha512'."
                )));
            }
        };

        let hex = if uppercase {
            hex::encode_upper(&digest)
        } else {
            hex::encode(&digest)
        };

        Ok(ToolOutput::success(hex)
            .with_metadata("algorithm", algorithm.to_uppercase())
            .with_metadata("length", digest.len() * 8))
    }
}

impl Default for HashTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for HashTool {
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
    use crate::tool::ParamValue;
    use pretty_assertions::assert_eq;

    fn hash(text: &str, algorithm: &str) -> ToolOutput {
        HashTool::new().execute(&ToolInput::new().with_text(text).with_param("algorithm", algorithm))
    }

    #[test]
    fn test_known_digests() {
        assert_eq!(
            hash("hello", "md5").output_text(),
            Some("5d41402abc4b2a76b9719d911017c592")
        );
        assert_eq!(
            hash("hello", "sha1").output_text(),
            Some("aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d")
        );
        assert_eq!(
            hash("hello", "SHA256").output_text(),
            Some("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
        );
        assert_eq!(hash("hello", "sha512").output_text().map(str::len), Some(128));
    }

    #[test]
    fn test_default_is_sha256() {
        let out = HashTool::new().execute(&ToolInput::new().with_text("hello"));
        assert_eq!(out.metadata().get("algorithm"), Some(&ParamValue::from("SHA256")));
        assert_eq!(out.metadata().get("length"), Some(&ParamValue::Int(256)));
    }

    #[test]
    fn test_uppercase() {
        let out = HashTool::new().execute(
            &ToolInput::new()
                .with_text("hello")
                .with_param("algorithm", "md5")
                .with_param("uppercase", true),
        );
        assert_eq!(out.output_text(), Some("5D41402ABC4B2A76B9719D911017C592"));
        assert_eq!(out.metadata().get("length"), Some(&ParamValue::Int(128)));
    }

    #[test]
    fn test_invalid_algorithm() {
        let out = hash("hello", "crc32");
        assert_eq!(
            out.error_message(),
            Some("Invalid algorithm 'crc32'. Use 'md5', 'sha1', 'sha256', or 'sha512'.")
        );
    }

    #[test]
    fn test_empty_input() {
        let out = hash("", "md5");
        assert_eq!(out.error_message(), Some("No input text provided."));
    }
}
