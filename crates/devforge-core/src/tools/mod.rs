//! Built-in tool catalog.
//!
//! Each tool builds its [`ToolDescriptor`](crate::tool::ToolDescriptor) once
//! in `new()` and implements its body as a `Result<ToolOutput, ToolError>`,
//! collapsed with [`ToolOutput::from_result`] at the trait boundary.

mod base64_codec;
mod case;
mod color;
mod hash;
mod json_format;
mod json_yaml;
mod jwt;
mod text_diff;
mod timestamp;
mod url_codec;
mod uuid_gen;

use std::sync::Arc;

use regex::Regex;

use crate::tool::{Tool, ToolError, ToolInput};

pub use base64_codec::Base64Tool;
pub use case::CaseConverterTool;
pub use color::ColorConverterTool;
pub use hash::HashTool;
pub use json_format::JsonFormatterTool;
pub use json_yaml::JsonYamlTool;
pub use jwt::JwtDecoderTool;
pub use text_diff::TextDiffTool;
pub use timestamp::TimestampTool;
pub use url_codec::UrlCodecTool;
pub use uuid_gen::UuidTool;

/// Every built-in tool, in registration order.
pub fn builtin_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(JsonFormatterTool::new()),
        Arc::new(JsonYamlTool::new()),
        Arc::new(Base64Tool::new()),
        Arc::new(UrlCodecTool::new()),
        Arc::new(HashTool::new()),
        Arc::new(JwtDecoderTool::new()),
        Arc::new(UuidTool::new()),
        Arc::new(TimestampTool::new()),
        Arc::new(CaseConverterTool::new()),
        Arc::new(ColorConverterTool::new()),
        Arc::new(TextDiffTool::new()),
    ]
}

/// Lowercased string option, or `default` when absent or not a string.
fn option_param(input: &ToolInput, name: &str, default: &str) -> String {
    input
        .param_str(name)
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| default.to_string())
}

/// The primary text, rejecting input that is empty or only whitespace.
fn non_blank<'a>(text: Option<&'a str>, message: &str) -> Result<&'a str, ToolError> {
    match text {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(ToolError::InvalidInput(message.to_string())),
    }
}

/// The primary text, rejecting only empty input.
fn non_empty<'a>(text: Option<&'a str>, message: &str) -> Result<&'a str, ToolError> {
    match text {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(ToolError::InvalidInput(message.to_string())),
    }
}

fn regex(pattern: &str) -> Result<Regex, ToolError> {
    Regex::new(pattern).map_err(|e| ToolError::Execution(e.to_string()))
}

const NO_INPUT: &str = "No input text provided.";
