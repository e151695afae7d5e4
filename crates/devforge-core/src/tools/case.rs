use super::{NO_INPUT, non_blank, option_param, regex};
use crate::tool::{
    ParamType, Tool, ToolCategory, ToolDescriptor, ToolError, ToolInput, ToolOutput,
    ToolParameter,
};

/// Converts identifiers and phrases between naming conventions.
pub struct CaseConverterTool {
    descriptor: ToolDescriptor,
}

impl CaseConverterTool {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(
            "text.case",
            "String Case Converter",
            "Convert strings between different case formats (camelCase, PascalCase, snake_case, kebab-case, etc.).",
            ToolCategory::Other,
        )
        .with_tags(&["string", "case", "camel", "pascal", "snake", "kebab", "convert"])
        .with_parameter(
            ToolParameter::new(
                "targetCase",
                "Target Case",
                "Target case format: 'camel', 'pascal', 'snake', 'kebab', 'upper', 'lower', 'title'",
                ParamType::String,
            )
            .with_default("camel"),
        );
        Self { descriptor }
    }

    fn run(&self, input: &ToolInput) -> Result<ToolOutput, ToolError> {
        let text = non_blank(input.text.as_deref(), NO_INPUT)?;
        let target = option_param(input, "targetCase", "camel");

        let converted = match target.as_str() {
            "upper" => text.to_uppercase(),
            "lower" => text.to_lowercase(),
            "camel" => {
                let words = split_words(text)?;
                let mut out = String::new();
                for (i, word) in words.iter().enumerate() {
                    if i == 0 {
                        out.push_str(&word.to_lowercase());
                    } else {
                        out.push_str(&capitalize(word));
                    }
                }
                out
            }
            "pascal" => split_words(text)?.iter().map(|w| capitalize(w)).collect(),
            "snake" => join_lower(&split_words(text)?, "_"),
            "kebab" => join_lower(&split_words(text)?, "-"),
            "title" => split_words(text)?
                .iter()
                .map(|w| capitalize(w))
                .collect::<Vec<_>>()
                .join(" "),
            _ => {
                return Err(ToolError::InvalidParameter(format!(
                    "Conversion error: Invalid target case '{target}'. Use 'camel', 'pascal', \
                     'snake', 'kebab', 'upper', 'lower', or 'title'."
                )));
            }
        };
        Ok(ToolOutput::success(converted))
    }
}

/// Split on camel humps, acronym boundaries, `_`, `-`, and whitespace.
fn split_words(text: &str) -> Result<Vec<String>, ToolError> {
    let humps = regex(r"([a-z])([A-Z])")?;
    let acronyms = regex(r"([A-Z]+)([A-Z][a-z])")?;

    let spaced = humps.replace_all(text, "${1} ${2}");
    let spaced = acronyms.replace_all(&spaced, "${1} ${2}");

    Ok(spaced
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

fn join_lower(words: &[String], sep: &str) -> String {
    words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(sep)
}

impl Default for CaseConverterTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for CaseConverterTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, input: &ToolInput) -> ToolOutput {
        ToolOutput::from_result(self.run(input))
    }
}
