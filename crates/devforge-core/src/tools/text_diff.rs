use super::{non_blank, option_param};
use crate::diff::{self, DiffOptions, DiffSummary};
use crate::tool::{
    ParamType, Tool, ToolCategory, ToolDescriptor, ToolError, ToolInput, ToolOutput,
    ToolParameter,
};

/// Line diff of the primary text against the secondary text.
///
/// Metadata: `unchanged`, `deleted`, and `added` line counts.
pub struct TextDiffTool {
    descriptor: ToolDescriptor,
}

impl TextDiffTool {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(
            "text.diff",
            "Text Diff",
            "Compare two texts and show differences line by line.",
            ToolCategory::Other,
        )
        .with_tags(&["text", "diff", "compare", "difference"])
        .with_parameter(
            ToolParameter::new(
                "format",
                "Output Format",
                "Output format: 'unified' or 'sidebyside'",
                ParamType::String,
            )
            .with_default("unified"),
        )
        .with_parameter(
            ToolParameter::new(
                "ignoreWhitespace",
                "Ignore Whitespace",
                "Ignore whitespace differences",
                ParamType::Bool,
            )
            .with_default(false),
        )
        .with_parameter(
            ToolParameter::new(
                "ignoreCase",
                "Ignore Case",
                "Ignore case differences",
                ParamType::Bool,
            )
            .with_default(false),
        );
        Self { descriptor }
    }

    fn run(&self, input: &ToolInput) -> Result<ToolOutput, ToolError> {
        let old = non_blank(input.text.as_deref(), "No text provided for first input.")?;
        let new = non_blank(
            input.secondary_text.as_deref(),
            "No text provided for second input.",
        )?;

        let options = DiffOptions {
            ignore_whitespace: input.param_bool("ignoreWhitespace").unwrap_or(false),
            ignore_case: input.param_bool("ignoreCase").unwrap_or(false),
        };
        let lines = diff::diff_text(old, new, options);
        let summary = DiffSummary::from_lines(&lines);

        // Anything other than "sidebyside" falls back to unified.
        let rendered = match option_param(input, "format", "unified").as_str() {
            "sidebyside" => diff::render_side_by_side(&lines),
            _ => diff::render_unified(&lines),
        };

        Ok(ToolOutput::success(rendered)
            .with_metadata("unchanged", summary.unchanged)
            .with_metadata("deleted", summary.deleted)
            .with_metadata("added", summary.added))
    }
}

impl Default for TextDiffTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for TextDiffTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, input: &ToolInput) -> ToolOutput {
        ToolOutput::from_result(self.run(input))
    }
}
