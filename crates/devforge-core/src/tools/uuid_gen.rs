use uuid::Uuid;

use crate::tool::{
    ParamType, Tool, ToolCategory, ToolDescriptor, ToolError, ToolInput, ToolOutput,
    ToolParameter,
};

const MAX_COUNT: i64 = 100;

/// Generates random (v4) UUIDs. Ignores input text.
pub struct UuidTool {
    descriptor: ToolDescriptor,
}

impl UuidTool {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(
            "generation.uuid",
            "UUID Generator",
            "Generate random UUIDs (v4).",
            ToolCategory::Generation,
        )
        .with_tags(&["uuid", "guid", "generate", "random"])
        .with_parameter(
            ToolParameter::new(
                "count",
                "Count",
                "Number of UUIDs to generate",
                ParamType::Int,
            )
            .with_default(1),
        )
        .with_parameter(
            ToolParameter::new(
                "uppercase",
                "Uppercase",
                "Generate UUIDs in uppercase",
                ParamType::Bool,
            )
            .with_default(false),
        );
        Self { descriptor }
    }

    fn run(&self, input: &ToolInput) -> Result<ToolOutput, ToolError> {
        let count = match input.param_int("count") {
            Some(n) if n > 0 => n,
            _ => 1,
        };
        if count > MAX_COUNT {
            return Err(ToolError::InvalidParameter(format!(
                "Maximum count is {MAX_COUNT} UUIDs."
            )));
        }
        let uppercase = input.param_bool("uppercase").unwrap_or(false);

        let ids: Vec<String> = (0..count)
            .map(|_| {
                let id = Uuid::new_v4().hyphenated().to_string();
                if uppercase { id.to_uppercase() } else { id }
            })
            .collect();
        Ok(ToolOutput::success(ids.join("\n")))
    }
}

impl Default for UuidTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for UuidTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, input: &ToolInput) -> ToolOutput {
        ToolOutput::from_result(self.run(input))
    }
}
