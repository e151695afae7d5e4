//! Stub [`Tool`] implementations for registry and front-end tests.

use devforge_core::{Tool, ToolCategory, ToolDescriptor, ToolInput, ToolOutput};

/// A tool that always returns a fixed reply, or a fixed failure.
pub struct StubTool {
    descriptor: ToolDescriptor,
    reply: Result<String, String>,
}

impl StubTool {
    /// A stub in [`ToolCategory::Other`] that replies with `reply`.
    pub fn new(id: &str, reply: &str) -> Self {
        Self {
            descriptor: ToolDescriptor::new(id, id, format!("Stub tool {id}"), ToolCategory::Other),
            reply: Ok(reply.to_string()),
        }
    }

    /// A stub that always fails with `message`.
    pub fn failing(id: &str, message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            ..Self::new(id, "")
        }
    }

    pub fn with_category(mut self, category: ToolCategory) -> Self {
        self.descriptor.category = category;
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.descriptor.description = description.to_string();
        self
    }
}

impl Tool for StubTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, _input: &ToolInput) -> ToolOutput {
        match &self.reply {
            Ok(text) => ToolOutput::success(text.as_str()),
            Err(message) => ToolOutput::failure(message.as_str()),
        }
    }
}

/// A tool whose `execute` panics, for exercising dispatch guards.
pub struct PanickingTool {
    descriptor: ToolDescriptor,
}

impl PanickingTool {
    pub fn new(id: &str) -> Self {
        Self {
            descriptor: ToolDescriptor::new(id, id, "Always panics", ToolCategory::Other),
        }
    }
}

impl Tool for PanickingTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, _input: &ToolInput) -> ToolOutput {
        panic!("{} panicked on purpose", self.descriptor.id);
    }
}
