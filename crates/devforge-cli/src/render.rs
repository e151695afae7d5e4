//! Plain-text rendering for `list` and `describe`.

use std::fmt::Write;

use devforge_core::{ToolCategory, ToolDescriptor, ToolRegistry};

/// Tools grouped by category in enum order, sorted by id within a group.
pub fn tool_list(registry: &ToolRegistry, category: Option<ToolCategory>) -> String {
    let mut out = String::from("Available tools:\n\n");
    let mut current: Option<ToolCategory> = None;

    for tool in registry.sorted() {
        let d = tool.descriptor();
        if category.is_some_and(|c| c != d.category) {
            continue;
        }
        if current != Some(d.category) {
            if current.is_some() {
                out.push('\n');
            }
            let _ = writeln!(out, "{}:", d.category);
            current = Some(d.category);
        }
        let _ = writeln!(out, "  {:<25} {}", d.id, d.display_name);
        let _ = writeln!(out, "    {}", d.description);
    }
    if current.is_some() {
        out.push('\n');
    }
    out
}

/// Full description of one tool, parameters included.
pub fn describe(d: &ToolDescriptor) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tool: {}", d.display_name);
    let _ = writeln!(out, "ID: {}", d.id);
    let _ = writeln!(out, "Category: {}", d.category);
    let _ = writeln!(out, "Description: {}", d.description);

    if !d.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", d.tags.join(", "));
    }

    if !d.parameters.is_empty() {
        out.push_str("\nParameters:\n");
        for p in &d.parameters {
            let default = p
                .default
                .as_ref()
                .map_or_else(|| "none".to_string(), ToString::to_string);
            let _ = writeln!(out, "  --{} ({})", p.name, p.param_type);
            let _ = writeln!(out, "    {}", p.description);
            let _ = writeln!(out, "    Default: {default}");
        }
    }
    out
}

/// Comma-separated category names, for error hints.
pub fn category_names() -> String {
    ToolCategory::ALL
        .iter()
        .map(ToolCategory::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use devforge_core::{ParamType, Tool, ToolParameter};
    use devforge_test_utils::StubTool;
    use pretty_assertions::assert_eq;

    fn registry() -> ToolRegistry {
        let tools: Vec<Arc<dyn Tool>> = vec![
            Arc::new(StubTool::new("text.b", "").with_description("Second")),
            Arc::new(
                StubTool::new("crypto.a", "")
                    .with_category(ToolCategory::Crypto)
                    .with_description("First"),
            ),
            Arc::new(StubTool::new("text.a", "").with_description("Third")),
        ];
        ToolRegistry::build(tools, None)
    }

    #[test]
    fn test_list_groups_in_category_order() {
        let expected = "Available tools:\n\n\
            Crypto:\n  crypto.a                  crypto.a\n    First\n\n\
            Other:\n  text.a                    text.a\n    Third\n  \
            text.b                    text.b\n    Second\n\n";
        assert_eq!(tool_list(&registry(), None), expected);
    }

    #[test]
    fn test_list_with_category_filter() {
        let out = tool_list(&registry(), Some(ToolCategory::Crypto));
        assert!(out.contains("crypto.a"));
        assert!(!out.contains("text.a"));
        assert!(!out.contains("Other:"));
    }

    #[test]
    fn test_list_empty_category() {
        assert_eq!(tool_list(&registry(), Some(ToolCategory::Time)), "Available tools:\n\n");
    }

    #[test]
    fn test_describe_with_parameters() {
        let descriptor = ToolDescriptor::new("demo.tool", "Demo", "Does demo things", ToolCategory::Other)
            .with_tags(&["demo", "test"])
            .with_parameter(
                ToolParameter::new("count", "Count", "How many", ParamType::Int).with_default(3),
            )
            .with_parameter(ToolParameter::new("label", "Label", "Optional label", ParamType::String));

        let expected = "Tool: Demo\n\
            ID: demo.tool\n\
            Category: Other\n\
            Description: Does demo things\n\
            Tags: demo, test\n\
            \n\
            Parameters:\n  --count (int)\n    How many\n    Default: 3\n  \
            --label (string)\n    Optional label\n    Default: none\n";
        assert_eq!(describe(&descriptor), expected);
    }

    #[test]
    fn test_describe_without_tags_or_parameters() {
        let descriptor = ToolDescriptor::new("x", "X", "Plain", ToolCategory::Time);
        assert_eq!(describe(&descriptor), "Tool: X\nID: x\nCategory: Time\nDescription: Plain\n");
    }

    #[test]
    fn test_category_names() {
        assert_eq!(
            category_names(),
            "DataFormat, Encoding, Crypto, Generation, Time, Other"
        );
    }
}
