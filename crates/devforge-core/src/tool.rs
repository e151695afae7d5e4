//! Tool contract: descriptors, the execution envelope, and the [`Tool`] trait.
//!
//! Every utility in the catalog is a stateless service implementing [`Tool`].
//! Front ends never see a tool's internals; they read its [`ToolDescriptor`],
//! build a [`ToolInput`] from raw request data, and receive a [`ToolOutput`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::error;

// ── Parameter values ────────────────────────────────────────────────────

/// A parameter or metadata value.
///
/// Serialized untagged: `true`, `3`, `"text"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl ParamValue {
    /// Infer a value from a raw command-line token.
    ///
    /// Tries an integer first, then `true`/`false` (any case), and falls
    /// back to the trimmed text.
    pub fn infer(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(n) = raw.parse::<i64>() {
            return Self::Int(n);
        }
        if raw.eq_ignore_ascii_case("true") {
            return Self::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return Self::Bool(false);
        }
        Self::String(raw.to_string())
    }

    /// Convert an arbitrary JSON value.
    ///
    /// Floats become their JSON text, arrays and objects their compact JSON
    /// text. `null` has no representation and yields `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::String(n.to_string()),
            }),
            Value::String(s) => Some(Self::String(s.clone())),
            other => Some(Self::String(other.to_string())),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<usize> for ParamValue {
    fn from(n: usize) -> Self {
        Self::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

// ── Descriptor model ────────────────────────────────────────────────────

/// Closed set of tool categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToolCategory {
    DataFormat,
    Encoding,
    Crypto,
    Generation,
    Time,
    Other,
}

impl ToolCategory {
    pub const ALL: [ToolCategory; 6] = [
        Self::DataFormat,
        Self::Encoding,
        Self::Crypto,
        Self::Generation,
        Self::Time,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataFormat => "DataFormat",
            Self::Encoding => "Encoding",
            Self::Crypto => "Crypto",
            Self::Generation => "Generation",
            Self::Time => "Time",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a category name matches no [`ToolCategory`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for ToolCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Informational type tag of a parameter. Not enforced at dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Int,
    Bool,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a tool's parameter schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolParameter {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub param_type: ParamType,
    pub default: Option<ParamValue>,
}

impl ToolParameter {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        param_type: ParamType,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            description: description.into(),
            param_type,
            default: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Static metadata describing a tool. Built once in the tool's constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// Stable identifier, compared case-insensitively (e.g. `"encoding.base64"`).
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub category: ToolCategory,
    pub tags: Vec<String>,
    pub parameters: Vec<ToolParameter>,
}

impl ToolDescriptor {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        category: ToolCategory,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            description: description.into(),
            category,
            tags: Vec::new(),
            parameters: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags.extend(tags.iter().map(|t| t.to_string()));
        self
    }

    pub fn with_parameter(mut self, parameter: ToolParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Look up a parameter by exact name.
    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

// ── Execution envelope ──────────────────────────────────────────────────

/// Input to a single tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolInput {
    pub text: Option<String>,
    /// Second input for two-input tools such as `text.diff`.
    pub secondary_text: Option<String>,
    pub parameters: HashMap<String, ParamValue>,
}

impl ToolInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_secondary_text(mut self, text: impl Into<String>) -> Self {
        self.secondary_text = Some(text.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Primary text, or `""` when absent.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Secondary text, or `""` when absent.
    pub fn secondary_text(&self) -> &str {
        self.secondary_text.as_deref().unwrap_or_default()
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.get(name)
    }

    /// The named parameter, if present and a string.
    pub fn param_str(&self, name: &str) -> Option<&str> {
        self.param(name).and_then(ParamValue::as_str)
    }

    /// The named parameter, if present and an integer.
    pub fn param_int(&self, name: &str) -> Option<i64> {
        self.param(name).and_then(ParamValue::as_int)
    }

    /// The named parameter, if present and a boolean.
    pub fn param_bool(&self, name: &str) -> Option<bool> {
        self.param(name).and_then(ParamValue::as_bool)
    }
}

/// Result of a single tool invocation.
///
/// Either successful with output text, or failed with an error message;
/// the constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    success: bool,
    output_text: Option<String>,
    secondary_output_text: Option<String>,
    error_message: Option<String>,
    metadata: BTreeMap<String, ParamValue>,
}

impl ToolOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            success: true,
            output_text: Some(text.into()),
            secondary_output_text: None,
            error_message: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output_text: None,
            secondary_output_text: None,
            error_message: Some(message.into()),
            metadata: BTreeMap::new(),
        }
    }

    /// Collapse a fallible tool body into an output.
    pub fn from_result(result: Result<ToolOutput, ToolError>) -> Self {
        result.unwrap_or_else(|e| Self::failure(e.to_string()))
    }

    /// Attach secondary output text. Ignored on a failed output.
    pub fn with_secondary(mut self, text: impl Into<String>) -> Self {
        if self.success {
            self.secondary_output_text = Some(text.into());
        }
        self
    }

    /// Attach a metadata entry. Ignored on a failed output.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        if self.success {
            self.metadata.insert(key.into(), value.into());
        }
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn output_text(&self) -> Option<&str> {
        self.output_text.as_deref()
    }

    pub fn secondary_output_text(&self) -> Option<&str> {
        self.secondary_output_text.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn metadata(&self) -> &BTreeMap<String, ParamValue> {
        &self.metadata
    }
}

/// Failure inside a tool body. The `Display` text becomes the error message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("{0}")]
    Execution(String),
}

// ── Tool contract ───────────────────────────────────────────────────────

/// A stateless developer utility.
///
/// Implementations must be pure functions of their input and must report
/// every failure through [`ToolOutput::failure`] instead of panicking.
pub trait Tool: Send + Sync {
    /// Static metadata. Returns the same value on every call.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Run the tool.
    fn execute(&self, input: &ToolInput) -> ToolOutput;

    fn id(&self) -> &str {
        &self.descriptor().id
    }
}

/// Run a tool, turning a panic into a failed output.
///
/// Front ends dispatch through this so a misbehaving tool cannot take the
/// process down with it.
pub fn execute_guarded(tool: &dyn Tool, input: &ToolInput) -> ToolOutput {
    match panic::catch_unwind(AssertUnwindSafe(|| tool.execute(input))) {
        Ok(output) => output,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!(tool = %tool.id(), %reason, "Tool panicked during execution");
            ToolOutput::failure(format!("Tool '{}' failed unexpectedly: {reason}", tool.id()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Echo {
        descriptor: ToolDescriptor,
    }

    impl Echo {
        fn new() -> Self {
            Self {
                descriptor: ToolDescriptor::new("test.echo", "Echo", "Echoes", ToolCategory::Other),
            }
        }
    }

    impl Tool for Echo {
        fn descriptor(&self) -> &ToolDescriptor {
            &self.descriptor
        }

        fn execute(&self, input: &ToolInput) -> ToolOutput {
            if input.text() == "boom" {
                panic!("kaboom");
            }
            ToolOutput::success(input.text())
        }
    }

    #[test]
    fn test_infer_param_value() {
        assert_eq!(ParamValue::infer("42"), ParamValue::Int(42));
        assert_eq!(ParamValue::infer(" -7 "), ParamValue::Int(-7));
        assert_eq!(ParamValue::infer("TRUE"), ParamValue::Bool(true));
        assert_eq!(ParamValue::infer("false"), ParamValue::Bool(false));
        assert_eq!(ParamValue::infer("sha256"), ParamValue::String("sha256".into()));
        assert_eq!(ParamValue::infer("1.5"), ParamValue::String("1.5".into()));
    }

    #[test]
    fn test_param_value_from_json() {
        use serde_json::json;

        assert_eq!(ParamValue::from_json(&json!(3)), Some(ParamValue::Int(3)));
        assert_eq!(ParamValue::from_json(&json!(true)), Some(ParamValue::Bool(true)));
        assert_eq!(ParamValue::from_json(&json!("x")), Some("x".into()));
        assert_eq!(ParamValue::from_json(&json!(2.5)), Some("2.5".into()));
        assert_eq!(ParamValue::from_json(&json!(null)), None);
        assert_eq!(ParamValue::from_json(&json!([1, 2])), Some("[1,2]".into()));
    }

    #[test]
    fn test_param_value_serializes_untagged() {
        let values = vec![ParamValue::Bool(true), ParamValue::Int(3), "x".into()];
        assert_eq!(serde_json::to_string(&values).unwrap(), r#"[true,3,"x"]"#);
    }

    #[test]
    fn test_category_parse_case_insensitive() {
        assert_eq!("dataformat".parse::<ToolCategory>(), Ok(ToolCategory::DataFormat));
        assert_eq!("CRYPTO".parse::<ToolCategory>(), Ok(ToolCategory::Crypto));
        assert!("bogus".parse::<ToolCategory>().is_err());
        assert_eq!(ToolCategory::Generation.to_string(), "Generation");
    }

    #[test]
    fn test_category_order() {
        let mut cats = vec![ToolCategory::Other, ToolCategory::DataFormat, ToolCategory::Time];
        cats.sort();
        assert_eq!(
            cats,
            vec![ToolCategory::DataFormat, ToolCategory::Time, ToolCategory::Other]
        );
    }

    #[test]
    fn test_typed_accessors_require_matching_variant() {
        let input = ToolInput::new()
            .with_param("count", 5)
            .with_param("flag", true)
            .with_param("mode", "decode");

        assert_eq!(input.param_int("count"), Some(5));
        assert_eq!(input.param_str("count"), None);
        assert_eq!(input.param_bool("flag"), Some(true));
        assert_eq!(input.param_int("flag"), None);
        assert_eq!(input.param_str("mode"), Some("decode"));
        assert_eq!(input.param_str("missing"), None);
    }

    #[test]
    fn test_output_success_invariant() {
        let out = ToolOutput::success("done")
            .with_secondary("extra")
            .with_metadata("length", 256);
        assert!(out.is_success());
        assert_eq!(out.output_text(), Some("done"));
        assert_eq!(out.secondary_output_text(), Some("extra"));
        assert_eq!(out.error_message(), None);
        assert_eq!(out.metadata().get("length"), Some(&ParamValue::Int(256)));
    }

    #[test]
    fn test_output_failure_invariant() {
        let out = ToolOutput::failure("nope")
            .with_secondary("ignored")
            .with_metadata("k", "v");
        assert!(!out.is_success());
        assert_eq!(out.output_text(), None);
        assert_eq!(out.secondary_output_text(), None);
        assert_eq!(out.error_message(), Some("nope"));
        assert!(out.metadata().is_empty());
    }

    #[test]
    fn test_from_result() {
        let failed = ToolOutput::from_result(Err(ToolError::InvalidInput("bad".into())));
        assert_eq!(failed.error_message(), Some("bad"));

        let ok = ToolOutput::from_result(Ok(ToolOutput::success("fine")));
        assert_eq!(ok.output_text(), Some("fine"));
    }

    #[test]
    fn test_default_id_reads_descriptor() {
        assert_eq!(Echo::new().id(), "test.echo");
    }

    #[test]
    fn test_execute_guarded_passes_through() {
        let tool = Echo::new();
        let out = execute_guarded(&tool, &ToolInput::new().with_text("hi"));
        assert_eq!(out.output_text(), Some("hi"));
    }

    #[test]
    fn test_execute_guarded_catches_panic() {
        let tool = Echo::new();
        let out = execute_guarded(&tool, &ToolInput::new().with_text("boom"));
        assert!(!out.is_success());
        assert_eq!(
            out.error_message(),
            Some("Tool 'test.echo' failed unexpectedly: kaboom")
        );
    }
}
