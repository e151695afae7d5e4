//! Request/response bodies for the HTTP API, serialized as camelCase JSON.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::tool::{ParamValue, ToolDescriptor, ToolInput, ToolOutput, ToolParameter};

/// Public view of a tool's descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptorDto {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub parameters: Vec<ToolParameterDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolParameterDto {
    pub name: String,
    pub display_name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub default_value: Option<ParamValue>,
}

impl From<&ToolParameter> for ToolParameterDto {
    fn from(p: &ToolParameter) -> Self {
        Self {
            name: p.name.clone(),
            display_name: p.display_name.clone(),
            description: p.description.clone(),
            param_type: p.param_type.to_string(),
            default_value: p.default.clone(),
        }
    }
}

impl From<&ToolDescriptor> for ToolDescriptorDto {
    fn from(d: &ToolDescriptor) -> Self {
        Self {
            id: d.id.clone(),
            display_name: d.display_name.clone(),
            description: d.description.clone(),
            category: d.category.to_string(),
            tags: d.tags.clone(),
            parameters: d.parameters.iter().map(ToolParameterDto::from).collect(),
        }
    }
}

/// Body of `POST /api/tools/{id}/run`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRunRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub secondary_text: Option<String>,
    #[serde(default)]
    pub parameters: HashMap<String, serde_json::Value>,
}

impl ToolRunRequest {
    /// Build the execution input. Parameters with `null` values are dropped.
    pub fn into_input(self) -> ToolInput {
        ToolInput {
            text: self.text,
            secondary_text: self.secondary_text,
            parameters: self
                .parameters
                .into_iter()
                .filter_map(|(k, v)| ParamValue::from_json(&v).map(|v| (k, v)))
                .collect(),
        }
    }
}

/// Outcome of a tool run, returned with 200 on success and 400 on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRunResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_output_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, ParamValue>,
}

impl ToolRunResult {
    pub fn not_found(id: &str) -> Self {
        Self {
            success: false,
            output_text: None,
            secondary_output_text: None,
            error_message: Some(format!("Tool '{id}' not found.")),
            metadata: BTreeMap::new(),
        }
    }
}

impl From<ToolOutput> for ToolRunResult {
    fn from(out: ToolOutput) -> Self {
        Self {
            success: out.is_success(),
            output_text: out.output_text().map(str::to_string),
            secondary_output_text: out.secondary_output_text().map(str::to_string),
            error_message: out.error_message().map(str::to_string),
            metadata: out.metadata().clone(),
        }
    }
}

/// `GET /health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub git_hash: String,
    pub build_profile: String,
    pub tool_count: usize,
    pub uptime_secs: u64,
}

/// Generic error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
