//! `--param key=value` parsing.

use std::collections::HashMap;

use devforge_core::{ParamValue, ToolDescriptor};
use tracing::warn;

/// Parse `key=value` tokens into a parameter map.
///
/// Keys and values are trimmed and values go through
/// [`ParamValue::infer`]. Tokens without `=` or with an empty key are
/// skipped with a warning. A repeated key keeps the last value.
pub fn parse_params<S: AsRef<str>>(tokens: &[S]) -> HashMap<String, ParamValue> {
    let mut params = HashMap::new();
    for token in tokens {
        let token = token.as_ref();
        let Some((key, value)) = token.split_once('=') else {
            warn!(token, "Ignoring parameter without '='");
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            warn!(token, "Ignoring parameter with empty key");
            continue;
        }
        params.insert(key.to_string(), ParamValue::infer(value));
    }
    params
}

/// Names in `params` that the tool does not declare, sorted.
pub fn undeclared<'a>(
    descriptor: &ToolDescriptor,
    params: &'a HashMap<String, ParamValue>,
) -> Vec<&'a str> {
    let mut names: Vec<&str> = params
        .keys()
        .map(String::as_str)
        .filter(|name| descriptor.parameter(name).is_none())
        .collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_type_inference() {
        let params = parse_params(&["indentSize=4", "minify=TRUE", "mode=decode", "n=-3"]);
        assert_eq!(params["indentSize"], ParamValue::Int(4));
        assert_eq!(params["minify"], ParamValue::Bool(true));
        assert_eq!(params["mode"], ParamValue::String("decode".into()));
        assert_eq!(params["n"], ParamValue::Int(-3));
    }

    #[test]
    fn test_trims_key_and_value() {
        let params = parse_params(&["  mode =  encode  "]);
        assert_eq!(params.get("mode"), Some(&ParamValue::String("encode".into())));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let params = parse_params(&["expr=a=b"]);
        assert_eq!(params["expr"], ParamValue::String("a=b".into()));
    }

    #[test_log::test]
    fn test_tokens_without_equals_ignored() {
        let params = parse_params(&["verbose", "=x", "mode=encode"]);
        assert_eq!(params.len(), 1);
        assert!(params.contains_key("mode"));
    }

    #[test]
    fn test_last_value_wins() {
        let params = parse_params(&["count=1", "count=5"]);
        assert_eq!(params["count"], ParamValue::Int(5));
    }

    #[test]
    fn test_undeclared_params() {
        use devforge_core::{ParamType, ToolCategory, ToolParameter};

        let descriptor = ToolDescriptor::new("t", "T", "test", ToolCategory::Other)
            .with_parameter(ToolParameter::new("mode", "Mode", "mode", ParamType::String));
        let params = parse_params(&["mode=encode", "zeta=1", "Mode=x", "alpha=true"]);

        assert_eq!(undeclared(&descriptor, &params), vec!["Mode", "alpha", "zeta"]);
    }

    #[test]
    fn test_empty_value_is_empty_string() {
        let params = parse_params(&["mode="]);
        assert_eq!(params["mode"], ParamValue::String(String::new()));
    }
}
