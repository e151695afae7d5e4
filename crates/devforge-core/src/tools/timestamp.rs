use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

use super::{NO_INPUT, non_blank, option_param};
use crate::tool::{
    ParamType, Tool, ToolCategory, ToolDescriptor, ToolError, ToolInput, ToolOutput,
    ToolParameter,
};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Naive formats accepted by `to-unix`, interpreted as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Converts between Unix timestamps and calendar date/times.
pub struct TimestampTool {
    descriptor: ToolDescriptor,
}

impl TimestampTool {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(
            "time.timestamp",
            "Timestamp Converter",
            "Convert between Unix timestamp and human-readable date/time.",
            ToolCategory::Time,
        )
        .with_tags(&["timestamp", "unix", "date", "time", "convert"])
        .with_parameter(
            ToolParameter::new(
                "mode",
                "Conversion Mode",
                "Direction of conversion: 'to-unix' or 'from-unix'",
                ParamType::String,
            )
            .with_default("from-unix"),
        )
        .with_parameter(
            ToolParameter::new(
                "useMilliseconds",
                "Use Milliseconds",
                "Whether to use milliseconds (true) or seconds (false) for Unix timestamp",
                ParamType::Bool,
            )
            .with_default(false),
        );
        Self { descriptor }
    }

    fn run(&self, input: &ToolInput) -> Result<ToolOutput, ToolError> {
        let text = non_blank(input.text.as_deref(), NO_INPUT)?.trim();
        let millis = input.param_bool("useMilliseconds").unwrap_or(false);

        let converted = match option_param(input, "mode", "from-unix").as_str() {
            "from-unix" => from_unix(text, millis),
            "to-unix" => to_unix(text, millis),
            other => Err(ToolError::InvalidParameter(format!(
                "Invalid mode '{other}'. Use 'to-unix' or 'from-unix'."
            ))),
        };
        converted.map(ToolOutput::success)
    }
}

fn from_unix(text: &str, millis: bool) -> Result<String, ToolError> {
    let value: i64 = text.parse().map_err(|_| {
        ToolError::InvalidInput("Invalid Unix timestamp. Must be a valid integer.".to_string())
    })?;

    let instant = if millis {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
    .ok_or_else(|| ToolError::InvalidInput("Timestamp out of range.".to_string()))?;

    Ok(format!(
        "UTC: {} UTC\nLocal: {}\nISO 8601: {}\nUnix (seconds): {}\nUnix (milliseconds): {}",
        instant.format(DISPLAY_FORMAT),
        instant.with_timezone(&Local).format(DISPLAY_FORMAT),
        instant.format(ISO_FORMAT),
        instant.timestamp(),
        instant.timestamp_millis(),
    ))
}

fn to_unix(text: &str, millis: bool) -> Result<String, ToolError> {
    let instant = parse_datetime(text).ok_or_else(|| {
        ToolError::InvalidInput(
            "Invalid date/time format. Try formats like '2024-01-01 12:00:00' or ISO 8601."
                .to_string(),
        )
    })?;

    let (unit, value) = if millis {
        ("milliseconds", instant.timestamp_millis())
    } else {
        ("seconds", instant.timestamp())
    };

    Ok(format!(
        "Input: {}\nUnix ({unit}): {value}\nUTC: {} UTC\nISO 8601: {}",
        instant.format("%Y-%m-%d %H:%M:%S %:z"),
        instant.format(DISPLAY_FORMAT),
        instant.format(ISO_FORMAT),
    ))
}

/// Parse RFC 3339 or one of the naive formats, normalized to UTC.
fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

impl Default for TimestampTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for TimestampTool {
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
    use pretty_assertions::assert_eq;

    fn run(input: ToolInput) -> ToolOutput {
        TimestampTool::new().execute(&input)
    }

    #[test]
    fn test_from_unix_seconds() {
        let out = run(ToolInput::new().with_text("1704067200"));
        let text = out.output_text().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "UTC: 2024-01-01 00:00:00 UTC");
        assert!(lines[1].starts_with("Local: "));
        assert_eq!(lines[2], "ISO 8601: 2024-01-01T00:00:00Z");
        assert_eq!(lines[3], "Unix (seconds): 1704067200");
        assert_eq!(lines[4], "Unix (milliseconds): 1704067200000");
    }

    #[test]
    fn test_from_unix_milliseconds() {
        let out = run(ToolInput::new()
            .with_text("1704067200500")
            .with_param("useMilliseconds", true));
        let text = out.output_text().unwrap();
        assert!(text.contains("UTC: 2024-01-01 00:00:00 UTC"));
        assert!(text.contains("Unix (milliseconds): 1704067200500"));
    }

    #[test]
    fn test_from_unix_invalid() {
        let out = run(ToolInput::new().with_text("yesterday"));
        assert_eq!(
            out.error_message(),
            Some("Invalid Unix timestamp. Must be a valid integer.")
        );
    }

    #[test]
    fn test_from_unix_out_of_range() {
        let out = run(ToolInput::new().with_text(&i64::MAX.to_string()));
        assert_eq!(out.error_message(), Some("Timestamp out of range."));
    }

    #[test]
    fn test_to_unix_formats() {
        for text in [
            "2024-01-01 12:00:00",
            "2024-01-01T12:00:00",
            "2024-01-01T12:00:00Z",
            "2024-01-01T14:00:00+02:00",
        ] {
            let out = run(ToolInput::new().with_text(text).with_param("mode", "to-unix"));
            let body = out.output_text().unwrap_or_else(|| panic!("{text} should parse"));
            assert_eq!(
                body,
                "Input: 2024-01-01 12:00:00 +00:00\n\
                 Unix (seconds): 1704110400\n\
                 UTC: 2024-01-01 12:00:00 UTC\n\
                 ISO 8601: 2024-01-01T12:00:00Z"
            );
        }
    }

    #[test]
    fn test_to_unix_date_only_milliseconds() {
        let out = run(ToolInput::new()
            .with_text("2024-01-01")
            .with_param("mode", "TO-UNIX")
            .with_param("useMilliseconds", true));
        assert!(out
            .output_text()
            .unwrap()
            .contains("Unix (milliseconds): 1704067200000"));
    }

    #[test]
    fn test_to_unix_invalid() {
        let out = run(ToolInput::new().with_text("next tuesday").with_param("mode", "to-unix"));
        assert_eq!(
            out.error_message(),
            Some("Invalid date/time format. Try formats like '2024-01-01 12:00:00' or ISO 8601.")
        );
    }

    #[test]
    fn test_invalid_mode() {
        let out = run(ToolInput::new().with_text("1").with_param("mode", "sideways"));
        assert_eq!(
            out.error_message(),
            Some("Invalid mode 'sideways'. Use 'to-unix' or 'from-unix'.")
        );
    }
}
