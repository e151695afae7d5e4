use super::{non_blank, option_param, regex};
use crate::tool::{
    ParamType, Tool, ToolCategory, ToolDescriptor, ToolError, ToolInput, ToolOutput,
    ToolParameter,
};

const RGB_PATTERN: &str =
    r"(?i)rgba?\s*\(\s*([0-9]+)\s*,\s*([0-9]+)\s*,\s*([0-9]+)\s*(?:,\s*([0-9.]+)\s*)?\)";
const HSL_PATTERN: &str =
    r"(?i)hsla?\s*\(\s*([0-9.]+)\s*,\s*([0-9.]+)%\s*,\s*([0-9.]+)%\s*(?:,\s*([0-9.]+)\s*)?\)";

/// Converts colors between hex, rgb(a), and hsl(a) notations.
pub struct ColorConverterTool {
    descriptor: ToolDescriptor,
}

impl ColorConverterTool {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(
            "color.converter",
            "Color Converter",
            "Convert between color formats: HEX, RGB, RGBA, HSL, HSLA.",
            ToolCategory::Other,
        )
        .with_tags(&["color", "hex", "rgb", "hsl", "rgba", "hsla", "convert"])
        .with_parameter(
            ToolParameter::new(
                "targetFormat",
                "Target Format",
                "Target color format: 'hex', 'rgb', 'rgba', 'hsl', 'hsla'",
                ParamType::String,
            )
            .with_default("rgb"),
        );
        Self { descriptor }
    }

    fn run(&self, input: &ToolInput) -> Result<ToolOutput, ToolError> {
        let text = non_blank(input.text.as_deref(), "No color value provided.")?;
        let target = option_param(input, "targetFormat", "rgb");

        Color::parse(text.trim())
            .and_then(|color| color.render(&target))
            .map(ToolOutput::success)
            .map_err(|e| ToolError::InvalidInput(format!("Color conversion error: {e}")))
    }
}

impl Default for ColorConverterTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for ColorConverterTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, input: &ToolInput) -> ToolOutput {
        ToolOutput::from_result(self.run(input))
    }
}

/// An sRGB color with alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: f64,
}

impl Color {
    fn new(r: i64, g: i64, b: i64, a: f64) -> Result<Self, String> {
        let channel = |v: i64| {
            u8::try_from(v).map_err(|_| "Color components must be between 0 and 255.".to_string())
        };
        if !(0.0..=1.0).contains(&a) {
            return Err("Alpha must be between 0 and 1.".to_string());
        }
        Ok(Self {
            r: channel(r)?,
            g: channel(g)?,
            b: channel(b)?,
            a,
        })
    }

    fn parse(text: &str) -> Result<Self, String> {
        if let Some(hex) = text.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        let lower = text.to_ascii_lowercase();
        if lower.starts_with("rgb") {
            return Self::parse_rgb(text);
        }
        if lower.starts_with("hsl") {
            return Self::parse_hsl(text);
        }
        Err(format!("Unrecognized color format: {text}"))
    }

    fn parse_hex(hex: &str) -> Result<Self, String> {
        let invalid = || "Invalid HEX color format. Use #RGB, #RRGGBB, or #RRGGBBAA".to_string();
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded: String = if hex.len() == 3 {
            hex.chars().flat_map(|c| [c, c]).collect()
        } else {
            hex.to_string()
        };
        let byte = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map(i64::from)
                .map_err(|e| e.to_string())
        };

        match expanded.len() {
            6 => Self::new(byte(0)?, byte(2)?, byte(4)?, 1.0),
            8 => Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)? as f64 / 255.0),
            _ => Err(invalid()),
        }
    }

    fn parse_rgb(text: &str) -> Result<Self, String> {
        let re = regex(RGB_PATTERN).map_err(|e| e.to_string())?;
        let caps = re.captures(text).ok_or_else(|| {
            "Invalid RGB/RGBA format. Use rgb(r, g, b) or rgba(r, g, b, a)".to_string()
        })?;

        // Digits too long for i64 are out of range by definition.
        let channel = |i: usize| caps[i].parse::<i64>().unwrap_or(i64::MAX);
        let alpha = match caps.get(4) {
            Some(m) => parse_number(m.as_str())?,
            None => 1.0,
        };
        Self::new(channel(1), channel(2), channel(3), alpha)
    }

    fn parse_hsl(text: &str) -> Result<Self, String> {
        let re = regex(HSL_PATTERN).map_err(|e| e.to_string())?;
        let caps = re.captures(text).ok_or_else(|| {
            "Invalid HSL/HSLA format. Use hsl(h, s%, l%) or hsla(h, s%, l%, a)".to_string()
        })?;

        let h = parse_number(&caps[1])?;
        let s = parse_number(&caps[2])?;
        let l = parse_number(&caps[3])?;
        let a = match caps.get(4) {
            Some(m) => parse_number(m.as_str())?,
            None => 1.0,
        };

        if !(0.0..=360.0).contains(&h) {
            return Err("Hue must be between 0 and 360.".to_string());
        }
        if !(0.0..=100.0).contains(&s) || !(0.0..=100.0).contains(&l) {
            return Err("Saturation and lightness must be between 0 and 100.".to_string());
        }
        if !(0.0..=1.0).contains(&a) {
            return Err("Alpha must be between 0 and 1.".to_string());
        }

        let (r, g, b) = hsl_to_rgb(h / 360.0, s / 100.0, l / 100.0);
        Self::new(r, g, b, a)
    }

    fn render(&self, format: &str) -> Result<String, String> {
        let Self { r, g, b, a } = *self;
        match format {
            "hex" if a < 1.0 => {
                let alpha = (a * 255.0).round().clamp(0.0, 255.0) as u8;
                Ok(format!("#{r:02X}{g:02X}{b:02X}{alpha:02X}"))
            }
            "hex" => Ok(format!("#{r:02X}{g:02X}{b:02X}")),
            "rgb" => Ok(format!("rgb({r}, {g}, {b})")),
            "rgba" => Ok(format!("rgba({r}, {g}, {b}, {})", format_alpha(a))),
            "hsl" => {
                let (h, s, l) = self.to_hsl();
                Ok(format!("hsl({h:.0}, {s:.0}%, {l:.0}%)"))
            }
            "hsla" => {
                let (h, s, l) = self.to_hsl();
                Ok(format!("hsla({h:.0}, {s:.0}%, {l:.0}%, {})", format_alpha(a)))
            }
            other => Err(format!(
                "Unknown target format: {other}. Use 'hex', 'rgb', 'rgba', 'hsl', or 'hsla'"
            )),
        }
    }

    /// Hue in degrees, saturation and lightness in percent, each rounded.
    fn to_hsl(&self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return (0.0, 0.0, (l * 100.0).round());
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let sector = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        let h = sector / 6.0;

        ((h * 360.0).round(), (s * 100.0).round(), (l * 100.0).round())
    }
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (i64, i64, i64) {
    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    };
    let channel = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as i64;
    (channel(r), channel(g), channel(b))
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn parse_number(text: &str) -> Result<f64, String> {
    text.parse::<f64>()
        .map_err(|_| format!("Invalid number '{text}'"))
}

/// Up to two decimals with trailing zeros removed: `1`, `0.5`, `0.25`.
fn format_alpha(a: f64) -> String {
    let fixed = format!("{a:.2}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn convert(text: &str, target: &str) -> ToolOutput {
        ColorConverterTool::new()
            .execute(&ToolInput::new().with_text(text).with_param("targetFormat", target))
    }

    fn ok(text: &str, target: &str) -> String {
        convert(text, target)
            .output_text()
            .unwrap_or_else(|| panic!("{text} -> {target} failed"))
            .to_string()
    }

    #[test]
    fn test_hex_to_others() {
        assert_eq!(ok("#FF5733", "rgb"), "rgb(255, 87, 51)");
        assert_eq!(ok("#ff5733", "hsl"), "hsl(11, 100%, 60%)");
        assert_eq!(ok("#FF5733", "rgba"), "rgba(255, 87, 51, 1)");
        assert_eq!(ok("#FF5733", "hsla"), "hsla(11, 100%, 60%, 1)");
    }

    #[test]
    fn test_short_hex() {
        assert_eq!(ok("#fff", "rgb"), "rgb(255, 255, 255)");
        assert_eq!(ok("#0f0", "hex"), "#00FF00");
    }

    #[test]
    fn test_hex_with_alpha() {
        assert_eq!(ok("#FF573380", "rgba"), "rgba(255, 87, 51, 0.5)");
        assert_eq!(ok("#FF573380", "hex"), "#FF573380");
    }

    #[test]
    fn test_rgb_inputs() {
        assert_eq!(ok("rgb(255, 87, 51)", "hex"), "#FF5733");
        assert_eq!(ok("RGBA(0,0,0,0.25)", "hex"), "#00000040");
        assert_eq!(ok("rgba(10, 20, 30, 0.25)", "rgba"), "rgba(10, 20, 30, 0.25)");
    }

    #[test]
    fn test_hsl_inputs() {
        assert_eq!(ok("hsl(10, 100%, 60%)", "rgb"), "rgb(255, 85, 51)");
        assert_eq!(ok("hsl(0, 0%, 50%)", "hex"), "#808080");
        assert_eq!(ok("hsla(120, 100%, 50%, 0.5)", "rgba"), "rgba(0, 255, 0, 0.5)");
    }

    #[test]
    fn test_grey_has_zero_hue() {
        assert_eq!(ok("#808080", "hsl"), "hsl(0, 0%, 50%)");
    }

    #[test]
    fn test_errors() {
        let msg = |t: &str, f: &str| convert(t, f).error_message().map(str::to_string);

        assert_eq!(
            msg("blue", "rgb").as_deref(),
            Some("Color conversion error: Unrecognized color format: blue")
        );
        assert_eq!(
            msg("#12345", "rgb").as_deref(),
            Some("Color conversion error: Invalid HEX color format. Use #RGB, #RRGGBB, or #RRGGBBAA")
        );
        assert_eq!(
            msg("#GGGGGG", "rgb").as_deref(),
            Some("Color conversion error: Invalid HEX color format. Use #RGB, #RRGGBB, or #RRGGBBAA")
        );
        assert_eq!(
            msg("rgb(300, 0, 0)", "hex").as_deref(),
            Some("Color conversion error: Color components must be between 0 and 255.")
        );
        assert_eq!(
            msg("hsl(400, 50%, 50%)", "rgb").as_deref(),
            Some("Color conversion error: Hue must be between 0 and 360.")
        );
        assert_eq!(
            msg("#fff", "cmyk").as_deref(),
            Some("Color conversion error: Unknown target format: cmyk. Use 'hex', 'rgb', 'rgba', 'hsl', or 'hsla'")
        );
        assert_eq!(
            msg("  ", "rgb").as_deref(),
            Some("No color value provided.")
        );
    }

    #[test]
    fn test_multibyte_hex_does_not_panic() {
        assert!(!convert("#é12", "rgb").is_success());
    }

    #[test]
    fn test_format_alpha() {
        assert_eq!(format_alpha(1.0), "1");
        assert_eq!(format_alpha(0.5), "0.5");
        assert_eq!(format_alpha(128.0 / 255.0), "0.5");
        assert_eq!(format_alpha(0.0), "0");
    }
}
