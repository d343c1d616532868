//! Canonical text output
//!
//! Numbers are written with the fewest characters that still encode the value
//! rounded to the configured number of decimals. Firmware parses ".5" the same
//! as "0.5", so the leading zero goes too.

use crate::parser::GcodeLine;

/// Decimal places used per axis group when serializing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    /// X, Y and generic numeric parameters
    pub xy: usize,
    pub z: usize,
    pub e: usize,
}

impl Precision {
    pub const DEFAULT_XY: usize = 4;
    pub const DEFAULT_Z: usize = 5;
    pub const DEFAULT_E: usize = 8;
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            xy: Self::DEFAULT_XY,
            z: Self::DEFAULT_Z,
            e: Self::DEFAULT_E,
        }
    }
}

/// Format `value` with at most `decimals` fractional digits, as short as possible
///
/// Negative values lose the leading zero too (`-0.5` becomes `-.5`), and a
/// value that rounds to negative zero is written as `0`.
///
/// ```
/// use gcode_minifier::format::format_decimal;
///
/// assert_eq!(format_decimal(0.01, 4), ".01");
/// assert_eq!(format_decimal(0.00001, 4), "0");
/// assert_eq!(format_decimal(1.000000004, 9), "1.000000004");
/// assert_eq!(format_decimal(-0.5, 4), "-.5");
/// assert_eq!(format_decimal(-0.00001, 4), "0");
/// ```
pub fn format_decimal(value: f64, decimals: usize) -> String {
    let mut text = format!("{value:.decimals$}");

    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }

    if let Some(fraction) = text.strip_prefix("0.") {
        text = format!(".{fraction}");
    } else if let Some(fraction) = text.strip_prefix("-0.") {
        text = format!("-.{fraction}");
    }

    if text.is_empty() || text == "-0" {
        return "0".to_string();
    }
    text
}

/// Serialize a line in canonical field order
///
/// Order: command, X, Y, Z, E, F, numeric params, string params, comment.
/// Generic parameters come out sorted by key. The empty line serializes to "".
pub fn format_line(line: &GcodeLine, precision: &Precision) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(command) = line.command {
        parts.push(command.to_string());
    }
    if let Some(x) = line.x {
        parts.push(format!("X{}", format_decimal(x, precision.xy)));
    }
    if let Some(y) = line.y {
        parts.push(format!("Y{}", format_decimal(y, precision.xy)));
    }
    if let Some(z) = line.z {
        parts.push(format!("Z{}", format_decimal(z, precision.z)));
    }
    if let Some(e) = line.e {
        parts.push(format!("E{}", format_decimal(e, precision.e)));
    }
    if line.has_feedrate() {
        parts.push(format!("F{}", format_decimal(line.feedrate, 0)));
    }
    for (key, value) in &line.numeric_params {
        parts.push(format!("{key}{}", format_decimal(*value, precision.xy)));
    }
    for (key, value) in &line.string_params {
        parts.push(format!("{key}{value}"));
    }
    if let Some(comment) = line.comment.as_deref().filter(|c| !c.is_empty()) {
        parts.push(comment.to_string());
    }

    parts.join(" ")
}
