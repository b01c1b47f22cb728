//! Byte count parsing and formatting with binary prefixes.

use thiserror::Error;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// Threshold suffixes, matched against the uppercased input's tail.
const SUFFIXES: [(&str, u64); 9] = [
    ("KIB", KIB),
    ("KB", KIB),
    ("K", KIB),
    ("MIB", MIB),
    ("MB", MIB),
    ("M", MIB),
    ("GIB", GIB),
    ("GB", GIB),
    ("G", GIB),
];

const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeParseError {
    #[error("invalid size '{input}': expected a number with an optional K/M/G suffix")]
    InvalidNumber { input: String },

    #[error("invalid size '{input}': must be a finite value")]
    OutOfRange { input: String },
}

/// Parse a threshold such as `5MiB`, `1.5KB`, `2G` or `100` into bytes.
///
/// Suffixes are case-insensitive and always binary. Fractional results are
/// truncated toward zero; negative thresholds clamp to zero, which keeps
/// every object.
pub fn parse_min_size(raw: &str) -> Result<u64, SizeParseError> {
    let upper = raw.trim().to_uppercase();

    let (number, factor) = SUFFIXES
        .iter()
        .find_map(|(suffix, factor)| upper.strip_suffix(*suffix).map(|n| (n, *factor)))
        .unwrap_or((upper.as_str(), 1));

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| SizeParseError::InvalidNumber {
            input: raw.to_string(),
        })?;

    let bytes = value * factor as f64;
    if !bytes.is_finite() {
        return Err(SizeParseError::OutOfRange {
            input: raw.to_string(),
        });
    }

    Ok(bytes.max(0.0) as u64)
}

/// Render a byte count with one decimal and the largest fitting binary unit.
///
/// TiB is the ceiling: anything larger stays in TiB.
pub fn human_size(size: u64) -> String {
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}
