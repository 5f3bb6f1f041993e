use super::ParseError;
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)(kb|mb|gb|b)?$").expect("constant regex pattern is valid"));

/// Parse a memory quantity (`"512mb"`, `"2gb"`, `"1024"`) into bytes.
///
/// A bare number with no unit suffix is bytes.
pub fn parse_memory(memory: &str) -> Result<u64, ParseError> {
    let captures = PATTERN
        .captures(memory.trim())
        .ok_or_else(|| ParseError::Memory(memory.to_string()))?;

    let numeric: u64 = captures[1]
        .parse()
        .map_err(|_| ParseError::Memory(memory.to_string()))?;

    let multiplier = match captures.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        None => 1,
        Some(ref s) if s == "b" => 1,
        Some(ref s) if s == "kb" => 1_000,
        Some(ref s) if s == "mb" => 1_000_000,
        Some(ref s) if s == "gb" => 1_000_000_000,
        Some(_) => return Err(ParseError::Memory(memory.to_string())),
    };

    Ok(numeric * multiplier)
}
