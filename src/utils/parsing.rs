//! Parsing helpers for command line values and JSON-RPC quantities.

use byte_unit::Byte;
use std::str::FromStr;

/// Parses a human readable size such as `"500MB"` or `"1GiB"` into bytes.
pub fn parse_string_to_bytes_size(s: &str) -> Result<u64, String> {
	Byte::from_str(s)
		.map(|byte| byte.as_u64())
		.map_err(|e| format!("Invalid size format: '{}'. Error: {}", s, e))
}

/// Trims and lowercases `input` for case-insensitive matching.
pub fn normalize_string(input: &str) -> String {
	input.trim().to_lowercase()
}

/// Parses a `0x`-prefixed JSON-RPC quantity into a `u64`.
pub fn parse_hex_quantity(s: &str) -> Result<u64, String> {
	let digits = s
		.strip_prefix("0x")
		.ok_or_else(|| format!("quantity '{}' is missing the 0x prefix", s))?;
	if digits.is_empty() {
		return Err("quantity has no digits".to_string());
	}
	u64::from_str_radix(digits, 16).map_err(|e| format!("invalid quantity '{}': {}", s, e))
}
