//! Field parsing utilities for DES block rows
//!
//! This module provides the row splitting rules and typed conversions shared
//! by the block parsers. Conversions report the column they were filling so the
//! state machine can build a precise error.

use crate::error::RowError;
use regex::Regex;
use std::sync::LazyLock;

/// Two or more consecutive whitespace characters
static WIDE_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("wide gap pattern is valid"));

/// Split a row on runs of whitespace
pub fn split_tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Split a row on runs of two or more whitespace characters.
///
/// Single spaces are kept inside fields, so `Peak current  10 A` yields
/// `["Peak current", "10 A"]`.
pub fn split_wide(line: &str) -> Vec<&str> {
    WIDE_GAP.split(line).collect()
}

/// Parse a float field
pub fn parse_f64(value: &str, column: &'static str) -> Result<f64, RowError> {
    value.trim().parse::<f64>().map_err(|_| RowError::TypeCast {
        column,
        value: value.to_string(),
        expected: "float",
    })
}

/// Parse an integer field
pub fn parse_i64(value: &str, column: &'static str) -> Result<i64, RowError> {
    value.trim().parse::<i64>().map_err(|_| RowError::TypeCast {
        column,
        value: value.to_string(),
        expected: "integer",
    })
}

/// Truncate a float read from the file to an integer
pub fn float_to_i64(value: f64, column: &'static str) -> Result<i64, RowError> {
    if !value.is_finite() || value < i64::MIN as f64 || value > i64::MAX as f64 {
        return Err(RowError::TypeCast {
            column,
            value: value.to_string(),
            expected: "integer",
        });
    }
    Ok(value.trunc() as i64)
}

/// Remove `prefix` from an already lower-cased value and trim the rest
pub fn strip_value_prefix<'a>(lowered: &'a str, prefix: &str) -> &'a str {
    lowered.strip_prefix(prefix).unwrap_or(lowered).trim()
}

/// Require an exact field count
pub fn expect_fields(fields: &[&str], expected: usize, what: &str) -> Result<(), RowError> {
    if fields.len() != expected {
        return Err(RowError::malformed(format!(
            "expected {} fields ({}), found {}",
            expected,
            what,
            fields.len()
        )));
    }
    Ok(())
}
