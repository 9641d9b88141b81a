//! Numeric coercion of analyst-entered values
//!
//! Form fields never fail to parse: anything that is not a finite number
//! becomes `0.0`, the "not entered" sentinel.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse the longest numeric prefix of `text`, or `0.0`
///
/// `"12.5"` → `12.5`, `"7x"` → `7.0`, `"1e3"` → `1000.0`, `""`/`"abc"` → `0.0`.
/// Infinite and NaN results are also coerced to `0.0`.
pub fn parse_number(text: &str) -> f64 {
    let text = text.trim_start();
    let end = numeric_prefix_len(text);
    let mut candidate = &text[..end];
    while !candidate.is_empty() {
        if let Ok(value) = candidate.parse::<f64>() {
            return if value.is_finite() { value } else { 0.0 };
        }
        candidate = &candidate[..candidate.len() - 1];
    }
    0.0
}

// Bytes of the leading run that can belong to a decimal literal
fn numeric_prefix_len(text: &str) -> usize {
    text.bytes()
        .take_while(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        .count()
}

/// Broker summary slider position when nothing was entered
pub const SLIDER_MIDPOINT: u8 = 50;

/// Clamp a slider reading to 0..=100
pub fn parse_percent_slider(text: &str) -> u8 {
    clamp_percent(parse_number(text))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_percent(value: f64) -> u8 {
    if value.is_finite() {
        value.trunc().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

/// Deserialize a number that may arrive as a JSON string, number or null
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_number(&s),
        _ => 0.0,
    })
}

/// Deserialize a text field that may arrive as a JSON string, number or null
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Deserialize a 0..=100 slider reading from a number, string or null
///
/// Numbers are truncated and clamped, strings go through
/// [`parse_percent_slider`], null or other values give [`SLIDER_MIDPOINT`].
pub fn lenient_percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().map_or(SLIDER_MIDPOINT, clamp_percent),
        Value::String(s) => parse_percent_slider(&s),
        _ => SLIDER_MIDPOINT,
    })
}

/// Deserialize a list of text items, treating null as empty
///
/// Scalar items are rendered as text; null and nested items are dropped. A
/// bare string becomes a one-item list.
pub fn lenient_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        Value::String(s) => vec![s],
        _ => Vec::new(),
    })
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Deserialize a nested value, treating null as its default
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
