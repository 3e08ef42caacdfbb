// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lenient numeric input handling.
//!
//! Clients send numeric form fields either as JSON numbers or as the raw
//! text of an input box. These helpers accept both and report anything else
//! as unparseable, leaving the policy (default to 0 or reject) to the caller.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Interpret a JSON value as a finite number.
///
/// Accepts numbers and numeric strings (surrounding whitespace allowed).
/// Returns `None` for null, booleans, empty or non-numeric strings,
/// non-finite values, arrays and objects.
pub fn parse_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Field present: `Some(parsed)`, with `None` inside when unparseable.
/// Use with `#[serde(default)]` so an absent field stays `None`.
pub fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(parse_number(&value)))
}

/// Field present: the parsed number, or `None` when unparseable.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_number(&value))
}

/// Field present: the parsed number, or 0 when unparseable.
pub fn deserialize_coerced<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(parse_number(&value).unwrap_or(0.0)))
}
