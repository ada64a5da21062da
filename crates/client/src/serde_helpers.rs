//! Serde helpers for Splunk's inconsistent JSON typing.
//!
//! Responsibilities:
//! - Provide deserializers that accept numbers, strings, booleans or null for scalar fields.
//! - Keep parsing behavior centralized so model definitions stay readable and consistent.
//!
//! Explicitly does NOT handle:
//! - Validating higher-level semantics (ranges, required/optional business rules).
//!
//! Invariants / assumptions:
//! - Splunk may return numeric fields as `"123"` strings or as `123` numbers depending on endpoint/version.
//! - Splunk may return flags as `true`, `1`, `"1"` or `"true"`.
//! - `null` maps to the type's default, except in `bool_from_any_or_true`.

use serde::Deserialize;
use serde::de::Error as _;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    U64(u64),
    I64(i64),
    F64(f64),
    String(String),
}

pub fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Loose::U64(n)) => Ok(n),
        Some(Loose::I64(n)) => u64::try_from(n).map_err(D::Error::custom),
        Some(Loose::F64(n)) if n >= 0.0 => Ok(n as u64),
        Some(Loose::String(s)) if s.trim().is_empty() => Ok(0),
        Some(Loose::String(s)) => s.trim().parse().map_err(D::Error::custom),
        Some(other) => Err(D::Error::custom(format!(
            "expected unsigned integer, got {:?}",
            other
        ))),
    }
}

pub fn f64_from_string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Loose::U64(n)) => Ok(n as f64),
        Some(Loose::I64(n)) => Ok(n as f64),
        Some(Loose::F64(n)) => Ok(n),
        Some(Loose::String(s)) if s.trim().is_empty() => Ok(0.0),
        Some(Loose::String(s)) => s.trim().parse().map_err(D::Error::custom),
        Some(Loose::Bool(b)) => Err(D::Error::custom(format!(
            "expected number, got boolean {}",
            b
        ))),
    }
}

fn loose_to_bool(value: Loose) -> bool {
    match value {
        Loose::Bool(b) => b,
        Loose::U64(n) => n != 0,
        Loose::I64(n) => n != 0,
        Loose::F64(n) => n != 0.0,
        Loose::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "t" | "yes" | "y"
        ),
    }
}

pub fn bool_from_any<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Loose>::deserialize(deserializer)?.is_some_and(loose_to_bool))
}

/// Like [`bool_from_any`], but `null` reads as `true`. For flags where only an
/// explicit false value opts out.
pub fn bool_from_any_or_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Loose>::deserialize(deserializer)?.is_none_or(loose_to_bool))
}

pub fn string_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        None => String::new(),
        Some(Loose::String(s)) => s,
        Some(Loose::Bool(b)) => b.to_string(),
        Some(Loose::U64(n)) => n.to_string(),
        Some(Loose::I64(n)) => n.to_string(),
        Some(Loose::F64(n)) => n.to_string(),
    })
}
