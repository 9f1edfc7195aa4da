/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

// Field level deserializers for SIM records. Every one of them falls back to an
// empty value instead of failing so a single odd field never rejects a record.

use crate::institution::InstitutionAddress;
use serde::Deserialize;
use serde_json::{Map, Value};

// Renders a scalar JSON value as text, strings without quotes
pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// Parses an optional string, accepting numbers and booleans as text
pub fn from_lenient_str<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v: Value = Deserialize::deserialize(deserializer)?;
    Ok(scalar_to_string(v))
}

// Parses a required string, "" when unusable
pub fn from_lenient_str_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v: Value = Deserialize::deserialize(deserializer)?;
    Ok(scalar_to_string(v).unwrap_or_default())
}

pub fn from_lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v: Value = Deserialize::deserialize(deserializer)?;
    Ok(v.as_bool())
}

// Parses integers that may also arrive as numeric strings
pub fn from_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v: Value = Deserialize::deserialize(deserializer)?;
    Ok(match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

// Parses a list of identifiers/links. null is empty, a lone scalar becomes one entry.
pub fn from_lenient_str_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v: Value = Deserialize::deserialize(deserializer)?;
    Ok(match v {
        Value::Array(items) => items.iter().map(value_to_string).collect(),
        Value::Null | Value::Object(_) => Vec::new(),
        scalar => vec![value_to_string(&scalar)],
    })
}

pub fn from_lenient_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v: Value = Deserialize::deserialize(deserializer)?;
    Ok(match v {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

// Parses the address blocks of an institution, skipping anything that is not an object
pub fn from_address_list<'de, D>(deserializer: D) -> Result<Vec<InstitutionAddress>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v: Value = Deserialize::deserialize(deserializer)?;
    let Value::Array(items) = v else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
