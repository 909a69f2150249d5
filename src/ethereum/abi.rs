//! Contract interface descriptions.
//!
//! Interfaces are standard JSON ABI documents, parsed once when a binding is
//! constructed.

use std::path::Path;

use alloy::{dyn_abi::DynSolValue, hex, json_abi::JsonAbi};

use crate::error::{AppError, Result};

/// ABI of the Counter contract.
pub const COUNTER_ABI_JSON: &str = include_str!("../../abi/Counter.json");

/// Parse a JSON ABI document.
///
/// Accepts both a bare ABI array and a compiler artifact with an `abi` field.
pub fn parse_abi(json: &str) -> Result<JsonAbi> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let abi_value = match value {
        serde_json::Value::Object(mut artifact) => artifact
            .remove("abi")
            .ok_or_else(|| AppError::Abi("artifact has no `abi` field".into()))?,
        other => other,
    };
    Ok(serde_json::from_value(abi_value)?)
}

/// Read and parse a JSON ABI file.
pub fn load_abi_file(path: impl AsRef<Path>) -> Result<JsonAbi> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| AppError::Abi(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_abi(&json)
}

/// The embedded Counter ABI.
pub fn counter_abi() -> Result<JsonAbi> {
    parse_abi(COUNTER_ABI_JSON)
}

/// Render a value the way it reads in Solidity source.
pub fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::Address(a) => a.to_checksum(None),
        DynSolValue::FixedBytes(word, size) => hex::encode_prefixed(&word[..*size]),
        DynSolValue::Bytes(bytes) => hex::encode_prefixed(bytes),
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            format!("[{}]", format_values(items).join(", "))
        }
        DynSolValue::Tuple(items) => format!("({})", format_values(items).join(", ")),
        other => format!("{:?}", other),
    }
}

/// Render a list of values.
pub fn format_values(values: &[DynSolValue]) -> Vec<String> {
    values.iter().map(format_value).collect()
}
