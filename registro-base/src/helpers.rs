// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Small helpers shared by both registries.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;

/// Whether every field in `fields` is a key of the JSON object.
/// Anything other than an object has none of them.
pub fn has_fields(body: &Value, fields: &[&str]) -> bool {
    match body.as_object() {
        Some(object) => fields.iter().all(|field| object.contains_key(*field)),
        None => false,
    }
}

/// Checks the required fields and then reads the typed record.
pub fn parse_record<T: DeserializeOwned>(
    body: Value,
    fields: &[&str],
    missing: Error,
) -> Result<T, Error> {
    if !has_fields(&body, fields) {
        return Err(missing);
    }
    serde_json::from_value(body).map_err(|e| Error::Payload(e.to_string()))
}

/// Case-insensitive equality, lowercasing both sides.
pub fn same_text(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Empty criteria count as absent.
pub fn criterion(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_has_fields() {
        let body = json!({ "a": 1, "b": null });
        assert!(has_fields(&body, &["a", "b"]));
        assert!(!has_fields(&body, &["a", "c"]));
        assert!(!has_fields(&json!(["a", "b"]), &["a"]));
        assert!(has_fields(&body, &[]));
    }

    #[test]
    fn test_same_text() {
        assert!(same_text("ROCKY", "Rocky"));
        assert!(same_text("Ñandú", "ñANDÚ"));
        assert!(!same_text("Rocky", "Rocky "));
    }

    #[test]
    fn test_criterion() {
        assert_eq!(criterion(Some("x")), Some("x"));
        assert_eq!(criterion(Some("")), None);
        assert_eq!(criterion(None), None);
    }
}
