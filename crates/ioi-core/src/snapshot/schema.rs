//! JSON Schema validation for snapshot documents.
//!
//! Documents are validated against `schema/transaction.schema.json` before
//! deserialisation, so shape errors come back as readable paths instead of
//! serde's first-failure message. The schema checks shape only: values the
//! contract rejects (non-positive quantity or price) must still load so that
//! verification can report them.

use std::sync::OnceLock;
use thiserror::Error;

/// Embedded snapshot schema (loaded at compile time).
const TRANSACTION_SCHEMA_JSON: &str = include_str!("../../schema/transaction.schema.json");

/// Compiled JSON Schema validator (initialized once, reused).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// Errors from schema validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to load schema: {0}")]
    LoadError(String),
}

/// Get or initialize the compiled schema validator.
fn get_validator() -> Result<&'static jsonschema::Validator, SchemaError> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = match serde_json::from_str(TRANSACTION_SCHEMA_JSON) {
            Ok(v) => v,
            Err(e) => return Err(format!("Invalid schema JSON: {}", e)),
        };

        match jsonschema::options().build(&schema_value) {
            Ok(v) => Ok(v),
            Err(e) => Err(format!("Failed to compile schema: {}", e)),
        }
    });

    match result {
        Ok(v) => Ok(v),
        Err(e) => Err(SchemaError::LoadError(e.clone())),
    }
}

/// Validate a snapshot document against the schema.
///
/// # Returns
///
/// * `Ok(())` - Document is well-formed
/// * `Err(Vec<String>)` - Every violation, with its location
pub fn validate_snapshot_schema(document: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e.to_string()])?;

    let errors: Vec<String> = validator
        .iter_errors(document)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> serde_json::Value {
        serde_json::json!({
            "linear_id": { "id": "9f8c2d3e-1b4a-4c5d-8e6f-7a8b9c0d1e2f" },
            "buyer": "Alice",
            "seller": "Bob",
            "participants": ["Alice", "Bob"],
            "order": { "quantity": 100, "ticker": "XYZ", "price": "10.50" }
        })
    }

    #[test]
    fn test_valid_snapshot_passes_schema() {
        let value = serde_json::json!({
            "inputs": [],
            "outputs": [state()],
            "commands": [
                { "value": { "type": "Place", "nonce": 7 }, "signers": ["Alice", "Bob"] },
                { "value": { "contract": "cash", "name": "Move" }, "signers": ["Carol"] }
            ],
            "time_window": {
                "from": "2024-01-01T12:00:00Z",
                "until": "2024-01-01T12:01:00Z"
            }
        });
        assert!(validate_snapshot_schema(&value).is_ok());
    }

    #[test]
    fn test_empty_document_passes_schema() {
        // Missing timestamp and empty groups are verification failures, not shape errors.
        assert!(validate_snapshot_schema(&serde_json::json!({})).is_ok());
    }

    #[test]
    fn test_rejectable_values_still_pass_schema() {
        let mut out = state();
        out["order"]["quantity"] = serde_json::json!(-5);
        out["order"]["price"] = serde_json::json!("-1");
        let value = serde_json::json!({ "outputs": [out] });
        assert!(validate_snapshot_schema(&value).is_ok());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let mut out = state();
        out.as_object_mut().unwrap().remove("seller");
        let value = serde_json::json!({ "outputs": [out] });

        let errors = validate_snapshot_schema(&value).unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_additional_properties_fail() {
        let value = serde_json::json!({
            "outputs": [],
            "notary": "should fail"
        });
        assert!(validate_snapshot_schema(&value).is_err());
    }

    #[test]
    fn test_invalid_linear_id_fails() {
        let mut out = state();
        out["linear_id"]["id"] = serde_json::json!("not-a-uuid");
        let value = serde_json::json!({ "outputs": [out] });
        assert!(validate_snapshot_schema(&value).is_err());
    }

    #[test]
    fn test_unknown_command_type_fails() {
        let value = serde_json::json!({
            "commands": [
                { "value": { "type": "Cancel", "nonce": 1 }, "signers": ["Alice"] }
            ]
        });
        assert!(validate_snapshot_schema(&value).is_err());
    }

    #[test]
    fn test_malformed_price_fails() {
        let mut out = state();
        out["order"]["price"] = serde_json::json!("ten");
        let value = serde_json::json!({ "outputs": [out] });
        assert!(validate_snapshot_schema(&value).is_err());
    }
}
