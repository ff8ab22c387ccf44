//! Snapshot parsing from YAML/JSON.

use std::fs;
use std::path::Path;
use thiserror::Error;

use super::schema::validate_snapshot_schema;
use crate::transaction::{InvalidTimeWindow, TransactionSnapshot};

/// Errors that can occur when loading snapshots.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to read snapshot file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Snapshot does not match schema: {}", .0.join("; "))]
    SchemaViolation(Vec<String>),

    #[error("Invalid time window: {0}")]
    TimeWindow(#[from] InvalidTimeWindow),

    #[error("Unsupported snapshot format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),
}

impl TransactionSnapshot {
    /// Parse a snapshot from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SnapshotError> {
        let document: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_document(document)
    }

    /// Parse a snapshot from JSON string.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Parse a snapshot from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a snapshot from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a snapshot file, picking the format from its extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(SnapshotError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Render as YAML, the format proposals are exchanged in.
    pub fn to_yaml(&self) -> Result<String, SnapshotError> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn from_document(document: serde_json::Value) -> Result<Self, SnapshotError> {
        validate_snapshot_schema(&document).map_err(SnapshotError::SchemaViolation)?;

        let snapshot: TransactionSnapshot = serde_json::from_value(document)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks serde cannot express.
    fn validate(&self) -> Result<(), SnapshotError> {
        if let Some(window) = &self.time_window {
            window.check()?;
        }
        Ok(())
    }
}
