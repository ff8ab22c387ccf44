//! Report: turns a verification outcome into a serialisable verdict.
//!
//! The report carries nothing but what verification produced, so two
//! parties verifying the same snapshot produce byte-identical reports.

use serde::{Deserialize, Serialize};

use crate::clauses::ClaimedCommands;
use crate::error::{ErrorCategory, VerificationError};
use crate::transaction::IoiCommand;

/// Verdict on one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub accepted: bool,

    /// Commands accounted for (empty on rejection)
    #[serde(default)]
    pub claimed_commands: Vec<IoiCommand>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ErrorCategory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl VerificationReport {
    pub fn from_result(result: &Result<ClaimedCommands, VerificationError>) -> Self {
        match result {
            Ok(claimed) => Self {
                accepted: true,
                claimed_commands: claimed.iter().copied().collect(),
                category: None,
                reason: None,
            },
            Err(err) => Self {
                accepted: false,
                claimed_commands: Vec::new(),
                category: Some(err.category()),
                reason: Some(err.to_string()),
            },
        }
    }

    /// One line for humans.
    pub fn summary(&self) -> String {
        if self.accepted {
            let commands = self
                .claimed_commands
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "ACCEPTED: {} command(s) accounted for [{}]",
                self.claimed_commands.len(),
                commands
            )
        } else {
            format!(
                "REJECTED ({}): {}",
                self.category.map(|c| c.to_string()).unwrap_or_default(),
                self.reason.as_deref().unwrap_or_default()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_report() {
        let claimed = ClaimedCommands::from([IoiCommand::Place { nonce: 11 }]);
        let report = VerificationReport::from_result(&Ok(claimed));

        assert!(report.accepted);
        assert_eq!(report.claimed_commands, vec![IoiCommand::Place { nonce: 11 }]);
        assert_eq!(
            report.summary(),
            "ACCEPTED: 1 command(s) accounted for [Place(nonce=11)]"
        );
    }

    #[test]
    fn test_rejected_report() {
        let report = VerificationReport::from_result(&Err(VerificationError::NonPositiveQuantity));

        assert!(!report.accepted);
        assert_eq!(report.category, Some(ErrorCategory::BusinessRule));
        assert_eq!(
            report.summary(),
            "REJECTED (business_rule): quantity must be positive"
        );
    }

    #[test]
    fn test_json_shape() {
        let report = VerificationReport::from_result(&Err(VerificationError::MissingTimestamp));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "accepted": false,
                "claimed_commands": [],
                "category": "structural",
                "reason": "transaction must be timestamped"
            })
        );
    }
}
