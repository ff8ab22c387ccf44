//! Verification failures.
//!
//! Every failure is terminal: the transaction is rejected outright and the
//! reason string is what the ledger layer reports back to the user.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::Party;
use crate::transaction::{CommandKind, IoiCommand};

/// Broad class of a verification failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Shape of the transaction: timestamp, cardinalities, grouping
    Structural,
    /// Which commands are present, who signed them, who claimed them
    Command,
    /// Values carried by the order itself
    BusinessRule,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Structural => f.write_str("structural"),
            ErrorCategory::Command => f.write_str("command"),
            ErrorCategory::BusinessRule => f.write_str("business_rule"),
        }
    }
}

/// Why a transaction was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("transaction must be timestamped")]
    MissingTimestamp,

    #[error(
        "no inputs should be consumed when placing an IoI order (group {group} consumes {count})"
    )]
    InputsConsumed { group: String, count: usize },

    #[error(
        "only one output state should be created for each group (group {group} creates {count})"
    )]
    OutputCount { group: String, count: usize },

    #[error("group {group} has neither inputs nor outputs")]
    EmptyGroup { group: String },

    #[error("no matching clause found among [{candidates}] for commands [{present}]")]
    NoMatchingClause { candidates: String, present: String },

    #[error("more than one clause matched ({matched}); a group may follow only one path")]
    AmbiguousClauses { matched: String },

    #[error("expected exactly one {kind} command, found {count}")]
    CommandCount { kind: CommandKind, count: usize },

    #[error("all of the participants must be signers (missing: {})", join_parties(.missing))]
    MissingSigners { missing: Vec<Party> },

    #[error("command not accounted for: {}", join_commands(.commands))]
    UnaccountedCommands { commands: Vec<IoiCommand> },

    #[error("command {command} claimed by more than one clause")]
    DuplicateClaim { command: IoiCommand },

    #[error("buyer and seller cannot be the same entity ({party})")]
    SameBuyerAndSeller { party: Party },

    #[error("quantity must be positive")]
    NonPositiveQuantity,

    #[error("price must be positive (got {price})")]
    NonPositivePrice { price: String },

    #[error("ticker must not be empty")]
    EmptyTicker,
}

impl VerificationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VerificationError::MissingTimestamp
            | VerificationError::InputsConsumed { .. }
            | VerificationError::OutputCount { .. }
            | VerificationError::EmptyGroup { .. } => ErrorCategory::Structural,

            VerificationError::NoMatchingClause { .. }
            | VerificationError::AmbiguousClauses { .. }
            | VerificationError::CommandCount { .. }
            | VerificationError::MissingSigners { .. }
            | VerificationError::UnaccountedCommands { .. }
            | VerificationError::DuplicateClaim { .. } => ErrorCategory::Command,

            VerificationError::SameBuyerAndSeller { .. }
            | VerificationError::NonPositiveQuantity
            | VerificationError::NonPositivePrice { .. }
            | VerificationError::EmptyTicker => ErrorCategory::BusinessRule,
        }
    }
}

fn join_parties(parties: &[Party]) -> String {
    parties
        .iter()
        .map(Party::name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_commands(commands: &[IoiCommand]) -> String {
    commands
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
