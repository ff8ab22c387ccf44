//! Transaction snapshot handed to the verifier by the ledger layer.
//!
//! The snapshot is read-only: the verifier never fetches or mutates data,
//! it only inspects the inputs, outputs, commands and time window.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

use crate::model::{IoiState, Party};

/// The closed set of command kinds this contract recognises.
///
/// Adding `Amend` or `Cancel` means adding a variant here, a clause that
/// requires it, and listing that clause in the contract's `FirstOf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    Place,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Place => f.write_str("Place"),
        }
    }
}

/// A command of this contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum IoiCommand {
    /// Issue a new indication-of-interest order.
    Place {
        /// Random value making otherwise identical commands distinct
        nonce: u64,
    },
}

impl IoiCommand {
    /// A Place command with a fresh random 63-bit nonce.
    pub fn place() -> Self {
        IoiCommand::Place {
            nonce: rand::random::<u64>() >> 1,
        }
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            IoiCommand::Place { .. } => CommandKind::Place,
        }
    }

    pub fn nonce(&self) -> u64 {
        match self {
            IoiCommand::Place { nonce } => *nonce,
        }
    }
}

impl fmt::Display for IoiCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(nonce={})", self.kind(), self.nonce())
    }
}

/// A command owned by some other contract in the same transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignCommand {
    pub contract: String,
    pub name: String,
}

/// Payload of a command as it appears in the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandData {
    Ioi(IoiCommand),
    Foreign(ForeignCommand),
}

impl From<IoiCommand> for CommandData {
    fn from(command: IoiCommand) -> Self {
        CommandData::Ioi(command)
    }
}

/// A signed command: the payload plus who signed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub value: CommandData,

    /// Every identity whose signature accompanies the command
    pub signers: BTreeSet<Party>,

    /// Subset of `signers` with a direct economic interest
    #[serde(default)]
    pub signing_parties: BTreeSet<Party>,
}

impl Command {
    pub fn new(value: impl Into<CommandData>, signers: impl IntoIterator<Item = Party>) -> Self {
        let signers: BTreeSet<Party> = signers.into_iter().collect();
        Self {
            value: value.into(),
            signing_parties: signers.clone(),
            signers,
        }
    }
}

/// A command of this contract's type, with its signer metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedCommand {
    pub signers: BTreeSet<Party>,
    pub signing_parties: BTreeSet<Party>,
    pub value: IoiCommand,
}

/// Rejected time window bounds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTimeWindow {
    #[error("time window ends ({until}) before it starts ({from})")]
    Inverted {
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    },

    #[error("time window tolerance of {tolerance} is out of range")]
    OutOfRange { tolerance: Duration },
}

/// The interval in which the transaction is asserted to have happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl TimeWindow {
    pub fn between(from: DateTime<Utc>, until: DateTime<Utc>) -> Result<Self, InvalidTimeWindow> {
        let window = Self { from, until };
        window.check()?;
        Ok(window)
    }

    /// A window of `tolerance` either side of `midpoint`.
    pub fn with_tolerance(
        midpoint: DateTime<Utc>,
        tolerance: Duration,
    ) -> Result<Self, InvalidTimeWindow> {
        let tolerance = tolerance.abs();
        let out_of_range = || InvalidTimeWindow::OutOfRange { tolerance };

        Ok(Self {
            from: midpoint.checked_sub_signed(tolerance).ok_or_else(out_of_range)?,
            until: midpoint.checked_add_signed(tolerance).ok_or_else(out_of_range)?,
        })
    }

    pub fn midpoint(&self) -> DateTime<Utc> {
        self.from + (self.until - self.from) / 2
    }

    /// Deserialised windows bypass [`TimeWindow::between`]; check them here.
    pub fn check(&self) -> Result<(), InvalidTimeWindow> {
        if self.until < self.from {
            return Err(InvalidTimeWindow::Inverted {
                from: self.from,
                until: self.until,
            });
        }
        Ok(())
    }
}

/// The proposed state transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSnapshot {
    /// Prior states being consumed
    #[serde(default)]
    pub inputs: Vec<IoiState>,

    /// New states being created
    #[serde(default)]
    pub outputs: Vec<IoiState>,

    #[serde(default)]
    pub commands: Vec<Command>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,
}
