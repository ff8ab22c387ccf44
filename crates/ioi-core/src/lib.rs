//! # ioi-core
//!
//! Deterministic verification of indication-of-interest ledger transactions.
//!
//! Given a proposed state transition (states consumed, states created,
//! signed commands, an optional time window) this crate decides whether
//! the transition is legal under the IoI contract.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same snapshot always produces the same verdict and reason
//! 2. **Pure**: No I/O, no clocks, no global mutable state during verification
//! 3. **Accountable**: Every command must be claimed by a clause, or the transaction fails
//! 4. **Parallel-safe**: Independent transactions can be verified concurrently
//!
//! ## Example
//!
//! ```rust,ignore
//! use ioi_core::{IoiContract, TransactionSnapshot};
//!
//! let tx = TransactionSnapshot::from_yaml_file("proposal.yaml")?;
//! match IoiContract::new().verify(&tx) {
//!     Ok(claimed) => println!("OK: {} command(s) accounted for", claimed.len()),
//!     Err(err) => println!("REJECTED: {}", err),
//! }
//! ```

pub mod builder;
pub mod clauses;
pub mod contract;
pub mod error;
pub mod grouping;
pub mod model;
pub mod report;
pub mod snapshot;
pub mod transaction;

// Re-export main types at crate root
pub use builder::TransactionBuilder;
pub use clauses::{
    AllOf, ClaimedCommands, Clause, FirstOf, GroupClauseVerifier, PlaceClause, TimestampClause,
};
pub use contract::IoiContract;
pub use error::{ErrorCategory, VerificationError};
pub use grouping::{group_states, InOutGroup};
pub use model::{IoiState, Order, Party, UniqueIdentifier};
pub use report::VerificationReport;
pub use snapshot::SnapshotError;
pub use transaction::{
    AuthenticatedCommand, Command, CommandData, CommandKind, ForeignCommand, InvalidTimeWindow,
    IoiCommand, TimeWindow, TransactionSnapshot,
};

/// Verify a transaction under the IoI contract.
///
/// This is the main entry point for ledger integrations: silent success,
/// or the reason the transaction must be rejected.
pub fn verify_transaction(tx: &TransactionSnapshot) -> Result<(), VerificationError> {
    IoiContract::new().verify(tx).map(|_| ())
}
