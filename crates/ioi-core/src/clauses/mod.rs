//! Clauses: composable verification units.
//!
//! Each clause inspects part of a transaction and reports which commands it
//! accounts for. Clauses compose structurally ([`AllOf`], [`FirstOf`],
//! [`GroupClauseVerifier`]) into a tree that the contract runs once per
//! transaction. Coverage is a return value: whoever runs the tree checks
//! that the claimed set covers every command, nothing is mutated along the
//! way.
//!
//! ## Isolation Contract
//!
//! - A clause only asserts about the inputs/outputs it is handed and the
//!   signers/nonces of the commands.
//! - A clause never assumes commands beyond its requirements are absent.
//! - The first violated invariant fails the clause; there are no partial
//!   results.

mod composition;
mod group;
mod place;
mod timestamp;

pub use composition::{AllOf, FirstOf};
pub use group::GroupClauseVerifier;
pub use place::PlaceClause;
pub use timestamp::TimestampClause;

use std::collections::BTreeSet;

use crate::error::VerificationError;
use crate::model::IoiState;
use crate::transaction::{AuthenticatedCommand, CommandKind, IoiCommand, TransactionSnapshot};

/// Commands a clause (or a clause tree) has taken responsibility for.
pub type ClaimedCommands = BTreeSet<IoiCommand>;

/// A single verification unit, keyed by the grouping key `K` of the states
/// it is run against (`()` when it runs over the whole transaction).
pub trait Clause<K>: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Commands that must be present for this clause to apply.
    fn required_commands(&self) -> BTreeSet<CommandKind> {
        BTreeSet::new()
    }

    /// Whether this clause applies given the command kinds present.
    fn matches(&self, present: &BTreeSet<CommandKind>) -> bool {
        self.required_commands().is_subset(present)
    }

    /// Verify the states against the commands.
    ///
    /// # Returns
    ///
    /// The commands this clause accounts for, or the first violation found.
    fn verify(
        &self,
        tx: &TransactionSnapshot,
        inputs: &[&IoiState],
        outputs: &[&IoiState],
        commands: &[AuthenticatedCommand],
        grouping_key: &K,
    ) -> Result<ClaimedCommands, VerificationError>;
}

/// The set of command kinds present among `commands`.
pub fn command_kinds(commands: &[AuthenticatedCommand]) -> BTreeSet<CommandKind> {
    commands.iter().map(|c| c.value.kind()).collect()
}

/// Run a transaction-level clause tree and check that it accounts for every
/// command it was given.
pub fn verify_clause(
    tx: &TransactionSnapshot,
    clause: &dyn Clause<()>,
    commands: &[AuthenticatedCommand],
) -> Result<ClaimedCommands, VerificationError> {
    let inputs: Vec<&IoiState> = tx.inputs.iter().collect();
    let outputs: Vec<&IoiState> = tx.outputs.iter().collect();

    let claimed = clause.verify(tx, &inputs, &outputs, commands, &())?;
    ensure_all_claimed(commands, &claimed)?;

    Ok(claimed)
}

/// Fail with the unclaimed commands, in a stable order, if any.
pub(crate) fn ensure_all_claimed(
    commands: &[AuthenticatedCommand],
    claimed: &ClaimedCommands,
) -> Result<(), VerificationError> {
    let unclaimed: BTreeSet<IoiCommand> = commands
        .iter()
        .map(|c| c.value)
        .filter(|c| !claimed.contains(c))
        .collect();

    if unclaimed.is_empty() {
        Ok(())
    } else {
        Err(VerificationError::UnaccountedCommands {
            commands: unclaimed.into_iter().collect(),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_verify_clause_accepts_full_coverage() {
        let place = IoiCommand::Place { nonce: 1 };
        let commands = vec![authenticated(place)];
        let stub = Stub::claiming("stub", vec![place]);

        let claimed = verify_clause(&TransactionSnapshot::default(), &stub, &commands).unwrap();
        assert_eq!(claimed, ClaimedCommands::from([place]));
    }

    #[test]
    fn test_verify_clause_rejects_unclaimed_command() {
        let commands = vec![
            authenticated(IoiCommand::Place { nonce: 1 }),
            authenticated(IoiCommand::Place { nonce: 2 }),
        ];
        let stub = Stub::claiming("stub", vec![IoiCommand::Place { nonce: 1 }]);

        let err = verify_clause(&TransactionSnapshot::default(), &stub, &commands).unwrap_err();
        assert_eq!(
            err,
            VerificationError::UnaccountedCommands {
                commands: vec![IoiCommand::Place { nonce: 2 }]
            }
        );
    }

    #[test]
    fn test_default_matches_is_subset() {
        let stub = Stub::claiming("stub", vec![]);
        assert!(!Clause::<()>::matches(&stub, &BTreeSet::new()));
        assert!(Clause::<()>::matches(
            &stub,
            &BTreeSet::from([CommandKind::Place])
        ));
    }

    #[test]
    fn test_command_kinds_deduplicates() {
        let commands = vec![
            authenticated(IoiCommand::Place { nonce: 1 }),
            authenticated(IoiCommand::Place { nonce: 2 }),
        ];
        assert_eq!(command_kinds(&commands), BTreeSet::from([CommandKind::Place]));
    }
}
