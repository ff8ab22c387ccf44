//! Structural combinators: AllOf and FirstOf.

use std::collections::BTreeSet;
use tracing::debug;

use crate::error::VerificationError;
use crate::model::IoiState;
use crate::transaction::{AuthenticatedCommand, CommandKind, TransactionSnapshot};

use super::{command_kinds, ClaimedCommands, Clause};

/// Every child must pass. Claims are the union of the children's claims,
/// and no command may be claimed by two children.
pub struct AllOf<K> {
    clauses: Vec<Box<dyn Clause<K>>>,
}

impl<K> AllOf<K> {
    pub fn new(clauses: Vec<Box<dyn Clause<K>>>) -> Self {
        Self { clauses }
    }
}

impl<K: Send + Sync> Clause<K> for AllOf<K> {
    fn name(&self) -> &'static str {
        "AllOf"
    }

    fn required_commands(&self) -> BTreeSet<CommandKind> {
        self.clauses
            .iter()
            .flat_map(|c| c.required_commands())
            .collect()
    }

    fn verify(
        &self,
        tx: &TransactionSnapshot,
        inputs: &[&IoiState],
        outputs: &[&IoiState],
        commands: &[AuthenticatedCommand],
        grouping_key: &K,
    ) -> Result<ClaimedCommands, VerificationError> {
        let mut claimed = ClaimedCommands::new();

        for clause in &self.clauses {
            debug!(clause = clause.name(), "running clause");
            let claims = clause.verify(tx, inputs, outputs, commands, grouping_key)?;

            if let Some(command) = claims.intersection(&claimed).next() {
                return Err(VerificationError::DuplicateClaim { command: *command });
            }
            claimed.extend(claims);
        }

        Ok(claimed)
    }
}

/// Exactly one child applies, selected by the command kinds present.
///
/// Children are mutually exclusive business paths (Place vs. Amend vs.
/// Cancel): two children matching the same group is an error rather than
/// a tie broken by declaration order.
pub struct FirstOf<K> {
    clauses: Vec<Box<dyn Clause<K>>>,
}

impl<K> FirstOf<K> {
    pub fn new(clauses: Vec<Box<dyn Clause<K>>>) -> Self {
        Self { clauses }
    }

    fn names(clauses: &[&dyn Clause<K>]) -> String {
        clauses
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<K: Send + Sync> Clause<K> for FirstOf<K> {
    fn name(&self) -> &'static str {
        "FirstOf"
    }

    fn matches(&self, present: &BTreeSet<CommandKind>) -> bool {
        self.clauses.iter().any(|c| c.matches(present))
    }

    fn verify(
        &self,
        tx: &TransactionSnapshot,
        inputs: &[&IoiState],
        outputs: &[&IoiState],
        commands: &[AuthenticatedCommand],
        grouping_key: &K,
    ) -> Result<ClaimedCommands, VerificationError> {
        let present = command_kinds(commands);
        let matched: Vec<&dyn Clause<K>> = self
            .clauses
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| c.matches(&present))
            .collect();

        match matched.as_slice() {
            [] => {
                let candidates: Vec<&dyn Clause<K>> =
                    self.clauses.iter().map(|c| c.as_ref()).collect();
                Err(VerificationError::NoMatchingClause {
                    candidates: Self::names(&candidates),
                    present: present
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", "),
                })
            }
            [only] => {
                debug!(clause = only.name(), "clause selected");
                only.verify(tx, inputs, outputs, commands, grouping_key)
            }
            _ => Err(VerificationError::AmbiguousClauses {
                matched: Self::names(&matched),
            }),
        }
    }
}
