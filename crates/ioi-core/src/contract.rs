//! The indication-of-interest contract: entry point of verification.

use lazy_static::lazy_static;
use sha2::{Digest, Sha256};
use tracing::{debug, trace, warn};

use crate::clauses::{
    verify_clause, AllOf, ClaimedCommands, FirstOf, GroupClauseVerifier, PlaceClause,
    TimestampClause,
};
use crate::error::VerificationError;
use crate::model::{IoiState, UniqueIdentifier};
use crate::transaction::{AuthenticatedCommand, CommandData, TransactionSnapshot};

/// Prose the contract code implements.
const LEGAL_PROSE: &[u8] = b"purchase order contract template and params";

lazy_static! {
    static ref LEGAL_CONTRACT_REFERENCE: String = format!("{:x}", Sha256::digest(LEGAL_PROSE));
}

/// Verifies transactions involving [`IoiState`]s.
///
/// The clause tree is `AllOf(Timestamp, Group(linear_id, FirstOf(Place)))`.
/// New commands (Amend, Cancel) get their own clause listed in the `FirstOf`.
pub struct IoiContract {
    clause: AllOf<()>,
}

impl IoiContract {
    pub fn new() -> Self {
        let business = FirstOf::<UniqueIdentifier>::new(vec![Box::new(PlaceClause::new())]);
        let group =
            GroupClauseVerifier::<UniqueIdentifier>::new(IoiState::linear_id, Box::new(business));

        Self {
            clause: AllOf::<()>::new(vec![Box::new(TimestampClause::new()), Box::new(group)]),
        }
    }

    /// SHA-256 (hex) of the legal prose backing this contract.
    pub fn legal_contract_reference() -> &'static str {
        LEGAL_CONTRACT_REFERENCE.as_str()
    }

    /// Keep this contract's commands; commands of other contracts in the
    /// same transaction are not ours to judge.
    pub fn extract_commands(tx: &TransactionSnapshot) -> Vec<AuthenticatedCommand> {
        tx.commands
            .iter()
            .filter_map(|command| match &command.value {
                CommandData::Ioi(value) => Some(AuthenticatedCommand {
                    signers: command.signers.clone(),
                    signing_parties: command.signing_parties.clone(),
                    value: *value,
                }),
                CommandData::Foreign(foreign) => {
                    trace!(
                        contract = %foreign.contract,
                        command = %foreign.name,
                        "skipping foreign command"
                    );
                    None
                }
            })
            .collect()
    }

    /// Verify a transaction.
    ///
    /// # Returns
    ///
    /// The commands accounted for, or the first violation found.
    pub fn verify(&self, tx: &TransactionSnapshot) -> Result<ClaimedCommands, VerificationError> {
        let commands = Self::extract_commands(tx);
        debug!(
            inputs = tx.inputs.len(),
            outputs = tx.outputs.len(),
            commands = commands.len(),
            "verifying transaction"
        );

        match verify_clause(tx, &self.clause, &commands) {
            Ok(claimed) => {
                debug!(claimed = claimed.len(), "transaction accepted");
                Ok(claimed)
            }
            Err(err) => {
                warn!(category = %err.category(), reason = %err, "transaction rejected");
                Err(err)
            }
        }
    }
}

impl Default for IoiContract {
    fn default() -> Self {
        Self::new()
    }
}
