//! GroupClauseVerifier: run a clause tree once per keyed group of states.

use std::fmt::Display;
use std::hash::Hash;
use tracing::debug;

use crate::error::VerificationError;
use crate::grouping::group_states;
use crate::model::IoiState;
use crate::transaction::{AuthenticatedCommand, TransactionSnapshot};

use super::{ensure_all_claimed, ClaimedCommands, Clause};

/// Partitions the states it is handed by `key_of` and runs `clause` against
/// every group with the full command set.
///
/// Every command passed in must end up claimed by some group.
pub struct GroupClauseVerifier<K> {
    key_of: fn(&IoiState) -> K,
    clause: Box<dyn Clause<K>>,
}

impl<K> GroupClauseVerifier<K> {
    pub fn new(key_of: fn(&IoiState) -> K, clause: Box<dyn Clause<K>>) -> Self {
        Self { key_of, clause }
    }
}

impl<K> Clause<()> for GroupClauseVerifier<K>
where
    K: Eq + Hash + Clone + Display + Send + Sync,
{
    fn name(&self) -> &'static str {
        "Group"
    }

    fn verify(
        &self,
        tx: &TransactionSnapshot,
        inputs: &[&IoiState],
        outputs: &[&IoiState],
        commands: &[AuthenticatedCommand],
        _grouping_key: &(),
    ) -> Result<ClaimedCommands, VerificationError> {
        let key_of = self.key_of;
        let groups = group_states(inputs, outputs, |state| key_of(state));
        debug!(groups = groups.len(), "grouped states");

        let mut claimed = ClaimedCommands::new();
        for group in &groups {
            if group.is_empty() {
                return Err(VerificationError::EmptyGroup {
                    group: group.grouping_key.to_string(),
                });
            }

            // group_states hands back `&&IoiState`; flatten to the clause's view.
            let group_inputs: Vec<&IoiState> = group.inputs.iter().map(|s| **s).collect();
            let group_outputs: Vec<&IoiState> = group.outputs.iter().map(|s| **s).collect();

            debug!(
                group = %group.grouping_key,
                inputs = group_inputs.len(),
                outputs = group_outputs.len(),
                "verifying group"
            );
            let claims = self.clause.verify(
                tx,
                &group_inputs,
                &group_outputs,
                commands,
                &group.grouping_key,
            )?;
            claimed.extend(claims);
        }

        ensure_all_claimed(commands, &claimed)?;
        Ok(claimed)
    }
}
