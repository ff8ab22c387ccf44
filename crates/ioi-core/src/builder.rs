//! Proposer-side construction of candidate transactions.
//!
//! The proposing party builds a snapshot, verifies it locally with
//! [`IoiContract`](crate::IoiContract), and only then asks counterparties
//! to sign. Counterparties run the identical verification before signing.

use crate::model::{IoiState, Order, Party};
use crate::transaction::{Command, CommandData, IoiCommand, TimeWindow, TransactionSnapshot};

/// Fluent builder for [`TransactionSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    snapshot: TransactionSnapshot,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidate transaction placing a new order between `buyer` and `seller`.
    pub fn place(buyer: Party, seller: Party, order: Order, time_window: TimeWindow) -> Self {
        let signers = [buyer.clone(), seller.clone()];
        Self::new()
            .add_output_state(IoiState::new(buyer, seller, order))
            .add_command(IoiCommand::place(), signers)
            .set_time_window(time_window)
    }

    pub fn add_input_state(mut self, state: IoiState) -> Self {
        self.snapshot.inputs.push(state);
        self
    }

    pub fn add_output_state(mut self, state: IoiState) -> Self {
        self.snapshot.outputs.push(state);
        self
    }

    /// Add a command signed by `signers`, all of them signing parties.
    pub fn add_command(
        mut self,
        value: impl Into<CommandData>,
        signers: impl IntoIterator<Item = Party>,
    ) -> Self {
        self.snapshot.commands.push(Command::new(value, signers));
        self
    }

    pub fn set_time_window(mut self, time_window: TimeWindow) -> Self {
        self.snapshot.time_window = Some(time_window);
        self
    }

    pub fn build(self) -> TransactionSnapshot {
        self.snapshot
    }
}
