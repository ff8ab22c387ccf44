//! PlaceClause: issuance of a new indication-of-interest order.
//!
//! A Place group is a pure creation: nothing consumed, one state created,
//! signed by everyone the new state names as a participant.

use rust_decimal::Decimal;
use std::collections::BTreeSet;
use tracing::debug;

use crate::error::VerificationError;
use crate::model::{IoiState, Party, UniqueIdentifier};
use crate::transaction::{AuthenticatedCommand, CommandKind, TransactionSnapshot};

use super::{ClaimedCommands, Clause};

/// Checks, in order, the requirements for placing an order. The first
/// failing check is reported.
pub struct PlaceClause;

impl PlaceClause {
    pub fn new() -> Self {
        Self
    }

    fn single_place(
        commands: &[AuthenticatedCommand],
    ) -> Result<&AuthenticatedCommand, VerificationError> {
        let places: Vec<&AuthenticatedCommand> = commands
            .iter()
            .filter(|c| c.value.kind() == CommandKind::Place)
            .collect();

        match places.as_slice() {
            [only] => Ok(*only),
            _ => Err(VerificationError::CommandCount {
                kind: CommandKind::Place,
                count: places.len(),
            }),
        }
    }

    fn check_output(
        out: &IoiState,
        command: &AuthenticatedCommand,
    ) -> Result<(), VerificationError> {
        if out.buyer == out.seller {
            return Err(VerificationError::SameBuyerAndSeller {
                party: out.buyer.clone(),
            });
        }

        let missing: Vec<Party> = out
            .all_participants()
            .difference(&command.signers)
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(VerificationError::MissingSigners { missing });
        }

        // Delivery-country restrictions are intentionally not enforced.

        let order = &out.order;
        if order.quantity <= 0 {
            return Err(VerificationError::NonPositiveQuantity);
        }
        if order.price <= Decimal::ZERO {
            return Err(VerificationError::NonPositivePrice {
                price: order.price.to_string(),
            });
        }
        if order.ticker.trim().is_empty() {
            return Err(VerificationError::EmptyTicker);
        }

        Ok(())
    }
}

impl Default for PlaceClause {
    fn default() -> Self {
        Self::new()
    }
}

impl Clause<UniqueIdentifier> for PlaceClause {
    fn name(&self) -> &'static str {
        "Place"
    }

    fn required_commands(&self) -> BTreeSet<CommandKind> {
        BTreeSet::from([CommandKind::Place])
    }

    fn verify(
        &self,
        tx: &TransactionSnapshot,
        inputs: &[&IoiState],
        outputs: &[&IoiState],
        commands: &[AuthenticatedCommand],
        grouping_key: &UniqueIdentifier,
    ) -> Result<ClaimedCommands, VerificationError> {
        let command = Self::single_place(commands)?;

        if !inputs.is_empty() {
            return Err(VerificationError::InputsConsumed {
                group: grouping_key.to_string(),
                count: inputs.len(),
            });
        }

        let out = match outputs {
            [out] => *out,
            _ => {
                return Err(VerificationError::OutputCount {
                    group: grouping_key.to_string(),
                    count: outputs.len(),
                })
            }
        };

        Self::check_output(out, command)?;

        if let Some(window) = &tx.time_window {
            debug!(group = %grouping_key, midpoint = %window.midpoint(), "order placed");
        }

        Ok(ClaimedCommands::from([command.value]))
    }
}
