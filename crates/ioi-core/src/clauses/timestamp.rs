//! TimestampClause: the transaction must carry a time window.

use crate::error::VerificationError;
use crate::model::IoiState;
use crate::transaction::{AuthenticatedCommand, TransactionSnapshot};

use super::{ClaimedCommands, Clause};

/// Structural precondition independent of groups. Claims no commands.
pub struct TimestampClause;

impl TimestampClause {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TimestampClause {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clause<K> for TimestampClause {
    fn name(&self) -> &'static str {
        "Timestamp"
    }

    fn verify(
        &self,
        tx: &TransactionSnapshot,
        _inputs: &[&IoiState],
        _outputs: &[&IoiState],
        _commands: &[AuthenticatedCommand],
        _grouping_key: &K,
    ) -> Result<ClaimedCommands, VerificationError> {
        match tx.time_window {
            Some(_) => Ok(ClaimedCommands::new()),
            None => Err(VerificationError::MissingTimestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TimeWindow;
    use chrono::{Duration, Utc};

    #[test]
    fn test_missing_window_fails() {
        let tx = TransactionSnapshot::default();
        let result = Clause::<()>::verify(&TimestampClause::new(), &tx, &[], &[], &[], &());
        assert_eq!(result, Err(VerificationError::MissingTimestamp));
    }

    #[test]
    fn test_present_window_claims_nothing() {
        let tx = TransactionSnapshot {
            time_window: Some(
                TimeWindow::with_tolerance(Utc::now(), Duration::seconds(30)).unwrap(),
            ),
            ..Default::default()
        };
        let result = Clause::<()>::verify(&TimestampClause::new(), &tx, &[], &[], &[], &());
        assert_eq!(result, Ok(ClaimedCommands::new()));
    }

    #[test]
    fn test_requires_no_commands() {
        assert!(Clause::<()>::required_commands(&TimestampClause).is_empty());
    }
}
