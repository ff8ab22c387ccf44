//! Entity model: the indication-of-interest order and the ledger state
//! wrapping it.
//!
//! States are immutable value objects. Changing an order means superseding
//! the state with a new version that carries the same [`UniqueIdentifier`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// An identity on the ledger (a buyer, a seller, a notary, a broker...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Party(String);

impl Party {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Linear identifier shared by every version of the same logical record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UniqueIdentifier {
    /// Optional reference meaningful to systems outside the ledger
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    pub id: Uuid,
}

impl UniqueIdentifier {
    /// Create a fresh identifier backed by a random UUID.
    pub fn new(external_id: Option<String>) -> Self {
        Self {
            external_id,
            id: Uuid::new_v4(),
        }
    }

    /// Rebuild an identifier from known parts.
    pub fn from_parts(external_id: Option<String>, id: Uuid) -> Self {
        Self { external_id, id }
    }
}

impl Default for UniqueIdentifier {
    fn default() -> Self {
        Self::new(None)
    }
}

impl fmt::Display for UniqueIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.external_id {
            Some(external) => write!(f, "{}_{}", external, self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

/// The order being indicated: how many, of what, at which price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub quantity: i64,
    pub ticker: String,
    pub price: Decimal,
}

impl Order {
    pub fn new(quantity: i64, ticker: impl Into<String>, price: Decimal) -> Self {
        Self {
            quantity,
            ticker: ticker.into(),
            price,
        }
    }
}

/// Ledger state holding one indication-of-interest order between a buyer
/// and a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoiState {
    pub linear_id: UniqueIdentifier,
    pub buyer: Party,
    pub seller: Party,

    /// Parties entitled to (and obliged to) sign transitions of this state.
    /// Buyer and seller are always implied, see [`IoiState::all_participants`].
    #[serde(default)]
    pub participants: Vec<Party>,

    pub order: Order,
}

impl IoiState {
    /// A brand new record with a fresh linear id, signed over by buyer and seller.
    pub fn new(buyer: Party, seller: Party, order: Order) -> Self {
        let participants = vec![buyer.clone(), seller.clone()];
        Self {
            linear_id: UniqueIdentifier::default(),
            buyer,
            seller,
            participants,
            order,
        }
    }

    pub fn with_linear_id(mut self, linear_id: UniqueIdentifier) -> Self {
        self.linear_id = linear_id;
        self
    }

    /// Add a participant beyond buyer and seller (e.g. a broker).
    pub fn with_participant(mut self, party: Party) -> Self {
        if !self.participants.contains(&party) {
            self.participants.push(party);
        }
        self
    }

    /// Grouping key extractor.
    pub fn linear_id(&self) -> UniqueIdentifier {
        self.linear_id.clone()
    }

    /// Every party whose signature is required, buyer and seller included.
    pub fn all_participants(&self) -> BTreeSet<Party> {
        let mut all: BTreeSet<Party> = self.participants.iter().cloned().collect();
        all.insert(self.buyer.clone());
        all.insert(self.seller.clone());
        all
    }
}
