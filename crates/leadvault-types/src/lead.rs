//! Lead catalog entries.
//!
//! The catalog is owned by the wider platform; the ledger core only reads
//! `(lead_id, credits_required)` to price an unlock. A lead is immutable
//! once published.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::LeadId;

/// The ledger-relevant subset of a published lead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lead {
    /// Unique lead identifier.
    pub lead_id: LeadId,
    /// Credits charged for a paid unlock. Zero is legal (a free lead).
    pub credits_required: u32,
    /// When the lead entered the catalog.
    pub published_at: DateTime<Utc>,
}

impl Lead {
    /// Publish a new lead with the given unlock cost.
    #[must_use]
    pub fn publish(credits_required: u32) -> Self {
        Self {
            lead_id: LeadId::new(),
            credits_required,
            published_at: Utc::now(),
        }
    }

    /// The unlock cost as a ledger amount.
    #[must_use]
    pub fn cost(&self) -> Decimal {
        Decimal::from(self.credits_required)
    }
}
