//! Top-up receipts from the payment layer.
//!
//! Payment confirmations arrive via webhook and may be delivered more than
//! once. A [`TopupReceipt`] pins each external `session_id` to the grant it
//! produced, so a replayed confirmation can be answered with the original
//! result instead of a second credit.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{SessionId, UserId};

/// The durable record of one applied top-up.
///
/// `balance_after` captures the balance at commit time; a replay returns
/// it verbatim even if later unlocks have since moved the live balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopupReceipt {
    /// External idempotency key (payment checkout session).
    pub session_id: SessionId,
    /// The credited account.
    pub user_id: UserId,
    /// Credits granted by this confirmation.
    pub credits_granted: Decimal,
    /// Balance immediately after the grant committed.
    pub balance_after: Decimal,
    /// When the grant committed.
    pub applied_at: DateTime<Utc>,
}

/// Result of applying a top-up: the receipt plus whether this call was a
/// replay of an earlier confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopupOutcome {
    /// The receipt — freshly written, or the stored one on replay.
    pub receipt: TopupReceipt,
    /// True when the session had already been applied and nothing moved.
    pub replayed: bool,
}

impl TopupOutcome {
    /// Balance as of the receipt's commit.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.receipt.balance_after
    }
}
