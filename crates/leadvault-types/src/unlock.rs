//! Unlock records — the ledger's own entity.
//!
//! An [`UnlockRecord`] is the immutable fact that a user revealed a lead's
//! full contact details. At most one record exists per `(user, lead)` pair,
//! ever; records are never deleted ("unlock is forever").

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{LeadId, UserId};

/// The durable record of a single lead unlock.
///
/// `credits_used` is zero when the unlock was granted under an active
/// trial window, otherwise it equals the lead's `credits_required` at the
/// moment of unlock — later catalog repricing never rewrites history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnlockRecord {
    /// The unlocking user.
    pub user_id: UserId,
    /// The unlocked lead.
    pub lead_id: LeadId,
    /// Credits debited for this unlock (zero for trial unlocks).
    pub credits_used: Decimal,
    /// When the unlock committed.
    pub unlocked_at: DateTime<Utc>,
}

impl UnlockRecord {
    /// Whether this unlock debited nothing — an active trial window or a
    /// zero-cost lead; the record does not distinguish the two.
    #[must_use]
    pub fn was_free(&self) -> bool {
        self.credits_used.is_zero()
    }
}

impl std::fmt::Display for UnlockRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unlock[{} -> {}] {} credits at {}",
            self.user_id, self.lead_id, self.credits_used, self.unlocked_at,
        )
    }
}
