//! Per-user ledger statistics for dashboard surfaces.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of a user's standing against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerStats {
    /// Current credit balance.
    pub credits: Decimal,
    /// Total leads in the catalog.
    pub total_leads: usize,
    /// Leads this user has unlocked.
    pub unlocked_leads: usize,
}
