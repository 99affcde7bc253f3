//! Configuration for the ledger engine.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants;

/// Policy knobs for the unlock engine and reconciler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Length of the standard free trial granted at account opening.
    pub trial_period_days: i64,
    /// Attempts for a whole-operation retry after a transient store
    /// failure (1 = no retry).
    pub transient_retry_attempts: u32,
}

impl LedgerConfig {
    /// End of a standard trial window starting at `now`.
    #[must_use]
    pub fn standard_trial_end(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::days(self.trial_period_days)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            trial_period_days: constants::DEFAULT_TRIAL_PERIOD_DAYS,
            transient_retry_attempts: constants::DEFAULT_TRANSIENT_RETRY_ATTEMPTS,
        }
    }
}
