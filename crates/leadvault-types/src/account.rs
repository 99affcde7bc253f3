//! Credit account state for a single user.
//!
//! The balance is mutated only by the unlock engine (debit) and the top-up
//! reconciler (credit) — never set directly by request handlers. The trial
//! window is fixed at account opening and never changes afterwards.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{UserId, trial_active};

/// The ledger's view of one user: a credit balance and an optional
/// time-bounded free-trial window.
///
/// Invariant: `credits >= 0` after every committed transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreditAccount {
    /// The account owner.
    pub user_id: UserId,
    /// Current credit balance. Never negative after a commit.
    pub credits: Decimal,
    /// End of the free-trial window, if one was granted at opening.
    pub trial_period_end: Option<DateTime<Utc>>,
    /// When the account was opened.
    pub opened_at: DateTime<Utc>,
}

impl CreditAccount {
    /// Open a fresh account with a zero balance.
    #[must_use]
    pub fn open(user_id: UserId, trial_period_end: Option<DateTime<Utc>>) -> Self {
        Self {
            user_id,
            credits: Decimal::ZERO,
            trial_period_end,
            opened_at: Utc::now(),
        }
    }

    /// Whether the trial window is active at `now`.
    #[must_use]
    pub fn on_trial(&self, now: DateTime<Utc>) -> bool {
        trial_active(now, self.trial_period_end)
    }
}

/// Read-only balance snapshot exposed to collaborators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceView {
    /// Current credit balance.
    pub credits: Decimal,
    /// Whether the free-trial window is active right now.
    pub trial_active: bool,
}

/// Trial policy applied when an account is opened.
///
/// The auth layer decides which grant a signup receives; the ledger only
/// records the resulting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialGrant {
    /// No free trial.
    None,
    /// The configured standard trial length, counted from now.
    Standard,
    /// An explicit window end (e.g. a promotional extension).
    Until(DateTime<Utc>),
}
