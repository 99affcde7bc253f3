//! The unit-of-work seam.
//!
//! [`LedgerUnit`] is everything the engine may do inside one transaction;
//! [`LedgerVault`] hands units out and owns the commit decision. Backends
//! are expected to provide serializable-or-better isolation — multiple
//! service instances may run concurrently, so in-process locking alone is
//! never the guard; the uniqueness keys are.

use chrono::{DateTime, Utc};
use leadvault_types::{
    CreditAccount, Lead, LeadId, LedgerError, Result, SessionId, TopupReceipt, UnlockRecord, UserId,
};
use rust_decimal::Decimal;

/// One transaction's worth of ledger access.
///
/// Reads observe the transaction's own writes. Writes become durable only
/// if the enclosing [`LedgerVault::transact`] closure returns `Ok`; any
/// error rolls the whole unit back — no partial debit, no orphan record.
pub trait LedgerUnit {
    // --- Ledger Store -----------------------------------------------------

    /// Load a user's credit account.
    fn account(&self, user_id: UserId) -> Result<Option<CreditAccount>>;

    /// Create a credit account.
    ///
    /// # Errors
    /// [`LedgerError::AccountAlreadyExists`] if the user already has one.
    fn insert_account(&mut self, account: &CreditAccount) -> Result<()>;

    /// Apply a signed delta to the balance and return the new balance.
    ///
    /// # Errors
    /// - [`LedgerError::AccountNotFound`] if the user does not exist
    /// - [`LedgerError::InsufficientCredits`] if a negative delta would
    ///   take the balance below zero
    fn adjust_balance(&mut self, user_id: UserId, delta: Decimal) -> Result<Decimal>;

    // --- Lead Catalog (read-mostly) ---------------------------------------

    /// Look up a published lead.
    fn lead(&self, lead_id: LeadId) -> Result<Option<Lead>>;

    /// Publish a lead into the catalog.
    ///
    /// # Errors
    /// [`LedgerError::LeadAlreadyPublished`] if the ID is taken.
    fn insert_lead(&mut self, lead: &Lead) -> Result<()>;

    /// Number of leads in the catalog.
    fn lead_count(&self) -> Result<usize>;

    // --- Unlock Ledger (append-only) --------------------------------------

    /// Fetch the unlock record for a `(user, lead)` pair, if any.
    fn unlock(&self, user_id: UserId, lead_id: LeadId) -> Result<Option<UnlockRecord>>;

    /// Append an unlock record.
    ///
    /// # Errors
    /// [`LedgerError::DuplicateUnlock`] on a `(user, lead)` uniqueness
    /// violation — the storage-level guard against concurrent double
    /// unlocks.
    fn insert_unlock(&mut self, record: &UnlockRecord) -> Result<()>;

    /// All unlock records for a user, newest first.
    fn unlocks_for(&self, user_id: UserId) -> Result<Vec<UnlockRecord>>;

    /// Number of unlock records for a user.
    fn unlock_count_for(&self, user_id: UserId) -> Result<usize>;

    // --- Top-up log -------------------------------------------------------

    /// Fetch the receipt for an already-applied top-up session, if any.
    fn topup(&self, session_id: &SessionId) -> Result<Option<TopupReceipt>>;

    /// Record a top-up session as consumed.
    ///
    /// # Errors
    /// [`LedgerError::DuplicateTopup`] on a `session_id` uniqueness
    /// violation.
    fn insert_topup(&mut self, receipt: &TopupReceipt) -> Result<()>;
}

/// Transaction factory for ledger state.
pub trait LedgerVault {
    /// Run `op` inside one atomic transaction.
    ///
    /// Commits iff `op` returns `Ok`; on any error every write in the unit
    /// is discarded. Either the whole operation completes or none of it
    /// does — mid-transaction cancellation is not supported.
    ///
    /// # Errors
    /// Propagates `op`'s error, or [`LedgerError::Transient`] when the
    /// store itself failed before the commit decision (safe to retry from
    /// scratch).
    fn transact<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerUnit) -> Result<T>;
}

/// Shared vaults transact through the shared handle; the engine and the
/// reconciler typically hold clones of one `Arc<MemoryVault>`.
impl<V: LedgerVault + ?Sized> LedgerVault for std::sync::Arc<V> {
    fn transact<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerUnit) -> Result<T>,
    {
        (**self).transact(op)
    }
}

/// Convenience wrapper for pure reads: a transaction that never writes.
pub fn read_only<V, T, F>(vault: &V, op: F) -> Result<T>
where
    V: LedgerVault,
    F: FnOnce(&dyn LedgerUnit) -> Result<T>,
{
    vault.transact(|unit| op(unit))
}

/// Helper shared by vault implementations: the debit-side guard of
/// `adjust_balance`.
///
/// # Errors
/// [`LedgerError::InsufficientCredits`] if `balance + delta` is negative.
pub(crate) fn checked_balance(
    balance: Decimal,
    delta: Decimal,
) -> std::result::Result<Decimal, LedgerError> {
    let next = balance + delta;
    if next < Decimal::ZERO {
        return Err(LedgerError::InsufficientCredits {
            needed: -delta,
            available: balance,
        });
    }
    Ok(next)
}

/// Sort key for history listings: newest first, lead id as tiebreaker so
/// same-instant unlocks order deterministically.
pub(crate) fn history_key(record: &UnlockRecord) -> (std::cmp::Reverse<DateTime<Utc>>, LeadId) {
    (std::cmp::Reverse(record.unlocked_at), record.lead_id)
}
