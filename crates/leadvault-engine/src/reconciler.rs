//! Credit top-up reconciliation.
//!
//! Payment confirmations arrive from a webhook and may be delivered more
//! than once. Each confirmation carries an external `session_id`; the
//! reconciler applies it at most once and answers replays with the stored
//! receipt. Signature verification happened upstream — every call here is
//! treated as possibly duplicated but already authentic.

use chrono::Utc;
use leadvault_types::{
    LedgerError, Result, SessionId, TopupOutcome, TopupReceipt, UserId,
};
use leadvault_store::LedgerVault;
use rust_decimal::Decimal;

/// Idempotently applies payment confirmations to credit balances.
pub struct TopupReconciler<V> {
    vault: V,
}

impl<V: LedgerVault> TopupReconciler<V> {
    /// Create a reconciler over the given vault.
    #[must_use]
    pub fn new(vault: V) -> Self {
        Self { vault }
    }

    /// Apply a payment confirmation.
    ///
    /// If `session_id` was already applied, returns the stored receipt
    /// flagged `replayed` without mutating anything — including the
    /// receipt's `balance_after`, which reflects the original commit even
    /// if the live balance has since moved. The replay check comes before
    /// any validation: a redelivery is answered with the original result
    /// regardless of how the rest of the payload arrives. Otherwise
    /// atomically records the session as consumed and credits the balance;
    /// the `session_id` uniqueness key backs the replay check under
    /// concurrent delivery — a racing insert that loses to it is resolved
    /// to the winner's receipt, never surfaced as an error.
    ///
    /// # Errors
    /// - [`LedgerError::InvalidTopup`] if `credits_granted` is not
    ///   positive
    /// - [`LedgerError::AccountNotFound`] if the user has no account
    ///   (an orphaned payment — reported for manual reconciliation, not
    ///   retried)
    /// - [`LedgerError::Transient`] if the store failed before commit
    pub fn apply_topup(
        &self,
        session_id: SessionId,
        user_id: UserId,
        credits_granted: Decimal,
    ) -> Result<TopupOutcome> {
        let now = Utc::now();
        let applied = self.vault.transact(|unit| {
            if let Some(prior) = unit.topup(&session_id)? {
                return Ok(TopupOutcome {
                    receipt: prior,
                    replayed: true,
                });
            }

            if credits_granted <= Decimal::ZERO {
                return Err(LedgerError::InvalidTopup {
                    reason: format!("grant must be positive, got {credits_granted}"),
                });
            }

            // Touch the account before crediting so an orphaned payment
            // fails cleanly instead of minting a balance from nowhere.
            if unit.account(user_id)?.is_none() {
                return Err(LedgerError::AccountNotFound(user_id));
            }

            let balance_after = unit.adjust_balance(user_id, credits_granted)?;
            let receipt = TopupReceipt {
                session_id: session_id.clone(),
                user_id,
                credits_granted,
                balance_after,
                applied_at: now,
            };
            unit.insert_topup(&receipt)?;

            Ok(TopupOutcome {
                receipt,
                replayed: false,
            })
        });

        let outcome = match applied {
            Ok(outcome) => outcome,
            // A concurrent delivery committed between our replay lookup
            // and the insert; the uniqueness key caught it. Answer with
            // the winner's receipt.
            Err(LedgerError::DuplicateTopup(_)) => self.vault.transact(|unit| {
                unit.topup(&session_id)?
                    .map(|receipt| TopupOutcome {
                        receipt,
                        replayed: true,
                    })
                    .ok_or_else(|| {
                        LedgerError::Internal(format!(
                            "top-up session {session_id} missing after duplicate insert"
                        ))
                    })
            })?,
            Err(err) => return Err(err),
        };

        if outcome.replayed {
            tracing::debug!(%session_id, %user_id, "top-up replayed, session already applied");
        } else {
            tracing::info!(
                %session_id, %user_id,
                credits_granted = %credits_granted,
                balance = %outcome.balance(),
                "top-up applied"
            );
        }
        Ok(outcome)
    }
}
