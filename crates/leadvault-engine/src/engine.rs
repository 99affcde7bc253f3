//! The unlock transaction engine.
//!
//! One `unlock_lead` call is one atomic transaction: load the lead, check
//! for a prior unlock, evaluate the trial window, verify credits, insert
//! the record, debit if paid, commit. Any failure along the way rolls the
//! whole unit back — a debit is never visible without its unlock record,
//! or vice versa.

use chrono::Utc;
use leadvault_types::{
    BalanceView, CreditAccount, Lead, LeadId, LedgerConfig, LedgerError, LedgerStats, Result,
    TrialGrant, UnlockRecord, UserId, trial_active,
};
use leadvault_store::{LedgerVault, unit::read_only};
use rust_decimal::Decimal;

/// Orchestrates unlock transactions over a [`LedgerVault`].
///
/// The engine owns no state of its own; everything lives in the vault so
/// that concurrent engine instances (or concurrent service processes over
/// a shared store) stay correct through the storage-level uniqueness keys.
pub struct UnlockEngine<V> {
    vault: V,
    config: LedgerConfig,
}

impl<V: LedgerVault> UnlockEngine<V> {
    /// Create an engine with default configuration.
    #[must_use]
    pub fn new(vault: V) -> Self {
        Self::with_config(vault, LedgerConfig::default())
    }

    /// Create an engine with explicit configuration.
    #[must_use]
    pub fn with_config(vault: V, config: LedgerConfig) -> Self {
        Self { vault, config }
    }

    /// The vault this engine drives. The reconciler shares it.
    pub fn vault(&self) -> &V {
        &self.vault
    }

    /// Unlock a lead for a user, debiting credits unless the user's trial
    /// window is active.
    ///
    /// Returns the created [`UnlockRecord`]. The balance is reduced by
    /// exactly the charged amount, exactly once, even under concurrent
    /// duplicate calls: the `(user, lead)` uniqueness key lets exactly one
    /// insert win, and the loser surfaces as `AlreadyUnlocked`.
    ///
    /// # Errors
    /// - [`LedgerError::LeadNotFound`] if the lead is not in the catalog
    /// - [`LedgerError::AlreadyUnlocked`] if this pair already unlocked
    ///   (idempotent rejection — success-adjacent, nothing changed)
    /// - [`LedgerError::AccountNotFound`] if the user has no account
    /// - [`LedgerError::InsufficientCredits`] if not on trial and the
    ///   balance is short; nothing is mutated
    /// - [`LedgerError::Transient`] if the store failed before commit
    pub fn unlock_lead(&self, user_id: UserId, lead_id: LeadId) -> Result<UnlockRecord> {
        // Trial eligibility uses the transaction-start clock; the window's
        // value as of this instant is the chosen semantics.
        let now = Utc::now();

        let record = self.vault.transact(|unit| {
            let lead = unit
                .lead(lead_id)?
                .ok_or(LedgerError::LeadNotFound(lead_id))?;

            if unit.unlock(user_id, lead_id)?.is_some() {
                return Err(LedgerError::AlreadyUnlocked { user_id, lead_id });
            }

            let account = unit
                .account(user_id)?
                .ok_or(LedgerError::AccountNotFound(user_id))?;

            let on_trial = trial_active(now, account.trial_period_end);
            let cost = lead.cost();

            if !on_trial && account.credits < cost {
                return Err(LedgerError::InsufficientCredits {
                    needed: cost,
                    available: account.credits,
                });
            }

            let record = UnlockRecord {
                user_id,
                lead_id,
                credits_used: if on_trial { Decimal::ZERO } else { cost },
                unlocked_at: now,
            };

            if let Err(err) = unit.insert_unlock(&record) {
                // The uniqueness key is the real concurrency guard: a
                // racing transaction got here first.
                return Err(match err {
                    LedgerError::DuplicateUnlock { .. } => {
                        LedgerError::AlreadyUnlocked { user_id, lead_id }
                    }
                    other => other,
                });
            }

            if !record.credits_used.is_zero() {
                unit.adjust_balance(user_id, -record.credits_used)?;
            }

            Ok(record)
        });

        match &record {
            Ok(record) => tracing::info!(
                %user_id, %lead_id,
                credits_used = %record.credits_used,
                free = record.was_free(),
                "lead unlocked"
            ),
            Err(LedgerError::AlreadyUnlocked { .. }) => {
                tracing::debug!(%user_id, %lead_id, "unlock replayed, pair already unlocked");
            }
            Err(LedgerError::InsufficientCredits { needed, available }) => {
                tracing::warn!(%user_id, %lead_id, %needed, %available, "unlock rejected");
            }
            Err(_) => {}
        }
        record
    }

    /// [`unlock_lead`](Self::unlock_lead), retried on transient store
    /// failures up to the configured attempt count.
    ///
    /// Safe because a transient failure commits nothing; the call replays
    /// from scratch.
    pub fn unlock_lead_with_retry(&self, user_id: UserId, lead_id: LeadId) -> Result<UnlockRecord> {
        let attempts = self.config.transient_retry_attempts.max(1);
        let mut last = None;
        for _ in 0..attempts {
            match self.unlock_lead(user_id, lead_id) {
                Err(err) if err.is_transient() => last = Some(err),
                other => return other,
            }
        }
        Err(last.unwrap_or(LedgerError::Internal("retry loop exhausted".into())))
    }

    /// Open a credit account for a freshly signed-up user.
    ///
    /// Balance starts at zero; the trial window is fixed here and never
    /// mutated afterwards.
    ///
    /// # Errors
    /// [`LedgerError::AccountAlreadyExists`] if the user already has one.
    pub fn open_account(&self, user_id: UserId, trial: TrialGrant) -> Result<CreditAccount> {
        let trial_period_end = match trial {
            TrialGrant::None => None,
            TrialGrant::Standard => Some(self.config.standard_trial_end(Utc::now())),
            TrialGrant::Until(end) => Some(end),
        };
        let account = CreditAccount::open(user_id, trial_period_end);
        self.vault.transact(|unit| unit.insert_account(&account))?;
        tracing::info!(%user_id, trial = ?trial_period_end, "account opened");
        Ok(account)
    }

    /// Publish a lead into the catalog.
    ///
    /// The unlock path treats the catalog as read-only; this is the
    /// seeding hook for the platform that owns lead ingestion.
    ///
    /// # Errors
    /// [`LedgerError::LeadAlreadyPublished`] if the ID is taken.
    pub fn publish_lead(&self, lead: Lead) -> Result<()> {
        self.vault.transact(|unit| unit.insert_lead(&lead))
    }

    /// Current balance and trial status for a user.
    ///
    /// # Errors
    /// [`LedgerError::AccountNotFound`] if the user has no account.
    pub fn balance(&self, user_id: UserId) -> Result<BalanceView> {
        let now = Utc::now();
        read_only(&self.vault, |unit| {
            let account = unit
                .account(user_id)?
                .ok_or(LedgerError::AccountNotFound(user_id))?;
            Ok(BalanceView {
                credits: account.credits,
                trial_active: account.on_trial(now),
            })
        })
    }

    /// All unlocks by a user, newest first.
    pub fn unlock_history(&self, user_id: UserId) -> Result<Vec<UnlockRecord>> {
        read_only(&self.vault, |unit| unit.unlocks_for(user_id))
    }

    /// Dashboard stats: balance, catalog size, unlocked count.
    ///
    /// # Errors
    /// [`LedgerError::AccountNotFound`] if the user has no account.
    pub fn stats(&self, user_id: UserId) -> Result<LedgerStats> {
        read_only(&self.vault, |unit| {
            let account = unit
                .account(user_id)?
                .ok_or(LedgerError::AccountNotFound(user_id))?;
            Ok(LedgerStats {
                credits: account.credits,
                total_leads: unit.lead_count()?,
                unlocked_leads: unit.unlock_count_for(user_id)?,
            })
        })
    }
}
