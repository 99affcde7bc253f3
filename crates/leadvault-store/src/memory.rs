//! In-memory ledger vault.
//!
//! [`MemoryVault`] serializes transactions behind a mutex and gives each
//! one a private working copy of the state. The copy is published back
//! only when the closure returns `Ok`, so isolation is trivially
//! serializable and rollback is "drop the copy". Uniqueness keys live in
//! the map keys themselves: `(user, lead)` for unlocks, `session_id` for
//! top-ups.
//!
//! Suitable for tests and single-process deployments; a SQL-backed vault
//! would implement the same traits over real transactions.

use std::collections::HashMap;
use std::sync::Mutex;

use leadvault_types::{
    CreditAccount, Lead, LeadId, LedgerError, Result, SessionId, TopupReceipt, UnlockRecord, UserId,
};
use rust_decimal::Decimal;

use crate::unit::{LedgerUnit, LedgerVault, checked_balance, history_key};

/// Full ledger state: accounts, catalog, unlock ledger, top-up log.
#[derive(Debug, Default, Clone)]
struct VaultState {
    accounts: HashMap<UserId, CreditAccount>,
    leads: HashMap<LeadId, Lead>,
    unlocks: HashMap<(UserId, LeadId), UnlockRecord>,
    topups: HashMap<SessionId, TopupReceipt>,
}

/// Serializable in-memory implementation of [`LedgerVault`].
#[derive(Debug, Default)]
pub struct MemoryVault {
    state: Mutex<VaultState>,
}

impl MemoryVault {
    /// Create an empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerVault for MemoryVault {
    fn transact<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerUnit) -> Result<T>,
    {
        let mut guard = self.state.lock().map_err(|_| LedgerError::Transient {
            reason: "ledger lock poisoned".into(),
        })?;

        // Work on a private copy; publish it only on Ok. An Err leaves the
        // shared state exactly as it was — the rollback guarantee.
        let mut unit = MemoryUnit {
            state: guard.clone(),
        };
        let out = op(&mut unit)?;
        *guard = unit.state;
        tracing::trace!("transaction committed");
        Ok(out)
    }
}

/// One in-flight transaction over a working copy of the state.
struct MemoryUnit {
    state: VaultState,
}

impl LedgerUnit for MemoryUnit {
    fn account(&self, user_id: UserId) -> Result<Option<CreditAccount>> {
        Ok(self.state.accounts.get(&user_id).cloned())
    }

    fn insert_account(&mut self, account: &CreditAccount) -> Result<()> {
        if self.state.accounts.contains_key(&account.user_id) {
            return Err(LedgerError::AccountAlreadyExists(account.user_id));
        }
        self.state.accounts.insert(account.user_id, account.clone());
        Ok(())
    }

    fn adjust_balance(&mut self, user_id: UserId, delta: Decimal) -> Result<Decimal> {
        let account = self
            .state
            .accounts
            .get_mut(&user_id)
            .ok_or(LedgerError::AccountNotFound(user_id))?;
        account.credits = checked_balance(account.credits, delta)?;
        Ok(account.credits)
    }

    fn lead(&self, lead_id: LeadId) -> Result<Option<Lead>> {
        Ok(self.state.leads.get(&lead_id).cloned())
    }

    fn insert_lead(&mut self, lead: &Lead) -> Result<()> {
        if self.state.leads.contains_key(&lead.lead_id) {
            return Err(LedgerError::LeadAlreadyPublished(lead.lead_id));
        }
        self.state.leads.insert(lead.lead_id, lead.clone());
        Ok(())
    }

    fn lead_count(&self) -> Result<usize> {
        Ok(self.state.leads.len())
    }

    fn unlock(&self, user_id: UserId, lead_id: LeadId) -> Result<Option<UnlockRecord>> {
        Ok(self.state.unlocks.get(&(user_id, lead_id)).cloned())
    }

    fn insert_unlock(&mut self, record: &UnlockRecord) -> Result<()> {
        let key = (record.user_id, record.lead_id);
        if self.state.unlocks.contains_key(&key) {
            return Err(LedgerError::DuplicateUnlock {
                user_id: record.user_id,
                lead_id: record.lead_id,
            });
        }
        self.state.unlocks.insert(key, record.clone());
        Ok(())
    }

    fn unlocks_for(&self, user_id: UserId) -> Result<Vec<UnlockRecord>> {
        let mut records: Vec<UnlockRecord> = self
            .state
            .unlocks
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(history_key);
        Ok(records)
    }

    fn unlock_count_for(&self, user_id: UserId) -> Result<usize> {
        Ok(self
            .state
            .unlocks
            .values()
            .filter(|r| r.user_id == user_id)
            .count())
    }

    fn topup(&self, session_id: &SessionId) -> Result<Option<TopupReceipt>> {
        Ok(self.state.topups.get(session_id).cloned())
    }

    fn insert_topup(&mut self, receipt: &TopupReceipt) -> Result<()> {
        if self.state.topups.contains_key(&receipt.session_id) {
            return Err(LedgerError::DuplicateTopup(receipt.session_id.clone()));
        }
        self.state
            .topups
            .insert(receipt.session_id.clone(), receipt.clone());
        Ok(())
    }
}
