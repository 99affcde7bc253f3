//! # leadvault-engine
//!
//! **Transaction Plane**: the unlock transaction engine and the top-up
//! reconciler — the only two writers of credit balances.
//!
//! ## Architecture
//!
//! Both components drive a [`LedgerVault`](leadvault_store::LedgerVault)
//! and never touch state outside a transaction:
//! 1. **[`UnlockEngine`]**: eligibility check, trial-vs-paid decision,
//!    atomic unlock-record insert + debit, plus account opening and the
//!    balance/history/stats read paths
//! 2. **[`TopupReconciler`]**: idempotently applies external payment
//!    confirmations to balances
//!
//! ## Unlock flow
//!
//! ```text
//! caller → UnlockEngine.unlock_lead()
//!        → transact: lead? → unlocked? → trial? → credits? → insert (+ debit)
//!        → commit → UnlockRecord
//! ```
//!
//! Every failure before commit rolls the whole transaction back; after
//! commit the record is final and never corrected by a second write.

pub mod engine;
pub mod reconciler;

pub use engine::UnlockEngine;
pub use reconciler::TopupReconciler;
