//! # leadvault-types
//!
//! Shared types, errors, and configuration for the **LeadVault** credit
//! ledger.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`UserId`], [`LeadId`], [`SessionId`]
//! - **Account model**: [`CreditAccount`], [`BalanceView`], [`TrialGrant`]
//! - **Catalog model**: [`Lead`]
//! - **Unlock model**: [`UnlockRecord`]
//! - **Top-up model**: [`TopupReceipt`], [`TopupOutcome`]
//! - **Stats model**: [`LedgerStats`]
//! - **Trial eligibility**: [`trial_active`]
//! - **Configuration**: [`LedgerConfig`]
//! - **Errors**: [`LedgerError`] with `LV_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod account;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod lead;
pub mod stats;
pub mod topup;
pub mod trial;
pub mod unlock;

// Re-export all primary types at crate root for ergonomic imports:
//   use leadvault_types::{CreditAccount, UnlockRecord, LedgerError, ...};

pub use account::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use lead::*;
pub use stats::*;
pub use topup::*;
pub use trial::*;
pub use unlock::*;

// Constants are accessed via `leadvault_types::constants::FOO`
// (not re-exported to avoid name collisions).
