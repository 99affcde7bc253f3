//! # leadvault-store
//!
//! **Storage Plane**: the transactional seam between the ledger engine and
//! whatever actually holds the data.
//!
//! ## Architecture
//!
//! Two traits and one implementation:
//! 1. **[`LedgerUnit`]**: a unit of work — every read and write the engine
//!    performs inside one transaction
//! 2. **[`LedgerVault`]**: the transaction factory; `transact` runs a
//!    closure against a unit and commits iff it returns `Ok`
//! 3. **[`MemoryVault`]**: serializable in-memory implementation used for
//!    tests and single-process deployments
//!
//! ## Commit discipline
//!
//! ```text
//! engine → vault.transact(|unit| { reads… writes… }) → commit | rollback
//! ```
//!
//! A debit is **never** visible without its matching unlock record: both
//! happen in the same unit and land at the same commit point. The decisive
//! concurrency guards are the uniqueness keys on `(user, lead)` and on the
//! top-up `session_id`, enforced at insert time inside the unit.

pub mod memory;
pub mod unit;

pub use memory::MemoryVault;
pub use unit::{LedgerUnit, LedgerVault};
