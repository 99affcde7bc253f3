//! System-wide constants for the LeadVault credit ledger.

/// Default free-trial length granted at signup, in days.
pub const DEFAULT_TRIAL_PERIOD_DAYS: i64 = 10;

/// Default number of attempts for operations that failed transiently.
/// Transient failures commit nothing, so the whole call is retried.
pub const DEFAULT_TRANSIENT_RETRY_ATTEMPTS: u32 = 3;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Ledger name.
pub const LEDGER_NAME: &str = "LeadVault";
