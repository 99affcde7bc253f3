//! Error types for the LeadVault credit ledger.
//!
//! All errors use the `LV_ERR_` prefix convention for easy grepping in
//! logs. Error codes are grouped by subsystem:
//! - 1xx: Account errors
//! - 2xx: Catalog errors
//! - 3xx: Unlock errors
//! - 4xx: Top-up errors
//! - 9xx: Store / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{LeadId, SessionId, UserId};

/// Central error enum for all ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // =================================================================
    // Account Errors (1xx)
    // =================================================================
    /// No credit account exists for this user.
    #[error("LV_ERR_100: Account not found: {0}")]
    AccountNotFound(UserId),

    /// An account already exists for this user.
    #[error("LV_ERR_101: Account already exists: {0}")]
    AccountAlreadyExists(UserId),

    /// Not enough credits to pay for the unlock.
    #[error("LV_ERR_102: Insufficient credits: need {needed}, have {available}")]
    InsufficientCredits { needed: Decimal, available: Decimal },

    // =================================================================
    // Catalog Errors (2xx)
    // =================================================================
    /// The requested lead is not in the catalog.
    #[error("LV_ERR_200: Lead not found: {0}")]
    LeadNotFound(LeadId),

    /// A lead with this ID is already published.
    #[error("LV_ERR_201: Lead already published: {0}")]
    LeadAlreadyPublished(LeadId),

    // =================================================================
    // Unlock Errors (3xx)
    // =================================================================
    /// The user has already unlocked this lead. Idempotent rejection:
    /// success-adjacent, not a failure callers must escalate.
    #[error("LV_ERR_300: Lead {lead_id} already unlocked by {user_id}")]
    AlreadyUnlocked { user_id: UserId, lead_id: LeadId },

    /// Storage-level uniqueness violation on the `(user, lead)` key.
    /// The engine translates this into [`LedgerError::AlreadyUnlocked`].
    #[error("LV_ERR_301: Duplicate unlock insert for {user_id}/{lead_id}")]
    DuplicateUnlock { user_id: UserId, lead_id: LeadId },

    // =================================================================
    // Top-up Errors (4xx)
    // =================================================================
    /// Storage-level uniqueness violation on the `session_id` key.
    /// The reconciler answers replays with the stored receipt instead.
    #[error("LV_ERR_400: Top-up session already applied: {0}")]
    DuplicateTopup(SessionId),

    /// The top-up request is malformed (e.g. a non-positive grant).
    #[error("LV_ERR_401: Invalid top-up: {reason}")]
    InvalidTopup { reason: String },

    // =================================================================
    // Store / Internal (9xx)
    // =================================================================
    /// Transaction conflict, timeout, or poisoned store. Nothing was
    /// committed — the whole operation is safe to retry from scratch.
    #[error("LV_ERR_900: Transient store failure: {reason}")]
    Transient { reason: String },

    /// Unrecoverable internal error.
    #[error("LV_ERR_901: Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Whether retrying the whole operation from scratch is safe.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LedgerError>;
