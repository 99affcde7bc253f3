//! Trial eligibility — the single pure function that decides whether an
//! unlock is free.

use chrono::{DateTime, Utc};

/// Returns `true` iff a trial window is set and `now` falls strictly
/// before its end.
///
/// `now` is captured once at transaction start and evaluated inside the
/// same transaction boundary as the balance check; the window's value as
/// of transaction start is the chosen semantics. A trial expiring between
/// that instant and commit still grants the free unlock.
///
/// The boundary is exclusive: at exactly `trial_period_end` the trial is
/// over.
#[must_use]
pub fn trial_active(now: DateTime<Utc>, trial_period_end: Option<DateTime<Utc>>) -> bool {
    trial_period_end.is_some_and(|end| now < end)
}
