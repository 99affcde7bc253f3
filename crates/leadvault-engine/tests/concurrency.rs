//! Concurrency tests for the ledger's uniqueness guards.
//!
//! Many request-handling threads share one vault; the `(user, lead)` and
//! `session_id` uniqueness keys must let exactly one writer win while the
//! rest observe an idempotent rejection — and exactly one debit or credit
//! must land.

use std::sync::Arc;
use std::thread;

use leadvault_engine::{TopupReconciler, UnlockEngine};
use leadvault_store::MemoryVault;
use leadvault_types::{
    Lead, LeadId, LedgerError, SessionId, TrialGrant, UserId,
};
use rust_decimal::Decimal;

const THREADS: usize = 8;

fn shared_engine() -> Arc<UnlockEngine<Arc<MemoryVault>>> {
    Arc::new(UnlockEngine::new(Arc::new(MemoryVault::new())))
}

// =============================================================================
// Test: Concurrent double-unlock — exactly one debit of 40, final balance 60
// =============================================================================
#[test]
fn concurrent_double_unlock_debits_once() {
    let engine = shared_engine();
    let user = UserId::new();
    engine.open_account(user, TrialGrant::None).unwrap();

    let reconciler = TopupReconciler::new(Arc::clone(engine.vault()));
    reconciler
        .apply_topup(SessionId::new("cs_race"), user, Decimal::new(100, 0))
        .unwrap();

    let lead = Lead::publish(40);
    let lead_id = lead.lead_id;
    engine.publish_lead(lead).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || engine.unlock_lead(user, lead_id))
        })
        .collect();

    let mut successes = 0;
    let mut already = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(record) => {
                assert_eq!(record.credits_used, Decimal::new(40, 0));
                successes += 1;
            }
            Err(LedgerError::AlreadyUnlocked { .. }) => already += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 1, "exactly one unlock must win");
    assert_eq!(already, THREADS - 1);
    assert_eq!(engine.balance(user).unwrap().credits, Decimal::new(60, 0));
    assert_eq!(engine.unlock_history(user).unwrap().len(), 1);
}

// =============================================================================
// Test: Concurrent duplicate top-up — one grant, the rest replays
// =============================================================================
#[test]
fn concurrent_duplicate_topup_credits_once() {
    let engine = shared_engine();
    let user = UserId::new();
    engine.open_account(user, TrialGrant::None).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let reconciler = TopupReconciler::new(Arc::clone(engine.vault()));
            thread::spawn(move || {
                reconciler.apply_topup(SessionId::new("cs_dup"), user, Decimal::new(100, 0))
            })
        })
        .collect();

    let mut fresh = 0;
    for handle in handles {
        let outcome = handle.join().unwrap().unwrap();
        assert_eq!(outcome.balance(), Decimal::new(100, 0));
        if !outcome.replayed {
            fresh += 1;
        }
    }

    assert_eq!(fresh, 1, "exactly one application must win");
    assert_eq!(engine.balance(user).unwrap().credits, Decimal::new(100, 0));
}

// =============================================================================
// Test: The pair key is per-user — different users unlock the same lead
// =============================================================================
#[test]
fn concurrent_users_unlock_same_lead_independently() {
    let engine = shared_engine();
    let lead = Lead::publish(10);
    let lead_id = lead.lead_id;
    engine.publish_lead(lead).unwrap();

    let users: Vec<UserId> = (0..THREADS).map(|_| UserId::new()).collect();
    let reconciler = TopupReconciler::new(Arc::clone(engine.vault()));
    for (i, &user) in users.iter().enumerate() {
        engine.open_account(user, TrialGrant::None).unwrap();
        reconciler
            .apply_topup(
                SessionId::new(format!("cs_user_{i}")),
                user,
                Decimal::new(10, 0),
            )
            .unwrap();
    }

    let handles: Vec<_> = users
        .iter()
        .map(|&user| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || engine.unlock_lead(user, lead_id))
        })
        .collect();

    for handle in handles {
        let record = handle.join().unwrap().unwrap();
        assert_eq!(record.credits_used, Decimal::new(10, 0));
    }

    for user in users {
        assert_eq!(engine.balance(user).unwrap().credits, Decimal::ZERO);
        assert_eq!(engine.unlock_history(user).unwrap().len(), 1);
    }
}

// =============================================================================
// Test: Racing unlocks across many leads never break the balance floor
// =============================================================================
#[test]
fn concurrent_unlocks_never_overdraw() {
    let engine = shared_engine();
    let user = UserId::new();
    engine.open_account(user, TrialGrant::None).unwrap();

    let reconciler = TopupReconciler::new(Arc::clone(engine.vault()));
    reconciler
        .apply_topup(SessionId::new("cs_floor"), user, Decimal::new(50, 0))
        .unwrap();

    // Five leads at 20 credits each against a balance of 50: at most two
    // paid unlocks can land.
    let leads: Vec<LeadId> = (0..5)
        .map(|_| {
            let lead = Lead::publish(20);
            let lead_id = lead.lead_id;
            engine.publish_lead(lead).unwrap();
            lead_id
        })
        .collect();

    let handles: Vec<_> = leads
        .into_iter()
        .map(|lead_id| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || engine.unlock_lead(user, lead_id))
        })
        .collect();

    let mut unlocked = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(_) => unlocked += 1,
            Err(LedgerError::InsufficientCredits { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(unlocked, 2);
    let balance = engine.balance(user).unwrap().credits;
    assert_eq!(balance, Decimal::new(10, 0));
    assert!(balance >= Decimal::ZERO);
    assert_eq!(engine.unlock_history(user).unwrap().len(), 2);
}
