//! Credit ledger with two-phase charging.
//!
//! A charge is first reserved, which holds the credits, and then either
//! committed once the paid-for result has been applied or released when
//! the operation fails. A failed regeneration therefore never costs
//! anything.

use std::collections::HashMap;
use std::sync::Mutex;

use planner_core::prelude::*;
use uuid::Uuid;

/// Identifies a held charge.
pub type ReservationId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreditAction {
    Regenerate,
}

impl CreditAction {
    pub fn label(&self) -> &'static str {
        match self {
            CreditAction::Regenerate => "regenerate",
        }
    }
}

/// Credit balance owned by the host.
pub trait CreditLedger: Send + Sync {
    /// Whether `cost` can be charged right now.
    fn can_afford(&self, action: CreditAction, cost: u32) -> bool;

    /// Hold `cost` credits. Fails with `InsufficientCredits` if unaffordable.
    fn reserve(&self, action: CreditAction, cost: u32) -> Result<ReservationId>;

    /// Make a held charge final.
    fn commit(&self, id: ReservationId) -> Result<()>;

    /// Return a held charge to the balance.
    fn release(&self, id: ReservationId) -> Result<()>;

    /// Spendable balance, excluding held credits.
    fn available(&self) -> u32;
}

#[derive(Debug, Default)]
struct LedgerInner {
    balance: u32,
    held: HashMap<ReservationId, u32>,
}

impl LedgerInner {
    fn held_total(&self) -> u32 {
        self.held.values().sum()
    }

    fn available(&self) -> u32 {
        self.balance.saturating_sub(self.held_total())
    }
}

/// In-process ledger seeded from `[credits] starting_balance`.
#[derive(Debug, Default)]
pub struct LocalCreditLedger {
    inner: Mutex<LedgerInner>,
}

impl LocalCreditLedger {
    pub fn new(balance: u32) -> Self {
        Self {
            inner: Mutex::new(LedgerInner {
                balance,
                held: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LedgerInner> {
        // A poisoned ledger still holds consistent numbers
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Total balance including held credits.
    pub fn balance(&self) -> u32 {
        self.lock().balance
    }

    pub fn pending_reservations(&self) -> usize {
        self.lock().held.len()
    }
}

impl CreditLedger for LocalCreditLedger {
    fn can_afford(&self, _action: CreditAction, cost: u32) -> bool {
        self.lock().available() >= cost
    }

    fn reserve(&self, action: CreditAction, cost: u32) -> Result<ReservationId> {
        let mut inner = self.lock();
        let available = inner.available();
        if available < cost {
            return Err(Error::InsufficientCredits {
                action: action.label().to_string(),
                required: cost,
                available,
            });
        }
        let id = Uuid::new_v4();
        inner.held.insert(id, cost);
        debug!("Reserved {} credit(s) for {} ({})", cost, action.label(), id);
        Ok(id)
    }

    fn commit(&self, id: ReservationId) -> Result<()> {
        let mut inner = self.lock();
        let cost = inner.held.remove(&id).ok_or(Error::ReservationNotFound {
            id: id.to_string(),
        })?;
        inner.balance = inner.balance.saturating_sub(cost);
        debug!("Committed {} credit(s) ({}), balance {}", cost, id, inner.balance);
        Ok(())
    }

    fn release(&self, id: ReservationId) -> Result<()> {
        let mut inner = self.lock();
        let cost = inner.held.remove(&id).ok_or(Error::ReservationNotFound {
            id: id.to_string(),
        })?;
        debug!("Released {} credit(s) ({})", cost, id);
        Ok(())
    }

    fn available(&self) -> u32 {
        self.lock().available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_holds_credits() {
        let ledger = LocalCreditLedger::new(2);
        let id = ledger.reserve(CreditAction::Regenerate, 1).unwrap();
        assert_eq!(ledger.available(), 1);
        assert_eq!(ledger.balance(), 2);

        ledger.commit(id).unwrap();
        assert_eq!(ledger.available(), 1);
        assert_eq!(ledger.balance(), 1);
    }

    #[test]
    fn test_release_refunds() {
        let ledger = LocalCreditLedger::new(1);
        let id = ledger.reserve(CreditAction::Regenerate, 1).unwrap();
        assert!(!ledger.can_afford(CreditAction::Regenerate, 1));

        ledger.release(id).unwrap();
        assert_eq!(ledger.available(), 1);
        assert_eq!(ledger.balance(), 1);
        assert_eq!(ledger.pending_reservations(), 0);
    }

    #[test]
    fn test_reserve_rejects_when_unaffordable() {
        let ledger = LocalCreditLedger::new(0);
        let err = ledger.reserve(CreditAction::Regenerate, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientCredits {
                required: 1,
                available: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_double_settle_is_an_error() {
        let ledger = LocalCreditLedger::new(3);
        let id = ledger.reserve(CreditAction::Regenerate, 1).unwrap();
        ledger.commit(id).unwrap();
        assert!(matches!(ledger.release(id), Err(Error::ReservationNotFound { .. })));
        assert!(matches!(ledger.commit(id), Err(Error::ReservationNotFound { .. })));
        assert_eq!(ledger.balance(), 2);
    }
}
