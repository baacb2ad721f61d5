// crates/hatchery-economics/src/ledger.rs
//
// Balance ledger for a single simulated participant.
//
// Holds two balances:
//   - base:       unlocked, spendable token
//   - derivative: locked voting token (xToken)
//
// Locking converts base to derivative 1:1. A speed exit converts derivative
// back to base at a 50% penalty; the penalty is burned and only recorded in
// `burned` for reporting.

use hatchery_core::{HatcheryError, LedgerKind};
use serde::{Deserialize, Serialize};

use crate::token::Amount;

/// The participant's token balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceLedger {
    base: Amount,
    derivative: Amount,
    /// Cumulative amount destroyed by speed exits.
    burned: Amount,
}

impl BalanceLedger {
    /// Create a ledger with zero balances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger with the given opening balances.
    pub fn with_balances(base: Amount, derivative: Amount) -> Self {
        Self {
            base,
            derivative,
            burned: Amount::zero(),
        }
    }

    pub fn base(&self) -> Amount {
        self.base
    }

    pub fn derivative(&self) -> Amount {
        self.derivative
    }

    pub fn burned(&self) -> Amount {
        self.burned
    }

    /// Balance held in the given ledger.
    pub fn balance(&self, kind: LedgerKind) -> Amount {
        match kind {
            LedgerKind::Base => self.base,
            LedgerKind::Derivative => self.derivative,
        }
    }

    /// Lock `amount` base tokens into derivative tokens at 1:1.
    ///
    /// # Errors
    /// Returns `HatcheryError::InsufficientBalance` if the base balance is
    /// below `amount`. Balances are unchanged on error.
    pub fn lock_tokens(&mut self, amount: Amount) -> Result<(), HatcheryError> {
        self.ensure(LedgerKind::Base, amount)?;
        let derivative = self.checked_credit(LedgerKind::Derivative, amount)?;
        self.base = self.base - amount;
        self.derivative = derivative;
        Ok(())
    }

    /// Unlock `amount` derivative tokens early, at a 50% penalty.
    ///
    /// Half of `amount` (rounded down to the grain) is credited to the base
    /// balance; the rest is burned.
    ///
    /// # Errors
    /// Returns `HatcheryError::InsufficientBalance` if the derivative balance
    /// is below `amount`. Balances are unchanged on error.
    pub fn speed_exit(&mut self, amount: Amount) -> Result<(), HatcheryError> {
        self.ensure(LedgerKind::Derivative, amount)?;
        let returned = amount.half();
        let base = self.checked_credit(LedgerKind::Base, returned)?;
        self.derivative = self.derivative - amount;
        self.base = base;
        self.burned = self.burned + (amount - returned);
        Ok(())
    }

    /// Remove `amount` from the given ledger.
    ///
    /// # Errors
    /// Returns `HatcheryError::InsufficientBalance` if the ledger holds less
    /// than `amount`.
    pub fn debit(&mut self, kind: LedgerKind, amount: Amount) -> Result<(), HatcheryError> {
        self.ensure(kind, amount)?;
        match kind {
            LedgerKind::Base => self.base = self.base - amount,
            LedgerKind::Derivative => self.derivative = self.derivative - amount,
        }
        Ok(())
    }

    /// Add `amount` to the given ledger.
    ///
    /// # Errors
    /// Returns `HatcheryError::InvalidAmount` if the balance would overflow.
    pub fn credit(&mut self, kind: LedgerKind, amount: Amount) -> Result<(), HatcheryError> {
        let updated = self.checked_credit(kind, amount)?;
        match kind {
            LedgerKind::Base => self.base = updated,
            LedgerKind::Derivative => self.derivative = updated,
        }
        Ok(())
    }

    fn ensure(&self, kind: LedgerKind, amount: Amount) -> Result<(), HatcheryError> {
        let available = self.balance(kind);
        if available < amount {
            return Err(HatcheryError::InsufficientBalance {
                ledger: kind,
                required: amount.grains,
                available: available.grains,
            });
        }
        Ok(())
    }

    fn checked_credit(&self, kind: LedgerKind, amount: Amount) -> Result<Amount, HatcheryError> {
        self.balance(kind).checked_add(amount).ok_or_else(|| {
            HatcheryError::InvalidAmount(format!("{} balance would overflow", kind))
        })
    }
}
