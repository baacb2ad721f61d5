// crates/hatchery-economics/src/token.rs
//
// Fixed-point token amounts.
//
// The smallest unit of any simulated token is the "grain".
// 1 token = 10^9 grains. Ledger accounting uses grains so that the fixed
// stake costs (0.5 and 1 token) and the speed-exit split are exact.
// Grains are counted in a u128, which holds balances up to ~3.4e29 tokens.

use hatchery_core::HatcheryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Number of grains in one token. 1 token = 10^9 grains.
pub const GRAINS_PER_TOKEN: u128 = 1_000_000_000;

/// Type alias for grains, the smallest unit of a token.
pub type Grains = u128;

/// A non-negative token quantity.
///
/// Wraps an amount in grains. All ledger arithmetic is performed in integer
/// grains to avoid floating-point drift across many ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// Amount in grains (1 token = 10^9 grains).
    pub grains: Grains,
}

impl Amount {
    /// Convert a whole-token value (as f64) to an amount.
    ///
    /// # Errors
    /// Returns `HatcheryError::InvalidAmount` for negative, NaN, infinite, or
    /// out-of-range values.
    ///
    /// # Example
    /// ```
    /// use hatchery_economics::token::Amount;
    /// let amount = Amount::from_tokens(1.5).unwrap();
    /// assert_eq!(amount.grains, 1_500_000_000);
    /// ```
    pub fn from_tokens(amount: f64) -> Result<Self, HatcheryError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(HatcheryError::InvalidAmount(format!(
                "{} is not a finite, non-negative token amount",
                amount
            )));
        }
        let grains = (amount * GRAINS_PER_TOKEN as f64).round();
        if grains >= u128::MAX as f64 {
            return Err(HatcheryError::InvalidAmount(format!(
                "{} tokens exceeds the representable range",
                amount
            )));
        }
        Ok(Self {
            grains: grains as Grains,
        })
    }

    /// Create an amount from a grain value.
    pub const fn from_grains(grains: Grains) -> Self {
        Self { grains }
    }

    /// Create an amount from a whole number of tokens.
    pub const fn whole(tokens: u64) -> Self {
        Self {
            grains: tokens as Grains * GRAINS_PER_TOKEN,
        }
    }

    /// Convert this amount to tokens as a floating-point value.
    pub fn to_tokens(&self) -> f64 {
        self.grains as f64 / GRAINS_PER_TOKEN as f64
    }

    /// Returns zero tokens.
    pub const fn zero() -> Self {
        Self { grains: 0 }
    }

    pub fn is_zero(&self) -> bool {
        self.grains == 0
    }

    /// Half of this amount, rounded down to the grain.
    pub fn half(&self) -> Self {
        Self {
            grains: self.grains / 2,
        }
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.grains.checked_add(rhs.grains).map(Self::from_grains)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.grains.checked_sub(rhs.grains).map(Self::from_grains)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            grains: self.grains.saturating_add(rhs.grains),
        }
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            grains: self.grains.saturating_sub(rhs.grains),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.grains / GRAINS_PER_TOKEN;
        let frac = self.grains % GRAINS_PER_TOKEN;
        if frac == 0 {
            write!(f, "{}", whole)
        } else {
            // Up to 9 decimal places, trailing zeros trimmed
            let frac_str = format!("{:09}", frac);
            let trimmed = frac_str.trim_end_matches('0');
            write!(f, "{}.{}", whole, trimmed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tokens() {
        assert_eq!(Amount::from_tokens(1.0).unwrap().grains, GRAINS_PER_TOKEN);
        assert_eq!(Amount::from_tokens(0.5).unwrap().grains, 500_000_000);
        assert_eq!(Amount::from_tokens(0.0).unwrap(), Amount::zero());
    }

    #[test]
    fn test_from_tokens_rejects_invalid() {
        assert!(Amount::from_tokens(-1.0).is_err());
        assert!(Amount::from_tokens(f64::NAN).is_err());
        assert!(Amount::from_tokens(f64::INFINITY).is_err());
        assert!(Amount::from_tokens(1e30).is_err());
    }

    #[test]
    fn test_from_tokens_large_balance() {
        let amount = Amount::from_tokens(1e11).unwrap();
        assert_eq!(amount, Amount::whole(100_000_000_000));
        assert_eq!(amount.to_tokens(), 1e11);
        assert!(Amount::from_tokens(1e18).is_ok());
    }

    #[test]
    fn test_to_tokens() {
        let amount = Amount::from_grains(1_500_000_000);
        assert!((amount.to_tokens() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_half_floors() {
        assert_eq!(Amount::whole(3).half().grains, 1_500_000_000);
        assert_eq!(Amount::from_grains(3).half().grains, 1);
    }

    #[test]
    fn test_sub_saturating() {
        let c = Amount::whole(1) - Amount::whole(2);
        assert!(c.is_zero());
    }

    #[test]
    fn test_checked_sub() {
        assert_eq!(Amount::whole(1).checked_sub(Amount::whole(2)), None);
        assert_eq!(
            Amount::whole(3).checked_sub(Amount::whole(1)),
            Some(Amount::whole(2))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::whole(42).to_string(), "42");
        assert_eq!(Amount::from_grains(1_500_000_000).to_string(), "1.5");
        assert_eq!(Amount::zero().to_string(), "0");
    }
}
