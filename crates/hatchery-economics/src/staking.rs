// crates/hatchery-economics/src/staking.rs
//
// Hatch staking: eggs staked for hatching and their countdowns.
//
// Staking an active egg costs either:
//   - 1 derivative token, or
//   - 0.5 base token
//
// After HATCH_DURATION_WEEKS ticks the egg hatches and the participant is
// credited one derivative token. A staked egg is reserved: it does not rot
// while its stake is live.

use std::collections::HashSet;

use hatchery_core::{AssetId, HatcheryError, LedgerKind, PaymentKind};
use serde::{Deserialize, Serialize};

use crate::assets::AssetTracker;
use crate::ledger::BalanceLedger;
use crate::token::{Amount, GRAINS_PER_TOKEN};

/// Weeks between staking an egg and its hatch.
pub const HATCH_DURATION_WEEKS: u32 = 5;

/// Cost of a stake paid in derivative tokens: 1 token.
pub const DERIVATIVE_STAKE_COST: Amount = Amount::whole(1);

/// Cost of a stake paid in base tokens: 0.5 token.
pub const BASE_STAKE_COST: Amount = Amount::from_grains(GRAINS_PER_TOKEN / 2);

/// Derivative tokens credited when an egg hatches.
pub const HATCH_REWARD: Amount = Amount::whole(1);

/// Cost of staking with the given payment kind.
pub fn stake_cost(payment: PaymentKind) -> Amount {
    match payment {
        PaymentKind::Derivative => DERIVATIVE_STAKE_COST,
        PaymentKind::Base => BASE_STAKE_COST,
    }
}

/// A single egg held in the hatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeEntry {
    /// The staked egg.
    pub asset: AssetId,
    /// Ticks left before the egg hatches.
    pub remaining_weeks: u32,
    /// Which balance paid for the stake.
    pub payment: PaymentKind,
    /// Week in which the stake was created.
    pub staked_at_week: u64,
}

/// Manages all live hatch stakes, in registration order.
#[derive(Debug, Clone, Default)]
pub struct StakeRegistry {
    entries: Vec<StakeEntry>,
}

impl StakeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Stake an active egg for hatching.
    ///
    /// Checks every precondition before debiting the ledger, so a rejected
    /// call leaves the ledger, tracker and registry untouched.
    ///
    /// # Errors
    /// - `HatcheryError::AssetNotFound` if the egg does not exist.
    /// - `HatcheryError::AssetNotActive` if the egg hatched or rotted.
    /// - `HatcheryError::AlreadyStaked` if a live stake holds the egg.
    /// - `HatcheryError::InsufficientBalance` if the paying ledger is short.
    pub fn stake(
        &mut self,
        tracker: &AssetTracker,
        ledger: &mut BalanceLedger,
        asset: AssetId,
        payment: PaymentKind,
        week: u64,
    ) -> Result<(), HatcheryError> {
        let egg = tracker.get(asset).ok_or(HatcheryError::AssetNotFound(asset))?;
        if !egg.is_active() {
            return Err(HatcheryError::AssetNotActive {
                id: asset,
                state: egg.state,
            });
        }
        if self.is_staked(asset) {
            return Err(HatcheryError::AlreadyStaked(asset));
        }

        ledger.debit(payment.ledger(), stake_cost(payment))?;

        self.entries.push(StakeEntry {
            asset,
            remaining_weeks: HATCH_DURATION_WEEKS,
            payment,
            staked_at_week: week,
        });
        Ok(())
    }

    /// Count down every live stake by one tick and return the entries whose
    /// countdown reached zero, removing them from the registry.
    ///
    /// Completed entries are returned in registration order.
    pub fn process_countdowns(&mut self) -> Vec<StakeEntry> {
        let mut completed = Vec::new();
        let mut remaining = Vec::new();

        for mut entry in self.entries.drain(..) {
            entry.remaining_weeks = entry.remaining_weeks.saturating_sub(1);
            if entry.remaining_weeks == 0 {
                completed.push(entry);
            } else {
                remaining.push(entry);
            }
        }

        self.entries = remaining;
        completed
    }

    /// Advance all stakes by one tick and hatch the ones that complete.
    ///
    /// Each completed egg transitions to `Hatched` and the ledger is credited
    /// `HATCH_REWARD` derivative tokens. The reward is credited before the
    /// egg changes state: if the credit is refused, the egg stays `Active`
    /// and its stake is held in the registry until a later tick can pay it.
    /// Returns the entries that hatched.
    pub fn advance(
        &mut self,
        tracker: &mut AssetTracker,
        ledger: &mut BalanceLedger,
    ) -> Vec<StakeEntry> {
        let mut hatched = Vec::new();
        let mut held = Vec::new();

        for entry in self.process_countdowns() {
            // Reserved eggs are skipped by the decay pass, so this only
            // fails if the tracker was mutated outside the engine.
            if !tracker.get(entry.asset).is_some_and(|egg| egg.is_active()) {
                tracing::warn!("Dropping stake on {}: egg is no longer active", entry.asset);
                continue;
            }
            if let Err(e) = ledger.credit(LedgerKind::Derivative, HATCH_REWARD) {
                tracing::warn!("Hatch of {} held back: {}", entry.asset, e);
                held.push(entry);
                continue;
            }
            if let Err(e) = tracker.mark_hatched(entry.asset) {
                tracing::warn!("Hatch of {} not recorded: {}", entry.asset, e);
            }
            tracing::debug!(asset = %entry.asset, payment = ?entry.payment, "Egg hatched");
            hatched.push(entry);
        }

        // Held stakes were registered before every stake still counting down.
        held.append(&mut self.entries);
        self.entries = held;

        hatched
    }

    /// Returns true if a live stake holds `asset`.
    pub fn is_staked(&self, asset: AssetId) -> bool {
        self.entries.iter().any(|e| e.asset == asset)
    }

    /// Identifiers of every egg held by a live stake.
    pub fn reserved_ids(&self) -> HashSet<AssetId> {
        self.entries.iter().map(|e| e.asset).collect()
    }

    /// Get all live stake entries.
    pub fn entries(&self) -> &[StakeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hatchery_core::AssetState;

    fn setup(eggs: f64, base: u64, derivative: u64) -> (AssetTracker, BalanceLedger) {
        let mut tracker = AssetTracker::new();
        tracker.emit_weekly_batch(1, eggs);
        let ledger = BalanceLedger::with_balances(Amount::whole(base), Amount::whole(derivative));
        (tracker, ledger)
    }

    #[test]
    fn test_stake_with_derivative() {
        let (tracker, mut ledger) = setup(1.0, 0, 3);
        let mut registry = StakeRegistry::new();
        registry
            .stake(&tracker, &mut ledger, AssetId(0), PaymentKind::Derivative, 1)
            .unwrap();

        assert_eq!(ledger.derivative(), Amount::whole(2));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.entries()[0].remaining_weeks, HATCH_DURATION_WEEKS);
    }

    #[test]
    fn test_stake_with_base_costs_half() {
        let (tracker, mut ledger) = setup(1.0, 1, 0);
        let mut registry = StakeRegistry::new();
        registry
            .stake(&tracker, &mut ledger, AssetId(0), PaymentKind::Base, 1)
            .unwrap();
        assert_eq!(ledger.base(), BASE_STAKE_COST);
    }

    #[test]
    fn test_stake_insufficient_balance() {
        let (tracker, mut ledger) = setup(1.0, 0, 0);
        let mut registry = StakeRegistry::new();
        let result = registry.stake(&tracker, &mut ledger, AssetId(0), PaymentKind::Derivative, 1);
        assert!(matches!(
            result,
            Err(HatcheryError::InsufficientBalance { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_double_stake_rejected() {
        let (tracker, mut ledger) = setup(1.0, 10, 0);
        let mut registry = StakeRegistry::new();
        registry
            .stake(&tracker, &mut ledger, AssetId(0), PaymentKind::Base, 1)
            .unwrap();
        let result = registry.stake(&tracker, &mut ledger, AssetId(0), PaymentKind::Base, 1);
        assert_eq!(result, Err(HatcheryError::AlreadyStaked(AssetId(0))));
        // Only the first stake was paid for
        assert_eq!(ledger.base(), Amount::whole(10) - BASE_STAKE_COST);
    }

    #[test]
    fn test_stake_unknown_or_rotted_egg() {
        let (mut tracker, mut ledger) = setup(1.0, 10, 10);
        let mut registry = StakeRegistry::new();
        assert_eq!(
            registry.stake(&tracker, &mut ledger, AssetId(5), PaymentKind::Base, 1),
            Err(HatcheryError::AssetNotFound(AssetId(5)))
        );

        tracker.advance_decay(8, &HashSet::new());
        assert!(matches!(
            registry.stake(&tracker, &mut ledger, AssetId(0), PaymentKind::Base, 8),
            Err(HatcheryError::AssetNotActive { .. })
        ));
        assert_eq!(ledger.base(), Amount::whole(10));
    }

    #[test]
    fn test_stake_hatched_egg_rejected() {
        let (mut tracker, mut ledger) = setup(1.0, 10, 0);
        let mut registry = StakeRegistry::new();
        registry
            .stake(&tracker, &mut ledger, AssetId(0), PaymentKind::Base, 1)
            .unwrap();
        for _ in 0..HATCH_DURATION_WEEKS {
            registry.advance(&mut tracker, &mut ledger);
        }
        let before = ledger.clone();

        let result = registry.stake(&tracker, &mut ledger, AssetId(0), PaymentKind::Base, 6);
        assert_eq!(
            result,
            Err(HatcheryError::AssetNotActive {
                id: AssetId(0),
                state: AssetState::Hatched,
            })
        );
        assert_eq!(ledger, before);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_refused_reward_keeps_egg_active() {
        let (mut tracker, _) = setup(1.0, 0, 0);
        let mut ledger = BalanceLedger::with_balances(
            Amount::whole(10),
            Amount::from_grains(u128::MAX),
        );
        let mut registry = StakeRegistry::new();
        registry
            .stake(&tracker, &mut ledger, AssetId(0), PaymentKind::Base, 1)
            .unwrap();

        for _ in 0..HATCH_DURATION_WEEKS + 2 {
            assert!(registry.advance(&mut tracker, &mut ledger).is_empty());
        }
        assert_eq!(tracker.get(AssetId(0)).unwrap().state, AssetState::Active);
        assert_eq!(ledger.derivative(), Amount::from_grains(u128::MAX));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.entries()[0].remaining_weeks, 0);

        // Once the reward fits, the held stake hatches on the next tick.
        ledger
            .debit(LedgerKind::Derivative, Amount::whole(1))
            .unwrap();
        let completed = registry.advance(&mut tracker, &mut ledger);
        assert_eq!(completed.len(), 1);
        assert_eq!(tracker.get(AssetId(0)).unwrap().state, AssetState::Hatched);
        assert_eq!(ledger.derivative(), Amount::from_grains(u128::MAX));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_process_countdowns_before_completion() {
        let (tracker, mut ledger) = setup(1.0, 10, 0);
        let mut registry = StakeRegistry::new();
        registry
            .stake(&tracker, &mut ledger, AssetId(0), PaymentKind::Base, 1)
            .unwrap();

        for _ in 0..HATCH_DURATION_WEEKS - 1 {
            assert!(registry.process_countdowns().is_empty());
        }
        assert_eq!(registry.entries()[0].remaining_weeks, 1);
    }

    #[test]
    fn test_advance_hatches_after_duration() {
        let (mut tracker, mut ledger) = setup(1.0, 10, 0);
        let mut registry = StakeRegistry::new();
        registry
            .stake(&tracker, &mut ledger, AssetId(0), PaymentKind::Base, 1)
            .unwrap();

        let mut completed = Vec::new();
        for _ in 0..HATCH_DURATION_WEEKS {
            completed = registry.advance(&mut tracker, &mut ledger);
        }
        assert_eq!(completed.len(), 1);
        assert!(registry.is_empty());
        assert_eq!(tracker.get(AssetId(0)).unwrap().state, AssetState::Hatched);
        assert_eq!(ledger.derivative(), HATCH_REWARD);
    }

    #[test]
    fn test_completion_in_registration_order() {
        let (mut tracker, mut ledger) = setup(3.0, 10, 0);
        let mut registry = StakeRegistry::new();
        for id in [2, 0, 1] {
            registry
                .stake(&tracker, &mut ledger, AssetId(id), PaymentKind::Base, 1)
                .unwrap();
        }

        let mut completed = Vec::new();
        for _ in 0..HATCH_DURATION_WEEKS {
            completed = registry.advance(&mut tracker, &mut ledger);
        }
        let order: Vec<AssetId> = completed.iter().map(|e| e.asset).collect();
        assert_eq!(order, vec![AssetId(2), AssetId(0), AssetId(1)]);
        assert_eq!(ledger.derivative(), Amount::whole(3));
    }

    #[test]
    fn test_reserved_ids() {
        let (tracker, mut ledger) = setup(2.0, 10, 0);
        let mut registry = StakeRegistry::new();
        registry
            .stake(&tracker, &mut ledger, AssetId(1), PaymentKind::Base, 1)
            .unwrap();
        let reserved = registry.reserved_ids();
        assert!(reserved.contains(&AssetId(1)));
        assert!(!reserved.contains(&AssetId(0)));
    }
}
