// crates/hatchery-economics/src/engine.rs
//
// The egg-economy engine: one participant's ledger, the eggs emitted so far,
// and the hatcher, advanced one week at a time.
//
// Tick order (fixed):
//   1. week += 1
//   2. emit floor(current_rate) eggs for the new week
//   3. decay every active, unstaked egg
//   4. count down stakes, hatching the ones that complete
//   5. current_rate *= (1 - decay_percent / 100)
//
// Rate decay is applied last, so it affects next week's emission.

use hatchery_core::{Asset, AssetId, AssetState, HatcheryError, PaymentKind};
use serde::{Deserialize, Serialize};

use crate::assets::AssetTracker;
use crate::emission::EmissionSchedule;
use crate::ledger::BalanceLedger;
use crate::staking::{StakeEntry, StakeRegistry};
use crate::token::Amount;

/// Parameters for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineParams {
    /// Opening base-token balance.
    #[serde(default = "default_base_tokens")]
    pub base_tokens: f64,
    /// Opening derivative-token balance.
    #[serde(default)]
    pub derivative_tokens: f64,
    /// Eggs emitted per week before any decay.
    #[serde(default = "default_initial_emission")]
    pub initial_emission: f64,
    /// Percentage by which the egg emission rate shrinks each week.
    #[serde(default = "default_decay_percent")]
    pub decay_percent: f64,
}

/// Opening base balance of a default run, in whole tokens.
const DEFAULT_BASE_TOKENS: u64 = 1000;

fn default_base_tokens() -> f64 {
    DEFAULT_BASE_TOKENS as f64
}

fn default_initial_emission() -> f64 {
    10.0
}

fn default_decay_percent() -> f64 {
    10.0
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            base_tokens: default_base_tokens(),
            derivative_tokens: 0.0,
            initial_emission: default_initial_emission(),
            decay_percent: default_decay_percent(),
        }
    }
}

/// Snapshot of balances and egg counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balances {
    /// Base tokens, in whole-token units.
    pub base: f64,
    /// Derivative tokens, in whole-token units.
    pub derivative: f64,
    pub active_count: usize,
    pub hatched_count: usize,
    pub rotted_count: usize,
}

/// Summary of a single `advance_week` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekReport {
    /// The week that was just simulated.
    pub week: u64,
    /// Eggs emitted this week.
    pub emitted: Vec<AssetId>,
    /// Eggs that rotted this week.
    pub rotted: Vec<AssetId>,
    /// Eggs that hatched this week.
    pub hatched: Vec<AssetId>,
    /// Emission rate in effect for the next week.
    pub emission_rate: f64,
}

/// A single simulation run.
///
/// Owned by the caller; there is no global session. All operations are
/// synchronous and either apply completely or return an error without
/// changing state.
#[derive(Debug, Clone)]
pub struct EggEconomy {
    week: u64,
    schedule: EmissionSchedule,
    ledger: BalanceLedger,
    tracker: AssetTracker,
    hatcher: StakeRegistry,
}

impl EggEconomy {
    /// Create a run with the default parameters (1000 base, 0 derivative,
    /// 10 eggs per week, 10% weekly decay).
    pub fn new() -> Self {
        let params = EngineParams::default();
        Self {
            week: 0,
            schedule: EmissionSchedule {
                initial_rate: params.initial_emission,
                current_rate: params.initial_emission,
                decay_percent: params.decay_percent,
            },
            ledger: BalanceLedger::with_balances(Amount::whole(DEFAULT_BASE_TOKENS), Amount::zero()),
            tracker: AssetTracker::new(),
            hatcher: StakeRegistry::new(),
        }
    }

    /// Create a run from explicit parameters.
    ///
    /// # Errors
    /// Returns `HatcheryError::InvalidAmount` or
    /// `HatcheryError::InvalidParameter` for out-of-range parameters.
    pub fn with_params(params: &EngineParams) -> Result<Self, HatcheryError> {
        let mut economy = Self::new();
        economy.reset_with(params)?;
        Ok(economy)
    }

    /// Discard the current run and start a new one.
    ///
    /// Parameters are validated first; on error the current run is kept.
    pub fn reset(
        &mut self,
        base_tokens: f64,
        derivative_tokens: f64,
        initial_emission: f64,
        decay_percent: f64,
    ) -> Result<(), HatcheryError> {
        self.reset_with(&EngineParams {
            base_tokens,
            derivative_tokens,
            initial_emission,
            decay_percent,
        })
    }

    /// Discard the current run and start a new one from `params`.
    pub fn reset_with(&mut self, params: &EngineParams) -> Result<(), HatcheryError> {
        let base = Amount::from_tokens(params.base_tokens)?;
        let derivative = Amount::from_tokens(params.derivative_tokens)?;
        let schedule = EmissionSchedule::new(params.initial_emission, params.decay_percent)?;

        self.week = 0;
        self.schedule = schedule;
        self.ledger = BalanceLedger::with_balances(base, derivative);
        self.tracker = AssetTracker::new();
        self.hatcher = StakeRegistry::new();

        tracing::info!(
            base = %base,
            derivative = %derivative,
            initial_emission = params.initial_emission,
            decay_percent = params.decay_percent,
            "Simulation reset"
        );
        Ok(())
    }

    /// Simulate one week.
    pub fn advance_week(&mut self) -> WeekReport {
        self.week += 1;
        let week = self.week;

        let emitted = self
            .tracker
            .emit_weekly_batch(week, self.schedule.current_rate);

        let reserved = self.hatcher.reserved_ids();
        let rotted = self.tracker.advance_decay(week, &reserved);

        let hatched: Vec<AssetId> = self
            .hatcher
            .advance(&mut self.tracker, &mut self.ledger)
            .into_iter()
            .map(|entry| entry.asset)
            .collect();

        self.schedule.decay();

        tracing::info!(
            week,
            emitted = emitted.len(),
            rotted = rotted.len(),
            hatched = hatched.len(),
            next_rate = self.schedule.current_rate,
            "Week advanced"
        );

        WeekReport {
            week,
            emitted,
            rotted,
            hatched,
            emission_rate: self.schedule.current_rate,
        }
    }

    /// Lock base tokens into derivative tokens at 1:1.
    pub fn lock_tokens(&mut self, amount: f64) -> Result<(), HatcheryError> {
        let amount = Amount::from_tokens(amount)?;
        self.ledger.lock_tokens(amount).inspect_err(|e| {
            tracing::debug!("Lock of {} rejected: {}", amount, e);
        })
    }

    /// Unlock derivative tokens early; half is returned as base, half burned.
    ///
    /// Balances are kept to the grain (10^-9 token). When `amount` is an odd
    /// number of grains the returned half is rounded down and the leftover
    /// grain is burned with the penalty.
    pub fn speed_exit(&mut self, amount: f64) -> Result<(), HatcheryError> {
        let amount = Amount::from_tokens(amount)?;
        self.ledger.speed_exit(amount).inspect_err(|e| {
            tracing::debug!("Speed exit of {} rejected: {}", amount, e);
        })
    }

    /// Stake an active egg for hatching, paying with derivative tokens when
    /// `use_derivative` is set and with base tokens otherwise.
    pub fn stake(&mut self, asset: AssetId, use_derivative: bool) -> Result<(), HatcheryError> {
        let payment = PaymentKind::from_use_derivative(use_derivative);
        self.hatcher
            .stake(&self.tracker, &mut self.ledger, asset, payment, self.week)
            .inspect_err(|e| {
                tracing::debug!("Stake of {} rejected: {}", asset, e);
            })
    }

    /// Current balances and egg counts.
    pub fn balances(&self) -> Balances {
        Balances {
            base: self.ledger.base().to_tokens(),
            derivative: self.ledger.derivative().to_tokens(),
            active_count: self.tracker.count(AssetState::Active),
            hatched_count: self.tracker.count(AssetState::Hatched),
            rotted_count: self.tracker.count(AssetState::Rotted),
        }
    }

    /// Every egg emitted in this run, in emission order.
    pub fn assets(&self) -> &[Asset] {
        self.tracker.all()
    }

    /// Eggs that are still active, in emission order.
    pub fn active_assets(&self) -> Vec<&Asset> {
        self.tracker.list_active()
    }

    /// Live hatch stakes, in registration order.
    pub fn stakes(&self) -> &[StakeEntry] {
        self.hatcher.entries()
    }

    pub fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    pub fn week(&self) -> u64 {
        self.week
    }

    pub fn current_emission_rate(&self) -> f64 {
        self.schedule.current_rate
    }

    pub fn initial_emission_rate(&self) -> f64 {
        self.schedule.initial_rate
    }

    pub fn decay_rate_percent(&self) -> f64 {
        self.schedule.decay_percent
    }
}

impl Default for EggEconomy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staking::HATCH_DURATION_WEEKS;
    use crate::token::GRAINS_PER_TOKEN;

    fn economy() -> EggEconomy {
        EggEconomy::with_params(&EngineParams::default()).unwrap()
    }

    #[test]
    fn test_new_matches_default_params() {
        let economy = EggEconomy::new();
        let balances = economy.balances();
        assert_eq!(economy.week(), 0);
        assert_eq!(balances.base, 1000.0);
        assert_eq!(balances.derivative, 0.0);
        assert_eq!(economy.current_emission_rate(), 10.0);
        assert_eq!(economy.decay_rate_percent(), 10.0);
    }

    #[test]
    fn test_first_week_emits_full_batch() {
        let mut economy = economy();
        let report = economy.advance_week();
        assert_eq!(report.week, 1);
        assert_eq!(report.emitted.len(), 10);
        assert!(report.rotted.is_empty());
        assert!((report.emission_rate - 9.0).abs() < 1e-12);
        assert!(economy.assets().iter().all(|a| a.born_week == 1));
    }

    #[test]
    fn test_emission_follows_truncated_decay() {
        let mut economy = economy();
        let counts: Vec<usize> = (0..4).map(|_| economy.advance_week().emitted.len()).collect();
        // 10, 9, 8.1, 7.29
        assert_eq!(counts, vec![10, 9, 8, 7]);
    }

    #[test]
    fn test_reset_discards_previous_run() {
        let mut economy = economy();
        economy.advance_week();
        economy.stake(AssetId(0), false).unwrap();

        economy.reset(5.0, 2.0, 3.0, 50.0).unwrap();
        assert_eq!(economy.week(), 0);
        assert!(economy.assets().is_empty());
        assert!(economy.stakes().is_empty());
        assert_eq!(economy.balances().base, 5.0);
        assert_eq!(economy.balances().derivative, 2.0);
        assert_eq!(economy.current_emission_rate(), 3.0);
    }

    #[test]
    fn test_invalid_reset_keeps_run() {
        let mut economy = economy();
        economy.advance_week();
        assert!(economy.reset(-1.0, 0.0, 10.0, 10.0).is_err());
        assert!(economy.reset(1.0, 0.0, 10.0, 150.0).is_err());
        assert!(economy.reset(1.0, 0.0, 1e15, 10.0).is_err());
        assert_eq!(economy.week(), 1);
        assert_eq!(economy.assets().len(), 10);
    }

    #[test]
    fn test_reset_accepts_large_balances() {
        let mut economy = economy();
        economy.reset(1e11, 2.5e12, 10.0, 10.0).unwrap();
        assert_eq!(economy.balances().base, 1e11);
        assert_eq!(economy.balances().derivative, 2.5e12);

        economy.lock_tokens(1e11).unwrap();
        assert_eq!(economy.balances().base, 0.0);
        assert_eq!(economy.balances().derivative, 2.6e12);
    }

    #[test]
    fn test_speed_exit_odd_grain_burns_remainder() {
        let mut economy = economy();
        economy.reset(0.0, 1.0, 10.0, 10.0).unwrap();
        economy.speed_exit(1e-9).unwrap();

        assert_eq!(economy.ledger().base(), Amount::zero());
        assert_eq!(economy.ledger().burned(), Amount::from_grains(1));
        assert_eq!(
            economy.ledger().derivative(),
            Amount::from_grains(GRAINS_PER_TOKEN - 1)
        );

        economy.speed_exit(3e-9).unwrap();
        assert_eq!(economy.ledger().base(), Amount::from_grains(1));
        assert_eq!(economy.ledger().burned(), Amount::from_grains(3));
    }

    #[test]
    fn test_staked_egg_hatches_and_does_not_rot() {
        let mut economy = economy();
        economy.advance_week();
        economy.stake(AssetId(0), false).unwrap();

        for _ in 0..HATCH_DURATION_WEEKS {
            economy.advance_week();
        }
        let egg = &economy.assets()[0];
        assert_eq!(egg.state, AssetState::Hatched);
        assert_eq!(economy.balances().derivative, 1.0);
        assert_eq!(economy.balances().base, 999.5);
    }

    #[test]
    fn test_rejected_operations_leave_state() {
        let mut economy = economy();
        economy.advance_week();
        let before = economy.balances();

        assert!(economy.lock_tokens(1000.5).is_err());
        assert!(economy.speed_exit(1.0).is_err());
        assert!(economy.stake(AssetId(0), true).is_err());
        assert!(economy.lock_tokens(-5.0).is_err());
        assert_eq!(economy.balances(), before);
        assert!(economy.stakes().is_empty());
    }
}
