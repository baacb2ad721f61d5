// crates/hatchery-cli/src/scenario.rs
//
// Scenario files: opening parameters plus participant actions keyed by week.
//
// An action with `week = w` runs while the engine is at week `w`, before the
// tick that simulates week `w + 1`.
//
// Example:
//   weeks = 10
//
//   [params]
//   base_tokens = 1000.0
//   initial_emission = 10.0
//   decay_percent = 10.0
//
//   [[actions]]
//   week = 0
//   action = "lock"
//   amount = 5.0
//
//   [[actions]]
//   week = 1
//   action = "stake"
//   count = 3
//   use_derivative = true

use hatchery_core::{AssetId, HatcheryError};
use hatchery_economics::{EggEconomy, EngineParams, WeekReport};
use serde::Deserialize;
use std::fs;

/// A single participant action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Lock base tokens into derivative tokens.
    Lock { amount: f64 },
    /// Unlock derivative tokens at a 50% penalty.
    SpeedExit { amount: f64 },
    /// Stake the `count` oldest active, unstaked eggs.
    Stake {
        #[serde(default = "default_stake_count")]
        count: usize,
        #[serde(default = "default_use_derivative")]
        use_derivative: bool,
    },
}

fn default_stake_count() -> usize {
    1
}

fn default_use_derivative() -> bool {
    true
}

/// An action scheduled for a given week.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduledAction {
    pub week: u64,
    #[serde(flatten)]
    pub action: Action,
}

/// A complete scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Number of weeks to simulate.
    #[serde(default = "default_weeks")]
    pub weeks: u64,
    #[serde(default)]
    pub params: EngineParams,
    #[serde(default)]
    pub actions: Vec<ScheduledAction>,
}

fn default_weeks() -> u64 {
    12
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            weeks: default_weeks(),
            params: EngineParams::default(),
            actions: Vec::new(),
        }
    }
}

/// Outcome of one action.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub week: u64,
    pub action: Action,
    /// Number of operations applied (eggs staked for `Stake`, 0 or 1 otherwise).
    pub applied: usize,
    pub error: Option<HatcheryError>,
}

impl Scenario {
    /// Load a scenario from a TOML file.
    pub fn load(path: &str) -> Result<Self, HatcheryError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| HatcheryError::Config(format!("{}: {}", path, e)))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, HatcheryError> {
        toml::from_str(contents).map_err(|e| HatcheryError::Config(e.to_string()))
    }

    /// Apply the actions scheduled for the engine's current week, then
    /// advance it by one week.
    pub fn step(&self, economy: &mut EggEconomy) -> (WeekReport, Vec<ActionOutcome>) {
        let week = economy.week();
        let mut outcomes = Vec::new();

        for scheduled in self.actions.iter().filter(|a| a.week == week) {
            let (applied, error) = apply(economy, &scheduled.action);
            if let Some(e) = &error {
                tracing::warn!("Week {}: {:?} rejected: {}", week, scheduled.action, e);
            }
            outcomes.push(ActionOutcome {
                week,
                action: scheduled.action.clone(),
                applied,
                error,
            });
        }

        (economy.advance_week(), outcomes)
    }
}

fn apply(economy: &mut EggEconomy, action: &Action) -> (usize, Option<HatcheryError>) {
    match action {
        Action::Lock { amount } => single(economy.lock_tokens(*amount)),
        Action::SpeedExit { amount } => single(economy.speed_exit(*amount)),
        Action::Stake {
            count,
            use_derivative,
        } => {
            let candidates: Vec<AssetId> = economy
                .active_assets()
                .iter()
                .map(|a| a.id)
                .filter(|id| !economy.stakes().iter().any(|s| s.asset == *id))
                .take(*count)
                .collect();

            let mut applied = 0;
            for id in candidates {
                if let Err(e) = economy.stake(id, *use_derivative) {
                    return (applied, Some(e));
                }
                applied += 1;
            }
            (applied, None)
        }
    }
}

fn single(result: Result<(), HatcheryError>) -> (usize, Option<HatcheryError>) {
    match result {
        Ok(()) => (1, None),
        Err(e) => (0, Some(e)),
    }
}
