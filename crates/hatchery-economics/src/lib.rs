// crates/hatchery-economics/src/lib.rs
//
// hatchery-economics: the egg-economy engine and its reporting layer.
//
// Balances are tracked in grains (the smallest unit of a token).
// 1 token = 1,000,000,000 grains (10^9).

pub mod assets;
pub mod emission;
pub mod engine;
pub mod ledger;
pub mod projection;
pub mod staking;
pub mod token;

// Re-export key types for ergonomic access from downstream crates.
pub use assets::AssetTracker;
pub use emission::{
    decay_factor, emission_count, emission_rate_after, EmissionSchedule, MAX_WEEKLY_EMISSION,
};
pub use engine::{Balances, EggEconomy, EngineParams, WeekReport};
pub use ledger::BalanceLedger;
pub use projection::{
    active_voter, compounding_holder, passive_holder, supply_schedule, ActivePoint, HolderPoint,
    ProjectionParams, SupplyPoint,
};
pub use staking::{StakeEntry, StakeRegistry, BASE_STAKE_COST, DERIVATIVE_STAKE_COST, HATCH_DURATION_WEEKS};
pub use token::{Amount, Grains, GRAINS_PER_TOKEN};
