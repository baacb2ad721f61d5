// crates/hatchery-economics/src/projection.rs
//
// Fee-share and supply projections.
//
// A reporting layer over the continuous emission schedule. Weekly token
// emission decays geometrically:
//   emission_i    = base_emission * (1 - decay_percent / 100)^i
//   circulating_i = initial_xtokens + sum(emission_0..=i)
//
// Holder strategies share protocol fees in proportion to their share of the
// circulating voting supply.

use hatchery_core::HatcheryError;
use serde::{Deserialize, Serialize};

use crate::emission::{decay_factor, validate_decay_percent};

/// Weekly growth of the volume multiplier (5%).
pub const MULTIPLIER_WEEKLY_GROWTH: f64 = 1.05;

/// Upper bound of the volume multiplier.
pub const MAX_MULTIPLIER: f64 = 4.0;

/// Inputs shared by every projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    /// Voting tokens in circulation at week 0.
    #[serde(default = "default_initial_xtokens")]
    pub initial_xtokens: f64,
    /// Locked, non-voting tokens (counted only toward total supply).
    #[serde(default = "default_locked_tokens")]
    pub locked_tokens: f64,
    /// Token price in USD, held constant.
    #[serde(default = "default_price")]
    pub price: f64,
    /// Protocol fee revenue per week, in USD.
    #[serde(default = "default_weekly_fees")]
    pub weekly_fees: f64,
    /// Token emission in week 0.
    #[serde(default = "default_base_emission")]
    pub base_emission: f64,
    /// Percentage by which emission shrinks each week.
    #[serde(default = "default_decay_percent")]
    pub decay_percent: f64,
    /// Projection horizon in weeks.
    #[serde(default = "default_weeks")]
    pub weeks: u32,
    /// The projected participant's token holdings.
    #[serde(default = "default_holdings")]
    pub holdings: f64,
    /// Participation bonus applied to an active participant's fee share.
    #[serde(default = "default_bonus")]
    pub bonus: f64,
    /// Percentage of holdings allocated to voting.
    #[serde(default = "default_voting_percent")]
    pub voting_percent: f64,
    /// Percentage of holdings staked in the volume multiplier.
    #[serde(default = "default_multiplier_percent")]
    pub multiplier_percent: f64,
    /// Percentage of weekly emission directed to the voted asset.
    #[serde(default = "default_asset_emission_percent")]
    pub asset_emission_percent: f64,
    /// Reference stake against which the multiplier stake is measured.
    #[serde(default = "default_reference_stake")]
    pub reference_stake: f64,
    /// Weekly trading volume on the voted asset across all users, in USD.
    #[serde(default = "default_asset_volume")]
    pub asset_volume: f64,
    /// The participant's own weekly trading volume on the asset, in USD.
    #[serde(default = "default_user_volume")]
    pub user_volume: f64,
}

fn default_initial_xtokens() -> f64 {
    16_000_000.0
}

fn default_locked_tokens() -> f64 {
    84_000_000.0
}

fn default_price() -> f64 {
    0.25
}

fn default_weekly_fees() -> f64 {
    20_000.0
}

fn default_base_emission() -> f64 {
    800_000.0
}

fn default_decay_percent() -> f64 {
    2.0
}

fn default_weeks() -> u32 {
    104
}

fn default_holdings() -> f64 {
    10_000.0
}

fn default_bonus() -> f64 {
    1.5
}

fn default_voting_percent() -> f64 {
    40.0
}

fn default_multiplier_percent() -> f64 {
    30.0
}

fn default_asset_emission_percent() -> f64 {
    10.0
}

fn default_reference_stake() -> f64 {
    1_000_000.0
}

fn default_asset_volume() -> f64 {
    100_000_000.0
}

fn default_user_volume() -> f64 {
    1_000_000.0
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            initial_xtokens: default_initial_xtokens(),
            locked_tokens: default_locked_tokens(),
            price: default_price(),
            weekly_fees: default_weekly_fees(),
            base_emission: default_base_emission(),
            decay_percent: default_decay_percent(),
            weeks: default_weeks(),
            holdings: default_holdings(),
            bonus: default_bonus(),
            voting_percent: default_voting_percent(),
            multiplier_percent: default_multiplier_percent(),
            asset_emission_percent: default_asset_emission_percent(),
            reference_stake: default_reference_stake(),
            asset_volume: default_asset_volume(),
            user_volume: default_user_volume(),
        }
    }
}

impl ProjectionParams {
    /// Check that every parameter is usable.
    ///
    /// # Errors
    /// Returns `HatcheryError::InvalidParameter` naming the first bad field.
    pub fn validate(&self) -> Result<(), HatcheryError> {
        let non_negative = [
            ("initial_xtokens", self.initial_xtokens),
            ("locked_tokens", self.locked_tokens),
            ("weekly_fees", self.weekly_fees),
            ("base_emission", self.base_emission),
            ("holdings", self.holdings),
            ("bonus", self.bonus),
            ("voting_percent", self.voting_percent),
            ("multiplier_percent", self.multiplier_percent),
            ("asset_emission_percent", self.asset_emission_percent),
            ("reference_stake", self.reference_stake),
            ("asset_volume", self.asset_volume),
            ("user_volume", self.user_volume),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(HatcheryError::InvalidParameter(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(HatcheryError::InvalidParameter(format!(
                "price must be positive, got {}",
                self.price
            )));
        }
        if self.initial_xtokens + self.base_emission <= 0.0 {
            return Err(HatcheryError::InvalidParameter(
                "circulating supply must be positive".to_string(),
            ));
        }
        validate_decay_percent(self.decay_percent)?;
        if self.voting_percent + self.multiplier_percent > 100.0 {
            return Err(HatcheryError::InvalidParameter(format!(
                "allocation exceeds 100% (voting {}% + multiplier {}%)",
                self.voting_percent, self.multiplier_percent
            )));
        }
        if self.asset_emission_percent > 100.0 {
            return Err(HatcheryError::InvalidParameter(format!(
                "asset emission share must be at most 100%, got {}",
                self.asset_emission_percent
            )));
        }
        if self.user_volume > self.asset_volume {
            return Err(HatcheryError::InvalidParameter(format!(
                "user volume {} exceeds total asset volume {}",
                self.user_volume, self.asset_volume
            )));
        }
        Ok(())
    }

    /// Percentage of holdings left for hatching.
    pub fn hatching_percent(&self) -> f64 {
        (100.0 - self.voting_percent - self.multiplier_percent).max(0.0)
    }

    /// Initial value of the holdings in USD.
    fn initial_value(&self) -> f64 {
        self.holdings * self.price
    }

    /// The participant's fraction of the asset's trading volume.
    fn volume_share(&self) -> f64 {
        if self.asset_volume <= 0.0 {
            return 0.0;
        }
        self.user_volume / self.asset_volume
    }
}

/// Supply and valuation for one projected week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyPoint {
    pub week: u32,
    pub emission: f64,
    pub cumulative_emission: f64,
    pub circulating_supply: f64,
    pub total_supply: f64,
    /// Price × circulating supply.
    pub valuation: f64,
    /// Price × total supply (fully diluted valuation).
    pub fdv: f64,
    pub cumulative_fees: f64,
}

/// Fee earnings for one projected week of a holder strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderPoint {
    pub week: u32,
    /// Holdings used to earn this week's fees (after reinvestment for
    /// compounding holders).
    pub holdings: f64,
    pub weekly_fees: f64,
    pub cumulative_fees: f64,
    /// Cumulative fees as a percentage of the initial holding value.
    pub relative_percent: f64,
}

/// Earnings of an active participant for one projected week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePoint {
    pub week: u32,
    /// Share of circulating supply held by the voting allocation.
    pub voting_share: f64,
    /// Asset-emission tokens earned by voting this week.
    pub voting_rewards: f64,
    pub cumulative_voting_rewards: f64,
    /// Protocol fees earned with the participation bonus this week.
    pub bonus_fees: f64,
    pub cumulative_bonus_fees: f64,
    /// Volume multiplier from the multiplier allocation.
    pub multiplier: f64,
    /// Asset-emission tokens earned from trading volume, unboosted.
    pub volume_rewards: f64,
    /// `volume_rewards` scaled by this week's multiplier.
    pub boosted_volume_rewards: f64,
    pub cumulative_volume_rewards: f64,
    pub cumulative_boosted_volume_rewards: f64,
    /// Cumulative voting rewards as a percentage of the voting allocation.
    pub voting_relative_percent: f64,
}

/// Project emission, supply and valuation week by week.
///
/// # Errors
/// Returns `HatcheryError::InvalidParameter` if `params` fails validation.
pub fn supply_schedule(params: &ProjectionParams) -> Result<Vec<SupplyPoint>, HatcheryError> {
    params.validate()?;
    let factor = decay_factor(params.decay_percent);

    let mut points = Vec::with_capacity(params.weeks as usize);
    let mut emission = params.base_emission;
    let mut cumulative = 0.0;

    for week in 0..params.weeks {
        cumulative += emission;
        let circulating = params.initial_xtokens + cumulative;
        let total = circulating + params.locked_tokens;
        points.push(SupplyPoint {
            week,
            emission,
            cumulative_emission: cumulative,
            circulating_supply: circulating,
            total_supply: total,
            valuation: params.price * circulating,
            fdv: params.price * total,
            cumulative_fees: params.weekly_fees * f64::from(week + 1),
        });
        emission *= factor;
    }

    Ok(points)
}

/// A holder who keeps a fixed balance and collects fees each week.
pub fn passive_holder(params: &ProjectionParams) -> Result<Vec<HolderPoint>, HatcheryError> {
    project_holder(params, false)
}

/// A holder whose fees are reinvested into more tokens each week (lsToken).
pub fn compounding_holder(params: &ProjectionParams) -> Result<Vec<HolderPoint>, HatcheryError> {
    project_holder(params, true)
}

fn project_holder(
    params: &ProjectionParams,
    reinvest: bool,
) -> Result<Vec<HolderPoint>, HatcheryError> {
    let supply = supply_schedule(params)?;
    let initial_value = params.initial_value();

    let mut holdings = params.holdings;
    let mut cumulative = 0.0;
    let mut points = Vec::with_capacity(supply.len());

    for point in &supply {
        let weekly_fees = holdings / point.circulating_supply * params.weekly_fees;
        if reinvest {
            holdings += weekly_fees / params.price;
        }
        cumulative += weekly_fees;
        points.push(HolderPoint {
            week: point.week,
            holdings,
            weekly_fees,
            cumulative_fees: cumulative,
            relative_percent: relative_percent(cumulative, initial_value),
        });
    }

    Ok(points)
}

/// A participant splitting holdings between voting, the volume multiplier
/// and hatching.
///
/// Voting earns a share of the asset's emission; the whole holding earns
/// protocol fees boosted by the participation bonus. Trading volume earns
/// the participant's volume share of the asset's emission, scaled by the
/// multiplier in the boosted series.
pub fn active_voter(params: &ProjectionParams) -> Result<Vec<ActivePoint>, HatcheryError> {
    let supply = supply_schedule(params)?;

    let voting_tokens = params.holdings * params.voting_percent / 100.0;
    let multiplier_tokens = params.holdings * params.multiplier_percent / 100.0;
    let asset_share = params.asset_emission_percent / 100.0;
    let volume_share = params.volume_share();
    let base_multiplier = base_multiplier(multiplier_tokens, params.reference_stake);

    let mut cumulative_voting = 0.0;
    let mut cumulative_bonus = 0.0;
    let mut cumulative_volume = 0.0;
    let mut cumulative_boosted = 0.0;
    let mut points = Vec::with_capacity(supply.len());

    for point in &supply {
        let asset_emission = asset_share * point.emission;

        let voting_share = voting_tokens / point.circulating_supply;
        let voting_rewards = voting_share * asset_emission;
        let bonus_fees =
            params.holdings / point.circulating_supply * params.weekly_fees * params.bonus;

        let growth = MULTIPLIER_WEEKLY_GROWTH.powi(point.week as i32);
        let multiplier = (base_multiplier * growth).min(MAX_MULTIPLIER);
        let volume_rewards = volume_share * asset_emission;
        let boosted_volume_rewards = volume_rewards * multiplier;

        cumulative_voting += voting_rewards;
        cumulative_bonus += bonus_fees;
        cumulative_volume += volume_rewards;
        cumulative_boosted += boosted_volume_rewards;

        points.push(ActivePoint {
            week: point.week,
            voting_share,
            voting_rewards,
            cumulative_voting_rewards: cumulative_voting,
            bonus_fees,
            cumulative_bonus_fees: cumulative_bonus,
            multiplier,
            volume_rewards,
            boosted_volume_rewards,
            cumulative_volume_rewards: cumulative_volume,
            cumulative_boosted_volume_rewards: cumulative_boosted,
            voting_relative_percent: relative_percent(cumulative_voting, voting_tokens),
        });
    }

    Ok(points)
}

/// Multiplier for a stake before time growth:
///   1 + 3 * stake / (stake + reference)
pub fn base_multiplier(stake: f64, reference: f64) -> f64 {
    if stake + reference <= 0.0 {
        return 1.0;
    }
    1.0 + 3.0 * stake / (stake + reference)
}

fn relative_percent(cumulative: f64, base: f64) -> f64 {
    if base <= 0.0 {
        return 0.0;
    }
    cumulative / base * 100.0
}
