// crates/hatchery-cli/src/commands/project.rs
//
// `hatchery project {supply, passive, active}` — fee-share projections over
// the emission schedule, using the `[projection]` section of the config.

use clap::Subcommand;
use hatchery_economics::{
    active_voter, compounding_holder, passive_holder, supply_schedule, ProjectionParams,
};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{format_json, format_table, num, OutputFormat};

/// Projection subcommands.
#[derive(Debug, Subcommand)]
pub enum ProjectCmd {
    /// Weekly emission, circulating and total supply, valuation and FDV.
    Supply {
        /// Override the projection horizon in weeks.
        #[arg(long)]
        weeks: Option<u32>,
    },
    /// Fixed holder vs. self-compounding lsToken holder.
    Passive {
        /// Override the projected holdings.
        #[arg(long)]
        holdings: Option<f64>,
    },
    /// Voting, participation bonus and volume multiplier.
    Active {
        /// Override the projected holdings.
        #[arg(long)]
        holdings: Option<f64>,
        /// Override the voting allocation percentage.
        #[arg(long)]
        voting_percent: Option<f64>,
        /// Override the multiplier allocation percentage.
        #[arg(long)]
        multiplier_percent: Option<f64>,
        /// Override the participant's weekly trading volume (USD).
        #[arg(long)]
        user_volume: Option<f64>,
    },
}

#[derive(Debug, Tabled, Serialize)]
struct SupplyRow {
    #[tabled(rename = "Week")]
    week: u32,
    #[tabled(rename = "Emission")]
    emission: String,
    #[tabled(rename = "Circulating")]
    circulating: String,
    #[tabled(rename = "Total Supply")]
    total: String,
    #[tabled(rename = "Valuation")]
    valuation: String,
    #[tabled(rename = "FDV")]
    fdv: String,
    #[tabled(rename = "Cumulative Fees")]
    cumulative_fees: String,
}

#[derive(Debug, Tabled, Serialize)]
struct PassiveRow {
    #[tabled(rename = "Week")]
    week: u32,
    #[tabled(rename = "Weekly Fees")]
    weekly_fees: String,
    #[tabled(rename = "Cumulative Fees")]
    cumulative_fees: String,
    #[tabled(rename = "Relative (%)")]
    relative: String,
    #[tabled(rename = "lsToken Weekly Fees")]
    ls_weekly_fees: String,
    #[tabled(rename = "lsToken Cumulative Fees")]
    ls_cumulative_fees: String,
    #[tabled(rename = "lsToken Relative (%)")]
    ls_relative: String,
    #[tabled(rename = "lsToken Holdings")]
    ls_holdings: String,
}

#[derive(Debug, Tabled, Serialize)]
struct ActiveRow {
    #[tabled(rename = "Week")]
    week: u32,
    #[tabled(rename = "Voting Share (%)")]
    voting_share: String,
    #[tabled(rename = "Voting Rewards")]
    voting_rewards: String,
    #[tabled(rename = "Cumulative Voting")]
    cumulative_voting: String,
    #[tabled(rename = "Bonus Fees")]
    bonus_fees: String,
    #[tabled(rename = "Cumulative Bonus Fees")]
    cumulative_bonus: String,
    #[tabled(rename = "Voting ROI (%)")]
    voting_relative: String,
    #[tabled(rename = "Multiplier")]
    multiplier: String,
    #[tabled(rename = "Volume Rewards")]
    volume_rewards: String,
    #[tabled(rename = "Boosted Volume Rewards")]
    boosted_volume_rewards: String,
    #[tabled(rename = "Cumulative Volume")]
    cumulative_volume: String,
    #[tabled(rename = "Cumulative Boosted")]
    cumulative_boosted: String,
}

/// Run the project subcommand.
pub fn run(
    cmd: &ProjectCmd,
    defaults: &ProjectionParams,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut params = defaults.clone();

    match cmd {
        ProjectCmd::Supply { weeks } => {
            if let Some(w) = weeks {
                params.weeks = *w;
            }
            let rows: Vec<SupplyRow> = supply_schedule(&params)?
                .into_iter()
                .map(|p| SupplyRow {
                    week: p.week,
                    emission: num(p.emission),
                    circulating: num(p.circulating_supply),
                    total: num(p.total_supply),
                    valuation: num(p.valuation),
                    fdv: num(p.fdv),
                    cumulative_fees: num(p.cumulative_fees),
                })
                .collect();
            print_rows(&rows, format);
        }
        ProjectCmd::Passive { holdings } => {
            if let Some(h) = holdings {
                params.holdings = *h;
            }
            let passive = passive_holder(&params)?;
            let compounding = compounding_holder(&params)?;
            let rows: Vec<PassiveRow> = passive
                .iter()
                .zip(compounding.iter())
                .map(|(p, c)| PassiveRow {
                    week: p.week,
                    weekly_fees: num(p.weekly_fees),
                    cumulative_fees: num(p.cumulative_fees),
                    relative: num(p.relative_percent),
                    ls_weekly_fees: num(c.weekly_fees),
                    ls_cumulative_fees: num(c.cumulative_fees),
                    ls_relative: num(c.relative_percent),
                    ls_holdings: num(c.holdings),
                })
                .collect();
            print_rows(&rows, format);
        }
        ProjectCmd::Active {
            holdings,
            voting_percent,
            multiplier_percent,
            user_volume,
        } => {
            if let Some(h) = holdings {
                params.holdings = *h;
            }
            if let Some(v) = voting_percent {
                params.voting_percent = *v;
            }
            if let Some(m) = multiplier_percent {
                params.multiplier_percent = *m;
            }
            if let Some(v) = user_volume {
                params.user_volume = *v;
            }
            let rows: Vec<ActiveRow> = active_voter(&params)?
                .into_iter()
                .map(|p| ActiveRow {
                    week: p.week,
                    voting_share: format!("{:.6}", p.voting_share * 100.0),
                    voting_rewards: num(p.voting_rewards),
                    cumulative_voting: num(p.cumulative_voting_rewards),
                    bonus_fees: num(p.bonus_fees),
                    cumulative_bonus: num(p.cumulative_bonus_fees),
                    voting_relative: num(p.voting_relative_percent),
                    multiplier: format!("{:.3}x", p.multiplier),
                    volume_rewards: num(p.volume_rewards),
                    boosted_volume_rewards: num(p.boosted_volume_rewards),
                    cumulative_volume: num(p.cumulative_volume_rewards),
                    cumulative_boosted: num(p.cumulative_boosted_volume_rewards),
                })
                .collect();
            if format == OutputFormat::Table {
                println!(
                    "Allocation: voting {}%, multiplier {}%, hatching {}%",
                    params.voting_percent,
                    params.multiplier_percent,
                    params.hatching_percent()
                );
            }
            print_rows(&rows, format);
        }
    }

    Ok(())
}

fn print_rows<T: Tabled + Serialize>(rows: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", format_json(&rows)),
        OutputFormat::Table => println!("{}", format_table(rows)),
    }
}
