// crates/hatchery-cli/src/commands/simulate.rs
//
// `hatchery simulate` — replay a scenario file and print a weekly ledger.

use clap::Args;
use hatchery_economics::EggEconomy;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{format_json, format_table, num, OutputFormat};
use crate::scenario::Scenario;

/// Arguments for the simulate command.
#[derive(Debug, Args)]
pub struct SimulateCmd {
    /// Path to a scenario TOML file. Without one, the default parameters run
    /// with no actions.
    #[arg(long)]
    scenario: Option<String>,

    /// Override the number of weeks to simulate.
    #[arg(long)]
    weeks: Option<u64>,
}

/// One row of the weekly ledger.
#[derive(Debug, Tabled, Serialize)]
struct WeekRow {
    #[tabled(rename = "Week")]
    week: u64,
    #[tabled(rename = "Emitted")]
    emitted: usize,
    #[tabled(rename = "Rotted")]
    rotted: usize,
    #[tabled(rename = "Hatched")]
    hatched: usize,
    #[tabled(rename = "Base")]
    base: String,
    #[tabled(rename = "XToken")]
    derivative: String,
    #[tabled(rename = "Eggs (Unhatched)")]
    active_total: usize,
    #[tabled(rename = "Eggs (Hatched)")]
    hatched_total: usize,
    #[tabled(rename = "Eggs (Rotted)")]
    rotted_total: usize,
    #[tabled(rename = "In Hatcher")]
    staked: usize,
    #[tabled(rename = "Next Emission")]
    next_rate: String,
}

/// Run the simulate subcommand.
pub fn run(cmd: &SimulateCmd, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let mut scenario = match &cmd.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    if let Some(weeks) = cmd.weeks {
        scenario.weeks = weeks;
    }

    let mut economy = EggEconomy::new();
    economy.reset_with(&scenario.params)?;

    // Replay week by week so each row captures the balances after its tick.
    let mut rows = Vec::with_capacity(scenario.weeks as usize);
    let mut outcomes = Vec::new();
    for _ in 0..scenario.weeks {
        let (report, week_outcomes) = scenario.step(&mut economy);
        outcomes.extend(week_outcomes);
        let balances = economy.balances();
        rows.push(WeekRow {
            week: report.week,
            emitted: report.emitted.len(),
            rotted: report.rotted.len(),
            hatched: report.hatched.len(),
            base: num(balances.base),
            derivative: num(balances.derivative),
            active_total: balances.active_count,
            hatched_total: balances.hatched_count,
            rotted_total: balances.rotted_count,
            staked: economy.stakes().len(),
            next_rate: num(report.emission_rate),
        });
    }

    match format {
        OutputFormat::Json => println!("{}", format_json(&rows)),
        OutputFormat::Table => {
            println!("{}", format_table(&rows));
            for outcome in &outcomes {
                match &outcome.error {
                    Some(e) => println!(
                        "week {}: {:?} applied {} then rejected: {}",
                        outcome.week, outcome.action, outcome.applied, e
                    ),
                    None => println!(
                        "week {}: {:?} applied {}",
                        outcome.week, outcome.action, outcome.applied
                    ),
                }
            }
        }
    }

    Ok(())
}
