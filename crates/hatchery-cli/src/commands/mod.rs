// crates/hatchery-cli/src/commands/mod.rs
//
// Command module declarations for the Hatchery CLI.

pub mod project;
pub mod simulate;
