// crates/hatchery-core/src/lib.rs
//
// hatchery-core: Core types and error definitions for the Hatchery simulator.
//
// This is the leaf crate that the rest of the workspace depends on.
// It defines the egg record, its lifecycle states, stake payment kinds,
// and the shared error type.

pub mod asset;
pub mod error;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use hatchery_core::Asset;`
pub use asset::{Asset, AssetId, AssetState, ColorTag, LedgerKind, PaymentKind, ROT_WINDOW_WEEKS};
pub use error::HatcheryError;
