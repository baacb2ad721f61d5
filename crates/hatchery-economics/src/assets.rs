// crates/hatchery-economics/src/assets.rs
//
// Egg lifecycle tracking: weekly emission and time-driven rot.
//
// Eggs are stored in emission order and indexed by their `AssetId`.
// Decay is linear over ROT_WINDOW_WEEKS starting the week after emission,
// so an egg is immune during its birth week.

use std::collections::HashSet;

use hatchery_core::{Asset, AssetId, AssetState, HatcheryError};

use crate::emission::emission_count;

/// Owns every egg emitted during a run.
#[derive(Debug, Clone, Default)]
pub struct AssetTracker {
    assets: Vec<Asset>,
}

impl AssetTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self { assets: Vec::new() }
    }

    /// Emit the batch for `week`.
    ///
    /// Creates `floor(emission_rate)` eggs. The fractional remainder is
    /// dropped rather than carried into the next week.
    ///
    /// Returns the identifiers of the new eggs.
    pub fn emit_weekly_batch(&mut self, week: u64, emission_rate: f64) -> Vec<AssetId> {
        let count = emission_count(emission_rate);
        let start = self.assets.len() as u64;
        let ids: Vec<AssetId> = (start..start + count).map(AssetId).collect();
        self.assets
            .extend(ids.iter().map(|id| Asset::new(*id, week)));

        if count > 0 {
            tracing::debug!(week, count, "Emitted egg batch");
        }
        ids
    }

    /// Advance decay for every active egg not in `reserved` to `week`.
    ///
    /// Eggs whose decay reaches 1.0 transition to `Rotted`. Reserved eggs
    /// (those held by a live stake) keep their current decay position.
    ///
    /// Returns the identifiers of eggs that rotted during this call.
    pub fn advance_decay(&mut self, week: u64, reserved: &HashSet<AssetId>) -> Vec<AssetId> {
        let mut rotted = Vec::new();

        for asset in self.assets.iter_mut() {
            if !asset.is_active() || reserved.contains(&asset.id) {
                continue;
            }
            if week < asset.rot_start_week {
                continue;
            }
            asset.decay_fraction = asset.decay_at(week);
            if asset.decay_fraction >= 1.0 {
                asset.state = AssetState::Rotted;
                rotted.push(asset.id);
            }
        }

        if !rotted.is_empty() {
            tracing::debug!(week, count = rotted.len(), "Eggs rotted");
        }
        rotted
    }

    /// Transition an active egg to `Hatched`.
    ///
    /// # Errors
    /// Returns `HatcheryError::AssetNotFound` for an unknown id and
    /// `HatcheryError::AssetNotActive` if the egg already hatched or rotted.
    pub fn mark_hatched(&mut self, id: AssetId) -> Result<(), HatcheryError> {
        let asset = self
            .assets
            .get_mut(id.0 as usize)
            .ok_or(HatcheryError::AssetNotFound(id))?;

        if !asset.is_active() {
            return Err(HatcheryError::AssetNotActive {
                id,
                state: asset.state,
            });
        }

        asset.state = AssetState::Hatched;
        Ok(())
    }

    /// Look up an egg by identifier.
    pub fn get(&self, id: AssetId) -> Option<&Asset> {
        self.assets.get(id.0 as usize)
    }

    /// All eggs in emission order.
    pub fn all(&self) -> &[Asset] {
        &self.assets
    }

    pub fn list_active(&self) -> Vec<&Asset> {
        self.list_in_state(AssetState::Active)
    }

    pub fn list_hatched(&self) -> Vec<&Asset> {
        self.list_in_state(AssetState::Hatched)
    }

    pub fn list_rotted(&self) -> Vec<&Asset> {
        self.list_in_state(AssetState::Rotted)
    }

    /// Number of eggs currently in `state`.
    pub fn count(&self, state: AssetState) -> usize {
        self.assets.iter().filter(|a| a.state == state).count()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    fn list_in_state(&self, state: AssetState) -> Vec<&Asset> {
        self.assets.iter().filter(|a| a.state == state).collect()
    }
}
