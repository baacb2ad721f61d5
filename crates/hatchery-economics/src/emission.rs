// crates/hatchery-economics/src/emission.rs
//
// Geometric emission-decay schedule.
//
// Each week the emission rate is multiplied by (1 - decay_percent / 100):
//   rate_n = initial * (1 - decay_percent / 100)^n
//
// The egg engine truncates the rate to a whole number of eggs per week; the
// projection layer uses the continuous rate directly as token emission.

use hatchery_core::HatcheryError;
use serde::{Deserialize, Serialize};

/// Largest accepted initial emission, in eggs per week.
pub const MAX_WEEKLY_EMISSION: f64 = 1_000_000.0;

/// Multiplicative weekly decay factor for a percentage decay rate.
pub fn decay_factor(decay_percent: f64) -> f64 {
    1.0 - decay_percent / 100.0
}

/// Emission rate after `weeks` decay steps.
pub fn emission_rate_after(initial: f64, decay_percent: f64, weeks: u64) -> f64 {
    let exponent = i32::try_from(weeks).unwrap_or(i32::MAX);
    initial * decay_factor(decay_percent).powi(exponent)
}

/// Whole number of eggs emitted at `rate` (truncated toward zero).
///
/// Negative and non-finite rates emit nothing.
pub fn emission_count(rate: f64) -> u64 {
    if !rate.is_finite() || rate <= 0.0 {
        return 0;
    }
    rate.trunc() as u64
}

/// Validate a decay percentage.
///
/// # Errors
/// Returns `HatcheryError::InvalidParameter` unless `decay_percent` is finite
/// and within [0, 100].
pub fn validate_decay_percent(decay_percent: f64) -> Result<(), HatcheryError> {
    if !decay_percent.is_finite() || !(0.0..=100.0).contains(&decay_percent) {
        return Err(HatcheryError::InvalidParameter(format!(
            "decay percent must be within [0, 100], got {}",
            decay_percent
        )));
    }
    Ok(())
}

/// Running state of a decaying emission rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionSchedule {
    /// Rate configured at reset.
    pub initial_rate: f64,
    /// Rate used for the next emission.
    pub current_rate: f64,
    /// Percentage removed from the rate each week.
    pub decay_percent: f64,
}

impl EmissionSchedule {
    /// Create a schedule starting at `initial_rate`.
    ///
    /// # Errors
    /// Returns `HatcheryError::InvalidParameter` for a negative, non-finite or
    /// above-`MAX_WEEKLY_EMISSION` rate, or a decay percentage outside [0, 100].
    pub fn new(initial_rate: f64, decay_percent: f64) -> Result<Self, HatcheryError> {
        if !initial_rate.is_finite() || initial_rate < 0.0 {
            return Err(HatcheryError::InvalidParameter(format!(
                "initial emission must be finite and non-negative, got {}",
                initial_rate
            )));
        }
        if initial_rate > MAX_WEEKLY_EMISSION {
            return Err(HatcheryError::InvalidParameter(format!(
                "initial emission must be at most {} eggs per week, got {}",
                MAX_WEEKLY_EMISSION, initial_rate
            )));
        }
        validate_decay_percent(decay_percent)?;
        Ok(Self {
            initial_rate,
            current_rate: initial_rate,
            decay_percent,
        })
    }

    /// Apply one week of decay to the current rate.
    pub fn decay(&mut self) {
        self.current_rate *= decay_factor(self.decay_percent);
    }

    /// Eggs the current rate would emit this week.
    pub fn current_count(&self) -> u64 {
        emission_count(self.current_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_factor() {
        assert!((decay_factor(10.0) - 0.9).abs() < 1e-12);
        assert_eq!(decay_factor(0.0), 1.0);
        assert_eq!(decay_factor(100.0), 0.0);
    }

    #[test]
    fn test_emission_rate_after() {
        assert_eq!(emission_rate_after(10.0, 10.0, 0), 10.0);
        assert!((emission_rate_after(10.0, 10.0, 2) - 8.1).abs() < 1e-12);
    }

    #[test]
    fn test_emission_count_truncates() {
        assert_eq!(emission_count(10.0), 10);
        assert_eq!(emission_count(9.999), 9);
        assert_eq!(emission_count(0.99), 0);
        assert_eq!(emission_count(-3.0), 0);
        assert_eq!(emission_count(f64::NAN), 0);
    }

    #[test]
    fn test_schedule_decay_matches_closed_form() {
        let mut schedule = EmissionSchedule::new(10.0, 10.0).unwrap();
        for _ in 0..5 {
            schedule.decay();
        }
        let expected = emission_rate_after(10.0, 10.0, 5);
        assert!((schedule.current_rate - expected).abs() < 1e-9);
        assert_eq!(schedule.current_count(), 5);
    }

    #[test]
    fn test_schedule_rejects_bad_parameters() {
        assert!(EmissionSchedule::new(-1.0, 10.0).is_err());
        assert!(EmissionSchedule::new(10.0, 101.0).is_err());
        assert!(EmissionSchedule::new(10.0, -0.5).is_err());
        assert!(EmissionSchedule::new(f64::INFINITY, 10.0).is_err());
    }

    #[test]
    fn test_schedule_emission_bound() {
        assert!(EmissionSchedule::new(MAX_WEEKLY_EMISSION, 10.0).is_ok());
        assert!(matches!(
            EmissionSchedule::new(1e15, 10.0),
            Err(HatcheryError::InvalidParameter(_))
        ));
    }
}
