//! In-flight spin decay.
//!
//! A golf ball loses spin to skin friction on its dimpled surface. Over a
//! 5–8 s flight the loss is roughly 20–30%, so the model is a slow
//! exponential bounded below by a floor fraction of launch spin.

use serde::{Deserialize, Serialize};

use crate::error::{FlightError, Result};

/// Default decay rate (1/s)
pub const DEFAULT_DECAY_RATE_PER_S: f64 = 0.04;

/// Default floor as a fraction of launch spin
pub const DEFAULT_FLOOR_FRACTION: f64 = 0.5;

/// Parameters of the spin decay law `ω(t) = ω₀ · max(e^(−k·t), floor)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinDecay {
    /// Decay rate k (1/s)
    pub rate_per_s: f64,
    /// Minimum retained fraction of launch spin
    pub floor_fraction: f64,
}

impl SpinDecay {
    pub fn new(rate_per_s: f64, floor_fraction: f64) -> Self {
        Self {
            rate_per_s: rate_per_s.max(0.0),
            floor_fraction: floor_fraction.clamp(0.0, 1.0),
        }
    }

    /// Reject parameters deserialized around `new`
    pub fn validate(&self) -> Result<()> {
        if !self.rate_per_s.is_finite() || self.rate_per_s < 0.0 {
            return Err(FlightError::InvalidSettings(format!(
                "spin decay rate must be finite and non-negative, got {}",
                self.rate_per_s
            )));
        }
        if !(0.0..=1.0).contains(&self.floor_fraction) {
            return Err(FlightError::InvalidSettings(format!(
                "spin decay floor must lie in [0, 1], got {}",
                self.floor_fraction
            )));
        }
        Ok(())
    }

    /// No decay at all; useful for isolating lift effects in tests
    pub fn none() -> Self {
        Self { rate_per_s: 0.0, floor_fraction: 1.0 }
    }

    /// Fraction of launch spin remaining after `time_elapsed_s`
    pub fn retained_fraction(&self, time_elapsed_s: f64) -> f64 {
        if time_elapsed_s <= 0.0 {
            return 1.0;
        }
        let decay_factor = (-self.rate_per_s * time_elapsed_s).exp();
        decay_factor.max(self.floor_fraction).min(1.0)
    }

    /// Spin rate after `time_elapsed_s`, in the units of `initial_spin`
    pub fn spin_at(&self, initial_spin: f64, time_elapsed_s: f64) -> f64 {
        initial_spin * self.retained_fraction(time_elapsed_s)
    }
}

impl Default for SpinDecay {
    fn default() -> Self {
        Self::new(DEFAULT_DECAY_RATE_PER_S, DEFAULT_FLOOR_FRACTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_decay_at_launch() {
        let decay = SpinDecay::default();
        assert_eq!(decay.spin_at(3000.0, 0.0), 3000.0);
        assert_eq!(decay.spin_at(3000.0, -1.0), 3000.0);
    }

    #[test]
    fn test_spin_decay_realistic() {
        // Typical 6 s iron flight
        let decay = SpinDecay::default();
        let spin_after = decay.spin_at(7000.0, 6.0);
        let loss_percent = (1.0 - spin_after / 7000.0) * 100.0;
        assert!(loss_percent > 15.0 && loss_percent < 30.0);
    }

    #[test]
    fn test_spin_decay_floor() {
        let decay = SpinDecay::default();
        let spin_long_time = decay.spin_at(1000.0, 100.0);
        assert_eq!(spin_long_time, 500.0);
    }

    #[test]
    fn test_spin_decay_monotonic() {
        let decay = SpinDecay::default();
        let mut prev = decay.retained_fraction(0.0);
        for i in 1..200 {
            let f = decay.retained_fraction(i as f64 * 0.1);
            assert!(f <= prev);
            prev = f;
        }
    }

    #[test]
    fn test_new_clamps() {
        let decay = SpinDecay::new(-1.0, 1.5);
        assert_eq!(decay.rate_per_s, 0.0);
        assert_eq!(decay.floor_fraction, 1.0);
        assert_eq!(decay.retained_fraction(10.0), 1.0);
    }

    #[test]
    fn test_validate() {
        assert!(SpinDecay::default().validate().is_ok());
        assert!(SpinDecay::none().validate().is_ok());

        let bad = [
            SpinDecay { rate_per_s: -0.1, floor_fraction: 0.5 },
            SpinDecay { rate_per_s: f64::NAN, floor_fraction: 0.5 },
            SpinDecay { rate_per_s: f64::INFINITY, floor_fraction: 0.5 },
            SpinDecay { rate_per_s: 0.04, floor_fraction: 1.5 },
            SpinDecay { rate_per_s: 0.04, floor_fraction: -0.1 },
            SpinDecay { rate_per_s: 0.04, floor_fraction: f64::NAN },
        ];
        for decay in bad {
            assert!(
                matches!(decay.validate(), Err(FlightError::InvalidSettings(_))),
                "{decay:?}"
            );
        }
    }

    #[test]
    fn test_out_of_range_floor_does_not_panic() {
        let decay = SpinDecay { rate_per_s: 0.04, floor_fraction: 1.5 };
        assert_eq!(decay.retained_fraction(3.0), 1.0);
        let decay = SpinDecay { rate_per_s: 0.04, floor_fraction: f64::NAN };
        assert!(decay.retained_fraction(3.0) <= 1.0);
    }

    #[test]
    fn test_none() {
        assert_eq!(SpinDecay::none().spin_at(2500.0, 8.0), 2500.0);
    }
}
