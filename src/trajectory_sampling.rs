use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FlightError, Result};
use crate::trajectory_solver::TrajectoryResult;

/// Upper bound on the number of samples one call may produce
pub const MAX_DISTANCE_SAMPLES: usize = 100_000;

/// Flags for notable points of the flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrajectoryFlag {
    Apex,
    Landing,
}

impl fmt::Display for TrajectoryFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrajectoryFlag::Apex => write!(f, "apex"),
            TrajectoryFlag::Landing => write!(f, "landing"),
        }
    }
}

/// Flight state at a fixed downrange distance (yards)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceSample {
    pub downrange: f64,
    pub lateral: f64,
    pub height: f64,
    pub time: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<TrajectoryFlag>,
}

/// Resample a flight at 0, step, 2·step, ... yards downrange, ending with a
/// sample exactly at carry.
///
/// Values are linearly interpolated between integration samples. Sampling
/// stops at carry, so a ball blown back behind the tee (zero carry) yields
/// only the landing sample at 0 yards.
pub fn sample_by_distance(
    trajectory: &TrajectoryResult,
    step_yards: f64,
) -> Result<Vec<DistanceSample>> {
    if !step_yards.is_finite() || step_yards <= 0.0 {
        return Err(FlightError::InvalidSettings(format!(
            "sample interval must be positive, got {step_yards}"
        )));
    }
    let carry = trajectory.carry_yards.max(0.0);
    if carry / step_yards >= MAX_DISTANCE_SAMPLES as f64 {
        return Err(FlightError::InvalidSettings(format!(
            "sample interval {step_yards} yd gives more than {MAX_DISTANCE_SAMPLES} samples over {carry:.1} yd"
        )));
    }

    let x_vals: Vec<f64> = trajectory.samples.iter().map(|s| s.downrange).collect();
    let lateral: Vec<f64> = trajectory.samples.iter().map(|s| s.lateral).collect();
    let height: Vec<f64> = trajectory.samples.iter().map(|s| s.height).collect();
    let times: Vec<f64> = trajectory.samples.iter().map(|s| s.time_s).collect();

    let mut distances: Vec<f64> = (0..)
        .map(|i| i as f64 * step_yards)
        .take_while(|&d| d < carry - 1e-9)
        .collect();
    distances.push(carry);

    let mut samples: Vec<DistanceSample> = distances
        .iter()
        .map(|&d| DistanceSample {
            downrange: d,
            lateral: interpolate(&x_vals, &lateral, d),
            height: interpolate(&x_vals, &height, d).max(0.0),
            time: interpolate(&x_vals, &times, d),
            flags: Vec::new(),
        })
        .collect();

    if let Some(apex) = trajectory.samples.get(trajectory.apex_index()) {
        if apex.height > 0.0 {
            if let Some(idx) = find_closest_sample_index(&samples, apex.downrange) {
                samples[idx].flags.push(TrajectoryFlag::Apex);
            }
        }
    }
    if let Some(last) = samples.last_mut() {
        last.flags.push(TrajectoryFlag::Landing);
    }

    Ok(samples)
}

/// Linear interpolation over ascending `x_vals`, clamped at both ends
fn interpolate(x_vals: &[f64], y_vals: &[f64], x: f64) -> f64 {
    if x_vals.is_empty() || x_vals.len() != y_vals.len() {
        return 0.0;
    }

    if x <= x_vals[0] {
        return y_vals[0];
    }

    if x >= x_vals[x_vals.len() - 1] {
        return y_vals[y_vals.len() - 1];
    }

    // Binary search for the correct interval
    let mut left = 0;
    let mut right = x_vals.len() - 1;

    while right - left > 1 {
        let mid = (left + right) / 2;
        if x_vals[mid] <= x {
            left = mid;
        } else {
            right = mid;
        }
    }

    let (x1, x2) = (x_vals[left], x_vals[right]);
    let (y1, y2) = (y_vals[left], y_vals[right]);

    if (x2 - x1).abs() < f64::EPSILON {
        return y1;
    }

    y1 + (y2 - y1) * (x - x1) / (x2 - x1)
}

fn find_closest_sample_index(samples: &[DistanceSample], target: f64) -> Option<usize> {
    samples
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (a.downrange - target)
                .abs()
                .total_cmp(&(b.downrange - target).abs())
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory_solver::TrajectorySample;

    fn parabola() -> TrajectoryResult {
        // 100 yards of carry, apex of 25 yards at 50
        let samples: Vec<TrajectorySample> = (0..=20)
            .map(|i| {
                let d = i as f64 * 5.0;
                TrajectorySample {
                    time_s: i as f64 * 0.25,
                    downrange: d,
                    lateral: d * 0.1,
                    height: d * (100.0 - d) / 100.0,
                }
            })
            .collect();
        TrajectoryResult {
            samples,
            carry_yards: 100.0,
            total_yards: 100.0,
            apex_yards: 25.0,
            lateral_yards: 10.0,
            flight_time_s: 5.0,
        }
    }

    #[test]
    fn test_regular_intervals_end_at_carry() {
        let samples = sample_by_distance(&parabola(), 30.0).unwrap();
        let distances: Vec<f64> = samples.iter().map(|s| s.downrange).collect();
        assert_eq!(distances, vec![0.0, 30.0, 60.0, 90.0, 100.0]);
        assert_eq!(samples.last().unwrap().flags, vec![TrajectoryFlag::Landing]);
    }

    #[test]
    fn test_interpolation() {
        let samples = sample_by_distance(&parabola(), 12.5).unwrap();
        let s = &samples[1];
        assert_eq!(s.downrange, 12.5);
        assert!((s.lateral - 1.25).abs() < 1e-9);
        assert!((s.time - 0.625).abs() < 1e-9);
        // Between the 10 and 15 yard samples (9.0 and 12.75)
        assert!((s.height - 10.875).abs() < 1e-9);
    }

    #[test]
    fn test_apex_flagged() {
        let samples = sample_by_distance(&parabola(), 10.0).unwrap();
        let apex: Vec<&DistanceSample> = samples.iter().filter(|s| s.flags.contains(&TrajectoryFlag::Apex)).collect();
        assert_eq!(apex.len(), 1);
        assert_eq!(apex[0].downrange, 50.0);
    }

    #[test]
    fn test_exact_multiple_not_duplicated() {
        let samples = sample_by_distance(&parabola(), 25.0).unwrap();
        assert_eq!(samples.len(), 5);
    }

    #[test]
    fn test_invalid_step() {
        assert!(matches!(sample_by_distance(&parabola(), 0.0), Err(FlightError::InvalidSettings(_))));
        assert!(sample_by_distance(&parabola(), -5.0).is_err());
        assert!(sample_by_distance(&parabola(), f64::NAN).is_err());
    }

    #[test]
    fn test_tiny_step_rejected() {
        let err = sample_by_distance(&parabola(), 1e-9).unwrap_err();
        assert!(matches!(err, FlightError::InvalidSettings(_)));

        // 100 yards at 0.01 is still within the cap
        assert_eq!(sample_by_distance(&parabola(), 0.01).unwrap().len(), 10_001);
    }

    #[test]
    fn test_zero_carry() {
        let mut flight = parabola();
        flight.carry_yards = 0.0;
        let samples = sample_by_distance(&flight, 10.0).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].downrange, 0.0);
    }

    #[test]
    fn test_flag_display() {
        assert_eq!(TrajectoryFlag::Apex.to_string(), "apex");
        assert_eq!(TrajectoryFlag::Landing.to_string(), "landing");
    }
}
