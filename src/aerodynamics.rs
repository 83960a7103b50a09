//! Drag and lift coefficients for a spinning dimpled golf ball.
//!
//! Both coefficients are driven by the spin ratio `S = ω·r / v`. Drag also
//! depends on the Reynolds regime: dimples trip the boundary layer early, so
//! the drag crisis sits around Re ≈ 5e4–1e5 instead of the 3e5 of a smooth
//! sphere. Everything here is a table lookup with linear interpolation; the
//! integrator calls it four times per step.
//!
//! Data follow Bearman & Harvey (1976) and Smits & Smith (1994) wind tunnel
//! measurements, smoothed so neither coefficient has a discontinuity.

use serde::{Deserialize, Serialize};

use crate::constants::{AIR_VISCOSITY, BALL_RADIUS_M, STANDARD_AIR_DENSITY};

/// Largest spin ratio covered by the empirical data. Inputs are clamped.
pub const MAX_SPIN_RATIO: f64 = 0.5;

/// Drag growth per unit spin ratio
const CD_SPIN_SLOPE: f64 = 0.14;

/// Drag ceiling for any regime
const CD_MAX: f64 = 0.55;

/// Linear interpolation table clamped at both ends.
#[derive(Debug, Clone, Copy)]
struct CoefficientTable {
    x: &'static [f64],
    y: &'static [f64],
}

impl CoefficientTable {
    fn lookup(&self, value: f64) -> f64 {
        let n = self.x.len();
        if value.is_nan() || value <= self.x[0] {
            return self.y[0];
        }
        if value >= self.x[n - 1] {
            return self.y[n - 1];
        }

        let idx = self.x.partition_point(|&x| x <= value) - 1;
        let (x0, x1) = (self.x[idx], self.x[idx + 1]);
        let (y0, y1) = (self.y[idx], self.y[idx + 1]);
        y0 + (value - x0) / (x1 - x0) * (y1 - y0)
    }
}

/// Zero-spin drag coefficient against Reynolds number
const BASE_DRAG: CoefficientTable = CoefficientTable {
    x: &[3.0e4, 5.0e4, 7.5e4, 1.0e5, 2.0e5],
    y: &[0.50, 0.40, 0.28, 0.225, 0.21],
};

/// Lift coefficient against spin ratio, saturating near 0.32
const LIFT: CoefficientTable = CoefficientTable {
    x: &[0.0, 0.05, 0.10, 0.15, 0.20, 0.25, 0.30, 0.40, 0.50],
    y: &[0.0, 0.13, 0.20, 0.235, 0.26, 0.28, 0.295, 0.31, 0.32],
};

/// Drag/lift coefficient pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AeroCoefficients {
    pub drag: f64,
    pub lift: f64,
}

/// Spin ratio: surface speed over translational speed, clamped to [0, 0.5].
///
/// A ball that is not moving has no defined ratio; it is reported as 0.
pub fn spin_ratio(spin_rad_s: f64, speed_mps: f64) -> f64 {
    if speed_mps <= 0.0 || !speed_mps.is_finite() {
        return 0.0;
    }
    let tip_speed = spin_rad_s.max(0.0) * BALL_RADIUS_M;
    (tip_speed / speed_mps).clamp(0.0, MAX_SPIN_RATIO)
}

/// Reynolds number of the ball at standard density
pub fn reynolds_number(speed_mps: f64) -> f64 {
    STANDARD_AIR_DENSITY * speed_mps.max(0.0) * 2.0 * BALL_RADIUS_M / AIR_VISCOSITY
}

/// Drag coefficient for the given speed (m/s) and spin ratio
pub fn drag_coefficient(speed_mps: f64, spin_ratio: f64) -> f64 {
    let base = BASE_DRAG.lookup(reynolds_number(speed_mps));
    (base + CD_SPIN_SLOPE * spin_ratio.clamp(0.0, MAX_SPIN_RATIO)).min(CD_MAX)
}

/// Lift (Magnus) coefficient for the given spin ratio
pub fn lift_coefficient(spin_ratio: f64) -> f64 {
    LIFT.lookup(spin_ratio.clamp(0.0, MAX_SPIN_RATIO))
}

/// Coefficients for the ball's instantaneous airspeed (m/s) and spin (rad/s).
///
/// Never fails: negative or non-finite inputs fall back to the zero-spin,
/// low-speed end of the tables.
pub fn coefficients(speed_mps: f64, spin_rad_s: f64) -> AeroCoefficients {
    let speed = if speed_mps.is_finite() { speed_mps.max(0.0) } else { 0.0 };
    let spin = if spin_rad_s.is_finite() { spin_rad_s } else { 0.0 };
    let ratio = spin_ratio(spin, speed);

    AeroCoefficients {
        drag: drag_coefficient(speed, ratio),
        lift: lift_coefficient(ratio),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RPM_TO_RAD_S;

    #[test]
    fn test_spin_ratio() {
        // 3000 rpm driver at 60 m/s
        let s = spin_ratio(3000.0 * RPM_TO_RAD_S, 60.0);
        assert!((s - 0.1118).abs() < 1e-3);

        assert_eq!(spin_ratio(300.0, 0.0), 0.0);
        assert_eq!(spin_ratio(-50.0, 40.0), 0.0);
        assert_eq!(spin_ratio(1.0e6, 1.0), MAX_SPIN_RATIO);
    }

    #[test]
    fn test_reynolds_number() {
        // Post-critical for any full swing
        let re = reynolds_number(60.0);
        assert!(re > 1.5e5 && re < 2.0e5);
        assert_eq!(reynolds_number(-5.0), 0.0);
    }

    #[test]
    fn test_drag_increases_with_spin() {
        let low = drag_coefficient(50.0, 0.1);
        let high = drag_coefficient(50.0, 0.3);
        assert!(high > low);
    }

    #[test]
    fn test_drag_crisis_is_continuous() {
        // Walk through the crisis in small steps; no jumps
        let mut prev = drag_coefficient(5.0, 0.0);
        let mut v = 5.0;
        while v < 80.0 {
            v += 0.25;
            let cd = drag_coefficient(v, 0.0);
            assert!((cd - prev).abs() < 0.01, "jump at {} m/s", v);
            assert!(cd <= prev + 1e-12);
            prev = cd;
        }
    }

    #[test]
    fn test_drag_capped() {
        assert!(drag_coefficient(1.0, 1.0) <= 0.55);
        assert!(drag_coefficient(0.0, MAX_SPIN_RATIO) <= 0.55);
    }

    #[test]
    fn test_lift_increases_then_saturates() {
        assert_eq!(lift_coefficient(0.0), 0.0);
        assert!(lift_coefficient(0.3) > lift_coefficient(0.1));
        assert!((lift_coefficient(0.5) - 0.32).abs() < 1e-12);
        assert_eq!(lift_coefficient(2.0), lift_coefficient(0.5));
    }

    #[test]
    fn test_lift_interpolates() {
        let cl = lift_coefficient(0.075);
        assert!((cl - 0.165).abs() < 1e-12);
    }

    #[test]
    fn test_zero_speed_baseline() {
        let c = coefficients(0.0, 500.0);
        assert_eq!(c.lift, 0.0);
        assert_eq!(c.drag, 0.50);
    }

    #[test]
    fn test_non_finite_inputs_clamped() {
        let c = coefficients(f64::NAN, f64::INFINITY);
        assert!(c.drag.is_finite());
        assert!(c.lift.is_finite());
    }
}
