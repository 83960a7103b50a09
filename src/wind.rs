use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::MPH_TO_MPS;

/// Constant wind over the whole flight
///
/// `direction_deg` is where the wind blows FROM, clockwise from the target
/// line: 0 = straight into the golfer's face (headwind), 90 = from the right,
/// 180 = from behind (tailwind).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindVector {
    pub speed_mph: f64,
    #[serde(default)]
    pub direction_deg: f64,
}

impl WindVector {
    pub fn new(speed_mph: f64, direction_deg: f64) -> Self {
        Self { speed_mph, direction_deg }
    }

    /// No wind
    pub fn calm() -> Self {
        Self::default()
    }

    pub fn headwind(speed_mph: f64) -> Self {
        Self::new(speed_mph, 0.0)
    }

    pub fn tailwind(speed_mph: f64) -> Self {
        Self::new(speed_mph, 180.0)
    }

    pub fn is_calm(&self) -> bool {
        !self.speed_mph.is_finite() || self.speed_mph.abs() < f64::EPSILON
    }

    /// Air velocity in the flight frame (m/s): x lateral, y up, z downrange
    pub fn velocity_mps(&self) -> Vector3<f64> {
        if self.is_calm() {
            return Vector3::zeros();
        }

        let speed_mps = self.speed_mph * MPH_TO_MPS;
        let angle_rad = self.direction_deg.to_radians();

        // Air moves away from where the wind comes from
        Vector3::new(
            -speed_mps * angle_rad.sin(),
            0.0,
            -speed_mps * angle_rad.cos(),
        )
    }

    /// Downrange component (mph, positive = helping)
    pub fn tail_component_mph(&self) -> f64 {
        if self.is_calm() {
            return 0.0;
        }
        -self.speed_mph * self.direction_deg.to_radians().cos()
    }

    /// Lateral component (mph, positive = pushing the ball right)
    pub fn cross_component_mph(&self) -> f64 {
        if self.is_calm() {
            return 0.0;
        }
        -self.speed_mph * self.direction_deg.to_radians().sin()
    }
}
