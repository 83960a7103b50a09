//! Ball flight integration.
//!
//! State is integrated in SI units in a right-handed frame with x lateral
//! (positive right of target), y up and z downrange. Forces per unit mass:
//! gravity, drag opposing the air-relative velocity, and Magnus lift
//! perpendicular to both the spin axis and the air-relative velocity.
//! Samples are reported in yards.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aerodynamics;
use crate::atmosphere::AtmosphericConditions;
use crate::constants::{
    BALL_AREA_M2, BALL_MASS_KG, DEFAULT_MAX_FLIGHT_TIME_S, DEFAULT_TIME_STEP_S, G_ACCEL_MPS2,
    METERS_TO_YARDS, MIN_DIVISION_THRESHOLD, MIN_VELOCITY_THRESHOLD, MPH_TO_MPS, RPM_TO_RAD_S,
};
use crate::error::{FlightError, Result};
use crate::launch::BallLaunchConditions;
use crate::spin_decay::SpinDecay;
use crate::wind::WindVector;

/// Integration settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Fixed RK4 step (s)
    pub time_step_s: f64,
    /// Flight time after which the integration is declared diverged (s)
    pub max_flight_time_s: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            time_step_s: DEFAULT_TIME_STEP_S,
            max_flight_time_s: DEFAULT_MAX_FLIGHT_TIME_S,
        }
    }
}

impl SimulationSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.time_step_s.is_finite() || self.time_step_s <= 0.0 {
            return Err(FlightError::InvalidSettings(format!(
                "time step must be positive, got {}",
                self.time_step_s
            )));
        }
        if !self.max_flight_time_s.is_finite() || self.max_flight_time_s <= 0.0 {
            return Err(FlightError::InvalidSettings(format!(
                "max flight time must be positive, got {}",
                self.max_flight_time_s
            )));
        }
        if self.time_step_s > self.max_flight_time_s {
            return Err(FlightError::InvalidSettings(
                "time step exceeds max flight time".to_string(),
            ));
        }
        Ok(())
    }
}

/// Phase of the flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightPhase {
    Ascending,
    Descending,
    Landed,
}

/// Ball position at one integration step (yards)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub time_s: f64,
    pub downrange: f64,
    /// Positive = right of target
    pub lateral: f64,
    pub height: f64,
}

impl TrajectorySample {
    fn from_position(time_s: f64, position: &Vector3<f64>) -> Self {
        Self {
            time_s,
            downrange: position.z * METERS_TO_YARDS,
            lateral: position.x * METERS_TO_YARDS,
            height: position.y * METERS_TO_YARDS,
        }
    }
}

/// Complete flight of one shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryResult {
    /// Launch point first, landing sample last
    pub samples: Vec<TrajectorySample>,
    /// Downrange distance of the landing sample, clamped at zero. A ball
    /// blown back behind the tee has zero carry even though earlier
    /// samples went downrange.
    pub carry_yards: f64,
    /// Equal to carry; roll-out is not modelled
    pub total_yards: f64,
    pub apex_yards: f64,
    /// Lateral offset at landing (positive = right)
    pub lateral_yards: f64,
    pub flight_time_s: f64,
}

impl TrajectoryResult {
    /// Landing sample
    pub fn landing(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    /// Index of the highest sample
    pub fn apex_index(&self) -> usize {
        self.samples
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(best_i, best_h), (i, s)| {
                if s.height > best_h {
                    (i, s.height)
                } else {
                    (best_i, best_h)
                }
            })
            .0
    }

    /// Heading of the landing point relative to the target line (degrees)
    pub fn offline_angle_deg(&self) -> f64 {
        if self.carry_yards <= MIN_DIVISION_THRESHOLD {
            return 0.0;
        }
        self.lateral_yards.atan2(self.carry_yards).to_degrees()
    }
}

/// Everything the force model needs that is fixed for one shot
struct FlightModel {
    air_density: f64,
    initial_spin_rad_s: f64,
    spin_axis: Vector3<f64>,
    decay: SpinDecay,
    wind: Vector3<f64>,
}

impl FlightModel {
    fn new(
        launch: &BallLaunchConditions,
        wind: Vector3<f64>,
        air_density: f64,
        decay: SpinDecay,
    ) -> Self {
        let hla = launch.hla_deg.to_radians();
        let tilt = launch.spin_axis_deg.to_radians();

        // Horizontal unit vector pointing left of the initial heading. Pure
        // backspin spins about it.
        let left = Vector3::new(-hla.cos(), 0.0, hla.sin());
        let spin_axis = left * tilt.cos() + Vector3::y() * tilt.sin();

        Self {
            air_density,
            initial_spin_rad_s: launch.backspin_rpm.max(0.0) * RPM_TO_RAD_S,
            spin_axis,
            decay,
            wind,
        }
    }

    fn acceleration(&self, time_s: f64, velocity: &Vector3<f64>) -> Vector3<f64> {
        let gravity = Vector3::new(0.0, -G_ACCEL_MPS2, 0.0);

        let relative_velocity = velocity - self.wind;
        let speed = relative_velocity.norm();
        if speed < MIN_VELOCITY_THRESHOLD {
            return gravity;
        }

        let spin = self.decay.spin_at(self.initial_spin_rad_s, time_s);
        let coeffs = aerodynamics::coefficients(speed, spin);
        let k = 0.5 * self.air_density * BALL_AREA_M2 / BALL_MASS_KG;

        let drag = -relative_velocity * (k * coeffs.drag * speed);

        let lift_direction =
            self.spin_axis.cross(&relative_velocity).try_normalize(MIN_DIVISION_THRESHOLD);
        let lift = match lift_direction {
            Some(direction) => direction * (k * coeffs.lift * speed * speed),
            None => Vector3::zeros(),
        };

        gravity + drag + lift
    }
}

/// Integrates ball flight from launch conditions to landing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrajectoryIntegrator {
    settings: SimulationSettings,
    spin_decay: SpinDecay,
    atmosphere: AtmosphericConditions,
}

impl TrajectoryIntegrator {
    /// Default settings: 0.01 s steps, 30 s ceiling, standard air
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SimulationSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings, ..Self::default() })
    }

    pub fn with_spin_decay(mut self, spin_decay: SpinDecay) -> Self {
        self.spin_decay = spin_decay;
        self
    }

    pub fn with_atmosphere(mut self, atmosphere: AtmosphericConditions) -> Self {
        self.atmosphere = atmosphere;
        self
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn spin_decay(&self) -> &SpinDecay {
        &self.spin_decay
    }

    pub fn atmosphere(&self) -> &AtmosphericConditions {
        &self.atmosphere
    }

    /// Check the spin decay and atmosphere set through the builder methods
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()?;
        self.spin_decay.validate()?;
        self.atmosphere.validate()
    }

    /// Fly one shot. `None` wind and calm wind give identical results.
    ///
    /// Fails with `FlightError::InvalidSettings` for out-of-range decay or
    /// atmosphere parameters, and with `FlightError::Divergence` when the
    /// ball has not landed within the configured ceiling.
    pub fn simulate(
        &self,
        launch: &BallLaunchConditions,
        wind: Option<&WindVector>,
    ) -> Result<TrajectoryResult> {
        self.validate()?;

        let wind_velocity = wind.map(WindVector::velocity_mps).unwrap_or_else(Vector3::zeros);
        let model =
            FlightModel::new(launch, wind_velocity, self.atmosphere.air_density(), self.spin_decay);

        let speed = if launch.ball_speed_mph.is_finite() {
            launch.ball_speed_mph.max(0.0) * MPH_TO_MPS
        } else {
            0.0
        };
        let vla = launch.vla_deg.to_radians();
        let hla = launch.hla_deg.to_radians();
        let horizontal_speed = speed * vla.cos();

        let mut position = Vector3::zeros();
        let mut velocity = Vector3::new(
            horizontal_speed * hla.sin(),
            speed * vla.sin(),
            horizontal_speed * hla.cos(),
        );

        let dt = self.settings.time_step_s;
        let limit = self.settings.max_flight_time_s;

        let mut samples = vec![TrajectorySample::from_position(0.0, &position)];
        let mut phase =
            if velocity.y > 0.0 { FlightPhase::Ascending } else { FlightPhase::Descending };
        let mut steps: usize = 0;
        let mut time = 0.0;

        while phase != FlightPhase::Landed {
            // RK4 on (position, velocity)
            let acc1 = model.acceleration(time, &velocity);

            let vel2 = velocity + acc1 * (dt * 0.5);
            let acc2 = model.acceleration(time + dt * 0.5, &vel2);

            let vel3 = velocity + acc2 * (dt * 0.5);
            let acc3 = model.acceleration(time + dt * 0.5, &vel3);

            let vel4 = velocity + acc3 * dt;
            let acc4 = model.acceleration(time + dt, &vel4);

            position += (velocity + vel2 * 2.0 + vel3 * 2.0 + vel4) * (dt / 6.0);
            velocity += (acc1 + acc2 * 2.0 + acc3 * 2.0 + acc4) * (dt / 6.0);

            steps += 1;
            // Multiply instead of accumulating so step times stay exact
            time = steps as f64 * dt;

            if time > limit {
                warn!(elapsed_s = time, limit_s = limit, steps, "ball flight integration diverged");
                return Err(FlightError::Divergence { elapsed_s: time, limit_s: limit, steps });
            }

            samples.push(TrajectorySample::from_position(time, &position));

            // Lift can turn a flat launch back upward, so the phase follows vy
            phase =
                if velocity.y > 0.0 { FlightPhase::Ascending } else { FlightPhase::Descending };
            if phase == FlightPhase::Descending && position.y <= 0.0 {
                phase = FlightPhase::Landed;
            }
        }

        let apex = samples.iter().map(|s| s.height).fold(0.0_f64, f64::max);
        let (carry, lateral, flight_time) = match samples.last() {
            Some(landing) => (landing.downrange.max(0.0), landing.lateral, landing.time_s.max(0.0)),
            None => (0.0, 0.0, 0.0),
        };

        debug!(
            steps,
            flight_time_s = flight_time,
            carry_yards = carry,
            apex_yards = apex,
            lateral_yards = lateral,
            "ball landed"
        );

        Ok(TrajectoryResult {
            samples,
            carry_yards: carry,
            total_yards: carry,
            apex_yards: apex,
            lateral_yards: lateral,
            flight_time_s: flight_time,
        })
    }
}
