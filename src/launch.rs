//! Club impact to ball launch conversion.
//!
//! A launch monitor reports what the club did (speed, face, path). The flight
//! model needs what the ball does right after impact. The conversion is an
//! empirical D-plane model: face angle sets most of the start direction, the
//! face-to-path difference tilts the spin axis, and loft sets launch and
//! backspin.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::club::{Club, ClubParameters, ClubTable};
use crate::constants::{
    FACE_TO_LOFT_FACTOR, LAUNCH_RATIO_INTERCEPT, LAUNCH_RATIO_MAX, LAUNCH_RATIO_SLOPE_DEG,
    MAX_BACKSPIN_RPM, MAX_SPIN_AXIS_DEG, MIN_BACKSPIN_RPM, REFERENCE_CLUB_SPEED_MPH,
    SIDESPIN_RPM_PER_DEGREE, SPIN_TILT_FACTOR, VLA_MAX_DEG, VLA_MIN_DEG,
};
use crate::error::Result;

/// One swing as captured by the launch monitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubImpactMeasurement {
    pub club: Club,
    /// Club head speed (mph)
    pub club_speed_mph: f64,
    /// Face angle to target at impact (degrees, positive = open)
    #[serde(default)]
    pub face_angle_deg: f64,
    /// Swing path (degrees, positive = in-to-out)
    #[serde(default)]
    pub path_deg: f64,
    /// Strike offset from face center (mm, positive = toe)
    #[serde(default)]
    pub contact_point: f64,
    /// Backswing to downswing time ratio
    #[serde(default)]
    pub tempo: Option<f64>,
}

impl ClubImpactMeasurement {
    /// Square face, zero path, centered strike
    pub fn square(club: Club, club_speed_mph: f64) -> Self {
        Self {
            club,
            club_speed_mph,
            face_angle_deg: 0.0,
            path_deg: 0.0,
            contact_point: 0.0,
            tempo: None,
        }
    }

    pub fn with_face_and_path(mut self, face_angle_deg: f64, path_deg: f64) -> Self {
        self.face_angle_deg = face_angle_deg;
        self.path_deg = path_deg;
        self
    }

    /// Face angle minus path (degrees). Positive curves the ball right.
    pub fn face_to_path(&self) -> f64 {
        self.face_angle_deg - self.path_deg
    }
}

/// Ball state at the moment it leaves the face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallLaunchConditions {
    /// Ball speed (mph)
    pub ball_speed_mph: f64,
    /// Vertical launch angle (degrees above horizontal)
    pub vla_deg: f64,
    /// Horizontal launch angle (degrees, positive = right of target)
    pub hla_deg: f64,
    /// Backspin (rpm)
    pub backspin_rpm: f64,
    /// Spin axis tilt (degrees, positive = curves right)
    pub spin_axis_deg: f64,
}

impl BallLaunchConditions {
    pub fn new(
        ball_speed_mph: f64,
        vla_deg: f64,
        hla_deg: f64,
        backspin_rpm: f64,
        spin_axis_deg: f64,
    ) -> Self {
        Self {
            ball_speed_mph,
            vla_deg,
            hla_deg,
            backspin_rpm: backspin_rpm.max(0.0),
            spin_axis_deg,
        }
    }

    /// Same shot mirrored across the target line
    pub fn mirrored(&self) -> Self {
        Self {
            hla_deg: -self.hla_deg,
            spin_axis_deg: -self.spin_axis_deg,
            ..*self
        }
    }
}

/// Stateless measurement to launch transform
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchConverter;

impl LaunchConverter {
    /// Convert a measurement using an explicit club row.
    ///
    /// Never fails: negative club speed is treated as zero and the outputs
    /// are clamped into their physical ranges.
    pub fn convert(
        measurement: &ClubImpactMeasurement,
        params: &ClubParameters,
    ) -> BallLaunchConditions {
        let club_speed = if measurement.club_speed_mph.is_finite() {
            measurement.club_speed_mph.max(0.0)
        } else {
            0.0
        };
        let face = finite_or_zero(measurement.face_angle_deg);
        let path = finite_or_zero(measurement.path_deg);

        let ball_speed = club_speed * params.smash_factor;

        let dynamic_loft = params.base_loft_deg + FACE_TO_LOFT_FACTOR * face;
        let launch_ratio = (LAUNCH_RATIO_INTERCEPT + LAUNCH_RATIO_SLOPE_DEG / params.base_loft_deg)
            .min(LAUNCH_RATIO_MAX);
        let vla = (dynamic_loft * launch_ratio).clamp(VLA_MIN_DEG, VLA_MAX_DEG);

        let hla = face * params.face_weight + path * (1.0 - params.face_weight);

        let loft_delta = dynamic_loft - params.base_loft_deg;
        let reference_ball_speed = params.smash_factor * REFERENCE_CLUB_SPEED_MPH;
        let spin_at_reference = params.spin.base_rpm + params.spin.rpm_per_degree * loft_delta;
        let backspin = (spin_at_reference * ball_speed / reference_ball_speed)
            .clamp(MIN_BACKSPIN_RPM, MAX_BACKSPIN_RPM);

        let sidespin = (face - path) * SPIN_TILT_FACTOR * SIDESPIN_RPM_PER_DEGREE;
        let spin_axis = sidespin
            .atan2(backspin)
            .to_degrees()
            .clamp(-MAX_SPIN_AXIS_DEG, MAX_SPIN_AXIS_DEG);

        let launch = BallLaunchConditions {
            ball_speed_mph: ball_speed,
            vla_deg: vla,
            hla_deg: hla,
            backspin_rpm: backspin,
            spin_axis_deg: spin_axis,
        };

        debug!(
            club = %measurement.club,
            club_speed_mph = club_speed,
            ball_speed_mph = launch.ball_speed_mph,
            vla_deg = launch.vla_deg,
            hla_deg = launch.hla_deg,
            backspin_rpm = launch.backspin_rpm,
            spin_axis_deg = launch.spin_axis_deg,
            "converted impact"
        );

        launch
    }

    /// Convert using the measurement's club row from `table`.
    ///
    /// A club without a row is a configuration error.
    pub fn convert_with_table(
        measurement: &ClubImpactMeasurement,
        table: &ClubTable,
    ) -> Result<BallLaunchConditions> {
        let params = table.get(measurement.club)?;
        Ok(Self::convert(measurement, params))
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
