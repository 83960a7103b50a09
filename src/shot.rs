//! Full shot pipeline and the records handed to the outside world.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::club::{Club, ClubTable};
use crate::error::Result;
use crate::launch::{BallLaunchConditions, ClubImpactMeasurement, LaunchConverter};
use crate::trajectory_solver::{TrajectoryIntegrator, TrajectoryResult};
use crate::wind::WindVector;

/// Spin axis tilt below which a shot counts as straight (degrees)
const STRAIGHT_AXIS_DEG: f64 = 2.0;

/// Spin axis tilt at which a fade/draw becomes a slice/hook (degrees)
const SEVERE_AXIS_DEG: f64 = 8.0;

/// Start direction within this many degrees of target is centered
const CENTER_HLA_DEG: f64 = 2.0;

/// Descriptive shot shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotShape {
    Straight,
    Push,
    Pull,
    Fade,
    Slice,
    Draw,
    Hook,
}

impl ShotShape {
    /// Curvature comes from the spin axis. Start direction only matters for
    /// shots that do not curve.
    pub fn classify(launch: &BallLaunchConditions) -> Self {
        let axis = launch.spin_axis_deg;
        let hla = launch.hla_deg;

        if axis.abs() < STRAIGHT_AXIS_DEG {
            if hla.abs() < CENTER_HLA_DEG {
                ShotShape::Straight
            } else if hla > 0.0 {
                ShotShape::Push
            } else {
                ShotShape::Pull
            }
        } else if axis > 0.0 {
            if axis < SEVERE_AXIS_DEG {
                ShotShape::Fade
            } else {
                ShotShape::Slice
            }
        } else if axis > -SEVERE_AXIS_DEG {
            ShotShape::Draw
        } else {
            ShotShape::Hook
        }
    }
}

impl fmt::Display for ShotShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShotShape::Straight => "Straight",
            ShotShape::Push => "Push",
            ShotShape::Pull => "Pull",
            ShotShape::Fade => "Fade",
            ShotShape::Slice => "Slice",
            ShotShape::Draw => "Draw",
            ShotShape::Hook => "Hook",
        };
        f.write_str(name)
    }
}

/// One computed shot: what was measured, how the ball launched, how it flew
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub club: Club,
    pub measurement: ClubImpactMeasurement,
    pub launch: BallLaunchConditions,
    pub trajectory: TrajectoryResult,
    pub shape: ShotShape,
}

/// Payload for the 3D viewer's add-shot entry point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload {
    /// (x lateral, y height, z downrange) in yards
    pub points: Vec<[f64; 3]>,
    pub carry: f64,
    pub total: f64,
    pub apex: f64,
    pub lateral: f64,
    pub flight_time: f64,
    pub club_speed: f64,
    pub ball_speed: f64,
    pub vla: f64,
    pub backspin: f64,
    pub club_type: Club,
    pub shot_shape: ShotShape,
}

/// Flat record of every named field, for storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceRecord {
    pub club: Club,
    pub club_speed_mph: f64,
    pub face_angle_deg: f64,
    pub path_deg: f64,
    pub contact_point: f64,
    pub tempo: Option<f64>,
    pub ball_speed_mph: f64,
    pub vla_deg: f64,
    pub hla_deg: f64,
    pub backspin_rpm: f64,
    pub spin_axis_deg: f64,
    pub carry_yards: f64,
    pub total_yards: f64,
    pub apex_yards: f64,
    pub lateral_yards: f64,
    pub flight_time_s: f64,
    pub shot_shape: ShotShape,
}

impl PersistenceRecord {
    pub const CSV_HEADER: &'static str = "club,club_speed_mph,face_angle_deg,path_deg,contact_point,tempo,\
ball_speed_mph,vla_deg,hla_deg,backspin_rpm,spin_axis_deg,carry_yards,total_yards,apex_yards,\
lateral_yards,flight_time_s,shot_shape";

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{:.1},{:.1},{:.1},{:.1},{},{:.1},{:.1},{:.1},{:.0},{:.1},{:.1},{:.1},{:.1},{:.1},{:.2},{}",
            self.club,
            self.club_speed_mph,
            self.face_angle_deg,
            self.path_deg,
            self.contact_point,
            self.tempo.map(|t| format!("{t:.2}")).unwrap_or_default(),
            self.ball_speed_mph,
            self.vla_deg,
            self.hla_deg,
            self.backspin_rpm,
            self.spin_axis_deg,
            self.carry_yards,
            self.total_yards,
            self.apex_yards,
            self.lateral_yards,
            self.flight_time_s,
            self.shot_shape,
        )
    }
}

impl Shot {
    pub fn carry_yards(&self) -> f64 {
        self.trajectory.carry_yards
    }

    pub fn render_payload(&self) -> RenderPayload {
        RenderPayload {
            points: self
                .trajectory
                .samples
                .iter()
                .map(|s| [s.lateral, s.height, s.downrange])
                .collect(),
            carry: self.trajectory.carry_yards,
            total: self.trajectory.total_yards,
            apex: self.trajectory.apex_yards,
            lateral: self.trajectory.lateral_yards,
            flight_time: self.trajectory.flight_time_s,
            club_speed: self.measurement.club_speed_mph,
            ball_speed: self.launch.ball_speed_mph,
            vla: self.launch.vla_deg,
            backspin: self.launch.backspin_rpm,
            club_type: self.club,
            shot_shape: self.shape,
        }
    }

    pub fn persistence_record(&self) -> PersistenceRecord {
        PersistenceRecord {
            club: self.club,
            club_speed_mph: self.measurement.club_speed_mph,
            face_angle_deg: self.measurement.face_angle_deg,
            path_deg: self.measurement.path_deg,
            contact_point: self.measurement.contact_point,
            tempo: self.measurement.tempo,
            ball_speed_mph: self.launch.ball_speed_mph,
            vla_deg: self.launch.vla_deg,
            hla_deg: self.launch.hla_deg,
            backspin_rpm: self.launch.backspin_rpm,
            spin_axis_deg: self.launch.spin_axis_deg,
            carry_yards: self.trajectory.carry_yards,
            total_yards: self.trajectory.total_yards,
            apex_yards: self.trajectory.apex_yards,
            lateral_yards: self.trajectory.lateral_yards,
            flight_time_s: self.trajectory.flight_time_s,
            shot_shape: self.shape,
        }
    }
}

/// Measurement in, finished shot out
pub fn compute_shot(
    measurement: &ClubImpactMeasurement,
    table: &ClubTable,
    integrator: &TrajectoryIntegrator,
    wind: Option<&WindVector>,
) -> Result<Shot> {
    let launch = LaunchConverter::convert_with_table(measurement, table)?;
    let trajectory = integrator.simulate(&launch, wind)?;
    let shape = ShotShape::classify(&launch);

    info!(
        club = %measurement.club,
        ball_speed_mph = launch.ball_speed_mph,
        vla_deg = launch.vla_deg,
        carry_yards = trajectory.carry_yards,
        apex_yards = trajectory.apex_yards,
        shape = %shape,
        "shot computed"
    );

    Ok(Shot {
        club: measurement.club,
        measurement: measurement.clone(),
        launch,
        trajectory,
        shape,
    })
}
