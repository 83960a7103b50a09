//! # Ball Flight Engine
//!
//! Golf launch-monitor physics: converts club impact measurements into ball
//! launch conditions, then integrates the flight under gravity, drag and
//! Magnus lift to produce a sampled trajectory with carry, apex, lateral
//! deviation and flight time.
//!
//! ```no_run
//! use ballflight_engine::{
//!     compute_shot, Club, ClubImpactMeasurement, ClubTable, TrajectoryIntegrator,
//! };
//!
//! let table = ClubTable::standard();
//! let integrator = TrajectoryIntegrator::new();
//! let swing = ClubImpactMeasurement::square(Club::Iron7, 85.0).with_face_and_path(1.5, -1.0);
//!
//! let shot = compute_shot(&swing, &table, &integrator, None)?;
//! println!("{} carried {:.1} yd", shot.club, shot.trajectory.carry_yards);
//! # Ok::<(), ballflight_engine::FlightError>(())
//! ```

// Re-export the main types and functions
pub use aerodynamics::{coefficients, AeroCoefficients};
pub use atmosphere::AtmosphericConditions;
pub use club::{Club, ClubEntry, ClubFamily, ClubParameters, ClubTable, SpinTendency};
pub use config::EngineConfig;
pub use dispersion::{simulate_dispersion, DispersionParams, DispersionResults};
pub use error::{FlightError, Result};
pub use launch::{BallLaunchConditions, ClubImpactMeasurement, LaunchConverter};
pub use session::SessionStats;
pub use shot::{compute_shot, PersistenceRecord, RenderPayload, Shot, ShotShape};
pub use spin_decay::SpinDecay;
pub use trajectory_sampling::{sample_by_distance, DistanceSample, TrajectoryFlag};
pub use trajectory_solver::{
    FlightPhase, SimulationSettings, TrajectoryIntegrator, TrajectoryResult, TrajectorySample,
};
pub use validation::{
    ReferenceFixture, ReferenceValidator, ValidationReport, DEFAULT_TOLERANCE, EXTENDED_FIXTURES,
    EXTENDED_TOLERANCE, REFERENCE_FIXTURES,
};
pub use wind::WindVector;

// Module declarations
pub mod aerodynamics;
mod atmosphere;
mod club;
pub mod config;
pub mod constants;
pub mod dispersion;
mod error;
mod launch;
mod session;
mod shot;
mod spin_decay;
pub mod trajectory_sampling;
mod trajectory_solver;
pub mod validation;
mod wind;
