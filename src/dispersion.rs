//! Seeded Monte Carlo shot dispersion.
//!
//! Perturbs a base swing with normal noise on club speed, face and path, then
//! flies every perturbed shot. Samples are drawn sequentially from one seeded
//! generator so a seed always produces the same swings; the flights run in
//! parallel with results kept in draw order.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::club::ClubTable;
use crate::error::{FlightError, Result};
use crate::launch::{ClubImpactMeasurement, LaunchConverter};
use crate::session::{mean, sample_std};
use crate::trajectory_solver::TrajectoryIntegrator;
use crate::wind::WindVector;

/// Monte Carlo parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispersionParams {
    pub shots: usize,
    pub club_speed_std_mph: f64,
    pub face_std_deg: f64,
    pub path_std_deg: f64,
    pub seed: u64,
}

impl Default for DispersionParams {
    fn default() -> Self {
        Self {
            shots: 100,
            club_speed_std_mph: 2.0,
            face_std_deg: 1.5,
            path_std_deg: 2.0,
            seed: 42,
        }
    }
}

/// Outcome of a dispersion run, in draw order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersionResults {
    pub carries: Vec<f64>,
    pub laterals: Vec<f64>,
    pub mean_carry: f64,
    pub std_carry: f64,
    pub mean_lateral: f64,
    pub std_lateral: f64,
}

fn normal(mean: f64, std_dev: f64, name: &str) -> Result<Normal<f64>> {
    if !std_dev.is_finite() || std_dev < 0.0 {
        return Err(FlightError::InvalidSettings(format!(
            "{name} standard deviation must be non-negative, got {std_dev}"
        )));
    }
    Normal::new(mean, std_dev).map_err(|e| FlightError::InvalidSettings(format!("{name}: {e}")))
}

/// Perturbed copies of `base`, deterministic for a given seed
pub fn perturbed_measurements(
    base: &ClubImpactMeasurement,
    params: &DispersionParams,
) -> Result<Vec<ClubImpactMeasurement>> {
    let speed_dist = normal(base.club_speed_mph, params.club_speed_std_mph, "club speed")?;
    let face_dist = normal(base.face_angle_deg, params.face_std_deg, "face angle")?;
    let path_dist = normal(base.path_deg, params.path_std_deg, "path")?;

    let mut rng = StdRng::seed_from_u64(params.seed);

    let measurements = (0..params.shots)
        .map(|_| {
            let mut m = base.clone();
            m.club_speed_mph = speed_dist.sample(&mut rng).max(0.0);
            m.face_angle_deg = face_dist.sample(&mut rng);
            m.path_deg = path_dist.sample(&mut rng);
            m
        })
        .collect();
    Ok(measurements)
}

/// Fly `params.shots` perturbed versions of `base`
pub fn simulate_dispersion(
    base: &ClubImpactMeasurement,
    params: &DispersionParams,
    table: &ClubTable,
    integrator: &TrajectoryIntegrator,
    wind: Option<&WindVector>,
) -> Result<DispersionResults> {
    if params.shots == 0 {
        return Err(FlightError::InvalidSettings("dispersion needs at least one shot".to_string()));
    }

    let club_params = table.get(base.club)?;
    let measurements = perturbed_measurements(base, params)?;

    let flights: Vec<(f64, f64)> = measurements
        .par_iter()
        .map(|m| {
            let launch = LaunchConverter::convert(m, club_params);
            integrator
                .simulate(&launch, wind)
                .map(|t| (t.carry_yards, t.lateral_yards))
        })
        .collect::<Result<Vec<_>>>()?;

    let (carries, laterals): (Vec<f64>, Vec<f64>) = flights.into_iter().unzip();

    let results = DispersionResults {
        mean_carry: mean(&carries),
        std_carry: sample_std(&carries).unwrap_or(0.0),
        mean_lateral: mean(&laterals),
        std_lateral: sample_std(&laterals).unwrap_or(0.0),
        carries,
        laterals,
    };

    debug!(
        club = %base.club,
        shots = params.shots,
        seed = params.seed,
        mean_carry = results.mean_carry,
        std_carry = results.std_carry,
        std_lateral = results.std_lateral,
        "dispersion complete"
    );

    Ok(results)
}
