use serde::{Deserialize, Serialize};

use crate::shot::Shot;

/// Aggregate numbers for a practice session
///
/// Standard deviations are sample deviations and only present with at least
/// two values. Carry figures ignore shots that went nowhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub num_shots: usize,
    pub avg_club_speed: f64,
    pub std_club_speed: Option<f64>,
    pub avg_carry: f64,
    pub std_carry: Option<f64>,
    pub avg_face_angle: f64,
    pub std_face_angle: Option<f64>,
    pub avg_path: f64,
}

impl SessionStats {
    /// `None` for an empty session
    pub fn from_shots(shots: &[Shot]) -> Option<Self> {
        if shots.is_empty() {
            return None;
        }

        let speeds: Vec<f64> = shots.iter().map(|s| s.measurement.club_speed_mph).collect();
        let carries: Vec<f64> = shots
            .iter()
            .map(Shot::carry_yards)
            .filter(|&c| c > 0.0)
            .collect();
        let faces: Vec<f64> = shots.iter().map(|s| s.measurement.face_angle_deg).collect();
        let paths: Vec<f64> = shots.iter().map(|s| s.measurement.path_deg).collect();

        Some(Self {
            num_shots: shots.len(),
            avg_club_speed: mean(&speeds),
            std_club_speed: sample_std(&speeds),
            avg_carry: mean(&carries),
            std_carry: sample_std(&carries),
            avg_face_angle: mean(&faces),
            std_face_angle: sample_std(&faces),
            avg_path: mean(&paths),
        })
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::{Club, ClubTable};
    use crate::launch::ClubImpactMeasurement;
    use crate::shot::compute_shot;
    use crate::trajectory_solver::TrajectoryIntegrator;

    fn shot(speed: f64, face: f64, path: f64) -> Shot {
        let m = ClubImpactMeasurement::square(Club::Iron7, speed).with_face_and_path(face, path);
        compute_shot(&m, &ClubTable::standard(), &TrajectoryIntegrator::new(), None).unwrap()
    }

    #[test]
    fn test_empty_session() {
        assert!(SessionStats::from_shots(&[]).is_none());
    }

    #[test]
    fn test_single_shot_has_no_spread() {
        let stats = SessionStats::from_shots(&[shot(85.0, 1.0, -1.0)]).unwrap();
        assert_eq!(stats.num_shots, 1);
        assert_eq!(stats.avg_club_speed, 85.0);
        assert!(stats.std_club_speed.is_none());
        assert!(stats.std_carry.is_none());
        assert_eq!(stats.avg_path, -1.0);
    }

    #[test]
    fn test_session_stats() {
        let shots = vec![shot(80.0, 2.0, 0.0), shot(85.0, 0.0, 0.0), shot(90.0, -2.0, 0.0)];
        let stats = SessionStats::from_shots(&shots).unwrap();
        assert_eq!(stats.num_shots, 3);
        assert!((stats.avg_club_speed - 85.0).abs() < 1e-9);
        assert!((stats.std_club_speed.unwrap() - 5.0).abs() < 1e-9);
        assert!((stats.std_face_angle.unwrap() - 2.0).abs() < 1e-9);
        assert!(stats.avg_face_angle.abs() < 1e-12);
        assert!(stats.avg_carry > 140.0);
        assert!(stats.std_carry.unwrap() > 0.0);
    }

    #[test]
    fn test_zero_carry_shots_ignored_for_carry() {
        let shots = vec![shot(85.0, 0.0, 0.0), shot(0.0, 0.0, 0.0)];
        let stats = SessionStats::from_shots(&shots).unwrap();
        assert_eq!(stats.avg_carry, shots[0].carry_yards());
        assert!(stats.std_carry.is_none());
        assert_eq!(stats.avg_club_speed, 42.5);
    }

    #[test]
    fn test_helpers() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(sample_std(&[3.0]), None);
        assert_eq!(sample_std(&[1.0, 3.0]), Some(2.0_f64.sqrt()));
    }
}
