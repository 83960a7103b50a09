/// Basic Shot Example
///
/// Converts a 7-iron swing into launch conditions, flies it, and prints the
/// summary plus the flight every 20 yards.

use ballflight_engine::{
    compute_shot, sample_by_distance, Club, ClubImpactMeasurement, ClubTable, FlightError,
    SessionStats, TrajectoryIntegrator, WindVector,
};

fn main() -> Result<(), FlightError> {
    println!("=== Basic Shot Example ===\n");

    let table = ClubTable::standard();
    let integrator = TrajectoryIntegrator::new();

    // Slightly open face, out-to-in path: a fade
    let swing = ClubImpactMeasurement::square(Club::Iron7, 85.0).with_face_and_path(1.5, -2.0);

    println!("Swing:");
    println!("  Club: {}", swing.club);
    println!("  Club speed: {} mph", swing.club_speed_mph);
    println!("  Face: {:+}°  Path: {:+}°", swing.face_angle_deg, swing.path_deg);
    println!();

    let shot = compute_shot(&swing, &table, &integrator, None)?;

    println!("Launch:");
    println!("  Ball speed: {:.1} mph", shot.launch.ball_speed_mph);
    println!("  VLA: {:.1}°  HLA: {:+.1}°", shot.launch.vla_deg, shot.launch.hla_deg);
    println!(
        "  Backspin: {:.0} rpm  Spin axis: {:+.1}°",
        shot.launch.backspin_rpm, shot.launch.spin_axis_deg
    );
    println!();

    println!("Flight ({}):", shot.shape);
    println!("  Carry: {:.1} yd", shot.trajectory.carry_yards);
    println!("  Apex: {:.1} yd", shot.trajectory.apex_yards);
    println!("  Lateral: {:+.1} yd", shot.trajectory.lateral_yards);
    println!("  Flight time: {:.2} s", shot.trajectory.flight_time_s);
    println!();

    println!("  Dist (yd) | Lat (yd) | Height (yd)");
    println!("  ----------|----------|------------");
    for s in sample_by_distance(&shot.trajectory, 20.0)? {
        println!("  {:9.1} | {:8.2} | {:10.2}", s.downrange, s.lateral, s.height);
    }
    println!();

    // Same swing into a 10 mph breeze from the left
    let breeze = WindVector::new(10.0, 300.0);
    let windy = compute_shot(&swing, &table, &integrator, Some(&breeze))?;
    println!(
        "With 10 mph wind from 300°: carry {:.1} yd, lateral {:+.1} yd",
        windy.trajectory.carry_yards, windy.trajectory.lateral_yards
    );

    if let Some(stats) = SessionStats::from_shots(&[shot, windy]) {
        println!(
            "Session average carry: {:.1} yd over {} shots",
            stats.avg_carry, stats.num_shots
        );
    }

    Ok(())
}
