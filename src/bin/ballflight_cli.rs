use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ballflight_engine::{
    compute_shot, sample_by_distance, simulate_dispersion, BallLaunchConditions, Club,
    ClubImpactMeasurement, ClubTable, DispersionParams, DistanceSample, EngineConfig,
    PersistenceRecord, ReferenceValidator, Shot, ShotShape, TrajectoryResult, ValidationReport,
    WindVector, DEFAULT_TOLERANCE, EXTENDED_FIXTURES, EXTENDED_TOLERANCE, REFERENCE_FIXTURES,
};

#[derive(Parser)]
#[command(name = "ballflight")]
#[command(author = "Ballflight Engine Team")]
#[command(version = "0.1.0")]
#[command(about = "Golf launch conversion and ball flight calculator", long_about = None)]
struct Cli {
    /// Engine configuration file (JSON). Falls back to $BALLFLIGHT_CONFIG.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a club impact and fly the shot
    Shot {
        /// Club (e.g. Driver, 7-Iron, PW, 7i)
        #[arg(short, long)]
        club: Club,

        /// Club head speed (mph)
        #[arg(short, long)]
        speed: f64,

        /// Face angle (degrees, positive = open)
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        face: f64,

        /// Swing path (degrees, positive = in-to-out)
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        path: f64,

        /// Face contact offset from center
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        contact: f64,

        /// Backswing to downswing tempo ratio
        #[arg(long)]
        tempo: Option<f64>,

        #[command(flatten)]
        wind: WindArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Resample the flight every N yards downrange
        #[arg(long)]
        sample: Option<f64>,
    },

    /// Fly explicit ball launch conditions
    Launch {
        /// Ball speed (mph)
        #[arg(long)]
        ball_speed: f64,

        /// Vertical launch angle (degrees)
        #[arg(long)]
        vla: f64,

        /// Horizontal launch angle (degrees, positive = right)
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        hla: f64,

        /// Backspin (rpm)
        #[arg(long)]
        spin: f64,

        /// Spin axis tilt (degrees, positive = fade)
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        axis: f64,

        #[command(flatten)]
        wind: WindArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Resample the flight every N yards downrange
        #[arg(long)]
        sample: Option<f64>,
    },

    /// Check carries against reference distances
    Validate {
        /// Use the tour-average fixtures
        #[arg(long)]
        extended: bool,

        /// Relative tolerance (default 0.15, or 0.20 with --extended)
        #[arg(long)]
        tolerance: Option<f64>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// List the club table
    Clubs {
        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Monte Carlo shot dispersion
    Dispersion {
        #[arg(short, long)]
        club: Club,

        /// Mean club head speed (mph)
        #[arg(short, long)]
        speed: f64,

        /// Mean face angle (degrees)
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        face: f64,

        /// Mean swing path (degrees)
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        path: f64,

        /// Number of shots
        #[arg(short = 'n', long, default_value = "100")]
        num_shots: usize,

        /// Club speed standard deviation (mph)
        #[arg(long, default_value = "2.0")]
        speed_std: f64,

        /// Face angle standard deviation (degrees)
        #[arg(long, default_value = "1.5")]
        face_std: f64,

        /// Path standard deviation (degrees)
        #[arg(long, default_value = "2.0")]
        path_std: f64,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        #[command(flatten)]
        wind: WindArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },
}

#[derive(clap::Args)]
struct WindArgs {
    /// Wind speed (mph)
    #[arg(long, default_value = "0.0")]
    wind_speed: f64,

    /// Direction the wind comes from (degrees, 0 = headwind, 90 = from the right)
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    wind_dir: f64,
}

impl WindArgs {
    fn wind(&self) -> Option<WindVector> {
        let wind = WindVector::new(self.wind_speed, self.wind_dir);
        if wind.is_calm() {
            None
        } else {
            Some(wind)
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Debug, Serialize)]
struct FlightOutput<'a> {
    launch: &'a BallLaunchConditions,
    carry_yards: f64,
    total_yards: f64,
    apex_yards: f64,
    lateral_yards: f64,
    flight_time_s: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    shape: Option<ShotShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    samples: Option<&'a [DistanceSample]>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON/CSV on stdout stays clean
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::load()?,
    };
    let table = config.club_table()?;
    let integrator = config.integrator()?;

    match cli.command {
        Commands::Shot { club, speed, face, path, contact, tempo, wind, output, sample } => {
            let measurement = ClubImpactMeasurement {
                club,
                club_speed_mph: speed,
                face_angle_deg: face,
                path_deg: path,
                contact_point: contact,
                tempo,
            };
            let shot = compute_shot(&measurement, &table, &integrator, wind.wind().as_ref())?;
            let samples = sample
                .map(|step| sample_by_distance(&shot.trajectory, step))
                .transpose()?;
            display_shot(&shot, samples.as_deref(), output)?;
        }

        Commands::Launch { ball_speed, vla, hla, spin, axis, wind, output, sample } => {
            let launch = BallLaunchConditions::new(ball_speed, vla, hla, spin, axis);
            let trajectory = integrator.simulate(&launch, wind.wind().as_ref())?;
            let samples = sample.map(|step| sample_by_distance(&trajectory, step)).transpose()?;
            display_flight(&launch, &trajectory, None, samples.as_deref(), output)?;
        }

        Commands::Validate { extended, tolerance, output } => {
            let (fixtures, default_tolerance) = if extended {
                (&EXTENDED_FIXTURES[..], EXTENDED_TOLERANCE)
            } else {
                (&REFERENCE_FIXTURES[..], DEFAULT_TOLERANCE)
            };
            let tolerance = tolerance.unwrap_or(default_tolerance);

            let validator = ReferenceValidator::new(&table, &integrator);
            let reports = validator.validate_all(fixtures, tolerance)?;
            display_validation(&reports, output)?;

            if reports.iter().any(|r| !r.passed) {
                return Err("one or more reference carries out of tolerance".into());
            }
        }

        Commands::Clubs { output } => {
            display_clubs(&table, output)?;
        }

        Commands::Dispersion {
            club,
            speed,
            face,
            path,
            num_shots,
            speed_std,
            face_std,
            path_std,
            seed,
            wind,
            output,
        } => {
            let base = ClubImpactMeasurement::square(club, speed).with_face_and_path(face, path);
            let params = DispersionParams {
                shots: num_shots,
                club_speed_std_mph: speed_std,
                face_std_deg: face_std,
                path_std_deg: path_std,
                seed,
            };
            let results =
                simulate_dispersion(&base, &params, &table, &integrator, wind.wind().as_ref())?;

            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
                OutputFormat::Csv => {
                    println!("shot,carry_yards,lateral_yards");
                    let rows = results.carries.iter().zip(&results.laterals);
                    for (i, (carry, lateral)) in rows.enumerate() {
                        println!("{},{:.2},{:.2}", i + 1, carry, lateral);
                    }
                }
                OutputFormat::Table => {
                    println!("╔════════════════════════════════════════╗");
                    println!("║         SHOT DISPERSION                ║");
                    println!(
                        "║ {:<8} {:>5} shots, seed {:<12} ║",
                        club.to_string(),
                        params.shots,
                        seed
                    );
                    println!("╠════════════════════════════════════════╣");
                    println!("║ Mean Carry:        {:>8.1} yd         ║", results.mean_carry);
                    println!("║ Carry Std Dev:     {:>8.1} yd         ║", results.std_carry);
                    println!("║ Mean Lateral:      {:>8.1} yd         ║", results.mean_lateral);
                    println!("║ Lateral Std Dev:   {:>8.1} yd         ║", results.std_lateral);
                    println!("╚════════════════════════════════════════╝");
                }
            }
        }
    }

    Ok(())
}

fn display_shot(
    shot: &Shot,
    samples: Option<&[DistanceSample]>,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&shot.render_payload())?);
        }
        OutputFormat::Csv if samples.is_none() => {
            println!("{}", PersistenceRecord::CSV_HEADER);
            println!("{}", shot.persistence_record().to_csv_row());
        }
        _ => {
            if let OutputFormat::Table = format {
                println!(
                    "Club: {}  Club speed: {:.1} mph  Face: {:+.1}°  Path: {:+.1}°",
                    shot.club,
                    shot.measurement.club_speed_mph,
                    shot.measurement.face_angle_deg,
                    shot.measurement.path_deg
                );
            }
            display_flight(&shot.launch, &shot.trajectory, Some(shot.shape), samples, format)?;
        }
    }
    Ok(())
}

fn display_flight(
    launch: &BallLaunchConditions,
    trajectory: &TrajectoryResult,
    shape: Option<ShotShape>,
    samples: Option<&[DistanceSample]>,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            let out = FlightOutput {
                launch,
                carry_yards: trajectory.carry_yards,
                total_yards: trajectory.total_yards,
                apex_yards: trajectory.apex_yards,
                lateral_yards: trajectory.lateral_yards,
                flight_time_s: trajectory.flight_time_s,
                shape,
                samples,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }

        OutputFormat::Csv => match samples {
            Some(samples) => {
                println!("downrange_yd,lateral_yd,height_yd,time_s");
                for s in samples {
                    println!("{:.1},{:.2},{:.2},{:.3}", s.downrange, s.lateral, s.height, s.time);
                }
            }
            None => {
                println!("time_s,downrange_yd,lateral_yd,height_yd");
                for s in &trajectory.samples {
                    println!("{:.2},{:.2},{:.2},{:.2}", s.time_s, s.downrange, s.lateral, s.height);
                }
            }
        },

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║         BALL FLIGHT RESULTS            ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Ball Speed:        {:>8.1} mph        ║", launch.ball_speed_mph);
            println!("║ Launch Angle:      {:>8.1} °          ║", launch.vla_deg);
            println!("║ Start Direction:   {:>8.1} °          ║", launch.hla_deg);
            println!("║ Backspin:          {:>8.0} rpm        ║", launch.backspin_rpm);
            println!("║ Spin Axis:         {:>8.1} °          ║", launch.spin_axis_deg);
            println!("╠════════════════════════════════════════╣");
            println!("║ Carry:             {:>8.1} yd         ║", trajectory.carry_yards);
            println!("║ Total:             {:>8.1} yd         ║", trajectory.total_yards);
            println!("║ Apex:              {:>8.1} yd         ║", trajectory.apex_yards);
            println!("║ Lateral:           {:>8.1} yd         ║", trajectory.lateral_yards);
            println!("║ Flight Time:       {:>8.2} s          ║", trajectory.flight_time_s);
            if let Some(shape) = shape {
                println!("║ Shape:             {:>8}            ║", shape.to_string());
            }
            println!("╚════════════════════════════════════════╝");

            if let Some(samples) = samples {
                println!("\nFlight by distance:");
                println!("┌──────────┬──────────┬──────────┬──────────┐");
                println!("│ Dist(yd) │ Lat (yd) │ Hgt (yd) │ Time (s) │");
                println!("├──────────┼──────────┼──────────┼──────────┤");
                for s in samples {
                    println!(
                        "│ {:>8.1} │ {:>8.2} │ {:>8.2} │ {:>8.3} │",
                        s.downrange, s.lateral, s.height, s.time
                    );
                }
                println!("└──────────┴──────────┴──────────┴──────────┘");
            }
        }
    }

    Ok(())
}

fn display_validation(
    reports: &[ValidationReport],
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(reports)?),
        OutputFormat::Csv => {
            println!(
                "club,club_speed_mph,expected_carry,observed_carry,delta_yards,delta_pct,passed"
            );
            for r in reports {
                println!(
                    "{},{:.1},{:.1},{:.1},{:.1},{:.1},{}",
                    r.club,
                    r.club_speed_mph,
                    r.expected_carry,
                    r.observed_carry,
                    r.delta_yards,
                    r.delta_fraction * 100.0,
                    r.passed
                );
            }
        }
        OutputFormat::Table => {
            println!("┌──────────┬───────┬──────────┬──────────┬─────────┬──────┐");
            println!("│ Club     │  mph  │ Expected │ Observed │  Delta  │      │");
            println!("├──────────┼───────┼──────────┼──────────┼─────────┼──────┤");
            for r in reports {
                println!(
                    "│ {:<8} │ {:>5.1} │ {:>8.1} │ {:>8.1} │ {:>+6.1}% │ {} │",
                    r.club.to_string(),
                    r.club_speed_mph,
                    r.expected_carry,
                    r.observed_carry,
                    r.delta_fraction * 100.0,
                    if r.passed { "PASS" } else { "FAIL" }
                );
            }
            println!("└──────────┴───────┴──────────┴──────────┴─────────┴──────┘");
            if let Some(r) = reports.first() {
                println!("Tolerance: ±{:.0}%", r.tolerance * 100.0);
            }
        }
    }
    Ok(())
}

fn display_clubs(table: &ClubTable, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&table.entries())?),
        OutputFormat::Csv => {
            println!("club,loft_deg,smash_factor,face_weight,base_rpm,rpm_per_degree");
            for (club, p) in table.iter() {
                println!(
                    "{},{:.1},{:.2},{:.2},{:.0},{:.0}",
                    club,
                    p.base_loft_deg,
                    p.smash_factor,
                    p.face_weight,
                    p.spin.base_rpm,
                    p.spin.rpm_per_degree
                );
            }
        }
        OutputFormat::Table => {
            println!("┌──────────┬──────────┬───────┬──────────┬──────────┐");
            println!("│ Club     │ Loft (°) │ Smash │ Face wt  │ Spin rpm │");
            println!("├──────────┼──────────┼───────┼──────────┼──────────┤");
            for (club, p) in table.iter() {
                println!(
                    "│ {:<8} │ {:>8.1} │ {:>5.2} │ {:>8.2} │ {:>8.0} │",
                    club.to_string(),
                    p.base_loft_deg,
                    p.smash_factor,
                    p.face_weight,
                    p.spin.base_rpm
                );
            }
            println!("└──────────┴──────────┴───────┴──────────┴──────────┘");
        }
    }
    Ok(())
}
