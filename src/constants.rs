/// Physical constants used in ball flight calculations

/// Gravitational acceleration in m/s²
pub const G_ACCEL_MPS2: f64 = 9.80665;

/// Standard air density at sea level, 15°C (kg/m³)
pub const STANDARD_AIR_DENSITY: f64 = 1.225;

/// Dynamic viscosity of air at 15°C (Pa·s)
///
/// Used only to place the ball in a Reynolds regime; the drag crisis of a
/// dimpled ball is broad enough that temperature dependence is ignored.
pub const AIR_VISCOSITY: f64 = 1.81e-5;

/// Golf ball mass (kg), 1.62 oz USGA maximum
pub const BALL_MASS_KG: f64 = 0.04593;

/// Golf ball radius (m), 1.68 inch USGA minimum diameter
pub const BALL_RADIUS_M: f64 = 0.02135;

/// Golf ball cross-sectional area (m²)
pub const BALL_AREA_M2: f64 = std::f64::consts::PI * BALL_RADIUS_M * BALL_RADIUS_M;

/// Conversion factor: miles per hour to meters per second
pub const MPH_TO_MPS: f64 = 0.44704;

/// Conversion factor: meters per second to miles per hour
pub const MPS_TO_MPH: f64 = 1.0 / MPH_TO_MPS;

/// Conversion factor: yards to meters (exact)
pub const YARDS_TO_METERS: f64 = 0.9144;

/// Conversion factor: meters to yards
pub const METERS_TO_YARDS: f64 = 1.0 / YARDS_TO_METERS;

/// Conversion factor: revolutions per minute to radians per second
pub const RPM_TO_RAD_S: f64 = 2.0 * std::f64::consts::PI / 60.0;

// Launch model constants
//
// Empirical launch-monitor relationships. These are not derived from first
// principles; they were calibrated so square-face shots at typical club
// speeds land within the published carry averages.

/// Fraction of a face angle change that shows up as extra dynamic loft
pub const FACE_TO_LOFT_FACTOR: f64 = 0.7;

/// Launch ratio intercept: VLA / dynamic loft = intercept + slope / base loft
pub const LAUNCH_RATIO_INTERCEPT: f64 = 0.45;

/// Launch ratio slope (degrees)
pub const LAUNCH_RATIO_SLOPE_DEG: f64 = 7.0;

/// Upper bound for the launch ratio (low-lofted clubs launch above loft)
pub const LAUNCH_RATIO_MAX: f64 = 1.2;

/// Vertical launch angle bounds (degrees)
pub const VLA_MIN_DEG: f64 = 0.0;
pub const VLA_MAX_DEG: f64 = 60.0;

/// Club speed the per-club spin tendency is quoted at (mph)
///
/// Roughly an amateur 7-iron. Backspin scales linearly with ball speed
/// relative to `smash_factor * REFERENCE_CLUB_SPEED_MPH`.
pub const REFERENCE_CLUB_SPEED_MPH: f64 = 85.0;

/// Backspin floor (rpm). Keeps the spin axis computation finite.
pub const MIN_BACKSPIN_RPM: f64 = 250.0;

/// Backspin ceiling (rpm)
pub const MAX_BACKSPIN_RPM: f64 = 14000.0;

/// Converts face-to-path degrees into spin axis tilt
pub const SPIN_TILT_FACTOR: f64 = 0.7;

/// Sidespin generated per degree of (tilt-scaled) face-to-path (rpm)
pub const SIDESPIN_RPM_PER_DEGREE: f64 = 200.0;

/// Spin axis tilt bound (degrees)
pub const MAX_SPIN_AXIS_DEG: f64 = 45.0;

// Integration defaults

/// Default fixed RK4 step (s)
///
/// Halving or doubling it moves carry by well under a yard for every club
/// in the standard table.
pub const DEFAULT_TIME_STEP_S: f64 = 0.01;

/// Default safety ceiling on flight time (s). Real shots land inside 10 s.
pub const DEFAULT_MAX_FLIGHT_TIME_S: f64 = 30.0;

// Numerical stability constants

/// Minimum threshold for velocity magnitude to avoid division by zero
pub const MIN_VELOCITY_THRESHOLD: f64 = 1e-6;

/// Minimum threshold for preventing division by zero in general calculations
pub const MIN_DIVISION_THRESHOLD: f64 = 1e-12;
