use thiserror::Error;

/// Errors surfaced by launch conversion, flight simulation and configuration.
///
/// Out-of-range measurements are never errors: they are clamped where they
/// enter the model so a live session keeps producing shots.
#[derive(Debug, Error)]
pub enum FlightError {
    #[error("no club parameters configured for {club}")]
    UnknownClub { club: String },

    #[error("invalid club parameters for {club}: {reason}")]
    InvalidClubParameters { club: String, reason: String },

    #[error("unrecognized club name {0:?}")]
    UnrecognizedClubName(String),

    #[error(
        "integration diverged: no landing after {elapsed_s:.2} s ({steps} steps, ceiling {limit_s:.2} s)"
    )]
    Divergence {
        elapsed_s: f64,
        limit_s: f64,
        steps: usize,
    },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl FlightError {
    /// True for errors caused by the club table or engine settings rather
    /// than by the physics of a particular shot.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Divergence { .. })
    }
}

pub type Result<T> = std::result::Result<T, FlightError>;
