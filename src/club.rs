//! Club identifiers and the per-club parameter table.
//!
//! The table is built once (standard values, optionally overlaid from
//! configuration) and handed to the launch converter by reference. Nothing
//! in the engine reaches for a global table.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FlightError, Result};

/// Golf club
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Club {
    #[serde(rename = "Driver")]
    Driver,
    #[serde(rename = "3-Wood")]
    Wood3,
    #[serde(rename = "5-Wood")]
    Wood5,
    #[serde(rename = "7-Wood")]
    Wood7,
    #[serde(rename = "2-Hybrid")]
    Hybrid2,
    #[serde(rename = "3-Hybrid")]
    Hybrid3,
    #[serde(rename = "4-Hybrid")]
    Hybrid4,
    #[serde(rename = "5-Hybrid")]
    Hybrid5,
    #[serde(rename = "2-Iron")]
    Iron2,
    #[serde(rename = "3-Iron")]
    Iron3,
    #[serde(rename = "4-Iron")]
    Iron4,
    #[serde(rename = "5-Iron")]
    Iron5,
    #[serde(rename = "6-Iron")]
    Iron6,
    #[serde(rename = "7-Iron")]
    Iron7,
    #[serde(rename = "8-Iron")]
    Iron8,
    #[serde(rename = "9-Iron")]
    Iron9,
    #[serde(rename = "PW")]
    PitchingWedge,
    #[serde(rename = "GW")]
    GapWedge,
    #[serde(rename = "SW")]
    SandWedge,
    #[serde(rename = "LW")]
    LobWedge,
    #[serde(rename = "Putter")]
    Putter,
}

/// Broad club family. Decides the D-plane face weight of the standard table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClubFamily {
    Driver,
    Wood,
    Hybrid,
    Iron,
    Wedge,
    Putter,
}

impl Club {
    pub const ALL: [Club; 21] = [
        Club::Driver,
        Club::Wood3,
        Club::Wood5,
        Club::Wood7,
        Club::Hybrid2,
        Club::Hybrid3,
        Club::Hybrid4,
        Club::Hybrid5,
        Club::Iron2,
        Club::Iron3,
        Club::Iron4,
        Club::Iron5,
        Club::Iron6,
        Club::Iron7,
        Club::Iron8,
        Club::Iron9,
        Club::PitchingWedge,
        Club::GapWedge,
        Club::SandWedge,
        Club::LobWedge,
        Club::Putter,
    ];

    /// Display name, also the serialized form
    pub fn name(&self) -> &'static str {
        match self {
            Club::Driver => "Driver",
            Club::Wood3 => "3-Wood",
            Club::Wood5 => "5-Wood",
            Club::Wood7 => "7-Wood",
            Club::Hybrid2 => "2-Hybrid",
            Club::Hybrid3 => "3-Hybrid",
            Club::Hybrid4 => "4-Hybrid",
            Club::Hybrid5 => "5-Hybrid",
            Club::Iron2 => "2-Iron",
            Club::Iron3 => "3-Iron",
            Club::Iron4 => "4-Iron",
            Club::Iron5 => "5-Iron",
            Club::Iron6 => "6-Iron",
            Club::Iron7 => "7-Iron",
            Club::Iron8 => "8-Iron",
            Club::Iron9 => "9-Iron",
            Club::PitchingWedge => "PW",
            Club::GapWedge => "GW",
            Club::SandWedge => "SW",
            Club::LobWedge => "LW",
            Club::Putter => "Putter",
        }
    }

    pub fn family(&self) -> ClubFamily {
        match self {
            Club::Driver => ClubFamily::Driver,
            Club::Wood3 | Club::Wood5 | Club::Wood7 => ClubFamily::Wood,
            Club::Hybrid2 | Club::Hybrid3 | Club::Hybrid4 | Club::Hybrid5 => ClubFamily::Hybrid,
            Club::PitchingWedge | Club::GapWedge | Club::SandWedge | Club::LobWedge => {
                ClubFamily::Wedge
            }
            Club::Putter => ClubFamily::Putter,
            _ => ClubFamily::Iron,
        }
    }
}

impl fmt::Display for Club {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Club {
    type Err = FlightError;

    /// Accepts display names case-insensitively ("7-iron", "pw") and the
    /// short forms launch monitors print ("7i", "3w", "4h", "dr").
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase().replace([' ', '_'], "-");

        if let Some(club) = Club::ALL.iter().find(|c| c.name().to_lowercase() == key) {
            return Ok(*club);
        }

        let club = match key.as_str() {
            "dr" | "1w" => Club::Driver,
            "3w" => Club::Wood3,
            "5w" => Club::Wood5,
            "7w" => Club::Wood7,
            "2h" => Club::Hybrid2,
            "3h" => Club::Hybrid3,
            "4h" => Club::Hybrid4,
            "5h" => Club::Hybrid5,
            "2i" => Club::Iron2,
            "3i" => Club::Iron3,
            "4i" => Club::Iron4,
            "5i" => Club::Iron5,
            "6i" => Club::Iron6,
            "7i" => Club::Iron7,
            "8i" => Club::Iron8,
            "9i" => Club::Iron9,
            "pitching-wedge" => Club::PitchingWedge,
            "gap-wedge" => Club::GapWedge,
            "sand-wedge" => Club::SandWedge,
            "lob-wedge" => Club::LobWedge,
            "pt" => Club::Putter,
            _ => return Err(FlightError::UnrecognizedClubName(s.to_string())),
        };
        Ok(club)
    }
}

/// Backspin tendency of a club: spin at the reference speed plus the
/// change per degree of dynamic loft added or removed at impact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinTendency {
    pub base_rpm: f64,
    #[serde(default = "default_rpm_per_degree")]
    pub rpm_per_degree: f64,
}

fn default_rpm_per_degree() -> f64 {
    200.0
}

/// One row of the club table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClubParameters {
    /// Static loft (degrees)
    pub base_loft_deg: f64,
    /// Ball speed / club speed
    pub smash_factor: f64,
    /// Share of the face angle in the starting direction; the swing path
    /// gets the rest
    #[serde(default = "default_face_weight")]
    pub face_weight: f64,
    pub spin: SpinTendency,
}

fn default_face_weight() -> f64 {
    0.75
}

impl ClubParameters {
    pub fn new(base_loft_deg: f64, smash_factor: f64, face_weight: f64, base_rpm: f64) -> Self {
        Self {
            base_loft_deg,
            smash_factor,
            face_weight,
            spin: SpinTendency { base_rpm, rpm_per_degree: default_rpm_per_degree() },
        }
    }

    /// Reject rows the converter cannot use
    pub fn validate(&self, club: Club) -> Result<()> {
        let invalid = |reason: &str| FlightError::InvalidClubParameters {
            club: club.to_string(),
            reason: reason.to_string(),
        };

        let values = [
            self.base_loft_deg,
            self.smash_factor,
            self.face_weight,
            self.spin.base_rpm,
            self.spin.rpm_per_degree,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(invalid("non-finite value"));
        }
        if self.base_loft_deg <= 0.0 {
            return Err(invalid("base loft must be positive"));
        }
        if self.smash_factor <= 0.0 {
            return Err(invalid("smash factor must be positive"));
        }
        if !(0.0..=1.0).contains(&self.face_weight) {
            return Err(invalid("face weight must lie in [0, 1]"));
        }
        if self.spin.base_rpm < 0.0 {
            return Err(invalid("base spin must not be negative"));
        }
        Ok(())
    }
}

/// A configured club with its parameters, the serialized table row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClubEntry {
    pub club: Club,
    #[serde(flatten)]
    pub params: ClubParameters,
}

/// Read-only table of club parameters keyed by club. Built only through
/// `insert`, so every row has been validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClubTable {
    rows: BTreeMap<Club, ClubParameters>,
}

impl ClubTable {
    /// An empty table; every lookup fails until rows are inserted
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard lofts, smash factors and typical backspin for all 21 clubs
    pub fn standard() -> Self {
        // (club, loft, smash, face weight, spin at reference speed)
        const ROWS: [(Club, f64, f64, f64, f64); 21] = [
            (Club::Driver, 10.5, 1.48, 0.85, 2700.0),
            (Club::Wood3, 15.0, 1.44, 0.75, 3500.0),
            (Club::Wood5, 18.0, 1.42, 0.75, 4300.0),
            (Club::Wood7, 21.0, 1.40, 0.75, 4800.0),
            (Club::Hybrid2, 17.0, 1.40, 0.75, 3800.0),
            (Club::Hybrid3, 19.0, 1.39, 0.75, 4200.0),
            (Club::Hybrid4, 22.0, 1.38, 0.75, 4600.0),
            (Club::Hybrid5, 25.0, 1.37, 0.75, 5000.0),
            (Club::Iron2, 17.0, 1.38, 0.75, 3800.0),
            (Club::Iron3, 20.0, 1.37, 0.75, 4200.0),
            (Club::Iron4, 23.0, 1.36, 0.75, 4700.0),
            (Club::Iron5, 26.0, 1.35, 0.75, 5500.0),
            (Club::Iron6, 30.0, 1.34, 0.75, 6200.0),
            (Club::Iron7, 34.0, 1.33, 0.75, 7000.0),
            (Club::Iron8, 38.0, 1.32, 0.75, 7800.0),
            (Club::Iron9, 42.0, 1.30, 0.75, 8600.0),
            (Club::PitchingWedge, 46.0, 1.28, 0.75, 9300.0),
            (Club::GapWedge, 50.0, 1.25, 0.75, 10000.0),
            (Club::SandWedge, 54.0, 1.22, 0.75, 10500.0),
            (Club::LobWedge, 58.0, 1.18, 0.75, 11000.0),
            (Club::Putter, 3.0, 1.00, 0.90, 300.0),
        ];

        let rows = ROWS
            .iter()
            .map(|&(club, loft, smash, face_weight, rpm)| {
                (club, ClubParameters::new(loft, smash, face_weight, rpm))
            })
            .collect();
        Self { rows }
    }

    /// Build a table from configured rows only
    pub fn from_entries(entries: &[ClubEntry]) -> Result<Self> {
        let mut table = Self::empty();
        for entry in entries {
            table.insert(entry.club, entry.params)?;
        }
        Ok(table)
    }

    /// Add or replace a row after validating it
    pub fn insert(&mut self, club: Club, params: ClubParameters) -> Result<()> {
        params.validate(club)?;
        self.rows.insert(club, params);
        Ok(())
    }

    /// Parameters for `club`. A missing row is a configuration error.
    pub fn get(&self, club: Club) -> Result<&ClubParameters> {
        self.rows
            .get(&club)
            .ok_or_else(|| FlightError::UnknownClub { club: club.to_string() })
    }

    pub fn contains(&self, club: Club) -> bool {
        self.rows.contains_key(&club)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in bag order (driver first, putter last)
    pub fn iter(&self) -> impl Iterator<Item = (Club, &ClubParameters)> {
        self.rows.iter().map(|(club, params)| (*club, params))
    }

    pub fn entries(&self) -> Vec<ClubEntry> {
        self.iter().map(|(club, params)| ClubEntry { club, params: *params }).collect()
    }
}
