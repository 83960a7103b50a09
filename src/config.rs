//! Engine configuration.
//!
//! Everything is optional in the JSON file; missing sections fall back to the
//! standard values. Configured clubs overlay the standard club table.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::atmosphere::AtmosphericConditions;
use crate::club::{ClubEntry, ClubTable};
use crate::error::Result;
use crate::spin_decay::SpinDecay;
use crate::trajectory_solver::{SimulationSettings, TrajectoryIntegrator};

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "BALLFLIGHT_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub simulation: SimulationSettings,
    pub spin_decay: SpinDecay,
    pub atmosphere: AtmosphericConditions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clubs: Option<Vec<ClubEntry>>,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every numeric section; club rows are checked by `club_table`
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.spin_decay.validate()?;
        self.atmosphere.validate()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        debug!(path = %path.display(), "loaded engine configuration");
        Ok(config)
    }

    /// Read the file named by `BALLFLIGHT_CONFIG`, or use defaults.
    ///
    /// A variable pointing at a missing file is not an error; a file that
    /// exists but does not parse is.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if Path::new(&path).exists() => Self::from_file(path),
            Some(path) => {
                warn!(
                    path = %Path::new(&path).display(),
                    "configuration file not found, using defaults"
                );
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Standard rows overlaid with the configured ones, all validated
    pub fn club_table(&self) -> Result<ClubTable> {
        let mut table = ClubTable::standard();
        for entry in self.clubs.iter().flatten() {
            table.insert(entry.club, entry.params)?;
        }
        Ok(table)
    }

    pub fn integrator(&self) -> Result<TrajectoryIntegrator> {
        self.validate()?;
        Ok(TrajectoryIntegrator::with_settings(self.simulation)?
            .with_spin_decay(self.spin_decay)
            .with_atmosphere(self.atmosphere))
    }
}
