//! Air density for the force terms of the flight model.

use serde::{Deserialize, Serialize};

use crate::error::{FlightError, Result};

/// Specific gas constant for dry air (J/(kg·K))
const R_SPECIFIC: f64 = 287.058;

/// Density scale height used for the altitude correction (m)
const SCALE_HEIGHT_M: f64 = 8000.0;

/// Accepted ranges for configured conditions
const TEMPERATURE_RANGE_C: (f64, f64) = (-60.0, 60.0);
const PRESSURE_RANGE_HPA: (f64, f64) = (300.0, 1100.0);
const ALTITUDE_RANGE_M: (f64, f64) = (-500.0, 6000.0);

/// Atmospheric conditions at the range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphericConditions {
    pub temperature_c: f64,
    pub pressure_hpa: f64,
    pub altitude_m: f64,
}

impl Default for AtmosphericConditions {
    fn default() -> Self {
        Self {
            temperature_c: 15.0,
            pressure_hpa: 1013.25,
            altitude_m: 0.0,
        }
    }
}

impl AtmosphericConditions {
    /// Reject conditions no golf course sees
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("temperature_c", self.temperature_c, TEMPERATURE_RANGE_C),
            ("pressure_hpa", self.pressure_hpa, PRESSURE_RANGE_HPA),
            ("altitude_m", self.altitude_m, ALTITUDE_RANGE_M),
        ];
        for (name, value, (min, max)) in fields {
            if !(min..=max).contains(&value) {
                return Err(FlightError::InvalidSettings(format!(
                    "{name} must lie in [{min}, {max}], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Air density (kg/m³): ideal gas at station pressure, thinned with
    /// altitude. Absurd inputs are clamped so the result stays positive.
    pub fn air_density(&self) -> f64 {
        let temperature_k = (self.temperature_c + 273.15).max(1.0);
        let pressure_pa = self.pressure_hpa.max(1.0) * 100.0;

        let density = pressure_pa / (R_SPECIFIC * temperature_k);
        let altitude_factor = (-self.altitude_m / SCALE_HEIGHT_M).exp();

        density * altitude_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_day() {
        let rho = AtmosphericConditions::default().air_density();
        assert!((rho - 1.225).abs() < 0.001);
    }

    #[test]
    fn test_altitude_thins_air() {
        let denver = AtmosphericConditions { altitude_m: 1609.0, ..Default::default() };
        let sea = AtmosphericConditions::default();
        assert!(denver.air_density() < sea.air_density() * 0.85);
    }

    #[test]
    fn test_hot_air_is_thinner() {
        let hot = AtmosphericConditions { temperature_c: 35.0, ..Default::default() };
        assert!(hot.air_density() < AtmosphericConditions::default().air_density());
    }

    #[test]
    fn test_validate_ranges() {
        assert!(AtmosphericConditions::default().validate().is_ok());
        let mountain =
            AtmosphericConditions { altitude_m: 2400.0, temperature_c: -5.0, pressure_hpa: 760.0 };
        assert!(mountain.validate().is_ok());

        let bad = [
            AtmosphericConditions { altitude_m: -1e6, ..Default::default() },
            AtmosphericConditions { altitude_m: f64::NAN, ..Default::default() },
            AtmosphericConditions { temperature_c: 400.0, ..Default::default() },
            AtmosphericConditions { pressure_hpa: f64::INFINITY, ..Default::default() },
            AtmosphericConditions { pressure_hpa: 0.0, ..Default::default() },
        ];
        for atmosphere in bad {
            assert!(
                matches!(atmosphere.validate(), Err(FlightError::InvalidSettings(_))),
                "{atmosphere:?}"
            );
        }
    }

    #[test]
    fn test_absurd_inputs_stay_positive() {
        let weird =
            AtmosphericConditions { temperature_c: -400.0, pressure_hpa: -5.0, altitude_m: 0.0 };
        assert!(weird.air_density() > 0.0);
        assert!(weird.air_density().is_finite());
    }
}
