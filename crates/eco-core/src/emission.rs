//! Energy to CO2 conversion

use crate::config::EmissionConfig;
use crate::error::ensure_non_negative;
use crate::Result;

/// Converts energy into CO2 mass under a fixed grid intensity and PUE
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionModel {
    config: EmissionConfig,
}

impl EmissionModel {
    /// Create a model; both multipliers must be strictly positive
    pub fn new(config: EmissionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EmissionConfig {
        &self.config
    }

    /// CO2 in kilograms for `energy_kwh`
    pub fn co2_kg(&self, energy_kwh: f64) -> Result<f64> {
        let energy_kwh = ensure_non_negative("energy_kwh", energy_kwh)?;
        Ok(energy_kwh * self.config.carbon_intensity_kg_per_kwh * self.config.pue)
    }

    /// CO2 in grams for `energy_kwh`
    pub fn co2_grams(&self, energy_kwh: f64) -> Result<f64> {
        Ok(self.co2_kg(energy_kwh)? * 1000.0)
    }
}
