//! Duration → energy → CO2 for modeled workloads

use crate::config::EstimatorConfig;
use crate::emission::EmissionModel;
use crate::energy::{EnergyBreakdown, EnergyModel};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Energy and emissions of one modeled workload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeledEstimate {
    pub duration_seconds: f64,
    pub energy: EnergyBreakdown,
    pub co2_kg: f64,
}

/// Chains the energy and emission models
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarbonEstimator {
    energy: EnergyModel,
    emission: EmissionModel,
}

impl CarbonEstimator {
    pub fn new(energy: EnergyModel, emission: EmissionModel) -> Self {
        Self { energy, emission }
    }

    /// Build both models from a configuration, validating it
    pub fn from_config(config: &EstimatorConfig) -> Result<Self> {
        Ok(Self {
            energy: EnergyModel::new(config.device)?,
            emission: EmissionModel::new(config.emission)?,
        })
    }

    pub fn energy_model(&self) -> &EnergyModel {
        &self.energy
    }

    pub fn emission_model(&self) -> &EmissionModel {
        &self.emission
    }

    /// Estimate a single workload
    pub fn estimate(&self, duration_seconds: f64) -> Result<ModeledEstimate> {
        let energy = self.energy.estimate(duration_seconds)?;
        let co2_kg = self.emission.co2_kg(energy.total_kwh)?;

        Ok(ModeledEstimate {
            duration_seconds,
            energy,
            co2_kg,
        })
    }

    /// Estimate every duration; the first invalid duration fails the batch
    pub fn estimate_batch(&self, durations: &[f64]) -> Result<Vec<ModeledEstimate>> {
        let estimates = durations
            .iter()
            .map(|&duration| self.estimate(duration))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = estimates.len(), "Estimated modeled workloads");
        Ok(estimates)
    }
}
