//! Modeled energy draw by device class

use crate::config::DeviceUtilizationProfile;
use crate::error::ensure_non_negative;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Seconds per hour, converting watt-seconds into the reported energy unit
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Energy of one workload split by device class
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyBreakdown {
    pub gpu_kwh: f64,
    pub cpu_kwh: f64,
    pub ram_kwh: f64,
    pub total_kwh: f64,
}

/// Linear energy model over a fixed device utilization profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyModel {
    profile: DeviceUtilizationProfile,
}

impl EnergyModel {
    /// Create a model, rejecting profiles with negative or non-finite fields
    pub fn new(profile: DeviceUtilizationProfile) -> Result<Self> {
        profile.validate()?;
        Ok(Self { profile })
    }

    pub fn profile(&self) -> &DeviceUtilizationProfile {
        &self.profile
    }

    /// Estimate the energy drawn over `duration_seconds`
    pub fn estimate(&self, duration_seconds: f64) -> Result<EnergyBreakdown> {
        let duration_seconds = ensure_non_negative("duration_seconds", duration_seconds)?;
        let p = &self.profile;

        let gpu_kwh = p.gpu_watts * p.gpu_utilization * duration_seconds / SECONDS_PER_HOUR;
        let cpu_kwh = p.cpu_tdp_watts * p.cpu_utilization * duration_seconds / SECONDS_PER_HOUR;
        let ram_kwh = p.ram_watts_per_gb * p.ram_gb * duration_seconds / SECONDS_PER_HOUR;

        // Components are non-negative, so an overflow in any of them shows up in the total
        let total_kwh = ensure_non_negative("total_kwh", gpu_kwh + cpu_kwh + ram_kwh)?;

        Ok(EnergyBreakdown {
            gpu_kwh,
            cpu_kwh,
            ram_kwh,
            total_kwh,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const TOLERANCE: f64 = 1e-9;

    fn default_model() -> EnergyModel {
        EnergyModel::new(DeviceUtilizationProfile::default()).unwrap()
    }

    #[test]
    fn test_one_hour_with_default_profile() {
        let energy = default_model().estimate(3600.0).unwrap();

        assert!((energy.gpu_kwh - 187.5).abs() < TOLERANCE);
        assert!((energy.cpu_kwh - 29.25).abs() < TOLERANCE);
        assert!((energy.ram_kwh - 6.0).abs() < TOLERANCE);
        assert!((energy.total_kwh - 222.75).abs() < TOLERANCE);
    }

    #[test]
    fn test_zero_duration() {
        let energy = default_model().estimate(0.0).unwrap();
        assert_eq!(energy, EnergyBreakdown::default());
    }

    #[test]
    fn test_total_is_sum_of_components() {
        let model = default_model();
        for duration in [0.5, 1.0, 2.37, 7.99, 60.0, 86_400.0] {
            let e = model.estimate(duration).unwrap();
            assert!((e.total_kwh - (e.gpu_kwh + e.cpu_kwh + e.ram_kwh)).abs() < TOLERANCE);
            assert!(e.gpu_kwh >= 0.0 && e.cpu_kwh >= 0.0 && e.ram_kwh >= 0.0);
        }
    }

    #[test]
    fn test_negative_duration_rejected() {
        let result = default_model().estimate(-1.0);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
        assert!(default_model().estimate(f64::NAN).is_err());
    }

    #[test]
    fn test_overflowing_energy_rejected() {
        let result = default_model().estimate(1e307);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));

        let profile = DeviceUtilizationProfile { gpu_watts: 1e308, ..Default::default() };
        let model = EnergyModel::new(profile).unwrap();
        assert!(matches!(model.estimate(3600.0), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_negative_profile_field_rejected() {
        let fields: [fn(&mut DeviceUtilizationProfile); 6] = [
            |p| p.gpu_watts = -1.0,
            |p| p.gpu_utilization = -0.5,
            |p| p.cpu_tdp_watts = -65.0,
            |p| p.cpu_utilization = -0.01,
            |p| p.ram_gb = -16.0,
            |p| p.ram_watts_per_gb = -0.375,
        ];

        for set_negative in fields {
            let mut profile = DeviceUtilizationProfile::default();
            set_negative(&mut profile);
            assert!(matches!(EnergyModel::new(profile), Err(Error::InvalidParameter(_))));
        }
    }

    #[test]
    fn test_idle_gpu_contributes_nothing() {
        let profile = DeviceUtilizationProfile { gpu_utilization: 0.0, ..Default::default() };
        let energy = EnergyModel::new(profile).unwrap().estimate(3600.0).unwrap();
        assert_eq!(energy.gpu_kwh, 0.0);
        assert!((energy.total_kwh - 35.25).abs() < TOLERANCE);
    }
}
