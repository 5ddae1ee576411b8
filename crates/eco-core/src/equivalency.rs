//! Everyday equivalents for a CO2 mass

use crate::error::ensure_non_negative;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Grams of CO2 per km driven in a Tesla
pub const GRAMS_PER_TESLA_KM: f64 = 50.0;
/// Grams of CO2 per minute of an LED bulb
pub const GRAMS_PER_LED_MINUTE: f64 = 0.5;
/// Grams of CO2 per smartphone charge
pub const GRAMS_PER_PHONE_CHARGE: f64 = 12.0;
/// Grams of CO2 per web search
pub const GRAMS_PER_WEB_SEARCH: f64 = 0.2;

/// A CO2 mass expressed as everyday activities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarbonEquivalency {
    pub co2_grams: f64,
    pub tesla_km: f64,
    pub led_minutes: f64,
    pub phone_charges: f64,
    pub web_searches: f64,
}

impl CarbonEquivalency {
    pub fn from_grams(co2_grams: f64) -> Result<Self> {
        let co2_grams = ensure_non_negative("co2_grams", co2_grams)?;

        Ok(Self {
            co2_grams,
            tesla_km: co2_grams / GRAMS_PER_TESLA_KM,
            led_minutes: co2_grams / GRAMS_PER_LED_MINUTE,
            phone_charges: co2_grams / GRAMS_PER_PHONE_CHARGE,
            web_searches: co2_grams / GRAMS_PER_WEB_SEARCH,
        })
    }

    pub fn from_kg(co2_kg: f64) -> Result<Self> {
        Self::from_grams(co2_kg * 1000.0)
    }
}
