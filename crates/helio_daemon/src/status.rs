//! Space-weather status classification for the live feed.

use helio_core::LiveSample;
use serde::{Deserialize, Serialize};

/// Current space-weather alert level, derived from flux and the
/// geomagnetic K-index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceWeatherLevel {
    Low,
    Moderate,
    High,
}

impl SpaceWeatherLevel {
    pub fn classify(solar_flux: f64, geomagnetic: u8) -> Self {
        if solar_flux > 120.0 || geomagnetic > 6 {
            SpaceWeatherLevel::High
        } else if solar_flux > 90.0 || geomagnetic > 4 {
            SpaceWeatherLevel::Moderate
        } else {
            SpaceWeatherLevel::Low
        }
    }

    pub fn for_sample(sample: &LiveSample) -> Self {
        Self::classify(sample.solar_flux, sample.geomagnetic)
    }

    pub fn message(&self) -> &'static str {
        match self {
            SpaceWeatherLevel::High => "High solar activity detected",
            SpaceWeatherLevel::Moderate => "Moderate solar activity",
            SpaceWeatherLevel::Low => "Quiet space weather",
        }
    }
}
