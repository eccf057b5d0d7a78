//! Windowed trend analysis over the live feed.

use serde::{Deserialize, Serialize};

use crate::correlation::pearson;
use crate::series::{LiveSample, LiveWindow};
use crate::HelioError;

/// The trend block of a live snapshot: correlation over the most recent
/// sub-window plus the percent change of each metric between the two most
/// recent sub-windows. `Default` (all zeros) is the sentinel a feed uses
/// while its window is still too short.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub coefficient: f64,
    pub commits_pct: f64,
    pub solar_pct: f64,
}

/// Percent change of a metric's mean between the previous and the most
/// recent `k`-sample window.
///
/// Requires `2k` retained samples. A previous-window mean of zero resolves
/// to 0.0 rather than dividing through it.
pub fn trend<F>(window: &LiveWindow, k: usize, metric: F) -> Result<f64, HelioError>
where
    F: Fn(&LiveSample) -> f64,
{
    assert!(k > 0, "trend window must be at least 1 sample");
    let needed = k * 2;
    if window.len() < needed {
        return Err(HelioError::InsufficientData {
            needed,
            have: window.len(),
        });
    }

    let values = window.tail_metric(needed, metric);
    let previous_mean = values[..k].iter().sum::<f64>() / k as f64;
    let recent_mean = values[k..].iter().sum::<f64>() / k as f64;

    if previous_mean == 0.0 {
        return Ok(0.0);
    }
    Ok((recent_mean - previous_mean) / previous_mean * 100.0)
}

/// Full trend block for a snapshot: Pearson over the last `k` samples'
/// commits vs. solar flux, plus the per-metric trend, rounded the way the
/// dashboard displays them (coefficient to 3 decimal places, percentages
/// to 1).
pub fn combined_trend(window: &LiveWindow, k: usize) -> Result<TrendSummary, HelioError> {
    let commits_pct = trend(window, k, |s| s.commits as f64)?;
    let solar_pct = trend(window, k, |s| s.solar_flux)?;

    let commits = window.tail_metric(k, |s| s.commits as f64);
    let flux = window.tail_metric(k, |s| s.solar_flux);
    let coefficient = pearson(&commits, &flux)?;

    Ok(TrendSummary {
        coefficient: round_to(coefficient, 3),
        commits_pct: round_to(commits_pct, 1),
        solar_pct: round_to(solar_pct, 1),
    })
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
