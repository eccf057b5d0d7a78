//! Feed configuration, loaded from TOML with per-field defaults.

use std::fs;
use std::path::Path;

use helio_core::GeneratorProfile;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Seconds between current-sample refreshes.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
    /// Seconds between appends to the rolling window.
    #[serde(default = "default_append_secs")]
    pub append_secs: u64,
    /// Maximum samples retained in the rolling window (24 h of minutes).
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Hours of synthetic history seeded before the feed starts.
    #[serde(default = "default_seed_hours")]
    pub seed_hours: usize,
    /// Sub-window size for trend comparisons (most recent k vs previous k).
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,
    /// Fixed RNG seed; omit for entropy seeding.
    #[serde(default)]
    pub rng_seed: Option<u64>,
    /// Shaping constants for the synthetic generator.
    #[serde(default)]
    pub generator: GeneratorProfile,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
            append_secs: default_append_secs(),
            capacity: default_capacity(),
            seed_hours: default_seed_hours(),
            trend_window: default_trend_window(),
            rng_seed: None,
            generator: GeneratorProfile::default(),
        }
    }
}

fn default_refresh_secs() -> u64 {
    5
}
fn default_append_secs() -> u64 {
    60
}
fn default_capacity() -> usize {
    1440
}
fn default_seed_hours() -> usize {
    24
}
fn default_trend_window() -> usize {
    6
}

impl FeedConfig {
    /// Load from a TOML file. A missing or invalid file falls back to the
    /// defaults so the daemon always comes up.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(config) => config,
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Invalid feed config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Could not read feed config, using defaults");
                Self::default()
            }
        }
    }
}
