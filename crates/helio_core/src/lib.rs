//! Statistics core for the HelioDev dashboard.
//!
//! Pairs a synthetic series generator (developer activity vs. space weather)
//! with a Pearson correlation engine and sliding-window trend analysis.
//! Everything in this crate is pure and synchronous; timers, channels, and
//! subscribers live in `helio_daemon`.

pub mod correlation;
pub mod generator;
pub mod insights;
pub mod series;
pub mod trend;

use thiserror::Error;

/// Errors surfaced by the correlation and trend computations.
///
/// Degenerate-but-valid inputs (empty series, zero variance, zero
/// previous-window mean) are not errors; they resolve to a 0.0 sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HelioError {
    /// Two series were paired positionally but differ in length.
    #[error("series length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    /// Fewer samples retained than the requested window analysis needs.
    #[error("insufficient data: need {needed} samples, have {have}")]
    InsufficientData { needed: usize, have: usize },
}

pub use correlation::{pearson, CorrelationStrength};
pub use generator::GeneratorProfile;
pub use insights::{derive_insights, Insight};
pub use series::{DailyActivity, DailySolar, LiveSample, LiveWindow};
pub use trend::{combined_trend, trend, TrendSummary};
