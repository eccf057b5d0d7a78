//! Synthetic paired time series with engineered patterns.
//!
//! Produces the demo data the dashboard falls back to when no upstream feed
//! is reachable: a weekday/weekend rhythm on the developer side, flux spikes
//! on the space-weather side, and a mild coupling between the two so the
//! correlation engine has something to find.
//!
//! Every entry point takes its random source as a parameter. Production
//! callers pass an entropy-seeded generator; tests pass a fixed-seed
//! `ChaCha8Rng` and get byte-identical series back.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::series::{DailyActivity, DailySolar, LiveSample, LiveWindow};

/// Uniform jitter spans, `(r - 0.5) * span`.
const COMMIT_JITTER_SPAN: f64 = 40.0;
const FLUX_JITTER_SPAN: f64 = 30.0;
const LIVE_COMMIT_JITTER_SPAN: f64 = 20.0;
const LIVE_FLUX_JITTER_SPAN: f64 = 40.0;
const LIVE_DEVELOPER_JITTER_SPAN: f64 = 50.0;

/// Hard floors applied after jitter.
const MIN_COMMITS: f64 = 10.0;
const MIN_FLUX: f64 = 20.0;
const MIN_DEVELOPERS: f64 = 50.0;

const SUNSPOT_FACTOR: f64 = 1.5;

/// Live-sample shaping.
const LIVE_COMMIT_BASELINE: f64 = 30.0;
const LIVE_DEVELOPER_BASELINE: f64 = 150.0;
const WORK_HOUR_START: u32 = 9;
const WORK_HOUR_END: u32 = 17;
const WORK_COMMIT_BOOST: f64 = 1.5;
const WORK_DEVELOPER_BOOST: f64 = 1.3;
const LIVE_WEEKEND_COMMIT_FACTOR: f64 = 0.6;
const LIVE_WEEKEND_DEVELOPER_FACTOR: f64 = 0.7;

/// How strongly above-baseline flux nudges the commit count.
const SOLAR_INFLUENCE: f64 = 0.1;

/// Shaping constants for synthetic generation.
///
/// Weekday indices count from Sunday (Sunday = 0, Saturday = 6); event
/// offsets are days-ago positions in the daily series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorProfile {
    #[serde(default = "default_commit_baseline")]
    pub commit_baseline: f64,
    #[serde(default = "default_flux_baseline")]
    pub flux_baseline: f64,
    /// Commit multiplier on weekend days.
    #[serde(default = "default_weekend_commit_factor")]
    pub weekend_commit_factor: f64,
    /// Flux multiplier on solar event days.
    #[serde(default = "default_event_flux_factor")]
    pub event_flux_factor: f64,
    /// Commit multiplier on solar event days.
    #[serde(default = "default_event_commit_factor")]
    pub event_commit_factor: f64,
    /// Days-ago offsets flagged as solar events.
    #[serde(default = "default_event_offsets")]
    pub event_offsets: Vec<u32>,
    /// Weekday indices treated as weekend (Sunday = 0).
    #[serde(default = "default_weekend_days")]
    pub weekend_days: Vec<u32>,
    /// Pull requests derived per commit.
    #[serde(default = "default_pull_request_ratio")]
    pub pull_request_ratio: f64,
    /// Issues derived per commit.
    #[serde(default = "default_issue_ratio")]
    pub issue_ratio: f64,
}

impl Default for GeneratorProfile {
    fn default() -> Self {
        Self {
            commit_baseline: default_commit_baseline(),
            flux_baseline: default_flux_baseline(),
            weekend_commit_factor: default_weekend_commit_factor(),
            event_flux_factor: default_event_flux_factor(),
            event_commit_factor: default_event_commit_factor(),
            event_offsets: default_event_offsets(),
            weekend_days: default_weekend_days(),
            pull_request_ratio: default_pull_request_ratio(),
            issue_ratio: default_issue_ratio(),
        }
    }
}

fn default_commit_baseline() -> f64 {
    80.0
}
fn default_flux_baseline() -> f64 {
    70.0
}
fn default_weekend_commit_factor() -> f64 {
    0.4
}
fn default_event_flux_factor() -> f64 {
    2.5
}
fn default_event_commit_factor() -> f64 {
    1.3
}
fn default_event_offsets() -> Vec<u32> {
    vec![5, 12, 18, 25]
}
fn default_weekend_days() -> Vec<u32> {
    vec![0, 6]
}
fn default_pull_request_ratio() -> f64 {
    0.25
}
fn default_issue_ratio() -> f64 {
    0.15
}

/// Generate the paired daily series, most recent day last.
///
/// Multipliers compose: a day can be both a weekend and a solar event.
/// Values are jittered, floored to integers, then clamped to the metric
/// floors so the dashboard never renders a dead series.
pub fn generate_daily<R: Rng + ?Sized>(
    rng: &mut R,
    profile: &GeneratorProfile,
    today: NaiveDate,
    days: u32,
) -> (Vec<DailyActivity>, Vec<DailySolar>) {
    let mut activity = Vec::with_capacity(days as usize);
    let mut solar = Vec::with_capacity(days as usize);

    for offset in (0..days).rev() {
        let date = today - Duration::days(offset as i64);
        let weekday = date.weekday().num_days_from_sunday();
        let is_weekend = profile.weekend_days.contains(&weekday);
        let is_event = profile.event_offsets.contains(&offset);

        let mut base_commits = profile.commit_baseline;
        let mut base_flux = profile.flux_baseline;
        if is_weekend {
            base_commits *= profile.weekend_commit_factor;
        }
        if is_event {
            base_flux *= profile.event_flux_factor;
            base_commits *= profile.event_commit_factor;
        }

        let commits = (base_commits + centered_jitter(rng, COMMIT_JITTER_SPAN))
            .floor()
            .max(MIN_COMMITS);
        let flux = (base_flux + centered_jitter(rng, FLUX_JITTER_SPAN))
            .floor()
            .max(MIN_FLUX);

        activity.push(DailyActivity {
            date,
            commits: commits as u32,
            pull_requests: (commits * profile.pull_request_ratio) as u32 + rng.gen_range(0..8),
            issues: (commits * profile.issue_ratio) as u32 + rng.gen_range(0..5),
        });
        solar.push(DailySolar {
            date,
            solar_flux: flux,
            sunspots: (flux * SUNSPOT_FACTOR) as u32 + rng.gen_range(0..20),
            geomagnetic: if is_event {
                rng.gen_range(7..=9)
            } else {
                rng.gen_range(1..=5)
            },
        });
    }

    (activity, solar)
}

/// One synthetic reading for the given instant.
///
/// Activity rises during working hours and dips on weekends; flux above the
/// baseline bleeds into the commit count through `SOLAR_INFLUENCE`, which is
/// what makes the live correlation drift positive.
pub fn live_sample<R: Rng + ?Sized>(
    rng: &mut R,
    profile: &GeneratorProfile,
    timestamp: DateTime<Utc>,
) -> LiveSample {
    let hour = timestamp.hour();
    let weekday = timestamp.weekday().num_days_from_sunday();

    let mut base_commits = LIVE_COMMIT_BASELINE;
    let mut base_developers = LIVE_DEVELOPER_BASELINE;
    if (WORK_HOUR_START..=WORK_HOUR_END).contains(&hour) {
        base_commits *= WORK_COMMIT_BOOST;
        base_developers *= WORK_DEVELOPER_BOOST;
    }
    if profile.weekend_days.contains(&weekday) {
        base_commits *= LIVE_WEEKEND_COMMIT_FACTOR;
        base_developers *= LIVE_WEEKEND_DEVELOPER_FACTOR;
    }

    let flux = (profile.flux_baseline + centered_jitter(rng, LIVE_FLUX_JITTER_SPAN))
        .max(MIN_FLUX)
        .floor();
    let solar_influence = (flux - profile.flux_baseline) * SOLAR_INFLUENCE;

    let commits = (base_commits + centered_jitter(rng, LIVE_COMMIT_JITTER_SPAN) + solar_influence)
        .floor()
        .max(0.0) as u32;
    let developers = (base_developers + centered_jitter(rng, LIVE_DEVELOPER_JITTER_SPAN))
        .floor()
        .max(MIN_DEVELOPERS) as u32;

    LiveSample {
        timestamp,
        commits,
        developers,
        solar_flux: flux,
        geomagnetic: rng.gen_range(1..=9),
        pull_requests: (commits as f64 * profile.pull_request_ratio) as u32,
        issues: (commits as f64 * profile.issue_ratio) as u32,
    }
}

/// Uniform-random backfill so a freshly started feed has history to trend
/// against: one sample per hour ending at `now`.
pub fn seed_history<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    hours: usize,
    capacity: usize,
) -> LiveWindow {
    let mut window = LiveWindow::new(capacity);
    for hours_ago in (0..hours).rev() {
        window.push(LiveSample {
            timestamp: now - Duration::hours(hours_ago as i64),
            commits: rng.gen_range(20..70),
            developers: rng.gen_range(100..300),
            solar_flux: rng.gen_range(50..150) as f64,
            geomagnetic: rng.gen_range(1..=9),
            pull_requests: rng.gen_range(5..20),
            issues: rng.gen_range(2..12),
        });
    }
    window
}

fn centered_jitter<R: Rng + ?Sized>(rng: &mut R, span: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * span
}
