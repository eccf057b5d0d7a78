//! Derived observations over the paired daily series.

use std::cmp::Ordering;

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::series::{DailyActivity, DailySolar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Correlation,
    Pattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// One noteworthy alignment in the data, ready for a dashboard card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub detail: String,
    pub confidence: Confidence,
}

/// Weekday commit mean must exceed the weekend mean by this factor before
/// the weekend-effect insight fires.
const WEEKEND_EFFECT_FACTOR: f64 = 1.5;

/// Scan the paired daily series for noteworthy alignments.
pub fn derive_insights(activity: &[DailyActivity], solar: &[DailySolar]) -> Vec<Insight> {
    let mut insights = Vec::new();
    if activity.is_empty() || solar.is_empty() {
        return insights;
    }

    if let Some(insight) = peak_alignment(activity, solar) {
        insights.push(insight);
    }
    if let Some(insight) = weekend_effect(activity) {
        insights.push(insight);
    }
    insights
}

/// Busiest commit day coinciding with the flux peak.
fn peak_alignment(activity: &[DailyActivity], solar: &[DailySolar]) -> Option<Insight> {
    let busiest = activity.iter().max_by_key(|day| day.commits)?;
    let peak = solar.iter().max_by(|a, b| {
        a.solar_flux
            .partial_cmp(&b.solar_flux)
            .unwrap_or(Ordering::Equal)
    })?;

    if busiest.date != peak.date {
        return None;
    }
    Some(Insight {
        kind: InsightKind::Correlation,
        title: "Peak activity alignment".to_string(),
        detail: format!(
            "Both commits and solar activity peaked on {}",
            busiest.date.format("%Y-%m-%d")
        ),
        confidence: Confidence::High,
    })
}

/// Weekday commits clearly outpacing weekend commits.
fn weekend_effect(activity: &[DailyActivity]) -> Option<Insight> {
    let (weekend, weekday): (Vec<&DailyActivity>, Vec<&DailyActivity>) = activity
        .iter()
        .partition(|day| matches!(day.date.weekday(), Weekday::Sat | Weekday::Sun));
    if weekend.is_empty() || weekday.is_empty() {
        return None;
    }

    let weekend_mean =
        weekend.iter().map(|d| f64::from(d.commits)).sum::<f64>() / weekend.len() as f64;
    let weekday_mean =
        weekday.iter().map(|d| f64::from(d.commits)).sum::<f64>() / weekday.len() as f64;

    // A zero weekend mean would blow up the ratio; skip rather than report
    // an infinite percentage.
    if weekend_mean == 0.0 || weekday_mean <= weekend_mean * WEEKEND_EFFECT_FACTOR {
        return None;
    }

    let pct = ((weekday_mean / weekend_mean - 1.0) * 100.0).round();
    Some(Insight {
        kind: InsightKind::Pattern,
        title: "Weekend effect detected".to_string(),
        detail: format!("Developers are {pct:.0}% more active on weekdays"),
        confidence: Confidence::High,
    })
}
