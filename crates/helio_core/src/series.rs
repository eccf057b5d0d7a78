//! Observation types and the fixed-capacity rolling window.

use std::collections::VecDeque;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One minute-level observation pushed through the live feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveSample {
    pub timestamp: DateTime<Utc>,
    pub commits: u32,
    pub developers: u32,
    pub solar_flux: f64,
    pub geomagnetic: u8,
    pub pull_requests: u32,
    pub issues: u32,
}

/// One day of developer activity in the historical series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub commits: u32,
    pub pull_requests: u32,
    pub issues: u32,
}

/// One day of space-weather readings in the historical series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailySolar {
    pub date: NaiveDate,
    pub solar_flux: f64,
    pub sunspots: u32,
    pub geomagnetic: u8,
}

/// Fixed-capacity rolling window over live samples, oldest first.
///
/// Pushing at capacity evicts from the front, so the window always holds the
/// most recent `capacity` samples in insertion order.
#[derive(Debug, Clone)]
pub struct LiveWindow {
    samples: VecDeque<LiveSample>,
    capacity: usize,
}

impl LiveWindow {
    /// Capacity must be at least 1.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be at least 1");
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append one sample, evicting the oldest if the window is full.
    pub fn push(&mut self, sample: LiveSample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LiveSample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&LiveSample> {
        self.samples.back()
    }

    pub fn oldest(&self) -> Option<&LiveSample> {
        self.samples.front()
    }

    /// Metric values of the most recent `n` samples, oldest first.
    /// Yields every retained sample when `n` exceeds the current length.
    pub fn tail_metric<F>(&self, n: usize, metric: F) -> Vec<f64>
    where
        F: Fn(&LiveSample) -> f64,
    {
        let skip = self.samples.len().saturating_sub(n);
        self.samples.iter().skip(skip).map(metric).collect()
    }

    pub fn to_vec(&self) -> Vec<LiveSample> {
        self.samples.iter().copied().collect()
    }
}
