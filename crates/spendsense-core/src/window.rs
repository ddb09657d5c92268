//! Time windows used by the Query Layer and detectors (spec §4.1).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` UTC date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: u32,
}

impl Window {
    /// Build the window ending at `end` (exclusive) spanning `days` days.
    pub fn ending_at(end: NaiveDate, days: u32) -> Self {
        let start = end - chrono::Duration::days(i64::from(days));
        Self { start, end, days }
    }

    /// The canonical 30-day window, ending today.
    pub fn canonical_30d(today: NaiveDate) -> Self {
        Self::ending_at(today, 30)
    }

    /// The canonical 180-day window, ending today.
    pub fn canonical_180d(today: NaiveDate) -> Self {
        Self::ending_at(today, 180)
    }

    /// Whether `date` falls inside this half-open window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}
