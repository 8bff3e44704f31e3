//! Time grid
//!
//! The board is `total_weeks` week columns grouped into sprints of
//! `weeks_per_sprint`. Everything here is pure arithmetic over week indices.

use std::fmt;
use std::ops::Range;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::DeveloperId;

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("Invalid grid configuration: {0}")]
    InvalidConfig(String),
}

/// A `(developer, week)` coordinate on the board
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub developer: DeveloperId,
    pub week: u32,
}

impl Slot {
    pub fn new(developer: DeveloperId, week: u32) -> Self {
        Self { developer, week }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} week {}", self.developer, self.week)
    }
}

/// The addressable planning horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    total_weeks: u32,
    weeks_per_sprint: u32,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            total_weeks: 16,
            weeks_per_sprint: 2,
        }
    }
}

impl TimeGrid {
    /// Creates a grid, rejecting empty horizons and empty sprints
    pub fn new(total_weeks: u32, weeks_per_sprint: u32) -> Result<Self, GridError> {
        if total_weeks == 0 {
            return Err(GridError::InvalidConfig(
                "total_weeks must be at least 1".to_string(),
            ));
        }
        if weeks_per_sprint == 0 {
            return Err(GridError::InvalidConfig(
                "weeks_per_sprint must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            total_weeks,
            weeks_per_sprint,
        })
    }

    pub fn total_weeks(&self) -> u32 {
        self.total_weeks
    }

    pub fn weeks_per_sprint(&self) -> u32 {
        self.weeks_per_sprint
    }

    /// Number of sprints, counting a trailing partial sprint
    pub fn total_sprints(&self) -> u32 {
        self.total_weeks.div_ceil(self.weeks_per_sprint)
    }

    pub fn in_bounds(&self, week: u32) -> bool {
        week < self.total_weeks
    }

    /// Week indices an item of `span` weeks would cover from `week`,
    /// truncated at the horizon
    ///
    /// The range is shorter than `span` when the run would cross the
    /// horizon, and empty when `week` itself is out of bounds.
    pub fn slots_for(&self, week: u32, span: u32) -> Range<u32> {
        let start = week.min(self.total_weeks);
        let end = week.saturating_add(span).min(self.total_weeks);
        start..end
    }

    /// Sprint index containing `week`
    pub fn sprint_of(&self, week: u32) -> Option<u32> {
        self.in_bounds(week).then(|| week / self.weeks_per_sprint)
    }

    /// Week indices belonging to `sprint`; the last sprint may be short
    pub fn sprint_weeks(&self, sprint: u32) -> Option<Range<u32>> {
        if sprint >= self.total_sprints() {
            return None;
        }
        let start = sprint * self.weeks_per_sprint;
        let end = (start + self.weeks_per_sprint).min(self.total_weeks);
        Some(start..end)
    }

    /// Calendar dates of `week` when the board starts on `start`
    pub fn week_period(&self, start: NaiveDate, week: u32) -> Option<WeekPeriod> {
        if !self.in_bounds(week) {
            return None;
        }
        let first = start.checked_add_days(Days::new(u64::from(week) * 7))?;
        let last = first.checked_add_days(Days::new(6))?;
        Some(WeekPeriod { first, last })
    }
}

/// First and last calendar day of a board week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekPeriod {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl fmt::Display for WeekPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} - {}/{}",
            self.first.day(),
            self.first.month(),
            self.last.day(),
            self.last.month()
        )
    }
}
