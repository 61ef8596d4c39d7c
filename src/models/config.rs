//! Grid dimensions and daily load limits.

use serde::{Deserialize, Serialize};

/// Default number of school days per week.
pub const DEFAULT_DAYS: u32 = 5;
/// Default number of periods per day.
pub const DEFAULT_PERIODS: u32 = 7;
/// Default daily lesson maximum for teachers and classes.
pub const DEFAULT_DAY_MAX: u32 = 7;

/// Grid dimensions: `days` × `periods`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub days: u32,
    pub periods: u32,
}

impl ScheduleConfig {
    pub fn new(days: u32, periods: u32) -> Self {
        Self { days, periods }
    }

    /// Whether `(day, period)` lies inside the grid.
    #[inline]
    pub fn contains(&self, day: u32, period: u32) -> bool {
        day < self.days && period < self.periods
    }

    /// Number of `(day, period)` slots.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.days as usize * self.periods as usize
    }

    /// Slots in day-major, period-minor ascending order.
    pub fn slots(&self) -> impl Iterator<Item = (u32, u32)> {
        let periods = self.periods;
        (0..self.days).flat_map(move |d| (0..periods).map(move |p| (d, p)))
    }

    /// Both dimensions are at least one.
    pub fn is_valid(&self) -> bool {
        self.days >= 1 && self.periods >= 1
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DAYS, DEFAULT_PERIODS)
    }
}

/// Declared daily maxima.
///
/// Only consulted when limit enforcement is switched on in
/// [`PlacementOptions`](crate::scheduler::PlacementOptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Limits {
    /// Maximum lessons per day for one teacher.
    pub teacher_day_max: u32,
    /// Maximum lessons per day for one class.
    pub class_day_max: u32,
}

impl Limits {
    pub fn new(teacher_day_max: u32, class_day_max: u32) -> Self {
        Self {
            teacher_day_max,
            class_day_max,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(DEFAULT_DAY_MAX, DEFAULT_DAY_MAX)
    }
}
