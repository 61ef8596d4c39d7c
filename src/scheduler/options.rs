//! Placement configuration.

use serde::{Deserialize, Serialize};

/// Default node budget for the backtracking search.
pub const DEFAULT_MAX_STEPS: usize = 100_000;

/// Which algorithm fills the remaining occurrences on auto-place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementStrategy {
    /// First-fit, catalog order, no backtracking.
    #[default]
    Greedy,
    /// Depth-first search with a node budget.
    Backtracking { max_steps: usize },
}

impl PlacementStrategy {
    /// Backtracking with the default node budget.
    pub fn backtracking() -> Self {
        PlacementStrategy::Backtracking {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Engine settings that are not part of the persisted timetable.
///
/// # Example
///
/// ```
/// use u_timetable::scheduler::{PlacementOptions, PlacementStrategy};
///
/// let opts = PlacementOptions::new()
///     .with_strategy(PlacementStrategy::backtracking())
///     .with_limit_enforcement(true);
/// assert!(opts.enforce_limits);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementOptions {
    /// Auto-place algorithm.
    pub strategy: PlacementStrategy,
    /// Check `Limits` in addition to the class/teacher/room rule.
    pub enforce_limits: bool,
}

impl PlacementOptions {
    /// Greedy placement, limits not enforced.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: PlacementStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_limit_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_limits = enforce;
        self
    }
}
