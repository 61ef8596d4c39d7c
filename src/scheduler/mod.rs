//! Placement engine, auto-placement strategies and KPI evaluation.
//!
//! # Algorithm
//!
//! Manual placement goes through [`PlacementEngine`], which consults the
//! conflict checker before every write. Bulk placement is pluggable via
//! [`AutoPlacer`]: [`GreedyPlacer`] is the default first-fit heuristic,
//! [`BacktrackingPlacer`] is a budgeted search that can recover from the
//! greedy's early choices.
//!
//! # KPI
//!
//! [`TimetableKpi`] reports coverage of the weekly needs and daily loads.

mod auto;
mod engine;
mod kpi;
mod options;

pub use auto::{AutoPlacer, BacktrackingPlacer, GreedyPlacer, PlacementContext};
pub use engine::PlacementEngine;
pub use kpi::TimetableKpi;
pub use options::{PlacementOptions, PlacementStrategy, DEFAULT_MAX_STEPS};
