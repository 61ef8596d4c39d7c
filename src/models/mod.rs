//! Timetable domain models.
//!
//! Provides the data types for a weekly school timetable: the resource
//! registries, the lesson catalog and the assignment grid.
//!
//! # Domain Mappings
//!
//! | u-timetable | School | Meaning |
//! |-------------|--------|---------|
//! | NamedEntity | Class / Teacher / Subject / Room | identified name |
//! | Lesson | lesson card | class + subject + teacher + room × weekly count |
//! | GridKey | cell | (day, period, class) |
//! | Grid | timetable | GridKey → lesson |

mod config;
mod entity;
mod grid;
mod lesson;

pub use config::{Limits, ScheduleConfig, DEFAULT_DAYS, DEFAULT_DAY_MAX, DEFAULT_PERIODS};
pub use entity::{generate_id, EntityId, NamedEntity, Registry, RegistryKind};
pub use grid::{Grid, GridKey, ParseGridKeyError};
pub use lesson::{clamp_count, Lesson, LessonCatalog, LessonId, MAX_COUNT, MIN_COUNT};
