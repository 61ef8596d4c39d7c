//! School timetable engine for the U-Engine ecosystem.
//!
//! Assigns lesson cards (class + subject + teacher + room, with a weekly
//! count) onto a day × period grid, rejecting placements that would put a
//! class, teacher or room in two places at once.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `NamedEntity`, `Registry`, `Lesson`,
//!   `LessonCatalog`, `GridKey`, `Grid`, `ScheduleConfig`, `Limits`
//! - **`conflict`**: The class/teacher/room collision predicate
//! - **`scheduler`**: Manual placement, greedy and backtracking auto-placement, KPIs
//! - **`commands`**: Typed commands validated before dispatch
//! - **`timetable`**: The controller owning state, plus JSON persistence
//! - **`view`**: Name resolution for cells and the lesson palette
//! - **`validation`**: Integrity checks for loaded state
//!
//! # Architecture
//!
//! All state lives in one [`Timetable`]. Mutations go through its API (or
//! [`Timetable::dispatch`]); reads go through accessors. Execution is
//! single-threaded and every operation is atomic: it either applies in
//! full or leaves the state untouched.

pub mod commands;
pub mod conflict;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod timetable;
pub mod validation;
pub mod view;

pub use commands::{AddLessonCommand, Command, CommandOutcome};
pub use conflict::{ConflictChecker, ConflictKind};
pub use error::{TimetableError, TimetableResult};
pub use models::{GridKey, Lesson, RegistryKind};
pub use timetable::{Timetable, TimetableState};
