//! Conflict detection.
//!
//! A lesson may not be placed on a `(day, period)` slot that already holds
//! a lesson for the same class, taught by the same teacher, or held in the
//! same room. Optionally, declared daily limits are checked as well.
//!
//! # Complexity
//! O(grid size) per check. Grids are `days × periods × classes`, which is a
//! few hundred entries for a typical school.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Grid, GridKey, Lesson, LessonCatalog, Limits};

/// Why a placement collides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    /// The class already has a lesson on this slot.
    Class,
    /// The teacher already teaches on this slot.
    Teacher,
    /// The room is already in use on this slot.
    Room,
    /// The teacher would exceed `teacher_day_max` on this day.
    TeacherDayLimit,
    /// The class would exceed `class_day_max` on this day.
    ClassDayLimit,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConflictKind::Class => "class already busy",
            ConflictKind::Teacher => "teacher already busy",
            ConflictKind::Room => "room already in use",
            ConflictKind::TeacherDayLimit => "teacher daily limit reached",
            ConflictKind::ClassDayLimit => "class daily limit reached",
        };
        f.write_str(s)
    }
}

/// Read-only view over the catalog and grid answering "may this lesson go here?".
///
/// Grid entries whose lesson has been deleted from the catalog are skipped.
#[derive(Debug, Clone, Copy)]
pub struct ConflictChecker<'a> {
    catalog: &'a LessonCatalog,
    grid: &'a Grid,
    limits: Option<Limits>,
}

impl<'a> ConflictChecker<'a> {
    /// Creates a checker applying only the class/teacher/room rule.
    pub fn new(catalog: &'a LessonCatalog, grid: &'a Grid) -> Self {
        Self {
            catalog,
            grid,
            limits: None,
        }
    }

    /// Also enforces the given daily limits.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Whether placing `lesson` at `(day, period)` collides with anything.
    ///
    /// `ignore` excludes one grid entry, normally the lesson's own current
    /// position during a move.
    pub fn conflict(
        &self,
        day: u32,
        period: u32,
        lesson: &Lesson,
        ignore: Option<&GridKey>,
    ) -> bool {
        self.find_conflict(day, period, lesson, ignore).is_some()
    }

    /// Returns the first collision found, if any.
    ///
    /// Each occupying lesson is tested for class, then teacher, then room.
    /// Limit checks run only after the slot itself is clear.
    pub fn find_conflict(
        &self,
        day: u32,
        period: u32,
        lesson: &Lesson,
        ignore: Option<&GridKey>,
    ) -> Option<ConflictKind> {
        for (_, other) in self.resolved(ignore).filter(|(k, _)| k.is_at(day, period)) {
            if other.class_id == lesson.class_id {
                return Some(ConflictKind::Class);
            }
            if other.teacher_id == lesson.teacher_id {
                return Some(ConflictKind::Teacher);
            }
            if other.room_id == lesson.room_id {
                return Some(ConflictKind::Room);
            }
        }

        let limits = self.limits?;
        if self.teacher_load(day, &lesson.teacher_id, ignore) >= limits.teacher_day_max {
            return Some(ConflictKind::TeacherDayLimit);
        }
        if self.class_load(day, &lesson.class_id, ignore) >= limits.class_day_max {
            return Some(ConflictKind::ClassDayLimit);
        }
        None
    }

    /// Lessons already placed for a teacher on one day.
    pub fn teacher_load(&self, day: u32, teacher_id: &str, ignore: Option<&GridKey>) -> u32 {
        self.resolved(ignore)
            .filter(|(k, l)| k.day == day && l.teacher_id == teacher_id)
            .count() as u32
    }

    /// Lessons already placed for a class on one day.
    pub fn class_load(&self, day: u32, class_id: &str, ignore: Option<&GridKey>) -> u32 {
        self.resolved(ignore)
            .filter(|(k, l)| k.day == day && l.class_id == class_id)
            .count() as u32
    }

    /// Grid entries joined with their live lesson definitions.
    fn resolved<'s>(
        &'s self,
        ignore: Option<&'s GridKey>,
    ) -> impl Iterator<Item = (&'a GridKey, &'a Lesson)> + 's {
        let catalog = self.catalog;
        self.grid
            .iter()
            .filter(move |(k, _)| ignore != Some(*k))
            .filter_map(move |(k, id)| catalog.get(id).map(|l| (k, l)))
    }
}
