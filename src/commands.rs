//! Typed commands.
//!
//! Every mutation a UI can request is expressed as a [`Command`] value,
//! so input collection is decoupled from state changes and each request
//! can be checked before it is applied.

use serde::{Deserialize, Serialize};

use crate::error::{TimetableError, TimetableResult};
use crate::models::{EntityId, GridKey, Lesson, LessonId, RegistryKind};
use crate::timetable::TimetableState;
use crate::validation::check_lesson_references;

/// Request to create a lesson card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLessonCommand {
    pub class_id: EntityId,
    pub subject_id: EntityId,
    pub teacher_id: EntityId,
    pub room_id: EntityId,
    /// Weekly count; clamped to `1..=12` on creation.
    pub count: u32,
}

impl AddLessonCommand {
    pub fn new(
        class_id: impl Into<String>,
        subject_id: impl Into<String>,
        teacher_id: impl Into<String>,
        room_id: impl Into<String>,
        count: u32,
    ) -> Self {
        Self {
            class_id: class_id.into(),
            subject_id: subject_id.into(),
            teacher_id: teacher_id.into(),
            room_id: room_id.into(),
            count,
        }
    }

    /// Checks the command against the current state.
    ///
    /// # Errors
    /// `InvalidCommand` if any registry is empty or a referenced entity
    /// does not exist.
    pub fn validate(&self, state: &TimetableState) -> TimetableResult<()> {
        let empty: Vec<String> = RegistryKind::ALL
            .into_iter()
            .filter(|&k| state.registry(k).is_empty())
            .map(|k| k.to_string())
            .collect();
        if !empty.is_empty() {
            return Err(TimetableError::InvalidCommand(format!(
                "fill the {} list(s) before adding lessons",
                empty.join(", ")
            )));
        }

        let probe = Lesson::new(
            "",
            self.class_id.as_str(),
            self.subject_id.as_str(),
            self.teacher_id.as_str(),
            self.room_id.as_str(),
            self.count,
        );
        check_lesson_references(&probe, state).map_err(|errors| {
            TimetableError::InvalidCommand(
                errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })
    }
}

/// A mutating operation on the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    AddEntity { kind: RegistryKind, name: String },
    RemoveEntity { kind: RegistryKind, id: EntityId },
    AddLesson(AddLessonCommand),
    RemoveLesson { lesson_id: LessonId },
    /// Place a new occurrence of a lesson.
    Place {
        lesson_id: LessonId,
        day: u32,
        period: u32,
    },
    /// Move a placed occurrence to another slot.
    Move {
        from: GridKey,
        day: u32,
        period: u32,
    },
    RemoveSlot {
        key: GridKey,
    },
    AutoPlace,
    SetScheduleConfig {
        days: u32,
        periods: u32,
    },
    SetLimits {
        teacher_day_max: u32,
        class_day_max: u32,
    },
    /// Empty registries, lessons and grid.
    Clear,
}

/// What a dispatched command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    EntityAdded(EntityId),
    LessonAdded(LessonId),
    /// The grid key written by a place or move.
    Placed(GridKey),
    /// Number of occurrences placed by auto-place.
    AutoPlaced(usize),
    Done,
}
