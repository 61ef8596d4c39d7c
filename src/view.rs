//! Display-ready views over the state.
//!
//! Resolves ids to names for cells and the lesson palette. Missing
//! entities degrade to a placeholder label instead of failing.

use std::fmt;

use crate::models::{GridKey, Lesson, LessonId, RegistryKind};
use crate::timetable::TimetableState;

/// Resolved names for one lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonLabel {
    pub class: String,
    pub subject: String,
    pub teacher: String,
    pub room: String,
}

impl fmt::Display for LessonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}, {})",
            self.class, self.subject, self.teacher, self.room
        )
    }
}

/// A placed occurrence as shown in a grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonCard {
    pub key: GridKey,
    pub lesson_id: LessonId,
    pub label: LessonLabel,
}

/// A lesson as shown in the palette, with its remaining need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub lesson_id: LessonId,
    pub label: LessonLabel,
    pub count: u32,
    pub placed: u32,
    /// `count − placed`, floored at zero.
    pub remaining: u32,
}

fn resolve(state: &TimetableState, kind: RegistryKind, id: &str) -> String {
    state
        .registry(kind)
        .name_of(id)
        .unwrap_or(kind.placeholder())
        .to_string()
}

/// Labels a lesson from its own references.
pub fn label_for(state: &TimetableState, lesson: &Lesson) -> LessonLabel {
    LessonLabel {
        class: resolve(state, RegistryKind::Class, &lesson.class_id),
        subject: resolve(state, RegistryKind::Subject, &lesson.subject_id),
        teacher: resolve(state, RegistryKind::Teacher, &lesson.teacher_id),
        room: resolve(state, RegistryKind::Room, &lesson.room_id),
    }
}

/// Card for a grid entry; the class label comes from the key.
///
/// Returns `None` for empty slots and orphaned entries.
pub fn card_at(state: &TimetableState, key: &GridKey) -> Option<LessonCard> {
    let lesson_id = state.grid.get(key)?;
    let lesson = state.lessons.get(lesson_id)?;
    let mut label = label_for(state, lesson);
    label.class = resolve(state, RegistryKind::Class, &key.class_id);
    Some(LessonCard {
        key: key.clone(),
        lesson_id: lesson_id.clone(),
        label,
    })
}

/// All cards on one `(day, period)` slot.
pub fn cell(state: &TimetableState, day: u32, period: u32) -> Vec<LessonCard> {
    state
        .grid
        .entries_at(day, period)
        .filter_map(|(key, _)| card_at(state, key))
        .collect()
}

/// Palette entries in catalog order.
pub fn palette(state: &TimetableState) -> Vec<PaletteEntry> {
    state
        .lessons
        .iter()
        .map(|lesson| {
            let placed = state.grid.occurrences_of(&lesson.id) as u32;
            PaletteEntry {
                lesson_id: lesson.id.clone(),
                label: label_for(state, lesson),
                count: lesson.count,
                placed,
                remaining: lesson.count.saturating_sub(placed),
            }
        })
        .collect()
}
