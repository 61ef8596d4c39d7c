//! Structural validation of timetable state.
//!
//! Checks a (typically freshly loaded) state document before it is
//! allowed to replace the live one. Detects:
//! - Zero-sized grid dimensions or daily limits
//! - Duplicate IDs within a registry or the lesson catalog
//! - Lesson counts outside `[MIN_COUNT, MAX_COUNT]`
//! - Grid entries filed under a class other than their lesson's
//!
//! Dangling references are NOT errors: deleting an entity never cascades,
//! so a valid state may contain lessons naming removed teachers and grid
//! entries naming removed lessons. [`dangling_references`] lists them
//! for diagnostics.

use std::collections::HashSet;

use crate::models::{Lesson, RegistryKind, MAX_COUNT, MIN_COUNT};
use crate::timetable::TimetableState;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities (or two lessons) share the same ID.
    DuplicateId,
    /// Grid dimensions or limits are zero.
    InvalidConfig,
    /// A lesson count lies outside the accepted range.
    CountOutOfRange,
    /// A lesson or grid entry references something that does not exist.
    InvalidReference,
    /// A grid key's class differs from the class of the lesson it holds.
    ClassMismatch,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a complete state document.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_state(state: &TimetableState) -> ValidationResult {
    let mut errors = Vec::new();

    if state.config.days == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConfig,
            "days must be >= 1",
        ));
    }
    if state.config.periods == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConfig,
            "periods must be >= 1",
        ));
    }
    if state.limits.teacher_day_max == 0 || state.limits.class_day_max == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConfig,
            "daily limits must be >= 1",
        ));
    }

    for kind in RegistryKind::ALL {
        let mut seen = HashSet::new();
        for entity in state.registry(kind).list() {
            if !seen.insert(entity.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate {kind} ID: {}", entity.id),
                ));
            }
        }
    }

    let mut lesson_ids = HashSet::new();
    for lesson in state.lessons.iter() {
        if !lesson_ids.insert(lesson.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate lesson ID: {}", lesson.id),
            ));
        }
        if !(MIN_COUNT..=MAX_COUNT).contains(&lesson.count) {
            errors.push(ValidationError::new(
                ValidationErrorKind::CountOutOfRange,
                format!(
                    "Lesson '{}' count {} outside {MIN_COUNT}..={MAX_COUNT}",
                    lesson.id, lesson.count
                ),
            ));
        }
    }

    // Keys must carry the class of the lesson they hold.
    for (key, lesson_id) in state.grid.iter() {
        let Some(lesson) = state.lessons.get(lesson_id) else {
            continue;
        };
        if lesson.class_id != key.class_id {
            errors.push(ValidationError::new(
                ValidationErrorKind::ClassMismatch,
                format!(
                    "Grid slot '{key}' holds lesson '{lesson_id}' of class '{}'",
                    lesson.class_id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks that each entity a lesson names exists in its registry.
pub fn check_lesson_references(lesson: &Lesson, state: &TimetableState) -> ValidationResult {
    let refs = [
        (RegistryKind::Class, &lesson.class_id),
        (RegistryKind::Subject, &lesson.subject_id),
        (RegistryKind::Teacher, &lesson.teacher_id),
        (RegistryKind::Room, &lesson.room_id),
    ];

    let errors: Vec<ValidationError> = refs
        .into_iter()
        .filter(|(kind, id)| !state.registry(*kind).contains(id))
        .map(|(kind, id)| {
            ValidationError::new(
                ValidationErrorKind::InvalidReference,
                format!("Lesson '{}' references unknown {kind} '{id}'", lesson.id),
            )
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Lists dangling references: lessons naming removed entities and grid
/// entries naming removed lessons. These are tolerated, not rejected.
pub fn dangling_references(state: &TimetableState) -> Vec<ValidationError> {
    let mut found = Vec::new();
    for lesson in state.lessons.iter() {
        if let Err(errs) = check_lesson_references(lesson, state) {
            found.extend(errs);
        }
    }
    for (key, lesson_id) in state.grid.iter() {
        if state.lessons.get(lesson_id).is_none() {
            found.push(ValidationError::new(
                ValidationErrorKind::InvalidReference,
                format!("Grid slot '{key}' references unknown lesson '{lesson_id}'"),
            ));
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GridKey, NamedEntity, ScheduleConfig};

    fn sample_state() -> TimetableState {
        let mut s = TimetableState::default();
        s.classes.insert(NamedEntity::new("c1", "7A"));
        s.subjects.insert(NamedEntity::new("s1", "Math"));
        s.teachers.insert(NamedEntity::new("t1", "Ayse"));
        s.rooms.insert(NamedEntity::new("r1", "201"));
        s.lessons.insert(Lesson::new("L1", "c1", "s1", "t1", "r1", 3));
        s.grid.insert(GridKey::new(0, 0, "c1"), "L1");
        s
    }

    #[test]
    fn test_valid_state() {
        assert!(validate_state(&sample_state()).is_ok());
        assert!(dangling_references(&sample_state()).is_empty());
    }

    #[test]
    fn test_grid_class_mismatch() {
        let mut s = sample_state();
        s.classes.insert(NamedEntity::new("c2", "7B"));
        s.grid.insert(GridKey::new(0, 1, "c2"), "L1");
        let errors = validate_state(&s).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::ClassMismatch);
    }

    #[test]
    fn test_orphan_entry_not_a_mismatch() {
        let mut s = sample_state();
        s.grid.insert(GridKey::new(0, 1, "c2"), "GONE");
        assert!(validate_state(&s).is_ok());
        assert_eq!(dangling_references(&s).len(), 1);
    }

    #[test]
    fn test_zero_dimensions() {
        let mut s = sample_state();
        s.config = ScheduleConfig::new(0, 0);
        let errors = validate_state(&s).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidConfig)
                .count(),
            2
        );
    }

    #[test]
    fn test_duplicate_entity_id() {
        let mut s = sample_state();
        // Registry::insert refuses duplicates, so go through serde.
        let mut json = serde_json::to_value(&s).unwrap();
        json["rooms"] = serde_json::json!([
            {"id": "r1", "name": "201"},
            {"id": "r1", "name": "202"}
        ]);
        s = serde_json::from_value(json).unwrap();

        let errors = validate_state(&s).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("room")));
    }

    #[test]
    fn test_count_out_of_range() {
        let mut s = sample_state();
        let mut json = serde_json::to_value(&s).unwrap();
        json["lessons"][0]["count"] = serde_json::json!(40);
        s = serde_json::from_value(json).unwrap();

        let errors = validate_state(&s).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::CountOutOfRange));
    }

    #[test]
    fn test_dangling_references_tolerated() {
        let mut s = sample_state();
        s.teachers.remove("t1");
        s.grid.insert(GridKey::new(1, 0, "c1"), "GONE");

        assert!(validate_state(&s).is_ok());
        let dangling = dangling_references(&s);
        assert_eq!(dangling.len(), 2);
        assert!(dangling
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidReference));
    }

    #[test]
    fn test_check_lesson_references() {
        let s = sample_state();
        let good = Lesson::new("X", "c1", "s1", "t1", "r1", 1);
        assert!(check_lesson_references(&good, &s).is_ok());

        let bad = Lesson::new("Y", "c9", "s1", "t9", "r1", 1);
        let errors = check_lesson_references(&bad, &s).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_multiple_errors() {
        let mut s = sample_state();
        s.config = ScheduleConfig::new(0, 7);
        let mut json = serde_json::to_value(&s).unwrap();
        json["lessons"][0]["count"] = serde_json::json!(0);
        s = serde_json::from_value(json).unwrap();

        let errors = validate_state(&s).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
