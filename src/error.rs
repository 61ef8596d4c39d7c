//! Error types for timetable operations.

use thiserror::Error;

use crate::conflict::ConflictKind;
use crate::validation::ValidationError;

/// Errors surfaced by the timetable core.
///
/// None of these are fatal: every failing operation leaves the
/// previous state untouched.
#[derive(Error, Debug)]
pub enum TimetableError {
    /// The target slot collides with an existing assignment.
    #[error("conflict at day {day}, period {period}: {kind}")]
    Conflict {
        kind: ConflictKind,
        day: u32,
        period: u32,
    },

    /// A referenced lesson, entity or grid slot does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A loaded state document failed structural validation.
    #[error("invalid state document: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    /// A state document could not be parsed.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A command was rejected before dispatch.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

/// Result alias for timetable operations.
pub type TimetableResult<T> = Result<T, TimetableError>;

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
