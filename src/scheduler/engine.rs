//! Manual and automatic placement.
//!
//! Every operation either applies fully or leaves the grid untouched.
//! Callers are expected to range-check `day`/`period` against the
//! current [`ScheduleConfig`]; the engine does not.

use tracing::{debug, warn};

use super::auto::{AutoPlacer, BacktrackingPlacer, GreedyPlacer, PlacementContext};
use super::options::{PlacementOptions, PlacementStrategy};
use crate::error::{TimetableError, TimetableResult};
use crate::models::{Grid, GridKey, LessonCatalog, LessonId, Limits, ScheduleConfig};

/// Mutating front-end over a grid.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Grid, Lesson, LessonCatalog, ScheduleConfig};
/// use u_timetable::scheduler::PlacementEngine;
///
/// let mut catalog = LessonCatalog::new();
/// catalog.insert(Lesson::new("L1", "7A", "math", "T1", "R1", 2));
/// let mut grid = Grid::new();
///
/// let mut engine = PlacementEngine::new(&catalog, &mut grid, ScheduleConfig::default());
/// engine.place("L1", 0, 0).unwrap();
/// assert_eq!(engine.auto_place(), 1);
/// ```
#[derive(Debug)]
pub struct PlacementEngine<'a> {
    ctx: PlacementContext<'a>,
    grid: &'a mut Grid,
    strategy: PlacementStrategy,
}

impl<'a> PlacementEngine<'a> {
    /// Creates an engine using greedy auto-placement and no limit checks.
    pub fn new(catalog: &'a LessonCatalog, grid: &'a mut Grid, config: ScheduleConfig) -> Self {
        Self {
            ctx: PlacementContext::new(catalog, config),
            grid,
            strategy: PlacementStrategy::Greedy,
        }
    }

    /// Applies strategy and limit settings.
    pub fn with_options(mut self, options: &PlacementOptions, limits: Limits) -> Self {
        self.strategy = options.strategy;
        self.ctx = self
            .ctx
            .with_limits(options.enforce_limits.then_some(limits));
        self
    }

    /// Places one occurrence of a lesson at `(day, period)` for its class.
    ///
    /// Re-placing a lesson onto the key it already holds succeeds as an
    /// idempotent overwrite.
    ///
    /// # Errors
    /// - `NotFound` if the lesson does not exist.
    /// - `Conflict` if the slot collides on class, teacher or room.
    pub fn place(&mut self, lesson_id: &str, day: u32, period: u32) -> TimetableResult<GridKey> {
        let catalog = self.ctx.catalog;
        let lesson = catalog
            .get(lesson_id)
            .ok_or_else(|| TimetableError::NotFound(format!("lesson '{lesson_id}'")))?;
        let key = GridKey::new(day, period, lesson.class_id.as_str());

        let holds_self = self.grid.get(&key).map(String::as_str) == Some(lesson_id);
        let ignore = holds_self.then_some(&key);

        if let Some(kind) = self
            .ctx
            .checker(self.grid)
            .find_conflict(day, period, lesson, ignore)
        {
            warn!(lesson = lesson_id, day, period, %kind, "placement rejected");
            return Err(TimetableError::Conflict { kind, day, period });
        }

        self.grid.insert(key.clone(), lesson_id);
        debug!(lesson = lesson_id, %key, "lesson placed");
        Ok(key)
    }

    /// Moves the occurrence at `source` to `(day, period)`, keeping its class.
    ///
    /// The source entry does not count against itself.
    ///
    /// # Errors
    /// - `NotFound` if `source` is empty or holds a deleted lesson.
    /// - `Conflict` if the destination collides.
    pub fn move_lesson(
        &mut self,
        source: &GridKey,
        day: u32,
        period: u32,
    ) -> TimetableResult<GridKey> {
        let catalog = self.ctx.catalog;
        let lesson_id = self
            .grid
            .get(source)
            .cloned()
            .ok_or_else(|| TimetableError::NotFound(format!("no lesson at slot {source}")))?;
        let lesson = catalog
            .get(&lesson_id)
            .ok_or_else(|| TimetableError::NotFound(format!("lesson '{lesson_id}'")))?;

        if let Some(kind) = self
            .ctx
            .checker(self.grid)
            .find_conflict(day, period, lesson, Some(source))
        {
            warn!(lesson = %lesson_id, from = %source, day, period, %kind, "move rejected");
            return Err(TimetableError::Conflict { kind, day, period });
        }

        let dest = GridKey::new(day, period, source.class_id.as_str());
        self.grid.remove(source);
        self.grid.insert(dest.clone(), lesson_id.as_str());
        debug!(lesson = %lesson_id, from = %source, to = %dest, "lesson moved");
        Ok(dest)
    }

    /// Clears one slot. Empty slots are ignored.
    pub fn remove(&mut self, key: &GridKey) -> Option<LessonId> {
        let removed = self.grid.remove(key);
        if let Some(id) = &removed {
            debug!(lesson = %id, %key, "slot cleared");
        }
        removed
    }

    /// Fills every lesson's remaining need using the configured strategy.
    ///
    /// Returns the number of newly placed occurrences.
    pub fn auto_place(&mut self) -> usize {
        match self.strategy {
            PlacementStrategy::Greedy => GreedyPlacer.place_all(&self.ctx, self.grid),
            PlacementStrategy::Backtracking { max_steps } => {
                BacktrackingPlacer::new(max_steps).place_all(&self.ctx, self.grid)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::ConflictKind;
    use crate::models::Lesson;

    fn catalog() -> LessonCatalog {
        let mut cat = LessonCatalog::new();
        cat.insert(Lesson::new("A", "7A", "math", "T1", "R1", 2));
        cat.insert(Lesson::new("B", "7B", "cs", "T1", "R2", 1));
        cat.insert(Lesson::new("C", "7B", "bio", "T2", "R3", 1));
        cat
    }

    #[test]
    fn test_place_success() {
        let cat = catalog();
        let mut grid = Grid::new();
        let mut engine = PlacementEngine::new(&cat, &mut grid, ScheduleConfig::default());

        let key = engine.place("A", 1, 2).unwrap();
        assert_eq!(key, GridKey::new(1, 2, "7A"));
        assert_eq!(grid.get(&key), Some(&"A".to_string()));
    }

    #[test]
    fn test_place_conflict_leaves_grid_unchanged() {
        let cat = catalog();
        let mut grid = Grid::new();
        let mut engine = PlacementEngine::new(&cat, &mut grid, ScheduleConfig::default());
        engine.place("A", 0, 0).unwrap();

        let err = engine.place("B", 0, 0).unwrap_err();
        assert!(matches!(
            err,
            TimetableError::Conflict {
                kind: ConflictKind::Teacher,
                day: 0,
                period: 0
            }
        ));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_place_unknown_lesson() {
        let cat = catalog();
        let mut grid = Grid::new();
        let mut engine = PlacementEngine::new(&cat, &mut grid, ScheduleConfig::default());
        assert!(matches!(
            engine.place("nope", 0, 0),
            Err(TimetableError::NotFound(_))
        ));
    }

    #[test]
    fn test_place_same_key_twice_is_idempotent() {
        let cat = catalog();
        let mut grid = Grid::new();
        let mut engine = PlacementEngine::new(&cat, &mut grid, ScheduleConfig::default());
        engine.place("A", 0, 0).unwrap();
        engine.place("A", 0, 0).unwrap();
        assert_eq!(grid.occurrences_of("A"), 1);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_place_same_lesson_other_slot_allowed() {
        let cat = catalog();
        let mut grid = Grid::new();
        let mut engine = PlacementEngine::new(&cat, &mut grid, ScheduleConfig::default());
        engine.place("A", 0, 0).unwrap();
        engine.place("A", 0, 1).unwrap();
        engine.place("A", 0, 2).unwrap(); // count is a target, not a cap
        assert_eq!(grid.occurrences_of("A"), 3);
    }

    #[test]
    fn test_move_success() {
        let cat = catalog();
        let mut grid = Grid::new();
        let mut engine = PlacementEngine::new(&cat, &mut grid, ScheduleConfig::default());
        let from = engine.place("A", 0, 0).unwrap();

        let to = engine.move_lesson(&from, 3, 4).unwrap();
        assert_eq!(to, GridKey::new(3, 4, "7A"));
        assert_eq!(grid.keys_of("A"), vec![&to]);
    }

    #[test]
    fn test_move_onto_itself() {
        let cat = catalog();
        let mut grid = Grid::new();
        let mut engine = PlacementEngine::new(&cat, &mut grid, ScheduleConfig::default());
        let from = engine.place("A", 2, 2).unwrap();
        let to = engine.move_lesson(&from, 2, 2).unwrap();
        assert_eq!(from, to);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_move_conflict() {
        let cat = catalog();
        let mut grid = Grid::new();
        let mut engine = PlacementEngine::new(&cat, &mut grid, ScheduleConfig::default());
        let a = engine.place("A", 0, 0).unwrap();
        engine.place("B", 0, 1).unwrap();

        let err = engine.move_lesson(&a, 0, 1).unwrap_err();
        assert!(matches!(err, TimetableError::Conflict { .. }));
        assert_eq!(grid.get(&a), Some(&"A".to_string()));
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_move_missing_source() {
        let cat = catalog();
        let mut grid = Grid::new();
        let mut engine = PlacementEngine::new(&cat, &mut grid, ScheduleConfig::default());
        let err = engine
            .move_lesson(&GridKey::new(0, 0, "7A"), 1, 1)
            .unwrap_err();
        assert!(matches!(err, TimetableError::NotFound(_)));
    }

    #[test]
    fn test_move_orphaned_source_is_not_found() {
        let cat = catalog();
        let mut grid = Grid::new();
        let orphan = GridKey::new(0, 0, "7A");
        grid.insert(orphan.clone(), "DELETED");
        let mut engine = PlacementEngine::new(&cat, &mut grid, ScheduleConfig::default());
        assert!(matches!(
            engine.move_lesson(&orphan, 1, 1),
            Err(TimetableError::NotFound(_))
        ));
    }

    #[test]
    fn test_remove() {
        let cat = catalog();
        let mut grid = Grid::new();
        let mut engine = PlacementEngine::new(&cat, &mut grid, ScheduleConfig::default());
        let key = engine.place("C", 0, 0).unwrap();
        assert_eq!(engine.remove(&key), Some("C".to_string()));
        assert_eq!(engine.remove(&key), None);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_limits_enforced_only_when_enabled() {
        let cat = catalog();
        let limits = Limits::new(1, 7);

        let mut grid = Grid::new();
        let mut engine = PlacementEngine::new(&cat, &mut grid, ScheduleConfig::default())
            .with_options(&PlacementOptions::new(), limits);
        engine.place("A", 0, 0).unwrap();
        assert!(engine.place("B", 0, 1).is_ok());

        let mut grid = Grid::new();
        let opts = PlacementOptions::new().with_limit_enforcement(true);
        let mut engine = PlacementEngine::new(&cat, &mut grid, ScheduleConfig::default())
            .with_options(&opts, limits);
        engine.place("A", 0, 0).unwrap();
        let err = engine.place("B", 0, 1).unwrap_err();
        assert!(matches!(
            err,
            TimetableError::Conflict {
                kind: ConflictKind::TeacherDayLimit,
                ..
            }
        ));
    }

    #[test]
    fn test_auto_place_strategies() {
        let cat = catalog();

        let mut greedy = Grid::new();
        let n = PlacementEngine::new(&cat, &mut greedy, ScheduleConfig::default()).auto_place();
        assert_eq!(n, 4);

        let mut bt = Grid::new();
        let opts = PlacementOptions::new().with_strategy(PlacementStrategy::backtracking());
        let n = PlacementEngine::new(&cat, &mut bt, ScheduleConfig::default())
            .with_options(&opts, Limits::default())
            .auto_place();
        assert_eq!(n, 4);
    }
}
