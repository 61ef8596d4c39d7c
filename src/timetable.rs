//! Timetable controller and persisted state.
//!
//! [`TimetableState`] is the whole logical state: registries, lessons,
//! grid, dimensions and limits. It round-trips through a single JSON
//! document whose field names match the entities.
//!
//! [`Timetable`] owns the state and is the only thing that mutates it;
//! every change goes through the registry, catalog or placement APIs.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::commands::{AddLessonCommand, Command, CommandOutcome};
use crate::error::{TimetableError, TimetableResult};
use crate::models::{
    EntityId, Grid, GridKey, Lesson, LessonCatalog, LessonId, Limits, NamedEntity, Registry,
    RegistryKind, ScheduleConfig,
};
use crate::scheduler::{PlacementEngine, PlacementOptions, TimetableKpi};
use crate::validation::{dangling_references, validate_state};

/// The complete persisted timetable.
///
/// ```json
/// { "days": 5, "periods": 7,
///   "classes": [{"id": "...", "name": "7A"}], "teachers": [], "subjects": [], "rooms": [],
///   "limits": {"teacherDayMax": 7, "classDayMax": 7},
///   "lessons": [{"id": "...", "classId": "...", "subjectId": "...",
///                "teacherId": "...", "roomId": "...", "count": 2}],
///   "grid": {"0-0-<classId>": "<lessonId>"} }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableState {
    #[serde(flatten)]
    pub config: ScheduleConfig,
    pub classes: Registry,
    pub teachers: Registry,
    pub subjects: Registry,
    pub rooms: Registry,
    pub limits: Limits,
    pub lessons: LessonCatalog,
    pub grid: Grid,
}

impl TimetableState {
    /// The registry holding entities of `kind`.
    pub fn registry(&self, kind: RegistryKind) -> &Registry {
        match kind {
            RegistryKind::Class => &self.classes,
            RegistryKind::Teacher => &self.teachers,
            RegistryKind::Subject => &self.subjects,
            RegistryKind::Room => &self.rooms,
        }
    }

    pub fn registry_mut(&mut self, kind: RegistryKind) -> &mut Registry {
        match kind {
            RegistryKind::Class => &mut self.classes,
            RegistryKind::Teacher => &mut self.teachers,
            RegistryKind::Subject => &mut self.subjects,
            RegistryKind::Room => &mut self.rooms,
        }
    }
}

/// Owner of the timetable state.
///
/// # Example
///
/// ```
/// use u_timetable::{AddLessonCommand, RegistryKind, Timetable};
///
/// let mut tt = Timetable::new();
/// let class = tt.add_entity(RegistryKind::Class, "7A").unwrap();
/// let subject = tt.add_entity(RegistryKind::Subject, "Math").unwrap();
/// let teacher = tt.add_entity(RegistryKind::Teacher, "Ayse").unwrap();
/// let room = tt.add_entity(RegistryKind::Room, "201").unwrap();
///
/// let lesson = tt
///     .add_lesson(AddLessonCommand::new(class, subject, teacher, room, 3))
///     .unwrap();
/// assert_eq!(tt.auto_place(), 3);
/// assert_eq!(tt.grid().occurrences_of(&lesson), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    state: TimetableState,
    options: PlacementOptions,
}

impl Timetable {
    /// An empty 5 × 7 timetable with default limits and greedy placement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing state after validating it.
    pub fn from_state(state: TimetableState) -> TimetableResult<Self> {
        validate_state(&state).map_err(TimetableError::Validation)?;
        warn_dangling(&state);
        Ok(Self {
            state,
            options: PlacementOptions::default(),
        })
    }

    pub fn with_options(mut self, options: PlacementOptions) -> Self {
        self.options = options;
        self
    }

    /// Sample data: two classes, teachers, subjects, rooms and lessons.
    pub fn demo() -> Self {
        let mut tt = Self::new();
        let s = &mut tt.state;
        let c1 = s.classes.add("7A");
        let c2 = s.classes.add("7B");
        let t1 = s.teachers.add("Ayshan");
        let t2 = s.teachers.add("Rashad");
        let s1 = s.subjects.add("Mathematics");
        let s2 = s.subjects.add("Computer Science");
        let r1 = s.rooms.add("201");
        let r2 = s.rooms.add("LAB-1");
        s.lessons.create(c1, s1, t1, r1, 3);
        s.lessons.create(c2, s2, t2, r2, 2);
        info!("demo data seeded");
        tt
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> &TimetableState {
        &self.state
    }

    pub fn registry(&self, kind: RegistryKind) -> &Registry {
        self.state.registry(kind)
    }

    pub fn lessons(&self) -> &LessonCatalog {
        &self.state.lessons
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn config(&self) -> ScheduleConfig {
        self.state.config
    }

    pub fn limits(&self) -> Limits {
        self.state.limits
    }

    pub fn options(&self) -> &PlacementOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: PlacementOptions) {
        self.options = options;
    }

    /// Coverage and load metrics for the current grid.
    pub fn kpi(&self) -> TimetableKpi {
        TimetableKpi::calculate(&self.state.lessons, &self.state.grid, &self.state.config)
    }

    // ------------------------------------------------------------------
    // Registries and catalog
    // ------------------------------------------------------------------

    /// Adds a class, teacher, subject or room.
    ///
    /// # Errors
    /// `InvalidCommand` if the name is blank.
    pub fn add_entity(&mut self, kind: RegistryKind, name: &str) -> TimetableResult<EntityId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TimetableError::InvalidCommand(format!(
                "{kind} name must not be empty"
            )));
        }
        let id = self.state.registry_mut(kind).add(name);
        info!(%kind, %id, name, "entity added");
        Ok(id)
    }

    /// Removes an entity. Lessons and grid entries naming it are kept.
    pub fn remove_entity(&mut self, kind: RegistryKind, id: &str) -> Option<NamedEntity> {
        let removed = self.state.registry_mut(kind).remove(id);
        if removed.is_some() {
            info!(%kind, id, "entity removed");
        }
        removed
    }

    /// Creates a lesson after checking every registry is populated and
    /// every referenced entity exists. `count` is clamped to `1..=12`.
    pub fn add_lesson(&mut self, cmd: AddLessonCommand) -> TimetableResult<LessonId> {
        cmd.validate(&self.state)?;
        let id = self.state.lessons.create(
            cmd.class_id,
            cmd.subject_id,
            cmd.teacher_id,
            cmd.room_id,
            cmd.count,
        );
        info!(lesson = %id, "lesson added");
        Ok(id)
    }

    /// Removes a lesson definition. Its grid entries stay behind as orphans.
    pub fn remove_lesson(&mut self, id: &str) -> Option<Lesson> {
        let removed = self.state.lessons.remove(id);
        if removed.is_some() {
            info!(lesson = id, "lesson removed");
        }
        removed
    }

    // ------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------

    fn engine(&mut self) -> PlacementEngine<'_> {
        let state = &mut self.state;
        PlacementEngine::new(&state.lessons, &mut state.grid, state.config)
            .with_options(&self.options, state.limits)
    }

    fn check_range(&self, day: u32, period: u32) -> TimetableResult<()> {
        if self.state.config.contains(day, period) {
            Ok(())
        } else {
            Err(TimetableError::InvalidCommand(format!(
                "slot ({day}, {period}) outside {} days x {} periods",
                self.state.config.days, self.state.config.periods
            )))
        }
    }

    /// Places one occurrence of a lesson.
    pub fn place(&mut self, lesson_id: &str, day: u32, period: u32) -> TimetableResult<GridKey> {
        self.check_range(day, period)?;
        self.engine().place(lesson_id, day, period)
    }

    /// Moves the occurrence at `source` to another slot.
    pub fn move_lesson(
        &mut self,
        source: &GridKey,
        day: u32,
        period: u32,
    ) -> TimetableResult<GridKey> {
        self.check_range(day, period)?;
        self.engine().move_lesson(source, day, period)
    }

    /// Clears one grid slot.
    pub fn remove_slot(&mut self, key: &GridKey) -> Option<LessonId> {
        self.engine().remove(key)
    }

    /// Fills all remaining needs with the configured strategy.
    pub fn auto_place(&mut self) -> usize {
        self.engine().auto_place()
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Resizes the grid. Out-of-range entries are kept, not evicted.
    pub fn set_schedule_config(&mut self, days: u32, periods: u32) -> TimetableResult<()> {
        let config = ScheduleConfig::new(days, periods);
        if !config.is_valid() {
            return Err(TimetableError::InvalidCommand(format!(
                "grid must be at least 1 x 1, got {days} x {periods}"
            )));
        }
        self.state.config = config;
        let stranded = self.state.grid.out_of_range(&config).len();
        if stranded > 0 {
            warn!(stranded, "entries left outside resized grid");
        }
        info!(days, periods, "grid resized");
        Ok(())
    }

    pub fn set_limits(&mut self, teacher_day_max: u32, class_day_max: u32) -> TimetableResult<()> {
        if teacher_day_max == 0 || class_day_max == 0 {
            return Err(TimetableError::InvalidCommand(
                "daily limits must be >= 1".to_string(),
            ));
        }
        self.state.limits = Limits::new(teacher_day_max, class_day_max);
        info!(teacher_day_max, class_day_max, "limits updated");
        Ok(())
    }

    /// Empties registries, lessons and grid. Dimensions and limits stay.
    pub fn clear(&mut self) {
        for kind in RegistryKind::ALL {
            self.state.registry_mut(kind).clear();
        }
        self.state.lessons.clear();
        self.state.grid.clear();
        warn!("timetable cleared");
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Applies a typed command.
    pub fn dispatch(&mut self, command: Command) -> TimetableResult<CommandOutcome> {
        let outcome = match command {
            Command::AddEntity { kind, name } => {
                CommandOutcome::EntityAdded(self.add_entity(kind, &name)?)
            }
            Command::RemoveEntity { kind, id } => {
                self.remove_entity(kind, &id);
                CommandOutcome::Done
            }
            Command::AddLesson(cmd) => CommandOutcome::LessonAdded(self.add_lesson(cmd)?),
            Command::RemoveLesson { lesson_id } => {
                self.remove_lesson(&lesson_id);
                CommandOutcome::Done
            }
            Command::Place {
                lesson_id,
                day,
                period,
            } => CommandOutcome::Placed(self.place(&lesson_id, day, period)?),
            Command::Move { from, day, period } => {
                CommandOutcome::Placed(self.move_lesson(&from, day, period)?)
            }
            Command::RemoveSlot { key } => {
                self.remove_slot(&key);
                CommandOutcome::Done
            }
            Command::AutoPlace => CommandOutcome::AutoPlaced(self.auto_place()),
            Command::SetScheduleConfig { days, periods } => {
                self.set_schedule_config(days, periods)?;
                CommandOutcome::Done
            }
            Command::SetLimits {
                teacher_day_max,
                class_day_max,
            } => {
                self.set_limits(teacher_day_max, class_day_max)?;
                CommandOutcome::Done
            }
            Command::Clear => {
                self.clear();
                CommandOutcome::Done
            }
        };
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Serializes the full state as pretty-printed JSON.
    pub fn to_json(&self) -> TimetableResult<String> {
        Ok(serde_json::to_string_pretty(&self.state)?)
    }

    /// Parses and validates a state document without touching `self`.
    pub fn parse_state(json: &str) -> TimetableResult<TimetableState> {
        let state: TimetableState = serde_json::from_str(json)?;
        validate_state(&state).map_err(TimetableError::Validation)?;
        Ok(state)
    }

    /// Builds a timetable from a JSON document.
    pub fn from_json(json: &str) -> TimetableResult<Self> {
        let state = Self::parse_state(json)?;
        warn_dangling(&state);
        Ok(Self {
            state,
            options: PlacementOptions::default(),
        })
    }

    /// Replaces the whole state with a JSON document.
    ///
    /// All-or-nothing: on any parse or validation error the current
    /// state is left exactly as it was.
    pub fn load_json(&mut self, json: &str) -> TimetableResult<()> {
        let state = Self::parse_state(json)?;
        warn_dangling(&state);
        self.state = state;
        info!(
            lessons = self.state.lessons.len(),
            slots = self.state.grid.len(),
            "state loaded"
        );
        Ok(())
    }
}

fn warn_dangling(state: &TimetableState) {
    for issue in dangling_references(state) {
        warn!(issue = %issue.message, "dangling reference in loaded state");
    }
}
