//! Automatic bulk placement.
//!
//! # Algorithms
//!
//! - [`GreedyPlacer`]: for each lesson in catalog order, walk the slots
//!   day-major and take every conflict-free slot until the lesson's
//!   remaining need reaches zero. Earlier lessons get first pick; skipped
//!   slots are never revisited.
//! - [`BacktrackingPlacer`]: depth-first search over the remaining
//!   occurrences with the same feasibility test, seeded with the greedy
//!   result and bounded by a node budget. The best assignment found is
//!   topped up with a greedy pass.
//!
//! # Complexity
//! Greedy: O(lessons × days × periods × grid size).
//! Backtracking: exponential in the worst case, capped by `max_steps`.

use tracing::{debug, info};

use crate::conflict::ConflictChecker;
use crate::models::{Grid, GridKey, Lesson, LessonCatalog, Limits, ScheduleConfig};

/// Read-only inputs shared by all placers.
#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    pub catalog: &'a LessonCatalog,
    pub config: ScheduleConfig,
    /// Limits to enforce, if enforcement is switched on.
    pub limits: Option<Limits>,
}

impl<'a> PlacementContext<'a> {
    pub fn new(catalog: &'a LessonCatalog, config: ScheduleConfig) -> Self {
        Self {
            catalog,
            config,
            limits: None,
        }
    }

    pub fn with_limits(mut self, limits: Option<Limits>) -> Self {
        self.limits = limits;
        self
    }

    /// A conflict checker over `grid` honoring the configured limits.
    pub fn checker<'g>(&self, grid: &'g Grid) -> ConflictChecker<'g>
    where
        'a: 'g,
    {
        let checker = ConflictChecker::new(self.catalog, grid);
        match self.limits {
            Some(limits) => checker.with_limits(limits),
            None => checker,
        }
    }

    /// Whether `lesson` can take `(day, period)`: no conflict and its
    /// own grid key is free.
    pub fn can_place(&self, grid: &Grid, lesson: &Lesson, day: u32, period: u32) -> bool {
        !self.checker(grid).conflict(day, period, lesson, None)
            && !grid.is_occupied(&GridKey::new(day, period, lesson.class_id.as_str()))
    }

    /// Occurrences still needed for a lesson.
    pub fn remaining_need(&self, grid: &Grid, lesson: &Lesson) -> usize {
        (lesson.count as usize).saturating_sub(grid.occurrences_of(&lesson.id))
    }
}

/// A bulk placement algorithm.
pub trait AutoPlacer {
    /// Algorithm name, used in logs.
    fn name(&self) -> &'static str;

    /// Fills remaining occurrences into `grid` and returns how many were placed.
    ///
    /// Existing entries are never moved or removed.
    fn place_all(&self, ctx: &PlacementContext<'_>, grid: &mut Grid) -> usize;
}

/// First-fit greedy placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPlacer;

impl AutoPlacer for GreedyPlacer {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn place_all(&self, ctx: &PlacementContext<'_>, grid: &mut Grid) -> usize {
        let mut placed = 0;

        for lesson in ctx.catalog.iter() {
            let mut need = ctx.remaining_need(grid, lesson);
            if need == 0 {
                continue;
            }

            for (day, period) in ctx.config.slots() {
                if need == 0 {
                    break;
                }
                if ctx.can_place(grid, lesson, day, period) {
                    let key = GridKey::new(day, period, lesson.class_id.as_str());
                    grid.insert(key, lesson.id.as_str());
                    placed += 1;
                    need -= 1;
                }
            }

            if need > 0 {
                debug!(lesson = %lesson.id, unplaced = need, "greedy left lesson under-placed");
            }
        }

        info!(placer = self.name(), placed, "auto-place finished");
        placed
    }
}

/// Budgeted depth-first search.
///
/// Never places fewer occurrences than [`GreedyPlacer`] on the same input.
#[derive(Debug, Clone, Copy)]
pub struct BacktrackingPlacer {
    max_steps: usize,
}

impl BacktrackingPlacer {
    /// Creates a search expanding at most `max_steps` nodes.
    pub fn new(max_steps: usize) -> Self {
        Self { max_steps }
    }
}

impl AutoPlacer for BacktrackingPlacer {
    fn name(&self) -> &'static str {
        "backtracking"
    }

    fn place_all(&self, ctx: &PlacementContext<'_>, grid: &mut Grid) -> usize {
        // One entry per missing occurrence, in catalog order.
        let occurrences: Vec<&Lesson> = ctx
            .catalog
            .iter()
            .flat_map(|l| std::iter::repeat(l).take(ctx.remaining_need(grid, l)))
            .collect();
        if occurrences.is_empty() {
            return 0;
        }

        let mut greedy_grid = grid.clone();
        let greedy_count = GreedyPlacer.place_all(ctx, &mut greedy_grid);

        let mut search = Search {
            ctx,
            occurrences: &occurrences,
            slots: ctx.config.slots().collect(),
            grid: grid.clone(),
            chosen: vec![None; occurrences.len()],
            best_grid: greedy_grid,
            best_count: greedy_count,
            steps: 0,
            max_steps: self.max_steps,
        };
        search.dfs(0, 0);

        // A budget cut can leave placeable occurrences behind; top up.
        let mut best = search.best_grid;
        let placed = search.best_count + GreedyPlacer.place_all(ctx, &mut best);

        info!(
            placer = self.name(),
            placed,
            greedy = greedy_count,
            steps = search.steps,
            "auto-place finished"
        );
        *grid = best;
        placed
    }
}

struct Search<'c, 'o> {
    ctx: &'c PlacementContext<'c>,
    occurrences: &'o [&'c Lesson],
    slots: Vec<(u32, u32)>,
    grid: Grid,
    /// Slot index chosen per occurrence; `None` = left unplaced.
    chosen: Vec<Option<usize>>,
    best_grid: Grid,
    best_count: usize,
    steps: usize,
    max_steps: usize,
}

impl Search<'_, '_> {
    /// Returns `true` when the search should stop.
    fn dfs(&mut self, i: usize, count: usize) -> bool {
        if count > self.best_count {
            self.best_count = count;
            self.best_grid = self.grid.clone();
        }
        let total = self.occurrences.len();
        if self.best_count == total {
            return true;
        }
        if i == total || count + (total - i) <= self.best_count {
            return false;
        }
        if self.steps >= self.max_steps {
            return true;
        }
        self.steps += 1;

        let lesson = self.occurrences[i];

        // Occurrences of one lesson are interchangeable: place them in
        // increasing slot order and only skip from the tail.
        let prev_same = i > 0 && self.occurrences[i - 1].id == lesson.id;
        let start = match (prev_same, self.chosen.get(i.wrapping_sub(1)).copied().flatten()) {
            (true, Some(prev)) => Some(prev + 1),
            (true, None) => None,
            (false, _) => Some(0),
        };

        if let Some(start) = start {
            for idx in start..self.slots.len() {
                let (day, period) = self.slots[idx];
                if !self.ctx.can_place(&self.grid, lesson, day, period) {
                    continue;
                }
                let key = GridKey::new(day, period, lesson.class_id.as_str());
                self.grid.insert(key.clone(), lesson.id.as_str());
                self.chosen[i] = Some(idx);

                if self.dfs(i + 1, count + 1) {
                    return true;
                }

                self.grid.remove(&key);
                self.chosen[i] = None;
            }
        }

        self.dfs(i + 1, count)
    }
}
