//! Timetable quality metrics (KPIs).
//!
//! Summarizes how completely the catalog's weekly needs are covered and
//! how the load is spread over days.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Required | Sum of lesson counts |
//! | Placed | Grid entries referencing a live lesson |
//! | Fill Rate | Σ min(placed, count) / required |
//! | Under-placed | Lessons with `count − placed > 0` |
//! | Day Load | Lessons per (teacher, day) and per (class, day) |

use std::collections::HashMap;

use crate::models::{EntityId, Grid, LessonCatalog, LessonId, Limits, ScheduleConfig};

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Total weekly occurrences required by the catalog.
    pub required: u32,
    /// Grid entries that resolve to an existing lesson.
    pub placed: usize,
    /// Fraction of required occurrences covered (0.0..1.0).
    pub fill_rate: f64,
    /// Lessons still missing occurrences, in catalog order, with the shortfall.
    pub under_placed: Vec<(LessonId, u32)>,
    /// Grid entries whose lesson no longer exists.
    pub orphaned: usize,
    /// Grid entries outside the current dimensions.
    pub out_of_range: usize,
    /// Lessons per (teacher, day).
    pub teacher_day_load: HashMap<(EntityId, u32), u32>,
    /// Lessons per (class, day).
    pub class_day_load: HashMap<(EntityId, u32), u32>,
}

impl TimetableKpi {
    /// Computes KPIs for a grid against its catalog.
    pub fn calculate(catalog: &LessonCatalog, grid: &Grid, config: &ScheduleConfig) -> Self {
        let mut placed = 0;
        let mut orphaned = 0;
        let mut per_lesson: HashMap<&str, u32> = HashMap::new();
        let mut teacher_day_load: HashMap<(EntityId, u32), u32> = HashMap::new();
        let mut class_day_load: HashMap<(EntityId, u32), u32> = HashMap::new();

        for (key, lesson_id) in grid.iter() {
            let Some(lesson) = catalog.get(lesson_id) else {
                orphaned += 1;
                continue;
            };
            placed += 1;
            *per_lesson.entry(lesson.id.as_str()).or_insert(0) += 1;
            *teacher_day_load
                .entry((lesson.teacher_id.clone(), key.day))
                .or_insert(0) += 1;
            *class_day_load
                .entry((key.class_id.clone(), key.day))
                .or_insert(0) += 1;
        }

        let required = catalog.total_required();
        let mut covered: u32 = 0;
        let mut under_placed = Vec::new();
        for lesson in catalog.iter() {
            let have = per_lesson.get(lesson.id.as_str()).copied().unwrap_or(0);
            covered += have.min(lesson.count);
            if have < lesson.count {
                under_placed.push((lesson.id.clone(), lesson.count - have));
            }
        }

        let fill_rate = if required == 0 {
            1.0
        } else {
            covered as f64 / required as f64
        };

        Self {
            required,
            placed,
            fill_rate,
            under_placed,
            orphaned,
            out_of_range: grid.out_of_range(config).len(),
            teacher_day_load,
            class_day_load,
        }
    }

    /// Whether every lesson has all its required occurrences.
    pub fn is_complete(&self) -> bool {
        self.under_placed.is_empty()
    }

    /// Whether no teacher or class exceeds the given daily maxima.
    pub fn meets_limits(&self, limits: &Limits) -> bool {
        self.teacher_day_load
            .values()
            .all(|&n| n <= limits.teacher_day_max)
            && self
                .class_day_load
                .values()
                .all(|&n| n <= limits.class_day_max)
    }
}
