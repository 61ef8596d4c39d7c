//! Assignment grid.
//!
//! The grid is a sparse map from `(day, period, class)` to the lesson
//! placed there. Keying by class lets several classes share a slot while
//! each class holds at most one lesson per slot.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::entity::EntityId;
use super::lesson::LessonId;
use super::ScheduleConfig;

/// The unit of grid occupancy.
///
/// Persisted as the string `"{day}-{period}-{class_id}"`. The class id
/// may itself contain `-`; only the first two separators are significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridKey {
    pub day: u32,
    pub period: u32,
    pub class_id: EntityId,
}

impl GridKey {
    pub fn new(day: u32, period: u32, class_id: impl Into<String>) -> Self {
        Self {
            day,
            period,
            class_id: class_id.into(),
        }
    }

    /// Whether this key sits on the given slot.
    #[inline]
    pub fn is_at(&self, day: u32, period: u32) -> bool {
        self.day == day && self.period == period
    }

    /// Whether the slot lies inside the configured grid.
    #[inline]
    pub fn is_within(&self, config: &ScheduleConfig) -> bool {
        config.contains(self.day, self.period)
    }
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.day, self.period, self.class_id)
    }
}

/// Error parsing a [`GridKey`] from its string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGridKeyError(String);

impl fmt::Display for ParseGridKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed grid key '{}'", self.0)
    }
}

impl std::error::Error for ParseGridKeyError {}

impl FromStr for GridKey {
    type Err = ParseGridKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseGridKeyError(s.to_string());
        let mut parts = s.splitn(3, '-');
        let day = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        let period = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        let class_id = parts.next().filter(|c| !c.is_empty()).ok_or_else(bad)?;
        Ok(Self::new(day, period, class_id))
    }
}

impl Serialize for GridKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GridKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Current placement: grid key → lesson id.
///
/// Entries may reference lessons that no longer exist in the catalog;
/// consumers treat those as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: BTreeMap<GridKey, LessonId>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &GridKey) -> Option<&LessonId> {
        self.cells.get(key)
    }

    pub fn is_occupied(&self, key: &GridKey) -> bool {
        self.cells.contains_key(key)
    }

    /// Writes a lesson at `key`, returning whatever was there before.
    pub fn insert(&mut self, key: GridKey, lesson_id: impl Into<String>) -> Option<LessonId> {
        self.cells.insert(key, lesson_id.into())
    }

    pub fn remove(&mut self, key: &GridKey) -> Option<LessonId> {
        self.cells.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GridKey, &LessonId)> {
        self.cells.iter()
    }

    /// Entries on one `(day, period)` slot, across all classes.
    pub fn entries_at(&self, day: u32, period: u32) -> impl Iterator<Item = (&GridKey, &LessonId)> {
        self.cells.iter().filter(move |(k, _)| k.is_at(day, period))
    }

    /// Number of placed occurrences of a lesson.
    pub fn occurrences_of(&self, lesson_id: &str) -> usize {
        self.cells.values().filter(|id| id.as_str() == lesson_id).count()
    }

    /// Keys holding a given lesson.
    pub fn keys_of(&self, lesson_id: &str) -> Vec<&GridKey> {
        self.cells
            .iter()
            .filter(|(_, id)| id.as_str() == lesson_id)
            .map(|(k, _)| k)
            .collect()
    }

    /// Keys lying outside the configured dimensions.
    ///
    /// Shrinking the config never evicts these; they are merely reported.
    pub fn out_of_range(&self, config: &ScheduleConfig) -> Vec<&GridKey> {
        self.cells.keys().filter(|k| !k.is_within(config)).collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_grid_key_string_form() {
        let k = GridKey::new(2, 5, "abc");
        assert_eq!(k.to_string(), "2-5-abc");
        assert_eq!("2-5-abc".parse::<GridKey>().unwrap(), k);
    }

    #[test]
    fn test_grid_key_class_with_dash() {
        let k: GridKey = "0-1-class-7-a".parse().unwrap();
        assert_eq!(k.day, 0);
        assert_eq!(k.period, 1);
        assert_eq!(k.class_id, "class-7-a");
    }

    #[rstest]
    #[case("x-1-c")]
    #[case("1-y-c")]
    #[case("1-2")]
    #[case("1-2-")]
    #[case("-1-2-c")]
    #[case("")]
    fn test_grid_key_parse_errors(#[case] raw: &str) {
        assert!(raw.parse::<GridKey>().is_err());
    }

    #[test]
    fn test_grid_insert_overwrites_same_key() {
        let mut g = Grid::new();
        assert_eq!(g.insert(GridKey::new(0, 0, "7A"), "L1"), None);
        assert_eq!(
            g.insert(GridKey::new(0, 0, "7A"), "L1"),
            Some("L1".to_string())
        );
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn test_grid_entries_at_and_occurrences() {
        let mut g = Grid::new();
        g.insert(GridKey::new(0, 0, "7A"), "L1");
        g.insert(GridKey::new(0, 0, "7B"), "L2");
        g.insert(GridKey::new(0, 1, "7A"), "L1");

        assert_eq!(g.entries_at(0, 0).count(), 2);
        assert_eq!(g.entries_at(1, 0).count(), 0);
        assert_eq!(g.occurrences_of("L1"), 2);
        assert_eq!(g.keys_of("L2"), vec![&GridKey::new(0, 0, "7B")]);
    }

    #[test]
    fn test_grid_out_of_range() {
        let mut g = Grid::new();
        g.insert(GridKey::new(0, 0, "7A"), "L1");
        g.insert(GridKey::new(4, 6, "7A"), "L1");
        let small = ScheduleConfig::new(3, 7);
        assert_eq!(g.out_of_range(&small), vec![&GridKey::new(4, 6, "7A")]);
    }

    #[test]
    fn test_grid_serde_as_string_keyed_object() {
        let mut g = Grid::new();
        g.insert(GridKey::new(1, 2, "7A"), "L1");
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r#"{"1-2-7A":"L1"}"#);

        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn test_grid_deserialize_rejects_bad_key() {
        let res: Result<Grid, _> = serde_json::from_str(r#"{"a-b-c":"L1"}"#);
        assert!(res.is_err());
    }
}
