//! Lesson model.
//!
//! A lesson is a card that binds one class, subject, teacher and room
//! together with the number of weekly occurrences it needs.

use serde::{Deserialize, Serialize};

use super::entity::{generate_id, EntityId};

/// Identifier of a lesson.
pub type LessonId = String;

/// Smallest accepted weekly count.
pub const MIN_COUNT: u32 = 1;
/// Largest accepted weekly count.
pub const MAX_COUNT: u32 = 12;

/// A lesson definition.
///
/// Referenced entity ids are not re-validated after creation; a lesson
/// may outlive the teacher or room it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Unique lesson identifier.
    pub id: LessonId,
    pub class_id: EntityId,
    pub subject_id: EntityId,
    pub teacher_id: EntityId,
    pub room_id: EntityId,
    /// Required weekly occurrences, in `[MIN_COUNT, MAX_COUNT]`.
    pub count: u32,
}

impl Lesson {
    /// Creates a lesson with an explicit id. `count` is clamped.
    pub fn new(
        id: impl Into<String>,
        class_id: impl Into<String>,
        subject_id: impl Into<String>,
        teacher_id: impl Into<String>,
        room_id: impl Into<String>,
        count: u32,
    ) -> Self {
        Self {
            id: id.into(),
            class_id: class_id.into(),
            subject_id: subject_id.into(),
            teacher_id: teacher_id.into(),
            room_id: room_id.into(),
            count: clamp_count(count),
        }
    }

    /// Whether two lessons compete for the same class, teacher or room.
    pub fn shares_resource_with(&self, other: &Lesson) -> bool {
        self.class_id == other.class_id
            || self.teacher_id == other.teacher_id
            || self.room_id == other.room_id
    }
}

/// Clamps a weekly count into the accepted range.
#[inline]
pub fn clamp_count(count: u32) -> u32 {
    count.clamp(MIN_COUNT, MAX_COUNT)
}

/// Insertion-ordered lesson definitions.
///
/// Catalog order is the priority order used by automatic placement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
}

impl LessonCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a lesson under a fresh id and returns the id.
    ///
    /// Performs no referential validation; callers check that the
    /// referenced entities exist.
    pub fn create(
        &mut self,
        class_id: impl Into<String>,
        subject_id: impl Into<String>,
        teacher_id: impl Into<String>,
        room_id: impl Into<String>,
        count: u32,
    ) -> LessonId {
        let mut id = generate_id();
        while self.get(&id).is_some() {
            id = generate_id();
        }
        self.lessons.push(Lesson::new(
            id.clone(),
            class_id,
            subject_id,
            teacher_id,
            room_id,
            count,
        ));
        id
    }

    /// Appends a fully formed lesson. Returns `false` if the id is taken.
    pub fn insert(&mut self, lesson: Lesson) -> bool {
        if self.get(&lesson.id).is_some() {
            return false;
        }
        self.lessons.push(lesson);
        true
    }

    /// Removes a lesson definition. Grid entries pointing at it stay behind.
    pub fn remove(&mut self, id: &str) -> Option<Lesson> {
        let pos = self.lessons.iter().position(|l| l.id == id)?;
        Some(self.lessons.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }

    /// Lessons in catalog order.
    pub fn list(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lesson> {
        self.lessons.iter()
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn clear(&mut self) {
        self.lessons.clear();
    }

    /// Sum of required weekly occurrences across all lessons.
    pub fn total_required(&self) -> u32 {
        self.lessons.iter().map(|l| l.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_clamped() {
        assert_eq!(Lesson::new("L", "c", "s", "t", "r", 0).count, 1);
        assert_eq!(Lesson::new("L", "c", "s", "t", "r", 13).count, 12);
        assert_eq!(Lesson::new("L", "c", "s", "t", "r", 5).count, 5);
    }

    #[test]
    fn test_catalog_create_keeps_order() {
        let mut cat = LessonCatalog::new();
        let a = cat.create("7A", "math", "T1", "R1", 2);
        let b = cat.create("7B", "cs", "T2", "R2", 40);

        let ids: Vec<&str> = cat.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec![a.as_str(), b.as_str()]);
        assert_eq!(cat.get(&b).unwrap().count, 12);
        assert_eq!(cat.total_required(), 14);
    }

    #[test]
    fn test_catalog_remove() {
        let mut cat = LessonCatalog::new();
        let a = cat.create("7A", "math", "T1", "R1", 2);
        assert!(cat.remove(&a).is_some());
        assert!(cat.remove(&a).is_none());
        assert!(cat.is_empty());
    }

    #[test]
    fn test_shares_resource_with() {
        let a = Lesson::new("A", "7A", "math", "T1", "R1", 1);
        let same_teacher = Lesson::new("B", "7B", "cs", "T1", "R2", 1);
        let disjoint = Lesson::new("C", "7B", "cs", "T2", "R2", 1);
        assert!(a.shares_resource_with(&same_teacher));
        assert!(!a.shares_resource_with(&disjoint));
    }

    #[test]
    fn test_lesson_serde_camel_case() {
        let l = Lesson::new("L1", "c1", "s1", "t1", "r1", 3);
        let json = serde_json::to_value(&l).unwrap();
        assert_eq!(json["classId"], "c1");
        assert_eq!(json["teacherId"], "t1");
        assert_eq!(json["count"], 3);
    }
}
