//! Named entities and their registries.
//!
//! Classes, teachers, subjects and rooms share one shape: an immutable
//! identifier plus a display name. Each kind lives in its own
//! insertion-ordered [`Registry`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a registry entity.
pub type EntityId = String;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 7;

/// Generates a random 7-character base-36 identifier.
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// A class, teacher, subject or room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    /// Unique identifier within its registry.
    pub id: EntityId,
    /// Display name. Not required to be unique.
    pub name: String,
}

impl NamedEntity {
    /// Creates an entity with an explicit identifier.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The four registry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistryKind {
    Class,
    Teacher,
    Subject,
    Room,
}

impl RegistryKind {
    /// All kinds, in document order.
    pub const ALL: [RegistryKind; 4] = [
        RegistryKind::Class,
        RegistryKind::Teacher,
        RegistryKind::Subject,
        RegistryKind::Room,
    ];

    /// Label shown when an entity of this kind cannot be resolved.
    pub fn placeholder(self) -> &'static str {
        match self {
            RegistryKind::Class => "Class?",
            RegistryKind::Teacher => "Teacher?",
            RegistryKind::Subject => "Subject?",
            RegistryKind::Room => "Room?",
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RegistryKind::Class => "class",
            RegistryKind::Teacher => "teacher",
            RegistryKind::Subject => "subject",
            RegistryKind::Room => "room",
        };
        f.write_str(s)
    }
}

/// Insertion-ordered collection of named entities.
///
/// Serializes as a plain JSON array of `{id, name}` objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    entries: Vec<NamedEntity>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity under a freshly generated identifier and returns it.
    pub fn add(&mut self, name: impl Into<String>) -> EntityId {
        let mut id = generate_id();
        while self.contains(&id) {
            id = generate_id();
        }
        self.entries.push(NamedEntity::new(id.clone(), name));
        id
    }

    /// Inserts an entity with a caller-chosen identifier.
    ///
    /// Returns `false` (and leaves the registry unchanged) if the id is taken.
    pub fn insert(&mut self, entity: NamedEntity) -> bool {
        if self.contains(&entity.id) {
            return false;
        }
        self.entries.push(entity);
        true
    }

    /// Removes an entity. Unknown ids are ignored.
    ///
    /// Lessons referencing the entity are left in place.
    pub fn remove(&mut self, id: &str) -> Option<NamedEntity> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos))
    }

    /// Entities in insertion order.
    pub fn list(&self) -> &[NamedEntity] {
        &self.entries
    }

    /// Looks up an entity by id.
    pub fn get(&self, id: &str) -> Option<&NamedEntity> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Display name for an id, if the entity still exists.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.get(id).map(|e| e.name.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entity.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        assert_eq!(id.len(), 7);
        assert!(id
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
    }

    #[test]
    fn test_registry_add_and_list_in_order() {
        let mut reg = Registry::new();
        let a = reg.add("7A");
        let b = reg.add("7B");
        let c = reg.add("7A"); // duplicate names are allowed

        let names: Vec<&str> = reg.list().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["7A", "7B", "7A"]);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(reg.name_of(&b), Some("7B"));
    }

    #[test]
    fn test_registry_remove() {
        let mut reg = Registry::new();
        let a = reg.add("Math");
        reg.add("Physics");

        let removed = reg.remove(&a).unwrap();
        assert_eq!(removed.name, "Math");
        assert_eq!(reg.len(), 1);
        assert!(!reg.contains(&a));
    }

    #[test]
    fn test_registry_remove_unknown_is_noop() {
        let mut reg = Registry::new();
        reg.add("201");
        assert!(reg.remove("nope").is_none());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_registry_insert_rejects_duplicate_id() {
        let mut reg = Registry::new();
        assert!(reg.insert(NamedEntity::new("t1", "Ayse")));
        assert!(!reg.insert(NamedEntity::new("t1", "Rashad")));
        assert_eq!(reg.name_of("t1"), Some("Ayse"));
    }

    #[test]
    fn test_registry_serializes_as_array() {
        let mut reg = Registry::new();
        reg.insert(NamedEntity::new("r1", "LAB-1"));
        let json = serde_json::to_string(&reg).unwrap();
        assert_eq!(json, r#"[{"id":"r1","name":"LAB-1"}]"#);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(RegistryKind::Teacher.placeholder(), "Teacher?");
        assert_eq!(RegistryKind::Room.to_string(), "room");
    }
}
