//! Resource catalog access.
//!
//! The engine reads its inputs — subjects for a class, active teachers,
//! available rooms — from an external record store behind the
//! [`ResourceCatalog`] trait. [`ClassResources`] is the reshaped bundle
//! the generator consumes: one catalog round-trip, then pure in-memory
//! lookups for the rest of the run.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::error::EngineError;
use crate::models::{Room, Subject, Teacher};

/// Errors from the catalog backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backing record store failed.
    #[error("catalog backend error: {0}")]
    Backend(String),
}

/// Read access to subjects, teachers, and rooms.
///
/// Implementations are expected to pre-filter: `active_teachers` returns
/// only active teachers, `available_rooms` only schedulable rooms.
pub trait ResourceCatalog {
    /// Subjects registered for a class.
    fn subjects_for_class(&self, class_id: &str) -> Result<Vec<Subject>, CatalogError>;

    /// Currently active teachers.
    fn active_teachers(&self) -> Result<Vec<Teacher>, CatalogError>;

    /// Currently available rooms.
    fn available_rooms(&self) -> Result<Vec<Room>, CatalogError>;
}

/// The input bundle for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassResources {
    /// Class the bundle was loaded for.
    pub class_id: String,
    /// Subjects of the class.
    pub subjects: Vec<Subject>,
    /// Active teachers across the institution.
    pub teachers: Vec<Teacher>,
    /// Available rooms across the institution.
    pub rooms: Vec<Room>,
}

impl ClassResources {
    /// Loads the bundle for a class from a catalog.
    pub fn load(
        catalog: &impl ResourceCatalog,
        class_id: &str,
    ) -> Result<Self, EngineError> {
        let subjects = catalog.subjects_for_class(class_id)?;
        let teachers = catalog.active_teachers()?;
        let rooms = catalog.available_rooms()?;
        debug!(
            "loaded resources for class {}: {} subjects, {} teachers, {} rooms",
            class_id,
            subjects.len(),
            teachers.len(),
            rooms.len()
        );
        Ok(Self {
            class_id: class_id.to_string(),
            subjects,
            teachers,
            rooms,
        })
    }

    /// IDs of active teachers, for eligibility intersection.
    pub fn teacher_ids(&self) -> HashSet<&str> {
        self.teachers.iter().map(|t| t.id.as_str()).collect()
    }

    /// Looks up a subject by id.
    pub fn subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == subject_id)
    }

    /// Looks up a teacher by id.
    pub fn teacher(&self, teacher_id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == teacher_id)
    }

    /// Looks up a room by id.
    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }
}

/// In-memory catalog, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    subjects: Vec<Subject>,
    teachers: Vec<Teacher>,
    rooms: Vec<Room>,
}

impl StaticCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }
}

impl ResourceCatalog for StaticCatalog {
    fn subjects_for_class(&self, class_id: &str) -> Result<Vec<Subject>, CatalogError> {
        Ok(self
            .subjects
            .iter()
            .filter(|s| s.class_id == class_id)
            .cloned()
            .collect())
    }

    fn active_teachers(&self) -> Result<Vec<Teacher>, CatalogError> {
        Ok(self.teachers.iter().filter(|t| t.active).cloned().collect())
    }

    fn available_rooms(&self) -> Result<Vec<Room>, CatalogError> {
        Ok(self.rooms.iter().filter(|r| r.available).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> StaticCatalog {
        StaticCatalog::new()
            .with_subject(Subject::new("math", "10A").with_teacher("t-01"))
            .with_subject(Subject::new("eng", "10A").with_teacher("t-02"))
            .with_subject(Subject::new("bio", "11B").with_teacher("t-01"))
            .with_teacher(Teacher::new("t-01"))
            .with_teacher(Teacher::new("t-02").inactive())
            .with_room(Room::new("r-101"))
            .with_room(Room::new("r-102").unavailable())
    }

    #[test]
    fn test_subjects_scoped_by_class() {
        let catalog = sample_catalog();
        let subjects = catalog.subjects_for_class("10A").unwrap();
        assert_eq!(subjects.len(), 2);
        assert!(catalog.subjects_for_class("12C").unwrap().is_empty());
    }

    #[test]
    fn test_inactive_and_unavailable_filtered() {
        let catalog = sample_catalog();
        let teachers = catalog.active_teachers().unwrap();
        assert_eq!(teachers.len(), 1);
        assert_eq!(teachers[0].id, "t-01");

        let rooms = catalog.available_rooms().unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, "r-101");
    }

    #[test]
    fn test_class_resources_load() {
        let catalog = sample_catalog();
        let resources = ClassResources::load(&catalog, "10A").unwrap();

        assert_eq!(resources.class_id, "10A");
        assert_eq!(resources.subjects.len(), 2);
        assert_eq!(resources.teachers.len(), 1);
        assert_eq!(resources.rooms.len(), 1);

        // Eligibility intersection only sees active teachers
        let ids = resources.teacher_ids();
        assert!(ids.contains("t-01"));
        assert!(!ids.contains("t-02"));
    }

    #[test]
    fn test_lookups() {
        let catalog = sample_catalog();
        let resources = ClassResources::load(&catalog, "10A").unwrap();

        assert!(resources.subject("math").is_some());
        assert!(resources.subject("bio").is_none()); // other class
        assert!(resources.teacher("t-01").is_some());
        assert!(resources.room("r-101").is_some());
        assert!(resources.room("r-102").is_none()); // unavailable
    }
}
