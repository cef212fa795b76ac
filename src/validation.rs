//! Conflict validation for timetable entries.
//!
//! Two layers of checks run before anything is written:
//! - Entry conflict checks: a candidate assignment is tested against the
//!   stored assignments of the *whole institution* across three independent
//!   dimensions — class-slot, teacher-slot, room-slot. The same predicate
//!   set backs manual create/update and can seed a stricter generation mode.
//! - Catalog integrity checks: duplicate IDs and dangling teacher
//!   references, detected before any allocation work begins.
//!
//! Both return `Ok(())` or the complete list of detected issues; callers
//! display every violation at once rather than fixing them one by one.

use std::collections::HashSet;

use crate::catalog::ClassResources;
use crate::models::{Assignment, Slot};

/// Result of validating a candidate entry: accepted, or every violated dimension.
pub type EntryValidation = Result<(), Vec<EntryConflict>>;

/// A single violated uniqueness dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryConflict {
    /// Which dimension collided.
    pub kind: ConflictKind,
    /// Slot where the collision happens.
    pub slot: Slot,
    /// Class owning the colliding stored entry.
    pub colliding_class: String,
    /// Human-readable description.
    pub message: String,
}

/// The three independent uniqueness dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// The class already has an entry at this slot.
    ClassSlot,
    /// The teacher already teaches (any class) at this slot.
    TeacherSlot,
    /// The room is already occupied (by any class) at this slot.
    RoomSlot,
}

impl EntryConflict {
    fn new(kind: ConflictKind, slot: Slot, colliding_class: &str, message: String) -> Self {
        Self {
            kind,
            slot,
            colliding_class: colliding_class.to_string(),
            message,
        }
    }
}

/// Checks whether accepting `candidate` would double-book a class slot,
/// a teacher, or a room.
///
/// `existing` is the institution-wide set of stored assignments. For an
/// update, `replaces` names the candidate's prior slot within its own
/// class scope, so the entry being edited is excluded from its own check.
///
/// Sentinel entries are exempt from their dimension: an unassigned teacher
/// (`teacher_id: None`) collides with nobody, and the per-class fallback
/// room (`room_id: None`) is not a shared resource.
pub fn check_entry(
    candidate: &Assignment,
    existing: &[Assignment],
    replaces: Option<Slot>,
) -> EntryValidation {
    let mut conflicts = Vec::new();

    for entry in existing {
        // The entry being updated does not conflict with itself.
        let in_scope = entry.same_scope(&candidate.class_id, candidate.section.as_deref());
        if in_scope && replaces == Some(entry.slot) {
            continue;
        }

        if entry.slot != candidate.slot {
            continue;
        }

        if in_scope {
            conflicts.push(EntryConflict::new(
                ConflictKind::ClassSlot,
                candidate.slot,
                &entry.class_id,
                format!(
                    "class {} already has {} at {}",
                    entry.class_id, entry.subject_id, entry.slot
                ),
            ));
        }

        if candidate.teacher_id.is_some() && entry.teacher_id == candidate.teacher_id {
            conflicts.push(EntryConflict::new(
                ConflictKind::TeacherSlot,
                candidate.slot,
                &entry.class_id,
                format!(
                    "teacher {} already teaches class {} at {}",
                    entry.teacher_label(),
                    entry.class_id,
                    entry.slot
                ),
            ));
        }

        if candidate.room_id.is_some() && entry.room_id == candidate.room_id {
            conflicts.push(EntryConflict::new(
                ConflictKind::RoomSlot,
                candidate.slot,
                &entry.class_id,
                format!(
                    "room {} is already occupied by class {} at {}",
                    entry.room_label(),
                    entry.class_id,
                    entry.slot
                ),
            ));
        }
    }

    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(conflicts)
    }
}

/// A catalog integrity issue found before generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIssue {
    /// Issue category.
    pub kind: IssueKind,
    /// Related entity ID (subject, teacher, or room).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of catalog integrity issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Two subjects share the same ID.
    DuplicateSubjectId,
    /// Two teachers share the same ID.
    DuplicateTeacherId,
    /// Two rooms share the same ID.
    DuplicateRoomId,
    /// A subject lists a teacher the catalog does not know (or who is inactive).
    UnknownTeacherReference,
}

impl CatalogIssue {
    fn new(kind: IssueKind, entity_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

/// Validates the catalog bundle for one generation run.
///
/// Checks:
/// 1. No duplicate subject IDs
/// 2. No duplicate teacher IDs
/// 3. No duplicate room IDs
/// 4. All subject teacher references point to active teachers
///
/// Returns `Ok(())` if all checks pass, `Err(issues)` with all detected
/// issues. Unknown teacher references are survivable (the allocator falls
/// back to the unassigned sentinel); duplicate IDs are not, because quota
/// bookkeeping is keyed by ID.
pub fn validate_resources(resources: &ClassResources) -> Result<(), Vec<CatalogIssue>> {
    let mut issues = Vec::new();

    let mut subject_ids = HashSet::new();
    for subject in &resources.subjects {
        if !subject_ids.insert(subject.id.as_str()) {
            issues.push(CatalogIssue::new(
                IssueKind::DuplicateSubjectId,
                subject.id.as_str(),
                format!("duplicate subject ID: {}", subject.id),
            ));
        }
    }

    let mut teacher_ids = HashSet::new();
    for teacher in &resources.teachers {
        if !teacher_ids.insert(teacher.id.as_str()) {
            issues.push(CatalogIssue::new(
                IssueKind::DuplicateTeacherId,
                teacher.id.as_str(),
                format!("duplicate teacher ID: {}", teacher.id),
            ));
        }
    }

    let mut room_ids = HashSet::new();
    for room in &resources.rooms {
        if !room_ids.insert(room.id.as_str()) {
            issues.push(CatalogIssue::new(
                IssueKind::DuplicateRoomId,
                room.id.as_str(),
                format!("duplicate room ID: {}", room.id),
            ));
        }
    }

    for subject in &resources.subjects {
        for teacher_id in &subject.teacher_ids {
            if !teacher_ids.contains(teacher_id.as_str()) {
                issues.push(CatalogIssue::new(
                    IssueKind::UnknownTeacherReference,
                    teacher_id.as_str(),
                    format!(
                        "subject '{}' references unknown or inactive teacher '{}'",
                        subject.id, teacher_id
                    ),
                ));
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
