//! Timetable (solution) model.
//!
//! A timetable is the set of assignments produced for one class (and
//! optional section), plus any slots the allocator could not fill. Unfilled
//! slots are reported as data, never raised as errors, so a partially
//! usable schedule always reaches the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::grid::{Slot, Weekday};

/// Display label for entries without a concrete teacher.
pub const UNASSIGNED_TEACHER: &str = "TBA";

/// A subject placed at one slot for one class.
///
/// `teacher_id: None` means no eligible teacher was free — the entry is
/// still scheduled under the "unassigned" sentinel. `room_id: None` means
/// the class falls back to its generic shared room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Owning class identifier.
    pub class_id: String,
    /// Optional sub-section within the class.
    pub section: Option<String>,
    /// Grid coordinate this entry occupies.
    pub slot: Slot,
    /// Scheduled subject.
    pub subject_id: String,
    /// Assigned teacher, or `None` for the unassigned sentinel.
    pub teacher_id: Option<String>,
    /// Assigned room, or `None` for the per-class fallback.
    pub room_id: Option<String>,
    /// Period start, minutes since midnight.
    pub start_min: u32,
    /// Period end, minutes since midnight.
    pub end_min: u32,
}

impl Assignment {
    /// Creates an assignment with sentinel teacher and fallback room.
    pub fn new(class_id: impl Into<String>, slot: Slot, subject_id: impl Into<String>) -> Self {
        Self {
            class_id: class_id.into(),
            section: None,
            slot,
            subject_id: subject_id.into(),
            teacher_id: None,
            room_id: None,
            start_min: 0,
            end_min: 0,
        }
    }

    /// Sets the section.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Sets the teacher.
    pub fn with_teacher(mut self, teacher_id: impl Into<String>) -> Self {
        self.teacher_id = Some(teacher_id.into());
        self
    }

    /// Sets the room.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    /// Sets the wall-clock window (minutes since midnight).
    pub fn with_times(mut self, start_min: u32, end_min: u32) -> Self {
        self.start_min = start_min;
        self.end_min = end_min;
        self
    }

    /// Teacher label for display ("TBA" when unassigned).
    pub fn teacher_label(&self) -> &str {
        self.teacher_id.as_deref().unwrap_or(UNASSIGNED_TEACHER)
    }

    /// Room label for display (per-class fallback when no room was free).
    pub fn room_label(&self) -> String {
        match &self.room_id {
            Some(id) => id.clone(),
            None => format!("{} shared room", self.class_id),
        }
    }

    /// Whether this entry occupies the same scope (class + section).
    pub fn same_scope(&self, class_id: &str, section: Option<&str>) -> bool {
        self.class_id == class_id && self.section.as_deref() == section
    }
}

/// A slot the allocator could not fill: every subject's quota was exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnfilledSlot {
    /// The empty grid coordinate.
    pub slot: Slot,
}

impl fmt::Display for UnfilledSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no subject with remaining quota for {}", self.slot)
    }
}

/// A generated or edited weekly timetable for one class scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timetable {
    /// Owning class identifier.
    pub class_id: String,
    /// Optional sub-section.
    pub section: Option<String>,
    /// Slot assignments, in allocation order.
    pub assignments: Vec<Assignment>,
    /// Slots that could not be filled.
    pub conflicts: Vec<UnfilledSlot>,
}

impl Timetable {
    /// Creates an empty timetable for a class scope.
    pub fn new(class_id: impl Into<String>, section: Option<String>) -> Self {
        Self {
            class_id: class_id.into(),
            section,
            assignments: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Records an unfilled slot.
    pub fn add_conflict(&mut self, slot: Slot) {
        self.conflicts.push(UnfilledSlot { slot });
    }

    /// Whether every slot the allocator visited was filled.
    pub fn is_complete(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Number of filled slots.
    pub fn filled_count(&self) -> usize {
        self.assignments.len()
    }

    /// Finds the assignment at a slot, if any.
    pub fn assignment_at(&self, slot: Slot) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.slot == slot)
    }

    /// All assignments of a subject.
    pub fn assignments_for_subject(&self, subject_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.subject_id == subject_id)
            .collect()
    }

    /// All assignments of a teacher (sentinel entries excluded).
    pub fn assignments_for_teacher(&self, teacher_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.teacher_id.as_deref() == Some(teacher_id))
            .collect()
    }

    /// All assignments on a given day, in period order.
    pub fn assignments_for_day(&self, day: Weekday) -> Vec<&Assignment> {
        let mut entries: Vec<&Assignment> = self
            .assignments
            .iter()
            .filter(|a| a.slot.day == day)
            .collect();
        entries.sort_by_key(|a| a.slot.period);
        entries
    }
}
