//! Timetabling domain models.
//!
//! Core data types for class timetable generation: what is scheduled
//! (subjects), who and where (teachers, rooms), the weekly grid shape
//! (days × periods), and the resulting timetable entries.
//!
//! Subjects, teachers, and rooms are read-only inputs owned by external
//! administration modules; the engine produces only [`Assignment`]s.

mod faculty;
mod grid;
mod subject;
mod timetable;

pub use faculty::{Room, Teacher};
pub use grid::{format_minutes, Slot, TimeGrid, Weekday};
pub use subject::Subject;
pub use timetable::{Assignment, Timetable, UnfilledSlot, UNASSIGNED_TEACHER};
