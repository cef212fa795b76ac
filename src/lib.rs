//! Class timetable generation and conflict validation.
//!
//! Assigns subjects to a weekly grid of day/period slots for a class,
//! subject to per-subject weekly quotas, teacher availability, room
//! availability, and an adjacency preference (no identical subject in
//! back-to-back periods), then reconciles manual edits against the same
//! constraints. Generation is a bounded randomized greedy walk — not an
//! optimal solver — that always returns a usable schedule and reports
//! unfilled slots as data.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Subject`, `Teacher`, `Room`, `TimeGrid`,
//!   `Slot`, `Assignment`, `Timetable`
//! - **`catalog`**: Read access to subjects/teachers/rooms (`ResourceCatalog`)
//! - **`quota`**: Weekly-target → per-week period count planning
//! - **`generator`**: The greedy slot allocator, request/result types, stats
//! - **`validation`**: Entry conflict checks (class/teacher/room dimensions)
//!   and catalog integrity checks
//! - **`persistence`**: Replace-all persistence over an `AssignmentStore`
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod catalog;
pub mod error;
pub mod generator;
pub mod models;
pub mod persistence;
pub mod quota;
pub mod validation;
