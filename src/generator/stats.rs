//! Generation summary statistics.
//!
//! Computed once after the grid walk, for operator inspection: how full
//! the week is, how the subjects spread across days, and how much load
//! each teacher carries.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total slots | `periods_per_day × working_days` |
//! | Filled slots | Assignments produced |
//! | Subjects scheduled | Distinct subjects placed |
//! | Utilization | `filled / total` as a percentage |
//! | Subject distribution | Per-subject per-day period counts |
//! | Teacher load | Periods per teacher (sentinel entries counted separately) |

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{TimeGrid, Timetable, Weekday};

/// Summary statistics for one generated timetable.
#[derive(Debug, Clone, Serialize)]
pub struct TimetableStats {
    /// Slots in the grid.
    pub total_slots: u32,
    /// Slots that received an assignment.
    pub filled_slots: u32,
    /// Distinct subjects placed at least once.
    pub subjects_scheduled: u32,
    /// `filled_slots / total_slots` as a percentage.
    pub utilization: f64,
    /// Per-subject per-day period counts, for load-balance inspection.
    pub subject_day_counts: HashMap<String, BTreeMap<Weekday, u32>>,
    /// Periods assigned per teacher.
    pub teacher_load: HashMap<String, u32>,
    /// Entries scheduled under the unassigned-teacher sentinel.
    pub unassigned_slots: u32,
}

impl TimetableStats {
    /// Computes statistics from a timetable and the grid it was built on.
    pub fn calculate(timetable: &Timetable, grid: &TimeGrid) -> Self {
        let total_slots = grid.capacity();
        let filled_slots = timetable.assignments.len() as u32;

        let mut subjects: HashSet<&str> = HashSet::new();
        let mut subject_day_counts: HashMap<String, BTreeMap<Weekday, u32>> = HashMap::new();
        let mut teacher_load: HashMap<String, u32> = HashMap::new();
        let mut unassigned_slots = 0;

        for assignment in &timetable.assignments {
            subjects.insert(&assignment.subject_id);
            *subject_day_counts
                .entry(assignment.subject_id.clone())
                .or_default()
                .entry(assignment.slot.day)
                .or_insert(0) += 1;

            match &assignment.teacher_id {
                Some(teacher_id) => {
                    *teacher_load.entry(teacher_id.clone()).or_insert(0) += 1;
                }
                None => unassigned_slots += 1,
            }
        }

        let utilization = if total_slots == 0 {
            0.0
        } else {
            filled_slots as f64 / total_slots as f64 * 100.0
        };

        Self {
            total_slots,
            filled_slots,
            subjects_scheduled: subjects.len() as u32,
            utilization,
            subject_day_counts,
            teacher_load,
            unassigned_slots,
        }
    }

    /// Periods a subject received on a given day.
    pub fn subject_count_on(&self, subject_id: &str, day: Weekday) -> u32 {
        self.subject_day_counts
            .get(subject_id)
            .and_then(|days| days.get(&day))
            .copied()
            .unwrap_or(0)
    }

    /// Total periods a subject received in the week.
    pub fn subject_total(&self, subject_id: &str) -> u32 {
        self.subject_day_counts
            .get(subject_id)
            .map(|days| days.values().sum())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Slot, Timetable};

    fn sample() -> (Timetable, TimeGrid) {
        let grid = TimeGrid::new(vec![Weekday::Monday, Weekday::Tuesday], 3); // 6 slots
        let mut t = Timetable::new("10A", None);
        t.add_assignment(
            Assignment::new("10A", Slot::new(Weekday::Monday, 1), "math").with_teacher("t-01"),
        );
        t.add_assignment(
            Assignment::new("10A", Slot::new(Weekday::Monday, 2), "eng").with_teacher("t-02"),
        );
        t.add_assignment(
            Assignment::new("10A", Slot::new(Weekday::Tuesday, 1), "math").with_teacher("t-01"),
        );
        t.add_assignment(Assignment::new("10A", Slot::new(Weekday::Tuesday, 2), "math"));
        t.add_conflict(Slot::new(Weekday::Tuesday, 3));
        t.add_conflict(Slot::new(Weekday::Monday, 3));
        (t, grid)
    }

    #[test]
    fn test_counts() {
        let (timetable, grid) = sample();
        let stats = TimetableStats::calculate(&timetable, &grid);

        assert_eq!(stats.total_slots, 6);
        assert_eq!(stats.filled_slots, 4);
        assert_eq!(stats.subjects_scheduled, 2);
        assert!((stats.utilization - 4.0 / 6.0 * 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_conflict_accounting() {
        // filled + conflicts == total
        let (timetable, grid) = sample();
        let stats = TimetableStats::calculate(&timetable, &grid);
        assert_eq!(
            stats.filled_slots + timetable.conflicts.len() as u32,
            stats.total_slots
        );
    }

    #[test]
    fn test_subject_distribution() {
        let (timetable, grid) = sample();
        let stats = TimetableStats::calculate(&timetable, &grid);

        assert_eq!(stats.subject_count_on("math", Weekday::Monday), 1);
        assert_eq!(stats.subject_count_on("math", Weekday::Tuesday), 2);
        assert_eq!(stats.subject_count_on("eng", Weekday::Tuesday), 0);
        assert_eq!(stats.subject_total("math"), 3);
        assert_eq!(stats.subject_total("absent"), 0);
    }

    #[test]
    fn test_teacher_load_and_sentinels() {
        let (timetable, grid) = sample();
        let stats = TimetableStats::calculate(&timetable, &grid);

        assert_eq!(stats.teacher_load["t-01"], 2);
        assert_eq!(stats.teacher_load["t-02"], 1);
        assert_eq!(stats.unassigned_slots, 1);
    }

    #[test]
    fn test_empty_timetable() {
        let grid = TimeGrid::default();
        let stats = TimetableStats::calculate(&Timetable::new("10A", None), &grid);
        assert_eq!(stats.filled_slots, 0);
        assert_eq!(stats.subjects_scheduled, 0);
        assert!((stats.utilization - 0.0).abs() < 1e-10);
    }
}
