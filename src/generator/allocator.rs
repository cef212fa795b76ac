//! Greedy slot allocation.
//!
//! Walks the grid day-by-day, period-by-period, committing one subject,
//! teacher, and room per slot.
//!
//! # Algorithm
//!
//! 1. Build per-subject remaining-quota counters and empty teacher/room
//!    occupancy sets (or seed them from stored assignments for strict
//!    cross-class safety).
//! 2. At each slot, collect subjects with remaining quota, excluding the
//!    subject of the immediately preceding period of the same day. If that
//!    leaves nothing, relax the adjacency rule — a repeat beats an empty
//!    slot.
//! 3. Shuffle the candidates and commit the first one: first eligible
//!    teacher free at this slot (else the unassigned sentinel), first room
//!    free at this slot (else the per-class fallback).
//! 4. If every quota is exhausted, record the slot as unfilled and move on.
//!
//! Randomized greedy with relaxation trades optimality for simplicity: the
//! grids involved are small (≤48 slots/week), and residual conflicts are
//! reported to a human operator rather than eliminated by search.
//!
//! # Complexity
//! O(days × periods × subjects), a handful of set lookups per slot.
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling"

use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};

use crate::catalog::ClassResources;
use crate::models::{Assignment, Room, Slot, Subject, TimeGrid, Timetable};

/// Greedy allocator for one class timetable.
///
/// Occupancy state is scoped to the allocator instance and rebuilt per
/// run — create a fresh allocator for each generation request. By default
/// occupancy only tracks this run's own assignments; call
/// [`seed_occupancy`](Self::seed_occupancy) with stored assignments first
/// when strict cross-class safety is required.
#[derive(Debug)]
pub struct SlotAllocator {
    rng: SmallRng,
    teacher_busy: HashMap<String, HashSet<Slot>>,
    room_busy: HashMap<String, HashSet<Slot>>,
}

impl SlotAllocator {
    /// Creates an allocator with OS-entropy candidate ordering.
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_os_rng())
    }

    /// Creates an allocator with a fixed shuffle seed, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            teacher_busy: HashMap::new(),
            room_busy: HashMap::new(),
        }
    }

    /// Marks teachers and rooms of already-stored assignments as occupied,
    /// so this run will not double-book them across classes.
    pub fn seed_occupancy<'a>(&mut self, existing: impl IntoIterator<Item = &'a Assignment>) {
        let mut seeded = 0usize;
        for entry in existing {
            if let Some(teacher_id) = &entry.teacher_id {
                self.teacher_busy
                    .entry(teacher_id.clone())
                    .or_default()
                    .insert(entry.slot);
            }
            if let Some(room_id) = &entry.room_id {
                self.room_busy
                    .entry(room_id.clone())
                    .or_default()
                    .insert(entry.slot);
            }
            seeded += 1;
        }
        debug!("seeded occupancy from {} stored assignments", seeded);
    }

    /// Fills the grid for one class.
    ///
    /// Produces one assignment per slot, or an unfilled-slot conflict when
    /// every subject's quota is exhausted. Never fails: unsatisfiable quota
    /// configurations degrade to a partially filled grid.
    pub fn allocate(
        &mut self,
        resources: &ClassResources,
        grid: &TimeGrid,
        quotas: &HashMap<String, u32>,
        section: Option<&str>,
    ) -> Timetable {
        let class_id = resources.class_id.clone();
        let active = resources.teacher_ids();
        let mut remaining: HashMap<&str, u32> = resources
            .subjects
            .iter()
            .map(|s| (s.id.as_str(), quotas.get(&s.id).copied().unwrap_or(0)))
            .collect();

        debug!(
            "allocating {} slots for class {} across {} subjects",
            grid.capacity(),
            class_id,
            resources.subjects.len()
        );

        let mut timetable = Timetable::new(class_id.clone(), section.map(str::to_string));

        for &day in &grid.days {
            // The adjacency rule only looks backwards within one day.
            let mut prev_subject: Option<&str> = None;

            for period in 1..=grid.periods_per_day {
                let slot = Slot::new(day, period);

                let mut candidates: Vec<&Subject> = resources
                    .subjects
                    .iter()
                    .filter(|s| {
                        remaining.get(s.id.as_str()).copied().unwrap_or(0) > 0
                            && prev_subject != Some(s.id.as_str())
                    })
                    .collect();
                if candidates.is_empty() {
                    // Adjacency relaxation: a repeated subject beats an empty slot.
                    candidates = resources
                        .subjects
                        .iter()
                        .filter(|s| remaining.get(s.id.as_str()).copied().unwrap_or(0) > 0)
                        .collect();
                    if !candidates.is_empty() {
                        trace!("adjacency relaxed at {}", slot);
                    }
                }
                candidates.shuffle(&mut self.rng);

                let Some(subject) = candidates.into_iter().next() else {
                    trace!("no subject with remaining quota at {}", slot);
                    timetable.add_conflict(slot);
                    prev_subject = None;
                    continue;
                };

                let teacher_id = self.pick_teacher(subject, &active, slot);
                let room_id = self.pick_room(&resources.rooms, slot);
                let (start_min, end_min) = grid.period_window(period);

                let mut assignment = Assignment::new(class_id.clone(), slot, subject.id.clone())
                    .with_times(start_min, end_min);
                if let Some(section) = section {
                    assignment = assignment.with_section(section);
                }

                if let Some(id) = &teacher_id {
                    self.teacher_busy.entry(id.clone()).or_default().insert(slot);
                } else {
                    trace!("no free teacher for {} at {}", subject.id, slot);
                }
                if let Some(id) = &room_id {
                    self.room_busy.entry(id.clone()).or_default().insert(slot);
                }
                assignment.teacher_id = teacher_id;
                assignment.room_id = room_id;

                if let Some(count) = remaining.get_mut(subject.id.as_str()) {
                    *count -= 1;
                }
                prev_subject = Some(subject.id.as_str());
                timetable.add_assignment(assignment);
            }
        }

        debug!(
            "class {}: {} filled, {} unfilled",
            class_id,
            timetable.filled_count(),
            timetable.conflicts.len()
        );
        timetable
    }

    /// First eligible, active teacher not yet occupied at `slot`.
    fn pick_teacher(
        &self,
        subject: &Subject,
        active: &HashSet<&str>,
        slot: Slot,
    ) -> Option<String> {
        subject
            .teacher_ids
            .iter()
            .filter(|id| active.contains(id.as_str()))
            .find(|id| !self.is_occupied(&self.teacher_busy, id.as_str(), slot))
            .cloned()
    }

    /// First room not yet occupied at `slot`.
    fn pick_room(&self, rooms: &[Room], slot: Slot) -> Option<String> {
        rooms
            .iter()
            .find(|r| !self.is_occupied(&self.room_busy, &r.id, slot))
            .map(|r| r.id.clone())
    }

    fn is_occupied(&self, busy: &HashMap<String, HashSet<Slot>>, id: &str, slot: Slot) -> bool {
        busy.get(id).is_some_and(|slots| slots.contains(&slot))
    }
}

impl Default for SlotAllocator {
    fn default() -> Self {
        Self::new()
    }
}
