//! Timetable generation.
//!
//! Orchestrates one generation request: catalog read, integrity checks,
//! quota planning, the greedy grid walk, and summary statistics. The
//! result always includes a best-effort schedule — residual conflicts are
//! returned as data so an operator can see exactly which slots need
//! manual attention.
//!
//! # Usage
//!
//! ```
//! use timetabler::catalog::StaticCatalog;
//! use timetabler::generator::{generate, GenerationRequest};
//! use timetabler::models::Subject;
//!
//! let catalog = StaticCatalog::new()
//!     .with_subject(Subject::new("math", "10A").with_name("Mathematics").with_weekly_periods(16))
//!     .with_subject(Subject::new("eng", "10A").with_name("English").with_weekly_periods(16))
//!     .with_subject(Subject::new("sci", "10A").with_name("Science").with_weekly_periods(16));
//!
//! let request = GenerationRequest::new("10A").with_seed(7);
//! let result = generate(&catalog, &request).unwrap();
//! assert_eq!(result.stats.filled_slots, 48);
//! assert!(result.timetable.is_complete());
//! ```

mod allocator;
mod stats;

pub use allocator::SlotAllocator;
pub use stats::TimetableStats;

use log::{info, warn};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::{ClassResources, ResourceCatalog};
use crate::error::EngineError;
use crate::models::{format_minutes, Assignment, TimeGrid, Timetable, Weekday};
use crate::quota::plan_quotas;
use crate::validation::{validate_resources, IssueKind};

/// Parameters for one generation run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Class to generate for.
    pub class_id: String,
    /// Optional sub-section within the class.
    pub section: Option<String>,
    /// Academic-year label, echoed into the result.
    pub academic_year: Option<String>,
    /// Periods per working day.
    pub periods_per_day: u8,
    /// Working days in declared order.
    pub working_days: Vec<Weekday>,
    /// Shuffle seed for reproducible runs. `None` = OS entropy.
    pub seed: Option<u64>,
}

impl GenerationRequest {
    /// Creates a request with the default grid (Monday–Saturday, 8 periods).
    pub fn new(class_id: impl Into<String>) -> Self {
        let grid = TimeGrid::default();
        Self {
            class_id: class_id.into(),
            section: None,
            academic_year: None,
            periods_per_day: grid.periods_per_day,
            working_days: grid.days,
            seed: None,
        }
    }

    /// Sets the section.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Sets the academic-year label.
    pub fn with_academic_year(mut self, year: impl Into<String>) -> Self {
        self.academic_year = Some(year.into());
        self
    }

    /// Sets the number of periods per day.
    pub fn with_periods_per_day(mut self, periods: u8) -> Self {
        self.periods_per_day = periods;
        self
    }

    /// Sets the working-day list.
    pub fn with_working_days(mut self, days: Vec<Weekday>) -> Self {
        self.working_days = days;
        self
    }

    /// Fixes the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The grid shape this request describes.
    pub fn grid(&self) -> TimeGrid {
        TimeGrid::new(self.working_days.clone(), self.periods_per_day)
    }
}

/// One rendered cell of the day-keyed grid view.
#[derive(Debug, Clone, Serialize)]
pub struct GridCell {
    /// Subject display name.
    pub subject: String,
    /// Teacher display name, or "TBA".
    pub teacher: String,
    /// Room display name, or the per-class fallback.
    pub room: String,
    /// Period start, "HH:MM".
    pub starts_at: String,
    /// Period end, "HH:MM".
    pub ends_at: String,
}

/// The full result of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedTimetable {
    /// Class the timetable was generated for.
    pub class_id: String,
    /// Section, if any.
    pub section: Option<String>,
    /// Academic-year label, if any.
    pub academic_year: Option<String>,
    /// The raw timetable: assignments plus unfilled slots.
    pub timetable: Timetable,
    /// Day-keyed grid view: day → period → cell, with names resolved.
    pub grid: BTreeMap<Weekday, BTreeMap<u8, GridCell>>,
    /// Summary statistics.
    pub stats: TimetableStats,
}

impl GeneratedTimetable {
    /// Rendered conflict messages, one per unfilled slot.
    pub fn conflict_messages(&self) -> Vec<String> {
        self.timetable
            .conflicts
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// The rendered cell at a (day, period), if that slot was filled.
    pub fn cell(&self, day: Weekday, period: u8) -> Option<&GridCell> {
        self.grid.get(&day).and_then(|periods| periods.get(&period))
    }
}

/// Generates a timetable for one class.
///
/// Occupancy is tracked only within this run; see
/// [`generate_with_occupancy`] for strict cross-class safety.
pub fn generate(
    catalog: &impl ResourceCatalog,
    request: &GenerationRequest,
) -> Result<GeneratedTimetable, EngineError> {
    generate_with_occupancy(catalog, request, &[])
}

/// Generates a timetable with teacher/room occupancy pre-seeded from
/// already-stored assignments, so the run will not double-book resources
/// claimed by other classes.
pub fn generate_with_occupancy(
    catalog: &impl ResourceCatalog,
    request: &GenerationRequest,
    existing: &[Assignment],
) -> Result<GeneratedTimetable, EngineError> {
    if request.class_id.trim().is_empty() {
        return Err(EngineError::MissingClassId);
    }
    if request.working_days.is_empty() {
        return Err(EngineError::NoWorkingDays);
    }
    if request.periods_per_day == 0 {
        return Err(EngineError::NoPeriods);
    }

    let resources = ClassResources::load(catalog, &request.class_id)?;
    if resources.subjects.is_empty() {
        return Err(EngineError::NoSubjects(request.class_id.clone()));
    }
    if let Err(issues) = validate_resources(&resources) {
        for issue in &issues {
            if issue.kind == IssueKind::DuplicateSubjectId {
                return Err(EngineError::DuplicateSubject(issue.entity_id.clone()));
            }
            // Everything else is survivable: the allocator falls back to sentinels.
            warn!("catalog issue for class {}: {}", request.class_id, issue.message);
        }
    }

    let grid = request.grid();
    let quotas = plan_quotas(&resources.subjects, &grid);

    let mut allocator = match request.seed {
        Some(seed) => SlotAllocator::with_seed(seed),
        None => SlotAllocator::new(),
    };
    if !existing.is_empty() {
        allocator.seed_occupancy(existing);
    }
    let timetable = allocator.allocate(&resources, &grid, &quotas, request.section.as_deref());
    let stats = TimetableStats::calculate(&timetable, &grid);

    info!(
        "generated timetable for class {}: {}/{} slots filled ({:.1}%)",
        request.class_id, stats.filled_slots, stats.total_slots, stats.utilization
    );

    let grid_view = build_grid_view(&timetable, &resources);
    Ok(GeneratedTimetable {
        class_id: request.class_id.clone(),
        section: request.section.clone(),
        academic_year: request.academic_year.clone(),
        timetable,
        grid: grid_view,
        stats,
    })
}

/// Resolves IDs to display names and formats period windows.
fn build_grid_view(
    timetable: &Timetable,
    resources: &ClassResources,
) -> BTreeMap<Weekday, BTreeMap<u8, GridCell>> {
    let mut view: BTreeMap<Weekday, BTreeMap<u8, GridCell>> = BTreeMap::new();
    for assignment in &timetable.assignments {
        let subject = resources
            .subject(&assignment.subject_id)
            .map(|s| s.display_name().to_string())
            .unwrap_or_else(|| assignment.subject_id.clone());
        let teacher = assignment
            .teacher_id
            .as_deref()
            .and_then(|id| resources.teacher(id))
            .map(|t| t.display_name().to_string())
            .unwrap_or_else(|| assignment.teacher_label().to_string());
        let room = assignment
            .room_id
            .as_deref()
            .and_then(|id| resources.room(id))
            .map(|r| r.display_name().to_string())
            .unwrap_or_else(|| assignment.room_label());

        view.entry(assignment.slot.day).or_default().insert(
            assignment.slot.period,
            GridCell {
                subject,
                teacher,
                room,
                starts_at: format_minutes(assignment.start_min),
                ends_at: format_minutes(assignment.end_min),
            },
        );
    }
    view
}
