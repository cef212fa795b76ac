//! Weekly grid and slot models.
//!
//! A timetable grid is an ordered list of working days crossed with a fixed
//! number of periods per day. A slot is the atomic scheduling coordinate:
//! a (day, period) pair with structural equality — slots are never stored
//! as objects, only used as keys.
//!
//! # Time Model
//! Periods map to wall-clock windows derived from the first period's start
//! minute and a uniform period length. All times are minutes since midnight.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A working day of the week.
///
/// Declaration order is calendar order, so deriving `Ord` gives
/// Monday-first sorting for day-keyed views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days in calendar order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Display name (e.g., "Monday").
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A (day, period) coordinate in the weekly grid.
///
/// Periods are 1-based. Slots exist implicitly — they are addressed, not
/// instantiated — and serve as keys in occupancy sets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Slot {
    /// Working day.
    pub day: Weekday,
    /// Period number within the day (1-based).
    pub period: u8,
}

impl Slot {
    /// Creates a slot coordinate.
    pub fn new(day: Weekday, period: u8) -> Self {
        Self { day, period }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} period {}", self.day, self.period)
    }
}

/// The shape of a weekly timetable grid.
///
/// Supplied per generation request; not persisted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeGrid {
    /// Working days in declared order.
    pub days: Vec<Weekday>,
    /// Periods per day (1-based numbering up to this count).
    pub periods_per_day: u8,
    /// Start of period 1, minutes since midnight.
    pub first_period_min: u32,
    /// Length of each period in minutes.
    pub period_len_min: u32,
}

impl Default for TimeGrid {
    /// Monday–Saturday, 8 periods per day, first period at 08:00, 45 minutes each.
    fn default() -> Self {
        Self::new(
            vec![
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday,
                Weekday::Saturday,
            ],
            8,
        )
    }
}

impl TimeGrid {
    /// Creates a grid with default wall-clock settings (08:00 start, 45-minute periods).
    pub fn new(days: Vec<Weekday>, periods_per_day: u8) -> Self {
        Self {
            days,
            periods_per_day,
            first_period_min: 8 * 60,
            period_len_min: 45,
        }
    }

    /// Sets the start of the first period (minutes since midnight).
    pub fn with_day_start(mut self, first_period_min: u32) -> Self {
        self.first_period_min = first_period_min;
        self
    }

    /// Sets the period length in minutes.
    pub fn with_period_length(mut self, period_len_min: u32) -> Self {
        self.period_len_min = period_len_min;
        self
    }

    /// Total number of slots in one week.
    pub fn capacity(&self) -> u32 {
        self.days.len() as u32 * self.periods_per_day as u32
    }

    /// Whether a slot falls inside this grid.
    pub fn contains(&self, slot: &Slot) -> bool {
        slot.period >= 1 && slot.period <= self.periods_per_day && self.days.contains(&slot.day)
    }

    /// Wall-clock window of a period as (start, end) minutes since midnight.
    pub fn period_window(&self, period: u8) -> (u32, u32) {
        let start = self.first_period_min + (period as u32 - 1) * self.period_len_min;
        (start, start + self.period_len_min)
    }

    /// Iterates all slots in allocation order: day-by-day, period-by-period.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.days.iter().flat_map(move |&day| {
            (1..=self.periods_per_day).map(move |period| Slot::new(day, period))
        })
    }
}

/// Formats minutes since midnight as "HH:MM".
pub fn format_minutes(min: u32) -> String {
    format!("{:02}:{:02}", min / 60, min % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let grid = TimeGrid::default();
        assert_eq!(grid.days.len(), 6);
        assert_eq!(grid.days[0], Weekday::Monday);
        assert_eq!(grid.days[5], Weekday::Saturday);
        assert_eq!(grid.periods_per_day, 8);
        assert_eq!(grid.capacity(), 48);
    }

    #[test]
    fn test_slot_iteration_order() {
        let grid = TimeGrid::new(vec![Weekday::Monday, Weekday::Tuesday], 3);
        let slots: Vec<Slot> = grid.slots().collect();
        assert_eq!(slots.len(), 6);
        assert_eq!(slots[0], Slot::new(Weekday::Monday, 1));
        assert_eq!(slots[2], Slot::new(Weekday::Monday, 3));
        assert_eq!(slots[3], Slot::new(Weekday::Tuesday, 1));
        assert_eq!(slots[5], Slot::new(Weekday::Tuesday, 3));
    }

    #[test]
    fn test_slot_equality_and_hash() {
        use std::collections::HashSet;

        let mut occupied = HashSet::new();
        occupied.insert(Slot::new(Weekday::Friday, 4));
        assert!(occupied.contains(&Slot::new(Weekday::Friday, 4)));
        assert!(!occupied.contains(&Slot::new(Weekday::Friday, 5)));
        assert!(!occupied.contains(&Slot::new(Weekday::Thursday, 4)));
    }

    #[test]
    fn test_period_window() {
        let grid = TimeGrid::default();
        assert_eq!(grid.period_window(1), (480, 525)); // 08:00–08:45
        assert_eq!(grid.period_window(3), (570, 615)); // 09:30–10:15

        let late = TimeGrid::default().with_day_start(9 * 60).with_period_length(60);
        assert_eq!(late.period_window(2), (600, 660)); // 10:00–11:00
    }

    #[test]
    fn test_contains() {
        let grid = TimeGrid::new(vec![Weekday::Monday], 4);
        assert!(grid.contains(&Slot::new(Weekday::Monday, 1)));
        assert!(grid.contains(&Slot::new(Weekday::Monday, 4)));
        assert!(!grid.contains(&Slot::new(Weekday::Monday, 5)));
        assert!(!grid.contains(&Slot::new(Weekday::Monday, 0)));
        assert!(!grid.contains(&Slot::new(Weekday::Tuesday, 1)));
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(480), "08:00");
        assert_eq!(format_minutes(615), "10:15");
        assert_eq!(format_minutes(0), "00:00");
    }

    #[test]
    fn test_slot_display() {
        let slot = Slot::new(Weekday::Tuesday, 3);
        assert_eq!(slot.to_string(), "Tuesday period 3");
    }

    #[test]
    fn test_grid_serde_roundtrip() {
        let grid = TimeGrid::new(vec![Weekday::Monday, Weekday::Wednesday], 6);
        let json = serde_json::to_string(&grid).unwrap();
        let back: TimeGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back.days, grid.days);
        assert_eq!(back.periods_per_day, 6);
    }
}
