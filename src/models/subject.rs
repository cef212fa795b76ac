//! Subject model.
//!
//! A subject is a unit of weekly teaching load owned by one class: it
//! carries a weekly period target (explicit, or derived from credit hours)
//! and the set of teachers eligible to teach it. Subjects are created and
//! edited by academic administration; the engine reads them only.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A subject to be placed on a class timetable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Owning class identifier.
    pub class_id: String,
    /// Explicit weekly period target. `None` = derive or default.
    pub weekly_periods: Option<u32>,
    /// Credit hours, used as the weekly target when no explicit one is set.
    pub credit_hours: Option<u32>,
    /// Teachers eligible to teach this subject.
    pub teacher_ids: Vec<String>,
    /// Domain-specific key-value metadata.
    pub attributes: HashMap<String, String>,
}

impl Subject {
    /// Creates a new subject for a class.
    pub fn new(id: impl Into<String>, class_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            class_id: class_id.into(),
            weekly_periods: None,
            credit_hours: None,
            teacher_ids: Vec::new(),
            attributes: HashMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the explicit weekly period target.
    pub fn with_weekly_periods(mut self, periods: u32) -> Self {
        self.weekly_periods = Some(periods);
        self
    }

    /// Sets the credit hours (weekly-target fallback).
    pub fn with_credit_hours(mut self, hours: u32) -> Self {
        self.credit_hours = Some(hours);
        self
    }

    /// Adds an eligible teacher.
    pub fn with_teacher(mut self, teacher_id: impl Into<String>) -> Self {
        self.teacher_ids.push(teacher_id.into());
        self
    }

    /// Sets the full eligible-teacher list.
    pub fn with_teachers(mut self, teacher_ids: Vec<String>) -> Self {
        self.teacher_ids = teacher_ids;
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Weekly period target: explicit target if set, else credit hours.
    ///
    /// `None` means the quota planner falls back to an even share of the grid.
    pub fn weekly_target(&self) -> Option<u32> {
        self.weekly_periods.or(self.credit_hours)
    }

    /// Display name, falling back to the identifier when unnamed.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_builder() {
        let s = Subject::new("math", "10A")
            .with_name("Mathematics")
            .with_weekly_periods(6)
            .with_teacher("t-01")
            .with_teacher("t-02")
            .with_attribute("department", "Sciences");

        assert_eq!(s.id, "math");
        assert_eq!(s.class_id, "10A");
        assert_eq!(s.name, "Mathematics");
        assert_eq!(s.weekly_periods, Some(6));
        assert_eq!(s.teacher_ids, vec!["t-01", "t-02"]);
        assert_eq!(s.attributes.get("department"), Some(&"Sciences".to_string()));
    }

    #[test]
    fn test_weekly_target_precedence() {
        // Explicit target wins over credit hours
        let explicit = Subject::new("math", "10A")
            .with_weekly_periods(6)
            .with_credit_hours(4);
        assert_eq!(explicit.weekly_target(), Some(6));

        // Credit hours used as fallback
        let derived = Subject::new("eng", "10A").with_credit_hours(4);
        assert_eq!(derived.weekly_target(), Some(4));

        // Neither set → planner default applies
        let unset = Subject::new("art", "10A");
        assert_eq!(unset.weekly_target(), None);
    }

    #[test]
    fn test_display_name_fallback() {
        let named = Subject::new("math", "10A").with_name("Mathematics");
        assert_eq!(named.display_name(), "Mathematics");

        let unnamed = Subject::new("math", "10A");
        assert_eq!(unnamed.display_name(), "math");
    }
}
