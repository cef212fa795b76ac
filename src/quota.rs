//! Weekly quota planning.
//!
//! Converts per-subject weekly targets into integer period counts that fit
//! the grid capacity. Subjects without a target get an even share of the
//! grid; when the combined demand overflows capacity, every quota is scaled
//! proportionally. This step never fails — an imperfect plan is still a
//! plan, and any residual imbalance surfaces later as allocator conflicts.

use log::debug;
use std::collections::HashMap;

use crate::models::{Subject, TimeGrid};

/// Plans per-week period counts for each subject.
///
/// Rules, in order:
/// 1. A subject's explicit weekly target (or its credit-hours fallback) is
///    used as-is, capped at grid capacity.
/// 2. A subject without any target gets `ceil(capacity / subject_count)`.
/// 3. If the quota sum exceeds capacity, every quota is scaled by
///    `capacity / sum` and rounded to the nearest integer, with a floor of
///    one period so no demanded subject disappears from the plan.
///
/// # Examples
///
/// ```
/// use timetabler::models::{Subject, TimeGrid};
/// use timetabler::quota::plan_quotas;
///
/// // 6 days × 8 periods = 48 slots; four subjects wanting 16 each overflow,
/// // so each is scaled down to 12.
/// let subjects: Vec<Subject> = ["math", "eng", "sci", "hist"]
///     .iter()
///     .map(|id| Subject::new(*id, "10A").with_weekly_periods(16))
///     .collect();
/// let quotas = plan_quotas(&subjects, &TimeGrid::default());
/// assert_eq!(quotas["math"], 12);
/// assert!(quotas.values().sum::<u32>() <= 48);
/// ```
pub fn plan_quotas(subjects: &[Subject], grid: &TimeGrid) -> HashMap<String, u32> {
    let capacity = grid.capacity();
    if subjects.is_empty() || capacity == 0 {
        return HashMap::new();
    }

    let even_share = capacity.div_ceil(subjects.len() as u32);
    let mut quotas: HashMap<String, u32> = subjects
        .iter()
        .map(|s| {
            let quota = s.weekly_target().unwrap_or(even_share).min(capacity);
            (s.id.clone(), quota)
        })
        .collect();

    let demanded: u32 = quotas.values().sum();
    if demanded > capacity {
        let ratio = capacity as f64 / demanded as f64;
        for quota in quotas.values_mut() {
            if *quota > 0 {
                *quota = (((*quota as f64) * ratio).round() as u32).max(1);
            }
        }
        debug!(
            "scaled quotas for {} subjects: demand {} > capacity {}",
            subjects.len(),
            demanded,
            capacity
        );
    }

    quotas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday;

    fn subjects_with_targets(targets: &[(&str, Option<u32>)]) -> Vec<Subject> {
        targets
            .iter()
            .map(|(id, target)| {
                let s = Subject::new(*id, "10A");
                match target {
                    Some(t) => s.with_weekly_periods(*t),
                    None => s,
                }
            })
            .collect()
    }

    #[test]
    fn test_exact_fit_untouched() {
        // 3 × 16 = 48 = capacity: no scaling
        let subjects = subjects_with_targets(&[
            ("math", Some(16)),
            ("eng", Some(16)),
            ("sci", Some(16)),
        ]);
        let quotas = plan_quotas(&subjects, &TimeGrid::default());

        assert_eq!(quotas["math"], 16);
        assert_eq!(quotas["eng"], 16);
        assert_eq!(quotas["sci"], 16);
        assert_eq!(quotas.values().sum::<u32>(), 48);
    }

    #[test]
    fn test_overflow_scaled_proportionally() {
        // 4 × 16 = 64 > 48: ratio 0.75 → 12 each
        let subjects = subjects_with_targets(&[
            ("math", Some(16)),
            ("eng", Some(16)),
            ("sci", Some(16)),
            ("hist", Some(16)),
        ]);
        let quotas = plan_quotas(&subjects, &TimeGrid::default());

        for quota in quotas.values() {
            assert_eq!(*quota, 12);
        }
        assert_eq!(quotas.values().sum::<u32>(), 48);
    }

    #[test]
    fn test_even_share_default() {
        // No targets: ceil(48 / 5) = 10 each
        let subjects = subjects_with_targets(&[
            ("a", None),
            ("b", None),
            ("c", None),
            ("d", None),
            ("e", None),
        ]);
        let quotas = plan_quotas(&subjects, &TimeGrid::default());
        for quota in quotas.values() {
            assert_eq!(*quota, 10);
        }
    }

    #[test]
    fn test_credit_hours_fallback() {
        let subject = Subject::new("math", "10A").with_credit_hours(5);
        let quotas = plan_quotas(std::slice::from_ref(&subject), &TimeGrid::default());
        assert_eq!(quotas["math"], 5);
    }

    #[test]
    fn test_target_capped_at_capacity() {
        let grid = TimeGrid::new(vec![Weekday::Monday, Weekday::Tuesday], 4); // capacity 8
        let subjects = subjects_with_targets(&[("math", Some(100))]);
        let quotas = plan_quotas(&subjects, &grid);
        assert_eq!(quotas["math"], 8);
    }

    #[test]
    fn test_scaling_floor_of_one() {
        // Capacity 8, demand 100 + 1: naive scaling would round the small
        // subject to 0; the floor keeps it on the plan.
        let grid = TimeGrid::new(vec![Weekday::Monday, Weekday::Tuesday], 4);
        let subjects = subjects_with_targets(&[("big", Some(100)), ("small", Some(1))]);
        let quotas = plan_quotas(&subjects, &grid);

        assert!(quotas["small"] >= 1);
        assert!(quotas["big"] >= 1);
    }

    #[test]
    fn test_zero_target_stays_zero() {
        // An explicitly zero-demand subject is not inflated by scaling
        let grid = TimeGrid::new(vec![Weekday::Monday], 4); // capacity 4
        let subjects = subjects_with_targets(&[("active", Some(8)), ("dormant", Some(0))]);
        let quotas = plan_quotas(&subjects, &grid);
        assert_eq!(quotas["dormant"], 0);
    }

    #[test]
    fn test_capacity_invariant_under_scaling() {
        // Property: after proportional scaling the plan stays close to
        // capacity; rounding may add at most one period per subject.
        let grid = TimeGrid::default();
        let subjects = subjects_with_targets(&[
            ("a", Some(10)),
            ("b", Some(20)),
            ("c", Some(30)),
        ]);
        let quotas = plan_quotas(&subjects, &grid);
        // ratio 48/60 = 0.8 → 8, 16, 24
        assert_eq!(quotas["a"], 8);
        assert_eq!(quotas["b"], 16);
        assert_eq!(quotas["c"], 24);
        assert_eq!(quotas.values().sum::<u32>(), grid.capacity());
    }

    #[test]
    fn test_empty_subjects() {
        let quotas = plan_quotas(&[], &TimeGrid::default());
        assert!(quotas.is_empty());
    }
}
