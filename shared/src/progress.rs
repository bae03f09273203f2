//! Progress derivation
//!
//! Completion counters and the total-cost statistic are derived from the
//! nested day/activity structure and are never authored independently.
//! Every function here is pure, synchronous, and total.
//!
//! Callers must not read `trip.progress` after touching `trip.days` without
//! first passing the trip through [`recompute_progress`].

use crate::cost::parse_cost_str;
use crate::models::{Trip, TripProgress};

/// Percentage policy in one place: `round(100 * completed / planned)`,
/// defined as 0 for an empty trip instead of propagating a NaN.
pub fn completion_percentage(completed: u32, planned: u32) -> u8 {
    if planned == 0 {
        return 0;
    }
    (100.0 * completed as f64 / planned as f64).round() as u8
}

/// Derive the progress counters for a trip without mutating it
pub fn derive_progress(trip: &Trip) -> TripProgress {
    let planned = trip
        .days
        .iter()
        .map(|day| day.activities.len() as u32)
        .sum::<u32>();
    let completed = trip.all_activities().filter(|a| a.is_completed).count() as u32;

    TripProgress {
        planned_activities: planned,
        completed_activities: completed,
        completion_percentage: completion_percentage(completed, planned),
    }
}

/// Rewrite `trip.progress` from the current day/activity structure.
///
/// Must run after every structural or completion mutation before the trip
/// is considered consistent.
pub fn recompute_progress(trip: &mut Trip) {
    trip.progress = derive_progress(trip);
}

/// Sum of [`parse_cost`](crate::cost::parse_cost) over every activity.
///
/// Independent of `trip.budget.total`, which is a user/AI-set target; the
/// two may disagree and are both exposed.
pub fn total_cost(trip: &Trip) -> u32 {
    trip.all_activities()
        .fold(0u32, |acc, a| acc.saturating_add(parse_cost_str(&a.cost)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, Day};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn activity(cost: &str, completed: bool) -> Activity {
        Activity {
            name: "Stop".to_string(),
            cost: cost.to_string(),
            is_completed: completed,
            ..Activity::default()
        }
    }

    fn trip_with_days(days: Vec<Day>) -> Trip {
        let mut trip = Trip::new(Uuid::new_v4(), "Test Trip");
        trip.days = days;
        trip
    }

    #[test]
    fn test_empty_trip_has_zero_progress() {
        let mut trip = trip_with_days(vec![]);
        recompute_progress(&mut trip);
        assert_eq!(trip.progress.planned_activities, 0);
        assert_eq!(trip.progress.completed_activities, 0);
        assert_eq!(trip.progress.completion_percentage, 0);
    }

    #[test]
    fn test_two_day_scenario() {
        // Day 1: ₱500 + Free, day 2: ₱1,200; none completed.
        let mut trip = trip_with_days(vec![
            Day {
                day_number: 1,
                theme: "City".to_string(),
                activities: vec![activity("₱500", false), activity("Free", false)],
            },
            Day {
                day_number: 2,
                theme: "Coast".to_string(),
                activities: vec![activity("₱1,200", false)],
            },
        ]);
        trip.budget.total = "₱10,000".to_string();

        recompute_progress(&mut trip);
        assert_eq!(trip.progress.planned_activities, 3);
        assert_eq!(trip.progress.completed_activities, 0);
        assert_eq!(trip.progress.completion_percentage, 0);
        assert_eq!(total_cost(&trip), 1700);

        // Completing day 1 / activity 0 moves the needle to round(100/3).
        trip.days[0].activities[0].is_completed = true;
        recompute_progress(&mut trip);
        assert_eq!(trip.progress.completed_activities, 1);
        assert_eq!(trip.progress.completion_percentage, 33);

        // Total cost is independent of the budget target.
        assert_eq!(total_cost(&trip), 1700);
        assert_eq!(trip.budget.total, "₱10,000");
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 67);
        assert_eq!(completion_percentage(1, 2), 50);
        assert_eq!(completion_percentage(3, 3), 100);
        assert_eq!(completion_percentage(0, 0), 0);
    }

    #[test]
    fn test_recompute_overwrites_stale_server_progress() {
        let mut trip = trip_with_days(vec![Day {
            day_number: 1,
            theme: String::new(),
            activities: vec![activity("Free", true)],
        }]);
        // A payload claiming nonsense counters is corrected on recompute.
        trip.progress = TripProgress {
            planned_activities: 99,
            completed_activities: 42,
            completion_percentage: 7,
        };

        recompute_progress(&mut trip);
        assert_eq!(trip.progress.planned_activities, 1);
        assert_eq!(trip.progress.completed_activities, 1);
        assert_eq!(trip.progress.completion_percentage, 100);
    }

    prop_compose! {
        fn arb_activity()(completed in any::<bool>(), pesos in 0u32..100_000) -> Activity {
            activity(&format!("₱{pesos}"), completed)
        }
    }

    prop_compose! {
        fn arb_trip()(days in prop::collection::vec(
            prop::collection::vec(arb_activity(), 0..6), 0..5
        )) -> Trip {
            trip_with_days(days.into_iter().enumerate().map(|(i, activities)| Day {
                day_number: i as u32 + 1,
                theme: String::new(),
                activities,
            }).collect())
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: completed never exceeds planned, percentage honors the policy
        #[test]
        fn prop_progress_invariants(mut trip in arb_trip()) {
            recompute_progress(&mut trip);
            let p = trip.progress;

            prop_assert!(p.completed_activities <= p.planned_activities);
            prop_assert_eq!(
                p.completion_percentage,
                completion_percentage(p.completed_activities, p.planned_activities)
            );
            prop_assert!(p.completion_percentage <= 100);
        }

        /// Property: total cost equals the sum of per-activity parses
        #[test]
        fn prop_total_cost_is_sum(trip in arb_trip()) {
            let expected: u32 = trip
                .all_activities()
                .map(|a| parse_cost_str(&a.cost))
                .sum();
            prop_assert_eq!(total_cost(&trip), expected);
        }

        /// Property: recompute is idempotent
        #[test]
        fn prop_recompute_idempotent(mut trip in arb_trip()) {
            recompute_progress(&mut trip);
            let first = trip.progress;
            recompute_progress(&mut trip);
            prop_assert_eq!(trip.progress, first);
        }

        /// Property: recompute never reorders days or activities
        #[test]
        fn prop_recompute_preserves_structure(mut trip in arb_trip()) {
            let days_before = trip.days.clone();
            recompute_progress(&mut trip);
            prop_assert_eq!(trip.days, days_before);
        }
    }
}
