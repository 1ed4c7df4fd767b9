//! Billing normalization and aggregation
//!
//! Converts raw (price, schedule) pairs into monthly-equivalent amounts and
//! folds a snapshot of subscriptions into the summary the dashboard views
//! consume: total monthly cost, per-category totals, and the upcoming-bills
//! window.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::models::{Schedule, Subscription};

/// Size of the upcoming-bills window, in calendar days (inclusive)
pub const UPCOMING_WINDOW_DAYS: i64 = 30;

/// Convert a price and billing schedule into a monthly-equivalent amount
///
/// An unrecognized schedule tag falls back to treating the price as
/// already-monthly; callers rely on always getting a number back, so this
/// function has no failure mode. One-time charges count as a single
/// monthly-equivalent hit. No rounding happens here; two-decimal rounding is
/// applied only at presentation time.
pub fn monthly_equivalent(price: f64, schedule: &Schedule) -> f64 {
    match schedule {
        Schedule::Monthly => price,
        Schedule::Yearly => price / 12.0,
        Schedule::Quarterly => price / 3.0,
        Schedule::Weekly => price * 4.0,
        Schedule::OneTime => price,
        Schedule::Custom(_) => price,
    }
}

/// Collection-level summary of a subscription snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Sum of monthly-equivalent prices over all records
    pub total_monthly: f64,
    /// Sum of raw prices per category (see note on [`aggregate`])
    pub per_category: BTreeMap<String, f64>,
    /// Records due within [today, today + 30d], ascending by due date
    pub upcoming: Vec<Subscription>,
}

impl Summary {
    /// Yearly projection of the monthly total
    pub fn total_yearly(&self) -> f64 {
        self.total_monthly * 12.0
    }

    /// Raw price sum of the upcoming window (what the payment tracker shows)
    pub fn upcoming_due(&self) -> f64 {
        self.upcoming.iter().map(|s| s.price).sum()
    }
}

/// Fold a snapshot of subscriptions into a [`Summary`]
///
/// `today` is injected rather than read from a live clock so the result is
/// deterministic: the same records and the same calendar day always produce
/// identical output.
///
/// Note: `per_category` sums raw prices while `total_monthly` sums
/// monthly-equivalents. The category breakdown and the grand total
/// intentionally disagree for non-monthly schedules; downstream displays
/// depend on each convention, so this asymmetry is kept rather than fixed.
pub fn aggregate(records: &[Subscription], today: NaiveDate) -> Summary {
    let total_monthly = records
        .iter()
        .map(|r| monthly_equivalent(r.price, &r.recurring_schedule))
        .sum();

    let mut per_category: BTreeMap<String, f64> = BTreeMap::new();
    for r in records {
        *per_category.entry(r.category.to_string()).or_insert(0.0) += r.price;
    }

    let window_end = today + Duration::days(UPCOMING_WINDOW_DAYS);
    let mut upcoming: Vec<Subscription> = records
        .iter()
        .filter(|r| r.due_date >= today && r.due_date <= window_end)
        .cloned()
        .collect();
    // Stable: ties keep input order
    upcoming.sort_by_key(|r| r.due_date);

    Summary {
        total_monthly,
        per_category,
        upcoming,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, DEFAULT_CURRENCY};

    fn sub(name: &str, price: f64, schedule: Schedule, category: Category, due: &str) -> Subscription {
        Subscription {
            id: 0,
            name: name.to_string(),
            price,
            currency: DEFAULT_CURRENCY.to_string(),
            due_date: due.parse().unwrap(),
            category,
            recurring_schedule: schedule,
            notes: None,
        }
    }

    #[test]
    fn monthly_equivalent_rule_table() {
        assert_eq!(monthly_equivalent(12.0, &Schedule::Monthly), 12.0);
        assert_eq!(monthly_equivalent(12.0, &Schedule::Yearly), 1.0);
        assert_eq!(monthly_equivalent(12.0, &Schedule::Quarterly), 4.0);
        assert_eq!(monthly_equivalent(12.0, &Schedule::Weekly), 48.0);
        assert_eq!(monthly_equivalent(12.0, &Schedule::OneTime), 12.0);
    }

    #[test]
    fn monthly_equivalent_identity_on_unrecognized_tag() {
        let odd = Schedule::Custom("biennial".to_string());
        assert_eq!(monthly_equivalent(7.5, &odd), 7.5);
        assert_eq!(monthly_equivalent(0.0, &odd), 0.0);
    }

    #[test]
    fn aggregate_empty_snapshot() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let summary = aggregate(&[], today);
        assert_eq!(summary.total_monthly, 0.0);
        assert!(summary.per_category.is_empty());
        assert!(summary.upcoming.is_empty());
    }

    #[test]
    fn aggregate_upcoming_window_is_inclusive_30_days() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = vec![
            sub("in-window", 10.0, Schedule::Monthly, Category::Other, "2024-01-15"),
            sub("out-of-window", 10.0, Schedule::Monthly, Category::Other, "2024-03-01"),
            sub("in-past", 10.0, Schedule::Monthly, Category::Other, "2023-12-31"),
        ];
        let summary = aggregate(&records, today);
        assert_eq!(summary.upcoming.len(), 1);
        assert_eq!(summary.upcoming[0].name, "in-window");

        // Window edges: today itself and today + 30 days are both included
        let edges = vec![
            sub("today", 1.0, Schedule::Monthly, Category::Other, "2024-01-01"),
            sub("last-day", 1.0, Schedule::Monthly, Category::Other, "2024-01-31"),
            sub("past-edge", 1.0, Schedule::Monthly, Category::Other, "2024-02-01"),
        ];
        let summary = aggregate(&edges, today);
        let names: Vec<&str> = summary.upcoming.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["today", "last-day"]);
    }

    #[test]
    fn aggregate_upcoming_sorted_with_stable_ties() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = vec![
            sub("b-later", 1.0, Schedule::Monthly, Category::Other, "2024-01-20"),
            sub("tie-first", 1.0, Schedule::Monthly, Category::Other, "2024-01-10"),
            sub("tie-second", 1.0, Schedule::Monthly, Category::Other, "2024-01-10"),
        ];
        let summary = aggregate(&records, today);
        let names: Vec<&str> = summary.upcoming.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["tie-first", "tie-second", "b-later"]);
    }

    #[test]
    fn per_category_sums_raw_prices_while_total_is_normalized() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = vec![
            sub("a", 10.0, Schedule::Monthly, Category::Entertainment, "2024-06-01"),
            sub("b", 120.0, Schedule::Yearly, Category::Entertainment, "2024-06-01"),
        ];
        let summary = aggregate(&records, today);
        assert_eq!(summary.per_category["entertainment"], 130.0);
        assert_eq!(summary.total_monthly, 20.0);
        assert_eq!(summary.total_yearly(), 240.0);
    }

    #[test]
    fn aggregate_is_deterministic_for_fixed_today() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = vec![
            sub("a", 9.99, Schedule::Weekly, Category::Health, "2024-01-05"),
            sub("b", 120.0, Schedule::Yearly, Category::Entertainment, "2024-01-03"),
            sub("c", 5.0, Schedule::Custom("fortnightly".to_string()), Category::Custom("pets".to_string()), "2024-01-03"),
        ];
        let first = aggregate(&records, today);
        let second = aggregate(&records, today);
        assert_eq!(first, second);
    }

    #[test]
    fn upcoming_due_sums_raw_prices() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = vec![
            sub("a", 10.0, Schedule::Yearly, Category::Other, "2024-01-05"),
            sub("b", 2.5, Schedule::Monthly, Category::Other, "2024-01-06"),
        ];
        let summary = aggregate(&records, today);
        assert_eq!(summary.upcoming_due(), 12.5);
    }
}
