//! Derived display values.
//!
//! Consumed and burned totals are summed from the lists on every refresh
//! rather than cached. Arithmetic saturates at the `i64` bounds.

use crate::Item;

/// Snapshot of the numbers shown on the dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stats {
    pub limit: i64,
    pub total: i64,
    pub consumed: i64,
    pub burned: i64,
    pub remaining: i64,
    /// Progress toward the limit, 0..=100
    pub progress: u8,
    /// Remaining is zero or negative
    pub over_limit: bool,
}

impl Stats {
    pub fn compute(limit: i64, total: i64, meals: &[Item], workouts: &[Item]) -> Self {
        let remaining = limit.saturating_sub(total);
        Self {
            limit,
            total,
            consumed: saturating_sum(meals),
            burned: saturating_sum(workouts),
            remaining,
            progress: progress_percent(limit, total),
            over_limit: remaining <= 0,
        }
    }
}

fn saturating_sum(items: &[Item]) -> i64 {
    items
        .iter()
        .fold(0i64, |sum, item| sum.saturating_add(item.calories()))
}

/// Percentage of the limit used, clamped to 0..=100.
///
/// A total at or above the limit is always 100. With a limit of zero or
/// below and a total under it, no division happens and the result is 0.
pub fn progress_percent(limit: i64, total: i64) -> u8 {
    if total >= limit {
        return 100;
    }
    if limit <= 0 {
        return 0;
    }
    let percent = (total as f64 / limit as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(2000, 500), 25);
        assert_eq!(progress_percent(2000, 2500), 100);
        assert_eq!(progress_percent(2000, 2000), 100);
        assert_eq!(progress_percent(2000, 0), 0);
        assert_eq!(progress_percent(2000, -300), 0);
        assert_eq!(progress_percent(3, 1), 33);
        assert_eq!(progress_percent(2000, 1999), 100);
    }

    #[test]
    fn test_zero_limit() {
        assert_eq!(progress_percent(0, 0), 100);
        assert_eq!(progress_percent(0, 50), 100);
        assert_eq!(progress_percent(0, -50), 0);
    }

    #[test]
    fn test_compute_sums_lists() {
        let meals = vec![Item::meal("Oatmeal", 300), Item::meal("Soup", 200)];
        let workouts = vec![Item::workout("Run", 200)];

        let stats = Stats::compute(2000, 300, &meals, &workouts);
        assert_eq!(stats.consumed, 500);
        assert_eq!(stats.burned, 200);
        assert_eq!(stats.remaining, 1700);
        assert_eq!(stats.progress, 15);
        assert!(!stats.over_limit);
    }

    #[test]
    fn test_extreme_values_saturate() {
        let workouts = vec![
            Item::workout("Ultra", i64::MAX),
            Item::workout("Ultra again", i64::MAX),
        ];
        let stats = Stats::compute(2000, -i64::MAX, &[], &workouts);
        assert_eq!(stats.burned, i64::MAX);
        assert_eq!(stats.remaining, i64::MAX);
        assert_eq!(stats.progress, 0);

        let meals = vec![Item::meal("Feast", i64::MAX)];
        let stats = Stats::compute(i64::MIN, i64::MAX, &meals, &[]);
        assert_eq!(stats.consumed, i64::MAX);
        assert_eq!(stats.remaining, i64::MIN);
        assert!(stats.over_limit);
        assert_eq!(stats.progress, 100);
    }

    #[test]
    fn test_over_limit_when_nothing_remains() {
        let stats = Stats::compute(1000, 1000, &[], &[]);
        assert_eq!(stats.remaining, 0);
        assert!(stats.over_limit);
        assert_eq!(stats.progress, 100);
    }
}
