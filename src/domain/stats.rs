use super::ContributionDay;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Aggregates over a contribution calendar
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContributionStats {
    pub total_contributions: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub this_week: u32,
    pub this_month: u32,
}

impl ContributionStats {
    /// `days` must be ordered oldest to newest. Rolling windows cover the last
    /// 7 and 30 calendar days including `today`.
    pub fn from_calendar(days: &[ContributionDay], today: NaiveDate) -> Self {
        let total_contributions = days.iter().map(|d| d.count).sum();

        let mut current_streak = None;
        let mut longest_streak = 0;
        let mut run = 0;
        for day in days.iter().rev() {
            if day.count > 0 {
                run += 1;
                continue;
            }
            current_streak.get_or_insert(run);
            longest_streak = longest_streak.max(run);
            run = 0;
        }
        // the oldest run is never closed by a zero day
        let current_streak = current_streak.unwrap_or(run);
        let longest_streak = longest_streak.max(run);

        Self {
            total_contributions,
            current_streak,
            longest_streak,
            this_week: window_sum(days, today, 7),
            this_month: window_sum(days, today, 30),
        }
    }
}

fn window_sum(days: &[ContributionDay], today: NaiveDate, span: u64) -> u32 {
    let Some(start) = today.checked_sub_days(Days::new(span - 1)) else {
        return 0;
    };
    days.iter()
        .filter(|d| d.date >= start && d.date <= today)
        .map(|d| d.count)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar(counts: &[u32], today: NaiveDate) -> Vec<ContributionDay> {
        let n = counts.len() as u64;
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| ContributionDay::new(today - Days::new(n - 1 - i as u64), count))
            .collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 20).unwrap()
    }

    #[test]
    fn test_streaks() {
        let days = calendar(&[1, 1, 1, 1, 0, 2, 0, 3, 3], today());
        let stats = ContributionStats::from_calendar(&days, today());
        assert_eq!(stats.total_contributions, 12);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.longest_streak, 4);
    }

    #[test]
    fn test_zero_today_means_no_current_streak() {
        let days = calendar(&[4, 4, 4, 0], today());
        let stats = ContributionStats::from_calendar(&days, today());
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 3);
    }

    #[test]
    fn test_unbroken_calendar() {
        let days = calendar(&[1; 12], today());
        let stats = ContributionStats::from_calendar(&days, today());
        assert_eq!(stats.current_streak, 12);
        assert_eq!(stats.longest_streak, 12);
    }

    #[test]
    fn test_all_zero_calendar() {
        let days = calendar(&[0; 5], today());
        assert_eq!(
            ContributionStats::from_calendar(&days, today()),
            ContributionStats::default()
        );
    }

    #[test]
    fn test_rolling_windows_are_inclusive_of_exactly_n_days() {
        // 40 days of 1 contribution each
        let days = calendar(&[1; 40], today());
        let stats = ContributionStats::from_calendar(&days, today());
        assert_eq!(stats.this_week, 7);
        assert_eq!(stats.this_month, 30);
        assert!(stats.this_month >= stats.this_week);
    }

    #[test]
    fn test_window_boundary() {
        let mut counts = vec![0; 10];
        counts[10 - 8] = 100; // today - 7, just outside the week
        counts[10 - 7] = 5; // today - 6, first day of the week
        let days = calendar(&counts, today());
        let stats = ContributionStats::from_calendar(&days, today());
        assert_eq!(stats.this_week, 5);
        assert_eq!(stats.this_month, 105);
    }
}
