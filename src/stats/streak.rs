use chrono::{Days, NaiveDate};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streaks {
    pub longest: u32,
    pub current: u32,
}

pub fn streaks(active: &BTreeSet<NaiveDate>, today: NaiveDate) -> Streaks {
    Streaks {
        longest: longest_streak(active),
        current: current_streak(active, today),
    }
}

/// Longest run of consecutive calendar days present in `active`.
pub fn longest_streak(active: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for &day in active {
        run = match prev {
            Some(p) if p.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }
    longest
}

/// Run of active days ending today, or ending yesterday when nothing has landed today yet.
pub fn current_streak(active: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut day = if active.contains(&today) {
        Some(today)
    } else {
        today.checked_sub_days(Days::new(1))
    };

    let mut streak = 0;
    while let Some(d) = day.filter(|d| active.contains(d)) {
        streak += 1;
        day = d.pred_opt();
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn set(days: &[&str]) -> BTreeSet<NaiveDate> {
        days.iter().map(|s| d(s)).collect()
    }

    #[test]
    fn empty_set_has_no_streaks() {
        let s = streaks(&BTreeSet::new(), d("2024-06-01"));
        assert_eq!(s, Streaks { longest: 0, current: 0 });
    }

    #[test]
    fn isolated_days_give_streak_of_one() {
        let active = set(&["2024-01-01", "2024-01-03", "2024-01-05", "2024-02-10"]);
        assert_eq!(longest_streak(&active), 1);
        assert!(current_streak(&active, d("2024-01-05")) <= 1);
        assert!(current_streak(&active, d("2024-01-06")) <= 1);
    }

    #[test]
    fn longest_run_spans_month_and_year_boundaries() {
        let active = set(&[
            "2023-12-30",
            "2023-12-31",
            "2024-01-01",
            "2024-01-02",
            "2024-03-01",
            "2024-03-02",
        ]);
        assert_eq!(longest_streak(&active), 4);
    }

    #[test]
    fn leap_day_is_consecutive() {
        let active = set(&["2024-02-28", "2024-02-29", "2024-03-01"]);
        assert_eq!(longest_streak(&active), 3);
    }

    #[test]
    fn current_streak_counts_back_from_today() {
        let active = set(&["2024-06-08", "2024-06-09", "2024-06-10"]);
        assert_eq!(current_streak(&active, d("2024-06-10")), 3);
    }

    #[test]
    fn current_streak_tolerates_quiet_today() {
        let active = set(&["2024-06-08", "2024-06-09"]);
        assert_eq!(current_streak(&active, d("2024-06-10")), 2);
    }

    #[test]
    fn current_streak_is_zero_after_a_gap() {
        let active = set(&["2024-06-07", "2024-06-08"]);
        assert_eq!(current_streak(&active, d("2024-06-10")), 0);
    }

    #[test]
    fn current_streak_can_be_below_longest_or_above() {
        let active = set(&["2024-01-01", "2024-01-02", "2024-01-03", "2024-06-10"]);
        let s = streaks(&active, d("2024-06-10"));
        assert_eq!(s, Streaks { longest: 3, current: 1 });

        let outside = streaks(&active, d("2030-01-01"));
        assert_eq!(outside.current, 0);
    }
}
