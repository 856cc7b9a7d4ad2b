use chrono::{Datelike, NaiveDate};

/// Fixed-date holidays, keyed by (month, day) so they match every year.
pub fn holiday_name(month: u32, day: u32) -> Option<&'static str> {
    let name = match (month, day) {
        (1, 1) => "New Year's Day",
        (2, 14) => "Valentine's Day",
        (3, 17) => "St. Patrick's Day",
        (4, 1) => "April Fools' Day",
        (7, 4) => "Independence Day",
        (10, 31) => "Halloween",
        (12, 25) => "Christmas",
        (12, 31) => "New Year's Eve",
        _ => return None,
    };
    Some(name)
}

/// One entry per active date that falls on a holiday, in the order given.
pub fn holiday_commits<'a>(active: impl IntoIterator<Item = &'a NaiveDate>) -> Vec<String> {
    active
        .into_iter()
        .filter_map(|d| holiday_name(d.month(), d.day()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn matches_month_and_day_only() {
        let dates = [d(2024, 12, 25), d(2024, 12, 26), d(2023, 10, 31)];
        assert_eq!(holiday_commits(&dates), vec!["Christmas", "Halloween"]);
    }

    #[test]
    fn recurring_holiday_appears_once_per_year() {
        let dates = [d(2022, 1, 1), d(2023, 1, 1), d(2024, 1, 1)];
        assert_eq!(holiday_commits(&dates), vec!["New Year's Day"; 3]);
    }

    #[test]
    fn ordinary_days_are_not_holidays() {
        assert_eq!(holiday_name(6, 15), None);
        assert!(holiday_commits(&[d(2024, 6, 15)]).is_empty());
    }
}
