use chrono::{Datelike, Months, NaiveDate};

/// display pattern used for schedule dates, e.g. `Jan 05, 2024`
pub const DEFAULT_DATE_FORMAT: &str = "%b %d, %Y";

/// add calendar months to a date, clamping the day to the end of the target month
///
/// Returns `None` when the result falls outside chrono's supported date range.
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}

/// whole calendar months from `earlier` to `later`, ignoring the day of month
pub fn months_between(later: NaiveDate, earlier: NaiveDate) -> i32 {
    (later.year() - earlier.year()) * 12 + (later.month() as i32 - earlier.month() as i32)
}

/// format a date for display
pub fn format_date(date: NaiveDate) -> String {
    format_date_with(date, DEFAULT_DATE_FORMAT)
}

/// format a date with a chrono strftime pattern
pub fn format_date_with(date: NaiveDate, pattern: &str) -> String {
    date.format(pattern).to_string()
}

/// parse an ISO `YYYY-MM-DD` date
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(ymd(2024, 1, 31), 1, ymd(2024, 2, 29))]
    #[case(ymd(2023, 1, 31), 1, ymd(2023, 2, 28))]
    #[case(ymd(2024, 3, 31), 1, ymd(2024, 4, 30))]
    #[case(ymd(2024, 1, 15), 0, ymd(2024, 1, 15))]
    #[case(ymd(2024, 11, 30), 3, ymd(2025, 2, 28))]
    #[case(ymd(2024, 12, 1), 25, ymd(2027, 1, 1))]
    #[case(ymd(2024, 3, 31), -1, ymd(2024, 2, 29))]
    #[case(ymd(2024, 1, 10), -13, ymd(2022, 12, 10))]
    fn test_add_months(#[case] start: NaiveDate, #[case] months: i32, #[case] expected: NaiveDate) {
        assert_eq!(add_months(start, months), Some(expected));
    }

    #[test]
    fn test_add_months_past_calendar_range() {
        assert_eq!(add_months(NaiveDate::MAX, 1), None);
        assert_eq!(add_months(NaiveDate::MIN, -1), None);
        assert_eq!(add_months(NaiveDate::MAX, 0), Some(NaiveDate::MAX));
    }

    #[test]
    fn test_clamping_does_not_carry_forward() {
        // each step is taken from the original date, so the 31st comes back after February
        let start = ymd(2024, 1, 31);
        assert_eq!(add_months(start, 1), Some(ymd(2024, 2, 29)));
        assert_eq!(add_months(start, 2), Some(ymd(2024, 3, 31)));
    }

    #[rstest]
    #[case(ymd(2024, 1, 1), ymd(2024, 1, 31), 0)]
    #[case(ymd(2024, 6, 1), ymd(2024, 1, 31), 5)]
    #[case(ymd(2025, 2, 1), ymd(2024, 11, 30), 3)]
    #[case(ymd(2024, 1, 1), ymd(2024, 4, 1), -3)]
    fn test_months_between(#[case] later: NaiveDate, #[case] earlier: NaiveDate, #[case] expected: i32) {
        assert_eq!(months_between(later, earlier), expected);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(ymd(2024, 1, 5)), "Jan 05, 2024");
        assert_eq!(format_date(ymd(2024, 12, 31)), "Dec 31, 2024");
        assert_eq!(format_date_with(ymd(2024, 12, 31), "%Y-%m-%d"), "2024-12-31");
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2024-02-29"), Some(ymd(2024, 2, 29)));
        assert_eq!(parse_iso_date(" 2024-02-01 "), Some(ymd(2024, 2, 1)));
        assert_eq!(parse_iso_date("2023-02-29"), None);
        assert_eq!(parse_iso_date("02/01/2024"), None);
    }
}
