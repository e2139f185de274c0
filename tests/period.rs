#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use jira_reporter::libs::error::ReportError;
    use jira_reporter::libs::period::{format_period, month_range, parse_month_year, previous_month_range, ReportPeriod};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn is_invalid_period(result: anyhow::Result<(u32, i32)>) -> bool {
        matches!(
            result.unwrap_err().downcast_ref::<ReportError>(),
            Some(ReportError::InvalidPeriod(_))
        )
    }

    #[test]
    fn test_parse_month_year_valid() {
        assert_eq!(parse_month_year("01/2025").unwrap(), (1, 2025));
        assert_eq!(parse_month_year("12/1999").unwrap(), (12, 1999));
    }

    #[test]
    fn test_parse_month_year_rejects_bad_input() {
        for input in ["13/2025", "00/2025", "1/2025", "01/25", "2025/01", "ab/2025", "01-2025", "bad", "", "01/2025/1"] {
            assert!(is_invalid_period(parse_month_year(input)), "accepted '{}'", input);
        }
    }

    #[test]
    fn test_previous_month_mid_year() {
        let (first, last) = previous_month_range(date(2025, 7, 15)).unwrap();
        assert_eq!(first, date(2025, 6, 1));
        assert_eq!(last, date(2025, 6, 30));
    }

    #[test]
    fn test_previous_month_wraps_january() {
        let (first, last) = previous_month_range(date(2025, 1, 10)).unwrap();
        assert_eq!(first, date(2024, 12, 1));
        assert_eq!(last, date(2024, 12, 31));
    }

    #[test]
    fn test_month_range_handles_leap_february() {
        assert_eq!(month_range(2, 2024).unwrap(), (date(2024, 2, 1), date(2024, 2, 29)));
        assert_eq!(month_range(2, 2025).unwrap(), (date(2025, 2, 1), date(2025, 2, 28)));
    }

    #[test]
    fn test_resolve_prefers_explicit_period() {
        let period = ReportPeriod::resolve(Some("03/2024"), date(2025, 8, 20)).unwrap();
        assert_eq!(period.first_day, date(2024, 3, 1));
        assert_eq!(period.last_day, date(2024, 3, 31));
    }

    #[test]
    fn test_resolve_blank_falls_back_to_previous_month() {
        let period = ReportPeriod::resolve(Some("  "), date(2025, 3, 5)).unwrap();
        assert_eq!(period.first_day, date(2025, 2, 1));

        let period = ReportPeriod::resolve(None, date(2025, 3, 5)).unwrap();
        assert_eq!(period.last_day, date(2025, 2, 28));
    }

    #[test]
    fn test_period_labels() {
        let period = ReportPeriod::month(1, 2025).unwrap();
        assert_eq!(period.label(), "01/2025");
        assert_eq!(period.file_label(), "01_2025");
        assert_eq!(format_period(date(2024, 11, 23)), "11/2024");
    }
}
