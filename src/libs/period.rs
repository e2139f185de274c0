//! Reporting period arithmetic.
//!
//! A report always covers one calendar month. The month is either given
//! explicitly as `MM/YYYY` or defaults to the month before "today".

use crate::libs::error::ReportError;
use anyhow::Result;
use chrono::{Datelike, Months, NaiveDate};

/// Format of the human readable period label (`01/2025`).
pub const PERIOD_FORMAT: &str = "%m/%Y";

/// Parses a strict `MM/YYYY` string into `(month, year)`.
///
/// Two month digits and four year digits are required; the month must lie
/// in `1..=12`.
///
/// # Examples
///
/// ```rust
/// use jira_reporter::libs::period::parse_month_year;
///
/// assert_eq!(parse_month_year("01/2025").unwrap(), (1, 2025));
/// assert!(parse_month_year("13/2025").is_err());
/// ```
pub fn parse_month_year(input: &str) -> Result<(u32, i32)> {
    let invalid = || ReportError::InvalidPeriod(input.to_string());

    let (month, year) = input.split_once('/').ok_or_else(invalid)?;
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if month.len() != 2 || year.len() != 4 || !all_digits(month) || !all_digits(year) {
        return Err(invalid().into());
    }

    let month: u32 = month.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid().into());
    }
    Ok((month, year))
}

/// First and last calendar day of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

impl ReportPeriod {
    pub fn month(month: u32, year: i32) -> Result<Self> {
        let out_of_range = || ReportError::InvalidPeriod(format!("{:02}/{}", month, year));
        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
        let last_day = first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(out_of_range)?;
        Ok(Self { first_day, last_day })
    }

    /// The month preceding `today`, wrapping January to December of the previous year.
    pub fn previous_month(today: NaiveDate) -> Result<Self> {
        let (month, year) = match today.month() {
            1 => (12, today.year() - 1),
            month => (month - 1, today.year()),
        };
        Self::month(month, year)
    }

    /// Uses the explicit `MM/YYYY` when given, otherwise the previous month.
    pub fn resolve(explicit: Option<&str>, today: NaiveDate) -> Result<Self> {
        match explicit.map(str::trim).filter(|s| !s.is_empty()) {
            Some(value) => {
                let (month, year) = parse_month_year(value)?;
                Self::month(month, year)
            }
            None => Self::previous_month(today),
        }
    }

    /// `MM/YYYY` label of the period, shown as the "period worked".
    pub fn label(&self) -> String {
        format_period(self.first_day)
    }

    /// `MM_YYYY` form used inside file names.
    pub fn file_label(&self) -> String {
        self.label().replace('/', "_")
    }
}

/// `MM/YYYY` of the month containing `date`.
pub fn format_period(date: NaiveDate) -> String {
    date.format(PERIOD_FORMAT).to_string()
}

/// First and last day of the month before `today`.
pub fn previous_month_range(today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let period = ReportPeriod::previous_month(today)?;
    Ok((period.first_day, period.last_day))
}

/// First and last day of the given month.
pub fn month_range(month: u32, year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let period = ReportPeriod::month(month, year)?;
    Ok((period.first_day, period.last_day))
}
