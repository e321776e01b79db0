//! Report periods and their date boundaries.
//!
//! Engine reports are bounded with `--begin` (inclusive) and `--end`
//! (exclusive). A period therefore ends on the first day *after* it, which
//! keeps a monthly report from ever counting into the next month.

use chrono::{Datelike, Local, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing or building a period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// The input is not a valid `YYYY` or `YYYY-MM` period.
    #[error("invalid period '{input}': {reason}")]
    Invalid {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl PeriodError {
    fn invalid(input: impl Into<String>, reason: &'static str) -> Self {
        Self::Invalid {
            input: input.into(),
            reason,
        }
    }
}

/// A report period: a whole year or a single month.
///
/// Build periods with [`Period::year`], [`Period::month`] or by parsing;
/// those reject years outside `0000..=9999` and months outside `1..=12`.
///
/// # Examples
///
/// ```
/// use rbooks_core::Period;
///
/// let december: Period = "2025-12".parse().unwrap();
/// assert_eq!(december, Period::Month { year: 2025, month: 12 });
/// assert_eq!(december.begin().to_string(), "2025-12-01");
/// assert_eq!(december.end().to_string(), "2026-01-01");
///
/// let year: Period = "2026".parse().unwrap();
/// assert_eq!(year.end().to_string(), "2027-01-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// A whole calendar year.
    Year(i32),
    /// A single calendar month.
    Month {
        /// Calendar year.
        year: i32,
        /// Month, 1-based.
        month: u32,
    },
}

impl Period {
    /// A whole calendar year.
    pub fn year(year: i32) -> Result<Self, PeriodError> {
        if !(0..=9999).contains(&year) {
            return Err(PeriodError::invalid(year.to_string(), "year out of range"));
        }
        Ok(Self::Year(year))
    }

    /// A single month; `month` is 1-based.
    pub fn month(year: i32, month: u32) -> Result<Self, PeriodError> {
        let input = format!("{year:04}-{month:02}");
        if !(0..=9999).contains(&year) {
            return Err(PeriodError::invalid(input, "year out of range"));
        }
        if !(1..=12).contains(&month) {
            return Err(PeriodError::invalid(input, "month must be between 01 and 12"));
        }
        Ok(Self::Month { year, month })
    }

    /// The current year according to the local clock.
    pub fn current_year() -> Self {
        Self::Year(Local::now().year())
    }

    /// The current month according to the local clock.
    pub fn current_month() -> Self {
        let today = Local::now().date_naive();
        Self::Month {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Is this a whole-year period?
    pub const fn is_year(&self) -> bool {
        matches!(self, Self::Year(_))
    }

    /// The calendar year the period falls in.
    pub const fn year_number(&self) -> i32 {
        match *self {
            Self::Year(year) | Self::Month { year, .. } => year,
        }
    }

    /// The 1-based month, or `None` for a whole year.
    pub const fn month_number(&self) -> Option<u32> {
        match *self {
            Self::Year(_) => None,
            Self::Month { month, .. } => Some(month),
        }
    }

    /// First day of the period (inclusive).
    pub fn begin(&self) -> NaiveDate {
        let month = self.month_number().unwrap_or(1);
        NaiveDate::from_ymd_opt(self.year_number(), month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// First day after the period (exclusive).
    pub fn end(&self) -> NaiveDate {
        let span = match self {
            Self::Year(_) => Months::new(12),
            Self::Month { .. } => Months::new(1),
        };
        self.begin()
            .checked_add_months(span)
            .unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month_number() {
            None => write!(f, "{:04}", self.year_number()),
            Some(month) => write!(f, "{:04}-{:02}", self.year_number(), month),
        }
    }
}

fn parse_digits(s: &str, width: usize) -> Option<u32> {
    if s.len() == width && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.split_once('-') {
            None => {
                let year = parse_digits(trimmed, 4)
                    .ok_or_else(|| PeriodError::invalid(trimmed, "expected YYYY"))?;
                Self::year(year as i32)
            }
            Some((year, month)) => {
                let year = parse_digits(year, 4)
                    .ok_or_else(|| PeriodError::invalid(trimmed, "expected YYYY-MM"))?;
                let month = parse_digits(month, 2)
                    .ok_or_else(|| PeriodError::invalid(trimmed, "expected YYYY-MM"))?;
                Self::month(year as i32, month)
                    .map_err(|_| PeriodError::invalid(trimmed, "month must be between 01 and 12"))
            }
        }
    }
}

/// First day of the month after `month` (`YYYY-MM`), as `YYYY-MM-DD`.
///
/// ```
/// use rbooks_core::next_month_first_day;
///
/// assert_eq!(next_month_first_day("2026-01").unwrap(), "2026-02-01");
/// assert_eq!(next_month_first_day("2026-12").unwrap(), "2027-01-01");
/// ```
pub fn next_month_first_day(month: &str) -> Result<String, PeriodError> {
    let period: Period = month.parse()?;
    if period.is_year() {
        return Err(PeriodError::invalid(month, "expected YYYY-MM"));
    }
    Ok(period.end().format("%Y-%m-%d").to_string())
}

/// January 1st of the year after `year` (`YYYY`), as `YYYY-MM-DD`.
pub fn next_year_first_day(year: &str) -> Result<String, PeriodError> {
    let period: Period = year.parse()?;
    if !period.is_year() {
        return Err(PeriodError::invalid(year, "expected YYYY"));
    }
    Ok(period.end().format("%Y-%m-%d").to_string())
}
