//! Month-granularity dates
//!
//! Subscriptions are billed per month, so every date in the API is a
//! `MM-YYYY` string. Ordering is always structural (year, then month);
//! comparing the raw strings would put "02-2024" after "01-2025".

use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};

use crate::shared::{DomainError, DomainResult};

/// Earliest year accepted from client input.
pub const MIN_YEAR: i32 = 2000;

/// How many years past the current one a client may reference.
pub const MAX_YEARS_AHEAD: i32 = 10;

/// A calendar month within a year.
///
/// Field order matters: the derived `Ord` compares `year` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDate {
    year: i32,
    month: u32,
}

impl MonthDate {
    /// Parse `MM-YYYY`, accepting years in `[2000, current_year + 10]`.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        Self::parse_with_max_year(raw, Utc::now().year() + MAX_YEARS_AHEAD)
    }

    /// Parse `MM-YYYY` against an explicit upper year bound.
    pub fn parse_with_max_year(raw: &str, max_year: i32) -> DomainResult<Self> {
        let invalid = || DomainError::InvalidDateFormat(raw.to_string());

        let bytes = raw.as_bytes();
        if bytes.len() != 7 || bytes[2] != b'-' {
            return Err(invalid());
        }
        let (month_part, year_part) = (&raw[..2], &raw[3..]);
        if !month_part.bytes().all(|b| b.is_ascii_digit())
            || !year_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let month: u32 = month_part.parse().map_err(|_| invalid())?;
        let year: i32 = year_part.parse().map_err(|_| invalid())?;

        if !(1..=12).contains(&month) || year < MIN_YEAR || year > max_year {
            return Err(invalid());
        }

        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Structural comparison: `Less` means `self` is before `other`.
    pub fn compare(&self, other: &MonthDate) -> Ordering {
        self.cmp(other)
    }

    /// First calendar day of the month, the persisted representation.
    pub fn first_day(&self) -> NaiveDate {
        // year/month are range-checked on construction, day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Truncate a stored date to its month. Stored rows are trusted, so the
    /// client-input year window is not applied here.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month, self.year)
    }
}

/// Fails with `InvalidDateRange` when `start` is after `end`.
pub fn validate_range(start: &MonthDate, end: &MonthDate) -> DomainResult<()> {
    if start.compare(end) == Ordering::Greater {
        return Err(DomainError::InvalidDateRange);
    }
    Ok(())
}

/// An inclusive range of months with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    start: MonthDate,
    end: MonthDate,
}

impl Period {
    pub fn new(start: MonthDate, end: MonthDate) -> DomainResult<Self> {
        validate_range(&start, &end)?;
        Ok(Self { start, end })
    }

    /// Parse both bounds and check their order.
    pub fn parse(start: &str, end: &str) -> DomainResult<Self> {
        Self::new(MonthDate::parse(start)?, MonthDate::parse(end)?)
    }

    pub fn start(&self) -> MonthDate {
        self.start
    }

    pub fn end(&self) -> MonthDate {
        self.end
    }

    /// Whether something active from `start` until `end` (or indefinitely
    /// when `end` is `None`) was active during any month of this period.
    /// Both bounds are inclusive.
    pub fn overlaps(&self, start: MonthDate, end: Option<MonthDate>) -> bool {
        start <= self.end && end.map_or(true, |end| end >= self.start)
    }
}
