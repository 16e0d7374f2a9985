//! An optional historical window restricting what the archive returns.

use chrono::{NaiveDate, Utc};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq)]
pub enum DateRangeError {
    #[error("Start date {start} must be before end date {end}")]
    StartNotBeforeEnd { start: NaiveDate, end: NaiveDate },

    #[error("End date {end} must be in the past (historical data only)")]
    EndNotInPast { end: NaiveDate },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    Parse(String, #[source] chrono::ParseError),
}

/// An inclusive range of calendar dates for an archive request.
///
/// The archive only serves historical data, so the end date must lie before
/// the current (UTC) date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range whose end lies before today's date in UTC.
    ///
    /// UTC is ahead of every O'ahu clock, so a range accepted in Honolulu is
    /// never rejected here. Use [`DateRange::new_as_of`] to judge "today" in
    /// another timezone.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        Self::new_as_of(start, end, Utc::now().date_naive())
    }

    /// Parses both dates from `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map_err(|e| DateRangeError::Parse(s.to_string(), e))
        };
        Self::new(parse(start)?, parse(end)?)
    }

    /// Creates a range whose end lies before `today`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{NaiveDate, Utc};
    /// use weather_archive::DateRange;
    ///
    /// let honolulu_today = Utc::now().with_timezone(&chrono_tz::Pacific::Honolulu).date_naive();
    /// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    /// assert!(DateRange::new_as_of(start, end, honolulu_today).is_ok());
    /// ```
    pub fn new_as_of(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Result<Self, DateRangeError> {
        if start >= end {
            return Err(DateRangeError::StartNotBeforeEnd { start, end });
        }
        if end >= today {
            return Err(DateRangeError::EndNotInPast { end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub(crate) fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub(crate) fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}
