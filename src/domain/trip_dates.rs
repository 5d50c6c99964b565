use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A calendar date. Inputs carrying a time of day are truncated to the
/// date they were written in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return Ok(Self(date));
        }

        if let Ok(date_time) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(date_time.date_naive()));
        }

        DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .map(|date_time| Self(date_time.date()))
            .ok_or_else(|| ValidationError::new(format!("Invalid date: {trimmed}")))
    }

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn value_of(&self) -> NaiveDate {
        self.0
    }

    pub fn is_after(&self, other: &CalendarDate) -> bool {
        self.0 > other.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// Inclusive date range of a trip. A single-day trip has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripDates {
    start: CalendarDate,
    end: CalendarDate,
}

impl TripDates {
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, ValidationError> {
        if start.is_after(&end) {
            return Err(ValidationError::new(String::from(
                "End date must not be before start date",
            )));
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(CalendarDate::parse(start)?, CalendarDate::parse(end)?)
    }

    pub fn start(&self) -> CalendarDate {
        self.start
    }

    pub fn end(&self) -> CalendarDate {
        self.end
    }
}
