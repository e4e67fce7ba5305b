//! Calendar day and inclusive year range that select one slice per year.

use crate::WeatherProbabilityError;
use chrono::{Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// A month/day pair, independent of year.
///
/// Validated against a leap year, so February 29 is accepted; in non-leap
/// years it resolves to no date (see [`DayOfYear::in_year`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDayOfYear")]
pub struct DayOfYear {
    month: u32,
    day: u32,
}

#[derive(Deserialize)]
struct RawDayOfYear {
    month: u32,
    day: u32,
}

impl TryFrom<RawDayOfYear> for DayOfYear {
    type Error = WeatherProbabilityError;

    fn try_from(raw: RawDayOfYear) -> Result<Self, Self::Error> {
        DayOfYear::new(raw.month, raw.day)
    }
}

impl DayOfYear {
    /// # Errors
    ///
    /// Returns [`WeatherProbabilityError::InvalidDayOfYear`] if the day does not
    /// exist in that month of a leap year.
    pub fn new(month: u32, day: u32) -> Result<Self, WeatherProbabilityError> {
        NaiveDate::from_ymd_opt(2000, month, day)
            .map(|_| Self { month, day })
            .ok_or(WeatherProbabilityError::InvalidDayOfYear { month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The date of this day in `year`, or `None` for February 29 outside leap years.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

/// Formats as e.g. `August 15`.
impl fmt::Display for DayOfYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("Unknown");
        write!(f, "{} {}", name, self.day)
    }
}

/// Inclusive range of years, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearRange")]
pub struct YearRange {
    #[serde(rename = "start_year")]
    start: i32,
    #[serde(rename = "end_year")]
    end: i32,
}

#[derive(Deserialize)]
struct RawYearRange {
    start_year: i32,
    end_year: i32,
}

impl TryFrom<RawYearRange> for YearRange {
    type Error = WeatherProbabilityError;

    fn try_from(raw: RawYearRange) -> Result<Self, Self::Error> {
        YearRange::new(raw.start_year, raw.end_year)
    }
}

impl YearRange {
    /// # Errors
    ///
    /// Returns [`WeatherProbabilityError::InvalidYearRange`] if `end < start`.
    pub fn new(start: i32, end: i32) -> Result<Self, WeatherProbabilityError> {
        if end < start {
            return Err(WeatherProbabilityError::InvalidYearRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    /// Number of years covered, both ends included.
    pub fn len(&self) -> usize {
        (i64::from(self.end) - i64::from(self.start)) as usize + 1
    }

    /// Never true; a range holds at least one year.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }
}

/// Formats as e.g. `1995-2024`.
impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
