use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::consts::{
    DEFAULT_FORMAT, ERA_DAYS, ERA_YEARS, MAX_YEAR, MILLIS_PER_DAY, MONTHS_PER_YEAR, SECS_PER_DAY,
    UNIX_EPOCH_SHIFT,
};
use crate::format::{self, Locale};
use crate::inclusivity::Inclusivity;
use crate::types::{Day, Month, Year, days_in_month};

/// Errors produced while constructing or parsing a calendar date.
///
/// Malformed input is always reported as a value, never a panic; callers
/// that prefer the "best effort" policy simply discard the `Err` case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Year outside `1..=9999`.
    #[error("invalid year: {0} (must be 1-{max})", max = MAX_YEAR)]
    InvalidYear(u16),

    /// Month outside `1..=12`.
    #[error("invalid month: {0} (must be 1-12)")]
    InvalidMonth(u8),

    /// Day invalid for the given year and month.
    #[error("invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },

    /// Input text does not match the supplied pattern.
    #[error("input {input:?} does not match format {pattern:?}")]
    FormatMismatch { input: String, pattern: String },

    /// Pattern is missing a year, month, or day token, so no complete
    /// date can be reconstructed from it.
    #[error("format pattern {0:?} cannot produce a full date")]
    IncompletePattern(String),

    /// Empty date string.
    #[error("empty date string")]
    EmptyInput,
}

/// A single Gregorian calendar day.
///
/// The engine treats dates as local-midnight calendar days: there is no
/// time-of-day component, and two values compare equal iff they name the
/// same day, regardless of how they were constructed (string, epoch
/// milliseconds, or another `CalendarDate`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
}

impl CalendarDate {
    /// 1970-01-01.
    pub const UNIX_EPOCH: Self = Self {
        year: Year::EPOCH,
        month: Month::JANUARY,
        day: Day::FIRST,
    };

    /// Creates a date from raw year/month/day components.
    ///
    /// # Errors
    /// Returns a `ParseError` naming the first component out of range.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let y = Year::new(year)?;
        let m = Month::new(month)?;
        let d = Day::new(day, year, month)?;
        Ok(Self {
            year: y,
            month: m,
            day: d,
        })
    }

    /// Creates a date from already-validated components.
    pub const fn new(year: Year, month: Month, day: Day) -> Self {
        Self { year, month, day }
    }

    /// The current day, derived from the system clock at UTC day
    /// granularity.
    pub fn today() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_epoch_day((secs / SECS_PER_DAY) as i64).unwrap_or(Self::UNIX_EPOCH)
    }

    /// Returns the year component
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month component (1-based)
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day-of-month component
    #[inline]
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the typed month, handy for name-table lookups
    #[inline]
    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// Days since 1970-01-01 (may be negative for earlier dates).
    ///
    /// Standard civil-from-days algorithm over 400-year eras.
    pub fn to_epoch_day(self) -> i64 {
        let mut y = i64::from(self.year.get());
        let m = i64::from(self.month.get());
        let d = i64::from(self.day.get());
        if m <= 2 {
            y -= 1;
        }
        let era = y.div_euclid(ERA_YEARS);
        let yoe = y - era * ERA_YEARS;
        let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + d - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * ERA_DAYS + doe - UNIX_EPOCH_SHIFT
    }

    /// Inverse of [`to_epoch_day`](Self::to_epoch_day).
    ///
    /// Returns `None` when the day falls outside years `1..=9999`.
    pub fn from_epoch_day(days: i64) -> Option<Self> {
        let shifted = days + UNIX_EPOCH_SHIFT;
        let era = shifted.div_euclid(ERA_DAYS);
        let doe = shifted - era * ERA_DAYS;
        let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
        let y = yoe + era * ERA_YEARS;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let d = doy - (153 * mp + 2) / 5 + 1;
        let m = if mp < 10 { mp + 3 } else { mp - 9 };
        let y = if m <= 2 { y + 1 } else { y };

        if !(1..=i64::from(MAX_YEAR)).contains(&y) {
            return None;
        }
        Self::from_ymd(y as u16, m as u8, d as u8).ok()
    }

    /// Creates a date from epoch milliseconds, truncating to the UTC day.
    pub fn from_unix_millis(millis: i64) -> Option<Self> {
        Self::from_epoch_day(millis.div_euclid(MILLIS_PER_DAY))
    }

    /// Epoch milliseconds of this day's midnight (UTC baseline).
    pub fn unix_millis(self) -> i64 {
        self.to_epoch_day() * MILLIS_PER_DAY
    }

    /// Day of week, 0 = Sunday through 6 = Saturday.
    pub fn weekday(self) -> u8 {
        // 1970-01-01 was a Thursday
        (self.to_epoch_day() + 4).rem_euclid(7) as u8
    }

    /// Signed whole days from `self` to `other` (`other - self`).
    pub fn days_until(self, other: Self) -> i64 {
        other.to_epoch_day() - self.to_epoch_day()
    }

    /// True when this date lies between `a` and `b` under the given
    /// inclusivity policy. The bounds need not be ordered; they are
    /// min/max'd internally, so swapping `a` and `b` never changes the
    /// result.
    pub fn is_between(self, a: Self, b: Self, inclusivity: Inclusivity) -> bool {
        let (lower, upper) = if a <= b { (a, b) } else { (b, a) };
        let lower_ok = if inclusivity.lower_inclusive() {
            self >= lower
        } else {
            self > lower
        };
        let upper_ok = if inclusivity.upper_inclusive() {
            self <= upper
        } else {
            self < upper
        };
        lower_ok && upper_ok
    }

    /// First day of this date's month.
    pub const fn first_of_month(self) -> Self {
        Self {
            year: self.year,
            month: self.month,
            day: Day::FIRST,
        }
    }

    /// Replaces the day-of-month, rolling over into adjacent months.
    ///
    /// Follows native calendar rollover: day 32 of January becomes
    /// February 1, day 0 becomes the last day of the previous month.
    /// Returns `None` when the result leaves years `1..=9999`.
    pub fn with_day(self, day: i64) -> Option<Self> {
        Self::from_epoch_day(self.first_of_month().to_epoch_day() + day - 1)
    }

    /// Replaces the month (1-based), rolling out-of-range values across
    /// year boundaries: month 13 is January of the next year, month 0 is
    /// December of the previous year. A day-of-month that overflows the
    /// target month rolls forward into the following month.
    ///
    /// Returns `None` when the result leaves years `1..=9999`.
    pub fn with_month(self, month: i64) -> Option<Self> {
        let total = i64::from(self.year.get()) * MONTHS_PER_YEAR + (month - 1);
        let year = total.div_euclid(MONTHS_PER_YEAR);
        let month = total.rem_euclid(MONTHS_PER_YEAR) + 1;
        if !(1..=i64::from(MAX_YEAR)).contains(&year) {
            return None;
        }
        let (year, month) = (year as u16, month as u8);

        let max_day = days_in_month(year, month);
        if self.day.get() <= max_day {
            return Self::from_ymd(year, month, self.day.get()).ok();
        }
        // overflow rolls forward, e.g. Jan 31 shifted to February lands
        // in early March
        let base = Self::from_ymd(year, month, max_day).ok()?;
        Self::from_epoch_day(base.to_epoch_day() + i64::from(self.day.get() - max_day))
    }

    /// Moves the date by a signed number of months, with the same
    /// rollover rules as [`with_month`](Self::with_month).
    pub fn shift_months(self, delta: i64) -> Option<Self> {
        self.with_month(i64::from(self.month.get()) + delta)
    }

    /// Formats this date against a token pattern using the given locale's
    /// month and weekday names.
    pub fn format(&self, pattern: &str, locale: &Locale) -> String {
        format::format_date(*self, pattern, locale)
    }

    /// Parses `input` against a token pattern, the inverse of
    /// [`format`](Self::format).
    ///
    /// # Errors
    /// Returns a `ParseError` when the input does not match the pattern
    /// or names an impossible date.
    pub fn parse(input: &str, pattern: &str, locale: &Locale) -> Result<Self, ParseError> {
        format::parse_date(input, pattern, locale)
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year.get(),
            self.month.get(),
            self.day.get()
        )
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        Self::parse(trimmed, DEFAULT_FORMAT, &Locale::default())
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
