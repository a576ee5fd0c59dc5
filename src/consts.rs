/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Months per year, used for month-shift arithmetic
pub const MONTHS_PER_YEAR: i64 = 12;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Days in one Gregorian 400-year era
pub(crate) const ERA_DAYS: i64 = 146_097;
/// Years per Gregorian era
pub(crate) const ERA_YEARS: i64 = 400;
/// Days from 0000-03-01 to 1970-01-01 in the civil-day algorithm
pub(crate) const UNIX_EPOCH_SHIFT: i64 = 719_468;

/// Milliseconds per calendar day
pub const MILLIS_PER_DAY: i64 = 86_400_000;
/// Seconds per calendar day
pub(crate) const SECS_PER_DAY: u64 = 86_400;

/// Default date pattern used by parsing, formatting, and day-set
/// normalization when no other pattern is configured
pub const DEFAULT_FORMAT: &str = "YYYY-MM-DD";

/// Plural category selected for a day count of zero by the fallback rule
pub(crate) const PLURAL_ONE: &str = "one";
/// Plural category selected for any non-zero day count by the fallback rule
pub(crate) const PLURAL_OTHER: &str = "other";
