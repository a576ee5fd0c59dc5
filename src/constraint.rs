//! Range validation against lock-day and booked-day sets.

use crate::config::PickerConfig;
use crate::dateset::DateSet;
use crate::inclusivity::Inclusivity;
use crate::prelude::*;
use crate::selection::PickBuffer;

/// Error codes surfaced to the application through the events sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorCode {
    /// The in-progress selection crossed a lock or booked day
    #[display(fmt = "INVALID_RANGE")]
    InvalidRange,
}

/// Validates the pick buffer against the lock and booked sets.
///
/// Both checks read the same unmodified buffer and at most one violation
/// is reported; the caller clears the buffer once on `Err`.
///
/// The lock check only applies to a completed two-endpoint range. The
/// booked check also applies to a lone endpoint (a degenerate range), so
/// that a first pick landing on a booked day is rejected unless the
/// checkout escape hatch allows it; hotel mode relaxes the completed
/// range to exclusive bounds so a checkout may equal another booking's
/// check-in.
pub(crate) fn validate(
    buffer: PickBuffer,
    config: &PickerConfig,
    lock_days: &DateSet,
    booked_days: &DateSet,
) -> Result<(), ErrorCode> {
    let Some((start, end)) = buffer.endpoints() else {
        return Ok(());
    };
    let picked = buffer.len();
    let mut violated = false;

    if config.disallow_lock_days_in_range && !lock_days.is_empty() && picked == 2 {
        violated |= lock_days.intersects(start, end, config.lock_days_inclusivity);
    }

    if config.disallow_booked() && !booked_days.is_empty() {
        let inclusivity = if config.hotel_mode && picked == 2 {
            Inclusivity::Open
        } else {
            config.booked_inclusivity()
        };
        let booked = booked_days.intersects(start, end, inclusivity);
        let checkout_exception = config.any_booked_days_as_checkout && picked == 1;
        violated |= booked && !checkout_exception;
    }

    if violated {
        Err(ErrorCode::InvalidRange)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Locale;
    use crate::test_utils::date;
    use crate::RawEntry;

    fn days(entries: &[RawEntry]) -> DateSet {
        DateSet::normalize(entries, "YYYY-MM-DD", &Locale::default())
    }

    fn complete(y1: u16, m1: u8, d1: u8, y2: u16, m2: u8, d2: u8) -> PickBuffer {
        let mut buffer = PickBuffer::default();
        buffer.push(date(y1, m1, d1));
        buffer.push(date(y2, m2, d2));
        buffer
    }

    #[test]
    fn test_empty_buffer_is_valid() {
        let config = PickerConfig {
            disallow_lock_days_in_range: true,
            disallow_booked_days_in_range: Some(true),
            ..PickerConfig::default()
        };
        let set = days(&["2024-03-07".into()]);
        assert_eq!(validate(PickBuffer::Empty, &config, &set, &set), Ok(()));
    }

    #[test]
    fn test_lock_day_inside_range_rejects() {
        let config = PickerConfig {
            disallow_lock_days_in_range: true,
            ..PickerConfig::default()
        };
        let lock = days(&["2024-03-07".into()]);
        let booked = DateSet::default();

        let buffer = complete(2024, 3, 5, 2024, 3, 10);
        assert_eq!(
            validate(buffer, &config, &lock, &booked),
            Err(ErrorCode::InvalidRange)
        );

        // a single pending endpoint is never lock-checked
        let mut pending = PickBuffer::default();
        pending.push(date(2024, 3, 7));
        assert_eq!(validate(pending, &config, &lock, &booked), Ok(()));
    }

    #[test]
    fn test_lock_check_requires_flag_and_entries() {
        let lock = days(&["2024-03-07".into()]);
        let buffer = complete(2024, 3, 5, 2024, 3, 10);

        // flag off
        let config = PickerConfig::default();
        assert_eq!(validate(buffer, &config, &lock, &DateSet::default()), Ok(()));

        // flag on, empty set
        let config = PickerConfig {
            disallow_lock_days_in_range: true,
            ..PickerConfig::default()
        };
        assert_eq!(
            validate(buffer, &config, &DateSet::default(), &DateSet::default()),
            Ok(())
        );
    }

    #[test]
    fn test_booked_day_inside_range_rejects() {
        let config = PickerConfig {
            disallow_booked_days_in_range: Some(true),
            ..PickerConfig::default()
        };
        let booked = days(&["2024-03-07".into()]);
        let buffer = complete(2024, 3, 5, 2024, 3, 10);
        assert_eq!(
            validate(buffer, &config, &DateSet::default(), &booked),
            Err(ErrorCode::InvalidRange)
        );
    }

    #[test]
    fn test_hotel_mode_relaxes_completed_range_to_exclusive() {
        let config = PickerConfig {
            hotel_mode: true,
            ..PickerConfig::default()
        };
        let booked = days(&["2024-03-10".into()]);

        // checkout on the booked boundary passes under ()
        let buffer = complete(2024, 3, 8, 2024, 3, 10);
        assert_eq!(validate(buffer, &config, &DateSet::default(), &booked), Ok(()));

        // a booked day strictly inside still rejects
        let buffer = complete(2024, 3, 8, 2024, 3, 12);
        assert_eq!(
            validate(buffer, &config, &DateSet::default(), &booked),
            Err(ErrorCode::InvalidRange)
        );
    }

    #[test]
    fn test_checkout_escape_applies_to_first_pick_only() {
        let config = PickerConfig {
            disallow_booked_days_in_range: Some(true),
            any_booked_days_as_checkout: true,
            ..PickerConfig::default()
        };
        let booked = days(&["2024-03-10".into()]);

        // lone endpoint on a booked day is tolerated
        let mut pending = PickBuffer::default();
        pending.push(date(2024, 3, 10));
        assert_eq!(validate(pending, &config, &DateSet::default(), &booked), Ok(()));

        // the completed range is still checked normally
        let buffer = complete(2024, 3, 8, 2024, 3, 12);
        assert_eq!(
            validate(buffer, &config, &DateSet::default(), &booked),
            Err(ErrorCode::InvalidRange)
        );
    }

    #[test]
    fn test_both_checks_same_buffer_single_violation() {
        // both sets violated by the same range: still exactly one error
        let config = PickerConfig {
            disallow_lock_days_in_range: true,
            disallow_booked_days_in_range: Some(true),
            ..PickerConfig::default()
        };
        let lock = days(&["2024-03-06".into()]);
        let booked = days(&["2024-03-07".into()]);
        let buffer = complete(2024, 3, 5, 2024, 3, 10);
        assert_eq!(
            validate(buffer, &config, &lock, &booked),
            Err(ErrorCode::InvalidRange)
        );
    }

    #[test]
    fn test_lock_inclusivity_respected() {
        let config = PickerConfig {
            disallow_lock_days_in_range: true,
            lock_days_inclusivity: Inclusivity::Open,
            ..PickerConfig::default()
        };
        let lock = days(&["2024-03-10".into()]);
        // lock day sits exactly on the upper bound, excluded under ()
        let buffer = complete(2024, 3, 5, 2024, 3, 10);
        assert_eq!(validate(buffer, &config, &lock, &DateSet::default()), Ok(()));
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::InvalidRange.to_string(), "INVALID_RANGE");
    }
}
