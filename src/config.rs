use std::collections::HashMap;

use crate::consts::DEFAULT_FORMAT;
use crate::date::CalendarDate;
use crate::dateset::RawEntry;
use crate::format::Locale;
use crate::inclusivity::Inclusivity;

/// Engine configuration.
///
/// Tri-state fields (`Option<bool>` / `Option<Inclusivity>`) distinguish
/// "caller chose a value" from "defer to the mode default": hotel mode
/// turns on `disallow_booked_days_in_range` and `select_forward` and uses
/// `[)` booked inclusivity unless the caller set those fields explicitly.
#[derive(Debug, Clone)]
pub struct PickerConfig {
    /// Select exactly one date instead of a range
    pub single_mode: bool,
    /// Allow replacing one endpoint of an already-committed range
    /// without starting over (the UI adapter should leave this off when
    /// only one input field is bound)
    pub allow_repick: bool,
    /// Check-in/check-out semantics: nights instead of inclusive days,
    /// adjacent bookings may share a boundary date
    pub hotel_mode: bool,
    /// Reject a completed range containing any lock day
    pub disallow_lock_days_in_range: bool,
    /// Reject a pick or completed range containing any booked day;
    /// `None` defers to `hotel_mode`
    pub disallow_booked_days_in_range: Option<bool>,
    /// Boundary policy for lock-day checks
    pub lock_days_inclusivity: Inclusivity,
    /// Boundary policy for booked-day checks; `None` means `[)` in hotel
    /// mode and `[]` otherwise
    pub booked_days_inclusivity: Option<Inclusivity>,
    /// Let the first pick land on an otherwise-booked day, treating it
    /// as a checkout; the completed range is still checked normally
    pub any_booked_days_as_checkout: bool,
    /// Ignore a second pick earlier than the pending endpoint; `None`
    /// defers to `hotel_mode`
    pub select_forward: Option<bool>,
    /// Ignore a second pick later than the pending endpoint
    pub select_backward: bool,
    /// Each visible month navigates independently
    pub split_view: bool,
    /// Number of visible months (cursor slots)
    pub number_of_months: usize,
    /// Commit as soon as the buffer is satisfactorily full
    pub auto_apply: bool,
    /// Re-home visible months to the committed selection on open
    pub scroll_to_date: bool,
    /// Compute a day-count tooltip during hover preview
    pub show_tooltip: bool,
    /// Tooltip word per plural category, e.g. {"one": "day", "other": "days"}
    pub tooltip_text: HashMap<String, String>,
    /// Pattern for parsing and formatting dates
    pub format: String,
    /// Pattern override for lock-day entries (falls back to `format`)
    pub lock_days_format: Option<String>,
    /// Pattern override for booked-day entries (falls back to `format`)
    pub booked_days_format: Option<String>,
    /// Pattern override for highlighted-day entries (falls back to `format`)
    pub highlighted_days_format: Option<String>,
    /// Month and weekday names for named format tokens
    pub locale: Locale,
    /// Initially committed start (or single) date
    pub start_date: Option<CalendarDate>,
    /// Initially committed end date
    pub end_date: Option<CalendarDate>,
    /// Days that cannot be selected and invalidate ranges crossing them
    pub lock_days: Vec<RawEntry>,
    /// Days already booked, subject to hotel-mode boundary rules
    pub booked_days: Vec<RawEntry>,
    /// Days rendered with a highlight, with no selection effect
    pub highlighted_days: Vec<RawEntry>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            single_mode: true,
            allow_repick: false,
            hotel_mode: false,
            disallow_lock_days_in_range: false,
            disallow_booked_days_in_range: None,
            lock_days_inclusivity: Inclusivity::Closed,
            booked_days_inclusivity: None,
            any_booked_days_as_checkout: false,
            select_forward: None,
            select_backward: false,
            split_view: false,
            number_of_months: 1,
            auto_apply: true,
            scroll_to_date: true,
            show_tooltip: true,
            tooltip_text: default_tooltip_text(),
            format: DEFAULT_FORMAT.to_owned(),
            lock_days_format: None,
            booked_days_format: None,
            highlighted_days_format: None,
            locale: Locale::default(),
            start_date: None,
            end_date: None,
            lock_days: Vec::new(),
            booked_days: Vec::new(),
            highlighted_days: Vec::new(),
        }
    }
}

fn default_tooltip_text() -> HashMap<String, String> {
    HashMap::from([
        ("one".to_owned(), "day".to_owned()),
        ("other".to_owned(), "days".to_owned()),
    ])
}

impl PickerConfig {
    /// Effective booked-day boundary policy (hotel default `[)`).
    pub fn booked_inclusivity(&self) -> Inclusivity {
        self.booked_days_inclusivity.unwrap_or(if self.hotel_mode {
            Inclusivity::ClosedOpen
        } else {
            Inclusivity::Closed
        })
    }

    /// Whether booked days invalidate picks (hotel default on).
    pub fn disallow_booked(&self) -> bool {
        self.disallow_booked_days_in_range
            .unwrap_or(self.hotel_mode)
    }

    /// Whether a second pick must not precede the first (hotel default on).
    pub fn select_forward_enabled(&self) -> bool {
        self.select_forward.unwrap_or(self.hotel_mode)
    }

    pub(crate) fn lock_days_pattern(&self) -> &str {
        self.lock_days_format.as_deref().unwrap_or(&self.format)
    }

    pub(crate) fn booked_days_pattern(&self) -> &str {
        self.booked_days_format.as_deref().unwrap_or(&self.format)
    }

    pub(crate) fn highlighted_days_pattern(&self) -> &str {
        self.highlighted_days_format
            .as_deref()
            .unwrap_or(&self.format)
    }

    /// Merges a partial reconfiguration. Element bindings are not part of
    /// the engine's configuration at all, so there is nothing to strip.
    pub fn apply(&mut self, patch: ConfigPatch) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = patch.$field {
                    self.$field = value;
                })*
            };
        }

        merge!(
            single_mode,
            allow_repick,
            hotel_mode,
            disallow_lock_days_in_range,
            lock_days_inclusivity,
            any_booked_days_as_checkout,
            select_backward,
            split_view,
            number_of_months,
            auto_apply,
            scroll_to_date,
            show_tooltip,
            tooltip_text,
            format,
            locale,
            lock_days,
            booked_days,
            highlighted_days,
        );

        // tri-state and optional fields replace wholesale when present
        if patch.disallow_booked_days_in_range.is_some() {
            self.disallow_booked_days_in_range = patch.disallow_booked_days_in_range;
        }
        if patch.booked_days_inclusivity.is_some() {
            self.booked_days_inclusivity = patch.booked_days_inclusivity;
        }
        if patch.select_forward.is_some() {
            self.select_forward = patch.select_forward;
        }
        if patch.lock_days_format.is_some() {
            self.lock_days_format = patch.lock_days_format;
        }
        if patch.booked_days_format.is_some() {
            self.booked_days_format = patch.booked_days_format;
        }
        if patch.highlighted_days_format.is_some() {
            self.highlighted_days_format = patch.highlighted_days_format;
        }
    }
}

/// A partial reconfiguration: every reconfigurable field as an `Option`,
/// `None` meaning "leave as is". Committed dates are patched through the
/// engine's `set_options`, which also re-derives selection consistency.
#[derive(Debug, Clone, Default)]
pub struct ConfigPatch {
    pub single_mode: Option<bool>,
    pub allow_repick: Option<bool>,
    pub hotel_mode: Option<bool>,
    pub disallow_lock_days_in_range: Option<bool>,
    pub disallow_booked_days_in_range: Option<bool>,
    pub lock_days_inclusivity: Option<Inclusivity>,
    pub booked_days_inclusivity: Option<Inclusivity>,
    pub any_booked_days_as_checkout: Option<bool>,
    pub select_forward: Option<bool>,
    pub select_backward: Option<bool>,
    pub split_view: Option<bool>,
    pub number_of_months: Option<usize>,
    pub auto_apply: Option<bool>,
    pub scroll_to_date: Option<bool>,
    pub show_tooltip: Option<bool>,
    pub tooltip_text: Option<HashMap<String, String>>,
    pub format: Option<String>,
    pub lock_days_format: Option<String>,
    pub booked_days_format: Option<String>,
    pub highlighted_days_format: Option<String>,
    pub locale: Option<Locale>,
    pub start_date: Option<CalendarDate>,
    pub end_date: Option<CalendarDate>,
    pub lock_days: Option<Vec<RawEntry>>,
    pub booked_days: Option<Vec<RawEntry>>,
    pub highlighted_days: Option<Vec<RawEntry>>,
}
