//! A date-range selection engine.
//!
//! This crate implements the state machine behind a calendar picker:
//! normalized calendar days, lock/booked/highlighted day sets with
//! configurable boundary inclusivity, a 0/1/2-endpoint pick buffer with
//! swap-on-reversed-pick and repick support, hotel-mode check-in/check-out
//! semantics, and the month bookkeeping that decides which months are
//! visible.
//!
//! It deliberately contains no rendering, positioning, or event wiring;
//! a UI adapter feeds picked days in and renders committed state back out.

mod config;
mod constraint;
mod consts;
mod cursor;
mod date;
mod dateset;
mod format;
mod inclusivity;
mod prelude;
mod selection;
mod types;

pub use config::{ConfigPatch, PickerConfig};
pub use constraint::ErrorCode;
pub use consts::*;
pub use cursor::CalendarCursor;
pub use date::{CalendarDate, ParseError};
pub use dateset::{DateSet, RawDay, RawEntry};
pub use format::Locale;
pub use inclusivity::{Inclusivity, InvalidInclusivity};
pub use selection::PickBuffer;
pub use types::{Day, Month, Year, days_in_month, is_leap_year};

/// A committed selection, as reported to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Single-mode selection
    Single(CalendarDate),
    /// Range-mode selection, start <= end
    Range(CalendarDate, CalendarDate),
}

/// Which bound input triggered the current interaction. Drives
/// scroll-to-date homing and repick seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

/// What a call to [`DatePicker::pick_day`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// The day is locked/booked (or against the pick direction) and was
    /// silently ignored
    Ignored,
    /// The buffer now holds one endpoint of a range
    Pending,
    /// The buffer is satisfactorily full; waiting for [`DatePicker::apply`]
    AwaitingApply,
    /// Auto-apply committed the selection
    Committed,
    /// A constraint rejected the pick; the buffer was emptied and one
    /// `INVALID_RANGE` was emitted
    Rejected,
}

/// Notifications emitted to the surrounding application. All methods
/// default to no-ops; implement only what the application cares about.
pub trait PickerEvents {
    /// A selection was committed.
    fn on_select(&mut self, _selection: &Selection) {}
    /// A pick was rejected.
    fn on_error(&mut self, _code: ErrorCode) {}
    /// A visible month changed through navigation.
    fn on_change_month(&mut self, _anchor: CalendarDate, _slot: usize) {}
}

struct NoopEvents;

impl PickerEvents for NoopEvents {}

/// Maps a day count to a plural category name ("one", "other", ...).
pub type PluralSelector = Box<dyn Fn(i64) -> String>;

/// Fallback plural rule used when no locale-native selector is injected.
/// Zero selects "one"; every other magnitude selects "other".
pub fn fallback_plural_rule(count: i64) -> String {
    if count.abs() == 0 {
        PLURAL_ONE.to_owned()
    } else {
        PLURAL_OTHER.to_owned()
    }
}

/// Day-count tooltip computed during hover preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    /// Nights in hotel mode, inclusive days otherwise; always positive
    pub count: i64,
    /// Rendered text, e.g. "3 days"
    pub text: String,
}

/// Non-committing preview of the range a hover would complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverPreview {
    /// Ordered preview start
    pub start: CalendarDate,
    /// Ordered preview end
    pub end: CalendarDate,
    /// True when the hovered day precedes the pending endpoint
    pub flipped: bool,
    /// Day-count tooltip, when enabled and positive
    pub tooltip: Option<Tooltip>,
}

impl HoverPreview {
    /// True when `day` should render as in-range for this preview.
    pub fn contains(&self, day: CalendarDate) -> bool {
        day.is_between(self.start, self.end, Inclusivity::Closed)
    }
}

/// The selection engine: committed start/end dates, the in-progress pick
/// buffer, constraint sets, and visible-month bookkeeping.
///
/// Every operation is synchronous and runs to completion; the only
/// mutable state is owned by the engine instance.
pub struct DatePicker {
    config: PickerConfig,
    start_date: Option<CalendarDate>,
    end_date: Option<CalendarDate>,
    buffer: PickBuffer,
    cursor: CalendarCursor,
    lock_days: DateSet,
    booked_days: DateSet,
    highlighted_days: DateSet,
    trigger: Option<Bound>,
    events: Box<dyn PickerEvents>,
    plural_selector: PluralSelector,
}

impl DatePicker {
    /// Creates an engine from a configuration, with no events sink.
    pub fn new(config: PickerConfig) -> Self {
        Self::with_events(config, Box::new(NoopEvents))
    }

    /// Creates an engine with an injected events sink.
    pub fn with_events(config: PickerConfig, events: Box<dyn PickerEvents>) -> Self {
        let mut picker = Self {
            start_date: config.start_date,
            end_date: config.end_date,
            buffer: PickBuffer::Empty,
            cursor: CalendarCursor::new(config.number_of_months, CalendarDate::UNIX_EPOCH),
            lock_days: DateSet::default(),
            booked_days: DateSet::default(),
            highlighted_days: DateSet::default(),
            trigger: None,
            events,
            plural_selector: Box::new(fallback_plural_rule),
            config,
        };
        picker.normalize_selection();
        picker.renormalize_day_sets();
        picker.rebuild_cursor();
        picker
    }

    /// Replaces the plural-category selector used for tooltip text.
    pub fn set_plural_selector(&mut self, selector: PluralSelector) {
        self.plural_selector = selector;
    }

    /// Current configuration.
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    // --- committed selection ---

    /// The committed date (single mode), i.e. the committed start.
    pub fn get_date(&self) -> Option<CalendarDate> {
        self.get_start_date()
    }

    pub fn get_start_date(&self) -> Option<CalendarDate> {
        self.start_date
    }

    pub fn get_end_date(&self) -> Option<CalendarDate> {
        self.end_date
    }

    /// The committed selection in the shape the current mode implies.
    pub fn selection(&self) -> Option<Selection> {
        if self.config.single_mode {
            self.start_date.map(Selection::Single)
        } else {
            match (self.start_date, self.end_date) {
                (Some(start), Some(end)) => Some(Selection::Range(start, end)),
                _ => None,
            }
        }
    }

    /// Commits a single date and notifies the application.
    pub fn set_date(&mut self, date: CalendarDate) {
        self.set_start_date(date);
        if let Some(selection) = self.start_date.map(Selection::Single) {
            self.events.on_select(&selection);
        }
    }

    /// Commits the start date without notifying.
    pub fn set_start_date(&mut self, date: CalendarDate) {
        self.start_date = Some(date);
    }

    /// Commits the end date without notifying. Self-correcting: an end
    /// before the committed start swaps the two so start <= end always
    /// holds in committed state.
    pub fn set_end_date(&mut self, date: CalendarDate) {
        self.end_date = Some(date);
        if let Some(start) = self.start_date {
            if start > date {
                self.end_date = Some(start);
                self.start_date = Some(date);
            }
        }
    }

    /// Commits a range and notifies the application. Also stops any
    /// in-flight repick.
    pub fn set_date_range(&mut self, date1: CalendarDate, date2: CalendarDate) {
        self.trigger = None;
        self.set_start_date(date1);
        self.set_end_date(date2);
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            self.events.on_select(&Selection::Range(start, end));
        }
    }

    /// Wipes the committed selection and the pick buffer together. This
    /// is the only operation that resets both. Idempotent.
    pub fn clear_selection(&mut self) {
        self.start_date = None;
        self.end_date = None;
        self.buffer.clear();
    }

    // --- day-set queries and updates ---

    /// True when `day` renders as locked (unpickable).
    pub fn is_day_locked(&self, day: CalendarDate) -> bool {
        self.lock_days
            .contains_day(day, self.config.lock_days_inclusivity)
    }

    /// True when `day` renders as booked. Hotel mode with one pending
    /// endpoint evaluates under `()` so a check-in boundary stays
    /// pickable as a checkout.
    pub fn is_day_booked(&self, day: CalendarDate) -> bool {
        let inclusivity = if self.config.hotel_mode && self.buffer.len() == 1 {
            Inclusivity::Open
        } else {
            self.config.booked_inclusivity()
        };
        self.booked_days.contains_day(day, inclusivity)
    }

    /// True when `day` renders with a highlight.
    pub fn is_day_highlighted(&self, day: CalendarDate) -> bool {
        self.highlighted_days
            .contains_day(day, Inclusivity::Closed)
    }

    /// Replaces the lock-day entries and re-normalizes them.
    pub fn set_lock_days(&mut self, entries: Vec<RawEntry>) {
        self.config.lock_days = entries;
        self.renormalize_day_sets();
    }

    /// Replaces the booked-day entries and re-normalizes them.
    pub fn set_booked_days(&mut self, entries: Vec<RawEntry>) {
        self.config.booked_days = entries;
        self.renormalize_day_sets();
    }

    /// Replaces the highlighted-day entries and re-normalizes them.
    pub fn set_highlighted_days(&mut self, entries: Vec<RawEntry>) {
        self.config.highlighted_days = entries;
        self.renormalize_day_sets();
    }

    // --- picking ---

    /// Current pick buffer state.
    pub fn pick_state(&self) -> PickBuffer {
        self.buffer
    }

    /// Feeds one picked day through the selection state machine.
    pub fn pick_day(&mut self, day: CalendarDate) -> PickOutcome {
        if self.is_day_locked(day) {
            return PickOutcome::Ignored;
        }
        // a first pick may land on a booked day when it is meant as a
        // checkout
        let checkout_first_pick =
            self.config.any_booked_days_as_checkout && self.buffer.is_empty();
        if !checkout_first_pick && self.is_day_booked(day) {
            return PickOutcome::Ignored;
        }

        if let PickBuffer::Pending(first) = self.buffer {
            if !self.config.single_mode {
                if self.config.select_forward_enabled() && day < first {
                    return PickOutcome::Ignored;
                }
                if self.config.select_backward && day > first {
                    return PickOutcome::Ignored;
                }
            }
        }

        if self.config.single_mode {
            // single mode always resets to exactly one pick
            self.buffer = PickBuffer::Pending(day);
        } else {
            if self.buffer.len() == 2 {
                self.buffer.clear();
            }
            self.buffer.push(day);
        }

        if let Err(code) = constraint::validate(
            self.buffer,
            &self.config,
            &self.lock_days,
            &self.booked_days,
        ) {
            self.buffer.clear();
            self.events.on_error(code);
            return PickOutcome::Rejected;
        }

        if self.config.auto_apply {
            match self.buffer {
                PickBuffer::Pending(d) if self.config.single_mode => {
                    self.buffer.clear();
                    self.set_date(d);
                    return PickOutcome::Committed;
                }
                PickBuffer::Complete(start, end) if !self.config.single_mode => {
                    self.buffer.clear();
                    self.set_date_range(start, end);
                    return PickOutcome::Committed;
                }
                _ => {}
            }
        }

        match (self.config.single_mode, self.buffer.len()) {
            (true, 1) | (false, 2) => PickOutcome::AwaitingApply,
            _ => PickOutcome::Pending,
        }
    }

    /// Commits whatever the buffer holds, if it is satisfactorily full
    /// (one endpoint in single mode, two in range mode). Returns whether
    /// anything was committed. The buffer is cleared either way only on
    /// success; callers abandon it with [`cancel`](Self::cancel).
    pub fn apply(&mut self) -> bool {
        match (self.config.single_mode, self.buffer) {
            (true, PickBuffer::Pending(d) | PickBuffer::Complete(d, _)) => {
                self.buffer.clear();
                self.set_date(d);
                true
            }
            (false, PickBuffer::Complete(start, end)) => {
                self.buffer.clear();
                self.set_date_range(start, end);
                true
            }
            _ => false,
        }
    }

    /// Abandons the in-progress pick without touching committed state.
    pub fn cancel(&mut self) {
        self.buffer.clear();
    }

    /// Records which bound input opened the interaction (for repick
    /// seeding) and, when configured, re-homes the visible months to the
    /// committed selection.
    pub fn open(&mut self, bound: Bound) {
        self.trigger = Some(bound);
        if !self.config.scroll_to_date {
            return;
        }
        match bound {
            Bound::Start => {
                if let Some(start) = self.start_date {
                    self.cursor.rehome(start);
                }
            }
            Bound::End => {
                if let Some(end) = self.end_date {
                    // land the end date on the last visible month
                    let back = self.config.number_of_months.saturating_sub(1) as i64;
                    let base = end
                        .first_of_month()
                        .shift_months(-back)
                        .unwrap_or(end.first_of_month());
                    self.cursor.rehome(base);
                }
            }
        }
    }

    /// Mouse-leave: abandons an in-progress repick, restoring the
    /// committed range. Only meaningful when repick is allowed.
    pub fn leave(&mut self) {
        if self.config.allow_repick {
            self.buffer.clear();
        }
    }

    /// Computes the non-committing preview for hovering `day` while one
    /// endpoint is pending. Also seeds the repick buffer from the
    /// committed endpoint opposite the triggering bound.
    pub fn hover(&mut self, day: CalendarDate) -> Option<HoverPreview> {
        if self.config.single_mode || self.is_day_locked(day) || self.is_day_booked(day) {
            return None;
        }

        // seeding only fills an empty buffer; an in-progress pick is
        // never discarded by a hover
        if self.repick_possible() && self.buffer.is_empty() {
            match self.trigger {
                Some(Bound::Start) => {
                    if let Some(end) = self.end_date {
                        self.buffer = PickBuffer::Pending(end);
                    }
                }
                Some(Bound::End) => {
                    if let Some(start) = self.start_date {
                        self.buffer = PickBuffer::Pending(start);
                    }
                }
                None => {}
            }
        }

        let PickBuffer::Pending(anchor) = self.buffer else {
            return None;
        };

        let (start, end, flipped) = if anchor <= day {
            (anchor, day, false)
        } else {
            (day, anchor, true)
        };

        Some(HoverPreview {
            start,
            end,
            flipped,
            tooltip: self.tooltip_for(start, end),
        })
    }

    fn tooltip_for(&self, start: CalendarDate, end: CalendarDate) -> Option<Tooltip> {
        if !self.config.show_tooltip {
            return None;
        }
        let mut count = start.days_until(end);
        if !self.config.hotel_mode {
            // inclusive days rather than nights
            count += 1;
        }
        if count <= 0 {
            return None;
        }
        let category = (self.plural_selector)(count);
        let word = self
            .config
            .tooltip_text
            .get(&category)
            .cloned()
            .unwrap_or_else(|| format!("[{category}]"));
        Some(Tooltip {
            count,
            text: format!("{count} {word}"),
        })
    }

    fn repick_possible(&self) -> bool {
        self.config.allow_repick && self.start_date.is_some() && self.end_date.is_some()
    }

    // --- month navigation ---

    /// Visible month anchors, one per slot.
    pub fn months(&self) -> &[CalendarDate] {
        self.cursor.months()
    }

    /// Points a visible-month slot at `date`'s month.
    pub fn goto_date(&mut self, date: CalendarDate, slot: usize) {
        self.cursor.goto(slot, date);
    }

    /// Advances the calendar one step forward and notifies the
    /// application. In split view the given slot moves by one month;
    /// otherwise slot 0 moves by the number of visible months and the
    /// remaining slots follow.
    pub fn next_month(&mut self, slot: usize) {
        self.step_months(slot, 1);
    }

    /// The backward counterpart of [`next_month`](Self::next_month).
    pub fn previous_month(&mut self, slot: usize) {
        self.step_months(slot, -1);
    }

    fn step_months(&mut self, slot: usize, direction: i64) {
        let (slot, step) = if self.config.split_view {
            (slot, direction)
        } else {
            (0, direction * self.config.number_of_months.max(1) as i64)
        };
        self.cursor.advance(slot, step);
        if !self.config.split_view {
            if let Some(base) = self.cursor.month(0) {
                self.cursor.rehome(base);
            }
        }
        if let Some(anchor) = self.cursor.month(slot) {
            self.events.on_change_month(anchor, slot);
        }
    }

    // --- reconfiguration ---

    /// Merges a partial reconfiguration, re-derives the committed
    /// selection for the (possibly new) mode, re-normalizes all three day
    /// sets, and rebuilds the visible months.
    pub fn set_options(&mut self, mut patch: ConfigPatch) {
        let start = patch.start_date.take();
        let end = patch.end_date.take();
        self.config.apply(patch);

        if let Some(date) = start {
            self.start_date = Some(date);
        }
        if let Some(date) = end {
            self.end_date = Some(date);
        }
        self.normalize_selection();
        self.renormalize_day_sets();
        self.rebuild_cursor();
    }

    /// Collapses a mode-inconsistent committed selection to no selection
    /// rather than surfacing an error.
    fn normalize_selection(&mut self) {
        if self.config.single_mode {
            if self.start_date.is_none() {
                self.end_date = None;
            }
        } else if self.start_date.is_none() || self.end_date.is_none() {
            self.start_date = None;
            self.end_date = None;
        }
    }

    fn renormalize_day_sets(&mut self) {
        self.lock_days = DateSet::normalize(
            &self.config.lock_days,
            self.config.lock_days_pattern(),
            &self.config.locale,
        );
        self.booked_days = DateSet::normalize(
            &self.config.booked_days,
            self.config.booked_days_pattern(),
            &self.config.locale,
        );
        self.highlighted_days = DateSet::normalize(
            &self.config.highlighted_days,
            self.config.highlighted_days_pattern(),
            &self.config.locale,
        );
    }

    fn rebuild_cursor(&mut self) {
        let base = self.start_date.unwrap_or_else(CalendarDate::today);
        self.cursor = CalendarCursor::new(self.config.number_of_months, base);
    }
}
