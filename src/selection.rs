use crate::date::CalendarDate;

/// The transient in-progress selection: zero, one, or two picked
/// endpoints, distinct from the committed start/end.
///
/// `Complete` always holds an ordered pair; a reversed second pick is
/// swapped on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickBuffer {
    /// Nothing picked yet
    #[default]
    Empty,
    /// One endpoint picked, waiting for the other
    Pending(CalendarDate),
    /// Both endpoints picked, ordered, pre-validation
    Complete(CalendarDate, CalendarDate),
}

impl PickBuffer {
    /// Number of picked endpoints.
    pub const fn len(self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Pending(_) => 1,
            Self::Complete(..) => 2,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Appends an endpoint. A third pick replaces the buffer outright
    /// (callers reset beforehand in range mode; this is the single-mode
    /// behavior). Reaching two endpoints normalizes their order.
    pub fn push(&mut self, day: CalendarDate) {
        *self = match *self {
            Self::Empty | Self::Complete(..) => Self::Pending(day),
            Self::Pending(first) => {
                if first <= day {
                    Self::Complete(first, day)
                } else {
                    Self::Complete(day, first)
                }
            }
        };
    }

    pub fn clear(&mut self) {
        *self = Self::Empty;
    }

    /// The ordered endpoints as a degenerate-or-real range, if any.
    pub const fn endpoints(self) -> Option<(CalendarDate, CalendarDate)> {
        match self {
            Self::Empty => None,
            Self::Pending(d) => Some((d, d)),
            Self::Complete(a, b) => Some((a, b)),
        }
    }
}
