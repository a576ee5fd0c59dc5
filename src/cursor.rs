use crate::date::CalendarDate;

/// Tracks which months are visible: one first-of-month anchor per
/// visible slot.
///
/// Slots navigate independently in split view; single-cursor layouts
/// drive slot 0 and re-home the rest as consecutive months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCursor {
    anchors: Vec<CalendarDate>,
}

impl CalendarCursor {
    /// Creates `slots` anchors, slot `i` holding the first of the month
    /// `i` months after `base`'s month.
    pub fn new(slots: usize, base: CalendarDate) -> Self {
        let mut cursor = Self {
            anchors: vec![base.first_of_month(); slots.max(1)],
        };
        cursor.rehome(base);
        cursor
    }

    /// Number of visible month slots.
    pub fn slots(&self) -> usize {
        self.anchors.len()
    }

    /// Anchor for one slot, if the slot exists.
    pub fn month(&self, slot: usize) -> Option<CalendarDate> {
        self.anchors.get(slot).copied()
    }

    /// All visible anchors, in slot order.
    pub fn months(&self) -> &[CalendarDate] {
        &self.anchors
    }

    /// Points a single slot at `date`'s month, leaving other slots alone.
    pub fn goto(&mut self, slot: usize, date: CalendarDate) {
        if let Some(anchor) = self.anchors.get_mut(slot) {
            *anchor = date.first_of_month();
        }
    }

    /// Moves one slot by a signed number of months, rolling across year
    /// boundaries. A move that would leave the representable year range
    /// is ignored and the anchor stays put.
    pub fn advance(&mut self, slot: usize, delta_months: i64) {
        if let Some(anchor) = self.anchors.get_mut(slot) {
            if let Some(moved) = anchor.shift_months(delta_months) {
                *anchor = moved;
            }
        }
    }

    /// Recomputes every anchor as consecutive months starting at `base`'s
    /// month. Slots that would run past the year ceiling clamp to the
    /// last representable month.
    pub fn rehome(&mut self, base: CalendarDate) {
        let first = base.first_of_month();
        for (idx, anchor) in self.anchors.iter_mut().enumerate() {
            *anchor = first.shift_months(idx as i64).unwrap_or(first);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_new_lays_out_consecutive_months() {
        let cursor = CalendarCursor::new(3, date(2024, 11, 15));
        assert_eq!(
            cursor.months(),
            &[date(2024, 11, 1), date(2024, 12, 1), date(2025, 1, 1)]
        );
    }

    #[test]
    fn test_zero_slots_clamps_to_one() {
        let cursor = CalendarCursor::new(0, date(2024, 3, 10));
        assert_eq!(cursor.slots(), 1);
        assert_eq!(cursor.month(0), Some(date(2024, 3, 1)));
    }

    #[test]
    fn test_goto_touches_one_slot() {
        let mut cursor = CalendarCursor::new(2, date(2024, 3, 10));
        cursor.goto(1, date(2025, 7, 20));
        assert_eq!(cursor.month(0), Some(date(2024, 3, 1)));
        assert_eq!(cursor.month(1), Some(date(2025, 7, 1)));

        // out-of-range slot is a no-op
        cursor.goto(5, date(2030, 1, 1));
        assert_eq!(cursor.slots(), 2);
    }

    #[test]
    fn test_advance_rolls_year_boundaries() {
        let mut cursor = CalendarCursor::new(1, date(2024, 12, 5));
        cursor.advance(0, 1);
        assert_eq!(cursor.month(0), Some(date(2025, 1, 1)));
        cursor.advance(0, -13);
        assert_eq!(cursor.month(0), Some(date(2023, 12, 1)));
    }

    #[test]
    fn test_advance_at_year_ceiling_stays_put() {
        let mut cursor = CalendarCursor::new(1, date(9999, 12, 1));
        cursor.advance(0, 1);
        assert_eq!(cursor.month(0), Some(date(9999, 12, 1)));
    }

    #[test]
    fn test_rehome() {
        let mut cursor = CalendarCursor::new(2, date(2024, 3, 10));
        cursor.advance(0, 5);
        cursor.rehome(date(2022, 1, 31));
        assert_eq!(cursor.months(), &[date(2022, 1, 1), date(2022, 2, 1)]);
    }
}
