//! Floor-division window positioning.
//!
//! The calendar is cut into consecutive blocks of `input_days + output_days`
//! days starting at a reference date. Block `k` covers offsets
//! `[k * total, (k + 1) * total)`; its first `input_days` days are the input
//! part and the rest the output part. Dates before the reference fall into
//! negative blocks.

use chrono::{NaiveDate, TimeDelta};

use crate::date::day_offset;
use crate::error::CalendarError;

/// Which part of a window a day belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WindowRole {
    /// Feature days.
    Input,
    /// Forecast-target days.
    Output,
}

impl WindowRole {
    /// Lower-case label used in logs and output tables.
    pub fn as_str(self) -> &'static str {
        match self {
            WindowRole::Input => "input",
            WindowRole::Output => "output",
        }
    }
}

impl std::fmt::Display for WindowRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a single day falls in the window calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowPosition {
    index: i64,
    offset: u32,
    role: WindowRole,
    slot: usize,
}

impl WindowPosition {
    /// Window index, `floor(day_offset / total_days)`. Negative before the
    /// reference date.
    pub fn index(self) -> i64 {
        self.index
    }

    /// Day within the window, `0..total_days`.
    pub fn offset(self) -> u32 {
        self.offset
    }

    /// Input or output part.
    pub fn role(self) -> WindowRole {
        self.role
    }

    /// Position within the role's part: `0..input_days` or `0..output_days`.
    pub fn slot(self) -> usize {
        self.slot
    }
}

/// Window lengths anchored at a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    input_days: u32,
    output_days: u32,
    reference: NaiveDate,
}

impl WindowSpec {
    /// Creates a window specification.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidWindow`] if either length is zero or
    /// their sum overflows.
    pub fn new(
        input_days: u32,
        output_days: u32,
        reference: NaiveDate,
    ) -> Result<Self, CalendarError> {
        if input_days == 0 || output_days == 0 || input_days.checked_add(output_days).is_none()
        {
            return Err(CalendarError::InvalidWindow {
                input_days,
                output_days,
            });
        }
        Ok(Self {
            input_days,
            output_days,
            reference,
        })
    }

    /// Number of input days per window.
    pub fn input_days(&self) -> u32 {
        self.input_days
    }

    /// Number of output days per window.
    pub fn output_days(&self) -> u32 {
        self.output_days
    }

    /// Day zero of window zero.
    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Full window length in days; cannot overflow after [`WindowSpec::new`].
    pub fn total_days(&self) -> u32 {
        self.input_days + self.output_days
    }

    /// Locates `date` in the window calendar.
    pub fn position(&self, date: NaiveDate) -> WindowPosition {
        let total = i64::from(self.total_days());
        let offset = day_offset(date, self.reference);
        let index = offset.div_euclid(total);
        let remainder = offset.rem_euclid(total) as u32;
        let (role, slot) = if remainder < self.input_days {
            (WindowRole::Input, remainder as usize)
        } else {
            (WindowRole::Output, (remainder - self.input_days) as usize)
        };
        WindowPosition {
            index,
            offset: remainder,
            role,
            slot,
        }
    }

    /// First day of window `index`.
    pub fn window_start(&self, index: i64) -> Option<NaiveDate> {
        let days = index.checked_mul(i64::from(self.total_days()))?;
        self.reference.checked_add_signed(TimeDelta::try_days(days)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn spec() -> WindowSpec {
        WindowSpec::new(30, 10, ymd(2020, 5, 1)).unwrap()
    }

    #[test]
    fn zero_lengths_rejected() {
        assert!(WindowSpec::new(0, 10, ymd(2020, 5, 1)).is_err());
        assert!(WindowSpec::new(30, 0, ymd(2020, 5, 1)).is_err());
    }

    #[test]
    fn overflowing_total_rejected() {
        let err = WindowSpec::new(u32::MAX, 1, ymd(2020, 5, 1)).unwrap_err();
        assert_eq!(
            err,
            CalendarError::InvalidWindow {
                input_days: u32::MAX,
                output_days: 1,
            }
        );
        let widest = WindowSpec::new(u32::MAX - 1, 1, ymd(2020, 5, 1)).unwrap();
        assert_eq!(widest.total_days(), u32::MAX);
    }

    #[test]
    fn reference_day_is_first_input_slot() {
        let pos = spec().position(ymd(2020, 5, 1));
        assert_eq!(pos.index(), 0);
        assert_eq!(pos.offset(), 0);
        assert_eq!(pos.role(), WindowRole::Input);
        assert_eq!(pos.slot(), 0);
    }

    #[test]
    fn last_input_and_first_output() {
        let s = spec();
        let last_in = s.position(ymd(2020, 5, 30));
        assert_eq!(last_in.role(), WindowRole::Input);
        assert_eq!(last_in.slot(), 29);

        let first_out = s.position(ymd(2020, 5, 31));
        assert_eq!(first_out.role(), WindowRole::Output);
        assert_eq!(first_out.slot(), 0);
        assert_eq!(first_out.offset(), 30);
    }

    #[test]
    fn next_window_starts_after_total() {
        let s = spec();
        let last = s.position(ymd(2020, 6, 9));
        assert_eq!(last.index(), 0);
        assert_eq!(last.slot(), 9);

        let next = s.position(ymd(2020, 6, 10));
        assert_eq!(next.index(), 1);
        assert_eq!(next.role(), WindowRole::Input);
        assert_eq!(next.slot(), 0);
    }

    #[test]
    fn dates_before_reference_floor_to_negative() {
        let s = spec();
        let pos = s.position(ymd(2020, 4, 30));
        assert_eq!(pos.index(), -1);
        assert_eq!(pos.offset(), 39);
        assert_eq!(pos.role(), WindowRole::Output);
        assert_eq!(pos.slot(), 9);

        let pos = s.position(ymd(2020, 3, 22));
        assert_eq!(pos.index(), -1);
        assert_eq!(pos.offset(), 0);

        let pos = s.position(ymd(2020, 3, 21));
        assert_eq!(pos.index(), -2);
    }

    #[test]
    fn window_start_round_trip() {
        let s = spec();
        assert_eq!(s.window_start(0), Some(ymd(2020, 5, 1)));
        assert_eq!(s.window_start(1), Some(ymd(2020, 6, 10)));
        assert_eq!(s.window_start(-1), Some(ymd(2020, 3, 22)));
        for k in -3..4 {
            let start = s.window_start(k).unwrap();
            let pos = s.position(start);
            assert_eq!(pos.index(), k);
            assert_eq!(pos.offset(), 0);
        }
    }

    #[test]
    fn role_labels() {
        assert_eq!(WindowRole::Input.as_str(), "input");
        assert_eq!(WindowRole::Output.to_string(), "output");
    }
}
