//! Inclusive daily date ranges.

use chrono::{Days, NaiveDate};

use crate::date::day_offset;
use crate::error::CalendarError;

/// An inclusive range of consecutive calendar days.
///
/// A `DateRange` always holds at least one day; the constructor rejects
/// ranges whose end precedes their start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[allow(clippy::len_without_is_empty)]
impl DateRange {
    /// Creates the range `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRange`] if `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if end < start {
            return Err(CalendarError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Smallest range covering every date in `dates`, or `None` if empty.
    pub fn spanning(dates: &[NaiveDate]) -> Option<Self> {
        let start = dates.iter().min()?;
        let end = dates.iter().max()?;
        Some(Self {
            start: *start,
            end: *end,
        })
    }

    /// First day of the range.
    pub fn start(self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    pub fn end(self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range (always >= 1).
    pub fn len(self) -> usize {
        day_offset(self.end, self.start) as usize + 1
    }

    /// Returns `true` if `date` lies within the range.
    pub fn contains(self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Zero-based position of `date` within the range.
    pub fn index_of(self, date: NaiveDate) -> Option<usize> {
        if self.contains(date) {
            Some(day_offset(date, self.start) as usize)
        } else {
            None
        }
    }

    /// The date at zero-based position `index`, or `None` past the end.
    pub fn date_at(self, index: usize) -> Option<NaiveDate> {
        if index >= self.len() {
            return None;
        }
        self.start.checked_add_days(Days::new(index as u64))
    }

    /// Days shared by both ranges, or `None` if they do not overlap.
    pub fn intersect(self, other: DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end < start {
            None
        } else {
            Some(DateRange { start, end })
        }
    }

    /// Iterates over every day of the range in ascending order.
    pub fn iter(self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_day() {
        let r = DateRange::new(ymd(2020, 5, 1), ymd(2020, 5, 1)).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![ymd(2020, 5, 1)]);
    }

    #[test]
    fn inverted_range_rejected() {
        assert_eq!(
            DateRange::new(ymd(2020, 5, 2), ymd(2020, 5, 1)).unwrap_err(),
            CalendarError::InvalidRange {
                start: ymd(2020, 5, 2),
                end: ymd(2020, 5, 1),
            }
        );
    }

    #[test]
    fn leap_year_length() {
        let r = DateRange::new(ymd(2020, 1, 1), ymd(2020, 12, 31)).unwrap();
        assert_eq!(r.len(), 366);
        let r = DateRange::new(ymd(2021, 1, 1), ymd(2021, 12, 31)).unwrap();
        assert_eq!(r.len(), 365);
    }

    #[test]
    fn index_and_date_round_trip() {
        let r = DateRange::new(ymd(2020, 2, 27), ymd(2020, 3, 2)).unwrap();
        assert_eq!(r.index_of(ymd(2020, 2, 29)), Some(2));
        assert_eq!(r.date_at(2), Some(ymd(2020, 2, 29)));
        assert_eq!(r.date_at(4), Some(ymd(2020, 3, 2)));
        assert_eq!(r.date_at(5), None);
        assert_eq!(r.index_of(ymd(2020, 3, 3)), None);
        assert_eq!(r.index_of(ymd(2020, 2, 26)), None);
    }

    #[test]
    fn spanning_unsorted() {
        let dates = [ymd(2020, 6, 3), ymd(2020, 5, 1), ymd(2020, 5, 20)];
        let r = DateRange::spanning(&dates).unwrap();
        assert_eq!(r.start(), ymd(2020, 5, 1));
        assert_eq!(r.end(), ymd(2020, 6, 3));
        assert!(DateRange::spanning(&[]).is_none());
    }

    #[test]
    fn intersect_overlap_and_disjoint() {
        let a = DateRange::new(ymd(2020, 5, 1), ymd(2020, 5, 31)).unwrap();
        let b = DateRange::new(ymd(2020, 5, 20), ymd(2020, 6, 10)).unwrap();
        let c = DateRange::new(ymd(2020, 7, 1), ymd(2020, 7, 2)).unwrap();
        let ab = a.intersect(b).unwrap();
        assert_eq!(ab.start(), ymd(2020, 5, 20));
        assert_eq!(ab.end(), ymd(2020, 5, 31));
        assert!(a.intersect(c).is_none());
    }

    #[test]
    fn iter_crosses_year_boundary() {
        let r = DateRange::new(ymd(2020, 12, 30), ymd(2021, 1, 2)).unwrap();
        let days: Vec<_> = r.iter().collect();
        assert_eq!(
            days,
            vec![
                ymd(2020, 12, 30),
                ymd(2020, 12, 31),
                ymd(2021, 1, 1),
                ymd(2021, 1, 2)
            ]
        );
    }
}
