//! Date parsing for provider timestamps and reference dates.

use chrono::NaiveDate;

use crate::error::CalendarError;

const ISO_DATE: &str = "%Y-%m-%d";
const REFERENCE_DATE: &str = "%d-%m-%Y";

/// Parses the calendar date of a provider timestamp.
///
/// Accepts plain ISO dates (`2020-05-01`) as well as timestamps such as
/// `2020-05-01T10:32:11Z` or `2020-05-01 00:00:00+00:00`. Only the leading
/// `YYYY-MM-DD` is interpreted; the time of day and any offset are ignored,
/// so a scene keeps the local date it was stamped with.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] if the first ten characters are not
/// a valid ISO date.
pub fn parse_date(input: &str) -> Result<NaiveDate, CalendarError> {
    let trimmed = input.trim();
    let head = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(head, ISO_DATE).map_err(|e| CalendarError::InvalidDate {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Parses a window reference date in `DD-MM-YYYY` form.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] if the string does not match the
/// format or names a day that does not exist.
pub fn parse_reference_date(input: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(input.trim(), REFERENCE_DATE).map_err(|e| {
        CalendarError::InvalidDate {
            input: input.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Signed number of days from `reference` to `date`.
pub fn day_offset(date: NaiveDate, reference: NaiveDate) -> i64 {
    date.signed_duration_since(reference).num_days()
}
