//! Flattening of the weather provider's nested records.
//!
//! A record looks like
//!
//! ```json
//! {"dateTime": "2020-06-01T00:00:00Z",
//!  "properties": {"temperature": {"unit": "F", "value": 71.2}}}
//! ```
//!
//! and becomes one row with a `temperature-F` column. A measurement reported
//! in several units across records yields one column per unit, NaN where a
//! record used a different unit. Columns where the provider reported a
//! non-numeric value such as `"n/a"` are dropped.

use std::collections::{BTreeMap, BTreeSet};

use canopy_calendar::parse_date;
use ndarray::Array2;
use serde_json::Value;
use tracing::debug;

use crate::error::WeatherError;
use crate::table::WeatherTable;

/// Converts an array of provider records into a [`WeatherTable`].
///
/// Columns are sorted by name. A `null` or missing value reads as NaN; a
/// column holding any other non-numeric value is dropped.
///
/// # Errors
///
/// - [`WeatherError::MalformedRecord`] if the input is not an array of
///   objects with `dateTime` and `properties`, or a measurement lacks a
///   string `unit`.
/// - [`WeatherError::Calendar`] if a `dateTime` cannot be parsed.
/// - [`WeatherError::DuplicateDate`] if two records share a date.
pub fn flatten_records(records: &Value) -> Result<WeatherTable, WeatherError> {
    let list = records
        .as_array()
        .ok_or_else(|| malformed(0, "expected an array of records"))?;

    let mut dates = Vec::with_capacity(list.len());
    let mut rows: Vec<BTreeMap<String, f64>> = Vec::with_capacity(list.len());
    let mut columns = BTreeSet::new();
    let mut dropped = BTreeSet::new();

    for (index, record) in list.iter().enumerate() {
        let date_time = record
            .get("dateTime")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed(index, "missing string field 'dateTime'"))?;
        let properties = record
            .get("properties")
            .and_then(Value::as_object)
            .ok_or_else(|| malformed(index, "missing object field 'properties'"))?;

        let mut row = BTreeMap::new();
        for (name, measurement) in properties {
            let unit = measurement
                .get("unit")
                .and_then(Value::as_str)
                .ok_or_else(|| malformed(index, &format!("measurement '{name}' has no unit")))?;
            let column = format!("{name}-{unit}");
            let value = match measurement.get("value") {
                None | Some(Value::Null) => f64::NAN,
                Some(v) => match v.as_f64() {
                    Some(v) => v,
                    None => {
                        dropped.insert(column.clone());
                        f64::NAN
                    }
                },
            };
            columns.insert(column.clone());
            row.insert(column, value);
        }

        dates.push(parse_date(date_time)?);
        rows.push(row);
    }

    let params: Vec<String> = columns.difference(&dropped).cloned().collect();
    let mut values = Array2::from_elem((rows.len(), params.len()), f64::NAN);
    for (i, row) in rows.iter().enumerate() {
        for (j, param) in params.iter().enumerate() {
            if let Some(&v) = row.get(param) {
                values[[i, j]] = v;
            }
        }
    }

    debug!(n_records = dates.len(), n_columns = params.len(), "flattened weather records");
    WeatherTable::new(dates, params, values)
}

fn malformed(index: usize, reason: &str) -> WeatherError {
    WeatherError::MalformedRecord {
        index,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_calendar::NaiveDate;
    use serde_json::json;

    #[test]
    fn unit_suffixed_columns() {
        let records = json!([
            {"dateTime": "2020-06-02T00:00:00Z",
             "properties": {"temperature": {"unit": "F", "value": 70.0},
                              "precipitation": {"unit": "in", "value": 0.1}}},
            {"dateTime": "2020-06-01T00:00:00Z",
             "properties": {"temperature": {"unit": "F", "value": 68.0},
                              "precipitation": {"unit": "in", "value": null}}}
        ]);
        let table = flatten_records(&records).unwrap();
        assert_eq!(table.params(), &["precipitation-in", "temperature-F"]);
        assert_eq!(
            table.dates()[0],
            NaiveDate::from_ymd_opt(2020, 6, 1).unwrap()
        );
        assert!(table.values()[[0, 0]].is_nan());
        assert_eq!(table.values()[[0, 1]], 68.0);
        assert_eq!(table.values()[[1, 0]], 0.1);
    }

    #[test]
    fn mixed_units_split_columns() {
        let records = json!([
            {"dateTime": "2020-06-01", "properties": {"t": {"unit": "F", "value": 50.0}}},
            {"dateTime": "2020-06-02", "properties": {"t": {"unit": "C", "value": 10.0}}}
        ]);
        let table = flatten_records(&records).unwrap();
        assert_eq!(table.params(), &["t-C", "t-F"]);
        assert!(table.values()[[0, 0]].is_nan());
        assert_eq!(table.values()[[0, 1]], 50.0);
        assert_eq!(table.values()[[1, 0]], 10.0);
        assert!(table.values()[[1, 1]].is_nan());
    }

    #[test]
    fn not_available_columns_are_dropped() {
        let records = json!([
            {"dateTime": "2020-06-01T00:00:00Z",
             "properties": {"temperature": {"unit": "F", "value": 70.0},
                            "soilMoisture": {"unit": "%", "value": 12.0}}},
            {"dateTime": "2020-06-02T00:00:00Z",
             "properties": {"temperature": {"unit": "F", "value": 71.0},
                            "soilMoisture": {"unit": "%", "value": "n/a"}}}
        ]);
        let table = flatten_records(&records).unwrap();
        assert_eq!(table.params(), &["temperature-F"]);
        assert_eq!(table.values()[[1, 0]], 71.0);
    }

    #[test]
    fn missing_properties_is_malformed() {
        let records = json!([{"dateTime": "2020-06-01"}]);
        let err = flatten_records(&records).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedRecord { index: 0, .. }));
    }

    #[test]
    fn non_array_is_malformed() {
        let err = flatten_records(&json!({"dateTime": "2020-06-01"})).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedRecord { .. }));
    }

    #[test]
    fn bad_date_is_a_calendar_error() {
        let records = json!([{"dateTime": "June 1st", "properties": {}}]);
        let err = flatten_records(&records).unwrap_err();
        assert!(matches!(err, WeatherError::Calendar(_)));
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let records = json!([
            {"dateTime": "2020-06-01T00:00:00Z", "properties": {}},
            {"dateTime": "2020-06-01T12:00:00Z", "properties": {}}
        ]);
        assert!(matches!(
            flatten_records(&records),
            Err(WeatherError::DuplicateDate { .. })
        ));
    }
}
