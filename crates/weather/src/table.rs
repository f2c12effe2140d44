//! Wide daily weather table.

use canopy_calendar::{DateRange, NaiveDate};
use ndarray::{Array2, ArrayView1, Axis, concatenate};

use crate::error::WeatherError;

/// Daily weather for one boundary: one row per date, one column per
/// parameter. Rows are ascending by date and dates are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherTable {
    dates: Vec<NaiveDate>,
    params: Vec<String>,
    values: Array2<f64>,
}

impl WeatherTable {
    /// Creates a table, sorting rows by date. Missing values are NaN.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::ShapeMismatch`] if `values` is not
    ///   `dates.len() x params.len()`.
    /// - [`WeatherError::DuplicateDate`] if a date repeats.
    pub fn new(
        dates: Vec<NaiveDate>,
        params: Vec<String>,
        values: Array2<f64>,
    ) -> Result<Self, WeatherError> {
        let (rows, cols) = values.dim();
        if rows != dates.len() || cols != params.len() {
            return Err(WeatherError::ShapeMismatch {
                rows,
                cols,
                expected_rows: dates.len(),
                expected_cols: params.len(),
            });
        }

        let mut order: Vec<usize> = (0..rows).collect();
        order.sort_by_key(|&i| dates[i]);
        if let Some(w) = order.windows(2).find(|w| dates[w[0]] == dates[w[1]]) {
            return Err(WeatherError::DuplicateDate { date: dates[w[1]] });
        }

        let sorted_dates = order.iter().map(|&i| dates[i]).collect();
        let sorted_values = values.select(Axis(0), &order);
        Ok(Self {
            dates: sorted_dates,
            params,
            values: sorted_values,
        })
    }

    /// Row dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Column names.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Values, `(dates, params)`.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Values of one parameter, or `None` if absent.
    pub fn column(&self, param: &str) -> Option<ArrayView1<'_, f64>> {
        let j = self.params.iter().position(|p| p == param)?;
        Some(self.values.column(j))
    }

    /// Row index of `date`, or `None` if absent.
    pub fn row_of(&self, date: NaiveDate) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    /// Keeps the given parameters, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::MissingParameter`] for an absent column.
    pub fn select(&self, params: &[String]) -> Result<Self, WeatherError> {
        let idx = params
            .iter()
            .map(|p| {
                self.params
                    .iter()
                    .position(|q| q == p)
                    .ok_or_else(|| WeatherError::MissingParameter { param: p.clone() })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            dates: self.dates.clone(),
            params: params.to_vec(),
            values: self.values.select(Axis(1), &idx),
        })
    }

    /// Appends the rows of `other`, e.g. a forecast after the history.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::ParameterMismatch`] if the columns differ.
    /// - [`WeatherError::DuplicateDate`] if the tables share a date.
    pub fn concat(&self, other: &WeatherTable) -> Result<Self, WeatherError> {
        if self.params != other.params {
            return Err(WeatherError::ParameterMismatch {
                left: self.params.clone(),
                right: other.params.clone(),
            });
        }
        let mut dates = self.dates.clone();
        dates.extend_from_slice(&other.dates);
        let values = concatenate(Axis(0), &[self.values.view(), other.values.view()]).map_err(
            |_| WeatherError::ShapeMismatch {
                rows: other.values.nrows(),
                cols: other.values.ncols(),
                expected_rows: other.dates.len(),
                expected_cols: self.params.len(),
            },
        )?;
        Self::new(dates, self.params.clone(), values)
    }

    /// Inclusive range from the first to the last row date, or `None` for
    /// an empty table.
    pub fn date_span(&self) -> Option<DateRange> {
        DateRange::spanning(&self.dates)
    }
}
