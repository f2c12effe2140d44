//! Two-pass slot grouping of joined daily records into windows.
//!
//! Pass one drops days before the reference date and files every packed
//! `[vegetation, weather...]` record into a date-ordered slot of its
//! `(window, role)` bucket. Pass two keeps windows whose input and output
//! slots are all filled and unpacks them into samples.

use std::collections::BTreeMap;
use std::fmt;

use canopy_calendar::{NaiveDate, WindowRole, WindowSpec};
use canopy_raster::Pixel;
use ndarray::Array2;
use tracing::trace;

use crate::error::ArdError;
use crate::sample::WindowedSample;

/// Identifies one slot of one (pixel, window, role) bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotKey {
    /// Grid row.
    pub row: usize,
    /// Grid column.
    pub col: usize,
    /// Window index.
    pub window: i64,
    /// Input or output part.
    pub role: WindowRole,
    /// Day within the part.
    pub slot: usize,
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pixel ({}, {}) window {} {} slot {}",
            self.row, self.col, self.window, self.role, self.slot
        )
    }
}

/// One joined day of one pixel: `[vegetation, weather_0, .., weather_{p-1}]`.
pub(crate) struct PackedDay {
    pub date: NaiveDate,
    pub values: Vec<f64>,
}

struct Bucket {
    input: Vec<Option<Vec<f64>>>,
    output: Vec<Option<Vec<f64>>>,
}

impl Bucket {
    fn new(input_days: usize, output_days: usize) -> Self {
        Self {
            input: vec![None; input_days],
            output: vec![None; output_days],
        }
    }

    fn part_mut(&mut self, role: WindowRole) -> &mut Vec<Option<Vec<f64>>> {
        match role {
            WindowRole::Input => &mut self.input,
            WindowRole::Output => &mut self.output,
        }
    }
}

/// Groups one pixel's joined days into complete windows, ascending by
/// window index.
///
/// # Errors
///
/// Returns [`ArdError::DuplicateEntry`] if two days map to the same slot.
pub(crate) fn window_pixel(
    pixel: &Pixel,
    days: Vec<PackedDay>,
    spec: &WindowSpec,
    n_params: usize,
) -> Result<Vec<WindowedSample>, ArdError> {
    let input_days = spec.input_days() as usize;
    let output_days = spec.output_days() as usize;

    let mut buckets: BTreeMap<i64, Bucket> = BTreeMap::new();
    for day in days {
        let pos = spec.position(day.date);
        if pos.index() < 0 {
            continue;
        }
        let part = buckets
            .entry(pos.index())
            .or_insert_with(|| Bucket::new(input_days, output_days))
            .part_mut(pos.role());
        let slot = &mut part[pos.slot()];
        if slot.is_some() {
            return Err(ArdError::DuplicateEntry {
                key: SlotKey {
                    row: pixel.row,
                    col: pixel.col,
                    window: pos.index(),
                    role: pos.role(),
                    slot: pos.slot(),
                },
            });
        }
        *slot = Some(day.values);
    }

    let mut samples = Vec::new();
    for (window, bucket) in buckets {
        let (Some(input), Some(output)) = (complete(bucket.input), complete(bucket.output)) else {
            trace!(row = pixel.row, col = pixel.col, window, "dropped incomplete window");
            continue;
        };
        let (input_evi, input_weather) = unpack(&input, n_params);
        let (output_evi, forecast_weather) = unpack(&output, n_params);
        samples.push(WindowedSample::new(
            pixel,
            window,
            input_evi,
            input_weather,
            output_evi,
            forecast_weather,
        ));
    }
    Ok(samples)
}

fn complete(part: Vec<Option<Vec<f64>>>) -> Option<Vec<Vec<f64>>> {
    part.into_iter().collect()
}

fn unpack(days: &[Vec<f64>], n_params: usize) -> (Vec<f64>, Array2<f64>) {
    let vegetation = days.iter().map(|d| d[0]).collect();
    let weather = Array2::from_shape_fn((days.len(), n_params), |(i, j)| days[i][j + 1]);
    (vegetation, weather)
}
