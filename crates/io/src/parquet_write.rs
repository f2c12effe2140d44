//! Low-level Parquet column building.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Float64Array, Float64Builder, Int64Array, ListBuilder, RecordBatch,
    StringArray, UInt64Array,
};
use arrow::datatypes::{DataType, Field, Schema};
use canopy_ard::{ArdTable, WindowedSample};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::IoError;
use crate::writer::ArdPart;

/// Schema metadata key of the vegetation variable name.
pub const META_VARIABLE_NAME: &str = "variable_name";
/// Schema metadata key of the input window length.
pub const META_INPUT_DAYS: &str = "input_days";
/// Schema metadata key of the output window length.
pub const META_OUTPUT_DAYS: &str = "output_days";
/// Schema metadata key of the JSON list of weather parameters.
pub const META_WEATHER_PARAMS: &str = "weather_params";

const FLAG_COLUMNS: [&str; 6] = [
    "nan_input_evi",
    "nan_input_w",
    "nan_output_evi",
    "nan_output_w",
    "input_evi_le1",
    "output_evi_le1",
];

fn list_type() -> DataType {
    DataType::List(Arc::new(Field::new("item", DataType::Float64, true)))
}

/// Builds the Arrow schema for ARD rows, with the table layout stored as
/// schema metadata.
///
/// Columns: `boundary_id`, `split` (nullable), `row`, `col`, `lat`, `long`,
/// `window`, the list columns `input_evi`, `input_weather`,
/// `forecast_weather`, `output_evi` (weather flattened day-major), and the
/// six quality flags.
pub(crate) fn build_schema(table: &ArdTable) -> Result<Schema, IoError> {
    let mut fields = vec![
        Field::new("boundary_id", DataType::Utf8, false),
        Field::new("split", DataType::Utf8, true),
        Field::new("row", DataType::UInt64, false),
        Field::new("col", DataType::UInt64, false),
        Field::new("lat", DataType::Float64, false),
        Field::new("long", DataType::Float64, false),
        Field::new("window", DataType::Int64, false),
        Field::new("input_evi", list_type(), false),
        Field::new("input_weather", list_type(), false),
        Field::new("forecast_weather", list_type(), false),
        Field::new("output_evi", list_type(), false),
    ];
    fields.extend(
        FLAG_COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Boolean, false)),
    );

    let params = serde_json::to_string(table.weather_params()).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;
    let metadata = HashMap::from([
        (
            META_VARIABLE_NAME.to_string(),
            table.variable_name().to_string(),
        ),
        (META_INPUT_DAYS.to_string(), table.input_days().to_string()),
        (META_OUTPUT_DAYS.to_string(), table.output_days().to_string()),
        (META_WEATHER_PARAMS.to_string(), params),
    ]);

    Ok(Schema::new(fields).with_metadata(metadata))
}

fn list_column<'a, F, I>(samples: &'a [WindowedSample], values: F) -> ArrayRef
where
    F: Fn(&'a WindowedSample) -> I,
    I: Iterator<Item = &'a f64>,
{
    let mut builder = ListBuilder::new(Float64Builder::new());
    for sample in samples {
        for v in values(sample) {
            builder.values().append_value(*v);
        }
        builder.append(true);
    }
    Arc::new(builder.finish())
}

fn flag_column(samples: &[WindowedSample], flag: usize) -> ArrayRef {
    let values: Vec<bool> = samples
        .iter()
        .map(|s| {
            let f = s.flags;
            [
                f.nan_input_evi,
                f.nan_input_w,
                f.nan_output_evi,
                f.nan_output_w,
                f.input_evi_le1,
                f.output_evi_le1,
            ][flag]
        })
        .collect();
    Arc::new(BooleanArray::from(values))
}

/// Converts one boundary's table into an Arrow [`RecordBatch`].
///
/// The batch schema must match the one returned by [`build_schema`] for a
/// table of the same layout; otherwise the call will fail.
pub(crate) fn ard_to_record_batch(
    part: &ArdPart<'_>,
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let samples = part.table.samples();
    let n = samples.len();

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec![part.boundary_id; n])),
        Arc::new(StringArray::from(vec![part.split.map(|s| s.as_str()); n])),
        Arc::new(UInt64Array::from_iter_values(
            samples.iter().map(|s| s.row as u64),
        )),
        Arc::new(UInt64Array::from_iter_values(
            samples.iter().map(|s| s.col as u64),
        )),
        Arc::new(Float64Array::from_iter_values(samples.iter().map(|s| s.lat))),
        Arc::new(Float64Array::from_iter_values(samples.iter().map(|s| s.long))),
        Arc::new(Int64Array::from_iter_values(samples.iter().map(|s| s.window))),
        list_column(samples, |s| s.input_evi.iter()),
        list_column(samples, |s| s.input_weather.iter()),
        list_column(samples, |s| s.forecast_weather.iter()),
        list_column(samples, |s| s.output_evi.iter()),
    ];
    columns.extend((0..FLAG_COLUMNS.len()).map(|i| flag_column(samples, i)));

    Ok(RecordBatch::try_new(Arc::new(schema.clone()), columns)?)
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Parquet`] if file creation, batch writing, or file
/// finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: &Schema,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}
