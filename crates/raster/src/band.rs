//! Single-band TIFF decoding.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::Array2;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::debug;

use crate::error::RasterError;
use crate::geo::GeoTransform;

/// A decoded raster band and its georeference.
#[derive(Debug, Clone)]
pub struct Band {
    data: Array2<f64>,
    transform: GeoTransform,
}

impl Band {
    /// Creates a band from pixel values in `(row, col)` order.
    pub fn new(data: Array2<f64>, transform: GeoTransform) -> Self {
        Self { data, transform }
    }

    /// Pixel values, `(rows, cols)`.
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Georeference of pixel `(0, 0)`.
    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    /// Grid dimensions as `(rows, cols)`.
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub(crate) fn into_data(self) -> Array2<f64> {
        self.data
    }
}

/// Reads the first image of a TIFF file as a single band.
///
/// Integer and floating-point samples are widened to `f64`. The georeference
/// is taken from the `ModelPixelScale` + `ModelTiepoint` tags, or from
/// `ModelTransformation` when those are absent.
///
/// # Errors
///
/// - [`RasterError::Open`] if the file cannot be opened.
/// - [`RasterError::Decode`] if the TIFF decoder fails.
/// - [`RasterError::UnsupportedSampleFormat`] for non-numeric samples or
///   more than one sample per pixel.
/// - [`RasterError::MissingGeoreference`] if no usable georeference tags
///   are present.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_band(path: impl AsRef<Path>) -> Result<Band, RasterError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| RasterError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let decode_err = |e: tiff::TiffError| RasterError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut decoder = Decoder::new(BufReader::new(file)).map_err(decode_err)?;
    let (width, height) = decoder.dimensions().map_err(decode_err)?;
    let transform = read_transform(&mut decoder, path)?;

    let samples = match decoder.read_image().map_err(decode_err)? {
        DecodingResult::U8(buf) => widen(buf),
        DecodingResult::U16(buf) => widen(buf),
        DecodingResult::U32(buf) => widen(buf),
        DecodingResult::U64(buf) => buf.into_iter().map(|v| v as f64).collect(),
        DecodingResult::I8(buf) => widen(buf),
        DecodingResult::I16(buf) => widen(buf),
        DecodingResult::I32(buf) => widen(buf),
        DecodingResult::I64(buf) => buf.into_iter().map(|v| v as f64).collect(),
        DecodingResult::F32(buf) => widen(buf),
        DecodingResult::F64(buf) => buf,
    };

    let shape = (height as usize, width as usize);
    let data = Array2::from_shape_vec(shape, samples).map_err(|_| {
        RasterError::UnsupportedSampleFormat {
            path: path.to_path_buf(),
        }
    })?;

    debug!(rows = shape.0, cols = shape.1, "decoded band");
    Ok(Band::new(data, transform))
}

fn widen<T: Into<f64>>(buf: Vec<T>) -> Vec<f64> {
    buf.into_iter().map(Into::into).collect()
}

fn read_transform<R: std::io::Read + std::io::Seek>(
    decoder: &mut Decoder<R>,
    path: &Path,
) -> Result<GeoTransform, RasterError> {
    let missing = |reason: &str| RasterError::MissingGeoreference {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let scale = tag_values(decoder, Tag::ModelPixelScaleTag, path)?;
    let tiepoint = tag_values(decoder, Tag::ModelTiepointTag, path)?;
    if let (Some(scale), Some(tiepoint)) = (scale, tiepoint) {
        return GeoTransform::from_scale_and_tiepoint(&scale, &tiepoint)
            .ok_or_else(|| missing("malformed ModelPixelScale/ModelTiepoint tags"));
    }

    match tag_values(decoder, Tag::ModelTransformationTag, path)? {
        Some(matrix) => GeoTransform::from_model_transformation(&matrix)
            .ok_or_else(|| missing("malformed or rotated ModelTransformation tag")),
        None => Err(missing(
            "neither ModelPixelScale/ModelTiepoint nor ModelTransformation is present",
        )),
    }
}

fn tag_values<R: std::io::Read + std::io::Seek>(
    decoder: &mut Decoder<R>,
    tag: Tag,
    path: &Path,
) -> Result<Option<Vec<f64>>, RasterError> {
    let decode_err = |e: tiff::TiffError| RasterError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };
    match decoder.find_tag(tag).map_err(decode_err)? {
        Some(value) => Ok(Some(value.into_f64_vec().map_err(decode_err)?)),
        None => Ok(None),
    }
}
