//! # canopy-raster
//!
//! Decodes single-band GeoTIFF scenes and stacks co-registered scenes into a
//! `(date, row, col)` cube for per-pixel time-series extraction.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["GeoTIFF path"] -->|"read_band()"| B["Band"]
//!     B -->|"SceneStack::from_bands()"| C["SceneStack"]
//!     C -->|".mask_always_zero()"| C
//!     C -->|".subsample(stride)"| D["SceneStack"]
//!     D -->|".pixel_series()"| E["Vec&lt;PixelSeries&gt;"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use canopy_raster::{SceneStack, read_band};
//!
//! let bands = scenes
//!     .iter()
//!     .map(|(date, path)| Ok((*date, read_band(path)?)))
//!     .collect::<Result<Vec<_>, canopy_raster::RasterError>>()?;
//!
//! let mut stack = SceneStack::from_bands(bands)?;
//! stack.mask_always_zero();
//! let series = stack.subsample(2)?.pixel_series();
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `geo` | Affine geotransform and GeoTIFF georeference tags |
//! | `band` | Single-band TIFF decoding |
//! | `stack` | Co-registered scene cube, masking, subsampling |
//! | `pixel` | Pixel identity and observed series |
//! | `error` | Error types |

mod band;
mod error;
mod geo;
mod pixel;
mod stack;

pub use band::{Band, read_band};
pub use error::RasterError;
pub use geo::GeoTransform;
pub use pixel::{Pixel, PixelSeries};
pub use stack::SceneStack;
