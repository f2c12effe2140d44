//! # canopy-ard
//!
//! Builds the Analysis-Ready Dataset: fixed-length (input window, forecast
//! window) samples per pixel, combining smoothed and interpolated
//! vegetation-index curves with normalized weather.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph TD
//!     S["SceneRef[]"] -->|"read_band + SceneStack"| C["(date, row, col) cube"]
//!     C -->|"mask, subsample"| P["pixel series"]
//!     P -->|"LOWESS + spline"| V["daily vegetation"]
//!     W["WeatherTable"] -->|"WeatherStats::normalize"| N["normalized weather"]
//!     V --> J["join on date"]
//!     N --> J
//!     J -->|"two-pass slot grouping"| T["ArdTable"]
//!     T -->|".tensors()"| X["ArdTensors"]
//!     T -->|"InferenceBatch::from_table"| I["InferenceBatch"]
//!     B["BoundaryJob[]"] -->|"build_batch (rayon)"| R["BatchReport"]
//!     R -->|"TrainingSet::from_report"| TS["TrainingSet"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use canopy_ard::{ArdConfig, InferenceBatch, build_ard};
//!
//! let table = build_ard(&scenes, &weather, &stats, &config)?;
//! let batch = InferenceBatch::from_table(table)?;
//! let tensors = batch.tensors();
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | [`ArdConfig`] |
//! | `scene` | [`SceneRef`] |
//! | `builder` | [`build_ard`] |
//! | `vegetation` | Per-pixel smoothing and daily interpolation |
//! | `window` | Two-pass slot grouping |
//! | `sample` | [`WindowedSample`] and [`QualityFlags`] |
//! | `table` | [`ArdTable`] and [`QualityReport`] |
//! | `tensor` | [`ArdTensors`] |
//! | `inference` | [`InferenceBatch`] |
//! | `split` | [`Split`] and [`assign_splits`] |
//! | `batch` | [`build_batch`], [`BatchReport`], [`TrainingSet`] |
//! | `error` | Error types |

mod batch;
mod builder;
mod config;
mod error;
mod inference;
mod sample;
mod scene;
mod split;
mod table;
mod tensor;
mod vegetation;
mod window;

pub use batch::{BatchReport, BoundaryArd, BoundaryFailure, BoundaryJob, TrainingSet, build_batch};
pub use builder::build_ard;
pub use config::ArdConfig;
pub use error::{ArdError, ErrorKind};
pub use inference::InferenceBatch;
pub use sample::{QualityFlags, WindowedSample};
pub use scene::SceneRef;
pub use split::{Split, assign_splits};
pub use table::{ArdTable, QualityReport};
pub use tensor::ArdTensors;
pub use window::SlotKey;
