//! # canopy-io
//!
//! Read scene references and weather tables from CSV, persist weather
//! normalization statistics as JSON, and write ARD tables to Parquet.
//! Bridges external file formats into the typed tables of `canopy-ard` and
//! `canopy-weather`.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     S["scenes CSV"] -->|"read_scene_refs()"| R["Vec&lt;SceneRef&gt;"]
//!     W["weather CSV / JSON"] -->|"read_weather()"| T["WeatherTable"]
//!     J["stats JSON"] <-->|"read/write_stats_json()"| N["WeatherStats"]
//!     A["ArdTable"] -->|"write_ard_parquet()"| P["Parquet"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use canopy_io::{ArdPart, WriterConfig, read_scene_refs, write_ard_parquet};
//!
//! let scenes = read_scene_refs(Path::new("satellite_paths.csv"))?;
//! // ... build tables ...
//! let parts = [ArdPart::new("b1", Some(Split::Train), &table)];
//! write_ard_parquet(Path::new("ard.parquet"), &parts, &WriterConfig::default())?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `reader` | Scene reference and weather readers |
//! | `stats_json` | Statistics persistence |
//! | `writer` | [`WriterConfig`] and [`write_ard_parquet`] |
//! | `parquet_write` | Arrow schema and record batches |
//! | `error` | Error types |

mod error;
mod parquet_write;
mod reader;
mod stats_json;
mod writer;

pub use error::IoError;
pub use parquet_write::{
    META_INPUT_DAYS, META_OUTPUT_DAYS, META_VARIABLE_NAME, META_WEATHER_PARAMS,
};
pub use reader::{DATE_COLUMN, read_scene_refs, read_weather, read_weather_csv, read_weather_json};
pub use stats_json::{read_stats_json, write_stats_json};
pub use writer::{ArdPart, Compression, WriterConfig, write_ard_parquet};
