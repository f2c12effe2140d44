//! # canopy-weather
//!
//! Boundary-level daily weather in wide form, one column per
//! unit-suffixed parameter (e.g. `temperature-F`).
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     J["provider JSON"] -->|"flatten_records()"| T["WeatherTable"]
//!     C["weather CSV"] -.->|"canopy-io"| T
//!     T -->|"WeatherStats::from_tables()"| S["WeatherStats"]
//!     S -->|".normalize(table, floor)"| N["normalized WeatherTable"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use canopy_weather::{STD_FLOOR, WeatherStats};
//!
//! let params = vec!["temperature-F".to_string(), "precipitation-in".to_string()];
//! let stats = WeatherStats::from_tables(&[&historical], &params)?;
//! let normalized = stats.normalize(&historical.concat(&forecast)?, STD_FLOOR)?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `table` | [`WeatherTable`] |
//! | `stats` | [`WeatherStats`] and normalization |
//! | `flatten` | Provider record flattening |
//! | `error` | Error types |

mod error;
mod flatten;
mod stats;
mod table;

pub use error::WeatherError;
pub use flatten::flatten_records;
pub use stats::{STD_FLOOR, WeatherStats};
pub use table::WeatherTable;
