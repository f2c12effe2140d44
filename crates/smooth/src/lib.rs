//! # canopy-smooth
//!
//! One-dimensional smoothing and interpolation for irregularly observed
//! vegetation-index series.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["observed (x, y)"] -->|"lowess()"| B["smoothed y"]
//!     B -->|"CubicSpline::fit()"| C["CubicSpline"]
//!     D["daily series with NaN gaps"] -->|"fill_gaps()"| E["filled series"]
//!     C -.->|"used by"| E
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use canopy_smooth::{GapFillConfig, LowessConfig, fill_gaps, lowess};
//!
//! let x = [0.0, 5.0, 10.0, 15.0, 20.0];
//! let y = [0.2, 0.3, 0.5, 0.4, 0.3];
//! let smoothed = lowess(&x, &y, &LowessConfig::default()).unwrap();
//!
//! let daily = [0.2, f64::NAN, f64::NAN, 0.5, f64::NAN, 0.3];
//! let filled = fill_gaps(&daily, &GapFillConfig::default()).unwrap();
//! assert!(filled.iter().all(|v| v.is_finite()));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | [`LowessConfig`] and [`GapFillConfig`] |
//! | `lowess` | Locally weighted linear regression with tricube weights |
//! | `spline` | Not-a-knot cubic spline interpolant |
//! | `gaps` | Gap-limited filling of uniformly spaced series |
//! | `error` | Error types |

mod config;
mod error;
mod gaps;
mod lowess;
mod spline;

pub use config::{GapFillConfig, LowessConfig};
pub use error::SmoothError;
pub use gaps::fill_gaps;
pub use lowess::lowess;
pub use spline::CubicSpline;
