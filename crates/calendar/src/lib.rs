//! # canopy-calendar
//!
//! Pure date arithmetic for the daily Gregorian calendar used by the ARD
//! builder.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["provider timestamp"] -->|"parse_date()"| B["NaiveDate"]
//!     R["DD-MM-YYYY"] -->|"parse_reference_date()"| B
//!     B -->|"DateRange::new()"| C["DateRange"]
//!     C -->|".iter()"| D["daily dates"]
//!     B -->|"WindowSpec::position()"| E["WindowPosition"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use canopy_calendar::{DateRange, WindowRole, WindowSpec, parse_date, parse_reference_date};
//!
//! let reference = parse_reference_date("01-05-2020").unwrap();
//! let spec = WindowSpec::new(30, 10, reference).unwrap();
//!
//! let pos = spec.position(parse_date("2020-06-05T10:30:00Z").unwrap());
//! assert_eq!(pos.index(), 0);
//! assert_eq!(pos.role(), WindowRole::Output);
//!
//! let range = DateRange::new(reference, parse_date("2020-05-31").unwrap()).unwrap();
//! assert_eq!(range.len(), 31);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `date` | Timestamp and reference-date parsing, day offsets |
//! | `range` | Inclusive daily date ranges |
//! | `window` | Floor-division window positioning |
//! | `error` | Error types |

mod date;
mod error;
mod range;
mod window;

pub use date::{day_offset, parse_date, parse_reference_date};
pub use error::CalendarError;
pub use range::DateRange;
pub use window::{WindowPosition, WindowRole, WindowSpec};

pub use chrono::NaiveDate;
