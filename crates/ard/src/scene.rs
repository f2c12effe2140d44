//! Scene references.

use std::path::PathBuf;

use canopy_calendar::{CalendarError, NaiveDate, parse_date};
use serde::{Deserialize, Serialize};

/// One single-band raster of a boundary at one acquisition time.
///
/// Field names follow the collaborator's scene table (`filePath`,
/// `sceneDateTime`, `boundaryId`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneRef {
    /// Local path of the raster file.
    #[serde(rename = "filePath")]
    pub file_path: PathBuf,
    /// Acquisition timestamp as reported by the provider.
    #[serde(rename = "sceneDateTime")]
    pub scene_date_time: String,
    /// Boundary the scene was clipped to.
    #[serde(rename = "boundaryId")]
    pub boundary_id: String,
}

impl SceneRef {
    /// Creates a scene reference.
    pub fn new(
        file_path: impl Into<PathBuf>,
        scene_date_time: impl Into<String>,
        boundary_id: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            scene_date_time: scene_date_time.into(),
            boundary_id: boundary_id.into(),
        }
    }

    /// Calendar date of the acquisition.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if the timestamp is malformed.
    pub fn scene_date(&self) -> Result<NaiveDate, CalendarError> {
        parse_date(&self.scene_date_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_date_ignores_time_of_day() {
        let s = SceneRef::new("a.tif", "2021-08-14T23:59:00Z", "farm-1");
        assert_eq!(s.scene_date().unwrap(), NaiveDate::from_ymd_opt(2021, 8, 14).unwrap());
    }

    #[test]
    fn bad_timestamp_is_an_error() {
        let s = SceneRef::new("a.tif", "yesterday", "farm-1");
        assert!(s.scene_date().is_err());
    }
}
