//! Affine geotransform of a north-up raster grid.

/// Maps grid indices to map coordinates.
///
/// `x = origin_x + col * pixel_width`, `y = origin_y + row * pixel_height`,
/// where `(origin_x, origin_y)` is the outer corner of pixel `(0, 0)`.
/// `pixel_height` is negative for north-up rasters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    origin_x: f64,
    pixel_width: f64,
    origin_y: f64,
    pixel_height: f64,
}

impl GeoTransform {
    /// Creates a transform from its corner origin and pixel sizes.
    pub fn new(origin_x: f64, pixel_width: f64, origin_y: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            pixel_width,
            origin_y,
            pixel_height,
        }
    }

    /// Builds a transform from the GeoTIFF `ModelPixelScale` and
    /// `ModelTiepoint` tags. Returns `None` if either is too short or the
    /// scale is not positive.
    pub fn from_scale_and_tiepoint(scale: &[f64], tiepoint: &[f64]) -> Option<Self> {
        if scale.len() < 2 || tiepoint.len() < 6 {
            return None;
        }
        let (sx, sy) = (scale[0], scale[1]);
        if !(sx > 0.0 && sy > 0.0) {
            return None;
        }
        let (i, j, x, y) = (tiepoint[0], tiepoint[1], tiepoint[3], tiepoint[4]);
        Some(Self::new(x - i * sx, sx, y + j * sy, -sy))
    }

    /// Builds a transform from the 4x4 row-major GeoTIFF
    /// `ModelTransformation` matrix. Returns `None` for short or rotated
    /// matrices.
    pub fn from_model_transformation(matrix: &[f64]) -> Option<Self> {
        if matrix.len() < 16 || matrix[1] != 0.0 || matrix[4] != 0.0 {
            return None;
        }
        if matrix[0] == 0.0 || matrix[5] == 0.0 {
            return None;
        }
        Some(Self::new(matrix[3], matrix[0], matrix[7], matrix[5]))
    }

    /// X coordinate of the grid's outer corner.
    pub fn origin_x(&self) -> f64 {
        self.origin_x
    }

    /// Pixel size along columns.
    pub fn pixel_width(&self) -> f64 {
        self.pixel_width
    }

    /// Y coordinate of the grid's outer corner.
    pub fn origin_y(&self) -> f64 {
        self.origin_y
    }

    /// Pixel size along rows (negative for north-up).
    pub fn pixel_height(&self) -> f64 {
        self.pixel_height
    }

    /// Centre of pixel `(row, col)` as `(lat, long)`, i.e. `(y, x)`.
    pub fn pixel_center(&self, row: usize, col: usize) -> (f64, f64) {
        let lat = self.origin_y + (row as f64 + 0.5) * self.pixel_height;
        let long = self.origin_x + (col as f64 + 0.5) * self.pixel_width;
        (lat, long)
    }

    /// Compares two transforms component-wise with a relative tolerance.
    pub fn approx_eq(&self, other: &GeoTransform, rel_tol: f64) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= rel_tol * a.abs().max(b.abs()).max(1.0);
        close(self.origin_x, other.origin_x)
            && close(self.pixel_width, other.pixel_width)
            && close(self.origin_y, other.origin_y)
            && close(self.pixel_height, other.pixel_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tiepoint_at_origin() {
        let t = GeoTransform::from_scale_and_tiepoint(
            &[10.0, 10.0, 0.0],
            &[0.0, 0.0, 0.0, 500_000.0, 4_000_000.0, 0.0],
        )
        .unwrap();
        assert_eq!(t, GeoTransform::new(500_000.0, 10.0, 4_000_000.0, -10.0));
    }

    #[test]
    fn tiepoint_off_origin() {
        let t = GeoTransform::from_scale_and_tiepoint(
            &[2.0, 3.0, 0.0],
            &[1.0, 2.0, 0.0, 102.0, 94.0, 0.0],
        )
        .unwrap();
        assert_relative_eq!(t.origin_x(), 100.0);
        assert_relative_eq!(t.origin_y(), 100.0);
    }

    #[test]
    fn short_tags_are_rejected() {
        assert!(GeoTransform::from_scale_and_tiepoint(&[1.0], &[0.0; 6]).is_none());
        assert!(GeoTransform::from_scale_and_tiepoint(&[1.0, 1.0], &[0.0; 3]).is_none());
        assert!(GeoTransform::from_scale_and_tiepoint(&[0.0, 1.0], &[0.0; 6]).is_none());
    }

    #[test]
    fn model_transformation_matrix() {
        let m = [
            0.5, 0.0, 0.0, 30.0, //
            0.0, -0.5, 0.0, 60.0, //
            0.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        let t = GeoTransform::from_model_transformation(&m).unwrap();
        assert_eq!(t, GeoTransform::new(30.0, 0.5, 60.0, -0.5));
    }

    #[test]
    fn rotated_matrix_is_rejected() {
        let mut m = [0.0; 16];
        m[0] = 1.0;
        m[1] = 0.1;
        m[5] = -1.0;
        assert!(GeoTransform::from_model_transformation(&m).is_none());
    }

    #[test]
    fn pixel_center_is_half_a_pixel_in() {
        let t = GeoTransform::new(30.0, 0.5, 60.0, -0.5);
        let (lat, long) = t.pixel_center(0, 0);
        assert_relative_eq!(lat, 59.75);
        assert_relative_eq!(long, 30.25);
        let (lat, long) = t.pixel_center(2, 3);
        assert_relative_eq!(lat, 58.75);
        assert_relative_eq!(long, 31.75);
    }

    #[test]
    fn approx_eq_tolerance() {
        let a = GeoTransform::new(258_012.371, 2.1166, 163_176.638, -2.1168);
        let b = GeoTransform::new(258_012.371 * (1.0 + 1e-12), 2.1166, 163_176.638, -2.1168);
        let c = GeoTransform::new(258_013.0, 2.1166, 163_176.638, -2.1168);
        assert!(a.approx_eq(&b, 1e-9));
        assert!(!a.approx_eq(&c, 1e-9));
    }
}
