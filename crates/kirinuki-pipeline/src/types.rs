//! Shared types for the kirinuki cutout pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference
/// intermediate raster data without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbaImage` so downstream crates can reference the
/// source and output images without depending on `image` directly.
pub use image::RgbaImage;

/// A 2D point on the integer pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: i32,
    /// Vertical position (pixels from top edge).
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Convert a pipeline [`Point`] to a `geo::Coord`.
pub(crate) fn point_to_coord(p: Point) -> geo::Coord<f64> {
    geo::Coord {
        x: f64::from(p.x),
        y: f64::from(p.y),
    }
}

/// An ordered sequence of points forming a closed polygonal boundary.
///
/// Produced by contour extraction from a binary edge map. The boundary
/// is implicitly closed: the last point connects back to the first.
/// Upstream detection does not guarantee the absence of
/// self-intersection, so [`area`](Self::area) is defined as the
/// absolute shoelace area, which is well-defined either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour(Vec<Point>);

impl Contour {
    /// Create a new contour from a vector of boundary points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the contour has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of boundary points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all boundary points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the contour and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    /// Absolute enclosed polygon area in square pixels.
    ///
    /// Computed as the unsigned shoelace area of the implicitly closed
    /// boundary. Degenerate contours (fewer than 3 points) have area 0.
    #[must_use]
    pub fn area(&self) -> f64 {
        use geo::Area;

        if self.0.len() < 3 {
            return 0.0;
        }
        let exterior: geo::LineString<f64> =
            self.0.iter().copied().map(point_to_coord).collect();
        geo::Polygon::new(exterior, Vec::new()).unsigned_area()
    }

    /// Minimal axis-aligned rectangle enclosing all boundary points.
    ///
    /// Returns `None` for an empty contour. For a non-empty contour the
    /// box always has width and height of at least 1 (a single point
    /// occupies one pixel).
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let min_x = self.0.iter().map(|p| p.x).min()?;
        let max_x = self.0.iter().map(|p| p.x).max()?;
        let min_y = self.0.iter().map(|p| p.y).min()?;
        let max_y = self.0.iter().map(|p| p.y).max()?;

        Some(BoundingBox {
            x: min_x,
            y: min_y,
            width: u32::try_from(max_x - min_x + 1).ok()?,
            height: u32::try_from(max_y - min_y + 1).ok()?,
        })
    }
}

/// Minimal axis-aligned rectangle enclosing a contour.
///
/// Only used by the crop output policy: the output canvas is sized to
/// `width`×`height` and contour points are translated by `(-x, -y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge in source image coordinates.
    pub x: i32,
    /// Top edge in source image coordinates.
    pub y: i32,
    /// Width in pixels (>= 1 for a non-empty contour).
    pub width: u32,
    /// Height in pixels (>= 1 for a non-empty contour).
    pub height: u32,
}

/// Output policy for the cutout pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CropMode {
    /// Keep the full original canvas and mask with the convex hull of
    /// the selected contour. The hull fills concavities, so the mask is
    /// conservative (over-inclusive) but the canvas context is kept.
    #[default]
    Hull,
    /// Crop the canvas to the selected contour's bounding box and mask
    /// with the exact (non-hull) contour, for consumers that need a
    /// tight, pixel-exact asset.
    Crop,
}

/// Configuration for the cutout pipeline.
///
/// All parameters have sensible defaults; the seed thresholds suit
/// high-contrast photographs and decay automatically for anything
/// fainter.
///
/// # Threshold invariants
///
/// Both seed thresholds should be at least [`edge::MIN_THRESHOLD`]
/// (1.0) and `threshold_low` should not exceed `threshold_high`; both
/// are clamped inside [`edge::canny`] as defense in depth.
/// `threshold_decay` must be greater than 1.0 for the adaptive search
/// to reach its floor; values at or below 1.0 fall back to
/// [`DEFAULT_THRESHOLD_DECAY`](Self::DEFAULT_THRESHOLD_DECAY).
///
/// [`edge::MIN_THRESHOLD`]: crate::edge::MIN_THRESHOLD
/// [`edge::canny`]: crate::edge::canny
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropConfig {
    /// Seed Canny low threshold. Pixels with gradient magnitude between
    /// `threshold_low` and `threshold_high` are edges only if connected
    /// to a strong edge.
    pub threshold_low: f32,

    /// Seed Canny high threshold. Pixels with gradient magnitude above
    /// this value are definite edges.
    pub threshold_high: f32,

    /// Divisor applied to both thresholds after each detection attempt
    /// that produces no contours. Must be greater than 1.0.
    pub threshold_decay: f32,

    /// Which output policy to apply to the selected region.
    pub mode: CropMode,
}

impl CropConfig {
    /// Default seed Canny low threshold.
    pub const DEFAULT_THRESHOLD_LOW: f32 = 100.0;
    /// Default seed Canny high threshold.
    pub const DEFAULT_THRESHOLD_HIGH: f32 = 200.0;
    /// Default threshold decay divisor.
    pub const DEFAULT_THRESHOLD_DECAY: f32 = 1.5;
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            threshold_low: Self::DEFAULT_THRESHOLD_LOW,
            threshold_high: Self::DEFAULT_THRESHOLD_HIGH,
            threshold_decay: Self::DEFAULT_THRESHOLD_DECAY,
            mode: CropMode::default(),
        }
    }
}

/// Result of running the cutout pipeline with all intermediate stage
/// outputs preserved.
///
/// Each field captures the output of one logical pipeline stage, so
/// callers (e.g. the CLI's stage dump) can inspect every step of the
/// processing chain.
///
/// Note: does not derive `PartialEq` because `GrayImage` does not
/// implement it.
#[derive(Debug, Clone)]
pub struct StagedCrop {
    /// Stage 1: grayscale reduction of the source image.
    pub grayscale: GrayImage,
    /// Stage 2: the binary edge map accepted by the adaptive search.
    pub edges: GrayImage,
    /// The threshold pair at which the accepted edge map was produced
    /// (equal to the seeds when the first attempt succeeded).
    pub threshold_low: f32,
    /// See [`threshold_low`](Self::threshold_low).
    pub threshold_high: f32,
    /// Stage 2: all external contours extracted from the edge map.
    pub contours: Vec<Contour>,
    /// Stage 3: the largest-area contour, or `None` when selection
    /// soft-failed and the output is the unmodified input.
    pub selected: Option<Contour>,
    /// Stage 4: the resolved binary mask (canvas-sized in hull mode,
    /// box-sized in crop mode); `None` on soft failure.
    pub mask: Option<GrayImage>,
    /// Stage 5: the final composited RGBA output.
    pub output: RgbaImage,
}

/// Errors that can occur during the cutout pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CropError {
    /// The threshold search decayed below its floor without edge
    /// detection ever producing a contour. Signals a pathological input
    /// such as a pure flat-color image with no detectable structure.
    #[error("no contour found: thresholds decayed to the floor without detecting any edge structure")]
    NoContourFound,

    /// The input image has zero width or height.
    #[error("input image has zero width or height")]
    EmptyInput,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- Point tests ---

    #[test]
    fn point_new() {
        let p = Point::new(3, -4);
        assert_eq!(p.x, 3);
        assert_eq!(p.y, -4);
    }

    #[test]
    fn point_equality() {
        assert_eq!(Point::new(1, 2), Point::new(1, 2));
        assert_ne!(Point::new(1, 2), Point::new(1, 3));
    }

    // --- Contour tests ---

    #[test]
    fn contour_new_and_len() {
        let c = Contour::new(vec![Point::new(0, 0), Point::new(1, 1)]);
        assert_eq!(c.len(), 2);
        assert!(!c.is_empty());
    }

    #[test]
    fn contour_empty() {
        let c = Contour::new(vec![]);
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!(c.bounding_box().is_none());
    }

    #[test]
    fn contour_into_points_returns_owned_vec() {
        let points = vec![Point::new(0, 0), Point::new(1, 1)];
        let c = Contour::new(points.clone());
        assert_eq!(c.into_points(), points);
    }

    #[test]
    fn square_area() {
        let c = Contour::new(vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ]);
        assert!((c.area() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn area_is_orientation_independent() {
        let clockwise = Contour::new(vec![
            Point::new(0, 0),
            Point::new(0, 10),
            Point::new(10, 10),
            Point::new(10, 0),
        ]);
        let counter_clockwise = Contour::new(vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ]);
        assert!((clockwise.area() - counter_clockwise.area()).abs() < f64::EPSILON);
    }

    #[test]
    fn degenerate_contour_has_zero_area() {
        let c = Contour::new(vec![Point::new(0, 0), Point::new(5, 5)]);
        assert!(c.area().abs() < f64::EPSILON);
    }

    #[test]
    fn bounding_box_of_rectangle() {
        let c = Contour::new(vec![
            Point::new(75, 85),
            Point::new(124, 85),
            Point::new(124, 114),
            Point::new(75, 114),
        ]);
        let bbox = c.bounding_box().unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                x: 75,
                y: 85,
                width: 50,
                height: 30,
            },
        );
    }

    #[test]
    fn bounding_box_of_single_point_is_one_pixel() {
        let c = Contour::new(vec![Point::new(7, 9)]);
        let bbox = c.bounding_box().unwrap();
        assert_eq!(bbox.width, 1);
        assert_eq!(bbox.height, 1);
    }

    // --- CropConfig tests ---

    #[test]
    fn crop_config_defaults() {
        let config = CropConfig::default();
        assert!((config.threshold_low - 100.0).abs() < f32::EPSILON);
        assert!((config.threshold_high - 200.0).abs() < f32::EPSILON);
        assert!((config.threshold_decay - 1.5).abs() < f32::EPSILON);
        assert_eq!(config.mode, CropMode::Hull);
    }

    // --- CropError tests ---

    #[test]
    fn error_no_contour_display() {
        let err = CropError::NoContourFound;
        assert!(err.to_string().contains("no contour found"));
    }

    #[test]
    fn error_empty_input_display() {
        let err = CropError::EmptyInput;
        assert_eq!(err.to_string(), "input image has zero width or height");
    }

    // --- Serde round-trip tests ---

    #[test]
    fn contour_serde_round_trip() {
        let c = Contour::new(vec![Point::new(0, 0), Point::new(3, 4), Point::new(0, 4)]);
        let json = serde_json::to_string(&c).unwrap();
        let deserialized: Contour = serde_json::from_str(&json).unwrap();
        assert_eq!(c, deserialized);
    }

    #[test]
    fn crop_config_serde_round_trip() {
        let config = CropConfig {
            threshold_low: 30.0,
            threshold_high: 120.0,
            threshold_decay: 2.0,
            mode: CropMode::Crop,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: CropConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn bounding_box_serde_round_trip() {
        let bbox = BoundingBox {
            x: -2,
            y: 3,
            width: 40,
            height: 50,
        };
        let json = serde_json::to_string(&bbox).unwrap();
        let deserialized: BoundingBox = serde_json::from_str(&json).unwrap();
        assert_eq!(bbox, deserialized);
    }
}
