//! Boundary resolution: turn the selected contour into a binary mask.
//!
//! Two geometric policies:
//!
//! - [`hull_mask`] fills the convex hull of the contour on a mask the
//!   size of the original canvas (concavities are completed, context
//!   preserved).
//! - [`crop_mask`] fills the exact contour on a mask the size of its
//!   bounding box (tight, pixel-exact).
//!
//! Masks are value 255 inside the region and 0 outside, rebuilt per
//! invocation and never mutated afterwards.

use geo::{ConvexHull, MultiPoint};
use image::{GrayImage, Luma};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};

use crate::types::{BoundingBox, Contour, Point};

const INSIDE: Luma<u8> = Luma([255]);

/// Rasterize the convex hull of `contour` onto a `width`x`height` mask.
///
/// The hull completes the contour: concave notches and gaps left by
/// imperfect edge detection end up inside the region. Contours with
/// fewer than 3 points have no hull interior and are rasterized
/// directly (a point or a line).
#[must_use = "returns the hull mask"]
pub fn hull_mask(contour: &Contour, width: u32, height: u32) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    if contour.len() < 3 {
        fill_polygon(&mut mask, contour.points());
        return mask;
    }

    let points: MultiPoint<f64> = contour
        .points()
        .iter()
        .map(|p| geo::Point::new(f64::from(p.x), f64::from(p.y)))
        .collect();
    let hull = points.convex_hull();
    fill_polygon(&mut mask, &ring_points(&hull));
    mask
}

/// Rasterize the exact contour onto a mask sized to its bounding box.
///
/// Every contour point is translated by `(-box.x, -box.y)` into the
/// box frame before filling. Returns the mask together with the box so
/// the compositor can read source pixels at the un-translated
/// coordinates. `None` only for an empty contour.
#[must_use = "returns the mask and bounding box"]
pub fn crop_mask(contour: &Contour) -> Option<(GrayImage, BoundingBox)> {
    let bbox = contour.bounding_box()?;
    let mut mask = GrayImage::new(bbox.width, bbox.height);
    let translated: Vec<Point> = contour
        .points()
        .iter()
        .map(|p| Point::new(p.x - bbox.x, p.y - bbox.y))
        .collect();
    fill_polygon(&mut mask, &translated);
    Some((mask, bbox))
}

/// Hull exterior ring as integer points.
///
/// Hull vertices are a subset of the integer input points, so rounding
/// is exact.
#[allow(clippy::cast_possible_truncation)]
fn ring_points(hull: &geo::Polygon<f64>) -> Vec<Point> {
    hull.exterior()
        .coords()
        .map(|c| Point::new(c.x.round() as i32, c.y.round() as i32))
        .collect()
}

/// Fill a polygon (boundary included) with [`INSIDE`] on the mask.
///
/// `draw_polygon_mut` rejects rings whose first and last vertices are
/// equal, and degenerates below 3 vertices; both are handled here so
/// callers can pass closed rings and raw contour traces alike.
/// Out-of-bounds geometry is clipped, not an error.
#[allow(clippy::cast_precision_loss)]
fn fill_polygon(mask: &mut GrayImage, points: &[Point]) {
    let mut ring = points.to_vec();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }

    match ring.as_slice() {
        [] => {}
        [p] => {
            if let (Ok(x), Ok(y)) = (u32::try_from(p.x), u32::try_from(p.y)) {
                if x < mask.width() && y < mask.height() {
                    mask.put_pixel(x, y, INSIDE);
                }
            }
        }
        [a, b] => {
            draw_line_segment_mut(
                mask,
                (a.x as f32, a.y as f32),
                (b.x as f32, b.y as f32),
                INSIDE,
            );
        }
        _ => {
            let poly: Vec<imageproc::point::Point<i32>> = ring
                .iter()
                .map(|p| imageproc::point::Point::new(p.x, p.y))
                .collect();
            draw_polygon_mut(mask, &poly, INSIDE);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rect_contour(x: i32, y: i32, w: i32, h: i32) -> Contour {
        Contour::new(vec![
            Point::new(x, y),
            Point::new(x + w - 1, y),
            Point::new(x + w - 1, y + h - 1),
            Point::new(x, y + h - 1),
        ])
    }

    /// L-shaped (non-convex) contour with its corner at the origin.
    fn l_contour() -> Contour {
        Contour::new(vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 4),
            Point::new(4, 4),
            Point::new(4, 10),
            Point::new(0, 10),
        ])
    }

    #[test]
    fn hull_mask_has_canvas_dimensions() {
        let mask = hull_mask(&rect_contour(5, 5, 10, 10), 40, 30);
        assert_eq!(mask.width(), 40);
        assert_eq!(mask.height(), 30);
    }

    #[test]
    fn hull_mask_covers_rectangle_interior() {
        let mask = hull_mask(&rect_contour(5, 5, 10, 10), 40, 30);
        for y in 5..15 {
            for x in 5..15 {
                assert_eq!(mask.get_pixel(x, y).0[0], 255, "pixel ({x}, {y})");
            }
        }
        // Well outside the rectangle stays background.
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
        assert_eq!(mask.get_pixel(30, 25).0[0], 0);
    }

    #[test]
    fn hull_mask_fills_concavity() {
        // The L's notch (e.g. (6, 6)) is outside the exact contour but
        // inside its convex hull.
        let mask = hull_mask(&l_contour(), 12, 12);
        assert_eq!(mask.get_pixel(1, 1).0[0], 255, "inside the L itself");
        assert_eq!(mask.get_pixel(7, 3).0[0], 255, "inside the top arm");
        assert_eq!(mask.get_pixel(6, 6).0[0], 255, "inside the filled notch");
    }

    #[test]
    fn hull_mask_is_superset_of_exact_mask() {
        // Same coordinate frame: the L's bounding box starts at the
        // origin, so the crop mask aligns with an 11x11 hull canvas.
        let contour = l_contour();
        let hull = hull_mask(&contour, 11, 11);
        let (exact, bbox) = crop_mask(&contour).unwrap();
        assert_eq!(bbox.x, 0);
        assert_eq!(bbox.y, 0);

        for y in 0..11 {
            for x in 0..11 {
                if exact.get_pixel(x, y).0[0] == 255 {
                    assert_eq!(
                        hull.get_pixel(x, y).0[0],
                        255,
                        "hull must cover exact-mask pixel ({x}, {y})",
                    );
                }
            }
        }
    }

    #[test]
    fn crop_mask_box_matches_contour_extent() {
        let (mask, bbox) = crop_mask(&rect_contour(75, 85, 50, 30)).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                x: 75,
                y: 85,
                width: 50,
                height: 30,
            },
        );
        assert_eq!(mask.width(), 50);
        assert_eq!(mask.height(), 30);
    }

    #[test]
    fn crop_mask_of_rectangle_is_fully_inside() {
        // A rectangular contour fills its own bounding box completely.
        let (mask, _) = crop_mask(&rect_contour(75, 85, 50, 30)).unwrap();
        for p in mask.pixels() {
            assert_eq!(p.0[0], 255);
        }
    }

    #[test]
    fn crop_mask_of_empty_contour_is_none() {
        assert!(crop_mask(&Contour::new(vec![])).is_none());
    }

    #[test]
    fn degenerate_two_point_contour_draws_a_line() {
        let contour = Contour::new(vec![Point::new(2, 2), Point::new(6, 2)]);
        let mask = hull_mask(&contour, 10, 10);
        for x in 2..=6 {
            assert_eq!(mask.get_pixel(x, 2).0[0], 255, "pixel ({x}, 2)");
        }
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
    }

    #[test]
    fn single_point_contour_marks_one_pixel() {
        let contour = Contour::new(vec![Point::new(3, 4)]);
        let mask = hull_mask(&contour, 10, 10);
        let marked: u32 = mask.pixels().map(|p| u32::from(p.0[0] > 0)).sum();
        assert_eq!(marked, 1);
        assert_eq!(mask.get_pixel(3, 4).0[0], 255);
    }

    #[test]
    fn out_of_canvas_geometry_is_clipped() {
        // Contour extends past the canvas; no panic, partial fill.
        let mask = hull_mask(&rect_contour(5, 5, 20, 20), 10, 10);
        assert_eq!(mask.get_pixel(7, 7).0[0], 255);
    }
}
