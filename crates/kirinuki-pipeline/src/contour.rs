//! Contour extraction: closed polygonal boundaries from a binary edge
//! map.
//!
//! Uses Suzuki-Abe border following via
//! [`imageproc::contours::find_contours`], keeping external borders
//! only. Holes and nested boundaries are discarded: the pipeline
//! selects a single outermost region, so inner structure never
//! contributes to the mask.

use image::GrayImage;
use imageproc::contours::BorderType;

use crate::types::{Contour, Point};

/// Extract the external contours of a binary edge map.
///
/// Input: white pixels (255) are edges, black (0) is background.
/// Hole borders are filtered out, as are degenerate traces of fewer
/// than 2 points. The returned order is `find_contours` enumeration
/// order (raster scan), which is deterministic for a given input --
/// the largest-region selector relies on this for stable tie-breaks.
#[must_use = "returns the extracted contours"]
pub fn external_contours(edges: &GrayImage) -> Vec<Contour> {
    let contours: Vec<imageproc::contours::Contour<i32>> =
        imageproc::contours::find_contours(edges);

    contours
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .filter(|c| c.points.len() >= 2)
        .map(|c| {
            Contour::new(
                c.points
                    .into_iter()
                    .map(|p| Point::new(p.x, p.y))
                    .collect(),
            )
        })
        .collect()
}
