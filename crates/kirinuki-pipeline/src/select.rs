//! Largest-region selection: pick the contour enclosing the greatest
//! area.

use crate::types::Contour;

/// Select the contour with the maximum absolute enclosed area.
///
/// Returns `None` for an empty collection. The comparison is strictly
/// greater-than, so the first contour encountered wins ties; the
/// extraction stage enumerates contours in deterministic raster-scan
/// order, making the tie-break stable for identical inputs.
///
/// Callers treat `None` as a soft failure: segmentation found nothing
/// to cut out, so the original image is returned unmodified rather
/// than raising an error.
#[must_use]
pub fn largest(contours: &[Contour]) -> Option<&Contour> {
    let mut best: Option<(&Contour, f64)> = None;
    for contour in contours {
        let area = contour.area();
        match best {
            Some((_, best_area)) if area <= best_area => {}
            _ => best = Some((contour, area)),
        }
    }
    best.map(|(contour, _)| contour)
}
