//! Transparency compositing: apply a binary mask to RGBA pixel data.
//!
//! Pixels outside the mask become fully transparent black (all four
//! channels zero); pixels inside are copied unchanged. The mask edge
//! is hard -- no anti-aliasing or feathering.
//!
//! Both functions allocate a fresh output buffer and never alias the
//! caller's input.

use image::{GrayImage, Rgba, RgbaImage};

use crate::types::BoundingBox;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Apply a canvas-sized mask to the source image.
///
/// Output dimensions equal source dimensions. A pixel is copied
/// unchanged where the mask value is non-zero and set to `[0, 0, 0, 0]`
/// everywhere else. Coordinates outside the mask's bounds (a smaller
/// mask than the source) are treated as outside the region.
#[must_use = "returns the composited image"]
pub fn apply_mask(image: &RgbaImage, mask: &GrayImage) -> RgbaImage {
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        if mask.get_pixel_checked(x, y).is_none_or(|m| m.0[0] == 0) {
            TRANSPARENT
        } else {
            *image.get_pixel(x, y)
        }
    })
}

/// Apply a box-sized mask, writing into a canvas cropped to the box.
///
/// Output dimensions equal the mask's dimensions. For each output
/// coordinate the source pixel is read at the un-translated position
/// `(bbox.x + x, bbox.y + y)`; positions outside the source canvas
/// stay transparent, as do all pixels where the mask is zero.
#[must_use = "returns the cropped composited image"]
pub fn apply_mask_cropped(image: &RgbaImage, mask: &GrayImage, bbox: BoundingBox) -> RgbaImage {
    RgbaImage::from_fn(mask.width(), mask.height(), |x, y| {
        if mask.get_pixel(x, y).0[0] == 0 {
            return TRANSPARENT;
        }
        let sx = i64::from(bbox.x) + i64::from(x);
        let sy = i64::from(bbox.y) + i64::from(y);
        u32::try_from(sx)
            .ok()
            .zip(u32::try_from(sy).ok())
            .and_then(|(sx, sy)| image.get_pixel_checked(sx, sy))
            .copied()
            .unwrap_or(TRANSPARENT)
    })
}
