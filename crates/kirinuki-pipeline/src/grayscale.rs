//! Grayscale reduction: collapse an RGBA image to single-channel
//! intensity.
//!
//! This is the first step in the pipeline: decoded RGBA in, `GrayImage`
//! out. Decoding raw bytes is a collaborator responsibility and lives
//! outside this crate.

use image::{GrayImage, Luma, Rgba, RgbaImage};

/// Convert an RGBA image to grayscale.
///
/// Uses the BT.601 luminance weights `0.299*R + 0.587*G + 0.114*B`,
/// rounded to the nearest integer. The alpha channel is ignored: a
/// fully transparent pixel contributes its (usually black) color
/// channels like any other.
///
/// Output dimensions always equal input dimensions.
#[must_use = "returns the grayscale image"]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn grayscale(image: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgba([r, g, b, _]) = *image.get_pixel(x, y);
        let luma = 0.587f32.mul_add(
            f32::from(g),
            0.299f32.mul_add(f32::from(r), 0.114 * f32::from(b)),
        );
        Luma([luma.round() as u8])
    })
}
