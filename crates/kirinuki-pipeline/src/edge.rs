//! Canny edge detection and the adaptive threshold search.
//!
//! A fixed threshold pair works for high-contrast images but fails on
//! low-contrast or small signs. [`adaptive_contours`] trades edge
//! precision for recall: it runs Canny, extracts contours, and on an
//! empty result divides both thresholds by the decay divisor and tries
//! again, until something closes or the thresholds fall below
//! [`MIN_THRESHOLD`].

use image::GrayImage;

use crate::contour;
use crate::types::{Contour, CropConfig, CropError};

/// Threshold floor for the adaptive search.
///
/// Once either threshold decays below this value the search gives up
/// with [`CropError::NoContourFound`]. A floor of zero would let every
/// pixel with any gradient count as an edge and the search would never
/// terminate meaningfully.
pub const MIN_THRESHOLD: f32 = 1.0;
const _: () = assert!(MIN_THRESHOLD > 0.0);

/// Detect edges using the Canny algorithm.
///
/// Returns a binary image: 255 for edge pixels, 0 for non-edge.
///
/// Both thresholds are clamped to a minimum of [`MIN_THRESHOLD`] and
/// `low_threshold` is clamped to be at most `high_threshold`, so the
/// wrapped `imageproc` call's internal ordering assertion cannot fire
/// regardless of caller input.
#[must_use = "returns the binary edge map"]
pub fn canny(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    let high = high_threshold.max(MIN_THRESHOLD);
    let low = low_threshold.max(MIN_THRESHOLD).min(high);
    imageproc::edges::canny(image, low, high)
}

/// Outcome of a successful adaptive threshold search.
#[derive(Debug, Clone)]
pub struct ContourSearch {
    /// The binary edge map produced at the accepted thresholds.
    pub edges: GrayImage,
    /// The non-empty set of external contours extracted from `edges`.
    pub contours: Vec<Contour>,
    /// The low threshold at which contours were found.
    pub threshold_low: f32,
    /// The high threshold at which contours were found.
    pub threshold_high: f32,
}

/// Upper bound on the number of Canny attempts for a given seed pair.
///
/// The search fails as soon as *either* threshold crosses
/// [`MIN_THRESHOLD`], so the bound is driven by the smaller seed:
/// `floor(log_decay(min(low, high))) + 1`. Seed `(100, 200)` with the
/// default decay of 1.5 yields 12 attempts; seed `(1.4, 1.4)` yields a
/// single attempt.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn attempt_cap(low: f32, high: f32, decay: f32) -> u32 {
    let seed = low.min(high).max(MIN_THRESHOLD);
    let steps = (seed / MIN_THRESHOLD).ln() / decay.ln();
    steps.max(0.0).floor() as u32 + 1
}

/// Find contours, relaxing the Canny thresholds until something closes.
///
/// Runs edge detection at `(low, high)` and extracts external contours.
/// On an empty contour set, divides both thresholds by `decay` and
/// retries. The loop is bounded: [`attempt_cap`] attempts at most, and
/// the floor check inside the loop is the authoritative guard.
///
/// # Errors
///
/// Returns [`CropError::NoContourFound`] when the thresholds decay
/// below [`MIN_THRESHOLD`] without any attempt producing a contour.
/// This signals that edge detection found no structure at all, e.g. a
/// flat-color image.
pub fn adaptive_contours(
    gray: &GrayImage,
    low: f32,
    high: f32,
    decay: f32,
) -> Result<ContourSearch, CropError> {
    // A decay at or below 1.0 would never shrink the thresholds toward
    // the floor; fall back to the default divisor.
    let decay = if decay > 1.0 {
        decay
    } else {
        CropConfig::DEFAULT_THRESHOLD_DECAY
    };

    let (mut low, mut high) = (low, high);
    for _ in 0..attempt_cap(low, high, decay) {
        if low < MIN_THRESHOLD || high < MIN_THRESHOLD {
            break;
        }
        let edges = canny(gray, low, high);
        let contours = contour::external_contours(&edges);
        if !contours.is_empty() {
            return Ok(ContourSearch {
                edges,
                contours,
                threshold_low: low,
                threshold_high: high,
            });
        }
        low /= decay;
        high /= decay;
    }
    Err(CropError::NoContourFound)
}
