//! kirinuki-pipeline: edge-based sign cutout (sans-IO).
//!
//! Isolates a single foreground object (a "sign") from an RGBA raster
//! image and produces an output where every pixel outside the object
//! is fully transparent:
//!
//! grayscale -> adaptive edge detection -> contour extraction ->
//! largest-region selection -> boundary resolution -> compositing.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! `image` buffers and returns structured data. Decoding and encoding
//! image files lives in `kirinuki-cli`.
//!
//! Each invocation is independent and stateless: no shared mutable
//! state, no suspension points, so independent images can be processed
//! in parallel at the call site without coordination.

pub mod composite;
pub mod contour;
pub mod edge;
pub mod grayscale;
pub mod mask;
pub mod select;
pub mod types;

pub use types::{
    BoundingBox, Contour, CropConfig, CropError, CropMode, GrayImage, Point, RgbaImage,
    StagedCrop,
};

/// Run the full cutout pipeline.
///
/// # Pipeline steps
///
/// 1. Grayscale reduction
/// 2. Adaptive Canny edge detection + external contour extraction
/// 3. Largest-region selection
/// 4. Boundary resolution (convex hull or bounding box, per `mode`)
/// 5. Transparency compositing
///
/// In [`CropMode::Hull`] the output dimensions equal the input
/// dimensions; in [`CropMode::Crop`] they equal the selected contour's
/// bounding box.
///
/// When edge detection succeeds but region selection finds nothing,
/// the pipeline *soft-fails*: a copy of the unmodified input is
/// returned rather than an error, favoring pipeline continuity.
/// Callers needing to distinguish that case should use
/// [`crop_staged`] and check [`StagedCrop::selected`].
///
/// # Errors
///
/// Returns [`CropError::EmptyInput`] if the image has zero width or
/// height. Returns [`CropError::NoContourFound`] if the threshold
/// search decays to its floor without edge detection ever producing a
/// contour (a pathological input, e.g. a flat-color image).
pub fn crop(image: &RgbaImage, config: &CropConfig) -> Result<RgbaImage, CropError> {
    Ok(crop_staged(image, config)?.output)
}

/// Run the cutout pipeline, preserving every intermediate stage.
///
/// Same semantics as [`crop`]; additionally returns the grayscale
/// image, the accepted edge map and thresholds, all extracted
/// contours, the selected contour, and the resolved mask. The CLI's
/// stage dump is built on this.
///
/// # Errors
///
/// See [`crop`].
pub fn crop_staged(image: &RgbaImage, config: &CropConfig) -> Result<StagedCrop, CropError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(CropError::EmptyInput);
    }

    // 1. Grayscale reduction.
    let gray = grayscale::grayscale(image);

    // 2. Adaptive edge detection + contour extraction. The only hard
    //    failure in the pipeline propagates from here.
    let search = edge::adaptive_contours(
        &gray,
        config.threshold_low,
        config.threshold_high,
        config.threshold_decay,
    )?;

    // 3. Largest-region selection. An empty selection soft-fails to
    //    the identity image: segmentation found nothing to cut, which
    //    is not a system fault.
    let selected = select::largest(&search.contours).cloned();
    let Some(region) = &selected else {
        return Ok(StagedCrop {
            grayscale: gray,
            edges: search.edges,
            threshold_low: search.threshold_low,
            threshold_high: search.threshold_high,
            contours: search.contours,
            selected: None,
            mask: None,
            output: image.clone(),
        });
    };

    // 4 + 5. Boundary resolution and compositing, per output policy.
    let (mask, output) = match config.mode {
        CropMode::Hull => {
            let mask = mask::hull_mask(region, image.width(), image.height());
            let output = composite::apply_mask(image, &mask);
            (Some(mask), output)
        }
        CropMode::Crop => match mask::crop_mask(region) {
            Some((mask, bbox)) => {
                let output = composite::apply_mask_cropped(image, &mask, bbox);
                (Some(mask), output)
            }
            // Unreachable in practice: extraction never yields empty
            // contours. Treated as a soft failure all the same.
            None => (None, image.clone()),
        },
    };

    Ok(StagedCrop {
        grayscale: gray,
        edges: search.edges,
        threshold_low: search.threshold_low,
        threshold_high: search.threshold_high,
        contours: search.contours,
        selected,
        mask,
        output,
    })
}
