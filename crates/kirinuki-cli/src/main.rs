//! kirinuki: cut a sign out of its background.
//!
//! Decodes an input image, runs the cutout pipeline, and writes the
//! result as a PNG with the background made fully transparent. The
//! optional `--dump-stages` flag writes every pipeline intermediate
//! (grayscale, edge map, mask) for parameter tuning.

#![allow(clippy::print_stderr)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use kirinuki_pipeline::{crop_staged, CropConfig, CropMode};

/// Cut a single sign out of its background, making every pixel outside
/// the detected contour transparent.
#[derive(Parser)]
#[command(name = "kirinuki", version)]
struct Args {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    input: PathBuf,

    /// Output image path (PNG; the alpha channel carries the mask).
    #[arg(short, long)]
    output: PathBuf,

    /// Output policy: keep the full canvas with a convex-hull mask, or
    /// cut the canvas down to the object's bounding box.
    #[arg(long, value_enum, default_value_t = Mode::Hull)]
    mode: Mode,

    /// Seed Canny low threshold.
    #[arg(long, default_value_t = CropConfig::DEFAULT_THRESHOLD_LOW)]
    threshold_low: f32,

    /// Seed Canny high threshold.
    #[arg(long, default_value_t = CropConfig::DEFAULT_THRESHOLD_HIGH)]
    threshold_high: f32,

    /// Divisor applied to both thresholds after each detection attempt
    /// that finds no contours.
    #[arg(long, default_value_t = CropConfig::DEFAULT_THRESHOLD_DECAY)]
    threshold_decay: f32,

    /// Write grayscale, edge-map, and mask intermediates as PNGs into
    /// this directory.
    #[arg(long, value_name = "DIR")]
    dump_stages: Option<PathBuf>,
}

/// CLI-facing mirror of [`CropMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Full canvas, convex-hull mask.
    Hull,
    /// Bounding-box canvas, exact-contour mask.
    Crop,
}

impl From<Mode> for CropMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Hull => Self::Hull,
            Mode::Crop => Self::Crop,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Reading image from {}", args.input.display());
    let image = image::open(&args.input)?.to_rgba8();
    let (width, height) = image.dimensions();

    let config = CropConfig {
        threshold_low: args.threshold_low,
        threshold_high: args.threshold_high,
        threshold_decay: args.threshold_decay,
        mode: args.mode.into(),
    };

    eprintln!("Processing {width}x{height} image...");
    let staged = crop_staged(&image, &config)?;

    if staged.selected.is_none() {
        eprintln!("No region selected; output is the unmodified input.");
    } else {
        let (out_w, out_h) = staged.output.dimensions();
        eprintln!(
            "Accepted thresholds: ({:.1}, {:.1}), {} contour(s), output {out_w}x{out_h}",
            staged.threshold_low,
            staged.threshold_high,
            staged.contours.len(),
        );
    }

    if let Some(dir) = &args.dump_stages {
        std::fs::create_dir_all(dir)?;
        staged.grayscale.save(dir.join("grayscale.png"))?;
        staged.edges.save(dir.join("edges.png"))?;
        if let Some(mask) = &staged.mask {
            mask.save(dir.join("mask.png"))?;
        }
        eprintln!("Stage intermediates written to {}", dir.display());
    }

    staged.output.save(&args.output)?;
    eprintln!("Saved {}", args.output.display());
    Ok(())
}
