//! Point-wise intensity transforms.
//!
//! Every transform reads an `ImageF32` in the 8-bit scale, maps each sample
//! independently, clamps to `[0, 255]`, truncates to `u8` and finally inverts
//! (`255 - y`). The inversion is part of the output contract: results are
//! shown as negatives.
//!
//! Inputs outside `[0, 255]` are clamped before mapping and reported with a
//! single warning per call.
//!
//! Arithmetic stays in `f32`, the precision of the luma image. Truncation is
//! sensitive to it: a few inputs land one level apart in `f64`.

use crate::image::{GrayImageU8, ImageF32};
use log::warn;
use std::fmt;
use std::str::FromStr;

/// Lower input breakpoint of the contrast stretch.
pub const CONTRAST_IN_A: f32 = 150.0;
/// Upper input breakpoint of the contrast stretch.
///
/// Equal to [`CONTRAST_IN_A`], so the middle segment of the stretch is never
/// taken. The pair is kept as is.
pub const CONTRAST_IN_B: f32 = 150.0;
/// Output level at [`CONTRAST_IN_A`].
pub const CONTRAST_OUT_A: f32 = 0.0;
/// Output level at [`CONTRAST_IN_B`].
pub const CONTRAST_OUT_B: f32 = 255.0;
/// Cut point of the binary threshold (inclusive).
pub const THRESHOLD: f32 = 150.0;
/// Exponent of the power-law remap.
pub const POWER_COEF: f32 = 2.5;

const MAX_LEVEL: f32 = 255.0;

/// Piecewise linear contrast stretch followed by inversion.
pub fn contrast_enhancement(image: &ImageF32) -> GrayImageU8 {
    map_inverted(image, PointTransform::Contrast, stretch_sample)
}

/// `255` at or above [`THRESHOLD`], `0` below, then inverted.
pub fn binary_thresholding(image: &ImageF32) -> GrayImageU8 {
    map_inverted(image, PointTransform::Threshold, |x| {
        if x >= THRESHOLD {
            MAX_LEVEL
        } else {
            0.0
        }
    })
}

/// `255 * (x / 255)^2.5`, then inverted.
pub fn power_function(image: &ImageF32) -> GrayImageU8 {
    map_inverted(image, PointTransform::Power, |x| {
        MAX_LEVEL * (x / MAX_LEVEL).powf(POWER_COEF)
    })
}

fn stretch_sample(x: f32) -> f32 {
    if x < CONTRAST_IN_A {
        CONTRAST_OUT_A * x / CONTRAST_IN_A
    } else if x < CONTRAST_IN_B {
        CONTRAST_OUT_A
            + (CONTRAST_OUT_B - CONTRAST_OUT_A) * (x - CONTRAST_IN_A)
                / (CONTRAST_IN_B - CONTRAST_IN_A)
    } else {
        CONTRAST_OUT_B
            + (MAX_LEVEL - CONTRAST_OUT_B) * (x - CONTRAST_IN_B)
                / (MAX_LEVEL - CONTRAST_IN_B)
    }
}

fn map_inverted(
    image: &ImageF32,
    transform: PointTransform,
    f: impl Fn(f32) -> f32,
) -> GrayImageU8 {
    let out_of_range = image
        .data
        .iter()
        .filter(|v| !(0.0..=255.0).contains(*v))
        .count();
    if out_of_range > 0 {
        warn!(
            "{}: clamped {out_of_range} of {} input samples outside [0, 255]",
            transform.title(),
            image.data.len()
        );
    }

    let data = image
        .data
        .iter()
        .map(|&v| {
            let y = f(v.clamp(0.0, MAX_LEVEL)).clamp(0.0, MAX_LEVEL) as u8;
            u8::MAX - y
        })
        .collect();
    GrayImageU8::new(image.w, image.h, data)
}

/// The three available transforms, selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointTransform {
    Contrast,
    Threshold,
    Power,
}

impl PointTransform {
    pub const ALL: [PointTransform; 3] = [
        PointTransform::Contrast,
        PointTransform::Threshold,
        PointTransform::Power,
    ];

    pub fn apply(self, image: &ImageF32) -> GrayImageU8 {
        match self {
            PointTransform::Contrast => contrast_enhancement(image),
            PointTransform::Threshold => binary_thresholding(image),
            PointTransform::Power => power_function(image),
        }
    }

    /// Human-readable name used in figure titles.
    pub fn title(self) -> &'static str {
        match self {
            PointTransform::Contrast => "Contrast Enhancement",
            PointTransform::Threshold => "Binary Thresholding",
            PointTransform::Power => "Power Function",
        }
    }

    /// Short command-line name.
    pub fn key(self) -> &'static str {
        match self {
            PointTransform::Contrast => "contrast",
            PointTransform::Threshold => "threshold",
            PointTransform::Power => "power",
        }
    }
}

impl fmt::Display for PointTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for PointTransform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PointTransform::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("Unknown transform '{s}' (expected contrast, threshold or power)")
            })
    }
}
