#![doc = include_str!("../README.md")]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod figure;
pub mod geometry;
pub mod grayscale;
pub mod image;
pub mod intensity;
pub mod study;
pub mod types;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::ShapeError;
pub use crate::geometry::{normalize, remove_rotation_fill, rotate, Resample, RotateOptions};
pub use crate::grayscale::to_grayscale;
pub use crate::intensity::{
    binary_thresholding, contrast_enhancement, power_function, PointTransform,
};
pub use crate::study::{run_study, StudyReport};
pub use crate::types::CellType;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use cellview::prelude::*;
///
/// let color = ColorImageU8::from_pixel(4, 3, [200, 180, 190]);
/// let gray = to_grayscale(&color).unwrap();
/// let straight = normalize(&gray, 0.0);
/// let negative = binary_thresholding(&straight);
/// assert_eq!((negative.width(), negative.height()), (4, 3));
/// assert!(negative.data().iter().all(|&v| v == 0));
/// ```
pub mod prelude {
    pub use crate::image::{ColorImageU8, GrayImageU8, ImageF32};
    pub use crate::{
        binary_thresholding, contrast_enhancement, normalize, power_function, to_grayscale,
        PointTransform,
    };
}
