//! Same-size rotation and removal of the rotation padding.
//!
//! Rotation uses inverse mapping: the center `(x + 0.5, y + 0.5)` of every
//! output pixel is rotated back about the image center `(w / 2, h / 2)` and
//! sampled from the source. Positive angles turn the content
//! counter-clockwise. The canvas keeps its size, so corners are cropped and
//! uncovered regions take the fill value.
//!
//! After rotation every sample `<= ROTATION_FILL_CUTOFF` is replaced with
//! white. This is a lossy heuristic: genuinely dark pixels at or below the
//! cutoff are whitened too, not only the padding.

use crate::image::{ImageF32, ImageViewMut};
use nalgebra::{Point2, Rotation2};

/// Samples at or below this value are treated as rotation padding.
pub const ROTATION_FILL_CUTOFF: f32 = 20.0;
/// Replacement for rotation padding.
pub const WHITE: f32 = 255.0;

/// Resampling filter used by [`rotate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Resample {
    /// Source sample at the floor of the mapped coordinate.
    #[default]
    Nearest,
    /// Bilinear blend of the four nearest source samples.
    Bilinear,
}

/// Options controlling [`rotate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotateOptions {
    pub resample: Resample,
    /// Value written where the rotated source does not cover the canvas.
    pub fill: f32,
}

impl Default for RotateOptions {
    fn default() -> Self {
        Self {
            resample: Resample::Nearest,
            fill: 0.0,
        }
    }
}

impl RotateOptions {
    pub fn with_resample(mut self, resample: Resample) -> Self {
        self.resample = resample;
        self
    }

    pub fn with_fill(mut self, fill: f32) -> Self {
        self.fill = fill;
        self
    }
}

/// Rotate `image` by `angle_deg` degrees about its center, keeping its size.
pub fn rotate(image: &ImageF32, angle_deg: f32, options: &RotateOptions) -> ImageF32 {
    if angle_deg % 360.0 == 0.0 {
        return image.clone();
    }

    let center = Point2::new(image.w as f32 * 0.5, image.h as f32 * 0.5);
    let inverse = Rotation2::new(angle_deg.to_radians());
    let mut out = ImageF32::filled(image.w, image.h, options.fill);
    for y in 0..out.h {
        let dst_row = out.row_mut(y);
        for (x, dst_px) in dst_row.iter_mut().enumerate() {
            let p = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
            let src = center + inverse * (p - center);
            *dst_px = match options.resample {
                Resample::Nearest => sample_nearest(image, src.x, src.y, options.fill),
                Resample::Bilinear => sample_bilinear(image, src.x, src.y, options.fill),
            };
        }
    }
    out
}

/// Replace every sample `<= ROTATION_FILL_CUTOFF` with [`WHITE`].
pub fn remove_rotation_fill(image: &ImageF32) -> ImageF32 {
    image.map(|v| if v <= ROTATION_FILL_CUTOFF { WHITE } else { v })
}

/// Rotate with the default options, then whiten the padding.
pub fn normalize(image: &ImageF32, angle_deg: f32) -> ImageF32 {
    let rotated = rotate(image, angle_deg, &RotateOptions::default());
    remove_rotation_fill(&rotated)
}

#[inline]
fn inside(image: &ImageF32, x: f32, y: f32) -> bool {
    x >= 0.0 && y >= 0.0 && x < image.w as f32 && y < image.h as f32
}

fn sample_nearest(image: &ImageF32, x: f32, y: f32, fill: f32) -> f32 {
    if !inside(image, x, y) {
        return fill;
    }
    let xi = (x as usize).min(image.w - 1);
    let yi = (y as usize).min(image.h - 1);
    image.get(xi, yi)
}

fn sample_bilinear(image: &ImageF32, x: f32, y: f32, fill: f32) -> f32 {
    if !inside(image, x, y) {
        return fill;
    }
    // Shift from pixel-center coordinates to sample indices.
    let fx = x - 0.5;
    let fy = y - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let (x0, y0) = (x0 as isize, y0 as isize);
    let xa = clamp_index(x0, image.w);
    let xb = clamp_index(x0 + 1, image.w);
    let ya = clamp_index(y0, image.h);
    let yb = clamp_index(y0 + 1, image.h);
    let top = image.get(xa, ya) * (1.0 - tx) + image.get(xb, ya) * tx;
    let bottom = image.get(xa, yb) * (1.0 - tx) + image.get(xb, yb) * tx;
    top * (1.0 - ty) + bottom * ty
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: usize, h: usize) -> ImageF32 {
        ImageF32::from_fn(w, h, |x, y| 40.0 + x as f32 + 2.0 * y as f32)
    }

    #[test]
    fn zero_angle_is_identity() {
        let img = ramp(7, 5);
        assert_eq!(rotate(&img, 0.0, &RotateOptions::default()), img);
        assert_eq!(rotate(&img, 360.0, &RotateOptions::default()), img);
        assert_eq!(rotate(&img, -720.0, &RotateOptions::default()), img);
    }

    #[test]
    fn rotation_keeps_canvas_size() {
        let img = ramp(31, 17);
        for angle in [-15.0, -2.0, 5.0, 13.0, 90.0] {
            let out = rotate(&img, angle, &RotateOptions::default());
            assert_eq!((out.w, out.h), (31, 17), "angle {angle}");
        }
    }

    #[test]
    fn rotation_fills_uncovered_corners() {
        let img = ImageF32::filled(40, 40, 200.0);
        let out = rotate(&img, 15.0, &RotateOptions::default());
        assert_eq!(out.get(0, 0), 0.0);
        assert_eq!(out.get(39, 39), 0.0);
        assert_eq!(out.get(20, 20), 200.0);

        let white = rotate(&img, 15.0, &RotateOptions::default().with_fill(255.0));
        assert_eq!(white.get(0, 0), 255.0);
    }

    #[test]
    fn quarter_turn_is_counter_clockwise() {
        // Single bright pixel right of center on an odd-sized square.
        let mut img = ImageF32::new(5, 5);
        img.set(4, 2, 100.0);
        let out = rotate(&img, 90.0, &RotateOptions::default());
        // Counter-clockwise on screen: right of center moves above center.
        assert_eq!(out.get(2, 0), 100.0);
        assert_eq!(out.get(4, 2), 0.0);
    }

    #[test]
    fn bilinear_matches_source_at_zero_offset_regions() {
        let img = ImageF32::filled(20, 20, 90.0);
        let opts = RotateOptions::default().with_resample(Resample::Bilinear);
        let out = rotate(&img, 7.0, &opts);
        assert!((out.get(10, 10) - 90.0).abs() < 1e-4);
    }

    #[test]
    fn remove_rotation_fill_whitens_dark_samples() {
        let img = ImageF32::from_vec(5, 1, vec![0.0, 20.0, 20.5, 100.0, 255.0]);
        let out = remove_rotation_fill(&img);
        assert_eq!(out.data, vec![255.0, 255.0, 20.5, 100.0, 255.0]);
    }

    #[test]
    fn normalize_at_zero_angle_only_whitens_dark_samples() {
        let img = ImageF32::from_fn(8, 6, |x, y| (x * 9 + y * 11) as f32);
        let out = normalize(&img, 0.0);
        for (&src, &dst) in img.data.iter().zip(&out.data) {
            if src <= 20.0 {
                assert_eq!(dst, 255.0);
            } else {
                assert_eq!(dst, src);
            }
        }
    }
}
