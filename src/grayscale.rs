//! Color to luminance conversion.

use crate::error::ShapeError;
use crate::image::{ColorImageU8, ImageF32};

/// Luma weights applied to R, G and B.
pub const LUMA_WEIGHTS: [f32; 3] = [0.2989, 0.5870, 0.1140];

/// Weighted sum of the three channels of every pixel.
///
/// The result stays in floating point and is not clamped; inputs are bounded
/// so the output lies in `[0, 255]`.
pub fn to_grayscale(color: &ColorImageU8) -> Result<ImageF32, ShapeError> {
    if color.channels() != 3 {
        return Err(ShapeError::ChannelCount {
            found: color.channels(),
        });
    }
    let [wr, wg, wb] = LUMA_WEIGHTS;
    let data = color
        .as_raw()
        .chunks_exact(3)
        .map(|px| wr * px[0] as f32 + wg * px[1] as f32 + wb * px[2] as f32)
        .collect();
    Ok(ImageF32::from_vec(color.width(), color.height(), data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn pure_red_maps_to_red_weight() {
        let gray = to_grayscale(&ColorImageU8::from_pixel(2, 2, [255, 0, 0])).unwrap();
        assert!(gray.data.iter().all(|&v| approx_eq(v, 76.22, 0.01)));
    }

    #[test]
    fn white_maps_to_full_scale() {
        let gray = to_grayscale(&ColorImageU8::from_pixel(3, 1, [255, 255, 255])).unwrap();
        assert!(gray.data.iter().all(|&v| approx_eq(v, 255.0, 0.05)));
    }

    #[test]
    fn keeps_width_and_height() {
        let color = ColorImageU8::new(4, 2, 3, (0..24).collect()).unwrap();
        let gray = to_grayscale(&color).unwrap();
        assert_eq!((gray.w, gray.h), (4, 2));
        let [wr, wg, wb] = LUMA_WEIGHTS;
        let expected = wr * 21.0 + wg * 22.0 + wb * 23.0;
        assert!(approx_eq(gray.get(3, 1), expected, 1e-4));
    }

    #[test]
    fn rejects_non_rgb_input() {
        let rgba = ColorImageU8::new(2, 2, 4, vec![0; 16]).unwrap();
        assert_eq!(
            to_grayscale(&rgba).unwrap_err(),
            ShapeError::ChannelCount { found: 4 }
        );
        let mono = ColorImageU8::new(2, 2, 1, vec![0; 4]).unwrap();
        assert!(to_grayscale(&mono).is_err());
    }
}
