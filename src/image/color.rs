//! Interleaved multi-channel 8-bit image as produced by the loader.

use crate::error::ShapeError;

/// Row-major `h × w × channels` buffer of 8-bit samples.
///
/// The channel count is carried at runtime so that stages expecting RGB can
/// reject anything else with a [`ShapeError`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorImageU8 {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl ColorImageU8 {
    /// Wrap interleaved samples, checking that the buffer matches the shape.
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, ShapeError> {
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(ShapeError::BufferLength {
                width,
                height,
                channels,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Three-channel image with every pixel set to `rgb`.
    pub fn from_pixel(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(width * height * 3)
            .collect();
        Self {
            width,
            height,
            channels: 3,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Interleaved samples in row-major order.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Samples of the pixel at (x, y), one per channel.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = (y * self.width + x) * self.channels;
        &self.data[start..start + self.channels]
    }
}
