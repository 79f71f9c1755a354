//! I/O helpers for color inputs, grayscale outputs and JSON.
//!
//! - `load_color_image`: read a PNG/JPEG/etc. into an owned 3-channel buffer.
//! - `save_grayscale_f32`: write an `ImageF32` (0..=255 scale) to a grayscale PNG.
//! - `save_grayscale_u8`: write an owned 8-bit gray buffer to a PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ColorImageU8, GrayImageU8, ImageF32, ImageView};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to interleaved 8-bit RGB.
///
/// Alpha is dropped and grayscale sources are expanded to three channels, so
/// the result always satisfies the grayscale converter's shape contract.
pub fn load_color_image(path: &Path) -> Result<ColorImageU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    ColorImageU8::new(width, height, 3, img.into_raw())
        .map_err(|e| format!("Failed to decode {}: {e}", path.display()))
}

/// Save a float image to a grayscale PNG, clamping values in [0, 255].
pub fn save_grayscale_f32(image: &ImageF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = px.clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save an 8-bit grayscale buffer to a PNG.
pub fn save_grayscale_u8(buffer: &GrayImageU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let data = buffer.data().to_vec();
    let image: ImageBuffer<Luma<u8>, Vec<u8>> =
        ImageBuffer::from_raw(buffer.width() as u32, buffer.height() as u32, data)
            .ok_or_else(|| "Failed to create image buffer".to_string())?;
    DynamicImage::ImageLuma8(image)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cellview-io-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn load_color_image_reads_rgb_png() {
        let dir = scratch_dir("load");
        let path = dir.join("red.png");
        RgbImage::from_pixel(5, 3, Rgb([255, 0, 0])).save(&path).unwrap();

        let img = load_color_image(&path).unwrap();
        assert_eq!((img.width(), img.height(), img.channels()), (5, 3, 3));
        assert_eq!(img.pixel(4, 2), &[255, 0, 0]);
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn load_color_image_reports_missing_file() {
        let err = load_color_image(Path::new("/nonexistent/cell.jpeg")).unwrap_err();
        assert!(err.starts_with("Failed to open"), "unexpected error: {err}");
    }

    #[test]
    fn save_grayscale_f32_clamps_out_of_range_samples() {
        let dir = scratch_dir("save");
        let path = dir.join("nested").join("gray.png");
        let img = ImageF32::from_vec(3, 1, vec![-4.0, 128.7, 300.0]);
        save_grayscale_f32(&img, &path).unwrap();

        let back = image::open(&path).unwrap().into_luma8();
        assert_eq!(back.into_raw(), vec![0, 128, 255]);
        fs::remove_dir_all(dir).ok();
    }
}
