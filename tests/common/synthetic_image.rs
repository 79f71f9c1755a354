use cellview::image::ColorImageU8;
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Pale background with a darker, purple-stained disc in the middle, roughly
/// what a stained white blood cell looks like.
pub fn stained_cell_rgb(width: usize, height: usize, radius: f32) -> ColorImageU8 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let (cx, cy) = (width as f32 * 0.5, height as f32 * 0.5);
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let px = if (dx * dx + dy * dy).sqrt() <= radius {
                [120u8, 60, 150]
            } else {
                [235u8, 225, 230]
            };
            data.extend_from_slice(&px);
        }
    }
    ColorImageU8::new(width, height, 3, data).expect("buffer matches shape")
}

/// Smooth diagonal ramp, bright enough to stay clear of the padding cutoff.
pub fn ramp_rgb(width: usize, height: usize) -> ColorImageU8 {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let v = (60 + x + y).min(255) as u8;
            data.extend_from_slice(&[v, v, v]);
        }
    }
    ColorImageU8::new(width, height, 3, data).expect("buffer matches shape")
}

/// Write a color image as PNG.
pub fn save_rgb_png(image: &ColorImageU8, path: &Path) {
    let buffer = RgbImage::from_fn(image.width() as u32, image.height() as u32, |x, y| {
        let px = image.pixel(x as usize, y as usize);
        Rgb([px[0], px[1], px[2]])
    });
    buffer.save(path).expect("synthetic PNG is writable");
}

/// Fresh scratch directory unique to this test process.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cellview-{name}-{}", std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).expect("stale scratch dir is removable");
    }
    std::fs::create_dir_all(&dir).expect("scratch dir is creatable");
    dir
}
