//! Grid figures for side-by-side inspection.
//!
//! A [`Figure`] is a titled `rows × cols` grid of captioned panels. Rendering
//! produces a single grayscale contact sheet: every cell is sized to the
//! largest panel, panels are centered on a white background, and each panel is
//! min-max scaled on its own the way a gray colormap display would show it.
//! Empty cells stay white.

use crate::image::io::save_grayscale_u8;
use crate::image::{GrayImageU8, ImageF32, ImageView};
use log::info;
use std::path::{Path, PathBuf};

/// Background level of the contact sheet.
pub const BACKGROUND: u8 = 255;
/// Blank pixels between neighbouring cells and around the border.
pub const GUTTER: usize = 8;

/// Pixel data of a panel.
#[derive(Clone, Debug)]
pub enum PanelImage {
    Float(ImageF32),
    Gray(GrayImageU8),
}

impl PanelImage {
    pub fn width(&self) -> usize {
        match self {
            PanelImage::Float(img) => img.w,
            PanelImage::Gray(img) => img.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            PanelImage::Float(img) => img.h,
            PanelImage::Gray(img) => img.height(),
        }
    }

    fn samples(&self) -> Vec<f32> {
        match self {
            PanelImage::Float(img) => img.data.clone(),
            PanelImage::Gray(img) => img.data().iter().map(|&v| f32::from(v)).collect(),
        }
    }
}

impl From<ImageF32> for PanelImage {
    fn from(img: ImageF32) -> Self {
        PanelImage::Float(img)
    }
}

impl From<GrayImageU8> for PanelImage {
    fn from(img: GrayImageU8) -> Self {
        PanelImage::Gray(img)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Panel {
    pub caption: String,
    pub image: Option<PanelImage>,
}

#[derive(Clone, Debug)]
pub struct Figure {
    pub title: String,
    pub rows: usize,
    pub cols: usize,
    panels: Vec<Panel>,
}

impl Figure {
    /// Figure with `rows × cols` empty, uncaptioned panels.
    pub fn new(title: impl Into<String>, rows: usize, cols: usize) -> Self {
        Self {
            title: title.into(),
            rows,
            cols,
            panels: vec![Panel::default(); rows * cols],
        }
    }

    /// Place a panel. Panics if `(row, col)` is outside the grid.
    pub fn set(
        &mut self,
        row: usize,
        col: usize,
        caption: impl Into<String>,
        image: Option<PanelImage>,
    ) {
        assert!(row < self.rows && col < self.cols, "panel outside figure grid");
        self.panels[row * self.cols + col] = Panel {
            caption: caption.into(),
            image,
        };
    }

    pub fn panel(&self, row: usize, col: usize) -> &Panel {
        &self.panels[row * self.cols + col]
    }

    /// Panels in row-major order.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn captions(&self) -> Vec<String> {
        self.panels.iter().map(|p| p.caption.clone()).collect()
    }

    /// Size of one grid cell: the largest panel extent in each direction.
    pub fn cell_size(&self) -> (usize, usize) {
        self.panels
            .iter()
            .filter_map(|p| p.image.as_ref())
            .fold((1, 1), |(w, h), img| (w.max(img.width()), h.max(img.height())))
    }

    /// Render the figure into a single contact sheet.
    pub fn render(&self) -> GrayImageU8 {
        let (cell_w, cell_h) = self.cell_size();
        let width = self.cols * cell_w + (self.cols + 1) * GUTTER;
        let height = self.rows * cell_h + (self.rows + 1) * GUTTER;
        let mut sheet = GrayImageU8::filled(width, height, BACKGROUND);

        for (i, panel) in self.panels.iter().enumerate() {
            let Some(image) = &panel.image else {
                continue;
            };
            let (row, col) = (i / self.cols, i % self.cols);
            let scaled = display_scale(image);
            let x0 = GUTTER + col * (cell_w + GUTTER) + (cell_w - scaled.width()) / 2;
            let y0 = GUTTER + row * (cell_h + GUTTER) + (cell_h - scaled.height()) / 2;
            for (y, src_row) in scaled.as_view().rows().enumerate() {
                for (x, &v) in src_row.iter().enumerate() {
                    sheet.set(x0 + x, y0 + y, v);
                }
            }
        }
        sheet
    }
}

/// Min-max scale a panel to `[0, 255]`. A constant panel renders black.
pub fn display_scale(image: &PanelImage) -> GrayImageU8 {
    let samples = image.samples();
    let (lo, hi) = samples
        .iter()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = hi - lo;
    let data = if range > 0.0 {
        samples
            .iter()
            .map(|&v| ((v - lo) / range * 255.0).round().clamp(0.0, 255.0) as u8)
            .collect()
    } else {
        vec![0; samples.len()]
    };
    GrayImageU8::new(image.width(), image.height(), data)
}

/// File name derived from a figure title, e.g. `"Monocyte - Power Function"`
/// becomes `monocyte_power_function.png`.
pub fn figure_file_name(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("figure");
    }
    slug.push_str(".png");
    slug
}

/// Render `figure` and save it under `dir`, returning the written path.
pub fn save_figure(figure: &Figure, dir: &Path) -> Result<PathBuf, String> {
    let path = dir.join(figure_file_name(&figure.title));
    let sheet = figure.render();
    save_grayscale_u8(&sheet, &path)?;
    info!(
        "figure '{}' ({}x{} panels: {}) -> {}",
        figure.title,
        figure.rows,
        figure.cols,
        figure.captions().join(", "),
        path.display()
    );
    Ok(path)
}
