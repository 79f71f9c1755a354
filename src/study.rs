//! The blood cell study: prepare every micrograph, apply the transforms and
//! lay the results out in comparison figures.
//!
//! Samples are independent. A sample that fails to load or has the wrong
//! shape is logged, recorded in the report and left as an empty panel; the
//! remaining samples are processed as usual.

use crate::config::study::{SampleConfig, StudyConfig};
use crate::diagnostics::TimingBreakdown;
use crate::error::ShapeError;
use crate::figure::{save_figure, Figure, PanelImage};
use crate::geometry::normalize;
use crate::grayscale::to_grayscale;
use crate::image::io::{load_color_image, write_json_file};
use crate::image::ImageF32;
use crate::intensity::PointTransform;
use crate::types::{empty_grid, CellType, SampleGrid, SAMPLES_PER_TYPE};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Transform applied to sample 1, 2 and 3 of every type in the "Processed"
/// figure.
pub const PROCESSED_ORDER: [PointTransform; SAMPLES_PER_TYPE] = [
    PointTransform::Contrast,
    PointTransform::Threshold,
    PointTransform::Power,
];

/// Cell types that get a single-transform figure, with that transform.
pub const PER_TYPE_SETS: [(CellType, PointTransform); 3] = [
    (CellType::Eosinophil, PointTransform::Contrast),
    (CellType::Lymphocyte, PointTransform::Threshold),
    (CellType::Monocyte, PointTransform::Power),
];

#[derive(Debug, Error)]
pub enum StudyError {
    #[error("{0}")]
    Load(String),
    #[error("sample index {index} is outside 1..={SAMPLES_PER_TYPE}")]
    Index { index: usize },
    #[error("{}: {source}", .path.display())]
    Shape {
        path: PathBuf,
        #[source]
        source: ShapeError,
    },
}

/// Load a micrograph, convert it to grayscale, straighten it and whiten the
/// rotation padding.
pub fn prepare_sample(path: &Path, angle_deg: f32) -> Result<ImageF32, StudyError> {
    let color = load_color_image(path).map_err(StudyError::Load)?;
    let gray = to_grayscale(&color).map_err(|source| StudyError::Shape {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "prepared {} ({}x{}, {angle_deg:+} deg)",
        path.display(),
        gray.w,
        gray.h
    );
    Ok(normalize(&gray, angle_deg))
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleFailure {
    pub cell_type: CellType,
    pub index: usize,
    pub path: PathBuf,
    pub error: String,
}

/// Normalized micrographs of the study, plus the samples that failed.
#[derive(Debug)]
pub struct SampleSet {
    pub images: SampleGrid<ImageF32>,
    pub failures: Vec<SampleFailure>,
}

impl SampleSet {
    pub fn get(&self, cell_type: CellType, index: usize) -> Option<&ImageF32> {
        self.images[cell_type.column()]
            .get(index.checked_sub(1)?)?
            .as_ref()
    }

    pub fn loaded(&self) -> usize {
        self.images.iter().flatten().flatten().count()
    }

    fn panel(&self, cell_type: CellType, index: usize) -> Option<PanelImage> {
        self.get(cell_type, index).cloned().map(PanelImage::Float)
    }

    fn transformed(
        &self,
        cell_type: CellType,
        index: usize,
        transform: PointTransform,
    ) -> Option<PanelImage> {
        self.get(cell_type, index)
            .map(|img| PanelImage::Gray(transform.apply(img)))
    }
}

/// Row of `sample` in its cell type column, and its prepared image.
fn load_sample(sample: &SampleConfig, path: &Path) -> Result<(usize, ImageF32), StudyError> {
    let row = sample
        .index
        .checked_sub(1)
        .filter(|&i| i < SAMPLES_PER_TYPE)
        .ok_or(StudyError::Index {
            index: sample.index,
        })?;
    Ok((row, prepare_sample(path, sample.angle_deg)?))
}

/// Prepare every configured sample, isolating failures per sample.
pub fn load_samples(config: &StudyConfig) -> SampleSet {
    let mut images = empty_grid();
    let mut failures = Vec::new();
    for sample in &config.samples {
        let path = sample.resolve_path(&config.data_dir);
        match load_sample(sample, &path) {
            Ok((row, img)) => {
                images[sample.cell_type.column()][row] = Some(img);
            }
            Err(err) => {
                warn!("skipping {}{}: {err}", sample.cell_type, sample.index);
                failures.push(SampleFailure {
                    cell_type: sample.cell_type,
                    index: sample.index,
                    path,
                    error: err.to_string(),
                });
            }
        }
    }
    SampleSet { images, failures }
}

/// Three rows of samples, one column per cell type.
pub fn all_types_figure(
    title: &str,
    mut panel: impl FnMut(CellType, usize) -> Option<PanelImage>,
) -> Figure {
    let mut figure = Figure::new(title, SAMPLES_PER_TYPE, CellType::COUNT);
    for row in 0..SAMPLES_PER_TYPE {
        for cell_type in CellType::ALL {
            let index = row + 1;
            figure.set(
                row,
                cell_type.column(),
                format!("{cell_type}{index}"),
                panel(cell_type, index),
            );
        }
    }
    figure
}

/// Processed samples on top, the corresponding originals below.
pub fn image_set_figure(
    title: &str,
    processed: [Option<PanelImage>; SAMPLES_PER_TYPE],
    originals: [Option<PanelImage>; SAMPLES_PER_TYPE],
) -> Figure {
    let mut figure = Figure::new(title, 2, SAMPLES_PER_TYPE);
    for (i, (top, bottom)) in processed.into_iter().zip(originals).enumerate() {
        figure.set(0, i, (i + 1).to_string(), top);
        figure.set(1, i, format!("Original{}", i + 1), bottom);
    }
    figure
}

/// Every figure of the study, in display order.
pub fn build_figures(samples: &SampleSet) -> Vec<Figure> {
    let mut figures = vec![
        all_types_figure("Original Data", |ty, i| samples.panel(ty, i)),
        all_types_figure("Processed", |ty, i| {
            samples.transformed(ty, i, PROCESSED_ORDER[i - 1])
        }),
    ];
    for (cell_type, transform) in PER_TYPE_SETS {
        let processed = std::array::from_fn(|i| samples.transformed(cell_type, i + 1, transform));
        let originals = std::array::from_fn(|i| samples.panel(cell_type, i + 1));
        figures.push(image_set_figure(
            &format!("{cell_type} - {}", transform.title()),
            processed,
            originals,
        ));
    }
    figures
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigureSummary {
    pub title: String,
    pub path: PathBuf,
    pub rows: usize,
    pub cols: usize,
    pub captions: Vec<String>,
    pub empty_panels: usize,
}

impl FigureSummary {
    fn new(figure: &Figure, path: PathBuf) -> Self {
        Self {
            title: figure.title.clone(),
            path,
            rows: figure.rows,
            cols: figure.cols,
            captions: figure.captions(),
            empty_panels: figure.panels().iter().filter(|p| p.image.is_none()).count(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyReport {
    pub samples_loaded: usize,
    pub failures: Vec<SampleFailure>,
    pub figures: Vec<FigureSummary>,
    pub timing: TimingBreakdown,
}

/// Run the whole study and save its figures (and report, if configured).
pub fn run_study(config: &StudyConfig) -> Result<StudyReport, String> {
    config.validate()?;
    let mut timing = TimingBreakdown::default();

    let samples = timing.time("prepare samples", || load_samples(config));
    info!(
        "prepared {} of {} samples",
        samples.loaded(),
        config.samples.len()
    );

    let figures = timing.time("apply transforms", || build_figures(&samples));

    let mut summaries = Vec::with_capacity(figures.len());
    for figure in &figures {
        let path = timing.time(format!("render {}", figure.title), || {
            save_figure(figure, &config.output.figures_dir)
        })?;
        summaries.push(FigureSummary::new(figure, path));
    }

    let report = StudyReport {
        samples_loaded: samples.loaded(),
        failures: samples.failures,
        figures: summaries,
        timing,
    };
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)?;
        info!("report written to {}", path.display());
    }
    Ok(report)
}
