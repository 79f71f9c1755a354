//! JSON configuration for the study runner.
//!
//! Every field has a default, so `{}` reproduces the original study: twelve
//! micrographs named `<Type>_<n>.jpeg` in the working directory, each with
//! its own rotation angle, and figures written to `figures/`.

use crate::types::{CellType, SAMPLES_PER_TYPE};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Directory that sample paths are resolved against.
    pub data_dir: PathBuf,
    pub samples: Vec<SampleConfig>,
    pub output: OutputConfig,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            samples: default_samples(),
            output: OutputConfig::default(),
        }
    }
}

/// One micrograph and the rotation that straightens it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    pub cell_type: CellType,
    /// 1-based sample number within the cell type.
    pub index: usize,
    /// Explicit file; defaults to `<Type>_<index>.jpeg` under `data_dir`.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Counter-clockwise rotation in degrees.
    #[serde(default)]
    pub angle_deg: f32,
}

impl SampleConfig {
    pub fn new(cell_type: CellType, index: usize, angle_deg: f32) -> Self {
        Self {
            cell_type,
            index,
            path: None,
            angle_deg,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn resolve_path(&self, data_dir: &Path) -> PathBuf {
        match &self.path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => data_dir.join(path),
            None => data_dir.join(self.cell_type.file_name(self.index)),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub figures_dir: PathBuf,
    pub report_json: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            figures_dir: PathBuf::from("figures"),
            report_json: None,
        }
    }
}

/// Rotation angles of the original micrographs, one row per cell type.
const DEFAULT_ANGLES: [(CellType, [f32; SAMPLES_PER_TYPE]); CellType::COUNT] = [
    (CellType::Eosinophil, [-2.0, -15.0, -5.0]),
    (CellType::Lymphocyte, [15.0, 5.0, 5.0]),
    (CellType::Monocyte, [5.0, -5.0, 2.0]),
    (CellType::Neutrophil, [-5.0, 13.0, 0.0]),
];

pub fn default_samples() -> Vec<SampleConfig> {
    DEFAULT_ANGLES
        .iter()
        .flat_map(|&(cell_type, angles)| {
            angles
                .into_iter()
                .enumerate()
                .map(move |(i, angle)| SampleConfig::new(cell_type, i + 1, angle))
        })
        .collect()
}

impl StudyConfig {
    /// Reject sample numbers outside `1..=SAMPLES_PER_TYPE` and duplicates.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for sample in &self.samples {
            if !(1..=SAMPLES_PER_TYPE).contains(&sample.index) {
                return Err(format!(
                    "Sample index {} for {} is outside 1..={SAMPLES_PER_TYPE}",
                    sample.index, sample.cell_type
                ));
            }
            if !seen.insert((sample.cell_type, sample.index)) {
                return Err(format!(
                    "Duplicate sample {}{}",
                    sample.cell_type, sample.index
                ));
            }
            if !sample.angle_deg.is_finite() {
                return Err(format!(
                    "Rotation angle for {}{} must be finite",
                    sample.cell_type, sample.index
                ));
            }
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<StudyConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config = parse_config(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}

/// Parse and validate a config from a JSON string.
pub fn parse_config(json: &str) -> Result<StudyConfig, String> {
    let config: StudyConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
    config.validate()?;
    Ok(config)
}
