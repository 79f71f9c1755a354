use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Number of micrographs per cell type in the study.
pub const SAMPLES_PER_TYPE: usize = 3;

/// White blood cell types covered by the study, in figure column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    Eosinophil,
    Lymphocyte,
    Monocyte,
    Neutrophil,
}

impl CellType {
    pub const COUNT: usize = 4;
    pub const ALL: [CellType; CellType::COUNT] = [
        CellType::Eosinophil,
        CellType::Lymphocyte,
        CellType::Monocyte,
        CellType::Neutrophil,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CellType::Eosinophil => "Eosinophil",
            CellType::Lymphocyte => "Lymphocyte",
            CellType::Monocyte => "Monocyte",
            CellType::Neutrophil => "Neutrophil",
        }
    }

    /// Column index in the all-types figures.
    pub fn column(self) -> usize {
        self as usize
    }

    /// Conventional file name of sample `index` (1-based), e.g. `Monocyte_2.jpeg`.
    pub fn file_name(self, index: usize) -> PathBuf {
        PathBuf::from(format!("{}_{index}.jpeg", self.name()))
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One `Option<T>` slot per (cell type, sample) pair.
///
/// Indexed as `grid[cell_type.column()][index - 1]`.
pub type SampleGrid<T> = [[Option<T>; SAMPLES_PER_TYPE]; CellType::COUNT];

/// An empty grid.
pub fn empty_grid<T>() -> SampleGrid<T> {
    std::array::from_fn(|_| std::array::from_fn(|_| None))
}
