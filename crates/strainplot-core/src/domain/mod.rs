pub mod errors;

pub use errors::{ParserResult, PlotError, PlotErrorCategory, PlotResult, RenderResult};

use std::fmt::{Display, Formatter};

pub const GRID_ROWS: usize = 7;
pub const GRID_COLUMNS: usize = 8;
pub const TENSOR_CELL_VALUES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FigureKind {
    Scatter,
    Grids,
    TestField,
}

impl FigureKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scatter => "SCATTER",
            Self::Grids => "GRIDS",
            Self::TestField => "TESTFUN",
        }
    }
}

impl Display for FigureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Weighted 2D point cloud for a single stimulation site.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightedSample {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub weights: Vec<f64>,
}

impl WeightedSample {
    pub fn push(&mut self, x: f64, y: f64, weight: f64) {
        self.xs.push(x);
        self.ys.push(y);
        self.weights.push(weight);
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

/// Samples grouped by site label, in the order sites first appear.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SiteSamples {
    sites: Vec<(String, WeightedSample)>,
}

impl SiteSamples {
    pub fn push(&mut self, site: &str, x: f64, y: f64, weight: f64) {
        match self.sites.iter_mut().find(|(label, _)| label == site) {
            Some((_, sample)) => sample.push(x, y, weight),
            None => {
                let mut sample = WeightedSample::default();
                sample.push(x, y, weight);
                self.sites.push((site.to_string(), sample));
            }
        }
    }

    pub fn get(&self, site: &str) -> Option<&WeightedSample> {
        self.sites
            .iter()
            .find(|(label, _)| label == site)
            .map(|(_, sample)| sample)
    }

    pub fn site_labels(&self) -> impl Iterator<Item = &str> {
        self.sites.iter().map(|(label, _)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

/// 95% confidence ellipse of a weighted point cloud.
///
/// `semi_major >= semi_minor >= 0` and `rotation` lies in `(-pi/2, pi/2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceEllipse {
    pub center_x: f64,
    pub center_y: f64,
    pub semi_major: f64,
    pub semi_minor: f64,
    pub rotation: f64,
}

impl ConfidenceEllipse {
    pub const fn as_tuple(&self) -> (f64, f64, f64, f64, f64) {
        (
            self.center_x,
            self.center_y,
            self.semi_major,
            self.semi_minor,
            self.rotation,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScalarGrid {
    values: [[f64; GRID_COLUMNS]; GRID_ROWS],
}

impl ScalarGrid {
    pub const fn new(values: [[f64; GRID_COLUMNS]; GRID_ROWS]) -> Self {
        Self { values }
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    pub fn rows(&self) -> &[[f64; GRID_COLUMNS]; GRID_ROWS] {
        &self.values
    }

    pub fn min_max(&self) -> (f64, f64) {
        self.values
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
                (lo.min(*value), hi.max(*value))
            })
    }
}

/// Principal decomposition of one Biot strain cell. Directions are unit
/// vectors; positive magnitudes are tension, negative are compression.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PrincipalStrain {
    pub v1: [f64; 2],
    pub v2: [f64; 2],
    pub lambda1: f64,
    pub lambda2: f64,
}

impl PrincipalStrain {
    pub const fn from_values(values: [f64; TENSOR_CELL_VALUES]) -> Self {
        Self {
            v1: [values[0], values[1]],
            v2: [values[2], values[3]],
            lambda1: values[4],
            lambda2: values[5],
        }
    }

    pub const fn to_values(&self) -> [f64; TENSOR_CELL_VALUES] {
        [
            self.v1[0],
            self.v1[1],
            self.v2[0],
            self.v2[1],
            self.lambda1,
            self.lambda2,
        ]
    }

    pub const fn pairs(&self) -> [([f64; 2], f64); 2] {
        [(self.v1, self.lambda1), (self.v2, self.lambda2)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TensorGrid {
    cells: [[PrincipalStrain; GRID_COLUMNS]; GRID_ROWS],
}

impl TensorGrid {
    pub const fn new(cells: [[PrincipalStrain; GRID_COLUMNS]; GRID_ROWS]) -> Self {
        Self { cells }
    }

    pub fn get(&self, row: usize, col: usize) -> &PrincipalStrain {
        &self.cells[row][col]
    }

    pub fn rows(&self) -> &[[PrincipalStrain; GRID_COLUMNS]; GRID_ROWS] {
        &self.cells
    }

    /// Iterates `(row, col, cell)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &PrincipalStrain)> {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, cell)| (row, col, cell))
        })
    }
}

/// Contents of one average-grid file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AverageGrid {
    pub scalar: ScalarGrid,
    pub strain: TensorGrid,
    pub stimuli: Vec<[f64; 2]>,
}
