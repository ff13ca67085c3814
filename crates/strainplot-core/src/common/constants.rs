//! Fixed literals and numeric constants shared by the readers and figures.

/// Semi-axis scale for a 95% confidence region of a two-parameter Gaussian.
///
/// `sqrt(chi2_2(0.95)) = sqrt(5.991) ~= 2.4477`, rounded to 2.48 following
/// Coe (2009), "Fisher matrices and confidence ellipses: a quick-start guide
/// and software", arXiv:0906.4123, table 1.
pub const CONFIDENCE_95_SCALE: f64 = 2.48;

pub const SCALAR_GRID_HEADER: &str = "I1 grid (7 rows, 8 columns)";
pub const TENSOR_GRID_HEADER: &str = "Biot strain (E) (7 rows, 8 columns) \
(v1x, v1y, v2x, v2y, lambda1, lambda2) \
where v1 and v1 are principal strains directions \
and lambda are the magnitudes.";
pub const STIMULUS_HEADER: &str = "Poke locations (u,v).  u is column-linked, v is row-linked.";

pub const SCATTER_HEADER: &str = "site, v, u, w";

/// Display aspect of the 7x8 grid panels (height over width).
pub const GRID_PANEL_ASPECT: f64 = 7.0 / 8.0;

pub const DEFAULT_GRID_FILE_PATTERN: &str = "avg-grid-{site}.csv";

/// Upper bound on test-field samples along one axis.
pub const MAX_TESTFUN_SAMPLES_PER_AXIS: usize = 4096;
