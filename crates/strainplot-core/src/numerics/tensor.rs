//! Eigen-decomposition of real symmetric 2x2 tensors.
//!
//! Two solvers share one result type: the analytic closed form (used for
//! covariance ellipses) and a general self-adjoint solver backed by `faer`
//! (used when validating the potential-gradient test field).

use crate::domain::PlotError;
use faer::{Mat, Side};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EigenError {
    #[error("tensor component {component} is not finite ({value})")]
    NonFiniteComponent { component: &'static str, value: f64 },
    #[error("self-adjoint eigendecomposition failed: {0}")]
    Decomposition(String),
}

impl From<EigenError> for PlotError {
    fn from(error: EigenError) -> Self {
        match error {
            EigenError::NonFiniteComponent { .. } => {
                PlotError::invalid_input("INPUT.TENSOR_COMPONENT", error.to_string())
            }
            EigenError::Decomposition(_) => PlotError::internal("INTERNAL.EIGEN", error.to_string()),
        }
    }
}

/// `[[xx, xy], [xy, yy]]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetricTensor2 {
    pub xx: f64,
    pub xy: f64,
    pub yy: f64,
}

/// Eigenvalues in descending order with matching unit eigenvectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenPairs2 {
    pub values: [f64; 2],
    pub vectors: [[f64; 2]; 2],
}

/// Eigenvectors scaled by their eigenvalues: length is magnitude, direction
/// flips for compression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalVectors {
    pub first: [f64; 2],
    pub second: [f64; 2],
}

impl SymmetricTensor2 {
    pub const fn new(xx: f64, xy: f64, yy: f64) -> Self {
        Self { xx, xy, yy }
    }

    /// Tensor with equal diagonal entries, as produced by the Jacobian of a
    /// scalar-potential gradient field.
    pub const fn equal_diagonal(diagonal: f64, off_diagonal: f64) -> Self {
        Self::new(diagonal, off_diagonal, diagonal)
    }

    pub fn trace(&self) -> f64 {
        self.xx + self.yy
    }

    /// `(major, minor)` from the trace/discriminant identity. `minor` can
    /// round slightly below zero for singular positive semi-definite input.
    pub fn eigenvalues_closed_form(&self) -> (f64, f64) {
        let mean = 0.5 * self.trace();
        let radius = (0.25 * (self.xx - self.yy).powi(2) + self.xy * self.xy).sqrt();
        (mean + radius, mean - radius)
    }

    /// Angle of the major eigenvector in `(-pi/2, pi/2]`. Isotropic tensors
    /// yield 0 through the `atan2(0, 0)` convention.
    pub fn orientation(&self) -> f64 {
        0.5 * (2.0 * self.xy).atan2(self.xx - self.yy)
    }

    pub fn eigen_closed_form(&self) -> EigenPairs2 {
        let (major, minor) = self.eigenvalues_closed_form();
        let (sin, cos) = self.orientation().sin_cos();
        EigenPairs2 {
            values: [major, minor],
            vectors: [[cos, sin], [-sin, cos]],
        }
    }

    pub fn eigen_general(&self) -> Result<EigenPairs2, EigenError> {
        self.validate()?;

        let matrix = Mat::from_fn(2, 2, |row, col| match (row, col) {
            (0, 0) => self.xx,
            (1, 1) => self.yy,
            _ => self.xy,
        });
        let evd = matrix
            .self_adjoint_eigen(Side::Lower)
            .map_err(|error| EigenError::Decomposition(format!("{error:?}")))?;
        let values = evd.S().column_vector();
        let vectors = evd.U();

        let (major, minor) = if values[0] >= values[1] { (0, 1) } else { (1, 0) };
        let column = |index: usize| normalize([vectors[(0, index)], vectors[(1, index)]]);

        Ok(EigenPairs2 {
            values: [values[major], values[minor]],
            vectors: [column(major), column(minor)],
        })
    }

    fn validate(&self) -> Result<(), EigenError> {
        for (component, value) in [("xx", self.xx), ("xy", self.xy), ("yy", self.yy)] {
            if !value.is_finite() {
                return Err(EigenError::NonFiniteComponent { component, value });
            }
        }
        Ok(())
    }
}

impl EigenPairs2 {
    pub fn scaled_vectors(&self) -> PrincipalVectors {
        let scale = |index: usize| {
            [
                self.values[index] * self.vectors[index][0],
                self.values[index] * self.vectors[index][1],
            ]
        };
        PrincipalVectors {
            first: scale(0),
            second: scale(1),
        }
    }
}

/// Principal vectors `(lambda1 * e1, lambda2 * e2)` of
/// `[[dgxx, dgxy], [dgxy, dgxx]]`.
pub fn principal_vectors(dgxx: f64, dgxy: f64) -> PrincipalVectors {
    let tensor = SymmetricTensor2::equal_diagonal(dgxx, dgxy);
    // Only non-finite input is rejected by the general solver; the closed
    // form propagates those values unchanged.
    tensor
        .eigen_general()
        .unwrap_or_else(|_| tensor.eigen_closed_form())
        .scaled_vectors()
}

fn normalize(vector: [f64; 2]) -> [f64; 2] {
    let norm = vector[0].hypot(vector[1]);
    if norm == 0.0 {
        vector
    } else {
        [vector[0] / norm, vector[1] / norm]
    }
}
