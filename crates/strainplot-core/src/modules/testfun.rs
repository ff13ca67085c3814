//! Analytic potential-gradient field used to validate the strain tensor
//! pipeline visually.
//!
//! A scalar potential `P = k sin(wx + px) sin(wy + py)` is differentiated to
//! a displacement field, whose Jacobian plus identity is the deformation
//! gradient `F = [[dgxx, dgxy], [dgxy, dgxx]]`.

use crate::common::MAX_TESTFUN_SAMPLES_PER_AXIS;
use crate::domain::{PlotError, PlotResult};
use crate::numerics::{principal_vectors, PrincipalVectors};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestFieldParams {
    pub k: f64,
    pub omega: f64,
    pub phi_x: f64,
    pub phi_y: f64,
}

impl Default for TestFieldParams {
    fn default() -> Self {
        Self {
            k: 1.0,
            omega: 1.0,
            phi_x: 0.0,
            phi_y: 0.0,
        }
    }
}

/// Half-open sampling range `[start, end)` shared by both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingDomain {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for SamplingDomain {
    fn default() -> Self {
        Self {
            start: -3.0,
            end: 3.0,
            step: 0.025,
        }
    }
}

impl SamplingDomain {
    /// Samples per axis before any cap is applied.
    pub fn requested_samples(&self) -> f64 {
        ((self.end - self.start) / self.step).ceil().max(0.0)
    }

    pub fn axis(&self) -> Vec<f64> {
        let count = self.requested_samples() as usize;
        (0..count)
            .map(|index| self.start + self.step * index as f64)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    pub potential: f64,
    pub displacement: [f64; 2],
    pub dgxx: f64,
    pub dgxy: f64,
}

impl TestFieldParams {
    pub fn sample_at(&self, x: f64, y: f64) -> FieldSample {
        let (sx, cx) = (self.omega * x + self.phi_x).sin_cos();
        let (sy, cy) = (self.omega * y + self.phi_y).sin_cos();
        let h = self.omega * self.omega * self.k;
        FieldSample {
            potential: self.k * sx * sy,
            displacement: [self.omega * self.k * cx * sy, self.omega * self.k * sx * cy],
            dgxx: -h * sx * sy + 1.0,
            dgxy: h * cx * cy,
        }
    }
}

/// Row-major samples: `samples[row][col]` sits at `(xs[col], ys[row])`.
#[derive(Debug, Clone, PartialEq)]
pub struct TestField {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub samples: Vec<Vec<FieldSample>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedVectors {
    pub x: f64,
    pub y: f64,
    pub vectors: PrincipalVectors,
}

pub fn sample_test_field(params: TestFieldParams, domain: SamplingDomain) -> PlotResult<TestField> {
    if !(domain.step.is_finite() && domain.step > 0.0) {
        return Err(PlotError::invalid_input(
            "INPUT.TESTFUN_STEP",
            format!("sampling step must be positive, got {}", domain.step),
        ));
    }
    if !(domain.start.is_finite() && domain.end.is_finite() && domain.end > domain.start) {
        return Err(PlotError::invalid_input(
            "INPUT.TESTFUN_RANGE",
            format!(
                "sampling range must satisfy start < end, got [{}, {})",
                domain.start, domain.end
            ),
        ));
    }

    let requested = domain.requested_samples();
    if requested > MAX_TESTFUN_SAMPLES_PER_AXIS as f64 {
        return Err(PlotError::invalid_input(
            "INPUT.TESTFUN_STEP",
            format!(
                "sampling step {} asks for {} samples per axis, more than the limit of {}",
                domain.step, requested, MAX_TESTFUN_SAMPLES_PER_AXIS
            ),
        ));
    }

    let xs = domain.axis();
    let ys = xs.clone();
    let samples = ys
        .iter()
        .map(|&y| xs.iter().map(|&x| params.sample_at(x, y)).collect())
        .collect();
    debug!(points = xs.len() * ys.len(), "sampled test field");

    Ok(TestField { xs, ys, samples })
}

impl TestField {
    /// Every `stride`-th sample in both directions, as `(x, y, sample)`.
    pub fn strided(&self, stride: usize) -> impl Iterator<Item = (f64, f64, &FieldSample)> {
        let stride = stride.max(1);
        self.samples
            .iter()
            .enumerate()
            .step_by(stride)
            .flat_map(move |(row, samples)| {
                samples
                    .iter()
                    .enumerate()
                    .step_by(stride)
                    .map(move |(col, sample)| (self.xs[col], self.ys[row], sample))
            })
    }

    pub fn principal_vectors(&self, stride: usize) -> Vec<PlacedVectors> {
        self.strided(stride)
            .map(|(x, y, sample)| PlacedVectors {
                x,
                y,
                vectors: principal_vectors(sample.dgxx, sample.dgxy),
            })
            .collect()
    }

    pub fn potential_range(&self) -> (f64, f64) {
        self.samples
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), sample| {
                (lo.min(sample.potential), hi.max(sample.potential))
            })
    }
}
