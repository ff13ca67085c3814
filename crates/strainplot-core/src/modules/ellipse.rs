//! Weighted 95% confidence ellipses, following Coe (2009) and Press et al.,
//! Numerical Recipes 3rd ed., section 15.6.

use crate::common::CONFIDENCE_95_SCALE;
use crate::domain::{ConfidenceEllipse, PlotError, PlotResult, WeightedSample};
use crate::numerics::SymmetricTensor2;
use tracing::{debug, warn};

/// Computes the 95% confidence ellipse of a weighted point cloud.
///
/// Fails with an invalid-input error when the slices differ in length, are
/// empty, or carry a non-positive or non-finite weight. An isotropic cloud
/// (equal variances, zero covariance) has no preferred axis and reports a
/// rotation of 0.
pub fn compute_confidence_ellipse(
    xs: &[f64],
    ys: &[f64],
    weights: &[f64],
) -> PlotResult<ConfidenceEllipse> {
    validate_sample(xs, ys, weights)?;

    // Relative weights in (0, 1] keep the sum finite for any positive input.
    let largest = weights.iter().copied().fold(0.0, f64::max);
    let weights = weights.iter().map(|w| w / largest).collect::<Vec<_>>();
    let weight_sum: f64 = weights.iter().sum();
    if !(weight_sum.is_finite() && weight_sum > 0.0) {
        return Err(PlotError::invalid_input(
            "INPUT.ELLIPSE_WEIGHT_SUM",
            format!("sum of weights must be positive, got {}", weight_sum),
        ));
    }

    let center_x = weighted_dot(&weights, xs) / weight_sum;
    let center_y = weighted_dot(&weights, ys) / weight_sum;

    let mut sigma_x2 = 0.0;
    let mut sigma_y2 = 0.0;
    let mut sigma_xy = 0.0;
    for ((x, y), w) in xs.iter().zip(ys).zip(&weights) {
        let dx = x - center_x;
        let dy = y - center_y;
        sigma_x2 += w * dx * dx;
        sigma_y2 += w * dy * dy;
        sigma_xy += w * dx * dy;
    }
    let covariance = SymmetricTensor2::new(
        sigma_x2 / weight_sum,
        sigma_xy / weight_sum,
        sigma_y2 / weight_sum,
    );

    let (major, minor) = covariance.eigenvalues_closed_form();
    let rotation = covariance.orientation();
    if covariance.xx == covariance.yy && covariance.xy == 0.0 {
        warn!(
            center_x,
            center_y, "isotropic point cloud; ellipse orientation defaults to 0"
        );
    }

    let ellipse = ConfidenceEllipse {
        center_x,
        center_y,
        semi_major: major.max(0.0).sqrt() * CONFIDENCE_95_SCALE,
        semi_minor: minor.max(0.0).sqrt() * CONFIDENCE_95_SCALE,
        rotation,
    };
    debug!(?ellipse, points = xs.len(), "computed confidence ellipse");
    Ok(ellipse)
}

pub fn confidence_ellipse_for(sample: &WeightedSample) -> PlotResult<ConfidenceEllipse> {
    compute_confidence_ellipse(&sample.xs, &sample.ys, &sample.weights)
}

fn validate_sample(xs: &[f64], ys: &[f64], weights: &[f64]) -> PlotResult<()> {
    if xs.len() != ys.len() || xs.len() != weights.len() {
        return Err(PlotError::invalid_input(
            "INPUT.ELLIPSE_LENGTH_MISMATCH",
            format!(
                "xs, ys and weights must have equal lengths, got {}, {} and {}",
                xs.len(),
                ys.len(),
                weights.len()
            ),
        ));
    }
    if xs.is_empty() {
        return Err(PlotError::invalid_input(
            "INPUT.ELLIPSE_EMPTY",
            "confidence ellipse requires at least one point",
        ));
    }
    if let Some((index, weight)) = weights
        .iter()
        .enumerate()
        .find(|(_, weight)| !(weight.is_finite() && **weight > 0.0))
    {
        return Err(PlotError::invalid_input(
            "INPUT.ELLIPSE_WEIGHT",
            format!("weight at index {} must be positive, got {}", index, weight),
        ));
    }
    Ok(())
}

fn weighted_dot(weights: &[f64], values: &[f64]) -> f64 {
    weights.iter().zip(values).map(|(w, v)| w * v).sum()
}
