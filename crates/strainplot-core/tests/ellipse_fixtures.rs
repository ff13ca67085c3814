use serde::Deserialize;
use strainplot_core::domain::{PlotErrorCategory, WeightedSample};
use strainplot_core::modules::{compute_confidence_ellipse, confidence_ellipse_for};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct EllipseFixtures {
    cases: Vec<EllipseCase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EllipseCase {
    id: String,
    xs: Vec<f64>,
    ys: Vec<f64>,
    weights: Vec<f64>,
    expected: ExpectedEllipse,
    abs_tol: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpectedEllipse {
    center_x: f64,
    center_y: f64,
    semi_major: f64,
    semi_minor: f64,
    rotation: f64,
}

fn load_fixtures() -> EllipseFixtures {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/ellipse_cases.json");
    let content = fs::read_to_string(&path).expect("ellipse fixtures should be readable");
    serde_json::from_str(&content).expect("ellipse fixtures should parse")
}

fn assert_close(case: &str, field: &str, actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "{case}: {field} expected {expected}, got {actual}"
    );
}

#[test]
fn ellipses_match_reference_clouds() {
    let fixtures = load_fixtures();
    assert!(!fixtures.cases.is_empty());

    for case in &fixtures.cases {
        let ellipse = compute_confidence_ellipse(&case.xs, &case.ys, &case.weights)
            .unwrap_or_else(|error| panic!("{}: {}", case.id, error));
        let tol = case.abs_tol;
        assert_close(&case.id, "center_x", ellipse.center_x, case.expected.center_x, tol);
        assert_close(&case.id, "center_y", ellipse.center_y, case.expected.center_y, tol);
        assert_close(&case.id, "semi_major", ellipse.semi_major, case.expected.semi_major, tol);
        assert_close(&case.id, "semi_minor", ellipse.semi_minor, case.expected.semi_minor, tol);
        assert_close(&case.id, "rotation", ellipse.rotation, case.expected.rotation, tol);
    }
}

#[test]
fn sample_wrapper_matches_slice_entry_point() {
    let mut sample = WeightedSample::default();
    sample.push(0.2, 0.4, 1.0);
    sample.push(0.6, 0.5, 3.0);
    sample.push(0.3, 0.9, 2.0);

    let from_sample = confidence_ellipse_for(&sample).expect("sample should be valid");
    let from_slices = compute_confidence_ellipse(&sample.xs, &sample.ys, &sample.weights)
        .expect("slices should be valid");
    assert_eq!(from_sample, from_slices);
}

#[test]
fn rescaling_weights_leaves_ellipse_unchanged() {
    let xs = [0.1, 0.35, 0.6, 0.2];
    let ys = [0.7, 0.2, 0.45, 0.5];
    let weights = [1.0, 2.0, 0.5, 4.0];
    let scaled = weights.map(|w| w * 8.0);

    let base = compute_confidence_ellipse(&xs, &ys, &weights).expect("base should be valid");
    let other = compute_confidence_ellipse(&xs, &ys, &scaled).expect("scaled should be valid");
    for (a, b) in [
        (base.center_x, other.center_x),
        (base.center_y, other.center_y),
        (base.semi_major, other.semi_major),
        (base.semi_minor, other.semi_minor),
        (base.rotation, other.rotation),
    ] {
        assert!((a - b).abs() < 1.0e-12);
    }
}

#[test]
fn zero_weight_is_rejected_as_invalid_input() {
    let error = compute_confidence_ellipse(&[0.1, 0.2], &[0.3, 0.4], &[1.0, 0.0])
        .expect_err("zero weight should fail");
    assert_eq!(error.category(), PlotErrorCategory::InvalidInputError);
    assert_eq!(error.exit_code(), 2);
    assert!(error.diagnostic_line().starts_with("ERROR: [INPUT.ELLIPSE_WEIGHT]"));
}
