use std::f64::consts::PI;

use curvecross::configuration::LocatorConfiguration;
use curvecross::intersection::cellrefiner::RefinementStrategy;
use curvecross::intersection::curveinterpolator::InterpolationKind;
use curvecross::intersection::gridplanner::linspace;
use curvecross::intersection::intersectionerror::IntersectionError;
use curvecross::intersection::intersectionlocator::{
    locate_intersections,
    IntersectionLocator
};
use curvecross::intersection::resultassembler::{
    split_coordinates,
    DeduplicationPolicy,
    IntersectionPoint
};

fn sample(xs: &[f64], f: impl Fn(f64) -> f64) -> Vec<f64> {
    xs.iter().map(|&x| f(x)).collect()
}

fn sin_cos_points(config: &LocatorConfiguration) -> Vec<IntersectionPoint> {
    let x_f = linspace(0.0, 12.0, 500);
    let x_g = linspace(2.0, 15.0, 900);
    locate_intersections(&x_f, &sample(&x_f, f64::sin), &x_g, &sample(&x_g, f64::cos), config)
        .expect("sin/cos intersections")
}

#[test]
fn diagonal_meets_constant_once() {
    let x: Vec<f64> = (0..=10).map(|i| i as f64).collect();
    let diagonal = x.clone();
    let constant = vec![5.0; x.len()];

    let points = locate_intersections(&x, &diagonal, &x, &constant, &LocatorConfiguration::new()).unwrap();

    assert_eq!(points.len(), 1, "got {points:?}");
    assert!((points[0].x() - 5.0).abs() < 0.01);
    assert!((points[0].y() - 5.0).abs() < 0.01);
}

#[test]
fn zero_on_a_grid_point_is_reported_twice_without_deduplication() {
    let x: Vec<f64> = (0..=10).map(|i| i as f64).collect();
    let constant = vec![5.0; x.len()];
    let config = LocatorConfiguration::new().with_deduplication(DeduplicationPolicy::Disabled);

    let points = locate_intersections(&x, &x, &x, &constant, &config).unwrap();
    assert_eq!(points.len(), 2, "got {points:?}");
    assert!(points.iter().all(|point| (point.x() - 5.0).abs() < 0.01));
}

#[test]
fn sin_and_cos_cross_only_on_the_shared_domain() {
    let points = sin_cos_points(&LocatorConfiguration::new());

    // pi/4 + k*pi inside [2, 12]
    let expected = [5.0 * PI / 4.0, 9.0 * PI / 4.0, 13.0 * PI / 4.0];
    assert_eq!(points.len(), expected.len(), "got {points:?}");
    for (point, root) in points.iter().zip(expected) {
        assert!((2.0..=12.0).contains(&point.x()));
        assert!((point.x() - root).abs() < 1e-3);
        assert!((point.x().sin() - point.x().cos()).abs() < 1e-3);
        assert!((point.y() - point.x().sin()).abs() < 1e-3);
    }
}

#[test]
fn points_come_out_in_ascending_x() {
    let points = sin_cos_points(&LocatorConfiguration::new());
    assert!(points.windows(2).all(|pair| pair[0].x() < pair[1].x()));

    let (xs, ys) = split_coordinates(&points);
    assert_eq!(xs.len(), ys.len());
    assert_eq!(xs[0], points[0].x());
}

#[test]
fn every_interpolation_kind_finds_the_same_crossings() {
    for kind in [
        InterpolationKind::Linear,
        InterpolationKind::Natural,
        InterpolationKind::Cubic,
        InterpolationKind::Akima,
        InterpolationKind::Makima,
        InterpolationKind::Pchip,
    ] {
        let points = sin_cos_points(&LocatorConfiguration::new().with_interpolation_kind(kind));
        assert_eq!(points.len(), 3, "{kind}: got {points:?}");
        for point in &points {
            assert!((point.x().sin() - point.x().cos()).abs() < 1e-3, "{kind}: {point:?}");
        }
    }
}

#[test]
fn adaptive_refinement_agrees_with_chords() {
    let chord = sin_cos_points(&LocatorConfiguration::new());
    let adaptive = sin_cos_points(
        &LocatorConfiguration::new()
            .with_fine_resolution(200)
            .with_refinement(RefinementStrategy::Adaptive { depth: 1 }),
    );

    assert_eq!(adaptive.len(), chord.len());
    for (a, c) in adaptive.iter().zip(&chord) {
        assert!((a.x() - c.x()).abs() < 1e-4);
    }
}

#[test]
fn step_interpolation_crosses_inside_the_shared_domain() {
    let expected = [5.0 * PI / 4.0, 9.0 * PI / 4.0, 13.0 * PI / 4.0];
    for kind in [InterpolationKind::Previous, InterpolationKind::Next] {
        let points = sin_cos_points(&LocatorConfiguration::new().with_interpolation_kind(kind));
        assert_eq!(points.len(), expected.len(), "{kind}: got {points:?}");
        for (point, root) in points.iter().zip(expected) {
            assert!((2.0..=12.0).contains(&point.x()), "{kind}: {point:?}");
            // a step curve lags its samples by at most one spacing
            assert!((point.x() - root).abs() < 0.05, "{kind}: {point:?}");
        }
    }
}

fn converging_lines(config: &LocatorConfiguration) -> Vec<IntersectionPoint> {
    // x and 2 - 0.95x meet at 2 / 1.95
    let x = linspace(0.0, 2.0, 21);
    locate_intersections(&x, &sample(&x, |x| x), &x, &sample(&x, |x| 2.0 - 0.95 * x), config)
        .expect("converging lines")
}

#[test]
fn deepest_adaptive_refinement_terminates() {
    let root = 2.0 / 1.95;
    let depth = RefinementStrategy::MAX_ADAPTIVE_DEPTH;

    let two_point = converging_lines(
        &LocatorConfiguration::new()
            .with_fine_resolution(2)
            .with_refinement(RefinementStrategy::Adaptive { depth }),
    );
    assert_eq!(two_point.len(), 1, "got {two_point:?}");
    assert!((two_point[0].x() - root).abs() < 0.05);

    // sub-cells reach adjacent floats well before the last level
    let dense = converging_lines(
        &LocatorConfiguration::new().with_refinement(RefinementStrategy::Adaptive { depth }),
    );
    assert!(!dense.is_empty());
    assert!(dense.iter().all(|point| (point.x() - root).abs() < 1e-9), "got {dense:?}");
}

#[test]
fn adaptive_depth_beyond_the_limit_is_rejected() {
    let config = LocatorConfiguration::new().with_refinement(RefinementStrategy::Adaptive {
        depth: RefinementStrategy::MAX_ADAPTIVE_DEPTH + 1,
    });
    let x = linspace(0.0, 2.0, 21);
    let err = locate_intersections(&x, &sample(&x, |x| x), &x, &sample(&x, |x| 2.0 - x), &config).unwrap_err();
    assert!(matches!(err, IntersectionError::InvalidConfiguration(_)));

    let err = LocatorConfiguration::from_json_str(
        r#"{"fine_resolution": 2, "refinement": {"strategy": "adaptive", "depth": 1000000}}"#,
    ).unwrap_err();
    assert!(matches!(err, IntersectionError::InvalidConfiguration(_)));
}

#[test]
fn identical_curves_report_nothing() {
    let x = linspace(0.0, 5.0, 40);
    let y = sample(&x, |x| (x * 1.3).cos() * x);

    let points = locate_intersections(&x, &y, &x, &y, &LocatorConfiguration::new()).unwrap();
    assert!(points.is_empty());
}

#[test]
fn disjoint_domains_report_nothing() {
    let x_1 = linspace(0.0, 1.0, 10);
    let x_2 = linspace(1.5, 3.0, 10);
    let y_1 = sample(&x_1, |x| x);
    let y_2 = sample(&x_2, |x| -x);

    let points = locate_intersections(&x_1, &y_1, &x_2, &y_2, &LocatorConfiguration::new()).unwrap();
    assert!(points.is_empty());
}

fn line_crossing(fine_resolution: usize) -> IntersectionPoint {
    // 2x + 1 and 4 - x meet at (1, 3)
    let x_1 = linspace(0.0, 3.0, 7);
    let x_2 = linspace(-1.0, 5.0, 13);
    let y_1 = sample(&x_1, |x| 2.0 * x + 1.0);
    let y_2 = sample(&x_2, |x| 4.0 - x);

    let config = LocatorConfiguration::new().with_fine_resolution(fine_resolution);
    let points = locate_intersections(&x_1, &y_1, &x_2, &y_2, &config).unwrap();
    assert_eq!(points.len(), 1, "resolution {fine_resolution}: got {points:?}");
    points[0]
}

#[test]
fn straight_lines_match_the_analytic_crossing() {
    let fine_resolution = 1000;
    let point = line_crossing(fine_resolution);
    let tolerance = 1.0 / fine_resolution as f64;

    assert!((point.x() - 1.0).abs() < tolerance);
    assert!((point.y() - 3.0).abs() < 3.0 * tolerance);
}

#[test]
fn finer_resolution_never_loses_accuracy() {
    let errors: Vec<f64> = [2, 11, 101, 1001, 10001]
        .into_iter()
        .map(|resolution| (line_crossing(resolution).x() - 1.0).abs())
        .collect();

    for pair in errors.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-12, "errors {errors:?}");
    }
}

#[test]
fn repeated_calls_are_identical() {
    let locator = IntersectionLocator::new(LocatorConfiguration::new().with_fine_resolution(500)).unwrap();
    let x_f = linspace(0.0, 12.0, 500);
    let x_g = linspace(2.0, 15.0, 900);
    let f = sample(&x_f, f64::sin);
    let g = sample(&x_g, f64::cos);

    let first = locator.locate(&x_f, &f, &x_g, &g).unwrap();
    let second = locator.locate(&x_f, &f, &x_g, &g).unwrap();
    assert_eq!(first, second);
}

#[test]
fn invalid_input_fails_fast() {
    let config = LocatorConfiguration::new();
    let x = [0.0, 1.0, 2.0];
    let y = [0.0, 1.0, 2.0];

    let err = locate_intersections(&x, &y, &x, &y, &config.with_fine_resolution(1)).unwrap_err();
    assert!(matches!(err, IntersectionError::InvalidConfiguration(_)));

    let err = locate_intersections(&x, &y[..2], &x, &y, &config).unwrap_err();
    assert!(matches!(err, IntersectionError::LengthMismatch { x_len: 3, y_len: 2 }));

    let err = locate_intersections(&x[..1], &y[..1], &x, &y, &config).unwrap_err();
    assert!(matches!(err, IntersectionError::InsufficientPoints { got: 1, .. }));

    let err = locate_intersections(&[0.0, 2.0, 1.0], &y, &x, &y, &config).unwrap_err();
    assert!(matches!(err, IntersectionError::UnsortedInput { index: 2 }));
}

#[test]
fn points_serialize_as_json_objects() {
    let value = serde_json::to_value(IntersectionPoint::new(1.5, -2.0)).unwrap();
    assert_eq!(value, serde_json::json!({"x": 1.5, "y": -2.0}));
}
