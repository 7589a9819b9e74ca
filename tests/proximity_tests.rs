mod util;

use proptest::prelude::*;
use terrain_bowls::prelude::*;
use util::{line, pt};

#[test]
fn parallel_segments_three_apart() {
    let a = line(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]]);
    let b = line(&[[0.0, 3.0, 0.0], [10.0, 3.0, 0.0]]);
    let hit = CurveProximityFinder::default()
        .closest_point(&a, &b)
        .unwrap()
        .unwrap();
    assert!((hit.distance - 3.0).abs() < 1e-9);
    // Every sample is equally close; the first one is kept.
    assert_eq!(hit.point, pt(0.0, 0.0, 0.0));
    assert_eq!(hit.paired, pt(0.0, 3.0, 0.0));
    assert!(a.closest_point_to(hit.point).distance_to(hit.point) < 1e-12);
}

#[test]
fn skewed_segments_approach_within_resolution() {
    // True closest approach is at x = 10 on A (distance 1); B rises away from A
    // towards x = 0.
    let a = line(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]]);
    let b = line(&[[0.0, 5.0, 0.0], [10.0, 1.0, 0.0]]);
    let hit = CurveProximityFinder::default()
        .closest_point(&a, &b)
        .unwrap()
        .unwrap();
    // Sampling resolution is (end - start) / 100 of the parameter, 0.1 in x.
    assert!(hit.point.x > 9.8, "got {}", hit.point);
    assert!(hit.distance < 1.1);
}

#[test]
fn end_parameter_sample_count() {
    let finder = CurveProximityFinder::default();
    // Accumulating 0.01 a hundred times overshoots 1.0, so the end is not sampled.
    assert_eq!(finder.sample_count(0.0, 1.0), 100);
    let n = finder.sample_count(0.0, 7.0);
    assert!(n == 100 || n == 101, "{n}");
}

/// Straight line along x whose parameter domain starts far from zero.
struct OffsetLine {
    start: f64,
    width: f64,
}

impl Curve for OffsetLine {
    fn start_param(&self) -> f64 {
        self.start
    }

    fn end_param(&self) -> f64 {
        self.start + self.width
    }

    fn point_at_param(&self, param: f64) -> Result<Point3, BowlError> {
        Ok(pt(param - self.start, 0.0, 0.0))
    }

    fn closest_point_to(&self, point: Point3) -> Point3 {
        pt(point.x.clamp(0.0, self.width), 0.0, 0.0)
    }
}

#[test]
fn step_below_float_spacing_terminates() {
    // Floats near 1e17 are 16 apart, so a step of 0.16 cannot move the parameter.
    let a = OffsetLine {
        start: 1e17,
        width: 16.0,
    };
    let b = line(&[[0.0, 1.0, 0.0], [16.0, 1.0, 0.0]]);
    let finder = CurveProximityFinder::default();
    assert_eq!(finder.sample_count(a.start_param(), a.end_param()), 1);
    let hit = finder.closest_point(&a, &b).unwrap().unwrap();
    assert_eq!(hit.param, 1e17);
    assert_eq!(hit.point, pt(0.0, 0.0, 0.0));
    assert_eq!(hit.distance, 1.0);
}

#[test]
fn shared_start_with_no_closer_pair_returns_start() {
    let a = line(&[[0.0, 0.0, 0.0], [10.0, 0.0, -1.0]]);
    let b = line(&[[0.0, 0.0, 0.0], [0.0, 10.0, -1.0]]);
    let hit = CurveProximityFinder::default()
        .closest_point(&a, &b)
        .unwrap()
        .unwrap();
    let tol = Tolerance::default();
    assert!(tol.is_equal_point(hit.point, a.start_point().unwrap()));
}

fn coords() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(-50.0f64..50.0)
}

proptest! {
    #[test]
    fn result_is_best_of_samples(
        pa in prop::collection::vec(coords(), 2..6),
        pb in prop::collection::vec(coords(), 1..6),
    ) {
        let a = line(&pa);
        let b = line(&pb);
        let finder = CurveProximityFinder::default();
        let hit = finder.closest_point(&a, &b).unwrap().unwrap();

        // Lies on A.
        prop_assert!(a.closest_point_to(hit.point).distance_to(hit.point) < 1e-6);

        // No other sample is strictly closer.
        let (start, end) = (a.start_param(), a.end_param());
        let step = (end - start) / 100.0;
        let mut param = start;
        while param < end {
            let p = a.point_at_param(param).unwrap();
            let d = p.distance_to(b.closest_point_to(p));
            prop_assert!(hit.distance <= d);
            param += step;
        }
    }
}
