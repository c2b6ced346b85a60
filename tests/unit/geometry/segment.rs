use super::*;
use kurbo::{ParamCurve, ParamCurveArclen};

fn curve() -> Segment {
    Segment::new(
        Point::xy(0.0, 0.0),
        Point::xy(1.0, 2.0),
        Point::xy(3.0, 2.0),
        Point::xy(4.0, 0.0),
    )
}

#[test]
fn eval_matches_endpoints_and_kurbo() {
    let c = curve();
    assert_eq!(c.eval(0.0), c.start);
    assert_eq!(c.eval(1.0), c.end);
    for t in [0.1, 0.25, 0.5, 0.9] {
        let ours = c.eval(t);
        let theirs = c.to_kurbo().eval(t);
        assert!((ours.x - theirs.x).abs() < 1e-12);
        assert!((ours.y - theirs.y).abs() < 1e-12);
    }
}

#[test]
fn split_halves_trace_the_same_curve() {
    let c = curve();
    let (left, right) = c.split(0.3);
    assert!(left.end.approx_eq(c.eval(0.3), 1e-12));
    assert_eq!(left.end, right.start);
    assert!(left.eval(0.5).approx_eq(c.eval(0.15), 1e-12));
    assert!(right.eval(0.5).approx_eq(c.eval(0.65), 1e-12));
}

#[test]
fn partial_keeps_untouched_boundaries() {
    let c = curve();
    assert_eq!(c.partial(0.0, 1.0), c);
    assert_eq!(c.partial(0.4, 1.0).end, c.end);
    assert_eq!(c.partial(0.0, 0.4).start, c.start);
    let mid = c.partial(0.2, 0.6);
    assert!(mid.start.approx_eq(c.eval(0.2), 1e-12));
    assert!(mid.end.approx_eq(c.eval(0.6), 1e-12));
    assert!(c.partial(1.0, 1.0).is_degenerate());
}

#[test]
fn subdivide_yields_equal_parameter_pieces() {
    let line = Segment::line(Point::ORIGIN, Point::xy(4.0, 0.0));
    let pieces = line.subdivide(4);
    assert_eq!(pieces.len(), 4);
    for (i, piece) in pieces.iter().enumerate() {
        assert!(piece.start.approx_eq(Point::xy(i as f64, 0.0), 1e-9));
        assert!(piece.end.approx_eq(Point::xy(i as f64 + 1.0, 0.0), 1e-9));
    }
    for w in pieces.windows(2) {
        assert_eq!(w[0].end, w[1].start);
    }
}

#[test]
fn polyline_length_converges_towards_kurbo_arclen() {
    let c = curve();
    let exact = c.to_kurbo().arclen(1e-9);
    let coarse = c.polyline_length(4);
    let fine = c.polyline_length(256);
    assert!(coarse <= fine + 1e-12);
    assert!((fine - exact).abs() < 1e-3);
}

#[test]
fn degenerate_and_reverse() {
    assert!(Segment::point(Point::xy(1.0, 1.0)).is_degenerate());
    assert!(!curve().is_degenerate());
    let r = curve().reversed();
    assert_eq!(r.start, curve().end);
    assert!(r.eval(0.25).approx_eq(curve().eval(0.75), 1e-12));
}

#[test]
fn nearest_in_locates_points_between_samples() {
    let c = curve();
    for t in [0.0, 0.137, 0.5, 0.861, 1.0] {
        let (found, d) = c.nearest_in(c.eval(t), 0.0, 1.0);
        assert!((found - t).abs() < 1e-6, "t={t}: found {found}");
        assert!(d < 1e-9);
    }

    // Off the curve, the closest parameter is clamped to the interval.
    let (found, d) = c.nearest_in(Point::xy(-1.0, 0.0), 0.2, 0.4);
    assert_eq!(found, 0.2);
    assert!((d - c.eval(0.2).distance(Point::xy(-1.0, 0.0))).abs() < 1e-12);
}
