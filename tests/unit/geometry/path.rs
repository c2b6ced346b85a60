use super::*;

fn line(x0: f64, x1: f64) -> PathGeometry {
    PathGeometry::as_corners(&[Point::xy(x0, 0.0), Point::xy(x1, 0.0)]).unwrap()
}

fn square(cx: f64, cy: f64, side: f64) -> PathGeometry {
    let h = side / 2.0;
    PathGeometry::as_corners(&[
        Point::xy(cx - h, cy - h),
        Point::xy(cx + h, cy - h),
        Point::xy(cx + h, cy + h),
        Point::xy(cx - h, cy + h),
        Point::xy(cx - h, cy - h),
    ])
    .unwrap()
}

fn wavy() -> PathGeometry {
    let a = Subpath::from_segments(&[
        Segment::new(
            Point::xy(0.0, 0.0),
            Point::xy(1.0, 2.0),
            Point::xy(2.0, -2.0),
            Point::xy(3.0, 0.0),
        ),
        Segment::new(
            Point::xy(3.0, 0.0),
            Point::xy(4.0, 1.0),
            Point::xy(5.0, 1.0),
            Point::new(6.0, 0.0, 1.0),
        ),
    ])
    .unwrap();
    let b = Subpath::from_segments(&[Segment::line(Point::xy(0.0, 5.0), Point::xy(2.0, 7.0))])
        .unwrap();
    PathGeometry::new(vec![a, b])
}

#[test]
fn subpath_storage_shares_anchors() {
    let g = wavy();
    let sp = g.subpath(0).unwrap();
    assert_eq!(sp.points().len(), 1 + 3 * 2);
    assert_eq!(sp.curve_count(), 2);
    assert_eq!(g.curve_count(), 3);
    assert_eq!(g.structure(), vec![2, 1]);
}

#[test]
fn from_points_rejects_bad_lengths() {
    assert!(Subpath::from_points(vec![Point::ORIGIN; 3]).is_err());
    assert!(Subpath::from_points(vec![Point::ORIGIN; 5]).is_err());
    assert!(Subpath::from_points(vec![Point::ORIGIN; 7]).is_ok());
}

#[test]
fn from_segments_rejects_gaps() {
    let err = Subpath::from_segments(&[
        Segment::line(Point::ORIGIN, Point::xy(1.0, 0.0)),
        Segment::line(Point::xy(2.0, 0.0), Point::xy(3.0, 0.0)),
    ]);
    assert!(matches!(err, Err(MorphError::InvalidInput(_))));
}

#[test]
fn nth_curve_spans_subpaths() {
    let g = wavy();
    assert_eq!(g.nth_curve(2).unwrap().start, Point::xy(0.0, 5.0));
    assert!(matches!(g.nth_curve(3), Err(MorphError::OutOfRange(_))));
    assert!(g.nth_curve(usize::MAX).is_err());
}

#[test]
fn point_at_partitions_by_curve_index() {
    let g = wavy();
    assert_eq!(g.point_at(0.0).unwrap(), Point::xy(0.0, 0.0));
    assert_eq!(g.point_at(1.0).unwrap(), Point::xy(2.0, 7.0));
    // 1/3 is the boundary between curve 0 and curve 1.
    assert!(g.point_at(1.0 / 3.0).unwrap().approx_eq(Point::xy(3.0, 0.0), 1e-9));
    let mid_first = g.nth_curve(0).unwrap().eval(0.5);
    assert!(g.point_at(1.0 / 6.0).unwrap().approx_eq(mid_first, 1e-9));
}

#[test]
fn point_at_rejects_bad_input() {
    assert!(matches!(
        wavy().point_at(1.01),
        Err(MorphError::OutOfRange(_))
    ));
    assert!(wavy().point_at(f64::NAN).is_err());
    assert!(matches!(
        PathGeometry::empty().point_at(0.5),
        Err(MorphError::OutOfRange(_))
    ));
}

#[test]
fn t_at_point_finds_grid_samples() {
    let g = wavy();
    let settings = PathSettings {
        point_search_samples: 8,
        ..PathSettings::default()
    };
    // Curve 1, local 0.25 -> global (1 + 0.25) / 3.
    let p = g.nth_curve(1).unwrap().eval(0.25);
    let t = g.t_at_point_with(p, &settings).unwrap();
    assert!((t - 1.25 / 3.0).abs() < 1e-9);
    assert!(g.point_at(t).unwrap().approx_eq(p, 1e-9));
}

#[test]
fn t_at_point_inverts_point_at_between_samples() {
    for g in [line(0.0, 4.0), wavy()] {
        for t in [0.3, 0.51, 0.777] {
            let p = g.point_at(t).unwrap();
            let found = g.t_at_point(p).unwrap();
            assert!((found - t).abs() < 1e-6, "t={t}: found {found}");
            assert!(g.point_at(found).unwrap().approx_eq(p, 1e-6));
        }
    }
}

#[test]
fn t_at_point_with_coarse_search_still_refines() {
    let g = wavy();
    let settings = PathSettings {
        point_search_samples: 3,
        ..PathSettings::default()
    };
    let p = g.point_at(0.123).unwrap();
    let t = g.t_at_point_with(p, &settings).unwrap();
    assert!((t - 0.123).abs() < 1e-6);
}

#[test]
fn t_at_point_reports_points_off_the_path() {
    let err = line(0.0, 4.0).t_at_point(Point::xy(2.0, 1.0));
    assert!(matches!(err, Err(MorphError::PointNotOnPath(_))));
}

#[test]
fn arc_length_of_lines_is_exact_and_curves_converge() {
    assert!((line(0.0, 4.0).arc_length(1) - 4.0).abs() < 1e-12);
    assert!((square(0.0, 0.0, 2.0).arc_length(3) - 8.0).abs() < 1e-12);

    let g = wavy();
    let coarse = g.arc_length(2);
    let fine = g.arc_length(64);
    let finer = g.arc_length(512);
    assert!(coarse <= fine && fine <= finer + 1e-12);
    assert!(finer - fine < 1e-2);
    assert_eq!(
        g.arc_length_with(&PathSettings::default()).unwrap(),
        g.arc_length(16)
    );
}

#[test]
fn subcurve_of_a_straight_segment() {
    let s = line(0.0, 4.0).subcurve(0.25, 0.75).unwrap();
    assert_eq!(s.curve_count(), 1);
    let seg = s.nth_curve(0).unwrap();
    assert!(seg.start.approx_eq(Point::xy(1.0, 0.0), 1e-9));
    assert!(seg.end.approx_eq(Point::xy(3.0, 0.0), 1e-9));
}

#[test]
fn subcurve_endpoints_match_point_at() {
    let g = wavy();
    assert_eq!(g.subcurve(0.0, 1.0).unwrap(), g);
    for (a, b) in [(0.1, 0.2), (0.1, 0.9), (0.0, 0.5), (0.5, 1.0), (0.2, 2.0 / 3.0)] {
        let s = g.subcurve(a, b).unwrap();
        assert!(s.point_at(0.0).unwrap().approx_eq(g.point_at(a).unwrap(), 1e-9));
        assert!(s.point_at(1.0).unwrap().approx_eq(g.point_at(b).unwrap(), 1e-9));
    }
}

#[test]
fn subcurve_keeps_subpath_boundaries() {
    let s = wavy().subcurve(0.5, 1.0).unwrap();
    assert_eq!(s.structure(), vec![1, 1]);
}

#[test]
fn subcurve_rejects_inverted_range() {
    assert!(matches!(
        wavy().subcurve(0.6, 0.6),
        Err(MorphError::OutOfRange(_))
    ));
    assert!(wavy().subcurve(0.7, 0.2).is_err());
}

#[test]
fn insert_curves_preserves_shape() {
    let g = wavy();
    for n in [0usize, 1, 2, 5, 9] {
        let grown = g.insert_curves(n);
        assert_eq!(grown.curve_count(), g.curve_count() + n);
        assert_eq!(grown.subpath_count(), g.subpath_count());
        for sp in grown.subpaths() {
            for w in sp.segments().collect::<Vec<_>>().windows(2) {
                assert_eq!(w[0].end, w[1].start);
            }
        }
    }

    // Shape preservation, checked against a single-curve geometry where global_t maps
    // to the same local parameter before and after subdivision.
    let single = PathGeometry::from(
        Subpath::from_segments(&[g.nth_curve(0).unwrap()]).unwrap(),
    );
    let grown = single.insert_curves(3);
    for i in 0..=20 {
        let t = i as f64 / 20.0;
        assert!(
            grown
                .point_at(t)
                .unwrap()
                .approx_eq(single.point_at(t).unwrap(), 1e-9)
        );
    }
}

#[test]
fn insert_curves_distributes_evenly() {
    let two = PathGeometry::as_corners(&[
        Point::xy(0.0, 0.0),
        Point::xy(3.0, 0.0),
        Point::xy(3.0, 2.0),
    ])
    .unwrap();
    let grown = two.insert_curves(3);
    assert_eq!(grown.curve_count(), 5);
    // Curve 0 is cut into 3 pieces, curve 1 into 2.
    let anchors = grown.anchors();
    assert!(anchors[1].approx_eq(Point::xy(1.0, 0.0), 1e-9));
    assert!(anchors[2].approx_eq(Point::xy(2.0, 0.0), 1e-9));
    assert!(anchors[3].approx_eq(Point::xy(3.0, 0.0), 1e-9));
    assert!(anchors[4].approx_eq(Point::xy(3.0, 1.0), 1e-9));
    assert_eq!(distribute(3, 2), vec![2, 1]);
    assert_eq!(distribute(7, 3), vec![3, 2, 2]);
}

#[test]
fn degenerate_subpaths_replicate() {
    let dot = Subpath::degenerate(Point::xy(1.0, 1.0));
    assert!(dot.is_degenerate());
    let grown = dot.insert_curves(3);
    assert_eq!(grown.curve_count(), 4);
    assert!(grown.is_degenerate());
    assert!(!wavy().subpath(0).unwrap().is_degenerate());
}

#[test]
fn orientation_uses_signed_area() {
    let ccw = square(0.0, 0.0, 2.0);
    assert_eq!(ccw.orientation(0).unwrap(), Orientation::CounterClockwise);
    assert_eq!(ccw.reversed().orientation(0).unwrap(), Orientation::Clockwise);
    assert!(matches!(
        line(0.0, 1.0).orientation(0),
        Err(MorphError::UndefinedOrientation(_))
    ));
    assert!(matches!(
        ccw.orientation(4),
        Err(MorphError::OutOfRange(_))
    ));
}

#[test]
fn bez_path_skips_degenerate_subpaths() {
    let mut g = square(0.0, 0.0, 2.0);
    g.push(Subpath::degenerate(Point::xy(5.0, 5.0)));
    let path = g.to_bez_path();
    let els = path.elements();
    assert_eq!(els[0], kurbo::PathEl::MoveTo(kurbo::Point::new(-1.0, -1.0)));
    assert_eq!(els.last(), Some(&kurbo::PathEl::ClosePath));
    let moves = els
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 1);
}

#[test]
fn bounds_center_and_transform() {
    let g = square(3.0, -1.0, 2.0);
    assert_eq!(g.center().unwrap(), Point::xy(3.0, -1.0));
    let moved = g.transformed(Affine::translate((-3.0, 1.0)));
    assert!(moved.center().unwrap().approx_eq(Point::ORIGIN, 1e-12));
    assert!(PathGeometry::empty().bounds().is_none());
}

#[test]
fn serde_validates_subpath_point_counts() {
    let g = wavy();
    let json = serde_json::to_string(&g).unwrap();
    let back: PathGeometry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, g);

    let bad = r#"[[{"x":0.0,"y":0.0},{"x":1.0,"y":0.0}]]"#;
    assert!(serde_json::from_str::<PathGeometry>(bad).is_err());
}
