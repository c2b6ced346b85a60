use super::*;

fn unit_square() -> PathGeometry {
    PathGeometry::as_corners(&[
        Point::xy(0.0, 0.0),
        Point::xy(1.0, 0.0),
        Point::xy(1.0, 1.0),
        Point::xy(0.0, 1.0),
        Point::xy(0.0, 0.0),
    ])
    .unwrap()
}

#[test]
fn line_against_square_gets_equally_spaced_anchors() {
    let line = PathGeometry::as_corners(&[Point::xy(0.0, 0.0), Point::xy(4.0, 0.0)]).unwrap();
    let (a, b) = CurveAligner::align(&line, &unit_square());
    assert_eq!(a.structure(), vec![4]);
    assert_eq!(b.structure(), vec![4]);
    assert!(a.is_aligned_with(&b));

    let anchors = a.anchors();
    for (i, p) in anchors.iter().enumerate() {
        assert!(p.approx_eq(Point::xy(i as f64, 0.0), 1e-9), "anchor {i}: {p:?}");
    }
    assert_eq!(b, unit_square());
}

#[test]
fn missing_subpaths_pad_at_final_anchor() {
    let mut two = unit_square();
    two.push(Subpath::degenerate(Point::xy(9.0, 9.0)));
    two.push(
        Subpath::from_segments(&[crate::geometry::segment::Segment::line(
            Point::xy(5.0, 5.0),
            Point::xy(6.0, 5.0),
        )])
        .unwrap(),
    );
    let one = PathGeometry::as_corners(&[Point::xy(2.0, 0.0), Point::xy(3.0, 0.0)]).unwrap();

    let (a, b) = CurveAligner::align(&one, &two);
    assert_eq!(a.subpath_count(), 3);
    assert!(a.is_aligned_with(&b));
    for sp in &a.subpaths()[1..] {
        assert!(sp.is_degenerate());
        assert_eq!(sp.start(), Point::xy(3.0, 0.0));
    }
    // The visible part of the padded side is unchanged.
    assert_eq!(a.to_bez_path(), one.insert_curves(3).to_bez_path());
}

#[test]
fn empty_side_borrows_partner_starts() {
    let (a, b) = CurveAligner::align(&PathGeometry::empty(), &unit_square());
    assert!(a.is_aligned_with(&b));
    let sp = a.subpath(0).unwrap();
    assert!(sp.is_degenerate());
    assert_eq!(sp.start(), Point::xy(0.0, 0.0));
    assert_eq!(sp.curve_count(), 4);
}

#[test]
fn aligning_aligned_inputs_is_identity() {
    let (a, b) = CurveAligner::align(&unit_square(), &unit_square().reversed());
    assert_eq!(a, unit_square());
    assert_eq!(b, unit_square().reversed());

    let (e1, e2) = CurveAligner::align(&PathGeometry::empty(), &PathGeometry::empty());
    assert!(e1.is_empty() && e2.is_empty());
}

#[test]
fn alignment_is_idempotent_and_symmetric() {
    let line = PathGeometry::as_corners(&[Point::xy(0.0, 0.0), Point::xy(4.0, 0.0)]).unwrap();
    let (a1, b1) = CurveAligner::align(&line, &unit_square());
    let (a2, b2) = CurveAligner::align(&a1, &b1);
    assert_eq!((a1.clone(), b1.clone()), (a2, b2));

    let (b3, a3) = CurveAligner::align(&unit_square(), &line);
    assert_eq!(a3, a1);
    assert_eq!(b3, b1);
}
