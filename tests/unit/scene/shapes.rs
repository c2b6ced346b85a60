use super::*;
use crate::geometry::path::Orientation;
use crate::scene::node::HasGeometry;

fn geometry(node: &Node) -> &PathGeometry {
    node.geometry().unwrap()
}

#[test]
fn square_is_closed_ccw_and_centred() {
    let sq = square(2.0).unwrap();
    let g = geometry(&sq);
    assert_eq!(g.structure(), vec![4]);
    assert!(g.subpath(0).unwrap().is_closed());
    assert_eq!(g.orientation(0).unwrap(), Orientation::CounterClockwise);
    assert_eq!(g.center().unwrap(), Point::ORIGIN);
    assert_eq!(g.start(), Some(Point::xy(1.0, 1.0)));
}

#[test]
fn circle_points_lie_near_the_radius() {
    let c = circle(3.0).unwrap();
    let g = geometry(&c);
    assert_eq!(g.structure(), vec![4]);
    assert_eq!(g.orientation(0).unwrap(), Orientation::CounterClockwise);
    for i in 0..=40 {
        let p = g.point_at(i as f64 / 40.0).unwrap();
        assert!((p.length() - 3.0).abs() < 3.0 * 5e-4, "{p:?}");
    }
    assert!((g.arc_length(64) - std::f64::consts::TAU * 3.0).abs() < 1e-2);
}

#[test]
fn regular_polygons_have_n_sides() {
    for n in [3usize, 4, 5, 6, 12] {
        let p = regular_polygon(n, 1.0).unwrap();
        let g = geometry(&p);
        assert_eq!(g.curve_count(), n);
        for a in g.anchors() {
            assert!((a.length() - 1.0).abs() < 1e-12);
        }
    }
    // Even-sided: flat bottom edge.
    let hex = regular_polygon(6, 1.0).unwrap();
    let low = geometry(&hex)
        .anchors()
        .iter()
        .filter(|p| (p.y - geometry(&hex).bounds().unwrap().0.y).abs() < 1e-12)
        .count();
    assert!(low >= 2);
    assert!(regular_polygon(2, 1.0).is_err());
}

#[test]
fn invalid_extents_are_rejected() {
    assert!(matches!(square(0.0), Err(MorphError::InvalidInput(_))));
    assert!(circle(f64::INFINITY).is_err());
    assert!(rectangle(1.0, -2.0).is_err());
    assert!(polygon(&[Point::ORIGIN, Point::xy(1.0, 0.0)]).is_err());
}

#[test]
fn dot_is_degenerate_and_line_is_open() {
    let d = dot(Point::xy(2.0, 3.0));
    assert!(geometry(&d).subpath(0).unwrap().is_degenerate());
    let l = line(Point::ORIGIN, Point::xy(1.0, 1.0)).unwrap();
    assert!(!geometry(&l).subpath(0).unwrap().is_closed());
}

#[test]
fn group_owns_children_in_order() {
    let a = square(1.0).unwrap();
    let b = circle(1.0).unwrap();
    let (ia, ib) = (a.id(), b.id());
    let g = group([a, b]).unwrap();
    assert!(!g.has_points());
    let ids: Vec<_> = g.children().iter().map(Node::id).collect();
    assert_eq!(ids, vec![ia, ib]);
    assert_eq!(g.family_len(), 3);
}
