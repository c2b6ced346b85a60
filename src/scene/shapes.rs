//! Shape producers. Each returns a geometry-bearing [`Node`] centred on the origin
//! unless it takes explicit coordinates; move results with [`Node::shifted`] or a
//! transform.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::{
    foundation::core::Point,
    foundation::error::{MorphError, MorphResult},
    geometry::path::{PathGeometry, Subpath},
    geometry::segment::Segment,
    scene::node::Node,
};

/// Handle length, as a fraction of the radius, for a quarter circle cubic.
const KAPPA: f64 = 0.552_284_749_830_793_4;

fn check_extent(name: &str, value: f64) -> MorphResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MorphError::invalid_input(format!(
            "{name} must be finite and positive, got {value}"
        )));
    }
    Ok(())
}

/// Straight segment from `start` to `end`.
pub fn line(start: Point, end: Point) -> MorphResult<Node> {
    polyline(&[start, end])
}

/// Open chain of straight segments.
pub fn polyline(points: &[Point]) -> MorphResult<Node> {
    Ok(Node::with_geometry(PathGeometry::as_corners(points)?))
}

/// Closed polygon through `vertices`; the closing edge is added automatically.
pub fn polygon(vertices: &[Point]) -> MorphResult<Node> {
    if vertices.len() < 3 {
        return Err(MorphError::invalid_input(format!(
            "polygon needs at least 3 vertices, got {}",
            vertices.len()
        )));
    }
    let mut ring = vertices.to_vec();
    ring.push(vertices[0]);
    polyline(&ring)
}

/// Regular `n`-gon with circumradius `radius`, counterclockwise.
///
/// Even-sided polygons sit on a flat bottom edge; odd-sided ones point up.
pub fn regular_polygon(n: usize, radius: f64) -> MorphResult<Node> {
    if n < 3 {
        return Err(MorphError::invalid_input(format!(
            "regular polygon needs at least 3 sides, got {n}"
        )));
    }
    check_extent("radius", radius)?;
    let start = if n % 2 == 0 {
        FRAC_PI_2 - TAU / (2 * n) as f64
    } else {
        FRAC_PI_2
    };
    let vertices: Vec<Point> = (0..n)
        .map(|i| {
            let (sin, cos) = (start + TAU * i as f64 / n as f64).sin_cos();
            Point::xy(radius * cos, radius * sin)
        })
        .collect();
    polygon(&vertices)
}

/// Axis-aligned rectangle, starting at the upper-right corner, counterclockwise.
pub fn rectangle(width: f64, height: f64) -> MorphResult<Node> {
    check_extent("width", width)?;
    check_extent("height", height)?;
    let (w, h) = (width / 2.0, height / 2.0);
    polygon(&[
        Point::xy(w, h),
        Point::xy(-w, h),
        Point::xy(-w, -h),
        Point::xy(w, -h),
    ])
}

/// Square with the given side length.
pub fn square(side: f64) -> MorphResult<Node> {
    rectangle(side, side)
}

/// Circle as four cubic quarter arcs, starting at `(radius, 0)`, counterclockwise.
pub fn circle(radius: f64) -> MorphResult<Node> {
    check_extent("radius", radius)?;
    let r = radius;
    let k = KAPPA * r;
    let quarters = [
        [(r, 0.0), (r, k), (k, r), (0.0, r)],
        [(0.0, r), (-k, r), (-r, k), (-r, 0.0)],
        [(-r, 0.0), (-r, -k), (-k, -r), (0.0, -r)],
        [(0.0, -r), (k, -r), (r, -k), (r, 0.0)],
    ];
    let segments: Vec<Segment> = quarters
        .iter()
        .map(|q| {
            let [a, b, c, d] = q.map(|(x, y)| Point::xy(x, y));
            Segment::new(a, b, c, d)
        })
        .collect();
    Ok(Node::with_geometry(Subpath::from_segments(&segments)?.into()))
}

/// Invisible point at `at`.
pub fn dot(at: Point) -> Node {
    Node::with_geometry(Subpath::degenerate(at).into())
}

/// Grouping node owning `children` in order.
pub fn group(children: impl IntoIterator<Item = Node>) -> MorphResult<Node> {
    let mut node = Node::group();
    for child in children {
        node.add_child(child)?;
    }
    Ok(node)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/shapes.rs"]
mod tests;
