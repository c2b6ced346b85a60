//! Geometry constructors from ordered point lists.

use crate::{
    foundation::core::{EPSILON, Point},
    foundation::error::{MorphError, MorphResult},
    geometry::path::{PathGeometry, Subpath},
    geometry::segment::Segment,
};

fn check_points(points: &[Point]) -> MorphResult<()> {
    if points.len() < 2 {
        return Err(MorphError::invalid_input(format!(
            "need at least 2 points, got {}",
            points.len()
        )));
    }
    if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
        return Err(MorphError::invalid_input(format!(
            "point {bad:?} is not finite"
        )));
    }
    Ok(())
}

/// One subpath of straight segments through `points`.
pub fn as_corners(points: &[Point]) -> MorphResult<PathGeometry> {
    check_points(points)?;
    let segments = points.windows(2).map(|w| Segment::line(w[0], w[1]));
    Ok(Subpath::from_segments_unchecked(segments).into())
}

/// One tangent-continuous subpath through `points` (Catmull-Rom handles).
///
/// If the last point repeats the first, the curve closes smoothly through it; otherwise the
/// end tangents use the endpoints themselves as missing neighbours.
pub fn as_smooth(points: &[Point]) -> MorphResult<PathGeometry> {
    check_points(points)?;
    if points.len() == 2 {
        return as_corners(points);
    }

    let closed = points[0].approx_eq(points[points.len() - 1], EPSILON);
    let ring = if closed {
        &points[..points.len() - 1]
    } else {
        points
    };
    let n = ring.len() as isize;
    let get = |i: isize| -> Point {
        let idx = if closed {
            i.rem_euclid(n)
        } else {
            i.clamp(0, n - 1)
        };
        ring[idx as usize]
    };

    let count = if closed { n } else { n - 1 };
    let segments = (0..count).map(|i| {
        let p0 = get(i - 1);
        let p1 = get(i);
        let p2 = get(i + 1);
        let p3 = get(i + 2);
        Segment::new(
            p1,
            p1 + (p2 - p0) * (1.0 / 6.0),
            p2 - (p3 - p1) * (1.0 / 6.0),
            p2,
        )
    });
    Ok(Subpath::from_segments_unchecked(segments).into())
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/construct.rs"]
mod tests;
