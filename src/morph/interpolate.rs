use std::f64::consts::PI;

use crate::{
    foundation::core::{Affine, Point},
    foundation::error::{MorphError, MorphResult, check_unit_interval},
    geometry::path::{PathGeometry, Subpath},
    scene::node::{Color, Style},
};

/// Straight-line blending between two values.
///
/// Implementations return `a` exactly at `t == 0` and `b` exactly at `t == 1`.
pub trait Lerp: Sized {
    /// Blend from `a` to `b` by `t`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (1.0 - t) * a + t * b
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

impl Lerp for Color {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self::rgb(
            <f64 as Lerp>::lerp(&a.r, &b.r, t),
            <f64 as Lerp>::lerp(&a.g, &b.g, t),
            <f64 as Lerp>::lerp(&a.b, &b.b, t),
        )
    }
}

impl Lerp for Style {
    /// Colors, opacities and width blend; `z_index` keeps `a`'s value until `t` reaches 1.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            fill: Color::lerp(&a.fill, &b.fill, t),
            fill_opacity: <f64 as Lerp>::lerp(&a.fill_opacity, &b.fill_opacity, t),
            stroke: Color::lerp(&a.stroke, &b.stroke, t),
            stroke_opacity: <f64 as Lerp>::lerp(&a.stroke_opacity, &b.stroke_opacity, t),
            stroke_width: <f64 as Lerp>::lerp(&a.stroke_width, &b.stroke_width, t),
            z_index: if t >= 1.0 { b.z_index } else { a.z_index },
        }
    }
}

impl Lerp for Affine {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let (ca, cb) = (a.as_coeffs(), b.as_coeffs());
        Affine::new(std::array::from_fn(|i| <f64 as Lerp>::lerp(&ca[i], &cb[i], t)))
    }
}

/// Maps a pair of corresponding control points and a progress value to a blended point.
pub trait PathFn {
    /// Position of the point travelling from `start` to `end` at `alpha`.
    fn path(&self, start: Point, end: Point, alpha: f64) -> Point;
}

impl<F> PathFn for F
where
    F: Fn(Point, Point, f64) -> Point,
{
    fn path(&self, start: Point, end: Point, alpha: f64) -> Point {
        self(start, end, alpha)
    }
}

/// Straight-line travel.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Linear;

impl PathFn for Linear {
    fn path(&self, start: Point, end: Point, alpha: f64) -> Point {
        start.lerp(end, alpha)
    }
}

/// Travel along a circular arc sweeping `angle` radians about the z axis.
///
/// Positive angles sweep counterclockwise. Depth is blended linearly. Angles close to
/// zero degrade to straight travel.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArcPath {
    /// Swept angle in radians.
    pub angle: f64,
}

impl ArcPath {
    const STRAIGHT_THRESHOLD: f64 = 0.01;

    /// Arc sweeping `angle` radians.
    pub fn new(angle: f64) -> Self {
        Self { angle }
    }

    /// Half-turn, clockwise.
    pub fn clockwise() -> Self {
        Self::new(-PI)
    }

    /// Half-turn, counterclockwise.
    pub fn counterclockwise() -> Self {
        Self::new(PI)
    }
}

impl PathFn for ArcPath {
    fn path(&self, start: Point, end: Point, alpha: f64) -> Point {
        if self.angle.abs() < Self::STRAIGHT_THRESHOLD {
            return start.lerp(end, alpha);
        }
        let (vx, vy) = (end.x - start.x, end.y - start.y);
        // Center sits on the perpendicular bisector of the chord.
        let k = 1.0 / (self.angle / 2.0).tan();
        let cx = start.x + vx / 2.0 - vy / 2.0 * k;
        let cy = start.y + vy / 2.0 + vx / 2.0 * k;
        let (sin, cos) = (alpha * self.angle).sin_cos();
        let (dx, dy) = (start.x - cx, start.y - cy);
        Point::new(
            cx + dx * cos - dy * sin,
            cy + dx * sin + dy * cos,
            <f64 as Lerp>::lerp(&start.z, &end.z, alpha),
        )
    }
}

/// Blends aligned geometries.
#[derive(Clone, Copy, Debug, Default)]
pub struct Interpolator;

impl Interpolator {
    /// Blend every control point of `a` toward its counterpart in `b`.
    ///
    /// Fails with [`MorphError::StructuralMismatch`] unless the inputs share subpath and
    /// curve structure, and with [`MorphError::OutOfRange`] unless `alpha` lies in
    /// `[0, 1]`. At `alpha` 0 and 1 the result equals `a` or `b` exactly, whatever
    /// `path_fn` does.
    pub fn interpolate<P>(
        a: &PathGeometry,
        b: &PathGeometry,
        alpha: f64,
        path_fn: &P,
    ) -> MorphResult<PathGeometry>
    where
        P: PathFn + ?Sized,
    {
        check_unit_interval("alpha", alpha)?;
        if !a.is_aligned_with(b) {
            return Err(MorphError::structural_mismatch(format!(
                "cannot interpolate structure {:?} into {:?}",
                a.structure(),
                b.structure()
            )));
        }
        if alpha == 0.0 {
            return Ok(a.clone());
        }
        if alpha == 1.0 {
            return Ok(b.clone());
        }
        Ok(PathGeometry::new(
            a.subpaths()
                .iter()
                .zip(b.subpaths())
                .map(|(sa, sb)| {
                    Subpath::from_points_unchecked(
                        sa.points()
                            .iter()
                            .zip(sb.points())
                            .map(|(pa, pb)| path_fn.path(*pa, *pb, alpha))
                            .collect(),
                    )
                })
                .collect(),
        ))
    }

    /// Straight-line [`Interpolator::interpolate`].
    pub fn interpolate_linear(
        a: &PathGeometry,
        b: &PathGeometry,
        alpha: f64,
    ) -> MorphResult<PathGeometry> {
        Self::interpolate(a, b, alpha, &Linear)
    }

    /// Blend two styles.
    pub fn interpolate_style(a: &Style, b: &Style, alpha: f64) -> MorphResult<Style> {
        check_unit_interval("alpha", alpha)?;
        Ok(Style::lerp(a, b, alpha))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/interpolate.rs"]
mod tests;
