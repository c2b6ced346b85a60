use std::ops::{Add, AddAssign, Mul, Neg, Sub};

pub use kurbo::{Affine, BezPath, Rect, Vec2};

/// Floating tolerance used by geometric equality checks.
pub const EPSILON: f64 = 1e-6;

/// A control point in scene space.
///
/// `z` only orders depth; it never participates in projection.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate (y-up).
    pub y: f64,
    /// Depth coordinate.
    #[serde(default)]
    pub z: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Build a point from three coordinates.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build a point in the `z = 0` plane.
    pub const fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean length of the vector from the origin to this point.
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }

    /// Component-wise comparison within `tol`.
    pub fn approx_eq(self, other: Self, tol: f64) -> bool {
        (self.x - other.x).abs() <= tol
            && (self.y - other.y).abs() <= tol
            && (self.z - other.z).abs() <= tol
    }

    /// True when every coordinate is finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Affine combination `(1 - t) * self + t * other`.
    ///
    /// Written so that `t == 0` yields `self` and `t == 1` yields `other` bit-for-bit.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let s = 1.0 - t;
        Self {
            x: s * self.x + t * other.x,
            y: s * self.y + t * other.y,
            z: s * self.z + t * other.z,
        }
    }

    /// Apply a 2D affine transform to `(x, y)`; `z` passes through.
    pub fn transformed(self, affine: Affine) -> Self {
        let p = affine * kurbo::Point::new(self.x, self.y);
        Self {
            x: p.x,
            y: p.y,
            z: self.z,
        }
    }

    /// Project onto the `z = 0` plane as a kurbo point.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Self::xy(p.x, p.y)
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// 0-based frame index on an animation timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
