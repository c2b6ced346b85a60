/// Rate functions remapping linear progress before it reaches the interpolator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    /// Identity.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in-out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in-out.
    InOutCubic,
    /// `3t^2 - 2t^3`.
    Smoothstep,
}

impl Ease {
    /// Every variant, in declaration order.
    pub const ALL: [Ease; 8] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::Smoothstep,
    ];

    /// Remap `t`, clamped to `[0, 1]`. Both ends map to themselves exactly.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => quad(t),
            Self::OutQuad => mirror(quad, t),
            Self::InOutQuad => in_out(quad, t),
            Self::InCubic => cubic(t),
            Self::OutCubic => mirror(cubic, t),
            Self::InOutCubic => in_out(cubic, t),
            Self::Smoothstep => t * t * (3.0 - 2.0 * t),
        }
    }
}

fn quad(t: f64) -> f64 {
    t * t
}

fn cubic(t: f64) -> f64 {
    t * t * t
}

/// The ease-out counterpart of an ease-in curve.
fn mirror(ease_in: fn(f64) -> f64, t: f64) -> f64 {
    1.0 - ease_in(1.0 - t)
}

/// Ease-in over the first half, mirrored ease-out over the second.
fn in_out(ease_in: fn(f64) -> f64, t: f64) -> f64 {
    if t < 0.5 {
        ease_in(2.0 * t) / 2.0
    } else {
        1.0 - ease_in(2.0 - 2.0 * t) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
