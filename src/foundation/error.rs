/// Convenience result type used across bezmorph.
pub type MorphResult<T> = Result<T, MorphError>;

/// Error taxonomy for geometry, alignment, and interpolation APIs.
///
/// Every variant is a local, synchronous failure. Operations that return one of these
/// have not mutated their inputs.
#[derive(thiserror::Error, Debug)]
pub enum MorphError {
    /// A parameter (global `t`, `alpha`, an index) fell outside its valid range.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Two geometries or hierarchies that must share structure do not.
    #[error("structural mismatch: {0}")]
    StructuralMismatch(String),

    /// A point lookup found no sample within tolerance.
    #[error("point not on path: {0}")]
    PointNotOnPath(String),

    /// A node would become its own descendant.
    #[error("cyclic ownership: {0}")]
    CyclicOwnership(String),

    /// Orientation was requested for an open or zero-area subpath.
    #[error("undefined orientation: {0}")]
    UndefinedOrientation(String),

    /// Malformed constructor input or settings.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MorphError {
    /// Build a [`MorphError::OutOfRange`] value.
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Build a [`MorphError::StructuralMismatch`] value.
    pub fn structural_mismatch(msg: impl Into<String>) -> Self {
        Self::StructuralMismatch(msg.into())
    }

    /// Build a [`MorphError::PointNotOnPath`] value.
    pub fn point_not_on_path(msg: impl Into<String>) -> Self {
        Self::PointNotOnPath(msg.into())
    }

    /// Build a [`MorphError::CyclicOwnership`] value.
    pub fn cyclic_ownership(msg: impl Into<String>) -> Self {
        Self::CyclicOwnership(msg.into())
    }

    /// Build a [`MorphError::UndefinedOrientation`] value.
    pub fn undefined_orientation(msg: impl Into<String>) -> Self {
        Self::UndefinedOrientation(msg.into())
    }

    /// Build a [`MorphError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Fail with [`MorphError::OutOfRange`] unless `value` is a finite number in `[0, 1]`.
pub(crate) fn check_unit_interval(name: &str, value: f64) -> MorphResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(MorphError::out_of_range(format!(
            "{name} must be in [0, 1], got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
