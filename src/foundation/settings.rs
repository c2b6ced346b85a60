use crate::foundation::error::{MorphError, MorphResult};

/// Sampling configuration for the approximate path queries.
///
/// Passed explicitly to the `*_with` query variants; there is no process-wide default.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Polyline samples per curve used by arc length.
    pub samples_per_curve: usize,
    /// Samples per curve scanned by `t_at_point`.
    pub point_search_samples: usize,
    /// Maximum distance for a sample to count as "on the path".
    pub point_tolerance: f64,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            samples_per_curve: 16,
            point_search_samples: 64,
            point_tolerance: 1e-6,
        }
    }
}

impl PathSettings {
    /// Reject settings the query routines cannot use.
    pub fn validate(&self) -> MorphResult<()> {
        if self.samples_per_curve == 0 {
            return Err(MorphError::invalid_input("samples_per_curve must be > 0"));
        }
        if self.point_search_samples == 0 {
            return Err(MorphError::invalid_input(
                "point_search_samples must be > 0",
            ));
        }
        if !self.point_tolerance.is_finite() || self.point_tolerance <= 0.0 {
            return Err(MorphError::invalid_input(
                "point_tolerance must be finite and > 0",
            ));
        }
        Ok(())
    }
}
