use crate::{
    foundation::core::Point,
    geometry::path::{PathGeometry, Subpath},
};

/// Brings two geometries to an identical subpath and curve structure.
///
/// Alignment only adds material: missing subpaths are padded with degenerate
/// point-curves, and short subpaths are subdivided. The visible shape of either
/// side never changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct CurveAligner;

impl CurveAligner {
    /// Align `a` and `b`, returning new geometries; the inputs are untouched.
    ///
    /// On return both sides have the same subpath count and, pairwise, the same
    /// curve count. Padding subpaths are appended after the existing ones.
    #[tracing::instrument(
        skip(a, b),
        fields(a_curves = a.curve_count(), b_curves = b.curve_count())
    )]
    pub fn align(a: &PathGeometry, b: &PathGeometry) -> (PathGeometry, PathGeometry) {
        let mut a = a.clone();
        let mut b = b.clone();
        if a.subpath_count() < b.subpath_count() {
            pad_subpaths(&mut a, &b);
        } else if b.subpath_count() < a.subpath_count() {
            pad_subpaths(&mut b, &a);
        }

        for (sa, sb) in a.subpaths_mut().iter_mut().zip(b.subpaths_mut().iter_mut()) {
            let (ka, kb) = (sa.curve_count(), sb.curve_count());
            if ka < kb {
                *sa = sa.insert_curves(kb - ka);
            } else if kb < ka {
                *sb = sb.insert_curves(ka - kb);
            }
        }
        tracing::trace!(structure = ?a.structure(), "geometry aligned");
        (a, b)
    }
}

/// Append degenerate subpaths to `short` until it matches `long`'s subpath count.
///
/// Padding sits at `short`'s final anchor; an empty `short` borrows the start of the
/// partner subpath it will pair with.
fn pad_subpaths(short: &mut PathGeometry, long: &PathGeometry) {
    let anchor = short.end();
    for partner in &long.subpaths()[short.subpath_count()..] {
        let at: Point = anchor.unwrap_or_else(|| partner.start());
        short.push(Subpath::degenerate(at));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/align.rs"]
mod tests;
