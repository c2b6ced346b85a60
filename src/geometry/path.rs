use crate::{
    foundation::core::{Affine, BezPath, EPSILON, Point},
    foundation::error::{MorphError, MorphResult, check_unit_interval},
    foundation::settings::PathSettings,
    geometry::segment::Segment,
};

/// Winding direction of a closed subpath in a y-up coordinate system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Orientation {
    /// Positive signed area.
    CounterClockwise,
    /// Negative signed area.
    Clockwise,
}

/// A connected chain of cubic segments sharing boundary anchors.
///
/// Stored as `1 + 3k` control points for `k >= 1` segments; segment `i` occupies
/// `points[3i..=3i + 3]`, so consecutive segments share one anchor in storage.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Subpath {
    points: Vec<Point>,
}

impl TryFrom<Vec<Point>> for Subpath {
    type Error = MorphError;

    fn try_from(points: Vec<Point>) -> MorphResult<Self> {
        Self::from_points(points)
    }
}

impl From<Subpath> for Vec<Point> {
    fn from(sp: Subpath) -> Self {
        sp.points
    }
}

impl Subpath {
    /// Build from a flat `1 + 3k` control point list.
    pub fn from_points(points: Vec<Point>) -> MorphResult<Self> {
        if points.len() < 4 || (points.len() - 1) % 3 != 0 {
            return Err(MorphError::invalid_input(format!(
                "subpath needs 1 + 3k points with k >= 1, got {}",
                points.len()
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(MorphError::invalid_input(format!(
                "subpath point {bad:?} is not finite"
            )));
        }
        Ok(Self { points })
    }

    /// Build from segments whose consecutive anchors coincide.
    pub fn from_segments(segments: &[Segment]) -> MorphResult<Self> {
        if segments.is_empty() {
            return Err(MorphError::invalid_input("subpath needs at least one segment"));
        }
        for (i, w) in segments.windows(2).enumerate() {
            if !w[0].end.approx_eq(w[1].start, EPSILON) {
                return Err(MorphError::invalid_input(format!(
                    "segment {} does not start where segment {i} ends",
                    i + 1
                )));
            }
        }
        Self::from_points(Self::chain(segments.iter().copied()))
    }

    /// A zero-length, invisible subpath at `p`.
    pub fn degenerate(p: Point) -> Self {
        Self { points: vec![p; 4] }
    }

    /// Chain segments, taking each follow-up segment's start from its predecessor.
    pub(crate) fn from_segments_unchecked(segments: impl IntoIterator<Item = Segment>) -> Self {
        Self {
            points: Self::chain(segments),
        }
    }

    fn chain(segments: impl IntoIterator<Item = Segment>) -> Vec<Point> {
        let mut points = Vec::new();
        for seg in segments {
            if points.is_empty() {
                points.push(seg.start);
            }
            points.extend([seg.handle1, seg.handle2, seg.end]);
        }
        points
    }

    /// Flat control points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of cubic segments.
    pub fn curve_count(&self) -> usize {
        (self.points.len() - 1) / 3
    }

    /// Segment `i`, if present.
    pub fn segment(&self, i: usize) -> Option<Segment> {
        let first = i.checked_mul(3)?;
        let window = self.points.get(first..first.checked_add(4)?)?;
        Some(Segment::from_array([
            window[0], window[1], window[2], window[3],
        ]))
    }

    /// Segments in order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points
            .windows(4)
            .step_by(3)
            .map(|w| Segment::from_array([w[0], w[1], w[2], w[3]]))
    }

    /// First anchor.
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// Last anchor.
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// On-curve anchors (every third control point).
    pub fn anchors(&self) -> Vec<Point> {
        self.points.iter().step_by(3).copied().collect()
    }

    /// True when the last anchor returns to the first.
    pub fn is_closed(&self) -> bool {
        self.end().approx_eq(self.start(), EPSILON)
    }

    /// True when every control point is the same point.
    ///
    /// Covers the single point-curve padding subpath as well as its replicated forms.
    pub fn is_degenerate(&self) -> bool {
        let first = self.points[0];
        self.points.iter().all(|p| *p == first)
    }

    /// Grow to `curve_count() + n` segments tracing the same curve.
    ///
    /// Degenerate subpaths replicate their point-curve instead of splitting.
    pub fn insert_curves(&self, n: usize) -> Self {
        if n == 0 {
            return self.clone();
        }
        if self.is_degenerate() {
            return Self {
                points: vec![self.points[0]; 1 + 3 * (self.curve_count() + n)],
            };
        }
        let quotas = distribute(n, self.curve_count());
        Self::from_segments_unchecked(
            self.segments()
                .zip(quotas)
                .flat_map(|(seg, q)| seg.subdivide(q + 1)),
        )
    }

    /// Winding of a closed subpath from the shoelace sum over its anchors.
    pub fn orientation(&self) -> MorphResult<Orientation> {
        if !self.is_closed() {
            return Err(MorphError::undefined_orientation(
                "orientation requires a closed subpath",
            ));
        }
        let area = self.signed_area();
        if area.abs() <= EPSILON * EPSILON {
            return Err(MorphError::undefined_orientation(
                "closed subpath has zero signed area",
            ));
        }
        Ok(if area > 0.0 {
            Orientation::CounterClockwise
        } else {
            Orientation::Clockwise
        })
    }

    fn signed_area(&self) -> f64 {
        let anchors = self.anchors();
        let n = anchors.len();
        let mut twice = 0.0;
        for i in 0..n {
            let a = anchors[i];
            let b = anchors[(i + 1) % n];
            twice += a.x * b.y - b.x * a.y;
        }
        twice / 2.0
    }

    /// The same subpath traversed backwards.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Apply a 2D affine transform to every control point.
    pub fn transformed(&self, affine: Affine) -> Self {
        Self {
            points: self.points.iter().map(|p| p.transformed(affine)).collect(),
        }
    }

    pub(crate) fn map_points(&self, f: impl FnMut(&Point) -> Point) -> Self {
        Self {
            points: self.points.iter().map(f).collect(),
        }
    }

    /// Wrap points already known to hold `1 + 3k` entries.
    pub(crate) fn from_points_unchecked(points: Vec<Point>) -> Self {
        debug_assert!(points.len() >= 4 && (points.len() - 1) % 3 == 0);
        Self { points }
    }
}

/// Per-segment insertion quotas: `n / k` each, one extra for the first `n % k`.
pub(crate) fn distribute(n: usize, k: usize) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }
    let base = n / k;
    let extra = n % k;
    (0..k).map(|i| base + usize::from(i < extra)).collect()
}

/// The ordered subpaths belonging to one node.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PathGeometry {
    subpaths: Vec<Subpath>,
}

impl From<Subpath> for PathGeometry {
    fn from(sp: Subpath) -> Self {
        Self { subpaths: vec![sp] }
    }
}

impl PathGeometry {
    /// Wrap an ordered list of subpaths.
    pub fn new(subpaths: Vec<Subpath>) -> Self {
        Self { subpaths }
    }

    /// Geometry without any subpaths.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Straight segments between consecutive points.
    pub fn as_corners(points: &[Point]) -> MorphResult<Self> {
        crate::geometry::construct::as_corners(points)
    }

    /// A tangent-continuous curve through the points.
    pub fn as_smooth(points: &[Point]) -> MorphResult<Self> {
        crate::geometry::construct::as_smooth(points)
    }

    /// Append a subpath.
    pub fn push(&mut self, sp: Subpath) {
        self.subpaths.push(sp);
    }

    /// Subpaths in order.
    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    /// Subpath `i`, if present.
    pub fn subpath(&self, i: usize) -> Option<&Subpath> {
        self.subpaths.get(i)
    }

    /// Number of subpaths.
    pub fn subpath_count(&self) -> usize {
        self.subpaths.len()
    }

    /// True when there are no subpaths.
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// Total segments across all subpaths.
    pub fn curve_count(&self) -> usize {
        self.subpaths.iter().map(Subpath::curve_count).sum()
    }

    /// Curve count of every subpath, in order.
    pub fn structure(&self) -> Vec<usize> {
        self.subpaths.iter().map(Subpath::curve_count).collect()
    }

    /// True when the per-subpath curve counts match `other`'s.
    pub fn is_aligned_with(&self, other: &Self) -> bool {
        self.subpath_count() == other.subpath_count()
            && self
                .subpaths
                .iter()
                .zip(&other.subpaths)
                .all(|(a, b)| a.curve_count() == b.curve_count())
    }

    /// Every segment across all subpaths, in global order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.subpaths.iter().flat_map(Subpath::segments)
    }

    /// The segment at global index `n`.
    pub fn nth_curve(&self, n: usize) -> MorphResult<Segment> {
        let mut rest = n;
        for sp in &self.subpaths {
            if let Some(seg) = sp.segment(rest) {
                return Ok(seg);
            }
            rest -= sp.curve_count();
        }
        Err(MorphError::out_of_range(format!(
            "curve index {n} out of range for {} curves",
            self.curve_count()
        )))
    }

    /// Map a global parameter to `(curve index, local parameter)`.
    ///
    /// `[0, 1]` is split into equal intervals per curve index, not per arc length.
    fn locate(&self, global_t: f64) -> MorphResult<(usize, f64)> {
        check_unit_interval("global_t", global_t)?;
        let k = self.curve_count();
        if k == 0 {
            return Err(MorphError::out_of_range("geometry has no curves"));
        }
        if global_t >= 1.0 {
            return Ok((k - 1, 1.0));
        }
        let scaled = global_t * k as f64;
        let index = (scaled.floor() as usize).min(k - 1);
        Ok((index, scaled - index as f64))
    }

    /// Point at a global parameter spanning the whole geometry.
    pub fn point_at(&self, global_t: f64) -> MorphResult<Point> {
        let (index, local) = self.locate(global_t)?;
        Ok(self.nth_curve(index)?.eval(local))
    }

    /// Approximate inverse of [`PathGeometry::point_at`] using default settings.
    pub fn t_at_point(&self, point: Point) -> MorphResult<f64> {
        self.t_at_point_with(point, &PathSettings::default())
    }

    /// Approximate inverse of [`PathGeometry::point_at`].
    ///
    /// Each curve is scanned at `point_search_samples + 1` parameters, then the closest
    /// sample is refined within its neighbouring sample intervals. The closest refined
    /// parameter wins if it lies within `point_tolerance`.
    pub fn t_at_point_with(&self, point: Point, settings: &PathSettings) -> MorphResult<f64> {
        settings.validate()?;
        let k = self.curve_count();
        let res = settings.point_search_samples;
        let mut best: Option<(f64, f64)> = None;
        for (i, seg) in self.segments().enumerate() {
            let mut coarse = (0, f64::INFINITY);
            for j in 0..=res {
                let d = seg.eval(j as f64 / res as f64).distance(point);
                if d < coarse.1 {
                    coarse = (j, d);
                }
            }
            let lo = coarse.0.saturating_sub(1) as f64 / res as f64;
            let hi = (coarse.0 + 1).min(res) as f64 / res as f64;
            let (local, d) = seg.nearest_in(point, lo, hi);
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, (i as f64 + local) / k as f64));
            }
        }
        match best {
            Some((d, t)) if d <= settings.point_tolerance => Ok(t),
            _ => Err(MorphError::point_not_on_path(format!(
                "no sample within {} of {point:?}",
                settings.point_tolerance
            ))),
        }
    }

    /// Sum of per-curve polyline lengths with `samples_per_curve` chords each (minimum 1).
    pub fn arc_length(&self, samples_per_curve: usize) -> f64 {
        self.segments()
            .map(|seg| seg.polyline_length(samples_per_curve))
            .sum()
    }

    /// [`PathGeometry::arc_length`] with the sampling taken from settings.
    pub fn arc_length_with(&self, settings: &PathSettings) -> MorphResult<f64> {
        settings.validate()?;
        Ok(self.arc_length(settings.samples_per_curve))
    }

    /// The portion of the geometry between global parameters `a < b`.
    ///
    /// Boundary curves are cut with De Casteljau splits; subpath boundaries inside the
    /// range are preserved.
    pub fn subcurve(&self, a: f64, b: f64) -> MorphResult<Self> {
        check_unit_interval("a", a)?;
        check_unit_interval("b", b)?;
        if a >= b {
            return Err(MorphError::out_of_range(format!(
                "subcurve needs a < b, got a={a} b={b}"
            )));
        }
        let (lo, lo_t) = self.locate(a)?;
        let (mut hi, mut hi_t) = self.locate(b)?;
        if a == 0.0 && b == 1.0 {
            return Ok(self.clone());
        }
        // Ending exactly on a shared anchor: finish the previous curve instead of
        // emitting a zero-length piece of the next one.
        if hi_t == 0.0 && hi > lo && !self.starts_subpath(hi) {
            hi -= 1;
            hi_t = 1.0;
        }

        let mut out = Vec::new();
        let mut offset = 0;
        for sp in &self.subpaths {
            let count = sp.curve_count();
            let first = lo.max(offset);
            let last = hi.min(offset + count - 1);
            if first <= last {
                let segs = (first..=last).filter_map(|g| {
                    let seg = sp.segment(g - offset)?;
                    let from = if g == lo { lo_t } else { 0.0 };
                    let to = if g == hi { hi_t } else { 1.0 };
                    Some(seg.partial(from, to))
                });
                out.push(Subpath::from_segments_unchecked(segs));
            }
            offset += count;
        }
        Ok(Self { subpaths: out })
    }

    fn starts_subpath(&self, global_index: usize) -> bool {
        let mut offset = 0;
        for sp in &self.subpaths {
            if offset == global_index {
                return true;
            }
            offset += sp.curve_count();
        }
        false
    }

    /// Grow to `curve_count() + n` segments tracing an identical path.
    ///
    /// Insertions are spread over all curves in global order: each receives `n / k`, the
    /// first `n % k` one more. A curve with quota `q` is cut into `q + 1` equal-parameter pieces.
    pub fn insert_curves(&self, n: usize) -> Self {
        let k = self.curve_count();
        if n == 0 || k == 0 {
            return self.clone();
        }
        let quotas = distribute(n, k);
        let mut offset = 0;
        let subpaths = self
            .subpaths
            .iter()
            .map(|sp| {
                let count = sp.curve_count();
                let local = &quotas[offset..offset + count];
                offset += count;
                Subpath::from_segments_unchecked(
                    sp.segments()
                        .zip(local)
                        .flat_map(|(seg, q)| seg.subdivide(q + 1)),
                )
            })
            .collect();
        Self { subpaths }
    }

    /// Winding of closed subpath `subpath_index`.
    pub fn orientation(&self, subpath_index: usize) -> MorphResult<Orientation> {
        self.subpaths
            .get(subpath_index)
            .ok_or_else(|| {
                MorphError::out_of_range(format!(
                    "subpath index {subpath_index} out of range for {} subpaths",
                    self.subpath_count()
                ))
            })?
            .orientation()
    }

    /// First anchor of the first subpath.
    pub fn start(&self) -> Option<Point> {
        self.subpaths.first().map(Subpath::start)
    }

    /// Last anchor of the last subpath.
    pub fn end(&self) -> Option<Point> {
        self.subpaths.last().map(Subpath::end)
    }

    /// On-curve anchors of every subpath, concatenated.
    pub fn anchors(&self) -> Vec<Point> {
        self.subpaths.iter().flat_map(Subpath::anchors).collect()
    }

    /// Axis-aligned `(min, max)` corners of the control polygon.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut points = self.subpaths.iter().flat_map(|sp| sp.points().iter());
        let first = *points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        }))
    }

    /// Center of [`PathGeometry::bounds`].
    pub fn center(&self) -> Option<Point> {
        self.bounds().map(|(lo, hi)| lo.lerp(hi, 0.5))
    }

    /// Every subpath reversed, in reverse order.
    pub fn reversed(&self) -> Self {
        Self {
            subpaths: self.subpaths.iter().rev().map(Subpath::reversed).collect(),
        }
    }

    /// Apply a 2D affine transform to every control point.
    pub fn transformed(&self, affine: Affine) -> Self {
        Self {
            subpaths: self
                .subpaths
                .iter()
                .map(|sp| sp.transformed(affine))
                .collect(),
        }
    }

    /// Translate every control point by `by`, including depth.
    pub fn shifted(&self, by: Point) -> Self {
        Self {
            subpaths: self
                .subpaths
                .iter()
                .map(|sp| sp.map_points(|p| *p + by))
                .collect(),
        }
    }

    /// Export visible subpaths as a kurbo path; degenerate subpaths are dropped.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for sp in self.subpaths.iter().filter(|sp| !sp.is_degenerate()) {
            path.move_to(sp.start().to_kurbo());
            for seg in sp.segments() {
                path.curve_to(
                    seg.handle1.to_kurbo(),
                    seg.handle2.to_kurbo(),
                    seg.end.to_kurbo(),
                );
            }
            if sp.is_closed() {
                path.close_path();
            }
        }
        path
    }

    pub(crate) fn subpaths_mut(&mut self) -> &mut Vec<Subpath> {
        &mut self.subpaths
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/path.rs"]
mod tests;
