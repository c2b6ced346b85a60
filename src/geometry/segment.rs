use crate::foundation::core::{Affine, Point};

/// One cubic Bezier curve: start anchor, two handles, end anchor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// Start anchor (`P0`).
    pub start: Point,
    /// First handle (`P1`).
    pub handle1: Point,
    /// Second handle (`P2`).
    pub handle2: Point,
    /// End anchor (`P3`).
    pub end: Point,
}

impl Segment {
    /// Build a segment from its four control points.
    pub const fn new(start: Point, handle1: Point, handle2: Point, end: Point) -> Self {
        Self {
            start,
            handle1,
            handle2,
            end,
        }
    }

    /// A straight segment: handles sit at 1/3 and 2/3 of the chord.
    pub fn line(start: Point, end: Point) -> Self {
        Self::new(
            start,
            start.lerp(end, 1.0 / 3.0),
            start.lerp(end, 2.0 / 3.0),
            end,
        )
    }

    /// A zero-length segment with all four control points at `p`.
    pub const fn point(p: Point) -> Self {
        Self::new(p, p, p, p)
    }

    pub(crate) fn from_array(points: [Point; 4]) -> Self {
        let [start, handle1, handle2, end] = points;
        Self::new(start, handle1, handle2, end)
    }

    /// Control points in order.
    pub fn points(&self) -> [Point; 4] {
        [self.start, self.handle1, self.handle2, self.end]
    }

    /// True when all four control points are equal.
    pub fn is_degenerate(&self) -> bool {
        self.handle1 == self.start && self.handle2 == self.start && self.end == self.start
    }

    /// Evaluate `B(t) = (1-t)^3 P0 + 3(1-t)^2 t P1 + 3(1-t) t^2 P2 + t^3 P3`.
    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let b0 = mt * mt * mt;
        let b1 = 3.0 * mt * mt * t;
        let b2 = 3.0 * mt * t * t;
        let b3 = t * t * t;
        self.start * b0 + self.handle1 * b1 + self.handle2 * b2 + self.end * b3
    }

    /// De Casteljau split at local parameter `t`.
    pub fn split(&self, t: f64) -> (Self, Self) {
        let p01 = self.start.lerp(self.handle1, t);
        let p12 = self.handle1.lerp(self.handle2, t);
        let p23 = self.handle2.lerp(self.end, t);

        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);

        let p0123 = p012.lerp(p123, t);

        (
            Self::new(self.start, p01, p012, p0123),
            Self::new(p0123, p123, p23, self.end),
        )
    }

    /// The exact sub-curve between local parameters `a <= b`.
    ///
    /// Boundaries that coincide with the segment's own ends are copied, not recomputed.
    pub fn partial(&self, a: f64, b: f64) -> Self {
        if a >= 1.0 {
            return Self::point(self.end);
        }
        let tail = if a <= 0.0 { *self } else { self.split(a).1 };
        if b >= 1.0 {
            return tail;
        }
        let local_b = (b - a.max(0.0)) / (1.0 - a.max(0.0));
        tail.split(local_b).0
    }

    /// Split into `pieces` consecutive segments of equal parameter length.
    ///
    /// Adjacent pieces share their boundary anchor exactly.
    pub fn subdivide(&self, pieces: usize) -> Vec<Self> {
        if pieces <= 1 {
            return vec![*self];
        }
        if self.is_degenerate() {
            return vec![*self; pieces];
        }
        let mut out = Vec::with_capacity(pieces);
        let mut rest = *self;
        for i in 0..pieces - 1 {
            let (head, tail) = rest.split(1.0 / (pieces - i) as f64);
            out.push(head);
            rest = tail;
        }
        out.push(rest);
        out
    }

    /// Length of the polyline through `samples + 1` evenly spaced parameters.
    pub fn polyline_length(&self, samples: usize) -> f64 {
        let samples = samples.max(1);
        let mut prev = self.start;
        let mut total = 0.0;
        for i in 1..=samples {
            let p = self.eval(i as f64 / samples as f64);
            total += prev.distance(p);
            prev = p;
        }
        total
    }

    /// Local parameter in `[lo, hi]` closest to `p`, with its distance.
    ///
    /// Golden-section search, so the distance should have a single minimum on the
    /// interval. Both ends of the interval are considered as well.
    pub fn nearest_in(&self, p: Point, lo: f64, hi: f64) -> (f64, f64) {
        const INV_PHI: f64 = 0.618_033_988_749_894_9;
        let dist = |t: f64| self.eval(t).distance(p);

        let (mut a, mut b) = (lo, hi);
        let mut c = b - INV_PHI * (b - a);
        let mut d = a + INV_PHI * (b - a);
        let (mut fc, mut fd) = (dist(c), dist(d));
        for _ in 0..100 {
            if b - a <= 1e-15 {
                break;
            }
            if fc < fd {
                b = d;
                d = c;
                fd = fc;
                c = b - INV_PHI * (b - a);
                fc = dist(c);
            } else {
                a = c;
                c = d;
                fc = fd;
                d = a + INV_PHI * (b - a);
                fd = dist(d);
            }
        }

        let mid = 0.5 * (a + b);
        [(lo, dist(lo)), (hi, dist(hi)), (mid, dist(mid))]
            .into_iter()
            .fold((lo, f64::INFINITY), |best, cand| {
                if cand.1 < best.1 { cand } else { best }
            })
    }

    /// The same curve traversed end to start.
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.handle2, self.handle1, self.start)
    }

    /// Apply a 2D affine transform to every control point.
    pub fn transformed(&self, affine: Affine) -> Self {
        Self::new(
            self.start.transformed(affine),
            self.handle1.transformed(affine),
            self.handle2.transformed(affine),
            self.end.transformed(affine),
        )
    }

    /// Project onto the `z = 0` plane as a kurbo cubic.
    pub fn to_kurbo(&self) -> kurbo::CubicBez {
        kurbo::CubicBez::new(
            self.start.to_kurbo(),
            self.handle1.to_kurbo(),
            self.handle2.to_kurbo(),
            self.end.to_kurbo(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/segment.rs"]
mod tests;
