//! bezmorph aligns and interpolates cubic Bezier path hierarchies.
//!
//! Two arbitrary vector shapes, with different subpath counts, curve counts, or node
//! trees, are made structurally identical without changing how either one looks, then
//! blended control point by control point.
//!
//! # Pipeline overview
//!
//! 1. **Build**: shape producers in [`shapes`] (or [`PathGeometry::as_corners`] /
//!    [`PathGeometry::as_smooth`]) yield geometry-bearing [`Node`]s.
//! 2. **Align**: [`CurveAligner`] pads and subdivides geometry; [`TreeAligner`] does the
//!    same for whole families, memoized by [`AlignmentCache`].
//! 3. **Interpolate**: [`Interpolator`] / [`TreeAligner::interpolate_family`] blend aligned
//!    data at a progress value along a [`PathFn`].
//! 4. **Resolve**: [`Node::resolve`] flattens a hierarchy into draw-ready [`ResolvedFrame`]s.
//!
//! [`Morph`] ties the steps together as a frame-based timeline driver.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure operations**: every query and transformation returns new values; failures
//!   leave inputs untouched.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod geometry;
mod morph;
mod scene;

pub use animation::ease::Ease;
pub use animation::morph::{Morph, MorphState};
pub use foundation::core::{Affine, BezPath, EPSILON, FrameIndex, Point, Rect, Vec2};
pub use foundation::error::{MorphError, MorphResult};
pub use foundation::settings::PathSettings;
pub use geometry::construct::{as_corners, as_smooth};
pub use geometry::path::{Orientation, PathGeometry, Subpath};
pub use geometry::segment::Segment;
pub use morph::align::CurveAligner;
pub use morph::interpolate::{ArcPath, Interpolator, Lerp, Linear, PathFn};
pub use morph::tree::{AlignmentCache, TreeAligner};
pub use scene::family::Family;
pub use scene::node::{Color, HasGeometry, Node, NodeBuilder, NodeId, Style};
pub use scene::resolve::{ResolvedFrame, ResolvedPath};
pub use scene::shapes;
