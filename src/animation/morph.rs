use crate::{
    animation::ease::Ease,
    foundation::core::FrameIndex,
    foundation::error::{MorphError, MorphResult, check_unit_interval},
    morph::interpolate::{Linear, PathFn},
    morph::tree::{AlignmentCache, TreeAligner},
    scene::node::Node,
};

/// Where a [`Morph`] is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum MorphState {
    /// Hierarchies have not been aligned yet.
    Unaligned,
    /// Aligned, no frame produced yet.
    Aligned,
    /// The last frame was produced at this alpha.
    Interpolated(f64),
    /// The last frame was produced at alpha 1.
    Final,
}

/// Timeline driver morphing one hierarchy into another over a fixed number of frames.
///
/// Alignment happens once, on the first request, and is reused for every frame.
#[derive(Debug)]
pub struct Morph<P = Linear> {
    start: Node,
    target: Node,
    path_fn: P,
    ease: Ease,
    frames: u64,
    cache: AlignmentCache,
    state: MorphState,
}

impl Morph<Linear> {
    /// Morph `start` into `target` over `frames` frames (at least one).
    pub fn new(start: Node, target: Node, frames: u64) -> MorphResult<Self> {
        if frames == 0 {
            return Err(MorphError::invalid_input("morph needs at least one frame"));
        }
        Ok(Self {
            start,
            target,
            path_fn: Linear,
            ease: Ease::Linear,
            frames,
            cache: AlignmentCache::new(),
            state: MorphState::Unaligned,
        })
    }
}

impl<P: PathFn> Morph<P> {
    /// Swap the path function.
    pub fn with_path_fn<Q: PathFn>(self, path_fn: Q) -> Morph<Q> {
        Morph {
            start: self.start,
            target: self.target,
            path_fn,
            ease: self.ease,
            frames: self.frames,
            cache: self.cache,
            state: self.state,
        }
    }

    /// Set the rate function applied by [`Morph::alpha_at`].
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MorphState {
        self.state
    }

    /// Total frame count.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Aligned copies of the start and target hierarchies.
    pub fn aligned(&mut self) -> &(Node, Node) {
        if self.state == MorphState::Unaligned {
            self.state = MorphState::Aligned;
        }
        self.cache.aligned(&self.start, &self.target)
    }

    /// Eased progress at `frame`; the first frame is 0 and the last is 1.
    pub fn alpha_at(&self, frame: FrameIndex) -> MorphResult<f64> {
        if frame.0 >= self.frames {
            return Err(MorphError::out_of_range(format!(
                "frame {} outside 0..{}",
                frame.0, self.frames
            )));
        }
        if self.frames == 1 {
            return Ok(1.0);
        }
        let t = frame.0 as f64 / (self.frames - 1) as f64;
        Ok(self.ease.apply(t))
    }

    /// Live hierarchy at `alpha`.
    #[tracing::instrument(skip(self), fields(state = ?self.state))]
    pub fn frame(&mut self, alpha: f64) -> MorphResult<Node> {
        check_unit_interval("alpha", alpha)?;
        if let MorphState::Interpolated(prev) = self.state
            && alpha < prev
        {
            tracing::debug!(prev, alpha, "alpha moved backwards");
        }
        let (a, b) = self.cache.aligned(&self.start, &self.target);
        let node = TreeAligner::interpolate_family(a, b, alpha, &self.path_fn)?;
        self.state = if alpha == 1.0 {
            MorphState::Final
        } else {
            MorphState::Interpolated(alpha)
        };
        Ok(node)
    }

    /// Live hierarchy at `frame`, eased.
    pub fn frame_at(&mut self, frame: FrameIndex) -> MorphResult<Node> {
        let alpha = self.alpha_at(frame)?;
        self.frame(alpha)
    }

    /// The end state: the target's aligned hierarchy, carrying the start's identities.
    pub fn finish(mut self) -> MorphResult<Node> {
        self.frame(1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/morph.rs"]
mod tests;
