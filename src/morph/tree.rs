use std::collections::{HashMap, hash_map::Entry};

use crate::{
    foundation::core::{Affine, Point},
    foundation::error::{MorphError, MorphResult, check_unit_interval},
    geometry::path::{PathGeometry, Subpath},
    morph::align::CurveAligner,
    morph::interpolate::{Interpolator, Lerp, PathFn},
    scene::family::walk_with_transform,
    scene::node::{HasGeometry, Node, NodeId, Style},
};

/// Aligns and blends whole node hierarchies.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeAligner;

impl TreeAligner {
    /// Make `a` and `b` structurally identical, returning new hierarchies.
    ///
    /// Every pair of corresponding nodes ends up with the same child count and aligned
    /// geometry. When only one side of a pair carries points, its geometry moves into a
    /// new last child with the same style, and the other side grows a matching child.
    /// Missing children are padded with invisible point-curves placed at the center of
    /// the short side's geometry.
    #[tracing::instrument(
        skip_all,
        fields(a = a.id().get(), b = b.id().get(), a_len = a.family_len(), b_len = b.family_len())
    )]
    pub fn align_family(a: &Node, b: &Node) -> (Node, Node) {
        let (a, b) = align_pair(a.clone(), b.clone());
        tracing::debug!(family_len = a.family_len(), "families aligned");
        (a, b)
    }

    /// Blend two aligned hierarchies.
    ///
    /// The result keeps `a`'s identities and names. Geometry follows `path_fn`; style and
    /// transform blend linearly.
    pub fn interpolate_family<P>(a: &Node, b: &Node, alpha: f64, path_fn: &P) -> MorphResult<Node>
    where
        P: PathFn + ?Sized,
    {
        check_unit_interval("alpha", alpha)?;
        blend(a, b, alpha, path_fn)
    }
}

fn align_pair(mut a: Node, mut b: Node) -> (Node, Node) {
    drop_empty_geometry(&mut a);
    drop_empty_geometry(&mut b);
    match (a.has_points(), b.has_points()) {
        (true, false) => demote(&mut a),
        (false, true) => demote(&mut b),
        _ => {}
    }
    pad_children(&mut a, &b);
    pad_children(&mut b, &a);

    if let (Some(ga), Some(gb)) = (a.geometry.as_ref(), b.geometry.as_ref()) {
        let (ga, gb) = CurveAligner::align(ga, gb);
        a.geometry = Some(ga);
        b.geometry = Some(gb);
    }

    let pairs = std::mem::take(&mut a.children)
        .into_iter()
        .zip(std::mem::take(&mut b.children))
        .map(|(ca, cb)| align_pair(ca, cb));
    let (ca, cb): (Vec<Node>, Vec<Node>) = pairs.unzip();
    a.children = ca;
    b.children = cb;
    (a, b)
}

fn drop_empty_geometry(node: &mut Node) {
    if node.geometry.as_ref().is_some_and(PathGeometry::is_empty) {
        node.geometry = None;
    }
}

/// Move the node's geometry into a new trailing child with the same style.
fn demote(node: &mut Node) {
    let leaf = Node {
        geometry: node.geometry.take(),
        style: node.style,
        ..Node::group()
    };
    node.children.push(leaf);
}

fn pad_children(short: &mut Node, long: &Node) {
    let have = short.children.len();
    if have >= long.children.len() {
        return;
    }
    let center = local_center(short);
    for partner in &long.children[have..] {
        let at = center
            .or_else(|| family_start(partner))
            .unwrap_or(Point::ORIGIN);
        short.children.push(placeholder(at, partner.style));
    }
}

fn placeholder(at: Point, style: Style) -> Node {
    Node {
        geometry: Some(Subpath::degenerate(at).into()),
        style: style.faded(),
        ..Node::group()
    }
}

/// Center of all geometry in `node`'s family, in `node`'s own coordinates.
fn local_center(node: &Node) -> Option<Point> {
    let mut subpaths: Vec<Subpath> = node
        .geometry
        .iter()
        .flat_map(|g| g.subpaths().iter().cloned())
        .collect();
    for child in &node.children {
        walk_with_transform(child, Affine::IDENTITY, &mut |n, affine| {
            if let Some(g) = n.geometry() {
                subpaths.extend(g.transformed(affine).subpaths().iter().cloned());
            }
        });
    }
    PathGeometry::new(subpaths).center()
}

/// First anchor found in `node`'s family, in its parent's coordinates.
fn family_start(node: &Node) -> Option<Point> {
    let mut found = None;
    walk_with_transform(node, Affine::IDENTITY, &mut |n, affine| {
        if found.is_none() {
            found = n.geometry().and_then(PathGeometry::start).map(|p| p.transformed(affine));
        }
    });
    found
}

fn blend<P>(a: &Node, b: &Node, alpha: f64, path_fn: &P) -> MorphResult<Node>
where
    P: PathFn + ?Sized,
{
    if a.children.len() != b.children.len() {
        return Err(MorphError::structural_mismatch(format!(
            "node {} has {} children, node {} has {}",
            a.id.get(),
            a.children.len(),
            b.id.get(),
            b.children.len()
        )));
    }
    let geometry = match (&a.geometry, &b.geometry) {
        (Some(ga), Some(gb)) => Some(Interpolator::interpolate(ga, gb, alpha, path_fn)?),
        (None, None) => None,
        _ => {
            return Err(MorphError::structural_mismatch(format!(
                "only one of nodes {} and {} has geometry",
                a.id.get(),
                b.id.get()
            )));
        }
    };
    let children = a
        .children
        .iter()
        .zip(&b.children)
        .map(|(ca, cb)| blend(ca, cb, alpha, path_fn))
        .collect::<MorphResult<Vec<_>>>()?;
    Ok(Node {
        id: a.id,
        name: a.name.clone(),
        geometry,
        style: Style::lerp(&a.style, &b.style, alpha),
        transform: <Affine as Lerp>::lerp(&a.transform, &b.transform, alpha),
        children,
    })
}

/// Memoized [`TreeAligner::align_family`] results keyed by node identity.
///
/// Entries go stale if either node is mutated after alignment; call
/// [`AlignmentCache::clear`] after editing a hierarchy.
#[derive(Debug, Default)]
pub struct AlignmentCache {
    entries: HashMap<(NodeId, NodeId), (Node, Node)>,
}

impl AlignmentCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aligned copies of `a` and `b`, computed on first request.
    #[tracing::instrument(skip_all, fields(a = a.id().get(), b = b.id().get()))]
    pub fn aligned(&mut self, a: &Node, b: &Node) -> &(Node, Node) {
        match self.entries.entry((a.id(), b.id())) {
            Entry::Occupied(e) => {
                tracing::debug!("alignment cache hit");
                e.into_mut()
            }
            Entry::Vacant(e) => {
                tracing::debug!("alignment cache miss");
                e.insert(TreeAligner::align_family(a, b))
            }
        }
    }

    /// True if the pair has been aligned already.
    pub fn contains(&self, a: NodeId, b: NodeId) -> bool {
        self.entries.contains_key(&(a, b))
    }

    /// Number of cached pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every cached pair.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/tree.rs"]
mod tests;
