//! Flattening a hierarchy into draw-ready paths.

use crate::{
    foundation::core::{Affine, BezPath},
    scene::family::walk_with_transform,
    scene::node::{HasGeometry, Node, NodeId, Style},
};

/// One visible path with its world transform applied.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ResolvedPath {
    /// Node the path came from; process-local, so not serialized.
    #[serde(skip)]
    pub node: NodeId,
    /// Debug name of that node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Outline in world coordinates; degenerate subpaths are already dropped.
    #[serde(serialize_with = "svg_data")]
    pub path: BezPath,
    /// Paint attributes.
    pub style: Style,
    /// Mean depth of the node's control points, used as a tie-breaker in draw order.
    pub depth: f64,
}

fn svg_data<S: serde::Serializer>(path: &BezPath, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_svg())
}

impl ResolvedPath {
    /// SVG path data for [`ResolvedPath::path`].
    pub fn to_svg(&self) -> String {
        self.path.to_svg()
    }
}

/// Everything the rasterizer draws for one frame, in paint order.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct ResolvedFrame {
    /// Paths ordered by `z_index`, then depth, then family order.
    pub paths: Vec<ResolvedPath>,
}

impl ResolvedFrame {
    /// Number of visible paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True when nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Node {
    /// Flatten this node's family for drawing.
    ///
    /// Transforms accumulate from the root down. Nodes without a visible subpath are
    /// skipped.
    pub fn resolve(&self) -> ResolvedFrame {
        let mut paths = Vec::new();
        walk_with_transform(self, Affine::IDENTITY, &mut |node, affine| {
            let Some(geometry) = node.geometry() else {
                return;
            };
            let path = geometry.transformed(affine).to_bez_path();
            if path.elements().is_empty() {
                return;
            }
            let points: Vec<_> = geometry
                .subpaths()
                .iter()
                .filter(|sp| !sp.is_degenerate())
                .flat_map(|sp| sp.points().iter())
                .collect();
            let depth = points.iter().map(|p| p.z).sum::<f64>() / points.len() as f64;
            paths.push(ResolvedPath {
                node: node.id(),
                name: node.name().map(str::to_owned),
                path,
                style: *node.style(),
                depth,
            });
        });
        // Stable sort keeps family order among equals.
        paths.sort_by(|a, b| {
            a.style
                .z_index
                .cmp(&b.style.z_index)
                .then(a.depth.total_cmp(&b.depth))
        });
        ResolvedFrame { paths }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/resolve.rs"]
mod tests;
