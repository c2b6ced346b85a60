use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    foundation::core::{Affine, Point},
    foundation::error::{MorphError, MorphResult},
    geometry::path::PathGeometry,
    scene::family::Family,
};

/// Process-unique node identity.
///
/// Cloning a [`Node`] keeps its id (the clone is "the same object"); use
/// [`Node::duplicate`] for a copy with fresh identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Linear RGB color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
}

impl Color {
    /// Pure black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Pure white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Build from float components.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Straight (non-premultiplied) RGBA8 with the given opacity.
    pub fn to_rgba8(self, opacity: f64) -> [u8; 4] {
        fn q(v: f64) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [q(self.r), q(self.g), q(self.b), q(opacity)]
    }
}

/// Fill and stroke attributes carried alongside a node's geometry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Style {
    /// Fill color.
    pub fill: Color,
    /// Fill opacity in `[0, 1]`.
    pub fill_opacity: f64,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke opacity in `[0, 1]`.
    pub stroke_opacity: f64,
    /// Stroke width in scene units.
    pub stroke_width: f64,
    /// Painter's order; higher draws later.
    pub z_index: i32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Color::WHITE,
            fill_opacity: 0.0,
            stroke: Color::WHITE,
            stroke_opacity: 1.0,
            stroke_width: 4.0,
            z_index: 0,
        }
    }
}

impl Style {
    /// Replace the fill.
    pub fn with_fill(self, fill: Color, opacity: f64) -> Self {
        Self {
            fill,
            fill_opacity: opacity,
            ..self
        }
    }

    /// Replace the stroke.
    pub fn with_stroke(self, stroke: Color, opacity: f64, width: f64) -> Self {
        Self {
            stroke,
            stroke_opacity: opacity,
            stroke_width: width,
            ..self
        }
    }

    /// Replace the painter's order.
    pub fn with_z_index(self, z_index: i32) -> Self {
        Self { z_index, ..self }
    }

    /// Same colors, fully transparent.
    pub fn faded(self) -> Self {
        Self {
            fill_opacity: 0.0,
            stroke_opacity: 0.0,
            ..self
        }
    }
}

/// Capability of owning path geometry.
pub trait HasGeometry {
    /// The owned geometry, if any.
    fn geometry(&self) -> Option<&PathGeometry>;

    /// True when the geometry exists and has at least one subpath.
    fn has_points(&self) -> bool {
        self.geometry().is_some_and(|g| !g.is_empty())
    }
}

impl HasGeometry for PathGeometry {
    fn geometry(&self) -> Option<&PathGeometry> {
        Some(self)
    }
}

/// A scene node: optional geometry, a style, a lazy 2D transform, and owned children.
///
/// Children are exclusively owned and position-ordered; membership is set-like by
/// [`NodeId`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Node {
    #[serde(skip, default = "NodeId::next")]
    pub(crate) id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) geometry: Option<PathGeometry>,
    #[serde(default)]
    pub(crate) style: Style,
    #[serde(default = "identity")]
    pub(crate) transform: Affine,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) children: Vec<Node>,
}

fn identity() -> Affine {
    Affine::IDENTITY
}

impl HasGeometry for Node {
    fn geometry(&self) -> Option<&PathGeometry> {
        self.geometry.as_ref()
    }
}

impl Node {
    /// A pure grouping node.
    pub fn group() -> Self {
        Self {
            id: NodeId::next(),
            name: None,
            geometry: None,
            style: Style::default(),
            transform: Affine::IDENTITY,
            children: Vec::new(),
        }
    }

    /// A leaf node owning `geometry`.
    pub fn with_geometry(geometry: PathGeometry) -> Self {
        Self {
            geometry: Some(geometry),
            ..Self::group()
        }
    }

    /// Identity of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Optional debug name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the debug name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Replace the geometry wholesale.
    pub fn set_geometry(&mut self, geometry: Option<PathGeometry>) {
        self.geometry = geometry;
    }

    /// Style attributes.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Replace the style.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Local transform, applied lazily when resolving.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Replace the local transform.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Direct children in order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Append `child`.
    ///
    /// Fails with [`MorphError::CyclicOwnership`] if `child` is this node or contains it,
    /// leaving `self` untouched. A child already present (same id) moves to the end.
    pub fn add_child(&mut self, child: Node) -> MorphResult<()> {
        if child.id == self.id {
            return Err(MorphError::cyclic_ownership(format!(
                "node {} cannot be its own child",
                self.id.0
            )));
        }
        if child.contains(self.id) {
            return Err(MorphError::cyclic_ownership(format!(
                "node {} already contains node {}",
                child.id.0, self.id.0
            )));
        }
        self.children.retain(|c| c.id != child.id);
        self.children.push(child);
        Ok(())
    }

    /// Detach and return the direct child with `id`.
    pub fn remove_child(&mut self, id: NodeId) -> Option<Node> {
        let idx = self.children.iter().position(|c| c.id == id)?;
        Some(self.children.remove(idx))
    }

    /// True when `id` is this node or any descendant.
    pub fn contains(&self, id: NodeId) -> bool {
        self.family().any(|n| n.id == id)
    }

    /// Pre-order traversal of this node and all descendants.
    pub fn family(&self) -> Family<'_> {
        Family::new(self)
    }

    /// Number of nodes in [`Node::family`].
    pub fn family_len(&self) -> usize {
        self.family().count()
    }

    /// Deep copy with fresh identities throughout.
    pub fn duplicate(&self) -> Self {
        Self {
            id: NodeId::next(),
            name: self.name.clone(),
            geometry: self.geometry.clone(),
            style: self.style,
            transform: self.transform,
            children: self.children.iter().map(Node::duplicate).collect(),
        }
    }

    /// Translate every geometry in the family by `by`.
    pub fn shifted(&self, by: Point) -> Self {
        let mut out = self.clone();
        out.visit_geometry_mut(&mut |g| *g = g.shifted(by));
        out
    }

    fn visit_geometry_mut(&mut self, f: &mut impl FnMut(&mut PathGeometry)) {
        if let Some(g) = self.geometry.as_mut() {
            f(g);
        }
        for child in &mut self.children {
            child.visit_geometry_mut(f);
        }
    }
}

/// Fluent constructor for [`Node`].
#[derive(Debug)]
pub struct NodeBuilder {
    node: Node,
    children: Vec<Node>,
}

impl Default for NodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeBuilder {
    /// Start from an empty grouping node.
    pub fn new() -> Self {
        Self {
            node: Node::group(),
            children: Vec::new(),
        }
    }

    /// Debug name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.node.name = Some(name.into());
        self
    }

    /// Owned geometry.
    pub fn geometry(mut self, geometry: PathGeometry) -> Self {
        self.node.geometry = Some(geometry);
        self
    }

    /// Whole style record.
    pub fn style(mut self, style: Style) -> Self {
        self.node.style = style;
        self
    }

    /// Fill color and opacity.
    pub fn fill(mut self, color: Color, opacity: f64) -> Self {
        self.node.style = self.node.style.with_fill(color, opacity);
        self
    }

    /// Stroke color, opacity, and width.
    pub fn stroke(mut self, color: Color, opacity: f64, width: f64) -> Self {
        self.node.style = self.node.style.with_stroke(color, opacity, width);
        self
    }

    /// Painter's order.
    pub fn z_index(mut self, z: i32) -> Self {
        self.node.style = self.node.style.with_z_index(z);
        self
    }

    /// Local transform.
    pub fn transform(mut self, transform: Affine) -> Self {
        self.node.transform = transform;
        self
    }

    /// Queue a child; ownership rules are checked by [`NodeBuilder::build`].
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Finish, attaching children in order.
    pub fn build(self) -> MorphResult<Node> {
        let mut node = self.node;
        for child in self.children {
            node.add_child(child)?;
        }
        Ok(node)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/node.rs"]
mod tests;
