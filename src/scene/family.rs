//! Family traversal.

use crate::{foundation::core::Affine, scene::node::Node};

/// Pre-order iterator over a node and all of its descendants.
///
/// Created by [`Node::family`]. The root comes first, then each child's family in
/// child order.
#[derive(Debug)]
pub struct Family<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Family<'a> {
    pub(crate) fn new(root: &'a Node) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for Family<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Pre-order walk that also yields the accumulated transform of each node.
///
/// The transform of a yielded node already includes its own local transform.
pub(crate) fn walk_with_transform<'a>(
    root: &'a Node,
    base: Affine,
    f: &mut impl FnMut(&'a Node, Affine),
) {
    let affine = base * root.transform();
    f(root, affine);
    for child in root.children() {
        walk_with_transform(child, affine, f);
    }
}
