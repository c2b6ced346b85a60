use super::*;
use crate::scene::shapes::{circle, square};

#[test]
fn ids_are_unique_and_survive_clone() {
    let a = Node::group();
    let b = Node::group();
    assert_ne!(a.id(), b.id());
    assert_eq!(a.clone().id(), a.id());
    assert_ne!(a.duplicate().id(), a.id());
}

#[test]
fn duplicate_refreshes_every_id() {
    let tree = NodeBuilder::new()
        .child(square(1.0).unwrap())
        .child(circle(1.0).unwrap())
        .build()
        .unwrap();
    let copy = tree.duplicate();
    assert_eq!(copy.family_len(), tree.family_len());
    for (orig, dup) in tree.family().zip(copy.family()) {
        assert_ne!(orig.id(), dup.id());
        assert_eq!(orig.geometry(), dup.geometry());
    }
}

#[test]
fn add_child_rejects_self_and_ancestors() {
    let mut root = Node::group();
    let err = root.add_child(root.clone());
    assert!(matches!(err, Err(MorphError::CyclicOwnership(_))));

    let mut child = Node::group();
    let leaf = square(1.0).unwrap();
    child.add_child(leaf.clone()).unwrap();
    root.add_child(child.clone()).unwrap();

    // `leaf` already sits under `root`; `root` cannot go under it.
    let mut leaf = leaf;
    assert!(matches!(
        leaf.add_child(root.clone()),
        Err(MorphError::CyclicOwnership(_))
    ));
    assert_eq!(leaf.child_count(), 0);
    assert_eq!(root.family_len(), 3);
}

#[test]
fn children_are_set_like() {
    let a = square(1.0).unwrap();
    let b = circle(1.0).unwrap();
    let mut root = Node::group();
    root.add_child(a.clone()).unwrap();
    root.add_child(b.clone()).unwrap();
    root.add_child(a.clone()).unwrap();
    let ids: Vec<_> = root.children().iter().map(Node::id).collect();
    assert_eq!(ids, vec![b.id(), a.id()]);

    let removed = root.remove_child(b.id()).unwrap();
    assert_eq!(removed.id(), b.id());
    assert_eq!(root.child_count(), 1);
    assert!(root.remove_child(b.id()).is_none());
}

#[test]
fn family_is_pre_order() {
    let inner = NodeBuilder::new()
        .name("inner")
        .child(NodeBuilder::new().name("leaf").build().unwrap())
        .build()
        .unwrap();
    let root = NodeBuilder::new()
        .name("root")
        .child(inner)
        .child(NodeBuilder::new().name("tail").build().unwrap())
        .build()
        .unwrap();
    let names: Vec<_> = root.family().filter_map(Node::name).collect();
    assert_eq!(names, vec!["root", "inner", "leaf", "tail"]);
    assert!(root.contains(root.children()[1].id()));
}

#[test]
fn shifted_moves_the_whole_family() {
    let tree = NodeBuilder::new()
        .geometry(PathGeometry::as_corners(&[Point::ORIGIN, Point::xy(1.0, 0.0)]).unwrap())
        .child(square(2.0).unwrap())
        .build()
        .unwrap();
    let moved = tree.shifted(Point::xy(3.0, -1.0));
    assert_eq!(moved.id(), tree.id());
    assert_eq!(
        moved.geometry().and_then(PathGeometry::start),
        Some(Point::xy(3.0, -1.0))
    );
    assert_eq!(
        moved.children()[0].geometry().and_then(PathGeometry::center),
        Some(Point::xy(3.0, -1.0))
    );
}

#[test]
fn builder_sets_style_and_transform() {
    let node = NodeBuilder::new()
        .fill(Color::from_rgb8(255, 0, 0), 0.5)
        .stroke(Color::BLACK, 1.0, 2.0)
        .z_index(3)
        .transform(Affine::translate((1.0, 2.0)))
        .build()
        .unwrap();
    assert_eq!(node.style().fill, Color::rgb(1.0, 0.0, 0.0));
    assert_eq!(node.style().fill.to_rgba8(0.5), [255, 0, 0, 128]);
    assert_eq!(node.style().stroke_width, 2.0);
    assert_eq!(node.style().z_index, 3);
    assert_eq!(node.transform(), Affine::translate((1.0, 2.0)));
    assert!(!node.has_points());
}

#[test]
fn serde_assigns_fresh_ids() {
    let node = square(1.0).unwrap();
    let json = serde_json::to_string(&node).unwrap();
    let back: Node = serde_json::from_str(&json).unwrap();
    assert_ne!(back.id(), node.id());
    assert_eq!(back.geometry(), node.geometry());
    assert_eq!(back.style(), node.style());
}
