// Copyright 2025 the Groupbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained scene tree.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Affine, Point, Size};

use crate::{Node, NodeId};

/// A tree of [`Node`]s with a single root group.
///
/// The root represents the drawing surface (an `<svg>` element when serialized);
/// its size is fixed at construction.
#[derive(Clone, Debug)]
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    next_id: u64,
    size: Size,
}

impl Scene {
    /// Creates a scene with an empty root group covering `size`.
    pub fn new(size: Size) -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::group());
        Self {
            nodes,
            root,
            next_id: 1,
            size,
        }
    }

    /// Returns the root group.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the surface size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the number of live nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if only the root is present.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Returns a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Returns a node by id for in-place mutation of its attributes.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Returns `true` if `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Appends `node` as the last child of `parent` and returns its id.
    ///
    /// Returns `None` if `parent` is not a live node.
    pub fn append(&mut self, parent: NodeId, mut node: Node) -> Option<NodeId> {
        let id = NodeId(self.next_id);
        let parent_node = self.nodes.get_mut(&parent)?;
        parent_node.children.push(id);
        self.next_id += 1;
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.insert(id, node);
        Some(id)
    }

    /// Removes `id` and its whole subtree. The root cannot be removed.
    ///
    /// Returns `false` if `id` was not a live, removable node.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root {
            return false;
        }
        let Some(node) = self.nodes.get(&id) else {
            return false;
        };
        if let Some(parent) = node.parent
            && let Some(p) = self.nodes.get_mut(&parent)
        {
            p.children.retain(|c| *c != id);
        }
        self.drop_subtree(id);
        true
    }

    /// Removes every child subtree of `id`, keeping `id` itself.
    pub fn clear_children(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        let children = core::mem::take(&mut node.children);
        for child in children {
            self.drop_subtree(child);
        }
    }

    fn drop_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(&id) {
                stack.extend(node.children);
            }
        }
    }

    /// Returns `id` and its descendants in paint (pre-)order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Returns every descendant of `scope` (excluding `scope`) carrying `class`, in paint order.
    pub fn select_all(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| *id != scope)
            .filter(|id| self.nodes.get(id).is_some_and(|n| n.has_class(class)))
            .collect()
    }

    /// Returns the transform from `id`'s local space into scene space.
    pub fn world_transform(&self, id: NodeId) -> Affine {
        let mut t = Affine::IDENTITY;
        let mut cur = Some(id);
        while let Some(c) = cur {
            let Some(node) = self.nodes.get(&c) else {
                break;
            };
            t = node.transform * t;
            cur = node.parent;
        }
        t
    }

    /// Returns the topmost node under `point` (scene space) whose class matches `class`.
    ///
    /// Only nodes with geometry participate; later-painted nodes win.
    pub fn hit_test(&self, point: Point, class: Option<&str>) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .rev()
            .filter(|id| {
                let node = &self.nodes[id];
                class.is_none_or(|c| node.has_class(c))
            })
            .find(|id| {
                let node = &self.nodes[id];
                let Some(bounds) = node.local_bounds() else {
                    return false;
                };
                let local = self.world_transform(*id).inverse() * point;
                bounds.contains(local)
            })
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Vec2};
    use peniko::color::palette::css;

    use super::*;

    fn sample() -> (Scene, NodeId, NodeId, NodeId) {
        let mut scene = Scene::new(Size::new(200.0, 100.0));
        let g = scene
            .append(
                scene.root(),
                Node::group().with_transform(Affine::translate(Vec2::new(50.0, 10.0))),
            )
            .unwrap();
        let a = scene
            .append(
                g,
                Node::rect(Rect::new(0.0, 0.0, 20.0, 10.0), css::RED).with_class("bar"),
            )
            .unwrap();
        let b = scene
            .append(
                g,
                Node::rect(Rect::new(0.0, 5.0, 40.0, 15.0), css::BLUE).with_class("bar"),
            )
            .unwrap();
        (scene, g, a, b)
    }

    #[test]
    fn append_and_remove_keep_parent_links_consistent() {
        let (mut scene, g, a, b) = sample();
        assert_eq!(scene.get(g).unwrap().children(), &[a, b]);
        assert_eq!(scene.get(a).unwrap().parent(), Some(g));

        assert!(scene.remove(a));
        assert!(!scene.contains(a));
        assert_eq!(scene.get(g).unwrap().children(), &[b]);
        assert!(!scene.remove(a), "double remove must report false");
        assert!(!scene.remove(scene.root()), "root is not removable");
    }

    #[test]
    fn removing_a_group_drops_its_subtree() {
        let (mut scene, g, a, b) = sample();
        assert_eq!(scene.len(), 4);
        assert!(scene.remove(g));
        assert!(!scene.contains(a) && !scene.contains(b));
        assert!(scene.is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let (mut scene, g, a, _b) = sample();
        scene.remove(a);
        let c = scene.append(g, Node::group()).unwrap();
        assert_ne!(c, a);
    }

    #[test]
    fn select_all_is_in_paint_order() {
        let (scene, _g, a, b) = sample();
        assert_eq!(scene.select_all(scene.root(), "bar"), vec![a, b]);
        assert!(scene.select_all(scene.root(), "axis").is_empty());
    }

    #[test]
    fn clear_children_keeps_the_scope() {
        let (mut scene, g, _a, _b) = sample();
        scene.clear_children(g);
        assert!(scene.contains(g));
        assert!(scene.get(g).unwrap().children().is_empty());
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn hit_test_applies_transforms_and_prefers_topmost() {
        let (scene, _g, a, b) = sample();
        // Only `a` covers local (10, 2) => scene (60, 12).
        assert_eq!(scene.hit_test(Point::new(60.0, 12.0), Some("bar")), Some(a));
        // Both cover local (10, 7) => `b` is painted later.
        assert_eq!(scene.hit_test(Point::new(60.0, 17.0), Some("bar")), Some(b));
        // Outside the translated geometry.
        assert_eq!(scene.hit_test(Point::new(5.0, 5.0), Some("bar")), None);
        assert_eq!(scene.hit_test(Point::new(60.0, 12.0), Some("axis")), None);
    }
}
