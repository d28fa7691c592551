// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picking: resolving which nodes lie under a point.
//!
//! Children are visited from the highest index down, the reverse of paint
//! order, so what is drawn in front is tested first. Containers that let
//! events through to their children are searched depth-first before their own
//! shape is tested.

use alloc::vec::Vec;

use kurbo::{Affine, Point};

use crate::tree::{DisplayTree, Node};
use crate::types::{HitMode, NodeFlags, NodeId};
use crate::util::local_transform;

#[derive(Clone, Copy)]
struct Candidate<'a> {
    id: NodeId,
    node: &'a Node,
    world: Affine,
    /// Search the candidate's children before its own shape.
    descend: bool,
}

impl DisplayTree {
    /// The topmost node under `point` among the descendants of `container`.
    ///
    /// `point` is in world space. Leaves with [`NodeFlags::EVENT_ENABLED`]
    /// cleared are skipped, as are invisible and fully transparent nodes. A
    /// hit inside a container that has `event_children` enabled wins over the
    /// container's own shape. The container itself is never returned.
    ///
    /// The tree must not be restructured while this runs, which `&self`
    /// already guarantees.
    pub fn object_under_point(
        &self,
        container: NodeId,
        point: Point,
        mode: HitMode,
    ) -> Option<NodeId> {
        let world = self.world_transform(container)?;
        self.pick_first(container, world, point, mode)
    }

    /// Every node under `point` among the descendants of `container`,
    /// front to back.
    ///
    /// Uses the same filtering and visiting order as
    /// [`DisplayTree::object_under_point`]. A container's descendant hits come
    /// before the container itself. Returns an empty list when nothing is hit.
    pub fn objects_under_point(&self, container: NodeId, point: Point, mode: HitMode) -> Vec<NodeId> {
        let mut hits = Vec::new();
        if let Some(world) = self.world_transform(container) {
            self.pick_all(container, world, point, mode, &mut hits);
        }
        hits
    }

    fn pick_first(
        &self,
        container: NodeId,
        world: Affine,
        point: Point,
        mode: HitMode,
    ) -> Option<NodeId> {
        for c in self.candidates(container, world) {
            if c.descend
                && let Some(hit) = self.pick_first(c.id, c.world, point, mode)
            {
                return Some(hit);
            }
            if hits_own_shape(&c, point, mode) {
                return Some(c.id);
            }
        }
        None
    }

    fn pick_all(
        &self,
        container: NodeId,
        world: Affine,
        point: Point,
        mode: HitMode,
        hits: &mut Vec<NodeId>,
    ) {
        for c in self.candidates(container, world) {
            if c.descend {
                self.pick_all(c.id, c.world, point, mode, hits);
            }
            if hits_own_shape(&c, point, mode) {
                hits.push(c.id);
            }
        }
    }

    fn candidates(
        &self,
        container: NodeId,
        world: Affine,
    ) -> impl Iterator<Item = Candidate<'_>> + '_ {
        self.children_of(container)
            .iter()
            .rev()
            .filter_map(move |&id| {
                let node = self.node_opt(id)?;
                if node.container().is_none()
                    && !node.props.flags.contains(NodeFlags::EVENT_ENABLED)
                {
                    return None;
                }
                if !node.props.is_shown() {
                    return None;
                }
                Some(Candidate {
                    id,
                    node,
                    world: world * local_transform(&node.props),
                    descend: self.has_pickable_descendants(id),
                })
            })
    }
}

fn hits_own_shape(c: &Candidate<'_>, point: Point, mode: HitMode) -> bool {
    if c.world.determinant() == 0.0 {
        return false;
    }
    let local = c.world.inverse() * point;
    c.node.visual().hit_test(&c.node.props, local, mode) >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContainerConfig, NodeConfig};
    use crate::visual::ShapeVisual;
    use alloc::boxed::Box;
    use alloc::vec;
    use kurbo::Circle;

    fn rect_leaf(tree: &mut DisplayTree, x: f64, y: f64, w: f64, h: f64) -> NodeId {
        tree.create_leaf(
            NodeConfig {
                x,
                y,
                width: w,
                height: h,
                ..NodeConfig::default()
            },
            None,
        )
    }

    fn rect_container(tree: &mut DisplayTree, x: f64, y: f64, w: f64, h: f64) -> NodeId {
        tree.create_container(
            ContainerConfig {
                node: NodeConfig {
                    x,
                    y,
                    width: w,
                    height: h,
                    ..NodeConfig::default()
                },
                ..ContainerConfig::default()
            },
            None,
        )
    }

    #[test]
    fn topmost_sibling_wins() {
        let mut tree = DisplayTree::new();
        let p = rect_container(&mut tree, 0.0, 0.0, 0.0, 0.0);
        let a = rect_leaf(&mut tree, 0.0, 0.0, 10.0, 10.0);
        let b = rect_leaf(&mut tree, 5.0, 5.0, 10.0, 10.0);
        tree.add_child(p, [a, b]).unwrap();

        let pt = Point::new(7.0, 7.0);
        assert_eq!(tree.object_under_point(p, pt, HitMode::Bounds), Some(b));
        assert_eq!(tree.objects_under_point(p, pt, HitMode::Bounds), vec![b, a]);
        assert_eq!(
            tree.object_under_point(p, Point::new(2.0, 2.0), HitMode::Bounds),
            Some(a)
        );
        assert_eq!(tree.object_under_point(p, Point::new(50.0, 50.0), HitMode::Bounds), None);
        assert!(tree.objects_under_point(p, Point::new(50.0, 50.0), HitMode::Bounds).is_empty());
    }

    #[test]
    fn descendants_before_container() {
        let mut tree = DisplayTree::new();
        let root = rect_container(&mut tree, 0.0, 0.0, 0.0, 0.0);
        let group = rect_container(&mut tree, 10.0, 10.0, 50.0, 50.0);
        let inner = rect_leaf(&mut tree, 0.0, 0.0, 10.0, 10.0);
        tree.add_child(root, [group]).unwrap();
        tree.add_child(group, [inner]).unwrap();

        // Inside `inner` (offset by the group's origin).
        let pt = Point::new(15.0, 15.0);
        assert_eq!(tree.object_under_point(root, pt, HitMode::Bounds), Some(inner));
        assert_eq!(tree.objects_under_point(root, pt, HitMode::Bounds), vec![inner, group]);

        // Inside the group but outside `inner`: the group's own shape is the fallback.
        let pt = Point::new(40.0, 40.0);
        assert_eq!(tree.object_under_point(root, pt, HitMode::Bounds), Some(group));
    }

    #[test]
    fn event_children_off_tests_only_container() {
        let mut tree = DisplayTree::new();
        let root = rect_container(&mut tree, 0.0, 0.0, 0.0, 0.0);
        let group = rect_container(&mut tree, 0.0, 0.0, 50.0, 50.0);
        let inner = rect_leaf(&mut tree, 0.0, 0.0, 10.0, 10.0);
        tree.add_child(root, [group]).unwrap();
        tree.add_child(group, [inner]).unwrap();
        tree.set_event_children(group, false);

        let pt = Point::new(5.0, 5.0);
        assert_eq!(tree.object_under_point(root, pt, HitMode::Bounds), Some(group));
        assert_eq!(tree.objects_under_point(root, pt, HitMode::Bounds), vec![group]);
    }

    #[test]
    fn event_enabled_only_filters_leaves() {
        let mut tree = DisplayTree::new();
        let root = rect_container(&mut tree, 0.0, 0.0, 0.0, 0.0);
        let group = rect_container(&mut tree, 0.0, 0.0, 50.0, 50.0);
        let inert = rect_leaf(&mut tree, 0.0, 0.0, 50.0, 50.0);
        tree.add_child(root, [group, inert]).unwrap();
        for id in [group, inert] {
            tree.props_mut(id)
                .unwrap()
                .flags
                .remove(NodeFlags::EVENT_ENABLED);
        }

        assert_eq!(
            tree.object_under_point(root, Point::new(5.0, 5.0), HitMode::Bounds),
            Some(group),
            "containers are not skipped for EVENT_ENABLED"
        );
    }

    #[test]
    fn hidden_and_transparent_are_skipped() {
        let mut tree = DisplayTree::new();
        let root = rect_container(&mut tree, 0.0, 0.0, 0.0, 0.0);
        let a = rect_leaf(&mut tree, 0.0, 0.0, 10.0, 10.0);
        let hidden = rect_leaf(&mut tree, 0.0, 0.0, 10.0, 10.0);
        let clear = rect_leaf(&mut tree, 0.0, 0.0, 10.0, 10.0);
        tree.add_child(root, [a, hidden, clear]).unwrap();
        tree.props_mut(hidden).unwrap().flags.remove(NodeFlags::VISIBLE);
        tree.props_mut(clear).unwrap().alpha = 0.0;

        assert_eq!(
            tree.objects_under_point(root, Point::new(1.0, 1.0), HitMode::Bounds),
            vec![a]
        );
    }

    #[test]
    fn precise_mode_uses_shape() {
        let mut tree = DisplayTree::new();
        let root = rect_container(&mut tree, 0.0, 0.0, 0.0, 0.0);
        let disk = tree.create_leaf(
            NodeConfig {
                width: 20.0,
                height: 20.0,
                ..NodeConfig::default()
            },
            Some(Box::new(ShapeVisual::new(Circle::new((10.0, 10.0), 10.0)))),
        );
        tree.add_child(root, [disk]).unwrap();

        let corner = Point::new(1.0, 1.0);
        assert_eq!(tree.object_under_point(root, corner, HitMode::Bounds), Some(disk));
        assert_eq!(tree.object_under_point(root, corner, HitMode::Precise), None);
    }

    #[test]
    fn scaled_and_zero_scaled_nodes() {
        let mut tree = DisplayTree::new();
        let root = rect_container(&mut tree, 0.0, 0.0, 0.0, 0.0);
        let big = tree.create_leaf(
            NodeConfig {
                width: 10.0,
                height: 10.0,
                scale_x: 2.0,
                scale_y: 2.0,
                ..NodeConfig::default()
            },
            None,
        );
        let flat = tree.create_leaf(
            NodeConfig {
                width: 10.0,
                height: 10.0,
                scale_x: 0.0,
                ..NodeConfig::default()
            },
            None,
        );
        tree.add_child(root, [big, flat]).unwrap();

        assert_eq!(
            tree.objects_under_point(root, Point::new(0.0, 15.0), HitMode::Bounds),
            vec![big]
        );
    }
}
