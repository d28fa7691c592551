// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame traversals: the update pass and the render pass.

use kurbo::Affine;
use smallvec::SmallVec;

use crate::tree::DisplayTree;
use crate::types::{FrameTime, NodeId};
use crate::util::local_transform;
use crate::visual::{RenderContext, UpdateCx};

impl DisplayTree {
    /// Run the update pass over the subtree rooted at `id`.
    ///
    /// The node's [`Visual::update`](crate::Visual::update) hook runs first.
    /// For a container, a `false` return skips its children for this frame.
    /// Otherwise the children are visited from a snapshot taken after the
    /// hook: each gets `depth = index + 1` and is updated recursively.
    ///
    /// Hooks may restructure the tree. Children added during the pass are
    /// picked up next frame. Children removed during the pass are still
    /// updated this frame unless they were disposed.
    pub fn update(&mut self, id: NodeId, time: &FrameTime) {
        if !self.is_alive(id) {
            return;
        }
        if !self.run_update_hook(id, time) {
            return;
        }
        let snapshot: SmallVec<[NodeId; 16]> = match self.container(id) {
            Some(c) => c.children.iter().copied().collect(),
            None => return,
        };
        for (i, child) in snapshot.into_iter().enumerate() {
            let Some(node) = self.node_opt_mut(child) else {
                continue;
            };
            node.props.depth = u32::try_from(i + 1).unwrap_or(u32::MAX);
            self.update(child, time);
        }
    }

    fn run_update_hook(&mut self, id: NodeId, time: &FrameTime) -> bool {
        // Already checked out means the hook is updating its own subtree.
        let Some(mut visual) = self.node_mut(id).visual.take() else {
            return true;
        };
        let proceed = visual.update(&mut UpdateCx {
            tree: self,
            node: id,
            time: *time,
        });
        if let Some(node) = self.node_opt_mut(id)
            && node.visual.is_none()
        {
            node.visual = Some(visual);
        }
        proceed
    }

    /// Render the subtree rooted at `id` in painter's order.
    ///
    /// Invisible nodes and nodes with `alpha <= 0` are skipped along with
    /// their subtrees. Each drawn node is pushed, draws its own content
    /// through [`Visual::render`](crate::Visual::render), renders its children
    /// in ascending index order, and is popped.
    pub fn render(&self, id: NodeId, ctx: &mut dyn RenderContext) {
        let parent_world = self
            .parent_of(id)
            .and_then(|p| self.world_transform(p))
            .unwrap_or(Affine::IDENTITY);
        self.render_node(id, parent_world, ctx);
    }

    /// Render the bound stage with its own rendering context.
    ///
    /// Does nothing if no stage is bound.
    pub fn render_stage(&mut self) {
        let Some(mut stage) = self.stage.take() else {
            return;
        };
        self.render(stage.root, &mut *stage.context);
        self.stage = Some(stage);
    }

    fn render_node(&self, id: NodeId, parent_world: Affine, ctx: &mut dyn RenderContext) {
        let Some(node) = self.node_opt(id) else {
            return;
        };
        if !node.props.is_shown() {
            return;
        }
        let world = parent_world * local_transform(&node.props);
        ctx.push_node(id, &node.props, world);
        node.visual().render(id, &node.props, ctx);
        if let Some(c) = node.container() {
            for &child in &c.children {
                self.render_node(child, world, ctx);
            }
        }
        ctx.pop_node(id);
    }
}
