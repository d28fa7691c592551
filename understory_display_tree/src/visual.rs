// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node behavior plugged into the tree: frame hooks, drawing, and shape tests.
//!
//! The tree owns structure and properties. Everything a node *does* lives
//! behind [`Visual`], and everything a frame *draws into* lives behind
//! [`RenderContext`].

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Affine, Point, Shape};

use crate::bounds::Bounds;
use crate::tree::DisplayTree;
use crate::types::{DisplayProps, DrawableHandle, FrameTime, HitMode, NodeId};

/// Drawing backend driven by [`DisplayTree::render`].
///
/// Calls arrive in painter's order: a node is pushed, drawn, its children are
/// rendered, and then it is popped.
pub trait RenderContext {
    /// Begin drawing `node` with the given world transform.
    fn push_node(&mut self, node: NodeId, props: &DisplayProps, world: Affine);

    /// Finish drawing `node` and its subtree.
    fn pop_node(&mut self, node: NodeId) {
        let _ = node;
    }

    /// Draw an externally managed drawable for `node`.
    fn draw_drawable(&mut self, node: NodeId, drawable: DrawableHandle, props: &DisplayProps) {
        let _ = (node, drawable, props);
    }

    /// Drop anything retained for `node`.
    ///
    /// Called when `node` is removed from a container that is attached to the
    /// stage.
    fn release(&mut self, node: NodeId) {
        let _ = node;
    }
}

/// Behavior of a single node.
///
/// Every method has a default, so a unit struct implementing `Visual` is a
/// plain rectangle that draws its drawable and is hit inside
/// `(0, 0, width, height)`.
pub trait Visual: fmt::Debug {
    /// Per-frame hook.
    ///
    /// For containers, returning `false` skips the children for this frame.
    /// The return value is ignored for leaves.
    fn update(&mut self, cx: &mut UpdateCx<'_>) -> bool {
        let _ = cx;
        true
    }

    /// Draw this node's own content.
    ///
    /// Children are drawn by the tree afterwards.
    fn render(&self, node: NodeId, props: &DisplayProps, ctx: &mut dyn RenderContext) {
        if let Some(drawable) = props.drawable {
            ctx.draw_drawable(node, drawable, props);
        }
    }

    /// Test a point in this node's local space.
    ///
    /// Returns a negative value on a miss. Non-negative values are hits; their
    /// magnitude is up to the implementation (a distance, a bias).
    fn hit_test(&self, props: &DisplayProps, local: Point, mode: HitMode) -> f64 {
        let _ = mode;
        bounds_hit(&props.local_bounds(), local)
    }
}

fn bounds_hit(bounds: &Bounds, local: Point) -> f64 {
    if bounds.contains_point(local.x, local.y) {
        0.0
    } else {
        -1.0
    }
}

/// A visual with no behavior of its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainVisual;

impl Visual for PlainVisual {}

/// A leaf whose hit area is a [`kurbo`] shape in local coordinates.
///
/// [`HitMode::Precise`] tests the exact outline through [`Shape::contains`];
/// [`HitMode::Bounds`] tests the shape's bounding box, edges included.
#[derive(Clone, Debug)]
pub struct ShapeVisual<S> {
    /// The hit shape.
    pub shape: S,
}

impl<S> ShapeVisual<S> {
    /// Wrap a shape.
    pub fn new(shape: S) -> Self {
        Self { shape }
    }
}

impl<S: Shape + fmt::Debug> Visual for ShapeVisual<S> {
    fn hit_test(&self, _props: &DisplayProps, local: Point, mode: HitMode) -> f64 {
        match mode {
            HitMode::Precise => {
                if self.shape.contains(local) {
                    0.0
                } else {
                    -1.0
                }
            }
            HitMode::Bounds => bounds_hit(&Bounds::from(self.shape.bounding_box()), local),
        }
    }
}

type UpdateFn = dyn FnMut(&mut UpdateCx<'_>) -> bool;

/// A visual driven by a per-frame closure.
///
/// ```
/// use understory_display_tree::{ContainerConfig, DisplayTree, FnVisual, FrameTime};
///
/// let mut tree = DisplayTree::new();
/// // A paused container: its children never update.
/// let paused = tree.create_container(
///     ContainerConfig::default(),
///     Some(Box::new(FnVisual::new(|_| false))),
/// );
/// tree.update(paused, &FrameTime::default());
/// ```
pub struct FnVisual {
    f: Box<UpdateFn>,
}

impl FnVisual {
    /// Wrap an update closure.
    pub fn new(f: impl FnMut(&mut UpdateCx<'_>) -> bool + 'static) -> Self {
        Self { f: Box::new(f) }
    }
}

impl fmt::Debug for FnVisual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnVisual").finish_non_exhaustive()
    }
}

impl Visual for FnVisual {
    fn update(&mut self, cx: &mut UpdateCx<'_>) -> bool {
        (self.f)(cx)
    }
}

/// Context handed to [`Visual::update`].
///
/// The whole tree is reachable, so a hook may restructure it. While the hook
/// runs, the node's own visual is checked out of the tree:
/// [`DisplayTree::visual`] returns `None` for [`UpdateCx::node`].
#[derive(Debug)]
pub struct UpdateCx<'a> {
    pub(crate) tree: &'a mut DisplayTree,
    pub(crate) node: NodeId,
    pub(crate) time: FrameTime,
}

impl UpdateCx<'_> {
    /// The node being updated.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Frame timing for this pass.
    pub fn time(&self) -> &FrameTime {
        &self.time
    }

    /// The tree being updated.
    pub fn tree(&mut self) -> &mut DisplayTree {
        self.tree
    }

    /// Properties of the node being updated.
    pub fn props_mut(&mut self) -> Option<&mut DisplayProps> {
        self.tree.props_mut(self.node)
    }
}
