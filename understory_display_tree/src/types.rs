// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the display tree: node identifiers, flags, and per-node properties.

use alloc::string::String;
use core::time::Duration;

use crate::bounds::Bounds;

/// Identifier for a node in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and interactivity.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible (rendered and considered by picking).
        const VISIBLE       = 0b0000_0001;
        /// Leaf node participates in picking. Containers ignore this flag.
        const EVENT_ENABLED = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::EVENT_ENABLED
    }
}

/// Opaque handle to an externally managed drawable (image, texture, picture).
///
/// The tree never interprets the value; it is handed back to the
/// [`RenderContext`](crate::RenderContext) when the node is drawn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DrawableHandle(pub u64);

/// Per-node display properties.
///
/// Position and scale are relative to the parent node. `width`/`height`
/// describe the node's local rectangle `(0, 0, width, height)`, which is what
/// the default hit test and autosizing use.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayProps {
    /// User-facing identifier; not required to be unique.
    pub id: String,
    /// Horizontal offset in parent space.
    pub x: f64,
    /// Vertical offset in parent space.
    pub y: f64,
    /// Local width.
    pub width: f64,
    /// Local height.
    pub height: f64,
    /// Optional width override used for autosizing in place of `width`.
    pub rect_width: Option<f64>,
    /// Optional height override used for autosizing in place of `height`.
    pub rect_height: Option<f64>,
    /// Horizontal scale applied about the node origin.
    pub scale_x: f64,
    /// Vertical scale applied about the node origin.
    pub scale_y: f64,
    /// Rotation in radians about the node origin.
    pub rotation: f64,
    /// Opacity; nodes at or below zero are neither rendered nor picked.
    pub alpha: f64,
    /// Visibility and interactivity flags.
    pub flags: NodeFlags,
    /// Position among siblings as of the last update pass (1-based, 0 if never updated).
    pub depth: u32,
    /// Drawable rendered for this node, if any.
    pub drawable: Option<DrawableHandle>,
}

impl Default for DisplayProps {
    fn default() -> Self {
        Self {
            id: String::new(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rect_width: None,
            rect_height: None,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            alpha: 1.0,
            flags: NodeFlags::default(),
            depth: 0,
            drawable: None,
        }
    }
}

impl DisplayProps {
    /// Whether the node is visible and not fully transparent.
    pub fn is_shown(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE) && self.alpha > 0.0
    }

    /// The node's rectangle in parent space as used by autosizing.
    ///
    /// A present, non-zero `rect_width`/`rect_height` takes the place of
    /// `width`/`height`.
    pub fn layout_bounds(&self) -> Bounds {
        Bounds::new(
            self.x,
            self.y,
            non_zero(self.rect_width).unwrap_or(self.width),
            non_zero(self.rect_height).unwrap_or(self.height),
        )
    }

    /// The node's rectangle in its own local space.
    pub fn local_bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.height)
    }
}

fn non_zero(v: Option<f64>) -> Option<f64> {
    v.filter(|v| *v != 0.0)
}

/// Properties accepted by [`DisplayTree::sort_children_by_property`](crate::DisplayTree::sort_children_by_property).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortProperty {
    /// [`DisplayProps::x`].
    X,
    /// [`DisplayProps::y`].
    Y,
    /// [`DisplayProps::width`].
    Width,
    /// [`DisplayProps::height`].
    Height,
    /// [`DisplayProps::alpha`].
    Alpha,
    /// [`DisplayProps::rotation`].
    Rotation,
    /// [`DisplayProps::depth`].
    Depth,
}

impl SortProperty {
    pub(crate) fn read(self, props: &DisplayProps) -> f64 {
        match self {
            Self::X => props.x,
            Self::Y => props.y,
            Self::Width => props.width,
            Self::Height => props.height,
            Self::Alpha => props.alpha,
            Self::Rotation => props.rotation,
            Self::Depth => f64::from(props.depth),
        }
    }
}

/// How precisely a node's shape is tested during picking.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum HitMode {
    /// Test against the node's bounding rectangle.
    #[default]
    Bounds,
    /// Test against the node's exact outline where the visual supports it.
    Precise,
}

/// Timing information handed to every node during an update pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FrameTime {
    /// Time since the previous frame.
    pub delta: Duration,
    /// Time since the driver started ticking.
    pub elapsed: Duration,
    /// Frame counter.
    pub frame: u64,
}
