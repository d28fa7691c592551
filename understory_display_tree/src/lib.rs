// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_display_tree --heading-base-level=0

//! Understory Display Tree: a retained 2D display tree with ordered containers.
//!
//! A display tree is the scene structure behind a 2D stage: containers hold an ordered list of
//! children, the list order is the paint order, and the same order reversed decides which node
//! receives a pointer.
//!
//! - Containers own ordered children with insertion, removal, reordering, swapping, sorting, and
//!   lookup by id.
//! - A per-frame update pass lets each node's [`Visual`] react to time, and lets containers pause
//!   their subtree by returning `false`.
//! - A render pass walks the tree in painter's order and drives a caller-supplied
//!   [`RenderContext`].
//! - Picking resolves the topmost node under a point, or every node under it, honoring
//!   visibility, alpha, and per-node event flags.
//!
//! ## Nodes and visuals
//!
//! Nodes live in a generational arena inside [`DisplayTree`] and are addressed by [`NodeId`].
//! Each node carries [`DisplayProps`] (position, size, scale, rotation, alpha, flags) and an
//! optional boxed [`Visual`] that supplies per-frame behavior, drawing, and shape testing.
//! Nodes without a visual behave like [`PlainVisual`]: they draw their drawable, if any, and hit
//! on their layout bounds.
//!
//! ## Stage binding
//!
//! [`DisplayTree::attach_stage`] binds a root container to a rendering context. While bound,
//! removing a child anywhere in that subtree calls [`RenderContext::release`] so that the
//! context can free per-node resources.
//!
//! ## Not a layout engine
//!
//! The tree does no layout beyond the optional container `autosize`, which only grows a
//! container's size to cover its children. Positions and sizes are set by the caller.
//!
//! ## API overview
//!
//! - [`DisplayTree`]: arena, structure, traversals, and picking.
//! - [`NodeConfig`] / [`ContainerConfig`]: construction options.
//! - [`DisplayProps`], [`NodeFlags`]: per-node state.
//! - [`Bounds`]: axis-aligned rectangle with inclusive edges.
//! - [`Visual`], [`RenderContext`], [`UpdateCx`]: the extension points.
//! - [`TreeError`]: rejected structural edits.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bounds;
mod config;
mod container;
mod error;
mod pick;
mod traverse;
mod tree;
mod types;
mod util;
mod visual;

pub use bounds::Bounds;
pub use config::{ContainerConfig, NodeConfig};
pub use error::TreeError;
pub use tree::DisplayTree;
pub use types::{
    DisplayProps, DrawableHandle, FrameTime, HitMode, NodeFlags, NodeId, SortProperty,
};
pub use visual::{FnVisual, PlainVisual, RenderContext, ShapeVisual, UpdateCx, Visual};
