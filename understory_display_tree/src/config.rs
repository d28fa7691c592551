// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction options for leaves and containers.

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::{DisplayProps, DrawableHandle, NodeFlags, NodeId};

/// Options for creating a node.
///
/// Start from [`NodeConfig::default`] and override fields with struct-update
/// syntax:
///
/// ```
/// use understory_display_tree::{DisplayTree, NodeConfig};
///
/// let mut tree = DisplayTree::new();
/// let leaf = tree.create_leaf(
///     NodeConfig {
///         id: Some("button".into()),
///         width: 40.0,
///         height: 20.0,
///         ..NodeConfig::default()
///     },
///     None,
/// );
/// assert_eq!(tree.props(leaf).unwrap().id, "button");
/// ```
#[derive(Clone, Debug)]
pub struct NodeConfig {
    /// Identifier; generated from a per-tree counter when absent.
    pub id: Option<String>,
    /// Horizontal offset in parent space.
    pub x: f64,
    /// Vertical offset in parent space.
    pub y: f64,
    /// Local width.
    pub width: f64,
    /// Local height.
    pub height: f64,
    /// Width override for autosizing.
    pub rect_width: Option<f64>,
    /// Height override for autosizing.
    pub rect_height: Option<f64>,
    /// Horizontal scale.
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Rotation in radians.
    pub rotation: f64,
    /// Opacity.
    pub alpha: f64,
    /// Visibility and interactivity flags.
    pub flags: NodeFlags,
    /// Drawable for the node. Wins over `image` when both are set.
    pub drawable: Option<DrawableHandle>,
    /// Alias for `drawable`.
    pub image: Option<DrawableHandle>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let props = DisplayProps::default();
        Self {
            id: None,
            x: props.x,
            y: props.y,
            width: props.width,
            height: props.height,
            rect_width: None,
            rect_height: None,
            scale_x: props.scale_x,
            scale_y: props.scale_y,
            rotation: props.rotation,
            alpha: props.alpha,
            flags: props.flags,
            drawable: None,
            image: None,
        }
    }
}

impl NodeConfig {
    pub(crate) fn into_props(self, id: String) -> DisplayProps {
        DisplayProps {
            id,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            rect_width: self.rect_width,
            rect_height: self.rect_height,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            rotation: self.rotation,
            alpha: self.alpha,
            flags: self.flags,
            depth: 0,
            drawable: self.drawable.or(self.image),
        }
    }
}

/// Options for creating a container.
#[derive(Clone, Debug)]
pub struct ContainerConfig {
    /// Base node options.
    pub node: NodeConfig,
    /// Whether descendants participate in picking.
    pub event_children: bool,
    /// Whether `width`/`height` grow to cover inserted children.
    pub autosize: bool,
    /// Children appended in order right after creation, through the same path
    /// as [`DisplayTree::add_child`](crate::DisplayTree::add_child).
    pub children: Vec<NodeId>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig::default(),
            event_children: true,
            autosize: false,
            children: Vec::new(),
        }
    }
}
