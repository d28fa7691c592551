// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node storage: allocation, disposal, property access, and the stage binding.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Affine, Rect};

use crate::bounds::Bounds;
use crate::config::{ContainerConfig, NodeConfig};
use crate::error::TreeError;
use crate::types::{DisplayProps, NodeId};
use crate::util::{local_transform, transform_rect_bbox};
use crate::visual::{PlainVisual, RenderContext, Visual};

/// Retained display tree.
///
/// Nodes live in a generational arena and are addressed by [`NodeId`]. A node
/// is either a leaf or a container; containers own an ordered list of
/// children whose order is the paint order (index 0 is drawn first, at the
/// back) and the reverse of the picking order.
///
/// Parent links are only ever written by the tree's own insertion and removal
/// operations, so a node is always in exactly one container's child list or
/// in none.
///
/// ## Example
///
/// ```rust
/// use kurbo::Point;
/// use understory_display_tree::{ContainerConfig, DisplayTree, HitMode, NodeConfig};
///
/// let mut tree = DisplayTree::new();
/// let root = tree.create_container(ContainerConfig::default(), None);
/// let a = tree.create_leaf(
///     NodeConfig { width: 10.0, height: 10.0, ..NodeConfig::default() },
///     None,
/// );
/// let b = tree.create_leaf(
///     NodeConfig { x: 5.0, y: 5.0, width: 10.0, height: 10.0, ..NodeConfig::default() },
///     None,
/// );
/// tree.add_child(root, [a, b]).unwrap();
///
/// // The later child is on top.
/// assert_eq!(tree.object_under_point(root, Point::new(7.0, 7.0), HitMode::Bounds), Some(b));
/// ```
pub struct DisplayTree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    next_uid: u64,
    pub(crate) stage: Option<Stage>,
}

impl core::fmt::Debug for DisplayTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("DisplayTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("stage", &self.stage.as_ref().map(|s| s.root))
            .finish_non_exhaustive()
    }
}

impl Default for DisplayTree {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct Stage {
    pub(crate) root: NodeId,
    pub(crate) context: Box<dyn RenderContext>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerState {
    pub(crate) children: Vec<NodeId>,
    pub(crate) event_children: bool,
    pub(crate) autosize: bool,
}

#[derive(Clone, Debug)]
pub(crate) enum NodeKind {
    Leaf,
    Container(ContainerState),
}

#[derive(Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
    pub(crate) props: DisplayProps,
    /// `None` only while checked out by an update hook.
    pub(crate) visual: Option<Box<dyn Visual>>,
}

impl Node {
    pub(crate) fn container(&self) -> Option<&ContainerState> {
        match &self.kind {
            NodeKind::Container(c) => Some(c),
            NodeKind::Leaf => None,
        }
    }

    pub(crate) fn visual(&self) -> &dyn Visual {
        self.visual.as_deref().unwrap_or(&PlainVisual)
    }
}

impl DisplayTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            next_uid: 0,
            stage: None,
        }
    }

    /// Create a detached leaf node.
    ///
    /// `visual` defaults to [`PlainVisual`].
    pub fn create_leaf(&mut self, config: NodeConfig, visual: Option<Box<dyn Visual>>) -> NodeId {
        let id = config
            .id
            .clone()
            .unwrap_or_else(|| self.generate_uid("DisplayObject"));
        self.alloc(config.into_props(id), NodeKind::Leaf, visual)
    }

    /// Create a detached container and append `config.children` to it in order.
    ///
    /// Seeded children go through [`DisplayTree::add_child`], so children that
    /// already have a parent are moved. Stale ids in `children` are skipped.
    pub fn create_container(
        &mut self,
        config: ContainerConfig,
        visual: Option<Box<dyn Visual>>,
    ) -> NodeId {
        let ContainerConfig {
            node,
            event_children,
            autosize,
            children,
        } = config;
        let uid = node
            .id
            .clone()
            .unwrap_or_else(|| self.generate_uid("DisplayObjectContainer"));
        let id = self.alloc(
            node.into_props(uid),
            NodeKind::Container(ContainerState {
                children: Vec::new(),
                event_children,
                autosize,
            }),
            visual,
        );
        for child in children {
            if let Err(err) = self.add_child(id, [child]) {
                tracing::debug!(?id, %err, "skipping seeded child");
            }
        }
        id
    }

    fn generate_uid(&mut self, prefix: &str) -> String {
        self.next_uid += 1;
        format!("{prefix}{}", self.next_uid)
    }

    fn alloc(
        &mut self,
        props: DisplayProps,
        kind: NodeKind,
        visual: Option<Box<dyn Visual>>,
    ) -> NodeId {
        let visual = visual.unwrap_or_else(|| Box::new(PlainVisual));
        let node = |generation| Node {
            generation,
            parent: None,
            kind,
            props,
            visual: Some(visual),
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(node(generation));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(node(generation)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        tracing::trace!(?id, "alloc");
        id
    }

    /// Dispose of a node and its whole subtree.
    ///
    /// The node is first removed from its parent the same way
    /// [`DisplayTree::remove_child`] does it. Disposing the stage root drops
    /// the stage binding. All ids in the subtree become stale.
    pub fn dispose(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.remove_child(parent, id);
        }
        if self.stage.as_ref().is_some_and(|s| s.root == id) {
            self.stage = None;
        }
        let children = self
            .node(id)
            .container()
            .map(|c| c.children.clone())
            .unwrap_or_default();
        for child in children {
            // Children are freed directly; their parent is going away with them.
            self.node_mut(child).parent = None;
            self.dispose(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
        tracing::trace!(?id, "dispose");
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Returns the parent of a node if live, or `None` for roots, detached nodes, or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a container, or an empty slice for leaves and stale ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.container(id).map(|c| c.children.as_slice()).unwrap_or(&[])
    }

    /// Display properties of a live node.
    pub fn props(&self, id: NodeId) -> Option<&DisplayProps> {
        self.node_opt(id).map(|n| &n.props)
    }

    /// Mutable display properties of a live node.
    pub fn props_mut(&mut self, id: NodeId) -> Option<&mut DisplayProps> {
        self.node_opt_mut(id).map(|n| &mut n.props)
    }

    /// The visual attached to a live node.
    ///
    /// Returns `None` for the node whose update hook is currently running.
    pub fn visual(&self, id: NodeId) -> Option<&dyn Visual> {
        self.node_opt(id).and_then(|n| n.visual.as_deref())
    }

    /// Replace the visual attached to a live node.
    pub fn set_visual(&mut self, id: NodeId, visual: Box<dyn Visual>) {
        match self.node_opt_mut(id) {
            Some(n) => n.visual = Some(visual),
            None => tracing::debug!(?id, "set_visual: stale node"),
        }
    }

    /// Whether `id` is a live container.
    pub fn is_container(&self, id: NodeId) -> bool {
        self.container(id).is_some()
    }

    /// Whether picking descends into this container's children.
    ///
    /// `None` for leaves and stale ids.
    pub fn event_children(&self, id: NodeId) -> Option<bool> {
        self.container(id).map(|c| c.event_children)
    }

    /// Enable or disable picking of this container's descendants.
    pub fn set_event_children(&mut self, id: NodeId, enabled: bool) {
        match self.container_mut(id) {
            Some(c) => c.event_children = enabled,
            None => tracing::debug!(?id, "set_event_children: not a live container"),
        }
    }

    /// Whether this container grows to cover inserted children.
    ///
    /// `None` for leaves and stale ids.
    pub fn autosize(&self, id: NodeId) -> Option<bool> {
        self.container(id).map(|c| c.autosize)
    }

    /// Enable or disable autosizing. Only later insertions are affected.
    pub fn set_autosize(&mut self, id: NodeId, enabled: bool) {
        match self.container_mut(id) {
            Some(c) => c.autosize = enabled,
            None => tracing::debug!(?id, "set_autosize: not a live container"),
        }
    }

    /// Whether picking would descend into this node: it is a container with
    /// `event_children` enabled and at least one child.
    pub fn has_pickable_descendants(&self, id: NodeId) -> bool {
        self.container(id)
            .is_some_and(|c| c.event_children && !c.children.is_empty())
    }

    /// Bind `root` as the stage, with `context` as its rendering context.
    ///
    /// While bound, removing a child from any container inside the stage
    /// subtree calls [`RenderContext::release`] on `context`. Returns the
    /// previously bound context, if any.
    pub fn attach_stage(
        &mut self,
        root: NodeId,
        context: Box<dyn RenderContext>,
    ) -> Result<Option<Box<dyn RenderContext>>, TreeError> {
        if !self.is_alive(root) {
            return Err(TreeError::StaleNode(root));
        }
        tracing::trace!(?root, "attach_stage");
        Ok(self
            .stage
            .replace(Stage { root, context })
            .map(|s| s.context))
    }

    /// Unbind the stage and hand back its rendering context.
    pub fn detach_stage(&mut self) -> Option<Box<dyn RenderContext>> {
        let stage = self.stage.take()?;
        tracing::trace!(root = ?stage.root, "detach_stage");
        Some(stage.context)
    }

    /// The stage root, if one is bound.
    pub fn stage_root(&self) -> Option<NodeId> {
        self.stage.as_ref().map(|s| s.root)
    }

    /// The stage root if `id` is the stage root or one of its descendants.
    pub fn stage_of(&self, id: NodeId) -> Option<NodeId> {
        let stage = self.stage.as_ref()?.root;
        self.is_ancestor_or_self(stage, id).then_some(stage)
    }

    /// Return the local→world transform for a live node.
    ///
    /// World space is the space of the node's topmost ancestor's parent, so a
    /// root's world transform is its own local transform.
    pub fn world_transform(&self, id: NodeId) -> Option<Affine> {
        let mut node = self.node_opt(id)?;
        let mut tf = local_transform(&node.props);
        while let Some(parent) = node.parent {
            node = self.node(parent);
            tf = local_transform(&node.props) * tf;
        }
        Some(tf)
    }

    /// Return a world-space axis-aligned box containing the node's local
    /// rectangle `(0, 0, width, height)`.
    ///
    /// The box is loose under rotation. Children are not included.
    pub fn world_bounds(&self, id: NodeId) -> Option<Bounds> {
        let tf = self.world_transform(id)?;
        let local: Rect = self.node(id).props.local_bounds().into();
        Some(transform_rect_bbox(tf, local).into())
    }

    // --- internals ---

    /// Returns true if `ancestor` is `id` or one of its ancestors.
    pub(crate) fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent_of(n);
        }
        false
    }

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    pub(crate) fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    pub(crate) fn container(&self, id: NodeId) -> Option<&ContainerState> {
        self.node_opt(id)?.container()
    }

    pub(crate) fn container_mut(&mut self, id: NodeId) -> Option<&mut ContainerState> {
        match &mut self.node_opt_mut(id)?.kind {
            NodeKind::Container(c) => Some(c),
            NodeKind::Leaf => None,
        }
    }
}
