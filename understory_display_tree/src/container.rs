// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural operations on containers: insertion, removal, reordering, lookup.

use core::cmp::Ordering;

use crate::bounds::Bounds;
use crate::error::TreeError;
use crate::tree::DisplayTree;
use crate::types::{DisplayProps, NodeId, SortProperty};

impl DisplayTree {
    /// Insert `child` into `parent`'s child list at `index`.
    ///
    /// `index` is clamped into `[0, len]`. If `child` is already a child of
    /// `parent` it is moved; moving it to its current index is a no-op. If
    /// `child` belongs to another container it is removed from there first,
    /// so it is never in two lists.
    ///
    /// With autosize enabled, `parent`'s `width`/`height` grow to cover the
    /// child's rectangle. They never shrink.
    ///
    /// Returns `self` for chaining.
    ///
    /// # Errors
    ///
    /// - [`TreeError::StaleNode`] if either id is stale.
    /// - [`TreeError::NotAContainer`] if `parent` is a leaf.
    /// - [`TreeError::WouldCycle`] if `child` is `parent` or one of its ancestors.
    pub fn add_child_at(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: isize,
    ) -> Result<&mut Self, TreeError> {
        if !self.is_alive(child) {
            return Err(TreeError::StaleNode(child));
        }
        let len = match self.container(parent) {
            Some(c) => c.children.len(),
            None if self.is_alive(parent) => return Err(TreeError::NotAContainer(parent)),
            None => return Err(TreeError::StaleNode(parent)),
        };
        if self.is_ancestor_or_self(child, parent) {
            return Err(TreeError::WouldCycle { parent, child });
        }

        let mut index = usize::try_from(index).map_or(0, |i| i.min(len));
        if let Some(current) = self.child_index(parent, child) {
            if current == index {
                return Ok(self);
            }
            let state = self
                .container_mut(parent)
                .ok_or(TreeError::StaleNode(parent))?;
            state.children.remove(current);
            index = index.min(state.children.len());
        } else if let Some(old_parent) = self.parent_of(child) {
            self.remove_child(old_parent, child);
        }

        let state = self
            .container_mut(parent)
            .ok_or(TreeError::StaleNode(parent))?;
        state.children.insert(index, child);
        let autosize = state.autosize;
        self.node_mut(child).parent = Some(parent);
        tracing::trace!(?parent, ?child, index, "add_child_at");

        if autosize {
            let child_rect = self.node(child).props.layout_bounds();
            let props = &mut self.node_mut(parent).props;
            let own = props.layout_bounds();
            let mut rect = Bounds::new(0.0, 0.0, own.width, own.height);
            rect.form_union_with(&child_rect);
            props.width = rect.width;
            props.height = rect.height;
        }
        Ok(self)
    }

    /// Append `children` to `parent` in iteration order.
    ///
    /// Each child goes through [`DisplayTree::add_child_at`] at the next end
    /// index. On error, children before the failing one stay inserted.
    ///
    /// # Errors
    ///
    /// Same as [`DisplayTree::add_child_at`].
    pub fn add_child(
        &mut self,
        parent: NodeId,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<&mut Self, TreeError> {
        let start = self.num_children(parent);
        for (i, child) in children.into_iter().enumerate() {
            let index = isize::try_from(start + i).unwrap_or(isize::MAX);
            self.add_child_at(parent, child, index)?;
        }
        Ok(self)
    }

    /// Remove the child at `index`, clearing its parent link.
    ///
    /// If `parent` is inside the bound stage, the stage's rendering context is
    /// told to release the child first. Returns `false` if `index` is out of
    /// range or `parent` is not a live container.
    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> bool {
        let Some(child) = self.child_at(parent, index) else {
            tracing::debug!(?parent, index, "remove_child_at: out of range");
            return false;
        };
        if self.stage_of(parent).is_some()
            && let Some(stage) = self.stage.as_mut()
        {
            stage.context.release(child);
        }
        self.node_mut(child).parent = None;
        if let Some(state) = self.container_mut(parent) {
            state.children.remove(index);
        }
        tracing::trace!(?parent, ?child, index, "remove_child_at");
        true
    }

    /// Remove `child` from `parent`. Returns `false` if it is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        match self.child_index(parent, child) {
            Some(index) => self.remove_child_at(parent, index),
            None => {
                tracing::debug!(?parent, ?child, "remove_child: not a child");
                false
            }
        }
    }

    /// Remove every child of `parent`, front to back, one at a time.
    pub fn remove_all_children(&mut self, parent: NodeId) {
        while self.num_children(parent) > 0 {
            self.remove_child_at(parent, 0);
        }
    }

    /// The child at `index`, or `None` if out of range.
    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.children_of(parent).get(index).copied()
    }

    /// The index of `child` in `parent`'s child list.
    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children_of(parent).iter().position(|&c| c == child)
    }

    /// Move `child` to `index` within `parent`.
    ///
    /// Does nothing unless `child` is a child of `parent` at a different index.
    /// An index past the end (after the child is taken out) appends.
    pub fn set_child_index(&mut self, parent: NodeId, child: NodeId, index: usize) {
        let Some(old) = self.child_index(parent, child) else {
            tracing::debug!(?parent, ?child, "set_child_index: not a child");
            return;
        };
        if old == index {
            return;
        }
        if let Some(state) = self.container_mut(parent) {
            state.children.remove(old);
            let index = index.min(state.children.len());
            state.children.insert(index, child);
        }
    }

    /// Exchange the positions of two children. Does nothing if either is absent.
    pub fn swap_children(&mut self, parent: NodeId, a: NodeId, b: NodeId) {
        if let (Some(i), Some(j)) = (self.child_index(parent, a), self.child_index(parent, b)) {
            self.swap_children_at(parent, i, j);
        } else {
            tracing::debug!(?parent, ?a, ?b, "swap_children: not both children");
        }
    }

    /// Exchange the children at two indices. Does nothing if either is out of range.
    pub fn swap_children_at(&mut self, parent: NodeId, i: usize, j: usize) {
        if let Some(state) = self.container_mut(parent)
            && i < state.children.len()
            && j < state.children.len()
        {
            state.children.swap(i, j);
        } else {
            tracing::debug!(?parent, i, j, "swap_children_at: out of range");
        }
    }

    /// The first child whose [`DisplayProps::id`] equals `id`.
    pub fn child_by_id(&self, parent: NodeId, id: &str) -> Option<NodeId> {
        self.children_of(parent)
            .iter()
            .copied()
            .find(|&c| self.node(c).props.id == id)
    }

    /// Remove and return the first child whose [`DisplayProps::id`] equals `id`.
    pub fn remove_child_by_id(&mut self, parent: NodeId, id: &str) -> Option<NodeId> {
        let child = self.child_by_id(parent, id)?;
        self.remove_child(parent, child).then_some(child)
    }

    /// Stable-sort `parent`'s children with a comparator over their properties.
    ///
    /// This changes both paint order and picking priority.
    pub fn sort_children_by(
        &mut self,
        parent: NodeId,
        mut compare: impl FnMut(&DisplayProps, &DisplayProps) -> Ordering,
    ) {
        let Some(state) = self.container_mut(parent) else {
            tracing::debug!(?parent, "sort_children_by: not a live container");
            return;
        };
        let mut children = core::mem::take(&mut state.children);
        children.sort_by(|&a, &b| compare(&self.node(a).props, &self.node(b).props));
        if let Some(state) = self.container_mut(parent) {
            state.children = children;
        }
    }

    /// Stable-sort `parent`'s children by a numeric property, largest first.
    pub fn sort_children_by_property(&mut self, parent: NodeId, property: SortProperty) {
        self.sort_children_by(parent, |a, b| {
            property.read(b).total_cmp(&property.read(a))
        });
    }

    /// Whether `child` is a direct child of `parent`.
    pub fn contains(&self, parent: NodeId, child: NodeId) -> bool {
        self.child_index(parent, child).is_some()
    }

    /// Number of direct children; zero for leaves and stale ids.
    pub fn num_children(&self, parent: NodeId) -> usize {
        self.children_of(parent).len()
    }
}
