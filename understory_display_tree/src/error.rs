// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors for structural operations that would break the tree's invariants.

use crate::types::NodeId;

/// Rejected structural change.
///
/// Queries and removals report absence through `Option`/`bool` instead; this
/// type is only returned by insertion paths.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// The identifier refers to a node that has been disposed.
    #[error("node {0:?} is not alive")]
    StaleNode(NodeId),
    /// The target parent is a leaf and cannot own children.
    #[error("node {0:?} is not a container")]
    NotAContainer(NodeId),
    /// Inserting `child` under `parent` would make a node its own ancestor.
    #[error("adding {child:?} under {parent:?} would create a cycle")]
    WouldCycle {
        /// The container that was asked to adopt `child`.
        parent: NodeId,
        /// The node being inserted.
        child: NodeId,
    },
}
