//! Scene graph storage.
//!
//! Nodes live in one arena and refer to their children by [`NodeId`]. A node
//! may be the child of several parents (instancing); traversal simply visits
//! it once per reference. The graph is kept acyclic: [`SceneGraph::add_child`]
//! rejects links that would let a node reach itself.

use std::fmt;

use rustc_hash::FxHashSet;
use scn_types::TypeId;

use crate::ActionError;

/// Handle to a node in a [`SceneGraph`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Create an id from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A scene graph node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Node name, not necessarily unique.
    pub name: String,

    /// Runtime object type; selects the method each action runs.
    pub type_id: TypeId,

    children: Vec<NodeId>,
}

impl Node {
    /// Child nodes in traversal order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena of scene nodes.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detached node.
    pub fn add_node(&mut self, name: &str, type_id: TypeId) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Node {
            name: name.to_owned(),
            type_id,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` to `parent`'s children.
    ///
    /// Fails with [`ActionError::CyclicGraph`] if `parent` is `child` or one
    /// of its descendants.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), ActionError> {
        if self.node(child).is_none() {
            return Err(ActionError::UnknownNode(child));
        }
        if self.reaches(child, parent) {
            tracing::warn!(%parent, %child, "rejected cyclic scene link");
            return Err(ActionError::CyclicGraph { parent, child });
        }
        self.nodes
            .get_mut(parent.index())
            .ok_or(ActionError::UnknownNode(parent))?
            .children
            .push(child);
        Ok(())
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Children of a node. Empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or_default()
    }

    /// Whether `to` is `from` or one of its descendants.
    fn reaches(&self, from: NodeId, to: NodeId) -> bool {
        let mut visited = FxHashSet::default();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if id == to {
                return true;
            }
            if visited.insert(id) {
                stack.extend_from_slice(self.children(id));
            }
        }
        false
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
