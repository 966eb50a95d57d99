//! Action errors.

use scn_dispatch::DispatchError;

use crate::{ActionClassId, NodeId};

/// Error raised while defining action classes or applying an action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Registration, rebuild or lookup in a dispatch table failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// An action class with this name already exists.
    #[error("action class `{0}` is already defined")]
    DuplicateClass(String),

    /// The class id was not issued by this registry.
    #[error("unknown action class {0}")]
    UnknownClass(ActionClassId),

    /// The node id does not belong to the scene graph.
    #[error("unknown scene node {0}")]
    UnknownNode(NodeId),

    /// Linking `child` under `parent` would make the graph cyclic.
    #[error("adding {child} under {parent} would create a cycle")]
    CyclicGraph { parent: NodeId, child: NodeId },

    /// A method reported a failure at a node.
    #[error("{class} failed at {node}: {message}")]
    Method {
        class: String,
        node: NodeId,
        message: String,
    },
}
