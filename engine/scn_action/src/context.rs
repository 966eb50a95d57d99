//! The traversal driver.
//!
//! [`ActionRegistry::apply`](crate::ActionRegistry::apply) brings the
//! action's dispatch table up to date once and then hands an
//! [`ActionContext`] to the method of each visited node. Group-like methods
//! recurse through [`ActionContext::traverse`], so the table stays borrowed
//! read-only for the whole traversal.

use scn_dispatch::{Behavior, CoveragePolicy, DispatchTable};

use crate::{ActionError, Node, NodeId, SceneGraph};

/// Signature of every method registered for an action class.
///
/// `S` is the action's mutable state (a render list, a bounding box
/// accumulator, search results, ...).
pub type ActionMethod<S> = fn(&mut ActionContext<'_, S>, NodeId) -> Result<(), ActionError>;

/// State of one running action.
pub struct ActionContext<'a, S> {
    class_name: &'a str,
    table: &'a DispatchTable<ActionMethod<S>>,
    policy: CoveragePolicy,
    graph: &'a SceneGraph,
    state: &'a mut S,
    path: Vec<NodeId>,
    terminated: bool,
}

impl<'a, S> ActionContext<'a, S> {
    pub(crate) fn new(
        class_name: &'a str,
        table: &'a DispatchTable<ActionMethod<S>>,
        policy: CoveragePolicy,
        graph: &'a SceneGraph,
        state: &'a mut S,
    ) -> Self {
        Self {
            class_name,
            table,
            policy,
            graph,
            state,
            path: Vec::new(),
            terminated: false,
        }
    }

    /// Dispatch `node` to the method its type resolves to.
    ///
    /// Nodes whose type resolves to [`Behavior::Default`] are skipped.
    pub fn traverse(&mut self, node: NodeId) -> Result<(), ActionError> {
        if self.terminated {
            return Ok(());
        }
        let type_id = self.node(node)?.type_id;
        let behavior = self.table.resolve(type_id, self.policy)?;
        tracing::trace!(
            action = self.class_name,
            %node,
            %type_id,
            handled = !behavior.is_default(),
            "visit"
        );

        let Behavior::Method(method) = behavior else {
            return Ok(());
        };
        self.path.push(node);
        let result = method(self, node);
        self.path.pop();
        result
    }

    /// Traverse each child of `node` in order, stopping early on
    /// termination or error.
    pub fn traverse_children(&mut self, node: NodeId) -> Result<(), ActionError> {
        let graph = self.graph;
        for &child in graph.children(node) {
            if self.terminated {
                break;
            }
            self.traverse(child)?;
        }
        Ok(())
    }

    /// Stop the traversal after the current method returns.
    pub fn terminate(&mut self) {
        self.terminated = true;
    }

    /// Whether [`terminate`](Self::terminate) was called.
    pub fn has_terminated(&self) -> bool {
        self.terminated
    }

    /// The action's state.
    pub fn state(&mut self) -> &mut S {
        self.state
    }

    /// The graph being traversed.
    pub fn graph(&self) -> &'a SceneGraph {
        self.graph
    }

    /// Look up a node of the traversed graph.
    pub fn node(&self, id: NodeId) -> Result<&'a Node, ActionError> {
        self.graph.node(id).ok_or(ActionError::UnknownNode(id))
    }

    /// Nodes from the traversal root down to the node being visited.
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Name of the running action class.
    pub fn class_name(&self) -> &'a str {
        self.class_name
    }

    /// Build a [`ActionError::Method`] attributed to this action.
    pub fn fail(&self, node: NodeId, message: impl Into<String>) -> ActionError {
        ActionError::Method {
            class: self.class_name.to_owned(),
            node,
            message: message.into(),
        }
    }
}

/// Stock method for grouping nodes: visit every child in order.
pub fn traverse_children<S>(
    ctx: &mut ActionContext<'_, S>,
    node: NodeId,
) -> Result<(), ActionError> {
    ctx.traverse_children(node)
}
