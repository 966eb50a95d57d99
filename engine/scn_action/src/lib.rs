//! Actions over the scenic scene graph.
//!
//! An *action class* is one kind of traversal (render, bounding box,
//! search, ...). Each class owns a dispatch table from object type to
//! [`ActionMethod`] and may inherit from one base class, falling back to the
//! base's methods for every type it does not override.
//!
//! The object-type hierarchy (in [`scn_types`]) and the action-class
//! hierarchy (here) are independent: the first decides which registration
//! reaches which node type, the second decides where unhandled types are
//! looked up next.

mod context;
mod error;
mod graph;
mod registry;
mod tracing_setup;

pub use context::{traverse_children, ActionContext, ActionMethod};
pub use error::ActionError;
pub use graph::{Node, NodeId, SceneGraph};
pub use registry::{ActionClass, ActionClassId, ActionRegistry};
pub use tracing_setup::init_tracing;
