//! Object types for the scenic scene graph.
//!
//! The type universe is open: extensions register new node types long after
//! the built-in ones exist, so everything that depends on "the set of types"
//! (dispatch tables in particular) queries it at runtime through the
//! [`TypeHierarchy`] contract instead of baking it in at compile time.
//!
//! # Layout
//!
//! - [`TypeId`]: dense 32-bit handle, never reused or renumbered
//! - [`TypeRegistry`]: the concrete, append-only catalog of types
//! - [`SharedTypeRegistry`]: explicit handle passed to every consumer
//! - [`TypeHierarchy`]: the query surface consumers depend on

mod error;
mod hierarchy;
mod registry;
mod shared;
mod type_id;

pub use error::TypeError;
pub use hierarchy::TypeHierarchy;
pub use registry::{TypeEntry, TypeRegistry};
pub use shared::SharedTypeRegistry;
pub use type_id::TypeId;
