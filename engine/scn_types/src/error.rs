//! Type registration errors.

use crate::TypeId;

/// Error when registering a new object type fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// A type with this name already exists.
    #[error("type `{name}` is already registered as {existing}")]
    DuplicateName { name: String, existing: TypeId },

    /// The requested parent type was never registered.
    #[error("parent {parent} of type `{name}` is not registered")]
    UnknownParent { name: String, parent: TypeId },

    /// The registry ran out of 32-bit ids.
    #[error("type registry exceeded u32::MAX types")]
    Overflow,
}
