//! Dispatch errors.
//!
//! All of these are programmer or configuration errors: applying an
//! operation to the wrong object category, or wiring operation classes
//! into a loop. None is swallowed; they propagate to whoever registered or
//! looked up.

use scn_types::TypeId;

use crate::TableId;

/// Error raised by dispatch table registration, rebuild or lookup.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// A registration (or a table root) names a type outside the table's
    /// root object type.
    #[error("{ty} is not derived from the table root {root}")]
    InvalidType { ty: TypeId, root: TypeId },

    /// A strict lookup hit a type the table does not cover.
    #[error("no dispatch entry for {ty}: not derived from the table root {root}")]
    UnsupportedType { ty: TypeId, root: TypeId },

    /// Following parent links from `table` leads back to an already
    /// visited table.
    #[error("dispatch table {table} reaches itself through its parent links")]
    CyclicDispatchHierarchy { table: TableId },

    /// The table id was not issued by this arena.
    #[error("unknown dispatch table {0}")]
    UnknownTable(TableId),
}
