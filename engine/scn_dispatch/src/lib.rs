//! Runtime type-indexed dispatch tables.
//!
//! Every operation class (render, bounding box, search, ...) owns one
//! [`DispatchTable`] mapping object [`TypeId`](scn_types::TypeId)s to a
//! [`Behavior`]. The type universe is open, so tables are caches: they are
//! rebuilt lazily whenever a registration was added or the type registry
//! grew, and are O(1) to query in between.
//!
//! # Rebuild order
//!
//! Registrations are replayed in insertion order, and each one overwrites
//! its type *and every descendant*. The last registration whose type is an
//! ancestor-or-self of `T` therefore decides `T`, however specific earlier
//! registrations were. Register supertypes before subtypes.
//!
//! Slots left at [`Behavior::Default`] are then filled from the parent table,
//! which is always brought up to date first.

mod behavior;
mod config;
mod error;
mod table;
mod tables;

pub use behavior::Behavior;
pub use config::{CoveragePolicy, DispatchConfig};
pub use error::DispatchError;
pub use table::{DispatchTable, Registration, TableState};
pub use tables::{DispatchTables, TableId};
