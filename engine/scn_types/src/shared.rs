//! Shared handle to the process type registry.

// Arc is needed here: the registry is constructed once by the host and the
// same handle is passed to every operation class that owns a dispatch table.
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{TypeError, TypeId, TypeRegistry};

/// Cloneable handle to a [`TypeRegistry`].
///
/// Dispatch tables never reach for a global registry; whoever owns a table
/// is given one of these explicitly.
#[derive(Clone, Debug, Default)]
pub struct SharedTypeRegistry(Arc<RwLock<TypeRegistry>>);

impl SharedTypeRegistry {
    /// Wrap an existing registry.
    pub fn new(registry: TypeRegistry) -> Self {
        Self(Arc::new(RwLock::new(registry)))
    }

    /// Acquire a read guard for queries.
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.0.read()
    }

    /// Acquire a write guard.
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.0.write()
    }

    /// Register a type through the handle.
    pub fn register_type(&self, name: &str, parent: Option<TypeId>) -> Result<TypeId, TypeError> {
        self.0.write().register_type(name, parent)
    }

    /// Look up a type by name through the handle.
    pub fn from_name(&self, name: &str) -> Option<TypeId> {
        self.0.read().from_name(name)
    }
}
