//! Append-only catalog of object types.
//!
//! # Design
//!
//! - Dense storage: `entries[id.index()]` is the entry for `id`
//! - Name index in an `FxHashMap` for O(1) lookup by name
//! - Child lists stored inline per entry so "all derived from" is a plain
//!   downward walk, no scan of the whole registry

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{TypeError, TypeHierarchy, TypeId};

/// Registry of every object type known to the process.
///
/// Types are only ever added. Several unrelated roots may coexist (for
/// example a node hierarchy and an engine hierarchy).
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    /// Entries indexed by `TypeId`.
    entries: Vec<TypeEntry>,

    /// Name -> id.
    by_name: FxHashMap<String, TypeId>,
}

/// A registered object type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeEntry {
    /// The type name, unique within the registry.
    pub name: String,

    /// Id of this type.
    pub id: TypeId,

    /// Direct parent type, `None` for a hierarchy root.
    pub parent: Option<TypeId>,

    /// Direct subtypes in registration order.
    children: SmallVec<[TypeId; 4]>,
}

impl TypeEntry {
    /// Direct subtypes in registration order.
    pub fn children(&self) -> &[TypeId] {
        &self.children
    }
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new type under `parent` (or as a new root).
    ///
    /// Returns the freshly issued id, which is always equal to the previous
    /// type count.
    pub fn register_type(
        &mut self,
        name: &str,
        parent: Option<TypeId>,
    ) -> Result<TypeId, TypeError> {
        if let Some(&existing) = self.by_name.get(name) {
            return Err(TypeError::DuplicateName {
                name: name.to_owned(),
                existing,
            });
        }
        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(TypeError::UnknownParent {
                    name: name.to_owned(),
                    parent,
                });
            }
        }

        let raw = u32::try_from(self.entries.len()).map_err(|_| TypeError::Overflow)?;
        let id = TypeId::from_raw(raw);
        if id.is_bad() {
            return Err(TypeError::Overflow);
        }

        if let Some(parent) = parent {
            self.entries[parent.index()].children.push(id);
        }
        self.entries.push(TypeEntry {
            name: name.to_owned(),
            id,
            parent,
            children: SmallVec::new(),
        });
        self.by_name.insert(name.to_owned(), id);

        tracing::trace!(%id, name, parent = ?parent, "registered type");
        Ok(id)
    }

    /// Whether `id` was issued by this registry.
    #[inline]
    pub fn contains(&self, id: TypeId) -> bool {
        id.index() < self.entries.len()
    }

    /// Look up an entry by id.
    pub fn get(&self, id: TypeId) -> Option<&TypeEntry> {
        self.entries.get(id.index())
    }

    /// Look up a type by name.
    pub fn from_name(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Name of a type.
    pub fn name(&self, id: TypeId) -> Option<&str> {
        self.get(id).map(|entry| entry.name.as_str())
    }

    /// Direct parent of a type.
    pub fn parent(&self, id: TypeId) -> Option<TypeId> {
        self.get(id).and_then(|entry| entry.parent)
    }

    /// Direct subtypes of a type. Empty for unknown ids.
    pub fn children(&self, id: TypeId) -> &[TypeId] {
        self.get(id).map(TypeEntry::children).unwrap_or_default()
    }

    /// Number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no types are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeEntry> {
        self.entries.iter()
    }
}

impl TypeHierarchy for TypeRegistry {
    fn type_count(&self) -> usize {
        self.entries.len()
    }

    fn is_derived_from(&self, ty: TypeId, ancestor: TypeId) -> bool {
        if !self.contains(ancestor) {
            return false;
        }
        let mut current = Some(ty).filter(|&ty| self.contains(ty));
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn all_derived_from(&self, ancestor: TypeId) -> Vec<TypeId> {
        if !self.contains(ancestor) {
            return Vec::new();
        }
        let mut found = Vec::new();
        let mut stack = vec![ancestor];
        while let Some(id) = stack.pop() {
            found.push(id);
            stack.extend_from_slice(self.children(id));
        }
        found
    }
}
