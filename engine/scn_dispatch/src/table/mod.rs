//! A single operation class's dispatch table.
//!
//! Tables live inside a [`DispatchTables`](crate::DispatchTables) arena,
//! which owns the parent links and drives rebuilds in parent-first order.
//! This module holds the per-table state and the rebuild itself.

use scn_types::{TypeHierarchy, TypeId};

use crate::{Behavior, CoveragePolicy, DispatchError, TableId};

/// Lifecycle of a table as seen by lookups.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TableState {
    /// Never rebuilt.
    Empty,

    /// Current: lookups are plain indexing.
    Fresh,

    /// A registration was added, the registry grew, or something up the
    /// parent chain changed. The next lookup rebuilds.
    Stale,
}

/// One explicit `(type, behavior)` registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration<H> {
    /// The registered type; always derived from the table root.
    pub ty: TypeId,

    /// What `ty` and its descendants resolve to.
    pub behavior: Behavior<H>,
}

/// Type-indexed behaviors for one operation class.
#[derive(Clone, Debug)]
pub struct DispatchTable<H> {
    /// Most general type this operation handles; bounds the index space.
    root: TypeId,

    /// Table of the operation class this one inherits from.
    parent: Option<TableId>,

    /// Append-only, in insertion order.
    registrations: Vec<Registration<H>>,

    /// Resolved behaviors indexed by `TypeId`.
    entries: Vec<Behavior<H>>,

    /// `covered[i]`: type `i` is `root` or derives from it.
    covered: Vec<bool>,

    /// Registry type count at the last rebuild; `None` forces a rebuild.
    generation: Option<usize>,

    /// Parent revision the inherited entries were copied from.
    parent_revision: Option<u64>,

    /// Number of completed rebuilds.
    revision: u64,
}

impl<H: Clone> DispatchTable<H> {
    pub(crate) fn new(root: TypeId, parent: Option<TableId>) -> Self {
        Self {
            root,
            parent,
            registrations: Vec::new(),
            entries: Vec::new(),
            covered: Vec::new(),
            generation: None,
            parent_revision: None,
            revision: 0,
        }
    }

    /// Root object type.
    #[inline]
    pub fn root(&self) -> TypeId {
        self.root
    }

    /// Parent table, if this operation class inherits from another.
    #[inline]
    pub fn parent(&self) -> Option<TableId> {
        self.parent
    }

    /// Registrations in insertion order.
    pub fn registrations(&self) -> &[Registration<H>] {
        &self.registrations
    }

    /// Resolved entries as of the last rebuild.
    pub fn entries(&self) -> &[Behavior<H>] {
        &self.entries
    }

    /// Number of slots as of the last rebuild.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no slots (never rebuilt, or empty registry).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of completed rebuilds.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registry type count captured by the last rebuild, `None` if stale.
    #[inline]
    pub fn generation(&self) -> Option<usize> {
        self.generation
    }

    /// Whether the last rebuild covered `ty`.
    #[inline]
    pub fn is_covered(&self, ty: TypeId) -> bool {
        self.covered.get(ty.index()).copied().unwrap_or(false)
    }

    /// Entry for a covered type, as of the last rebuild.
    #[inline]
    pub fn get(&self, ty: TypeId) -> Option<&Behavior<H>> {
        if self.is_covered(ty) {
            self.entries.get(ty.index())
        } else {
            None
        }
    }

    /// Resolve `ty` without rebuilding, applying `policy` to uncovered types.
    pub fn resolve(
        &self,
        ty: TypeId,
        policy: CoveragePolicy,
    ) -> Result<Behavior<H>, DispatchError> {
        if let Some(behavior) = self.get(ty) {
            return Ok(behavior.clone());
        }
        match policy {
            CoveragePolicy::Lenient => {
                Ok(self.entries.get(ty.index()).cloned().unwrap_or_default())
            }
            CoveragePolicy::Strict => Err(DispatchError::UnsupportedType {
                ty,
                root: self.root,
            }),
        }
    }

    pub(crate) fn register(
        &mut self,
        types: &impl TypeHierarchy,
        ty: TypeId,
        behavior: Behavior<H>,
    ) -> Result<(), DispatchError> {
        if !types.is_derived_from(ty, self.root) {
            return Err(DispatchError::InvalidType {
                ty,
                root: self.root,
            });
        }
        self.registrations.push(Registration { ty, behavior });
        self.invalidate();
        Ok(())
    }

    pub(crate) fn set_parent(&mut self, parent: Option<TableId>) {
        self.parent = parent;
        self.invalidate();
    }

    #[inline]
    pub(crate) fn invalidate(&mut self) {
        self.generation = None;
    }

    /// Whether a rebuild is due, given the (already current) parent table.
    pub(crate) fn needs_rebuild(&self, types: &impl TypeHierarchy, parent: Option<&Self>) -> bool {
        self.generation != Some(types.type_count())
            || self.parent_revision != parent.map(Self::revision)
    }

    /// Recompute every entry from scratch.
    ///
    /// `parent` must be the table named by `self.parent`, already up to date.
    /// Returns the number of slots filled from the parent.
    pub(crate) fn rebuild(&mut self, types: &impl TypeHierarchy, parent: Option<&Self>) -> usize {
        self.entries.clear();
        self.covered.clear();

        // Later registrations overwrite earlier ones on every type they
        // reach, including more specific earlier registrations.
        for registration in &self.registrations {
            put(&mut self.entries, registration.ty, &registration.behavior);
            for derived in types.descendants_of(registration.ty) {
                put(&mut self.entries, derived, &registration.behavior);
            }
        }

        let reachable = types.all_derived_from(self.root);
        if let Some(max) = reachable.iter().map(|ty| ty.index()).max() {
            if self.entries.len() <= max {
                self.entries.resize(max + 1, Behavior::Default);
            }
        }
        self.covered.resize(self.entries.len(), false);
        for ty in reachable {
            self.covered[ty.index()] = true;
        }

        self.generation = Some(types.type_count());

        let mut inherited = 0;
        if let Some(parent) = parent {
            // Span at least the parent's slots, so types outside this root
            // resolve leniently the same way whatever their id.
            if self.entries.len() < parent.entries.len() {
                self.entries.resize(parent.entries.len(), Behavior::Default);
                self.covered.resize(parent.entries.len(), false);
            }
            for (slot, from_parent) in self.entries.iter_mut().zip(&parent.entries) {
                if slot.is_default() && !from_parent.is_default() {
                    *slot = from_parent.clone();
                    inherited += 1;
                }
            }
        }
        self.parent_revision = parent.map(Self::revision);
        self.revision += 1;
        inherited
    }
}

/// Set `entries[ty]`, growing with defaults as needed.
fn put<H: Clone>(entries: &mut Vec<Behavior<H>>, ty: TypeId, behavior: &Behavior<H>) {
    let index = ty.index();
    if entries.len() <= index {
        entries.resize(index + 1, Behavior::Default);
    }
    entries[index] = behavior.clone();
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod tests;
