//! Arena of dispatch tables linked into an operation-class hierarchy.
//!
//! Parent links are [`TableId`]s into the same arena: a child references
//! its parent's table, it never owns it. Rebuilds walk the parent chain
//! once, reject cycles, and then refresh root-to-leaf so a child only ever
//! copies from a parent that is already current.

use std::fmt;

use rustc_hash::FxHashSet;
use scn_types::{TypeHierarchy, TypeId};
use smallvec::SmallVec;

use crate::{Behavior, DispatchConfig, DispatchError, DispatchTable, TableState};

/// Handle to a table in a [`DispatchTables`] arena.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct TableId(u32);

impl TableId {
    /// Create an id from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table#{}", self.0)
    }
}

/// Parent chains are short (one or two base operations), so keep them inline.
type Chain = SmallVec<[TableId; 4]>;

/// Every dispatch table sharing one handler signature `H`.
#[derive(Clone, Debug)]
pub struct DispatchTables<H> {
    tables: Vec<DispatchTable<H>>,
    config: DispatchConfig,
}

impl<H: Clone> Default for DispatchTables<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Clone> DispatchTables<H> {
    /// Create an empty arena with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    /// Create an empty arena with an explicit configuration.
    pub fn with_config(config: DispatchConfig) -> Self {
        Self {
            tables: Vec::new(),
            config,
        }
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> DispatchConfig {
        self.config
    }

    /// Number of tables.
    #[inline]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if the arena holds no tables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Look up a table.
    pub fn get(&self, id: TableId) -> Option<&DispatchTable<H>> {
        self.tables.get(id.index())
    }

    /// Create an empty table for an operation class rooted at `root`.
    ///
    /// `root` must be a registered type; `parent` must already exist.
    pub fn create(
        &mut self,
        types: &impl TypeHierarchy,
        root: TypeId,
        parent: Option<TableId>,
    ) -> Result<TableId, DispatchError> {
        if !types.is_derived_from(root, root) {
            return Err(DispatchError::InvalidType { ty: root, root });
        }
        if let Some(parent) = parent {
            self.table(parent)?;
        }
        let raw = u32::try_from(self.tables.len()).unwrap_or(u32::MAX);
        let id = TableId(raw);
        self.tables.push(DispatchTable::new(root, parent));
        tracing::debug!(table = %id, %root, parent = ?parent, "created dispatch table");
        Ok(id)
    }

    /// Re-link `id` under another parent, or detach it.
    ///
    /// Cycles are not rejected here; they surface as
    /// [`DispatchError::CyclicDispatchHierarchy`] on the next rebuild.
    pub fn set_parent(
        &mut self,
        id: TableId,
        parent: Option<TableId>,
    ) -> Result<(), DispatchError> {
        if let Some(parent) = parent {
            self.table(parent)?;
        }
        self.table_mut(id)?.set_parent(parent);
        Ok(())
    }

    /// Append a registration to `id`.
    ///
    /// `ty` must derive from the table's root. Takes effect at the next
    /// rebuild, after every earlier registration.
    pub fn register(
        &mut self,
        id: TableId,
        types: &impl TypeHierarchy,
        ty: TypeId,
        behavior: impl Into<Behavior<H>>,
    ) -> Result<(), DispatchError> {
        self.table_mut(id)?.register(types, ty, behavior.into())?;
        tracing::trace!(table = %id, %ty, "registered dispatch entry");
        Ok(())
    }

    /// Current lifecycle state of `id`, taking its parent chain into account.
    pub fn state(
        &self,
        id: TableId,
        types: &impl TypeHierarchy,
    ) -> Result<TableState, DispatchError> {
        let chain = self.chain(id)?;
        if self.table(id)?.revision() == 0 {
            return Ok(TableState::Empty);
        }
        for &current in &chain {
            let table = &self.tables[current.index()];
            let parent = table.parent().map(|parent| &self.tables[parent.index()]);
            if table.needs_rebuild(types, parent) {
                return Ok(TableState::Stale);
            }
        }
        Ok(TableState::Fresh)
    }

    /// Rebuild `id` and, first, every stale table up its parent chain.
    ///
    /// A no-op when nothing was registered, the registry has not grown and
    /// no parent changed since the last rebuild.
    pub fn ensure_up_to_date(
        &mut self,
        id: TableId,
        types: &impl TypeHierarchy,
    ) -> Result<(), DispatchError> {
        let chain = self.chain(id)?;
        for &current in chain.iter().rev() {
            self.refresh(current, types);
        }
        Ok(())
    }

    /// Resolve `ty` in `id`, rebuilding first if needed.
    ///
    /// Under [`CoveragePolicy::Strict`](crate::CoveragePolicy) a type the
    /// rebuilt table does not cover gets one forced rebuild before the lookup
    /// fails with [`DispatchError::UnsupportedType`].
    pub fn lookup(
        &mut self,
        id: TableId,
        types: &impl TypeHierarchy,
        ty: TypeId,
    ) -> Result<Behavior<H>, DispatchError> {
        self.ensure_up_to_date(id, types)?;
        let policy = self.config.coverage;
        let table = self.table(id)?;
        match table.resolve(ty, policy) {
            Ok(behavior) => Ok(behavior),
            Err(err) => {
                let root = table.root();
                if types.is_derived_from(ty, root) {
                    tracing::debug!(table = %id, %ty, "uncovered type in root, forcing rebuild");
                    self.table_mut(id)?.invalidate();
                    self.ensure_up_to_date(id, types)?;
                    return self.table(id)?.resolve(ty, policy);
                }
                tracing::warn!(table = %id, %ty, %root, "lookup of unsupported type");
                Err(err)
            }
        }
    }

    /// Walk parent links from `id`: `[id, parent, grandparent, ...]`.
    fn chain(&self, id: TableId) -> Result<Chain, DispatchError> {
        let mut chain = Chain::new();
        let mut visited = FxHashSet::default();
        let mut current = Some(id);
        while let Some(table_id) = current {
            if !visited.insert(table_id) {
                tracing::warn!(table = %id, revisited = %table_id, "cyclic dispatch hierarchy");
                return Err(DispatchError::CyclicDispatchHierarchy { table: id });
            }
            chain.push(table_id);
            current = self.table(table_id)?.parent();
        }
        Ok(chain)
    }

    /// Rebuild a single table if it is stale. Its parent must be current.
    fn refresh(&mut self, id: TableId, types: &impl TypeHierarchy) {
        let (table, parent) = match self.tables[id.index()].parent() {
            Some(parent) => {
                let (table, parent) = self.split(id, parent);
                (table, Some(parent))
            }
            None => (&mut self.tables[id.index()], None),
        };
        if !table.needs_rebuild(types, parent) {
            return;
        }
        let inherited = table.rebuild(types, parent);
        tracing::debug!(
            table = %id,
            root = %table.root(),
            types = types.type_count(),
            entries = table.len(),
            registrations = table.registrations().len(),
            inherited,
            "rebuilt dispatch table"
        );
    }

    /// Borrow a child mutably alongside its (distinct) parent.
    fn split(
        &mut self,
        child: TableId,
        parent: TableId,
    ) -> (&mut DispatchTable<H>, &DispatchTable<H>) {
        let (child, parent) = (child.index(), parent.index());
        debug_assert_ne!(child, parent, "self-parent is rejected by chain()");
        if child < parent {
            let (low, high) = self.tables.split_at_mut(parent);
            (&mut low[child], &high[0])
        } else {
            let (low, high) = self.tables.split_at_mut(child);
            (&mut high[0], &low[parent])
        }
    }

    fn table(&self, id: TableId) -> Result<&DispatchTable<H>, DispatchError> {
        self.tables.get(id.index()).ok_or(DispatchError::UnknownTable(id))
    }

    fn table_mut(&mut self, id: TableId) -> Result<&mut DispatchTable<H>, DispatchError> {
        self.tables.get_mut(id.index()).ok_or(DispatchError::UnknownTable(id))
    }
}
