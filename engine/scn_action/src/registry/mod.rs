//! Registry of action classes.
//!
//! # Design
//!
//! - One [`DispatchTables`] arena per registry, one table per class
//! - Class inheritance is a table parent link, nothing more
//! - The type registry is an explicit [`SharedTypeRegistry`] handle, read
//!   locked only for the duration of a rebuild or lookup

use std::fmt;

use rustc_hash::FxHashMap;
use scn_dispatch::{
    Behavior, DispatchConfig, DispatchError, DispatchTable, DispatchTables, TableId,
};
use scn_types::{SharedTypeRegistry, TypeId};

use crate::{ActionContext, ActionError, ActionMethod, NodeId, SceneGraph};

/// Handle to an action class in an [`ActionRegistry`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct ActionClassId(u32);

impl ActionClassId {
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

impl fmt::Display for ActionClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action#{}", self.0)
    }
}

/// A defined action class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionClass {
    /// Class name, unique within the registry.
    pub name: String,

    /// Most general object type the action applies to.
    pub root_type: TypeId,

    /// Base class this one inherits methods from.
    pub parent: Option<ActionClassId>,

    /// The class's dispatch table.
    pub table: TableId,
}

/// Action classes sharing one state type `S`.
pub struct ActionRegistry<S> {
    types: SharedTypeRegistry,
    classes: Vec<ActionClass>,
    by_name: FxHashMap<String, ActionClassId>,
    tables: DispatchTables<ActionMethod<S>>,
}

impl<S> ActionRegistry<S> {
    /// Create a registry with the default dispatch configuration.
    pub fn new(types: SharedTypeRegistry) -> Self {
        Self::with_config(types, DispatchConfig::default())
    }

    /// Create a registry with an explicit dispatch configuration.
    pub fn with_config(types: SharedTypeRegistry, config: DispatchConfig) -> Self {
        Self {
            types,
            classes: Vec::new(),
            by_name: FxHashMap::default(),
            tables: DispatchTables::with_config(config),
        }
    }

    /// The type registry handle this registry resolves against.
    pub fn types(&self) -> &SharedTypeRegistry {
        &self.types
    }

    /// Define a new action class.
    ///
    /// `root_type` bounds which node types the class may register methods
    /// for and be applied to. With a `parent`, every type the new class does
    /// not handle itself is looked up in the parent class.
    pub fn define_class(
        &mut self,
        name: &str,
        root_type: TypeId,
        parent: Option<ActionClassId>,
    ) -> Result<ActionClassId, ActionError> {
        if self.by_name.contains_key(name) {
            return Err(ActionError::DuplicateClass(name.to_owned()));
        }
        let parent_table = parent
            .map(|parent| self.entry(parent).map(|class| class.table))
            .transpose()?;
        let table = {
            let types = self.types.read();
            self.tables.create(&*types, root_type, parent_table)?
        };

        let id = ActionClassId(u32::try_from(self.classes.len()).unwrap_or(u32::MAX));
        self.classes.push(ActionClass {
            name: name.to_owned(),
            root_type,
            parent,
            table,
        });
        self.by_name.insert(name.to_owned(), id);
        tracing::debug!(class = name, %id, %root_type, parent = ?parent, "defined action class");
        Ok(id)
    }

    /// Register `method` for `ty` and all its subtypes in `class`.
    ///
    /// Registration order matters: a later registration for a supertype
    /// overrides earlier ones for its subtypes.
    pub fn add_method(
        &mut self,
        class: ActionClassId,
        ty: TypeId,
        method: ActionMethod<S>,
    ) -> Result<(), ActionError> {
        let table = self.entry(class)?.table;
        let types = self.types.read();
        self.tables.register(table, &*types, ty, method)?;
        Ok(())
    }

    /// Make `class` inherit from `parent`, or from nothing.
    pub fn set_parent(
        &mut self,
        class: ActionClassId,
        parent: Option<ActionClassId>,
    ) -> Result<(), ActionError> {
        let table = self.entry(class)?.table;
        let parent_table = parent
            .map(|parent| self.entry(parent).map(|class| class.table))
            .transpose()?;
        self.tables.set_parent(table, parent_table)?;
        self.classes[class.index()].parent = parent;
        Ok(())
    }

    /// Resolve the behavior of `class` for objects of type `ty`.
    pub fn lookup(
        &mut self,
        class: ActionClassId,
        ty: TypeId,
    ) -> Result<Behavior<ActionMethod<S>>, ActionError> {
        let table = self.entry(class)?.table;
        let types = self.types.read();
        Ok(self.tables.lookup(table, &*types, ty)?)
    }

    /// Apply `class` to the subgraph rooted at `node`.
    #[tracing::instrument(level = "debug", skip_all, fields(class = %class, node = %node))]
    pub fn apply(
        &mut self,
        class: ActionClassId,
        graph: &SceneGraph,
        node: NodeId,
        state: &mut S,
    ) -> Result<(), ActionError> {
        let table_id = self.entry(class)?.table;
        {
            let types = self.types.read();
            self.tables.ensure_up_to_date(table_id, &*types)?;
        }
        let table = self
            .tables
            .get(table_id)
            .ok_or(DispatchError::UnknownTable(table_id))?;
        let class_name = self.classes[class.index()].name.as_str();

        let policy = self.tables.config().coverage;
        let mut ctx = ActionContext::new(class_name, table, policy, graph, state);
        ctx.traverse(node)
    }

    /// Look up a class by name.
    pub fn class_by_name(&self, name: &str) -> Option<ActionClassId> {
        self.by_name.get(name).copied()
    }

    /// Look up a class.
    pub fn class(&self, id: ActionClassId) -> Option<&ActionClass> {
        self.classes.get(id.index())
    }

    /// The dispatch table of a class, as of its last rebuild.
    pub fn table(&self, id: ActionClassId) -> Option<&DispatchTable<ActionMethod<S>>> {
        self.class(id).and_then(|class| self.tables.get(class.table))
    }

    /// Number of defined classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if no classes are defined.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn entry(&self, id: ActionClassId) -> Result<&ActionClass, ActionError> {
        self.classes.get(id.index()).ok_or(ActionError::UnknownClass(id))
    }
}
