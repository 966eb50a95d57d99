//! Query contract over the object-type hierarchy.

use crate::TypeId;

/// Read-only queries a dispatch table needs from the type registry.
///
/// Implementations must hand out dense ids and never renumber them; the
/// type count only ever grows.
pub trait TypeHierarchy {
    /// Number of types registered so far.
    fn type_count(&self) -> usize;

    /// Whether `ty` is `ancestor` or one of its (transitive) subtypes.
    ///
    /// Unknown ids are derived from nothing.
    fn is_derived_from(&self, ty: TypeId, ancestor: TypeId) -> bool;

    /// `ancestor` and every type currently derived from it.
    ///
    /// Iteration order is unspecified. Empty if `ancestor` is unknown.
    fn all_derived_from(&self, ancestor: TypeId) -> Vec<TypeId>;

    /// Like [`all_derived_from`](Self::all_derived_from), without `ancestor` itself.
    fn descendants_of(&self, ancestor: TypeId) -> Vec<TypeId> {
        let mut types = self.all_derived_from(ancestor);
        types.retain(|&ty| ty != ancestor);
        types
    }
}
