//! Dense object-type handle.
//!
//! Type ids are handed out in registration order starting at zero, which is
//! what lets dispatch tables index a plain `Vec` by `TypeId`.

use std::fmt;

/// A 32-bit index into the type registry.
///
/// Ids are never reused or renumbered, so an id issued before a dispatch
/// table was rebuilt stays a valid index afterwards.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// Sentinel for "no such type".
    ///
    /// The registry never issues this value, so it is never derived from
    /// anything and never covered by a dispatch table.
    pub const BAD: Self = Self(u32::MAX);

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

    /// Position of this type in dense, type-indexed storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is the BAD sentinel.
    #[inline]
    pub const fn is_bad(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bad() {
            write!(f, "TypeId::BAD")
        } else {
            write!(f, "TypeId({})", self.0)
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bad() {
            write!(f, "<bad type>")
        } else {
            write!(f, "type#{}", self.0)
        }
    }
}

const _: () = assert!(std::mem::size_of::<TypeId>() == 4);
