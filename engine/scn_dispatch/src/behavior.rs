//! Table entries.

/// What a dispatch table resolves an object type to.
///
/// `H` is the handler type of the operation class, typically a `fn` pointer
/// with the class's fixed signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Behavior<H> {
    /// No operation-specific handling. Invoking it does nothing.
    Default,

    /// A registered handler.
    Method(H),
}

impl<H> Behavior<H> {
    /// Whether this is the no-op default.
    #[inline]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// The handler, if any.
    #[inline]
    pub const fn method(&self) -> Option<&H> {
        match self {
            Self::Default => None,
            Self::Method(handler) => Some(handler),
        }
    }
}

impl<H> Default for Behavior<H> {
    fn default() -> Self {
        Self::Default
    }
}

impl<H> From<H> for Behavior<H> {
    fn from(handler: H) -> Self {
        Self::Method(handler)
    }
}
