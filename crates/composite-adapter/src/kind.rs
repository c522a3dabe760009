use std::fmt;

/// Tag distinguishing item categories produced by providers.
///
/// Kinds are runtime values chosen by each provider. The composite routes
/// creation calls by kind, so kinds must be disjoint across the providers
/// registered with one composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemKind(pub u64);

impl ItemKind {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ItemKind {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kind({})", self.0)
    }
}

/// Registration index of a provider within one composite.
///
/// Registration is append-only, so an id stays valid for the lifetime of
/// the composite that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProviderId(pub(crate) usize);

impl ProviderId {
    /// The id of the `index`-th registered provider.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
