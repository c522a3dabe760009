use crate::{ItemKind, ProviderId};
use thiserror::Error;

/// Errors surfaced by providers and by the composite.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// An absolute (or leaf-provider) position outside `[0, total)`.
    #[error("position {position} is out of range for {total} items")]
    PositionOutOfRange { position: usize, total: usize },

    /// A relative position outside `[0, count]` passed to a rebase.
    #[error("relative position {position} is out of range for provider {provider} with {count} items")]
    RelativeOutOfRange {
        provider: ProviderId,
        position: usize,
        count: usize,
    },

    #[error("provider is not registered with this composite")]
    UnregisteredProvider,

    /// Creation requested for a kind no provider has reported yet.
    #[error("{kind} has not been discovered; query item_kind before create_item")]
    UnresolvedKind { kind: ItemKind },

    #[error("provider does not produce {kind}")]
    UnsupportedKind { kind: ItemKind },

    #[error("composite already has observers; late registration is rejected")]
    LateRegistration,
}

impl AdapterError {
    pub fn out_of_range(position: usize, total: usize) -> Self {
        AdapterError::PositionOutOfRange { position, total }
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            AdapterError::PositionOutOfRange { .. } | AdapterError::RelativeOutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;
