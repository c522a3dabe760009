//! Kind → provider routing.
//!
//! Bindings are discovered lazily from `item_kind` answers. The first
//! provider seen answering a kind owns it for the rest of the composite's
//! lifetime; later claims by other providers are ignored.

use crate::collections::map::{HashMap, HashSet};
use crate::{AdapterError, ItemKind, ProviderId, Result};

/// Outcome of [`KindRouter::record_binding`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    /// The kind was unbound and now belongs to the provider.
    New,
    /// The kind was already bound to the same provider.
    Existing,
    /// The kind is bound to `owner`; the claim was ignored.
    Conflict { owner: ProviderId },
}

#[derive(Debug)]
pub struct KindRouter {
    bindings: HashMap<ItemKind, ProviderId>,
    pub(crate) reported_conflicts: HashSet<(ItemKind, ProviderId)>,
    log_conflicts: bool,
}

impl KindRouter {
    pub fn new(log_conflicts: bool) -> Self {
        Self {
            bindings: HashMap::default(),
            reported_conflicts: HashSet::default(),
            log_conflicts,
        }
    }

    /// Returns the provider responsible for creating items of `kind`.
    pub fn route_for_creation(&self, kind: ItemKind) -> Result<ProviderId> {
        self.bindings
            .get(&kind)
            .copied()
            .ok_or(AdapterError::UnresolvedKind { kind })
    }

    /// Binds `kind` to `provider` unless the kind already has an owner.
    pub fn record_binding(&mut self, provider: ProviderId, kind: ItemKind) -> Binding {
        match self.bindings.get(&kind) {
            Some(&owner) if owner == provider => Binding::Existing,
            Some(&owner) => {
                if self.log_conflicts && self.reported_conflicts.insert((kind, provider)) {
                    log::warn!(
                        "{} reported by provider {} is already routed to provider {}; \
                         kinds must be disjoint across providers",
                        kind,
                        provider,
                        owner
                    );
                }
                Binding::Conflict { owner }
            }
            None => {
                log::debug!("routing {} to provider {}", kind, provider);
                self.bindings.insert(kind, provider);
                Binding::New
            }
        }
    }

    pub fn owner_of(&self, kind: ItemKind) -> Option<ProviderId> {
        self.bindings.get(&kind).copied()
    }

    /// Number of kinds bound so far.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KindRouter {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_is_unresolved() {
        let router = KindRouter::new(true);
        assert_eq!(
            router.route_for_creation(ItemKind(2)),
            Err(AdapterError::UnresolvedKind { kind: ItemKind(2) })
        );
    }

    #[test]
    fn test_record_binding_is_idempotent() {
        let mut router = KindRouter::new(true);

        assert_eq!(router.record_binding(ProviderId(0), ItemKind(7)), Binding::New);
        assert_eq!(
            router.record_binding(ProviderId(0), ItemKind(7)),
            Binding::Existing
        );
        assert_eq!(router.len(), 1);
        assert_eq!(router.route_for_creation(ItemKind(7)), Ok(ProviderId(0)));
    }

    #[test]
    fn test_first_writer_wins() {
        let mut router = KindRouter::new(false);
        router.record_binding(ProviderId(0), ItemKind(1));

        assert_eq!(
            router.record_binding(ProviderId(1), ItemKind(1)),
            Binding::Conflict {
                owner: ProviderId(0)
            }
        );
        assert_eq!(router.route_for_creation(ItemKind(1)), Ok(ProviderId(0)));
        assert_eq!(router.owner_of(ItemKind(1)), Some(ProviderId(0)));
    }

    #[test]
    fn test_conflicts_are_reported_once_per_provider() {
        let mut router = KindRouter::new(true);
        router.record_binding(ProviderId(0), ItemKind(1));
        router.record_binding(ProviderId(1), ItemKind(1));
        router.record_binding(ProviderId(1), ItemKind(1));
        router.record_binding(ProviderId(2), ItemKind(1));

        assert_eq!(router.reported_conflicts.len(), 2);
    }

    #[test]
    fn test_silenced_router_tracks_no_conflicts() {
        let mut router = KindRouter::new(false);
        router.record_binding(ProviderId(0), ItemKind(1));

        assert_eq!(
            router.record_binding(ProviderId(1), ItemKind(1)),
            Binding::Conflict {
                owner: ProviderId(0)
            }
        );
        assert!(router.reported_conflicts.is_empty());
    }

    #[test]
    fn test_default_router_reports_conflicts() {
        let mut router = KindRouter::default();
        router.record_binding(ProviderId(0), ItemKind(3));
        router.record_binding(ProviderId(1), ItemKind(3));

        assert_eq!(router.reported_conflicts.len(), 1);
    }
}
