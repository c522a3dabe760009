//! The composite aggregator.
//!
//! [`CompositeAdapter`] stitches registered providers into one virtual list.
//! Provider `n` owns the slice of absolute positions that follows the items
//! of providers `0..n`. The composite translates positions, routes creation
//! by kind, and re-emits child events in absolute space.
//!
//! # Example
//!
//! ```rust,ignore
//! let composite = CompositeAdapter::new();
//! composite.register(people.clone())?;
//! composite.register(messages.clone())?;
//!
//! let kind = composite.kind_at(25)?;
//! let mut handle = composite.create_for(kind, &mut context)?;
//! composite.bind_at(&mut handle, 25)?;
//! ```
//!
//! Register every provider before a host subscribes: providers added to a
//! composite that is already being displayed do not announce their items.

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::forwarder::ChangeForwarder;
use crate::provider::same_allocation;
use crate::{
    AdapterError, ChangeEvent, ChangeObservers, ChangeSubscription, CompositeConfig, ItemKind,
    ItemProvider, KindRouter, LateRegistration, PositionTranslator, ProviderId, Result,
    SharedProvider,
};

/// State shared between a composite and the forwarders of its providers.
pub(crate) struct CompositeInner<Cx, H> {
    providers: RefCell<SmallVec<[SharedProvider<Cx, H>; 4]>>,
    router: RefCell<KindRouter>,
    pub(crate) observers: ChangeObservers,
}

impl<Cx, H> CompositeInner<Cx, H> {
    pub(crate) fn rebase_slot(&self, id: ProviderId, relative: usize) -> Result<usize> {
        let providers = self.providers.borrow();
        PositionTranslator::new(&providers).rebase(id, relative)
    }

    pub(crate) fn rebase_item_slot(&self, id: ProviderId, relative: usize) -> Result<usize> {
        let providers = self.providers.borrow();
        PositionTranslator::new(&providers).rebase_item(id, relative)
    }
}

/// Where an absolute position lives.
pub struct ResolvedPosition<Cx, H> {
    pub provider_id: ProviderId,
    pub provider: SharedProvider<Cx, H>,
    /// Position within `provider`.
    pub relative: usize,
}

impl<Cx, H> std::fmt::Debug for ResolvedPosition<Cx, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedPosition")
            .field("provider_id", &self.provider_id)
            .field("relative", &self.relative)
            .finish_non_exhaustive()
    }
}

/// Presents several providers as one list addressed by absolute position.
pub struct CompositeAdapter<Cx, H> {
    inner: Rc<CompositeInner<Cx, H>>,
    forwarders: RefCell<Vec<ChangeForwarder>>,
    config: CompositeConfig,
}

impl<Cx: 'static, H: 'static> CompositeAdapter<Cx, H> {
    pub fn new() -> Self {
        Self::with_config(CompositeConfig::default())
    }

    pub fn with_config(config: CompositeConfig) -> Self {
        Self {
            inner: Rc::new(CompositeInner {
                providers: RefCell::new(SmallVec::new()),
                router: RefCell::new(KindRouter::new(config.log_kind_collisions)),
                observers: ChangeObservers::new(),
            }),
            forwarders: RefCell::new(Vec::new()),
            config,
        }
    }

    pub fn config(&self) -> &CompositeConfig {
        &self.config
    }

    /// Appends `provider` to the list and starts forwarding its events.
    ///
    /// Registration is append-only; the returned id stays valid for the
    /// composite's lifetime. Registering after the composite gained
    /// observers is governed by [`CompositeConfig::late_registration`].
    pub fn register(&self, provider: SharedProvider<Cx, H>) -> Result<ProviderId> {
        if self.is_attached() {
            match self.config.late_registration {
                LateRegistration::Reject => return Err(AdapterError::LateRegistration),
                LateRegistration::Warn => log::warn!(
                    "provider registered after the composite gained observers; \
                     observers are not told about its items"
                ),
            }
        }

        let id = {
            let mut providers = self.inner.providers.borrow_mut();
            providers.push(Rc::clone(&provider));
            ProviderId(providers.len() - 1)
        };
        let forwarder = ChangeForwarder::install(&self.inner, id, &provider);
        self.forwarders.borrow_mut().push(forwarder);

        log::debug!(
            "registered provider {} with {} items",
            id,
            provider.item_count()
        );
        Ok(id)
    }

    pub fn provider_count(&self) -> usize {
        self.inner.providers.borrow().len()
    }

    pub fn provider(&self, id: ProviderId) -> Option<SharedProvider<Cx, H>> {
        self.inner.providers.borrow().get(id.0).cloned()
    }

    /// Looks up the registration id of `provider` by identity.
    pub fn id_of<P: ?Sized>(&self, provider: &Rc<P>) -> Option<ProviderId> {
        self.inner
            .providers
            .borrow()
            .iter()
            .position(|registered| same_allocation(registered, provider))
            .map(ProviderId)
    }

    /// Sum of the current counts of all providers. Never cached.
    pub fn total_count(&self) -> usize {
        let providers = self.inner.providers.borrow();
        PositionTranslator::new(&providers).total_count()
    }

    /// Finds the provider owning `absolute` and the position within it.
    pub fn resolve(&self, absolute: usize) -> Result<ResolvedPosition<Cx, H>> {
        let providers = self.inner.providers.borrow();
        let (provider_id, relative) = PositionTranslator::new(&providers).resolve(absolute)?;
        Ok(ResolvedPosition {
            provider_id,
            provider: Rc::clone(&providers[provider_id.0]),
            relative,
        })
    }

    /// Maps `relative` within `provider` to an absolute position.
    ///
    /// `relative` may equal the provider's count, naming the insertion point
    /// after its last item.
    pub fn rebase<P: ?Sized>(&self, provider: &Rc<P>, relative: usize) -> Result<usize> {
        let id = self
            .id_of(provider)
            .ok_or(AdapterError::UnregisteredProvider)?;
        self.inner.rebase_slot(id, relative)
    }

    /// Returns the kind at `absolute` and routes that kind to its provider
    /// if no provider claimed it before.
    pub fn kind_at(&self, absolute: usize) -> Result<ItemKind> {
        let resolved = self.resolve(absolute)?;
        let kind = resolved.provider.item_kind(resolved.relative)?;
        self.inner
            .router
            .borrow_mut()
            .record_binding(resolved.provider_id, kind);
        Ok(kind)
    }

    /// Delegates creation to the provider `kind` is routed to.
    ///
    /// The kind must have been seen through [`kind_at`](Self::kind_at) first.
    pub fn create_for(&self, kind: ItemKind, context: &mut Cx) -> Result<H> {
        let id = self.inner.router.borrow().route_for_creation(kind)?;
        let provider = self.provider(id).ok_or(AdapterError::UnregisteredProvider)?;
        provider.create_item(kind, context)
    }

    /// Binds the item at `absolute` into `handle` through its provider.
    pub fn bind_at(&self, handle: &mut H, absolute: usize) -> Result<()> {
        let resolved = self.resolve(absolute)?;
        resolved.provider.bind_item(handle, resolved.relative)
    }

    /// The provider `kind` is routed to, if it has been discovered.
    pub fn kind_owner(&self, kind: ItemKind) -> Option<ProviderId> {
        self.inner.router.borrow().owner_of(kind)
    }

    /// Observes this composite's events, in absolute positions.
    #[must_use = "dropping the subscription unsubscribes the observer"]
    pub fn subscribe(&self, observer: impl Fn(&ChangeEvent) + 'static) -> ChangeSubscription {
        self.inner.observers.subscribe(observer)
    }

    /// True once anything observes this composite.
    pub fn is_attached(&self) -> bool {
        !self.inner.observers.is_empty()
    }
}

impl<Cx: 'static, H: 'static> Default for CompositeAdapter<Cx, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Cx: 'static, H: 'static> ItemProvider for CompositeAdapter<Cx, H> {
    type Context = Cx;
    type Handle = H;

    fn item_count(&self) -> usize {
        self.total_count()
    }

    fn item_kind(&self, index: usize) -> Result<ItemKind> {
        self.kind_at(index)
    }

    fn create_item(&self, kind: ItemKind, context: &mut Cx) -> Result<H> {
        self.create_for(kind, context)
    }

    fn bind_item(&self, handle: &mut H, index: usize) -> Result<()> {
        self.bind_at(handle, index)
    }

    fn observers(&self) -> &ChangeObservers {
        &self.inner.observers
    }
}

impl<Cx, H> std::fmt::Debug for CompositeAdapter<Cx, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeAdapter")
            .field("providers", &self.inner.providers.borrow().len())
            .field("routed_kinds", &self.inner.router.borrow().len())
            .field("observers", &self.inner.observers.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/composite_tests.rs"]
mod tests;
