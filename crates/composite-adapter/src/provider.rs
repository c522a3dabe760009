//! The item provider contract.
//!
//! This module defines the [`ItemProvider`] trait which every collection
//! composed into a [`CompositeAdapter`](crate::CompositeAdapter) implements.
//! The composite implements it too, so composites nest.

use std::rc::Rc;

use crate::{ChangeObservers, ItemKind, Result};

/// An indexed, observable item collection.
///
/// Positions passed to a provider are relative to that provider and lie in
/// `[0, item_count())`. Items are owned by the provider; callers mutate them
/// through the provider's own API, which must report every structural change
/// through [`observers`](ItemProvider::observers) once the change is fully
/// applied.
pub trait ItemProvider {
    /// Context handed to [`create_item`](ItemProvider::create_item) by the
    /// rendering host. Opaque to the composite.
    type Context;

    /// Visual handle produced by the provider and later bound to items.
    /// Opaque to the composite.
    type Handle;

    /// The current number of items.
    fn item_count(&self) -> usize;

    /// Returns the kind of the item at `index`.
    ///
    /// Each provider declares kinds per position instead of the host
    /// inspecting item types.
    fn item_kind(&self, index: usize) -> Result<ItemKind>;

    /// Creates a handle able to display items of `kind`.
    fn create_item(&self, kind: ItemKind, context: &mut Self::Context) -> Result<Self::Handle>;

    /// Binds the item at `index` into `handle`.
    fn bind_item(&self, handle: &mut Self::Handle, index: usize) -> Result<()>;

    /// Registry notified of this provider's structural changes.
    fn observers(&self) -> &ChangeObservers;
}

/// Shared handle to a provider, as held by a composite.
pub type SharedProvider<Cx, H> = Rc<dyn ItemProvider<Context = Cx, Handle = H>>;

/// Identity comparison for providers behind `Rc`, sized or not.
///
/// Compares data pointers only; vtable pointers for the same type may differ
/// across codegen units.
#[inline]
pub(crate) fn same_allocation<A: ?Sized, B: ?Sized>(a: &Rc<A>, b: &Rc<B>) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}
