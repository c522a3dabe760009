//! Structural change notifications.
//!
//! Every provider owns a [`ChangeObservers`] registry and reports its
//! mutations through it. Subscribers receive [`ChangeEvent`]s synchronously,
//! in the order the provider emits them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A structural change to a provider's items.
///
/// Positions are expressed in the index space of whoever emits the event:
/// relative for a leaf provider, absolute for a composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Everything may have changed; previous positions are meaningless.
    Invalidated,
    RangeChanged { start: usize, count: usize },
    RangeInserted { start: usize, count: usize },
    RangeRemoved { start: usize, count: usize },
    /// `count` items moved from `from` to `to`.
    RangeMoved { from: usize, to: usize, count: usize },
}

impl ChangeEvent {
    /// Rewrites every position carried by the event through `map`.
    ///
    /// `Invalidated` carries no position and is returned unchanged.
    pub fn try_map_positions<E>(
        self,
        mut map: impl FnMut(usize) -> Result<usize, E>,
    ) -> Result<Self, E> {
        Ok(match self {
            ChangeEvent::Invalidated => ChangeEvent::Invalidated,
            ChangeEvent::RangeChanged { start, count } => ChangeEvent::RangeChanged {
                start: map(start)?,
                count,
            },
            ChangeEvent::RangeInserted { start, count } => ChangeEvent::RangeInserted {
                start: map(start)?,
                count,
            },
            ChangeEvent::RangeRemoved { start, count } => ChangeEvent::RangeRemoved {
                start: map(start)?,
                count,
            },
            ChangeEvent::RangeMoved { from, to, count } => ChangeEvent::RangeMoved {
                from: map(from)?,
                to: map(to)?,
                count,
            },
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ObserverId(u64);

type ObserverFn = Rc<dyn Fn(&ChangeEvent)>;

#[derive(Default)]
struct ObserverSlots {
    next_id: u64,
    entries: Vec<(ObserverId, ObserverFn)>,
}

impl ObserverSlots {
    fn insert(&mut self, observer: ObserverFn) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    fn remove(&mut self, id: ObserverId) {
        self.entries.retain(|(entry, _)| *entry != id);
    }
}

/// Observer registry embedded in every provider.
pub struct ChangeObservers {
    slots: Rc<RefCell<ObserverSlots>>,
}

impl ChangeObservers {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(ObserverSlots::default())),
        }
    }

    /// Registers `observer`. It stays subscribed until the returned
    /// subscription is dropped or cancelled.
    #[must_use = "dropping the subscription unsubscribes the observer"]
    pub fn subscribe(&self, observer: impl Fn(&ChangeEvent) + 'static) -> ChangeSubscription {
        let id = self.slots.borrow_mut().insert(Rc::new(observer));
        ChangeSubscription {
            slots: Rc::downgrade(&self.slots),
            id: Some(id),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().entries.is_empty()
    }

    /// Delivers `event` to every current observer.
    ///
    /// The observer list is snapshotted first, so observers may subscribe
    /// or unsubscribe while being notified.
    pub fn notify(&self, event: ChangeEvent) {
        let snapshot: Vec<ObserverFn> = self
            .slots
            .borrow()
            .entries
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in snapshot {
            observer(&event);
        }
    }

    pub fn notify_invalidated(&self) {
        self.notify(ChangeEvent::Invalidated);
    }

    pub fn notify_range_changed(&self, start: usize, count: usize) {
        self.notify(ChangeEvent::RangeChanged { start, count });
    }

    pub fn notify_range_inserted(&self, start: usize, count: usize) {
        self.notify(ChangeEvent::RangeInserted { start, count });
    }

    pub fn notify_range_removed(&self, start: usize, count: usize) {
        self.notify(ChangeEvent::RangeRemoved { start, count });
    }

    pub fn notify_range_moved(&self, from: usize, to: usize, count: usize) {
        self.notify(ChangeEvent::RangeMoved { from, to, count });
    }
}

impl Default for ChangeObservers {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeObservers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeObservers")
            .field("observer_count", &self.len())
            .finish()
    }
}

/// Keeps an observer subscribed; unsubscribes on drop.
pub struct ChangeSubscription {
    slots: Weak<RefCell<ObserverSlots>>,
    id: Option<ObserverId>,
}

impl ChangeSubscription {
    /// True while the observer is registered and its registry is alive.
    pub fn is_active(&self) -> bool {
        self.id.is_some() && self.slots.strong_count() > 0
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(slots) = self.slots.upgrade() {
                slots.borrow_mut().remove(id);
            }
        }
    }
}

impl Drop for ChangeSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for ChangeSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeSubscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder() -> (Rc<RefCell<Vec<ChangeEvent>>>, impl Fn(&ChangeEvent) + 'static) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        (events, move |event: &ChangeEvent| sink.borrow_mut().push(*event))
    }

    #[test]
    fn test_notify_reaches_observers_in_order() {
        let observers = ChangeObservers::new();
        let (events, record) = recorder();
        let _subscription = observers.subscribe(record);

        observers.notify_range_inserted(3, 2);
        observers.notify_invalidated();

        assert_eq!(
            *events.borrow(),
            vec![
                ChangeEvent::RangeInserted { start: 3, count: 2 },
                ChangeEvent::Invalidated,
            ]
        );
    }

    #[test]
    fn test_drop_unsubscribes() {
        let observers = ChangeObservers::new();
        let (events, record) = recorder();
        let subscription = observers.subscribe(record);
        assert_eq!(observers.len(), 1);

        drop(subscription);
        observers.notify_invalidated();

        assert!(observers.is_empty());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_cancel_after_registry_dropped_is_harmless() {
        let observers = ChangeObservers::new();
        let subscription = observers.subscribe(|_| {});
        assert!(subscription.is_active());

        drop(observers);
        assert!(!subscription.is_active());
        subscription.cancel();
    }

    #[test]
    fn test_observer_may_subscribe_during_dispatch() {
        let observers = Rc::new(ChangeObservers::new());
        let late = Rc::new(RefCell::new(Vec::new()));
        let calls = Rc::new(Cell::new(0));

        let registry = Rc::clone(&observers);
        let late_sink = Rc::clone(&late);
        let counter = Rc::clone(&calls);
        let _first = observers.subscribe(move |_| {
            counter.set(counter.get() + 1);
            late_sink.borrow_mut().push(registry.subscribe(|_| {}));
        });

        observers.notify_invalidated();

        assert_eq!(calls.get(), 1);
        assert_eq!(observers.len(), 2);
    }

    #[test]
    fn test_map_positions_rewrites_both_ends_of_move() {
        let event = ChangeEvent::RangeMoved {
            from: 1,
            to: 4,
            count: 1,
        };
        let mapped = event.try_map_positions(|p| Ok::<usize, ()>(p + 10));
        assert_eq!(
            mapped,
            Ok(ChangeEvent::RangeMoved {
                from: 11,
                to: 14,
                count: 1
            })
        );
        assert_eq!(
            ChangeEvent::Invalidated.try_map_positions(|_| Err("never called")),
            Ok(ChangeEvent::Invalidated)
        );
    }
}
