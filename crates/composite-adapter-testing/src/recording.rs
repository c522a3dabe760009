use std::cell::RefCell;
use std::rc::Rc;

use composite_adapter::{ChangeEvent, ChangeObservers, ChangeSubscription};

/// Collects every event delivered to it, in order.
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<ChangeEvent>>>,
    _subscription: ChangeSubscription,
}

impl RecordingObserver {
    /// Subscribes to `observers` until the recorder is dropped.
    pub fn attach(observers: &ChangeObservers) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let subscription = observers.subscribe(move |event| sink.borrow_mut().push(*event));
        Self {
            events,
            _subscription: subscription,
        }
    }

    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events.borrow().clone()
    }

    /// Returns the recorded events and clears the log.
    pub fn take(&self) -> Vec<ChangeEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}
