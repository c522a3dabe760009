//! Re-emits a provider's structural events on its composite.

use std::rc::{Rc, Weak};

use crate::composite::CompositeInner;
use crate::{ChangeEvent, ChangeSubscription, ProviderId, SharedProvider};

/// Subscription of one composite to one of its providers.
///
/// Owned by the composite. The callback living in the provider's observer
/// registry only holds a weak reference back to the composite, and dropping
/// the forwarder unsubscribes that callback.
pub(crate) struct ChangeForwarder {
    _subscription: ChangeSubscription,
}

impl ChangeForwarder {
    pub(crate) fn install<Cx: 'static, H: 'static>(
        target: &Rc<CompositeInner<Cx, H>>,
        id: ProviderId,
        provider: &SharedProvider<Cx, H>,
    ) -> Self {
        let target: Weak<CompositeInner<Cx, H>> = Rc::downgrade(target);
        let subscription = provider.observers().subscribe(move |event| {
            match target.upgrade() {
                Some(composite) => forward(&composite, id, *event),
                None => log::debug!("composite dropped; ignoring {:?} from provider {}", event, id),
            }
        });
        Self {
            _subscription: subscription,
        }
    }
}

/// Translates `event` from provider `id` into absolute space and emits it.
///
/// Changes and moves must name existing items of the provider; inserts and
/// removals may start at its end. Events whose positions cannot be rebased
/// are dropped.
fn forward<Cx, H>(composite: &CompositeInner<Cx, H>, id: ProviderId, event: ChangeEvent) {
    let translated = match event {
        ChangeEvent::RangeChanged { .. } | ChangeEvent::RangeMoved { .. } => {
            event.try_map_positions(|relative| composite.rebase_item_slot(id, relative))
        }
        _ => event.try_map_positions(|relative| composite.rebase_slot(id, relative)),
    };
    match translated {
        Ok(absolute) => {
            log::trace!("provider {} {:?} -> {:?}", id, event, absolute);
            composite.observers.notify(absolute);
        }
        Err(err) => log::warn!("dropping {:?} from provider {}: {}", event, id, err),
    }
}
