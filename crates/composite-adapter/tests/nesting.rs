//! Composites registered inside other composites.

use std::rc::Rc;

use composite_adapter::prelude::*;
use composite_adapter_testing::{RecordingObserver, TestContext, TestHandle, VecProvider};

type Composite = CompositeAdapter<TestContext, TestHandle>;

struct Nested {
    outer: Composite,
    inner: Rc<Composite>,
    header: Rc<VecProvider<&'static str>>,
    body: Rc<VecProvider<u32>>,
    footer: Rc<VecProvider<&'static str>>,
}

/// outer = [header(1), inner = [body(5)], footer(1)]
fn nested() -> Nested {
    let header = VecProvider::uniform("header", ItemKind::new(10), vec!["top"]);
    let body = VecProvider::uniform("body", ItemKind::new(20), (0..5u32).collect());
    let footer = VecProvider::uniform("footer", ItemKind::new(30), vec!["bottom"]);

    let inner = Rc::new(Composite::new());
    inner.register(body.clone()).unwrap();

    let outer = Composite::new();
    outer.register(header.clone()).unwrap();
    outer.register(inner.clone()).unwrap();
    outer.register(footer.clone()).unwrap();

    Nested {
        outer,
        inner,
        header,
        body,
        footer,
    }
}

#[test]
fn test_nested_counts_and_binding() {
    let n = nested();
    let mut context = TestContext::default();

    assert_eq!(n.outer.total_count(), 7);
    assert_eq!(n.outer.kind_at(3), Ok(ItemKind::new(20)));

    let mut handle = n.outer.create_for(ItemKind::new(20), &mut context).unwrap();
    n.outer.bind_at(&mut handle, 3).unwrap();

    assert_eq!(handle.owner, "body");
    assert_eq!(handle.bound.as_deref(), Some("body:2"));
    // The inner composite learned the binding on the way through.
    assert_eq!(n.inner.kind_owner(ItemKind::new(20)), Some(ProviderId::from_index(0)));
    assert_eq!(n.outer.kind_owner(ItemKind::new(20)), Some(ProviderId::from_index(1)));
}

#[test]
fn test_nested_events_are_rebased_twice() {
    let n = nested();
    let host = RecordingObserver::attach(n.outer.observers());

    n.body.remove(4);
    n.footer.set(0, "end");
    n.header.insert(0, "pre");

    assert_eq!(
        host.events(),
        vec![
            ChangeEvent::RangeRemoved { start: 5, count: 1 },
            ChangeEvent::RangeChanged { start: 5, count: 1 },
            ChangeEvent::RangeInserted { start: 0, count: 1 },
        ]
    );
}

#[test]
fn test_inner_composite_counts_as_attached() {
    let n = nested();
    assert!(n.inner.is_attached());

    let rejecting = Rc::new(Composite::with_config(
        CompositeConfig::default().with_late_registration(LateRegistration::Reject),
    ));
    let outer = Composite::new();
    outer.register(rejecting.clone()).unwrap();

    assert_eq!(
        rejecting.register(VecProvider::uniform("late", ItemKind::new(1), vec![1u32])),
        Err(AdapterError::LateRegistration)
    );
}
