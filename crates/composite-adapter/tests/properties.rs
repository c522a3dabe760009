//! Laws that hold for any registration layout.

use std::rc::Rc;

use composite_adapter::prelude::*;
use composite_adapter_testing::{TestContext, TestHandle, VecProvider};
use proptest::prelude::*;

type Composite = CompositeAdapter<TestContext, TestHandle>;

/// One provider per entry of `counts`; provider `i` reports kind `i`.
fn build(counts: &[usize]) -> (Composite, Vec<Rc<VecProvider<usize>>>) {
    let composite = Composite::new();
    let providers: Vec<_> = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let items: Vec<usize> = (0..count).collect();
            let provider = VecProvider::uniform(&format!("p{i}"), ItemKind::new(i as u64), items);
            composite.register(provider.clone()).unwrap();
            provider
        })
        .collect();
    (composite, providers)
}

proptest! {
    #[test]
    fn total_count_is_sum_of_counts(counts in prop::collection::vec(0usize..30, 0..8)) {
        let (composite, _providers) = build(&counts);
        prop_assert_eq!(composite.total_count(), counts.iter().sum::<usize>());
    }

    #[test]
    fn resolve_then_rebase_round_trips(counts in prop::collection::vec(0usize..30, 1..8)) {
        let (composite, providers) = build(&counts);
        for absolute in 0..composite.total_count() {
            let resolved = composite.resolve(absolute).unwrap();
            prop_assert!(resolved.relative < resolved.provider.item_count());
            let owner = &providers[resolved.provider_id.index()];
            prop_assert_eq!(composite.rebase(owner, resolved.relative), Ok(absolute));
        }
    }

    #[test]
    fn positions_past_end_are_out_of_range(
        counts in prop::collection::vec(0usize..30, 0..8),
        overshoot in 0usize..100,
    ) {
        let (composite, _providers) = build(&counts);
        let total = composite.total_count();
        let err = composite.resolve(total + overshoot).unwrap_err();
        prop_assert_eq!(err, AdapterError::out_of_range(total + overshoot, total));
    }

    #[test]
    fn routing_never_moves_once_bound(
        counts in prop::collection::vec(1usize..10, 1..6),
        extra in 1usize..5,
    ) {
        let (composite, _providers) = build(&counts);
        for absolute in 0..composite.total_count() {
            composite.kind_at(absolute).unwrap();
        }

        // A late provider claiming kind 0 must not steal it.
        let items: Vec<usize> = (0..extra).collect();
        let impostor = VecProvider::uniform("impostor", ItemKind::new(0), items);
        composite.register(impostor).unwrap();
        let total = composite.total_count();
        prop_assert_eq!(composite.kind_at(total - 1), Ok(ItemKind::new(0)));

        let mut context = TestContext::default();
        let handle = composite.create_for(ItemKind::new(0), &mut context).unwrap();
        prop_assert_eq!(handle.owner, "p0");
        prop_assert_eq!(composite.kind_owner(ItemKind::new(0)), Some(ProviderId::from_index(0)));
    }
}
