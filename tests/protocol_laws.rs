//! Property tests for the iteration protocol

use proptest::prelude::*;
use sluice::{materialize, range, range_between, Advance, Counter, Sequence, Step};

use test_helpers::*;

proptest! {
    #[test]
    fn range_materializes_to_prefix(bound in 0i64..500) {
        let values = materialize(range(bound)).expect("range never fails");
        prop_assert_eq!(values, (0..bound).collect::<Vec<_>>());
    }

    #[test]
    fn reversed_range_is_immediately_exhausted(start in any::<i64>(), delta in 0i64..1_000) {
        let stop = start.saturating_sub(delta);
        let mut counter = range_between(start, stop);
        prop_assert_eq!(counter.advance(), Ok(Step::Exhausted));
    }

    #[test]
    fn cursor_reproduces_sequence(items in proptest::collection::vec(any::<i32>(), 0..64)) {
        let copied = materialize((&items).produce_iterator().map(|x| Ok(*x)))
            .expect("cursor never fails");
        prop_assert_eq!(copied, items);
    }

    #[test]
    fn filter_over_map_matches_eager_evaluation(
        start in -100i64..100,
        len in 0i64..200,
        factor in -5i64..5,
        modulus in 1i64..7,
    ) {
        let lazy = Counter::between(start, start + len)
            .map(|x| Ok(x * factor))
            .filter(|x| Ok(x % modulus == 0));
        let eager: Vec<i64> = (start..start + len)
            .map(|x| x * factor)
            .filter(|x| x % modulus == 0)
            .collect();
        prop_assert_eq!(materialize(lazy).expect("pipeline never fails"), eager);
    }

    #[test]
    fn exhaustion_is_sticky_through_adapters(bound in 0i64..50, extra in 1usize..20) {
        let mut pipeline = range(bound).map(|x| Ok(x + 1)).filter(|x| Ok(x % 3 != 0));
        let _ = drain(&mut pipeline);
        assert_stays_exhausted(&mut pipeline, extra);
    }

    #[test]
    fn re_requesting_an_iterator_keeps_its_position(bound in 1i64..50, skip in 0usize..50) {
        let mut counter = range(bound);
        for _ in 0..skip {
            let _ = counter.advance();
        }
        let rest = materialize((&mut counter).produce_iterator()).expect("range never fails");
        let first = (skip as i64).min(bound);
        prop_assert_eq!(rest, (first..bound).collect::<Vec<_>>());
    }
}

#[test]
fn filter_does_not_advance_past_exhaustion() {
    let (probe, calls) = Probe::new(range(3));
    let mut rejecting = probe.filter(|_| Ok(false));

    assert_eq!(rejecting.advance(), Ok(Step::Exhausted));
    // Three values plus the single exhaustion signal.
    assert_eq!(calls.get(), 4);

    assert_eq!(rejecting.advance(), Ok(Step::Exhausted));
    assert_eq!(calls.get(), 5);
}

#[test]
fn each_advance_pulls_through_the_whole_chain_once() {
    let (probe, calls) = Probe::new(range(10));
    let mut chain = probe.map(|x| Ok(x * 10)).map(|x| Ok(x + 1));

    assert_eq!(chain.advance(), Ok(Step::Value(1)));
    assert_eq!(chain.advance(), Ok(Step::Value(11)));
    assert_eq!(calls.get(), 2);
}
