//! Sequencing tests, synchronous and on a tokio runtime.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use sop::{Async, Compose, PartiallyApplied, PolyFn, I};

pub type Lazy = Compose<Async<'static>, I>;
pub type Maybe = Compose<Option<PartiallyApplied>, I>;

/// A future that bumps `hits` when it is first polled.
pub fn counted<T: Send + 'static>(hits: Arc<AtomicUsize>, value: T) -> BoxFuture<'static, T> {
    async move {
        hits.fetch_add(1, Ordering::SeqCst);
        value
    }
    .boxed()
}

/// Wraps every payload in an already-resolved effect.
pub struct Succeed;

impl PolyFn<I, Maybe> for Succeed {
    fn call<S>(&mut self, input: S) -> Option<S> {
        Some(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sums::{arb_fields, Fields};
    use crate::token::{arb_token, TokenCode};
    use proptest::proptest;
    use sop::{apply_injections, np, NP, NS, P1, P2, SOP};

    fn lazy_fields(hits: &[Arc<AtomicUsize>]) -> NP<Lazy, Fields> {
        np![
            counted(hits[0].clone(), 'q'),
            counted(hits[1].clone(), true),
            counted(hits[2].clone(), 9_i64),
        ]
    }

    fn counters() -> Vec<Arc<AtomicUsize>> {
        (0..3).map(|_| Arc::new(AtomicUsize::new(0))).collect()
    }

    #[tokio::test]
    async fn only_the_chosen_future_runs() {
        let hits = counters();
        let mut choices = apply_injections(lazy_fields(&hits));
        let chosen = choices.remove(1);

        let resolved = chosen.sequence_async().await;
        assert_eq!(resolved.project::<P1>(), Some(true));

        drop(choices);
        let counts: Vec<usize> = hits.iter().map(|h| h.load(Ordering::SeqCst)).collect();
        assert_eq!(counts, vec![0, 1, 0]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn sequenced_sums_can_be_spawned() {
        let hits = counters();
        let handles: Vec<_> = apply_injections(lazy_fields(&hits))
            .into_iter()
            .map(|ns| tokio::spawn(ns.sequence_async()))
            .collect();

        let mut positions = Vec::new();
        for handle in handles {
            positions.push(handle.await.unwrap().index());
        }
        assert_eq!(positions, vec![0, 1, 2]);
        assert!(hits.iter().all(|h| h.load(Ordering::SeqCst) == 1));
    }

    proptest! {
        #[test]
        fn succeeding_effect_keeps_the_sum(ns in arb_fields()) {
            let wrapped = ns.clone().map::<Maybe>(Succeed);
            assert_eq!(wrapped.sequence(), Some(ns));
        }

        #[test]
        fn succeeding_effect_keeps_the_representation(token in arb_token()) {
            let sop = token.into_sop();
            let wrapped = sop.clone().map::<Maybe>(Succeed);
            assert_eq!(wrapped.sequence(), Some(sop));
        }

        #[test]
        fn async_sequence_polls_one_future(position in 0usize..3) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let hits = counters();

            let resolved: NS<I, Fields> = rt.block_on(async {
                let mut choices = apply_injections(lazy_fields(&hits));
                choices.swap_remove(position).sequence_async().await
            });

            assert_eq!(resolved.index(), position);
            for (i, h) in hits.iter().enumerate() {
                assert_eq!(h.load(Ordering::SeqCst), usize::from(i == position));
            }
        }
    }

    #[test]
    fn token_fields_sequence_in_order() {
        let sop = SOP::<I, TokenCode>::inject::<P2>(np!['s', false]);
        assert_eq!(sop.clone().map::<Maybe>(Succeed).sequence(), Some(sop));
    }
}
