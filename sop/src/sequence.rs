//! Commuting an effect out of a sum, product or sum of products.
//!
//! A structure whose slots hold `M<F<S>>` becomes a single `M<..>` of the structure
//! holding `F<S>`. For a sum only the chosen slot's effect exists, so only it runs.
use std::marker::PhantomData;

use tracing::trace;

use crate::product::NP;
use crate::recursive::{ProdAlgebra, SopAlgebra, SumAlgebra};
use crate::shape::{Cons, Nil, ShapeList};
use crate::sop::{Code, SOP};
use crate::sum::NS;
use crate::wrapper::{Compose, Effect, Wrapper};

impl<M: Effect, F: Wrapper, Xs: ShapeList> NS<Compose<M, F>, Xs> {
    /// Run the chosen payload's effect, keeping the position.
    pub fn sequence(self) -> M::Apply<NS<F, Xs>> {
        trace!(position = self.index(), len = Xs::LEN, "sequencing sum");
        Xs::cata_ns(&mut SequenceNs(PhantomData::<(M, F)>), self)
    }
}

impl<M: Effect, F: Wrapper, Xs: ShapeList> NP<Compose<M, F>, Xs> {
    /// Run every field's effect, first field first.
    pub fn sequence(self) -> M::Apply<NP<F, Xs>> {
        Xs::cata_np(&mut SequenceNp(PhantomData::<(M, F)>), self)
    }
}

impl<M: Effect, F: Wrapper, Xss: Code> SOP<Compose<M, F>, Xss> {
    /// Run the effects of the chosen constructor's fields, in field order.
    pub fn sequence(self) -> M::Apply<SOP<F, Xss>> {
        trace!(constructor = self.index(), "sequencing sum of products");
        Xss::cata_sop(&mut SequenceSop(PhantomData::<(M, F)>), self)
    }
}

struct SequenceNs<M, F>(PhantomData<(M, F)>);

impl<M: Effect, F: Wrapper> SumAlgebra<Compose<M, F>> for SequenceNs<M, F> {
    type Out<Xs: ShapeList> = M::Apply<NS<F, Xs>>;

    fn here<H, T: ShapeList>(
        &mut self,
        head: M::Apply<F::Apply<H>>,
    ) -> M::Apply<NS<F, Cons<H, T>>> {
        M::map::<F::Apply<H>, NS<F, Cons<H, T>>>(head, NS::here)
    }

    fn there<H, T: ShapeList>(
        &mut self,
        tail: M::Apply<NS<F, T>>,
    ) -> M::Apply<NS<F, Cons<H, T>>> {
        M::map::<NS<F, T>, NS<F, Cons<H, T>>>(tail, NS::there)
    }
}

struct SequenceNp<M, F>(PhantomData<(M, F)>);

impl<M: Effect, F: Wrapper> ProdAlgebra<Compose<M, F>> for SequenceNp<M, F> {
    type Out<Xs: ShapeList> = M::Apply<NP<F, Xs>>;

    fn nil(&mut self) -> M::Apply<NP<F, Nil>> {
        M::pure::<NP<F, Nil>>(NP::nil())
    }

    fn cons<H, T: ShapeList>(
        &mut self,
        head: M::Apply<F::Apply<H>>,
        tail: M::Apply<NP<F, T>>,
    ) -> M::Apply<NP<F, Cons<H, T>>> {
        M::zip_with::<F::Apply<H>, NP<F, T>, NP<F, Cons<H, T>>>(head, tail, NP::cons)
    }
}

struct SequenceSop<M, F>(PhantomData<(M, F)>);

impl<M: Effect, F: Wrapper> SopAlgebra<Compose<M, F>> for SequenceSop<M, F> {
    type Out<Xss: Code> = M::Apply<SOP<F, Xss>>;

    fn here<Xs: ShapeList, Xss: Code>(
        &mut self,
        fields: NP<Compose<M, F>, Xs>,
    ) -> M::Apply<SOP<F, Cons<Xs, Xss>>> {
        M::map::<NP<F, Xs>, SOP<F, Cons<Xs, Xss>>>(fields.sequence(), SOP::here)
    }

    fn there<Xs: ShapeList, Xss: Code>(
        &mut self,
        tail: M::Apply<SOP<F, Xss>>,
    ) -> M::Apply<SOP<F, Cons<Xs, Xss>>> {
        M::map::<SOP<F, Xss>, SOP<F, Cons<Xs, Xss>>>(tail, SOP::there)
    }
}

#[cfg(feature = "async")]
pub use self::asynchronous::SequenceAsync;

#[cfg(feature = "async")]
mod asynchronous {
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use tracing::trace;

    use crate::shape::{Cons, Nil, ShapeList};
    use crate::sum::{Choice, NS};
    use crate::wrapper::{Async, Compose, Wrapper};

    /// Sums over this list can have a boxed future commuted out of them.
    ///
    /// Every shape, and the wrapper, must outlive the futures' lifetime `'a`, so this
    /// is its own induction rather than a [`crate::SumAlgebra`].
    pub trait SequenceAsync<'a, F: Wrapper>: ShapeList {
        fn sequence_async(ns: NS<Compose<Async<'a>, F>, Self>) -> BoxFuture<'a, NS<F, Self>>;
    }

    impl<'a, F: Wrapper> SequenceAsync<'a, F> for Nil {
        fn sequence_async(ns: NS<Compose<Async<'a>, F>, Self>) -> BoxFuture<'a, NS<F, Self>> {
            ns.refute()
        }
    }

    impl<'a, F, H, T> SequenceAsync<'a, F> for Cons<H, T>
    where
        F: Wrapper + 'a,
        H: 'a,
        T: SequenceAsync<'a, F> + 'a,
    {
        fn sequence_async(ns: NS<Compose<Async<'a>, F>, Self>) -> BoxFuture<'a, NS<F, Self>> {
            match ns.split() {
                Choice::Here(payload) => payload.map(NS::<F, Self>::here).boxed(),
                Choice::There(tail) => T::sequence_async(tail).map(NS::<F, Self>::there).boxed(),
            }
        }
    }

    impl<'a, F: Wrapper, Xs: SequenceAsync<'a, F>> NS<Compose<Async<'a>, F>, Xs> {
        /// Await the chosen payload. Futures are lazy, and only the chosen one exists,
        /// so nothing else is ever polled.
        pub fn sequence_async(self) -> BoxFuture<'a, NS<F, Xs>> {
            trace!(position = self.index(), len = Xs::LEN, "sequencing sum asynchronously");
            Xs::sequence_async(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{P0, P1, P2};
    use crate::wrapper::{PartiallyApplied, I};
    use crate::{np, Shapes};

    type Fields = Shapes![char, bool, i64];
    type Checked = Compose<Result<PartiallyApplied, String>, I>;
    type Maybe = Compose<Option<PartiallyApplied>, I>;

    #[test]
    fn sum_runs_only_the_chosen_effect() {
        let ns = NS::<Checked, Fields>::inject::<P1>(Ok(true));
        let resolved = ns.sequence().unwrap();
        assert_eq!(resolved.index(), 1);
        assert_eq!(resolved.project::<P1>(), Some(true));

        let failed = NS::<Checked, Fields>::inject::<P2>(Err("no int".to_string()));
        assert_eq!(failed.sequence(), Err("no int".to_string()));
    }

    #[test]
    fn product_needs_every_effect() {
        let all: NP<Maybe, Fields> = np![Some('k'), Some(false), Some(3)];
        let expected: NP<I, Fields> = np!['k', false, 3];
        assert_eq!(all.sequence(), Some(expected));

        let missing: NP<Maybe, Fields> = np![Some('k'), None, Some(3)];
        assert_eq!(missing.sequence(), None);
    }

    #[test]
    fn product_reports_the_first_failing_field() {
        let fields: NP<Checked, Fields> = np![
            Ok('a'),
            Err("second".to_string()),
            Err("third".to_string())
        ];
        assert_eq!(fields.sequence(), Err("second".to_string()));
    }

    #[test]
    fn sum_of_products_sequences_the_chosen_fields() {
        type Command = Shapes![Shapes![char, bool], Shapes![i64]];
        let sop = SOP::<Maybe, Command>::inject::<P0>(np![Some('r'), Some(true)]);
        let expected = SOP::<I, Command>::inject::<P0>(np!['r', true]);
        assert_eq!(sop.sequence(), Some(expected));

        let missing = SOP::<Maybe, Command>::inject::<P0>(np![Some('r'), None]);
        assert_eq!(missing.sequence(), None);

        let other = SOP::<Maybe, Command>::inject::<P1>(np![Some(5)]);
        assert_eq!(other.sequence().map(|sop| sop.index()), Some(1));
    }
}
