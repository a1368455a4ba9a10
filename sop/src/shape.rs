use std::marker::PhantomData;

use crate::product::NP;
use crate::recursive::{ListMotive, ProdAlgebra, ProdCoalgebra, SumAlgebra, SumCoalgebra};
use crate::sum::{Choice, Void, NS};
use crate::wrapper::Wrapper;

/// The empty shape list.
pub struct Nil;

/// A shape list with head shape `H` and tail list `T`.
///
/// Never constructed; it only indexes [`NS`] and [`NP`]. Usually written with the
/// [`crate::Shapes!`] macro.
pub struct Cons<H, T>(PhantomData<H>, PhantomData<T>);

/// Build a shape list type from a list of types.
///
/// ```rust
/// # use sop::{Cons, Nil, Shapes};
/// type Fields = Shapes![char, bool, i64];
/// let _same: Option<Cons<char, Cons<bool, Cons<i64, Nil>>>> = None::<Fields>;
/// ```
#[macro_export]
macro_rules! Shapes {
    () => { $crate::Nil };
    ($head:ty $(, $tail:ty)* $(,)?) => { $crate::Cons<$head, $crate::Shapes![$($tail),*]> };
}

/// A compile-time list of slot shapes, and the structural induction over it.
///
/// Every method here is implemented once for [`Nil`] and once for [`Cons`]; the
/// `Cons` impl recurses into its tail, so each call is monomorphised into straight-line
/// code for the concrete list. Operations on sums and products are written as
/// (co)algebras passed to these methods.
pub trait ShapeList: Sized {
    /// the number of positions in the list
    const LEN: usize;

    /// the runtime representation of `NS<F, Self>`
    type Sum<F: Wrapper>;

    /// the runtime representation of `NP<F, Self>`
    type Prod<F: Wrapper>;

    /// "if the list is empty, do `nil`; otherwise extend the result for the tail with `cons`"
    fn fold_list<M: ListMotive>(motive: &mut M) -> M::Out<Self>;

    /// Position of the chosen case, counted up from the head.
    fn index_of<F: Wrapper>(ns: &NS<F, Self>) -> usize;

    /// Collapse a sum using some algebra, folding the chosen position and then
    /// every position in front of it.
    fn cata_ns<F: Wrapper, A: SumAlgebra<F>>(alg: &mut A, ns: NS<F, Self>) -> A::Out<Self>;

    /// Expand a sum from a seed, stepping down the list until a payload is produced.
    fn ana_ns<G: Wrapper, C: SumCoalgebra<G>>(coalg: &mut C, seed: C::Seed<Self>) -> NS<G, Self>;

    fn cata_np<F: Wrapper, A: ProdAlgebra<F>>(alg: &mut A, np: NP<F, Self>) -> A::Out<Self>;

    fn ana_np<G: Wrapper, C: ProdCoalgebra<G>>(coalg: &mut C, seed: C::Seed<Self>) -> NP<G, Self>;
}

impl ShapeList for Nil {
    const LEN: usize = 0;

    type Sum<F: Wrapper> = Void;
    type Prod<F: Wrapper> = ();

    fn fold_list<M: ListMotive>(motive: &mut M) -> M::Out<Self> {
        motive.nil()
    }

    fn index_of<F: Wrapper>(ns: &NS<F, Self>) -> usize {
        match ns.0 {}
    }

    fn cata_ns<F: Wrapper, A: SumAlgebra<F>>(_alg: &mut A, ns: NS<F, Self>) -> A::Out<Self> {
        ns.refute()
    }

    fn ana_ns<G: Wrapper, C: SumCoalgebra<G>>(coalg: &mut C, seed: C::Seed<Self>) -> NS<G, Self> {
        match coalg.refute(seed) {}
    }

    fn cata_np<F: Wrapper, A: ProdAlgebra<F>>(alg: &mut A, _np: NP<F, Self>) -> A::Out<Self> {
        alg.nil()
    }

    fn ana_np<G: Wrapper, C: ProdCoalgebra<G>>(_coalg: &mut C, _seed: C::Seed<Self>) -> NP<G, Self> {
        NP::nil()
    }
}

impl<H, T: ShapeList> ShapeList for Cons<H, T> {
    const LEN: usize = 1 + T::LEN;

    type Sum<F: Wrapper> = Choice<F::Apply<H>, NS<F, T>>;
    type Prod<F: Wrapper> = (F::Apply<H>, NP<F, T>);

    fn fold_list<M: ListMotive>(motive: &mut M) -> M::Out<Self> {
        let tail = T::fold_list(motive);
        motive.cons::<H, T>(tail)
    }

    fn index_of<F: Wrapper>(ns: &NS<F, Self>) -> usize {
        match &ns.0 {
            Choice::Here(_) => 0,
            Choice::There(tail) => 1 + T::index_of(tail),
        }
    }

    fn cata_ns<F: Wrapper, A: SumAlgebra<F>>(alg: &mut A, ns: NS<F, Self>) -> A::Out<Self> {
        match ns.split() {
            Choice::Here(head) => alg.here::<H, T>(head),
            Choice::There(tail) => {
                let out = T::cata_ns(alg, tail);
                alg.there::<H, T>(out)
            }
        }
    }

    fn ana_ns<G: Wrapper, C: SumCoalgebra<G>>(coalg: &mut C, seed: C::Seed<Self>) -> NS<G, Self> {
        match coalg.step::<H, T>(seed) {
            Choice::Here(payload) => NS::here(payload),
            Choice::There(seed) => NS::there(T::ana_ns(coalg, seed)),
        }
    }

    fn cata_np<F: Wrapper, A: ProdAlgebra<F>>(alg: &mut A, np: NP<F, Self>) -> A::Out<Self> {
        let (head, tail) = np.uncons();
        let tail = T::cata_np(alg, tail);
        alg.cons::<H, T>(head, tail)
    }

    fn ana_np<G: Wrapper, C: ProdCoalgebra<G>>(coalg: &mut C, seed: C::Seed<Self>) -> NP<G, Self> {
        let (head, seed) = coalg.step::<H, T>(seed);
        NP::cons(head, T::ana_np(coalg, seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lengths;

    impl ListMotive for Lengths {
        type Out<Xs: ShapeList> = Vec<usize>;

        fn nil(&mut self) -> Vec<usize> {
            vec![0]
        }

        fn cons<H, T: ShapeList>(&mut self, mut tail: Vec<usize>) -> Vec<usize> {
            tail.push(<Cons<H, T>>::LEN);
            tail
        }
    }

    #[test]
    fn fold_list_visits_every_suffix() {
        assert_eq!(<Shapes![u8, u16, u32]>::fold_list(&mut Lengths), vec![0, 1, 2, 3]);
        assert_eq!(Nil::fold_list(&mut Lengths), vec![0]);
        assert_eq!(<Shapes![(), (), (), (), ()]>::LEN, 5);
    }
}
