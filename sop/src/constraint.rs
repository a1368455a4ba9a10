//! Capability predicates over shapes, and the evidence that they hold for every shape
//! in a list.
//!
//! Rust can't abstract over traits directly, so a predicate is a token type
//! implementing [`Constraint`]. Its evidence for a shape `S` is a dictionary value
//! `Dict<S>`, usually a function pointer, produced by [`Holds::evidence`]. [`All<C>`]
//! holds for a list when `C` holds for every shape in it, and its induction methods hand
//! each position's evidence to the (co)algebra along with the position's payload.
use std::fmt::Debug;

use crate::product::NP;
use crate::recursive::{
    CListMotive, CProdAlgebra, CProdCoalgebra, CSopAlgebra, CSopCoalgebra, CSumAlgebra,
    CSumCoalgebra,
};
use crate::shape::{Cons, Nil, ShapeList};
use crate::sop::{Code, SOP};
use crate::sum::{Choice, NS};
use crate::wrapper::Wrapper;

/// A predicate over shapes, and the shape of its evidence.
pub trait Constraint {
    type Dict<S>;
}

/// `Self` holds for the shape `S`.
pub trait Holds<S>: Constraint {
    fn evidence() -> Self::Dict<S>;
}

/// `C` holds for every shape in the list.
pub trait All<C: Constraint>: ShapeList {
    fn cfold_list<M: CListMotive<C>>(motive: &mut M) -> M::Out<Self>;

    fn ccata_ns<F: Wrapper, A: CSumAlgebra<C, F>>(alg: &mut A, ns: NS<F, Self>) -> A::Out<Self>;

    fn cana_ns<G: Wrapper, Co: CSumCoalgebra<C, G>>(
        coalg: &mut Co,
        seed: Co::Seed<Self>,
    ) -> NS<G, Self>;

    fn ccata_np<F: Wrapper, A: CProdAlgebra<C, F>>(alg: &mut A, np: NP<F, Self>) -> A::Out<Self>;

    fn cana_np<G: Wrapper, Co: CProdCoalgebra<C, G>>(
        coalg: &mut Co,
        seed: Co::Seed<Self>,
    ) -> NP<G, Self>;
}

impl<C: Constraint> All<C> for Nil {
    fn cfold_list<M: CListMotive<C>>(motive: &mut M) -> M::Out<Self> {
        motive.nil()
    }

    fn ccata_ns<F: Wrapper, A: CSumAlgebra<C, F>>(_alg: &mut A, ns: NS<F, Self>) -> A::Out<Self> {
        ns.refute()
    }

    fn cana_ns<G: Wrapper, Co: CSumCoalgebra<C, G>>(
        coalg: &mut Co,
        seed: Co::Seed<Self>,
    ) -> NS<G, Self> {
        match coalg.refute(seed) {}
    }

    fn ccata_np<F: Wrapper, A: CProdAlgebra<C, F>>(alg: &mut A, _np: NP<F, Self>) -> A::Out<Self> {
        alg.nil()
    }

    fn cana_np<G: Wrapper, Co: CProdCoalgebra<C, G>>(
        _coalg: &mut Co,
        _seed: Co::Seed<Self>,
    ) -> NP<G, Self> {
        NP::nil()
    }
}

impl<C, H, T> All<C> for Cons<H, T>
where
    C: Holds<H>,
    T: All<C>,
{
    fn cfold_list<M: CListMotive<C>>(motive: &mut M) -> M::Out<Self> {
        let tail = T::cfold_list(motive);
        motive.cons::<H, T>(<C as Holds<H>>::evidence(), tail)
    }

    fn ccata_ns<F: Wrapper, A: CSumAlgebra<C, F>>(alg: &mut A, ns: NS<F, Self>) -> A::Out<Self> {
        match ns.split() {
            Choice::Here(head) => alg.here::<H, T>(<C as Holds<H>>::evidence(), head),
            Choice::There(tail) => {
                let out = T::ccata_ns(alg, tail);
                alg.there::<H, T>(<C as Holds<H>>::evidence(), out)
            }
        }
    }

    fn cana_ns<G: Wrapper, Co: CSumCoalgebra<C, G>>(
        coalg: &mut Co,
        seed: Co::Seed<Self>,
    ) -> NS<G, Self> {
        match coalg.step::<H, T>(<C as Holds<H>>::evidence(), seed) {
            Choice::Here(payload) => NS::here(payload),
            Choice::There(seed) => NS::there(T::cana_ns(coalg, seed)),
        }
    }

    fn ccata_np<F: Wrapper, A: CProdAlgebra<C, F>>(alg: &mut A, np: NP<F, Self>) -> A::Out<Self> {
        let (head, tail) = np.uncons();
        let tail = T::ccata_np(alg, tail);
        alg.cons::<H, T>(<C as Holds<H>>::evidence(), head, tail)
    }

    fn cana_np<G: Wrapper, Co: CProdCoalgebra<C, G>>(
        coalg: &mut Co,
        seed: Co::Seed<Self>,
    ) -> NP<G, Self> {
        let (head, seed) = coalg.step::<H, T>(<C as Holds<H>>::evidence(), seed);
        NP::cons(head, T::cana_np(coalg, seed))
    }
}

/// `C` holds for every field of every constructor in the code.
pub trait All2<C: Constraint>: Code {
    fn ccata_sop<F: Wrapper, A: CSopAlgebra<C, F>>(alg: &mut A, sop: SOP<F, Self>) -> A::Out<Self>;

    fn cana_sop<G: Wrapper, Co: CSopCoalgebra<C, G>>(
        coalg: &mut Co,
        seed: Co::Seed<Self>,
    ) -> SOP<G, Self>;
}

impl<C: Constraint> All2<C> for Nil {
    fn ccata_sop<F: Wrapper, A: CSopAlgebra<C, F>>(
        _alg: &mut A,
        sop: SOP<F, Self>,
    ) -> A::Out<Self> {
        sop.refute()
    }

    fn cana_sop<G: Wrapper, Co: CSopCoalgebra<C, G>>(
        coalg: &mut Co,
        seed: Co::Seed<Self>,
    ) -> SOP<G, Self> {
        match coalg.refute(seed) {}
    }
}

impl<C: Constraint, Xs: All<C>, Xss: All2<C>> All2<C> for Cons<Xs, Xss> {
    fn ccata_sop<F: Wrapper, A: CSopAlgebra<C, F>>(alg: &mut A, sop: SOP<F, Self>) -> A::Out<Self> {
        match sop.split() {
            Choice::Here(fields) => alg.here::<Xs, Xss>(fields),
            Choice::There(tail) => {
                let out = <Xss as All2<C>>::ccata_sop(alg, tail);
                alg.there::<Xs, Xss>(out)
            }
        }
    }

    fn cana_sop<G: Wrapper, Co: CSopCoalgebra<C, G>>(
        coalg: &mut Co,
        seed: Co::Seed<Self>,
    ) -> SOP<G, Self> {
        match coalg.step::<Xs, Xss>(seed) {
            Choice::Here(fields) => SOP::here(fields),
            Choice::There(seed) => SOP::there(<Xss as All2<C>>::cana_sop(coalg, seed)),
        }
    }
}

/// Shapes that can be formatted with `Debug`.
pub enum Show {}

impl Constraint for Show {
    type Dict<S> = fn(&S) -> String;
}

impl<S: Debug> Holds<S> for Show {
    fn evidence() -> fn(&S) -> String {
        |value| format!("{value:?}")
    }
}

/// Shapes that can be compared with `PartialEq`.
pub enum Equal {}

impl Constraint for Equal {
    type Dict<S> = fn(&S, &S) -> bool;
}

impl<S: PartialEq> Holds<S> for Equal {
    fn evidence() -> fn(&S, &S) -> bool {
        |a, b| a == b
    }
}

/// Shapes that can be duplicated with `Clone`.
pub enum Cloned {}

impl Constraint for Cloned {
    type Dict<S> = fn(&S) -> S;
}

impl<S: Clone> Holds<S> for Cloned {
    fn evidence() -> fn(&S) -> S {
        S::clone
    }
}

/// Shapes with a `Default` value.
pub enum Defaulted {}

impl Constraint for Defaulted {
    type Dict<S> = fn() -> S;
}

impl<S: Default> Holds<S> for Defaulted {
    fn evidence() -> fn() -> S {
        S::default
    }
}
