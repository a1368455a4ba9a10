//! Injection tables: one builder per position of a shape list, each planting its
//! argument at that position of a sum.
//!
//! A table entry is a plain `fn` pointer. The entry at position `i` of `Cons<H, T>` is
//! the entry at position `i - 1` of `T` followed by [`NS::there`]; that composition is
//! [`Select`]'s successor case, so the table is built by walking the list with a
//! type-level position alongside, and nothing is captured or allocated.
use std::marker::PhantomData;

use tracing::trace;

use crate::position::{Select, Succ, Z};
use crate::product::NP;
use crate::recursive::PolyFn2;
use crate::shape::{Cons, Nil, ShapeList};
use crate::sum::NS;
use crate::wrapper::{Wrapper, K};

/// Wrapper for injection tables: a slot of shape `S` holds a builder from `F<S>` into
/// `NS<F, Xs>`.
pub struct Injection<F, Xs>(PhantomData<F>, PhantomData<Xs>);

impl<F: Wrapper, Xs: ShapeList> Wrapper for Injection<F, Xs> {
    type Apply<S> = InjectionFn<F, Xs, S>;
}

/// A single injection, `F<S> -> NS<F, Xs>`.
pub type InjectionFn<F, Xs, S> = fn(<F as Wrapper>::Apply<S>) -> NS<F, Xs>;

/// `Self` is the suffix of `Xs` starting at position `N`.
///
/// Implemented for every suffix of every list, so `Xs: InjectFrom<F, Xs, Z>` always
/// holds for a concrete `Xs`.
pub trait InjectFrom<F: Wrapper, Xs: ShapeList, N>: ShapeList {
    /// The injections into `Xs` for positions `N..Xs::LEN`.
    fn table() -> NP<Injection<F, Xs>, Self>;
}

impl<F: Wrapper, Xs: ShapeList, N> InjectFrom<F, Xs, N> for Nil {
    fn table() -> NP<Injection<F, Xs>, Self> {
        NP::nil()
    }
}

impl<F, Xs, N, H, T> InjectFrom<F, Xs, N> for Cons<H, T>
where
    F: Wrapper,
    Xs: Select<N, Shape = H>,
    T: InjectFrom<F, Xs, Succ<N>>,
{
    fn table() -> NP<Injection<F, Xs>, Self> {
        let head: InjectionFn<F, Xs, H> = <Xs as Select<N>>::inject::<F>;
        NP::cons(head, T::table())
    }
}

/// The injection table for `Xs`: position `i` holds the injection choosing position `i`.
pub fn injections<F: Wrapper, Xs: InjectFrom<F, Xs, Z>>() -> NP<Injection<F, Xs>, Xs> {
    Xs::table()
}

/// Every sum that chooses one field of `np`, in position order.
pub fn apply_injections<F: Wrapper, Xs: InjectFrom<F, Xs, Z>>(np: NP<F, Xs>) -> Vec<NS<F, Xs>> {
    trace!(len = Xs::LEN, "choosing each field of a product in turn");
    injections::<F, Xs>()
        .zip_with::<F, K<NS<F, Xs>>>(np, Inject)
        .collapse()
}

struct Inject;

impl<F: Wrapper, Xs: ShapeList> PolyFn2<Injection<F, Xs>, F, K<NS<F, Xs>>> for Inject {
    fn call<S>(&mut self, inject: InjectionFn<F, Xs, S>, payload: F::Apply<S>) -> NS<F, Xs> {
        inject(payload)
    }
}
