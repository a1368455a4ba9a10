//! Algebras and coalgebras for folding and unfolding sums and products over a shape
//! list, one position at a time.
//!
//! Each trait here is consumed by one of the induction methods on [`ShapeList`] or
//! [`Code`] (or, for the constrained variants, on [`crate::All`] and
//! [`crate::All2`]). Every other operation in this crate is one of these folds or
//! unfolds with a particular (co)algebra plugged in.
use crate::constraint::{All, All2, Constraint};
use crate::product::NP;
use crate::shape::{Cons, Nil, ShapeList};
use crate::sop::Code;
use crate::sum::{Choice, Void};
use crate::wrapper::Wrapper;

/// Builds a value indexed by a shape list with no runtime input at all: the
/// structural induction over the list itself.
pub trait ListMotive {
    type Out<Xs: ShapeList>;

    fn nil(&mut self) -> Self::Out<Nil>;

    fn cons<H, T: ShapeList>(&mut self, tail: Self::Out<T>) -> Self::Out<Cons<H, T>>;
}

/// Support for collapsing a sum into a value indexed by its shape list.
///
/// `here` fires when the chosen position is the head of the current list, `there`
/// extends the result of folding the rest of the sum by one position.
pub trait SumAlgebra<F: Wrapper> {
    type Out<Xs: ShapeList>;

    fn here<H, T: ShapeList>(&mut self, head: F::Apply<H>) -> Self::Out<Cons<H, T>>;

    fn there<H, T: ShapeList>(&mut self, tail: Self::Out<T>) -> Self::Out<Cons<H, T>>;
}

/// Support for expanding a sum from a seed, one position at a time.
pub trait SumCoalgebra<G: Wrapper> {
    type Seed<Xs: ShapeList>;

    /// No seed is ever valid for the empty list.
    fn refute(&mut self, seed: Self::Seed<Nil>) -> Void;

    /// Either produce the payload at this position or a seed for the tail.
    fn step<H, T: ShapeList>(
        &mut self,
        seed: Self::Seed<Cons<H, T>>,
    ) -> Choice<G::Apply<H>, Self::Seed<T>>;
}

/// Support for collapsing a product, last field first.
pub trait ProdAlgebra<F: Wrapper> {
    type Out<Xs: ShapeList>;

    fn nil(&mut self) -> Self::Out<Nil>;

    fn cons<H, T: ShapeList>(
        &mut self,
        head: F::Apply<H>,
        tail: Self::Out<T>,
    ) -> Self::Out<Cons<H, T>>;
}

/// Support for expanding a product from a seed, first field first.
pub trait ProdCoalgebra<G: Wrapper> {
    type Seed<Xs: ShapeList>;

    fn step<H, T: ShapeList>(&mut self, seed: Self::Seed<Cons<H, T>>)
        -> (G::Apply<H>, Self::Seed<T>);
}

/// Support for collapsing a sum of products, one constructor at a time. `here`
/// receives the chosen constructor's fields.
pub trait SopAlgebra<F: Wrapper> {
    type Out<Xss: Code>;

    fn here<Xs: ShapeList, Xss: Code>(&mut self, fields: NP<F, Xs>) -> Self::Out<Cons<Xs, Xss>>;

    fn there<Xs: ShapeList, Xss: Code>(&mut self, tail: Self::Out<Xss>) -> Self::Out<Cons<Xs, Xss>>;
}

/// Support for expanding a sum of products from a seed, one constructor at a time.
pub trait SopCoalgebra<G: Wrapper> {
    type Seed<Xss: Code>;

    fn refute(&mut self, seed: Self::Seed<Nil>) -> Void;

    fn step<Xs: ShapeList, Xss: Code>(
        &mut self,
        seed: Self::Seed<Cons<Xs, Xss>>,
    ) -> Choice<NP<G, Xs>, Self::Seed<Xss>>;
}

/// [`ListMotive`], with evidence that `C` holds for each head shape.
pub trait CListMotive<C: Constraint> {
    type Out<Xs: ShapeList>;

    fn nil(&mut self) -> Self::Out<Nil>;

    fn cons<H, T: All<C>>(
        &mut self,
        evidence: C::Dict<H>,
        tail: Self::Out<T>,
    ) -> Self::Out<Cons<H, T>>;
}

/// [`SumAlgebra`], with evidence that `C` holds for the shape at each position.
pub trait CSumAlgebra<C: Constraint, F: Wrapper> {
    type Out<Xs: ShapeList>;

    fn here<H, T: All<C>>(
        &mut self,
        evidence: C::Dict<H>,
        head: F::Apply<H>,
    ) -> Self::Out<Cons<H, T>>;

    fn there<H, T: All<C>>(
        &mut self,
        evidence: C::Dict<H>,
        tail: Self::Out<T>,
    ) -> Self::Out<Cons<H, T>>;
}

/// [`SumCoalgebra`], with evidence that `C` holds for the shape at each position.
pub trait CSumCoalgebra<C: Constraint, G: Wrapper> {
    type Seed<Xs: ShapeList>;

    fn refute(&mut self, seed: Self::Seed<Nil>) -> Void;

    fn step<H, T: All<C>>(
        &mut self,
        evidence: C::Dict<H>,
        seed: Self::Seed<Cons<H, T>>,
    ) -> Choice<G::Apply<H>, Self::Seed<T>>;
}

/// [`ProdAlgebra`], with evidence that `C` holds for each field's shape.
pub trait CProdAlgebra<C: Constraint, F: Wrapper> {
    type Out<Xs: ShapeList>;

    fn nil(&mut self) -> Self::Out<Nil>;

    fn cons<H, T: All<C>>(
        &mut self,
        evidence: C::Dict<H>,
        head: F::Apply<H>,
        tail: Self::Out<T>,
    ) -> Self::Out<Cons<H, T>>;
}

/// [`ProdCoalgebra`], with evidence that `C` holds for each field's shape.
pub trait CProdCoalgebra<C: Constraint, G: Wrapper> {
    type Seed<Xs: ShapeList>;

    fn step<H, T: All<C>>(
        &mut self,
        evidence: C::Dict<H>,
        seed: Self::Seed<Cons<H, T>>,
    ) -> (G::Apply<H>, Self::Seed<T>);
}

/// [`SopAlgebra`] for codes where `C` holds for every field of every constructor.
pub trait CSopAlgebra<C: Constraint, F: Wrapper> {
    type Out<Xss: Code>;

    fn here<Xs: All<C>, Xss: All2<C>>(&mut self, fields: NP<F, Xs>) -> Self::Out<Cons<Xs, Xss>>;

    fn there<Xs: All<C>, Xss: All2<C>>(&mut self, tail: Self::Out<Xss>)
        -> Self::Out<Cons<Xs, Xss>>;
}

/// [`SopCoalgebra`] for codes where `C` holds for every field of every constructor.
pub trait CSopCoalgebra<C: Constraint, G: Wrapper> {
    type Seed<Xss: Code>;

    fn refute(&mut self, seed: Self::Seed<Nil>) -> Void;

    fn step<Xs: All<C>, Xss: All2<C>>(
        &mut self,
        seed: Self::Seed<Cons<Xs, Xss>>,
    ) -> Choice<NP<G, Xs>, Self::Seed<Xss>>;
}

/// A function polymorphic in the slot shape, `F<S> -> G<S>` for every `S`.
///
/// Closures can't be generic, so these are written as a type with a generic method:
///
/// ```rust
/// # use sop::{PolyFn, I, K};
/// struct Discard;
///
/// impl PolyFn<I, K<()>> for Discard {
///     fn call<S>(&mut self, _input: S) {}
/// }
/// ```
pub trait PolyFn<F: Wrapper, G: Wrapper> {
    fn call<S>(&mut self, input: F::Apply<S>) -> G::Apply<S>;
}

/// A two-argument function polymorphic in the slot shape.
pub trait PolyFn2<F: Wrapper, G: Wrapper, H: Wrapper> {
    fn call<S>(&mut self, first: F::Apply<S>, second: G::Apply<S>) -> H::Apply<S>;
}

/// A function defined for every shape satisfying `C`, receiving `C`'s evidence for it.
pub trait CPolyFn<C: Constraint, F: Wrapper, G: Wrapper> {
    fn call<S>(&mut self, evidence: C::Dict<S>, input: F::Apply<S>) -> G::Apply<S>;
}

/// A two-argument [`CPolyFn`].
pub trait CPolyFn2<C: Constraint, F: Wrapper, G: Wrapper, H: Wrapper> {
    fn call<S>(
        &mut self,
        evidence: C::Dict<S>,
        first: F::Apply<S>,
        second: G::Apply<S>,
    ) -> H::Apply<S>;
}

impl<F: Wrapper, G: Wrapper, P: PolyFn<F, G> + ?Sized> PolyFn<F, G> for &mut P {
    fn call<S>(&mut self, input: F::Apply<S>) -> G::Apply<S> {
        (**self).call::<S>(input)
    }
}

impl<F: Wrapper, G: Wrapper, H: Wrapper, P: PolyFn2<F, G, H> + ?Sized> PolyFn2<F, G, H>
    for &mut P
{
    fn call<S>(&mut self, first: F::Apply<S>, second: G::Apply<S>) -> H::Apply<S> {
        (**self).call::<S>(first, second)
    }
}

impl<C: Constraint, F: Wrapper, G: Wrapper, P: CPolyFn<C, F, G> + ?Sized> CPolyFn<C, F, G>
    for &mut P
{
    fn call<S>(&mut self, evidence: C::Dict<S>, input: F::Apply<S>) -> G::Apply<S> {
        (**self).call::<S>(evidence, input)
    }
}

impl<C, F, G, H, P> CPolyFn2<C, F, G, H> for &mut P
where
    C: Constraint,
    F: Wrapper,
    G: Wrapper,
    H: Wrapper,
    P: CPolyFn2<C, F, G, H> + ?Sized,
{
    fn call<S>(
        &mut self,
        evidence: C::Dict<S>,
        first: F::Apply<S>,
        second: G::Apply<S>,
    ) -> H::Apply<S> {
        (**self).call::<S>(evidence, first, second)
    }
}
