use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use tracing::debug;

use crate::constraint::{All, Constraint};
use crate::error::PositionError;
use crate::position::Select;
use crate::product::NP;
use crate::recursive::{CPolyFn, CPolyFn2, CSumCoalgebra, PolyFn, PolyFn2, SumAlgebra, SumCoalgebra};
use crate::shape::{Cons, Nil, ShapeList};
use crate::wrapper::{Lift, Wrapper, K};

/// The uninhabited type: the representation of a sum over the empty shape list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Void {}

/// One step of a sum: either the chosen position is this one, or it is further out.
///
/// Variant order matters: `Here` sorts before `There`, so sums compare by position first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Choice<A, B> {
    Here(A),
    There(B),
}

/// An n-ary sum: exactly one position `p` of the shape list `Xs` is chosen, and it
/// holds a payload of type `F<Xs[p]>`.
///
/// `NS<F, Nil>` is uninhabited.
pub struct NS<F: Wrapper, Xs: ShapeList>(pub(crate) Xs::Sum<F>);

impl<F: Wrapper, H, T: ShapeList> NS<F, Cons<H, T>> {
    /// The sum with the first position chosen.
    pub fn here(head: F::Apply<H>) -> Self {
        NS(Choice::Here(head))
    }

    /// Move an already-built sum over the tail one position further out.
    ///
    /// Only the outer tag is rewrapped, the payload is never inspected.
    pub fn there(tail: NS<F, T>) -> Self {
        NS(Choice::There(tail))
    }

    pub fn split(self) -> Choice<F::Apply<H>, NS<F, T>> {
        self.0
    }
}

impl<F: Wrapper> NS<F, Nil> {
    /// There is no sum over the empty list, so this can produce whatever is asked for.
    pub fn refute<R>(self) -> R {
        match self.0 {}
    }
}

impl<F: Wrapper, S> NS<F, Cons<S, Nil>> {
    /// A sum over a single shape always has that shape chosen.
    pub fn unwrap_single(self) -> F::Apply<S> {
        match self.split() {
            Choice::Here(payload) => payload,
            Choice::There(empty) => empty.refute(),
        }
    }
}

impl<F: Wrapper, Xs: ShapeList> NS<F, Xs> {
    /// The chosen position, in `[0, Xs::LEN)`.
    pub fn index(&self) -> usize {
        Xs::index_of(self)
    }

    /// Choose position `N`.
    pub fn inject<N>(payload: F::Apply<<Xs as Select<N>>::Shape>) -> Self
    where
        Xs: Select<N>,
    {
        <Xs as Select<N>>::inject::<F>(payload)
    }

    /// The payload at position `N`, if that is the chosen one.
    pub fn project<N>(self) -> Option<F::Apply<<Xs as Select<N>>::Shape>>
    where
        Xs: Select<N>,
    {
        <Xs as Select<N>>::project::<F>(self)
    }

    /// Apply the transformer at the chosen position of `table` to the payload.
    pub fn ap<'a, G: Wrapper>(self, table: NP<Lift<'a, F, G>, Xs>) -> NS<G, Xs> {
        Xs::ana_ns(&mut ApNs::<'a, F, G>(PhantomData), (table, self))
    }

    /// Transform the payload, whatever position is chosen.
    pub fn map<G: Wrapper>(self, f: impl PolyFn<F, G>) -> NS<G, Xs> {
        Xs::ana_ns(&mut MapNs(f, PhantomData::<F>), self)
    }

    /// Transform the payload with a function only defined for shapes satisfying `C`.
    pub fn cmap<C: Constraint, G: Wrapper>(self, f: impl CPolyFn<C, F, G>) -> NS<G, Xs>
    where
        Xs: All<C>,
    {
        <Xs as All<C>>::cana_ns(&mut CMapNs(f, PhantomData::<F>), self)
    }

    /// Combine the payload with the matching field of `firsts`.
    pub fn zip_with<G: Wrapper, H: Wrapper>(
        self,
        firsts: NP<G, Xs>,
        f: impl PolyFn2<G, F, H>,
    ) -> NS<H, Xs> {
        Xs::ana_ns(&mut ZipNs(f, PhantomData::<(G, F)>), (firsts, self))
    }

    pub fn czip_with<C: Constraint, G: Wrapper, H: Wrapper>(
        self,
        firsts: NP<G, Xs>,
        f: impl CPolyFn2<C, G, F, H>,
    ) -> NS<H, Xs>
    where
        Xs: All<C>,
    {
        <Xs as All<C>>::cana_ns(&mut CZipNs(f, PhantomData::<(G, F)>), (firsts, self))
    }
}

impl<A, Xs: ShapeList> NS<K<A>, Xs> {
    /// Every position holds an `A`, so the chosen one can be returned as-is.
    pub fn collapse(self) -> A {
        Xs::cata_ns(&mut CollapseNs, self)
    }

    /// Choose a position known only at runtime. Positions outside `[0, Xs::LEN)` are
    /// rejected here, before any sum is built.
    pub fn from_position(position: usize, value: A) -> Result<Self, PositionError> {
        if position >= Xs::LEN {
            debug!(position, len = Xs::LEN, "rejecting out of range position");
            return Err(PositionError::OutOfRange {
                position,
                len: Xs::LEN,
            });
        }

        Ok(Xs::ana_ns(&mut FromPosition, (position, value)))
    }
}

struct ApNs<'a, F, G>(PhantomData<(&'a (), F, G)>);

impl<'a, F: Wrapper, G: Wrapper> SumCoalgebra<G> for ApNs<'a, F, G> {
    type Seed<Xs: ShapeList> = (NP<Lift<'a, F, G>, Xs>, NS<F, Xs>);

    fn refute(&mut self, (_, ns): Self::Seed<Nil>) -> Void {
        ns.refute()
    }

    fn step<H, T: ShapeList>(
        &mut self,
        (table, ns): Self::Seed<Cons<H, T>>,
    ) -> Choice<G::Apply<H>, Self::Seed<T>> {
        let (f, table) = table.uncons();
        match ns.split() {
            Choice::Here(payload) => Choice::Here(f(payload)),
            Choice::There(ns) => Choice::There((table, ns)),
        }
    }
}

struct MapNs<P, F>(P, PhantomData<F>);

impl<F: Wrapper, G: Wrapper, P: PolyFn<F, G>> SumCoalgebra<G> for MapNs<P, F> {
    type Seed<Xs: ShapeList> = NS<F, Xs>;

    fn refute(&mut self, ns: NS<F, Nil>) -> Void {
        ns.refute()
    }

    fn step<H, T: ShapeList>(&mut self, ns: NS<F, Cons<H, T>>) -> Choice<G::Apply<H>, NS<F, T>> {
        match ns.split() {
            Choice::Here(payload) => Choice::Here(self.0.call::<H>(payload)),
            Choice::There(ns) => Choice::There(ns),
        }
    }
}

struct CMapNs<P, F>(P, PhantomData<F>);

impl<C, F, G, P> CSumCoalgebra<C, G> for CMapNs<P, F>
where
    C: Constraint,
    F: Wrapper,
    G: Wrapper,
    P: CPolyFn<C, F, G>,
{
    type Seed<Xs: ShapeList> = NS<F, Xs>;

    fn refute(&mut self, ns: NS<F, Nil>) -> Void {
        ns.refute()
    }

    fn step<H, T: All<C>>(
        &mut self,
        evidence: C::Dict<H>,
        ns: NS<F, Cons<H, T>>,
    ) -> Choice<G::Apply<H>, NS<F, T>> {
        match ns.split() {
            Choice::Here(payload) => Choice::Here(self.0.call::<H>(evidence, payload)),
            Choice::There(ns) => Choice::There(ns),
        }
    }
}

struct ZipNs<P, G, F>(P, PhantomData<(G, F)>);

impl<F: Wrapper, G: Wrapper, H: Wrapper, P: PolyFn2<G, F, H>> SumCoalgebra<H> for ZipNs<P, G, F> {
    type Seed<Xs: ShapeList> = (NP<G, Xs>, NS<F, Xs>);

    fn refute(&mut self, (_, ns): Self::Seed<Nil>) -> Void {
        ns.refute()
    }

    fn step<X, T: ShapeList>(
        &mut self,
        (firsts, ns): Self::Seed<Cons<X, T>>,
    ) -> Choice<H::Apply<X>, Self::Seed<T>> {
        let (first, firsts) = firsts.uncons();
        match ns.split() {
            Choice::Here(second) => Choice::Here(self.0.call::<X>(first, second)),
            Choice::There(ns) => Choice::There((firsts, ns)),
        }
    }
}

struct CZipNs<P, G, F>(P, PhantomData<(G, F)>);

impl<C, F, G, H, P> CSumCoalgebra<C, H> for CZipNs<P, G, F>
where
    C: Constraint,
    F: Wrapper,
    G: Wrapper,
    H: Wrapper,
    P: CPolyFn2<C, G, F, H>,
{
    type Seed<Xs: ShapeList> = (NP<G, Xs>, NS<F, Xs>);

    fn refute(&mut self, (_, ns): Self::Seed<Nil>) -> Void {
        ns.refute()
    }

    fn step<X, T: All<C>>(
        &mut self,
        evidence: C::Dict<X>,
        (firsts, ns): Self::Seed<Cons<X, T>>,
    ) -> Choice<H::Apply<X>, Self::Seed<T>> {
        let (first, firsts) = firsts.uncons();
        match ns.split() {
            Choice::Here(second) => Choice::Here(self.0.call::<X>(evidence, first, second)),
            Choice::There(ns) => Choice::There((firsts, ns)),
        }
    }
}

struct CollapseNs;

impl<A> SumAlgebra<K<A>> for CollapseNs {
    type Out<Xs: ShapeList> = A;

    fn here<H, T: ShapeList>(&mut self, head: A) -> A {
        head
    }

    fn there<H, T: ShapeList>(&mut self, tail: A) -> A {
        tail
    }
}

struct FromPosition;

impl<A> SumCoalgebra<K<A>> for FromPosition {
    type Seed<Xs: ShapeList> = (usize, A);

    fn refute(&mut self, _seed: (usize, A)) -> Void {
        unreachable!("position was checked against the list length")
    }

    fn step<H, T: ShapeList>(&mut self, (position, value): (usize, A)) -> Choice<A, (usize, A)> {
        match position {
            0 => Choice::Here(value),
            _ => Choice::There((position - 1, value)),
        }
    }
}

impl<F: Wrapper, Xs: ShapeList> Clone for NS<F, Xs>
where
    Xs::Sum<F>: Clone,
{
    fn clone(&self) -> Self {
        NS(self.0.clone())
    }
}

impl<F: Wrapper, Xs: ShapeList> Copy for NS<F, Xs> where Xs::Sum<F>: Copy {}

impl<F: Wrapper, Xs: ShapeList> PartialEq for NS<F, Xs>
where
    Xs::Sum<F>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<F: Wrapper, Xs: ShapeList> Eq for NS<F, Xs> where Xs::Sum<F>: Eq {}

impl<F: Wrapper, Xs: ShapeList> PartialOrd for NS<F, Xs>
where
    Xs::Sum<F>: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl<F: Wrapper, Xs: ShapeList> Ord for NS<F, Xs>
where
    Xs::Sum<F>: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<F: Wrapper, Xs: ShapeList> Hash for NS<F, Xs>
where
    Xs::Sum<F>: Hash,
{
    fn hash<St: Hasher>(&self, state: &mut St) {
        self.0.hash(state)
    }
}

impl<F: Wrapper, Xs: ShapeList> fmt::Debug for NS<F, Xs>
where
    Xs::Sum<F>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NS").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{P0, P1, P2};
    use crate::wrapper::I;
    use crate::{np, Shapes};

    type Fields = Shapes![char, bool, i64];

    #[test]
    fn choose_inspect_and_collapse() {
        let ns = NS::<I, Fields>::inject::<P1>(true);
        assert_eq!(ns.index(), 1);
        assert_eq!(ns.project::<P1>(), Some(true));
        assert_eq!(ns.project::<P0>(), None);

        let constant = NS::<K<i64>, Fields>::inject::<P1>(42);
        assert_eq!(constant.index(), 1);
        assert_eq!(constant.collapse(), 42);
        assert_eq!(NS::<K<i64>, Fields>::inject::<P2>(42).collapse(), 42);
    }

    #[test]
    fn unwrap_single_position() {
        let ns = NS::<I, Shapes![String]>::here("only".to_string());
        assert_eq!(ns.index(), 0);
        assert_eq!(ns.unwrap_single(), "only");
    }

    #[test]
    fn ordering_is_position_first() {
        let low = NS::<I, Shapes![i64, i64]>::here(100);
        let high = NS::<I, Shapes![i64, i64]>::there(NS::here(-100));
        assert!(low < high);
        assert!(NS::<I, Shapes![i64, i64]>::here(1) < low);
        assert_ne!(low, NS::there(NS::here(100)));
    }

    #[test]
    fn from_position_checks_range() {
        let ns = NS::<K<&str>, Fields>::from_position(2, "x").unwrap();
        assert_eq!(ns.index(), 2);
        assert_eq!(
            NS::<K<&str>, Fields>::from_position(3, "x"),
            Err(PositionError::OutOfRange { position: 3, len: 3 })
        );
    }

    #[test]
    fn ap_uses_the_chosen_transformer() {
        let table: NP<Lift<'_, I, K<String>>, Fields> = np![
            Lift::<I, K<String>>::new(|c: char| format!("char {c}")),
            Lift::<I, K<String>>::new(|b: bool| format!("bool {b}")),
            Lift::<I, K<String>>::new(|n: i64| format!("int {n}")),
        ];
        let ns = NS::<I, Fields>::inject::<P2>(7);
        let applied = ns.ap(table);
        assert_eq!(applied.index(), 2);
        assert_eq!(applied.collapse(), "int 7");
    }

    struct Pair;

    impl PolyFn2<I, I, K<bool>> for Pair {
        fn call<S>(&mut self, _first: S, _second: S) -> bool {
            true
        }
    }

    #[test]
    fn zip_with_keeps_position() {
        let ns = NS::<I, Fields>::inject::<P0>('z');
        let firsts: NP<I, Fields> = np!['a', false, 0];
        let zipped = ns.zip_with::<I, K<bool>>(firsts, Pair);
        assert_eq!(zipped.index(), 0);
        assert!(zipped.collapse());
    }
}
