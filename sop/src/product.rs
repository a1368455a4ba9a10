use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::constraint::{All, Constraint};
use crate::position::Select;
use crate::recursive::{
    CPolyFn, CPolyFn2, CProdCoalgebra, PolyFn, PolyFn2, ProdAlgebra, ProdCoalgebra,
};
use crate::shape::{Cons, Nil, ShapeList};
use crate::wrapper::{Lift, Wrapper, K};

/// An n-ary product: one field of type `F<S>` for every shape `S` of `Xs`, in order.
pub struct NP<F: Wrapper, Xs: ShapeList>(pub(crate) Xs::Prod<F>);

/// Build a product from a list of field values.
///
/// ```rust
/// # use sop::{np, Shapes, I, NP};
/// let fields: NP<I, Shapes![char, bool]> = np!['x', true];
/// assert_eq!(fields.head(), &'x');
/// ```
#[macro_export]
macro_rules! np {
    () => { $crate::NP::nil() };
    ($head:expr $(, $tail:expr)* $(,)?) => { $crate::NP::cons($head, $crate::np![$($tail),*]) };
}

impl<F: Wrapper> NP<F, Nil> {
    pub fn nil() -> Self {
        NP(())
    }
}

impl<F: Wrapper, H, T: ShapeList> NP<F, Cons<H, T>> {
    pub fn cons(head: F::Apply<H>, tail: NP<F, T>) -> Self {
        NP((head, tail))
    }

    pub fn uncons(self) -> (F::Apply<H>, NP<F, T>) {
        self.0
    }

    pub fn head(&self) -> &F::Apply<H> {
        &self.0 .0
    }

    pub fn tail(&self) -> &NP<F, T> {
        &self.0 .1
    }
}

impl<F: Wrapper, Xs: ShapeList> NP<F, Xs> {
    /// Always `Xs::LEN`.
    pub fn len(&self) -> usize {
        Xs::LEN
    }

    pub fn is_empty(&self) -> bool {
        Xs::LEN == 0
    }

    /// The field at position `N`.
    pub fn get<N>(&self) -> &F::Apply<<Xs as Select<N>>::Shape>
    where
        Xs: Select<N>,
    {
        <Xs as Select<N>>::get::<F>(self)
    }

    /// Fill every field by calling `f` once per position, first to last.
    pub fn pure(f: impl PolyFn<K<()>, F>) -> Self {
        Xs::ana_np(&mut PureNp(f), ())
    }

    /// [`NP::pure`] for producers only defined on shapes satisfying `C`.
    pub fn cpure<C: Constraint>(f: impl CPolyFn<C, K<()>, F>) -> Self
    where
        Xs: All<C>,
    {
        <Xs as All<C>>::cana_np(&mut CPureNp(f), ())
    }

    pub fn map<G: Wrapper>(self, f: impl PolyFn<F, G>) -> NP<G, Xs> {
        Xs::ana_np(&mut MapNp(f, PhantomData::<F>), self)
    }

    pub fn cmap<C: Constraint, G: Wrapper>(self, f: impl CPolyFn<C, F, G>) -> NP<G, Xs>
    where
        Xs: All<C>,
    {
        <Xs as All<C>>::cana_np(&mut CMapNp(f, PhantomData::<F>), self)
    }

    /// Apply each transformer in `table` to the field at the same position.
    pub fn ap<'a, G: Wrapper>(self, table: NP<Lift<'a, F, G>, Xs>) -> NP<G, Xs> {
        Xs::ana_np(&mut ApNp::<'a, F, G>(PhantomData), (table, self))
    }

    pub fn zip_with<G: Wrapper, H: Wrapper>(
        self,
        other: NP<G, Xs>,
        f: impl PolyFn2<F, G, H>,
    ) -> NP<H, Xs> {
        Xs::ana_np(&mut ZipNp(f, PhantomData::<(F, G)>), (self, other))
    }

    pub fn czip_with<C: Constraint, G: Wrapper, H: Wrapper>(
        self,
        other: NP<G, Xs>,
        f: impl CPolyFn2<C, F, G, H>,
    ) -> NP<H, Xs>
    where
        Xs: All<C>,
    {
        <Xs as All<C>>::cana_np(&mut CZipNp(f, PhantomData::<(F, G)>), (self, other))
    }
}

impl<A, Xs: ShapeList> NP<K<A>, Xs> {
    /// The fields, in position order.
    pub fn collapse(self) -> Vec<A> {
        // the fold sees the last field first
        let mut reversed = Xs::cata_np(&mut CollapseNp, self);
        reversed.reverse();
        reversed
    }
}

struct PureNp<P>(P);

impl<G: Wrapper, P: PolyFn<K<()>, G>> ProdCoalgebra<G> for PureNp<P> {
    type Seed<Xs: ShapeList> = ();

    fn step<H, T: ShapeList>(&mut self, (): ()) -> (G::Apply<H>, ()) {
        (self.0.call::<H>(()), ())
    }
}

struct CPureNp<P>(P);

impl<C: Constraint, G: Wrapper, P: CPolyFn<C, K<()>, G>> CProdCoalgebra<C, G> for CPureNp<P> {
    type Seed<Xs: ShapeList> = ();

    fn step<H, T: All<C>>(&mut self, evidence: C::Dict<H>, (): ()) -> (G::Apply<H>, ()) {
        (self.0.call::<H>(evidence, ()), ())
    }
}

struct MapNp<P, F>(P, PhantomData<F>);

impl<F: Wrapper, G: Wrapper, P: PolyFn<F, G>> ProdCoalgebra<G> for MapNp<P, F> {
    type Seed<Xs: ShapeList> = NP<F, Xs>;

    fn step<H, T: ShapeList>(&mut self, np: NP<F, Cons<H, T>>) -> (G::Apply<H>, NP<F, T>) {
        let (head, tail) = np.uncons();
        (self.0.call::<H>(head), tail)
    }
}

struct CMapNp<P, F>(P, PhantomData<F>);

impl<C, F, G, P> CProdCoalgebra<C, G> for CMapNp<P, F>
where
    C: Constraint,
    F: Wrapper,
    G: Wrapper,
    P: CPolyFn<C, F, G>,
{
    type Seed<Xs: ShapeList> = NP<F, Xs>;

    fn step<H, T: All<C>>(
        &mut self,
        evidence: C::Dict<H>,
        np: NP<F, Cons<H, T>>,
    ) -> (G::Apply<H>, NP<F, T>) {
        let (head, tail) = np.uncons();
        (self.0.call::<H>(evidence, head), tail)
    }
}

struct ApNp<'a, F, G>(PhantomData<(&'a (), F, G)>);

impl<'a, F: Wrapper, G: Wrapper> ProdCoalgebra<G> for ApNp<'a, F, G> {
    type Seed<Xs: ShapeList> = (NP<Lift<'a, F, G>, Xs>, NP<F, Xs>);

    fn step<H, T: ShapeList>(
        &mut self,
        (table, np): Self::Seed<Cons<H, T>>,
    ) -> (G::Apply<H>, Self::Seed<T>) {
        let (f, table) = table.uncons();
        let (head, tail) = np.uncons();
        (f(head), (table, tail))
    }
}

struct ZipNp<P, F, G>(P, PhantomData<(F, G)>);

impl<F: Wrapper, G: Wrapper, H: Wrapper, P: PolyFn2<F, G, H>> ProdCoalgebra<H> for ZipNp<P, F, G> {
    type Seed<Xs: ShapeList> = (NP<F, Xs>, NP<G, Xs>);

    fn step<X, T: ShapeList>(
        &mut self,
        (left, right): Self::Seed<Cons<X, T>>,
    ) -> (H::Apply<X>, Self::Seed<T>) {
        let (l, left) = left.uncons();
        let (r, right) = right.uncons();
        (self.0.call::<X>(l, r), (left, right))
    }
}

struct CZipNp<P, F, G>(P, PhantomData<(F, G)>);

impl<C, F, G, H, P> CProdCoalgebra<C, H> for CZipNp<P, F, G>
where
    C: Constraint,
    F: Wrapper,
    G: Wrapper,
    H: Wrapper,
    P: CPolyFn2<C, F, G, H>,
{
    type Seed<Xs: ShapeList> = (NP<F, Xs>, NP<G, Xs>);

    fn step<X, T: All<C>>(
        &mut self,
        evidence: C::Dict<X>,
        (left, right): Self::Seed<Cons<X, T>>,
    ) -> (H::Apply<X>, Self::Seed<T>) {
        let (l, left) = left.uncons();
        let (r, right) = right.uncons();
        (self.0.call::<X>(evidence, l, r), (left, right))
    }
}

struct CollapseNp;

impl<A> ProdAlgebra<K<A>> for CollapseNp {
    type Out<Xs: ShapeList> = Vec<A>;

    fn nil(&mut self) -> Vec<A> {
        Vec::new()
    }

    fn cons<H, T: ShapeList>(&mut self, head: A, mut tail: Vec<A>) -> Vec<A> {
        tail.push(head);
        tail
    }
}

impl<F: Wrapper, Xs: ShapeList> Clone for NP<F, Xs>
where
    Xs::Prod<F>: Clone,
{
    fn clone(&self) -> Self {
        NP(self.0.clone())
    }
}

impl<F: Wrapper, Xs: ShapeList> Copy for NP<F, Xs> where Xs::Prod<F>: Copy {}

impl<F: Wrapper, Xs: ShapeList> PartialEq for NP<F, Xs>
where
    Xs::Prod<F>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<F: Wrapper, Xs: ShapeList> Eq for NP<F, Xs> where Xs::Prod<F>: Eq {}

impl<F: Wrapper, Xs: ShapeList> PartialOrd for NP<F, Xs>
where
    Xs::Prod<F>: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl<F: Wrapper, Xs: ShapeList> Ord for NP<F, Xs>
where
    Xs::Prod<F>: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<F: Wrapper, Xs: ShapeList> Hash for NP<F, Xs>
where
    Xs::Prod<F>: Hash,
{
    fn hash<St: Hasher>(&self, state: &mut St) {
        self.0.hash(state)
    }
}

impl<F: Wrapper, Xs: ShapeList> fmt::Debug for NP<F, Xs>
where
    Xs::Prod<F>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NP").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::P2;
    use crate::wrapper::I;
    use crate::Shapes;

    type Fields = Shapes![char, bool, i64];

    struct Zero;

    impl PolyFn<K<()>, K<usize>> for Zero {
        fn call<S>(&mut self, (): ()) -> usize {
            0
        }
    }

    struct Size;

    impl PolyFn<I, K<usize>> for Size {
        fn call<S>(&mut self, _value: S) -> usize {
            std::mem::size_of::<S>()
        }
    }

    #[test]
    fn collapse_keeps_field_order() {
        let fields: NP<I, Fields> = np!['c', true, 3];
        let sizes = fields.map::<K<usize>>(Size);
        assert_eq!(sizes.collapse(), vec![4, 1, 8]);
    }

    #[test]
    fn pure_fills_every_position() {
        let zeros = NP::<K<usize>, Fields>::pure(Zero);
        assert_eq!(zeros.len(), 3);
        assert_eq!(zeros.collapse(), vec![0, 0, 0]);
        assert!(NP::<K<usize>, Shapes![]>::pure(Zero).is_empty());
    }

    #[test]
    fn ap_applies_fieldwise() {
        let fields: NP<I, Fields> = np!['a', false, 10];
        let table: NP<Lift<'_, I, I>, Fields> = np![
            Lift::<I, I>::new(|c: char| c.to_ascii_uppercase()),
            Lift::<I, I>::new(|b: bool| !b),
            Lift::<I, I>::new(|n: i64| n * 2),
        ];
        let expected: NP<I, Fields> = np!['A', true, 20];
        assert_eq!(fields.ap(table), expected);
        assert_eq!(expected.get::<P2>(), &20);
        assert_eq!(expected.tail().head(), &true);
    }
}
