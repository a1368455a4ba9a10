//! Sums of products: the choice of a constructor, together with that constructor's
//! fields.
//!
//! A datatype's code is a list of field lists, one per constructor. [`SOP<F, Xss>`] is
//! a sum over `Xss` whose payload at each position is the product of that
//! constructor's fields, and [`POP<F, Xss>`] holds one such product for every
//! constructor at once, which is the shape of a per-constructor, per-field table.
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::constraint::{All, All2, Constraint};
use crate::position::Select;
use crate::product::NP;
use crate::recursive::{CPolyFn, CSopCoalgebra, PolyFn, SopAlgebra, SopCoalgebra};
use crate::shape::{Cons, Nil, ShapeList};
use crate::sum::{Choice, Void, NS};
use crate::wrapper::{Lift, Wrapper, I, K};

/// A list of field lists.
pub trait Code: ShapeList {
    /// `[NP<F, Xs0>, NP<F, Xs1>, ..]`, the shapes a sum of products chooses between.
    type Products<F: Wrapper>: ShapeList;

    fn cata_sop<F: Wrapper, A: SopAlgebra<F>>(alg: &mut A, sop: SOP<F, Self>) -> A::Out<Self>;

    fn ana_sop<G: Wrapper, Co: SopCoalgebra<G>>(coalg: &mut Co, seed: Co::Seed<Self>)
        -> SOP<G, Self>;
}

impl Code for Nil {
    type Products<F: Wrapper> = Nil;

    fn cata_sop<F: Wrapper, A: SopAlgebra<F>>(_alg: &mut A, sop: SOP<F, Self>) -> A::Out<Self> {
        sop.refute()
    }

    fn ana_sop<G: Wrapper, Co: SopCoalgebra<G>>(
        coalg: &mut Co,
        seed: Co::Seed<Self>,
    ) -> SOP<G, Self> {
        match coalg.refute(seed) {}
    }
}

impl<Xs: ShapeList, Xss: Code> Code for Cons<Xs, Xss> {
    type Products<F: Wrapper> = Cons<NP<F, Xs>, Xss::Products<F>>;

    fn cata_sop<F: Wrapper, A: SopAlgebra<F>>(alg: &mut A, sop: SOP<F, Self>) -> A::Out<Self> {
        match sop.split() {
            Choice::Here(fields) => alg.here::<Xs, Xss>(fields),
            Choice::There(tail) => {
                let out = Xss::cata_sop(alg, tail);
                alg.there::<Xs, Xss>(out)
            }
        }
    }

    fn ana_sop<G: Wrapper, Co: SopCoalgebra<G>>(
        coalg: &mut Co,
        seed: Co::Seed<Self>,
    ) -> SOP<G, Self> {
        match coalg.step::<Xs, Xss>(seed) {
            Choice::Here(fields) => SOP::here(fields),
            Choice::There(seed) => SOP::there(Xss::ana_sop(coalg, seed)),
        }
    }
}

/// A sum of products: one constructor of `Xss` chosen, holding its fields wrapped in `F`.
pub struct SOP<F: Wrapper, Xss: Code>(pub(crate) NS<I, Xss::Products<F>>);

/// A product of products: the fields of every constructor of `Xss`, wrapped in `F`.
pub type POP<F, Xss> = NP<I, <Xss as Code>::Products<F>>;

impl<F: Wrapper, Xs: ShapeList, Xss: Code> SOP<F, Cons<Xs, Xss>> {
    pub fn here(fields: NP<F, Xs>) -> Self {
        SOP(NS::here(fields))
    }

    pub fn there(tail: SOP<F, Xss>) -> Self {
        SOP(NS::there(tail.0))
    }

    pub fn split(self) -> Choice<NP<F, Xs>, SOP<F, Xss>> {
        match self.0.split() {
            Choice::Here(fields) => Choice::Here(fields),
            Choice::There(tail) => Choice::There(SOP(tail)),
        }
    }
}

impl<F: Wrapper> SOP<F, Nil> {
    pub fn refute<R>(self) -> R {
        self.0.refute()
    }
}

impl<F: Wrapper, Xss: Code> SOP<F, Xss> {
    pub fn from_ns(ns: NS<I, Xss::Products<F>>) -> Self {
        SOP(ns)
    }

    pub fn into_ns(self) -> NS<I, Xss::Products<F>> {
        self.0
    }

    /// The chosen constructor. Fields don't affect it.
    pub fn index(&self) -> usize {
        self.0.index()
    }

    /// Choose constructor `N`.
    pub fn inject<N>(fields: <Xss::Products<F> as Select<N>>::Shape) -> Self
    where
        Xss::Products<F>: Select<N>,
    {
        SOP(<Xss::Products<F> as Select<N>>::inject::<I>(fields))
    }

    /// The fields of constructor `N`, if that is the chosen one.
    pub fn project<N>(self) -> Option<<Xss::Products<F> as Select<N>>::Shape>
    where
        Xss::Products<F>: Select<N>,
    {
        <Xss::Products<F> as Select<N>>::project::<I>(self.0)
    }

    /// Apply the chosen constructor's row of `table` to its fields, field by field.
    pub fn ap<'a, G: Wrapper>(self, table: POP<Lift<'a, F, G>, Xss>) -> SOP<G, Xss> {
        Xss::ana_sop(&mut ApSop::<'a, F, G>(PhantomData), (table, self))
    }

    pub fn map<G: Wrapper>(self, f: impl PolyFn<F, G>) -> SOP<G, Xss> {
        Xss::ana_sop(&mut MapSop(f, PhantomData::<F>), self)
    }

    pub fn cmap<C: Constraint, G: Wrapper>(self, f: impl CPolyFn<C, F, G>) -> SOP<G, Xss>
    where
        Xss: All2<C>,
    {
        <Xss as All2<C>>::cana_sop(&mut CMapSop(f, PhantomData::<F>), self)
    }
}

impl<A, Xss: Code> SOP<K<A>, Xss> {
    /// The chosen constructor's fields, in order.
    pub fn collapse(self) -> Vec<A> {
        Xss::cata_sop(&mut CollapseSop, self)
    }
}

struct ApSop<'a, F, G>(PhantomData<(&'a (), F, G)>);

impl<'a, F: Wrapper, G: Wrapper> SopCoalgebra<G> for ApSop<'a, F, G> {
    type Seed<Xss: Code> = (POP<Lift<'a, F, G>, Xss>, SOP<F, Xss>);

    fn refute(&mut self, (_, sop): Self::Seed<Nil>) -> Void {
        sop.refute()
    }

    fn step<Xs: ShapeList, Xss: Code>(
        &mut self,
        (table, sop): Self::Seed<Cons<Xs, Xss>>,
    ) -> Choice<NP<G, Xs>, Self::Seed<Xss>> {
        let (row, table) = table.uncons();
        match sop.split() {
            Choice::Here(fields) => Choice::Here(fields.ap(row)),
            Choice::There(sop) => Choice::There((table, sop)),
        }
    }
}

struct MapSop<P, F>(P, PhantomData<F>);

impl<F: Wrapper, G: Wrapper, P: PolyFn<F, G>> SopCoalgebra<G> for MapSop<P, F> {
    type Seed<Xss: Code> = SOP<F, Xss>;

    fn refute(&mut self, sop: SOP<F, Nil>) -> Void {
        sop.refute()
    }

    fn step<Xs: ShapeList, Xss: Code>(
        &mut self,
        sop: SOP<F, Cons<Xs, Xss>>,
    ) -> Choice<NP<G, Xs>, SOP<F, Xss>> {
        match sop.split() {
            Choice::Here(fields) => Choice::Here(fields.map(&mut self.0)),
            Choice::There(sop) => Choice::There(sop),
        }
    }
}

struct CMapSop<P, F>(P, PhantomData<F>);

impl<C, F, G, P> CSopCoalgebra<C, G> for CMapSop<P, F>
where
    C: Constraint,
    F: Wrapper,
    G: Wrapper,
    P: CPolyFn<C, F, G>,
{
    type Seed<Xss: Code> = SOP<F, Xss>;

    fn refute(&mut self, sop: SOP<F, Nil>) -> Void {
        sop.refute()
    }

    fn step<Xs: All<C>, Xss: All2<C>>(
        &mut self,
        sop: SOP<F, Cons<Xs, Xss>>,
    ) -> Choice<NP<G, Xs>, SOP<F, Xss>> {
        match sop.split() {
            Choice::Here(fields) => Choice::Here(fields.cmap::<C, G>(&mut self.0)),
            Choice::There(sop) => Choice::There(sop),
        }
    }
}

struct CollapseSop;

impl<A> SopAlgebra<K<A>> for CollapseSop {
    type Out<Xss: Code> = Vec<A>;

    fn here<Xs: ShapeList, Xss: Code>(&mut self, fields: NP<K<A>, Xs>) -> Vec<A> {
        fields.collapse()
    }

    fn there<Xs: ShapeList, Xss: Code>(&mut self, tail: Vec<A>) -> Vec<A> {
        tail
    }
}

impl<F: Wrapper, Xss: Code> Clone for SOP<F, Xss>
where
    NS<I, Xss::Products<F>>: Clone,
{
    fn clone(&self) -> Self {
        SOP(self.0.clone())
    }
}

impl<F: Wrapper, Xss: Code> Copy for SOP<F, Xss> where NS<I, Xss::Products<F>>: Copy {}

impl<F: Wrapper, Xss: Code> PartialEq for SOP<F, Xss>
where
    NS<I, Xss::Products<F>>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<F: Wrapper, Xss: Code> Eq for SOP<F, Xss> where NS<I, Xss::Products<F>>: Eq {}

impl<F: Wrapper, Xss: Code> PartialOrd for SOP<F, Xss>
where
    NS<I, Xss::Products<F>>: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl<F: Wrapper, Xss: Code> Ord for SOP<F, Xss>
where
    NS<I, Xss::Products<F>>: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<F: Wrapper, Xss: Code> Hash for SOP<F, Xss>
where
    NS<I, Xss::Products<F>>: Hash,
{
    fn hash<St: Hasher>(&self, state: &mut St) {
        self.0.hash(state)
    }
}

impl<F: Wrapper, Xss: Code> fmt::Debug for SOP<F, Xss>
where
    NS<I, Xss::Products<F>>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SOP").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Show;
    use crate::position::{P0, P2};
    use crate::{np, Shapes};

    // Move(char, bool) | Stop | Jump(i64)
    type Command = Shapes![Shapes![char, bool], Shapes![], Shapes![i64]];

    struct Describe;

    impl CPolyFn<Show, I, K<String>> for Describe {
        fn call<S>(&mut self, show: fn(&S) -> String, value: S) -> String {
            show(&value)
        }
    }

    struct Discard;

    impl PolyFn<I, K<()>> for Discard {
        fn call<S>(&mut self, _value: S) {}
    }

    #[test]
    fn index_ignores_fields() {
        let stop = SOP::<I, Command>::there(SOP::here(NP::nil()));
        assert_eq!(stop.index(), 1);

        let jump = SOP::<I, Command>::inject::<P2>(np![40]);
        assert_eq!(jump.index(), 2);
        assert_eq!(jump.clone().into_ns().index(), 2);
        assert!(jump.project::<P0>().is_none());
    }

    #[test]
    fn collapse_yields_the_chosen_fields() {
        let step = SOP::<I, Command>::inject::<P0>(np!['n', true]);
        let shown = step.cmap::<Show, K<String>>(Describe).collapse();
        assert_eq!(shown, vec!["'n'", "true"]);

        let stop = SOP::<I, Command>::there(SOP::here(NP::nil()));
        assert_eq!(stop.map::<K<()>>(Discard).collapse(), Vec::<()>::new());
    }

    #[test]
    fn ap_threads_a_table_per_constructor() {
        let table: POP<Lift<'_, I, I>, Command> = np![
            np![
                Lift::<I, I>::new(|c: char| c.to_ascii_uppercase()),
                Lift::<I, I>::new(|b: bool| !b),
            ],
            np![],
            np![Lift::<I, I>::new(|n: i64| n + 1)],
        ];
        let step = SOP::<I, Command>::inject::<P0>(np!['w', false]);
        let expected = SOP::<I, Command>::inject::<P0>(np!['W', true]);
        assert_eq!(step.ap(table), expected);
    }

    #[test]
    fn ordering_is_constructor_first() {
        let step = SOP::<I, Command>::inject::<P0>(np!['z', true]);
        let jump = SOP::<I, Command>::inject::<P2>(np![-1]);
        assert!(step < jump);
    }
}
