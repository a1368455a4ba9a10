//! Type-level positions into a shape list.
//!
//! A position is a Peano numeral, `Z` for the head and `Succ<N>` for one past `N`.
//! [`Select<N>`] is implemented for a list only when `N` is in range, so choosing or
//! projecting an out of range position is a type error rather than a runtime one.
use std::marker::PhantomData;

use crate::product::NP;
use crate::shape::{Cons, ShapeList};
use crate::sum::{Choice, NS};
use crate::wrapper::Wrapper;

/// Position zero.
pub enum Z {}

/// One past position `N`.
pub struct Succ<N>(PhantomData<N>);

pub type P0 = Z;
pub type P1 = Succ<P0>;
pub type P2 = Succ<P1>;
pub type P3 = Succ<P2>;
pub type P4 = Succ<P3>;
pub type P5 = Succ<P4>;
pub type P6 = Succ<P5>;
pub type P7 = Succ<P6>;

/// The list has a position `N`, holding `Self::Shape`.
pub trait Select<N>: ShapeList {
    type Shape;

    const INDEX: usize;

    fn inject<F: Wrapper>(payload: F::Apply<Self::Shape>) -> NS<F, Self>;

    fn project<F: Wrapper>(ns: NS<F, Self>) -> Option<F::Apply<Self::Shape>>;

    fn get<F: Wrapper>(np: &NP<F, Self>) -> &F::Apply<Self::Shape>;
}

impl<H, T: ShapeList> Select<Z> for Cons<H, T> {
    type Shape = H;

    const INDEX: usize = 0;

    fn inject<F: Wrapper>(payload: F::Apply<H>) -> NS<F, Self> {
        NS::here(payload)
    }

    fn project<F: Wrapper>(ns: NS<F, Self>) -> Option<F::Apply<H>> {
        match ns.split() {
            Choice::Here(payload) => Some(payload),
            Choice::There(_) => None,
        }
    }

    fn get<F: Wrapper>(np: &NP<F, Self>) -> &F::Apply<H> {
        np.head()
    }
}

impl<H, T, N> Select<Succ<N>> for Cons<H, T>
where
    T: Select<N>,
{
    type Shape = <T as Select<N>>::Shape;

    const INDEX: usize = 1 + <T as Select<N>>::INDEX;

    fn inject<F: Wrapper>(payload: F::Apply<Self::Shape>) -> NS<F, Self> {
        NS::there(<T as Select<N>>::inject::<F>(payload))
    }

    fn project<F: Wrapper>(ns: NS<F, Self>) -> Option<F::Apply<Self::Shape>> {
        match ns.split() {
            Choice::Here(_) => None,
            Choice::There(tail) => <T as Select<N>>::project::<F>(tail),
        }
    }

    fn get<F: Wrapper>(np: &NP<F, Self>) -> &F::Apply<Self::Shape> {
        <T as Select<N>>::get::<F>(np.tail())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrapper::I;
    use crate::Shapes;

    type Fields = Shapes![u8, &'static str, bool, u8];

    #[test]
    fn indices_count_from_the_head() {
        assert_eq!(<Fields as Select<P0>>::INDEX, 0);
        assert_eq!(<Fields as Select<P3>>::INDEX, 3);

        let ns = NS::<I, Fields>::inject::<P3>(9);
        assert_eq!(ns.index(), <Fields as Select<P3>>::INDEX);
        assert_eq!(ns.project::<P3>(), Some(9));
    }

    #[test]
    fn same_shape_different_position() {
        let first = NS::<I, Fields>::inject::<P0>(1);
        let last = NS::<I, Fields>::inject::<P3>(1);
        assert_ne!(first, last);
        assert_eq!(first.project::<P3>(), None);
    }
}
