use std::marker::PhantomData;

/// A one-argument type constructor applied to every slot shape of a sum or product.
///
/// # Motivation
///
/// The same [`crate::NS`] / [`crate::NP`] skeleton is reused for plain values, constant
/// values, boxed transformers, effects and so on. What changes is only what each slot
/// holds for a given shape `S`, and that is what `Apply<S>` describes.
///
/// # Implementing this trait
///
/// Rust does not allow implementing a trait for a partially applied type: we can
/// implement a trait for `Option<usize>` but not for just `Option`. The convention
/// is to implement it for a token type, using the uninhabited [`PartiallyApplied`]
/// marker in the position that is left open, eg
///
/// ```rust
/// # use sop::{PartiallyApplied, Wrapper};
/// enum MyOption<A> {
///     Some(A),
///     None,
/// }
///
/// impl Wrapper for MyOption<PartiallyApplied> {
///     type Apply<S> = MyOption<S>;
/// }
/// ```
pub trait Wrapper {
    /// the type a slot of shape `S` holds
    type Apply<S>;
}

/// "An uninhabited type used to define [`Wrapper`] instances for partially-applied types."
///
/// For example: the Wrapper instance for `Option<A>` cannot be written over the
/// partially-applied type `Option`, so instead we write it over `Option<PartiallyApplied>`
#[derive(Clone, Debug)]
pub enum PartiallyApplied {}

/// The identity wrapper: a slot of shape `S` holds an `S`.
pub enum I {}

impl Wrapper for I {
    type Apply<S> = S;
}

/// The constant wrapper: every slot holds an `A`, whatever its shape.
pub struct K<A>(PhantomData<A>);

impl<A> Wrapper for K<A> {
    type Apply<S> = A;
}

/// Wrapper composition, `F1` on the outside: a slot of shape `S` holds `F1<F2<S>>`.
pub struct Compose<F1, F2>(PhantomData<F1>, PhantomData<F2>);

impl<F1: Wrapper, F2: Wrapper> Wrapper for Compose<F1, F2> {
    type Apply<S> = F1::Apply<F2::Apply<S>>;
}

/// One-shot, shape-preserving transformers: a slot of shape `S` holds a boxed
/// `F<S> -> G<S>` function. A product of these is the table consumed by `ap`.
pub struct Lift<'a, F, G>(PhantomData<&'a ()>, PhantomData<F>, PhantomData<G>);

impl<'a, F: Wrapper, G: Wrapper> Wrapper for Lift<'a, F, G> {
    type Apply<S> = Box<dyn FnOnce(F::Apply<S>) -> G::Apply<S> + 'a>;
}

impl<'a, F: Wrapper, G: Wrapper> Lift<'a, F, G> {
    /// Box a transformer for the slot of shape `S`.
    pub fn new<S>(
        f: impl FnOnce(F::Apply<S>) -> G::Apply<S> + 'a,
    ) -> Box<dyn FnOnce(F::Apply<S>) -> G::Apply<S> + 'a> {
        Box::new(f)
    }
}

impl Wrapper for Option<PartiallyApplied> {
    type Apply<S> = Option<S>;
}

impl<E> Wrapper for Result<PartiallyApplied, E> {
    type Apply<S> = Result<S, E>;
}

/// A boxed, `Send` future resolving to the slot's shape.
#[cfg(feature = "async")]
pub type Async<'a> = futures::future::BoxFuture<'a, PartiallyApplied>;

#[cfg(feature = "async")]
impl<'a> Wrapper for futures::future::BoxFuture<'a, PartiallyApplied> {
    type Apply<S> = futures::future::BoxFuture<'a, S>;
}

/// An effect that sums and products can be sequenced through.
///
/// Sequencing a sum only ever needs `map`, since exactly one slot is populated.
/// Sequencing a product needs `pure` for the empty product and `zip_with` to run
/// the effects of two slots in order, the first argument's effect first.
pub trait Effect: Wrapper {
    fn pure<A>(value: A) -> Self::Apply<A>;

    fn map<A, B>(input: Self::Apply<A>, f: impl FnOnce(A) -> B) -> Self::Apply<B>;

    fn zip_with<A, B, C>(
        first: Self::Apply<A>,
        second: Self::Apply<B>,
        f: impl FnOnce(A, B) -> C,
    ) -> Self::Apply<C>;
}

impl Effect for I {
    fn pure<A>(value: A) -> A {
        value
    }

    fn map<A, B>(input: A, f: impl FnOnce(A) -> B) -> B {
        f(input)
    }

    fn zip_with<A, B, C>(first: A, second: B, f: impl FnOnce(A, B) -> C) -> C {
        f(first, second)
    }
}

impl Effect for Option<PartiallyApplied> {
    fn pure<A>(value: A) -> Option<A> {
        Some(value)
    }

    fn map<A, B>(input: Option<A>, f: impl FnOnce(A) -> B) -> Option<B> {
        input.map(f)
    }

    fn zip_with<A, B, C>(
        first: Option<A>,
        second: Option<B>,
        f: impl FnOnce(A, B) -> C,
    ) -> Option<C> {
        first.zip(second).map(|(a, b)| f(a, b))
    }
}

impl<E> Effect for Result<PartiallyApplied, E> {
    fn pure<A>(value: A) -> Result<A, E> {
        Ok(value)
    }

    fn map<A, B>(input: Result<A, E>, f: impl FnOnce(A) -> B) -> Result<B, E> {
        input.map(f)
    }

    // the first error, in argument order, wins
    fn zip_with<A, B, C>(
        first: Result<A, E>,
        second: Result<B, E>,
        f: impl FnOnce(A, B) -> C,
    ) -> Result<C, E> {
        first.and_then(|a| second.map(|b| f(a, b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_zip_keeps_first_error() {
        type R = Result<PartiallyApplied, &'static str>;
        let first: Result<u8, _> = Err("first");
        let second: Result<u8, _> = Err("second");
        let zipped = <R as Effect>::zip_with(first, second, |a, b| a + b);
        assert_eq!(zipped, Err("first"));

        let zipped = <R as Effect>::zip_with(Ok(1u8), Ok(2u8), |a, b| a + b);
        assert_eq!(zipped, Ok(3));
    }

    #[test]
    fn option_effect() {
        type O = Option<PartiallyApplied>;
        assert_eq!(<O as Effect>::pure(3), Some(3));
        assert_eq!(<O as Effect>::zip_with(Some(1u8), None::<u8>, |a, b| a + b), None);
        assert_eq!(<O as Effect>::map(Some(2u8), |x| x * 2), Some(4));
    }
}
