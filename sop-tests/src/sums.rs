//! Property tests for sums, products and the recursion schemes over them.
use proptest::prelude::*;
use sop::{
    Choice, Cons, Nil, PartiallyApplied, PolyFn, ShapeList, Shapes, SumAlgebra, SumCoalgebra,
    Void, I, K, NP, NS, P0, P1, P2, P3,
};

pub type Fields = Shapes![char, bool, i64];
pub type Wide = Shapes![u8, String, bool, i64];

pub fn arb_fields() -> impl Strategy<Value = NS<I, Fields>> {
    prop_oneof![
        any::<char>().prop_map(NS::<I, Fields>::inject::<P0>),
        any::<bool>().prop_map(NS::<I, Fields>::inject::<P1>),
        any::<i64>().prop_map(NS::<I, Fields>::inject::<P2>),
    ]
}

pub fn arb_wide() -> impl Strategy<Value = NS<I, Wide>> {
    prop_oneof![
        any::<u8>().prop_map(NS::<I, Wide>::inject::<P0>),
        ".{0,12}".prop_map(NS::<I, Wide>::inject::<P1>),
        any::<bool>().prop_map(NS::<I, Wide>::inject::<P2>),
        any::<i64>().prop_map(NS::<I, Wide>::inject::<P3>),
    ]
}

type Slot = Option<PartiallyApplied>;

/// Fold a sum into a product with only the chosen slot filled.
pub struct Spread;

impl SumAlgebra<I> for Spread {
    type Out<Xs: ShapeList> = NP<Slot, Xs>;

    fn here<H, T: ShapeList>(&mut self, head: H) -> NP<Slot, Cons<H, T>> {
        NP::cons(Some(head), NP::<Slot, T>::pure(Empty))
    }

    fn there<H, T: ShapeList>(&mut self, tail: NP<Slot, T>) -> NP<Slot, Cons<H, T>> {
        NP::cons(None, tail)
    }
}

struct Empty;

impl PolyFn<K<()>, Slot> for Empty {
    fn call<S>(&mut self, (): ()) -> Option<S> {
        None
    }
}

/// Unfold a sum by choosing the first filled slot.
pub struct Gather;

impl SumCoalgebra<I> for Gather {
    type Seed<Xs: ShapeList> = NP<Slot, Xs>;

    fn refute(&mut self, _seed: NP<Slot, Nil>) -> Void {
        unreachable!("a spread sum has exactly one filled slot")
    }

    fn step<H, T: ShapeList>(&mut self, seed: NP<Slot, Cons<H, T>>) -> Choice<H, NP<Slot, T>> {
        match seed.uncons() {
            (Some(head), _) => Choice::Here(head),
            (None, tail) => Choice::There(tail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::proptest;
    use sop::{apply_injections, injections, np, CPolyFn, Show};

    struct Describe;

    impl CPolyFn<Show, I, K<String>> for Describe {
        fn call<S>(&mut self, show: fn(&S) -> String, value: S) -> String {
            show(&value)
        }
    }

    struct Id;

    impl PolyFn<I, I> for Id {
        fn call<S>(&mut self, input: S) -> S {
            input
        }
    }

    fn payload(ns: &NS<I, Fields>) -> String {
        ns.clone().cmap::<Show, K<String>>(Describe).collapse()
    }

    #[test]
    fn char_bool_int_scenario() {
        let ns = NS::<I, Fields>::inject::<P1>(true);
        assert_eq!(ns.index(), 1);
        assert_eq!(ns.project::<P1>(), Some(true));

        for position in 0..3 {
            let constant = NS::<K<i64>, Fields>::from_position(position, 42).unwrap();
            assert_eq!(constant.collapse(), 42);
        }
    }

    #[test]
    fn injection_table_matches_positions() {
        let table = injections::<I, Wide>();
        assert_eq!(table.len(), 4);
        assert_eq!((table.get::<P3>())(5).index(), 3);
    }

    proptest! {
        #[test]
        fn index_is_in_range(ns in arb_fields(), wide in arb_wide()) {
            assert!(ns.index() < Fields::LEN);
            assert!(wide.index() < Wide::LEN);
        }

        #[test]
        fn equal_iff_same_position_and_payload(a in arb_fields(), b in arb_fields()) {
            let same = a.index() == b.index() && payload(&a) == payload(&b);
            assert_eq!(a == b, same);
            if a.index() != b.index() {
                assert_eq!(a < b, a.index() < b.index());
            }
        }

        #[test]
        fn map_identity(ns in arb_wide()) {
            let mapped = ns.clone().map::<I>(Id);
            assert_eq!(mapped.index(), ns.index());
            assert_eq!(mapped, ns);
        }

        #[test]
        fn unwrap_single_returns_payload(s in ".*") {
            assert_eq!(NS::<I, Shapes![String]>::here(s.clone()).unwrap_single(), s);
        }

        #[test]
        fn injections_enumerate_positions(c in any::<char>(), b in any::<bool>(), n in any::<i64>()) {
            let fields: NP<I, Fields> = np![c, b, n];
            let choices = apply_injections(fields);
            let positions: Vec<usize> = choices.iter().map(NS::index).collect();
            assert_eq!(positions, vec![0, 1, 2]);
            assert_eq!(choices[0].clone().project::<P0>(), Some(c));
            assert_eq!(choices[1].clone().project::<P1>(), Some(b));
            assert_eq!(choices[2].clone().project::<P2>(), Some(n));
        }

        #[test]
        fn fold_then_unfold_round_trips(ns in arb_fields(), wide in arb_wide()) {
            let spread = Fields::cata_ns(&mut Spread, ns.clone());
            assert_eq!(Fields::ana_ns(&mut Gather, spread), ns);

            let spread = Wide::cata_ns(&mut Spread, wide.clone());
            assert_eq!(Wide::ana_ns(&mut Gather, spread), wide);
        }

        #[test]
        fn from_position_rejects_out_of_range(position in 3usize..64) {
            assert!(NS::<K<()>, Fields>::from_position(position, ()).is_err());
        }
    }
}
