//! Heterogeneous n-ary sums and products indexed by type-level lists of shapes, and
//! the sums of products built from them.
//!
//! ```rust
//! use sop::{Shapes, NS, I, K, P1};
//!
//! type Fields = Shapes![char, bool, i64];
//!
//! let ns = NS::<I, Fields>::inject::<P1>(true);
//! assert_eq!(ns.index(), 1);
//! assert_eq!(ns.project::<P1>(), Some(true));
//!
//! let constant = NS::<K<i64>, Fields>::inject::<P1>(7);
//! assert_eq!(constant.collapse(), 7);
//! ```
mod constraint;
mod error;
mod injection;
mod position;
mod product;
mod recursive;
mod sequence;
mod shape;
mod sop;
mod sum;
mod wrapper;

pub use constraint::{All, All2, Cloned, Constraint, Defaulted, Equal, Holds, Show};
pub use error::PositionError;
pub use injection::{apply_injections, injections, InjectFrom, Injection, InjectionFn};
pub use position::{Select, Succ, P0, P1, P2, P3, P4, P5, P6, P7, Z};
pub use product::NP;
pub use recursive::{
    CListMotive, CPolyFn, CPolyFn2, CProdAlgebra, CProdCoalgebra, CSopAlgebra, CSopCoalgebra,
    CSumAlgebra, CSumCoalgebra, ListMotive, PolyFn, PolyFn2, ProdAlgebra, ProdCoalgebra, SopAlgebra,
    SopCoalgebra, SumAlgebra, SumCoalgebra,
};
#[cfg(feature = "async")]
pub use sequence::SequenceAsync;
pub use shape::{Cons, Nil, ShapeList};
pub use sop::{Code, POP, SOP};
pub use sum::{Choice, Void, NS};
#[cfg(feature = "async")]
pub use wrapper::Async;
pub use wrapper::{Compose, Effect, Lift, PartiallyApplied, Wrapper, I, K};
