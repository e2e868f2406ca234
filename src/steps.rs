//! Ready-made steps for the common filtering and transforming verbs.
//!
//! Every constructor here returns a concrete [`Step`](crate::Step) (or
//! [`Reduce`](crate::Reduce), for [`reducing()`]) that can be driven directly,
//! fused with [`Step::pipe()`](crate::Step::pipe), or boxed into a
//! [`Pipe`](crate::Pipe).

mod filter;
mod hooked;
mod lift;
mod limit;
mod resettable;
mod take;
#[cfg(feature = "alloc")]
mod uniq;

pub use filter::{Filter, FilterEq, filter, filter_eq};
pub use hooked::Hooked;
pub use lift::{ApplyFn, FromFn, Identity, Reducing, apply_fn, from_fn, identity, reducing};
pub use limit::{Limit, limit};
pub use resettable::Resettable;
pub use take::{TakeFrom, TakeUntil, TakeWhile, skip, take_from, take_until, take_while};
#[cfg(feature = "alloc")]
pub use uniq::{Uniq, UniqBy, uniq, uniq_by};
