//! Core module containing the keyed counter and its supporting types.
//!
//! # Architecture
//!
//! A [`KeyedCounter`] is a thin layer over a [`hashbrown::HashTable`] of
//! `(key, count)` pairs. The table is driven entirely by the counter: it
//! computes hashes through the configured [`BuildHasher`](std::hash::BuildHasher)
//! and [`KeyEquivalence`](crate::equivalence::KeyEquivalence), and it is the
//! only place where entries are inserted or removed.
//!
//! ```text
//!               add / subtract / set / remove
//!                            │
//!                            ▼
//!   ┌──────────────────────────────────────────────┐
//!   │ argument checks (key, addend, value)         │── InvalidArgument
//!   ├──────────────────────────────────────────────┤
//!   │ hash = E::hash_key(key) through S            │
//!   │ lookup with E::equivalent                    │
//!   ├──────────────────────────────────────────────┤
//!   │ checked arithmetic on the stored count       │── Overflow
//!   │ count == 0  ──►  entry removed               │
//!   └──────────────────────────────────────────────┘
//! ```
//!
//! Every stored count is strictly positive: a counter that drops to zero
//! leaves the table, so `len()`, `contains()`, `keys()` and `iter()` only
//! ever see live counters.

pub mod iter;
pub mod keyed;

pub use iter::{IntoIter, Iter, Keys, KeysIter};
pub use keyed::KeyedCounter;

use num_traits::{PrimInt, Signed};
use std::fmt::{Debug, Display};

/// Integer type usable as a count.
///
/// Counts are signed so that out-of-contract arguments (a negative addend
/// or assignment) can be expressed and rejected, mirroring the checks of
/// every mutating operation. Implemented for all primitive signed integers.
///
/// # Examples
///
/// ```rust
/// use contachiavi::counters::{Count, KeyedCounter};
///
/// fn max_of<C: Count>() -> C {
///     C::max_value()
/// }
///
/// assert_eq!(max_of::<i8>(), 127);
///
/// let mut wide: KeyedCounter<&str, i64> = KeyedCounter::new();
/// wide.set("big", i64::from(i32::MAX) + 1).unwrap();
/// assert_eq!(wide.get(&"big"), 2_147_483_648);
/// ```
pub trait Count: PrimInt + Signed + Debug + Display {}

impl<T: PrimInt + Signed + Debug + Display> Count for T {}
